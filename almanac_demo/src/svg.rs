// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG writer for `almanac_demo`.

use kurbo::{Affine, BezPath, Line, Point, Rect};
use peniko::Color;

/// An SVG document built element by element, back to front.
#[derive(Debug)]
pub(crate) struct SvgDocument {
    view_box: Rect,
    body: String,
}

impl SvgDocument {
    pub(crate) fn new(view_box: Rect) -> Self {
        Self {
            view_box,
            body: String::new(),
        }
    }

    pub(crate) fn rect(&mut self, rect: Rect, fill: Color) {
        self.body.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}""#,
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height(),
        ));
        write_paint_attr(&mut self.body, "fill", fill);
        self.body.push_str("/>\n");
    }

    pub(crate) fn outline(&mut self, rect: Rect, stroke: Color, stroke_width: f64) {
        self.body.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none""#,
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height(),
        ));
        write_paint_attr(&mut self.body, "stroke", stroke);
        self.body
            .push_str(&format!(r#" stroke-width="{stroke_width}"/>"#));
        self.body.push('\n');
    }

    pub(crate) fn path(&mut self, path: &BezPath, stroke: Color, stroke_width: f64) {
        if path.elements().is_empty() {
            return;
        }
        let d = path.to_svg();
        self.body
            .push_str(&format!(r#"<path d="{d}" fill="none" stroke-linejoin="round""#));
        write_paint_attr(&mut self.body, "stroke", stroke);
        self.body
            .push_str(&format!(r#" stroke-width="{stroke_width}"/>"#));
        self.body.push('\n');
    }

    pub(crate) fn line(&mut self, line: Line, stroke: Color, stroke_width: f64) {
        self.body.push_str(&format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
            line.p0.x, line.p0.y, line.p1.x, line.p1.y
        ));
        write_paint_attr(&mut self.body, "stroke", stroke);
        self.body
            .push_str(&format!(r#" stroke-width="{stroke_width}"/>"#));
        self.body.push('\n');
    }

    pub(crate) fn text(&mut self, pos: Point, font_size: f64, text: &str) {
        self.body.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="{font_size}" text-anchor="middle">"#,
            pos.x, pos.y
        ));
        self.body.push_str(&escape_xml(text));
        self.body.push_str("</text>\n");
    }

    pub(crate) fn begin_group(&mut self, transform: Affine) {
        let [a, b, c, d, e, f] = transform.as_coeffs();
        self.body.push_str(&format!(
            r#"<g transform="matrix({a} {b} {c} {d} {e} {f})">"#
        ));
        self.body.push('\n');
    }

    pub(crate) fn end_group(&mut self) {
        self.body.push_str("</g>\n");
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let v = self.view_box;
        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        out.push_str(&format!(
            r#"viewBox="{} {} {} {}" width="{}" height="{}" preserveAspectRatio="xMinYMin meet">"#,
            v.x0,
            v.y0,
            v.width(),
            v.height(),
            v.width(),
            v.height()
        ));
        out.push('\n');
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

fn svg_paint(color: Color) -> (String, Option<f64>) {
    let rgba = color.to_rgba8();
    let value = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
    let opacity = if rgba.a == 255 {
        None
    } else {
        Some(f64::from(color.components[3]))
    };
    (value, opacity)
}

fn write_paint_attr(out: &mut String, name: &str, color: Color) {
    let (value, opacity) = svg_paint(color);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
