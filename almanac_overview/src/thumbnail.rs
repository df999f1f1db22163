// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trend thumbnail of the full forecast horizon.

extern crate alloc;

use alloc::vec::Vec;

use almanac_series::{Field, HOURS_PER_DAY, HourlySeries};
use kurbo::{Affine, BezPath, Rect, Size};
use peniko::Color;
use peniko::color::palette::css;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Thumbnail styling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThumbnailStyle {
    /// Trend line paint.
    pub stroke: Color,
    /// Trend line width.
    pub stroke_width: f64,
    /// Fill of every other day band.
    pub band_fill: Color,
    /// Samples per band.
    pub samples_per_band: usize,
    /// Vertical padding above and below the trend line.
    pub padding: f64,
}

impl Default for ThumbnailStyle {
    fn default() -> Self {
        Self {
            stroke: Color::from_rgb8(0xd3, 0x2f, 0x2f),
            stroke_width: 2.0,
            band_fill: css::BLACK.with_alpha(0.03),
            samples_per_band: HOURS_PER_DAY,
            padding: 5.0,
        }
    }
}

impl ThumbnailStyle {
    /// Sets the trend line paint and width.
    pub fn with_stroke(mut self, stroke: Color, stroke_width: f64) -> Self {
        self.stroke = stroke;
        self.stroke_width = stroke_width;
        self
    }

    /// Sets the band fill.
    pub fn with_band_fill(mut self, fill: Color) -> Self {
        self.band_fill = fill;
        self
    }

    /// Sets the number of samples per band.
    pub fn with_samples_per_band(mut self, samples: usize) -> Self {
        self.samples_per_band = samples;
        self
    }

    /// Sets the vertical padding.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }
}

/// A rendered thumbnail, in layout units.
#[derive(Clone, Debug, PartialEq)]
pub struct ThumbnailScene {
    /// On-screen size.
    pub size: Size,
    /// Backing store size in device pixels.
    pub backing_width: u32,
    /// Backing store height in device pixels.
    pub backing_height: u32,
    /// Layout-to-device transform.
    pub transform: Affine,
    /// Shaded day bands, back to front.
    pub bands: Vec<Rect>,
    /// Fill for `bands`.
    pub band_fill: Color,
    /// The trend line. Gaps in the data break the line.
    pub trend: BezPath,
    /// Trend line paint.
    pub stroke: Color,
    /// Trend line width.
    pub stroke_width: f64,
}

#[allow(clippy::cast_precision_loss, reason = "sample counts are far below 2^52")]
fn as_f64(n: usize) -> f64 {
    n as f64
}

fn backing_len(len: f64, dpr: f64) -> u32 {
    let px = (len * dpr).round();
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "saturating conversion of a rounded pixel count"
    )]
    let px = px as u32;
    px
}

/// Renders `values` into a thumbnail `size` large at device pixel ratio `dpr`.
///
/// Values are normalized over their own finite minimum and maximum. Non-finite values leave a
/// gap. An empty (or all-gap) series gives an empty trend.
pub fn render_thumbnail(
    values: &[f64],
    size: Size,
    dpr: f64,
    style: &ThumbnailStyle,
) -> ThumbnailScene {
    let dpr = effective_dpr(dpr);
    let mut scene = ThumbnailScene {
        size,
        backing_width: backing_len(size.width, dpr),
        backing_height: backing_len(size.height, dpr),
        transform: Affine::scale(dpr),
        bands: Vec::new(),
        band_fill: style.band_fill,
        trend: BezPath::new(),
        stroke: style.stroke,
        stroke_width: style.stroke_width,
    };
    if values.is_empty() {
        return scene;
    }

    let n = as_f64(values.len());
    let per_band = style.samples_per_band.max(1);
    let band_width = as_f64(per_band) / n * size.width;
    scene.bands = (0..values.len())
        .step_by(per_band)
        .filter(|i| (i / per_band) % 2 == 1)
        .map(|i| {
            let x0 = as_f64(i) / n * size.width;
            Rect::new(x0, 0.0, x0 + band_width, size.height)
        })
        .collect();

    let (min, max) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if min > max {
        return scene;
    }
    let range = if max - min == 0.0 { 1.0 } else { max - min };
    let last = as_f64(values.len() - 1);
    let plot_height = size.height - 2.0 * style.padding;

    let mut pen_down = false;
    for (i, &v) in values.iter().enumerate() {
        if !v.is_finite() {
            pen_down = false;
            continue;
        }
        let x = if last > 0.0 {
            as_f64(i) / last * size.width
        } else {
            0.0
        };
        let norm = (v - min) / range;
        let y = size.height - norm * plot_height - style.padding;
        if pen_down {
            scene.trend.line_to((x, y));
        } else {
            scene.trend.move_to((x, y));
            pen_down = true;
        }
    }
    scene
}

/// Unusable pixel ratios (zero, negative, NaN, infinite) count as `1.0`.
fn effective_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 }
}

/// A thumbnail that re-renders only when its on-screen size or pixel ratio changes.
#[derive(Clone, Debug)]
pub struct Thumbnail {
    values: Vec<f64>,
    style: ThumbnailStyle,
    scene: Option<ThumbnailScene>,
    dpr: f64,
    renders: usize,
}

impl Thumbnail {
    /// Creates a thumbnail over `values`. Nothing is rendered until the first
    /// [`resize`](Self::resize).
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            style: ThumbnailStyle::default(),
            scene: None,
            dpr: 1.0,
            renders: 0,
        }
    }

    /// Creates a thumbnail over one column of the full, unaligned `series`.
    ///
    /// A missing column gives an empty thumbnail.
    pub fn from_series(series: &HourlySeries, field: Field) -> Self {
        let values = series.column(field).map(<[f64]>::to_vec).unwrap_or_default();
        if values.is_empty() {
            log::debug!("no {field} data for the thumbnail");
        }
        Self::new(values)
    }

    /// Sets the style. Takes effect on the next render.
    pub fn with_style(mut self, style: ThumbnailStyle) -> Self {
        self.style = style;
        self
    }

    /// Follows an on-screen size or pixel ratio change, re-rendering if either changed.
    ///
    /// Returns `true` if a new scene was rendered.
    pub fn resize(&mut self, size: Size, dpr: f64) -> bool {
        let dpr = effective_dpr(dpr);
        let unchanged = self
            .scene
            .as_ref()
            .is_some_and(|scene| scene.size == size && self.dpr == dpr);
        if unchanged {
            return false;
        }
        self.dpr = dpr;
        self.scene = Some(render_thumbnail(&self.values, size, dpr, &self.style));
        self.renders += 1;
        true
    }

    /// The current scene, once rendered.
    pub fn scene(&self) -> Option<&ThumbnailScene> {
        self.scene.as_ref()
    }

    /// How many times the scene was rendered.
    pub fn render_count(&self) -> usize {
        self.renders
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use kurbo::{PathEl, Point};

    use super::*;

    fn points(path: &BezPath) -> Vec<Point> {
        path.elements()
            .iter()
            .map(|el| match el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => *p,
                other => panic!("unexpected path element {other:?}"),
            })
            .collect()
    }

    #[test]
    fn trend_spans_the_width_inside_the_padding() {
        let scene = render_thumbnail(
            &[10.0, 20.0, 15.0],
            Size::new(200.0, 50.0),
            1.0,
            &ThumbnailStyle::default(),
        );
        assert_eq!(
            points(&scene.trend),
            vec![
                Point::new(0.0, 45.0),
                Point::new(100.0, 5.0),
                Point::new(200.0, 25.0)
            ]
        );
    }

    #[test]
    fn every_other_day_is_shaded() {
        let values: Vec<f64> = (0..96).map(f64::from).collect();
        let scene = render_thumbnail(&values, Size::new(960.0, 40.0), 1.0, &ThumbnailStyle::default());
        assert_eq!(
            scene.bands,
            vec![
                Rect::new(240.0, 0.0, 480.0, 40.0),
                Rect::new(720.0, 0.0, 960.0, 40.0)
            ]
        );
        assert_eq!(scene.band_fill, css::BLACK.with_alpha(0.03));
    }

    #[test]
    fn flat_and_single_sample_series_do_not_divide_by_zero() {
        let flat = render_thumbnail(&[3.0; 4], Size::new(30.0, 20.0), 1.0, &ThumbnailStyle::default());
        assert!(points(&flat.trend).iter().all(|p| p.y == 15.0));

        let single = render_thumbnail(&[7.0], Size::new(30.0, 20.0), 1.0, &ThumbnailStyle::default());
        assert_eq!(points(&single.trend), vec![Point::new(0.0, 15.0)]);
    }

    #[test]
    fn gaps_break_the_line() {
        let scene = render_thumbnail(
            &[0.0, f64::NAN, 1.0, 2.0],
            Size::new(30.0, 20.0),
            1.0,
            &ThumbnailStyle::default(),
        );
        let moves = scene
            .trend
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::MoveTo(_)))
            .count();
        assert_eq!(moves, 2);
        assert_eq!(points(&scene.trend).len(), 3);
    }

    #[test]
    fn empty_data_renders_an_empty_scene() {
        let scene = render_thumbnail(&[], Size::new(30.0, 20.0), 2.0, &ThumbnailStyle::default());
        assert!(scene.trend.elements().is_empty());
        assert!(scene.bands.is_empty());
        assert_eq!((scene.backing_width, scene.backing_height), (60, 40));
    }

    #[test]
    fn backing_store_follows_the_pixel_ratio() {
        let scene = render_thumbnail(&[1.0, 2.0], Size::new(100.5, 30.0), 1.5, &ThumbnailStyle::default());
        assert_eq!(scene.backing_width, 151);
        assert_eq!(scene.backing_height, 45);
        assert_eq!(scene.transform, Affine::scale(1.5));

        let fallback = render_thumbnail(&[1.0], Size::new(10.0, 10.0), 0.0, &ThumbnailStyle::default());
        assert_eq!(fallback.transform, Affine::IDENTITY);
    }

    #[test]
    fn renders_only_when_size_or_ratio_changes() {
        let mut thumb = Thumbnail::new(vec![1.0, 2.0, 3.0]);
        assert!(thumb.scene().is_none());
        assert!(thumb.resize(Size::new(300.0, 40.0), 1.0));
        assert!(!thumb.resize(Size::new(300.0, 40.0), 1.0));
        assert!(thumb.resize(Size::new(300.0, 40.0), 2.0));
        assert!(thumb.resize(Size::new(320.0, 40.0), 2.0));
        assert_eq!(thumb.render_count(), 3);
        assert_eq!(thumb.scene().unwrap().size, Size::new(320.0, 40.0));
    }

    #[test]
    fn unusable_ratio_renders_once() {
        let mut thumb = Thumbnail::new(vec![1.0, 2.0]);
        let size = Size::new(50.0, 20.0);
        assert!(thumb.resize(size, f64::NAN));
        assert!(!thumb.resize(size, f64::NAN));
        // Same as the fallback ratio.
        assert!(!thumb.resize(size, 1.0));
        assert!(!thumb.resize(size, -2.0));
        assert_eq!(thumb.render_count(), 1);
        assert_eq!(thumb.scene().unwrap().transform, Affine::IDENTITY);
    }

    #[test]
    fn custom_style_shapes_the_scene() {
        let blue = Color::from_rgb8(0x19, 0x76, 0xd2);
        let fill = css::BLACK.with_alpha(0.1);
        let style = ThumbnailStyle::default()
            .with_stroke(blue, 1.5)
            .with_band_fill(fill)
            .with_samples_per_band(2)
            .with_padding(0.0);
        let mut thumb = Thumbnail::new(vec![0.0, 1.0, 2.0, 3.0, 4.0]).with_style(style);
        assert!(thumb.resize(Size::new(40.0, 10.0), 1.0));

        let scene = thumb.scene().unwrap();
        assert_eq!((scene.stroke, scene.stroke_width), (blue, 1.5));
        assert_eq!(scene.band_fill, fill);
        assert_eq!(scene.bands, vec![Rect::new(16.0, 0.0, 32.0, 10.0)]);
        assert_eq!(
            points(&scene.trend),
            vec![
                Point::new(0.0, 10.0),
                Point::new(10.0, 7.5),
                Point::new(20.0, 5.0),
                Point::new(30.0, 2.5),
                Point::new(40.0, 0.0)
            ]
        );
    }

    #[test]
    fn missing_column_gives_an_empty_thumbnail() {
        let series = HourlySeries::default();
        let mut thumb = Thumbnail::from_series(&series, Field::Temperature);
        thumb.resize(Size::new(10.0, 10.0), 1.0);
        assert!(thumb.scene().unwrap().trend.elements().is_empty());
    }
}
