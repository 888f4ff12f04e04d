//! This module renders gridlines and margin labels onto a padded canvas.
//!
//! Lines and labels are painted on a transparent overlay layer which is then
//! alpha-composited over the canvas, so line opacity is independent of what is
//! underneath.
//!
//! # Examples
//!
//! ```rust
//! use overlay_grid::{drawing::*, Grid, GridConfig, LabelFont};
//! use image::{DynamicImage, Rgb, RgbImage};
//!
//! let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(500, 300, Rgb([255, 255, 255])));
//! let grid = Grid::try_from_image_with_config(&img, GridConfig::new(10, None)).unwrap();
//!
//! let config = GridDrawingConfig::default();
//! let font = LabelFont::resolve(&config.label_font, config.label_size);
//! let rendered = render(&img, &grid, &font, &config);
//! assert_eq!(rendered.dimensions(), (524, 320));
//! ```

use crate::*;
use image::{imageops, DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use tracing::{debug, error, trace};

/// Colors and opacities for one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisStyle {
    pub line_color: Rgb<u8>,
    pub major_alpha: u8,
    pub mid_alpha: u8,
    pub minor_alpha: u8,
    pub label_color: Rgb<u8>,
    /// Label opacity on major and mid lines.
    pub label_alpha: u8,
    pub minor_label_alpha: u8,
}

impl AxisStyle {
    /// Red style for vertical lines and the top labels.
    pub fn columns() -> Self {
        AxisStyle {
            line_color: Rgb([255, 0, 0]),
            major_alpha: 160,
            mid_alpha: 110,
            minor_alpha: 40,
            label_color: Rgb([200, 0, 0]),
            label_alpha: 255,
            minor_label_alpha: 180,
        }
    }

    /// Blue style for horizontal lines and the left labels. Minor lines are
    /// fainter than their vertical counterparts.
    pub fn rows() -> Self {
        AxisStyle {
            line_color: Rgb([0, 0, 200]),
            major_alpha: 160,
            mid_alpha: 110,
            minor_alpha: 20,
            label_color: Rgb([0, 0, 200]),
            label_alpha: 255,
            minor_label_alpha: 180,
        }
    }

    pub fn line_color(&self, kind: LineKind) -> Rgba<u8> {
        let alpha = match kind {
            LineKind::Major => self.major_alpha,
            LineKind::Mid => self.mid_alpha,
            LineKind::Minor => self.minor_alpha,
        };
        with_alpha(self.line_color, alpha)
    }

    pub fn label_color(&self, kind: LineKind) -> Rgba<u8> {
        let alpha = if kind.is_mid() {
            self.label_alpha
        } else {
            self.minor_label_alpha
        };
        with_alpha(self.label_color, alpha)
    }
}

fn with_alpha(color: Rgb<u8>, alpha: u8) -> Rgba<u8> {
    let [r, g, b] = color.0;
    Rgba([r, g, b, alpha])
}

/// Configuration for drawing the grid overlay.
///
/// The default reproduces the standard look: 24 px left and 20 px top label bands,
/// red columns, blue rows, 2 px major lines, and labels on every line once cells
/// are at least 20 px apart.
///
/// # Examples
///
/// ```
/// use overlay_grid::{GridDrawingConfig, LineKind};
///
/// let config = GridDrawingConfig::default();
/// assert_eq!(config.canvas_size(500, 300), (524, 320));
/// assert_eq!(config.line_width(LineKind::Major), 2);
/// assert_eq!(config.line_width(LineKind::Mid), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GridDrawingConfig {
    /// Width of the label band left of the image.
    pub margin_left: u32,
    /// Height of the label band above the image.
    pub margin_top: u32,
    /// Style of vertical lines and their labels.
    pub column_style: AxisStyle,
    /// Style of horizontal lines and their labels.
    pub row_style: AxisStyle,
    pub major_line_width: u32,
    pub line_width: u32,
    /// Minimum cell size in pixels at which minor lines get labels too.
    pub min_label_spacing: f64,
    /// Y position of the column labels.
    pub label_top: i32,
    /// Gap between a row label and the image edge.
    pub label_gap: i32,
    /// Canvas color showing through the margins.
    pub background: Rgba<u8>,
    /// Font file name or path for labels.
    pub label_font: String,
    /// Label em size in pixels.
    pub label_size: f32,
}

impl Default for GridDrawingConfig {
    fn default() -> Self {
        GridDrawingConfig {
            margin_left: MARGIN_LEFT,
            margin_top: MARGIN_TOP,
            column_style: AxisStyle::columns(),
            row_style: AxisStyle::rows(),
            major_line_width: 2,
            line_width: 1,
            min_label_spacing: 20.0,
            label_top: 2,
            label_gap: 3,
            background: Rgba([255, 255, 255, 255]), // White
            label_font: DEFAULT_FONT_NAME.to_string(),
            label_size: LABEL_FONT_SIZE,
        }
    }
}

impl GridDrawingConfig {
    /// Stroke width for a line of the given kind.
    pub fn line_width(&self, kind: LineKind) -> u32 {
        if kind.is_major() {
            self.major_line_width
        } else {
            self.line_width
        }
    }

    /// Canvas size for an image of `width` x `height`.
    pub fn canvas_size(&self, width: u32, height: u32) -> (u32, u32) {
        (self.margin_left + width, self.margin_top + height)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.label_size.is_finite() || self.label_size <= 0.0 {
            error!("Rejecting label size {}", self.label_size);
            return Err(OverlayError::InvalidArgument(format!(
                "font size must be a positive number, got {}",
                self.label_size
            )));
        }
        if self.major_line_width == 0 || self.line_width == 0 {
            error!("Rejecting zero line width");
            return Err(OverlayError::InvalidArgument(
                "line width must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Trait for types that can be drawn on the overlay layer.
pub trait Drawable {
    /// Draws the object on `layer` using `font` for any text.
    fn draw(&self, layer: &mut RgbaImage, font: &LabelFont, config: &GridDrawingConfig);
}

impl Drawable for Grid {
    fn draw(&self, layer: &mut RgbaImage, font: &LabelFont, config: &GridDrawingConfig) {
        let dense_columns = self.step_x >= config.min_label_spacing;
        for column in self.columns() {
            draw_column(layer, column, dense_columns, font, config);
        }

        let dense_rows = self.step_y >= config.min_label_spacing;
        for row in self.rows() {
            draw_row(layer, row, dense_rows, font, config);
        }
    }
}

fn draw_column(
    layer: &mut RgbaImage,
    column: &Column,
    dense: bool,
    font: &LabelFont,
    config: &GridDrawingConfig,
) {
    let x = (config.margin_left + column.offset()) as i32;
    let width = config.line_width(column.kind);
    let height = layer.height().saturating_sub(config.margin_top);
    trace!("Vertical line {} at x={} ({:?})", column.index, x, column.kind);

    if height > 0 {
        let rect = Rect::at(x - width as i32 / 2, config.margin_top as i32).of_size(width, height);
        draw_filled_rect_mut(layer, rect, config.column_style.line_color(column.kind));
    }

    if dense || column.kind.is_mid() {
        let label = column.index.to_string();
        let tx = x - font.text_width(&label) as i32 / 2;
        let color = config.column_style.label_color(column.kind);
        font.draw_text(layer, color, tx, config.label_top, &label);
    }
}

fn draw_row(
    layer: &mut RgbaImage,
    row: &Row,
    dense: bool,
    font: &LabelFont,
    config: &GridDrawingConfig,
) {
    let y = (config.margin_top + row.offset()) as i32;
    let width = layer.width().saturating_sub(config.margin_left);
    let thickness = config.line_width(row.kind);
    trace!("Horizontal line {} at y={} ({:?})", row.index, y, row.kind);

    if width > 0 {
        let rect =
            Rect::at(config.margin_left as i32, y - thickness as i32 / 2).of_size(width, thickness);
        draw_filled_rect_mut(layer, rect, config.row_style.line_color(row.kind));
    }

    if dense || row.kind.is_mid() {
        let label = row.index.to_string();
        let tx = config.margin_left as i32 - font.text_width(&label) as i32 - config.label_gap;
        let ty = y - font.line_height() as i32 / 2;
        let color = config.row_style.label_color(row.kind);
        font.draw_text(layer, color, tx, ty, &label);
    }
}

/// Creates the padded canvas with `image` pasted inside the margins.
pub fn create_canvas(image: &DynamicImage, config: &GridDrawingConfig) -> RgbaImage {
    let (width, height) = config.canvas_size(image.width(), image.height());
    let mut canvas = RgbaImage::from_pixel(width, height, config.background);
    imageops::replace(
        &mut canvas,
        &image.to_rgba8(),
        i64::from(config.margin_left),
        i64::from(config.margin_top),
    );
    canvas
}

/// Renders `grid` over `image` and flattens the result to opaque RGB.
pub fn render(
    image: &DynamicImage,
    grid: &Grid,
    font: &LabelFont,
    config: &GridDrawingConfig,
) -> RgbImage {
    let mut canvas = create_canvas(image, config);
    let mut layer = RgbaImage::new(canvas.width(), canvas.height());
    debug!(
        "Drawing {} vertical and {} horizontal lines on {}x{} canvas",
        grid.columns.len(),
        grid.rows.len(),
        canvas.width(),
        canvas.height()
    );
    grid.draw(&mut layer, font, config);

    imageops::overlay(&mut canvas, &layer, 0, 0);
    DynamicImage::ImageRgba8(canvas).into_rgb8()
}
