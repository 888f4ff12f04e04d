//! This crate overlays a numbered coordinate grid on a raster image so that column and row
//! proportions of scanned forms can be read off by counting cells.
//! It uses the `image` and `imageproc` crates for image manipulation and `ab_glyph` for label text.

/// Rendering of gridlines and margin labels onto a padded canvas.
///
/// The main components of this module are:
/// - [`GridDrawingConfig`]: margins, per-axis colors, line widths and label placement.
/// - [`Drawable`]: implemented by [`Grid`] to paint its gridlines and labels on an overlay layer.
/// - [`drawing::render`]: canvas, overlay and composition in one call.
///
/// # Examples
///
/// ```rust
/// use overlay_grid::{drawing, Grid, GridConfig, GridDrawingConfig, LabelFont};
/// use image::{DynamicImage, RgbImage};
///
/// let img = DynamicImage::ImageRgb8(RgbImage::new(200, 100));
/// let grid = Grid::try_from_image_with_config(&img, GridConfig::new(10, None)).unwrap();
///
/// let config = GridDrawingConfig::default();
/// let font = LabelFont::builtin(config.label_size);
/// let rendered = drawing::render(&img, &grid, &font, &config);
/// assert_eq!(rendered.dimensions(), (224, 120));
/// ```
pub mod drawing;
/// Label fonts: a named TrueType lookup with a bundled bitmap fallback.
pub mod font;
/// Grid geometry: division counts, cell steps and gridline positions.
pub mod grid;
/// Image loading, saving and output path derivation.
pub mod io;

pub use drawing::{AxisStyle, Drawable, GridDrawingConfig};
pub use font::LabelFont;
pub use grid::{Column, Grid, GridConfig, LineInfo, LineKind, LineTrait, Row, SmallVecLine};
pub use io::{derive_output_path, load_image, save_image};

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::*;

/// Width of the label band left of the image.
pub const MARGIN_LEFT: u32 = 24;
/// Height of the label band above the image.
pub const MARGIN_TOP: u32 = 20;
/// Number of vertical divisions when none is given.
pub const DEFAULT_COLS: u32 = 50;
/// Label em size in pixels.
pub const LABEL_FONT_SIZE: f32 = 12.0;
/// Font looked up for labels before falling back to the bundled one.
pub const DEFAULT_FONT_NAME: &str = "arial.ttf";

// Holds the default 50-column grid inline
const DEFAULT_SMALLVEC_SIZE: usize = 64;

#[derive(Error, Debug)]
pub enum OverlayError {
    #[error("Cannot access {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid image dimensions: width={width}, height={height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Invalid font: {0}")]
    InvalidFont(#[from] ab_glyph::InvalidFont),
}

pub type Result<T, E = OverlayError> = std::result::Result<T, E>;

/// Outcome of one overlay run.
///
/// Its `Display` output is the summary printed by the command-line tool:
///
/// ```
/// use overlay_grid::OverlayReport;
///
/// let report = OverlayReport {
///     cols: 10,
///     rows: 6,
///     step_x: 50.0,
///     step_y: 50.0,
///     image_width: 500,
///     image_height: 300,
///     canvas_width: 524,
///     canvas_height: 320,
///     output: "form-grid.png".into(),
/// };
/// assert_eq!(
///     report.to_string(),
///     "Grid: 10 x 6 cells\nCell size: 50.0 x 50.0 px\nImage: 500 x 300 px\nSaved: form-grid.png"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OverlayReport {
    pub cols: u32,
    pub rows: u32,
    pub step_x: f64,
    pub step_y: f64,
    pub image_width: u32,
    pub image_height: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub output: PathBuf,
}

impl fmt::Display for OverlayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid: {} x {} cells", self.cols, self.rows)?;
        writeln!(f, "Cell size: {:.1} x {:.1} px", self.step_x, self.step_y)?;
        writeln!(f, "Image: {} x {} px", self.image_width, self.image_height)?;
        write!(f, "Saved: {}", self.output.display())
    }
}

/// Overlays a grid on the image at `input` and writes the result.
///
/// When `output` is `None` the destination is derived with [`derive_output_path`].
/// Arguments are validated before the image is opened, and the output file is only
/// written once the whole canvas has been composed and encoded.
///
/// # Errors
/// - [`OverlayError::InvalidArgument`] for a zero column or row count, a count larger than the
///   image extent, or a bad font size.
/// - [`OverlayError::InvalidDimensions`] for an image with no pixels.
/// - [`OverlayError::FileAccess`] when the input cannot be decoded or the output cannot be written.
pub fn overlay_grid(
    input: &Path,
    output: Option<&Path>,
    config: &GridConfig,
    drawing_config: &GridDrawingConfig,
) -> Result<OverlayReport> {
    config.validate()?;
    drawing_config.validate()?;

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| derive_output_path(input));

    let image = load_image(input)?;
    let grid = Grid::try_from_image_with_config(&image, config.clone())?;
    let font = LabelFont::resolve(&drawing_config.label_font, drawing_config.label_size);

    let rendered = drawing::render(&image, &grid, &font, drawing_config);
    save_image(&rendered, &output)?;
    info!(
        "Saved {}x{} canvas to {}",
        rendered.width(),
        rendered.height(),
        output.display()
    );

    Ok(OverlayReport {
        cols: grid.col_count(),
        rows: grid.row_count(),
        step_x: grid.step_x,
        step_y: grid.step_y,
        image_width: grid.width,
        image_height: grid.height,
        canvas_width: rendered.width(),
        canvas_height: rendered.height(),
        output,
    })
}
