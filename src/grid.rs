mod config;
mod lines;
mod traits;

pub use config::GridConfig;
pub use lines::{Column, LineInfo, LineKind, Row, SmallVecLine};
pub use traits::LineTrait;

use crate::{OverlayError, Result};
use image::{DynamicImage, GenericImageView};
use tracing::*;

/// Uniform grid laid over an image of `width` x `height` pixels.
///
/// `columns` holds the vertical gridlines and `rows` the horizontal ones, fencepost
/// style: a grid of `n` cells along an axis has `n + 1` lines. Offsets are in image
/// space; the drawing code shifts them past the margin band.
///
/// # Example
/// ```
/// use overlay_grid::{Grid, GridConfig};
///
/// let grid = Grid::from_dimensions(1000, 800, GridConfig::default()).unwrap();
/// assert_eq!(grid.step_x, 20.0);
/// assert_eq!(grid.row_count(), 40);
/// assert_eq!(grid.columns.len(), 51);
/// ```
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Grid {
    pub width: u32,
    pub height: u32,
    pub step_x: f64,
    pub step_y: f64,
    pub rows: SmallVecLine<Row>,
    pub columns: SmallVecLine<Column>,
}

impl Grid {
    /// Creates a new `Grid` over an image with custom configuration.
    pub fn try_from_image_with_config(image: &DynamicImage, config: GridConfig) -> Result<Self> {
        let (width, height) = image.dimensions();
        Self::from_dimensions(width, height, config)
    }

    /// Creates a new `Grid` for an image of the given size.
    ///
    /// The configuration is validated before any step is computed, so a zero
    /// column count is reported as [`OverlayError::InvalidArgument`]. Counts larger
    /// than the pixel extent of their axis are rejected the same way; automatic rows
    /// never exceed the height because each column is at least one pixel wide.
    pub fn from_dimensions(width: u32, height: u32, config: GridConfig) -> Result<Self> {
        trace!("Computing grid for {}x{} with {:?}", width, height, config);
        config.validate()?;
        if width == 0 || height == 0 {
            error!(
                "Invalid image dimensions: width={}, height={}",
                width, height
            );
            return Err(OverlayError::InvalidDimensions { width, height });
        }

        let cols = config.cols;
        if cols > width {
            error!("{} columns do not fit in {} pixels", cols, width);
            return Err(OverlayError::InvalidArgument(format!(
                "cols ({}) must not exceed image width ({})",
                cols, width
            )));
        }
        let step_x = f64::from(width) / f64::from(cols);
        let rows = match config.rows {
            Some(rows) if rows > height => {
                error!("{} rows do not fit in {} pixels", rows, height);
                return Err(OverlayError::InvalidArgument(format!(
                    "rows ({}) must not exceed image height ({})",
                    rows, height
                )));
            }
            Some(rows) => rows,
            None => Self::auto_rows(height, step_x),
        };
        let step_y = f64::from(height) / f64::from(rows);
        debug!(
            "Grid {} x {} cells, cell size {:.2} x {:.2}",
            cols, rows, step_x, step_y
        );

        Ok(Grid {
            width,
            height,
            step_x,
            step_y,
            rows: Self::process_dimension(rows, step_y),
            columns: Self::process_dimension(cols, step_x),
        })
    }

    /// Row count that keeps cells approximately square for the given column step.
    ///
    /// Never returns less than one, even for images shorter than a single step.
    ///
    /// ```
    /// use overlay_grid::Grid;
    ///
    /// assert_eq!(Grid::auto_rows(300, 50.0), 6);
    /// assert_eq!(Grid::auto_rows(3, 20.0), 1);
    /// ```
    pub fn auto_rows(height: u32, step_x: f64) -> u32 {
        let rows = (f64::from(height) / step_x).round_ties_even();
        (rows as u32).max(1)
    }

    /// Places `divisions + 1` lines `step` pixels apart, starting at zero.
    pub fn process_dimension<T: LineTrait>(divisions: u32, step: f64) -> SmallVecLine<T> {
        trace!("Placing {} lines with step {}", divisions + 1, step);
        (0..=divisions)
            .map(|index| T::new(LineInfo::at(index, step)))
            .collect()
    }

    /// Number of cells across (vertical divisions).
    pub fn col_count(&self) -> u32 {
        self.columns.len().saturating_sub(1) as u32
    }

    /// Number of cells down (horizontal divisions).
    pub fn row_count(&self) -> u32 {
        self.rows.len().saturating_sub(1) as u32
    }

    /// Returns an iterator over the horizontal gridlines, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Returns an iterator over the vertical gridlines, left to right.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    /// Finds a horizontal gridline by its division index.
    pub fn find_row(&self, index: u32) -> Option<&Row> {
        self.rows.get(index as usize)
    }

    /// Finds a vertical gridline by its division index.
    pub fn find_column(&self, index: u32) -> Option<&Column> {
        self.columns.get(index as usize)
    }
}

impl TryFrom<DynamicImage> for Grid {
    type Error = OverlayError;

    fn try_from(image: DynamicImage) -> Result<Self, Self::Error> {
        TryFrom::try_from(&image)
    }
}

impl TryFrom<&DynamicImage> for Grid {
    type Error = OverlayError;

    fn try_from(image: &DynamicImage) -> Result<Self, Self::Error> {
        Grid::try_from_image_with_config(image, GridConfig::default())
    }
}
