use crate::{OverlayError, Result, DEFAULT_COLS};
use tracing::error;

/// Configuration for grid geometry.
///
/// `rows: None` derives the row count from the column step so cells stay roughly square.
///
/// # Example
/// ```
/// use overlay_grid::GridConfig;
///
/// let config = GridConfig::default();
/// assert_eq!(config.cols, 50);
/// assert_eq!(config.rows, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    /// Number of vertical divisions (default: 50)
    pub cols: u32,
    /// Number of horizontal divisions, or `None` for square cells (default: `None`)
    pub rows: Option<u32>,
}

impl GridConfig {
    /// Creates a new `GridConfig` with the specified parameters.
    ///
    /// # Example
    /// ```
    /// use overlay_grid::GridConfig;
    ///
    /// let config = GridConfig::new(10, Some(6));
    /// assert_eq!(config.cols, 10);
    /// assert_eq!(config.rows, Some(6));
    /// ```
    pub fn new(cols: u32, rows: Option<u32>) -> Self {
        Self { cols, rows }
    }

    /// Returns a copy with an explicit row count.
    pub fn with_rows(self, rows: u32) -> Self {
        Self {
            rows: Some(rows),
            ..self
        }
    }

    /// Rejects counts that would divide by zero.
    pub fn validate(&self) -> Result<()> {
        if self.cols == 0 {
            error!("Rejecting grid with zero columns");
            return Err(OverlayError::InvalidArgument(
                "column count must be at least 1".to_string(),
            ));
        }
        if self.rows == Some(0) {
            error!("Rejecting grid with zero rows");
            return Err(OverlayError::InvalidArgument(
                "row count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig::new(DEFAULT_COLS, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_rows() {
        let config = GridConfig::default().with_rows(12);
        assert_eq!(config, GridConfig::new(50, Some(12)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_cols() {
        let err = GridConfig::new(0, None).validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument: column count must be at least 1"
        );
    }
}
