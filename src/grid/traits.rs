use super::*;

/// A trait providing a factory method to create gridlines from a [`LineInfo`].
///
/// Implemented by [`Row`] and [`Column`] so that both axes are laid out by the same
/// generic [`Grid::process_dimension`](crate::Grid::process_dimension).
///
/// # Examples
///
/// ```
/// use overlay_grid::{Column, LineInfo, LineKind, LineTrait, Row};
///
/// let line = LineInfo::new(10, 200);
///
/// let row = Row::new(line.clone());
/// assert_eq!(row.y, 200);
///
/// let column = Column::new(line);
/// assert_eq!(column.x, 200);
/// assert_eq!(column.kind, LineKind::Major);
/// ```
pub trait LineTrait {
    /// Creates a new instance from the given `LineInfo`.
    fn new(line: LineInfo) -> Self;

    /// Offset of the line from the image origin along its axis.
    fn offset(&self) -> u32;
}

impl LineTrait for Row {
    fn new(line: LineInfo) -> Self {
        Row {
            index: line.index,
            y: line.offset,
            kind: line.kind,
        }
    }

    fn offset(&self) -> u32 {
        self.y
    }
}

impl LineTrait for Column {
    fn new(line: LineInfo) -> Self {
        Column {
            index: line.index,
            x: line.offset,
            kind: line.kind,
        }
    }

    fn offset(&self) -> u32 {
        self.x
    }
}
