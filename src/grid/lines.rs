use crate::DEFAULT_SMALLVEC_SIZE;
use smallvec::SmallVec;

/// Visual weight of a gridline, derived from its division index.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LineKind {
    /// Every tenth division.
    Major,
    /// Every fifth division that is not a major one.
    Mid,
    Minor,
}

impl LineKind {
    /// Classifies a division index.
    ///
    /// # Example
    /// ```
    /// use overlay_grid::LineKind;
    ///
    /// assert_eq!(LineKind::classify(20), LineKind::Major);
    /// assert_eq!(LineKind::classify(15), LineKind::Mid);
    /// assert_eq!(LineKind::classify(7), LineKind::Minor);
    /// ```
    pub fn classify(index: u32) -> Self {
        if index % 10 == 0 {
            LineKind::Major
        } else if index % 5 == 0 {
            LineKind::Mid
        } else {
            LineKind::Minor
        }
    }

    pub fn is_major(self) -> bool {
        self == LineKind::Major
    }

    /// True for every multiple of five, major lines included.
    pub fn is_mid(self) -> bool {
        self != LineKind::Minor
    }
}

/// Position of one gridline along its axis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LineInfo {
    pub index: u32,
    pub offset: u32,
    pub kind: LineKind,
}

/// A type alias for SmallVec with an optimized stack-allocated buffer size.
pub type SmallVecLine<T> = SmallVec<[T; DEFAULT_SMALLVEC_SIZE]>;

impl LineInfo {
    /// Creates a new `LineInfo`, classifying it by `index`.
    ///
    /// # Example
    /// ```
    /// use overlay_grid::{LineInfo, LineKind};
    ///
    /// let line = LineInfo::new(5, 100);
    /// assert_eq!(line.offset, 100);
    /// assert_eq!(line.kind, LineKind::Mid);
    /// ```
    pub fn new(index: u32, offset: u32) -> Self {
        Self {
            index,
            offset,
            kind: LineKind::classify(index),
        }
    }

    /// Line `index` of a grid whose cells are `step` pixels wide.
    ///
    /// Offsets round half to even, so `1.5` lands on 2 and `4.5` on 4.
    pub fn at(index: u32, step: f64) -> Self {
        let offset = (f64::from(index) * step).round_ties_even();
        Self::new(index, offset as u32)
    }
}

/// A horizontal gridline: the top edge of row `index`.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Row {
    pub index: u32,
    pub y: u32,
    pub kind: LineKind,
}

/// A vertical gridline: the left edge of column `index`.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Column {
    pub index: u32,
    pub x: u32,
    pub kind: LineKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case(0 => LineKind::Major ; "zero is major")]
    #[test_case(10 => LineKind::Major)]
    #[test_case(50 => LineKind::Major)]
    #[test_case(5 => LineKind::Mid)]
    #[test_case(35 => LineKind::Mid)]
    #[test_case(1 => LineKind::Minor)]
    #[test_case(49 => LineKind::Minor)]
    fn test_classify(index: u32) -> LineKind {
        LineKind::classify(index)
    }

    #[test]
    fn test_at_rounds_offsets() {
        assert_eq!(LineInfo::at(3, 20.0).offset, 60);
        assert_eq!(LineInfo::at(1, 1.5).offset, 2);
        assert_eq!(LineInfo::at(3, 1.5).offset, 4);
        assert_eq!(LineInfo::at(2, 0.3).offset, 1);
    }

    proptest! {
        #[test]
        fn test_major_lines_are_mid(index in 0..10_000u32) {
            let kind = LineKind::classify(index);

            prop_assert_eq!(kind.is_major(), index % 10 == 0);
            prop_assert_eq!(kind.is_mid(), index % 5 == 0);
            if kind.is_major() {
                prop_assert!(kind.is_mid());
            }
        }
    }
}
