use std::fmt;

/// Vertical profile segments through the left and right wedges
///
/// Both segments run from `y_start` to `y_end` (inclusive) at the column of
/// their wedge. `x_left < x_right` and `y_start < y_end` always hold for
/// windows produced by the wedge locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct WedgeWindow {
    pub x_left: usize,
    pub x_right: usize,
    pub y_start: usize,
    pub y_end: usize,
}

/// Endpoints of a line segment as (row, col) pairs
pub type Segment = ((f64, f64), (f64, f64));

impl WedgeWindow {
    pub fn new(x_left: usize, x_right: usize, y_start: usize, y_end: usize) -> Self {
        Self {
            x_left,
            x_right,
            y_start,
            y_end,
        }
    }

    /// Segment through the left wedge
    pub fn left_segment(&self) -> Segment {
        self.segment_at(self.x_left)
    }

    /// Segment through the right wedge
    pub fn right_segment(&self) -> Segment {
        self.segment_at(self.x_right)
    }

    /// Number of pixel rows covered by each segment
    pub fn length(&self) -> usize {
        self.y_end.saturating_sub(self.y_start) + 1
    }

    fn segment_at(&self, x: usize) -> Segment {
        (
            (self.y_start as f64, x as f64),
            (self.y_end as f64, x as f64),
        )
    }
}

impl fmt::Display for WedgeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x = [{}, {}], y = [{}, {}]",
            self.x_left, self.x_right, self.y_start, self.y_end
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments() {
        let window = WedgeWindow::new(112, 136, 29, 67);
        assert_eq!(window.left_segment(), ((29.0, 112.0), (67.0, 112.0)));
        assert_eq!(window.right_segment(), ((29.0, 136.0), (67.0, 136.0)));
        assert_eq!(window.length(), 39);
        assert_eq!(window.to_string(), "x = [112, 136], y = [29, 67]");
    }
}
