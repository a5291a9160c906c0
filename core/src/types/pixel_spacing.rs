use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Pixel spacing in millimeters (row, column)
///
/// Follows the DICOM PixelSpacing attribute order: `row` is the distance
/// between adjacent rows (vertical, y) and `col` the distance between
/// adjacent columns (horizontal, x).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct PixelSpacing {
    pub row: f64,
    pub col: f64,
}

impl PixelSpacing {
    /// Creates a new PixelSpacing
    pub fn new(row: f64, col: f64) -> Self {
        Self { row, col }
    }

    /// Isotropic spacing, the usual case for ACR phantom acquisitions
    pub fn isotropic(mm: f64) -> Self {
        Self { row: mm, col: mm }
    }

    /// Horizontal resolution (mm per column)
    pub fn x(&self) -> f64 {
        self.col
    }

    /// Vertical resolution (mm per row)
    pub fn y(&self) -> f64 {
        self.row
    }

    /// Both spacings are finite and strictly positive
    pub fn is_valid(&self) -> bool {
        self.row.is_finite() && self.col.is_finite() && self.row > 0.0 && self.col > 0.0
    }

    /// Parses the first two numbers of a PixelSpacing value
    ///
    /// Separators are free-form, so `0.9766\0.9766`, `0.5 0.625` and
    /// `[1.0, 1.0]` all parse. Exponents are accepted.
    ///
    /// # Errors
    ///
    /// Returns a message when fewer than two numbers are present
    pub fn parse(s: &str) -> Result<Self, String> {
        static NUMBER: OnceLock<Regex> = OnceLock::new();
        let number = NUMBER.get_or_init(|| {
            Regex::new(r"[-+]?\d*\.?\d+(?:[eE][-+]?\d+)?").expect("Failed to compile regex")
        });

        let values = number
            .find_iter(s)
            .take(2)
            .map(|m| {
                m.as_str()
                    .parse::<f64>()
                    .map_err(|e| format!("invalid PixelSpacing value '{}': {}", m.as_str(), e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        match values[..] {
            [row, col] => Ok(Self::new(row, col)),
            _ => Err(format!("PixelSpacing '{}' does not hold two values", s)),
        }
    }
}

impl fmt::Display for PixelSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {} mm", self.row, self.col)
    }
}
