use crate::api::TaskResult;
use std::fmt;

/// Text report formatter for a slice position run
pub struct TextReport<'a> {
    result: &'a TaskResult,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(result: &'a TaskResult) -> Self {
        Self { result }
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Slice Position ({})", self.result.task)?;
        writeln!(f, "==============")?;
        writeln!(f)?;

        // Images in measurement order, not key order
        for description in &self.result.file {
            match self.result.measurement.get(description) {
                Some(m) => writeln!(
                    f,
                    "{:<32} length difference: {:>7.2} mm",
                    description, m.length_difference
                )?,
                None => writeln!(f, "{:<32} not measured", description)?,
            }
        }

        if let Some(reports) = &self.result.report_image {
            writeln!(f)?;
            writeln!(f, "Diagnostics")?;
            writeln!(f, "-----------")?;
            for path in reports {
                writeln!(f, "{}", path.display())?;
            }
        }

        Ok(())
    }
}
