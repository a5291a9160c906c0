use std::fmt;

/// ACR phantom model being imaged
///
/// The wedge pair sits closer to the top edge on the medium phantom, so the
/// search and profile lengths differ between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub enum PhantomSize {
    /// Large ACR phantom
    #[default]
    Standard,
    /// Medium ACR phantom
    Medium,
}

impl PhantomSize {
    /// Distance from the top of the phantom to the end of the wedges (mm)
    pub fn wedge_search_depth_mm(&self) -> f64 {
        match self {
            PhantomSize::Standard => 50.0,
            PhantomSize::Medium => 35.0,
        }
    }

    /// Distance from the top of the phantom to the end of the line profiles (mm)
    pub fn profile_end_mm(&self) -> f64 {
        match self {
            PhantomSize::Standard => 47.0,
            PhantomSize::Medium => 35.0,
        }
    }

    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            PhantomSize::Standard => "standard",
            PhantomSize::Medium => "medium",
        }
    }

    /// Picks the phantom from the medium-phantom flag
    pub fn from_medium_flag(is_medium: bool) -> Self {
        if is_medium {
            PhantomSize::Medium
        } else {
            PhantomSize::Standard
        }
    }
}

impl fmt::Display for PhantomSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}
