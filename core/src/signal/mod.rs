//! 1-D signal helpers shared by the wedge locator and the shift matcher

pub mod interp;
pub mod peaks;
pub mod profile;

pub use interp::upsample_linear;
pub use peaks::{find_n_highest_peaks, local_maxima};
pub use profile::{abs_diff, masked_profile_line, mean_profile, profile_line, segment_profile};
