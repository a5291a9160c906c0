//! Core type definitions for slice position measurement
//!
//! - [`Grid`]: row-major 2-D raster, aliased as [`Image`] and [`Mask`]
//! - [`PixelSpacing`]: in-plane resolution in mm
//! - [`PhantomSize`]: ACR phantom model, selects the wedge geometry
//! - [`WedgeWindow`]: columns and rows of the two wedge profiles
//! - [`MeasurementConfig`]: configuration for a measurement run

mod config;
mod grid;
mod phantom;
mod pixel_spacing;
mod window;

pub use config::{MatchConfig, MeasurementConfig};
pub use grid::{Grid, Image, Mask};
pub use phantom::PhantomSize;
pub use pixel_spacing::PixelSpacing;
pub use window::{Segment, WedgeWindow};
