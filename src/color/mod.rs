//! Color models and conversion module
//!
//! This module defines the value types for every color model the crate
//! reports, and the pure conversions between them.

pub mod conversion;
pub mod model;

pub use conversion::ColorConverter;
pub use model::{Cmyk, Hex, Hsl, LabColor, RgbColor};
