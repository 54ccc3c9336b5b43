//! White-background removal.
//!
//! Near-white pixels become transparent, then the image is trimmed to the
//! bounding box of what is left and written out as PNG.

pub mod bbox;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod recolor;

pub use pipeline::strip;
