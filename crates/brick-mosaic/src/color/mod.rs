//! Color types
//!
//! Every color in the pipeline is an 8-bit [`Rgb`] triple: decoded image
//! pixels, downsampled cells and palette entries alike.

mod rgb;

pub use rgb::Rgb;
