pub mod codec;
pub mod config;
mod error;
mod pixel;
mod pixel_buffer;
pub mod transform;

pub use codec::{Codec, PngCodec};
pub use config::Args;
pub use error::{Error, Result};
pub use pixel::Pixel;
pub use pixel_buffer::PixelBuffer;
