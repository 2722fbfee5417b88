use crate::{error::Result, Pixel, PixelBuffer};

/// The value every red channel is overwritten with.
pub const RED_VALUE: u8 = 1;

/// Builds a new buffer of the same size by applying `f` to every pixel.
pub fn map_pixels<F>(input: &PixelBuffer, f: F) -> Result<PixelBuffer>
where
    F: Fn(Pixel) -> Pixel,
{
    let (width, height) = input.dimensions();
    let mut output = PixelBuffer::new(width, height)?;
    for row in 0..height as usize {
        for col in 0..width as usize {
            output.set(row, col, f(input.get(row, col)?))?;
        }
    }
    Ok(output)
}

pub fn set_red(value: u8) -> impl Fn(Pixel) -> Pixel {
    move |pixel| Pixel {
        red: value,
        ..pixel
    }
}

/// Applies the fixed red-channel policy.
pub fn process(input: &PixelBuffer) -> Result<PixelBuffer> {
    log::info!(
        "Setting red channel to {RED_VALUE} on a {}x{} image",
        input.width(),
        input.height()
    );
    map_pixels(input, set_red(RED_VALUE))
}
