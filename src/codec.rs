use std::{fs, io::Write, path::Path};

use png::{BitDepth, ColorType, Transformations};

use crate::{
    error::{Error, Result},
    pixel::CHANNELS,
    pixel_buffer::try_with_capacity,
    PixelBuffer,
};

/// Something that can turn a file into a [`PixelBuffer`] and back.
pub trait Codec {
    fn decode(&self, path: &Path) -> Result<PixelBuffer>;
    fn encode(&self, path: &Path, image: &PixelBuffer) -> Result<()>;
}

/// PNG codec backed by the `png` crate.
///
/// Every image is normalized to 8-bit RGBA on the way in: 16-bit samples are
/// truncated, palettes and low bit depths are expanded, `tRNS` becomes an
/// alpha channel, greyscale is copied into all three colour channels and a
/// missing alpha channel is filled with `0xFF`. Interlacing is undone by the
/// decoder. Ancillary chunks are dropped. Output is always non-interlaced
/// 8-bit RGBA.
#[derive(Debug, Default, Clone, Copy)]
pub struct PngCodec;

impl PngCodec {
    pub fn decode_bytes(&self, bytes: &[u8]) -> Result<PixelBuffer> {
        let mut decoder = png::Decoder::new(bytes);
        decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
        let mut reader = decoder.read_info()?;
        {
            let info = reader.info();
            log::debug!(
                "Source image is {}x{}, {:?} at {:?}, interlaced: {}",
                info.width,
                info.height,
                info.color_type,
                info.bit_depth,
                info.interlaced
            );
        }

        let mut frame = try_with_capacity(reader.output_buffer_size())?;
        frame.resize(reader.output_buffer_size(), 0);
        let output = reader.next_frame(&mut frame)?;
        frame.truncate(output.buffer_size());

        let data = normalize(
            output.color_type,
            output.bit_depth,
            output.width as usize,
            output.line_size,
            frame,
        )?;
        PixelBuffer::from_raw(output.width, output.height, data)
    }

    pub fn encode_bytes(&self, image: &PixelBuffer) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, image.width(), image.height());
            encoder.set_color(ColorType::Rgba);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            let mut stream = writer.stream_writer()?;
            for row in image.rows() {
                stream.write_all(row).map_err(png::EncodingError::from)?;
            }
            stream.finish()?;
            // IEND goes out when `writer` drops at the end of this block.
        }
        log::debug!(
            "Encoded {}x{} image into {} bytes",
            image.width(),
            image.height(),
            out.len()
        );
        Ok(out)
    }
}

impl Codec for PngCodec {
    fn decode(&self, path: &Path) -> Result<PixelBuffer> {
        log::info!("Decoding {}", path.display());
        let bytes = fs::read(path).map_err(|source| Error::FileOpen {
            path: path.to_owned(),
            source,
        })?;
        self.decode_bytes(&bytes)
    }

    fn encode(&self, path: &Path, image: &PixelBuffer) -> Result<()> {
        // Encode fully before touching the filesystem so a codec failure
        // leaves no partial file behind.
        let bytes = self.encode_bytes(image)?;
        log::info!("Writing {}", path.display());
        fs::write(path, bytes).map_err(|source| Error::FileOpen {
            path: path.to_owned(),
            source,
        })
    }
}

/// Converts a decoded 8-bit frame into tightly packed RGBA rows.
fn normalize(
    color_type: ColorType,
    bit_depth: BitDepth,
    width: usize,
    line_size: usize,
    frame: Vec<u8>,
) -> Result<Vec<u8>> {
    if bit_depth != BitDepth::Eight {
        return Err(Error::UnsupportedFormat {
            color_type,
            bit_depth,
        });
    }
    let (source_channels, to_rgba): (usize, fn(&[u8]) -> [u8; CHANNELS]) = match color_type {
        ColorType::Rgba => return Ok(frame),
        ColorType::Rgb => (3, |s| [s[0], s[1], s[2], u8::MAX]),
        ColorType::GrayscaleAlpha => (2, |s| [s[0], s[0], s[0], s[1]]),
        ColorType::Grayscale => (1, |s| [s[0], s[0], s[0], u8::MAX]),
        ColorType::Indexed => {
            return Err(Error::UnsupportedFormat {
                color_type,
                bit_depth,
            })
        }
    };

    let rows = frame.len() / line_size.max(1);
    let mut rgba = try_with_capacity(width * rows * CHANNELS)?;
    for line in frame.chunks_exact(line_size) {
        for sample in line[..width * source_channels].chunks_exact(source_channels) {
            rgba.extend_from_slice(&to_rgba(sample));
        }
    }
    Ok(rgba)
}
