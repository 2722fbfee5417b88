use crate::{
    error::{Error, Result},
    pixel::{Pixel, CHANNELS},
};

/// An owned grid of RGBA8 pixels.
///
/// Pixels live in one contiguous allocation, row after row, each row exactly
/// `width * 4` bytes long. Access goes through `get`/`set`, which check bounds
/// instead of trusting the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocates a zeroed buffer.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = byte_len(width, height)?;
        let mut data = try_with_capacity(len)?;
        data.resize(len, 0);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Takes ownership of already-normalized RGBA8 data laid out row by row.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(Error::Layout {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Copies RGBA8 rows into a new buffer.
    pub fn from_rows<'a, I>(width: u32, height: u32, rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut buffer = Self::new(width, height)?;
        let stride = buffer.stride();
        let mut count = 0;
        for row in rows {
            if row.len() != stride {
                return Err(Error::Layout {
                    expected: stride,
                    actual: row.len(),
                });
            }
            let start = count * stride;
            let Some(target) = buffer.data.get_mut(start..start + stride) else {
                return Err(Error::Layout {
                    expected: buffer.data.len(),
                    actual: start + stride,
                });
            };
            target.copy_from_slice(row);
            count += 1;
        }
        if count != buffer.height as usize {
            return Err(Error::Layout {
                expected: buffer.data.len(),
                actual: count * stride,
            });
        }
        Ok(buffer)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Pixel> {
        let offset = self.offset(row, col)?;
        let mut bytes = [0; CHANNELS];
        bytes.copy_from_slice(&self.data[offset..offset + CHANNELS]);
        Ok(bytes.into())
    }

    pub fn set(&mut self, row: usize, col: usize, pixel: Pixel) -> Result<()> {
        let offset = self.offset(row, col)?;
        self.data[offset..offset + CHANNELS].copy_from_slice(&pixel.to_bytes());
        Ok(())
    }

    /// Rows from top to bottom, each `stride()` bytes long.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[u8]> + '_ {
        self.data.chunks_exact(self.stride())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn offset(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.height as usize || col >= self.width as usize {
            return Err(Error::OutOfBounds {
                row,
                col,
                width: self.width,
                height: self.height,
            });
        }
        Ok(row * self.stride() + col * CHANNELS)
    }
}

/// Reserves `len` bytes up front, reporting failure instead of aborting.
pub(crate) fn try_with_capacity(len: usize) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| Error::Allocation { bytes: len })?;
    Ok(data)
}

fn byte_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage);
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(CHANNELS))
        .ok_or(Error::Allocation { bytes: usize::MAX })
}
