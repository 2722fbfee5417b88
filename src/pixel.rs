/// Number of bytes a single RGBA8 pixel occupies.
pub const CHANNELS: usize = 4;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}
impl Pixel {
    pub fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub fn to_bytes(self) -> [u8; CHANNELS] {
        [self.red, self.green, self.blue, self.alpha]
    }
}
impl From<[u8; CHANNELS]> for Pixel {
    fn from([red, green, blue, alpha]: [u8; CHANNELS]) -> Self {
        Self::new(red, green, blue, alpha)
    }
}
impl From<Pixel> for [u8; CHANNELS] {
    fn from(pixel: Pixel) -> Self {
        pixel.to_bytes()
    }
}
