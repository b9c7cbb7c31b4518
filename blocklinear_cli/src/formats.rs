use blocklinear::surface::BlockDim;

/// Common texture formats with known block sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ImageFormat {
    Rgba8,
    #[value(name = "rgbaf32")]
    RgbaF32,
    Bc1,
    Bc3,
    Bc7,
}

impl ImageFormat {
    /// The size of a single block in bytes for block compressed formats
    /// or the bytes per pixel for uncompressed formats.
    pub const fn bytes_per_pixel(&self) -> u32 {
        match self {
            ImageFormat::Rgba8 => 4,
            ImageFormat::Bc1 => 8,
            ImageFormat::Bc3 | ImageFormat::Bc7 | ImageFormat::RgbaF32 => 16,
        }
    }

    /// Uncompressed formats are assumed to have single pixel blocks.
    pub const fn block_dim(&self) -> BlockDim {
        match self {
            ImageFormat::Rgba8 | ImageFormat::RgbaF32 => BlockDim::uncompressed(),
            _ => BlockDim::block_4x4(),
        }
    }
}
