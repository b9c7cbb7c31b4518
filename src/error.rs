use thiserror::Error;

/// Errors that can occur while swizzling or deswizzling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwizzleError {
    /// One of the arguments can never describe a valid operation.
    /// This is checked before any data is read or written.
    #[error("Invalid argument. {0}")]
    InvalidArgument(#[from] ArgumentError),

    /// A buffer does not contain enough bytes.
    /// Sources and destinations should be at least [swizzled_surface_size](crate::surface::swizzled_surface_size)
    /// or [deswizzled_surface_size](crate::surface::deswizzled_surface_size) many bytes
    /// depending on the direction.
    #[error("Not enough data. Expected {expected_size} bytes but found {actual_size} bytes.")]
    SizeMismatch {
        expected_size: usize,
        actual_size: usize,
    },
}

/// The reason an argument was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("The base buffer is empty.")]
    EmptyBuffer,

    #[error("Offset {offset} is outside a buffer of {len} bytes.")]
    OffsetOutOfRange { offset: usize, len: usize },

    #[error("Count {count} at offset {offset} does not fit in a buffer of {len} bytes.")]
    CountOutOfRange {
        offset: usize,
        count: usize,
        len: usize,
    },

    #[error("A required pointer is null.")]
    NullPointer,

    #[error("{0} is not a supported block height.")]
    UnsupportedBlockHeight(u32),

    #[error("Block dimensions {width}x{height}x{depth} must all be non zero.")]
    InvalidBlockDim { width: u32, height: u32, depth: u32 },

    /// The surface dimensions are zero, would overflow, or have more mipmaps than possible.
    #[error(
        "Invalid surface with dimensions {width}x{height}x{depth}, {bytes_per_pixel} bytes per pixel, \
         {mipmap_count} mipmaps, and {layer_count} layers."
    )]
    InvalidSurface {
        width: u32,
        height: u32,
        depth: u32,
        bytes_per_pixel: u32,
        mipmap_count: u32,
        layer_count: u32,
    },

    /// The linear or tiled size of a single mip level does not fit in a `usize`.
    #[error(
        "The sizes for a mip level with dimensions {width}x{height}x{depth} \
         and {bytes_per_pixel} bytes per pixel overflow."
    )]
    InvalidMipLevel {
        width: u32,
        height: u32,
        depth: u32,
        bytes_per_pixel: u32,
    },
}

impl SwizzleError {
    pub(crate) fn check_size(expected_size: usize, actual_size: usize) -> Result<(), Self> {
        if actual_size < expected_size {
            Err(SwizzleError::SizeMismatch {
                expected_size,
                actual_size,
            })
        } else {
            Ok(())
        }
    }
}
