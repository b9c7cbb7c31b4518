//! # blocklinear
//! blocklinear is a CPU implementation of the Tegra X1 block linear surface tiling.
//!
//! # Getting Started
//! Most texture formats store all array layers and mipmaps in a single buffer.
//! The functions in [surface] handle the offsets, padding, and alignment for the entire surface.
/*!
```rust no_run
use blocklinear::surface::{deswizzle_surface, BlockDim};
# fn main() -> Result<(), blocklinear::SwizzleError> {
# let tiled_data = vec![0u8; 4];
// 256x256 BC7 cube map with 9 mipmaps.
// BC7 has 4x4 pixel blocks that each take up 16 bytes.
let linear_data = deswizzle_surface(
    256,
    256,
    1,
    &tiled_data,
    BlockDim::block_4x4(),
    None,
    16,
    9,
    6,
)?;
# Ok(())
# }
```
*/
//! Individual mipmaps can be tiled or untiled using the functions in [swizzle].
//! The dimensions for these functions are in blocks rather than pixels.
/*!
```rust no_run
use blocklinear::{block_height_mip0, div_round_up, mip_block_height, swizzled_mip_size};
use blocklinear::swizzle::deswizzle_block_linear;
# fn main() -> Result<(), blocklinear::SwizzleError> {
# let image_data = vec![0u8; 4];
# let height = 300;
# let width = 128;
# let mipmap_count = 5;
let block_height_mip0 = block_height_mip0(div_round_up(height, 4));
let mut offset = 0;
for mip in 0..mipmap_count {
    let mip_width = std::cmp::max(div_round_up(width >> mip, 4), 1);
    let mip_height = std::cmp::max(div_round_up(height >> mip, 4), 1);
    // The block height will likely change for each mip level.
    let mip_block_height = mip_block_height(mip_height, block_height_mip0);
    let deswizzled_mipmap = deswizzle_block_linear(
        mip_width,
        mip_height,
        1,
        &image_data[offset..],
        mip_block_height,
        16,
    )?;
    offset += swizzled_mip_size(mip_width, mip_height, 1, mip_block_height, 16);
}
# Ok(())
# }
```
*/
//! # Block Linear Tiling
//! Block linear arranges the bytes of a surface into a grid of blocks
//! where blocks are arranged linearly in row-major order.
//! The tiled size is padded to integral dimensions in blocks, so
//! tiled surfaces may be larger than the corresponding data in row-major order.
//!
//! Groups of 512 bytes form GOBs ("group of bytes") where each GOB is 64x8 bytes.
//! The `block_height` parameter determines how many GOBs stack vertically to form a block.
//! 3D surfaces also stack GOBs along the depth axis.
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

mod blockdepth;
mod blockheight;
mod error;

pub mod layout;
pub mod surface;
pub mod swizzle;
pub mod view;

// Avoid making this module public to prevent people importing it accidentally.
#[cfg(feature = "ffi")]
mod ffi;

pub use blockheight::*;
pub use error::{ArgumentError, SwizzleError};
pub use swizzle::{deswizzled_mip_size, swizzled_mip_size};

const GOB_WIDTH_IN_BYTES: usize = 64;
const GOB_HEIGHT_IN_BYTES: usize = 8;
const GOB_SIZE_IN_BYTES: usize = GOB_WIDTH_IN_BYTES * GOB_HEIGHT_IN_BYTES;

// Block height can only have certain values based on the Tegra TRM page 1189 table 79.

/// An enumeration of supported block heights.
///
/// Texture file formats differ in how they encode the block height parameter.
/// Some formats may encode block height using log2, so a block height of 8 would be encoded as 3.
/// For formats that do not explicitly store block height, see [block_height_mip0].
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum BlockHeight {
    One = 1,
    Two = 2,
    Four = 4,
    Eight = 8,
    Sixteen = 16,
    ThirtyTwo = 32,
}

impl BlockHeight {
    /// Attempts to construct a block height from `value`.
    /// Returns [None] if `value` is not a supported block height.
    /// # Examples
    /**
    ```rust
    use blocklinear::BlockHeight;

    assert_eq!(Some(BlockHeight::Eight), BlockHeight::new(8));
    assert_eq!(None, BlockHeight::new(5));
    ```
    */
    pub fn new(value: u32) -> Option<Self> {
        match value {
            1 => Some(BlockHeight::One),
            2 => Some(BlockHeight::Two),
            4 => Some(BlockHeight::Four),
            8 => Some(BlockHeight::Eight),
            16 => Some(BlockHeight::Sixteen),
            32 => Some(BlockHeight::ThirtyTwo),
            _ => None,
        }
    }

    /// Like [BlockHeight::new] but reports the rejected value.
    pub fn try_new(value: u32) -> Result<Self, SwizzleError> {
        Self::new(value).ok_or(ArgumentError::UnsupportedBlockHeight(value).into())
    }

    /// The height of a block in rows of bytes.
    pub const fn height_in_bytes(self) -> usize {
        self as usize * GOB_HEIGHT_IN_BYTES
    }
}

/// Calculates the division of `x` by `d` but rounds up rather than truncating.
///
/// # Examples
/// Use this function when calculating dimensions for block compressed formats like BC7.
/**
```rust
# use blocklinear::div_round_up;
assert_eq!(2, div_round_up(8, 4));
assert_eq!(3, div_round_up(10, 4));
```
 */
/// Uncompressed formats are equivalent to 1x1 pixel blocks.
/// The call to [div_round_up] can simply be omitted in these cases.
/**
```rust
# use blocklinear::div_round_up;
let n = 10;
assert_eq!(n, div_round_up(n, 1));
```
 */
#[inline]
pub const fn div_round_up(x: u32, d: u32) -> u32 {
    // Avoid overflow for values close to u32::MAX.
    x / d + (x % d != 0) as u32
}

#[inline]
const fn round_up(x: usize, n: usize) -> usize {
    x.div_ceil(n) * n
}
