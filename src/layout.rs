//! Geometry for a single mip level of a single array layer.
//!
//! A [MipLevelLayout] is cheap to compute, so callers create one whenever they need it
//! rather than storing it.
use core::cmp::max;

use crate::{
    blockdepth::block_depth, div_round_up, round_up, ArgumentError, BlockHeight, SwizzleError,
    GOB_SIZE_IN_BYTES, GOB_WIDTH_IN_BYTES,
};

/// The dimensions in blocks and tiling parameters for one subresource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MipLevelLayout {
    /// The width in blocks.
    pub width: u32,
    /// The height in blocks.
    pub height: u32,
    /// The depth in blocks.
    pub depth: u32,
    pub bytes_per_pixel: u32,
    /// The number of GOBs stacked vertically in a block.
    pub block_height: BlockHeight,
    /// The number of GOBs stacked along the depth axis in a block.
    pub block_depth: u32,
}

impl MipLevelLayout {
    /// Creates a layout using the block depth inferred from `depth`.
    pub fn new(
        width: u32,
        height: u32,
        depth: u32,
        block_height: BlockHeight,
        bytes_per_pixel: u32,
    ) -> Self {
        Self {
            width,
            height,
            depth,
            bytes_per_pixel,
            block_height,
            block_depth: block_depth(depth),
        }
    }

    /// Creates a layout like [MipLevelLayout::new]
    /// after checking that the linear and tiled sizes fit in a `usize`.
    ///
    /// Returns [ArgumentError::InvalidMipLevel] otherwise.
    pub fn try_new(
        width: u32,
        height: u32,
        depth: u32,
        block_height: BlockHeight,
        bytes_per_pixel: u32,
    ) -> Result<Self, SwizzleError> {
        let layout = Self::new(width, height, depth, block_height, bytes_per_pixel);
        match layout.checked_swizzled_size() {
            Some(_) => Ok(layout),
            None => Err(ArgumentError::InvalidMipLevel {
                width,
                height,
                depth,
                bytes_per_pixel,
            }
            .into()),
        }
    }

    /// The same value as [MipLevelLayout::linear_size] or [None] on overflow.
    pub fn checked_linear_size(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.bytes_per_pixel as usize)?
            .checked_mul(self.height as usize)?
            .checked_mul(self.depth as usize)
    }

    /// The same value as [MipLevelLayout::swizzled_size] or [None] if either size overflows.
    ///
    /// The tiled size is never smaller than the linear size,
    /// so a result of [Some] means every size of this layout can be calculated.
    pub fn checked_swizzled_size(&self) -> Option<usize> {
        // The row pitch is only safe to compute once the linear size fits.
        self.checked_linear_size()?;
        self.width_in_gobs()
            .checked_mul(self.block_size_in_bytes())?
            .checked_mul(self.height_in_blocks())?
            .checked_mul(self.depth_in_blocks())
    }

    /// The number of bytes in a single row of the linear layout.
    pub fn row_pitch(&self) -> usize {
        self.width as usize * self.bytes_per_pixel as usize
    }

    /// The number of bytes in a single depth slice of the linear layout.
    pub fn slice_size(&self) -> usize {
        self.row_pitch() * self.height as usize
    }

    /// The size in bytes of the tightly packed row-major data.
    pub fn linear_size(&self) -> usize {
        self.slice_size() * self.depth as usize
    }

    pub fn width_in_gobs(&self) -> usize {
        self.row_pitch().div_ceil(GOB_WIDTH_IN_BYTES)
    }

    pub fn height_in_blocks(&self) -> usize {
        (self.height as usize).div_ceil(self.block_height.height_in_bytes())
    }

    pub fn depth_in_blocks(&self) -> usize {
        (self.depth as usize).div_ceil(self.block_depth as usize)
    }

    /// The size in bytes of a block. Blocks are always one GOB wide.
    pub fn block_size_in_bytes(&self) -> usize {
        GOB_SIZE_IN_BYTES * self.block_height as usize * self.block_depth as usize
    }

    /// The size in bytes of a row of blocks spanning the width of the surface.
    pub fn block_row_size(&self) -> usize {
        self.width_in_gobs() * self.block_size_in_bytes()
    }

    /// The size in bytes of a full layer of blocks along the depth axis.
    pub fn block_slice_size(&self) -> usize {
        self.block_row_size() * self.height_in_blocks()
    }

    /// The size in bytes of the tiled data.
    /// This is padded to whole blocks, so it is never smaller than [MipLevelLayout::linear_size].
    pub fn swizzled_size(&self) -> usize {
        self.block_slice_size() * self.depth_in_blocks()
    }

    /// The height in rows of the tiled data after padding to whole blocks.
    pub fn padded_height(&self) -> usize {
        self.height_in_blocks() * self.block_height.height_in_bytes()
    }
}

/// The size of dimension `value` in blocks at `mip` after dividing by the block size `block_dim`.
/// Dimensions never go below a single block.
pub fn mip_dimension(value: u32, mip: u32, block_dim: u32) -> u32 {
    max(div_round_up(value.checked_shr(mip).unwrap_or(0), block_dim), 1)
}

/// Pads the tiled size of an array layer to a whole number of mip 0 blocks.
///
/// Every layer starts on a block boundary, so the tiled surface size is always
/// the aligned layer size times the number of layers.
pub fn align_layer_size(layer_size: usize, mip0: &MipLevelLayout) -> usize {
    round_up(layer_size, mip0.block_size_in_bytes())
}
