//! Functions for working with surfaces stored in a combined buffer for all array layers and mipmaps.
//!
//! It's common for texture surfaces to be represented
//! as a single allocated region of memory that contains all array layers and mipmaps.
//! This also applies to the tiled surfaces used for most textures on the Tegra X1.
//!
//! Use [deswizzle_surface] for untiling surfaces into a single `Vec<u8>`.
//! This output can be used as is for creating DDS files.
//! Modern graphics APIs like Vulkan also support this dense layout for initializing all
//! array layers and mipmaps for a texture in a single API call.
//!
//! Use [swizzle_surface] for tiling a surface from a combined buffer like the result of [deswizzle_surface] or a DDS file.
//! The `_into` variants write to caller provided buffers instead of allocating.
//!
//! # Examples
//! Array layers and mipmaps are ordered by layer and then mipmap.
//! A surface with `L` layers and `M` mipmaps would have the following layout.
/*!
```no_compile
Layer 0 Mip 0
Layer 0 Mip 1
...
Layer 0 Mip M-1
Layer 1 Mip 0
Layer 1 Mip 1
...
Layer L-1 Mip M-1
```
*/
//! The convention is for the untiled or linear layout to be tightly packed.
//! Tiled surfaces add padding to whole blocks for each mipmap
//! and align each array layer to the block size of the base mip level.
use alloc::{vec, vec::Vec};
use core::num::NonZeroU32;

use tracing::{debug, trace};

use crate::{
    blockdepth::{block_depth, mip_block_depth},
    div_round_up,
    layout::{align_layer_size, mip_dimension, MipLevelLayout},
    mip_block_height, round_up,
    swizzle::swizzle_inner,
    ArgumentError, BlockHeight, SwizzleError,
};

/// The dimensions of a compressed block. Compressed block sizes are usually 4x4 pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockDim {
    /// The width of the block in pixels.
    pub width: NonZeroU32,
    /// The height of the block in pixels.
    pub height: NonZeroU32,
    /// The depth of the block in pixels.
    pub depth: NonZeroU32,
}

impl BlockDim {
    /// A 1x1x1 block for formats that do not use block compression like R8G8B8A8.
    pub const fn uncompressed() -> Self {
        BlockDim {
            width: NonZeroU32::MIN,
            height: NonZeroU32::MIN,
            depth: NonZeroU32::MIN,
        }
    }

    /// A 4x4x1 compressed block. This includes any of the BCN formats like BC1, BC3, or BC7.
    /// This also includes DXT1, DXT3, and DXT5.
    pub const fn block_4x4() -> Self {
        BlockDim {
            width: NonZeroU32::MIN.saturating_add(3),
            height: NonZeroU32::MIN.saturating_add(3),
            depth: NonZeroU32::MIN,
        }
    }

    /// Creates a block from dimensions in pixels.
    /// Returns [ArgumentError::InvalidBlockDim] if any dimension is zero.
    /**
    ```rust
    use blocklinear::surface::BlockDim;

    assert_eq!(Ok(BlockDim::block_4x4()), BlockDim::new(4, 4, 1));
    assert!(BlockDim::new(4, 0, 1).is_err());
    ```
    */
    pub fn new(width: u32, height: u32, depth: u32) -> Result<Self, SwizzleError> {
        match (
            NonZeroU32::new(width),
            NonZeroU32::new(height),
            NonZeroU32::new(depth),
        ) {
            (Some(width), Some(height), Some(depth)) => Ok(BlockDim {
                width,
                height,
                depth,
            }),
            _ => Err(ArgumentError::InvalidBlockDim {
                width,
                height,
                depth,
            }
            .into()),
        }
    }
}

impl Default for BlockDim {
    fn default() -> Self {
        Self::uncompressed()
    }
}

/// The geometry of a surface with all of its array layers and mipmaps.
///
/// The `width`, `height`, and `depth` are in pixels.
/// A `block_height_mip0` of [None] infers the block height from the dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceDescriptor {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub block_dim: BlockDim,
    pub block_height_mip0: Option<BlockHeight>,
    pub bytes_per_pixel: u32,
    pub mipmap_count: u32,
    pub layer_count: u32,
}

// The size methods assume a surface that passed validate
// and may overflow otherwise.
impl SurfaceDescriptor {
    /// Checks that the surface is non empty and that its sizes can be calculated without overflow.
    pub fn validate(&self) -> Result<(), SwizzleError> {
        let invalid = || -> SwizzleError {
            ArgumentError::InvalidSurface {
                width: self.width,
                height: self.height,
                depth: self.depth,
                bytes_per_pixel: self.bytes_per_pixel,
                mipmap_count: self.mipmap_count,
                layer_count: self.layer_count,
            }
            .into()
        };

        if self.width == 0
            || self.height == 0
            || self.depth == 0
            || self.bytes_per_pixel == 0
            || self.mipmap_count == 0
            || self.layer_count == 0
        {
            return Err(invalid());
        }

        // A 32-bit integer dimension can only have 32 mipmaps.
        if self.mipmap_count > u32::BITS {
            return Err(invalid());
        }

        // Bounding the base level keeps the per layer sums well within usize.
        if self
            .width
            .checked_mul(self.height)
            .and_then(|u| u.checked_mul(self.depth))
            .and_then(|u| u.checked_mul(self.bytes_per_pixel))
            .is_none()
        {
            return Err(invalid());
        }

        let layer_count = self.layer_count as usize;
        self.layer_swizzled_size()
            .checked_mul(layer_count)
            .and(self.layer_deswizzled_size().checked_mul(layer_count))
            .ok_or_else(invalid)?;

        Ok(())
    }

    /// The block height for the base mip level.
    ///
    /// An explicit block height is used as is.
    /// Otherwise 2D surfaces use [block_height_mip0](crate::block_height_mip0)
    /// and 3D surfaces use [BlockHeight::One].
    pub fn mip0_block_height(&self) -> BlockHeight {
        match self.block_height_mip0 {
            Some(block_height) => block_height,
            None if self.depth == 1 => crate::block_height_mip0(div_round_up(
                self.height,
                self.block_dim.height.get(),
            )),
            None => BlockHeight::One,
        }
    }

    /// The dimensions in blocks and tiling parameters for mipmap `mip`.
    pub fn mip_layout(&self, mip: u32) -> MipLevelLayout {
        let width = mip_dimension(self.width, mip, self.block_dim.width.get());
        let height = mip_dimension(self.height, mip, self.block_dim.height.get());
        let depth = mip_dimension(self.depth, mip, self.block_dim.depth.get());

        let block_depth_mip0 = block_depth(mip_dimension(self.depth, 0, self.block_dim.depth.get()));

        MipLevelLayout {
            block_depth: mip_block_depth(depth, block_depth_mip0),
            ..MipLevelLayout::new(
                width,
                height,
                depth,
                mip_block_height(height, self.mip0_block_height()),
                self.bytes_per_pixel,
            )
        }
    }

    fn mip_layouts(&self) -> impl Iterator<Item = MipLevelLayout> + '_ {
        (0..self.mipmap_count).map(|mip| self.mip_layout(mip))
    }

    /// The alignment in bytes for the start of each array layer in the tiled surface.
    pub fn layer_alignment(&self) -> usize {
        self.mip_layout(0).block_size_in_bytes()
    }

    /// The size in bytes of all the mipmaps for one array layer in the linear surface.
    pub fn layer_deswizzled_size(&self) -> usize {
        self.mip_layouts().map(|layout| layout.linear_size()).sum()
    }

    /// The size in bytes of all the mipmaps for one array layer in the tiled surface
    /// including the padding to the next layer.
    pub fn layer_swizzled_size(&self) -> usize {
        align_layer_size(self.unaligned_layer_swizzled_size(), &self.mip_layout(0))
    }

    fn unaligned_layer_swizzled_size(&self) -> usize {
        self.mip_layouts().map(|layout| layout.swizzled_size()).sum()
    }

    /// [SurfaceDescriptor::swizzled_size] for a valid surface or [None] otherwise.
    pub fn checked_swizzled_size(&self) -> Option<usize> {
        self.validate().ok().map(|_| self.swizzled_size())
    }

    /// [SurfaceDescriptor::deswizzled_size] for a valid surface or [None] otherwise.
    pub fn checked_deswizzled_size(&self) -> Option<usize> {
        self.validate().ok().map(|_| self.deswizzled_size())
    }

    /// The size in bytes of the linear surface.
    pub fn deswizzled_size(&self) -> usize {
        self.layer_deswizzled_size() * self.layer_count as usize
    }

    /// The size in bytes of the tiled surface.
    /// This is always a multiple of [SurfaceDescriptor::layer_swizzled_size].
    pub fn swizzled_size(&self) -> usize {
        self.layer_swizzled_size() * self.layer_count as usize
    }

    /// The number of tiled bytes that are actually read when untiling.
    ///
    /// This excludes the alignment after the final layer,
    /// so it can be smaller than [SurfaceDescriptor::swizzled_size].
    /// Texture formats with a single array layer often store exactly this many bytes.
    pub fn swizzled_data_size(&self) -> usize {
        match self.layer_count {
            0 => 0,
            layer_count => {
                self.layer_swizzled_size() * (layer_count as usize - 1)
                    + self.unaligned_layer_swizzled_size()
            }
        }
    }
}

/// Tiles all the array layers and mipmaps in `source` using the block linear algorithm
/// to a combined vector with appropriate mipmap and layer alignment.
///
/// The `width`, `height`, and `depth` are in pixels with the pixels per block defined by `block_dim`.
/// Use a `block_height_mip0` of [None] to infer the block height from the specified dimensions.
///
/// Returns [SwizzleError::SizeMismatch] if `source` does not have
/// at least as many bytes as the result of [deswizzled_surface_size].
///
/// # Examples
///
/// Compressed formats should still use pixel dimensions and set the appropriate block dimensions.
///
/// ```rust no_run
/// use blocklinear::surface::{BlockDim, swizzle_surface};
/// # let deswizzled_surface = vec![0u8; 10];
///
/// // 16x16 BC7 cube map with 5 mipmaps.
/// let surface = swizzle_surface(
///     16,
///     16,
///     1,
///     &deswizzled_surface,
///     BlockDim::block_4x4(),
///     None,
///     16,
///     5,
///     6,
/// );
/// ```
///
/// Uncompressed formats use a 1x1x1 pixel block.
///
/// ```rust no_run
/// // 16x16x16 R8G8B8A8 3D texture with no mipmaps.
/// use blocklinear::surface::{BlockDim, swizzle_surface};
/// # let deswizzled_surface = vec![0u8; 10];
/// let surface = swizzle_surface(
///     16,
///     16,
///     16,
///     &deswizzled_surface,
///     BlockDim::uncompressed(),
///     None,
///     4,
///     1,
///     1,
/// );
/// ```
#[allow(clippy::too_many_arguments)]
pub fn swizzle_surface(
    width: u32,
    height: u32,
    depth: u32,
    source: &[u8],
    block_dim: BlockDim,
    block_height_mip0: Option<BlockHeight>,
    bytes_per_pixel: u32,
    mipmap_count: u32,
    layer_count: u32,
) -> Result<Vec<u8>, SwizzleError> {
    let descriptor = SurfaceDescriptor {
        width,
        height,
        depth,
        block_dim,
        block_height_mip0,
        bytes_per_pixel,
        mipmap_count,
        layer_count,
    };
    descriptor.validate()?;

    // Validate the source length before attempting to allocate.
    // This reduces potential out of memory panics.
    SwizzleError::check_size(descriptor.deswizzled_size(), source.len())?;

    let mut result = vec![0u8; descriptor.swizzled_size()];
    swizzle_surface_into(&descriptor, source, &mut result)?;
    Ok(result)
}

/// Untiles all the array layers and mipmaps in `source` using the block linear algorithm
/// to a new vector without any padding between layers or mipmaps.
///
/// The `width`, `height`, and `depth` are in pixels with the pixels per block defined by `block_dim`.
/// Use a `block_height_mip0` of [None] to infer the block height from the specified dimensions.
///
/// Returns [SwizzleError::SizeMismatch] if `source` does not have
/// enough bytes for every mipmap of every layer.
/// The alignment after the final array layer is not required to be present.
///
/// # Examples
///
/// ```rust no_run
/// use blocklinear::surface::{BlockDim, deswizzle_surface};
/// # let swizzled_surface = vec![0u8; 10];
///
/// // 16x16 BC7 cube map with 5 mipmaps.
/// let surface = deswizzle_surface(
///     16,
///     16,
///     1,
///     &swizzled_surface,
///     BlockDim::block_4x4(),
///     None,
///     16,
///     5,
///     6,
/// );
///
/// // 128x128 R8G8B8A8 2D texture with no mipmaps.
/// let surface = deswizzle_surface(
///     128,
///     128,
///     1,
///     &swizzled_surface,
///     BlockDim::uncompressed(),
///     None,
///     4,
///     1,
///     1,
/// );
/// ```
#[allow(clippy::too_many_arguments)]
pub fn deswizzle_surface(
    width: u32,
    height: u32,
    depth: u32,
    source: &[u8],
    block_dim: BlockDim,
    block_height_mip0: Option<BlockHeight>,
    bytes_per_pixel: u32,
    mipmap_count: u32,
    layer_count: u32,
) -> Result<Vec<u8>, SwizzleError> {
    let descriptor = SurfaceDescriptor {
        width,
        height,
        depth,
        block_dim,
        block_height_mip0,
        bytes_per_pixel,
        mipmap_count,
        layer_count,
    };
    descriptor.validate()?;

    SwizzleError::check_size(descriptor.swizzled_data_size(), source.len())?;

    let mut result = vec![0u8; descriptor.deswizzled_size()];
    deswizzle_surface_into(&descriptor, source, &mut result)?;
    Ok(result)
}

/// Tiles the linear surface in `source` into `destination`.
///
/// `source` needs at least [SurfaceDescriptor::deswizzled_size] many bytes
/// and `destination` needs at least [SurfaceDescriptor::swizzled_size] many bytes.
/// All checks happen before writing, so `destination` is unmodified on error.
/// The tiled range of `destination` is zeroed first, so padding bytes are always zero.
pub fn swizzle_surface_into(
    descriptor: &SurfaceDescriptor,
    source: &[u8],
    destination: &mut [u8],
) -> Result<(), SwizzleError> {
    descriptor.validate()?;

    let deswizzled_size = descriptor.deswizzled_size();
    let swizzled_size = descriptor.swizzled_size();
    SwizzleError::check_size(deswizzled_size, source.len())?;
    SwizzleError::check_size(swizzled_size, destination.len())?;

    debug!(
        width = descriptor.width,
        height = descriptor.height,
        depth = descriptor.depth,
        mipmap_count = descriptor.mipmap_count,
        layer_count = descriptor.layer_count,
        block_height_mip0 = ?descriptor.mip0_block_height(),
        deswizzled_size,
        swizzled_size,
        "swizzle surface"
    );

    let destination = &mut destination[..swizzled_size];
    destination.fill(0);
    swizzle_surface_inner::<false>(descriptor, source, destination);
    Ok(())
}

/// Untiles the tiled surface in `source` into `destination`.
///
/// `source` needs at least [SurfaceDescriptor::swizzled_data_size] many bytes
/// and `destination` needs at least [SurfaceDescriptor::deswizzled_size] many bytes.
/// All checks happen before writing, so `destination` is unmodified on error.
pub fn deswizzle_surface_into(
    descriptor: &SurfaceDescriptor,
    source: &[u8],
    destination: &mut [u8],
) -> Result<(), SwizzleError> {
    descriptor.validate()?;

    let deswizzled_size = descriptor.deswizzled_size();
    let swizzled_size = descriptor.swizzled_data_size();
    SwizzleError::check_size(swizzled_size, source.len())?;
    SwizzleError::check_size(deswizzled_size, destination.len())?;

    debug!(
        width = descriptor.width,
        height = descriptor.height,
        depth = descriptor.depth,
        mipmap_count = descriptor.mipmap_count,
        layer_count = descriptor.layer_count,
        block_height_mip0 = ?descriptor.mip0_block_height(),
        deswizzled_size,
        swizzled_size,
        "deswizzle surface"
    );

    swizzle_surface_inner::<true>(descriptor, source, destination);
    Ok(())
}

// Buffer lengths are checked by the caller.
fn swizzle_surface_inner<const DESWIZZLE: bool>(
    descriptor: &SurfaceDescriptor,
    source: &[u8],
    destination: &mut [u8],
) {
    let layer_alignment = descriptor.layer_alignment();

    // The linear data is tightly packed while the tiled data has padding.
    // Track separate offsets for each side.
    let mut linear_offset = 0;
    let mut tiled_offset = 0;
    for layer in 0..descriptor.layer_count {
        for mip in 0..descriptor.mipmap_count {
            let layout = descriptor.mip_layout(mip);
            let linear_size = layout.linear_size();
            let swizzled_size = layout.swizzled_size();

            trace!(
                layer,
                mip,
                linear_offset,
                tiled_offset,
                block_height = ?layout.block_height,
                block_depth = layout.block_depth,
                "subresource"
            );

            let linear = linear_offset..linear_offset + linear_size;
            let tiled = tiled_offset..tiled_offset + swizzled_size;
            if DESWIZZLE {
                swizzle_inner::<true>(&layout, &source[tiled], &mut destination[linear]);
            } else {
                swizzle_inner::<false>(&layout, &source[linear], &mut destination[tiled]);
            }

            linear_offset += linear_size;
            tiled_offset += swizzled_size;
        }

        // Align offsets between array layers.
        tiled_offset = round_up(tiled_offset, layer_alignment);
    }
}

/// Calculates the size in bytes for the tiled data for the given surface.
/// Compare with [deswizzled_surface_size].
///
/// Dimensions should be in pixels.
///
/// Use a `block_height_mip0` of [None] to infer the block height from the specified dimensions.
/// Returns 0 if the surface fails [SurfaceDescriptor::validate].
/**
```rust
use blocklinear::surface::{swizzled_surface_size, BlockDim};

// 128x128 BC7 cube map with 8 mipmaps.
let size = swizzled_surface_size(128, 128, 1, BlockDim::block_4x4(), None, 16, 8, 6);
assert_eq!(147456, size);
```
 */
#[allow(clippy::too_many_arguments)]
pub fn swizzled_surface_size(
    width: u32,
    height: u32,
    depth: u32,
    block_dim: BlockDim,
    block_height_mip0: Option<BlockHeight>,
    bytes_per_pixel: u32,
    mipmap_count: u32,
    layer_count: u32,
) -> usize {
    SurfaceDescriptor {
        width,
        height,
        depth,
        block_dim,
        block_height_mip0,
        bytes_per_pixel,
        mipmap_count,
        layer_count,
    }
    .checked_swizzled_size()
    .unwrap_or(0)
}

/// Calculates the size in bytes for the untiled or linear data for the given surface.
/// Compare with [swizzled_surface_size].
///
/// Dimensions should be in pixels.
/// Returns 0 if the surface fails [SurfaceDescriptor::validate].
/**
```rust
use blocklinear::surface::{deswizzled_surface_size, BlockDim};

// 256x256 R8G8B8A8 2D texture with no mipmaps.
let size = deswizzled_surface_size(256, 256, 1, BlockDim::uncompressed(), 4, 1, 1);
assert_eq!(262144, size);
```
 */
pub fn deswizzled_surface_size(
    width: u32,
    height: u32,
    depth: u32,
    block_dim: BlockDim,
    bytes_per_pixel: u32,
    mipmap_count: u32,
    layer_count: u32,
) -> usize {
    SurfaceDescriptor {
        width,
        height,
        depth,
        block_dim,
        block_height_mip0: None,
        bytes_per_pixel,
        mipmap_count,
        layer_count,
    }
    .checked_deswizzled_size()
    .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{deswizzled_mip_size, swizzle::swizzle_block_linear, swizzled_mip_size};
    use proptest::prelude::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use rstest::rstest;

    fn random_bytes(len: usize) -> Vec<u8> {
        let seed = [13u8; 32];
        let mut rng: StdRng = SeedableRng::from_seed(seed);
        (0..len).map(|_| rng.gen_range::<u8, _>(0..=255)).collect()
    }

    fn descriptor(
        width: u32,
        height: u32,
        depth: u32,
        is_compressed: bool,
        bpp: u32,
        mipmap_count: u32,
        layer_count: u32,
    ) -> SurfaceDescriptor {
        SurfaceDescriptor {
            width,
            height,
            depth,
            block_dim: if is_compressed {
                BlockDim::block_4x4()
            } else {
                BlockDim::uncompressed()
            },
            block_height_mip0: None,
            bytes_per_pixel: bpp,
            mipmap_count,
            layer_count,
        }
    }

    // Use helper functions to shorten the test cases.
    fn swizzle_length(
        width: u32,
        height: u32,
        source_length: usize,
        is_compressed: bool,
        bpp: u32,
        mipmap_count: u32,
        layer_count: u32,
    ) -> usize {
        let d = descriptor(width, height, 1, is_compressed, bpp, mipmap_count, layer_count);
        swizzle_surface(
            width,
            height,
            1,
            &vec![0u8; source_length],
            d.block_dim,
            None,
            bpp,
            mipmap_count,
            layer_count,
        )
        .unwrap()
        .len()
    }

    fn deswizzle_length(
        width: u32,
        height: u32,
        source_length: usize,
        is_compressed: bool,
        bpp: u32,
        mipmap_count: u32,
        layer_count: u32,
    ) -> usize {
        let d = descriptor(width, height, 1, is_compressed, bpp, mipmap_count, layer_count);
        deswizzle_surface(
            width,
            height,
            1,
            &vec![0u8; source_length],
            d.block_dim,
            None,
            bpp,
            mipmap_count,
            layer_count,
        )
        .unwrap()
        .len()
    }

    // Expected swizzled sizes are taken from game texture files with 6 array layers.
    #[rstest]
    #[case(16, 16, false, 4, 1, 6144)]
    #[case(16, 16, true, 8, 1, 3072)]
    #[case(2048, 2048, true, 16, 1, 25165824)]
    #[case(256, 256, false, 4, 1, 1572864)]
    #[case(64, 64, false, 4, 1, 98304)]
    #[case(64, 64, false, 16, 1, 393216)]
    #[case(128, 128, true, 16, 8, 147456)]
    #[case(16, 16, true, 16, 5, 15360)]
    #[case(256, 256, true, 16, 9, 540672)]
    #[case(288, 288, true, 16, 9, 1204224)]
    #[case(512, 512, true, 16, 10, 2113536)]
    #[case(64, 64, true, 16, 7, 49152)]
    fn swizzle_surface_cube_map_length(
        #[case] width: u32,
        #[case] height: u32,
        #[case] is_compressed: bool,
        #[case] bpp: u32,
        #[case] mipmap_count: u32,
        #[case] expected: usize,
    ) {
        let d = descriptor(width, height, 1, is_compressed, bpp, mipmap_count, 6);
        assert_eq!(
            expected,
            swizzle_length(width, height, d.deswizzled_size(), is_compressed, bpp, mipmap_count, 6)
        );
        assert_eq!(
            d.deswizzled_size(),
            deswizzle_length(width, height, expected, is_compressed, bpp, mipmap_count, 6)
        );
    }

    // Single layer texture files store the tiled data without trailing layer alignment.
    // The deswizzled size is the sum of the mipmap sizes.
    #[rstest]
    #[case(100, 100, true, 8, 7, 12800, 6864)]
    #[case(1028, 256, true, 16, 11, 360960, 351376)]
    #[case(128, 32, false, 4, 8, 24064, 21852)]
    #[case(1536, 1024, true, 16, 11, 2099712, 2097184)]
    #[case(180, 180, true, 8, 8, 35328, 21992)]
    #[case(256, 32, true, 16, 9, 17920, 11024)]
    #[case(320, 128, true, 16, 9, 58368, 54672)]
    #[case(340, 340, true, 8, 9, 125440, 77840)]
    #[case(400, 400, true, 8, 9, 147968, 106864)]
    #[case(4, 24, false, 4, 1, 2048, 384)]
    #[case(512, 384, true, 16, 10, 351744, 262192)]
    #[case(640, 640, true, 8, 10, 440832, 273120)]
    #[case(64, 512, true, 8, 10, 26624, 21896)]
    #[case(800, 400, true, 8, 10, 280064, 213576)]
    #[case(8192, 2048, true, 16, 1, 16777216, 16777216)]
    fn deswizzle_surface_single_layer_length(
        #[case] width: u32,
        #[case] height: u32,
        #[case] is_compressed: bool,
        #[case] bpp: u32,
        #[case] mipmap_count: u32,
        #[case] swizzled_data_size: usize,
        #[case] deswizzled_size: usize,
    ) {
        let d = descriptor(width, height, 1, is_compressed, bpp, mipmap_count, 1);
        assert_eq!(swizzled_data_size, d.swizzled_data_size());
        assert!(d.swizzled_size() >= swizzled_data_size);
        assert_eq!(
            deswizzled_size,
            deswizzle_length(
                width,
                height,
                swizzled_data_size,
                is_compressed,
                bpp,
                mipmap_count,
                1
            )
        );
    }

    #[test]
    fn deswizzle_surface_explicit_block_height() {
        // This texture was tiled with a shorter block height than the default.
        let d = SurfaceDescriptor {
            block_height_mip0: Some(BlockHeight::Sixteen),
            ..descriptor(2048, 1344, 1, true, 16, 12, 1)
        };
        assert_eq!(4546048, d.swizzled_data_size());
        assert_eq!(3670320, d.deswizzled_size());

        let inferred = descriptor(2048, 1344, 1, true, 16, 12, 1);
        assert_eq!(BlockHeight::ThirtyTwo, inferred.mip0_block_height());
    }

    #[test]
    fn swizzle_surface_3d_length() {
        assert_eq!(
            16384,
            swizzled_surface_size(16, 16, 16, BlockDim::uncompressed(), None, 4, 1, 1)
        );
        assert_eq!(
            368640,
            swizzled_surface_size(33, 33, 33, BlockDim::uncompressed(), None, 4, 1, 1)
        );
    }

    #[test]
    fn surface_size_rgba_256() {
        let d = descriptor(256, 256, 1, false, 4, 1, 1);
        assert_eq!(262144, d.deswizzled_size());

        let swizzled_size = d.swizzled_size();
        let block_height = d.mip0_block_height();
        assert_eq!(BlockHeight::ThirtyTwo, block_height);
        assert!(swizzled_size >= 262144);
        assert_eq!(0, swizzled_size % (512 * block_height as usize));
    }

    #[test]
    fn block_height_mip0_single_row() {
        let d = descriptor(256, 1, 1, false, 4, 1, 1);
        assert_eq!(BlockHeight::One, d.mip0_block_height());
    }

    #[test]
    fn block_height_mip0_3d_is_one() {
        let d = descriptor(64, 64, 4, false, 4, 1, 1);
        assert_eq!(BlockHeight::One, d.mip0_block_height());

        let d = SurfaceDescriptor {
            block_height_mip0: Some(BlockHeight::Four),
            ..d
        };
        assert_eq!(BlockHeight::Four, d.mip0_block_height());
    }

    #[test]
    fn mip_chain_sizes() {
        let d = descriptor(256, 256, 1, false, 4, 4, 1);
        let widths: Vec<_> = (0..4).map(|mip| d.mip_layout(mip).width).collect();
        assert_eq!(vec![256, 128, 64, 32], widths);

        let sizes: Vec<_> = (0..4)
            .map(|mip| {
                let l = d.mip_layout(mip);
                deswizzled_mip_size(l.width, l.height, l.depth, 4)
            })
            .collect();
        assert_eq!(vec![262144, 65536, 16384, 4096], sizes);
        assert_eq!(sizes.iter().sum::<usize>(), d.deswizzled_size());

        // Longer chains stop at a single pixel.
        let d = descriptor(256, 256, 1, false, 4, 12, 1);
        let last = d.mip_layout(11);
        assert_eq!((1, 1, 1), (last.width, last.height, last.depth));
        assert_eq!(348160, d.deswizzled_size());
    }

    #[test]
    fn mip_layout_matches_mip_size() {
        let d = descriptor(300, 200, 1, true, 16, 6, 1);
        let block_height_mip0 = d.mip0_block_height();
        for mip in 0..6 {
            let l = d.mip_layout(mip);
            let block_height = mip_block_height(l.height, block_height_mip0);
            assert_eq!(block_height, l.block_height);
            assert_eq!(
                swizzled_mip_size(l.width, l.height, l.depth, block_height, 16),
                l.swizzled_size()
            );
        }
    }

    #[test]
    fn deswizzle_surface_not_enough_data() {
        let input = [0, 0, 0, 0];
        let result = deswizzle_surface(4, 4, 1, &input, BlockDim::uncompressed(), None, 4, 1, 1);
        assert_eq!(
            result,
            Err(SwizzleError::SizeMismatch {
                expected_size: 512,
                actual_size: 4
            })
        );
    }

    #[test]
    fn swizzle_surface_not_enough_data() {
        let input = [0, 0, 0, 0];
        let result = swizzle_surface(16, 16, 16, &input, BlockDim::uncompressed(), None, 4, 1, 1);
        assert_eq!(
            result,
            Err(SwizzleError::SizeMismatch {
                expected_size: 16384,
                actual_size: 4
            })
        );
    }

    #[test]
    fn swizzle_surface_into_short_destination() {
        let d = descriptor(64, 64, 1, false, 4, 3, 2);
        let source = random_bytes(d.deswizzled_size());
        let mut destination = vec![0x55u8; d.swizzled_size() - 1];

        let result = swizzle_surface_into(&d, &source, &mut destination);
        assert_eq!(
            result,
            Err(SwizzleError::SizeMismatch {
                expected_size: d.swizzled_size(),
                actual_size: d.swizzled_size() - 1
            })
        );
        assert!(destination.iter().all(|b| *b == 0x55));
    }

    #[test]
    fn deswizzle_surface_into_short_destination() {
        let d = descriptor(64, 64, 1, true, 16, 3, 2);
        let source = random_bytes(d.swizzled_size());
        let mut destination = vec![0x55u8; d.deswizzled_size() - 1];

        assert!(matches!(
            deswizzle_surface_into(&d, &source, &mut destination),
            Err(SwizzleError::SizeMismatch { .. })
        ));
        assert!(destination.iter().all(|b| *b == 0x55));
    }

    #[test]
    fn swizzle_surface_into_zeroes_padding() {
        let d = descriptor(20, 20, 1, false, 4, 2, 2);
        let source = vec![0xFFu8; d.deswizzled_size()];
        let mut destination = vec![0xAAu8; d.swizzled_size() + 16];
        swizzle_surface_into(&d, &source, &mut destination).unwrap();

        let written = destination[..d.swizzled_size()]
            .iter()
            .filter(|b| **b == 0xFF)
            .count();
        assert_eq!(d.deswizzled_size(), written);
        assert!(destination[..d.swizzled_size()]
            .iter()
            .all(|b| *b == 0xFF || *b == 0));
        assert!(destination[d.swizzled_size()..].iter().all(|b| *b == 0xAA));
    }

    #[test]
    fn swizzle_surface_layers_are_aligned() {
        // Each layer should match tiling the mipmaps individually.
        let d = descriptor(40, 24, 1, false, 4, 3, 3);
        let source = random_bytes(d.deswizzled_size());
        let tiled = swizzle_surface(40, 24, 1, &source, d.block_dim, None, 4, 3, 3).unwrap();

        let layer_size = d.layer_swizzled_size();
        assert_eq!(0, layer_size % d.layer_alignment());

        let mut linear_offset = 0;
        for layer in 0..3 {
            let mut tiled_offset = layer * layer_size;
            for mip in 0..3 {
                let l = d.mip_layout(mip);
                let expected = swizzle_block_linear(
                    l.width,
                    l.height,
                    l.depth,
                    &source[linear_offset..linear_offset + l.linear_size()],
                    l.block_height,
                    4,
                )
                .unwrap();
                assert_eq!(
                    expected[..],
                    tiled[tiled_offset..tiled_offset + l.swizzled_size()]
                );
                linear_offset += l.linear_size();
                tiled_offset += l.swizzled_size();
            }
        }
    }

    #[rstest]
    #[case::rgba_mipmaps(128, 96, 1, BlockDim::uncompressed(), None, 4, 8, 1)]
    #[case::bc7_cube(64, 64, 1, BlockDim::block_4x4(), None, 16, 7, 6)]
    #[case::bc1_odd(100, 60, 1, BlockDim::block_4x4(), None, 8, 5, 2)]
    #[case::explicit_block_height(64, 64, 1, BlockDim::uncompressed(), Some(BlockHeight::Sixteen), 4, 4, 3)]
    #[case::volume(16, 16, 16, BlockDim::uncompressed(), None, 4, 1, 1)]
    #[case::volume_mipmaps(33, 33, 33, BlockDim::uncompressed(), None, 4, 3, 1)]
    #[case::volume_layers(8, 8, 3, BlockDim::uncompressed(), None, 8, 2, 2)]
    #[allow(clippy::too_many_arguments)]
    fn surface_round_trip(
        #[case] width: u32,
        #[case] height: u32,
        #[case] depth: u32,
        #[case] block_dim: BlockDim,
        #[case] block_height_mip0: Option<BlockHeight>,
        #[case] bpp: u32,
        #[case] mipmap_count: u32,
        #[case] layer_count: u32,
    ) {
        let size = deswizzled_surface_size(
            width,
            height,
            depth,
            block_dim,
            bpp,
            mipmap_count,
            layer_count,
        );
        let input = random_bytes(size);

        let swizzled = swizzle_surface(
            width,
            height,
            depth,
            &input,
            block_dim,
            block_height_mip0,
            bpp,
            mipmap_count,
            layer_count,
        )
        .unwrap();
        assert_eq!(
            swizzled_surface_size(
                width,
                height,
                depth,
                block_dim,
                block_height_mip0,
                bpp,
                mipmap_count,
                layer_count
            ),
            swizzled.len()
        );

        let deswizzled = deswizzle_surface(
            width,
            height,
            depth,
            &swizzled,
            block_dim,
            block_height_mip0,
            bpp,
            mipmap_count,
            layer_count,
        )
        .unwrap();
        assert_eq!(input, deswizzled);
    }

    #[rstest]
    #[case::zero_width(0, 1, 1, 4, 1, 1)]
    #[case::zero_height(1, 0, 1, 4, 1, 1)]
    #[case::zero_depth(1, 1, 0, 4, 1, 1)]
    #[case::zero_bpp(1, 1, 1, 0, 1, 1)]
    #[case::zero_mipmaps(1, 1, 1, 4, 0, 1)]
    #[case::zero_layers(1, 1, 1, 4, 1, 0)]
    #[case::too_many_mipmaps(1, 1, 1, 4, 33, 1)]
    #[case::potential_overflow(65535, 65535, 65535, 4, 1, 1)]
    #[case::wide_overflow(u32::MAX, 1, 1, 4, 1, 1)]
    #[case::layer_overflow(u32::MAX / 16, 1, 1, 4, 1, u32::MAX)]
    #[case::max_2d(u32::MAX, u32::MAX, 1, 4, 1, 1)]
    fn invalid_surfaces(
        #[case] width: u32,
        #[case] height: u32,
        #[case] depth: u32,
        #[case] bytes_per_pixel: u32,
        #[case] mipmap_count: u32,
        #[case] layer_count: u32,
    ) {
        // The input is clearly too small, so this should error instead of panic.
        let input = [0u8; 4];
        let expected = Err(SwizzleError::InvalidArgument(ArgumentError::InvalidSurface {
            width,
            height,
            depth,
            bytes_per_pixel,
            mipmap_count,
            layer_count,
        }));

        let result = swizzle_surface(
            width,
            height,
            depth,
            &input,
            BlockDim::uncompressed(),
            None,
            bytes_per_pixel,
            mipmap_count,
            layer_count,
        );
        assert_eq!(expected, result);

        let result = deswizzle_surface(
            width,
            height,
            depth,
            &input,
            BlockDim::uncompressed(),
            None,
            bytes_per_pixel,
            mipmap_count,
            layer_count,
        );
        assert_eq!(expected, result);

        // Size calculations report nothing instead of a size for an invalid surface.
        assert_eq!(
            0,
            swizzled_surface_size(
                width,
                height,
                depth,
                BlockDim::uncompressed(),
                None,
                bytes_per_pixel,
                mipmap_count,
                layer_count
            )
        );
        assert_eq!(
            0,
            deswizzled_surface_size(
                width,
                height,
                depth,
                BlockDim::uncompressed(),
                bytes_per_pixel,
                mipmap_count,
                layer_count
            )
        );
    }

    #[test]
    fn surface_sizes_zero_width() {
        // mip_dimension clamps to 1, so the descriptor sizes alone would be non zero.
        let d = descriptor(0, 16, 1, false, 4, 1, 1);
        assert_eq!(None, d.checked_deswizzled_size());
        assert_eq!(None, d.checked_swizzled_size());
        assert_eq!(
            0,
            deswizzled_surface_size(0, 16, 1, BlockDim::uncompressed(), 4, 1, 1)
        );
        assert_eq!(
            Some(1024),
            SurfaceDescriptor { width: 16, ..d }.checked_deswizzled_size()
        );
    }

    #[test]
    fn block_dim_new() {
        assert_eq!(Ok(BlockDim::uncompressed()), BlockDim::new(1, 1, 1));
        assert_eq!(BlockDim::uncompressed(), BlockDim::default());
        assert_eq!(4, BlockDim::block_4x4().width.get());
        assert_eq!(
            Err(SwizzleError::InvalidArgument(ArgumentError::InvalidBlockDim {
                width: 0,
                height: 4,
                depth: 1
            })),
            BlockDim::new(0, 4, 1)
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn sizes_are_multiplicative_in_layers(
            width in 1u32..300,
            height in 1u32..300,
            depth in 1u32..9,
            compressed in any::<bool>(),
            bpp in prop::sample::select(vec![1u32, 2, 4, 8, 12, 16]),
            mipmap_count in 1u32..10,
            layer_count in 1u32..8,
        ) {
            let d = descriptor(width, height, depth, compressed, bpp, mipmap_count, layer_count);
            let single = SurfaceDescriptor { layer_count: 1, ..d };

            prop_assert_eq!(d.swizzled_size(), single.swizzled_size() * layer_count as usize);
            prop_assert_eq!(d.deswizzled_size(), single.deswizzled_size() * layer_count as usize);
            prop_assert!(d.swizzled_size() >= d.deswizzled_size());
            prop_assert!(d.swizzled_data_size() <= d.swizzled_size());
            prop_assert!(d.swizzled_data_size() >= d.deswizzled_size());
        }

        #[test]
        fn surface_round_trip_property(
            width in 1u32..80,
            height in 1u32..80,
            depth in 1u32..4,
            bpp in 1u32..17,
            mipmap_count in 1u32..5,
            layer_count in 1u32..4,
        ) {
            let d = descriptor(width, height, depth, false, bpp, mipmap_count, layer_count);
            let input = random_bytes(d.deswizzled_size());

            let mut swizzled = vec![0u8; d.swizzled_size()];
            swizzle_surface_into(&d, &input, &mut swizzled).unwrap();

            // The trailing layer alignment is not needed for untiling.
            let mut deswizzled = vec![0u8; d.deswizzled_size()];
            deswizzle_surface_into(&d, &swizzled[..d.swizzled_data_size()], &mut deswizzled).unwrap();
            prop_assert_eq!(input, deswizzled);
        }
    }
}
