//! Tiling and untiling for one subresource, a single mip level of a single array layer.
//!
//! Every function here describes the subresource with a [MipLevelLayout] built from
//! its width, height, and depth in blocks. A block is a single pixel for uncompressed formats.
//! Compressed formats pass their block counts from [div_round_up](crate::div_round_up)
//! and the size of one block as the bytes per pixel.
//!
//! The `_into` functions write to a caller provided buffer and never allocate.
//! Use [surface](crate::surface) for textures with mipmaps or array layers.
use alloc::{vec, vec::Vec};

use crate::{
    layout::MipLevelLayout, BlockHeight, SwizzleError, GOB_HEIGHT_IN_BYTES, GOB_SIZE_IN_BYTES,
    GOB_WIDTH_IN_BYTES,
};

/// Tiles the linear bytes in `source` and returns a new buffer of [swizzled_mip_size] bytes.
///
/// Returns [SwizzleError::InvalidArgument] if the sizes overflow
/// and [SwizzleError::SizeMismatch] if `source` is shorter than [deswizzled_mip_size].
/// # Examples
/**
```rust
use blocklinear::{block_height_mip0, div_round_up, swizzle::swizzle_block_linear};

// A 100x60 BC1 image is 25x15 blocks of 8 bytes.
let width = div_round_up(100, 4);
let height = div_round_up(60, 4);
let block_height = block_height_mip0(height);

let linear = vec![0u8; 25 * 15 * 8];
let tiled = swizzle_block_linear(width, height, 1, &linear, block_height, 8)?;
assert_eq!(4096, tiled.len());
# Ok::<(), blocklinear::SwizzleError>(())
```
 */
pub fn swizzle_block_linear(
    width: u32,
    height: u32,
    depth: u32,
    source: &[u8],
    block_height: BlockHeight,
    bytes_per_pixel: u32,
) -> Result<Vec<u8>, SwizzleError> {
    let layout = MipLevelLayout::try_new(width, height, depth, block_height, bytes_per_pixel)?;

    // Check the source before allocating the output.
    SwizzleError::check_size(layout.linear_size(), source.len())?;

    let mut destination = vec![0u8; layout.swizzled_size()];
    swizzle_inner::<false>(&layout, source, &mut destination);
    Ok(destination)
}

/// Untiles the bytes in `source` and returns a new buffer of [deswizzled_mip_size] bytes.
///
/// Returns [SwizzleError::InvalidArgument] if the sizes overflow
/// and [SwizzleError::SizeMismatch] if `source` is shorter than [swizzled_mip_size].
/// # Examples
/**
```rust
use blocklinear::{BlockHeight, swizzle::deswizzle_block_linear};

// A single 16x8 RGBA8 GOB.
let tiled = vec![0u8; 512];
let linear = deswizzle_block_linear(16, 8, 1, &tiled, BlockHeight::One, 4)?;
assert_eq!(16 * 8 * 4, linear.len());
# Ok::<(), blocklinear::SwizzleError>(())
```
 */
pub fn deswizzle_block_linear(
    width: u32,
    height: u32,
    depth: u32,
    source: &[u8],
    block_height: BlockHeight,
    bytes_per_pixel: u32,
) -> Result<Vec<u8>, SwizzleError> {
    let layout = MipLevelLayout::try_new(width, height, depth, block_height, bytes_per_pixel)?;

    SwizzleError::check_size(layout.swizzled_size(), source.len())?;

    let mut destination = vec![0u8; layout.linear_size()];
    swizzle_inner::<true>(&layout, source, &mut destination);
    Ok(destination)
}

/// Tiles the bytes from `source` into `destination` without allocating.
///
/// The layout and both lengths are checked before anything is written.
/// `source` needs at least [deswizzled_mip_size] many bytes
/// and `destination` needs at least [swizzled_mip_size] many bytes.
/// Padding bytes in the tiled region of `destination` are set to zero.
/**
```rust
use blocklinear::{swizzled_mip_size, BlockHeight, swizzle::swizzle_block_linear_into};

let linear = [1u8; 4];
let mut tiled = vec![0xFFu8; swizzled_mip_size(1, 1, 1, BlockHeight::One, 4)];
swizzle_block_linear_into(1, 1, 1, &linear, &mut tiled, BlockHeight::One, 4)?;
assert_eq!(&[1u8, 1, 1, 1, 0], &tiled[..5]);
# Ok::<(), blocklinear::SwizzleError>(())
```
 */
pub fn swizzle_block_linear_into(
    width: u32,
    height: u32,
    depth: u32,
    source: &[u8],
    destination: &mut [u8],
    block_height: BlockHeight,
    bytes_per_pixel: u32,
) -> Result<(), SwizzleError> {
    let layout = MipLevelLayout::try_new(width, height, depth, block_height, bytes_per_pixel)?;
    let swizzled_size = layout.swizzled_size();

    SwizzleError::check_size(layout.linear_size(), source.len())?;
    SwizzleError::check_size(swizzled_size, destination.len())?;

    let destination = &mut destination[..swizzled_size];
    destination.fill(0);
    swizzle_inner::<false>(&layout, source, destination);
    Ok(())
}

/// Untiles the bytes from `source` into `destination` without allocating.
///
/// The layout and both lengths are checked before anything is written.
/// `source` needs at least [swizzled_mip_size] many bytes
/// and `destination` needs at least [deswizzled_mip_size] many bytes.
pub fn deswizzle_block_linear_into(
    width: u32,
    height: u32,
    depth: u32,
    source: &[u8],
    destination: &mut [u8],
    block_height: BlockHeight,
    bytes_per_pixel: u32,
) -> Result<(), SwizzleError> {
    let layout = MipLevelLayout::try_new(width, height, depth, block_height, bytes_per_pixel)?;

    SwizzleError::check_size(layout.swizzled_size(), source.len())?;
    SwizzleError::check_size(layout.linear_size(), destination.len())?;

    swizzle_inner::<true>(&layout, source, destination);
    Ok(())
}

/// The tiled size in bytes of one subresource with dimensions in blocks.
///
/// Rows are padded to whole GOBs and the height and depth are padded to whole blocks,
/// so this is never smaller than [deswizzled_mip_size].
/// Returns 0 if the size does not fit in a `usize`.
/**
```rust
use blocklinear::{BlockHeight, swizzled_mip_size};

// 256x256 RGBA8 is 16 GOBs wide and 32 GOBs tall.
assert_eq!(262144, swizzled_mip_size(256, 256, 1, BlockHeight::Sixteen, 4));

// A single pixel still takes up an entire GOB.
assert_eq!(512, swizzled_mip_size(1, 1, 1, BlockHeight::One, 4));
```
 */
pub fn swizzled_mip_size(
    width: u32,
    height: u32,
    depth: u32,
    block_height: BlockHeight,
    bytes_per_pixel: u32,
) -> usize {
    MipLevelLayout::new(width, height, depth, block_height, bytes_per_pixel)
        .checked_swizzled_size()
        .unwrap_or(0)
}

/// The linear size in bytes of one subresource with dimensions in blocks.
///
/// Returns 0 if the size does not fit in a `usize`.
/**
```rust
use blocklinear::{deswizzled_mip_size, div_round_up};

// 256x256 BC7 is 64x64 blocks of 16 bytes.
assert_eq!(
    65536,
    deswizzled_mip_size(div_round_up(256, 4), div_round_up(256, 4), 1, 16)
);
```
 */
pub fn deswizzled_mip_size(width: u32, height: u32, depth: u32, bytes_per_pixel: u32) -> usize {
    MipLevelLayout::new(width, height, depth, BlockHeight::One, bytes_per_pixel)
        .checked_linear_size()
        .unwrap_or(0)
}

/// Tiles or untiles a single subresource.
///
/// The caller is responsible for making sure `source` and `destination`
/// have at least the linear or tiled sizes from `layout`.
pub(crate) fn swizzle_inner<const DESWIZZLE: bool>(
    layout: &MipLevelLayout,
    source: &[u8],
    destination: &mut [u8],
) {
    let width_in_bytes = layout.row_pitch();
    let height = layout.height as usize;
    let depth = layout.depth as usize;

    let block_height = layout.block_height as usize;
    let block_depth = layout.block_depth as usize;
    let block_size_in_bytes = layout.block_size_in_bytes();
    let block_height_in_bytes = layout.block_height.height_in_bytes();
    let block_row_size = layout.block_row_size();
    let block_slice_size = layout.block_slice_size();

    let linear_slice_size = layout.slice_size();

    // Walk the linear data one 64x8 byte GOB at a time.
    // Interior GOBs are copied with whole 16 byte spans.
    // GOBs cut off by the right or bottom edge fall back to one byte at a time.
    for z0 in 0..depth {
        let offset_z = gob_address_z(z0, block_height, block_depth, block_slice_size);

        for y0 in (0..height).step_by(GOB_HEIGHT_IN_BYTES) {
            let offset_y = gob_address_y(y0, block_height_in_bytes, block_row_size);

            // x0 is in bytes, not blocks.
            for x0 in (0..width_in_bytes).step_by(GOB_WIDTH_IN_BYTES) {
                let offset_x = gob_address_x(x0, block_size_in_bytes);

                let gob_address = offset_z + offset_y + offset_x;
                let linear_offset = z0 * linear_slice_size + y0 * width_in_bytes + x0;

                if x0 + GOB_WIDTH_IN_BYTES <= width_in_bytes && y0 + GOB_HEIGHT_IN_BYTES <= height {
                    if DESWIZZLE {
                        deswizzle_complete_gob(
                            &mut destination[linear_offset..],
                            &source[gob_address..gob_address + GOB_SIZE_IN_BYTES],
                            width_in_bytes,
                        );
                    } else {
                        swizzle_complete_gob(
                            &mut destination[gob_address..gob_address + GOB_SIZE_IN_BYTES],
                            &source[linear_offset..],
                            width_in_bytes,
                        );
                    }
                } else {
                    swizzle_deswizzle_gob::<DESWIZZLE>(
                        destination,
                        source,
                        GOB_WIDTH_IN_BYTES.min(width_in_bytes - x0),
                        GOB_HEIGHT_IN_BYTES.min(height - y0),
                        width_in_bytes,
                        linear_offset,
                        gob_address,
                    );
                }
            }
        }
    }
}

fn swizzle_deswizzle_gob<const DESWIZZLE: bool>(
    destination: &mut [u8],
    source: &[u8],
    gob_width: usize,
    gob_height: usize,
    width_in_bytes: usize,
    linear_offset: usize,
    gob_address: usize,
) {
    for y in 0..gob_height {
        let linear_row = linear_offset + y * width_in_bytes;
        for x in 0..gob_width {
            let swizzled_offset = gob_address + gob_offset(x, y);

            if DESWIZZLE {
                destination[linear_row + x] = source[swizzled_offset];
            } else {
                destination[swizzled_offset] = source[linear_row + x];
            }
        }
    }
}

// Yuzu: https://github.com/yuzu-emu/yuzu/blob/c5ca8675c84ca73375cf3fe2ade257c8aa5c1239/src/video_core/textures/decoders.cpp#L46-L47
// Ryujinx: https://github.com/Ryujinx/Ryujinx/blob/1485780d90a554a9a71585ff1dd6e049b32b761e/Ryujinx.Graphics.Texture/BlockLinearLayout.cs#L146-L154
fn gob_address_z(z: usize, block_height: usize, block_depth: usize, block_slice_size: usize) -> usize {
    // Slices within a block are block_height GOBs apart.
    (z / block_depth * block_slice_size) + ((z % block_depth) * GOB_SIZE_IN_BYTES * block_height)
}

fn gob_address_y(y: usize, block_height_in_bytes: usize, block_row_size: usize) -> usize {
    let block_y = y / block_height_in_bytes;
    let block_inner_row = y % block_height_in_bytes / GOB_HEIGHT_IN_BYTES;
    block_y * block_row_size + block_inner_row * GOB_SIZE_IN_BYTES
}

// Blocks are one GOB wide, so each GOB column starts a new block.
fn gob_address_x(x: usize, block_size_in_bytes: usize) -> usize {
    let block_x = x / GOB_WIDTH_IN_BYTES;
    block_x * block_size_in_bytes
}

// Byte offset of (x, y) within a GOB from the GOB addressing in the Tegra X1 TRM.
fn gob_offset(x: usize, y: usize) -> usize {
    ((x % 64) / 32) * 256 + ((y % 8) / 2) * 64 + ((x % 32) / 16) * 32 + (y % 2) * 16 + (x % 16)
}

// gob_offset(0, y) for each row.
const GOB_ROW_OFFSETS: [usize; GOB_HEIGHT_IN_BYTES] = [0, 16, 64, 80, 128, 144, 192, 208];

// Each linear row of a GOB is four 16 byte spans at fixed offsets in the tiled GOB.
// Only the linear side needs the row pitch.
fn deswizzle_complete_gob(dst: &mut [u8], src: &[u8], row_size_in_bytes: usize) {
    for (i, offset) in GOB_ROW_OFFSETS.iter().enumerate() {
        deswizzle_gob_row(dst, row_size_in_bytes * i, src, *offset);
    }
}

fn deswizzle_gob_row(dst: &mut [u8], dst_offset: usize, src: &[u8], src_offset: usize) {
    let dst = &mut dst[dst_offset..dst_offset + GOB_WIDTH_IN_BYTES];
    let src = &src[src_offset..];
    // Highest offsets first so later slices skip their bounds checks.
    dst[48..64].copy_from_slice(&src[288..304]);
    dst[32..48].copy_from_slice(&src[256..272]);
    dst[16..32].copy_from_slice(&src[32..48]);
    dst[0..16].copy_from_slice(&src[0..16]);
}

// Same as above with source and destination swapped.
fn swizzle_complete_gob(dst: &mut [u8], src: &[u8], row_size_in_bytes: usize) {
    for (i, offset) in GOB_ROW_OFFSETS.iter().enumerate() {
        swizzle_gob_row(dst, *offset, src, row_size_in_bytes * i);
    }
}

fn swizzle_gob_row(dst: &mut [u8], dst_offset: usize, src: &[u8], src_offset: usize) {
    let dst = &mut dst[dst_offset..];
    let src = &src[src_offset..src_offset + GOB_WIDTH_IN_BYTES];
    dst[288..304].copy_from_slice(&src[48..64]);
    dst[256..272].copy_from_slice(&src[32..48]);
    dst[32..48].copy_from_slice(&src[16..32]);
    dst[0..16].copy_from_slice(&src[0..16]);
}
