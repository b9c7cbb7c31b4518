//! Documentation for the C API.
//!
//! For easier integration, none of the FFI methods allocate memory.
//! When tiling or untiling, make sure to allocate
//! the appropriate amount of memory for the destination array
//! by calling functions like [swizzled_surface_size] or [deswizzled_surface_size].
//!
//! For block height parameters, always use the result of [block_height_mip0]
//! or [mip_block_height] unless the format explicitly specifies a block height.
//!
//! Functions that transform data return a status code instead of panicking.
//! Size functions return 0 if the parameters are invalid.
use core::slice;

use crate::{
    surface::SurfaceDescriptor,
    swizzle::{deswizzle_block_linear_into, swizzle_block_linear_into},
    BlockHeight, SwizzleError,
};

/// The operation completed successfully.
pub const STATUS_OK: i32 = 0;
/// A pointer was null or a parameter was invalid. See [crate::ArgumentError].
pub const STATUS_INVALID_ARGUMENT: i32 = 1;
/// A buffer was too small. See [crate::SwizzleError::SizeMismatch].
pub const STATUS_SIZE_MISMATCH: i32 = 2;

/// The dimensions of a compressed block in pixels.
/// Uncompressed formats use 1x1x1 and BCN formats use 4x4x1.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDim {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl TryFrom<BlockDim> for crate::surface::BlockDim {
    type Error = SwizzleError;

    fn try_from(value: BlockDim) -> Result<Self, Self::Error> {
        Self::new(value.width, value.height, value.depth)
    }
}

fn status(result: Result<(), SwizzleError>) -> i32 {
    match result {
        Ok(()) => STATUS_OK,
        Err(SwizzleError::InvalidArgument(_)) => STATUS_INVALID_ARGUMENT,
        Err(SwizzleError::SizeMismatch { .. }) => STATUS_SIZE_MISMATCH,
    }
}

// Zero length buffers may use a null pointer.
unsafe fn source_slice<'a>(ptr: *const u8, len: usize) -> Result<&'a [u8], SwizzleError> {
    if len == 0 {
        Ok(&[])
    } else if ptr.is_null() {
        Err(crate::ArgumentError::NullPointer.into())
    } else {
        Ok(slice::from_raw_parts(ptr, len))
    }
}

unsafe fn destination_slice<'a>(ptr: *mut u8, len: usize) -> Result<&'a mut [u8], SwizzleError> {
    if len == 0 {
        Ok(&mut [])
    } else if ptr.is_null() {
        Err(crate::ArgumentError::NullPointer.into())
    } else {
        Ok(slice::from_raw_parts_mut(ptr, len))
    }
}

#[allow(clippy::too_many_arguments)]
fn descriptor(
    width: u32,
    height: u32,
    depth: u32,
    block_dim: BlockDim,
    block_height_mip0: u32,
    bytes_per_pixel: u32,
    mipmap_count: u32,
    layer_count: u32,
) -> Result<SurfaceDescriptor, SwizzleError> {
    let descriptor = SurfaceDescriptor {
        width,
        height,
        depth,
        block_dim: block_dim.try_into()?,
        block_height_mip0: Some(BlockHeight::try_new(block_height_mip0)?),
        bytes_per_pixel,
        mipmap_count,
        layer_count,
    };
    descriptor.validate()?;
    Ok(descriptor)
}

/// See [crate::surface::swizzle_surface_into].
///
/// # Safety
/// `source` and `source_len` should refer to an array with at least as many bytes as the result of [deswizzled_surface_size].
/// Similarly, `destination` and `destination_len` should refer to an array with at least as many bytes as the result of [swizzled_surface_size].
///
/// Returns [STATUS_INVALID_ARGUMENT] if a pointer is null, a field of `block_dim` is zero,
/// or `block_height_mip0` is not one of the supported values in [BlockHeight].
#[no_mangle]
pub unsafe extern "C" fn swizzle_surface(
    width: u32,
    height: u32,
    depth: u32,
    source: *const u8,
    source_len: usize,
    destination: *mut u8,
    destination_len: usize,
    block_dim: BlockDim,
    block_height_mip0: u32,
    bytes_per_pixel: u32,
    mipmap_count: u32,
    layer_count: u32,
) -> i32 {
    status((|| {
        let descriptor = descriptor(
            width,
            height,
            depth,
            block_dim,
            block_height_mip0,
            bytes_per_pixel,
            mipmap_count,
            layer_count,
        )?;
        let source = source_slice(source, source_len)?;
        let destination = destination_slice(destination, destination_len)?;
        crate::surface::swizzle_surface_into(&descriptor, source, destination)
    })())
}

/// See [crate::surface::deswizzle_surface_into].
///
/// # Safety
/// `source` and `source_len` should refer to an array with at least as many bytes as the result of [swizzled_surface_size].
/// Similarly, `destination` and `destination_len` should refer to an array with at least as many bytes as the result of [deswizzled_surface_size].
///
/// Returns [STATUS_INVALID_ARGUMENT] if a pointer is null, a field of `block_dim` is zero,
/// or `block_height_mip0` is not one of the supported values in [BlockHeight].
#[no_mangle]
pub unsafe extern "C" fn deswizzle_surface(
    width: u32,
    height: u32,
    depth: u32,
    source: *const u8,
    source_len: usize,
    destination: *mut u8,
    destination_len: usize,
    block_dim: BlockDim,
    block_height_mip0: u32,
    bytes_per_pixel: u32,
    mipmap_count: u32,
    layer_count: u32,
) -> i32 {
    status((|| {
        let descriptor = descriptor(
            width,
            height,
            depth,
            block_dim,
            block_height_mip0,
            bytes_per_pixel,
            mipmap_count,
            layer_count,
        )?;
        let source = source_slice(source, source_len)?;
        let destination = destination_slice(destination, destination_len)?;
        crate::surface::deswizzle_surface_into(&descriptor, source, destination)
    })())
}

/// See [crate::surface::swizzled_surface_size].
///
/// Returns 0 if the surface is invalid or `block_height_mip0` is not one of the supported values in [BlockHeight].
#[no_mangle]
pub extern "C" fn swizzled_surface_size(
    width: u32,
    height: u32,
    depth: u32,
    block_dim: BlockDim,
    block_height_mip0: u32,
    bytes_per_pixel: u32,
    mipmap_count: u32,
    layer_count: u32,
) -> usize {
    descriptor(
        width,
        height,
        depth,
        block_dim,
        block_height_mip0,
        bytes_per_pixel,
        mipmap_count,
        layer_count,
    )
    .map(|d| d.swizzled_size())
    .unwrap_or(0)
}

/// See [crate::surface::deswizzled_surface_size].
///
/// Returns 0 if the surface is invalid.
#[no_mangle]
pub extern "C" fn deswizzled_surface_size(
    width: u32,
    height: u32,
    depth: u32,
    block_dim: BlockDim,
    bytes_per_pixel: u32,
    mipmap_count: u32,
    layer_count: u32,
) -> usize {
    // The block height does not affect the linear size.
    descriptor(
        width,
        height,
        depth,
        block_dim,
        1,
        bytes_per_pixel,
        mipmap_count,
        layer_count,
    )
    .map(|d| d.deswizzled_size())
    .unwrap_or(0)
}

/// See [crate::swizzle::swizzle_block_linear_into].
///
/// # Safety
/// `source` and `source_len` should refer to an array with at least as many bytes as the result of [deswizzled_mip_size].
/// Similarly, `destination` and `destination_len` should refer to an array with at least as many bytes as the result of [swizzled_mip_size].
///
/// Returns [STATUS_INVALID_ARGUMENT] if a pointer is null, `block_height` is not supported,
/// or the sizes for the dimensions overflow.
#[no_mangle]
pub unsafe extern "C" fn swizzle_block_linear(
    width: u32,
    height: u32,
    depth: u32,
    source: *const u8,
    source_len: usize,
    destination: *mut u8,
    destination_len: usize,
    block_height: u32,
    bytes_per_pixel: u32,
) -> i32 {
    status((|| {
        let block_height = BlockHeight::try_new(block_height)?;
        let source = source_slice(source, source_len)?;
        let destination = destination_slice(destination, destination_len)?;
        swizzle_block_linear_into(
            width,
            height,
            depth,
            source,
            destination,
            block_height,
            bytes_per_pixel,
        )
    })())
}

/// See [crate::swizzle::deswizzle_block_linear_into].
///
/// # Safety
/// `source` and `source_len` should refer to an array with at least as many bytes as the result of [swizzled_mip_size].
/// Similarly, `destination` and `destination_len` should refer to an array with at least as many bytes as the result of [deswizzled_mip_size].
///
/// See [swizzle_block_linear] for the possible status codes.
#[no_mangle]
pub unsafe extern "C" fn deswizzle_block_linear(
    width: u32,
    height: u32,
    depth: u32,
    source: *const u8,
    source_len: usize,
    destination: *mut u8,
    destination_len: usize,
    block_height: u32,
    bytes_per_pixel: u32,
) -> i32 {
    status((|| {
        let block_height = BlockHeight::try_new(block_height)?;
        let source = source_slice(source, source_len)?;
        let destination = destination_slice(destination, destination_len)?;
        deswizzle_block_linear_into(
            width,
            height,
            depth,
            source,
            destination,
            block_height,
            bytes_per_pixel,
        )
    })())
}

/// See [crate::swizzle::swizzled_mip_size].
///
/// Returns 0 if `block_height` is not one of the supported values in [BlockHeight]
/// or the size overflows.
#[no_mangle]
pub extern "C" fn swizzled_mip_size(
    width: u32,
    height: u32,
    depth: u32,
    block_height: u32,
    bytes_per_pixel: u32,
) -> usize {
    BlockHeight::new(block_height)
        .map(|block_height| {
            crate::swizzle::swizzled_mip_size(width, height, depth, block_height, bytes_per_pixel)
        })
        .unwrap_or(0)
}

/// See [crate::swizzle::deswizzled_mip_size].
///
/// Returns 0 if the size overflows.
#[no_mangle]
pub extern "C" fn deswizzled_mip_size(
    width: u32,
    height: u32,
    depth: u32,
    bytes_per_pixel: u32,
) -> usize {
    crate::swizzle::deswizzled_mip_size(width, height, depth, bytes_per_pixel)
}

/// See [crate::block_height_mip0].
#[no_mangle]
pub extern "C" fn block_height_mip0(height: u32) -> u32 {
    crate::block_height_mip0(height) as u32
}

/// See [crate::mip_block_height].
///
/// Returns 0 if `block_height_mip0` is not one of the supported values in [BlockHeight].
#[no_mangle]
pub extern "C" fn mip_block_height(mip_height: u32, block_height_mip0: u32) -> u32 {
    BlockHeight::new(block_height_mip0)
        .map(|block_height_mip0| crate::mip_block_height(mip_height, block_height_mip0) as u32)
        .unwrap_or(0)
}
