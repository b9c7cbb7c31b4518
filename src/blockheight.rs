use crate::{div_round_up, BlockHeight, GOB_HEIGHT_IN_BYTES};

/// Calculates the block height parameter to use for the first mip level if no block height is specified.
///
/// The result is the largest supported block height that does not exceed
/// the number of GOB rows needed for `height`.
///
/// # Examples
/// Uncompressed formats like R8G8B8A8 can use the height in pixels.
/**
```rust
use blocklinear::{block_height_mip0, BlockHeight};

assert_eq!(BlockHeight::Sixteen, block_height_mip0(128));
assert_eq!(BlockHeight::One, block_height_mip0(8));
```
 */
/// For compressed formats with multiple pixels in a block, divide the height by the block dimensions.
/**
```rust
// BC7 has 4x4 pixel blocks that each take up 16 bytes.
use blocklinear::{block_height_mip0, div_round_up, BlockHeight};

let height = 300;
assert_eq!(BlockHeight::Eight, block_height_mip0(div_round_up(height, 4)));
```
 */
pub fn block_height_mip0(height: u32) -> BlockHeight {
    let height_in_gobs = div_round_up(height, GOB_HEIGHT_IN_BYTES as u32);

    match height_in_gobs {
        0..=1 => BlockHeight::One,
        2..=3 => BlockHeight::Two,
        4..=7 => BlockHeight::Four,
        8..=15 => BlockHeight::Eight,
        16..=31 => BlockHeight::Sixteen,
        _ => BlockHeight::ThirtyTwo,
    }
}

/// Calculates the block height parameter for the given mip level.
///
/// Smaller mipmaps never use a taller block than the base level,
/// so the result is at most `block_height_mip0`.
///
/// # Examples
/// For texture formats that don't specify the block height for the base mip level,
/// use [block_height_mip0] to calculate the initial block height.
///
/// Uncompressed formats like R8G8B8A8 can use the width and height in pixels.
/// For compressed formats with multiple pixels in a block, divide the width and height by the block dimensions.
/**
```rust
use blocklinear::{block_height_mip0, div_round_up, mip_block_height};

// BC7 has 4x4 pixel blocks that each take up 16 bytes.
let height = 300;
let mipmap_count = 5;

let block_height_mip0 = block_height_mip0(div_round_up(height, 4));
for mip in 0..mipmap_count {
    let mip_height = std::cmp::max(div_round_up(height >> mip, 4), 1);

    // The block height will likely change for each mip level.
    let mip_block_height = mip_block_height(mip_height, block_height_mip0);
    assert!(mip_block_height <= block_height_mip0);
}
```
 */
pub fn mip_block_height(mip_height: u32, block_height_mip0: BlockHeight) -> BlockHeight {
    core::cmp::min(self::block_height_mip0(mip_height), block_height_mip0)
}
