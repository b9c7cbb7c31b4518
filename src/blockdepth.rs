// Block depth code ported from C# implementations of driver code by gdkchan.
// The code can be found here: https://github.com/KillzXGaming/Switch-Toolbox/pull/419#issuecomment-959980096
// This comes from the Ryujinx emulator: https://github.com/Ryujinx/Ryujinx/blob/master/LICENSE.txt.

/// The number of GOBs stacked along the depth axis for a block of a surface with `depth` slices.
pub fn block_depth(depth: u32) -> u32 {
    let depth_and_half = depth.saturating_add(depth / 2);
    if depth_and_half >= 16 {
        16
    } else if depth_and_half >= 8 {
        8
    } else if depth_and_half >= 4 {
        4
    } else if depth_and_half >= 2 {
        2
    } else {
        1
    }
}

/// The block depth for a mip level with `mip_depth` slices.
/// The result is at most `block_depth_mip0`.
pub fn mip_block_depth(mip_depth: u32, block_depth_mip0: u32) -> u32 {
    let mut gob_depth = block_depth_mip0;
    while mip_depth <= gob_depth / 2 && gob_depth > 1 {
        gob_depth /= 2;
    }

    gob_depth
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_depths() {
        assert_eq!(1, block_depth(1));
        assert_eq!(2, block_depth(2));
        assert_eq!(4, block_depth(3));
        assert_eq!(4, block_depth(5));
        assert_eq!(8, block_depth(8));
        assert_eq!(16, block_depth(16));
        assert_eq!(16, block_depth(33));
        assert_eq!(16, block_depth(u32::MAX));
    }

    #[test]
    fn mip_block_depths() {
        // A 33x33x33 chain halves the depth each level.
        let block_depth_mip0 = block_depth(33);
        assert_eq!(16, mip_block_depth(33, block_depth_mip0));
        assert_eq!(16, mip_block_depth(16, block_depth_mip0));
        assert_eq!(8, mip_block_depth(8, block_depth_mip0));
        assert_eq!(4, mip_block_depth(4, block_depth_mip0));
        assert_eq!(2, mip_block_depth(2, block_depth_mip0));
        assert_eq!(1, mip_block_depth(1, block_depth_mip0));
    }

    #[test]
    fn mip0_block_depth_matches_block_depth() {
        for depth in 1..=256 {
            assert_eq!(block_depth(depth), mip_block_depth(depth, block_depth(depth)));
        }
    }
}
