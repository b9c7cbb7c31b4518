#![no_main]
use libfuzzer_sys::fuzz_target;

extern crate arbitrary;
use arbitrary::{Arbitrary, Result, Unstructured};

use blocklinear::surface::BlockDim;

#[derive(Debug)]
struct Input {
    width: u32,
    height: u32,
    depth: u32,
    block_width: u32,
    block_height: u32,
    block_height_mip0: Option<blocklinear::BlockHeight>,
    bytes_per_pixel: u32,
    input_size: usize,
    layer_count: u32,
    mipmap_count: u32,
}

impl<'a> Arbitrary<'a> for Input {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        Ok(Input {
            width: u.arbitrary()?,
            height: u.arbitrary()?,
            depth: u.arbitrary()?,
            block_width: u.int_in_range(0..=16)?,
            block_height: u.int_in_range(0..=16)?,
            block_height_mip0: u.arbitrary()?,
            bytes_per_pixel: u.int_in_range(0..=32)?,
            input_size: u.int_in_range(0..=16777216)?,
            layer_count: u.int_in_range(0..=12)?,
            mipmap_count: u.int_in_range(0..=40)?,
        })
    }
}

fuzz_target!(|input: Input| {
    let Ok(block_dim) = BlockDim::new(input.block_width, input.block_height, 1) else {
        return;
    };
    let source = vec![0u8; input.input_size];

    // This should never panic even if the input size is incorrect.
    let _ = blocklinear::surface::swizzle_surface(
        input.width,
        input.height,
        input.depth,
        &source,
        block_dim,
        input.block_height_mip0,
        input.bytes_per_pixel,
        input.mipmap_count,
        input.layer_count,
    );
});
