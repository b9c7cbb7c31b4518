#![no_main]
use libfuzzer_sys::fuzz_target;

extern crate arbitrary;
use arbitrary::{Arbitrary, Result, Unstructured};

extern crate rand;
use rand::{rngs::StdRng, Rng, SeedableRng};

use blocklinear::surface::{BlockDim, SurfaceDescriptor};

#[derive(Debug)]
struct Input {
    width: u32,
    height: u32,
    depth: u32,
    block_width: u32,
    block_height: u32,
    block_height_mip0: Option<blocklinear::BlockHeight>,
    bytes_per_pixel: u32,
    layer_count: u32,
    mipmap_count: u32,
}

impl<'a> Arbitrary<'a> for Input {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        Ok(Input {
            width: u.int_in_range(1..=256)?,
            height: u.int_in_range(1..=256)?,
            depth: u.int_in_range(1..=64)?,
            block_width: u.int_in_range(1..=8)?,
            block_height: u.int_in_range(1..=8)?,
            block_height_mip0: u.arbitrary()?,
            bytes_per_pixel: u.int_in_range(1..=32)?,
            layer_count: u.int_in_range(1..=12)?,
            mipmap_count: u.int_in_range(1..=32)?,
        })
    }
}

fuzz_target!(|input: Input| {
    let descriptor = SurfaceDescriptor {
        width: input.width,
        height: input.height,
        depth: input.depth,
        block_dim: BlockDim::new(input.block_width, input.block_height, 1).unwrap(),
        block_height_mip0: input.block_height_mip0,
        bytes_per_pixel: input.bytes_per_pixel,
        mipmap_count: input.mipmap_count,
        layer_count: input.layer_count,
    };

    let seed = [13u8; 32];
    let mut rng: StdRng = SeedableRng::from_seed(seed);
    let deswizzled: Vec<_> = (0..descriptor.deswizzled_size())
        .map(|_| rng.gen_range::<u8, _>(0..=255))
        .collect();

    let mut swizzled = vec![0u8; descriptor.swizzled_size()];
    blocklinear::surface::swizzle_surface_into(&descriptor, &deswizzled, &mut swizzled).unwrap();

    let mut new_deswizzled = vec![0u8; descriptor.deswizzled_size()];
    blocklinear::surface::deswizzle_surface_into(&descriptor, &swizzled, &mut new_deswizzled)
        .unwrap();

    if deswizzled != new_deswizzled {
        panic!("Swizzle deswizzle is not 1:1");
    }
});
