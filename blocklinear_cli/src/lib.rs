use std::{fmt, path::Path};

use anyhow::{bail, Context};
use blocklinear::{
    surface::{deswizzle_surface_into, swizzle_surface_into, BlockDim, SurfaceDescriptor},
    BlockHeight,
};
use formats::ImageFormat;
use tracing::info;

pub mod formats;

/// Surface geometry shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
pub struct SurfaceArgs {
    /// Width in pixels
    #[arg(long)]
    pub width: u32,

    /// Height in pixels
    #[arg(long)]
    pub height: u32,

    /// Depth in pixels for 3D textures
    #[arg(long, default_value_t = 1)]
    pub depth: u32,

    /// Known format used for the bytes per pixel and block dimensions
    #[arg(long, value_enum, conflicts_with = "bytes_per_pixel")]
    pub format: Option<ImageFormat>,

    /// Bytes per pixel or bytes per block for compressed formats
    #[arg(long)]
    pub bytes_per_pixel: Option<u32>,

    /// Block width in pixels when not using --format
    #[arg(long, default_value_t = 1, conflicts_with = "format")]
    pub block_width: u32,

    /// Block height in pixels when not using --format
    #[arg(long, default_value_t = 1, conflicts_with = "format")]
    pub block_height_texels: u32,

    /// Block height of the base mipmap in GOBs (1, 2, 4, 8, 16, or 32). Inferred if not set
    #[arg(long)]
    pub block_height: Option<u32>,

    /// Number of mipmaps for each array layer
    #[arg(long, default_value_t = 1)]
    pub mipmaps: u32,

    /// Number of array layers like 6 for cube maps
    #[arg(long, default_value_t = 1)]
    pub layers: u32,
}

impl SurfaceArgs {
    pub fn descriptor(&self) -> anyhow::Result<SurfaceDescriptor> {
        let (block_dim, bytes_per_pixel) = match (self.format, self.bytes_per_pixel) {
            (Some(format), _) => (format.block_dim(), format.bytes_per_pixel()),
            (None, Some(bytes_per_pixel)) => (
                BlockDim::new(self.block_width, self.block_height_texels, 1)?,
                bytes_per_pixel,
            ),
            (None, None) => bail!("either --format or --bytes-per-pixel is required"),
        };

        let block_height_mip0 = self
            .block_height
            .map(BlockHeight::try_new)
            .transpose()?;

        let descriptor = SurfaceDescriptor {
            width: self.width,
            height: self.height,
            depth: self.depth,
            block_dim,
            block_height_mip0,
            bytes_per_pixel,
            mipmap_count: self.mipmaps,
            layer_count: self.layers,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }
}

/// Tiles the linear data in `input` and writes the result to `output`.
///
/// With `unaligned`, the padding after the final array layer is omitted
/// to match formats that store exactly [SurfaceDescriptor::swizzled_data_size] bytes.
pub fn swizzle_file(
    input: &Path,
    output: &Path,
    descriptor: &SurfaceDescriptor,
    unaligned: bool,
) -> anyhow::Result<()> {
    let source =
        std::fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;

    let mut tiled = vec![0u8; descriptor.swizzled_size()];
    swizzle_surface_into(descriptor, &source, &mut tiled)
        .with_context(|| format!("failed to swizzle {}", input.display()))?;

    if unaligned {
        tiled.truncate(descriptor.swizzled_data_size());
    }
    info!(input = %input.display(), output = %output.display(), size = tiled.len(), "swizzled");

    std::fs::write(output, &tiled)
        .with_context(|| format!("failed to write {}", output.display()))
}

/// Untiles the tiled data in `input` and writes the result to `output`.
pub fn deswizzle_file(
    input: &Path,
    output: &Path,
    descriptor: &SurfaceDescriptor,
) -> anyhow::Result<()> {
    let source =
        std::fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;

    let mut linear = vec![0u8; descriptor.deswizzled_size()];
    deswizzle_surface_into(descriptor, &source, &mut linear)
        .with_context(|| format!("failed to deswizzle {}", input.display()))?;

    let unused = unused_input_bytes(descriptor, source.len());
    if unused > 0 {
        info!(unused, "input has trailing bytes");
    }
    info!(input = %input.display(), output = %output.display(), size = linear.len(), "deswizzled");

    std::fs::write(output, &linear)
        .with_context(|| format!("failed to write {}", output.display()))
}

/// The number of bytes at the end of a tiled input that untiling never reads.
///
/// This includes the alignment after the final layer,
/// since only [SurfaceDescriptor::swizzled_data_size] bytes are read.
pub fn unused_input_bytes(descriptor: &SurfaceDescriptor, input_len: usize) -> usize {
    input_len.saturating_sub(descriptor.swizzled_data_size())
}

/// The calculated sizes for a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeReport {
    pub block_height_mip0: BlockHeight,
    pub layer_alignment: usize,
    pub deswizzled_size: usize,
    pub swizzled_size: usize,
    pub swizzled_data_size: usize,
    pub mipmaps: Vec<MipSizes>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MipSizes {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub block_height: BlockHeight,
    pub deswizzled_size: usize,
    pub swizzled_size: usize,
}

impl SizeReport {
    pub fn new(descriptor: &SurfaceDescriptor) -> Self {
        Self {
            block_height_mip0: descriptor.mip0_block_height(),
            layer_alignment: descriptor.layer_alignment(),
            deswizzled_size: descriptor.deswizzled_size(),
            swizzled_size: descriptor.swizzled_size(),
            swizzled_data_size: descriptor.swizzled_data_size(),
            mipmaps: (0..descriptor.mipmap_count)
                .map(|mip| {
                    let layout = descriptor.mip_layout(mip);
                    MipSizes {
                        width: layout.width,
                        height: layout.height,
                        depth: layout.depth,
                        block_height: layout.block_height,
                        deswizzled_size: layout.linear_size(),
                        swizzled_size: layout.swizzled_size(),
                    }
                })
                .collect(),
        }
    }
}

impl fmt::Display for SizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "block height mip0: {}", self.block_height_mip0 as u32)?;
        writeln!(f, "layer alignment: {}", self.layer_alignment)?;
        writeln!(f, "deswizzled size: {}", self.deswizzled_size)?;
        writeln!(f, "swizzled size: {}", self.swizzled_size)?;
        writeln!(f, "swizzled data size: {}", self.swizzled_data_size)?;
        for (i, mip) in self.mipmaps.iter().enumerate() {
            writeln!(
                f,
                "mip {i}: {}x{}x{} blocks, block height {}, deswizzled {}, swizzled {}",
                mip.width,
                mip.height,
                mip.depth,
                mip.block_height as u32,
                mip.deswizzled_size,
                mip.swizzled_size
            )?;
        }
        Ok(())
    }
}
