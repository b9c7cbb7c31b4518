use std::path::PathBuf;

use blocklinear_cli::{deswizzle_file, swizzle_file, SizeReport, SurfaceArgs};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "blocklinear",
    version,
    about = "Tile and untile raw texture surfaces using the Tegra X1 block linear layout."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tile linear data with all layers and mipmaps
    Swizzle {
        /// Linear input file
        input: PathBuf,
        /// Tiled output file
        output: PathBuf,
        /// Omit the alignment padding after the final array layer
        #[arg(long)]
        unaligned: bool,
        #[command(flatten)]
        surface: SurfaceArgs,
    },
    /// Untile tiled data with all layers and mipmaps
    Deswizzle {
        /// Tiled input file
        input: PathBuf,
        /// Linear output file
        output: PathBuf,
        #[command(flatten)]
        surface: SurfaceArgs,
    },
    /// Print the block height and sizes for a surface
    Size {
        #[command(flatten)]
        surface: SurfaceArgs,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Swizzle {
            input,
            output,
            unaligned,
            surface,
        } => swizzle_file(&input, &output, &surface.descriptor()?, unaligned),
        Command::Deswizzle {
            input,
            output,
            surface,
        } => deswizzle_file(&input, &output, &surface.descriptor()?),
        Command::Size { surface } => {
            print!("{}", SizeReport::new(&surface.descriptor()?));
            Ok(())
        }
    }
}
