use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use underwater_cc_rs::correction_pipeline::{
    CorrectionConfig, PhotoCorrectionPipeline, TiffCompression, TweakParameters,
};
use underwater_cc_rs::logger;

#[derive(Parser)]
#[command(name = "underwater-cc")]
#[command(about = "Remove the blue/green cast from underwater photos")]
struct Cli {
    /// Input TIFF image
    input: PathBuf,

    /// Output TIFF image
    output: PathBuf,

    /// Strength of the estimated correction (0 = none, 1 = full)
    #[arg(long, default_value_t = 1.0)]
    gain: f32,

    /// Negative removes blue, positive removes green
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    green_blue: f32,

    /// Negative removes red, positive adds red
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    red: f32,

    /// Largest tile edge rendered at once during export
    #[arg(long, default_value_t = 2048)]
    tile_size: usize,

    /// Output compression: none, lzw, deflate-fast, deflate, deflate-best
    #[arg(long, default_value = "none")]
    compression: TiffCompression,

    /// Print the base and effective color matrices
    #[arg(long)]
    print_matrix: bool,
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let cli = Cli::parse();

    let config = CorrectionConfig::builder()
        .tile_size(cli.tile_size)
        .compression(cli.compression)
        .predictor(match cli.compression {
            TiffCompression::None => None,
            _ => Some(2),
        })
        .build();
    let pipeline = PhotoCorrectionPipeline::new(config);
    let tweak = TweakParameters::new(cli.gain, cli.green_blue, cli.red);

    info!("Tile size: {}", pipeline.config().tile_size);
    info!("Compression: {:?}", pipeline.config().compression);

    let summary = match pipeline.convert_file(&cli.input, &cli.output, tweak) {
        Ok(summary) => summary,
        Err(e) => {
            error!("Correction failed: {}", e);
            return Err(e).with_context(|| format!("correcting {}", cli.input.display()));
        }
    };

    info!(
        "Wrote {}x{} image to {}",
        summary.width,
        summary.height,
        cli.output.display()
    );

    if cli.print_matrix {
        println!("base:      {:?}", summary.base_matrix.coefficients());
        println!("effective: {:?}", summary.effective_matrix.coefficients());
    }

    Ok(())
}
