use clap::Parser;
use std::path::PathBuf;

use smartcrop::ResampleMethod;

#[derive(Parser)]
#[command(name = "smartcrop", version, about = "Content-aware image cropping")]
pub struct CliArgs {
    /// Input image (single file mode)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Input directory containing images (batch mode)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Write the cropped image here (single file mode); without it only the
    /// crop rectangle is printed
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output directory for batch cropping (batch mode)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Target width in pixels (0 = follow the image)
    #[arg(long, default_value_t = 0)]
    pub width: u32,

    /// Target height in pixels (0 = follow the image)
    #[arg(long, default_value_t = 0)]
    pub height: u32,

    /// Resampling filter used for pre-scaling and --resize
    #[arg(long, value_enum)]
    pub resample: Option<ResampleMethod>,

    /// Resize the cropped image to the target size
    #[arg(long, default_value_t = false)]
    pub resize: bool,

    /// JSON file with crop settings; flags given on the command line win
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write intermediate analysis images to this directory
    #[arg(long)]
    pub debug_dir: Option<PathBuf>,

    /// Analyse the image at full resolution
    #[arg(long, default_value_t = false)]
    pub no_prescale: bool,

    /// Run feature passes and scoring on the current thread only
    #[arg(long, default_value_t = false)]
    pub sequential: bool,

    /// Print the full analysis as JSON instead of the bare rectangle
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Enable logging (honours RUST_LOG, defaults to debug)
    #[arg(long, default_value_t = false)]
    pub log: bool,

    /// Batch mode: continue with other files when one fails
    #[arg(long, default_value_t = false)]
    pub batch: bool,
}
