use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use smartcrop::api::{crop_directory, crop_image, resize_to_target};
use smartcrop::io::{load_image, save_image};
use smartcrop::{CropSettings, DirectorySink, SmartCropAnalyzer};

use super::args::CliArgs;
use super::errors::AppError;

fn build_settings(args: &CliArgs) -> Result<CropSettings, AppError> {
    let mut settings = match &args.config {
        Some(path) => CropSettings::from_json_file(path)?,
        None => CropSettings::default(),
    };
    if let Some(resample) = args.resample {
        settings.resample = resample;
    }
    if args.no_prescale {
        settings.params.prescale = false;
    }
    if args.sequential {
        settings.parallel = false;
    }
    if args.debug_dir.is_some() {
        settings.debug_mode = true;
    }
    settings.validate()?;
    Ok(settings)
}

fn build_analyzer(args: &CliArgs) -> Result<SmartCropAnalyzer, AppError> {
    let analyzer = SmartCropAnalyzer::with_settings(build_settings(args)?);
    Ok(match &args.debug_dir {
        Some(dir) => analyzer.with_debug_sink(DirectorySink::new(dir)),
        None => analyzer,
    })
}

fn crop_single_file(
    input: &Path,
    output: Option<&Path>,
    args: &CliArgs,
    analyzer: &SmartCropAnalyzer,
) -> Result<(), AppError> {
    let img = load_image(input)?;
    info!("Loaded {:?}: {}x{}", input, img.width(), img.height());

    let analysis = analyzer.analyze(&img, args.width, args.height)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        println!("{}", analysis.crop);
    }

    if let Some(output) = output {
        let mut out = crop_image(&img, &analysis.crop);
        if args.resize {
            out = resize_to_target(&out, args.width, args.height, analyzer.settings().resample)?;
        }
        save_image(&out, output)?;
        info!("Cropped image written: {:?}", output);
    }
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .init();
    }

    if args.width == 0 && args.height == 0 {
        return Err(AppError::ZeroSize {
            width: args.width,
            height: args.height,
        }
        .into());
    }

    let analyzer = build_analyzer(&args)?;
    let batch_mode = args.batch || args.input_dir.is_some();

    if batch_mode {
        let input_dir = args.input_dir.as_deref().ok_or(AppError::MissingArgument {
            arg: "--input-dir".to_string(),
        })?;
        let output_dir = args.output_dir.as_deref().ok_or(AppError::MissingArgument {
            arg: "--output-dir".to_string(),
        })?;

        info!("Starting batch cropping from directory: {:?}", input_dir);
        info!("Output directory: {:?}", output_dir);

        let report = crop_directory(
            input_dir,
            output_dir,
            args.width,
            args.height,
            &analyzer,
            args.resize,
            args.batch,
        )
        .map_err(AppError::from)?;

        println!(
            "processed={} skipped={} errors={}",
            report.processed, report.skipped, report.errors
        );
    } else {
        let input = args.input.as_deref().ok_or(AppError::MissingArgument {
            arg: "--input".to_string(),
        })?;
        crop_single_file(input, args.output.as_deref(), &args, &analyzer)?;
    }

    Ok(())
}
