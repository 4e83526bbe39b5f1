use anyhow::{Context, Result};
use clap::Parser;
use std::{env, path::PathBuf};
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, prelude::*, EnvFilter};
use waymo2tfod::{process_tfr, Config, DecodeErrorPolicy};
use waymo_frame::CameraName;

#[derive(Debug, Clone, Parser)]
#[clap(version)]
/// Convert a Waymo Open Dataset record file for the TensorFlow Object Detection API
struct Args {
    /// Waymo Open Dataset tf record
    #[clap(short, long)]
    pub path: PathBuf,
    /// configuration file in JSON5
    #[clap(long)]
    pub config_file: Option<PathBuf>,
    /// output directory, "output" if not set
    #[clap(short, long)]
    pub output_dir: Option<PathBuf>,
    /// camera to convert: front, front-left, front-right, side-left or side-right
    #[clap(long)]
    pub camera_view: Option<CameraName>,
    /// clamp normalized box coordinates into [0, 1]
    #[clap(long)]
    pub clamp_boxes: bool,
    /// skip frames that fail to decode instead of stopping
    #[clap(long)]
    pub skip_corrupted: bool,
}

fn main() -> Result<()> {
    // setup tracing
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true).compact();
    let filter_layer = {
        let filter = EnvFilter::from_default_env();
        if env::var("RUST_LOG").is_err() {
            filter.add_directive(LevelFilter::INFO.into())
        } else {
            filter
        }
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    // parse arguments
    let Args {
        path,
        config_file,
        output_dir,
        camera_view,
        clamp_boxes,
        skip_corrupted,
    } = Args::parse();

    let mut config = match &config_file {
        Some(config_file) => Config::open(config_file).with_context(|| {
            format!("failed to load config file '{}'", config_file.display())
        })?,
        None => Config::default(),
    };

    // command line options take precedence
    if let Some(output_dir) = output_dir {
        config.output_dir = output_dir;
    }
    if let Some(camera_view) = camera_view {
        config.camera_view = camera_view;
    }
    if clamp_boxes {
        config.clamp_boxes = true;
    }
    if skip_corrupted {
        config.on_decode_error = DecodeErrorPolicy::Skip;
    }

    let summary = process_tfr(&path, &config)?;
    info!(
        "converted {} of {} frames into {}",
        summary.num_records,
        summary.num_frames,
        summary.output_path.display()
    );

    Ok(())
}
