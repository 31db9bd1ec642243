use std::{fs::OpenOptions, path::PathBuf};

use clap::Parser;
use eyre::{Result, WrapErr};
use image::{
    codecs::gif::{GifEncoder, Repeat},
    Delay, Frame, RgbaImage,
};
use rayon::prelude::*;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Renders an ILDA laser show file into an animated GIF.
#[derive(Parser)]
#[command(name = "ilda2gif", version)]
struct Args {
    /// ILDA file to render
    input: PathBuf,

    /// Output path, defaults to the input path with ".gif" appended
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 512)]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 512)]
    height: u32,

    /// Delay between frames in milliseconds
    #[arg(long, default_value_t = 40)]
    delay: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let frames = ilda::decode_file(&args.input)
        .wrap_err_with(|| format!("cannot decode {}", args.input.display()))?;
    info!("decoded {} frames from {}", frames.len(), args.input.display());

    let rendered = rasterize_frames(&frames, args.width, args.height);

    let output = args.output.unwrap_or_else(|| {
        let mut path = args.input.clone().into_os_string();
        path.push(".gif");
        PathBuf::from(path)
    });
    let out = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&output)
        .wrap_err_with(|| format!("cannot create {}", output.display()))?;

    let mut encoder = GifEncoder::new(out);
    encoder.set_repeat(Repeat::Infinite)?;
    let delay = Delay::from_numer_denom_ms(args.delay, 1);
    for image in rendered {
        encoder.encode_frame(Frame::from_parts(image, 0, 0, delay))?;
    }

    info!("wrote {}", output.display());

    Ok(())
}

/// Rasterizes every frame on the rayon pool. Frames are immutable and
/// each call gets its own canvas, so they render concurrently; the
/// indexed collect keeps the output in frame order no matter which
/// worker finishes first.
fn rasterize_frames(frames: &[ilda::Frame], width: u32, height: u32) -> Vec<RgbaImage> {
    frames
        .par_iter()
        .map(|frame| frame.to_rgba8(width, height))
        .collect()
}
