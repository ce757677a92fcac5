use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use siluet::{MaskImage, compare};

#[derive(Parser, Debug)]
#[command(name = "siluet", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score two mask PNGs against each other and print the verdict.
    Compare(CompareArgs),
    /// Threshold an image into a black/white silhouette mask PNG.
    Mask(MaskArgs),
}

#[derive(Parser, Debug)]
struct CompareArgs {
    /// Target mask PNG.
    #[arg(long)]
    target: PathBuf,

    /// Current mask PNG.
    #[arg(long)]
    current: PathBuf,

    /// Win threshold: the score must be strictly below it.
    #[arg(long, default_value_t = 0.002)]
    threshold: f64,

    /// Emit a JSON report instead of plain text.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct MaskArgs {
    /// Input image (any format the image crate reads).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output mask PNG.
    #[arg(long)]
    out: PathBuf,

    /// Luminance cutoff: at or above becomes white, below becomes black.
    #[arg(long, default_value_t = 128)]
    cutoff: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Compare(args) => run_compare(args),
        Command::Mask(args) => run_mask(args),
    }
}

fn load_mask(path: &PathBuf) -> anyhow::Result<MaskImage> {
    let luma = image::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?
        .to_luma8();
    let mut mask = MaskImage::new(luma.width(), luma.height())?;
    mask.pixels_mut().copy_from_slice(luma.as_raw());
    Ok(mask)
}

fn run_compare(args: CompareArgs) -> anyhow::Result<()> {
    let target = load_mask(&args.target)?;
    let current = load_mask(&args.current)?;

    let score = compare(&target, &current).context("comparison failed")?;
    let won = score.is_match(args.threshold);

    if args.json {
        let report = serde_json::json!({
            "score": score.value(),
            "threshold": args.threshold,
            "won": won,
            "width": target.width(),
            "height": target.height(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "score {:.6} ({}x{}, threshold {}): {}",
            score.value(),
            target.width(),
            target.height(),
            args.threshold,
            if won { "MATCH" } else { "MISS" }
        );
    }
    Ok(())
}

fn run_mask(args: MaskArgs) -> anyhow::Result<()> {
    let luma = image::open(&args.in_path)
        .with_context(|| format!("failed to open {}", args.in_path.display()))?
        .to_luma8();

    let mut out = luma;
    for px in out.pixels_mut() {
        px.0[0] = if px.0[0] >= args.cutoff { 255 } else { 0 };
    }
    out.save(&args.out)
        .with_context(|| format!("failed to write {}", args.out.display()))?;
    Ok(())
}
