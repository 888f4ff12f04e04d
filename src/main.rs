use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use overlay_grid::{
    overlay_grid, GridConfig, GridDrawingConfig, DEFAULT_COLS, DEFAULT_FONT_NAME, LABEL_FONT_SIZE,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Overlay a numbered grid on an image to help determine column and row proportions.
///
/// Numbers are rendered in a margin band outside the image, so they never cover the
/// form and stay readable at any grid density.
#[derive(Parser, Debug)]
#[command(name = "overlay-grid", version)]
struct Args {
    /// Input image path
    image: PathBuf,

    /// Number of vertical divisions
    #[arg(short, long, default_value_t = DEFAULT_COLS)]
    cols: u32,

    /// Number of horizontal divisions (0 = auto, keep cells square)
    #[arg(short, long, default_value_t = 0)]
    rows: u32,

    /// Output path (default: <name>-grid.<ext>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Label font, as a file name in the system font directories or a path
    #[arg(long, default_value = DEFAULT_FONT_NAME)]
    font: String,

    /// Label font size in pixels
    #[arg(long, default_value_t = LABEL_FONT_SIZE)]
    font_size: f32,

    /// Log to stderr; repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn grid_config(&self) -> GridConfig {
        let rows = (self.rows != 0).then_some(self.rows);
        GridConfig::new(self.cols, rows)
    }

    fn drawing_config(&self) -> GridDrawingConfig {
        GridDrawingConfig {
            label_font: self.font.clone(),
            label_size: self.font_size,
            ..Default::default()
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("overlay_grid={level}")))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let report = overlay_grid(
        &args.image,
        args.output.as_deref(),
        &args.grid_config(),
        &args.drawing_config(),
    )
    .with_context(|| format!("Failed to overlay grid on {}", args.image.display()))?;

    println!("{report}");
    Ok(())
}
