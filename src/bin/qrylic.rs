use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "qrylic", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a payload, style it, and write a PNG.
    Style(StyleArgs),
    /// Encode a payload and print the module grid to the terminal.
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct StyleArgs {
    /// Payload to encode.
    #[arg(long)]
    text: String,

    /// Styling config JSON. Omitted, the output is the plain code.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Edge length of one module in pixels.
    #[arg(long, default_value_t = 8)]
    module_size: u32,

    /// Quiet-zone width in modules.
    #[arg(long, default_value_t = qrylic::DEFAULT_QUIET_ZONE)]
    quiet_zone: u32,

    /// Error-correction level.
    #[arg(long, value_enum, default_value_t = EcLevelChoice::M)]
    ec_level: EcLevelChoice,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Payload to encode.
    #[arg(long)]
    text: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EcLevelChoice {
    L,
    M,
    Q,
    H,
}

impl From<EcLevelChoice> for qrcode::EcLevel {
    fn from(choice: EcLevelChoice) -> Self {
        match choice {
            EcLevelChoice::L => qrcode::EcLevel::L,
            EcLevelChoice::M => qrcode::EcLevel::M,
            EcLevelChoice::Q => qrcode::EcLevel::Q,
            EcLevelChoice::H => qrcode::EcLevel::H,
        }
    }
}

fn main() -> anyhow::Result<()> {
    initialise_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Style(args) => cmd_style(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn cmd_style(args: StyleArgs) -> anyhow::Result<()> {
    let code = qrcode::QrCode::with_error_correction_level(args.text.as_bytes(), args.ec_level.into())
        .context("encode payload")?;
    let grid = qrylic::ModuleGrid::from_qrcode(&code, args.quiet_zone)?;

    let pipeline = match &args.config {
        Some(path) => {
            let config = qrylic::StyleConfig::from_path(path)?;
            let assets_root = path.parent().unwrap_or_else(|| Path::new("."));
            qrylic::StylePipeline::with_root(config, assets_root)?
        }
        None => qrylic::StylePipeline::new(qrylic::StyleConfig::default())?,
    };

    let opts = qrylic::GridRenderOpts {
        module_size: args.module_size,
        ..qrylic::GridRenderOpts::default()
    };
    let report = pipeline.run_grid(&grid, &opts)?;

    for event in report.failures() {
        let detail = event.message.as_deref().unwrap_or("unknown failure");
        eprintln!("stage {} degraded: {detail}", event.stage);
    }

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &report.raster.to_straight_rgba8(),
        report.raster.width,
        report.raster.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());

    if !report.succeeded() {
        anyhow::bail!(
            "{} stage(s) degraded to pass-through",
            report.failures().count()
        );
    }
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let code = qrcode::QrCode::new(args.text.as_bytes()).context("encode payload")?;
    let grid = qrylic::ModuleGrid::from_qrcode(&code, qrylic::DEFAULT_QUIET_ZONE)?;
    print!("{}", grid.to_text());
    Ok(())
}
