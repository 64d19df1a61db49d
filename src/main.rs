use casedoc::{CaseRecord, LayoutConfig, OutputFormat, PipelineBuilder, PipelineError};
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;

/// Render an incident case record as Markdown and/or PDF.
#[derive(Parser, Debug)]
#[command(name = "casedoc", version, about)]
struct Cli {
    /// Path to the case record JSON file.
    record: PathBuf,

    /// Directory the documents are saved into.
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// Which documents to produce.
    #[arg(short, long, value_enum, default_value_t = FormatArg::Both)]
    format: FormatArg,

    /// Serve the report font from this directory.
    #[arg(long, conflicts_with = "font_url")]
    font_dir: Option<PathBuf>,

    /// Serve the report font from this base URL.
    #[arg(long)]
    font_url: Option<String>,

    /// JSON file overriding page geometry, font sizes and spacing.
    #[arg(long)]
    layout: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Md,
    Pdf,
    Both,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Md => OutputFormat::Markdown,
            FormatArg::Pdf => OutputFormat::Pdf,
            FormatArg::Both => OutputFormat::Both,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), PipelineError> {
    env_logger::init();
    let cli = Cli::parse();

    log::info!("Loading case record from {}", cli.record.display());
    let record: CaseRecord = serde_json::from_str(&fs::read_to_string(&cli.record)?)?;

    let mut builder = PipelineBuilder::new().with_output_dir(&cli.out);
    if let Some(dir) = cli.font_dir {
        builder = builder.with_font_dir(dir);
    }
    if let Some(url) = cli.font_url {
        builder = builder.with_font_url(url)?;
    }
    if let Some(path) = cli.layout {
        let layout: LayoutConfig = serde_json::from_str(&fs::read_to_string(path)?)?;
        builder = builder.with_layout_config(layout);
    }
    let pipeline = builder.build()?;

    for path in pipeline.generate(&record, cli.format.into()).await? {
        println!("{}", path.display());
    }
    Ok(())
}
