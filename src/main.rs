use clap::{Parser, ValueEnum};
use docx_text_pdf::{FontSource, Margins, PageSize, RenderConfig, TextStyle};
use std::path::{Path, PathBuf};

const DEFAULT_MAX_SIZE: u64 = 15 * 1024 * 1024;

#[derive(Clone, Copy, ValueEnum)]
enum Paper {
    A4,
    Letter,
}

#[derive(Parser)]
#[command(name = "docx-text-pdf", about = "Convert the paragraph text of a DOCX file to PDF")]
struct Args {
    /// Input DOCX file
    input: PathBuf,
    /// Output PDF file (defaults to input with .pdf extension)
    output: Option<PathBuf>,
    /// Reject inputs larger than this many bytes
    #[arg(long, default_value_t = DEFAULT_MAX_SIZE)]
    max_size: u64,
    #[arg(long, value_enum, default_value_t = Paper::A4)]
    page_size: Paper,
    /// Body font size in points
    #[arg(long, default_value_t = 10.0)]
    font_size: f32,
    /// Baseline-to-baseline distance in points
    #[arg(long, default_value_t = 12.0)]
    leading: f32,
    /// Gap after each paragraph in points
    #[arg(long, default_value_t = 10.0)]
    spacing: f32,
    /// Page margin on all sides in points
    #[arg(long, default_value_t = 72.0)]
    margin: f32,
    /// TrueType/OpenType font to embed instead of Helvetica
    #[arg(long)]
    font: Option<PathBuf>,
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

fn check_input(input: &Path, max_size: u64) -> Result<(), String> {
    let meta =
        std::fs::metadata(input).map_err(|_| format!("file not found: {}", input.display()))?;
    if !meta.is_file() {
        return Err(format!("not a file: {}", input.display()));
    }
    if meta.len() > max_size {
        return Err(format!(
            "{} is {} bytes, larger than the {max_size} byte limit",
            input.display(),
            meta.len()
        ));
    }
    Ok(())
}

fn output_path(input: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => input.with_extension("pdf"),
    }
}

fn render_config(args: &Args) -> Result<RenderConfig, String> {
    let mut config = RenderConfig {
        page_size: match args.page_size {
            Paper::A4 => PageSize::A4,
            Paper::Letter => PageSize::LETTER,
        },
        margins: Margins::all(args.margin),
        paragraph_spacing: args.spacing,
        body_style: TextStyle {
            size: args.font_size,
            leading: args.leading,
            ..TextStyle::normal()
        },
        ..RenderConfig::default()
    };
    if let Some(path) = &args.font {
        let data = std::fs::read(path)
            .map_err(|e| format!("cannot read font {}: {e}", path.display()))?;
        config.body_style.font = FontSource::TrueType(data);
    }
    Ok(config)
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(msg) = check_input(&args.input, args.max_size) {
        fail(msg);
    }
    let output = output_path(&args.input, args.output.as_deref());
    let config = render_config(&args).unwrap_or_else(|msg| fail(msg));
    log::debug!("Converting {} -> {}", args.input.display(), output.display());

    if let Err(e) = docx_text_pdf::convert_docx_to_pdf_with(&args.input, &output, &config) {
        fail(e);
    }
}
