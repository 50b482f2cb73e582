mod logger;

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Args, Parser, Subcommand};
use invoice::{
    compose, resolve_korean_font, Currency, FontHandle, InvoiceForm, InvoiceRecord, Language,
};
use log::info;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rsinvoice", about = "Korean/English invoice PDF generator", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an invoice to PDF
    #[command(group(ArgGroup::new("source").required(true).args(["data", "form", "sample"])))]
    Generate(GenerateArgs),

    /// Write a fresh form with today's dates and a new invoice number
    NewForm {
        /// Output JSON file
        #[arg(short, long, default_value = "invoice-form.json")]
        output: PathBuf,
    },
}

#[derive(Args, Default)]
struct GenerateArgs {
    /// Invoice record JSON (amounts already computed)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Form JSON; validated and totalled before rendering
    #[arg(long)]
    form: Option<PathBuf>,

    /// Render the built-in sample invoice
    #[arg(long)]
    sample: bool,

    /// Document language (ko, en)
    #[arg(short, long)]
    lang: Option<Language>,

    /// Currency (KRW, USD, EUR, JPY)
    #[arg(short, long)]
    currency: Option<Currency>,

    /// Regular TrueType font for Korean text
    #[arg(long)]
    font: Option<PathBuf>,

    /// Bold TrueType font (defaults to the regular face)
    #[arg(long, requires = "font")]
    bold_font: Option<PathBuf>,

    /// Extra directories searched for NanumGothic.ttf
    #[arg(long)]
    font_dir: Vec<PathBuf>,

    /// Output PDF file (defaults to {invoiceNumber}.pdf)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// A record to render, plus the language and currency a form was saved with
struct Source {
    record: InvoiceRecord,
    language: Option<Language>,
    currency: Option<Currency>,
}

/// Four upper-case hex characters from a random UUID
fn invoice_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..4].to_uppercase()
}

fn read_json(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn load_source(args: &GenerateArgs) -> Result<Source> {
    match (&args.data, &args.form) {
        (Some(path), _) => {
            let record = InvoiceRecord::from_json(&read_json(path)?)
                .with_context(|| format!("parsing invoice {}", path.display()))?;
            Ok(Source {
                record,
                language: None,
                currency: None,
            })
        }
        (None, Some(path)) => {
            let form: InvoiceForm = serde_json::from_str(&read_json(path)?)
                .with_context(|| format!("parsing form {}", path.display()))?;
            Ok(Source {
                record: form.to_record()?,
                language: Some(form.language),
                currency: Some(form.currency),
            })
        }
        (None, None) if args.sample => Ok(Source {
            record: InvoiceRecord::sample(),
            language: None,
            currency: None,
        }),
        (None, None) => bail!("one of --data, --form or --sample is required"),
    }
}

/// Command-line flags win over the form's saved choice, then the defaults
fn pick_locale(args: &GenerateArgs, source: &Source) -> (Language, Currency) {
    (
        args.lang.or(source.language).unwrap_or_default(),
        args.currency.or(source.currency).unwrap_or_default(),
    )
}

fn output_path(output: Option<&Path>, record: &InvoiceRecord) -> PathBuf {
    output.map_or_else(|| PathBuf::from(record.suggested_filename()), Path::to_path_buf)
}

fn resolve_font(
    language: Language,
    font: Option<&Path>,
    bold_font: Option<&Path>,
    font_dirs: &[PathBuf],
) -> Result<FontHandle> {
    if let Some(path) = font {
        return FontHandle::from_paths(path, bold_font)
            .with_context(|| format!("loading font {}", path.display()));
    }
    Ok(match language {
        Language::Ko => resolve_korean_font(font_dirs),
        Language::En => FontHandle::Fallback,
    })
}

/// Render the selected invoice and return the path written
fn generate(args: &GenerateArgs) -> Result<PathBuf> {
    let source = load_source(args)?;
    let (language, currency) = pick_locale(args, &source);
    let font = resolve_font(
        language,
        args.font.as_deref(),
        args.bold_font.as_deref(),
        &args.font_dir,
    )?;

    let record = &source.record;
    let bytes = compose(record, language, currency, &font)
        .with_context(|| format!("composing {}", record.invoice_number))?;

    let output = output_path(args.output.as_deref(), record);
    std::fs::write(&output, &bytes).with_context(|| format!("writing {}", output.display()))?;
    info!("wrote {} bytes", bytes.len());
    println!("Generated {} → {}", record.invoice_number, output.display());
    Ok(output)
}

fn new_form(output: &Path) -> Result<InvoiceForm> {
    let today = chrono::Local::now().date_naive();
    let form = InvoiceForm::new(today, &invoice_suffix());
    std::fs::write(output, serde_json::to_string_pretty(&form)?)
        .with_context(|| format!("writing {}", output.display()))?;
    println!("New form {} → {}", form.invoice_number, output.display());
    Ok(form)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::StderrLogger::new(logger::level_for(cli.verbose)).init()?;

    match cli.command {
        Commands::Generate(args) => generate(&args).map(drop),
        Commands::NewForm { output } => new_form(&output).map(drop),
    }
}
