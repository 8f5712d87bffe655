use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use medform_core::repositories::documents::render_docx;
use medform_core::{
    convert_timeout_from_env_value, ConversionPipeline, CoreConfig, FieldRecord, FontVariant,
    Layout, TemplateService,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "medform")]
#[command(about = "MedForm medical document generator CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LayoutArg {
    /// Health-status certificate
    #[value(name = "form_100")]
    Form100,
    /// Inpatient encounter record
    Record,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Form100 => Layout::HealthCertificate,
            LayoutArg::Record => Layout::EncounterRecord,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum VariantArg {
    Archive,
    Print,
}

impl From<VariantArg> for FontVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Archive => FontVariant::Archive,
            VariantArg::Print => FontVariant::Print,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a document from a JSON field record
    Generate {
        /// JSON object with the form's field values
        record: PathBuf,
        /// Layout (defaults to the record's `document_type`, then form_100)
        #[arg(long, value_enum)]
        layout: Option<LayoutArg>,
        /// Font variant
        #[arg(long, value_enum, default_value = "archive")]
        variant: VariantArg,
        /// Output file (defaults to the record path with a .docx extension)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Convert the generated document to PDF
        #[arg(long)]
        pdf: bool,
        /// Explicit headless office executable
        #[arg(long)]
        soffice: Option<PathBuf>,
    },
    /// List saved templates
    Templates {
        /// Base data directory
        #[arg(long, default_value = ".")]
        data_dir: PathBuf,
    },
    /// Show which PDF converters are available
    Doctor {
        /// Explicit headless office executable
        #[arg(long)]
        soffice: Option<PathBuf>,
    },
}

/// Writes the DOCX for the record at `input` and returns its path.
fn generate_docx(
    input: &Path,
    layout: Option<LayoutArg>,
    variant: VariantArg,
    out: Option<PathBuf>,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let value: serde_json::Value = serde_json::from_slice(&std::fs::read(input)?)?;
    let record = FieldRecord::from_value(&value);
    let layout = match layout {
        Some(arg) => arg.into(),
        None => Layout::from_tag(value.get("document_type").and_then(|v| v.as_str())),
    };

    let out = out.unwrap_or_else(|| input.with_extension("docx"));
    let title = out
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document")
        .to_owned();
    let bytes = render_docx(&record, layout, variant.into(), &title, Utc::now())?;
    std::fs::write(&out, bytes)?;
    Ok(out)
}

fn timeout() -> Result<std::time::Duration, Box<dyn std::error::Error>> {
    Ok(convert_timeout_from_env_value(
        std::env::var("MEDFORM_CONVERT_TIMEOUT_SECS").ok(),
    )?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate {
            record,
            layout,
            variant,
            out,
            pdf,
            soffice,
        }) => {
            let docx = match generate_docx(&record, layout, variant, out) {
                Ok(path) => path,
                Err(e) => {
                    eprintln!("Error generating document: {}", e);
                    return Ok(());
                }
            };
            println!("Wrote {}", docx.display());

            if pdf {
                let pipeline = ConversionPipeline::standard(soffice, timeout()?);
                let report = pipeline.run(&docx).await;
                if report.is_pdf() {
                    println!("Converted to {}", report.output.display());
                } else {
                    eprintln!("PDF conversion failed; kept {}", report.output.display());
                    for (name, outcome) in &report.attempts {
                        eprintln!("  {}: {:?}", name, outcome);
                    }
                }
            }
        }
        Some(Commands::Templates { data_dir }) => {
            let cfg = Arc::new(CoreConfig::with_defaults(data_dir)?);
            match TemplateService::new(cfg).and_then(|service| service.list()) {
                Ok(templates) if templates.is_empty() => println!("No templates found."),
                Ok(templates) => {
                    for t in templates {
                        println!(
                            "ID: {}, Name: {}, Type: {}, Created: {}",
                            t.id, t.name, t.document_type, t.created
                        );
                    }
                }
                Err(e) => eprintln!("Error listing templates: {}", e),
            }
        }
        Some(Commands::Doctor { soffice }) => {
            let pipeline = ConversionPipeline::standard(soffice, timeout()?);
            for status in pipeline.probe().await {
                let state = if status.available {
                    "available"
                } else {
                    "not found"
                };
                println!("{}: {}", status.name, state);
            }
        }
        None => {
            println!("Use 'medform --help' for commands");
        }
    }

    Ok(())
}
