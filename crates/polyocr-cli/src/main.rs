//! polyocr command-line interface

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use polyocr::core::languages::LanguageEntry;
use polyocr::{
    BatchExtractionPipeline, Diagnostic, ExtractionConfig, ExtractionResult, ExtractionSession, HighlightedText,
    RawImage,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable blocks, one per image
    Text,
    /// Batch output as JSON
    Json,
}

#[derive(Parser)]
#[command(name = "polyocr", version)]
#[command(about = "Extract text from images in several languages at once", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text from one or more images
    Extract {
        /// Image files, processed in the order given
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Recognition language by name (repeatable); overrides the config file
        #[arg(short, long = "lang")]
        lang: Vec<String>,

        /// Configuration file (.toml, .yaml, .yml or .json); polyocr.toml is discovered otherwise
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Highlight this term in every result
        #[arg(short, long)]
        search: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Write each successful result to <DIR>/extracted_text_image_<n>.txt
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Path to the tesseract executable
        #[arg(long)]
        tesseract: Option<String>,

        /// Tesseract page segmentation mode (0-13)
        #[arg(long)]
        psm: Option<u8>,
    },

    /// List the recognition languages that can be selected
    Languages {
        /// Configuration file whose extra_languages are included
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Serialize)]
struct JsonReport<'a> {
    results: &'a [ExtractionResult],
    diagnostics: &'a [Diagnostic],
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<JsonSearch<'a>>,
}

#[derive(Serialize)]
struct JsonSearch<'a> {
    query: &'a str,
    highlights: Vec<HighlightedText>,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            images,
            lang,
            config,
            search,
            format,
            output_dir,
            tesseract,
            psm,
        } => {
            let mut config = load_config(config.as_deref())?;
            if !lang.is_empty() {
                config.languages = lang;
            }
            if let Some(command) = tesseract {
                config.ocr.tesseract_cmd = command;
            }
            if let Some(psm) = psm {
                config.ocr.psm = psm;
            }
            config.validate().context("Invalid configuration")?;

            let languages = config.language_set()?;
            let pipeline = BatchExtractionPipeline::from_config(&config)?;

            let raw_images = images
                .iter()
                .map(|path| RawImage::from_path(path).with_context(|| format!("Failed to read {}", path.display())))
                .collect::<Result<Vec<_>>>()?;

            let output = pipeline.extract_all(&raw_images, &languages)?;

            let mut session = ExtractionSession::new(config.highlight.clone());
            session.record(output);

            for diagnostic in session.diagnostics() {
                eprintln!("{}", diagnostic);
            }

            match format {
                OutputFormat::Text => print_text(&session, search.as_deref()),
                OutputFormat::Json => print_json(&session, search.as_deref())?,
            }

            if let Some(dir) = output_dir {
                write_exports(&session, &dir)?;
            }

            Ok(())
        }

        Commands::Languages { config, format } => {
            let config = load_config(config.as_deref())?;
            let table = config.language_table()?;

            match format {
                OutputFormat::Text => print_languages(table.entries()),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(table.entries())?),
            }

            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ExtractionConfig> {
    let mut config = match path {
        Some(path) => ExtractionConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => ExtractionConfig::discover()?.unwrap_or_default(),
    };
    config.apply_env_overrides();
    Ok(config)
}

fn print_text(session: &ExtractionSession, search: Option<&str>) {
    let highlights = search.map(|query| session.search(query));

    for (position, result) in session.results().iter().enumerate() {
        if position > 0 {
            println!();
        }
        println!("{}", result.heading());
        println!("{}", result.display_text());

        if let (Some(query), Some(highlights)) = (search, &highlights) {
            let highlighted = &highlights[position];
            println!("Search \"{}\": {} match(es)", query, highlighted.match_count);
            if highlighted.has_matches() {
                println!("{}", highlighted.rendered);
            }
        }
    }
}

fn print_json(session: &ExtractionSession, search: Option<&str>) -> Result<()> {
    let report = JsonReport {
        results: session.results(),
        diagnostics: session.diagnostics(),
        search: search.map(|query| JsonSearch {
            query,
            highlights: session.search(query),
        }),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn write_exports(session: &ExtractionSession, dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        bail!("Output path {} is not a directory", dir.display());
    }
    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    for (position, result) in session.results().iter().enumerate() {
        if !result.is_ok() {
            continue;
        }
        let Some(payload) = session.export(position) else {
            continue;
        };
        let path = dir.join(&payload.file_name);
        std::fs::write(&path, payload.text.as_bytes()).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "exported extracted text");
    }
    Ok(())
}

fn print_languages(entries: &[LanguageEntry]) {
    let width = entries.iter().map(|entry| entry.name.chars().count()).max().unwrap_or(0);
    for entry in entries {
        println!("{:<width$}  {}", entry.name, entry.code, width = width);
    }
}
