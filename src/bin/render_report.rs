//! Render a report payload to PDF or JSON
//!
//! Reads an aggregate as JSON and writes the export next to it (or into
//! `--output-dir`).
//!
//! Usage:
//!   cargo run --bin render_report -- payload.json
//!   cargo run --bin render_report -- payload.json --kind modules --format json
//!   cargo run --bin render_report -- payload.json --filter role=student --page-size letter

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use study_report::report::{ReportContext, ReportExporter, ReportFilters, ReportKind, ReportPayload};
use study_report::writer::PdfWriterConfig;
use study_report::{PageSize, ReportConfig};

struct RenderConfig {
    payload: PathBuf,
    output_dir: Option<PathBuf>,
    kind: String,
    format: String,
    filters: Vec<(String, String)>,
    page_size: PageSize,
    compress: bool,
    timestamp: bool,
}

impl RenderConfig {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut config = Self {
            payload: PathBuf::new(),
            output_dir: None,
            kind: "participants".to_string(),
            format: "pdf".to_string(),
            filters: Vec::new(),
            page_size: PageSize::A4,
            compress: false,
            timestamp: false,
        };
        let mut payload = None;

        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            let mut value = |name: &str| iter.next().ok_or_else(|| format!("{} needs a value", name));
            match arg.as_str() {
                "--kind" => config.kind = value("--kind")?,
                "--format" => config.format = value("--format")?,
                "--output-dir" => config.output_dir = Some(PathBuf::from(value("--output-dir")?)),
                "--filter" => {
                    let pair = value("--filter")?;
                    let (key, val) = pair
                        .split_once('=')
                        .ok_or_else(|| format!("--filter expects key=value, got '{}'", pair))?;
                    config.filters.push((key.to_string(), val.to_string()));
                },
                "--page-size" => {
                    config.page_size = match value("--page-size")?.to_ascii_lowercase().as_str() {
                        "a4" => PageSize::A4,
                        "letter" => PageSize::Letter,
                        other => return Err(format!("unknown page size '{}'", other)),
                    }
                },
                "--compress" => config.compress = true,
                "--timestamp" => config.timestamp = true,
                _ if arg.starts_with("--") => return Err(format!("unknown option '{}'", arg)),
                _ => payload = Some(PathBuf::from(arg)),
            }
        }

        config.payload = payload.ok_or("missing payload file")?;
        Ok(config)
    }
}

fn run(config: RenderConfig) -> study_report::Result<PathBuf> {
    let kind: ReportKind = config.kind.parse()?;
    let json = std::fs::read(&config.payload)?;
    let payload = ReportPayload::from_json(kind, &json)?;

    let mut context = ReportContext::new(config.filters.into_iter().collect::<ReportFilters>());
    if config.timestamp {
        context = context.with_generated_at(Utc::now());
    }

    let exporter = ReportExporter::new()
        .with_config(ReportConfig::new().with_page_size(config.page_size))
        .with_writer_config(PdfWriterConfig::default().with_compress(config.compress));
    let export = exporter.export_as(&payload, &context, &config.format)?;

    let dir = match config.output_dir {
        Some(dir) => dir,
        None => config
            .payload
            .parent()
            .map(PathBuf::from)
            .unwrap_or_default(),
    };
    let path = dir.join(&export.filename);
    export.save(&path)?;
    Ok(path)
}

fn main() -> ExitCode {
    env_logger::init();

    let config = match RenderConfig::from_args() {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            eprintln!(
                "Usage: render_report <payload.json> [--kind participants|modules] [--format pdf|json] \
                 [--output-dir DIR] [--filter key=value]... [--page-size a4|letter] [--compress] [--timestamp]"
            );
            return ExitCode::from(2);
        },
    };

    match run(config) {
        Ok(path) => {
            println!("Wrote {}", path.display());
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.is_client_error() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        },
    }
}
