//! Export of a report payload as JSON or PDF.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use super::model::{ParticipantPortrait, ReportFilters, StudyModuleReport};
use super::{build_participant_report, build_study_report, ReportContext};
use crate::config::ReportConfig;
use crate::entry::ReportEntry;
use crate::error::{Error, Result};
use crate::layout::paginate;
use crate::writer::{serialize, PdfWriterConfig};

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Payload plus filters as JSON
    Json,
    /// Paginated PDF document
    Pdf,
}

impl OutputFormat {
    /// Supported format names, for error messages.
    pub fn supported_list() -> &'static str {
        "json, pdf"
    }

    /// MIME type of the exported bytes.
    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Json => "application/json",
            OutputFormat::Pdf => "application/pdf",
        }
    }

    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Pdf => "pdf",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "pdf" => Ok(OutputFormat::Pdf),
            _ => Err(Error::UnsupportedFormat {
                requested: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Which report a payload belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Participant portrait
    Participants,
    /// Study-module results
    Modules,
}

impl ReportKind {
    fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Participants => "participants",
            ReportKind::Modules => "modules",
        }
    }
}

impl FromStr for ReportKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "participants" | "participant" => Ok(ReportKind::Participants),
            "modules" | "module" => Ok(ReportKind::Modules),
            _ => Err(Error::UnknownReportKind(s.to_string())),
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A report aggregate ready for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportPayload {
    /// Participant portrait
    Participants(ParticipantPortrait),
    /// Study-module results
    Modules(StudyModuleReport),
}

impl ReportPayload {
    /// Parse a payload of the given kind from JSON.
    pub fn from_json(kind: ReportKind, json: &[u8]) -> Result<Self> {
        Ok(match kind {
            ReportKind::Participants => ReportPayload::Participants(serde_json::from_slice(json)?),
            ReportKind::Modules => ReportPayload::Modules(serde_json::from_slice(json)?),
        })
    }

    /// Report kind.
    pub fn kind(&self) -> ReportKind {
        match self {
            ReportPayload::Participants(_) => ReportKind::Participants,
            ReportPayload::Modules(_) => ReportKind::Modules,
        }
    }

    fn study_title(&self) -> Option<&str> {
        match self {
            ReportPayload::Participants(p) => p.study_title.as_deref(),
            ReportPayload::Modules(m) => m.study_title.as_deref(),
        }
    }

    /// Entry list for this payload.
    pub fn entries(&self, context: &ReportContext) -> Vec<ReportEntry> {
        match self {
            ReportPayload::Participants(p) => build_participant_report(p, context),
            ReportPayload::Modules(m) => build_study_report(m, context),
        }
    }

    /// File name stem: the kind followed by the slugified study title.
    pub fn slug(&self) -> String {
        let title = self.study_title().map(slugify).unwrap_or_default();
        if title.is_empty() {
            format!("{}-report", self.kind())
        } else {
            format!("{}-{}", self.kind(), title)
        }
    }
}

fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[derive(Serialize)]
struct JsonExport<'a> {
    kind: ReportKind,
    filters: &'a ReportFilters,
    #[serde(skip_serializing_if = "Option::is_none")]
    generated_at: Option<String>,
    report: &'a ReportPayload,
}

/// Exported bytes with their response metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedReport {
    /// File contents
    pub bytes: Vec<u8>,
    /// MIME type
    pub content_type: &'static str,
    /// Suggested download file name
    pub filename: String,
}

impl ExportedReport {
    /// Write the bytes to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}

/// Turns payloads into JSON or PDF exports.
#[derive(Debug, Clone, Default)]
pub struct ReportExporter {
    config: ReportConfig,
    writer_config: PdfWriterConfig,
}

impl ReportExporter {
    /// Exporter with default page layout and writer settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this page layout.
    pub fn with_config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    /// Use these PDF writer settings.
    pub fn with_writer_config(mut self, writer_config: PdfWriterConfig) -> Self {
        self.writer_config = writer_config;
        self
    }

    /// Export with a format name as received from the caller
    /// (case-insensitive).
    pub fn export_as(
        &self,
        payload: &ReportPayload,
        context: &ReportContext,
        format: &str,
    ) -> Result<ExportedReport> {
        self.export(payload, context, format.parse()?)
    }

    /// Export a payload.
    pub fn export(
        &self,
        payload: &ReportPayload,
        context: &ReportContext,
        format: OutputFormat,
    ) -> Result<ExportedReport> {
        let bytes = match format {
            OutputFormat::Json => {
                let export = JsonExport {
                    kind: payload.kind(),
                    filters: &context.filters,
                    generated_at: context.generated_at.map(|at| at.to_rfc3339()),
                    report: payload,
                };
                serde_json::to_vec_pretty(&export)?
            },
            OutputFormat::Pdf => self.render_pdf(&payload.entries(context))?,
        };

        log::info!(
            "Exported {} report as {} ({} bytes)",
            payload.kind(),
            format,
            bytes.len()
        );

        Ok(ExportedReport {
            bytes,
            content_type: format.content_type(),
            filename: format!("{}.{}", payload.slug(), format.extension()),
        })
    }

    /// Paginate and serialize an entry list.
    pub fn render_pdf(&self, entries: &[ReportEntry]) -> Result<Vec<u8>> {
        let pages = paginate(entries, self.config.geometry());
        serialize(&pages, &self.config, &self.writer_config)
    }
}
