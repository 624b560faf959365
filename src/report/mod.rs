//! Study reports: payload model, entry builders and export.
//!
//! ```text
//! ParticipantPortrait / StudyModuleReport
//!     ↓ build_participant_report / build_study_report
//! Vec<ReportEntry>
//!     ↓ layout::paginate
//! Vec<Page>
//!     ↓ writer::serialize
//! PDF bytes
//! ```
//!
//! The JSON format skips layout entirely and returns the payload with its
//! filters.

mod charts;
mod export;
pub mod model;
mod participant;
mod study;

pub use charts::{
    bar_rows, no_data, percent_of, pie_chart, total_count, whole_percentages, MAX_BAR_ROWS,
    MAX_PIE_SEGMENTS,
};
pub use export::{ExportedReport, OutputFormat, ReportExporter, ReportKind, ReportPayload};
pub use model::{
    Bucket, CardSummary, ImageSummary, ModuleSection, ParticipantPortrait, QuestionKind,
    QuestionSummary, ReportFilters, StudyModuleReport,
};
pub use participant::build_participant_report;
pub use study::{build_study_report, MAX_FREE_TEXT_SAMPLES};

use crate::entry::ReportEntry;
use chrono::{DateTime, Utc};

const TITLE_SIZE: f32 = 18.0;
const SECTION_SIZE: f32 = 13.0;

/// Request-level information printed in every report header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportContext {
    /// Filters the aggregate was computed with
    pub filters: ReportFilters,
    /// Timestamp printed under the title, if set
    pub generated_at: Option<DateTime<Utc>>,
}

impl ReportContext {
    /// Context with the given filters and no timestamp.
    pub fn new(filters: ReportFilters) -> Self {
        Self {
            filters,
            generated_at: None,
        }
    }

    /// Print a "Generated" line with this timestamp.
    pub fn with_generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }
}

/// Title, subtitle, optional timestamp and filter summary.
pub(crate) fn title_block(title: &str, subtitle: &str, context: &ReportContext) -> Vec<ReportEntry> {
    let mut entries = vec![
        ReportEntry::heading(title, TITLE_SIZE),
        ReportEntry::text(subtitle),
    ];
    if let Some(at) = context.generated_at {
        entries.push(ReportEntry::text(format!(
            "Generated: {}",
            at.format("%Y-%m-%d %H:%M UTC")
        )));
    }
    entries.push(ReportEntry::paragraph(context.filters.summary(), 0.0));
    entries.push(ReportEntry::spacer(8.0));
    entries
}

pub(crate) fn section_heading(text: &str) -> [ReportEntry; 2] {
    [ReportEntry::spacer(10.0), ReportEntry::heading(text, SECTION_SIZE)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_title_block_with_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap();
        let context = ReportContext::new(ReportFilters::new().with("age", "18-25")).with_generated_at(at);
        let entries = title_block("Pilot", "Participant portrait", &context);

        assert_eq!(entries[0], ReportEntry::heading("Pilot", TITLE_SIZE));
        assert_eq!(entries[2], ReportEntry::text("Generated: 2024-03-05 14:30 UTC"));
        assert_eq!(entries[3], ReportEntry::paragraph("Filters: age = 18-25", 0.0));
        assert_eq!(entries.last(), Some(&ReportEntry::spacer(8.0)));
    }

    #[test]
    fn test_title_block_without_timestamp() {
        let entries = title_block("Pilot", "Study modules", &ReportContext::default());
        assert_eq!(entries.len(), 4);
        assert!(!entries
            .iter()
            .any(|e| matches!(e, ReportEntry::TextLine { text, .. } if text.starts_with("Generated"))));
    }
}
