// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::new_without_default)]

//! # Study Report
//!
//! Report engine for user studies: turns aggregated study results into a
//! paginated PDF (or a JSON export) without any external rendering service.
//!
//! ## Core Features
//!
//! - **Report builders**: participant portrait and study-module results as a
//!   flat list of text, bar and pie entries
//! - **Text wrapping**: indent-aware word wrapping with a character budget
//! - **Pagination**: top-to-bottom placement with page breaks, no blank pages
//! - **Vector charts**: bar rows and polygon pie charts with legends
//! - **PDF writer**: base-14 fonts, content streams, cross-reference table
//!   computed from real byte offsets
//!
//! ## Architecture
//!
//! ```text
//! payload ──► report builders ──► Vec<ReportEntry>
//!                                     │ layout::paginate
//!                                     ▼
//!                                 Vec<Page> ──► writer::serialize ──► %PDF-1.4 bytes
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use study_report::report::{
//!     Bucket, OutputFormat, ParticipantPortrait, ReportContext, ReportExporter, ReportFilters,
//!     ReportPayload,
//! };
//!
//! # fn main() -> study_report::Result<()> {
//! let payload = ReportPayload::Participants(ParticipantPortrait {
//!     total_participants: 4,
//!     roles: vec![Bucket::new("student", 3), Bucket::new("staff", 1)],
//!     ..Default::default()
//! });
//! let context = ReportContext::new(ReportFilters::new().with("age", "18-25"));
//!
//! let export = ReportExporter::new().export(&payload, &context, OutputFormat::Pdf)?;
//! export.save(&export.filename)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// PDF object model
pub mod object;

// Report content and layout
pub mod entry;
pub mod layout;
pub mod text;

// PDF generation
pub mod writer;

// Report builders and export
pub mod report;

// Re-exports
pub use config::{PageSize, ReportConfig};
pub use entry::{PieSegment, ReportEntry};
pub use error::{Error, Result};
pub use report::{OutputFormat, ReportContext, ReportExporter, ReportPayload};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
