//! End-to-end export of both report kinds.

use study_report::report::{
    Bucket, CardSummary, ImageSummary, ModuleSection, OutputFormat, ParticipantPortrait,
    QuestionKind, QuestionSummary, ReportContext, ReportExporter, ReportFilters, ReportKind,
    ReportPayload, StudyModuleReport,
};
use study_report::writer::PdfWriterConfig;
use study_report::{Error, PageSize, ReportConfig};

fn pdf_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn page_count(bytes: &[u8]) -> usize {
    let text = pdf_text(bytes);
    let start = text.find("/Count ").expect("page tree") + "/Count ".len();
    text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect::<String>()
        .parse()
        .unwrap()
}

fn portrait() -> ReportPayload {
    ReportPayload::Participants(ParticipantPortrait {
        study_title: Some("Campus Navigation".into()),
        total_participants: 4,
        completed_participants: 3,
        age_groups: vec![Bucket::new("18-25", 3), Bucket::new("26-35", 1)],
        roles: vec![Bucket::new("student", 3), Bucket::new("staff", 1)],
        genders: vec![Bucket::new("female", 2), Bucket::new("male", 2)],
        keywords: vec![],
    })
}

fn modules() -> ReportPayload {
    let questions = (0..30)
        .map(|i| QuestionSummary {
            text: format!("How easy was task {} to complete without help from the moderator?", i),
            kind: match i % 3 {
                0 => QuestionKind::SingleChoice,
                1 => QuestionKind::Scale,
                _ => QuestionKind::FreeText,
            },
            answered: Some(12),
            options: vec![Bucket::new("easy", 7), Bucket::new("hard", 5)],
            free_text: vec!["The map was confusing".into(), "Fine".into()],
        })
        .collect();

    ReportPayload::Modules(StudyModuleReport {
        study_title: Some("Pilot Study".into()),
        participant_count: 12,
        modules: vec![
            ModuleSection::Questionnaire {
                title: "Tasks".into(),
                questions,
            },
            ModuleSection::CardSort {
                title: "Menu".into(),
                cards: vec![CardSummary {
                    card: "Library".into(),
                    placements: vec![Bucket::new("Services", 9), Bucket::new("Campus", 3)],
                }],
            },
            ModuleSection::ImageRating {
                title: "Icons".into(),
                images: vec![ImageSummary {
                    label: "icon-a.svg".into(),
                    average: Some(3.5),
                    ratings: vec![Bucket::new("3", 6), Bucket::new("4", 6)],
                }],
            },
        ],
    })
}

#[test]
fn test_participant_pdf() {
    let context = ReportContext::new(ReportFilters::new().with("age", "18-25"));
    let out = ReportExporter::new()
        .export(&portrait(), &context, OutputFormat::Pdf)
        .unwrap();

    assert_eq!(out.filename, "participants-campus-navigation.pdf");
    assert_eq!(out.content_type, "application/pdf");

    let text = pdf_text(&out.bytes);
    assert!(text.contains("(Campus Navigation) Tj"));
    assert!(text.contains("(Filters: age = 18-25) Tj"));
    assert!(text.contains("(student: 3 \\(75%\\)) Tj"));
    // empty keyword list
    assert!(text.contains("(No data available.) Tj"));
}

#[test]
fn test_module_report_spans_pages() {
    let out = ReportExporter::new()
        .export(&modules(), &ReportContext::default(), OutputFormat::Pdf)
        .unwrap();
    let pages = page_count(&out.bytes);
    assert!(pages > 1, "expected several pages, got {}", pages);

    let text = pdf_text(&out.bytes);
    assert!(text.contains(&format!("(Page {} of {}) Tj", pages, pages)));
    assert!(text.contains("(Library) Tj"));
    assert!(text.contains("(Average rating: 3.5 \\(12 ratings\\)) Tj"));
}

#[test]
fn test_letter_page_size() {
    let exporter = ReportExporter::new().with_config(ReportConfig::new().with_page_size(PageSize::Letter));
    let out = exporter
        .export(&portrait(), &ReportContext::default(), OutputFormat::Pdf)
        .unwrap();
    assert!(pdf_text(&out.bytes).contains("/MediaBox [0 0 612 792]"));
}

#[test]
fn test_writer_version_is_configurable() {
    let exporter = ReportExporter::new().with_writer_config(PdfWriterConfig::default().with_version("1.7"));
    let out = exporter
        .export(&portrait(), &ReportContext::default(), OutputFormat::Pdf)
        .unwrap();
    assert!(out.bytes.starts_with(b"%PDF-1.7"));
}

#[test]
fn test_json_round_trips_payload() {
    let payload = modules();
    let context = ReportContext::new(ReportFilters::new().with("role", "student"));
    let out = ReportExporter::new()
        .export_as(&payload, &context, "JSON")
        .unwrap();
    assert_eq!(out.filename, "modules-pilot-study.json");

    let value: serde_json::Value = serde_json::from_slice(&out.bytes).unwrap();
    assert_eq!(value["kind"], "modules");
    assert_eq!(value["filters"]["role"], "student");

    let report = serde_json::to_vec(&value["report"]).unwrap();
    assert_eq!(ReportPayload::from_json(ReportKind::Modules, &report).unwrap(), payload);
}

#[test]
fn test_unsupported_format_is_client_error() {
    let err = ReportExporter::new()
        .export_as(&portrait(), &ReportContext::default(), "docx")
        .unwrap_err();
    assert!(err.is_client_error());
    assert!(matches!(err, Error::UnsupportedFormat { .. }));
    assert!(err.to_string().contains("docx"));
}

#[test]
fn test_save_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let out = ReportExporter::new()
        .export(&portrait(), &ReportContext::default(), OutputFormat::Pdf)
        .unwrap();
    let path = dir.path().join(&out.filename);
    out.save(&path).unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), out.bytes);
}

#[test]
fn test_export_is_deterministic() {
    let exporter = ReportExporter::new();
    let a = exporter.export(&modules(), &ReportContext::default(), OutputFormat::Pdf).unwrap();
    let b = exporter.export(&modules(), &ReportContext::default(), OutputFormat::Pdf).unwrap();
    assert_eq!(a.bytes, b.bytes);
}
