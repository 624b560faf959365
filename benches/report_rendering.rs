//! End-to-end rendering benchmarks: builder, pagination and PDF writing.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use study_report::report::{
    Bucket, ModuleSection, OutputFormat, ParticipantPortrait, QuestionKind, QuestionSummary,
    ReportContext, ReportExporter, ReportFilters, ReportPayload, StudyModuleReport,
};

fn buckets(prefix: &str, n: u64) -> Vec<Bucket> {
    (0..n).map(|i| Bucket::new(format!("{} {}", prefix, i), (i * 7) % 13 + 1)).collect()
}

fn participant_payload() -> ReportPayload {
    ReportPayload::Participants(ParticipantPortrait {
        study_title: Some("Benchmark Study".into()),
        total_participants: 480,
        completed_participants: 412,
        age_groups: buckets("age", 6),
        roles: buckets("role", 8),
        genders: buckets("gender", 3),
        keywords: buckets("keyword", 20),
    })
}

fn module_payload() -> ReportPayload {
    let questions = (0..40)
        .map(|i| QuestionSummary {
            text: format!("Question {} about the navigation structure of the campus app", i),
            kind: if i % 3 == 0 { QuestionKind::SingleChoice } else { QuestionKind::Scale },
            answered: Some(120),
            options: buckets("option", 5),
            free_text: Vec::new(),
        })
        .collect();
    ReportPayload::Modules(StudyModuleReport {
        study_title: Some("Benchmark Study".into()),
        participant_count: 120,
        modules: vec![ModuleSection::Questionnaire {
            title: "Usability".into(),
            questions,
        }],
    })
}

fn bench_exports(c: &mut Criterion) {
    let exporter = ReportExporter::new();
    let context = ReportContext::new(ReportFilters::new().with("role", "student"));
    let participants = participant_payload();
    let modules = module_payload();

    c.bench_function("participant_report_pdf", |b| {
        b.iter(|| exporter.export(black_box(&participants), &context, OutputFormat::Pdf))
    });
    c.bench_function("module_report_pdf", |b| {
        b.iter(|| exporter.export(black_box(&modules), &context, OutputFormat::Pdf))
    });
    c.bench_function("module_report_json", |b| {
        b.iter(|| exporter.export(black_box(&modules), &context, OutputFormat::Json))
    });
}

criterion_group!(benches, bench_exports);
criterion_main!(benches);
