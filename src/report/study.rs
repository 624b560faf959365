//! Study-module report builder.

use super::charts::{bar_rows, no_data, pie_chart, total_count, MAX_BAR_ROWS, MAX_PIE_SEGMENTS};
use super::model::{
    CardSummary, ImageSummary, ModuleSection, QuestionKind, QuestionSummary, StudyModuleReport,
};
use super::{section_heading, title_block, ReportContext};
use crate::entry::ReportEntry;

const DEFAULT_TITLE: &str = "Study Report";

/// Free-text answers listed per question.
pub const MAX_FREE_TEXT_SAMPLES: usize = 8;

const ITEM_SIZE: f32 = 11.0;
const DETAIL_INDENT: f32 = 16.0;

/// Build the entry list for a study-module report.
pub fn build_study_report(report: &StudyModuleReport, context: &ReportContext) -> Vec<ReportEntry> {
    let title = report.study_title.as_deref().unwrap_or(DEFAULT_TITLE);
    let mut entries = title_block(title, "Study modules", context);
    entries.push(ReportEntry::text(format!("Participants: {}", report.participant_count)));

    if report.modules.is_empty() {
        entries.extend(section_heading("Modules"));
        entries.push(no_data());
        return entries;
    }

    for (index, module) in report.modules.iter().enumerate() {
        let heading = if module.title().trim().is_empty() {
            format!("Module {} ({})", index + 1, module.kind_label())
        } else {
            format!("Module {}: {} ({})", index + 1, module.title(), module.kind_label())
        };
        entries.extend(section_heading(&heading));

        match module {
            ModuleSection::Questionnaire { questions, .. } => questionnaire(&mut entries, questions),
            ModuleSection::CardSort { cards, .. } => card_sort(&mut entries, cards),
            ModuleSection::ImageRating { images, .. } => image_rating(&mut entries, images),
        }
    }

    entries
}

fn item_heading(text: String) -> [ReportEntry; 2] {
    [ReportEntry::spacer(4.0), ReportEntry::heading(text, ITEM_SIZE)]
}

fn questionnaire(entries: &mut Vec<ReportEntry>, questions: &[QuestionSummary]) {
    if questions.is_empty() {
        entries.push(no_data());
        return;
    }

    for (index, question) in questions.iter().enumerate() {
        entries.extend(item_heading(format!("Q{}. {}", index + 1, question.text)));
        if let Some(answered) = question.answered {
            entries.push(ReportEntry::text(format!("Answers: {}", answered)).indented(DETAIL_INDENT));
        }

        match question.kind {
            QuestionKind::SingleChoice => entries.push(pie_chart(&question.options, MAX_PIE_SEGMENTS)),
            QuestionKind::MultipleChoice | QuestionKind::Scale => {
                entries.extend(bar_rows(&question.options, MAX_BAR_ROWS))
            },
            QuestionKind::FreeText => free_text(entries, &question.free_text),
        }
    }
}

fn free_text(entries: &mut Vec<ReportEntry>, answers: &[String]) {
    let answers: Vec<&str> = answers
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .collect();
    if answers.is_empty() {
        entries.push(no_data());
        return;
    }

    for answer in answers.iter().take(MAX_FREE_TEXT_SAMPLES) {
        entries.push(ReportEntry::paragraph(format!("- {}", answer), DETAIL_INDENT));
    }
    if answers.len() > MAX_FREE_TEXT_SAMPLES {
        entries.push(
            ReportEntry::text(format!("... and {} more", answers.len() - MAX_FREE_TEXT_SAMPLES))
                .indented(DETAIL_INDENT),
        );
    }
}

fn card_sort(entries: &mut Vec<ReportEntry>, cards: &[CardSummary]) {
    if cards.is_empty() {
        entries.push(no_data());
        return;
    }

    for card in cards {
        entries.extend(item_heading(card.card.clone()));
        entries.extend(bar_rows(&card.placements, MAX_BAR_ROWS));
    }
}

fn image_rating(entries: &mut Vec<ReportEntry>, images: &[ImageSummary]) {
    if images.is_empty() {
        entries.push(no_data());
        return;
    }

    for image in images {
        entries.extend(item_heading(image.label.clone()));
        let ratings = total_count(&image.ratings);
        let average = match image.average {
            Some(avg) => format!("Average rating: {:.1} ({} ratings)", avg, ratings),
            None => "Average rating: n/a".to_string(),
        };
        entries.push(ReportEntry::text(average).indented(DETAIL_INDENT));
        entries.extend(bar_rows(&image.ratings, MAX_BAR_ROWS));
    }
}
