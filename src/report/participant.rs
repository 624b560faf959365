//! Participant-portrait report builder.

use super::charts::{bar_rows, no_data, percent_of, pie_chart, MAX_BAR_ROWS, MAX_PIE_SEGMENTS};
use super::model::{Bucket, ParticipantPortrait};
use super::{section_heading, title_block, ReportContext};
use crate::entry::ReportEntry;

const DEFAULT_TITLE: &str = "Participant Report";

/// Build the entry list for a participant portrait.
pub fn build_participant_report(
    portrait: &ParticipantPortrait,
    context: &ReportContext,
) -> Vec<ReportEntry> {
    let title = portrait.study_title.as_deref().unwrap_or(DEFAULT_TITLE);
    let mut entries = title_block(title, "Participant portrait", context);

    entries.extend(section_heading("Participants"));
    if portrait.total_participants == 0 {
        entries.push(no_data());
    } else {
        let total = portrait.total_participants;
        let completed = portrait.completed_participants.min(total);
        entries.push(ReportEntry::text(format!("Total participants: {}", total)));
        entries.push(ReportEntry::text(format!("Completed: {}", completed)));
        entries.push(ReportEntry::text(format!(
            "Completion rate: {}%",
            percent_of(completed, total)
        )));
    }

    bar_section(&mut entries, "Age distribution", &portrait.age_groups);
    pie_section(&mut entries, "Roles", &portrait.roles);
    pie_section(&mut entries, "Gender", &portrait.genders);
    bar_section(&mut entries, "Top keywords", &portrait.keywords);

    entries
}

fn bar_section(entries: &mut Vec<ReportEntry>, heading: &str, buckets: &[Bucket]) {
    entries.extend(section_heading(heading));
    entries.extend(bar_rows(buckets, MAX_BAR_ROWS));
}

fn pie_section(entries: &mut Vec<ReportEntry>, heading: &str, buckets: &[Bucket]) {
    entries.extend(section_heading(heading));
    entries.push(pie_chart(buckets, MAX_PIE_SEGMENTS));
}
