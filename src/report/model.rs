//! Report payloads as supplied by the analytics layer.
//!
//! Every collection and most scalars are optional on the wire; a missing
//! section deserializes to an empty one and renders as "No data available."

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A labelled count, the unit of every distribution in a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    /// Category label
    pub label: String,
    /// Number of participants / answers in this category
    #[serde(default)]
    pub count: u64,
}

impl Bucket {
    /// Create a bucket.
    pub fn new(label: impl Into<String>, count: u64) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Free-form filter options the report was computed with (e.g. age, role,
/// keyword), in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportFilters(IndexMap<String, String>);

impl ReportFilters {
    /// No filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter option. Empty values are ignored.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.trim().is_empty() {
            self.0.insert(key.into(), value);
        }
        self
    }

    /// Whether no filter is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// One-line human readable summary.
    pub fn summary(&self) -> String {
        if self.is_empty() {
            return "Filters: none".to_string();
        }
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{} = {}", k, v)).collect();
        format!("Filters: {}", parts.join(", "))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ReportFilters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ReportFilters::new(), |filters, (k, v)| filters.with(k, v))
    }
}

/// Aggregate for the participant-portrait report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticipantPortrait {
    /// Study title
    pub study_title: Option<String>,
    /// Participants matching the filters
    pub total_participants: u64,
    /// Participants who finished every module
    pub completed_participants: u64,
    /// Age-group distribution
    pub age_groups: Vec<Bucket>,
    /// Role distribution
    pub roles: Vec<Bucket>,
    /// Gender distribution
    pub genders: Vec<Bucket>,
    /// Most frequent self-description keywords
    pub keywords: Vec<Bucket>,
}

/// Aggregate for the study-module report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyModuleReport {
    /// Study title
    pub study_title: Option<String>,
    /// Participants matching the filters
    pub participant_count: u64,
    /// Module sections in study order
    pub modules: Vec<ModuleSection>,
}

/// Results of one study module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModuleSection {
    /// Questionnaire module
    Questionnaire {
        /// Module title
        #[serde(default)]
        title: String,
        /// Per-question breakdowns
        #[serde(default)]
        questions: Vec<QuestionSummary>,
    },
    /// Card-sorting module
    CardSort {
        /// Module title
        #[serde(default)]
        title: String,
        /// Per-card placements
        #[serde(default)]
        cards: Vec<CardSummary>,
    },
    /// Image-rating module
    ImageRating {
        /// Module title
        #[serde(default)]
        title: String,
        /// Per-image ratings
        #[serde(default)]
        images: Vec<ImageSummary>,
    },
}

impl ModuleSection {
    /// Module title.
    pub fn title(&self) -> &str {
        match self {
            ModuleSection::Questionnaire { title, .. }
            | ModuleSection::CardSort { title, .. }
            | ModuleSection::ImageRating { title, .. } => title,
        }
    }

    /// Human readable module type.
    pub fn kind_label(&self) -> &'static str {
        match self {
            ModuleSection::Questionnaire { .. } => "Questionnaire",
            ModuleSection::CardSort { .. } => "Card sorting",
            ModuleSection::ImageRating { .. } => "Image rating",
        }
    }
}

/// How a question is answered; decides the chart type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// One option per participant (pie chart)
    #[default]
    SingleChoice,
    /// Several options per participant (bars)
    MultipleChoice,
    /// Rating scale (bars, in scale order)
    Scale,
    /// Free text answers (listed)
    FreeText,
}

/// Breakdown of one questionnaire question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionSummary {
    /// Question text
    pub text: String,
    /// Answer type
    pub kind: QuestionKind,
    /// Number of participants who answered
    pub answered: Option<u64>,
    /// Option counts (choice and scale questions)
    pub options: Vec<Bucket>,
    /// Sample answers (free-text questions)
    pub free_text: Vec<String>,
}

/// Placements of one card in a card sort.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardSummary {
    /// Card label
    pub card: String,
    /// How often the card was sorted into each category
    pub placements: Vec<Bucket>,
}

/// Ratings of one image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSummary {
    /// Image label or file name
    pub label: String,
    /// Mean rating, if any ratings exist
    pub average: Option<f32>,
    /// Distribution over rating values
    pub ratings: Vec<Bucket>,
}
