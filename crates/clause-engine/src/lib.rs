pub mod classify;
pub mod clauses;
pub mod compare;
pub mod deadlines;
pub mod extractors;
pub mod language;
pub mod patterns;
pub mod qa;
pub mod summarize;
pub mod text;

use chrono::{Local, NaiveDateTime};
use shared_types::{AnalysisReport, ComparisonResult, EntityReport};

/// Clauses handed to the simplifier
pub const SIMPLIFIED_CLAUSES: usize = 5;

/// Tunables for the heuristic pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub summary_sentences: usize,
    pub deadline_window_days: i64,
    pub max_overlaps: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            summary_sentences: 6,
            deadline_window_days: deadlines::DEFAULT_WINDOW_DAYS,
            max_overlaps: compare::MAX_OVERLAPS,
        }
    }
}

/// A decoded contract with its segmentation computed once
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub language: String,
    pub sentences: Vec<String>,
    pub clauses: Vec<String>,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            language: language::detect_language(&text),
            sentences: text::sentence_tokenize(&text),
            clauses: clauses::extract_clauses(&text),
            text,
        }
    }

    /// Clauses eligible for plain-language rewriting
    pub fn leading_clauses(&self) -> &[String] {
        let end = self.clauses.len().min(SIMPLIFIED_CLAUSES);
        &self.clauses[..end]
    }
}

/// ClauseEngine entry point
#[derive(Debug, Clone, Default)]
pub struct ClauseEngine {
    settings: EngineSettings,
}

impl ClauseEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn summarize(&self, document: &Document) -> String {
        summarize::summarize_sentences(
            &document.sentences,
            &document.language,
            self.settings.summary_sentences,
        )
    }

    pub fn answer(&self, text: &str, question: &str) -> String {
        qa::keyword_qa(text, question)
    }

    pub fn compare(&self, text_a: &str, text_b: &str) -> ComparisonResult {
        compare::compare_contracts_with_limit(text_a, text_b, self.settings.max_overlaps)
    }

    /// Heuristic-only report, with alerts relative to `now`
    ///
    /// Simplified examples are the leading clauses unchanged; callers with a
    /// generative service replace them and the summary.
    pub fn analyze_at(&self, document: &Document, now: NaiveDateTime) -> AnalysisReport {
        let text = document.text.as_str();
        AnalysisReport {
            language: document.language.clone(),
            contract_type: classify::classify_contract(text),
            clauses: document.clauses.clone(),
            simplified_examples: document.leading_clauses().to_vec(),
            summary: self.summarize(document),
            entities: EntityReport {
                patterns: extractors::find_entities(text),
                nlu: None,
            },
            risks: extractors::detect_risks(text),
            alerts: deadlines::upcoming_alerts_at(text, now, self.settings.deadline_window_days),
            uses_granite: false,
            uses_watson_nlu: false,
        }
    }

    pub fn analyze(&self, document: &Document) -> AnalysisReport {
        self.analyze_at(document, Local::now().naive_local())
    }
}
