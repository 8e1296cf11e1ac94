//! Analysis service
//!
//! Wraps the heuristic engine and upgrades parts of its output with the
//! enrichment services when they are configured and answer. Every request
//! still produces a full result when they do not.

use std::sync::Arc;

use clause_engine::patterns::truncate_chars;
use clause_engine::{ClauseEngine, Document};
use serde_json::Value;
use shared_types::{AnalysisReport, ComparisonResult};
use tracing::{debug, warn};

use crate::enrichment::{EntityEnricher, TextGenerator};

pub const SUMMARY_PROMPT: &str =
    "You are a legal assistant. Summarize the contract in 5-7 bullet points in the same language as the input.";
pub const SIMPLIFY_PROMPT: &str =
    "Rewrite the clause in simpler, layman-friendly language while preserving legal meaning.";
pub const ANSWER_PROMPT: &str =
    "Answer strictly using the provided contract text. If unknown, say 'Not found in document.'";

const SUMMARY_INPUT_CHARS: usize = 12_000;
const CLAUSE_INPUT_CHARS: usize = 4_000;
const ANSWER_CONTEXT_CHARS: usize = 10_000;

pub struct AnalysisService {
    engine: ClauseEngine,
    generator: Arc<dyn TextGenerator>,
    enricher: Arc<dyn EntityEnricher>,
}

impl AnalysisService {
    pub fn new(
        engine: ClauseEngine,
        generator: Arc<dyn TextGenerator>,
        enricher: Arc<dyn EntityEnricher>,
    ) -> Self {
        Self {
            engine,
            generator,
            enricher,
        }
    }

    pub fn uses_granite(&self) -> bool {
        self.generator.is_available()
    }

    pub fn uses_watson_nlu(&self) -> bool {
        self.enricher.is_available()
    }

    /// Generated text, or `None` when the generator is absent or fails
    async fn try_generate(&self, system_prompt: &str, user_prompt: &str) -> Option<String> {
        if !self.generator.is_available() {
            return None;
        }
        match self.generator.generate(system_prompt, user_prompt).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Generation failed, using heuristic fallback: {}", e);
                None
            }
        }
    }

    async fn try_enrich(&self, text: &str) -> Option<Value> {
        if !self.enricher.is_available() {
            return None;
        }
        match self.enricher.analyze(text).await {
            Ok(result) => Some(result),
            Err(e) => {
                warn!("Entity enrichment failed, keeping pattern entities only: {}", e);
                None
            }
        }
    }

    pub async fn simplify_clause(&self, clause: &str) -> String {
        self.try_generate(SIMPLIFY_PROMPT, truncate_chars(clause, CLAUSE_INPUT_CHARS))
            .await
            .unwrap_or_else(|| clause.to_string())
    }

    pub async fn analyze(&self, text: &str) -> AnalysisReport {
        let document = Document::new(text);
        debug!(
            "Analyzing {} chars: {} sentences, {} clauses, language {}",
            text.len(),
            document.sentences.len(),
            document.clauses.len(),
            document.language
        );

        let mut report = self.engine.analyze(&document);

        if let Some(summary) = self
            .try_generate(SUMMARY_PROMPT, truncate_chars(text, SUMMARY_INPUT_CHARS))
            .await
        {
            report.summary = summary;
        }

        let mut simplified = Vec::with_capacity(document.leading_clauses().len());
        for clause in document.leading_clauses() {
            simplified.push(self.simplify_clause(clause).await);
        }
        report.simplified_examples = simplified;

        report.entities.nlu = self.try_enrich(text).await;
        report.uses_granite = self.uses_granite();
        report.uses_watson_nlu = self.uses_watson_nlu();
        report
    }

    pub async fn answer(&self, text: &str, question: &str) -> String {
        let prompt = format!(
            "Contract:\n{}\n\nQuestion: {}",
            truncate_chars(text, ANSWER_CONTEXT_CHARS),
            question
        );
        match self.try_generate(ANSWER_PROMPT, &prompt).await {
            Some(answer) => answer,
            None => self.engine.answer(text, question),
        }
    }

    pub fn compare(&self, text_a: &str, text_b: &str) -> ComparisonResult {
        self.engine.compare(text_a, text_b)
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    //! In-process stand-ins for the enrichment services

    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::Value;

    use crate::enrichment::{EnrichmentError, EntityEnricher, TextGenerator};

    /// Replies with a fixed text, or fails when `reply` is `None`
    pub struct FakeGenerator {
        pub available: bool,
        pub reply: Option<String>,
        pub prompts: Mutex<Vec<(String, String)>>,
    }

    impl FakeGenerator {
        pub fn replying(reply: &str) -> Self {
            Self {
                available: true,
                reply: Some(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                available: true,
                reply: None,
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn absent() -> Self {
            Self {
                available: false,
                reply: None,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        fn is_available(&self) -> bool {
            self.available
        }

        async fn generate(
            &self,
            system_prompt: &str,
            user_prompt: &str,
        ) -> Result<String, EnrichmentError> {
            self.prompts
                .lock()
                .unwrap()
                .push((system_prompt.to_string(), user_prompt.to_string()));
            self.reply.clone().ok_or(EnrichmentError::EmptyResponse)
        }
    }

    pub struct FakeEnricher {
        pub result: Option<Value>,
    }

    #[async_trait]
    impl EntityEnricher for FakeEnricher {
        fn is_available(&self) -> bool {
            self.result.is_some()
        }

        async fn analyze(&self, _text: &str) -> Result<Value, EnrichmentError> {
            self.result.clone().ok_or(EnrichmentError::Unavailable)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fakes::{FakeEnricher, FakeGenerator};
    use super::*;
    use clause_engine::qa::ANSWER_NOT_FOUND;
    use serde_json::json;

    const LEASE: &str = "1. Rent\nTenant pays $900 monthly rent to the Landlord.\n\
                         2. Deposit\nTenant pays a security deposit of $900.\n";

    fn service(
        generator: FakeGenerator,
        nlu: Option<Value>,
    ) -> (AnalysisService, Arc<FakeGenerator>) {
        let generator = Arc::new(generator);
        let service = AnalysisService::new(
            ClauseEngine::default(),
            generator.clone(),
            Arc::new(FakeEnricher { result: nlu }),
        );
        (service, generator)
    }

    #[tokio::test]
    async fn test_heuristics_when_nothing_is_configured() {
        let (service, generator) = service(FakeGenerator::absent(), None);
        let report = service.analyze(LEASE).await;

        assert!(!report.uses_granite);
        assert!(!report.uses_watson_nlu);
        assert_eq!(report.simplified_examples, report.clauses);
        assert!(report.summary.contains("security deposit"));
        assert!(report.entities.nlu.is_none());
        assert!(generator.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generated_text_replaces_heuristics() {
        let (service, generator) = service(FakeGenerator::replying("Plain words."), None);
        let report = service.analyze(LEASE).await;

        assert!(report.uses_granite);
        assert_eq!(report.summary, "Plain words.");
        assert_eq!(report.simplified_examples, vec!["Plain words.", "Plain words."]);

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 3);
        assert_eq!(prompts[0].0, SUMMARY_PROMPT);
        assert_eq!(prompts[1].0, SIMPLIFY_PROMPT);
    }

    #[tokio::test]
    async fn test_generation_failure_falls_back() {
        let (service, _) = service(FakeGenerator::failing(), None);
        let report = service.analyze(LEASE).await;

        assert!(report.uses_granite);
        assert_eq!(report.simplified_examples, report.clauses);
        assert!(!report.summary.is_empty());
        assert_eq!(
            service.answer(LEASE, "How much is the security deposit?").await,
            "Tenant pays a security deposit of $900."
        );
    }

    #[tokio::test]
    async fn test_nlu_result_is_attached() {
        let nlu = json!({"entities": [{"type": "Person", "text": "Landlord"}]});
        let (service, _) = service(FakeGenerator::absent(), Some(nlu.clone()));
        let report = service.analyze(LEASE).await;

        assert!(report.uses_watson_nlu);
        assert_eq!(report.entities.nlu, Some(nlu));
        assert_eq!(report.entities.patterns.money, vec!["$900"]);
    }

    #[tokio::test]
    async fn test_answer_prompt_carries_context_and_question() {
        let (service, generator) = service(FakeGenerator::replying("Not found in document."), None);
        let answer = service.answer(LEASE, "Who pays taxes?").await;
        assert_eq!(answer, "Not found in document.");

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts[0].0, ANSWER_PROMPT);
        assert!(prompts[0].1.starts_with("Contract:\n1. Rent"));
        assert!(prompts[0].1.ends_with("\n\nQuestion: Who pays taxes?"));
    }

    #[tokio::test]
    async fn test_keyword_answer_without_generator() {
        let (service, _) = service(FakeGenerator::absent(), None);
        assert_eq!(
            service.answer(LEASE, "Who owns parking garages?").await,
            ANSWER_NOT_FOUND
        );
    }
}
