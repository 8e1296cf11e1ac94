//! API handlers for the ClauseWise server
//!
//! Documents arrive as multipart uploads and are decoded leniently: invalid
//! UTF-8 sequences are dropped rather than rejected.

use std::collections::HashMap;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use shared_types::{AnalysisReport, AnswerResponse, ComparisonResult};
use tracing::{debug, info};

use crate::error::ServerError;
use crate::AppState;

/// Decode bytes as UTF-8, skipping invalid sequences
pub fn decode_lenient(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// Multipart fields by name, later duplicates replacing earlier ones
struct FormFields(HashMap<String, Vec<u8>>);

impl FormFields {
    async fn read(mut multipart: Multipart) -> Result<Self, ServerError> {
        let mut fields = HashMap::new();
        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let bytes = field.bytes().await?;
            debug!("Received field {:?} ({} bytes)", name, bytes.len());
            fields.insert(name, bytes.to_vec());
        }
        Ok(Self(fields))
    }

    fn text(&self, name: &'static str) -> Result<String, ServerError> {
        self.0
            .get(name)
            .map(|bytes| decode_lenient(bytes))
            .ok_or(ServerError::MissingField(name))
    }
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub uses_granite: bool,
    pub uses_watson_nlu: bool,
}

/// Handler: GET /health
pub async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "clausewise-server",
        version: env!("CARGO_PKG_VERSION"),
        uses_granite: state.service.uses_granite(),
        uses_watson_nlu: state.service.uses_watson_nlu(),
    })
}

/// Handler: POST /analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisReport>, ServerError> {
    let form = FormFields::read(multipart).await?;
    let text = form.text("file")?;

    let report = state.service.analyze(&text).await;
    info!(
        "Analyzed {} document: {} clauses, {} risks, {} alerts",
        report.contract_type,
        report.clauses.len(),
        report.risks.len(),
        report.alerts.len()
    );
    Ok(Json(report))
}

/// Handler: POST /ask
pub async fn handle_ask(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnswerResponse>, ServerError> {
    let form = FormFields::read(multipart).await?;
    let text = form.text("file")?;
    let question = form.text("question")?;

    let answer = state.service.answer(&text, &question).await;
    Ok(Json(AnswerResponse { answer }))
}

/// Handler: POST /compare
pub async fn handle_compare(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ComparisonResult>, ServerError> {
    let form = FormFields::read(multipart).await?;
    let text_a = form.text("file_a")?;
    let text_b = form.text("file_b")?;

    // The LCS table is quadratic in line count; keep it off the async workers.
    let service = state.service.clone();
    let result = tokio::task::spawn_blocking(move || service.compare(&text_a, &text_b))
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?;

    info!(
        "Compared documents: cosine {}, {} clause overlaps",
        result.cosine_similarity,
        result.overlaps.len()
    );
    Ok(Json(result))
}
