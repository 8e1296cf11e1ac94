use chrono::NaiveDateTime;

/// Regex-derived entities, one de-duplicated list per category.
///
/// Field order is the serialization order: dates, money, durations.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EntityBundle {
    pub dates: Vec<String>,
    pub money: Vec<String>,
    pub durations: Vec<String>,
}

impl EntityBundle {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() && self.money.is_empty() && self.durations.is_empty()
    }
}

/// Entities reported for an analyzed document.
///
/// The pattern bundle is always present; `nlu` carries the raw result of the
/// optional entity enrichment service when it produced one.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EntityReport {
    #[serde(flatten)]
    pub patterns: EntityBundle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nlu: Option<serde_json::Value>,
}

/// Upcoming deadline or renewal notice found in a document
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Alert {
    /// A date that falls inside the alert window
    Deadline {
        when: NaiveDateTime,
        excerpt: String,
    },
    /// A duration mentioned near renewal/term/expiry vocabulary
    RenewalWindow { duration: String, context: String },
}

/// Contract category assigned by the keyword classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ContractType {
    #[serde(rename = "Lease Agreement")]
    Lease,
    #[serde(rename = "NDA")]
    Nda,
    #[serde(rename = "Employment Contract")]
    Employment,
    #[serde(rename = "Service Agreement")]
    Service,
    #[serde(rename = "General Contract")]
    General,
}

impl ContractType {
    pub fn label(self) -> &'static str {
        match self {
            ContractType::Lease => "Lease Agreement",
            ContractType::Nda => "NDA",
            ContractType::Employment => "Employment Contract",
            ContractType::Service => "Service Agreement",
            ContractType::General => "General Contract",
        }
    }
}

impl std::fmt::Display for ContractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClauseOverlap {
    pub clause_a_index: usize,
    /// `None` when no clause of B shares a single token
    pub best_b_index: Option<usize>,
    pub similarity: f64, // Jaccard, rounded to 3 decimals
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ComparisonResult {
    pub lang_a: String,
    pub lang_b: String,
    pub cosine_similarity: f64,
    pub diff: String,
    pub overlaps: Vec<ClauseOverlap>,
}

/// Full result of the analysis endpoint
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnalysisReport {
    pub language: String,
    pub contract_type: ContractType,
    pub clauses: Vec<String>,
    pub simplified_examples: Vec<String>,
    pub summary: String,
    pub entities: EntityReport,
    pub risks: Vec<String>,
    pub alerts: Vec<Alert>,
    pub uses_granite: bool,
    pub uses_watson_nlu: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnswerResponse {
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_alert_serializes_with_kebab_case_tag() {
        let when = NaiveDate::from_ymd_opt(2024, 2, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let deadline = Alert::Deadline {
            when,
            excerpt: "2024-02-15".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&deadline).unwrap(),
            json!({"type": "deadline", "when": "2024-02-15T00:00:00", "excerpt": "2024-02-15"})
        );

        let renewal = Alert::RenewalWindow {
            duration: "12 months".to_string(),
            context: "renews for 12 months".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&renewal).unwrap()["type"],
            "renewal-window"
        );
    }

    #[test]
    fn test_contract_type_uses_display_labels() {
        assert_eq!(
            serde_json::to_value(ContractType::Lease).unwrap(),
            json!("Lease Agreement")
        );
        assert_eq!(ContractType::Nda.to_string(), "NDA");
    }

    #[test]
    fn test_entity_report_flattens_bundle() {
        let report = EntityReport {
            patterns: EntityBundle {
                dates: vec!["2024-01-01".to_string()],
                money: vec![],
                durations: vec![],
            },
            nlu: None,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["dates"], json!(["2024-01-01"]));
        assert!(value.get("nlu").is_none());
    }
}
