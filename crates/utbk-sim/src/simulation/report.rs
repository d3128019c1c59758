use super::domain::{AdmissionMatch, Evaluation};
use serde::Serialize;

pub const EMPTY_DATASET_WARNING: &str =
    "minimum score dataset is empty; no admission comparison is available";

/// Human-readable signed margin, e.g. "+ 12.50 Poin" or "- 3.00 Poin".
/// The sign follows `diff >= 0`, matching the admission rule.
pub fn format_difference(diff: f64) -> String {
    let sign = if diff >= 0.0 { '+' } else { '-' };
    format!("{sign} {:.2} Poin", diff.abs())
}

#[derive(Debug, Clone, Serialize)]
pub struct AdmissionMatchView {
    pub university: String,
    pub major: String,
    pub min_score: f64,
    pub diff: f64,
    pub diff_label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationView {
    pub average: f64,
    pub matches: Vec<AdmissionMatchView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl AdmissionMatch {
    pub fn to_view(&self) -> AdmissionMatchView {
        AdmissionMatchView {
            university: self.university.clone(),
            major: self.major.clone(),
            min_score: self.min_score,
            diff: self.diff,
            diff_label: format_difference(self.diff),
        }
    }
}

impl Evaluation {
    pub fn view(&self) -> EvaluationView {
        EvaluationView {
            average: self.average,
            matches: self.matches.iter().map(AdmissionMatch::to_view).collect(),
            warning: self
                .dataset_empty
                .then(|| EMPTY_DATASET_WARNING.to_string()),
        }
    }
}
