use super::domain::{AdmissionMatch, CutoffRecord, Evaluation, EvaluationError, Subject};
use std::collections::HashMap;

/// The ranked result is capped at the ten highest cutoffs.
pub const MAX_MATCHES: usize = 10;

const SCORE_CEILING: f64 = 1000.0;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A raw form value counts only if it parses as a finite number; anything
/// else means the field was not submitted, never zero. Valid values are
/// clamped to [0, 1000] and truncated toward zero.
fn parse_raw_score(raw: &str) -> Option<u32> {
    let value = raw.trim().parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value.clamp(0.0, SCORE_CEILING).trunc() as u32)
}

/// Runs one simulation over a submitted score sheet. Pure: the outcome is a
/// function of the raw scores and the cutoff list alone.
pub fn evaluate(
    raw_scores: &HashMap<Subject, String>,
    cutoffs: &[CutoffRecord],
) -> Result<Evaluation, EvaluationError> {
    let subjects = Subject::ordered();

    let mut total: u32 = 0;
    let mut submitted = 0usize;
    for subject in subjects {
        let Some(score) = raw_scores.get(&subject).and_then(|raw| parse_raw_score(raw)) else {
            continue;
        };
        total += score;
        submitted += 1;
    }

    if submitted != subjects.len() {
        return Err(EvaluationError::IncompleteInput {
            required: subjects.len(),
        });
    }

    let average = round2(f64::from(total) / subjects.len() as f64);

    let mut matches: Vec<AdmissionMatch> = cutoffs
        .iter()
        .filter_map(|cutoff| {
            let diff = average - cutoff.min_score;
            if diff >= 0.0 {
                Some(AdmissionMatch {
                    university: cutoff.university.clone(),
                    major: cutoff.major.clone(),
                    min_score: cutoff.min_score,
                    diff: round2(diff),
                })
            } else {
                None
            }
        })
        .collect();

    // Stable sort: equal cutoffs keep the dataset order.
    matches.sort_by(|a, b| b.min_score.total_cmp(&a.min_score));
    matches.truncate(MAX_MATCHES);

    Ok(Evaluation {
        average,
        matches,
        dataset_empty: cutoffs.is_empty(),
    })
}
