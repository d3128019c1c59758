use chrono::{DateTime, FixedOffset, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) dataset_path: Arc<PathBuf>,
}

// Results carry WIB (UTC+7) timestamps.
const JAKARTA_UTC_OFFSET_SECS: i32 = 7 * 3600;

pub(crate) fn jakarta_now() -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(JAKARTA_UTC_OFFSET_SECS).expect("UTC+7 is a valid offset");
    Utc::now().with_timezone(&offset)
}

/// Form fields arrive as strings from browser clients and as bare numbers
/// from API clients; both coerce to the evaluator's raw text form. Other
/// JSON shapes count as not submitted.
pub(crate) fn raw_score_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(text) => Some(text.clone()),
        serde_json::Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
