use crate::infra::{jakarta_now, raw_score_text, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use utbk_sim::error::AppError;
use utbk_sim::simulation::report::AdmissionMatchView;
use utbk_sim::simulation::{evaluate, load_cutoffs, Subject};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum SimulationAction {
    #[default]
    Calculate,
    Reset,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EvaluateRequest {
    #[serde(default)]
    pub(crate) action: SimulationAction,
    /// Subject code -> raw form value. Unknown codes are ignored.
    #[serde(default)]
    pub(crate) scores: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EvaluateResponse {
    pub(crate) evaluated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) average: Option<f64>,
    pub(crate) matches: Vec<AdmissionMatchView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) warning: Option<String>,
    pub(crate) generated_at: DateTime<FixedOffset>,
}

pub(crate) fn app_router() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/simulation/evaluate",
            axum::routing::post(evaluate_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn evaluate_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, AppError> {
    // Reset discards the submission and re-renders the unevaluated state.
    if payload.action == SimulationAction::Reset {
        return Ok(Json(EvaluateResponse {
            evaluated: false,
            average: None,
            matches: Vec::new(),
            warning: None,
            generated_at: jakarta_now(),
        }));
    }

    let cutoffs = load_cutoffs(&state.dataset_path)?;

    let mut raw_scores: HashMap<Subject, String> = HashMap::new();
    for (code, value) in &payload.scores {
        let Some(subject) = Subject::from_code(code) else {
            continue;
        };
        if let Some(text) = raw_score_text(value) {
            raw_scores.insert(subject, text);
        }
    }

    let evaluation = evaluate(&raw_scores, &cutoffs)?;
    let view = evaluation.view();

    Ok(Json(EvaluateResponse {
        evaluated: true,
        average: Some(view.average),
        matches: view.matches,
        warning: view.warning,
        generated_at: jakarta_now(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::path::PathBuf;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use utbk_sim::simulation::report::EMPTY_DATASET_WARNING;

    const DATASET: &str = r#"[
        {"Universitas": "Universitas Indonesia", "JURUSAN": "Ilmu Komputer", "SKOR UTBK": "(695,30)"},
        {"Universitas": "Universitas Gadjah Mada", "JURUSAN": "Akuntansi", "SKOR UTBK": "(647,25)"},
        {"Universitas": "Universitas Sebelas Maret", "JURUSAN": "Manajemen", "SKOR UTBK": "(588,62)"}
    ]"#;

    fn fixture(name: &str, content: &str) -> PathBuf {
        let path =
            std::env::temp_dir().join(format!("utbk-api-{name}-{}.json", std::process::id()));
        std::fs::write(&path, content).expect("fixture written");
        path
    }

    fn test_state(dataset_path: PathBuf) -> AppState {
        let recorder = PrometheusBuilder::new().build_recorder();
        AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(recorder.handle()),
            dataset_path: Arc::new(dataset_path),
        }
    }

    fn full_scores(value: &str) -> HashMap<String, serde_json::Value> {
        Subject::ordered()
            .into_iter()
            .map(|subject| (subject.code().to_string(), json!(value)))
            .collect()
    }

    #[tokio::test]
    async fn evaluate_endpoint_returns_ranked_matches() {
        let state = test_state(fixture("ranked", DATASET));

        let request = EvaluateRequest {
            action: SimulationAction::Calculate,
            scores: full_scores("650"),
        };

        let Json(body) = evaluate_endpoint(Extension(state), Json(request))
            .await
            .expect("evaluation succeeds");

        assert!(body.evaluated);
        assert_eq!(body.average, Some(650.0));
        assert!(body.warning.is_none());

        let kept: Vec<f64> = body.matches.iter().map(|m| m.min_score).collect();
        assert_eq!(kept, vec![647.25, 588.62]);
        assert_eq!(body.matches[0].diff_label, "+ 2.75 Poin");
    }

    #[tokio::test]
    async fn reset_action_returns_the_unevaluated_view() {
        // Reset never touches the dataset; a bogus path must not matter.
        let state = test_state(PathBuf::from("never-read/skor.json"));

        let request = EvaluateRequest {
            action: SimulationAction::Reset,
            scores: full_scores("650"),
        };

        let Json(body) = evaluate_endpoint(Extension(state), Json(request))
            .await
            .expect("reset succeeds");

        assert!(!body.evaluated);
        assert!(body.average.is_none());
        assert!(body.matches.is_empty());
    }

    #[tokio::test]
    async fn empty_dataset_is_a_warning_not_a_failure() {
        let state = test_state(fixture("warning", "[]"));

        let request = EvaluateRequest {
            action: SimulationAction::Calculate,
            scores: full_scores("650"),
        };

        let Json(body) = evaluate_endpoint(Extension(state), Json(request))
            .await
            .expect("evaluation still succeeds");

        assert_eq!(body.average, Some(650.0));
        assert!(body.matches.is_empty());
        assert_eq!(body.warning.as_deref(), Some(EMPTY_DATASET_WARNING));
    }

    #[tokio::test]
    async fn incomplete_submissions_are_rejected() {
        let state = test_state(fixture("incomplete", DATASET));

        let mut scores = full_scores("650");
        scores.insert("PM".to_string(), json!("enam ratus"));
        let request = EvaluateRequest {
            action: SimulationAction::Calculate,
            scores,
        };

        let err = evaluate_endpoint(Extension(state), Json(request))
            .await
            .expect_err("incomplete sheet is rejected");
        assert!(matches!(err, AppError::Evaluation(_)));
    }

    mod routing {
        use super::*;
        use axum::body::{to_bytes, Body};
        use axum::http::Request;
        use serde_json::Value;
        use tower::ServiceExt;

        fn build_router(state: AppState) -> axum::Router {
            app_router().layer(Extension(state))
        }

        #[tokio::test]
        async fn health_endpoint_responds() {
            let router = build_router(test_state(PathBuf::from("unused.json")));

            let response = router
                .oneshot(
                    Request::builder()
                        .method("GET")
                        .uri("/health")
                        .body(Body::empty())
                        .expect("request"),
                )
                .await
                .expect("router dispatch");

            assert_eq!(response.status(), StatusCode::OK);
        }

        #[tokio::test]
        async fn post_evaluate_returns_json_payload() {
            let router = build_router(test_state(fixture("router-ok", DATASET)));

            let payload = json!({ "scores": full_scores("700") });
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/api/v1/simulation/evaluate")
                        .header("content-type", "application/json")
                        .body(Body::from(payload.to_string()))
                        .expect("request"),
                )
                .await
                .expect("router dispatch");

            assert_eq!(response.status(), StatusCode::OK);

            let body = to_bytes(response.into_body(), 1024 * 1024)
                .await
                .expect("body");
            let parsed: Value = serde_json::from_slice(&body).expect("json");
            assert_eq!(parsed.get("average"), Some(&json!(700.0)));
            assert_eq!(
                parsed
                    .get("matches")
                    .and_then(|matches| matches.as_array())
                    .map(|matches| matches.len()),
                Some(3)
            );
            assert!(parsed.get("generated_at").is_some());
        }

        #[tokio::test]
        async fn missing_dataset_surfaces_as_service_unavailable() {
            let router = build_router(test_state(PathBuf::from("no-such/skor.json")));

            let payload = json!({ "scores": full_scores("700") });
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/api/v1/simulation/evaluate")
                        .header("content-type", "application/json")
                        .body(Body::from(payload.to_string()))
                        .expect("request"),
                )
                .await
                .expect("router dispatch");

            assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

            let body = to_bytes(response.into_body(), 1024 * 1024)
                .await
                .expect("body");
            let parsed: Value = serde_json::from_slice(&body).expect("json");
            assert!(parsed
                .get("error")
                .and_then(|error| error.as_str())
                .is_some_and(|error| error.contains("was not found")));
        }

        #[tokio::test]
        async fn incomplete_submission_is_a_bad_request() {
            let router = build_router(test_state(fixture("router-bad", DATASET)));

            let payload = json!({ "scores": { "PU": "700" } });
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/api/v1/simulation/evaluate")
                        .header("content-type", "application/json")
                        .body(Body::from(payload.to_string()))
                        .expect("request"),
                )
                .await
                .expect("router dispatch");

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }
}
