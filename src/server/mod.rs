//! HTTP serving facade.
//!
//! A minimal axum application with two routes:
//!
//! - `POST /predict` — classify one text, `{text}` in, `{label, confidence}`
//!   out; 400 for empty input, 503 while no model is loaded.
//! - `GET /health` — readiness probe reporting whether artifacts are loaded.
//!
//! The predictor is loaded once at startup and shared read-only across
//! requests; it is never mutated after load, so no locking is needed.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{AffError, Result};
use crate::pipeline::{PipelineConfig, Predictor};

/// Shared application state: the loaded model, if any.
pub struct ServerState {
    predictor: Option<Predictor>,
}

impl ServerState {
    /// Try to load the model; a missing model is not fatal, the server then
    /// answers 503 until artifacts appear and the process is restarted.
    pub fn load(config: &PipelineConfig) -> Result<Self> {
        match Predictor::load(config) {
            Ok(predictor) => Ok(ServerState {
                predictor: Some(predictor),
            }),
            Err(AffError::NotTrained(msg)) => {
                warn!(%msg, "starting without a model");
                Ok(ServerState { predictor: None })
            }
            Err(e) => Err(e),
        }
    }

    /// Build state around an already-loaded predictor.
    pub fn with_predictor(predictor: Predictor) -> Self {
        ServerState {
            predictor: Some(predictor),
        }
    }

    /// Whether a model is available for predictions.
    pub fn model_loaded(&self) -> bool {
        self.predictor.is_some()
    }
}

/// Prediction request body.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub text: String,
}

/// Prediction response body.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub label: String,
    pub confidence: f64,
}

/// Health response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

type ApiResult<T> = std::result::Result<Json<T>, (StatusCode, Json<ApiError>)>;

fn api_error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ApiError>) {
    (
        status,
        Json(ApiError {
            error: message.into(),
        }),
    )
}

/// `POST /predict`
pub async fn predict(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<PredictRequest>,
) -> ApiResult<PredictResponse> {
    if request.text.trim().is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Text must not be empty.",
        ));
    }

    let Some(predictor) = state.predictor.as_ref() else {
        return Err(api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "Model not loaded. Run the train command first.",
        ));
    };

    let prediction = predictor
        .predict(&request.text)
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(PredictResponse {
        label: prediction.label.as_str().to_string(),
        confidence: prediction.confidence,
    }))
}

/// `GET /health`
pub async fn health(State(state): State<Arc<ServerState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model_loaded: state.model_loaded(),
    })
}

/// Build the application router.
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .route("/health", get(health))
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(addr: &str, state: Arc<ServerState>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, model_loaded = state.model_loaded(), "serving predictions");
    axum::serve(listener, router(state))
        .await
        .map_err(|e| AffError::other(format!("server error: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::MultinomialNb;
    use crate::feature::Vocabulary;

    fn loaded_state() -> Arc<ServerState> {
        let vocabulary =
            Vocabulary::from_terms(vec!["urgent".to_string(), "meeting".to_string()]);
        let vectors = vec![vec![3, 0], vec![2, 0], vec![0, 3], vec![0, 2]];
        let model = MultinomialNb::fit(&vectors, &[1, 1, 0, 0]).unwrap();
        let predictor = Predictor::from_parts(vocabulary, model).unwrap();
        Arc::new(ServerState::with_predictor(predictor))
    }

    fn empty_state() -> Arc<ServerState> {
        Arc::new(ServerState { predictor: None })
    }

    #[tokio::test]
    async fn test_predict_returns_label_and_confidence() {
        let Json(response) = predict(
            State(loaded_state()),
            Json(PredictRequest {
                text: "URGENT urgent reply".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.label, "FRAUD");
        assert!(response.confidence > 0.5);
    }

    #[tokio::test]
    async fn test_empty_text_rejected_before_pipeline() {
        let (status, Json(body)) = predict(
            State(loaded_state()),
            Json(PredictRequest {
                text: "   \n ".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.contains("empty"));
    }

    #[tokio::test]
    async fn test_unloaded_model_is_service_unavailable() {
        let (status, _) = predict(
            State(empty_state()),
            Json(PredictRequest {
                text: "anything".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_health_reports_model_state() {
        let Json(response) = health(State(loaded_state())).await;
        assert_eq!(response.status, "ok");
        assert!(response.model_loaded);

        let Json(response) = health(State(empty_state())).await;
        assert!(!response.model_loaded);
    }
}
