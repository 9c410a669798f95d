use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use tokio::net::{lookup_host, TcpListener};
use tracing::{debug, info};

use crate::classifiers::NaiveBayes;
use crate::generic_types::{IdiomaOutput, PalabraInput};

// -----------------------------------------------------------------------------
// Identification endpoint: one text in, one language label out.
// -----------------------------------------------------------------------------

async fn identify(
    State(model): State<Arc<NaiveBayes>>,
    Json(input): Json<PalabraInput>,
) -> Json<IdiomaOutput> {
    let idioma = model.predict(&input.palabra).to_string();
    debug!("{:?} -> {}", input.palabra, idioma);
    Json(IdiomaOutput { idioma })
}

pub fn router(model: Arc<NaiveBayes>) -> Router {
    Router::new()
        .route("/identificar", post(identify))
        .with_state(model)
}

pub struct IdentifyServer {
    address: String,
    model: Arc<NaiveBayes>,
}

impl IdentifyServer {
    pub fn new(addr: &str, model: Arc<NaiveBayes>) -> Self {
        Self {
            address: addr.to_string(),
            model,
        }
    }

    /// Start listening and serve requests until the process stops
    pub async fn run(&self) -> Result<()> {
        info!("Resolving address: {}", self.address);
        let mut addrs = lookup_host(&self.address)
            .await
            .context("lookup_host failed")?;

        let addr = addrs.next().ok_or_else(|| anyhow::anyhow!("No addr found for host"))?;
        let listener = TcpListener::bind(&addr).await.context("bind failed")?;
        info!("Listening on {}", addr);

        axum::serve(listener, router(self.model.clone()))
            .await
            .context("server failed")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::vocabulary::DEFAULT_CAPACITY;
    use crate::classifiers::ClassTokens;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn model() -> Arc<NaiveBayes> {
        let train = ClassTokens::from_pairs(vec![
            ("French", vec!["le".to_string(), "soleil".to_string()]),
            ("English", vec!["the".to_string(), "sun".to_string()]),
            ("Spanish", vec!["el".to_string(), "sol".to_string()]),
        ])
        .unwrap();
        Arc::new(NaiveBayes::train(&train, DEFAULT_CAPACITY).unwrap())
    }

    #[tokio::test]
    async fn test_identify_returns_label() {
        let request = PalabraInput {
            palabra: "El sol".to_string(),
        };
        let Json(response) = identify(State(model()), Json(request)).await;
        assert_eq!(
            response,
            IdiomaOutput {
                idioma: "Spanish".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_identify_empty_text_uses_tie_order() {
        let request = PalabraInput {
            palabra: String::new(),
        };
        let Json(response) = identify(State(model()), Json(request)).await;
        assert_eq!(response.idioma, "French");
    }

    #[tokio::test]
    async fn test_router_serves_identificar() {
        let request = Request::builder()
            .method("POST")
            .uri("/identificar")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"palabra": "el sol"}"#))
            .unwrap();

        let response = router(model()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({"idioma": "Spanish"}));
    }

    #[tokio::test]
    async fn test_router_rejects_other_paths() {
        let request = Request::builder()
            .method("POST")
            .uri("/identify")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"palabra": "el sol"}"#))
            .unwrap();

        let response = router(model()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_response_shape() {
        let body = serde_json::to_value(IdiomaOutput {
            idioma: "English".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"idioma": "English"}));

        let input: PalabraInput = serde_json::from_str(r#"{"palabra": "hello"}"#).unwrap();
        assert_eq!(input.palabra, "hello");
    }
}
