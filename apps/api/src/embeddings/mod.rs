/// Embeddings client, the single point of entry for the scoring collaborator.
///
/// Talks to an OpenAI-compatible `/v1/embeddings` endpoint. The endpoint URL
/// is configurable so the service can point at a local server instead; the
/// model is not.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// The embedding model used for match scoring.
/// Intentionally hardcoded: scores are only comparable within one model.
pub const MODEL: &str = "text-embedding-3-small";

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("API returned {got} embeddings, expected {expected}")]
    MissingEmbeddings { expected: usize, got: usize },
}

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingRow>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingRow {
    index: usize,
    embedding: Vec<f32>,
}

/// Client for the embeddings endpoint, built once at startup and shared.
#[derive(Clone)]
pub struct EmbeddingClient {
    client: Client,
    api_key: String,
    url: String,
}

impl EmbeddingClient {
    pub fn new(api_key: String, url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            url,
        }
    }

    /// Embeds a batch of texts in one request, preserving input order.
    pub async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let request_body = EmbeddingsRequest {
            model: MODEL,
            input: texts,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: EmbeddingsResponse = response.json().await?;
        if body.data.len() != texts.len() {
            return Err(EmbeddingError::MissingEmbeddings {
                expected: texts.len(),
                got: body.data.len(),
            });
        }

        // The API documents order-preservation but also tags rows with an
        // index; sort on it rather than trusting response order.
        let mut rows = body.data;
        rows.sort_by_key(|r| r.index);

        debug!("embedded {} texts with {}", rows.len(), MODEL);

        Ok(rows.into_iter().map(|r| r.embedding).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_rows_sort_by_index() {
        let body: EmbeddingsResponse = serde_json::from_str(
            r#"{"data": [
                {"index": 1, "embedding": [0.5, 0.5]},
                {"index": 0, "embedding": [1.0, 0.0]}
            ]}"#,
        )
        .unwrap();
        let mut rows = body.data;
        rows.sort_by_key(|r| r.index);
        assert_eq!(rows[0].embedding, vec![1.0, 0.0]);
        assert_eq!(rows[1].embedding, vec![0.5, 0.5]);
    }

    #[test]
    fn test_request_serializes_model_and_input() {
        let request = EmbeddingsRequest {
            model: MODEL,
            input: &["cv text", "job text"],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], MODEL);
        assert_eq!(json["input"].as_array().unwrap().len(), 2);
    }
}
