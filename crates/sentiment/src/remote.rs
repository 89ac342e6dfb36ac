//! gRPC client for the sentiment inference service.
//!
//! The pretrained transformer model runs in a separate Python service; this
//! client sends review batches to it over gRPC. It handles:
//! - Lazy connection management (a down service only fails at call time)
//! - Converting Rust types to protobuf messages
//! - Mapping gRPC status codes onto `SentimentError`

use crate::classifier::SentimentClassifier;
use crate::error::SentimentError;
use crate::label::Classification;
use async_trait::async_trait;
use std::time::Duration;
use tonic::transport::{Channel, Endpoint};
use tonic::{Code, Status};
use tracing::{debug, error, info};

// Include the generated protobuf code
pub mod proto {
    tonic::include_proto!("sentiment");
}

use proto::{sentiment_scorer_client::SentimentScorerClient, ClassifyRequest};

/// Model served by the inference service unless configured otherwise
pub const DEFAULT_MODEL: &str = "cardiffnlp/twitter-roberta-base-sentiment";

/// Where the inference service listens by default
pub const DEFAULT_SERVICE_ADDR: &str = "http://localhost:50051";

/// Default connect and per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Classifier backed by the remote inference service.
#[derive(Clone)]
pub struct RemoteClassifier {
    client: SentimentScorerClient<Channel>,
    service_addr: String,
    model: String,
}

impl RemoteClassifier {
    /// Prepare a client for the service at `addr` (e.g. "http://localhost:50051").
    ///
    /// No connection is made yet, so this succeeds even when the service is
    /// down; only a malformed address is rejected. Must be called from
    /// within a tokio runtime.
    pub fn connect_lazy(
        addr: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SentimentError> {
        let addr = addr.into();
        let model = model.into();
        info!("Using sentiment service at {} (model {})", addr, model);

        let endpoint = Endpoint::from_shared(addr.clone())
            .map_err(|e| {
                SentimentError::Unavailable(format!("invalid service address {}: {}", addr, e))
            })?
            .connect_timeout(timeout)
            .timeout(timeout);

        Ok(Self {
            client: SentimentScorerClient::new(endpoint.connect_lazy()),
            service_addr: addr,
            model,
        })
    }

    /// Get the address of the service this client talks to.
    pub fn service_address(&self) -> &str {
        &self.service_addr
    }
}

#[async_trait]
impl SentimentClassifier for RemoteClassifier {
    fn name(&self) -> &str {
        "remote"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn classify(&self, texts: &[String]) -> Result<Vec<Classification>, SentimentError> {
        debug!("Sending {} texts to {}", texts.len(), self.service_addr);

        let request = tonic::Request::new(ClassifyRequest {
            texts: texts.to_vec(),
            model: self.model.clone(),
        });

        // Channel clones share one connection
        let mut client = self.client.clone();
        let response = client.classify(request).await.map_err(|status| {
            error!("gRPC error while classifying reviews: {}", status);
            status_to_error(status)
        })?;

        Ok(response
            .into_inner()
            .predictions
            .into_iter()
            .map(|p| Classification::new(p.label, p.score))
            .collect())
    }
}

/// Transport-level failures mean "unavailable"; anything else is a failed call
fn status_to_error(status: Status) -> SentimentError {
    match status.code() {
        Code::Unavailable | Code::DeadlineExceeded | Code::Unknown | Code::Cancelled => {
            SentimentError::Unavailable(status.message().to_string())
        }
        code => SentimentError::ClassificationFailed(format!("{:?}: {}", code, status.message())),
    }
}
