use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use rhs_core::{Backend, BackendError, Deadline, Hash, Node};
use thiserror::Error;

use crate::wire::{NodeResponse, StatusResponse};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid base url: {0}")]
    Url(#[from] url::ParseError),
}

/// Talks to a reverse hash service over HTTP. Node lookups are always
/// `GET {base}/node/{hex}`; saves are `POST {base}/node` with a JSON array
/// body.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    base_url: String,
    http: Client,
    default_timeout: Duration,
}

impl HttpBackend {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, HttpError> {
        Self::builder(base_url).build()
    }

    pub fn builder(base_url: impl AsRef<str>) -> HttpBackendBuilder {
        HttpBackendBuilder::new(base_url)
    }

    fn node_url(&self, hash: Option<Hash>) -> String {
        match hash {
            Some(hash) => format!("{}/node/{}", self.base_url, hash.hex()),
            None => format!("{}/node", self.base_url),
        }
    }

    fn timeout_for(&self, deadline: &Deadline) -> Duration {
        deadline.timeout.unwrap_or(self.default_timeout)
    }
}

pub struct HttpBackendBuilder {
    base_url: String,
    timeout: Duration,
}

impl HttpBackendBuilder {
    fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<HttpBackend, HttpError> {
        url::Url::parse(&self.base_url)?;
        Ok(HttpBackend { base_url: self.base_url, http: Client::new(), default_timeout: self.timeout })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn get_node(&self, deadline: &Deadline, hash: Hash) -> Result<Node, BackendError> {
        if deadline.is_cancelled() {
            return Err(BackendError::Cancelled);
        }

        let request = self
            .http
            .get(self.node_url(Some(hash)))
            .timeout(self.timeout_for(deadline));

        let response = request_with_cancellation(request, deadline).await?;

        match response.status() {
            StatusCode::OK => {
                let body: NodeResponse =
                    response.json().await.map_err(|e| BackendError::Protocol(e.to_string()))?;
                Ok(body.node)
            }
            StatusCode::NOT_FOUND => {
                let body: StatusResponse =
                    response.json().await.map_err(|e| BackendError::Protocol(e.to_string()))?;
                if body.status == "not found" {
                    debug!("node {} not found at {}", hash.hex(), self.base_url);
                    Err(BackendError::NotFound)
                } else {
                    Err(BackendError::Protocol(format!(
                        "unexpected 404 body status: {}",
                        body.status
                    )))
                }
            }
            other => Err(BackendError::Protocol(format!("unexpected response: {other}"))),
        }
    }

    async fn save_nodes(&self, deadline: &Deadline, nodes: &[Node]) -> Result<(), BackendError> {
        if deadline.is_cancelled() {
            return Err(BackendError::Cancelled);
        }

        debug!("saving {} node(s) to {}", nodes.len(), self.base_url);
        let request = self
            .http
            .post(self.node_url(None))
            .json(nodes)
            .timeout(self.timeout_for(deadline));

        let response = request_with_cancellation(request, deadline).await?;

        if response.status() != StatusCode::OK {
            return Err(BackendError::Protocol(format!(
                "unexpected response: {}",
                response.status()
            )));
        }

        let body: StatusResponse =
            response.json().await.map_err(|e| BackendError::Protocol(e.to_string()))?;
        if body.status == "OK" {
            Ok(())
        } else {
            Err(BackendError::Protocol(format!("unexpected save response: {}", body.status)))
        }
    }
}

async fn request_with_cancellation(
    request: reqwest::RequestBuilder,
    deadline: &Deadline,
) -> Result<reqwest::Response, BackendError> {
    match &deadline.cancellation {
        Some(token) => tokio::select! {
            biased;
            () = token.cancelled() => Err(BackendError::Cancelled),
            result = request.send() => result.map_err(|e| BackendError::Transport(e.to_string())),
        },
        None => request.send().await.map_err(|e| BackendError::Transport(e.to_string())),
    }
}
