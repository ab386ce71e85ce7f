use crate::config::SessionConfig;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, COOKIE};
use reqwest::{Client, Response};
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

/// HTTP side of a source: sends requests and disposes of responses.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(
        &self,
        cancel: &CancellationToken,
        url: &str,
        cookies: &str,
        headers: &HashMap<String, String>,
        body: Vec<u8>,
    ) -> Result<Response>;

    /// Reads what is left of the body so the connection goes back to the pool.
    async fn discard_response(&self, response: Response);
}

#[derive(Debug, Clone)]
pub struct Session {
    http_client: Client,
}

impl Session {
    pub fn new(config: &SessionConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        debug!("HTTP Client created: {:?}", http_client);
        Ok(Self { http_client })
    }
}

#[async_trait]
impl Transport for Session {
    #[instrument(name = "HTTP_request", level = "info", skip_all, fields(url = url))]
    async fn post(
        &self,
        _cancel: &CancellationToken,
        url: &str,
        cookies: &str,
        headers: &HashMap<String, String>,
        body: Vec<u8>,
    ) -> Result<Response> {
        let mut header_map = HeaderMap::new();
        header_map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if !cookies.is_empty() {
            if let Ok(value) = HeaderValue::from_str(cookies) {
                header_map.insert(COOKIE, value);
            }
        }
        for (name, value) in headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    header_map.insert(name, value);
                }
                _ => warn!("Skipping invalid header: {}", name),
            }
        }

        info!("Sending request");
        let res = match self
            .http_client
            .post(url)
            .headers(header_map)
            .body(body)
            .send()
            .await
        {
            Ok(res) => res,
            Err(err) => {
                error!("Reason: {}", err);
                return Err(Error::Reqwest(err));
            }
        };

        info!("Receive with status: {}", res.status());
        if !res.status().is_success() {
            let status = res.status().as_u16();
            self.discard_response(res).await;
            return Err(Error::UnexpectedStatus {
                url: url.to_string(),
                status,
            });
        }

        Ok(res)
    }

    async fn discard_response(&self, response: Response) {
        if let Err(err) = response.bytes().await {
            debug!("Discarding response body failed: {}", err);
        }
    }
}
