mod request;
mod response;

pub use request::{Cursor, SearchRequest, MAX_PER_PAGE};
pub use response::{Pagination, SearchResponse};

use super::Source;
use crate::keys::CredentialSource;
use crate::model::{SourceResult, Statistics, StatsRecorder};
use crate::session::Transport;
use crate::Result;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, trace};

// region:        --- Constants

pub const BASE_URL: &str = "https://api.odin.io/v1";
const SEARCH_PATH: &str = "/domain/subdomain/search";
const API_KEY_HEADER: &str = "x-api-key";

// a send waits until the consumer has taken the previous result
const RESULTS_CHANNEL_CAPACITY: usize = 1;

// endregion:     --- Constants

// region:        --- Source info

pub struct Odin {
    api_keys: Vec<String>,
    base_url: String,
    credentials: Arc<dyn CredentialSource>,
    stats: Arc<StatsRecorder>,
}

impl Odin {
    pub fn new(credentials: Arc<dyn CredentialSource>) -> Self {
        Self {
            api_keys: Vec::new(),
            base_url: BASE_URL.to_string(),
            credentials,
            stats: Arc::new(StatsRecorder::default()),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

// endregion:     --- Source info

impl Source for Odin {
    fn name(&self) -> String {
        "odin".to_string()
    }

    fn description(&self) -> String {
        "Use the odin.io subdomain search API".to_string()
    }

    fn is_default(&self) -> bool {
        true
    }

    fn has_recursive_support(&self) -> bool {
        false
    }

    fn needs_key(&self) -> bool {
        true
    }

    fn add_api_keys(&mut self, keys: Vec<String>) {
        self.api_keys = keys;
    }

    fn statistics(&self) -> Statistics {
        self.stats.snapshot()
    }

    fn run(
        &self,
        cancel: CancellationToken,
        domain: &str,
        session: Arc<dyn Transport>,
    ) -> ReceiverStream<SourceResult> {
        let (results_tx, results_rx) = mpsc::channel(RESULTS_CHANNEL_CAPACITY);
        self.stats.reset();

        let fetcher = PageFetcher {
            name: self.name(),
            url: format!("{}{}", self.base_url, SEARCH_PATH),
            api_keys: self.api_keys.clone(),
            credentials: Arc::clone(&self.credentials),
            stats: Arc::clone(&self.stats),
            session,
            cancel,
            results_tx,
        };
        let domain = domain.to_string();

        tokio::spawn(async move {
            let start = Instant::now();
            fetcher.fetch_all(&domain).await;
            fetcher.stats.set_time_taken(start.elapsed());
            // dropping the fetcher closes the stream
        });

        ReceiverStream::new(results_rx)
    }
}

// region:        --- Pagination loop

struct PageFetcher {
    name: String,
    url: String,
    api_keys: Vec<String>,
    credentials: Arc<dyn CredentialSource>,
    stats: Arc<StatsRecorder>,
    session: Arc<dyn Transport>,
    cancel: CancellationToken,
    results_tx: mpsc::Sender<SourceResult>,
}

impl PageFetcher {
    #[instrument(name = "enumerate", level = "info", fields(source = %self.name), skip_all)]
    async fn fetch_all(&self, domain: &str) {
        let Some(api_key) = self.credentials.pick_random(&self.api_keys, &self.name) else {
            info!("No api key available, skipping");
            self.stats.mark_skipped();
            return;
        };
        let headers = HashMap::from([(API_KEY_HEADER.to_string(), api_key)]);

        let mut request = SearchRequest::new(domain);
        let mut page_number = 1;
        loop {
            if self.cancel.is_cancelled() {
                info!("Cancelled before page {}", page_number);
                return;
            }

            let page = match self.fetch_page(&headers, &request, page_number).await {
                Ok(page) => page,
                Err(err) => {
                    error!("Page {}: {}", page_number, err);
                    let result = SourceResult::error(&self.name, err);
                    match self.results_tx.send(result).await {
                        Ok(()) => self.stats.add_error(),
                        Err(_) => debug!("Receiver dropped, error not delivered"),
                    }
                    return;
                }
            };

            debug!("Page {}: {} subdomains", page_number, page.data.len());
            for subdomain in page.data {
                trace!("Collecting: {:?}", subdomain);
                let result = SourceResult::subdomain(&self.name, subdomain);
                if self.results_tx.send(result).await.is_err() {
                    debug!("Receiver dropped, stopping");
                    return;
                }
                self.stats.add_result();
            }

            match page.pagination.last {
                Some(last) => request.start = Some(last),
                None => break,
            }
            page_number += 1;
        }

        info!("{} collected", self.stats.snapshot().results);
    }

    #[instrument(name = "page", level = "debug", fields(page = page_number), skip_all)]
    async fn fetch_page(
        &self,
        headers: &HashMap<String, String>,
        request: &SearchRequest,
        page_number: usize,
    ) -> Result<SearchResponse> {
        let body = request.to_json()?;
        let res = self
            .session
            .post(&self.cancel, &self.url, "", headers, body)
            .await?;
        let body = res.bytes().await?;
        SearchResponse::from_slice(&body)
    }
}

// endregion:     --- Pagination loop
