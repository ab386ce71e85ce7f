use crate::{Error, Result};
use serde::Serialize;

/// Opaque position marker handed out by the API and echoed back verbatim.
pub type Cursor = Vec<serde_json::Value>;

pub const MAX_PER_PAGE: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub domain: String,
    pub limit: usize,
    pub start: Option<Cursor>,
}

impl SearchRequest {
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            limit: MAX_PER_PAGE,
            start: None,
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(Error::Serialization)
    }
}
