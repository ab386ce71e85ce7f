use super::request::Cursor;
use crate::{Error, Result};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub data: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub pagination: Pagination,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub start: Option<Cursor>,
    /// `None` once the last page has been served.
    pub last: Option<Cursor>,
    #[serde(deserialize_with = "null_as_default")]
    pub limit: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub total: i64,
}

// `null` reads as the zero value, like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> core::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl SearchResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(Error::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::SearchResponse;
    use crate::Error;
    use serde_json::json;

    #[test]
    fn decodes_intermediate_page() {
        let body = br#"{
            "success": true,
            "data": ["a.example.com", "b.example.com"],
            "pagination": {"start": null, "last": ["cursor1"], "limit": 50, "total": 3}
        }"#;

        let page = SearchResponse::from_slice(body).unwrap();
        assert!(page.success);
        assert_eq!(vec!["a.example.com", "b.example.com"], page.data);
        assert_eq!(Some(vec![json!("cursor1")]), page.pagination.last);
        assert_eq!(None, page.pagination.start);
        assert_eq!(3, page.pagination.total);
    }

    #[test]
    fn null_or_missing_last_ends_pagination() {
        let page = SearchResponse::from_slice(br#"{"data": [], "pagination": {"last": null}}"#)
            .unwrap();
        assert!(page.pagination.last.is_none());

        let page = SearchResponse::from_slice(br#"{"success": false}"#).unwrap();
        assert!(page.data.is_empty());
        assert!(page.pagination.last.is_none());
    }

    #[test]
    fn null_data_is_an_empty_page() {
        let body = br#"{
            "success": true,
            "data": null,
            "pagination": {"start": null, "last": null, "limit": 50, "total": 0}
        }"#;

        let page = SearchResponse::from_slice(body).unwrap();
        assert!(page.data.is_empty());
        assert!(page.pagination.last.is_none());
    }

    #[test]
    fn null_counters_read_as_zero() {
        let body = br#"{
            "success": null,
            "data": ["a.example.com"],
            "pagination": {"last": ["cursor1"], "limit": null, "total": null}
        }"#;

        let page = SearchResponse::from_slice(body).unwrap();
        assert!(!page.success);
        assert_eq!(vec!["a.example.com"], page.data);
        assert_eq!(0, page.pagination.limit);
        assert_eq!(0, page.pagination.total);
        assert_eq!(Some(vec![json!("cursor1")]), page.pagination.last);

        let page = SearchResponse::from_slice(br#"{"pagination": null}"#).unwrap();
        assert!(page.pagination.last.is_none());
    }

    #[test]
    fn empty_cursor_is_not_the_end() {
        let page = SearchResponse::from_slice(br#"{"pagination": {"last": []}}"#).unwrap();
        assert_eq!(Some(Vec::new()), page.pagination.last);
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        assert!(matches!(
            SearchResponse::from_slice(b"<html>oops</html>"),
            Err(Error::Decode(_))
        ));
        assert!(matches!(
            SearchResponse::from_slice(br#"{"data": "not-a-list"}"#),
            Err(Error::Decode(_))
        ));
    }
}
