//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Body of a create or update request.
///
/// Every field is optional on the wire; `null` reads the same as an absent key.
/// Unknown keys, including `date` and `id`, are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

/// Query string of `GET /api/posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListParams {
    pub sort: Option<String>,
    pub direction: Option<String>,
}

/// Query string of `GET /api/posts/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
}

/// A post as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: u64,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// `YYYY-MM-DD`.
    pub date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_treats_null_as_absent() {
        let payload: PostPayload =
            serde_json::from_str(r#"{"title": null, "content": "x", "date": "1999-01-01"}"#)
                .unwrap();
        assert_eq!(payload.title, None);
        assert_eq!(payload.content.as_deref(), Some("x"));
    }

    #[test]
    fn response_omits_missing_author() {
        let json = serde_json::to_value(PostResponse {
            id: 1,
            title: "t".into(),
            content: "c".into(),
            author: None,
            date: "2024-01-01".into(),
        })
        .unwrap();
        assert!(json.get("author").is_none());
    }
}
