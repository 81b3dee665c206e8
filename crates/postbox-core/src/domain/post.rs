use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Field;

/// Post entity - a single record of the managed collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub date: NaiveDate,
}

impl Post {
    /// Build a post from already validated fields.
    pub fn new(id: u64, fields: PostFields, date: NaiveDate) -> Self {
        Self {
            id,
            title: fields.title.unwrap_or_default(),
            content: fields.content.unwrap_or_default(),
            author: fields.author,
            date,
        }
    }

    /// Overwrite the fields present in `changes` and stamp the post with `date`.
    pub fn apply(&mut self, changes: PostFields, date: NaiveDate) {
        let changes = changes.present_only();
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(author) = changes.author {
            self.author = Some(author);
        }
        self.date = date;
    }

    /// Text value of `field`, as used by search and sort.
    ///
    /// `Date` renders as `YYYY-MM-DD`.
    pub fn text(&self, field: Field) -> Option<String> {
        match field {
            Field::Title => Some(self.title.clone()),
            Field::Content => Some(self.content.clone()),
            Field::Author => self.author.clone(),
            Field::Date => Some(self.date.format("%Y-%m-%d").to_string()),
        }
    }
}

/// Client-supplied fields of a create or update request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFields {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
}

impl PostFields {
    /// The value of `field` if it is present and non-empty.
    pub fn get(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Title => self.title.as_deref(),
            Field::Content => self.content.as_deref(),
            Field::Author => self.author.as_deref(),
            Field::Date => None,
        };
        value.filter(|v| !v.is_empty())
    }

    /// Drop empty strings so they read the same as absent keys.
    pub fn present_only(self) -> Self {
        fn keep(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }
        Self {
            title: keep(self.title),
            content: keep(self.content),
            author: keep(self.author),
        }
    }
}

/// Next identifier for `posts`: one past the highest id, or 1 when empty.
///
/// `None` once the highest id is `u64::MAX`.
pub fn next_id(posts: &[Post]) -> Option<u64> {
    match posts.iter().map(|p| p.id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}
