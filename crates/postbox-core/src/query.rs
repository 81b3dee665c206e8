//! Query engine: substring search and single-field sorting over a post snapshot.
//!
//! Both operations take the collection by reference and return a new vector,
//! so the stored order is never touched.

use std::cmp::Reverse;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::domain::{Field, Post, Schema};
use crate::error::DomainError;

/// One optional substring query per searchable field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
}

impl SearchQuery {
    fn get(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Title => self.title.as_deref(),
            Field::Content => self.content.as_deref(),
            Field::Author => self.author.as_deref(),
            Field::Date => self.date.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }

    /// Normalized `(field, needle)` pairs the schema allows searching on.
    fn terms(&self, schema: &Schema) -> Vec<(Field, String)> {
        schema
            .searchable
            .iter()
            .filter_map(|&field| {
                let needle = self.get(field)?;
                let needle = match field {
                    Field::Date => needle.to_string(),
                    _ => needle.to_lowercase(),
                };
                Some((field, needle))
            })
            .collect()
    }
}

/// Posts matching any of the provided queries, in collection order.
///
/// Text fields match case-insensitively; the date matches as a literal
/// substring of its `YYYY-MM-DD` form. With no usable query nothing matches.
pub fn search(posts: &[Post], query: &SearchQuery, schema: &Schema) -> Vec<Post> {
    let terms = query.terms(schema);
    if terms.is_empty() {
        return Vec::new();
    }

    posts
        .iter()
        .filter(|post| {
            terms.iter().any(|(field, needle)| {
                post.text(*field).is_some_and(|value| match field {
                    Field::Date => value.contains(needle.as_str()),
                    _ => value.to_lowercase().contains(needle.as_str()),
                })
            })
        })
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}

/// A validated sort request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: Field,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Check `field` against the schema's sortable fields and parse `direction`.
    ///
    /// A missing direction means ascending.
    pub fn parse(
        schema: &Schema,
        field: &str,
        direction: Option<&str>,
    ) -> Result<Self, DomainError> {
        let direction = parse_direction(direction)?;
        let field = schema
            .sortable_field(field)
            .ok_or_else(|| DomainError::InvalidQueryParameter {
                parameter: "sort field",
                value: field.to_string(),
                expected: schema
                    .sortable
                    .iter()
                    .map(|f| f.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })?;

        Ok(Self { field, direction })
    }
}

/// Parse an optional sort direction, defaulting to ascending.
pub fn parse_direction(direction: Option<&str>) -> Result<SortDirection, DomainError> {
    match direction {
        None => Ok(SortDirection::default()),
        Some(raw) => raw
            .parse()
            .map_err(|_| DomainError::InvalidQueryParameter {
                parameter: "sort direction",
                value: raw.to_string(),
                expected: "asc, desc".to_string(),
            }),
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Text(Option<String>),
    Date(NaiveDate),
}

fn sort_key(post: &Post, field: Field) -> SortKey {
    match field {
        Field::Date => SortKey::Date(post.date),
        _ => SortKey::Text(post.text(field).map(|v| v.to_lowercase())),
    }
}

/// A sorted copy of `posts`. Ties keep their collection order in both directions.
pub fn sort(posts: &[Post], spec: SortSpec) -> Vec<Post> {
    let mut sorted = posts.to_vec();
    match spec.direction {
        SortDirection::Asc => sorted.sort_by_cached_key(|p| sort_key(p, spec.field)),
        SortDirection::Desc => sorted.sort_by_cached_key(|p| Reverse(sort_key(p, spec.field))),
    }
    sorted
}
