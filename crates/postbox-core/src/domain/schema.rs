use std::fmt;
use std::str::FromStr;

/// A named post field that can be validated, searched, or sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Content,
    Author,
    Date,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Content => "content",
            Field::Author => "author",
            Field::Date => "date",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Field::Title),
            "content" => Ok(Field::Content),
            "author" => Ok(Field::Author),
            "date" => Ok(Field::Date),
            _ => Err(()),
        }
    }
}

/// Field configuration of a deployment.
///
/// `required` doubles as the set of client-writable fields: anything outside it
/// is dropped from create and update requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub name: &'static str,
    pub required: Vec<Field>,
    pub searchable: Vec<Field>,
    pub sortable: Vec<Field>,
}

impl Schema {
    /// Title and content only.
    pub fn minimal() -> Self {
        Self {
            name: "minimal",
            required: vec![Field::Title, Field::Content],
            searchable: vec![Field::Title, Field::Content],
            sortable: vec![Field::Title, Field::Content],
        }
    }

    /// Title, content and author, with search and sort over the date as well.
    pub fn extended() -> Self {
        let all = vec![Field::Title, Field::Content, Field::Author, Field::Date];
        Self {
            name: "extended",
            required: vec![Field::Title, Field::Content, Field::Author],
            searchable: all.clone(),
            sortable: all,
        }
    }

    pub fn accepts(&self, field: Field) -> bool {
        self.required.contains(&field)
    }

    pub fn is_searchable(&self, field: Field) -> bool {
        self.searchable.contains(&field)
    }

    /// Resolve a sort field name, if this schema allows sorting on it.
    pub fn sortable_field(&self, name: &str) -> Option<Field> {
        name.parse()
            .ok()
            .filter(|field| self.sortable.contains(field))
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::extended()
    }
}

impl FromStr for Schema {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimal" => Ok(Self::minimal()),
            "extended" => Ok(Self::extended()),
            other => Err(format!(
                "unknown schema '{other}'; supported: minimal, extended"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_schema_does_not_sort_by_author() {
        let schema = Schema::minimal();
        assert_eq!(schema.sortable_field("title"), Some(Field::Title));
        assert_eq!(schema.sortable_field("author"), None);
        assert_eq!(schema.sortable_field("bogus"), None);
    }

    #[test]
    fn extended_schema_requires_author() {
        let schema = Schema::extended();
        assert!(schema.accepts(Field::Author));
        assert!(!schema.accepts(Field::Date));
        assert!(schema.is_searchable(Field::Date));
    }

    #[test]
    fn parses_schema_names() {
        assert_eq!("Minimal".parse::<Schema>().unwrap(), Schema::minimal());
        assert!("wide".parse::<Schema>().is_err());
    }
}
