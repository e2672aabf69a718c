//! Frontmatter types and data structures.

use std::borrow::Cow;

use chrono::NaiveDateTime;
use serde_yaml::Value;

/// Frontmatter keys the publisher understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownKey {
    Title,
    Draft,
    Published,
    AlternateLink,
    HugoSection,
    DateCreated,
    DateModified,
    Date,
    Lastmod,
    Topic,
    Categories,
    Aliases,
    Tags,
}

impl KnownKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Draft => "draft",
            Self::Published => "published",
            Self::AlternateLink => "alternate_link",
            Self::HugoSection => "hugo_section",
            Self::DateCreated => "date_created",
            Self::DateModified => "date_modified",
            Self::Date => "date",
            Self::Lastmod => "lastmod",
            Self::Topic => "topic",
            Self::Categories => "categories",
            Self::Aliases => "aliases",
            Self::Tags => "tags",
        }
    }
}

/// Hugo's timestamp layout for `date` and `lastmod`.
pub const HUGO_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A single frontmatter value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Text(String),
    /// A timestamp in UTC, written back in [`HUGO_DATE_FORMAT`].
    Date(NaiveDateTime),
    /// A sequence made only of strings.
    List(Vec<String>),
    /// Anything else (numbers, nested maps, mixed lists), passed through untouched.
    Other(Value),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Text of a scalar value: strings as is, numbers, booleans and dates
    /// rendered. `None` for null, lists and maps.
    pub fn scalar_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Text(s) => Some(Cow::Borrowed(s)),
            Self::Bool(b) => Some(Cow::Owned(b.to_string())),
            Self::Date(dt) => Some(Cow::Owned(dt.format(HUGO_DATE_FORMAT).to_string())),
            Self::Other(Value::Number(n)) => Some(Cow::Owned(n.to_string())),
            Self::List(_) | Self::Other(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn to_yaml(&self) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(*b),
            Self::Text(s) => Value::String(s.clone()),
            Self::Date(dt) => Value::String(dt.format(HUGO_DATE_FORMAT).to_string()),
            Self::List(items) => {
                Value::Sequence(items.iter().cloned().map(Value::String).collect())
            }
            Self::Other(v) => v.clone(),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(b) => Self::Bool(b),
            Value::String(s) => Self::Text(s),
            Value::Sequence(seq) if seq.iter().all(Value::is_string) => Self::List(
                seq.into_iter()
                    .filter_map(|v| v.as_str().map(ToOwned::to_owned))
                    .collect(),
            ),
            other => Self::Other(other),
        }
    }
}

/// Insertion-ordered frontmatter fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    fields: Vec<(String, FieldValue)>,
}

impl FrontMatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert a field, replacing an existing value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        let pos = self.fields.iter().position(|(k, _)| k == key)?;
        Some(self.fields.remove(pos).1)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.fields.retain(|(k, _)| keep(k));
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert a YAML mapping, keeping its order. Non-scalar keys are dropped.
    pub fn from_mapping(mapping: serde_yaml::Mapping) -> Self {
        mapping
            .into_iter()
            .filter_map(|(k, v)| {
                let key = match k {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => return None,
                };
                Some((key, FieldValue::from(v)))
            })
            .collect()
    }

    pub fn to_mapping(&self) -> serde_yaml::Mapping {
        self.fields
            .iter()
            .map(|(k, v)| (Value::String(k.clone()), v.to_yaml()))
            .collect()
    }
}

impl FromIterator<(String, FieldValue)> for FrontMatter {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        let mut fm = FrontMatter::new();
        for (k, v) in iter {
            fm.insert(k, v);
        }
        fm
    }
}

/// Result of splitting frontmatter from markdown.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// Parsed frontmatter (if present).
    pub frontmatter: Option<FrontMatter>,
    /// The markdown body (everything after frontmatter).
    pub body: String,
}

impl ParsedDocument {
    /// Frontmatter of the document, empty when the document has none.
    pub fn metadata(&self) -> FrontMatter {
        self.frontmatter.clone().unwrap_or_default()
    }
}
