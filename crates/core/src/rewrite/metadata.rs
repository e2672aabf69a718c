//! Obsidian frontmatter → Hugo frontmatter.
//!
//! Every step is a pure function of its input so each can be tested alone.

use chrono::NaiveDateTime;

use super::RewriteError;
use super::rules::RewriteRules;
use super::slug::slugify;
use crate::frontmatter::{FieldValue, FrontMatter, KnownKey};

/// Layouts accepted for `date_created` and `date_modified`.
const VAULT_DATE_FORMATS: &[&str] =
    &["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Run every metadata step, in order, and project onto the allow-list.
pub fn transform_metadata(
    input: &FrontMatter,
    rules: &RewriteRules,
    note: &str,
) -> Result<FrontMatter, RewriteError> {
    let mut fm = input.clone();
    require_title(&fm, note)?;
    mark_ready(&mut fm);
    convert_dates(&mut fm, note)?;
    derive_categories(&mut fm, rules);
    slug_aliases(&mut fm);
    project(&mut fm, rules);
    Ok(fm)
}

pub(crate) fn require_title(fm: &FrontMatter, note: &str) -> Result<(), RewriteError> {
    match fm.get(KnownKey::Title.as_str()).and_then(FieldValue::scalar_text) {
        Some(title) if !title.trim().is_empty() => Ok(()),
        _ => Err(RewriteError::MissingTitle { note: note.to_string() }),
    }
}

/// Everything published is final: `draft: false`, no `published` flag.
pub(crate) fn mark_ready(fm: &mut FrontMatter) {
    fm.insert(KnownKey::Draft.as_str(), FieldValue::Bool(false));
    fm.remove(KnownKey::Published.as_str());
}

pub(crate) fn convert_dates(fm: &mut FrontMatter, note: &str) -> Result<(), RewriteError> {
    for (from, to) in [
        (KnownKey::DateCreated, KnownKey::Date),
        (KnownKey::DateModified, KnownKey::Lastmod),
    ] {
        let Some(value) = fm.remove(from.as_str()) else {
            continue;
        };
        let parsed = match &value {
            FieldValue::Date(dt) => Some(*dt),
            FieldValue::Text(text) => parse_vault_date(text),
            _ => None,
        };
        let Some(dt) = parsed else {
            return Err(RewriteError::InvalidDate {
                note: note.to_string(),
                key: from.as_str().to_string(),
                value: describe(&value),
            });
        };
        fm.insert(to.as_str(), FieldValue::Date(dt));
    }
    Ok(())
}

/// Parse a vault timestamp. A bare date means midnight.
pub fn parse_vault_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    VAULT_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn describe(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(s) => s.clone(),
        other => serde_yaml::to_string(&other.to_yaml())
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Map `topic` onto `categories`, after any categories already present.
pub(crate) fn derive_categories(fm: &mut FrontMatter, rules: &RewriteRules) {
    let topics = string_items(fm.get(KnownKey::Topic.as_str()));
    if topics.is_empty() {
        return;
    }

    let mut categories = string_items(fm.get(KnownKey::Categories.as_str()));
    for topic in topics {
        let mapped = rules
            .topic_categories
            .get(&topic)
            .cloned()
            .unwrap_or_else(|| vec![topic]);
        for category in mapped {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
    }
    fm.insert(KnownKey::Categories.as_str(), FieldValue::List(categories));
}

pub(crate) fn slug_aliases(fm: &mut FrontMatter) {
    let aliases = string_items(fm.get(KnownKey::Aliases.as_str()));
    if aliases.is_empty() {
        return;
    }
    let mut slugged: Vec<String> = Vec::with_capacity(aliases.len());
    for alias in aliases.iter().map(|a| slugify(a)) {
        if !alias.is_empty() && !slugged.contains(&alias) {
            slugged.push(alias);
        }
    }
    fm.insert(KnownKey::Aliases.as_str(), FieldValue::List(slugged));
}

pub(crate) fn project(fm: &mut FrontMatter, rules: &RewriteRules) {
    fm.retain(|key| rules.allowed_keys.contains(key));
}

/// A string or a list of strings, as a list.
fn string_items(value: Option<&FieldValue>) -> Vec<String> {
    match value {
        Some(FieldValue::Text(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        Some(FieldValue::List(items)) => items.clone(),
        _ => Vec::new(),
    }
}
