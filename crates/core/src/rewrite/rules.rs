//! Tables driving the rewrite.

use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};

use regex::{Captures, Regex};

use super::asset::AssetRoutes;
use crate::config::RewriteConfig;

/// Frontmatter keys Hugo receives unless more are configured.
pub const DEFAULT_ALLOWED_KEYS: &[&str] =
    &["title", "draft", "date", "lastmod", "tags", "categories", "aliases"];

/// Markers wrapping the content under a code heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTabs {
    /// Heading text that triggers wrapping, compared exactly.
    pub heading: String,
    pub open: String,
    pub close: String,
}

impl Default for CodeTabs {
    fn default() -> Self {
        Self {
            heading: "Code".into(),
            open: "{{< tabs >}}".into(),
            close: "{{< /tabs >}}".into(),
        }
    }
}

/// Macro renames applied inside display math.
///
/// Every occurrence is replaced at most once, in a single left-to-right pass,
/// so a replacement is never rewritten by another entry. A name ending in a
/// letter only matches where the macro name ends (`\R` leaves `\Rightarrow`
/// alone).
#[derive(Debug, Clone, Default)]
pub struct MathMacros {
    /// Longest name first, so the longest macro wins at any position.
    table: Vec<(String, String)>,
    pattern: Option<Regex>,
}

impl MathMacros {
    pub fn new(macros: &HashMap<String, String>) -> Self {
        let mut table: Vec<(String, String)> = macros
            .iter()
            .filter(|(name, _)| !name.is_empty())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        table.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));

        let pattern = (!table.is_empty()).then(|| {
            let alternation: Vec<String> =
                table.iter().map(|(name, _)| regex::escape(name)).collect();
            Regex::new(&alternation.join("|")).expect("escaped macro names form a valid pattern")
        });
        Self { table, pattern }
    }

    /// Macro names, in matching order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.table.iter().map(|(name, _)| name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.table.iter().find(|(n, _)| n == name).map(|(_, to)| to.as_str())
    }

    /// Rename every macro in `tex`.
    pub fn apply<'t>(&self, tex: &'t str) -> Cow<'t, str> {
        let Some(pattern) = &self.pattern else {
            return Cow::Borrowed(tex);
        };
        pattern.replace_all(tex, |caps: &Captures<'_>| {
            let Some(found) = caps.get(0) else {
                return String::new();
            };
            let name = found.as_str();
            let is_letter = |c: char| c.is_ascii_alphabetic();
            if name.ends_with(is_letter) && tex[found.end()..].starts_with(is_letter) {
                return name.to_string();
            }
            self.get(name).unwrap_or(name).to_string()
        })
    }
}

/// Everything the rewriter needs besides the note itself.
#[derive(Debug, Clone)]
pub struct RewriteRules {
    pub allowed_keys: BTreeSet<String>,
    /// Topic → categories; topics not listed map to themselves.
    pub topic_categories: HashMap<String, Vec<String>>,
    /// Applied inside display math.
    pub math_macros: MathMacros,
    pub routes: AssetRoutes,
    pub code_tabs: CodeTabs,
}

impl Default for RewriteRules {
    fn default() -> Self {
        Self::from_config(&RewriteConfig::default(), &[])
    }
}

impl RewriteRules {
    /// Build from configuration. `extra_keys` widen the frontmatter allow-list.
    pub fn from_config(config: &RewriteConfig, extra_keys: &[String]) -> Self {
        let allowed_keys = DEFAULT_ALLOWED_KEYS
            .iter()
            .map(|k| k.to_string())
            .chain(extra_keys.iter().cloned())
            .collect();

        Self {
            allowed_keys,
            topic_categories: config.topic_categories.clone(),
            math_macros: MathMacros::new(&config.math_macros),
            routes: AssetRoutes {
                image_url: config.image_url.clone(),
                content_image_url: config.content_image_url.clone(),
                drawing_url: config.excalidraw_url.clone(),
                drawing_format: config.excalidraw_format.clone(),
            },
            code_tabs: CodeTabs {
                heading: config.code_tabs_heading.clone(),
                open: config.code_tabs_open.clone(),
                close: config.code_tabs_close.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_config_defaults() {
        let rules = RewriteRules::default();
        assert!(rules.allowed_keys.contains("lastmod"));
        assert!(!rules.allowed_keys.contains("hugo_section"));
        assert_eq!(rules.math_macros.names().collect::<Vec<_>>(), vec!["\\cellcolor"]);
        assert_eq!(rules.math_macros.get("\\cellcolor"), Some("\\colorbox"));
        assert_eq!(rules.routes, AssetRoutes::default());
        assert_eq!(rules.code_tabs, CodeTabs::default());
    }

    #[test]
    fn extra_keys_extend_allow_list() {
        let rules = RewriteRules::from_config(&RewriteConfig::default(), &["weight".into()]);
        assert!(rules.allowed_keys.contains("weight"));
        assert!(rules.allowed_keys.contains("title"));
    }

    #[test]
    fn longer_macros_apply_first() {
        let mut config = RewriteConfig::default();
        config.math_macros.insert("\\R".into(), "\\mathbb{R}".into());
        config.math_macros.insert("\\Rn".into(), "\\mathbb{R}^n".into());
        let rules = RewriteRules::from_config(&config, &[]);
        let order: Vec<_> = rules.math_macros.names().collect();
        assert_eq!(order, vec!["\\cellcolor", "\\Rn", "\\R"]);
        assert_eq!(rules.math_macros.apply("\\Rn + \\R"), "\\mathbb{R}^n + \\mathbb{R}");
    }

    fn macros(pairs: &[(&str, &str)]) -> MathMacros {
        MathMacros::new(&pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
    }

    #[test]
    fn replacements_are_not_rewritten_again() {
        let m = macros(&[("\\cellcolor", "\\colorbox"), ("\\color", "\\textcolor")]);
        assert_eq!(m.apply("\\cellcolor{red} \\color{blue}"), "\\colorbox{red} \\textcolor{blue}");
    }

    #[test]
    fn macro_names_match_whole_words() {
        let m = macros(&[("\\R", "\\mathbb{R}")]);
        assert_eq!(m.apply("\\Rightarrow \\R^2 \\R"), "\\Rightarrow \\mathbb{R}^2 \\mathbb{R}");
        assert_eq!(m.apply("\\R\\R"), "\\mathbb{R}\\mathbb{R}");
        assert_eq!(macros(&[]).apply("\\R"), "\\R");
    }
}
