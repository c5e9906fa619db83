//! Access resolution: permission strings to allowed sections.
//!
//! A user's permission string names the sections they may open, separated
//! by the literal delimiter `" or "` (`"Dashboard or Work Category"`).
//! Matching against section aliases is deliberately loose: a token and an
//! alias match when either contains the other, case-insensitively. Short
//! tokens can therefore over-grant (`"work"` matches `"work category"`),
//! and the rule is kept as-is rather than tightened.
//!
//! When the permission string carries no tokens at all, every section is
//! allowed. A blank token next to real ones is kept, and since it is
//! contained in every alias it opens every section too
//! (`"Dashboard or "`).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Section;

const DELIMITER: &str = " or ";

fn fuzzy_match(token: &str, alias: &str) -> bool {
    alias.contains(token) || token.contains(alias)
}

/// Parsed permission tokens of one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    tokens: Vec<String>,
}

impl Permissions {
    /// Splits a raw permission string into trimmed, lower-cased tokens.
    ///
    /// A string made only of blank tokens yields no tokens at all. Otherwise
    /// blank tokens are kept alongside the others.
    ///
    /// # Examples
    ///
    /// ```
    /// use floorflow_core::access::Permissions;
    /// use floorflow_core::Section;
    ///
    /// let perms = Permissions::parse("Dashboard or Vendor");
    /// assert_eq!(perms.tokens(), ["dashboard", "vendor"]);
    /// assert!(perms.allows(Section::Vendors));
    /// assert!(!perms.allows(Section::Buildings));
    /// ```
    pub fn parse(raw: &str) -> Self {
        let tokens: Vec<String> = raw
            .split(DELIMITER)
            .map(|token| token.trim().to_lowercase())
            .collect();
        if tokens.iter().all(String::is_empty) {
            return Self::unrestricted();
        }
        Self { tokens }
    }

    /// Permission that restricts nothing.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Tokens in the order they appeared, unknown ones included.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// True when there are no tokens, so every section is open.
    pub fn is_unrestricted(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether the section may be opened.
    pub fn allows(&self, section: Section) -> bool {
        if self.is_unrestricted() {
            return true;
        }
        section.aliases().iter().any(|alias| {
            self.tokens
                .iter()
                .any(|token| fuzzy_match(token, alias))
        })
    }

    /// Allowed sections in menu order.
    pub fn allowed_sections(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|section| self.allows(*section))
            .collect()
    }
}

/// Why the initial section fell back to the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// The permission string had no tokens.
    NoTokens,
    /// Tokens were present but none matched any alias.
    NoMatch,
}

/// How the initial section was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialSource {
    /// The first token is exactly an alias.
    FirstToken,
    /// A later token is exactly an alias.
    LaterToken,
    /// A token and an alias contain one another.
    FuzzyMatch,
    /// Nothing matched; the default section was used.
    Fallback(FallbackReason),
}

impl fmt::Display for InitialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitialSource::FirstToken => write!(f, "first token"),
            InitialSource::LaterToken => write!(f, "later token"),
            InitialSource::FuzzyMatch => write!(f, "fuzzy match"),
            InitialSource::Fallback(FallbackReason::NoTokens) => {
                write!(f, "fallback (no pages defined)")
            }
            InitialSource::Fallback(FallbackReason::NoMatch) => {
                write!(f, "fallback (no page matched)")
            }
        }
    }
}

/// Outcome of resolving a permission string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Parsed permissions, kept for later per-section checks.
    pub permissions: Permissions,
    /// Allowed sections in menu order.
    pub allowed: Vec<Section>,
    /// Section to land on after login.
    pub initial: Section,
    /// How `initial` was picked.
    pub source: InitialSource,
}

impl Resolution {
    /// True when the initial section is a fallback rather than a match.
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, InitialSource::Fallback(_))
    }
}

/// Maps permission strings to allowed sections and an initial section.
#[derive(Debug, Clone)]
pub struct AccessResolver {
    aliases: Vec<(&'static str, Section)>,
    default: Section,
}

impl Default for AccessResolver {
    fn default() -> Self {
        Self::new(Section::Dashboard)
    }
}

impl AccessResolver {
    /// Creates a resolver that falls back to `default`.
    pub fn new(default: Section) -> Self {
        let aliases = Section::ALL
            .into_iter()
            .flat_map(|section| section.aliases().iter().map(move |alias| (*alias, section)))
            .collect();
        Self { aliases, default }
    }

    /// Section used when nothing matches.
    pub fn default_section(&self) -> Section {
        self.default
    }

    /// Parses and resolves a raw permission string.
    pub fn resolve(&self, raw: &str) -> Resolution {
        self.resolve_permissions(Permissions::parse(raw))
    }

    /// Resolves already-parsed permissions.
    pub fn resolve_permissions(&self, permissions: Permissions) -> Resolution {
        let (initial, source) = self.initial_section(&permissions);
        if let InitialSource::Fallback(reason) = source {
            match reason {
                FallbackReason::NoTokens => log::warn!("No pages defined in permission string"),
                FallbackReason::NoMatch => log::warn!(
                    "No valid page mapping found for: {:?}",
                    permissions.tokens()
                ),
            }
        }
        Resolution {
            allowed: permissions.allowed_sections(),
            permissions,
            initial,
            source,
        }
    }

    fn exact(&self, token: &str) -> Option<Section> {
        self.aliases
            .iter()
            .find(|(alias, _)| *alias == token)
            .map(|(_, section)| *section)
    }

    fn initial_section(&self, permissions: &Permissions) -> (Section, InitialSource) {
        let tokens = permissions.tokens();
        let Some(first) = tokens.first() else {
            return (self.default, InitialSource::Fallback(FallbackReason::NoTokens));
        };

        if let Some(section) = self.exact(first) {
            return (section, InitialSource::FirstToken);
        }
        if let Some(section) = tokens[1..].iter().find_map(|token| self.exact(token)) {
            return (section, InitialSource::LaterToken);
        }

        // First token that matches anything, then the first alias it matches.
        let close = tokens.iter().find(|token| {
            self.aliases
                .iter()
                .any(|(alias, _)| fuzzy_match(token, alias))
        });
        if let Some(token) = close
            && let Some((_, section)) = self
                .aliases
                .iter()
                .find(|(alias, _)| fuzzy_match(token, alias))
        {
            return (*section, InitialSource::FuzzyMatch);
        }

        (self.default, InitialSource::Fallback(FallbackReason::NoMatch))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string_is_fail_open() {
        let resolution = AccessResolver::default().resolve("");
        assert_eq!(resolution.allowed, Section::ALL.to_vec());
        assert_eq!(resolution.initial, Section::Dashboard);
        assert_eq!(
            resolution.source,
            InitialSource::Fallback(FallbackReason::NoTokens)
        );
    }

    #[test]
    fn test_whitespace_tokens_are_fail_open() {
        let perms = Permissions::parse("   or  ");
        assert!(perms.is_unrestricted());
        assert!(perms.allows(Section::Vendors));
    }

    #[test]
    fn test_trailing_delimiter_opens_every_section() {
        let resolution = AccessResolver::default().resolve("Dashboard or ");
        assert_eq!(resolution.permissions.tokens(), ["dashboard", ""]);
        assert!(!resolution.permissions.is_unrestricted());
        assert_eq!(resolution.allowed, Section::ALL.to_vec());
        assert_eq!(resolution.initial, Section::Dashboard);
        assert_eq!(resolution.source, InitialSource::FirstToken);
    }

    #[test]
    fn test_leading_blank_token_keeps_later_exact_alias() {
        let resolution = AccessResolver::default().resolve(" or Vendors");
        assert_eq!(resolution.allowed, Section::ALL.to_vec());
        assert_eq!(resolution.initial, Section::Vendors);
        assert_eq!(resolution.source, InitialSource::LaterToken);
    }

    #[test]
    fn test_first_token_exact_alias() {
        let resolution = AccessResolver::default().resolve("Vendors or Dashboard");
        assert_eq!(resolution.initial, Section::Vendors);
        assert_eq!(resolution.source, InitialSource::FirstToken);
        assert_eq!(resolution.allowed, vec![Section::Dashboard, Section::Vendors]);
    }

    #[test]
    fn test_later_token_exact_alias() {
        let resolution = AccessResolver::default().resolve("Reports or WorkCategory");
        assert_eq!(resolution.initial, Section::WorkCategory);
        assert_eq!(resolution.source, InitialSource::LaterToken);
    }

    #[test]
    fn test_fuzzy_initial_uses_alias_table_order() {
        // "work" is not an alias but is contained in "work category".
        let resolution = AccessResolver::default().resolve("Work");
        assert_eq!(resolution.initial, Section::WorkCategory);
        assert_eq!(resolution.source, InitialSource::FuzzyMatch);

        // "buildings list" contains both "buildings" and "building";
        // the earlier alias wins, both map to the same section.
        let resolution = AccessResolver::default().resolve("Buildings List");
        assert_eq!(resolution.initial, Section::Buildings);
    }

    #[test]
    fn test_unknown_tokens_fall_back_and_stay_in_token_list() {
        let resolution = AccessResolver::default().resolve("Reports or Payroll");
        assert!(resolution.is_fallback());
        assert_eq!(resolution.initial, Section::Dashboard);
        assert!(resolution.allowed.is_empty());
        assert_eq!(resolution.permissions.tokens(), ["reports", "payroll"]);
    }

    #[test]
    fn test_delimiter_is_literal_lowercase_or() {
        // "OR" is not the delimiter, so this is one token.
        let perms = Permissions::parse("Dashboard OR Vendors");
        assert_eq!(perms.tokens(), ["dashboard or vendors"]);
        // Still grants both, by containment.
        assert!(perms.allows(Section::Dashboard));
        assert!(perms.allows(Section::Vendors));
    }

    #[test]
    fn test_duplicate_tokens_are_harmless() {
        let once = Permissions::parse("Vendors");
        let twice = Permissions::parse("Vendors or vendors");
        assert_eq!(once.allowed_sections(), twice.allowed_sections());
    }

    #[test]
    fn test_custom_default_section() {
        let resolver = AccessResolver::new(Section::Buildings);
        assert_eq!(resolver.resolve("nothing").initial, Section::Buildings);
        assert_eq!(resolver.default_section(), Section::Buildings);
    }

    #[test]
    fn test_initial_source_display() {
        assert_eq!(InitialSource::FuzzyMatch.to_string(), "fuzzy match");
        assert_eq!(
            InitialSource::Fallback(FallbackReason::NoMatch).to_string(),
            "fallback (no page matched)"
        );
    }
}
