#![forbid(unsafe_code)]

//! Declarative per-target attributes.
//!
//! A render target may carry a small string map of attributes that configure
//! an engine without code: a JSON word list plus numeric/boolean timing and
//! cursor settings. Attribute-sourced values are always lower priority than
//! explicit [`Options`](crate::config::Options), per field.
//!
//! Recognized keys: `words`, `type-speed`, `delete-speed`, `delay`, `loop`,
//! `cursor`, `cursor-glyph`, `auto`.
//!
//! # Failure Modes
//!
//! - Malformed JSON in `words`: [`Error::BadAttr`], which the resolver
//!   downgrades to a warning — never fatal.
//! - Non-numeric duration values: same.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::{Error, Result};

/// Attribute key for the JSON word list.
pub const WORDS: &str = "words";
/// Attribute key for the typing speed in milliseconds.
pub const TYPE_SPEED: &str = "type-speed";
/// Attribute key for the deleting speed in milliseconds.
pub const DELETE_SPEED: &str = "delete-speed";
/// Attribute key for the inter-word delay in milliseconds.
pub const DELAY: &str = "delay";
/// Attribute key for the loop flag.
pub const LOOP: &str = "loop";
/// Attribute key for the cursor flag.
pub const CURSOR: &str = "cursor";
/// Attribute key for the cursor glyph.
pub const CURSOR_GLYPH: &str = "cursor-glyph";
/// Attribute key flagging a target for auto-instantiation.
pub const AUTO: &str = "auto";

/// String key/value attributes attached to a render target.
#[derive(Debug, Clone, Default)]
pub struct Attrs {
    entries: BTreeMap<String, String>,
}

impl Attrs {
    /// Create an empty attribute set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute (builder pattern).
    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// Insert an attribute.
    pub fn insert(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    /// Raw attribute lookup.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether no attributes are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse the `words` attribute as a JSON array of strings.
    ///
    /// Returns `Ok(None)` when the attribute is absent and `Err` when it is
    /// present but malformed. Empty strings inside the array are dropped.
    pub fn words(&self) -> Result<Option<Vec<String>>> {
        let Some(raw) = self.get(WORDS) else {
            return Ok(None);
        };
        let parsed: Vec<String> =
            serde_json::from_str(raw).map_err(|e| Error::BadAttr {
                key: WORDS.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Some(
            parsed.into_iter().filter(|w| !w.is_empty()).collect(),
        ))
    }

    /// Parse a millisecond duration attribute.
    pub fn duration_ms(&self, key: &str) -> Result<Option<Duration>> {
        let Some(raw) = self.get(key) else {
            return Ok(None);
        };
        let ms: u64 = raw.trim().parse().map_err(|_| Error::BadAttr {
            key: key.to_string(),
            reason: format!("expected milliseconds, got `{raw}`"),
        })?;
        Ok(Some(Duration::from_millis(ms)))
    }

    /// Parse a boolean attribute. Anything other than `false`/`0`/`off`
    /// counts as true, so a bare marker value enables the flag.
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.get(key)
            .map(|raw| !matches!(raw.trim(), "false" | "0" | "off"))
    }

    /// Whether this target is flagged for auto-instantiation.
    #[must_use]
    pub fn auto(&self) -> bool {
        self.flag(AUTO).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_attrs_have_no_words() {
        let attrs = Attrs::new();
        assert!(attrs.words().unwrap().is_none());
    }

    #[test]
    fn words_parse_json_array() {
        let attrs = Attrs::new().with(WORDS, r#"["Engineer", "Builder"]"#);
        let words = attrs.words().unwrap().unwrap();
        assert_eq!(words, vec!["Engineer".to_string(), "Builder".to_string()]);
    }

    #[test]
    fn words_drop_empty_entries() {
        let attrs = Attrs::new().with(WORDS, r#"["a", "", "b"]"#);
        let words = attrs.words().unwrap().unwrap();
        assert_eq!(words, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn malformed_words_is_bad_attr() {
        let attrs = Attrs::new().with(WORDS, "not json");
        let err = attrs.words().unwrap_err();
        assert!(matches!(err, Error::BadAttr { .. }));
    }

    #[test]
    fn words_wrong_shape_is_bad_attr() {
        let attrs = Attrs::new().with(WORDS, r#"{"a": 1}"#);
        assert!(attrs.words().is_err());
    }

    #[test]
    fn duration_parses_millis() {
        let attrs = Attrs::new().with(TYPE_SPEED, "80");
        assert_eq!(
            attrs.duration_ms(TYPE_SPEED).unwrap(),
            Some(Duration::from_millis(80))
        );
    }

    #[test]
    fn duration_tolerates_whitespace() {
        let attrs = Attrs::new().with(DELAY, " 1500 ");
        assert_eq!(
            attrs.duration_ms(DELAY).unwrap(),
            Some(Duration::from_millis(1500))
        );
    }

    #[test]
    fn duration_rejects_garbage() {
        let attrs = Attrs::new().with(DELAY, "soon");
        assert!(attrs.duration_ms(DELAY).is_err());
    }

    #[test]
    fn absent_duration_is_none() {
        let attrs = Attrs::new();
        assert_eq!(attrs.duration_ms(DELAY).unwrap(), None);
    }

    #[test]
    fn flag_false_variants() {
        for raw in ["false", "0", "off"] {
            let attrs = Attrs::new().with(LOOP, raw);
            assert_eq!(attrs.flag(LOOP), Some(false), "raw = {raw}");
        }
    }

    #[test]
    fn flag_bare_marker_is_true() {
        let attrs = Attrs::new().with(AUTO, "");
        assert_eq!(attrs.flag(AUTO), Some(true));
        assert!(attrs.auto());
    }

    #[test]
    fn auto_defaults_to_false() {
        assert!(!Attrs::new().auto());
    }

    #[test]
    fn cursor_glyph_is_raw_string() {
        let attrs = Attrs::new().with(CURSOR_GLYPH, "▌");
        assert_eq!(attrs.get(CURSOR_GLYPH), Some("▌"));
    }
}
