//! Per-element style storage.
//!
//! Two layers, written by different pipeline stages: `ComputedStyle` holds the
//! raw declarations the CSS matcher applied, `ResolvedStyle` holds parsed
//! values plus the geometry the layout engine writes back. Both are small
//! vector-backed maps; the property counts here never justify hashing.

/// Raw matched declarations, property -> declaration value text.
///
/// `set` replaces in place, so a property keeps its first insertion position
/// while later (higher-priority) matches overwrite its value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComputedStyle {
    entries: Vec<(String, String)>,
}

impl ComputedStyle {
    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    pub fn set(&mut self, property: &str, value: &str) {
        match self.entries.iter_mut().find(|(name, _)| name == property) {
            Some((_, existing)) => {
                existing.clear();
                existing.push_str(value);
            }
            None => self.entries.push((property.to_string(), value.to_string())),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A parsed style value: a length in CSS px, or an uninterpreted keyword.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleValue {
    Length(f32),
    Keyword(String),
}

impl StyleValue {
    pub fn as_length(&self) -> Option<f32> {
        match self {
            StyleValue::Length(n) => Some(*n),
            StyleValue::Keyword(_) => None,
        }
    }

    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            StyleValue::Keyword(word) => Some(word),
            StyleValue::Length(_) => None,
        }
    }
}

/// Parsed values plus layout output (`left`/`top`/`width`/... lengths).
///
/// Style resolution overwrites entries it re-derives from `ComputedStyle` but
/// leaves everything else in place, so geometry written by an earlier layout
/// pass survives a later resolution of the same element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedStyle {
    entries: Vec<(String, StyleValue)>,
}

impl ResolvedStyle {
    pub fn get(&self, property: &str) -> Option<&StyleValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value)
    }

    pub fn set(&mut self, property: &str, value: StyleValue) {
        match self.entries.iter_mut().find(|(name, _)| name == property) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((property.to_string(), value)),
        }
    }

    pub fn set_length(&mut self, property: &str, value: f32) {
        self.set(property, StyleValue::Length(value));
    }

    /// The property's value as a length; `None` when absent or a keyword.
    pub fn length(&self, property: &str) -> Option<f32> {
        self.get(property).and_then(StyleValue::as_length)
    }

    /// The property's value as a keyword; `None` when absent or a length.
    pub fn keyword(&self, property: &str) -> Option<&str> {
        self.get(property).and_then(StyleValue::as_keyword)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computed_set_replaces_value_in_place() {
        let mut style = ComputedStyle::default();
        style.set("color", "red");
        style.set("width", "100px");
        style.set("color", "blue");

        assert_eq!(style.get("color"), Some("blue"));
        assert_eq!(style.len(), 2);
        // First insertion position is kept.
        let order: Vec<&str> = style.iter().map(|(name, _)| name).collect();
        assert_eq!(order, ["color", "width"]);
    }

    #[test]
    fn resolved_lengths_and_keywords_are_distinct() {
        let mut style = ResolvedStyle::default();
        style.set_length("width", 120.0);
        style.set("display", StyleValue::Keyword("flex".to_string()));

        assert_eq!(style.length("width"), Some(120.0));
        assert_eq!(style.keyword("width"), None);
        assert_eq!(style.keyword("display"), Some("flex"));
        assert_eq!(style.length("display"), None);
        assert_eq!(style.length("height"), None);
    }

    #[test]
    fn resolved_set_overwrites_but_keeps_other_entries() {
        let mut style = ResolvedStyle::default();
        style.set_length("left", 30.0);
        style.set("width", StyleValue::Keyword("auto".to_string()));
        style.set_length("width", 200.0);

        assert_eq!(style.length("width"), Some(200.0));
        assert_eq!(style.length("left"), Some(30.0));
    }
}
