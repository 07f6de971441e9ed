use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operator of a filter clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterType {
    Equals,
    DoesNotEqual,
    Contains,
    DoesNotContain,
    StartsWith,
    EndsWith,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
}

impl FilterType {
    /// The textual markers around the value that select this operator:
    /// a prefix written after the `:` and an optional trailing `*`.
    pub fn markers(&self) -> (&'static str, &'static str) {
        match self {
            FilterType::Equals => ("", ""),
            FilterType::DoesNotEqual => ("!", ""),
            FilterType::Contains => ("*", "*"),
            FilterType::DoesNotContain => ("!*", "*"),
            FilterType::StartsWith => ("", "*"),
            FilterType::EndsWith => ("*", ""),
            FilterType::GreaterThan => (">", ""),
            FilterType::GreaterThanOrEqual => (">=", ""),
            FilterType::LessThan => ("<", ""),
            FilterType::LessThanOrEqual => ("<=", ""),
        }
    }
}

/// One parsed filter clause: logical key, operator, and normalized value.
///
/// The value keeps its surrounding double quotes when the clause was quoted;
/// [`Filter::literal`] yields the operand without them. Date/time values are
/// normalized to UTC ISO-8601 at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub key: String,
    pub filter_type: FilterType,
    pub value: String,
}

impl Filter {
    pub fn new(key: impl Into<String>, filter_type: FilterType, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            filter_type,
            value: value.into(),
        }
    }

    /// The right-hand operand with surrounding double quotes stripped.
    pub fn literal(&self) -> &str {
        let v = self.value.as_str();
        if v.len() >= 2 && v.starts_with('"') && v.ends_with('"') {
            &v[1..v.len() - 1]
        } else {
            v
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (prefix, suffix) = self.filter_type.markers();
        write!(f, "{}:{}{}{}", self.key, prefix, self.value, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_strips_quotes() {
        let filter = Filter::new("claimedAt", FilterType::GreaterThan, "\"2023-08-15T20:26:07Z\"");
        assert_eq!(filter.literal(), "2023-08-15T20:26:07Z");

        let bare = Filter::new("age", FilterType::Equals, "30");
        assert_eq!(bare.literal(), "30");

        // A lone quote is not a quoted value
        let lone = Filter::new("x", FilterType::Equals, "\"");
        assert_eq!(lone.literal(), "\"");
    }

    #[test]
    fn test_display_renders_clause_text() {
        assert_eq!(
            Filter::new("name", FilterType::Equals, "John").to_string(),
            "name:John"
        );
        assert_eq!(
            Filter::new("age", FilterType::GreaterThanOrEqual, "30").to_string(),
            "age:>=30"
        );
        assert_eq!(
            Filter::new("tag", FilterType::Contains, "beta").to_string(),
            "tag:*beta*"
        );
        assert_eq!(
            Filter::new("tag", FilterType::DoesNotContain, "beta").to_string(),
            "tag:!*beta*"
        );
        assert_eq!(
            Filter::new("name", FilterType::StartsWith, "Jo").to_string(),
            "name:Jo*"
        );
        assert_eq!(
            Filter::new("name", FilterType::EndsWith, "son").to_string(),
            "name:*son"
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let filter = Filter::new("name", FilterType::DoesNotEqual, "John");
        let json = serde_json::to_string(&filter).unwrap();
        let back: Filter = serde_json::from_str(&json).unwrap();
        assert_eq!(back, filter);
    }
}
