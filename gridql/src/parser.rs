use crate::ast::{Filter, FilterType};
use crate::error::ParseError;
use crate::grammar::{GridqlParser, Rule};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use pest::iterators::Pair;
use pest::Parser;
use tracing::debug;

/// Canonical rendering for recognized date/time values: UTC, second precision.
const CANONICAL_DATETIME: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Accepted date/time formats carrying an explicit UTC offset.
const OFFSET_FORMATS: &[&str] = &["%d/%m/%Y %H:%M:%S %z", "%Y-%m-%d %H:%M:%S %z"];

/// Accepted date/time formats without an offset; these are taken as UTC.
const NAIVE_FORMATS: &[&str] = &["%d/%m/%Y %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parse a date/time value against the explicit allow-list of formats,
/// normalizing to UTC. RFC 3339 is tried first, so canonical values parse
/// back to themselves. Returns None when no format matches.
pub fn parse_datetime(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(input, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Parse a filter query into its clauses, in left-to-right order.
///
/// Lenient by contract: clauses that do not tokenize as `key:marker?value`
/// are dropped from the result rather than failing the query. Empty or
/// whitespace-only input yields an empty Vec.
pub fn parse_filters(input: &str) -> Vec<Filter> {
    let pairs = match GridqlParser::parse(Rule::Query, input) {
        Ok(pairs) => pairs,
        Err(err) => {
            // Junk is a catch-all, so this is not expected to happen
            debug!(%err, "filter query rejected");
            return Vec::new();
        }
    };

    let mut filters = Vec::new();
    for pair in pairs {
        match pair.as_rule() {
            Rule::Clause => match filter_from_clause(pair) {
                Ok(filter) => filters.push(filter),
                Err(err) => debug!(%err, "dropping clause"),
            },
            Rule::Junk => debug!(clause = pair.as_str(), "dropping unparsable clause"),
            Rule::EOI => {}
            _ => {}
        }
    }
    filters
}

/// Strict single-clause form of [`parse_filters`].
pub fn parse_clause(input: &str) -> Result<Filter, ParseError> {
    let pairs = GridqlParser::parse(Rule::Query, input)
        .map_err(|_| ParseError::MalformedClause(input.to_string()))?;

    let mut filter = None;
    for pair in pairs {
        match pair.as_rule() {
            Rule::Clause if filter.is_none() => filter = Some(filter_from_clause(pair)?),
            Rule::Clause => return Err(ParseError::TrailingInput(pair.as_str().to_string())),
            Rule::Junk => return Err(ParseError::MalformedClause(pair.as_str().to_string())),
            _ => {}
        }
    }
    filter.ok_or(ParseError::Empty)
}

/// Build a Filter from a Clause parse node.
fn filter_from_clause(pair: Pair<Rule>) -> Result<Filter, ParseError> {
    let mut key = String::new();
    let mut marker = None;
    let mut trailing_star = false;
    let mut raw_value = String::new();

    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::Key => key = part.as_str().to_string(),
            Rule::Marker => marker = part.into_inner().next().map(|m| m.as_rule()),
            Rule::Value => raw_value = part.as_str().to_string(),
            Rule::Star => trailing_star = true,
            _ => {}
        }
    }

    let filter_type = resolve_operator(marker, trailing_star)?;
    Ok(Filter::new(key, filter_type, normalize_value(&raw_value)))
}

/// Map the leading marker / trailing star combination to an operator.
///
/// The partial-match conventions: `*value*` is a substring match, `value*`
/// a prefix match, `*value` a suffix match, and `!*value*` the negated
/// substring match. Ordering and negation markers do not combine with a
/// trailing star.
fn resolve_operator(marker: Option<Rule>, trailing_star: bool) -> Result<FilterType, ParseError> {
    let filter_type = match marker {
        None if trailing_star => FilterType::StartsWith,
        None => FilterType::Equals,
        Some(Rule::Star) if trailing_star => FilterType::Contains,
        Some(Rule::Star) => FilterType::EndsWith,
        Some(Rule::NotStar) if trailing_star => FilterType::DoesNotContain,
        Some(Rule::NotStar) => return Err(ParseError::UnsupportedMarker { marker: "!*" }),
        Some(Rule::Not) if trailing_star => {
            return Err(ParseError::ConflictingMarkers { marker: "!" })
        }
        Some(Rule::Not) => FilterType::DoesNotEqual,
        Some(rule @ (Rule::Gt | Rule::GtEq | Rule::Lt | Rule::LtEq)) if trailing_star => {
            return Err(ParseError::ConflictingMarkers {
                marker: marker_text(rule),
            })
        }
        Some(Rule::Gt) => FilterType::GreaterThan,
        Some(Rule::GtEq) => FilterType::GreaterThanOrEqual,
        Some(Rule::Lt) => FilterType::LessThan,
        Some(Rule::LtEq) => FilterType::LessThanOrEqual,
        Some(rule) => return Err(ParseError::MalformedClause(format!("{rule:?}"))),
    };
    Ok(filter_type)
}

fn marker_text(rule: Rule) -> &'static str {
    match rule {
        Rule::Gt => ">",
        Rule::GtEq => ">=",
        Rule::Lt => "<",
        Rule::LtEq => "<=",
        Rule::Not => "!",
        Rule::NotStar => "!*",
        Rule::Star => "*",
        _ => "?",
    }
}

/// Rewrite a quoted date/time value to canonical UTC ISO-8601, re-wrapped
/// in quotes. Everything else passes through unchanged, quotes included.
fn normalize_value(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        let inner = &raw[1..raw.len() - 1];
        if let Some(dt) = parse_datetime(inner) {
            return format!("\"{}\"", dt.format(CANONICAL_DATETIME));
        }
    }
    raw.to_string()
}
