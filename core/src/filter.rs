//! Compile a parsed filter clause into a predicate and apply it to items.
//! This is the narrowing step a data provider runs between parsing the
//! query box text and handing rows back to the grid.

use crate::schema::{KeyAliases, Schema};
use crate::value::{CastError, Value, ValueType};
use gridql::{Filter, FilterType};
use std::cmp::Ordering;
use thiserror::Error;
use tracing::debug;

/// Why a filter could not be compiled against the element type. Every
/// variant degrades to a no-op at application time; none of them panic or
/// propagate to the caller's caller.
#[derive(Debug, Error, PartialEq)]
pub enum CompileError {
    #[error("empty member path for key '{0}'")]
    EmptyPath(String),
    #[error("property not found: {0}")]
    UnknownProperty(String),
    #[error("{op:?} requires a string member, but '{path}' is {ty:?}")]
    TypeMismatch { path: String, op: FilterType, ty: ValueType },
    #[error("cannot cast literal for '{path}': {source}")]
    Cast { path: String, source: CastError },
}

/// Items expose member values by path. Dotted paths such as
/// `ClaimedDate.Value` are passed through whole; how to interpret them is
/// the item's concern.
pub trait Filterable {
    fn value(&self, path: &str) -> Option<Value>;
}

/// A filter clause compiled against one element type: resolved member path,
/// operator, and the literal operand already cast to the member's type.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    path: String,
    op: FilterType,
    operand: Value,
}

impl Predicate {
    /// Resolve the filter's key through the alias table, look the member up
    /// in the schema, and cast the literal to the member's type.
    pub fn compile<S: Schema>(
        filter: &Filter,
        aliases: Option<&KeyAliases>,
        schema: &S,
    ) -> Result<Self, CompileError> {
        let path = match aliases {
            Some(aliases) => aliases.resolve(&filter.key),
            None => filter.key.as_str(),
        };
        if path.trim().is_empty() {
            return Err(CompileError::EmptyPath(filter.key.clone()));
        }

        let ty = schema
            .field_type(path)
            .ok_or_else(|| CompileError::UnknownProperty(path.to_string()))?;

        let op = filter.filter_type;
        let substring_op = matches!(
            op,
            FilterType::Contains
                | FilterType::DoesNotContain
                | FilterType::StartsWith
                | FilterType::EndsWith
        );
        if substring_op && ty != ValueType::String {
            return Err(CompileError::TypeMismatch { path: path.to_string(), op, ty });
        }

        let operand = Value::String(filter.literal().to_string())
            .cast_to(ty)
            .map_err(|source| CompileError::Cast { path: path.to_string(), source })?;

        Ok(Self { path: path.to_string(), op, operand })
    }

    pub fn path(&self) -> &str { &self.path }

    pub fn operand(&self) -> &Value { &self.operand }

    /// Test one item. An item with no value at the path, or a value that is
    /// incomparable with the operand, does not match. Substring operators
    /// are case-sensitive.
    pub fn matches<R: Filterable>(&self, item: &R) -> bool {
        let Some(actual) = item.value(&self.path) else {
            return false;
        };
        match self.op {
            FilterType::Equals => actual.compare(&self.operand) == Some(Ordering::Equal),
            FilterType::DoesNotEqual => matches!(
                actual.compare(&self.operand),
                Some(Ordering::Less | Ordering::Greater)
            ),
            FilterType::GreaterThan => actual.compare(&self.operand) == Some(Ordering::Greater),
            FilterType::GreaterThanOrEqual => matches!(
                actual.compare(&self.operand),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            FilterType::LessThan => actual.compare(&self.operand) == Some(Ordering::Less),
            FilterType::LessThanOrEqual => matches!(
                actual.compare(&self.operand),
                Some(Ordering::Less | Ordering::Equal)
            ),
            FilterType::Contains => self.str_test(&actual, |s, needle| s.contains(needle)),
            FilterType::DoesNotContain => self.str_test(&actual, |s, needle| !s.contains(needle)),
            FilterType::StartsWith => self.str_test(&actual, |s, needle| s.starts_with(needle)),
            FilterType::EndsWith => self.str_test(&actual, |s, needle| s.ends_with(needle)),
        }
    }

    fn str_test(&self, actual: &Value, test: impl Fn(&str, &str) -> bool) -> bool {
        match (actual.as_str(), self.operand.as_str()) {
            (Some(s), Some(needle)) => test(s, needle),
            _ => false,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum FilterResult<R> {
    Pass(R),
    Skip(R),
}

/// Streaming form: tag each item with the predicate's verdict.
pub struct FilterIterator<I> {
    iter: I,
    predicate: Predicate,
}

impl<I, R> FilterIterator<I>
where
    I: Iterator<Item = R>,
    R: Filterable,
{
    pub fn new(iter: I, predicate: Predicate) -> Self { Self { iter, predicate } }
}

impl<I, R> Iterator for FilterIterator<I>
where
    I: Iterator<Item = R>,
    R: Filterable,
{
    type Item = FilterResult<R>;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|item| {
            if self.predicate.matches(&item) {
                FilterResult::Pass(item)
            } else {
                FilterResult::Skip(item)
            }
        })
    }
}

/// Whether a filter actually narrowed the items, and if not, why.
#[derive(Debug, PartialEq)]
pub enum FilterOutcome {
    Applied,
    Skipped(CompileError),
}

/// Result of [`apply_filter`]: the (possibly narrowed) items plus a
/// first-class record of whether the filter was applied.
#[derive(Debug)]
pub struct FilterApplication<R> {
    pub items: Vec<R>,
    pub outcome: FilterOutcome,
}

impl<R> FilterApplication<R> {
    pub fn into_items(self) -> Vec<R> { self.items }

    pub fn was_applied(&self) -> bool { self.outcome == FilterOutcome::Applied }
}

/// Narrow `items` by one filter. A filter that cannot be compiled against
/// the element type degrades to a no-op: the items come back unchanged and
/// the reason is carried in the outcome. Never panics, never errors.
pub fn apply_filter<R, S>(
    items: Vec<R>,
    filter: &Filter,
    aliases: Option<&KeyAliases>,
    schema: &S,
) -> FilterApplication<R>
where
    R: Filterable,
    S: Schema,
{
    match Predicate::compile(filter, aliases, schema) {
        Ok(predicate) => {
            let items = items.into_iter().filter(|item| predicate.matches(item)).collect();
            FilterApplication { items, outcome: FilterOutcome::Applied }
        }
        Err(err) => {
            debug!(key = %filter.key, error = %err, "filter skipped, items returned unfiltered");
            FilterApplication { items, outcome: FilterOutcome::Skipped(err) }
        }
    }
}
