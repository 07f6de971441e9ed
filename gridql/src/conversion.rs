use crate::ast::Filter;
use crate::error::ParseError;
use crate::parser;
use std::convert::TryFrom;

impl<'a> TryFrom<&'a str> for Filter {
    type Error = ParseError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> { parser::parse_clause(value) }
}

impl TryFrom<String> for Filter {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> { parser::parse_clause(&value) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::FilterType;

    #[test]
    fn test_try_from_str() {
        let filter = Filter::try_from("age:>30").unwrap();
        assert_eq!(filter, Filter::new("age", FilterType::GreaterThan, "30"));

        assert!(Filter::try_from("no clause here").is_err());
    }
}
