//! `CREATE TABLE` grammar
//!
//! Built from nom combinators. The grammar only recognizes structure; the
//! resulting [`CreateTable`] is turned into a [`Table`](crate::schema::Table)
//! by the parser driver.

pub mod ast;
mod lexeme;
mod statement;

pub use ast::{
    BodyElement, ColumnClause, ConstraintClause, ConstraintKind, CreateTable, SuppressedClause,
};

use crate::error::{DdlParseError, Result};
use lexeme::{PResult, trivia};
use nom::Parser;
use nom::character::complete::char;
use tracing::trace;

/// Remaining input carried by a nom error, or `fallback` when there is none
fn error_input<'a>(err: &nom::Err<nom::error::Error<&'a str>>, fallback: &'a str) -> &'a str {
    match err {
        nom::Err::Error(inner) | nom::Err::Failure(inner) => inner.input,
        nom::Err::Incomplete(_) => fallback,
    }
}

/// Run one header step, turning a nom error into a positioned syntax error
fn step<'a, O>(
    source: &'a str,
    input: &'a str,
    message: &str,
    rule: impl FnOnce(&'a str) -> PResult<'a, O>,
) -> Result<(&'a str, O)> {
    rule(input).map_err(|err| {
        let at = error_input(&err, input);
        DdlParseError::syntax_at(message, source, skip_trivia(at))
    })
}

fn skip_trivia(input: &str) -> &str {
    trivia(input).map_or(input, |(rest, ())| rest)
}

/// Parse the first `CREATE TABLE` statement of `source`
///
/// Leading whitespace and `--` comments are skipped. Text after the closing
/// parenthesis of the first statement is ignored.
///
/// # Errors
///
/// Returns [`DdlParseError::SyntaxError`] positioned at the first input the
/// grammar could not match.
pub fn parse_create_table(source: &str) -> Result<CreateTable> {
    let (input, _) = step(source, source, "expected CREATE", statement::create)?;
    let (input, temporary) = step(source, input, "expected TABLE", statement::temporary)?;
    let (input, _) = step(source, input, "expected TABLE", statement::table)?;
    let (input, if_not_exists) = step(source, input, "expected table name", statement::if_not_exists)?;
    let (input, (schema, name)) =
        step(source, input, "expected table name", statement::qualified_name)?;
    let (input, _) = step(source, input, "expected '(' after table name", |i| {
        lexeme::ws(char('(')).parse(i)
    })?;

    trace!(table = %name, ?schema, temporary, "parsed statement header");

    let elements = body(source, input)?;

    Ok(CreateTable {
        temporary,
        if_not_exists,
        schema,
        name,
        elements,
    })
}

/// Comma-separated body elements up to the closing `)`
fn body<'a>(source: &'a str, mut input: &'a str) -> Result<Vec<BodyElement>> {
    let mut elements = Vec::new();

    loop {
        let start = skip_trivia(input);
        if start.is_empty() {
            return Err(DdlParseError::syntax_at(
                "unexpected end of input, expected ')'",
                source,
                start,
            ));
        }
        if elements.is_empty() && start.starts_with(')') {
            return Err(DdlParseError::syntax_at("empty column list", source, start));
        }

        let (rest, element) = statement::body_element(start)
            .map_err(|_| DdlParseError::syntax_at("unrecognized table element", source, start))?;
        trace!(?element, "parsed table element");
        elements.push(element);

        let rest = skip_trivia(rest);
        match rest.chars().next() {
            Some(',') => input = &rest[1..],
            Some(')') => return Ok(elements),
            _ => {
                return Err(DdlParseError::syntax_at(
                    "expected ',' or ')'",
                    source,
                    rest,
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(err: DdlParseError) -> (String, usize, usize) {
        match err {
            DdlParseError::SyntaxError {
                message,
                line,
                column,
            } => (message, line, column),
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_header() {
        let statement = parse_create_table(
            "-- users\nCREATE TEMPORARY TABLE IF NOT EXISTS app.users (id INT);",
        )
        .unwrap();
        assert!(statement.temporary);
        assert!(statement.if_not_exists);
        assert_eq!(statement.schema.as_deref(), Some("app"));
        assert_eq!(statement.name, "users");
        assert_eq!(statement.elements.len(), 1);
    }

    #[test]
    fn test_parse_elements_in_order() {
        let statement = parse_create_table(
            "CREATE TABLE t (\n  a INT,\n  KEY ix (a),\n  b TEXT NOT NULL,\n  PRIMARY KEY (a)\n)",
        )
        .unwrap();
        let kinds: Vec<&str> = statement
            .elements
            .iter()
            .map(|element| match element {
                BodyElement::Column(_) => "column",
                BodyElement::Constraint(_) => "constraint",
                BodyElement::Suppressed(_) => "suppressed",
            })
            .collect();
        assert_eq!(kinds, vec!["column", "suppressed", "column", "constraint"]);
    }

    #[test]
    fn test_trailing_text_ignored() {
        let statement =
            parse_create_table("CREATE TABLE t (a INT) ENGINE=InnoDB; CREATE TABLE u (b INT)")
                .unwrap();
        assert_eq!(statement.name, "t");
    }

    #[test]
    fn test_missing_create() {
        let (message, line, column) = position(parse_create_table("  DROP TABLE t").unwrap_err());
        assert_eq!(message, "expected CREATE");
        assert_eq!((line, column), (1, 3));
    }

    #[test]
    fn test_missing_open_paren() {
        let (message, line, column) =
            position(parse_create_table("CREATE TABLE t\n  id INT)").unwrap_err());
        assert_eq!(message, "expected '(' after table name");
        assert_eq!((line, column), (2, 3));
    }

    #[test]
    fn test_empty_body() {
        let (message, _, _) = position(parse_create_table("CREATE TABLE t ( )").unwrap_err());
        assert_eq!(message, "empty column list");
    }

    #[test]
    fn test_unterminated_body() {
        let (message, _, _) =
            position(parse_create_table("CREATE TABLE t (id INT,\n").unwrap_err());
        assert_eq!(message, "unexpected end of input, expected ')'");
    }

    #[test]
    fn test_unrecognized_element_position() {
        let (message, line, column) =
            position(parse_create_table("CREATE TABLE t (\n  id INT,\n  ???\n)").unwrap_err());
        assert_eq!(message, "unrecognized table element");
        assert_eq!((line, column), (3, 3));
    }
}
