//! Statement and body clause rules
//!
//! Body elements are tried in a fixed order: suppressed clause, table
//! constraint, column definition. Each rule must end right before the `,`
//! or `)` that closes the element, otherwise the next rule is tried.

use super::ast::{BodyElement, ColumnClause, ConstraintClause, ConstraintKind, SuppressedClause};
use super::lexeme::{
    PResult, clause_text, element_end, identifier, keyword, table_identifier, word, ws,
};
use nom::branch::alt;
use nom::bytes::complete::take_while1;
use nom::character::complete::{char, satisfy};
use nom::combinator::{map, opt, peek, value};
use nom::multi::separated_list1;
use nom::sequence::{delimited, pair, preceded, terminated};
use nom::Parser;

/// `CREATE`
pub(crate) fn create(input: &str) -> PResult<'_, &str> {
    ws(keyword("CREATE")).parse(input)
}

/// `[GLOBAL|LOCAL] TEMP|TEMPORARY`
pub(crate) fn temporary(input: &str) -> PResult<'_, bool> {
    map(
        opt(preceded(
            opt(ws(alt((keyword("GLOBAL"), keyword("LOCAL"))))),
            ws(alt((keyword("TEMPORARY"), keyword("TEMP")))),
        )),
        |marker| marker.is_some(),
    )
    .parse(input)
}

/// `TABLE`
pub(crate) fn table(input: &str) -> PResult<'_, &str> {
    ws(keyword("TABLE")).parse(input)
}

/// Optional `IF NOT EXISTS`
pub(crate) fn if_not_exists(input: &str) -> PResult<'_, bool> {
    map(opt(ws(keyword("IF NOT EXISTS"))), |clause| clause.is_some()).parse(input)
}

/// `[schema.]table`, returned as `(schema, table)`
pub(crate) fn qualified_name(input: &str) -> PResult<'_, (Option<String>, String)> {
    map(
        pair(
            ws(table_identifier),
            opt(preceded(ws(char('.')), ws(table_identifier))),
        ),
        |(first, second)| match second {
            Some(name) => (Some(first), name),
            None => (None, first),
        },
    )
    .parse(input)
}

/// One body element
pub(crate) fn body_element(input: &str) -> PResult<'_, BodyElement> {
    alt((
        map(suppressed_clause, BodyElement::Suppressed),
        map(constraint_clause, BodyElement::Constraint),
        map(column_clause, BodyElement::Column),
    ))
    .parse(input)
}

fn suppressed_clause(input: &str) -> PResult<'_, SuppressedClause> {
    let (input, kind) = alt((index_head, foreign_key_or_check_head)).parse(input)?;
    let (input, _) = clause_text(input)?;
    let (input, _) = element_end(input)?;
    Ok((input, kind))
}

/// `KEY|INDEX [name] (` or `FULLTEXT|SPATIAL [KEY|INDEX] [name] (`
///
/// The parenthesized list must open with an identifier, which keeps a
/// column such as `key VARCHAR(10)` out of this rule.
fn index_head(input: &str) -> PResult<'_, SuppressedClause> {
    let (input, prefix) = opt(ws(alt((keyword("FULLTEXT"), keyword("SPATIAL"))))).parse(input)?;
    let index_keyword = alt((keyword("KEY"), keyword("INDEX")));
    let (input, _) = match prefix {
        Some(_) => value((), opt(ws(index_keyword))).parse(input)?,
        None => value((), ws(index_keyword)).parse(input)?,
    };
    let (input, _) = opt(ws(identifier)).parse(input)?;
    let (input, _) = peek(pair(
        ws(char('(')),
        ws(satisfy(|c: char| c.is_ascii_alphabetic() || matches!(c, '_' | '`' | '"'))),
    ))
    .parse(input)?;
    Ok((input, SuppressedClause::Index))
}

/// `[CONSTRAINT name] FOREIGN KEY` or `[CONSTRAINT name] CHECK (`
fn foreign_key_or_check_head(input: &str) -> PResult<'_, SuppressedClause> {
    preceded(
        opt(pair(ws(keyword("CONSTRAINT")), ws(identifier))),
        alt((
            value(SuppressedClause::ForeignKey, ws(keyword("FOREIGN KEY"))),
            value(
                SuppressedClause::Check,
                terminated(ws(keyword("CHECK")), peek(ws(char('(')))),
            ),
        )),
    )
    .parse(input)
}

/// `[CONSTRAINT name] kind [index name] (col [ASC|DESC], ...) [index options]`
fn constraint_clause(input: &str) -> PResult<'_, ConstraintClause> {
    let (input, name) = opt(preceded(ws(keyword("CONSTRAINT")), ws(identifier))).parse(input)?;
    let (input, kind) = ws(constraint_kind).parse(input)?;
    let (input, index_name) = opt(ws(identifier)).parse(input)?;
    let (input, columns) = delimited(
        ws(char('(')),
        separated_list1(ws(char(',')), ws(column_reference)),
        ws(char(')')),
    )
    .parse(input)?;
    // index options such as `USING BTREE` carry no column schema
    let (input, _) = clause_text(input)?;
    let (input, _) = element_end(input)?;

    Ok((
        input,
        ConstraintClause {
            name,
            kind,
            index_name,
            columns,
        },
    ))
}

/// Constraint keyword, longest alternative first
fn constraint_kind(input: &str) -> PResult<'_, ConstraintKind> {
    alt((
        value(ConstraintKind::PrimaryKey, keyword("PRIMARY KEY")),
        value(ConstraintKind::UniqueKey, keyword("UNIQUE KEY")),
        value(ConstraintKind::UniqueKey, keyword("UNIQUE INDEX")),
        value(ConstraintKind::Unique, keyword("UNIQUE")),
        value(ConstraintKind::NotNull, keyword("NOT NULL")),
    ))
    .parse(input)
}

fn column_reference(input: &str) -> PResult<'_, String> {
    terminated(
        identifier,
        opt(ws(alt((keyword("ASC"), keyword("DESC"))))),
    )
    .parse(input)
}

/// `<name> <type tokens> [constraint text]`
fn column_clause(input: &str) -> PResult<'_, ColumnClause> {
    let (input, name) = ws(identifier).parse(input)?;
    let (input, type_tokens) = ws(data_type).parse(input)?;
    let (input, constraint) = clause_text(input)?;
    let (input, _) = element_end(input)?;

    Ok((
        input,
        ColumnClause {
            name,
            type_tokens,
            constraint: (!constraint.is_empty()).then_some(constraint),
        },
    ))
}

/// Base type word, then at most one qualifier and one size spec in either order
pub(crate) fn data_type(input: &str) -> PResult<'_, Vec<String>> {
    let (mut input, base) = word(input)?;
    let mut tokens = vec![base.to_string()];
    let mut qualified = false;
    let mut sized = false;

    loop {
        if !qualified {
            if let Ok((rest, qualifier)) = ws(type_qualifier).parse(input) {
                tokens.push(qualifier.to_string());
                qualified = true;
                input = rest;
                continue;
            }
        }
        if !sized {
            if let Ok((rest, spec)) = ws(size_spec).parse(input) {
                tokens.push(spec);
                sized = true;
                input = rest;
                continue;
            }
        }
        break;
    }

    Ok((input, tokens))
}

fn type_qualifier(input: &str) -> PResult<'_, &'static str> {
    alt((
        value("WITHOUT TIME ZONE", keyword("WITHOUT TIME ZONE")),
        value("WITH TIME ZONE", keyword("WITH TIME ZONE")),
        value("PRECISION", keyword("PRECISION")),
        value("VARYING", keyword("VARYING")),
    ))
    .parse(input)
}

/// `( ... )` holding digits, commas or a word; returned trimmed
fn size_spec(input: &str) -> PResult<'_, String> {
    map(
        delimited(
            char('('),
            ws(take_while1(|c: char| {
                c.is_ascii_alphanumeric() || c == '_' || c == ',' || c.is_whitespace()
            })),
            ws(char(')')),
        ),
        |spec: &str| spec.trim().to_string(),
    )
    .parse(input)
}
