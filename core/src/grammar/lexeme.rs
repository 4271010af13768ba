//! Lexical building blocks: trivia, keywords, identifiers and free-form clause text

use nom::branch::alt;
use nom::bytes::complete::{tag, tag_no_case, take_till1, take_while1};
use nom::character::complete::{char, multispace1, not_line_ending};
use nom::combinator::{map, peek, recognize, value};
use nom::error::{Error, ErrorKind};
use nom::multi::many0;
use nom::sequence::{delimited, pair, preceded};
use nom::{IResult, Parser};

pub(crate) type PResult<'a, O> = IResult<&'a str, O>;

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_table_char(c: char) -> bool {
    is_word_char(c) || c == '<' || c == '>'
}

/// `-- ...` up to the end of the line
pub(crate) fn line_comment(input: &str) -> PResult<'_, &str> {
    recognize(pair(tag("--"), not_line_ending)).parse(input)
}

/// Whitespace and line comments
pub(crate) fn trivia(input: &str) -> PResult<'_, ()> {
    value((), many0(alt((multispace1, line_comment)))).parse(input)
}

/// Run `parser` after skipping trivia
pub(crate) fn ws<'a, O, P>(parser: P) -> impl Parser<&'a str, Output = O, Error = Error<&'a str>>
where
    P: Parser<&'a str, Output = O, Error = Error<&'a str>>,
{
    preceded(trivia, parser)
}

fn tag_ci<'a>(word: &'static str, input: &'a str) -> PResult<'a, &'a str> {
    tag_no_case(word).parse(input)
}

fn gap(input: &str) -> PResult<'_, &str> {
    multispace1(input)
}

/// Case-insensitive keyword, possibly several space-separated words
///
/// Words may be separated by any whitespace and the last word must end on
/// a word boundary, so `KEY` does not match `key_id`.
pub(crate) fn keyword<'a>(words: &'static str) -> impl FnMut(&'a str) -> PResult<'a, &'a str> {
    move |input: &'a str| {
        let mut rest = input;
        for (index, word) in words.split(' ').enumerate() {
            if index > 0 {
                rest = gap(rest)?.0;
            }
            rest = tag_ci(word, rest)?.0;
        }
        if rest.starts_with(is_word_char) {
            return Err(nom::Err::Error(Error::new(rest, ErrorKind::Tag)));
        }
        Ok((rest, &input[..input.len() - rest.len()]))
    }
}

/// Unquoted word of ASCII letters, digits and underscores
pub(crate) fn word(input: &str) -> PResult<'_, &str> {
    take_while1(is_word_char).parse(input)
}

fn quoted<'a>(quote: char) -> impl Parser<&'a str, Output = String, Error = Error<&'a str>> {
    map(
        delimited(char(quote), take_till1(move |c: char| c == quote), char(quote)),
        String::from,
    )
}

/// Column or schema identifier; backtick and double-quote wrappers are stripped
pub(crate) fn identifier(input: &str) -> PResult<'_, String> {
    alt((quoted('`'), quoted('"'), map(word, String::from))).parse(input)
}

/// Table identifier; unquoted names may also contain `<` and `>`
pub(crate) fn table_identifier(input: &str) -> PResult<'_, String> {
    alt((
        quoted('`'),
        quoted('"'),
        map(take_while1(is_table_char), String::from),
    ))
    .parse(input)
}

/// Peek at the `,` or `)` that closes a body element
pub(crate) fn element_end(input: &str) -> PResult<'_, char> {
    peek(ws(alt((char(','), char(')'))))).parse(input)
}

/// Free-form text up to the next top-level `,` or `)`
///
/// Nested parentheses are balanced, quoted literals are copied verbatim and
/// line comments are dropped. Whitespace outside literals collapses to a
/// single space and the result is trimmed. Never fails; an unterminated
/// clause consumes the rest of the input.
pub(crate) fn clause_text(input: &str) -> PResult<'_, String> {
    let mut text = String::new();
    let mut depth = 0_usize;
    let mut end = input.len();
    let mut chars = input.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            ',' | ')' if depth == 0 => {
                end = pos;
                break;
            }
            '-' if input[pos..].starts_with("--") => {
                let line_end = input[pos..].find('\n').map_or(input.len(), |n| pos + n);
                while chars.next_if(|(next, _)| *next < line_end).is_some() {}
                push_space(&mut text);
                continue;
            }
            '\'' | '"' | '`' => {
                text.push(c);
                while let Some((_, inner)) = chars.next() {
                    text.push(inner);
                    if inner == c {
                        // a doubled quote is an escaped quote
                        match chars.next_if(|(_, next)| *next == c) {
                            Some((_, escaped)) => text.push(escaped),
                            None => break,
                        }
                    }
                }
                continue;
            }
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }

        if c.is_whitespace() {
            push_space(&mut text);
        } else {
            text.push(c);
        }
    }

    Ok((&input[end..], text.trim().to_string()))
}

fn push_space(text: &mut String) {
    if !text.is_empty() && !text.ends_with(' ') {
        text.push(' ');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trivia_skips_comments() {
        let (rest, ()) = trivia("  -- leading comment\n\t-- another\n  CREATE").unwrap();
        assert_eq!(rest, "CREATE");
    }

    #[test]
    fn test_keyword_case_and_spacing() {
        let (rest, matched) = keyword("PRIMARY KEY")("primary\n   key (id)").unwrap();
        assert_eq!(matched, "primary\n   key");
        assert_eq!(rest, " (id)");
    }

    #[test]
    fn test_keyword_word_boundary() {
        assert!(keyword("KEY")("key_id INT").is_err());
        assert!(keyword("TEMP")("TEMPORARY TABLE").is_err());
        assert!(keyword("UNIQUE")("UNIQUE(a)").is_ok());
    }

    #[test]
    fn test_identifier_quoting() {
        assert_eq!(identifier("`user id` INT").unwrap(), (" INT", "user id".to_string()));
        assert_eq!(identifier("\"Name\" TEXT").unwrap(), (" TEXT", "Name".to_string()));
        assert_eq!(identifier("col_1 INT").unwrap(), (" INT", "col_1".to_string()));
        assert!(identifier("(a)").is_err());
    }

    #[test]
    fn test_table_identifier_placeholder() {
        let (_, name) = table_identifier("<table_name> (").unwrap();
        assert_eq!(name, "<table_name>");
    }

    #[test]
    fn test_clause_text_stops_at_top_level() {
        let (rest, text) = clause_text(" NOT NULL DEFAULT now(), next INT)").unwrap();
        assert_eq!(text, "NOT NULL DEFAULT now()");
        assert_eq!(rest, ", next INT)");
    }

    #[test]
    fn test_clause_text_literals_and_comments() {
        let (rest, text) =
            clause_text(" DEFAULT 'a,b)''c'  -- trailing, comment\n  NOT   NULL\n)").unwrap();
        assert_eq!(text, "DEFAULT 'a,b)''c' NOT NULL");
        assert_eq!(rest, ")");
    }

    #[test]
    fn test_clause_text_unterminated() {
        let (rest, text) = clause_text(" DEFAULT (1").unwrap();
        assert_eq!(text, "DEFAULT (1");
        assert!(rest.is_empty());
    }
}
