/// parse document with structure like " title1 key1: value1, value2 key2: value2 title2 key3:value3, value4" which has titles and
/// pairs key-vector of values. Used to read root finding tasks:
/// ```text
/// function
/// expression: "x^2 - 4"
/// method
/// name: bisection
/// a: 0
/// b: 3
/// ```
/// Lines starting with //, #, % or ; are comments.
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{alpha1, alphanumeric1, char, multispace0, space0},
    combinator::{map, map_res, recognize},
    multi::{many0, many1, separated_list0},
    sequence::{delimited, pair, separated_pair, terminated},
};
use std::collections::HashMap;
use std::fmt::Display;

pub type DocumentMap = HashMap<String, SectionMap>;
pub type SectionMap = HashMap<String, Vec<Value>>;
/// enum to represent different value types:
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Float(f64),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    // Helper functions to access different value types
    pub fn as_string(&self) -> Option<&String> {
        if let Value::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    /// numeric value, integers are widened
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        if let Value::Integer(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    // Try to convert to string representation
    pub fn to_string_value(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Float(f) => f.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Boolean(b) => b.to_string(),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_value())
    }
}

fn parse_identifier(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    map(parser, String::from).parse(input)
}

/// Parses a title (word characters without spaces), trailing whitespace is dropped
pub(crate) fn parse_title(input: &str) -> IResult<&str, String> {
    let (input, result) = parse_identifier(input)?;
    Ok((input.trim(), result))
}

/// Parses a key (word characters without spaces)
pub(crate) fn parse_key(input: &str) -> IResult<&str, String> {
    parse_identifier(input)
}

/// double quoted string, may contain spaces and commas
fn parse_quoted_value(input: &str) -> IResult<&str, Value> {
    map(
        delimited(char('"'), take_while(|c: char| c != '"'), char('"')),
        |s: &str| Value::String(s.to_string()),
    )
    .parse(input)
}

fn parse_plain_value(input: &str) -> IResult<&str, Value> {
    // Parse a single value - excluding commas, whitespace, newlines, and semicolons
    let value_parser = take_while1(|c: char| !matches!(c, ',' | ' ' | '\t' | '\r' | '\n' | ';'));
    let mut value_parser = map_res(value_parser, |s: &str| -> Result<Value, String> {
        // Try parsing as different types in order
        if let Ok(val) = s.parse::<i64>() {
            Ok(Value::Integer(val))
        } else if let Ok(val) = s.parse::<f64>() {
            Ok(Value::Float(val))
        } else if let Ok(val) = s.parse::<bool>() {
            Ok(Value::Boolean(val))
        } else {
            Ok(Value::String(s.to_string()))
        }
    });
    value_parser.parse(input)
}

pub(crate) fn parse_value(input: &str) -> IResult<&str, Value> {
    alt((parse_quoted_value, parse_plain_value)).parse(input)
}

pub(crate) fn parse_value_list(input: &str) -> IResult<&str, Vec<Value>> {
    let (input, _) = space0(input)?;
    let separator_coma = delimited(space0, tag(","), space0);
    separated_list0(separator_coma, parse_value).parse(input)
}

/// Parses a key-value pair where value is a list
pub(crate) fn parse_key_value_pair(input: &str) -> IResult<&str, (String, Vec<Value>)> {
    let colon_separator = delimited(space0, tag(":"), space0);
    let mut parser = separated_pair(parse_key, colon_separator, parse_value_list);
    let (input, result) = parser.parse(input)?;
    Ok((input.trim(), result))
}

/// Parses a section with a title and multiple key-value pairs
pub(crate) fn parse_section(input: &str) -> IResult<&str, (String, SectionMap)> {
    let (input, _) = space0(input)?;
    let (input, title) = parse_title(input)?;
    let (input, _) = multispace0(input)?;
    let mut parser = many1(terminated(parse_key_value_pair, space0));
    let (input, pairs) = parser.parse(input)?;

    let section_map: SectionMap = pairs.into_iter().collect();
    Ok((input, (title, section_map)))
}

/// Filters out comment lines (starting with //, #, %, or ;) and blank lines
pub(crate) fn filter_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("//")
                && !trimmed.starts_with('#')
                && !trimmed.starts_with('%')
                && !trimmed.starts_with(';')
                && !trimmed.is_empty()
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Parses the entire document into a HashMap
pub fn parse_document(input: &str) -> IResult<&str, DocumentMap> {
    let mut parser = many1(delimited(space0, parse_section, multispace0));
    let (input, sections) = parser.parse(input)?;
    let mut result = HashMap::new();
    for (title, section_map) in sections {
        result.insert(title, section_map);
    }
    Ok((input, result))
}

/// Helper function to parse a whole document with comments, nothing may be left over
pub fn parse_document_as(input: &str) -> Result<DocumentMap, String> {
    let filtered = filter_comments(input);
    match parse_document(&filtered) {
        Ok((remaining, parsed)) => {
            if !remaining.trim().is_empty() {
                return Err(format!(
                    "Failed to parse entire document. Remaining: '{}'",
                    remaining
                ));
            }
            Ok(parsed)
        }
        Err(e) => Err(format!("Parsing error: {:?}", e)),
    }
}
