/// parse task document with structure like " title1 key1: value1, value2 key2: value2 title2 key3:value3, value4" which has titles and
/// pairs key-vector of values into HashMap<String, HashMap<String, Option<Vec<Value>>>>.
/// If some field i.e field_x of the template is not found in the document it will be field_x: None.
///
/// Example of a quadrature task:
/// ```text
/// interval
/// a: 0.0
/// b: 2.0
/// accuracy
/// epsilon: 1e-4
/// M2: 0.43156
/// ```
use crate::numerical::Quadrature::quad_error::QuadratureError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, alphanumeric1, multispace0, space0},
    combinator::{map, map_res, recognize},
    multi::{many0, many1, separated_list0},
    sequence::{delimited, pair, separated_pair, terminated},
};
use std::collections::HashMap;
use std::fmt::Display;

pub type TaskDocument = HashMap<String, SectionMap>;
pub type SectionMap = HashMap<String, Option<Vec<Value>>>;

/// enum to represent different value types:
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Float(f64),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    /// numeric value; integers are widened so "b: 2" and "b: 2.0" mean the same
    pub fn as_float(&self) -> Option<f64> {
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

    pub fn as_boolean(&self) -> Option<bool> {
        if let Value::Boolean(b) = self {
            Some(*b)
        } else {
            None
        }
    }

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
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Float(val) => write!(f, "{}", val),
            Value::Integer(val) => write!(f, "{}", val),
            Value::Boolean(val) => write!(f, "{}", val),
        }
    }
}

/// word characters: letter or underscore first, then alphanumerics and underscores
fn parse_identifier(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    let mut parser = map(parser, String::from);
    parser.parse(input)
}

/// Parses a title, dropping whitespace and newlines after it
fn parse_title(input: &str) -> IResult<&str, String> {
    let (input, result) = parse_identifier(input)?;
    Ok((input.trim(), result))
}

fn parse_key(input: &str) -> IResult<&str, String> {
    parse_identifier(input)
}

fn parse_value(input: &str) -> IResult<&str, Value> {
    // a single value ends at a comma, whitespace, newline or semicolon
    let value_parser = take_while1(|c: char| !matches!(c, ',' | ' ' | '\t' | '\n' | '\r' | ';'));
    let mut value_parser = map_res(value_parser, |s: &str| -> Result<Value, String> {
        let s = s.trim();
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

fn parse_value_list(input: &str) -> IResult<&str, Vec<Value>> {
    let (input, _) = space0(input)?;
    let separator_coma = delimited(space0, tag(","), space0);
    let mut value_parser = separated_list0(separator_coma, parse_value);
    value_parser.parse(input)
}

/// Parses a key-value pair where value is a list
fn parse_key_value_pair(input: &str) -> IResult<&str, (String, Vec<Value>)> {
    let colon_separator = delimited(space0, tag(":"), space0);
    let mut parser = separated_pair(parse_key, colon_separator, parse_value_list);
    let (input, result) = parser.parse(input)?;
    Ok((input.trim(), result))
}

/// Parses a section with a title and multiple key-value pairs
fn parse_section(input: &str) -> IResult<&str, (String, HashMap<String, Vec<Value>>)> {
    let (input, _) = space0(input)?;
    let (input, title) = parse_title(input)?;
    let (input, _) = multispace0(input)?;
    let mut parser = many1(terminated(parse_key_value_pair, space0));
    let (input, pairs) = parser.parse(input)?;

    let section_map = pairs.into_iter().collect::<HashMap<_, _>>();
    Ok((input, (title, section_map)))
}

/// Filters out comment lines (starting with //, #, %, or ;) and blank lines
fn filter_comments(input: &str) -> String {
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
        .map(str::trim)
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Parses the (comment-free) document into a HashMap
fn parse_document(input: &str) -> IResult<&str, TaskDocument> {
    let mut parser = many1(delimited(space0, parse_section, multispace0));
    let (input, sections) = parser.parse(input)?;

    let mut result = HashMap::new();
    for (title, section_map) in sections.into_iter() {
        let title_map: SectionMap = section_map
            .into_iter()
            .map(|(key, values)| (key, Some(values)))
            .collect();
        result.insert(title, title_map);
    }
    Ok((input, result))
}

/// Parse a task document, optionally merging it with a template so that every
/// expected title and key exists in the result (missing keys map to None)
pub fn parse_task_document(
    input: &str,
    template: Option<&HashMap<String, Vec<String>>>,
) -> Result<TaskDocument, QuadratureError> {
    let filtered = filter_comments(input);
    let mut parsed = if filtered.is_empty() {
        HashMap::new()
    } else {
        let (remaining, parsed) = parse_document(&filtered)
            .map_err(|e| QuadratureError::TaskParse(format!("{:?}", e)))?;
        if !remaining.trim().is_empty() {
            return Err(QuadratureError::TaskParse(format!(
                "failed to parse entire document, remaining: '{}'",
                remaining
            )));
        }
        parsed
    };

    if let Some(template) = template {
        for (title, keys) in template {
            let section_map = parsed.entry(title.clone()).or_default();
            for key in keys {
                section_map.entry(key.clone()).or_insert(None);
            }
        }
    }
    Ok(parsed)
}

/// First value of `section.key` as f64; Ok(None) if absent
pub fn get_float(doc: &TaskDocument, section: &str, key: &str) -> Result<Option<f64>, QuadratureError> {
    match first_value(doc, section, key) {
        None => Ok(None),
        Some(value) => value.as_float().map(Some).ok_or_else(|| invalid(section, key)),
    }
}

/// First value of `section.key` as a string; numbers and booleans are rendered back
pub fn get_string(doc: &TaskDocument, section: &str, key: &str) -> Option<String> {
    first_value(doc, section, key).map(|value| value.to_string_value())
}

pub fn get_boolean(doc: &TaskDocument, section: &str, key: &str) -> Result<Option<bool>, QuadratureError> {
    match first_value(doc, section, key) {
        None => Ok(None),
        Some(value) => value.as_boolean().map(Some).ok_or_else(|| invalid(section, key)),
    }
}

fn first_value<'a>(doc: &'a TaskDocument, section: &str, key: &str) -> Option<&'a Value> {
    doc.get(section)
        .and_then(|s| s.get(key))
        .and_then(|values| values.as_ref())
        .and_then(|values| values.first())
}

fn invalid(section: &str, key: &str) -> QuadratureError {
    QuadratureError::InvalidTaskValue {
        section: section.to_string(),
        key: key.to_string(),
    }
}

/////////////////////////////TESTS////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_title() {
        let (remaining, title) = parse_title("interval\n a: 0.0").unwrap();
        assert_eq!(title, "interval");
        assert_eq!(remaining, "a: 0.0");

        let (remaining, title) = parse_title("output_1 csv: r.csv").unwrap();
        assert_eq!(title, "output_1");
        assert_eq!(remaining, "csv: r.csv");
    }

    #[test]
    fn test_parse_key() {
        let (remaining, key) = parse_key("M2: 0.43156").unwrap();
        assert_eq!(key, "M2");
        assert_eq!(remaining, ": 0.43156");
        assert!(parse_key("2M: 1").is_err());
    }

    #[test]
    fn test_parse_value() {
        let (remaining, value) = parse_value("1e-4, next").unwrap();
        assert_eq!(value, Value::Float(1e-4));
        assert_eq!(remaining, ", next");

        let (_, value) = parse_value("2").unwrap();
        assert_eq!(value, Value::Integer(2));
        let (_, value) = parse_value("true").unwrap();
        assert_eq!(value, Value::Boolean(true));
        let (_, value) = parse_value("report.csv").unwrap();
        assert_eq!(value, Value::String("report.csv".to_string()));
    }

    #[test]
    fn test_parse_key_value_pair() {
        let (remaining, (key, values)) = parse_key_value_pair("b : 2.0 , 3").unwrap();
        assert_eq!(key, "b");
        assert_eq!(values, vec![Value::Float(2.0), Value::Integer(3)]);
        assert_eq!(remaining, "");

        let (remaining, (key, values)) = parse_key_value_pair("a: 0;").unwrap();
        assert_eq!(key, "a");
        assert_eq!(values, vec![Value::Integer(0)]);
        assert_eq!(remaining, ";");
    }

    #[test]
    fn test_parse_section() {
        let (remaining, (title, map)) = parse_section("interval a: 0.0 b: 2 accuracy").unwrap();
        assert_eq!(title, "interval");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("b").unwrap(), &vec![Value::Integer(2)]);
        assert_eq!(remaining, "accuracy");
    }

    #[test]
    fn test_filter_comments() {
        let input = "// comment\n  interval  \n# other\n\na: 1\n; last";
        assert_eq!(filter_comments(input), "interval\na: 1");
    }

    #[test]
    fn test_parse_task_document() {
        let input = r#"
            // quadrature task
            interval
            a: 0.0
            b: 2.0
            accuracy
            epsilon: 1e-4
            M2: 0.43156
            output
            loglevel: warn
            csv: report.csv
        "#;
        let doc = parse_task_document(input, None).unwrap();
        assert_eq!(doc.len(), 3);
        assert_eq!(get_float(&doc, "interval", "b").unwrap(), Some(2.0));
        assert_eq!(get_float(&doc, "accuracy", "epsilon").unwrap(), Some(1e-4));
        assert_eq!(get_float(&doc, "accuracy", "M2").unwrap(), Some(0.43156));
        assert_eq!(get_string(&doc, "output", "loglevel"), Some("warn".to_string()));
        assert_eq!(get_string(&doc, "output", "csv"), Some("report.csv".to_string()));
        assert_eq!(get_float(&doc, "interval", "c").unwrap(), None);
    }

    #[test]
    fn test_parse_task_document_with_template() {
        let template = HashMap::from([
            ("interval".to_string(), vec!["a".to_string(), "b".to_string()]),
            ("output".to_string(), vec!["csv".to_string()]),
        ]);
        let doc = parse_task_document("interval\na: 1", Some(&template)).unwrap();
        assert_eq!(doc["interval"]["a"], Some(vec![Value::Integer(1)]));
        assert_eq!(doc["interval"]["b"], None);
        assert_eq!(doc["output"]["csv"], None);
    }

    #[test]
    fn test_parse_task_document_empty_and_malformed() {
        assert!(parse_task_document("", None).unwrap().is_empty());
        assert!(parse_task_document("# only a comment", None).unwrap().is_empty());
        assert!(matches!(
            parse_task_document("interval\n: 1", None),
            Err(QuadratureError::TaskParse(_))
        ));
    }

    #[test]
    fn test_wrong_value_type() {
        let doc = parse_task_document("interval\na: zero\nflag: 1", None).unwrap();
        assert_eq!(
            get_float(&doc, "interval", "a"),
            Err(QuadratureError::InvalidTaskValue {
                section: "interval".to_string(),
                key: "a".to_string()
            })
        );
        assert!(get_boolean(&doc, "interval", "flag").is_err());
    }
}
