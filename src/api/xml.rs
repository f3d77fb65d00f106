//! Conversion of XML documents into a generic key/value tree.
//!
//! The tree is a `serde_json::Value` shaped like this:
//! - the root element is the top-level object (its own name is dropped)
//! - child elements are keyed by tag name; repeated tags become arrays
//! - attributes live under `@attributes`
//! - text goes under `#text`, or the element collapses to a plain string
//!   when it has no attributes and no child elements

use serde_json::{Map, Value};

const ATTRIBUTES_KEY: &str = "@attributes";
const TEXT_KEY: &str = "#text";

/// Error element extracted from an API error document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub message: String,
    pub code: u32,
}

/// Parse an XML document into a key/value tree
pub fn to_tree(xml: &str) -> Result<Value, roxmltree::Error> {
    let doc = roxmltree::Document::parse(xml)?;
    Ok(element_to_value(doc.root_element()))
}

fn element_to_value(node: roxmltree::Node) -> Value {
    let mut map = Map::new();

    let attributes: Map<String, Value> = node
        .attributes()
        .map(|a| (a.name().to_string(), Value::String(a.value().to_string())))
        .collect();
    if !attributes.is_empty() {
        map.insert(ATTRIBUTES_KEY.to_string(), Value::Object(attributes));
    }

    let mut text = String::new();
    for child in node.children() {
        if child.is_element() {
            let name = child.tag_name().name().to_string();
            let value = element_to_value(child);
            match map.get_mut(&name) {
                Some(Value::Array(items)) => items.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
                None => {
                    map.insert(name, value);
                }
            }
        } else if child.is_text() {
            text.push_str(child.text().unwrap_or_default());
        }
    }

    let text = text.trim();
    if map.is_empty() {
        return Value::String(text.to_string());
    }
    if !text.is_empty() {
        map.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
    }
    Value::Object(map)
}

/// Look up `response.error` in a converted tree
pub fn find_api_error(tree: &Value) -> Option<ApiError> {
    let error = tree.get("response")?.get("error")?;
    let error = match error {
        Value::Array(items) => items.first()?,
        other => other,
    };

    let (message, code) = match error {
        Value::String(text) => (text.clone(), None),
        Value::Object(map) => (
            map.get(TEXT_KEY)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            map.get(ATTRIBUTES_KEY)
                .and_then(|attrs| attrs.get("code"))
                .and_then(Value::as_str),
        ),
        _ => return None,
    };

    Some(ApiError {
        message,
        code: code.and_then(|c| c.trim().parse().ok()).unwrap_or(0),
    })
}

/// Parse an error body and extract the API error, if any
pub fn parse_api_error(body: &str) -> Option<ApiError> {
    to_tree(body).ok().as_ref().and_then(find_api_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ERROR_BODY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<yandexsearch version="1.0">
  <response date="20240101T120000">
    <error code="42">Invalid key</error>
  </response>
</yandexsearch>"#;

    #[test]
    fn test_tree_shape() {
        let tree = to_tree(ERROR_BODY).unwrap();
        assert_eq!(
            tree,
            json!({
                "@attributes": {"version": "1.0"},
                "response": {
                    "@attributes": {"date": "20240101T120000"},
                    "error": {
                        "@attributes": {"code": "42"},
                        "#text": "Invalid key"
                    }
                }
            })
        );
    }

    #[test]
    fn test_repeated_elements_become_array() {
        let tree = to_tree("<r><doc>a</doc><doc>b</doc><doc>c</doc></r>").unwrap();
        assert_eq!(tree, json!({"doc": ["a", "b", "c"]}));
    }

    #[test]
    fn test_extract_error() {
        let error = parse_api_error(ERROR_BODY).unwrap();
        assert_eq!(error.code, 42);
        assert_eq!(error.message, "Invalid key");
    }

    #[test]
    fn test_error_without_code() {
        let error = parse_api_error("<y><response><error>Oops</error></response></y>").unwrap();
        assert_eq!(error, ApiError { message: "Oops".to_string(), code: 0 });
    }

    #[test]
    fn test_no_error_node() {
        assert!(parse_api_error("<y><response><found>0</found></response></y>").is_none());
        assert!(parse_api_error("<html><body>Bad Request</body></html>").is_none());
    }

    #[test]
    fn test_not_xml() {
        assert!(to_tree("Bad Request").is_err());
        assert!(parse_api_error("").is_none());
    }
}
