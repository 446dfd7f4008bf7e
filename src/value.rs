use std::collections::HashMap;

/// A context value used throughout the when-clause expression engine.
///
/// Hosts publish context entries (editor focus state, selection state,
/// feature flags, ...) as values of this type, and expressions are
/// evaluated against them. The type is a closed sum so every coercion
/// rule in the evaluator is exhaustively checkable.
///
/// # Coercion
///
/// Values carry no behavior of their own beyond the coercions the
/// evaluator needs:
/// - truthiness for bare-key tests (`editorTextFocus`)
/// - numeric coercion for ordering comparisons (`gitOpenRepositoryCount >= 1`)
/// - text coercion for regex matches (`resourceScheme =~ /^untitled$/`)
///
/// # Examples
///
/// ```
/// use when_clause::Value;
/// use std::collections::HashMap;
///
/// // Scalar values
/// let null = Value::Null;
/// let boolean = Value::Boolean(true);
/// let integer = Value::Integer(42);
/// let float = Value::Float(3.14);
/// let string = Value::String("hello".to_string());
///
/// // Collections (used by the `in` operator)
/// let array = Value::Array(vec![Value::Integer(1), Value::Integer(2)]);
///
/// let mut obj = HashMap::new();
/// obj.insert("key".to_string(), Value::Boolean(false));
/// let object = Value::Object(obj);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null / published-but-empty value
    Null,

    /// Boolean (true/false)
    Boolean(bool),

    /// Floating-point number
    Float(f64),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// UTF-8 string
    String(String),

    /// Array of values (membership container for `in`)
    Array(Vec<Value>),

    /// Object with string keys (key-presence container for `in`)
    Object(HashMap<String, Value>),
}

impl Value {
    /// Check if the value is truthy for bare-key tests.
    ///
    /// The rule is the ECMAScript one: `null`, `false`, `0`, `0.0`, `NaN`
    /// and `""` are falsy; everything else, including empty arrays and
    /// empty objects, is truthy.
    pub fn is_truthy(&self) -> bool {
        use Value::*;
        match self {
            Null => false,
            Boolean(b) => *b,
            Float(n) => *n != 0.0 && !n.is_nan(),
            Integer(n) => *n != 0,
            String(s) => !s.is_empty(),
            Array(_) => true,
            Object(_) => true,
        }
    }

    /// Numeric coercion for ordering comparisons.
    ///
    /// Integers and floats coerce directly; strings coerce only when the
    /// whole trimmed string parses as a float. Booleans, null and
    /// collections never coerce.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Text coercion for regex matching.
    ///
    /// Strings match as-is, numbers and booleans via their display form.
    /// Null and collections produce no text and therefore never match.
    pub fn as_match_text(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Integer(n) => Some(n.to_string()),
            Value::Float(n) => Some(n.to_string()),
            Value::Boolean(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for Value {
    /// Convert a JSON value into a context value.
    ///
    /// JSON numbers become [`Value::Integer`] when exactly representable
    /// as `i64`, otherwise [`Value::Float`].
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::Integer(n) => serde_json::Value::from(*n),
            Value::Float(n) => serde_json::Value::from(*n),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            Value::Object(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

#[test]
fn test_truthiness() {
    assert!(!Value::Null.is_truthy());
    assert!(!Value::Boolean(false).is_truthy());
    assert!(!Value::Integer(0).is_truthy());
    assert!(!Value::Float(0.0).is_truthy());
    assert!(!Value::Float(f64::NAN).is_truthy());
    assert!(!Value::String(String::new()).is_truthy());

    assert!(Value::Boolean(true).is_truthy());
    assert!(Value::Integer(-1).is_truthy());
    assert!(Value::Float(0.5).is_truthy());
    assert!(Value::String("x".into()).is_truthy());
    assert!(Value::Array(vec![]).is_truthy());
    assert!(Value::Object(HashMap::new()).is_truthy());
}

#[test]
fn test_json_round_trip() {
    let json = serde_json::json!({
        "flag": true,
        "count": 3,
        "ratio": 0.5,
        "name": "x",
        "items": [1, "two", null],
    });
    let value = Value::from(json.clone());
    assert_eq!(serde_json::Value::from(&value), json);
}

#[test]
fn test_numeric_coercion() {
    assert_eq!(Value::Integer(2).as_number(), Some(2.0));
    assert_eq!(Value::String("2".into()).as_number(), Some(2.0));
    assert_eq!(Value::String(" 2.5 ".into()).as_number(), Some(2.5));
    assert_eq!(Value::String("a".into()).as_number(), None);
    assert_eq!(Value::Boolean(true).as_number(), None);
    assert_eq!(Value::Null.as_number(), None);
}
