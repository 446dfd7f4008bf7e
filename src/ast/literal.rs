use regex::RegexBuilder;

/// Right-hand literal of an equality comparison (`==` / `!=`).
///
/// The grammar allows `true`, `false`, a quoted string, or a bare token.
/// Booleans never survive construction (the smart constructors collapse
/// them into key-defined tests), so this type only exists at the API
/// boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    /// Boolean literal (`key == true`)
    Boolean(bool),
    /// String literal, quoted or bare (`key == 'value'`, `key == value`)
    String(String),
}

impl From<bool> for ScalarValue {
    fn from(b: bool) -> Self {
        ScalarValue::Boolean(b)
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        ScalarValue::String(s.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        ScalarValue::String(s)
    }
}

impl From<i64> for ScalarValue {
    fn from(n: i64) -> Self {
        ScalarValue::String(n.to_string())
    }
}

impl From<f64> for ScalarValue {
    fn from(n: f64) -> Self {
        ScalarValue::String(n.to_string())
    }
}

/// Right-hand literal of an ordering comparison (`>`, `>=`, `<`, `<=`).
///
/// The literal is parsed once at construction: if the whole token parses
/// as a float it is stored numerically, otherwise the raw text is kept.
/// A non-numeric literal makes the comparison evaluate to false for every
/// context value; there is no lexicographic fallback.
#[derive(Debug, Clone)]
pub enum CmpValue {
    /// Numeric literal (`count > 5`)
    Number(f64),
    /// Non-numeric literal, kept verbatim for serialization
    Text(String),
}

impl CmpValue {
    /// The numeric side, if the literal was numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CmpValue::Number(n) => Some(*n),
            CmpValue::Text(_) => None,
        }
    }
}

impl From<&str> for CmpValue {
    /// Float-or-text parsing: the whole trimmed token must parse.
    fn from(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.parse::<f64>() {
            Ok(n) => CmpValue::Number(n),
            Err(_) => CmpValue::Text(trimmed.to_string()),
        }
    }
}

impl From<String> for CmpValue {
    fn from(s: String) -> Self {
        CmpValue::from(s.as_str())
    }
}

impl From<f64> for CmpValue {
    fn from(n: f64) -> Self {
        CmpValue::Number(n)
    }
}

impl From<i64> for CmpValue {
    fn from(n: i64) -> Self {
        CmpValue::Number(n as f64)
    }
}

impl PartialEq for CmpValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CmpValue::Number(a), CmpValue::Number(b)) => a.total_cmp(b).is_eq(),
            (CmpValue::Text(a), CmpValue::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for CmpValue {}

impl PartialOrd for CmpValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CmpValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CmpValue::*;
        match (self, other) {
            (Number(a), Number(b)) => a.total_cmp(b),
            (Number(_), Text(_)) => std::cmp::Ordering::Less,
            (Text(_), Number(_)) => std::cmp::Ordering::Greater,
            (Text(a), Text(b)) => a.cmp(b),
        }
    }
}

/// A compiled regex literal (`key =~ /pattern/i`).
///
/// The pattern is compiled once at construction. Identity (equality and
/// ordering) is decided by the pattern source and the case-insensitive
/// flag, never by the compiled automaton.
#[derive(Debug, Clone)]
pub struct RegexValue {
    source: String,
    ignore_case: bool,
    compiled: regex::Regex,
}

impl RegexValue {
    /// Compile a regex literal.
    ///
    /// # Examples
    ///
    /// ```
    /// use when_clause::RegexValue;
    ///
    /// let re = RegexValue::new("^untitled", true).unwrap();
    /// assert!(re.is_match("Untitled-1"));
    /// assert_eq!(re.source(), "^untitled");
    /// ```
    pub fn new(source: &str, ignore_case: bool) -> Result<Self, regex::Error> {
        let compiled = RegexBuilder::new(source)
            .case_insensitive(ignore_case)
            .build()?;
        Ok(RegexValue {
            source: source.to_string(),
            ignore_case,
            compiled,
        })
    }

    /// The raw pattern text between the slashes.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the `i` flag was present.
    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// Test a candidate string against the pattern.
    pub fn is_match(&self, text: &str) -> bool {
        self.compiled.is_match(text)
    }
}

impl PartialEq for RegexValue {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.ignore_case == other.ignore_case
    }
}

impl Eq for RegexValue {}

impl PartialOrd for RegexValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RegexValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.source
            .cmp(&other.source)
            .then(self.ignore_case.cmp(&other.ignore_case))
    }
}

#[test]
fn test_cmp_value_parsing() {
    assert_eq!(CmpValue::from("5"), CmpValue::Number(5.0));
    assert_eq!(CmpValue::from("2.5"), CmpValue::Number(2.5));
    assert_eq!(CmpValue::from("-1"), CmpValue::Number(-1.0));
    assert_eq!(CmpValue::from("abc"), CmpValue::Text("abc".to_string()));
    // "1" and "1.0" denote the same literal
    assert_eq!(CmpValue::from("1"), CmpValue::from("1.0"));
}

#[test]
fn test_regex_identity() {
    let a = RegexValue::new("foo", false).unwrap();
    let b = RegexValue::new("foo", false).unwrap();
    let c = RegexValue::new("foo", true).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}
