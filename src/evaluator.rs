use std::collections::HashMap;

use crate::{
    ast::{CmpValue, Expr},
    value::Value,
};

/// Capability handing the evaluator access to host state.
///
/// The host owns the lookup: editor focus flags, selection state,
/// feature switches, whatever it publishes under context keys. A key the
/// host does not know simply resolves to `None`, which every operator
/// treats as its falsy / no-match branch.
pub trait Context {
    fn get_value(&self, key: &str) -> Option<&Value>;
}

impl Context for HashMap<String, Value> {
    fn get_value(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

/// An owned key→value context.
///
/// The common host-side container for context state, also buildable
/// straight from a JSON object document.
///
/// # Examples
///
/// ```
/// use when_clause::{deserialize, KeyValueContext, Value};
///
/// let mut ctx = KeyValueContext::new();
/// ctx.set("editorTextFocus", Value::Boolean(true));
/// ctx.set("editorLangId", Value::String("sql".into()));
///
/// let expr = deserialize("editorTextFocus && editorLangId == 'sql'").unwrap();
/// assert!(expr.evaluate(&ctx));
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeyValueContext {
    entries: HashMap<String, Value>,
}

impl KeyValueContext {
    /// Creates an empty context; every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a value under `key`, replacing any previous one.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    /// Remove a key, making it absent rather than null.
    pub fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

impl Context for KeyValueContext {
    fn get_value(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }
}

impl From<HashMap<String, Value>> for KeyValueContext {
    fn from(entries: HashMap<String, Value>) -> Self {
        KeyValueContext { entries }
    }
}

impl From<serde_json::Value> for KeyValueContext {
    /// Build a context from a JSON document.
    ///
    /// Only an object document contributes entries (one per top-level
    /// field); any other JSON value yields an empty context.
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Object(fields) => KeyValueContext {
                entries: fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            },
            _ => KeyValueContext::new(),
        }
    }
}

impl Expr {
    /// Evaluate the expression against a context.
    ///
    /// Total and side-effect free: missing keys, type mismatches and
    /// failed coercions all resolve to the falsy / no-match branch of
    /// the operator at hand, never to an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use when_clause::{deserialize, KeyValueContext, Value};
    ///
    /// let mut ctx = KeyValueContext::new();
    /// ctx.set("a", Value::Boolean(true));
    /// ctx.set("c", Value::String("5".into()));
    ///
    /// assert!(deserialize("a && !b && c == 5").unwrap().evaluate(&ctx));
    /// assert!(!deserialize("b || c > 9").unwrap().evaluate(&ctx));
    /// ```
    pub fn evaluate<C: Context + ?Sized>(&self, context: &C) -> bool {
        match self {
            Expr::False => false,
            Expr::True => true,
            Expr::Has(key) => context.get_value(key).is_some_and(Value::is_truthy),
            Expr::Not(inner) => !inner.evaluate(context),
            Expr::Equals { key, value } => loose_equals(context.get_value(key), value),
            Expr::NotEquals { key, value } => !loose_equals(context.get_value(key), value),
            Expr::Greater { key, value } => {
                number_operands(context, key, value).is_some_and(|(l, r)| l > r)
            }
            Expr::GreaterEquals { key, value } => {
                number_operands(context, key, value).is_some_and(|(l, r)| l >= r)
            }
            Expr::Smaller { key, value } => {
                number_operands(context, key, value).is_some_and(|(l, r)| l < r)
            }
            Expr::SmallerEquals { key, value } => {
                number_operands(context, key, value).is_some_and(|(l, r)| l <= r)
            }
            Expr::Regex { key, value } => context
                .get_value(key)
                .and_then(Value::as_match_text)
                .is_some_and(|text| value.is_match(&text)),
            Expr::In { key, list_key } => member_of(context, key, list_key),
            Expr::And(children) => children.iter().all(|child| child.evaluate(context)),
            Expr::Or(children) => children.iter().any(|child| child.evaluate(context)),
        }
    }
}

/// Loose equality between a context value and an equality literal.
///
/// Strings compare directly; numbers compare numerically when the
/// literal parses as a float; booleans coerce to 0/1 first. Null,
/// missing values and collections never equal a literal.
fn loose_equals(value: Option<&Value>, literal: &str) -> bool {
    let Some(value) = value else {
        return false;
    };
    match value {
        Value::String(s) => s == literal,
        Value::Integer(n) => parses_to(literal, *n as f64),
        Value::Float(n) => parses_to(literal, *n),
        Value::Boolean(b) => parses_to(literal, if *b { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}

fn parses_to(literal: &str, n: f64) -> bool {
    literal.trim().parse::<f64>().is_ok_and(|lit| n == lit)
}

/// Both sides of an ordering comparison as floats, if available.
///
/// Left is the context coercion, right the stored literal. A non-numeric
/// literal or an uncoercible context value sinks the comparison.
fn number_operands<C: Context + ?Sized>(
    context: &C,
    key: &str,
    value: &CmpValue,
) -> Option<(f64, f64)> {
    let right = value.as_number()?;
    let left = context.get_value(key)?.as_number()?;
    Some((left, right))
}

/// Strict (identity-style) equality used for array membership.
///
/// Numbers compare numerically across integer/float, strings and
/// booleans by value, nulls are equal to each other. Composite values
/// have reference semantics in the source model and never match here.
fn strict_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Integer(x), Value::Integer(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x == y,
        (Value::Integer(x), Value::Float(y)) | (Value::Float(y), Value::Integer(x)) => {
            *x as f64 == *y
        }
        (Value::Null, Value::Null) => true,
        _ => false,
    }
}

/// The `in` operator: membership of the value at `key` inside the
/// container at `list_key`.
///
/// Array containers test element membership. Object containers test
/// own-key presence, so even a `false` entry counts as present. Every
/// other container kind (strings included) never matches.
fn member_of<C: Context + ?Sized>(context: &C, key: &str, list_key: &str) -> bool {
    let Some(container) = context.get_value(list_key) else {
        return false;
    };
    match container {
        Value::Array(items) => match context.get_value(key) {
            Some(value) => items.iter().any(|item| strict_equals(item, value)),
            None => false,
        },
        Value::Object(entries) => match context.get_value(key) {
            Some(Value::String(name)) => entries.contains_key(name),
            _ => false,
        },
        _ => false,
    }
}

#[test]
fn test_missing_keys_are_falsy() {
    let ctx = KeyValueContext::new();
    assert!(!Expr::has("missing").evaluate(&ctx));
    assert!(!Expr::equals("missing", "x").evaluate(&ctx));
    assert!(!Expr::greater("missing", 1.0).evaluate(&ctx));
    assert!(!Expr::smaller("missing", 1.0).evaluate(&ctx));
    assert!(!Expr::is_in("missing", "alsoMissing").evaluate(&ctx));
    // ...but their negations hold
    assert!(Expr::not_equals("missing", "x").evaluate(&ctx));
    assert!(Expr::has("missing").negate().evaluate(&ctx));
}

#[test]
fn test_loose_equality_coercion() {
    let mut ctx = KeyValueContext::new();
    ctx.set("n", Value::Integer(5));
    ctx.set("s", Value::String("5".into()));
    ctx.set("b", Value::Boolean(true));

    assert!(Expr::equals("n", "5").evaluate(&ctx));
    assert!(Expr::equals("s", "5").evaluate(&ctx));
    assert!(Expr::equals("b", "1").evaluate(&ctx));
    assert!(!Expr::equals("b", "true").evaluate(&ctx));
    assert!(!Expr::equals("n", "x").evaluate(&ctx));
}
