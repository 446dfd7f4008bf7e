//! Canonical rendering of expressions back to the when-clause grammar.
//!
//! Serialization is the inverse of parsing through normalization: for
//! every expression `e`, `deserialize(&e.normalize().serialize())`
//! re-parses to exactly `e.normalize()`. A raw (unnormalized) tree also
//! serializes faithfully; it just may not be the canonical spelling of
//! its meaning.
//!
//! Parenthesization is minimal for the grammar: `&&` binds tighter than
//! `||`, so the only parentheses ever emitted wrap an OR child inside an
//! AND (possible when distribution was suppressed) and the operand of
//! `!` when it is not a bare key.

use crate::ast::{CmpValue, Expr};
use std::fmt;

impl Expr {
    /// Render to the canonical grammar string.
    ///
    /// # Examples
    ///
    /// ```
    /// use when_clause::{deserialize, Expr};
    ///
    /// let e = Expr::and([Expr::has("b"), Expr::equals("a", "x")]);
    /// assert_eq!(e.serialize(), "b && a == 'x'");
    ///
    /// // Round trip through normalization
    /// let e = deserialize("!(a && b)").unwrap().normalize();
    /// assert_eq!(deserialize(&e.serialize()), Some(e));
    /// ```
    pub fn serialize(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::False => write!(f, "false"),
            Expr::True => write!(f, "true"),
            Expr::Has(key) => write!(f, "{}", key),
            Expr::Not(inner) => match inner.as_ref() {
                Expr::Has(key) => write!(f, "!{}", key),
                other => write!(f, "!({})", other),
            },
            Expr::Equals { key, value } => write!(f, "{} == '{}'", key, value),
            Expr::NotEquals { key, value } => write!(f, "{} != '{}'", key, value),
            Expr::Greater { key, value } => write!(f, "{} > {}", key, value),
            Expr::GreaterEquals { key, value } => write!(f, "{} >= {}", key, value),
            Expr::Smaller { key, value } => write!(f, "{} < {}", key, value),
            Expr::SmallerEquals { key, value } => write!(f, "{} <= {}", key, value),
            Expr::Regex { key, value } => write!(
                f,
                "{} =~ /{}/{}",
                key,
                value.source(),
                if value.ignore_case() { "i" } else { "" }
            ),
            Expr::In { key, list_key } => write!(f, "{} in {}", key, list_key),
            Expr::And(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " && ")?;
                    }
                    // An OR child only survives here when distribution
                    // was suppressed; it needs parens under `&&`.
                    if matches!(child, Expr::Or(_)) {
                        write!(f, "({})", child)?;
                    } else {
                        write!(f, "{}", child)?;
                    }
                }
                Ok(())
            }
            Expr::Or(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " || ")?;
                    }
                    write!(f, "{}", child)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for CmpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CmpValue::Number(n) => write!(f, "{}", n),
            CmpValue::Text(s) => write!(f, "{}", s),
        }
    }
}

#[test]
fn test_leaf_forms() {
    use crate::ast::RegexValue;

    assert_eq!(Expr::True.serialize(), "true");
    assert_eq!(Expr::has("a").serialize(), "a");
    assert_eq!(Expr::not(Expr::has("a")).serialize(), "!a");
    assert_eq!(Expr::equals("a", "x").serialize(), "a == 'x'");
    assert_eq!(Expr::not_equals("a", "x").serialize(), "a != 'x'");
    assert_eq!(Expr::greater("a", 1.0).serialize(), "a > 1");
    assert_eq!(Expr::smaller_equals("a", 2.5).serialize(), "a <= 2.5");
    assert_eq!(
        Expr::regex("a", RegexValue::new("^x$", true).unwrap()).serialize(),
        "a =~ /^x$/i"
    );
    assert_eq!(Expr::is_in("a", "b").serialize(), "a in b");
}

#[test]
fn test_connective_spelling() {
    let e = Expr::and([Expr::has("a"), Expr::has("b")]);
    assert_eq!(e.serialize(), "a && b");

    let e = Expr::or([
        Expr::and([Expr::has("a"), Expr::has("c")]),
        Expr::has("b"),
    ]);
    assert_eq!(e.serialize(), "b || a && c");
}
