use crate::ast::{CmpValue, RegexValue, ScalarValue};
use std::cmp::Ordering;

/// Abstract Syntax Tree node representing a when-clause expression.
///
/// Expressions are immutable value objects: equality is structural, there
/// is no identity beyond the tree itself, and every operation produces a
/// new tree. Construction normally goes through the smart constructors
/// ([`Expr::and`], [`Expr::or`], [`Expr::equals`], ...) or the parser,
/// both of which enforce the canonical-form invariants:
///
/// - `And`/`Or` children are flattened, de-duplicated and sorted
/// - constants absorb (`x && false` is `false`, `x || false` is `x`)
/// - `Not` only ever wraps `Has`, `Regex` or `In`; every other variant
///   has a direct negation partner and `!` on `And`/`Or` decomposes via
///   De Morgan at construction time
#[derive(Debug, Clone)]
pub enum Expr {
    /// Constant false
    False,

    /// Constant true
    True,

    /// Key-defined test, true iff the context holds a truthy value
    ///
    /// # Example
    /// ```text
    /// editorTextFocus
    /// ```
    Has(String),

    /// Negation of a `Has`, `Regex` or `In` test
    ///
    /// # Examples
    /// ```text
    /// !isInDiffEditor
    /// !(resourceScheme =~ /^git$/)
    /// ```
    Not(Box<Expr>),

    /// Loose string equality against a context value
    ///
    /// # Example
    /// ```text
    /// editorLangId == 'sql'
    /// ```
    Equals { key: String, value: String },

    /// Loose string inequality against a context value
    NotEquals { key: String, value: String },

    /// Numeric greater-than comparison
    ///
    /// # Example
    /// ```text
    /// workspaceFolderCount > 1
    /// ```
    Greater { key: String, value: CmpValue },

    /// Numeric greater-or-equal comparison
    GreaterEquals { key: String, value: CmpValue },

    /// Numeric less-than comparison
    Smaller { key: String, value: CmpValue },

    /// Numeric less-or-equal comparison
    SmallerEquals { key: String, value: CmpValue },

    /// Regex match against the text coercion of a context value
    ///
    /// # Example
    /// ```text
    /// resourceFilename =~ /docker/i
    /// ```
    Regex { key: String, value: RegexValue },

    /// Membership of one context value inside another
    ///
    /// True iff the value at `key` is an element of the array held at
    /// `list_key`, or an own key of the object held at `list_key`.
    ///
    /// # Example
    /// ```text
    /// resourceScheme in supportedSchemes
    /// ```
    In { key: String, list_key: String },

    /// Variadic conjunction; children are flattened, unique and sorted
    And(Vec<Expr>),

    /// Variadic disjunction; children are flattened, unique and sorted
    Or(Vec<Expr>),
}

impl Expr {
    /// Key-defined test for `key`.
    pub fn has(key: impl Into<String>) -> Expr {
        Expr::Has(key.into())
    }

    /// Equality comparison.
    ///
    /// Boolean right-hand sides collapse at construction: `key == true`
    /// is the same test as the bare key, `key == false` its negation.
    /// Numeric right-hand sides are stored through their display form and
    /// compared loosely at evaluation time.
    ///
    /// # Examples
    ///
    /// ```
    /// use when_clause::Expr;
    ///
    /// assert_eq!(Expr::equals("a", true), Expr::has("a"));
    /// assert_eq!(Expr::equals("a", false), Expr::has("a").negate());
    /// assert_eq!(Expr::equals("a", 5).serialize(), "a == '5'");
    /// ```
    pub fn equals(key: impl Into<String>, value: impl Into<ScalarValue>) -> Expr {
        let key = key.into();
        match value.into() {
            ScalarValue::Boolean(true) => Expr::Has(key),
            ScalarValue::Boolean(false) => Expr::Not(Box::new(Expr::Has(key))),
            ScalarValue::String(value) => Expr::Equals { key, value },
        }
    }

    /// Inequality comparison; the boolean collapse mirrors [`Expr::equals`].
    pub fn not_equals(key: impl Into<String>, value: impl Into<ScalarValue>) -> Expr {
        let key = key.into();
        match value.into() {
            ScalarValue::Boolean(true) => Expr::Not(Box::new(Expr::Has(key))),
            ScalarValue::Boolean(false) => Expr::Has(key),
            ScalarValue::String(value) => Expr::NotEquals { key, value },
        }
    }

    /// Greater-than comparison.
    pub fn greater(key: impl Into<String>, value: impl Into<CmpValue>) -> Expr {
        Expr::Greater {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Greater-or-equal comparison.
    pub fn greater_equals(key: impl Into<String>, value: impl Into<CmpValue>) -> Expr {
        Expr::GreaterEquals {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Less-than comparison.
    pub fn smaller(key: impl Into<String>, value: impl Into<CmpValue>) -> Expr {
        Expr::Smaller {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Less-or-equal comparison.
    pub fn smaller_equals(key: impl Into<String>, value: impl Into<CmpValue>) -> Expr {
        Expr::SmallerEquals {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Regex match test.
    pub fn regex(key: impl Into<String>, value: RegexValue) -> Expr {
        Expr::Regex {
            key: key.into(),
            value,
        }
    }

    /// Membership test of the value at `key` inside the container at
    /// `list_key`.
    pub fn is_in(key: impl Into<String>, list_key: impl Into<String>) -> Expr {
        Expr::In {
            key: key.into(),
            list_key: list_key.into(),
        }
    }

    /// Conjunction of arbitrarily many expressions.
    ///
    /// Children are flattened (nested `And`s splice in), constants absorb
    /// (`false` wins, `true` drops out), duplicates are removed and the
    /// result is sorted. An empty conjunction is `true`; a single
    /// surviving child is returned unwrapped.
    ///
    /// # Examples
    ///
    /// ```
    /// use when_clause::Expr;
    ///
    /// let e = Expr::and([Expr::has("b"), Expr::has("a"), Expr::has("b")]);
    /// assert_eq!(e.serialize(), "a && b");
    ///
    /// assert_eq!(Expr::and([Expr::has("a"), Expr::False]), Expr::False);
    /// assert_eq!(Expr::and([Expr::has("a"), Expr::True]), Expr::has("a"));
    /// ```
    pub fn and(children: impl IntoIterator<Item = Expr>) -> Expr {
        let mut pending: Vec<Expr> = children.into_iter().collect();
        pending.reverse();
        let mut flat = Vec::new();

        while let Some(child) = pending.pop() {
            match child {
                Expr::True => {}
                Expr::False => return Expr::False,
                Expr::And(inner) => pending.extend(inner.into_iter().rev()),
                other => flat.push(other),
            }
        }

        flat.sort();
        flat.dedup();

        match flat.len() {
            0 => Expr::True,
            1 => flat.remove(0),
            _ => Expr::And(flat),
        }
    }

    /// Disjunction of arbitrarily many expressions; the dual of
    /// [`Expr::and`] (`true` wins, `false` drops out, empty is `false`).
    pub fn or(children: impl IntoIterator<Item = Expr>) -> Expr {
        let mut pending: Vec<Expr> = children.into_iter().collect();
        pending.reverse();
        let mut flat = Vec::new();

        while let Some(child) = pending.pop() {
            match child {
                Expr::False => {}
                Expr::True => return Expr::True,
                Expr::Or(inner) => pending.extend(inner.into_iter().rev()),
                other => flat.push(other),
            }
        }

        flat.sort();
        flat.dedup();

        match flat.len() {
            0 => Expr::False,
            1 => flat.remove(0),
            _ => Expr::Or(flat),
        }
    }

    /// The context keys this expression reads, sorted and de-duplicated.
    ///
    /// Hosts use this to re-evaluate only the clauses affected by a
    /// context change. The `in` operator contributes both its value key
    /// and its container key.
    ///
    /// # Examples
    ///
    /// ```
    /// use when_clause::deserialize;
    ///
    /// let e = deserialize("a && b || a in c").unwrap();
    /// assert_eq!(e.keys(), vec!["a", "b", "c"]);
    /// ```
    pub fn keys(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_keys(&mut out);
        out.sort();
        out.dedup();
        out
    }

    fn collect_keys(&self, out: &mut Vec<String>) {
        match self {
            Expr::False | Expr::True => {}
            Expr::Has(key) => out.push(key.clone()),
            Expr::Not(inner) => inner.collect_keys(out),
            Expr::Equals { key, .. }
            | Expr::NotEquals { key, .. }
            | Expr::Greater { key, .. }
            | Expr::GreaterEquals { key, .. }
            | Expr::Smaller { key, .. }
            | Expr::SmallerEquals { key, .. }
            | Expr::Regex { key, .. } => out.push(key.clone()),
            Expr::In { key, list_key } => {
                out.push(key.clone());
                out.push(list_key.clone());
            }
            Expr::And(children) | Expr::Or(children) => {
                for child in children {
                    child.collect_keys(out);
                }
            }
        }
    }

    /// Rank in the total order; ties are broken by fields.
    fn rank(&self) -> u8 {
        match self {
            Expr::False => 0,
            Expr::True => 1,
            Expr::Has(_) => 2,
            Expr::Not(_) => 3,
            Expr::Equals { .. } => 4,
            Expr::NotEquals { .. } => 5,
            Expr::Greater { .. } => 6,
            Expr::GreaterEquals { .. } => 7,
            Expr::Smaller { .. } => 8,
            Expr::SmallerEquals { .. } => 9,
            Expr::Regex { .. } => 10,
            Expr::In { .. } => 11,
            Expr::And(_) => 12,
            Expr::Or(_) => 13,
        }
    }
}

impl Ord for Expr {
    /// Total order over expressions: variant rank, then key, then value.
    ///
    /// This is what keeps `And`/`Or` children in a stable order, which in
    /// turn makes structural equality a plain tree walk and serialization
    /// deterministic.
    fn cmp(&self, other: &Self) -> Ordering {
        use Expr::*;
        match (self, other) {
            (Has(a), Has(b)) => a.cmp(b),
            (Not(a), Not(b)) => a.cmp(b),
            (
                Equals { key: ka, value: va },
                Equals { key: kb, value: vb },
            )
            | (
                NotEquals { key: ka, value: va },
                NotEquals { key: kb, value: vb },
            ) => ka.cmp(kb).then_with(|| va.cmp(vb)),
            (
                Greater { key: ka, value: va },
                Greater { key: kb, value: vb },
            )
            | (
                GreaterEquals { key: ka, value: va },
                GreaterEquals { key: kb, value: vb },
            )
            | (
                Smaller { key: ka, value: va },
                Smaller { key: kb, value: vb },
            )
            | (
                SmallerEquals { key: ka, value: va },
                SmallerEquals { key: kb, value: vb },
            ) => ka.cmp(kb).then_with(|| va.cmp(vb)),
            (
                Regex { key: ka, value: va },
                Regex { key: kb, value: vb },
            ) => ka.cmp(kb).then_with(|| va.cmp(vb)),
            (
                In { key: ka, list_key: la },
                In { key: kb, list_key: lb },
            ) => ka.cmp(kb).then_with(|| la.cmp(lb)),
            (And(a), And(b)) | (Or(a), Or(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Expr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Expr {}

#[test]
fn test_and_absorption() {
    let e = Expr::has("x");
    assert_eq!(Expr::and([e.clone(), Expr::False]), Expr::False);
    assert_eq!(Expr::and([e.clone(), Expr::True]), e);
    assert_eq!(Expr::or([e.clone(), Expr::True]), Expr::True);
    assert_eq!(Expr::or([e.clone(), Expr::False]), e);
    assert_eq!(Expr::and([]), Expr::True);
    assert_eq!(Expr::or([]), Expr::False);
}

#[test]
fn test_children_are_sorted_and_unique() {
    let e = Expr::and([
        Expr::has("b"),
        Expr::has("a"),
        Expr::has("b"),
        Expr::equals("a", "1"),
    ]);
    match e {
        Expr::And(children) => {
            assert_eq!(children.len(), 3);
            let mut sorted = children.clone();
            sorted.sort();
            assert_eq!(children, sorted);
        }
        other => panic!("expected And, got {:?}", other),
    }
}

#[test]
fn test_nested_same_kind_flattens() {
    let inner = Expr::and([Expr::has("a"), Expr::has("b")]);
    let outer = Expr::and([inner, Expr::has("c")]);
    match outer {
        Expr::And(children) => assert_eq!(children.len(), 3),
        other => panic!("expected And, got {:?}", other),
    }
}

#[test]
fn test_boolean_rhs_collapses() {
    assert_eq!(Expr::equals("k", true), Expr::has("k"));
    assert_eq!(
        Expr::equals("k", false),
        Expr::Not(Box::new(Expr::has("k")))
    );
    assert_eq!(Expr::not_equals("k", true), Expr::equals("k", false));
    assert_eq!(Expr::not_equals("k", false), Expr::has("k"));
}
