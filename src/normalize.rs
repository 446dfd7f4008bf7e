//! Canonical-form machinery: negation and normalization.
//!
//! The smart constructors in [`crate::ast::expr`] keep trees flat, sorted
//! and constant-folded at every construction site. This module adds the
//! two whole-tree transforms on top:
//!
//! - [`Expr::negate`] - total De Morgan negation with direct partners for
//!   every comparison kind
//! - [`Expr::normalize`] - idempotent rewrite to a sum-of-products form
//!   (OR of ANDs of leaves) in which semantically equivalent expressions
//!   compare equal and serialize identically

use crate::ast::Expr;

/// Upper bound on the number of product terms OR-distribution may
/// produce for a single conjunction.
///
/// Distribution is exponential in the number and width of OR children
/// (`(a||b) && (c||d) && ...`). When the product of branch counts
/// exceeds this limit the conjunction is left undistributed: evaluation
/// and serialization remain correct, the tree just is not in
/// sum-of-products form. `normalize` stays idempotent either way.
pub const DISTRIBUTION_LIMIT: usize = 4096;

impl Expr {
    /// Negation smart constructor.
    ///
    /// Equivalent to [`Expr::negate`]; provided so call sites building
    /// expressions read uniformly (`Expr::not(Expr::has("a"))`).
    pub fn not(expr: Expr) -> Expr {
        expr.negate()
    }

    /// Negate an expression.
    ///
    /// Every variant has a defined inverse, so negation never wraps
    /// blindly:
    ///
    /// - `true` ↔ `false`
    /// - `==` ↔ `!=`, `>` ↔ `<=`, `>=` ↔ `<`
    /// - `has`, `=~` and `in` gain or lose a `Not` wrapper
    /// - `&&` and `||` decompose via De Morgan
    ///
    /// The transform is involutive: `e.negate().negate() == e`.
    ///
    /// # Examples
    ///
    /// ```
    /// use when_clause::deserialize;
    ///
    /// let e = deserialize("a > 1").unwrap();
    /// assert_eq!(e.negate().serialize(), "a <= 1");
    ///
    /// let e = deserialize("a && b").unwrap();
    /// assert_eq!(e.negate().serialize(), "!a || !b");
    /// ```
    pub fn negate(&self) -> Expr {
        match self {
            Expr::True => Expr::False,
            Expr::False => Expr::True,
            Expr::Has(_) | Expr::Regex { .. } | Expr::In { .. } => {
                Expr::Not(Box::new(self.clone()))
            }
            Expr::Not(inner) => (**inner).clone(),
            Expr::Equals { key, value } => Expr::NotEquals {
                key: key.clone(),
                value: value.clone(),
            },
            Expr::NotEquals { key, value } => Expr::Equals {
                key: key.clone(),
                value: value.clone(),
            },
            Expr::Greater { key, value } => Expr::SmallerEquals {
                key: key.clone(),
                value: value.clone(),
            },
            Expr::GreaterEquals { key, value } => Expr::Smaller {
                key: key.clone(),
                value: value.clone(),
            },
            Expr::Smaller { key, value } => Expr::GreaterEquals {
                key: key.clone(),
                value: value.clone(),
            },
            Expr::SmallerEquals { key, value } => Expr::Greater {
                key: key.clone(),
                value: value.clone(),
            },
            Expr::And(children) => Expr::or(children.iter().map(Expr::negate)),
            Expr::Or(children) => Expr::and(children.iter().map(Expr::negate)),
        }
    }

    /// Rewrite to the canonical sum-of-products form.
    ///
    /// Bottom-up: children are normalized and rebuilt through the smart
    /// constructors (flattening, de-duplication, sorting and constant
    /// folding), then every conjunction distributes its OR children:
    /// `(a || b) && c` becomes `a && c || b && c`. The result is an OR
    /// of ANDs of leaves, unless [`DISTRIBUTION_LIMIT`] suppressed a
    /// distribution.
    ///
    /// Idempotent: `e.normalize().normalize() == e.normalize()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use when_clause::deserialize;
    ///
    /// let e = deserialize("(a || b) && c").unwrap().normalize();
    /// assert_eq!(e.serialize(), "a && c || b && c");
    /// ```
    pub fn normalize(&self) -> Expr {
        match self {
            Expr::Not(inner) => {
                let inner = inner.normalize();
                match inner {
                    Expr::Has(_) | Expr::Regex { .. } | Expr::In { .. } => {
                        Expr::Not(Box::new(inner))
                    }
                    // Anything else has a direct inverse or decomposes,
                    // and the decomposition may need distributing again.
                    other => other.negate().normalize(),
                }
            }
            Expr::And(children) => distribute(Expr::and(children.iter().map(Expr::normalize))),
            Expr::Or(children) => Expr::or(children.iter().map(Expr::normalize)),
            leaf => leaf.clone(),
        }
    }
}

/// Distribute the OR children of a conjunction, bounded by
/// [`DISTRIBUTION_LIMIT`].
fn distribute(expr: Expr) -> Expr {
    match expr {
        Expr::And(children) if children.iter().any(|c| matches!(c, Expr::Or(_))) => {
            let mut terms: usize = 1;
            for child in &children {
                let branches = match child {
                    Expr::Or(branches) => branches.len(),
                    _ => 1,
                };
                terms = terms.saturating_mul(branches);
                if terms > DISTRIBUTION_LIMIT {
                    return Expr::And(children);
                }
            }

            let mut products: Vec<Vec<Expr>> = vec![Vec::new()];
            for child in children {
                match child {
                    Expr::Or(branches) => {
                        let mut next = Vec::with_capacity(products.len() * branches.len());
                        for product in &products {
                            for branch in &branches {
                                let mut extended = product.clone();
                                extended.push(branch.clone());
                                next.push(extended);
                            }
                        }
                        products = next;
                    }
                    other => {
                        for product in &mut products {
                            product.push(other.clone());
                        }
                    }
                }
            }

            Expr::or(products.into_iter().map(Expr::and))
        }
        other => other,
    }
}

#[test]
fn test_negate_is_total() {
    use crate::ast::RegexValue;

    let samples = [
        Expr::True,
        Expr::False,
        Expr::has("a"),
        Expr::not(Expr::has("a")),
        Expr::equals("a", "x"),
        Expr::not_equals("a", "x"),
        Expr::greater("a", 1.0),
        Expr::greater_equals("a", 1.0),
        Expr::smaller("a", 1.0),
        Expr::smaller_equals("a", 1.0),
        Expr::regex("a", RegexValue::new("x", false).unwrap()),
        Expr::is_in("a", "b"),
        Expr::and([Expr::has("a"), Expr::has("b")]),
        Expr::or([Expr::has("a"), Expr::has("b")]),
    ];
    for expr in samples {
        assert_eq!(expr.negate().negate(), expr, "involution failed: {:?}", expr);
    }
}

#[test]
fn test_distribution_limit_leaves_tree_intact() {
    // 13 binary ORs -> 2^13 = 8192 products, over the limit
    let wide = Expr::and((0..13).map(|i| {
        Expr::or([
            Expr::has(format!("a{}", i)),
            Expr::has(format!("b{}", i)),
        ])
    }));
    let normalized = wide.normalize();
    assert!(matches!(normalized, Expr::And(_)));
    assert_eq!(normalized.normalize(), normalized);
}
