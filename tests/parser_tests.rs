// tests/parser_tests.rs

use when_clause::ast::{CmpValue, Expr};
use when_clause::parser::{deserialize, parse, ParseError};

// ============================================================================
// Simple tests
// ============================================================================

#[test]
fn test_bare_key() {
    let expr = parse("editorTextFocus").unwrap();
    assert!(matches!(expr, Expr::Has(key) if key == "editorTextFocus"));
}

#[test]
fn test_constants() {
    assert_eq!(parse("true").unwrap(), Expr::True);
    assert_eq!(parse("false").unwrap(), Expr::False);
}

#[test]
fn test_negated_key() {
    let expr = parse("!isInDiffEditor").unwrap();
    match expr {
        Expr::Not(inner) => {
            assert!(matches!(*inner, Expr::Has(key) if key == "isInDiffEditor"))
        }
        other => panic!("expected Not, got {:?}", other),
    }
}

#[test]
fn test_precedence_and_binds_tighter() {
    // a && b || c  parses as  (a && b) || c
    let expr = parse("a && b || c").unwrap();
    match expr {
        Expr::Or(children) => {
            assert_eq!(children.len(), 2);
            assert!(children.iter().any(|c| matches!(c, Expr::And(_))));
            assert!(children.iter().any(|c| matches!(c, Expr::Has(k) if k == "c")));
        }
        other => panic!("expected Or, got {:?}", other),
    }
}

#[test]
fn test_parentheses_override_precedence() {
    let expr = parse("a && (b || c)").unwrap();
    match expr {
        Expr::And(children) => {
            assert_eq!(children.len(), 2);
            assert!(children.iter().any(|c| matches!(c, Expr::Or(_))));
        }
        other => panic!("expected And, got {:?}", other),
    }
}

#[test]
fn test_negated_group_decomposes() {
    // De Morgan happens at construction: !(a && b) is !a || !b
    let expr = parse("!(a && b)").unwrap();
    match expr {
        Expr::Or(children) => {
            assert_eq!(children.len(), 2);
            assert!(children.iter().all(|c| matches!(c, Expr::Not(_))));
        }
        other => panic!("expected Or, got {:?}", other),
    }
}

// ============================================================================
// Equality comparisons
// ============================================================================

#[test]
fn test_equals_quoted_value() {
    let expr = parse("editorLangId == 'sql'").unwrap();
    assert!(matches!(
        expr,
        Expr::Equals { key, value } if key == "editorLangId" && value == "sql"
    ));
}

#[test]
fn test_equals_double_quoted_value() {
    let expr = parse("editorLangId == \"sql\"").unwrap();
    assert!(matches!(
        expr,
        Expr::Equals { value, .. } if value == "sql"
    ));
}

#[test]
fn test_equals_bare_value() {
    let expr = parse("editorLangId == sql").unwrap();
    assert!(matches!(
        expr,
        Expr::Equals { value, .. } if value == "sql"
    ));
}

#[test]
fn test_equals_numeric_value_stays_loose() {
    let expr = parse("count == 5").unwrap();
    assert!(matches!(
        expr,
        Expr::Equals { value, .. } if value == "5"
    ));
}

#[test]
fn test_equals_true_collapses_to_has() {
    assert_eq!(parse("a == true").unwrap(), Expr::has("a"));
    assert_eq!(parse("a != false").unwrap(), Expr::has("a"));
}

#[test]
fn test_equals_false_collapses_to_negation() {
    assert_eq!(parse("a == false").unwrap(), Expr::has("a").negate());
    assert_eq!(parse("a != true").unwrap(), Expr::has("a").negate());
}

#[test]
fn test_quoted_true_is_a_string() {
    let expr = parse("a == 'true'").unwrap();
    assert!(matches!(
        expr,
        Expr::Equals { value, .. } if value == "true"
    ));
}

#[test]
fn test_not_equals() {
    let expr = parse("resourceScheme != 'git'").unwrap();
    assert!(matches!(
        expr,
        Expr::NotEquals { key, value } if key == "resourceScheme" && value == "git"
    ));
}

// ============================================================================
// Ordering comparisons
// ============================================================================

#[test]
fn test_greater_with_spaces() {
    let expr = parse("workspaceFolderCount > 1").unwrap();
    assert!(matches!(
        expr,
        Expr::Greater { key, value: CmpValue::Number(n) }
            if key == "workspaceFolderCount" && n == 1.0
    ));
}

#[test]
fn test_greater_without_spaces() {
    let expr = parse("a>1").unwrap();
    assert!(matches!(
        expr,
        Expr::Greater { key, value: CmpValue::Number(n) } if key == "a" && n == 1.0
    ));
}

#[test]
fn test_all_ordering_operators() {
    assert!(matches!(parse("a >= 1").unwrap(), Expr::GreaterEquals { .. }));
    assert!(matches!(parse("a <= 1").unwrap(), Expr::SmallerEquals { .. }));
    assert!(matches!(parse("a < 1").unwrap(), Expr::Smaller { .. }));
    assert!(matches!(parse("a > 1.5").unwrap(), Expr::Greater { .. }));
}

#[test]
fn test_ordering_with_non_numeric_literal() {
    let expr = parse("a > b").unwrap();
    assert!(matches!(
        expr,
        Expr::Greater { value: CmpValue::Text(t), .. } if t == "b"
    ));
}

#[test]
fn test_quoted_ordering_literal_is_numeric() {
    let expr = parse("a > '5'").unwrap();
    assert!(matches!(
        expr,
        Expr::Greater { value: CmpValue::Number(n), .. } if n == 5.0
    ));
}

// ============================================================================
// Ambiguous keys: longest-key greedy matching
// ============================================================================

#[test]
fn test_key_with_angle_brackets_is_not_a_comparison() {
    let expr = parse("vim.use<C-r>").unwrap();
    assert!(matches!(expr, Expr::Has(key) if key == "vim.use<C-r>"));
}

#[test]
fn test_ambiguous_key_in_conjunction() {
    let expr = parse("editorTextFocus && vim.active && vim.use<C-r>").unwrap();
    match expr {
        Expr::And(children) => {
            assert_eq!(children.len(), 3);
            assert!(children
                .iter()
                .all(|c| matches!(c, Expr::Has(_))));
            assert!(children
                .iter()
                .any(|c| matches!(c, Expr::Has(k) if k == "vim.use<C-r>")));
        }
        other => panic!("expected And, got {:?}", other),
    }
}

#[test]
fn test_repeated_operator_chars_make_a_key() {
    assert!(matches!(parse("a>b>c").unwrap(), Expr::Has(k) if k == "a>b>c"));
    assert!(matches!(parse("a=b").unwrap(), Expr::Has(k) if k == "a=b"));
}

// ============================================================================
// Regex comparisons
// ============================================================================

#[test]
fn test_regex_literal() {
    let expr = parse("resourceFilename =~ /docker/").unwrap();
    match expr {
        Expr::Regex { key, value } => {
            assert_eq!(key, "resourceFilename");
            assert_eq!(value.source(), "docker");
            assert!(!value.ignore_case());
        }
        other => panic!("expected Regex, got {:?}", other),
    }
}

#[test]
fn test_regex_case_insensitive_flag() {
    let expr = parse("name =~ /^untitled/i").unwrap();
    match expr {
        Expr::Regex { value, .. } => {
            assert_eq!(value.source(), "^untitled");
            assert!(value.ignore_case());
        }
        other => panic!("expected Regex, got {:?}", other),
    }
}

#[test]
fn test_regex_unsupported_flag_fails() {
    assert!(matches!(
        parse("name =~ /x/g"),
        Err(ParseError::InvalidRegexFlags { .. })
    ));
}

#[test]
fn test_regex_bad_pattern_fails() {
    assert!(matches!(
        parse("name =~ /(/"),
        Err(ParseError::InvalidRegex { .. })
    ));
}

#[test]
fn test_regex_missing_literal_fails() {
    assert!(matches!(
        parse("name =~ docker"),
        Err(ParseError::MalformedRegexLiteral { .. })
    ));
}

// ============================================================================
// The in operator
// ============================================================================

#[test]
fn test_in_operator() {
    let expr = parse("resourceScheme in supportedSchemes").unwrap();
    assert!(matches!(
        expr,
        Expr::In { key, list_key }
            if key == "resourceScheme" && list_key == "supportedSchemes"
    ));
}

#[test]
fn test_in_requires_spaces() {
    // Without surrounding spaces `in` is just part of a key
    assert!(matches!(parse("winter").unwrap(), Expr::Has(k) if k == "winter"));
}

// ============================================================================
// Canonical construction at parse time
// ============================================================================

#[test]
fn test_children_sorted_and_deduplicated() {
    assert_eq!(parse("b && a").unwrap(), parse("a && b").unwrap());
    assert_eq!(parse("b || b").unwrap(), Expr::has("b"));
}

#[test]
fn test_constants_absorb_at_parse_time() {
    assert_eq!(parse("a && true").unwrap(), Expr::has("a"));
    assert_eq!(parse("a && false").unwrap(), Expr::False);
    assert_eq!(parse("a || true").unwrap(), Expr::True);
    assert_eq!(parse("a || false").unwrap(), Expr::has("a"));
}

// ============================================================================
// Errors and the tolerant entry point
// ============================================================================

#[test]
fn test_empty_input() {
    assert!(matches!(parse(""), Err(ParseError::EmptyExpression)));
    assert!(matches!(parse("   "), Err(ParseError::EmptyExpression)));
    assert_eq!(deserialize(""), None);
    assert_eq!(deserialize("   "), None);
}

#[test]
fn test_dangling_connective() {
    assert!(parse("a &&").is_err());
    assert!(parse("|| a").is_err());
    assert_eq!(deserialize("a &&"), None);
}

#[test]
fn test_unbalanced_parens() {
    assert!(parse("(a").is_err());
    assert!(parse("a)").is_err());
    assert_eq!(deserialize("(a && b"), None);
}

#[test]
fn test_missing_comparison_key() {
    assert!(matches!(parse("== 5"), Err(ParseError::InvalidKey { .. })));
}

#[test]
fn test_key_with_spaces_is_rejected() {
    assert!(matches!(
        parse("foo bar"),
        Err(ParseError::InvalidKey { .. })
    ));
}

#[test]
fn test_deserialize_success_shapes() {
    assert!(deserialize("editorTextFocus && !isInDiffEditor").is_some());
    assert!(deserialize("a == 'x' || b =~ /y/i").is_some());
    assert!(deserialize("(a || b) && c in d").is_some());
}
