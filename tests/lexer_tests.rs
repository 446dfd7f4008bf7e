// tests/lexer_tests.rs

use when_clause::ast::Token;
use when_clause::lexer::{LexError, Lexer};

fn tokens(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut out = Vec::new();
    loop {
        let token = lexer.next_token().expect("lex error");
        let done = token == Token::Eof;
        out.push(token);
        if done {
            break;
        }
    }
    out
}

fn piece(text: &str) -> Token {
    Token::Piece(text.to_string())
}

// ============================================================================
// Structural tokens
// ============================================================================

#[test]
fn test_empty_input() {
    assert_eq!(tokens(""), vec![Token::Eof]);
    assert_eq!(tokens("   \t "), vec![Token::Eof]);
}

#[test]
fn test_connectives_and_parens() {
    assert_eq!(
        tokens("a && b || (c)"),
        vec![
            piece("a"),
            Token::AndAnd,
            piece("b"),
            Token::OrOr,
            Token::LParen,
            piece("c"),
            Token::RParen,
            Token::Eof,
        ]
    );
}

#[test]
fn test_bang_prefix() {
    assert_eq!(tokens("!a"), vec![Token::Bang, piece("a"), Token::Eof]);
    assert_eq!(
        tokens("!(a && b)"),
        vec![
            Token::Bang,
            Token::LParen,
            piece("a"),
            Token::AndAnd,
            piece("b"),
            Token::RParen,
            Token::Eof,
        ]
    );
}

#[test]
fn test_bang_equals_stays_in_piece() {
    assert_eq!(tokens("a != b"), vec![piece("a != b"), Token::Eof]);
    assert_eq!(tokens("a!=b"), vec![piece("a!=b"), Token::Eof]);
}

#[test]
fn test_whitespace_is_insignificant_around_connectives() {
    assert_eq!(
        tokens("a&&b"),
        vec![piece("a"), Token::AndAnd, piece("b"), Token::Eof]
    );
    assert_eq!(
        tokens("  a   &&   b  "),
        vec![piece("a"), Token::AndAnd, piece("b"), Token::Eof]
    );
}

// ============================================================================
// Pieces
// ============================================================================

#[test]
fn test_comparisons_are_single_pieces() {
    assert_eq!(tokens("a == 'x'"), vec![piece("a == 'x'"), Token::Eof]);
    assert_eq!(tokens("a >= 10"), vec![piece("a >= 10"), Token::Eof]);
    assert_eq!(tokens("a in b"), vec![piece("a in b"), Token::Eof]);
}

#[test]
fn test_keys_with_punctuation() {
    assert_eq!(
        tokens("vim.use<C-r> && editor.fold-level"),
        vec![
            piece("vim.use<C-r>"),
            Token::AndAnd,
            piece("editor.fold-level"),
            Token::Eof,
        ]
    );
}

#[test]
fn test_single_ampersand_and_pipe_stay_in_piece() {
    assert_eq!(tokens("a&b"), vec![piece("a&b"), Token::Eof]);
    assert_eq!(tokens("a|b"), vec![piece("a|b"), Token::Eof]);
}

// ============================================================================
// Quoted spans
// ============================================================================

#[test]
fn test_connectives_inside_quotes_do_not_split() {
    assert_eq!(
        tokens("key == 'a && b'"),
        vec![piece("key == 'a && b'"), Token::Eof]
    );
    assert_eq!(
        tokens("key == \"x || y\""),
        vec![piece("key == \"x || y\""), Token::Eof]
    );
}

#[test]
fn test_unterminated_quote_takes_rest() {
    assert_eq!(
        tokens("key == 'open && end"),
        vec![piece("key == 'open && end"), Token::Eof]
    );
}

// ============================================================================
// Regex spans
// ============================================================================

#[test]
fn test_regex_literal_is_opaque() {
    assert_eq!(
        tokens("scheme =~ /^(git||ssh)$/ && other"),
        vec![
            piece("scheme =~ /^(git||ssh)$/"),
            Token::AndAnd,
            piece("other"),
            Token::Eof,
        ]
    );
}

#[test]
fn test_regex_flags_are_kept() {
    assert_eq!(
        tokens("name =~ /docker/i"),
        vec![piece("name =~ /docker/i"), Token::Eof]
    );
}

#[test]
fn test_escaped_slash_inside_regex() {
    assert_eq!(
        tokens("path =~ /a\\/b/"),
        vec![piece("path =~ /a\\/b/"), Token::Eof]
    );
}

#[test]
fn test_unterminated_regex_is_an_error() {
    let mut lexer = Lexer::new("key =~ /never");
    assert!(matches!(
        lexer.next_token(),
        Err(LexError::UnterminatedRegex { .. })
    ));
}

#[test]
fn test_slash_without_regex_op_is_plain_text() {
    // No `=~` before it, so `/` is just a key character
    assert_eq!(tokens("a/b"), vec![piece("a/b"), Token::Eof]);
}
