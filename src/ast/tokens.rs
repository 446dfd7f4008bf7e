/// Lexical tokens of the when-clause grammar.
///
/// The lexer only tokenizes the *structural* level of an expression:
/// grouping, the boolean connectives and prefix negation. Everything
/// between structural tokens is collected verbatim into a [`Token::Piece`]
/// and classified by the parser, because comparison operators can only be
/// told apart from key characters with the whole piece in hand (keys may
/// legally contain `<`, `>`, `=`, `.` and `-`).
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Left parenthesis for grouping
    LParen,

    /// Right parenthesis
    RParen,

    /// Logical AND (`&&`)
    ///
    /// # Examples
    /// ```text
    /// editorTextFocus && !isInDiffEditor
    /// ```
    AndAnd,

    /// Logical OR (`||`)
    ///
    /// # Examples
    /// ```text
    /// resourceScheme == 'file' || resourceScheme == 'untitled'
    /// ```
    OrOr,

    /// Prefix negation (`!`)
    ///
    /// Only emitted at the start of a piece when not followed by `=`;
    /// a `!=` sequence stays inside the piece as an inequality operator.
    ///
    /// # Examples
    /// ```text
    /// !editorReadonly
    /// !(a && b)
    /// ```
    Bang,

    /// A raw run of non-structural text: one key, one comparison, or one
    /// constant, with quoted spans and regex literals kept verbatim.
    ///
    /// # Examples
    /// ```text
    /// editorLangId == 'sql'
    /// vim.use<C-r>
    /// resourceFilename =~ /docker/i
    /// ```
    Piece(String),

    /// End of input
    Eof,
}
