pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod evaluator;
pub mod lexer;
pub mod normalize;
pub mod parser;
pub mod serializer;
pub mod value;

pub use ast::{CmpValue, Expr, RegexValue, ScalarValue, Token};
pub use evaluator::{Context, KeyValueContext};
pub use lexer::{LexError, Lexer};
pub use normalize::DISTRIBUTION_LIMIT;
pub use parser::{deserialize, parse, ParseError, Parser};
pub use value::Value;
