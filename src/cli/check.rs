use super::CliError;
use crate::{parser, KeyValueContext};

/// Options for evaluating an expression against a context document.
pub struct CheckOptions {
    /// The when-clause to evaluate
    pub expression: String,
    /// JSON object context; an absent context makes every lookup miss
    pub context: Option<String>,
}

/// Parse the expression and evaluate it against the given context.
pub fn execute_check(options: &CheckOptions) -> Result<bool, CliError> {
    let expr = parser::parse(&options.expression)?;

    let context = match &options.context {
        Some(json) => {
            let doc: serde_json::Value = serde_json::from_str(json)?;
            if !doc.is_object() {
                return Err(CliError::ContextNotObject);
            }
            KeyValueContext::from(doc)
        }
        None => KeyValueContext::new(),
    };

    Ok(expr.evaluate(&context))
}

/// Parse the expression, optionally negate it, and print its canonical
/// form.
pub fn execute_normalize(expression: &str, negate: bool) -> Result<String, CliError> {
    let expr = parser::parse(expression)?;
    let expr = if negate { expr.negate() } else { expr };
    Ok(expr.normalize().serialize())
}

/// The sorted context keys the expression reads.
pub fn execute_keys(expression: &str) -> Result<Vec<String>, CliError> {
    Ok(parser::parse(expression)?.keys())
}
