//! Normalization of raw user input into the canonical expression string the tokenizer
//! understands. The rewriting is purely textual; structure is checked later by the parser.
use crate::symbolic::symbolic_errors::ExpressionError;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

static ALLOWED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9xX.+\-*/()\[\]{}a-zA-Z_]+$").expect("valid whitelist regex"));

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").expect("valid identifier regex"));

/// `true` for an unsigned decimal literal with at most one dot ("5", "2.5", ".5")
fn is_bare_number(s: &str) -> bool {
    let digits = s.replacen('.', "", 1);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// `true` if some identifier in the string is the variable itself
pub fn has_variable(s: &str) -> bool {
    IDENTIFIER
        .find_iter(s)
        .any(|m| m.as_str() == "x" || m.as_str() == "X")
}

/// Turns a raw function string into the canonical form.
///
/// ```
/// use RustedRoots::symbolic::normalize_expr::normalize_expression;
/// assert_eq!(normalize_expression("x^2 - 4 = 0").unwrap(), "x**2-4");
/// assert_eq!(normalize_expression("5").unwrap(), "x-5");
/// ```
pub fn normalize_expression(raw: &str) -> Result<String, ExpressionError> {
    let mut func: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if let Some(eq) = func.find('=') {
        func.truncate(eq);
    }
    if func.is_empty() {
        return Err(ExpressionError::Empty);
    }
    func = func.replace('^', "**");

    if func.eq_ignore_ascii_case("x") {
        func = "x-2".to_string();
    } else if is_bare_number(&func) {
        func = format!("x-{}", func);
    } else if !has_variable(&func) {
        func = format!("x-({})", func);
    }

    if !ALLOWED_PATTERN.is_match(&func) {
        let bad = func
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || "._+-*/()[]{}".contains(*c)))
            .unwrap_or('?');
        return Err(ExpressionError::InvalidCharacter {
            character: bad,
            expression: raw.to_string(),
        });
    }
    debug!("normalized '{}' into '{}'", raw, func);
    Ok(func)
}
