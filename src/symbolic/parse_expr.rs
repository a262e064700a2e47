use crate::symbolic::symbolic_engine::{Expr, Function};
use crate::symbolic::symbolic_errors::ExpressionError;
use crate::symbolic::tokenizer::{Bracket, Token, TokenKind, tokenize};
use std::f64::consts::{E, PI};
use std::str::FromStr;
/// a module turns a canonical expression string into a symbolic expression
///# Example
/// ```
/// use RustedRoots::symbolic::symbolic_engine::Expr;
/// let parsed_expression = Expr::parse_expression("x**2 - 4").unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// assert_eq!(parsed_expression.eval(2.0), 0.0);
/// ```
//         grammar, one function per rule
//
//   expr    = term (("+" | "-") term)*
//   term    = unary (("*" | "/") unary)*
//   unary   = ("-" | "+") unary | power
//   power   = primary ("**" unary)?            right associative, -x**2 = -(x**2)
//   primary = number | x | pi | e | func "(" expr ")" | "(" expr ")"
//             any of (), [], {} works as a grouping pair, closed by its own kind
//
//   recursion and tree depth are both capped at MAX_EXPRESSION_DEPTH
struct ExprParser<'a> {
    tokens: &'a [Token],
    pos: usize,
    source_len: usize,
    nesting: usize,
}

/// deepest expression tree (and bracket/unary nesting) the parser accepts
pub const MAX_EXPRESSION_DEPTH: usize = 256;

impl<'a> ExprParser<'a> {
    fn peek(&self) -> Option<&'a TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn position(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|t| t.position)
            .unwrap_or(self.source_len)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn too_deep(&self) -> ExpressionError {
        ExpressionError::syntax(self.position(), "expression nested too deeply")
    }

    fn bounded(&self, expr: Expr) -> Result<Expr, ExpressionError> {
        if expr.depth() > MAX_EXPRESSION_DEPTH {
            return Err(self.too_deep());
        }
        Ok(expr)
    }

    fn expect_close(&mut self, bracket: Bracket) -> Result<(), ExpressionError> {
        match self.peek() {
            Some(TokenKind::Close(b)) if *b == bracket => {
                self.pos += 1;
                Ok(())
            }
            Some(other) => Err(ExpressionError::syntax(
                self.position(),
                format!("expected '{}' but found '{}'", bracket.closing(), other),
            )),
            None => Err(ExpressionError::syntax(
                self.position(),
                format!("expected '{}' before end of input", bracket.closing()),
            )),
        }
    }

    fn expr(&mut self) -> Result<Expr, ExpressionError> {
        let mut lhs = self.term()?;
        loop {
            match self.peek() {
                Some(TokenKind::Plus) => {
                    self.pos += 1;
                    let rhs = self.term()?;
                    lhs = self.bounded(lhs + rhs)?;
                }
                Some(TokenKind::Minus) => {
                    self.pos += 1;
                    let rhs = self.term()?;
                    lhs = self.bounded(lhs - rhs)?;
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn term(&mut self) -> Result<Expr, ExpressionError> {
        let mut lhs = self.unary()?;
        loop {
            match self.peek() {
                Some(TokenKind::Star) => {
                    self.pos += 1;
                    let rhs = self.unary()?;
                    lhs = self.bounded(lhs * rhs)?;
                }
                Some(TokenKind::Slash) => {
                    self.pos += 1;
                    let rhs = self.unary()?;
                    lhs = self.bounded(lhs / rhs)?;
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn unary(&mut self) -> Result<Expr, ExpressionError> {
        self.nesting += 1;
        if self.nesting > MAX_EXPRESSION_DEPTH {
            return Err(self.too_deep());
        }
        let operand = self.signed()?;
        self.nesting -= 1;
        self.bounded(operand)
    }

    fn signed(&mut self) -> Result<Expr, ExpressionError> {
        match self.peek() {
            Some(TokenKind::Minus) => {
                self.pos += 1;
                // literals are negated in place, everything else gets a -1 factor
                match self.unary()? {
                    Expr::Const(v) => Ok(Expr::Const(-v)),
                    operand => Ok(-operand),
                }
            }
            Some(TokenKind::Plus) => {
                self.pos += 1;
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr, ExpressionError> {
        let base = self.primary()?;
        if let Some(TokenKind::Power) = self.peek() {
            self.pos += 1;
            let exponent = self.unary()?;
            if exponent.contains_var() {
                return Err(ExpressionError::NonConstantExponent {
                    exponent: exponent.to_string(),
                });
            }
            return Ok(base.pow(exponent.eval(0.0)));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, ExpressionError> {
        let position = self.position();
        let Some(token) = self.advance() else {
            return Err(ExpressionError::syntax(position, "unexpected end of input"));
        };
        match &token.kind {
            TokenKind::Number(v) => Ok(Expr::Const(*v)),
            TokenKind::Open(bracket) => {
                let inner = self.expr()?;
                self.expect_close(*bracket)?;
                Ok(inner)
            }
            TokenKind::Ident(name) => self.symbol(name, position),
            other => Err(ExpressionError::syntax(
                position,
                format!("unexpected '{}'", other),
            )),
        }
    }

    fn symbol(&mut self, name: &str, position: usize) -> Result<Expr, ExpressionError> {
        match name {
            "x" | "X" => Ok(Expr::Var),
            "pi" => Ok(Expr::Const(PI)),
            "e" | "E" => Ok(Expr::Const(E)),
            _ => {
                let func = Function::from_str(name).map_err(|_| ExpressionError::UnknownSymbol {
                    symbol: name.to_string(),
                    position,
                })?;
                match self.peek() {
                    Some(TokenKind::Open(bracket)) => {
                        let bracket = *bracket;
                        self.pos += 1;
                        let argument = self.expr()?;
                        self.expect_close(bracket)?;
                        Ok(Expr::call(func, argument))
                    }
                    _ => Err(ExpressionError::syntax(
                        self.position(),
                        format!("expected '(' after '{}'", name),
                    )),
                }
            }
        }
    }
}

/// Parses a canonical expression string into an expression tree.
pub fn parse_expression_func(input: &str) -> Result<Expr, ExpressionError> {
    let tokens = tokenize(input)?;
    let mut parser = ExprParser {
        tokens: &tokens,
        pos: 0,
        source_len: input.len(),
        nesting: 0,
    };
    let expr = parser.expr()?;
    if let Some(rest) = parser.peek() {
        return Err(ExpressionError::syntax(
            parser.position(),
            format!("unexpected '{}'", rest),
        ));
    }
    Ok(expr)
}

impl Expr {
    pub fn parse_expression(input: &str) -> Result<Expr, ExpressionError> {
        parse_expression_func(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_exponential() {
        let expr = parse_expression_func("exp(x)").unwrap();
        assert_eq!(expr, Expr::Call(Function::Exp, Box::new(Expr::Var)));
    }

    #[test]
    fn test_parse_constant() {
        assert_eq!(parse_expression_func("42").unwrap(), Expr::Const(42.0));
        assert_eq!(parse_expression_func("-42").unwrap(), Expr::Const(-42.0));
        assert_eq!(parse_expression_func("pi").unwrap(), Expr::Const(PI));
        assert_eq!(parse_expression_func("E").unwrap(), Expr::Const(E));
    }

    #[test]
    fn test_parse_variable() {
        assert_eq!(parse_expression_func("x").unwrap(), Expr::Var);
        assert_eq!(parse_expression_func("X").unwrap(), Expr::Var);
    }

    #[test]
    fn test_parse_subtraction() {
        let expr = parse_expression_func("x - 2").unwrap();
        assert_eq!(
            expr,
            Expr::Sub(Box::new(Expr::Var), Box::new(Expr::Const(2.0)))
        );
    }

    #[test]
    fn test_precedence() {
        let expr = parse_expression_func("1+2*x").unwrap();
        assert_eq!(expr, Expr::Const(1.0) + Expr::Const(2.0) * Expr::Var);
        let expr = parse_expression_func("x-1-2").unwrap();
        assert_eq!(expr, (Expr::Var - Expr::Const(1.0)) - Expr::Const(2.0));
        let expr = parse_expression_func("x/2/4").unwrap();
        assert_eq!(expr, (Expr::Var / Expr::Const(2.0)) / Expr::Const(4.0));
    }

    #[test]
    fn test_parse_power() {
        let expr = parse_expression_func("x**2").unwrap();
        assert_eq!(expr, Expr::Var.pow(2.0));
        let expr = parse_expression_func("x^3").unwrap();
        assert_eq!(expr, Expr::Var.pow(3.0));
        let expr = parse_expression_func("x**(1/2)").unwrap();
        assert_eq!(expr, Expr::Var.pow(0.5));
        let expr = parse_expression_func("x**-1").unwrap();
        assert_eq!(expr, Expr::Var.pow(-1.0));
    }

    #[test]
    fn test_power_is_right_associative_and_binds_tighter_than_minus() {
        let expr = parse_expression_func("2**3**2").unwrap();
        assert_relative_eq!(expr.eval(0.0), 512.0);
        let expr = parse_expression_func("-x**2").unwrap();
        assert_eq!(expr, -(Expr::Var.pow(2.0)));
        assert_relative_eq!(expr.eval(3.0), -9.0);
    }

    #[test]
    fn test_non_constant_exponent() {
        match parse_expression_func("x**x") {
            Err(ExpressionError::NonConstantExponent { exponent }) => assert_eq!(exponent, "x"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(parse_expression_func("2**(x+1)").is_err());
    }

    #[test]
    fn test_brackets() {
        let round = parse_expression_func("(x+1)*2").unwrap();
        let square = parse_expression_func("[x+1]*2").unwrap();
        let curly = parse_expression_func("{x+1}*2").unwrap();
        assert_eq!(round, square);
        assert_eq!(round, curly);
        assert!(parse_expression_func("(x+1]*2").is_err());
        assert!(parse_expression_func("(x+1").is_err());
        assert!(parse_expression_func("x+1)").is_err());
    }

    #[test]
    fn test_parse_functions() {
        let expr = parse_expression_func("sin(x)+cos[x]-tan{x}").unwrap();
        assert_eq!(
            expr,
            (Expr::Var.sin() + Expr::Var.cos()) - Expr::Var.tan()
        );
        let expr = parse_expression_func("sqrt(log(x))").unwrap();
        assert_eq!(expr, Expr::Var.ln().sqrt());
    }

    #[test]
    fn test_unknown_symbol() {
        match parse_expression_func("x+y") {
            Err(ExpressionError::UnknownSymbol { symbol, position }) => {
                assert_eq!(symbol, "y");
                assert_eq!(position, 2);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            parse_expression_func("arcsin(x)"),
            Err(ExpressionError::UnknownSymbol { .. })
        ));
    }

    #[test]
    fn test_invalid_expression() {
        assert!(parse_expression_func("").is_err());
        assert!(parse_expression_func("x+").is_err());
        assert!(parse_expression_func("x**").is_err());
        assert!(parse_expression_func("2x").is_err());
        assert!(parse_expression_func("sin x").is_err());
        assert!(parse_expression_func("*x").is_err());
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let long_sum = format!("x{}-2", "+0".repeat(2000));
        match parse_expression_func(&long_sum) {
            Err(ExpressionError::Syntax { message, .. }) => {
                assert_eq!(message, "expression nested too deeply")
            }
            other => panic!("unexpected {:?}", other),
        }
        let brackets = format!("{}x{}-2", "(".repeat(1000), ")".repeat(1000));
        assert!(matches!(
            parse_expression_func(&brackets),
            Err(ExpressionError::Syntax { .. })
        ));
        let minus = format!("{}x", "-".repeat(1000));
        assert!(parse_expression_func(&minus).is_err());
        let calls = format!("{}x{}", "sin(".repeat(1000), ")".repeat(1000));
        assert!(parse_expression_func(&calls).is_err());
    }

    #[test]
    fn test_moderate_nesting_is_accepted() {
        let sum = format!("x{}-2", "+1".repeat(200));
        let expr = parse_expression_func(&sum).unwrap();
        assert!(expr.depth() <= MAX_EXPRESSION_DEPTH);
        assert_relative_eq!(expr.eval(0.0), 198.0);
        let brackets = format!("{}x{}", "(".repeat(200), ")".repeat(200));
        assert_eq!(parse_expression_func(&brackets).unwrap(), Expr::Var);
    }

    #[test]
    fn test_display_parses_back() {
        for input in ["x**2-4", "sin(x)-0.5", "-x**2+3*x/(x-1)", "exp(-x)-x**-2"] {
            let expr = parse_expression_func(input).unwrap();
            let reparsed = parse_expression_func(&expr.to_string()).unwrap();
            for x in [0.3, 1.7, -2.2] {
                assert_relative_eq!(expr.eval(x), reparsed.eval(x), epsilon = 1e-12);
            }
        }
    }
}
