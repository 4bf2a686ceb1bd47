//! Local arithmetic and equation evaluation.
//!
//! This source is pure and infallible from the chain's point of view:
//! anything that does not parse, does not evaluate to a finite value, or is
//! not a degree ≤ 2 single-variable equation is simply "not math" and yields
//! `None`.

// ─────────────────────────────────────────────────────────────────────────────
// Entry Point
// ─────────────────────────────────────────────────────────────────────────────

/// Try to answer `input` as math.
///
/// Plain expressions must evaluate to a finite value. Inputs containing a
/// single `=` are solved as single-variable equations of degree at most two,
/// for their real roots.
pub fn evaluate(input: &str) -> Option<String> {
    let normalized = normalize_glyphs(input);

    let mut sides = normalized.splitn(2, '=');
    let first = sides.next()?;
    match sides.next() {
        Some(second) => solve_equation(first, second),
        None => {
            let expr = parse(first)?;
            if expr.variable().is_some() {
                // A bare expression with an unknown is not answerable
                return None;
            }
            let value = expr.eval(f64::NAN)?;
            value.is_finite().then(|| format_number(value))
        }
    }
}

/// Substitute common math glyphs with parseable spellings.
fn normalize_glyphs(input: &str) -> String {
    input
        .replace("**", "^")
        // Trailing space keeps `√9` from tokenizing as one identifier
        .replace('√', "sqrt ")
        .replace('π', " pi ")
        .replace('×', "*")
        .replace('÷', "/")
}

// ─────────────────────────────────────────────────────────────────────────────
// Equation Solving
// ─────────────────────────────────────────────────────────────────────────────

const EPS: f64 = 1e-9;

/// Solve `lhs = rhs` for the single unknown, if the difference is a
/// polynomial of degree at most two.
fn solve_equation(lhs: &str, rhs: &str) -> Option<String> {
    let lhs = parse(lhs)?;
    let rhs = parse(rhs)?;

    // Both sides must agree on the unknown (or not use one at all)
    let var = match (lhs.variable(), rhs.variable()) {
        (Some(a), Some(b)) if a != b => return None,
        (Some(a), _) => a,
        (_, Some(b)) => b,
        (None, None) => return None,
    };

    // Sample p(t) = lhs(t) - rhs(t) and fit a quadratic through t = 0, 1, 2;
    // the sample at t = 3 rejects anything that is not actually polynomial
    let p = |t: f64| -> Option<f64> {
        let value = lhs.eval(t)? - rhs.eval(t)?;
        value.is_finite().then_some(value)
    };
    let (p0, p1, p2, p3) = (p(0.0)?, p(1.0)?, p(2.0)?, p(3.0)?);

    let c = p0;
    let a = (p2 - 2.0 * p1 + p0) / 2.0;
    let b = p1 - p0 - a;

    let predicted = a * 9.0 + b * 3.0 + c;
    let scale = 1.0 + p3.abs().max(predicted.abs());
    if (p3 - predicted).abs() > EPS * scale {
        return None;
    }

    let roots = if a.abs() < EPS {
        if b.abs() < EPS {
            return None;
        }
        vec![-c / b]
    } else {
        let disc = b * b - 4.0 * a * c;
        if disc < -EPS {
            // No real roots
            return None;
        }
        if disc.abs() <= EPS {
            vec![-b / (2.0 * a)]
        } else {
            let sq = disc.sqrt();
            let mut rs = vec![(-b - sq) / (2.0 * a), (-b + sq) / (2.0 * a)];
            rs.sort_by(|x, y| x.partial_cmp(y).unwrap_or(std::cmp::Ordering::Equal));
            rs
        }
    };

    if roots.iter().any(|r| !r.is_finite()) {
        return None;
    }

    let rendered: Vec<String> = roots
        .iter()
        .map(|r| format!("{} = {}", var, format_number(*r)))
        .collect();
    Some(rendered.join(" or "))
}

/// Format a value: integers without a fraction, others to six decimals with
/// trailing zeros trimmed.
fn format_number(value: f64) -> String {
    // Normalize -0.0
    let value = if value == 0.0 { 0.0 } else { value };
    if value.fract().abs() < EPS && value.abs() < 1e15 {
        format!("{}", value.round() as i64)
    } else {
        let mut s = format!("{:.6}", value);
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
        s
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Expression Parsing
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' | '\n' | '\r' | ',' => i += 1,
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' | '−' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '^' => {
                tokens.push(Token::Caret);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                tokens.push(Token::Number(text.parse().ok()?));
            }
            c if c.is_alphabetic() => {
                let start = i;
                while i < chars.len() && chars[i].is_alphanumeric() {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                tokens.push(Token::Ident(text));
            }
            _ => return None,
        }
    }
    Some(tokens)
}

/// A parsed expression over at most one unknown.
#[derive(Debug, Clone)]
enum Expr {
    Number(f64),
    Variable(String),
    Neg(Box<Expr>),
    Sqrt(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// The unknown's name, if the expression uses one.
    fn variable(&self) -> Option<&str> {
        match self {
            Expr::Number(_) => None,
            Expr::Variable(name) => Some(name),
            Expr::Neg(inner) | Expr::Sqrt(inner) => inner.variable(),
            Expr::Add(l, r)
            | Expr::Sub(l, r)
            | Expr::Mul(l, r)
            | Expr::Div(l, r)
            | Expr::Pow(l, r) => l.variable().or_else(|| r.variable()),
        }
    }

    /// Evaluate with the unknown bound to `x`. `None` on a non-real result.
    fn eval(&self, x: f64) -> Option<f64> {
        let value = match self {
            Expr::Number(n) => *n,
            Expr::Variable(_) => x,
            Expr::Neg(inner) => -inner.eval(x)?,
            Expr::Sqrt(inner) => {
                let v = inner.eval(x)?;
                if v < 0.0 {
                    return None;
                }
                v.sqrt()
            }
            Expr::Add(l, r) => l.eval(x)? + r.eval(x)?,
            Expr::Sub(l, r) => l.eval(x)? - r.eval(x)?,
            Expr::Mul(l, r) => l.eval(x)? * r.eval(x)?,
            Expr::Div(l, r) => l.eval(x)? / r.eval(x)?,
            Expr::Pow(l, r) => l.eval(x)?.powf(r.eval(x)?),
        };
        if value.is_nan() { None } else { Some(value) }
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    variable: Option<String>,
}

/// Parse a single expression; the whole input must be consumed.
fn parse(input: &str) -> Option<Expr> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return None;
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        variable: None,
    };
    let expr = parser.parse_additive()?;
    (parser.pos == parser.tokens.len()).then_some(expr)
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_additive(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_multiplicative()?;
        while let Some(op) = self.peek() {
            let op = match op {
                Token::Plus => Token::Plus,
                Token::Minus => Token::Minus,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_multiplicative()?;
            lhs = match op {
                Token::Plus => Expr::Add(Box::new(lhs), Box::new(rhs)),
                _ => Expr::Sub(Box::new(lhs), Box::new(rhs)),
            };
        }
        Some(lhs)
    }

    fn parse_multiplicative(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_unary()?;
        while let Some(op) = self.peek() {
            let op = match op {
                Token::Star => Token::Star,
                Token::Slash => Token::Slash,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = match op {
                Token::Star => Expr::Mul(Box::new(lhs), Box::new(rhs)),
                _ => Expr::Div(Box::new(lhs), Box::new(rhs)),
            };
        }
        Some(lhs)
    }

    fn parse_unary(&mut self) -> Option<Expr> {
        match self.peek() {
            Some(Token::Minus) => {
                self.advance();
                Some(Expr::Neg(Box::new(self.parse_unary()?)))
            }
            Some(Token::Plus) => {
                self.advance();
                self.parse_unary()
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> Option<Expr> {
        let base = self.parse_primary()?;
        if matches!(self.peek(), Some(Token::Caret)) {
            self.advance();
            // Right-associative; exponent may carry its own unary minus
            let exponent = self.parse_unary()?;
            return Some(Expr::Pow(Box::new(base), Box::new(exponent)));
        }
        Some(base)
    }

    fn parse_primary(&mut self) -> Option<Expr> {
        match self.advance()? {
            Token::Number(n) => Some(Expr::Number(n)),
            Token::LParen => {
                let inner = self.parse_additive()?;
                matches!(self.advance()?, Token::RParen).then_some(inner)
            }
            Token::Ident(name) => match name.as_str() {
                "pi" => Some(Expr::Number(std::f64::consts::PI)),
                "e" => Some(Expr::Number(std::f64::consts::E)),
                // `sqrt` binds to the next primary, so both `sqrt(9)` and
                // the glyph form `√9` parse
                "sqrt" => Some(Expr::Sqrt(Box::new(self.parse_primary()?))),
                _ => {
                    if name.chars().count() != 1 {
                        return None;
                    }
                    match &self.variable {
                        Some(existing) if *existing != name => None,
                        _ => {
                            self.variable = Some(name.clone());
                            Some(Expr::Variable(name))
                        }
                    }
                }
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(evaluate("2+2").as_deref(), Some("4"));
        assert_eq!(evaluate("2 + 3 * 4").as_deref(), Some("14"));
        assert_eq!(evaluate("(2 + 3) * 4").as_deref(), Some("20"));
        assert_eq!(evaluate("10 / 4").as_deref(), Some("2.5"));
    }

    #[test]
    fn test_glyph_substitution() {
        assert_eq!(evaluate("√9").as_deref(), Some("3"));
        assert_eq!(evaluate("sqrt(16) + 1").as_deref(), Some("5"));
        assert_eq!(evaluate("3 × 4 ÷ 2").as_deref(), Some("6"));
        assert_eq!(evaluate("2^10").as_deref(), Some("1024"));
        assert_eq!(evaluate("2**10").as_deref(), Some("1024"));
    }

    #[test]
    fn test_pi() {
        assert_eq!(evaluate("π").as_deref(), Some("3.141593"));
        assert_eq!(evaluate("2 * pi * 0").as_deref(), Some("0"));
    }

    #[test]
    fn test_unary_and_power_associativity() {
        assert_eq!(evaluate("-3 + 5").as_deref(), Some("2"));
        assert_eq!(evaluate("2^-1").as_deref(), Some("0.5"));
        // Right-associative: 2^(3^2)
        assert_eq!(evaluate("2^3^2").as_deref(), Some("512"));
    }

    #[test]
    fn test_not_math_is_none() {
        assert!(evaluate("what is gravity").is_none());
        assert!(evaluate("বিশেষ্য কী").is_none());
        assert!(evaluate("2 +").is_none());
        assert!(evaluate("").is_none());
    }

    #[test]
    fn test_non_finite_is_none() {
        assert!(evaluate("1/0").is_none());
        assert!(evaluate("sqrt(0-1)").is_none());
    }

    #[test]
    fn test_bare_variable_expression_is_none() {
        assert!(evaluate("x + 1").is_none());
        assert!(evaluate("x").is_none());
    }

    #[test]
    fn test_linear_equation() {
        assert_eq!(evaluate("2*x + 4 = 0").as_deref(), Some("x = -2"));
        assert_eq!(evaluate("3*y = 12").as_deref(), Some("y = 4"));
    }

    #[test]
    fn test_quadratic_equation() {
        assert_eq!(evaluate("x^2 - 4 = 0").as_deref(), Some("x = -2 or x = 2"));
        assert_eq!(evaluate("x^2 - 2*x + 1 = 0").as_deref(), Some("x = 1"));
    }

    #[test]
    fn test_quadratic_without_real_roots_is_none() {
        assert!(evaluate("x^2 + 4 = 0").is_none());
    }

    #[test]
    fn test_equation_without_variable_is_none() {
        assert!(evaluate("2 + 2 = 4").is_none());
        assert!(evaluate("2 + 2 = 5").is_none());
    }

    #[test]
    fn test_mismatched_variables_is_none() {
        assert!(evaluate("x + y = 3").is_none());
    }

    #[test]
    fn test_non_polynomial_equation_is_none() {
        // Cubic and square-root equations are beyond this source
        assert!(evaluate("x^3 = 8").is_none());
        assert!(evaluate("sqrt(x) = 2").is_none());
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(1.0 / 3.0), "0.333333");
    }
}
