use super::expression::{BinaryOp, Expression};
use super::lexer::{Lexer, Token};
use super::PluralError;

fn binary_op(token: Token) -> Option<(BinaryOp, u8)> {
    let entry = match token {
        Token::Or => (BinaryOp::Or, 1),
        Token::And => (BinaryOp::And, 2),
        Token::Eq => (BinaryOp::Eq, 3),
        Token::Ne => (BinaryOp::Ne, 3),
        Token::Lt => (BinaryOp::Lt, 4),
        Token::Le => (BinaryOp::Le, 4),
        Token::Gt => (BinaryOp::Gt, 4),
        Token::Ge => (BinaryOp::Ge, 4),
        Token::Add => (BinaryOp::Add, 5),
        Token::Sub => (BinaryOp::Sub, 5),
        Token::Mul => (BinaryOp::Mul, 6),
        Token::Div => (BinaryOp::Div, 6),
        Token::Rem => (BinaryOp::Rem, 6),
        _ => return None,
    };
    Some(entry)
}

/// Deepest expression tree accepted. Also bounds the parser's own
/// recursion, so nesting in untrusted input cannot exhaust the stack.
pub const MAX_DEPTH: usize = 128;

// An expression together with the height of its tree.
type Parsed = (Expression, usize);

/// Precedence-climbing parser with one token of lookahead.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    position: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Result<Self, PluralError> {
        let mut lexer = Lexer::new(source);
        let (current, position) = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            position,
            depth: 0,
        })
    }

    fn advance(&mut self) -> Result<(), PluralError> {
        let (token, position) = self.lexer.next_token()?;
        self.current = token;
        self.position = position;
        Ok(())
    }

    fn unexpected(&self, expected: &'static str) -> PluralError {
        if self.current == Token::End {
            PluralError::UnexpectedEnd { expected }
        } else {
            PluralError::UnexpectedToken {
                expected,
                position: self.position,
            }
        }
    }

    fn expect(&mut self, token: Token, expected: &'static str) -> Result<(), PluralError> {
        if self.current != token {
            return Err(self.unexpected(expected));
        }
        self.advance()
    }

    fn too_deep(&self) -> PluralError {
        PluralError::TooDeep {
            position: self.position,
        }
    }

    // Any error aborts the whole parse, so only the success paths leave.
    fn enter(&mut self) -> Result<(), PluralError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.too_deep());
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn checked_height(&self, height: usize) -> Result<usize, PluralError> {
        if height > MAX_DEPTH {
            return Err(self.too_deep());
        }
        Ok(height)
    }

    /// Parse a full expression; trailing tokens are an error.
    pub fn parse(mut self) -> Result<Expression, PluralError> {
        let (expr, _) = self.parse_ternary()?;
        if self.current != Token::End {
            return Err(PluralError::TrailingInput {
                position: self.position,
            });
        }
        Ok(expr)
    }

    fn parse_ternary(&mut self) -> Result<Parsed, PluralError> {
        self.enter()?;
        let (cond, cond_height) = self.parse_binary(1)?;
        if self.current != Token::Question {
            self.leave();
            return Ok((cond, cond_height));
        }
        self.advance()?;
        let (then, then_height) = self.parse_ternary()?;
        self.expect(Token::Colon, "':' in conditional expression")?;
        let (otherwise, otherwise_height) = self.parse_ternary()?;
        let height = self.checked_height(1 + cond_height.max(then_height).max(otherwise_height))?;
        self.leave();
        Ok((
            Expression::Ternary {
                cond: Box::new(cond),
                then: Box::new(then),
                otherwise: Box::new(otherwise),
            },
            height,
        ))
    }

    fn parse_binary(&mut self, min_prec: u8) -> Result<Parsed, PluralError> {
        let (mut lhs, mut height) = self.parse_unary()?;
        while let Some((op, prec)) = binary_op(self.current) {
            if prec < min_prec {
                break;
            }
            self.advance()?;
            // Left-associative: the right operand only binds tighter operators.
            let (rhs, rhs_height) = self.parse_binary(prec + 1)?;
            height = self.checked_height(1 + height.max(rhs_height))?;
            lhs = Expression::binary(op, lhs, rhs);
        }
        Ok((lhs, height))
    }

    fn parse_unary(&mut self) -> Result<Parsed, PluralError> {
        if self.current == Token::Not {
            self.advance()?;
            self.enter()?;
            let (inner, inner_height) = self.parse_unary()?;
            let height = self.checked_height(1 + inner_height)?;
            self.leave();
            return Ok((Expression::Not(Box::new(inner)), height));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Parsed, PluralError> {
        match self.current {
            Token::Number(value) => {
                self.advance()?;
                Ok((Expression::Number(value), 1))
            }
            Token::Var => {
                self.advance()?;
                Ok((Expression::Var, 1))
            }
            Token::LParen => {
                self.advance()?;
                let inner = self.parse_ternary()?;
                self.expect(Token::RParen, "')'")?;
                Ok(inner)
            }
            _ => Err(self.unexpected("a number, 'n' or '('")),
        }
    }
}
