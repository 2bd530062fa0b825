use super::PluralError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Number(i64),
    Var,
    Not,
    Mul,
    Div,
    Rem,
    Add,
    Sub,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    And,
    Or,
    Question,
    Colon,
    LParen,
    RParen,
    /// End of input, or a `;` / newline terminator.
    End,
}

pub struct Lexer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            data: source.as_bytes(),
            pos: 0,
        }
    }

    fn peek_is(&self, byte: u8) -> bool {
        self.data.get(self.pos) == Some(&byte)
    }

    /// Consume the next byte if it equals `byte`.
    fn eat(&mut self, byte: u8) -> bool {
        if self.peek_is(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Returns the next token and the byte offset where it starts.
    pub fn next_token(&mut self) -> Result<(Token, usize), PluralError> {
        while matches!(self.data.get(self.pos), Some(b' ') | Some(b'\t')) {
            self.pos += 1;
        }

        let start = self.pos;
        let Some(&c) = self.data.get(self.pos) else {
            return Ok((Token::End, start));
        };
        self.pos += 1;

        let token = match c {
            b'0'..=b'9' => {
                while matches!(self.data.get(self.pos), Some(b'0'..=b'9')) {
                    self.pos += 1;
                }
                let digits = std::str::from_utf8(&self.data[start..self.pos])
                    .map_err(|_| PluralError::InvalidToken { position: start })?;
                let value = digits
                    .parse::<i32>()
                    .map_err(|_| PluralError::NumberOutOfRange { position: start })?;
                Token::Number(i64::from(value))
            }
            b'n' => Token::Var,
            b'=' => {
                if self.eat(b'=') {
                    Token::Eq
                } else {
                    return Err(PluralError::Assignment { position: start });
                }
            }
            b'!' => {
                if self.eat(b'=') {
                    Token::Ne
                } else {
                    Token::Not
                }
            }
            b'&' => {
                if self.eat(b'&') {
                    Token::And
                } else {
                    return Err(PluralError::InvalidToken { position: start });
                }
            }
            b'|' => {
                if self.eat(b'|') {
                    Token::Or
                } else {
                    return Err(PluralError::InvalidToken { position: start });
                }
            }
            b'<' => {
                if self.eat(b'=') {
                    Token::Le
                } else {
                    Token::Lt
                }
            }
            b'>' => {
                if self.eat(b'=') {
                    Token::Ge
                } else {
                    Token::Gt
                }
            }
            b'?' => Token::Question,
            b':' => Token::Colon,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            b'*' => Token::Mul,
            b'/' => Token::Div,
            b'%' => Token::Rem,
            b'+' => Token::Add,
            b'-' => Token::Sub,
            b';' | b'\n' => {
                // Everything after a terminator is ignored.
                self.pos = self.data.len();
                Token::End
            }
            _ => return Err(PluralError::InvalidToken { position: start }),
        };

        Ok((token, start))
    }
}
