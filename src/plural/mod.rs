//! Compiler for the C-like `plural=` expressions found in catalog metadata.
//!
//! ```text
//! ternary  := or ( '?' ternary ':' ternary )?
//! or       := and ( '||' and )*
//! and      := eq ( '&&' eq )*
//! eq       := rel ( ('==' | '!=') rel )*
//! rel      := add ( ('<' | '<=' | '>' | '>=') add )*
//! add      := mul ( ('+' | '-') mul )*
//! mul      := unary ( ('*' | '/' | '%') unary )*
//! unary    := '!' unary | primary
//! primary  := number | 'n' | '(' ternary ')'
//! ```

mod expression;
mod lexer;
mod parser;

pub use expression::{BinaryOp, Expression};
pub use parser::MAX_DEPTH;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PluralError {
    #[error("invalid token at offset {position}")]
    InvalidToken { position: usize },
    #[error("assignment is not allowed (offset {position})")]
    Assignment { position: usize },
    #[error("integer literal out of range at offset {position}")]
    NumberOutOfRange { position: usize },
    #[error("expected {expected} at offset {position}")]
    UnexpectedToken {
        expected: &'static str,
        position: usize,
    },
    #[error("unexpected end of expression, expected {expected}")]
    UnexpectedEnd { expected: &'static str },
    #[error("trailing input at offset {position}")]
    TrailingInput { position: usize },
    #[error("expression nests deeper than {} levels at offset {position}", parser::MAX_DEPTH)]
    TooDeep { position: usize },
}

/// Compile a plural expression such as `n==1 ? 0 : 1`.
pub fn compile(source: &str) -> Result<Expression, PluralError> {
    parser::Parser::new(source)?.parse()
}

#[cfg(test)]
mod tests;
