use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
        }
    }
}

/// Compiled plural-forms expression.
///
/// Logical and comparison operators yield `1` or `0`, as in C.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Number(i64),
    Var,
    Not(Box<Expression>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    Ternary {
        cond: Box<Expression>,
        then: Box<Expression>,
        otherwise: Box<Expression>,
    },
}

fn logic(b: bool) -> i64 {
    b as i64
}

// `rhs` is evaluated only when `op` needs it, so `||` and `&&` short-circuit
// as in C and a division by zero on the skipped side does not fault.
fn apply<F>(op: BinaryOp, left: i64, rhs: F) -> Option<i64>
where
    F: FnOnce() -> Option<i64>,
{
    let value = match op {
        BinaryOp::Or => logic(left != 0 || rhs()? != 0),
        BinaryOp::And => logic(left != 0 && rhs()? != 0),
        BinaryOp::Eq => logic(left == rhs()?),
        BinaryOp::Ne => logic(left != rhs()?),
        BinaryOp::Lt => logic(left < rhs()?),
        BinaryOp::Le => logic(left <= rhs()?),
        BinaryOp::Gt => logic(left > rhs()?),
        BinaryOp::Ge => logic(left >= rhs()?),
        BinaryOp::Add => left.wrapping_add(rhs()?),
        BinaryOp::Sub => left.wrapping_sub(rhs()?),
        BinaryOp::Mul => left.wrapping_mul(rhs()?),
        BinaryOp::Div => left.checked_div(rhs()?)?,
        BinaryOp::Rem => left.checked_rem(rhs()?)?,
    };
    Some(value)
}

impl Expression {
    pub(crate) fn binary(op: BinaryOp, lhs: Expression, rhs: Expression) -> Self {
        Expression::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Evaluate for the count `n`.
    ///
    /// Returns `None` when the expression divides by zero for this `n`.
    pub fn try_eval(&self, n: u32) -> Option<i64> {
        let value = match self {
            Expression::Number(v) => *v,
            Expression::Var => i64::from(n),
            Expression::Not(inner) => logic(inner.try_eval(n)? == 0),
            Expression::Ternary {
                cond,
                then,
                otherwise,
            } => {
                if cond.try_eval(n)? != 0 {
                    then.try_eval(n)?
                } else {
                    otherwise.try_eval(n)?
                }
            }
            Expression::Binary { op, lhs, rhs } => {
                apply(*op, lhs.try_eval(n)?, || rhs.try_eval(n))?
            }
        };
        Some(value)
    }

    /// Evaluate for the count `n`, treating a division by zero as category 0.
    pub fn eval(&self, n: u32) -> i64 {
        self.try_eval(n).unwrap_or(0)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Number(v) => write!(f, "{}", v),
            Expression::Var => write!(f, "n"),
            Expression::Not(inner) => write!(f, "!({})", inner),
            Expression::Binary { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op.symbol(), rhs),
            Expression::Ternary {
                cond,
                then,
                otherwise,
            } => write!(f, "({} ? {} : {})", cond, then, otherwise),
        }
    }
}
