use super::{compile, BinaryOp, Expression, PluralError, MAX_DEPTH};

const ENGLISH: &str = "n != 1";
const FRENCH: &str = "n>1";
const JAPANESE: &str = "0";
const POLISH: &str =
    "n==1 ? 0 : n%10>=2 && n%10<=4 && (n%100<12 || n%100>14) ? 1 : 2";
const RUSSIAN: &str =
    "n%10==1 && n%100!=11 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2";
const ARABIC: &str = "n==0 ? 0 : n==1 ? 1 : n==2 ? 2 : n%100>=3 && n%100<=10 ? 3 : n%100>=11 ? 4 : 5";

fn assert_fixture(source: &str, cases: &[(u32, i64)]) {
    let expr = compile(source).unwrap();
    for &(n, expected) in cases {
        assert_eq!(
            expr.eval(n),
            expected,
            "n = {}, compiled to {}",
            n,
            expr
        );
    }
}

fn num(v: i64) -> Expression {
    Expression::Number(v)
}

#[test]
fn germanic_and_invariant_rules() {
    assert_fixture(ENGLISH, &[(0, 1), (1, 0), (2, 1), (100, 1)]);
    assert_fixture(FRENCH, &[(0, 0), (1, 0), (2, 1), (10, 1)]);
    assert_fixture(JAPANESE, &[(0, 0), (1, 0), (2, 0), (1000, 0)]);
}

#[test]
fn slavic_three_way_split() {
    assert_fixture(
        POLISH,
        &[
            (0, 2),
            (1, 0),
            (2, 1),
            (4, 1),
            (5, 2),
            (12, 2),
            (14, 2),
            (22, 1),
            (24, 1),
            (25, 2),
            (112, 2),
        ],
    );
    assert_fixture(
        RUSSIAN,
        &[
            (0, 2),
            (1, 0),
            (2, 1),
            (5, 2),
            (11, 2),
            (12, 2),
            (21, 0),
            (101, 0),
            (111, 2),
        ],
    );
}

#[test]
fn arabic_six_way_split() {
    assert_fixture(
        ARABIC,
        &[
            (0, 0),
            (1, 1),
            (2, 2),
            (3, 3),
            (10, 3),
            (11, 4),
            (99, 4),
            (100, 5),
            (102, 5),
            (103, 3),
        ],
    );
}

#[test]
fn arithmetic_is_left_associative() {
    assert_eq!(
        compile("1+n/5*10").unwrap(),
        Expression::binary(
            BinaryOp::Add,
            num(1),
            Expression::binary(
                BinaryOp::Mul,
                Expression::binary(BinaryOp::Div, Expression::Var, num(5)),
                num(10),
            ),
        )
    );
    assert_eq!(
        compile("1-(2+n)/3").unwrap(),
        Expression::binary(
            BinaryOp::Sub,
            num(1),
            Expression::binary(
                BinaryOp::Div,
                Expression::binary(BinaryOp::Add, num(2), Expression::Var),
                num(3),
            ),
        )
    );
    assert_eq!(compile("10-3-2").unwrap().eval(0), 5);
}

#[test]
fn ternary_is_right_associative() {
    assert_eq!(
        compile("n==1 ? 0 : n==2 ? 1 : 2").unwrap(),
        Expression::Ternary {
            cond: Box::new(Expression::binary(BinaryOp::Eq, Expression::Var, num(1))),
            then: Box::new(num(0)),
            otherwise: Box::new(Expression::Ternary {
                cond: Box::new(Expression::binary(BinaryOp::Eq, Expression::Var, num(2))),
                then: Box::new(num(1)),
                otherwise: Box::new(num(2)),
            }),
        }
    );
}

#[test]
fn not_binds_tighter_than_comparison() {
    let expr = compile("!n == 0").unwrap();
    assert_eq!(expr.eval(0), 0);
    assert_eq!(expr.eval(3), 1);
}

#[test]
fn terminator_ends_expression() {
    let expr = compile("n != 1;").unwrap();
    assert_eq!(expr.eval(1), 0);
    let expr = compile("n != 1\nanything after").unwrap();
    assert_eq!(expr.eval(2), 1);
}

#[test]
fn malformed_expressions_fail() {
    for src in ["", "n ==", "(n", "n)", "n = 1", "foo", "n 1", "n ? 1", "n ? 1 :", "n &| 1", "1 +* 2"] {
        assert!(compile(src).is_err(), "{:?} should not compile", src);
    }
    assert_eq!(compile("n)"), Err(PluralError::TrailingInput { position: 1 }));
    assert!(matches!(compile("(n"), Err(PluralError::UnexpectedEnd { .. })));
}

#[test]
fn division_by_zero_is_recoverable() {
    let expr = compile("n/0").unwrap();
    assert_eq!(expr.try_eval(5), None);
    assert_eq!(expr.eval(5), 0);
    assert_eq!(compile("n%0").unwrap().try_eval(1), None);

    // The right operand of a satisfied `||` is never evaluated.
    let guarded = compile("n==0 || 5/n").unwrap();
    assert_eq!(guarded.try_eval(0), Some(1));
    let guarded = compile("n!=0 && 5/n").unwrap();
    assert_eq!(guarded.try_eval(0), Some(0));
    assert_eq!(guarded.try_eval(5), Some(1));
    assert_eq!(compile("n==1 || 5/(n-1)").unwrap().try_eval(2), Some(1));
}

#[test]
fn deep_parentheses_are_rejected() {
    let source = format!("{}n{}", "(".repeat(200_000), ")".repeat(200_000));
    assert!(matches!(compile(&source), Err(PluralError::TooDeep { .. })));

    let shallow = format!("{}n{}", "(".repeat(50), ")".repeat(50));
    assert_eq!(compile(&shallow).unwrap().eval(3), 3);
}

#[test]
fn long_operator_chains_are_rejected() {
    let chain = vec!["n"; 300_000].join("+");
    assert!(matches!(compile(&chain), Err(PluralError::TooDeep { .. })));

    let chain = vec!["n"; 64].join("+");
    assert_eq!(compile(&chain).unwrap().eval(2), 128);
}

#[test]
fn deep_negation_and_conditionals_are_rejected() {
    let nots = format!("{}n", "!".repeat(100_000));
    assert!(matches!(compile(&nots), Err(PluralError::TooDeep { .. })));
    assert_eq!(compile(&format!("{}n", "!".repeat(10))).unwrap().eval(3), 1);

    let ternaries = "n ? 1 : ".repeat(100_000) + "0";
    assert!(matches!(compile(&ternaries), Err(PluralError::TooDeep { .. })));
}

#[test]
fn nesting_limit_is_exact() {
    // Each `+` adds one level above the leaves.
    let at_limit = vec!["n"; MAX_DEPTH].join("+");
    assert!(compile(&at_limit).is_ok());
    let over_limit = vec!["n"; MAX_DEPTH + 1].join("+");
    assert!(matches!(compile(&over_limit), Err(PluralError::TooDeep { .. })));
}

#[test]
fn display_round_trips_through_compile() {
    let expr = compile(RUSSIAN).unwrap();
    let reparsed = compile(&expr.to_string()).unwrap();
    assert_eq!(expr, reparsed);
}
