//! Expression evaluator - arithmetic and word-problem grammar.
//!
//! A fixed-order table of pattern rules is tried against a normalized
//! (lower-cased, whitespace-stripped) copy of the input; the first rule
//! that matches and whose operands parse wins. Ordering is a contract:
//! specific phrasings must be declared before generic ones. Input that
//! matches no rule but consists solely of digits, operators, and
//! parentheses is handed to a restricted recursive-descent parser.

pub mod arith;

use lumen_common::EngineError;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// A successful evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    /// Result rounded to 6 decimal places, half away from zero
    pub value: f64,
    /// The normalized expression the result was computed from
    pub expression: String,
}

type Apply = fn(&[f64]) -> Result<f64, EngineError>;

/// One entry in the fixed-priority grammar
struct PatternRule {
    pattern: Regex,
    /// Number of captured operands the rule expects
    arity: usize,
    apply: Apply,
}

fn rule(pattern: &str, arity: usize, apply: Apply) -> PatternRule {
    PatternRule {
        pattern: Regex::new(pattern).expect("pattern rule regex"),
        arity,
        apply,
    }
}

const NUM: &str = r"(\d+(?:\.\d+)?)";

fn divide(a: f64, b: f64) -> Result<f64, EngineError> {
    if b == 0.0 {
        return Err(EngineError::InvalidOperand("division by zero".into()));
    }
    Ok(a / b)
}

fn factorial(n: f64) -> Result<f64, EngineError> {
    if n < 0.0 {
        return Err(EngineError::InvalidOperand(
            "factorial of a negative number".into(),
        ));
    }
    let mut result = 1.0f64;
    let mut i = 2.0;
    while i <= n {
        result *= i;
        i += 1.0;
    }
    Ok(result)
}

/// Rule table in declaration order; first match wins.
static RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    let n = NUM;
    vec![
        // Basic arithmetic
        rule(&format!(r"{n}\+{n}"), 2, |ops| Ok(ops[0] + ops[1])),
        rule(&format!(r"{n}-{n}"), 2, |ops| Ok(ops[0] - ops[1])),
        rule(&format!(r"{n}[*×]{n}"), 2, |ops| Ok(ops[0] * ops[1])),
        rule(&format!(r"{n}[/÷]{n}"), 2, |ops| divide(ops[0], ops[1])),
        // Powers, roots, factorial, logarithms
        rule(&format!(r"squarerootof{n}|√{n}"), 1, |ops| Ok(ops[0].sqrt())),
        rule(&format!(r"{n}\^{n}"), 2, |ops| Ok(ops[0].powf(ops[1]))),
        rule(r"\(?(-?\d+)\)?!", 1, |ops| factorial(ops[0])),
        rule(&format!(r"log{n}"), 1, |ops| Ok(ops[0].log10())),
        rule(&format!(r"ln{n}"), 1, |ops| Ok(ops[0].ln())),
        // Geometry
        rule(&format!(r"areaofa?squarewithside{n}"), 1, |ops| {
            Ok(ops[0] * ops[0])
        }),
        rule(&format!(r"areaofa?circlewithradius{n}"), 1, |ops| {
            Ok(std::f64::consts::PI * ops[0] * ops[0])
        }),
        rule(
            &format!(r"areaoftrianglewithbase{n}andheight{n}"),
            2,
            |ops| Ok(0.5 * ops[0] * ops[1]),
        ),
        rule(&format!(r"volumeofa?cubewithside{n}"), 1, |ops| {
            Ok(ops[0] * ops[0] * ops[0])
        }),
        rule(&format!(r"volumeofspherewithradius{n}"), 1, |ops| {
            Ok(4.0 / 3.0 * std::f64::consts::PI * ops[0].powi(3))
        }),
        // Percentage and change
        rule(&format!(r"{n}%of{n}"), 2, |ops| Ok(ops[0] / 100.0 * ops[1])),
        rule(&format!(r"{n}increasedby{n}%"), 2, |ops| {
            Ok(ops[0] * (1.0 + ops[1] / 100.0))
        }),
        rule(&format!(r"{n}decreasedby{n}%"), 2, |ops| {
            Ok(ops[0] * (1.0 - ops[1] / 100.0))
        }),
        // Spelled-out word problems
        rule(&format!(r"whatis{n}plus{n}"), 2, |ops| Ok(ops[0] + ops[1])),
        rule(&format!(r"whatis{n}minus{n}"), 2, |ops| Ok(ops[0] - ops[1])),
        rule(&format!(r"whatis{n}times{n}"), 2, |ops| Ok(ops[0] * ops[1])),
        rule(&format!(r"whatis{n}dividedby{n}"), 2, |ops| {
            divide(ops[0], ops[1])
        }),
    ]
});

/// Lower-case and strip all whitespace
fn normalize(raw: &str) -> String {
    raw.to_lowercase().chars().filter(|c| !c.is_whitespace()).collect()
}

/// Round half away from zero to 6 decimal places
fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

/// Collect present capture groups as operands; None if any fails to parse
fn parse_operands(caps: &Captures) -> Option<Vec<f64>> {
    caps.iter()
        .skip(1)
        .flatten()
        .map(|m| m.as_str().parse::<f64>().ok())
        .collect()
}

/// True when the text is a bare arithmetic expression the restricted
/// parser can handle
fn is_bare_arithmetic(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.'))
}

/// Evaluate an arithmetic phrase or expression.
///
/// Errors signal "no answer here" to the dispatcher, which falls through
/// to the next reply branch; they are never user-visible.
pub fn evaluate(raw: &str) -> Result<Calculation, EngineError> {
    let expression = normalize(raw);
    if expression.is_empty() {
        return Err(EngineError::ParseFailure);
    }

    // A rule that matches but fails to apply (division by zero, negative
    // factorial, overflow) does not stop the scan; later rules may still
    // produce an answer. Remember the first failure for the final verdict.
    let mut deferred: Option<EngineError> = None;

    for rule in RULES.iter() {
        let Some(caps) = rule.pattern.captures(&expression) else {
            continue;
        };
        let Some(operands) = parse_operands(&caps) else {
            continue;
        };
        if operands.len() != rule.arity {
            continue;
        }
        match (rule.apply)(&operands) {
            Ok(value) if value.is_finite() => {
                return Ok(Calculation {
                    value: round6(value),
                    expression,
                });
            }
            Ok(_) => {
                deferred
                    .get_or_insert(EngineError::InvalidOperand("non-finite result".into()));
            }
            Err(e) => {
                deferred.get_or_insert(e);
            }
        }
    }

    if is_bare_arithmetic(&expression) {
        let value = arith::evaluate(&expression)?;
        if !value.is_finite() {
            return Err(EngineError::InvalidOperand("non-finite result".into()));
        }
        return Ok(Calculation {
            value: round6(value),
            expression,
        });
    }

    Err(deferred.unwrap_or(EngineError::ParseFailure))
}
