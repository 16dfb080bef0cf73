use crate::types::{Node, Number};
use itertools::Itertools;
use std::fmt;

const SIGNIFICANT_DIGITS: usize = 6;

pub fn pr_str(object: &Node) -> String {
    object.to_string()
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::List(elements) => write!(f, "({})", elements.iter().join(" ")),
            Node::Number(value) => write!(f, "{}", number_repr(*value)),
            Node::Symbol(name) => write!(f, "{}", name),
            Node::Text(s) => write!(f, "\"{}\"", s),
            Node::Boolean(b) => write!(f, "{}", b),
            Node::Define(define) => write!(f, "(define {} {})", define.name, define.value),
            Node::Quote(body) => write!(f, "(quote {})", body),
            Node::Closure(closure) => write!(f, "#<closure {}>", closure.parameters),
            Node::Primitive(func) => write!(f, "#<primitive {}>", func.name),
            Node::If(_) => write!(f, "#<syntax if>"),
            Node::Lambda(_) => write!(f, "#<syntax lambda>"),
            Node::Begin(_) => write!(f, "#<syntax begin>"),
            Node::Import(import) => write!(f, "#<syntax import {}>", import.path),
        }
    }
}

/// Formats like C's `%g`: six significant digits, switching to scientific
/// notation for exponents below -4 or from 6 upwards, trailing zeros removed.
fn number_repr(x: Number) -> String {
    if x.is_nan() {
        return "nan".into();
    }
    if x.is_infinite() {
        return String::from(if x > 0.0 { "inf" } else { "-inf" });
    }
    if x == 0.0 {
        return String::from(if x.is_sign_negative() { "-0" } else { "0" });
    }
    // Rounding to the significant digits can bump the exponent (9999999 -> 1e+07),
    // so take it from the rounded scientific form.
    let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, x);
    let (mantissa, exponent) = scientific.split_at(scientific.find('e').unwrap_or(0));
    let exponent: i32 = exponent[1..].parse().unwrap_or_default();
    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exponent.abs())
    } else {
        let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent) as usize;
        trim_zeros(&format!("{:.*}", decimals, x)).to_string()
    }
}

fn trim_zeros(digits: &str) -> &str {
    match digits.contains('.') {
        true => digits.trim_end_matches('0').trim_end_matches('.'),
        false => digits,
    }
}
