//! Row and column ordering for the verdict matrix.

use crate::problem::types::SAMPLE_GROUP;
use std::cmp::Ordering;

/// Digits of a purely numeric stem such as `12` in `12.in`
fn numeric_stem(name: &str) -> Option<&str> {
    let stem = name.strip_suffix(".in")?;
    if !stem.is_empty() && stem.bytes().all(|b| b.is_ascii_digit()) {
        Some(stem)
    } else {
        None
    }
}

/// Compare digit strings by value without parsing, so long stems cannot overflow
fn compare_digits(a: &str, b: &str) -> Ordering {
    let a_trimmed = a.trim_start_matches('0');
    let b_trimmed = b.trim_start_matches('0');
    a_trimmed
        .len()
        .cmp(&b_trimmed.len())
        .then_with(|| a_trimmed.cmp(b_trimmed))
}

/// Numeric stems first in numeric order, then everything else lexicographically
pub fn testcase_order(a: &str, b: &str) -> Ordering {
    match (numeric_stem(a), numeric_stem(b)) {
        (Some(x), Some(y)) => compare_digits(x, y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// `sample` first, then lexicographic
pub fn group_order(a: &str, b: &str) -> Ordering {
    match (a == SAMPLE_GROUP, b == SAMPLE_GROUP) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}
