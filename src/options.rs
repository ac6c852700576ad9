//! Parsing rules for the option strings the pledge form stores.
//!
//! Every function here degrades to a default instead of failing: malformed
//! historical records must never break reporting.

use regex::Regex;
use std::sync::LazyLock;

pub const OTHER_PLANTING: &str = "other-planting";
pub const OTHER_DONATION: &str = "other-donation";

static TREE_COUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)([0-9]+)-?tree").unwrap());

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// Returns the trimmed option text, or `None` when absent or blank.
pub fn present(option: Option<&str>) -> Option<&str> {
    option.map(str::trim).filter(|s| !s.is_empty())
}

/// A run of ASCII digits as a count. Runs too long for `u64` saturate.
fn saturating_digits(digits: &str) -> u64 {
    digits.parse::<u64>().unwrap_or(u64::MAX)
}

/// Leading integer with `parseInt` semantics: optional whitespace and sign,
/// then digits. Negative results clamp to 0.
pub fn parse_leading_int(text: &str) -> Option<u64> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    Some(if negative {
        0
    } else {
        saturating_digits(&rest[..end])
    })
}

fn first_digit_run(text: &str) -> Option<u64> {
    DIGIT_RUN.find(text).map(|m| saturating_digits(m.as_str()))
}

/// Trees planted: `N-tree` yields N; `other-planting` reads `other_trees`.
pub fn parse_planting_count(planting_option: Option<&str>, other_trees: Option<&str>) -> u64 {
    let Some(option) = present(planting_option) else {
        return 0;
    };
    if option == OTHER_PLANTING {
        return other_trees.and_then(parse_leading_int).unwrap_or(0);
    }
    let count = TREE_COUNT
        .captures(option)
        .map(|caps| saturating_digits(&caps[1]));
    if count.is_none() {
        tracing::debug!(option, "planting option without a tree count");
    }
    count.unwrap_or(0)
}

/// Trees in a bundle plan. `couple`, `family` and `grove` win in that order
/// over any number embedded in the text.
pub fn parse_bundle_count(bundle_plan_option: Option<&str>) -> u64 {
    let Some(option) = present(bundle_plan_option) else {
        return 0;
    };
    let lower = option.to_lowercase();
    if lower.contains("couple") {
        2
    } else if lower.contains("family") {
        3
    } else if lower.contains("grove") {
        5
    } else {
        first_digit_run(option).unwrap_or(0)
    }
}

/// Trees adopted through a one-tree or lifetime plan. A present option
/// without any number still counts as one tree.
pub fn parse_adopted_count(option: Option<&str>) -> u64 {
    match present(option) {
        Some(option) => first_digit_run(option).unwrap_or(1),
        None => 0,
    }
}

/// Donation in whole rupees: a literal amount, or `other-donation` with the
/// amount in `other_amount`.
pub fn parse_donation_amount(donation_option: Option<&str>, other_amount: Option<&str>) -> u64 {
    match present(donation_option) {
        Some(OTHER_DONATION) => other_amount.and_then(parse_leading_int).unwrap_or(0),
        Some(option) => parse_leading_int(option).unwrap_or(0),
        None => 0,
    }
}

/// Amount written as free text ("₹1,500.00"). Everything except digits and
/// `.` is dropped, then the longest numeric prefix is read.
pub fn parse_amount_text(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let end = cleaned
        .match_indices('.')
        .nth(1)
        .map(|(i, _)| i)
        .unwrap_or(cleaned.len());
    let prefix = &cleaned[..end];
    if !prefix.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse::<f64>().ok()
}
