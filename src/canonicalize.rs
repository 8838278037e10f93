//! Value canonicalization: pure column-in, column-out functions used by the
//! table transformers.

use log::{debug, warn};
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;

use crate::error::Result;
use crate::frame::{
    bool_series, column_names, float_values, int_series, int_values, set_column, string_series,
    string_values,
};

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Maps every value listed in `patterns` onto `key`.
#[derive(Debug, Clone, Copy)]
pub struct SynonymRule<'a> {
    pub key: &'a str,
    pub patterns: &'a [&'a str],
}

impl<'a> SynonymRule<'a> {
    pub const fn new(key: &'a str, patterns: &'a [&'a str]) -> Self {
        Self { key, patterns }
    }
}

/// What to do with values no synonym rule produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unmapped<'a> {
    Keep,
    /// Replace with the given value; `None` means missing.
    Replace(Option<&'a str>),
}

/// Upper-case, trim and collapse internal whitespace runs to one space.
pub fn simplify(value: &str) -> String {
    WHITESPACE_RUN
        .replace_all(value.trim(), " ")
        .to_uppercase()
}

/// Map the many spellings of a category onto its canonical key.
///
/// Rules are applied one after another in slice order, each one rewriting the
/// output of the previous, so when patterns overlap the earlier rule wins.
/// Values that already equal a rule key pass through untouched, which makes
/// the function idempotent.
pub fn normalize_categorical(
    series: &Series,
    rules: &[SynonymRule<'_>],
    unmapped: Unmapped<'_>,
) -> Result<Series> {
    let is_key = |value: &str| rules.iter().any(|rule| rule.key == value);

    let values: Vec<Option<String>> = string_values(series)?
        .into_iter()
        .map(|value| {
            let value = value?;
            if is_key(&value) {
                return Some(value);
            }
            let mut current = simplify(&value);
            for rule in rules {
                if rule.patterns.iter().any(|p| *p == current) {
                    current = rule.key.to_string();
                }
            }
            if is_key(&current) {
                return Some(current);
            }
            match unmapped {
                Unmapped::Keep => Some(current),
                Unmapped::Replace(substitute) => substitute.map(str::to_string),
            }
        })
        .collect();

    Ok(string_series(&series.name().to_string(), values))
}

pub fn is_missing_sentinel(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed == "."
}

/// Replace `.` and blank cells with nulls in every text column.
pub fn coerce_missing_sentinels(df: &DataFrame) -> Result<DataFrame> {
    let mut out = df.clone();
    let mut replaced = 0usize;
    for name in column_names(df) {
        let series = df.column(&name)?;
        if series.dtype() != &DataType::String {
            continue;
        }
        let values: Vec<Option<String>> = series
            .str()?
            .into_iter()
            .map(|v| match v {
                Some(s) if is_missing_sentinel(s) => {
                    replaced += 1;
                    None
                }
                other => other.map(str::to_string),
            })
            .collect();
        set_column(&mut out, string_series(&name, values))?;
    }
    if replaced > 0 {
        debug!("replaced {} missing-value sentinels with nulls", replaced);
    }
    Ok(out)
}

/// How a yes/no column is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BooleanCoding<'a> {
    pub true_token: &'a str,
    pub false_token: &'a str,
    pub unknown_token: Option<&'a str>,
    pub unknown_replacement: Option<bool>,
}

impl Default for BooleanCoding<'_> {
    fn default() -> Self {
        Self {
            true_token: "Y",
            false_token: "N",
            unknown_token: None,
            unknown_replacement: None,
        }
    }
}

impl<'a> BooleanCoding<'a> {
    /// `Y`/`N` with an extra token meaning "unknown", mapped to missing.
    pub fn with_unknown(token: &'a str) -> Self {
        Self {
            unknown_token: Some(token),
            ..Self::default()
        }
    }
}

/// Decode a token column into a three-state boolean.
///
/// Absent values become `false`. The unknown token becomes
/// `unknown_replacement`. Tokens outside the coding become missing.
pub fn to_boolean(series: &Series, coding: &BooleanCoding<'_>) -> Result<Series> {
    let name = series.name().to_string();

    if series.dtype() == &DataType::Boolean {
        let values = series
            .bool()?
            .into_iter()
            .map(|v| Some(v.unwrap_or(false)))
            .collect();
        return Ok(bool_series(&name, values));
    }

    let mut unrecognized = 0usize;
    let values: Vec<Option<bool>> = string_values(series)?
        .into_iter()
        .map(|value| {
            let Some(value) = value else {
                return Some(false);
            };
            let token = value.trim();
            if coding.unknown_token.is_some_and(|u| token.eq_ignore_ascii_case(u)) {
                coding.unknown_replacement
            } else if token.eq_ignore_ascii_case(coding.true_token) {
                Some(true)
            } else if token.eq_ignore_ascii_case(coding.false_token) {
                Some(false)
            } else {
                unrecognized += 1;
                None
            }
        })
        .collect();

    if unrecognized > 0 {
        warn!("{}: {} values outside the boolean coding set to null", name, unrecognized);
    }
    Ok(bool_series(&name, values))
}

/// Exact replacement of one token by another in a text column.
pub fn rewrite_token(series: &Series, from: &str, to: &str) -> Result<Series> {
    replace_values(series, &[(from, to)])
}

/// Exact replacement of whole (trimmed) values in a text column. Non-text
/// columns are returned unchanged.
pub fn replace_values(series: &Series, pairs: &[(&str, &str)]) -> Result<Series> {
    if series.dtype() != &DataType::String {
        return Ok(series.clone());
    }
    let values = string_values(series)?
        .into_iter()
        .map(|value| {
            value.map(|v| {
                pairs
                    .iter()
                    .find(|(from, _)| v.trim() == *from)
                    .map(|(_, to)| to.to_string())
                    .unwrap_or(v)
            })
        })
        .collect();
    Ok(string_series(&series.name().to_string(), values))
}

pub fn upper_trim(series: &Series) -> Result<Series> {
    let values = string_values(series)?
        .into_iter()
        .map(|v| v.map(|v| v.trim().to_uppercase()))
        .collect();
    Ok(string_series(&series.name().to_string(), values))
}

pub fn strip_lower(series: &Series) -> Result<Series> {
    let values = string_values(series)?
        .into_iter()
        .map(|v| v.map(|v| v.trim().to_lowercase()))
        .collect();
    Ok(string_series(&series.name().to_string(), values))
}

/// Zero and blank cells become missing. Used for fields where the form
/// writes 0 for "not applicable".
pub fn zero_to_missing(series: &Series) -> Result<Series> {
    let name = series.name().to_string();
    match series.dtype() {
        DataType::String => {
            let values = string_values(series)?
                .into_iter()
                .map(|v| {
                    v.filter(|s| {
                        !s.trim().is_empty() && s.trim().parse::<f64>().map_or(true, |n| n != 0.0)
                    })
                })
                .collect();
            Ok(string_series(&name, values))
        }
        DataType::Float32 | DataType::Float64 => {
            let values = float_values(series)?
                .into_iter()
                .map(|v| v.filter(|n| *n != 0.0))
                .collect();
            Ok(crate::frame::float_series(&name, values))
        }
        dt if dt.is_numeric() => {
            let values = int_values(series)?
                .into_iter()
                .map(|v| v.filter(|n| *n != 0))
                .collect();
            Ok(int_series(&name, values))
        }
        _ => Ok(series.clone()),
    }
}

/// Cast an id column to `Int64`. Values that are not whole numbers become
/// null and are counted in the log.
pub fn coerce_integer_id(series: &Series) -> Result<Series> {
    let name = series.name().to_string();
    let raw = string_values(series)?;
    let parsed = int_values(series)?;

    let dropped = raw
        .iter()
        .zip(parsed.iter())
        .filter(|(r, p)| r.is_some() && p.is_none())
        .count();
    if dropped > 0 {
        warn!("{}: {} non-integer ids set to null", name, dropped);
    }
    Ok(int_series(&name, parsed))
}

/// Cast an id column to trimmed `String`; whole floats lose their `.0`.
pub fn coerce_string_id(series: &Series) -> Result<Series> {
    let values = string_values(series)?
        .into_iter()
        .map(|v| v.map(|v| v.trim().to_string()))
        .collect();
    Ok(string_series(&series.name().to_string(), values))
}

pub fn is_ascii_numeric(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}
