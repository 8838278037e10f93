//! Small DataFrame helpers shared by the reader and the transformers.

use std::collections::HashSet;

use chrono::NaiveDate;
use polars::prelude::*;

use crate::error::{NormalizeError, Result};

const ROW_INDEX: &str = "__row";

pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

pub fn require_column<'a>(df: &'a DataFrame, table: &str, name: &str) -> Result<&'a Series> {
    df.column(name).map_err(|_| NormalizeError::MissingColumn {
        table: table.to_string(),
        column: name.to_string(),
    })
}

/// Integral floats (the way spreadsheets store whole numbers) as `i64`.
pub fn integral(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 {
        Some(value as i64)
    } else {
        None
    }
}

pub fn format_number(value: f64) -> String {
    match integral(value) {
        Some(whole) => whole.to_string(),
        None => value.to_string(),
    }
}

pub fn parse_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().and_then(integral))
}

pub fn parse_float(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Column values rendered as strings. Whole floats lose their `.0`.
pub fn string_values(series: &Series) -> Result<Vec<Option<String>>> {
    match series.dtype() {
        DataType::String => Ok(series
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect()),
        DataType::Null => Ok(vec![None; series.len()]),
        DataType::Float32 | DataType::Float64 => {
            let floats = series.cast(&DataType::Float64)?;
            let values = floats
                .f64()?
                .into_iter()
                .map(|v| v.map(format_number))
                .collect();
            Ok(values)
        }
        _ => {
            let strings = series.cast(&DataType::String)?;
            let values = strings
                .str()?
                .into_iter()
                .map(|v| v.map(str::to_string))
                .collect();
            Ok(values)
        }
    }
}

/// Column values as integers. Text and fractional values that do not parse
/// come back as `None`.
pub fn int_values(series: &Series) -> Result<Vec<Option<i64>>> {
    match series.dtype() {
        DataType::String => Ok(series
            .str()?
            .into_iter()
            .map(|v| v.and_then(parse_integer))
            .collect()),
        DataType::Int32 | DataType::Int64 | DataType::UInt32 | DataType::UInt64 => {
            let ints = series.cast(&DataType::Int64)?;
            let values = ints.i64()?.into_iter().collect();
            Ok(values)
        }
        DataType::Float32 | DataType::Float64 => {
            let floats = series.cast(&DataType::Float64)?;
            let values = floats
                .f64()?
                .into_iter()
                .map(|v| v.and_then(integral))
                .collect();
            Ok(values)
        }
        _ => Ok(vec![None; series.len()]),
    }
}

pub fn float_values(series: &Series) -> Result<Vec<Option<f64>>> {
    match series.dtype() {
        DataType::String => Ok(series
            .str()?
            .into_iter()
            .map(|v| v.and_then(parse_float))
            .collect()),
        dt if dt.is_numeric() => {
            let floats = series.cast(&DataType::Float64)?;
            let values = floats.f64()?.into_iter().collect();
            Ok(values)
        }
        _ => Ok(vec![None; series.len()]),
    }
}

pub fn string_series(name: &str, values: Vec<Option<String>>) -> Series {
    Series::new(name.into(), values)
}

pub fn int_series(name: &str, values: Vec<Option<i64>>) -> Series {
    Series::new(name.into(), values)
}

pub fn float_series(name: &str, values: Vec<Option<f64>>) -> Series {
    Series::new(name.into(), values)
}

pub fn bool_series(name: &str, values: Vec<Option<bool>>) -> Series {
    Series::new(name.into(), values)
}

pub fn null_series(name: &str, len: usize) -> Series {
    Series::full_null(name.into(), len, &DataType::Null)
}

pub fn date_series(name: &str, values: Vec<Option<NaiveDate>>) -> Series {
    DateChunked::from_naive_date_options(name.into(), values).into_series()
}

/// Replace (or append) a column in place.
pub fn set_column(df: &mut DataFrame, series: Series) -> Result<()> {
    df.with_column(series)?;
    Ok(())
}

/// Stack frames whose column sets differ. The output carries the union of
/// columns in first-seen order; a frame lacking a column contributes nulls.
pub fn concat_aligned(frames: Vec<DataFrame>) -> Result<DataFrame> {
    if frames.is_empty() {
        return Ok(DataFrame::default());
    }

    let mut order: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for df in &frames {
        for name in column_names(df) {
            if seen.insert(name.clone()) {
                order.push(name);
            }
        }
    }

    let selection: Vec<Expr> = order.iter().map(|name| col(name.as_str())).collect();
    let lazy_frames: Vec<LazyFrame> = frames
        .into_iter()
        .map(|df| {
            let present: HashSet<String> = column_names(&df).into_iter().collect();
            let mut lf = df.lazy();
            for name in &order {
                if !present.contains(name) {
                    lf = lf.with_column(lit(NULL).alias(name.as_str()));
                }
            }
            lf.select(selection.clone())
        })
        .collect();

    let combined = concat(
        lazy_frames,
        UnionArgs {
            to_supertypes: true,
            ..Default::default()
        },
    )?
    .collect()?;

    Ok(combined)
}

pub fn filter_rows(df: &DataFrame, keep: &[bool]) -> Result<DataFrame> {
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    Ok(df.filter(&mask)?)
}

/// Drop exact duplicate rows, keeping the first occurrence.
pub fn dedupe_rows(df: &DataFrame) -> Result<DataFrame> {
    let unique = df
        .clone()
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?;
    Ok(unique)
}

/// Drop every row holding a null in any column.
pub fn drop_incomplete_rows(df: &DataFrame) -> Result<DataFrame> {
    Ok(df.clone().lazy().drop_nulls(None).collect()?)
}

/// Key combinations shared by more than one row, with a `count` column.
pub fn duplicate_keys(df: &DataFrame, table: &str, keys: &[&str]) -> Result<DataFrame> {
    for key in keys {
        require_column(df, table, key)?;
    }
    let by: Vec<Expr> = keys.iter().map(|key| col(*key)).collect();
    let dupes = df
        .clone()
        .lazy()
        .group_by(by)
        .agg([len().alias("count")])
        .filter(col("count").gt(lit(1)))
        .collect()?;
    Ok(dupes)
}

/// Keep the most recent row per key; ties go to the row that comes last.
/// Rows with a null key are dropped. Surviving rows keep their order.
pub fn latest_by_key(df: &DataFrame, table: &str, key: &str, year: &str) -> Result<DataFrame> {
    require_column(df, table, key)?;
    require_column(df, table, year)?;

    let latest = df
        .clone()
        .lazy()
        .with_row_index(ROW_INDEX, None)
        .filter(col(key).is_not_null())
        .sort([year], SortMultipleOptions::default().with_maintain_order(true))
        .unique_stable(Some(vec![key.into()]), UniqueKeepStrategy::Last)
        .sort([ROW_INDEX], SortMultipleOptions::default())
        .drop([ROW_INDEX])
        .collect()?;
    Ok(latest)
}

/// Left join on `key`. Rows of `left` keep their order.
pub fn left_join(left: &DataFrame, right: &DataFrame, key: &str, table: &str) -> Result<DataFrame> {
    require_column(left, table, key)?;
    require_column(right, table, key)?;

    let joined = left
        .clone()
        .lazy()
        .join(
            right.clone().lazy(),
            [col(key)],
            [col(key)],
            JoinArgs::new(JoinType::Left),
        )
        .collect()?;
    Ok(joined)
}
