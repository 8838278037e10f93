use chrono::NaiveDate;
use log::debug;
use polars::prelude::*;

use crate::error::Result;
use crate::frame::{column_names, date_series, has_column, int_values, require_column, set_column};

pub const REPORT_DATE: &str = "report_date";

fn first_of_month(year: Option<i64>, month: Option<i64>) -> Option<NaiveDate> {
    let year = i32::try_from(year?).ok()?;
    let month = u32::try_from(month?).ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Replace `report_year` (and `report_month`, when present) with a
/// `report_date` on the first day of the reported month.
pub fn add_report_date(df: &DataFrame, table: &str) -> Result<DataFrame> {
    let years = int_values(require_column(df, table, "report_year")?)?;
    let months = match df.column("report_month") {
        Ok(months) => int_values(months)?,
        Err(_) => vec![Some(1); years.len()],
    };

    let dates = years
        .into_iter()
        .zip(months)
        .map(|(y, m)| first_of_month(y, m))
        .collect();

    let mut out = df.drop("report_year")?;
    if has_column(&out, "report_month") {
        out = out.drop("report_month")?;
    }
    set_column(&mut out, date_series(REPORT_DATE, dates))?;
    Ok(out)
}

/// Fold every `<x>_month`/`<x>_year` column pair into one `<x>_date`
/// column. Pairs where either part is missing or out of range give null.
pub fn month_year_to_date(df: &DataFrame) -> Result<DataFrame> {
    let mut out = df.clone();
    for name in column_names(df) {
        let Some(prefix) = name.strip_suffix("_month") else {
            continue;
        };
        let year_column = format!("{}_year", prefix);
        if prefix == "report" || !has_column(df, &year_column) {
            continue;
        }

        let months = int_values(df.column(&name)?)?;
        let years = int_values(df.column(&year_column)?)?;
        let dates = years
            .into_iter()
            .zip(months)
            .map(|(y, m)| first_of_month(y, m))
            .collect();

        out = out.drop(&name)?.drop(&year_column)?;
        set_column(&mut out, date_series(&format!("{}_date", prefix), dates))?;
        debug!("folded {} and {} into {}_date", name, year_column, prefix);
    }
    Ok(out)
}
