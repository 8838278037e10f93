//! Wide-to-long reshaping of month-per-column tables.

use std::collections::HashSet;

use polars::prelude::*;

use crate::error::{NormalizeError, Result};
use crate::frame::{column_names, concat_aligned};

pub const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// One month of a layout: the month number and the suffix that, appended to
/// a field name with `_`, names that month's column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthTemplate {
    pub month: u32,
    pub suffix: String,
}

impl MonthTemplate {
    pub fn column(&self, field: &str) -> String {
        format!("{}_{}", field, self.suffix)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyLayout {
    fields: Vec<String>,
    months: Vec<MonthTemplate>,
}

impl MonthlyLayout {
    /// Months are stored sorted by month number; there must be exactly one
    /// template for each of 1..=12.
    pub fn new(fields: Vec<String>, mut months: Vec<MonthTemplate>) -> Result<Self> {
        if fields.is_empty() {
            return Err(NormalizeError::InvalidLayout(
                "layout names no monthly fields".to_string(),
            ));
        }
        months.sort_by_key(|m| m.month);
        let numbers: Vec<u32> = months.iter().map(|m| m.month).collect();
        if numbers != (1..=12).collect::<Vec<u32>>() {
            return Err(NormalizeError::InvalidLayout(format!(
                "expected one template per month 1-12, got {:?}",
                numbers
            )));
        }
        Ok(Self { fields, months })
    }

    /// Layout using the `<field>_<month name>` convention.
    pub fn named_months<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let months = MONTH_NAMES
            .iter()
            .enumerate()
            .map(|(i, name)| MonthTemplate {
                month: i as u32 + 1,
                suffix: name.to_string(),
            })
            .collect();
        Self::new(fields.into_iter().map(Into::into).collect(), months)
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn months(&self) -> &[MonthTemplate] {
        &self.months
    }

    /// Every month-specific column name, field by field.
    pub fn columns(&self) -> impl Iterator<Item = String> + '_ {
        self.fields
            .iter()
            .flat_map(move |f| self.months.iter().map(move |m| m.column(f)))
    }

    pub fn validate(&self, df: &DataFrame) -> Result<()> {
        let present: HashSet<String> = column_names(df).into_iter().collect();
        match self.columns().find(|c| !present.contains(c)) {
            Some(column) => Err(NormalizeError::MissingColumn {
                table: "monthly expansion".to_string(),
                column,
            }),
            None => Ok(()),
        }
    }
}

/// Turn each row into twelve rows, one per month, with the month number in
/// a `month` column and each field's month-specific value under the bare
/// field name. Columns the layout does not cover are repeated unchanged.
pub fn expand_to_monthly(df: &DataFrame, layout: &MonthlyLayout) -> Result<DataFrame> {
    layout.validate(df)?;

    let n = df.height();
    let months = layout.months().len();
    let templated: HashSet<String> = layout.columns().collect();

    let repeat: Vec<IdxSize> = (0..n)
        .flat_map(|row| std::iter::repeat(row as IdxSize).take(months))
        .collect();
    let repeat = IdxCa::from_vec("repeat".into(), repeat);

    let mut columns: Vec<Series> = Vec::with_capacity(df.width());
    for name in column_names(df) {
        if templated.contains(&name) {
            continue;
        }
        columns.push(df.column(&name)?.take(&repeat)?);
    }

    let month_numbers: Vec<i32> = (0..n)
        .flat_map(|_| layout.months().iter().map(|m| m.month as i32))
        .collect();
    columns.push(Series::new("month".into(), month_numbers));

    // Month series are stacked month-major; row i of month m sits at m * n + i.
    let interleave: Vec<IdxSize> = (0..n)
        .flat_map(|row| (0..months).map(move |m| (m * n + row) as IdxSize))
        .collect();
    let interleave = IdxCa::from_vec("interleave".into(), interleave);

    for field in layout.fields() {
        let per_month = layout
            .months()
            .iter()
            .map(|m| {
                let series = df.column(&m.column(field))?.clone();
                DataFrame::new(vec![series.with_name(field.as_str().into())])
            })
            .collect::<PolarsResult<Vec<DataFrame>>>()?;
        let stacked = concat_aligned(per_month)?;
        columns.push(stacked.column(field)?.take(&interleave)?);
    }

    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{float_values, int_series, int_values, string_series};

    fn wide_table() -> DataFrame {
        let mut columns = vec![
            int_series("plant_id", vec![Some(1), Some(2)]),
            string_series("plant_name", vec![Some("A".into()), Some("B".into())]),
        ];
        for (i, month) in MONTH_NAMES.iter().enumerate() {
            let base = (i + 1) as i64;
            columns.push(int_series(
                &format!("netgen_{}", month),
                vec![Some(base), Some(base * 100)],
            ));
        }
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn test_expand_to_monthly_row_count_and_order() {
        let df = wide_table();
        let layout = MonthlyLayout::named_months(["netgen"]).unwrap();
        let out = expand_to_monthly(&df, &layout).unwrap();

        assert_eq!(out.height(), 12 * df.height());
        assert_eq!(column_names(&out), vec!["plant_id", "plant_name", "month", "netgen"]);

        let plant = int_values(out.column("plant_id").unwrap()).unwrap();
        assert!(plant[..12].iter().all(|p| *p == Some(1)));
        assert!(plant[12..].iter().all(|p| *p == Some(2)));

        let month = int_values(out.column("month").unwrap()).unwrap();
        assert_eq!(month[0], Some(1));
        assert_eq!(month[11], Some(12));
        assert_eq!(month[12], Some(1));

        let netgen = int_values(out.column("netgen").unwrap()).unwrap();
        assert_eq!(netgen[2], Some(3));
        assert_eq!(netgen[14], Some(300));
    }

    #[test]
    fn test_mixed_month_types_widen() {
        let mut df = wide_table();
        df.with_column(crate::frame::float_series(
            "netgen_march",
            vec![Some(3.5), None],
        ))
        .unwrap();
        let layout = MonthlyLayout::named_months(["netgen"]).unwrap();
        let out = expand_to_monthly(&df, &layout).unwrap();

        assert_eq!(out.column("netgen").unwrap().dtype(), &DataType::Float64);
        let netgen = float_values(out.column("netgen").unwrap()).unwrap();
        assert_eq!(netgen[2], Some(3.5));
        assert_eq!(netgen[14], None);
    }

    #[test]
    fn test_missing_month_column_is_reported() {
        let df = wide_table().drop("netgen_july").unwrap();
        let layout = MonthlyLayout::named_months(["netgen"]).unwrap();
        match expand_to_monthly(&df, &layout) {
            Err(NormalizeError::MissingColumn { column, .. }) => assert_eq!(column, "netgen_july"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_layout_rejects_bad_definitions() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            MonthlyLayout::named_months(empty),
            Err(NormalizeError::InvalidLayout(_))
        ));

        let eleven = (1..=11)
            .map(|m| MonthTemplate {
                month: m,
                suffix: format!("m{}", m),
            })
            .collect();
        assert!(matches!(
            MonthlyLayout::new(vec!["x".to_string()], eleven),
            Err(NormalizeError::InvalidLayout(_))
        ));
    }
}
