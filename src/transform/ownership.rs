use log::{debug, info};

use super::dates::add_report_date;
use super::{drop_unidentified, map_required, PageFrames, TransformedTables};
use crate::canonicalize::{coerce_integer_id, coerce_missing_sentinels};
use crate::error::{NormalizeError, Result};
use crate::frame::{float_series, float_values, int_values, require_column, set_column};
use crate::page::{EntityTable, Page};
use crate::reference::codes::OWNERSHIP_PERCENT_YEAR;

const INTEGER_IDS: &[&str] = &["owner_utility_id_eia", "utility_id_eia", "plant_id_eia"];

pub fn transform(pages: &PageFrames, tables: TransformedTables) -> Result<TransformedTables> {
    let table = EntityTable::Ownership.table_name();
    let Some(raw) = pages.get(Page::Ownership) else {
        debug!("{}: no {} page, skipped", table, Page::Ownership);
        return Ok(tables);
    };

    let mut df = coerce_missing_sentinels(raw)?;

    let years = int_values(require_column(&df, table, "report_year")?)?;
    if let Some(earliest) = years.iter().flatten().min() {
        if *earliest < OWNERSHIP_PERCENT_YEAR as i64 {
            return Err(NormalizeError::DataIntegrity(format!(
                "{} holds {} data; the percentage fix is only known for {} onward",
                table, earliest, OWNERSHIP_PERCENT_YEAR
            )));
        }
    }

    // Ownership was a percentage in the first year, a fraction afterwards.
    let fractions = float_values(require_column(&df, table, "fraction_owned")?)?;
    let fractions = fractions
        .into_iter()
        .zip(years.iter())
        .map(|(fraction, year)| match year {
            Some(y) if *y == OWNERSHIP_PERCENT_YEAR as i64 => fraction.map(|f| f / 100.0),
            _ => fraction,
        })
        .collect();
    set_column(&mut df, float_series("fraction_owned", fractions))?;

    map_required(&mut df, table, INTEGER_IDS, coerce_integer_id)?;
    let df = drop_unidentified(&df, table, &["plant_id_eia", "owner_utility_id_eia"])?;
    let df = add_report_date(&df, table)?;

    info!("{}: {} rows", table, df.height());
    Ok(tables.with_table(table, df))
}

#[cfg(test)]
mod tests {
    use polars::prelude::*;

    use super::*;
    use crate::transform::test_support::*;

    fn ownership_page(years: &[i64], fractions: &[Option<&str>]) -> DataFrame {
        let n = years.len();
        DataFrame::new(vec![
            ints("utility_id_eia", &vec![Some(10); n]),
            ints("plant_id_eia", &vec![Some(20); n]),
            text("generator_id", &vec![Some("1"); n]),
            text("owner_utility_id_eia", &vec![Some("30"); n]),
            text("fraction_owned", fractions),
            ints(
                "report_year",
                &years.iter().map(|y| Some(*y)).collect::<Vec<_>>(),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_percentages_scaled_only_in_first_year() {
        let page = ownership_page(&[2011, 2012, 2011], &[Some("45"), Some("0.30"), Some(".")]);
        let pages = PageFrames::new().with_page(Page::Ownership, page);
        let tables = transform(&pages, TransformedTables::new()).unwrap();
        let df = tables.get("ownership_eia860").unwrap();

        let fractions = float_values(df.column("fraction_owned").unwrap()).unwrap();
        assert_eq!(fractions, vec![Some(0.45), Some(0.30), None]);
        for id in INTEGER_IDS {
            assert_eq!(df.column(id).unwrap().dtype(), &DataType::Int64);
        }
    }

    #[test]
    fn test_rows_without_a_readable_owner_are_dropped() {
        let mut page = ownership_page(&[2012, 2012], &[Some("0.5"), Some("0.5")]);
        page.with_column(text("owner_utility_id_eia", &[Some("30"), Some("various")]))
            .unwrap();
        let pages = PageFrames::new().with_page(Page::Ownership, page);
        let tables = transform(&pages, TransformedTables::new()).unwrap();
        let df = tables.get("ownership_eia860").unwrap();

        assert_eq!(df.height(), 1);
        assert_eq!(
            int_values(df.column("owner_utility_id_eia").unwrap()).unwrap(),
            vec![Some(30)]
        );
    }

    #[test]
    fn test_pre_2011_data_is_rejected() {
        let page = ownership_page(&[2010, 2012], &[Some("50"), Some("0.5")]);
        let pages = PageFrames::new().with_page(Page::Ownership, page);
        assert!(matches!(
            transform(&pages, TransformedTables::new()),
            Err(NormalizeError::DataIntegrity(_))
        ));
    }
}
