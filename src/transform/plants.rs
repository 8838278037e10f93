use log::{debug, info};

use super::dates::add_report_date;
use super::{drop_unidentified, map_columns, map_required, PageFrames, TransformedTables};
use crate::canonicalize::{
    coerce_integer_id, coerce_missing_sentinels, coerce_string_id, rewrite_token, to_boolean,
    upper_trim, BooleanCoding,
};
use crate::error::Result;
use crate::page::{EntityTable, Page};

const X_MEANS_NO: &[&str] = &[
    "ash_impoundment_lined",
    "natural_gas_storage",
    "liquefied_natural_gas_storage",
];

const BOOLEAN_COLUMNS: &[&str] = &[
    "ferc_cogen_status",
    "ferc_small_power_producer",
    "ferc_exempt_wholesale_generator",
    "ash_impoundment",
    "ash_impoundment_lined",
    "energy_storage",
    "natural_gas_storage",
    "liquefied_natural_gas_storage",
];

const INTEGER_IDS: &[&str] = &["plant_id_eia", "utility_id_eia", "primary_purpose_naics_id"];

pub fn transform(pages: &PageFrames, tables: TransformedTables) -> Result<TransformedTables> {
    let table = EntityTable::Plants.table_name();
    let Some(raw) = pages.get(Page::Plant) else {
        debug!("{}: no {} page, skipped", table, Page::Plant);
        return Ok(tables);
    };

    let mut df = coerce_missing_sentinels(raw)?;
    map_columns(&mut df, table, &["zip_code"], coerce_string_id)?;
    map_columns(&mut df, table, X_MEANS_NO, |s| rewrite_token(s, "X", "N"))?;
    let coding = BooleanCoding::default();
    map_columns(&mut df, table, BOOLEAN_COLUMNS, |s| to_boolean(s, &coding))?;
    map_columns(&mut df, table, &["state"], upper_trim)?;
    map_required(&mut df, table, INTEGER_IDS, coerce_integer_id)?;
    let df = drop_unidentified(&df, table, &["plant_id_eia"])?;

    let df = add_report_date(&df, table)?;
    info!("{}: {} rows", table, df.height());
    Ok(tables.with_table(table, df))
}

#[cfg(test)]
mod tests {
    use polars::prelude::*;

    use super::*;
    use crate::frame::{int_values, string_values};
    use crate::transform::test_support::*;

    fn plant_page() -> DataFrame {
        DataFrame::new(vec![
            ints("utility_id_eia", &[Some(195), Some(7)]),
            ints("plant_id_eia", &[Some(3), Some(8)]),
            text("state", &[Some(" al"), Some("TX")]),
            ints("zip_code", &[Some(36512), None]),
            text("primary_purpose_naics_id", &[Some("22"), Some("221112")]),
            text("ash_impoundment_lined", &[Some("X"), Some("Y")]),
            text("ferc_cogen_status", &[Some("Y"), Some(" ")]),
            text("energy_storage", &[Some("N"), None]),
            ints("report_year", &[Some(2014), Some(2014)]),
        ])
        .unwrap()
    }

    #[test]
    fn test_plants_transform() {
        let pages = PageFrames::new().with_page(Page::Plant, plant_page());
        let tables = transform(&pages, TransformedTables::new()).unwrap();
        let df = tables.get("plants_eia860").unwrap();

        assert_eq!(df.column("plant_id_eia").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("utility_id_eia").unwrap().dtype(), &DataType::Int64);
        assert_eq!(
            int_values(df.column("primary_purpose_naics_id").unwrap()).unwrap(),
            vec![Some(22), Some(221112)]
        );
        assert_eq!(
            string_values(df.column("zip_code").unwrap()).unwrap(),
            vec![Some("36512".to_string()), None]
        );
        assert_eq!(
            string_values(df.column("state").unwrap()).unwrap(),
            vec![Some("AL".to_string()), Some("TX".to_string())]
        );
        assert_eq!(
            bools(df.column("ash_impoundment_lined").unwrap()),
            vec![Some(false), Some(true)]
        );
        // Blank after sentinel cleanup, so it falls back to false.
        assert_eq!(
            bools(df.column("ferc_cogen_status").unwrap()),
            vec![Some(true), Some(false)]
        );
        assert!(df.column("report_date").is_ok());
        assert!(df.column("report_year").is_err());
    }

    #[test]
    fn test_footnote_in_plant_id_drops_the_row() {
        let mut page = plant_page();
        page.with_column(text("plant_id_eia", &[Some("3"), Some("Note: plant retired")]))
            .unwrap();
        let pages = PageFrames::new().with_page(Page::Plant, page);
        let tables = transform(&pages, TransformedTables::new()).unwrap();
        let df = tables.get("plants_eia860").unwrap();

        assert_eq!(int_values(df.column("plant_id_eia").unwrap()).unwrap(), vec![Some(3)]);
        assert_eq!(
            string_values(df.column("state").unwrap()).unwrap(),
            vec![Some("AL".to_string())]
        );
    }

    #[test]
    fn test_plants_require_ids() {
        let page = plant_page().drop("utility_id_eia").unwrap();
        let pages = PageFrames::new().with_page(Page::Plant, page);
        assert!(matches!(
            transform(&pages, TransformedTables::new()),
            Err(crate::error::NormalizeError::MissingColumn { .. })
        ));
    }
}
