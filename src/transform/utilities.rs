use log::{debug, info};

use super::dates::add_report_date;
use super::{map_columns, map_required, PageFrames, TransformedTables};
use crate::canonicalize::{
    coerce_integer_id, coerce_missing_sentinels, replace_values, to_boolean, upper_trim,
    BooleanCoding,
};
use crate::error::Result;
use crate::page::{EntityTable, Page};
use crate::reference::codes::UTILITY_STATE_FIXES;

const BOOLEAN_COLUMNS: &[&str] = &[
    "plants_reported_owner",
    "plants_reported_operator",
    "plants_reported_asset_manager",
    "plants_reported_other_relationship",
];

pub fn transform(pages: &PageFrames, tables: TransformedTables) -> Result<TransformedTables> {
    let table = EntityTable::Utilities.table_name();
    let Some(raw) = pages.get(Page::Utility) else {
        debug!("{}: no {} page, skipped", table, Page::Utility);
        return Ok(tables);
    };

    let mut df = coerce_missing_sentinels(raw)?;
    map_columns(&mut df, table, &["state"], |s| {
        replace_values(&upper_trim(s)?, UTILITY_STATE_FIXES)
    })?;
    let coding = BooleanCoding::default();
    map_columns(&mut df, table, BOOLEAN_COLUMNS, |s| to_boolean(s, &coding))?;
    let mut df = add_report_date(&df, table)?;
    map_required(&mut df, table, &["utility_id_eia"], coerce_integer_id)?;

    info!("{}: {} rows", table, df.height());
    Ok(tables.with_table(table, df))
}
