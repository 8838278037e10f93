use log::{debug, info, warn};

use super::dates::add_report_date;
use super::{map_required, PageFrames, TransformedTables};
use crate::canonicalize::{coerce_integer_id, coerce_string_id, is_ascii_numeric};
use crate::error::Result;
use crate::frame::{
    dedupe_rows, drop_incomplete_rows, duplicate_keys, filter_rows, require_column,
    string_values,
};
use crate::page::{EntityTable, Page};

const ASSOCIATION_KEY: &[&str] = &["report_year", "plant_id_eia", "boiler_id", "generator_id"];

const COLUMNS: &[&str] = &[
    "report_year",
    "utility_id_eia",
    "plant_id_eia",
    "boiler_id",
    "generator_id",
];

pub fn transform(pages: &PageFrames, tables: TransformedTables) -> Result<TransformedTables> {
    let table = EntityTable::BoilerGeneratorAssn.table_name();
    let Some(raw) = pages.get(Page::BoilerGeneratorAssn) else {
        debug!("{}: no {} page, skipped", table, Page::BoilerGeneratorAssn);
        return Ok(tables);
    };

    for column in COLUMNS {
        require_column(raw, table, column)?;
    }
    let df = raw.select(COLUMNS.iter().copied())?;

    // Notes from EIA sometimes land in the data rows; they never carry a
    // numeric utility id.
    let keep: Vec<bool> = string_values(df.column("utility_id_eia")?)?
        .iter()
        .map(|id| id.as_deref().map(str::trim).is_some_and(is_ascii_numeric))
        .collect();
    let dropped = keep.iter().filter(|k| !**k).count();
    if dropped > 0 {
        info!("{}: dropped {} rows with a non-numeric utility id", table, dropped);
    }
    let mut df = filter_rows(&df, &keep)?;

    map_required(&mut df, table, &["plant_id_eia", "utility_id_eia"], coerce_integer_id)?;
    map_required(&mut df, table, &["boiler_id", "generator_id"], coerce_string_id)?;

    let df = drop_incomplete_rows(&dedupe_rows(&df)?)?;
    // EIA occasionally files one association under two utilities.
    let conflicts = duplicate_keys(&df, table, ASSOCIATION_KEY)?;
    if conflicts.height() > 0 {
        warn!(
            "{}: {} boiler/generator pairs reported by more than one utility",
            table,
            conflicts.height()
        );
    }
    let df = add_report_date(&df, table)?;
    info!("{}: {} rows", table, df.height());
    Ok(tables.with_table(table, df))
}
