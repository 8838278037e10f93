//! Existing, proposed and retired generators merged into one table.

use log::{debug, info};
use polars::prelude::*;

use super::dates::{add_report_date, month_year_to_date};
use super::{drop_unidentified, map_columns, map_required, PageFrames, TransformedTables};
use crate::canonicalize::{
    coerce_integer_id, coerce_missing_sentinels, coerce_string_id, normalize_categorical,
    rewrite_token, strip_lower, to_boolean, zero_to_missing, BooleanCoding, Unmapped,
};
use crate::error::Result;
use crate::frame::{concat_aligned, require_column, set_column, string_series};
use crate::page::{EntityTable, Page};
use crate::reference::codes::FUEL_TYPE_EIA860_SIMPLE;

pub const STATUS_COLUMN: &str = "operational_status_code";

const SOURCES: [(Page, &str); 3] = [
    (Page::GeneratorExisting, "existing"),
    (Page::GeneratorProposed, "proposed"),
    (Page::GeneratorRetired, "retired"),
];

// Zero here means "not reported".
const ZERO_MEANS_MISSING: &[&str] = &[
    "planned_retirement_month",
    "planned_retirement_year",
    "planned_uprate_month",
    "planned_uprate_year",
    "other_modifications_month",
    "other_modifications_year",
    "planned_derate_month",
    "planned_derate_year",
    "planned_repower_month",
    "planned_repower_year",
    "planned_net_summer_capacity_derate_mw",
    "planned_net_summer_capacity_uprate_mw",
    "planned_net_winter_capacity_derate_mw",
    "planned_net_winter_capacity_uprate_mw",
    "planned_new_capacity_mw",
    "nameplate_power_factor",
    "minimum_load_mw",
    "winter_capacity_mw",
    "summer_capacity_mw",
];

const X_MEANS_NO: &[&str] = &[
    "duct_burners",
    "heat_bypass_recovery",
    "syncronized_transmission_grid",
];

const U_MEANS_UNKNOWN: &[&str] = &["multiple_fuels", "switch_oil_gas"];

const BOOLEAN_COLUMNS: &[&str] = &[
    "duct_burners",
    "multiple_fuels",
    "deliver_power_transgrid",
    "syncronized_transmission_grid",
    "solid_fuel_gasification",
    "pulverized_coal_tech",
    "fluidized_bed_tech",
    "subcritical_tech",
    "supercritical_tech",
    "ultrasupercritical_tech",
    "carbon_capture",
    "stoker_tech",
    "other_combustion_tech",
    "cofire_fuels",
    "switch_oil_gas",
    "heat_bypass_recovery",
    "associated_combined_heat_power",
    "planned_modifications",
    "other_planned_modifications",
    "uprate_derate_during_year",
    "previously_canceled",
];

const LOWERCASE_IDS: &[&str] = &["rto_iso_lmp_node_id", "rto_iso_location_wholesale_reporting_id"];

/// Stack the generator pages that are present, tagging each row with the
/// page it came from.
fn union_generator_pages(pages: &PageFrames) -> Result<Option<DataFrame>> {
    let mut frames = Vec::new();
    for (page, status) in SOURCES {
        let Some(df) = pages.get(page) else {
            debug!("no {} page", page);
            continue;
        };
        let mut df = df.clone();
        let tags = vec![Some(status.to_string()); df.height()];
        set_column(&mut df, string_series(STATUS_COLUMN, tags))?;
        frames.push(df);
    }
    if frames.is_empty() {
        return Ok(None);
    }
    concat_aligned(frames).map(Some)
}

pub fn transform(pages: &PageFrames, tables: TransformedTables) -> Result<TransformedTables> {
    let table = EntityTable::Generators.table_name();
    let Some(raw) = union_generator_pages(pages)? else {
        debug!("{}: no generator pages, skipped", table);
        return Ok(tables);
    };

    let mut df = coerce_missing_sentinels(&raw)?;

    map_columns(&mut df, table, ZERO_MEANS_MISSING, zero_to_missing)?;
    map_columns(&mut df, table, X_MEANS_NO, |s| rewrite_token(s, "X", "N"))?;

    let plain = BooleanCoding::default();
    let with_unknown = BooleanCoding::with_unknown("U");
    map_columns(&mut df, table, BOOLEAN_COLUMNS, |s| {
        let name = s.name().to_string();
        if U_MEANS_UNKNOWN.contains(&name.as_str()) {
            to_boolean(s, &with_unknown)
        } else {
            to_boolean(s, &plain)
        }
    })?;

    let mut df = month_year_to_date(&df)?;

    let fuel = normalize_categorical(
        require_column(&df, table, "energy_source_code_1")?,
        FUEL_TYPE_EIA860_SIMPLE,
        Unmapped::Keep,
    )?;
    set_column(&mut df, fuel.with_name("fuel_type_code_pudl".into()))?;

    map_columns(&mut df, table, LOWERCASE_IDS, strip_lower)?;
    map_required(&mut df, table, &["plant_id_eia", "utility_id_eia"], coerce_integer_id)?;
    map_required(&mut df, table, &["generator_id"], coerce_string_id)?;
    let df = drop_unidentified(&df, table, &["plant_id_eia", "generator_id"])?;

    let df = add_report_date(&df, table)?;
    info!("{}: {} rows", table, df.height());
    Ok(tables.with_table(table, df))
}
