//! The exhaustive list of Form 923 plants with their slowly changing
//! attributes, taken from the most recent year that reports each plant.

use std::collections::BTreeSet;

use log::{debug, info};
use polars::prelude::*;

use crate::error::Result;
use crate::frame::{
    has_column, int_series, int_values, latest_by_key, left_join, null_series,
    require_column,
};
use crate::page::Page;
use crate::transform::PageFrames;

const PLANT_ID: &str = "plant_id";
const YEAR: &str = "year";

const PLANT_ID_SOURCES: [Page; 5] = [
    Page::PlantFrame,
    Page::GenerationFuel,
    Page::BoilerFuel,
    Page::Generator,
    Page::FuelReceiptsCosts,
];

const PLANT_FRAME_ATTRIBUTES: &[&str] = &[
    "plant_state",
    "combined_heat_power",
    "eia_sector",
    "naics_code",
    "reporting_frequency",
];

const GENERATION_FUEL_ATTRIBUTES: &[&str] = &["census_region", "nerc_region"];

/// Most recent value of `attributes` per plant from one page, one row per
/// plant, or `None` when the page was not read.
fn latest_attributes(
    pages: &PageFrames,
    page: Page,
    attributes: &[&str],
) -> Result<Option<DataFrame>> {
    let Some(df) = pages.get(page) else {
        debug!("plant info: no {} page, {:?} left null", page, attributes);
        return Ok(None);
    };

    let table = page.name();
    let latest = latest_by_key(df, table, PLANT_ID, YEAR)?;
    let mut columns = vec![require_column(&latest, table, PLANT_ID)?.clone()];
    for name in attributes {
        columns.push(if has_column(&latest, name) {
            latest.column(name)?.clone()
        } else {
            null_series(name, latest.height())
        });
    }
    Ok(Some(DataFrame::new(columns)?))
}

pub fn plant_info_eia923(pages: &PageFrames) -> Result<DataFrame> {
    let mut plant_ids = BTreeSet::new();
    for page in PLANT_ID_SOURCES {
        let Some(df) = pages.get(page) else {
            continue;
        };
        let ids = int_values(require_column(df, page.name(), PLANT_ID)?)?;
        plant_ids.extend(ids.into_iter().flatten());
    }

    let ids: Vec<Option<i64>> = plant_ids.into_iter().map(Some).collect();
    let mut info = DataFrame::new(vec![int_series(PLANT_ID, ids)])?;

    for (page, attributes) in [
        (Page::PlantFrame, PLANT_FRAME_ATTRIBUTES),
        (Page::GenerationFuel, GENERATION_FUEL_ATTRIBUTES),
    ] {
        info = match latest_attributes(pages, page, attributes)? {
            Some(latest) => left_join(&info, &latest, PLANT_ID, page.name())?,
            None => {
                let mut filled = info;
                for name in attributes {
                    filled.with_column(null_series(name, filled.height()))?;
                }
                filled
            }
        };
    }

    info!("plant info: {} plants", info.height());
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{column_names, string_series, string_values};

    fn text(name: &str, values: &[&str]) -> Series {
        string_series(name, values.iter().map(|v| Some(v.to_string())).collect())
    }

    fn ints(name: &str, values: &[i64]) -> Series {
        int_series(name, values.iter().map(|v| Some(*v)).collect())
    }

    fn pages() -> PageFrames {
        let plant_frame = DataFrame::new(vec![
            ints("plant_id", &[10, 10, 20]),
            ints("year", &[2012, 2015, 2015]),
            text("plant_state", &["OK", "TX", "CA"]),
            text("reporting_frequency", &["A", "M", "M"]),
        ])
        .unwrap();
        let generation_fuel = DataFrame::new(vec![
            ints("plant_id", &[30, 10, 10]),
            ints("year", &[2014, 2016, 2013]),
            text("census_region", &["MTN", "WSC", "WNC"]),
            text("nerc_region", &["WECC", "TRE", "SPP"]),
        ])
        .unwrap();
        let fuel_receipts = DataFrame::new(vec![ints("plant_id", &[40, 20])]).unwrap();

        PageFrames::new()
            .with_page(Page::PlantFrame, plant_frame)
            .with_page(Page::GenerationFuel, generation_fuel)
            .with_page(Page::FuelReceiptsCosts, fuel_receipts)
    }

    #[test]
    fn test_plant_info_most_recent_wins() {
        let info = plant_info_eia923(&pages()).unwrap();

        assert_eq!(
            int_values(info.column("plant_id").unwrap()).unwrap(),
            vec![Some(10), Some(20), Some(30), Some(40)]
        );
        assert_eq!(
            string_values(info.column("plant_state").unwrap()).unwrap(),
            vec![Some("TX".to_string()), Some("CA".to_string()), None, None]
        );
        assert_eq!(
            string_values(info.column("nerc_region").unwrap()).unwrap(),
            vec![Some("TRE".to_string()), None, Some("WECC".to_string()), None]
        );
        // Not on this plant_frame, so all null.
        assert_eq!(info.column("naics_code").unwrap().null_count(), 4);
        assert_eq!(
            column_names(&info),
            vec![
                "plant_id",
                "plant_state",
                "combined_heat_power",
                "eia_sector",
                "naics_code",
                "reporting_frequency",
                "census_region",
                "nerc_region"
            ]
        );
    }

    #[test]
    fn test_plant_info_without_pages() {
        let info = plant_info_eia923(&PageFrames::new()).unwrap();
        assert_eq!(info.height(), 0);
        assert_eq!(info.width(), 8);
    }
}
