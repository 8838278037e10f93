//! Form 923 ("Power Plant Operations Report"), schedules 2–5 workbook.
//!
//! Canonical names follow the 2014–2016 headers.

use super::{FieldSpec, PageSpec};
use crate::page::Page;

const GENERATION_FUEL_FIELDS: &[FieldSpec] = &[
    field!("plant_id"),
    field!("combined_heat_power", [
        (2009, 2010, "combined_heat_power_plant"),
        (2011, 2016, "combined_heat_and_power_plant"),
    ]),
    field!("nuclear_unit_id"),
    field!("plant_name"),
    field!("operator_name"),
    field!("operator_id"),
    field!("plant_state", "state"),
    field!("census_region"),
    field!("nerc_region"),
    field!("naics_code"),
    field!("eia_sector", "eia_sector_number"),
    field!("sector_name"),
    field!("reported_prime_mover"),
    field!("reported_fuel_type_code"),
    field!("aer_fuel_type", [
        (2009, 2010, "aer_fuel_type"),
        (2011, 2016, "aer_fuel_type_code"),
    ]),
    field!("physical_unit_label"),
    monthly!("quantity"),
    monthly!("elec_quantity"),
    monthly!("mmbtu_per_unit", [
        (2009, 2010, "mmbtu_per_unit"),
        (2011, 2016, "mmbtuper_unit"),
    ]),
    monthly!("tot_mmbtu"),
    monthly!("elec_mmbtu"),
    monthly!("netgen"),
    field!("total_fuel_consumption_quantity"),
    field!("electric_fuel_consumption_quantity"),
    field!("total_fuel_consumption_mmbtu"),
    field!("elec_fuel_consumption_mmbtu"),
    field!("net_generation_megawatthours"),
    field!("year"),
];

const STOCKS_FIELDS: &[FieldSpec] = &[
    monthly!("coal", [(2009, 2010, "coal_stocks"), (2011, 2016, "coal")]),
    monthly!("oil", [(2009, 2010, "oil_stocks"), (2011, 2016, "oil")]),
    monthly!("petcoke", [(2009, 2010, "petroleum_coke_stocks"), (2011, 2016, "petcoke")]),
];

const BOILER_FUEL_FIELDS: &[FieldSpec] = &[
    field!("plant_id"),
    field!("combined_heat_power", [
        (2009, 2010, "combined_heat_power_plant"),
        (2011, 2016, "combined_heat_and_power_plant"),
    ]),
    field!("plant_name"),
    field!("operator_name"),
    field!("operator_id"),
    field!("plant_state", "state"),
    field!("census_region"),
    field!("nerc_region"),
    field!("naics_code"),
    field!("eia_sector", "eia_sector_number"),
    field!("sector_name"),
    field!("boiler_id"),
    field!("reported_prime_mover"),
    field!("reported_fuel_type_code"),
    field!("physical_unit_label"),
    monthly!("quantity_of_fuel_consumed"),
    monthly!("mmbtu_per_unit"),
    monthly!("sulfur_content"),
    monthly!("ash_content"),
    field!("total_fuel_consumption_quantity"),
    field!("year"),
];

const GENERATOR_FIELDS: &[FieldSpec] = &[
    field!("plant_id"),
    field!("combined_heat_power", [
        (2009, 2010, "combined_heat_power_plant"),
        (2011, 2016, "combined_heat_and_power_plant"),
    ]),
    field!("plant_name"),
    field!("operator_name"),
    field!("operator_id"),
    field!("plant_state", "state"),
    field!("census_region"),
    field!("nerc_region"),
    field!("naics_code"),
    field!("eia_sector", "eia_sector_number"),
    field!("sector_name"),
    field!("generator_id"),
    field!("reported_prime_mover"),
    monthly!("net_generation"),
    field!("net_generation_year_to_date"),
    field!("year"),
];

const FUEL_RECEIPTS_COSTS_FIELDS: &[FieldSpec] = &[
    field!("year"),
    field!("month"),
    field!("plant_id"),
    field!("plant_name"),
    field!("plant_state"),
    field!("purchase_type"),
    field!("contract_expiration_date"),
    field!("energy_source"),
    field!("fuel_group"),
    field!("coalmine_type"),
    field!("coalmine_state"),
    field!("coalmine_county"),
    field!("coalmine_msha_id"),
    field!("coalmine_name"),
    field!("supplier"),
    field!("quantity"),
    field!("average_heat_content"),
    field!("average_sulfur_content"),
    field!("average_ash_content"),
    field!("average_mercury_content", [(2011, 2016, "average_mercury_content")]),
    field!("fuel_cost"),
    field!("regulated"),
    field!("operator_name"),
    field!("operator_id"),
    field!("reporting_frequency"),
    field!("primary_transportation_mode", [(2011, 2016, "primary_transportation_mode")]),
    field!("secondary_transportation_mode", [(2011, 2016, "secondary_transportation_mode")]),
    field!("natural_gas_transportation_service", [
        (2014, 2016, "natural_gas_transportation_service"),
    ]),
];

const PLANT_FRAME_FIELDS: &[FieldSpec] = &[
    field!("year"),
    field!("plant_id"),
    field!("plant_state"),
    field!("plant_name"),
    field!("eia_sector", "sector_number"),
    field!("naics_code"),
    field!("combined_heat_power", "combined_heat_and_power_status"),
    field!("reporting_frequency"),
    field!("nameplate_capacity_mw", [(2013, 2016, "nameplate_capacity_mw")]),
];

pub const PAGES: &[PageSpec] = &[
    PageSpec {
        page: Page::GenerationFuel,
        years: (2009, 2016),
        sheets: sheets![(2009, 2010, 0, 7), (2011, 2016, 0, 5)],
        fields: GENERATION_FUEL_FIELDS,
        aggregate_plant_column: Some("plant_id"),
        year_column: None,
        first_unnamed_as: None,
    },
    PageSpec {
        page: Page::Stocks,
        years: (2009, 2016),
        sheets: sheets![(2009, 2010, 1, 6), (2011, 2016, 1, 5)],
        fields: STOCKS_FIELDS,
        aggregate_plant_column: None,
        year_column: Some("year"),
        first_unnamed_as: Some("census_division_and_state"),
    },
    PageSpec {
        page: Page::BoilerFuel,
        years: (2009, 2016),
        sheets: sheets![(2009, 2010, 2, 7), (2011, 2016, 3, 5)],
        fields: BOILER_FUEL_FIELDS,
        aggregate_plant_column: Some("plant_id"),
        year_column: None,
        first_unnamed_as: None,
    },
    PageSpec {
        page: Page::Generator,
        years: (2009, 2016),
        sheets: sheets![(2009, 2010, 3, 7), (2011, 2016, 4, 5)],
        fields: GENERATOR_FIELDS,
        aggregate_plant_column: Some("plant_id"),
        year_column: None,
        first_unnamed_as: None,
    },
    PageSpec {
        page: Page::FuelReceiptsCosts,
        years: (2009, 2016),
        sheets: sheets![(2009, 2010, 4, 6), (2011, 2016, 5, 4)],
        fields: FUEL_RECEIPTS_COSTS_FIELDS,
        aggregate_plant_column: Some("plant_id"),
        year_column: None,
        first_unnamed_as: None,
    },
    PageSpec {
        page: Page::PlantFrame,
        years: (2011, 2016),
        sheets: sheets![(2011, 2011, 6, 4), (2012, 2016, 7, 4)],
        fields: PLANT_FRAME_FIELDS,
        aggregate_plant_column: Some("plant_id"),
        year_column: None,
        first_unnamed_as: None,
    },
];
