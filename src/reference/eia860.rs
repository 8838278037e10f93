//! Form 860 ("Annual Electric Generator Report") workbooks. Each schedule is
//! published as its own workbook; callers hand the reader one merged
//! workbook per year with the schedules in the sheet order below.

use super::{FieldSpec, PageSpec};
use crate::page::Page;

const BOILER_GENERATOR_ASSN_FIELDS: &[FieldSpec] = &[
    field!("utility_id_eia", "utility_id"),
    field!("utility_name"),
    field!("plant_id_eia", "plant_code"),
    field!("plant_name"),
    field!("boiler_id"),
    field!("generator_id"),
    field!("steam_plant_type", [(2011, 2012, "steam_plant_type")]),
];

const UTILITY_FIELDS: &[FieldSpec] = &[
    field!("utility_id_eia", "utility_id"),
    field!("utility_name"),
    field!("street_address"),
    field!("city"),
    field!("state"),
    field!("zip_code", "zip"),
    field!("plants_reported_owner", [
        (2011, 2012, "owner"),
        (2013, 2016, "owner_of_plants_reported_on_form"),
    ]),
    field!("plants_reported_operator", [
        (2011, 2012, "operator"),
        (2013, 2016, "operator_of_plants_reported_on_form"),
    ]),
    field!("plants_reported_asset_manager", [
        (2011, 2012, "asset_manager"),
        (2013, 2016, "asset_manager_of_plants_reported_on_form"),
    ]),
    field!("plants_reported_other_relationship", [
        (2011, 2012, "other_relationship"),
        (2013, 2016, "other_relationships_with_plants_reported_on_form"),
    ]),
    field!("entity_type", [(2013, 2016, "entity_type")]),
];

const PLANT_FIELDS: &[FieldSpec] = &[
    field!("utility_id_eia", "utility_id"),
    field!("utility_name"),
    field!("plant_id_eia", "plant_code"),
    field!("plant_name"),
    field!("street_address"),
    field!("city"),
    field!("state"),
    field!("zip_code", "zip"),
    field!("county"),
    field!("latitude"),
    field!("longitude"),
    field!("nerc_region"),
    field!("balancing_authority_code"),
    field!("balancing_authority_name"),
    field!("water_source", "name_of_water_source"),
    field!("primary_purpose_naics_id", "primary_purpose_naics_code"),
    field!("regulatory_status_code", "regulatory_status"),
    field!("sector_id", "sector"),
    field!("sector_name"),
    field!("ferc_cogen_status", "ferc_cogeneration_status"),
    field!("ferc_small_power_producer", "ferc_small_power_producer_status"),
    field!("ferc_exempt_wholesale_generator", "ferc_exempt_wholesale_generator_status"),
    field!("ash_impoundment"),
    field!("ash_impoundment_lined"),
    field!("ash_impoundment_status"),
    field!("energy_storage", [(2012, 2016, "energy_storage")]),
    field!("natural_gas_storage", [(2014, 2016, "natural_gas_storage")]),
    field!("liquefied_natural_gas_storage", [(2014, 2016, "liquefied_natural_gas_storage")]),
    field!("transmission_distribution_owner_name"),
    field!("transmission_distribution_owner_id"),
];

// The operable, proposed and retired schedules share one layout.
const GENERATOR_FIELDS: &[FieldSpec] = &[
    field!("utility_id_eia", "utility_id"),
    field!("utility_name"),
    field!("plant_id_eia", "plant_code"),
    field!("plant_name"),
    field!("state"),
    field!("county"),
    field!("generator_id"),
    field!("technology", [(2014, 2016, "technology")]),
    field!("prime_mover_code", "prime_mover"),
    field!("unit_code"),
    field!("ownership_code", "ownership"),
    field!("duct_burners"),
    field!("heat_bypass_recovery", "can_bypass_heat_recovery_steam_generator"),
    field!("rto_iso_lmp_node_id", "rto_iso_lmp_node_designation"),
    field!(
        "rto_iso_location_wholesale_reporting_id",
        "rto_iso_location_designation_for_reporting_wholesale_sales_data_to_ferc"
    ),
    field!("nameplate_capacity_mw"),
    field!("nameplate_power_factor"),
    field!("summer_capacity_mw"),
    field!("winter_capacity_mw"),
    field!("minimum_load_mw"),
    field!("operating_month"),
    field!("operating_year"),
    field!("operational_status", "status"),
    field!("syncronized_transmission_grid", "synchronized_to_transmission_grid"),
    field!("associated_combined_heat_power", "associated_with_combined_heat_and_power_system"),
    field!("energy_source_code_1"),
    field!("energy_source_code_2"),
    field!("multiple_fuels"),
    field!("deliver_power_transgrid", "deliver_power_to_transmission_grid"),
    field!("solid_fuel_gasification", "solid_fuel_gasification_system"),
    field!("pulverized_coal_tech", "pulverized_coal_technology"),
    field!("fluidized_bed_tech", "fluidized_bed_technology"),
    field!("subcritical_tech", "subcritical_technology"),
    field!("supercritical_tech", "supercritical_technology"),
    field!("ultrasupercritical_tech", "ultrasupercritical_technology"),
    field!("carbon_capture", "carbon_capture_technology"),
    field!("stoker_tech", "stoker_technology"),
    field!("other_combustion_tech", "other_combustion_technology"),
    field!("cofire_fuels"),
    field!("switch_oil_gas", "switch_between_oil_and_natural_gas"),
    field!("planned_modifications"),
    field!("other_planned_modifications"),
    field!("uprate_derate_during_year", "uprate_or_derate_completed_during_year"),
    field!("previously_canceled", [(2013, 2016, "previously_canceled")]),
    field!("planned_retirement_month"),
    field!("planned_retirement_year"),
    field!("planned_uprate_month"),
    field!("planned_uprate_year"),
    field!("other_modifications_month"),
    field!("other_modifications_year"),
    field!("planned_derate_month"),
    field!("planned_derate_year"),
    field!("planned_repower_month"),
    field!("planned_repower_year"),
    field!("planned_net_summer_capacity_derate_mw"),
    field!("planned_net_summer_capacity_uprate_mw"),
    field!("planned_net_winter_capacity_derate_mw"),
    field!("planned_net_winter_capacity_uprate_mw"),
    field!("planned_new_capacity_mw"),
    field!("retirement_month"),
    field!("retirement_year"),
];

const OWNERSHIP_FIELDS: &[FieldSpec] = &[
    field!("utility_id_eia", "utility_id"),
    field!("utility_name"),
    field!("plant_id_eia", "plant_code"),
    field!("plant_name"),
    field!("state"),
    field!("generator_id"),
    field!("status"),
    field!("owner_name"),
    field!("owner_city"),
    field!("owner_state"),
    field!("owner_zip"),
    field!("owner_utility_id_eia", "owner_id"),
    field!("fraction_owned", "percent_owned"),
];

pub const PAGES: &[PageSpec] = &[
    PageSpec {
        page: Page::BoilerGeneratorAssn,
        years: (2011, 2016),
        sheets: sheets![(2011, 2011, 0, 0), (2012, 2016, 0, 1)],
        fields: BOILER_GENERATOR_ASSN_FIELDS,
        aggregate_plant_column: Some("plant_id_eia"),
        year_column: Some("report_year"),
        first_unnamed_as: None,
    },
    PageSpec {
        page: Page::Utility,
        years: (2011, 2016),
        sheets: sheets![(2011, 2011, 1, 0), (2012, 2016, 1, 1)],
        fields: UTILITY_FIELDS,
        aggregate_plant_column: None,
        year_column: Some("report_year"),
        first_unnamed_as: None,
    },
    PageSpec {
        page: Page::Plant,
        years: (2011, 2016),
        sheets: sheets![(2011, 2011, 2, 0), (2012, 2016, 2, 1)],
        fields: PLANT_FIELDS,
        aggregate_plant_column: Some("plant_id_eia"),
        year_column: Some("report_year"),
        first_unnamed_as: None,
    },
    PageSpec {
        page: Page::GeneratorExisting,
        years: (2011, 2016),
        sheets: sheets![(2011, 2011, 3, 0), (2012, 2016, 3, 1)],
        fields: GENERATOR_FIELDS,
        aggregate_plant_column: Some("plant_id_eia"),
        year_column: Some("report_year"),
        first_unnamed_as: None,
    },
    PageSpec {
        page: Page::GeneratorProposed,
        years: (2011, 2016),
        sheets: sheets![(2011, 2011, 4, 0), (2012, 2016, 4, 1)],
        fields: GENERATOR_FIELDS,
        aggregate_plant_column: Some("plant_id_eia"),
        year_column: Some("report_year"),
        first_unnamed_as: None,
    },
    PageSpec {
        page: Page::GeneratorRetired,
        years: (2011, 2016),
        sheets: sheets![(2011, 2011, 5, 0), (2012, 2016, 5, 1)],
        fields: GENERATOR_FIELDS,
        aggregate_plant_column: Some("plant_id_eia"),
        year_column: Some("report_year"),
        first_unnamed_as: None,
    },
    PageSpec {
        page: Page::Ownership,
        years: (2011, 2016),
        sheets: sheets![(2011, 2011, 6, 0), (2012, 2016, 6, 1)],
        fields: OWNERSHIP_FIELDS,
        aggregate_plant_column: Some("plant_id_eia"),
        year_column: Some("report_year"),
        first_unnamed_as: None,
    },
];
