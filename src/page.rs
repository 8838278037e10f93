use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NormalizeError;

/// The two EIA survey forms the crate understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Form {
    Eia923,
    Eia860,
}

/// One logical tab of an annual workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Page {
    // Form 923
    GenerationFuel,
    Stocks,
    BoilerFuel,
    Generator,
    FuelReceiptsCosts,
    PlantFrame,
    // Form 860
    BoilerGeneratorAssn,
    Utility,
    Plant,
    GeneratorExisting,
    GeneratorProposed,
    GeneratorRetired,
    Ownership,
}

impl Page {
    pub const ALL: [Page; 13] = [
        Page::GenerationFuel,
        Page::Stocks,
        Page::BoilerFuel,
        Page::Generator,
        Page::FuelReceiptsCosts,
        Page::PlantFrame,
        Page::BoilerGeneratorAssn,
        Page::Utility,
        Page::Plant,
        Page::GeneratorExisting,
        Page::GeneratorProposed,
        Page::GeneratorRetired,
        Page::Ownership,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Page::GenerationFuel => "generation_fuel",
            Page::Stocks => "stocks",
            Page::BoilerFuel => "boiler_fuel",
            Page::Generator => "generator",
            Page::FuelReceiptsCosts => "fuel_receipts_costs",
            Page::PlantFrame => "plant_frame",
            Page::BoilerGeneratorAssn => "boiler_generator_assn",
            Page::Utility => "utility",
            Page::Plant => "plant",
            Page::GeneratorExisting => "generator_existing",
            Page::GeneratorProposed => "generator_proposed",
            Page::GeneratorRetired => "generator_retired",
            Page::Ownership => "ownership",
        }
    }

    pub fn form(self) -> Form {
        match self {
            Page::GenerationFuel
            | Page::Stocks
            | Page::BoilerFuel
            | Page::Generator
            | Page::FuelReceiptsCosts
            | Page::PlantFrame => Form::Eia923,
            _ => Form::Eia860,
        }
    }

    pub fn pages_of(form: Form) -> impl Iterator<Item = Page> {
        Page::ALL.into_iter().filter(move |p| p.form() == form)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Page {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| NormalizeError::UnknownPage(s.to_string()))
    }
}

/// The canonical Form 860 entity tables produced by the transformers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityTable {
    #[serde(rename = "ownership_eia860")]
    Ownership,
    #[serde(rename = "generators_eia860")]
    Generators,
    #[serde(rename = "plants_eia860")]
    Plants,
    #[serde(rename = "boiler_generator_assn_eia860")]
    BoilerGeneratorAssn,
    #[serde(rename = "utilities_eia860")]
    Utilities,
}

impl EntityTable {
    pub const ALL: [EntityTable; 5] = [
        EntityTable::Ownership,
        EntityTable::Generators,
        EntityTable::Plants,
        EntityTable::BoilerGeneratorAssn,
        EntityTable::Utilities,
    ];

    pub fn table_name(self) -> &'static str {
        match self {
            EntityTable::Ownership => "ownership_eia860",
            EntityTable::Generators => "generators_eia860",
            EntityTable::Plants => "plants_eia860",
            EntityTable::BoilerGeneratorAssn => "boiler_generator_assn_eia860",
            EntityTable::Utilities => "utilities_eia860",
        }
    }

    /// The Form 860 pages this table is built from.
    pub fn source_pages(self) -> &'static [Page] {
        match self {
            EntityTable::Ownership => &[Page::Ownership],
            EntityTable::Generators => &[
                Page::GeneratorExisting,
                Page::GeneratorProposed,
                Page::GeneratorRetired,
            ],
            EntityTable::Plants => &[Page::Plant],
            EntityTable::BoilerGeneratorAssn => &[Page::BoilerGeneratorAssn],
            EntityTable::Utilities => &[Page::Utility],
        }
    }

    /// Pages needed for `tables`, in workbook order.
    pub fn pages_for(tables: &[EntityTable]) -> Vec<Page> {
        Page::pages_of(Form::Eia860)
            .filter(|page| tables.iter().any(|t| t.source_pages().contains(page)))
            .collect()
    }
}

impl fmt::Display for EntityTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

impl FromStr for EntityTable {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityTable::ALL
            .into_iter()
            .find(|t| t.table_name() == s)
            .ok_or_else(|| NormalizeError::UnknownTable(s.to_string()))
    }
}
