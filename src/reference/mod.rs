//! Static reference tables describing where each page lives in each year's
//! workbook and how its headers map onto canonical column names.
//!
//! Headers are given in normalized form (lower case, non-alphanumeric runs
//! collapsed to `_`). Monthly fields are listed once; the registry expands
//! them to one column per month (`<name>_january` .. `<name>_december`).

use crate::page::Page;

/// Inclusive year span covering every year a rule should apply to.
pub const ALL_YEARS: (i32, i32) = (i32::MIN, i32::MAX);

#[derive(Debug, Clone, Copy)]
pub struct SheetLayout {
    pub years: (i32, i32),
    pub sheet_index: usize,
    pub skip_rows: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub canonical: &'static str,
    /// Raw header per year span. Years not covered by any span do not carry
    /// the field at all.
    pub raw: &'static [((i32, i32), &'static str)],
    pub monthly: bool,
}

impl FieldSpec {
    pub fn raw_for(&self, year: i32) -> Option<&'static str> {
        self.raw
            .iter()
            .find(|((first, last), _)| (*first..=*last).contains(&year))
            .map(|(_, name)| *name)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PageSpec {
    pub page: Page,
    pub years: (i32, i32),
    pub sheets: &'static [SheetLayout],
    pub fields: &'static [FieldSpec],
    /// Column holding the plant id; rows equal to the state-aggregate
    /// sentinel are dropped when set.
    pub aggregate_plant_column: Option<&'static str>,
    /// Column injected with the report year when the sheet has none.
    pub year_column: Option<&'static str>,
    /// Canonical name given to the first blank header of the sheet.
    pub first_unnamed_as: Option<&'static str>,
}

macro_rules! field {
    ($name:literal) => {
        $crate::reference::FieldSpec {
            canonical: $name,
            raw: &[($crate::reference::ALL_YEARS, $name)],
            monthly: false,
        }
    };
    ($name:literal, $raw:literal) => {
        $crate::reference::FieldSpec {
            canonical: $name,
            raw: &[($crate::reference::ALL_YEARS, $raw)],
            monthly: false,
        }
    };
    ($name:literal, [$(($first:literal, $last:literal, $raw:literal)),+ $(,)?]) => {
        $crate::reference::FieldSpec {
            canonical: $name,
            raw: &[$((($first, $last), $raw)),+],
            monthly: false,
        }
    };
}

macro_rules! monthly {
    ($name:literal) => {
        $crate::reference::FieldSpec {
            canonical: $name,
            raw: &[($crate::reference::ALL_YEARS, $name)],
            monthly: true,
        }
    };
    ($name:literal, [$(($first:literal, $last:literal, $raw:literal)),+ $(,)?]) => {
        $crate::reference::FieldSpec {
            canonical: $name,
            raw: &[$((($first, $last), $raw)),+],
            monthly: true,
        }
    };
}

macro_rules! sheets {
    ($(($first:literal, $last:literal, $sheet:literal, $skip:literal)),+ $(,)?) => {
        &[$($crate::reference::SheetLayout {
            years: ($first, $last),
            sheet_index: $sheet,
            skip_rows: $skip,
        }),+]
    };
}

pub mod codes;
pub mod eia860;
pub mod eia923;

/// Every page the crate knows how to read.
pub fn page_specs() -> Vec<&'static PageSpec> {
    eia923::PAGES.iter().chain(eia860::PAGES.iter()).collect()
}
