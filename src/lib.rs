//! Schema reconciliation and value cleaning for the EIA Form 923 and Form
//! 860 annual spreadsheets.
//!
//! Workbooks come in keyed by year. Each page is read through the column
//! registry into one canonical DataFrame spanning all requested years, and
//! the Form 860 pages are then cleaned into entity tables.

#[macro_use]
pub mod reference;

pub mod canonicalize;
pub mod error;
pub mod frame;
pub mod monthly;
pub mod page;
pub mod page_reader;
pub mod plant_info;
pub mod registry;
pub mod settings;
pub mod transform;
pub mod workbook;

use std::collections::BTreeMap;

use log::{debug, info};

pub use error::{NormalizeError, Result};
pub use monthly::{expand_to_monthly, MonthTemplate, MonthlyLayout};
pub use page::{EntityTable, Form, Page};
pub use page_reader::read_page;
pub use plant_info::plant_info_eia923;
pub use registry::{Registry, YearPageMapping};
pub use settings::NormalizeSettings;
pub use transform::{transform_eia860, PageFrames, TransformedTables};
pub use workbook::{BufferedWorkbook, SheetGrid, Workbook};

/// Read `pages` for the requested years. Each page is read only for the
/// years it exists in; pages with none of them are left out.
pub fn read_pages<W: Workbook>(
    pages: impl IntoIterator<Item = Page>,
    workbooks: &BTreeMap<i32, W>,
    years: &[i32],
) -> Result<PageFrames> {
    let registry = Registry::standard()?;
    let mut frames = PageFrames::new();
    for page in pages {
        let supported: Vec<i32> = years
            .iter()
            .copied()
            .filter(|year| registry.supports(page, *year))
            .collect();
        if supported.is_empty() {
            debug!("{}: none of {:?} supported, skipped", page, years);
            continue;
        }
        let df = page_reader::read_page_with(registry, page, workbooks, &supported)?;
        frames.insert(page, df);
    }
    Ok(frames)
}

/// Read every page of `form` for the requested years.
pub fn read_form_pages<W: Workbook>(
    form: Form,
    workbooks: &BTreeMap<i32, W>,
    years: &[i32],
) -> Result<PageFrames> {
    read_pages(Page::pages_of(form), workbooks, years)
}

/// Read and clean the Form 860 workbooks into the enabled entity tables.
/// Only the pages behind those tables are opened.
pub fn normalize_eia860<W: Workbook>(
    workbooks: &BTreeMap<i32, W>,
    settings: &NormalizeSettings,
) -> Result<TransformedTables> {
    settings.validate(Registry::standard()?)?;
    let needed = EntityTable::pages_for(&settings.eia860_tables);
    let pages = read_pages(needed, workbooks, &settings.eia860_years)?;
    let tables = transform_eia860(&pages, &settings.eia860_tables)?;
    info!("Form 860: built {} tables", tables.len());
    Ok(tables)
}

/// Read the Form 923 workbooks into canonical page frames.
pub fn normalize_eia923<W: Workbook>(
    workbooks: &BTreeMap<i32, W>,
    settings: &NormalizeSettings,
) -> Result<PageFrames> {
    settings.validate(Registry::standard()?)?;
    read_form_pages(Form::Eia923, workbooks, &settings.eia923_years)
}
