//! Form 860 entity transformers. Each one takes the canonical page frames
//! and the tables built so far, and returns the tables with its own added.

use std::collections::BTreeMap;

use log::{debug, info};
use polars::prelude::*;

use crate::error::Result;
use crate::frame::set_column;
use crate::page::{EntityTable, Page};

pub mod boiler_generator;
pub mod dates;
pub mod generators;
pub mod ownership;
pub mod plants;
pub mod utilities;

/// Canonical frames keyed by page, as produced by the page reader.
#[derive(Debug, Clone, Default)]
pub struct PageFrames {
    frames: BTreeMap<Page, DataFrame>,
}

impl PageFrames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, page: Page, df: DataFrame) {
        self.frames.insert(page, df);
    }

    pub fn with_page(mut self, page: Page, df: DataFrame) -> Self {
        self.insert(page, df);
        self
    }

    pub fn get(&self, page: Page) -> Option<&DataFrame> {
        self.frames.get(&page)
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FromIterator<(Page, DataFrame)> for PageFrames {
    fn from_iter<I: IntoIterator<Item = (Page, DataFrame)>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
        }
    }
}

/// Output tables keyed by table name.
#[derive(Debug, Clone, Default)]
pub struct TransformedTables {
    tables: BTreeMap<String, DataFrame>,
}

impl TransformedTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, name: impl Into<String>, df: DataFrame) -> Self {
        self.tables.insert(name.into(), df);
        self
    }

    pub fn get(&self, name: &str) -> Option<&DataFrame> {
        self.tables.get(name)
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

pub type Transformer = fn(&PageFrames, TransformedTables) -> Result<TransformedTables>;

pub fn transformer(table: EntityTable) -> Transformer {
    match table {
        EntityTable::Ownership => ownership::transform,
        EntityTable::Generators => generators::transform,
        EntityTable::Plants => plants::transform,
        EntityTable::BoilerGeneratorAssn => boiler_generator::transform,
        EntityTable::Utilities => utilities::transform,
    }
}

/// Run the transformers for `tables`, always in the fixed order of
/// `EntityTable::ALL`.
pub fn transform_eia860(pages: &PageFrames, tables: &[EntityTable]) -> Result<TransformedTables> {
    let mut out = TransformedTables::new();
    if pages.is_empty() {
        info!("no Form 860 pages supplied, nothing to transform");
        return Ok(out);
    }

    for table in EntityTable::ALL {
        if !tables.contains(&table) {
            continue;
        }
        info!("transforming {}", table);
        out = transformer(table)(pages, out)?;
    }
    Ok(out)
}

/// Apply `f` to each listed column the table actually has.
pub(crate) fn map_columns<F>(df: &mut DataFrame, table: &str, columns: &[&str], f: F) -> Result<()>
where
    F: Fn(&Series) -> Result<Series>,
{
    for name in columns {
        let mapped = match df.column(name) {
            Ok(series) => Some(f(series)?),
            Err(_) => None,
        };
        match mapped {
            Some(series) => set_column(df, series)?,
            None => debug!("{}: no {} column, skipped", table, name),
        }
    }
    Ok(())
}

/// Like `map_columns`, but every listed column must be present.
pub(crate) fn map_required<F>(df: &mut DataFrame, table: &str, columns: &[&str], f: F) -> Result<()>
where
    F: Fn(&Series) -> Result<Series>,
{
    for name in columns {
        let mapped = f(crate::frame::require_column(df, table, name)?)?;
        set_column(df, mapped)?;
    }
    Ok(())
}

/// Drop rows missing any of the identifying `ids`. Run after the ids are
/// coerced, so an id that did not parse counts as missing.
pub(crate) fn drop_unidentified(df: &DataFrame, table: &str, ids: &[&str]) -> Result<DataFrame> {
    let subset: Vec<Expr> = ids.iter().map(|id| col(*id)).collect();
    let kept = df.clone().lazy().drop_nulls(Some(subset)).collect()?;
    let dropped = df.height() - kept.height();
    if dropped > 0 {
        info!("{}: dropped {} rows without {}", table, dropped, ids.join(" or "));
    }
    Ok(kept)
}

#[cfg(test)]
pub(crate) mod test_support {
    use polars::prelude::*;

    use crate::frame::{int_series, string_series};

    pub fn text(name: &str, values: &[Option<&str>]) -> Series {
        string_series(name, values.iter().map(|v| v.map(str::to_string)).collect())
    }

    pub fn ints(name: &str, values: &[Option<i64>]) -> Series {
        int_series(name, values.to_vec())
    }

    pub fn bools(series: &Series) -> Vec<Option<bool>> {
        series.bool().unwrap().into_iter().collect()
    }
}
