#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};

use calamine::Data;
use eia_normalize::{BufferedWorkbook, Page, Registry, SheetGrid};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn s(value: &str) -> Data {
    Data::String(value.to_string())
}

pub fn n(value: f64) -> Data {
    Data::Float(value)
}

/// A sheet laid out the way EIA publishes `page` for `year`: note rows,
/// then a header row spelled in the raw (pre-normalization) style, then
/// data. Each row lists `(canonical column, cell)` pairs; a column named
/// `unnamed...` gets a blank header.
pub fn page_sheet(page: Page, year: i32, rows: &[Vec<(&str, Data)>]) -> SheetGrid {
    let mapping = Registry::standard().unwrap().lookup(page, year).unwrap();
    let raw_by_canonical: HashMap<&str, &str> = mapping
        .column_map
        .iter()
        .map(|(raw, canonical)| (canonical.as_str(), raw.as_str()))
        .collect();

    let mut columns: Vec<&str> = Vec::new();
    for row in rows {
        for (name, _) in row {
            if !columns.contains(name) {
                columns.push(*name);
            }
        }
    }

    let mut grid: Vec<Vec<Data>> = (0..mapping.skip_rows)
        .map(|i| vec![s(&format!("Source: EIA-{} note {}", page, i))])
        .collect();
    grid.push(
        columns
            .iter()
            .map(|name| {
                if name.starts_with("unnamed") {
                    return s("");
                }
                let raw = raw_by_canonical.get(name).copied().unwrap_or(*name);
                s(&raw.replace('_', " ").to_uppercase())
            })
            .collect(),
    );
    for row in rows {
        let cells: HashMap<&str, &Data> = row.iter().map(|(k, v)| (*k, v)).collect();
        grid.push(
            columns
                .iter()
                .map(|name| cells.get(name).map(|d| (*d).clone()).unwrap_or(Data::Empty))
                .collect(),
        );
    }
    SheetGrid::new(page.name(), grid)
}

/// One year's workbook with each given sheet at the index the registry
/// expects; every other slot holds an empty sheet.
pub fn workbook(year: i32, sheets: Vec<(Page, SheetGrid)>) -> BufferedWorkbook {
    padded_workbook(year, sheets, 8)
}

/// Like `workbook`, but the workbook ends at the last given sheet.
pub fn truncated_workbook(year: i32, sheets: Vec<(Page, SheetGrid)>) -> BufferedWorkbook {
    padded_workbook(year, sheets, 0)
}

fn padded_workbook(year: i32, sheets: Vec<(Page, SheetGrid)>, min_width: usize) -> BufferedWorkbook {
    let registry = Registry::standard().unwrap();
    let mut slots: BTreeMap<usize, SheetGrid> = BTreeMap::new();
    for (page, sheet) in sheets {
        let index = registry.lookup(page, year).unwrap().sheet_index;
        slots.insert(index, sheet);
    }
    let width = slots.keys().max().map_or(0, |i| i + 1).max(min_width);
    let grids = (0..width)
        .map(|i| {
            slots
                .remove(&i)
                .unwrap_or_else(|| SheetGrid::new(format!("Sheet{}", i), Vec::new()))
        })
        .collect();
    BufferedWorkbook::new(grids)
}
