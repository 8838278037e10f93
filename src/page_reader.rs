//! Reads one page across several years into a single canonical DataFrame.

use std::collections::{BTreeMap, HashMap, HashSet};

use calamine::Data;
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use polars::prelude::*;
use rayon::prelude::*;
use regex::Regex;

use crate::canonicalize::is_missing_sentinel;
use crate::error::{NormalizeError, Result};
use crate::frame::{
    bool_series, concat_aligned, filter_rows, float_series, format_number, int_series, int_values,
    integral, null_series, string_series,
};
use crate::page::Page;
use crate::reference::codes::AGGREGATE_PLANT_ID;
use crate::registry::{Registry, YearPageMapping};
use crate::workbook::Workbook;

static NON_ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9a-zA-Z]+").unwrap());

const UNNAMED_PREFIX: &str = "unnamed_";
const RESERVED_PREFIX: &str = "reserved";

/// Lower-case a header and collapse every run of non-alphanumeric
/// characters to a single `_`, trimming them at both ends.
pub fn normalize_header(raw: &str) -> String {
    NON_ALPHANUMERIC
        .replace_all(raw, " ")
        .trim()
        .to_lowercase()
        .replace(' ', "_")
}

/// Normalized headers for one header row. Blank headers become
/// `unnamed_<position>`; repeats get `_1`, `_2`, ... suffixes.
pub fn normalize_headers(raw: &[String]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut taken: HashSet<String> = HashSet::new();
    let mut headers = Vec::with_capacity(raw.len());

    for (i, header) in raw.iter().enumerate() {
        let mut name = normalize_header(header);
        if name.is_empty() {
            name = format!("{}{}", UNNAMED_PREFIX, i);
        }
        let count = seen.entry(name.clone()).or_insert(0);
        let mut unique = name.clone();
        while taken.contains(&unique) {
            *count += 1;
            unique = format!("{}_{}", name, count);
        }
        taken.insert(unique.clone());
        headers.push(unique);
    }
    headers
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(format_number(*f)),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(match dt.as_datetime() {
            Some(ts) if ts.time() == chrono::NaiveTime::MIN => ts.date().to_string(),
            Some(ts) => ts.to_string(),
            None => format_number(dt.as_f64()),
        }),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Type a column from its cells: all whole numbers -> `Int64`, all numbers
/// -> `Float64`, all booleans -> `Boolean`, anything else -> `String`.
/// Missing-value sentinels count as null for numeric typing.
fn build_column(name: &str, cells: &[&Data]) -> Series {
    let (mut ints, mut floats, mut bools, mut text) = (0usize, 0usize, 0usize, 0usize);
    for cell in cells {
        match cell {
            Data::Int(_) => ints += 1,
            Data::Float(f) if integral(*f).is_some() => ints += 1,
            Data::Float(_) => floats += 1,
            Data::Bool(_) => bools += 1,
            Data::String(s) if is_missing_sentinel(s) => {}
            Data::Empty | Data::Error(_) => {}
            _ => text += 1,
        }
    }

    let numeric = text == 0 && bools == 0;
    if ints + floats + bools + text == 0 {
        null_series(name, cells.len())
    } else if numeric && floats == 0 {
        let values = cells
            .iter()
            .map(|cell| match cell {
                Data::Int(i) => Some(*i),
                Data::Float(f) => integral(*f),
                _ => None,
            })
            .collect();
        int_series(name, values)
    } else if numeric {
        let values = cells
            .iter()
            .map(|cell| match cell {
                Data::Int(i) => Some(*i as f64),
                Data::Float(f) => Some(*f),
                _ => None,
            })
            .collect();
        float_series(name, values)
    } else if bools > 0 && ints + floats + text == 0 {
        let values = cells
            .iter()
            .map(|cell| match cell {
                Data::Bool(b) => Some(*b),
                _ => None,
            })
            .collect();
        bool_series(name, values)
    } else {
        let values = cells.iter().map(|cell| cell_text(cell)).collect();
        string_series(name, values)
    }
}

/// Read `page` for each year in `years` using the crate's reference tables.
/// Rows are stacked in the order the years are given.
pub fn read_page<W: Workbook>(
    page: Page,
    workbooks: &BTreeMap<i32, W>,
    years: &[i32],
) -> Result<DataFrame> {
    read_page_with(Registry::standard()?, page, workbooks, years)
}

pub fn read_page_with<W: Workbook>(
    registry: &Registry,
    page: Page,
    workbooks: &BTreeMap<i32, W>,
    years: &[i32],
) -> Result<DataFrame> {
    // Resolve everything up front so a bad year fails before any sheet is parsed.
    let mappings = years
        .iter()
        .map(|&year| registry.lookup(page, year))
        .collect::<Result<Vec<_>>>()?;
    let jobs = mappings
        .into_iter()
        .map(|mapping| {
            workbooks
                .get(&mapping.year)
                .map(|book| (mapping, book))
                .ok_or(NormalizeError::MissingWorkbook {
                    page,
                    year: mapping.year,
                })
        })
        .collect::<Result<Vec<_>>>()?;

    let canonical = registry.canonical_columns(page)?;
    if jobs.is_empty() {
        let columns = canonical.iter().map(|name| null_series(name, 0)).collect();
        return Ok(DataFrame::new(columns)?);
    }

    let frames = jobs
        .par_iter()
        .map(|(mapping, book)| read_year(registry, mapping, *book, &canonical))
        .collect::<Result<Vec<_>>>()?;

    let df = concat_aligned(frames)?;
    info!("{}: read {} rows from {} years", page, df.height(), years.len());
    Ok(df)
}

fn read_year<W: Workbook>(
    registry: &Registry,
    mapping: &YearPageMapping,
    book: &W,
    canonical: &[String],
) -> Result<DataFrame> {
    let page = mapping.page;
    let year = mapping.year;
    let spec = registry.spec(page)?;

    let sheet = book
        .sheet(mapping.sheet_index)
        .ok_or(NormalizeError::MissingSheet {
            page,
            year,
            index: mapping.sheet_index,
            available: book.sheet_count(),
        })?;

    let body = sheet.rows.get(mapping.skip_rows..).unwrap_or(&[]);
    let (header_row, data_rows) = match body.split_first() {
        Some((header, rows)) => (header.as_slice(), rows),
        None => (&[][..], &[][..]),
    };

    let rows: Vec<&Vec<Data>> = data_rows
        .iter()
        .filter(|row| !row.iter().all(is_blank))
        .collect();
    let blank = data_rows.len() - rows.len();
    if blank > 0 {
        debug!("{} {}: skipped {} blank rows", page, year, blank);
    }

    let width = rows
        .iter()
        .map(|row| row.len())
        .chain(std::iter::once(header_row.len()))
        .max()
        .unwrap_or(0);
    let raw_headers: Vec<String> = (0..width)
        .map(|i| header_row.get(i).and_then(cell_text).unwrap_or_default())
        .collect();
    let mut headers = normalize_headers(&raw_headers);

    if let Some(label) = spec.first_unnamed_as {
        if let Some(first) = headers.iter_mut().find(|h| h.starts_with(UNNAMED_PREFIX)) {
            *first = label.to_string();
        }
    }

    let kept: Vec<usize> = (0..width)
        .filter(|&i| !headers[i].starts_with(RESERVED_PREFIX))
        .collect();
    let final_names = rename_columns(mapping, kept.iter().map(|&i| headers[i].as_str()))?;

    let empty = Data::Empty;
    let mut columns: Vec<Series> = kept
        .iter()
        .zip(final_names.iter())
        .map(|(&i, name)| {
            let cells: Vec<&Data> = rows.iter().map(|row| row.get(i).unwrap_or(&empty)).collect();
            build_column(name, &cells)
        })
        .collect();

    let height = rows.len();
    if let Some(year_column) = spec.year_column {
        if !final_names.iter().any(|n| n == year_column) {
            columns.push(int_series(year_column, vec![Some(year as i64); height]));
        }
    }

    let mut by_name: HashMap<String, Series> = columns
        .into_iter()
        .map(|s| (s.name().to_string(), s))
        .collect();
    let mut ordered: Vec<Series> = canonical
        .iter()
        .map(|name| {
            by_name
                .remove(name)
                .unwrap_or_else(|| null_series(name, height))
        })
        .collect();
    let extras: Vec<Series> = final_names
        .iter()
        .filter_map(|name| by_name.remove(name))
        .collect();
    if !extras.is_empty() {
        let names: Vec<String> = extras.iter().map(|s| s.name().to_string()).collect();
        info!("{} {}: keeping unmapped columns {:?}", page, year, names);
    }
    ordered.extend(extras);

    let df = DataFrame::new(ordered)?;
    drop_aggregate_rows(df, spec.aggregate_plant_column, page, year)
}

/// Final column names for one sheet. Mapped headers take their canonical
/// name unless an unmapped column already carries it.
fn rename_columns<'a, I>(mapping: &YearPageMapping, headers: I) -> Result<Vec<String>>
where
    I: Iterator<Item = &'a str> + Clone,
{
    let unmapped: HashSet<&str> = headers
        .clone()
        .filter(|h| !mapping.column_map.contains_key(*h))
        .collect();

    let mut names = Vec::new();
    let mut taken = HashSet::new();
    for header in headers {
        let name = match mapping.column_map.get(header) {
            Some(target) if unmapped.contains(target.as_str()) => {
                warn!(
                    "{} {}: {} would be renamed to existing column {}; keeping raw name",
                    mapping.page, mapping.year, header, target
                );
                header.to_string()
            }
            Some(target) => target.clone(),
            None => header.to_string(),
        };
        if !taken.insert(name.clone()) {
            return Err(NormalizeError::DataIntegrity(format!(
                "{} {}: column {} appears twice after renaming",
                mapping.page, mapping.year, name
            )));
        }
        names.push(name);
    }
    Ok(names)
}

fn drop_aggregate_rows(
    df: DataFrame,
    column: Option<&str>,
    page: Page,
    year: i32,
) -> Result<DataFrame> {
    let Some(column) = column else {
        return Ok(df);
    };
    let Ok(plant_ids) = df.column(column) else {
        return Ok(df);
    };
    let keep: Vec<bool> = int_values(plant_ids)?
        .into_iter()
        .map(|id| id != Some(AGGREGATE_PLANT_ID))
        .collect();
    let dropped = keep.iter().filter(|k| !**k).count();
    if dropped == 0 {
        return Ok(df);
    }
    debug!("{} {}: dropped {} state aggregate rows", page, year, dropped);
    filter_rows(&df, &keep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{column_names, string_values};
    use crate::workbook::{BufferedWorkbook, SheetGrid};

    fn s(value: &str) -> Data {
        Data::String(value.to_string())
    }

    fn preamble(n: usize) -> Vec<Vec<Data>> {
        (0..n).map(|i| vec![s(&format!("EIA notes line {}", i))]).collect()
    }

    fn generation_fuel_book() -> BufferedWorkbook {
        let mut rows = preamble(5);
        rows.push(vec![
            s("Plant Id"),
            s("Plant Name"),
            s("RESERVED"),
            s("State"),
            s("NETGEN\nJanuary"),
            s("Mystery Column"),
        ]);
        rows.push(vec![Data::Float(3.0), s("Barry"), s("x"), s("AL"), Data::Float(1200.5), s("a")]);
        rows.push(vec![Data::Int(99999), s("State total"), s("x"), s("AL"), Data::Float(9.0), s("b")]);
        rows.push(vec![Data::Empty, s("  ")]);
        rows.push(vec![Data::Int(7), s("Gadsden"), Data::Empty, s("AL"), s("."), s("c")]);
        BufferedWorkbook::new(vec![SheetGrid::new("Page 1 Generation and Fuel Data", rows)])
    }

    fn stocks_book() -> BufferedWorkbook {
        let mut rows = preamble(5);
        rows.push(vec![s(""), s("Plant ID"), s("Coal\nJanuary"), s("Oil January")]);
        rows.push(vec![s("New England"), Data::Int(99999), Data::Float(10.0), Data::Float(2.5)]);
        rows.push(vec![s("Connecticut"), Data::Int(12), Data::Float(4.0), Data::Float(1.0)]);
        BufferedWorkbook::new(vec![
            SheetGrid::new("Page 1 Generation and Fuel Data", Vec::new()),
            SheetGrid::new("Page 2 Stocks Data", rows),
        ])
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("Plant Id"), "plant_id");
        assert_eq!(normalize_header("  NETGEN\nJanuary "), "netgen_january");
        assert_eq!(normalize_header("MMBtuPer_Unit\nJanuary"), "mmbtuper_unit_january");
        assert_eq!(normalize_header("Nameplate Capacity (MW)"), "nameplate_capacity_mw");
        assert_eq!(normalize_header(" -- "), "");
    }

    #[test]
    fn test_normalize_headers_blank_and_duplicates() {
        let raw: Vec<String> = ["", "Status", "status", "STATUS", ""]
            .iter()
            .map(|h| h.to_string())
            .collect();
        assert_eq!(
            normalize_headers(&raw),
            vec!["unnamed_0", "status", "status_1", "status_2", "unnamed_4"]
        );
    }

    #[test]
    fn test_generation_fuel_drops_aggregate_rows() {
        let _ = env_logger::builder().is_test(true).try_init();
        let books = BTreeMap::from([(2014, generation_fuel_book())]);
        let df = read_page(Page::GenerationFuel, &books, &[2014]).unwrap();

        assert_eq!(df.height(), 2);
        let ids = int_values(df.column("plant_id").unwrap()).unwrap();
        assert_eq!(ids, vec![Some(3), Some(7)]);
        assert_eq!(df.column("plant_id").unwrap().dtype(), &DataType::Int64);

        // Every canonical column is present, unmapped extras trail.
        let canonical = Registry::standard()
            .unwrap()
            .canonical_columns(Page::GenerationFuel)
            .unwrap();
        let names = column_names(&df);
        assert_eq!(&names[..canonical.len()], canonical.as_slice());
        assert_eq!(names.last().map(String::as_str), Some("mystery_column"));
        assert!(!names.iter().any(|n| n.starts_with("reserved")));
        assert_eq!(df.column("census_region").unwrap().null_count(), 2);

        // The "." sentinel does not stop the column from being numeric.
        let netgen = df.column("netgen_january").unwrap();
        assert_eq!(netgen.dtype(), &DataType::Float64);
        assert_eq!(netgen.null_count(), 1);
    }

    #[test]
    fn test_stocks_keep_aggregate_rows() {
        let books = BTreeMap::from([(2013, stocks_book())]);
        let df = read_page(Page::Stocks, &books, &[2013]).unwrap();

        assert_eq!(df.height(), 2);
        let plant = int_values(df.column("plant_id").unwrap()).unwrap();
        assert_eq!(plant, vec![Some(99999), Some(12)]);
        assert_eq!(
            string_values(df.column("census_division_and_state").unwrap()).unwrap(),
            vec![Some("New England".to_string()), Some("Connecticut".to_string())]
        );
        assert_eq!(int_values(df.column("year").unwrap()).unwrap(), vec![Some(2013); 2]);
        assert_eq!(df.column("petcoke_march").unwrap().null_count(), 2);
    }

    #[test]
    fn test_years_stack_in_requested_order() {
        let books = BTreeMap::from([(2013, stocks_book()), (2012, stocks_book())]);
        let df = read_page(Page::Stocks, &books, &[2013, 2012]).unwrap();
        assert_eq!(df.height(), 4);
        assert_eq!(
            int_values(df.column("year").unwrap()).unwrap(),
            vec![Some(2013), Some(2013), Some(2012), Some(2012)]
        );
    }

    #[test]
    fn test_unsupported_year_fails_before_reading() {
        let books = BTreeMap::from([(2012, stocks_book())]);
        // 2010 has no workbook either, but the mapping check comes first.
        match read_page(Page::PlantFrame, &books, &[2012, 2010]) {
            Err(NormalizeError::UnsupportedYear { page, year }) => {
                assert_eq!(page, Page::PlantFrame);
                assert_eq!(year, 2010);
            }
            other => panic!("expected UnsupportedYear, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_workbook_and_sheet() {
        let books = BTreeMap::from([(2013, generation_fuel_book())]);
        assert!(matches!(
            read_page(Page::Stocks, &books, &[2012]),
            Err(NormalizeError::MissingWorkbook { year: 2012, .. })
        ));
        assert!(matches!(
            read_page(Page::Stocks, &books, &[2013]),
            Err(NormalizeError::MissingSheet { index: 1, available: 1, .. })
        ));
    }

    #[test]
    fn test_no_years_gives_empty_canonical_frame() {
        let books: BTreeMap<i32, BufferedWorkbook> = BTreeMap::new();
        let df = read_page(Page::Utility, &books, &[]).unwrap();
        assert_eq!(df.height(), 0);
        assert!(df.column("utility_id_eia").is_ok());
    }
}
