//! In-memory workbooks. The reader only ever sees `Workbook`; loading from
//! disk is the caller's business and goes through `BufferedWorkbook::open`.

use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use log::debug;

/// One worksheet as a dense grid of cells, row 0 being the sheet's first
/// row.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetGrid {
    pub name: String,
    pub rows: Vec<Vec<Data>>,
}

impl SheetGrid {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Data>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

pub trait Workbook: Sync {
    fn sheet_count(&self) -> usize;

    fn sheet(&self, index: usize) -> Option<&SheetGrid>;
}

/// A workbook whose sheets are fully loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BufferedWorkbook {
    sheets: Vec<SheetGrid>,
}

impl BufferedWorkbook {
    pub fn new(sheets: Vec<SheetGrid>) -> Self {
        Self { sheets }
    }

    pub fn push(&mut self, sheet: SheetGrid) {
        self.sheets.push(sheet);
    }

    /// Read every sheet of an `.xlsx`/`.xls`/`.ods` file. Cells are placed
    /// at their absolute sheet position, so leading blank rows and columns
    /// survive and `skip_rows` counts from the top of the sheet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut workbook = open_workbook_auto(path)
            .with_context(|| format!("Failed to open workbook {}", path.display()))?;

        let mut sheets = Vec::new();
        for name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&name)
                .with_context(|| format!("Failed to read sheet '{}' of {}", name, path.display()))?;

            let (first_row, first_col) = range
                .start()
                .map(|(r, c)| (r as usize, c as usize))
                .unwrap_or((0, 0));

            let mut rows: Vec<Vec<Data>> = vec![Vec::new(); first_row];
            for row in range.rows() {
                let mut cells = vec![Data::Empty; first_col];
                cells.extend_from_slice(row);
                rows.push(cells);
            }
            debug!("{}: sheet '{}' has {} rows", path.display(), name, rows.len());
            sheets.push(SheetGrid::new(name, rows));
        }

        Ok(Self { sheets })
    }

    /// Merge the first sheet of each file, in order, into one workbook. Form
    /// 860 schedules ship as separate files per year.
    pub fn open_first_sheets<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut merged = Self::default();
        for path in paths {
            let book = Self::open(path)?;
            let sheet = book
                .sheets
                .into_iter()
                .next()
                .with_context(|| format!("{} has no sheets", path.as_ref().display()))?;
            merged.push(sheet);
        }
        Ok(merged)
    }
}

impl Workbook for BufferedWorkbook {
    fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    fn sheet(&self, index: usize) -> Option<&SheetGrid> {
        self.sheets.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_lookup() {
        let book = BufferedWorkbook::new(vec![
            SheetGrid::new("Page 1", vec![vec![Data::String("a".into())]]),
            SheetGrid::new(
                "Page 2",
                vec![vec![Data::Int(1), Data::Float(2.0)], vec![Data::Empty]],
            ),
        ]);
        assert_eq!(book.sheet_count(), 2);
        assert_eq!(book.sheet(1).map(SheetGrid::width), Some(2));
        assert!(book.sheet(2).is_none());
        assert_eq!(book.sheet(0).map(|s| s.name.as_str()), Some("Page 1"));
    }

    #[test]
    fn test_open_missing_file_has_context() {
        let err = BufferedWorkbook::open("/nonexistent/eia923.xlsx").unwrap_err();
        assert!(err.to_string().contains("eia923.xlsx"));
    }
}
