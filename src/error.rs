use polars::prelude::PolarsError;
use thiserror::Error;

use crate::page::Page;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("unrecognized page: {0}")]
    UnknownPage(String),

    #[error("unrecognized table: {0}")]
    UnknownTable(String),

    #[error("page {page} has no mapping for year {year}")]
    UnsupportedYear { page: Page, year: i32 },

    #[error("no workbook supplied for year {year} (page {page})")]
    MissingWorkbook { page: Page, year: i32 },

    #[error("page {page} expects sheet {index} in the {year} workbook, which has {available}")]
    MissingSheet {
        page: Page,
        year: i32,
        index: usize,
        available: usize,
    },

    #[error("table {table} is missing column {column}")]
    MissingColumn { table: String, column: String },

    #[error("invalid reference data for {page}: {reason}")]
    InvalidReference { page: Page, reason: String },

    #[error("invalid monthly layout: {0}")]
    InvalidLayout(String),

    #[error("data integrity violation: {0}")]
    DataIntegrity(String),

    #[error("invalid settings: {0}")]
    Settings(String),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
