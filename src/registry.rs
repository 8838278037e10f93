//! Per-(page, year) column mappings built from the static reference tables.

use std::collections::{BTreeMap, HashSet};

use log::debug;
use once_cell::sync::OnceCell;

use crate::error::{NormalizeError, Result};
use crate::monthly::{MonthlyLayout, MONTH_NAMES};
use crate::page::Page;
use crate::reference::{page_specs, PageSpec};

/// Where one page lives in one year's workbook and how its headers map to
/// canonical names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearPageMapping {
    pub page: Page,
    pub year: i32,
    pub sheet_index: usize,
    pub skip_rows: usize,
    /// Normalized raw header -> canonical column name.
    pub column_map: BTreeMap<String, String>,
}

#[derive(Debug)]
pub struct Registry {
    specs: BTreeMap<Page, &'static PageSpec>,
    mappings: BTreeMap<(Page, i32), YearPageMapping>,
}

static STANDARD: OnceCell<Registry> = OnceCell::new();

impl Registry {
    /// The registry for the reference tables compiled into the crate,
    /// validated on first use.
    pub fn standard() -> Result<&'static Registry> {
        STANDARD.get_or_try_init(|| Registry::build(&page_specs()))
    }

    pub fn build(specs: &[&'static PageSpec]) -> Result<Self> {
        let mut by_page = BTreeMap::new();
        let mut mappings = BTreeMap::new();

        for spec in specs {
            if by_page.insert(spec.page, *spec).is_some() {
                return Err(invalid(spec.page, "page declared twice".to_string()));
            }
            for year in spec.years.0..=spec.years.1 {
                let mapping = build_mapping(spec, year)?;
                mappings.insert((spec.page, year), mapping);
            }
        }

        debug!(
            "column registry built: {} pages, {} year mappings",
            by_page.len(),
            mappings.len()
        );
        Ok(Self {
            specs: by_page,
            mappings,
        })
    }

    pub fn lookup(&self, page: Page, year: i32) -> Result<&YearPageMapping> {
        self.mappings
            .get(&(page, year))
            .ok_or(NormalizeError::UnsupportedYear { page, year })
    }

    pub fn spec(&self, page: Page) -> Result<&'static PageSpec> {
        self.specs
            .get(&page)
            .copied()
            .ok_or_else(|| NormalizeError::UnknownPage(page.name().to_string()))
    }

    pub fn supports(&self, page: Page, year: i32) -> bool {
        self.mappings.contains_key(&(page, year))
    }

    pub fn supported_years(&self, page: Page) -> Result<std::ops::RangeInclusive<i32>> {
        let spec = self.spec(page)?;
        Ok(spec.years.0..=spec.years.1)
    }

    /// The page's canonical schema, in output order.
    pub fn canonical_columns(&self, page: Page) -> Result<Vec<String>> {
        let spec = self.spec(page)?;
        let mut columns: Vec<String> = Vec::new();
        if let Some(name) = spec.first_unnamed_as {
            columns.push(name.to_string());
        }
        for field in spec.fields {
            if field.monthly {
                columns.extend(MONTH_NAMES.iter().map(|m| format!("{}_{}", field.canonical, m)));
            } else {
                columns.push(field.canonical.to_string());
            }
        }
        if let Some(year) = spec.year_column {
            if !columns.iter().any(|c| c == year) {
                columns.push(year.to_string());
            }
        }
        Ok(columns)
    }

    /// Monthly layout over the page's month-per-column fields, if it has any.
    pub fn monthly_layout(&self, page: Page) -> Result<Option<MonthlyLayout>> {
        let spec = self.spec(page)?;
        let fields: Vec<&str> = spec
            .fields
            .iter()
            .filter(|f| f.monthly)
            .map(|f| f.canonical)
            .collect();
        if fields.is_empty() {
            return Ok(None);
        }
        MonthlyLayout::named_months(fields).map(Some)
    }
}

fn invalid(page: Page, reason: String) -> NormalizeError {
    NormalizeError::InvalidReference { page, reason }
}

fn build_mapping(spec: &PageSpec, year: i32) -> Result<YearPageMapping> {
    let layouts: Vec<_> = spec
        .sheets
        .iter()
        .filter(|s| (s.years.0..=s.years.1).contains(&year))
        .collect();
    let layout = match layouts.as_slice() {
        [layout] => *layout,
        [] => return Err(invalid(spec.page, format!("no sheet layout for {}", year))),
        _ => return Err(invalid(spec.page, format!("overlapping sheet layouts for {}", year))),
    };

    let mut column_map = BTreeMap::new();
    let mut canonical_seen = HashSet::new();
    let mut add = |raw: String, canonical: String| -> Result<()> {
        if !canonical_seen.insert(canonical.clone()) {
            return Err(invalid(
                spec.page,
                format!("{} mapped twice in {}", canonical, year),
            ));
        }
        if column_map.insert(raw.clone(), canonical).is_some() {
            return Err(invalid(
                spec.page,
                format!("raw header {} mapped twice in {}", raw, year),
            ));
        }
        Ok(())
    };

    for field in spec.fields {
        let Some(raw) = field.raw_for(year) else {
            continue;
        };
        if field.monthly {
            for month in MONTH_NAMES {
                add(
                    format!("{}_{}", raw, month),
                    format!("{}_{}", field.canonical, month),
                )?;
            }
        } else {
            add(raw.to_string(), field.canonical.to_string())?;
        }
    }

    if column_map.is_empty() {
        return Err(invalid(spec.page, format!("empty column map for {}", year)));
    }

    Ok(YearPageMapping {
        page: spec.page,
        year,
        sheet_index: layout.sheet_index,
        skip_rows: layout.skip_rows,
        column_map,
    })
}
