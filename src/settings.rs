use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{NormalizeError, Result};
use crate::page::{EntityTable, Form, Page};
use crate::registry::Registry;

/// Which years and tables a run covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeSettings {
    pub eia923_years: Vec<i32>,
    pub eia860_years: Vec<i32>,
    pub eia860_tables: Vec<EntityTable>,
}

impl Default for NormalizeSettings {
    fn default() -> Self {
        Self {
            eia923_years: (2011..=2016).collect(),
            eia860_years: (2011..=2016).collect(),
            eia860_tables: EntityTable::ALL.to_vec(),
        }
    }
}

impl NormalizeSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| NormalizeError::Settings(e.to_string()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Invalid settings in {}", path.display()))
    }

    pub fn years(&self, form: Form) -> &[i32] {
        match form {
            Form::Eia923 => &self.eia923_years,
            Form::Eia860 => &self.eia860_years,
        }
    }

    /// Every requested year must be supported by at least one page of its
    /// form, and no year may be listed twice.
    pub fn validate(&self, registry: &Registry) -> Result<()> {
        for form in [Form::Eia923, Form::Eia860] {
            let years = self.years(form);
            for (i, year) in years.iter().enumerate() {
                if years[..i].contains(year) {
                    return Err(NormalizeError::Settings(format!(
                        "{:?} year {} listed twice",
                        form, year
                    )));
                }
                if !Page::pages_of(form).any(|page| registry.supports(page, *year)) {
                    return Err(NormalizeError::Settings(format!(
                        "no {:?} page supports {}",
                        form, year
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let json = r#"{"eia860_tables": ["plants_eia860", "utilities_eia860"]}"#;
        let settings = NormalizeSettings::from_json_str(json).unwrap();
        assert_eq!(settings.eia923_years, (2011..=2016).collect::<Vec<_>>());
        assert_eq!(
            settings.eia860_tables,
            vec![EntityTable::Plants, EntityTable::Utilities]
        );
    }

    #[test]
    fn test_unknown_table_is_a_settings_error() {
        assert!(matches!(
            NormalizeSettings::from_json_str(r#"{"eia860_tables": ["boilers"]}"#),
            Err(NormalizeError::Settings(_))
        ));
    }

    #[test]
    fn test_validate_against_registry() {
        let registry = Registry::standard().unwrap();
        assert!(NormalizeSettings::default().validate(registry).is_ok());

        let early = NormalizeSettings {
            eia923_years: vec![2009, 2010],
            ..NormalizeSettings::default()
        };
        assert!(early.validate(registry).is_ok());

        let too_early = NormalizeSettings {
            eia860_years: vec![2010],
            ..NormalizeSettings::default()
        };
        assert!(matches!(
            too_early.validate(registry),
            Err(NormalizeError::Settings(_))
        ));

        let repeated = NormalizeSettings {
            eia860_years: vec![2012, 2012],
            ..NormalizeSettings::default()
        };
        assert!(repeated.validate(registry).is_err());
    }
}
