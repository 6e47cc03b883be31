//! Set-toggle semantics shared by every multi-valued field.

use tracing::trace;

use crate::catalog::Catalog;
use crate::error::AppError;

/// Edits one multi-valued field. Values keep their selection order so the
/// pills render in the order they were picked.
#[derive(Debug)]
pub struct MultiSelect<'a> {
    catalog: Catalog,
    selected: &'a mut Vec<String>,
}

impl<'a> MultiSelect<'a> {
    pub fn new(catalog: Catalog, selected: &'a mut Vec<String>) -> Self {
        Self { catalog, selected }
    }

    /// Removes `value` if it is selected, appends it otherwise. Returns
    /// whether it is selected afterwards.
    pub fn toggle(&mut self, value: &str) -> Result<bool, AppError> {
        if !self.catalog.contains(value) {
            return Err(AppError::UnknownOption {
                catalog: self.catalog.name,
                value: value.to_owned(),
            });
        }
        if self.is_selected(value) {
            self.selected.retain(|selected| selected != value);
            trace!("{} -{value}", self.catalog.name);
            Ok(false)
        } else {
            self.selected.push(value.to_owned());
            trace!("{} +{value}", self.catalog.name);
            Ok(true)
        }
    }

    /// Pill removal. Removing something that is not selected does nothing.
    pub fn remove(&mut self, value: &str) {
        self.selected.retain(|selected| selected != value);
    }

    #[must_use]
    pub fn is_selected(&self, value: &str) -> bool {
        self.selected.iter().any(|selected| selected == value)
    }

    /// Labels of the selected values in selection order.
    #[must_use]
    pub fn pills(&self) -> Vec<&str> {
        pills(self.catalog, self.selected.as_slice())
    }
}

pub fn pills(catalog: Catalog, selected: &[String]) -> Vec<&str> {
    selected
        .iter()
        .map(|value| catalog.label(value.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::MultiSelect;
    use crate::catalog::{CatalogName, LANGUAGES, REGIONS, STRENGTHS};
    use crate::error::AppError;

    #[test]
    fn toggling_twice_restores_the_selection() -> Result<(), AppError> {
        for catalog in [REGIONS, LANGUAGES, STRENGTHS] {
            for option in catalog.options {
                let original = vec![catalog.options[0].value.to_owned()];
                let mut selected = original.clone();
                let mut select = MultiSelect::new(catalog, &mut selected);
                select.toggle(option.value)?;
                select.toggle(option.value)?;
                let mut after = selected.clone();
                let mut before = original;
                after.sort();
                before.sort();
                assert_eq!(after, before, "{}", option.value);
            }
        }
        Ok(())
    }

    #[test]
    fn pill_removal_equals_unchecking() -> Result<(), AppError> {
        let mut unchecked = Vec::new();
        let mut removed = Vec::new();
        for selected in [&mut unchecked, &mut removed] {
            let mut select = MultiSelect::new(REGIONS, selected);
            select.toggle("europe")?;
            select.toggle("emea")?;
            select.toggle("north-america")?;
        }
        MultiSelect::new(REGIONS, &mut unchecked).toggle("emea")?;
        MultiSelect::new(REGIONS, &mut removed).remove("emea");
        assert_eq!(unchecked, removed);
        assert_eq!(unchecked, ["europe", "north-america"]);
        Ok(())
    }

    #[test]
    fn pills_keep_selection_order() -> Result<(), AppError> {
        let mut selected = Vec::new();
        let mut select = MultiSelect::new(REGIONS, &mut selected);
        select.toggle("emea")?;
        select.toggle("asia-pacific")?;
        assert_eq!(select.pills(), ["EMEA", "Asia Pacific"]);
        Ok(())
    }

    #[test]
    fn values_outside_the_catalog_are_rejected() {
        let mut selected = Vec::new();
        let result = MultiSelect::new(REGIONS, &mut selected).toggle("atlantis");
        assert!(matches!(
            result,
            Err(AppError::UnknownOption {
                catalog: CatalogName::Regions,
                ..
            })
        ));
        assert!(selected.is_empty());
    }
}
