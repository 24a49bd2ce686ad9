// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Picker view state. What the host renders, without any widget toolkit.

use launchpad_core::error::{LaunchpadError, Result};
use launchpad_core::types::{CategoryTab, SampleCatalog};

/// Which half of the screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    /// Tabs and sample lists.
    pub picker: bool,
    /// Permission explanation text and its retry button.
    pub permission_prompt: bool,
}

/// Tabbed sample picker.
#[derive(Debug, Clone)]
pub struct PickerView {
    catalog: SampleCatalog,
    current_tab: usize,
    visibility: Visibility,
}

impl PickerView {
    /// Nothing is shown until the permission check settles.
    pub fn new() -> Self {
        Self {
            catalog: SampleCatalog::default(),
            current_tab: 0,
            visibility: Visibility {
                picker: false,
                permission_prompt: false,
            },
        }
    }

    pub fn set_catalog(&mut self, catalog: SampleCatalog) {
        self.catalog = catalog;
        self.current_tab = 0;
    }

    pub fn catalog(&self) -> &SampleCatalog {
        &self.catalog
    }

    pub fn tabs(&self) -> &[CategoryTab] {
        self.catalog.tabs()
    }

    pub fn select_tab(&mut self, index: usize) -> Result<()> {
        if index >= self.catalog.tabs().len() {
            return Err(LaunchpadError::InvalidArgument(format!(
                "tab {index} out of range ({} tabs)",
                self.catalog.tabs().len()
            )));
        }
        self.current_tab = index;
        Ok(())
    }

    /// Category of the tab in front, or `None` when there are no tabs.
    pub fn current_category(&self) -> Option<&str> {
        self.catalog.category_at(self.current_tab)
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn show_samples(&mut self) {
        self.visibility = Visibility {
            picker: true,
            permission_prompt: false,
        };
    }

    pub fn show_permission_prompt(&mut self) {
        self.visibility = Visibility {
            picker: false,
            permission_prompt: true,
        };
    }
}

impl Default for PickerView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchpad_core::types::Sample;

    fn view() -> PickerView {
        let mut view = PickerView::new();
        view.set_catalog(SampleCatalog::categorize([
            Sample::new("afbc", "performance"),
            Sample::new("surface_rotation", "advanced"),
        ]));
        view
    }

    #[test]
    fn first_tab_is_current() {
        assert_eq!(view().current_category(), Some("advanced"));
    }

    #[test]
    fn select_tab_bounds_checked() {
        let mut view = view();
        view.select_tab(1).expect("valid tab");
        assert_eq!(view.current_category(), Some("performance"));
        assert!(view.select_tab(2).is_err());
        assert_eq!(view.current_category(), Some("performance"));
    }

    #[test]
    fn prompt_and_picker_are_exclusive() {
        let mut view = view();
        view.show_permission_prompt();
        assert!(!view.visibility().picker);
        assert!(view.visibility().permission_prompt);
        view.show_samples();
        assert!(view.visibility().picker);
        assert!(!view.visibility().permission_prompt);
    }
}
