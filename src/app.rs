//! Pasusat - Application state management

use crate::analysis::{build_view, AnalysisType, Selection, View};
use crate::config::Config;
use crate::data::Dataset;

/// Which sidebar control receives left/right keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Primary species selector
    Primary,
    /// Second species selector (comparative view only)
    Secondary,
}

/// Main application state
///
/// Owns the dataset for the whole session. The current view is rebuilt
/// whenever the selection changes.
pub struct App {
    /// The loaded census table
    pub dataset: Dataset,
    /// Session settings
    pub config: Config,
    /// Current sidebar selection
    pub selection: Selection,
    /// Selector that left/right keys act on
    pub focus: Focus,
    /// View for the current selection
    pub view: View,
    /// Whether to show the help popup
    pub show_help: bool,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    /// Create a new app with the given dataset
    pub fn new(dataset: Dataset, config: Config) -> Self {
        let selection = Selection::default();
        let view = build_view(&dataset, &selection, config.top_n);
        Self {
            dataset,
            config,
            selection,
            focus: Focus::Primary,
            view,
            show_help: false,
            should_quit: false,
        }
    }

    fn refresh(&mut self) {
        if !self.selection.analysis.uses_secondary() {
            self.focus = Focus::Primary;
        }
        self.view = build_view(&self.dataset, &self.selection, self.config.top_n);
    }

    /// Move down the analysis menu
    pub fn next_analysis(&mut self) {
        self.selection.analysis = self.selection.analysis.next();
        self.refresh();
    }

    /// Move up the analysis menu
    pub fn prev_analysis(&mut self) {
        self.selection.analysis = self.selection.analysis.prev();
        self.refresh();
    }

    /// Jump to a menu entry by position
    pub fn select_analysis(&mut self, index: usize) {
        if let Some(&analysis) = AnalysisType::ALL.get(index) {
            self.selection.analysis = analysis;
            self.refresh();
        }
    }

    /// Cycle the focused species selector forward
    pub fn next_species(&mut self) {
        match self.focus {
            Focus::Primary => self.selection.primary = self.selection.primary.next(),
            Focus::Secondary => self.selection.secondary = self.selection.secondary.next(),
        }
        self.refresh();
    }

    /// Cycle the focused species selector backward
    pub fn prev_species(&mut self) {
        match self.focus {
            Focus::Primary => self.selection.primary = self.selection.primary.prev(),
            Focus::Secondary => self.selection.secondary = self.selection.secondary.prev(),
        }
        self.refresh();
    }

    /// Switch between the two species selectors where both are shown
    pub fn toggle_focus(&mut self) {
        if self.selection.analysis.uses_secondary() {
            self.focus = match self.focus {
                Focus::Primary => Focus::Secondary,
                Focus::Secondary => Focus::Primary,
            };
        }
    }

    /// Number of catalog entries that did not resolve
    pub fn missing_columns(&self) -> usize {
        self.dataset.catalog().missing().len()
    }
}
