//! View-state controller: active tab and sidebar flags.
//!
//! Owns no analysis data. Its only effect on orchestrators is deciding which
//! one a history selection is routed to.

pub mod handlers;

use serde::{Deserialize, Serialize};

use crate::analysis::Kind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Resume,
    Document,
    Interview,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewState {
    pub active_tab: Tab,
    /// Mobile drawer.
    pub sidebar_open: bool,
    /// Desktop icon-only mode.
    pub sidebar_collapsed: bool,
}

impl ViewState {
    /// Switching tabs also closes the mobile drawer.
    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
        self.sidebar_open = false;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn toggle_collapsed(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }

    /// Orchestrator that receives history selections on the active tab.
    /// Interview prep works off resume results, so it routes to resume.
    pub fn history_target(&self) -> Kind {
        match self.active_tab {
            Tab::Resume | Tab::Interview => Kind::Resume,
            Tab::Document => Kind::Document,
        }
    }
}
