use serde::Serialize;

use crate::kernel::SourceLink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Web,
    Reader,
}

/// Reader output for one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReaderContent {
    pub text: String,
    pub sources: Vec<SourceLink>,
    /// Set when the text is the fallback template rather than a generated answer.
    pub fallback: bool,
}

/// Cached reader state for a tab, keyed by the address it was requested for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReaderEntry {
    Pending { address: String },
    Done { address: String, content: ReaderContent },
}

impl ReaderEntry {
    pub fn address(&self) -> &str {
        match self {
            ReaderEntry::Pending { address } | ReaderEntry::Done { address, .. } => address,
        }
    }
}

/// Observable per-tab state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TabPhase {
    Home,
    Loading,
    Web,
    ReaderPending,
    ReaderDone,
    Gated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationCapabilities {
    pub can_go_back: bool,
    pub can_go_forward: bool,
}
