use serde::Serialize;

use super::NavigationHistory;
use crate::common::{Id, HOME_ADDRESS};

pub type TabId = Id<Tab>;

pub const HOME_TITLE: &str = "Hello Net";
pub const NEW_TAB_TITLE: &str = "New Tab";

/// A browsing tab. Updates replace the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: TabId,
    pub address: String,
    pub title: String,
    pub loading: bool,
    pub history: NavigationHistory,
}

impl Tab {
    /// Fresh tab at the home address.
    pub fn home(title: impl Into<String>) -> Self {
        Self {
            id: TabId::new(),
            address: HOME_ADDRESS.to_string(),
            title: title.into(),
            loading: false,
            history: NavigationHistory::new(HOME_ADDRESS),
        }
    }

    pub fn is_home(&self) -> bool {
        self.address == HOME_ADDRESS
    }
}
