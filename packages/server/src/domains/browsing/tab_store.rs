//! Tab records and the active-tab pointer.
//!
//! Tabs are held as `Arc<Tab>` and replaced wholesale on update, so a reader
//! holding an old `Arc` keeps a consistent snapshot.

use std::sync::Arc;

use super::models::{Tab, TabId, HOME_TITLE, NEW_TAB_TITLE};

#[derive(Debug, Clone)]
pub struct TabStore {
    tabs: Vec<Arc<Tab>>,
    active: TabId,
}

impl Default for TabStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TabStore {
    /// Store with a single home tab.
    pub fn new() -> Self {
        let tab = Tab::home(HOME_TITLE);
        let active = tab.id;
        Self {
            tabs: vec![Arc::new(tab)],
            active,
        }
    }

    pub fn tabs(&self) -> &[Arc<Tab>] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn get(&self, id: TabId) -> Option<Arc<Tab>> {
        self.tabs.iter().find(|tab| tab.id == id).cloned()
    }

    pub fn contains(&self, id: TabId) -> bool {
        self.tabs.iter().any(|tab| tab.id == id)
    }

    pub fn active_id(&self) -> TabId {
        self.active
    }

    pub fn active(&self) -> Arc<Tab> {
        // The store is never empty and `active` always names a stored tab.
        self.get(self.active)
            .unwrap_or_else(|| Arc::clone(&self.tabs[0]))
    }

    /// Append a fresh home tab and make it active.
    pub fn create(&mut self) -> TabId {
        let tab = Tab::home(NEW_TAB_TITLE);
        let id = tab.id;
        self.tabs.push(Arc::new(tab));
        self.active = id;
        id
    }

    /// Remove a tab. Closing the last tab leaves a fresh home tab in its place;
    /// closing the active tab activates the first remaining one.
    pub fn close(&mut self, id: TabId) -> bool {
        let Some(index) = self.tabs.iter().position(|tab| tab.id == id) else {
            return false;
        };

        self.tabs.remove(index);
        if self.tabs.is_empty() {
            self.tabs.push(Arc::new(Tab::home(HOME_TITLE)));
        }
        if self.active == id || !self.contains(self.active) {
            self.active = self.tabs[0].id;
        }
        true
    }

    pub fn activate(&mut self, id: TabId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.active = id;
        true
    }

    /// Replace the tab's record with `f(current)`. Returns the new record.
    pub fn update<F>(&mut self, id: TabId, f: F) -> Option<Arc<Tab>>
    where
        F: FnOnce(&Tab) -> Tab,
    {
        let slot = self.tabs.iter_mut().find(|tab| tab.id == id)?;
        let mut next = f(slot.as_ref());
        next.id = id;
        *slot = Arc::new(next);
        Some(Arc::clone(slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::HOME_ADDRESS;

    #[test]
    fn test_starts_with_one_home_tab() {
        let store = TabStore::new();
        assert_eq!(store.len(), 1);
        let active = store.active();
        assert_eq!(active.address, HOME_ADDRESS);
        assert_eq!(active.title, "Hello Net");
    }

    #[test]
    fn test_create_activates_new_tab() {
        let mut store = TabStore::new();
        let first = store.active_id();
        let second = store.create();

        assert_eq!(store.len(), 2);
        assert_eq!(store.active_id(), second);
        assert_ne!(first, second);
        assert_eq!(store.active().title, "New Tab");
    }

    #[test]
    fn test_closing_only_tab_synthesizes_home() {
        let mut store = TabStore::new();
        let original = store.active_id();

        assert!(store.close(original));
        assert_eq!(store.len(), 1);
        assert_ne!(store.active_id(), original);
        assert!(store.active().is_home());
    }

    #[test]
    fn test_closing_active_activates_first() {
        let mut store = TabStore::new();
        let first = store.active_id();
        store.create();
        let third = store.create();

        assert!(store.close(third));
        assert_eq!(store.active_id(), first);
    }

    #[test]
    fn test_closing_inactive_keeps_active() {
        let mut store = TabStore::new();
        let first = store.active_id();
        let second = store.create();

        assert!(store.close(first));
        assert_eq!(store.active_id(), second);
    }

    #[test]
    fn test_close_unknown_is_noop() {
        let mut store = TabStore::new();
        assert!(!store.close(TabId::new()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_replaces_record() {
        let mut store = TabStore::new();
        let id = store.active_id();
        let before = store.active();

        let after = store
            .update(id, |tab| Tab {
                title: "Changed".to_string(),
                ..tab.clone()
            })
            .unwrap();

        assert_eq!(after.title, "Changed");
        assert_eq!(before.title, "Hello Net");
        assert!(!Arc::ptr_eq(&before, &after));
    }
}
