//! Browsing session state machine.
//!
//! Transitions update state synchronously and return an optional
//! [`SessionCommand`] for the slow part (settling delay or reader acquisition).
//! The caller runs commands with [`SessionController::execute`], typically in
//! a spawned task.
//!
//! Every transition that starts or abandons a load bumps the tab's load
//! generation. A command only clears the loading flag while its generation is
//! current, and only stores reader content while the tab still shows the
//! address it was issued for.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::commands::SessionCommand;
use super::models::{
    NavigationCapabilities, ReaderContent, ReaderEntry, Tab, TabId, TabPhase, ViewMode, HOME_TITLE,
};
use super::reader;
use super::tab_store::TabStore;
use crate::common::{classify, format_url_for_display, SiteGate, HOME_ADDRESS};
use crate::kernel::{BasePageExtractor, BaseTextGenerator};

pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub settle_delay: Duration,
    pub gate: SiteGate,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
            gate: SiteGate::with_defaults(),
        }
    }
}

/// Point-in-time view of the session for presentation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub tabs: Vec<Tab>,
    pub active_tab_id: TabId,
    pub address_bar: String,
    pub view_mode: ViewMode,
    pub embed_failed: bool,
    pub phase: TabPhase,
    pub processing: bool,
    pub reader: Option<ReaderContent>,
    pub capabilities: NavigationCapabilities,
}

struct SessionState {
    tabs: TabStore,
    view_mode: ViewMode,
    embed_failed: bool,
    reader: HashMap<TabId, ReaderEntry>,
    loads: HashMap<TabId, u64>,
    gate: SiteGate,
}

impl SessionState {
    /// Start a new load for the tab, superseding any in-flight command.
    fn begin_load(&mut self, id: TabId) -> u64 {
        let generation = self.loads.entry(id).or_default();
        *generation += 1;
        *generation
    }

    fn owns_load(&self, id: TabId, generation: u64) -> bool {
        self.loads.get(&id).copied().unwrap_or_default() == generation
    }

    fn finish_load(&mut self, id: TabId) {
        self.tabs.update(id, |tab| Tab {
            loading: false,
            ..tab.clone()
        });
    }

    fn reader_for(&self, tab: &Tab) -> Option<&ReaderEntry> {
        self.reader
            .get(&tab.id)
            .filter(|entry| entry.address() == tab.address)
    }

    fn phase_of(&self, tab: &Tab) -> TabPhase {
        if tab.is_home() {
            return TabPhase::Home;
        }

        let showing_reader = tab.id != self.tabs.active_id() || self.view_mode == ViewMode::Reader;
        if showing_reader {
            match self.reader_for(tab) {
                Some(ReaderEntry::Pending { .. }) => return TabPhase::ReaderPending,
                Some(ReaderEntry::Done { .. }) => return TabPhase::ReaderDone,
                None => {}
            }
        }

        if tab.loading && self.gate.is_gated(&tab.address) {
            TabPhase::Gated
        } else if tab.loading {
            TabPhase::Loading
        } else {
            TabPhase::Web
        }
    }

    /// View state for a tab that just became active or changed address.
    ///
    /// Reader is kept only when finished content is cached for the address.
    fn enter_tab(&mut self, tab: &Tab) {
        let cached = matches!(self.reader_for(tab), Some(ReaderEntry::Done { .. }));
        self.view_mode = if cached {
            ViewMode::Reader
        } else {
            ViewMode::Web
        };
        self.embed_failed = !tab.is_home() && self.gate.is_gated(&tab.address);
    }
}

pub struct SessionController {
    state: RwLock<SessionState>,
    settle_delay: Duration,
    extractor: Arc<dyn BasePageExtractor>,
    generator: Arc<dyn BaseTextGenerator>,
}

impl SessionController {
    pub fn new(
        config: SessionConfig,
        extractor: Arc<dyn BasePageExtractor>,
        generator: Arc<dyn BaseTextGenerator>,
    ) -> Self {
        Self {
            state: RwLock::new(SessionState {
                tabs: TabStore::new(),
                view_mode: ViewMode::Web,
                embed_failed: false,
                reader: HashMap::new(),
                loads: HashMap::new(),
                gate: config.gate,
            }),
            settle_delay: config.settle_delay,
            extractor,
            generator,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().await;
        let active = state.tabs.active();
        let reader_entry = state.reader_for(&active);

        SessionSnapshot {
            tabs: state.tabs.tabs().iter().map(|tab| Tab::clone(tab)).collect(),
            active_tab_id: active.id,
            address_bar: if active.is_home() {
                String::new()
            } else {
                format_url_for_display(&active.address)
            },
            view_mode: state.view_mode,
            embed_failed: state.embed_failed,
            phase: state.phase_of(&active),
            processing: matches!(reader_entry, Some(ReaderEntry::Pending { .. })),
            reader: match reader_entry {
                Some(ReaderEntry::Done { content, .. }) => Some(content.clone()),
                _ => None,
            },
            capabilities: NavigationCapabilities {
                can_go_back: active.history.can_go_back(),
                can_go_forward: active.history.can_go_forward(),
            },
        }
    }

    pub async fn active_tab(&self) -> Arc<Tab> {
        self.state.read().await.tabs.active()
    }

    pub async fn tab(&self, id: TabId) -> Option<Arc<Tab>> {
        self.state.read().await.tabs.get(id)
    }

    pub async fn tabs(&self) -> Vec<Arc<Tab>> {
        self.state.read().await.tabs.tabs().to_vec()
    }

    pub async fn phase(&self, id: TabId) -> Option<TabPhase> {
        let state = self.state.read().await;
        state.tabs.get(id).map(|tab| state.phase_of(&tab))
    }

    pub async fn view_mode(&self) -> ViewMode {
        self.state.read().await.view_mode
    }

    pub async fn embed_failed(&self) -> bool {
        self.state.read().await.embed_failed
    }

    /// Finished reader content for the tab's current address.
    pub async fn reader_content(&self, id: TabId) -> Option<ReaderContent> {
        let state = self.state.read().await;
        let tab = state.tabs.get(id)?;
        match state.reader_for(&tab) {
            Some(ReaderEntry::Done { content, .. }) => Some(content.clone()),
            _ => None,
        }
    }

    pub async fn capabilities(&self) -> NavigationCapabilities {
        let active = self.active_tab().await;
        NavigationCapabilities {
            can_go_back: active.history.can_go_back(),
            can_go_forward: active.history.can_go_forward(),
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Navigate the active tab to free-form input.
    ///
    /// Gated destinations switch to Reader and return an acquisition command;
    /// everything else returns a settle command. Blank input does nothing.
    pub async fn navigate(&self, input: &str) -> Option<SessionCommand> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let classified = classify(input);
        let title = classified.display_title(input);
        let address = classified.url;

        let mut state = self.state.write().await;
        let gated = state.gate.is_gated(&address);
        let tab_id = state.tabs.active_id();

        state.tabs.update(tab_id, |tab| {
            let mut next = tab.clone();
            if next.address != address {
                next.history.append(address.clone());
            }
            next.address = address.clone();
            next.title = title;
            next.loading = true;
            next
        });
        state.reader.remove(&tab_id);
        state.embed_failed = gated;
        state.view_mode = if gated { ViewMode::Reader } else { ViewMode::Web };
        let generation = state.begin_load(tab_id);

        info!(tab_id = %tab_id, url = %address, gated, "Navigating");

        Some(if gated {
            SessionCommand::AcquireReader {
                tab_id,
                address,
                generation,
            }
        } else {
            SessionCommand::SettleLoad {
                tab_id,
                address,
                generation,
            }
        })
    }

    /// Switch the active tab to Reader and start acquisition. No-op at home.
    pub async fn switch_to_reader(&self) -> Option<SessionCommand> {
        let mut state = self.state.write().await;
        let active = state.tabs.active();
        if active.is_home() {
            return None;
        }

        state.view_mode = ViewMode::Reader;
        state.reader.insert(
            active.id,
            ReaderEntry::Pending {
                address: active.address.clone(),
            },
        );

        let generation = state.begin_load(active.id);

        debug!(tab_id = %active.id, url = %active.address, "Switching to reader");

        Some(SessionCommand::AcquireReader {
            tab_id: active.id,
            address: active.address.clone(),
            generation,
        })
    }

    /// Toggle the view without starting acquisition.
    pub async fn set_view_mode(&self, mode: ViewMode) {
        self.state.write().await.view_mode = mode;
    }

    /// Re-enter Loading for the settling delay. No-op at home. Abandons an
    /// acquisition still in flight.
    pub async fn refresh(&self) -> Option<SessionCommand> {
        let mut state = self.state.write().await;
        let active = state.tabs.active();
        if active.is_home() {
            return None;
        }

        let refreshed = state.tabs.update(active.id, |tab| Tab {
            loading: true,
            ..tab.clone()
        });
        if matches!(state.reader.get(&active.id), Some(ReaderEntry::Pending { .. })) {
            state.reader.remove(&active.id);
        }
        if let Some(tab) = refreshed {
            state.enter_tab(&tab);
        }
        let generation = state.begin_load(active.id);

        Some(SessionCommand::SettleLoad {
            tab_id: active.id,
            address: active.address.clone(),
            generation,
        })
    }

    pub async fn go_back(&self) -> bool {
        self.move_in_history(|tab| tab.history.back().map(str::to_string))
            .await
    }

    pub async fn go_forward(&self) -> bool {
        self.move_in_history(|tab| tab.history.forward().map(str::to_string))
            .await
    }

    async fn move_in_history<F>(&self, step: F) -> bool
    where
        F: FnOnce(&mut Tab) -> Option<String>,
    {
        let mut state = self.state.write().await;
        let mut next = Tab::clone(&state.tabs.active());
        let Some(address) = step(&mut next) else {
            return false;
        };

        next.address = address;
        debug!(tab_id = %next.id, url = %next.address, cursor = next.history.cursor(), "History move");
        let updated = state.tabs.update(next.id, |_| next);
        if let Some(active) = updated {
            state.enter_tab(&active);
        }
        true
    }

    pub async fn create_tab(&self) -> TabId {
        let mut state = self.state.write().await;
        let id = state.tabs.create();
        state.view_mode = ViewMode::Web;
        state.embed_failed = false;
        debug!(tab_id = %id, "Created tab");
        id
    }

    pub async fn close_tab(&self, id: TabId) -> bool {
        let mut state = self.state.write().await;
        let previous_active = state.tabs.active_id();
        if !state.tabs.close(id) {
            return false;
        }

        state.reader.remove(&id);
        state.loads.remove(&id);
        if state.tabs.active_id() != previous_active {
            let active = state.tabs.active();
            state.enter_tab(&active);
        }
        debug!(tab_id = %id, remaining = state.tabs.len(), "Closed tab");
        true
    }

    pub async fn switch_tab(&self, id: TabId) -> bool {
        let mut state = self.state.write().await;
        if !state.tabs.activate(id) {
            return false;
        }
        let active = state.tabs.active();
        state.enter_tab(&active);
        true
    }

    /// Return the active tab to the home page. History entries are kept.
    pub async fn go_home(&self) {
        let mut state = self.state.write().await;
        let tab_id = state.tabs.active_id();

        state.tabs.update(tab_id, |tab| {
            let mut next = tab.clone();
            next.address = HOME_ADDRESS.to_string();
            next.title = HOME_TITLE.to_string();
            next.loading = false;
            next.history.rewind();
            next
        });
        state.reader.remove(&tab_id);
        state.begin_load(tab_id);
        state.view_mode = ViewMode::Web;
        state.embed_failed = false;
    }

    /// The embedding surface refused the frame.
    pub async fn report_embed_failure(&self) {
        self.state.write().await.embed_failed = true;
    }

    /// The embedding surface finished loading `address`. Ignored when stale.
    pub async fn complete_load(&self, id: TabId, address: &str) -> bool {
        let mut state = self.state.write().await;
        let updated = state
            .tabs
            .get(id)
            .filter(|tab| tab.address == address)
            .map(|tab| Tab {
                loading: false,
                ..Tab::clone(&tab)
            });

        match updated {
            Some(next) => {
                state.tabs.update(id, |_| next);
                true
            }
            None => {
                debug!(tab_id = %id, url = %address, "Ignoring stale load completion");
                false
            }
        }
    }

    /// Title reported by the embedding surface. Ignored when stale or blank.
    pub async fn update_title(&self, id: TabId, address: &str, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() {
            return false;
        }

        let mut state = self.state.write().await;
        let current = state.tabs.get(id).filter(|tab| tab.address == address);
        if current.is_none() {
            return false;
        }

        state.tabs.update(id, |tab| Tab {
            title: title.to_string(),
            ..tab.clone()
        });
        true
    }

    /// Replace the denylist used by later navigations.
    pub async fn set_denylist(&self, gate: SiteGate) {
        self.state.write().await.gate = gate;
    }

    // =========================================================================
    // Command execution
    // =========================================================================

    pub async fn execute(&self, command: SessionCommand) {
        match command {
            SessionCommand::SettleLoad {
                tab_id,
                address,
                generation,
            } => {
                tokio::time::sleep(self.settle_delay).await;
                self.settle_load(tab_id, &address, generation).await;
            }
            SessionCommand::AcquireReader {
                tab_id,
                address,
                generation,
            } => {
                self.acquire_reader(tab_id, address, generation).await;
            }
        }
    }

    /// Run a transition's command, if any, to completion.
    pub async fn dispatch(&self, command: Option<SessionCommand>) {
        if let Some(command) = command {
            self.execute(command).await;
        }
    }

    async fn settle_load(&self, tab_id: TabId, address: &str, generation: u64) {
        let mut state = self.state.write().await;
        if !state.owns_load(tab_id, generation) {
            debug!(tab_id = %tab_id, url = %address, "Ignoring superseded settle");
            return;
        }
        state.finish_load(tab_id);
    }

    async fn acquire_reader(&self, tab_id: TabId, address: String, generation: u64) {
        {
            let mut state = self.state.write().await;
            if !state.owns_load(tab_id, generation) {
                debug!(tab_id = %tab_id, url = %address, "Reader request superseded before start");
                return;
            }
            let on_address = state
                .tabs
                .get(tab_id)
                .is_some_and(|tab| tab.address == address);
            if !on_address {
                debug!(tab_id = %tab_id, url = %address, "Tab moved before reader start");
                state.finish_load(tab_id);
                return;
            }
            state.reader.insert(
                tab_id,
                ReaderEntry::Pending {
                    address: address.clone(),
                },
            );
        }

        let content = reader::acquire(&*self.extractor, &*self.generator, &address).await;

        let mut state = self.state.write().await;
        if !state.owns_load(tab_id, generation) {
            debug!(tab_id = %tab_id, url = %address, "Discarding superseded reader result");
            return;
        }
        state.finish_load(tab_id);

        let still_current = state
            .tabs
            .get(tab_id)
            .is_some_and(|tab| tab.address == address)
            && matches!(
                state.reader.get(&tab_id),
                Some(ReaderEntry::Pending { address: pending }) if *pending == address
            );
        if !still_current {
            debug!(tab_id = %tab_id, url = %address, "Discarding stale reader result");
            if matches!(state.reader.get(&tab_id), Some(entry) if entry.address() == address) {
                state.reader.remove(&tab_id);
            }
            return;
        }

        state.reader.insert(
            tab_id,
            ReaderEntry::Done {
                address: address.clone(),
                content,
            },
        );
        info!(tab_id = %tab_id, url = %address, "Reader content ready");
    }
}
