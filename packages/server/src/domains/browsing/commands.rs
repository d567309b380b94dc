use super::models::TabId;

/// Deferred work returned by session transitions.
///
/// Transitions apply their synchronous state change first and hand back the
/// slow part; the caller runs it with `SessionController::execute`. Each
/// command carries the tab's load generation at the time it was issued and
/// only settles the loading flag while that generation is still current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Clear the loading flag once the settling delay has elapsed.
    SettleLoad {
        tab_id: TabId,
        address: String,
        generation: u64,
    },
    /// Run reader acquisition for the address.
    AcquireReader {
        tab_id: TabId,
        address: String,
        generation: u64,
    },
}
