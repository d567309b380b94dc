pub mod history;
pub mod tab;
pub mod view;

pub use history::NavigationHistory;
pub use tab::{Tab, TabId, HOME_TITLE, NEW_TAB_TITLE};
pub use view::{NavigationCapabilities, ReaderContent, ReaderEntry, TabPhase, ViewMode};
