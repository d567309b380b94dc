use serde::Serialize;

/// Ordered log of visited addresses with a cursor.
///
/// Never empty; the cursor always points at an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl NavigationHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            cursor: 0,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    /// Drop any forward entries and push `address` as the new tail.
    pub fn append(&mut self, address: impl Into<String>) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(address.into());
        self.cursor = self.entries.len() - 1;
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn back(&mut self) -> Option<&str> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&str> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    /// Move the cursor to the first entry, keeping forward entries.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_history() {
        let history = NavigationHistory::new("hello://home");
        assert_eq!(history.entries(), ["hello://home"]);
        assert_eq!(history.cursor(), 0);
        assert!(!history.can_go_back());
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_back_then_forward_restores_address() {
        let mut history = NavigationHistory::new("a");
        history.append("b");
        history.append("c");

        assert_eq!(history.back(), Some("b"));
        assert_eq!(history.forward(), Some("c"));
        assert_eq!(history.current(), "c");
    }

    #[test]
    fn test_append_truncates_forward_entries() {
        let mut history = NavigationHistory::new("a");
        history.append("b");
        history.append("c");
        history.back();
        history.back();

        history.append("d");
        assert_eq!(history.entries(), ["a", "d"]);
        assert_eq!(history.cursor(), 1);
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_illegal_moves_are_noops() {
        let mut history = NavigationHistory::new("a");
        assert_eq!(history.back(), None);
        assert_eq!(history.forward(), None);
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_rewind_keeps_forward_entries() {
        let mut history = NavigationHistory::new("home");
        history.append("x");
        history.append("y");
        history.rewind();

        assert_eq!(history.current(), "home");
        assert!(!history.can_go_back());
        assert!(history.can_go_forward());
    }
}
