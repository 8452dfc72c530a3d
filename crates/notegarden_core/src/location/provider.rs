//! Location provider seam and in-memory implementation.

/// Access to the addressable location and its history.
///
/// Implementations must change the location without reloading the page.
pub trait LocationProvider {
    /// Scheme and host, e.g. `https://example.com`.
    fn origin(&self) -> String;
    /// Current path, possibly with query string or fragment.
    fn path(&self) -> String;
    /// Adds a history entry for `path` and makes it current.
    fn push(&mut self, path: &str);
    /// Rewrites the current history entry to `path`.
    fn replace(&mut self, path: &str);
}

/// History stack held in memory, used by the CLI and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLocation {
    origin: String,
    entries: Vec<String>,
    index: usize,
    pushes: usize,
    replaces: usize,
}

impl MemoryLocation {
    pub fn new(origin: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            entries: vec![path.into()],
            index: 0,
            pushes: 0,
            replaces: 0,
        }
    }

    /// Steps back one entry, returning the new current path.
    pub fn back(&mut self) -> Option<String> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.entries[self.index].clone())
    }

    /// Steps forward one entry, returning the new current path.
    pub fn forward(&mut self) -> Option<String> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.entries[self.index].clone())
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn history_len(&self) -> usize {
        self.entries.len()
    }

    pub fn push_count(&self) -> usize {
        self.pushes
    }

    pub fn replace_count(&self) -> usize {
        self.replaces
    }
}

impl LocationProvider for MemoryLocation {
    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn path(&self) -> String {
        self.entries[self.index].clone()
    }

    fn push(&mut self, path: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(path.to_string());
        self.index = self.entries.len() - 1;
        self.pushes += 1;
    }

    fn replace(&mut self, path: &str) {
        self.entries[self.index] = path.to_string();
        self.replaces += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::{LocationProvider, MemoryLocation};

    #[test]
    fn push_drops_forward_entries() {
        let mut location = MemoryLocation::new("https://example.com", "/notes");
        location.push("/notes/a");
        location.push("/notes/b");
        assert_eq!(location.back().as_deref(), Some("/notes/a"));
        location.push("/notes/c");
        assert_eq!(location.entries(), ["/notes", "/notes/a", "/notes/c"]);
        assert_eq!(location.forward(), None);
    }

    #[test]
    fn replace_keeps_history_length() {
        let mut location = MemoryLocation::new("https://example.com", "/notes/a");
        location.replace("/notes");
        assert_eq!(location.path(), "/notes");
        assert_eq!(location.history_len(), 1);
        assert_eq!(location.back(), None);
    }
}
