use super::backend::KeyValueStore;
use super::EntityStore;
use crate::error::{HubError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory key-value backend for testing.
///
/// Uses `RefCell` for interior mutability since devhub is single-threaded.
/// This avoids the overhead of `RwLock` while still allowing the
/// `KeyValueStore` trait to use `&self` for all methods.
pub struct MemBackend {
    values: RefCell<HashMap<String, String>>,
    write_counts: RefCell<HashMap<String, usize>>,
    simulate_write_error: RefCell<bool>,
}

impl Default for MemBackend {
    fn default() -> Self {
        Self {
            values: RefCell::new(HashMap::new()),
            write_counts: RefCell::new(HashMap::new()),
            simulate_write_error: RefCell::new(false),
        }
    }
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// How many times a key has been written since construction.
    pub fn write_count(&self, key: &str) -> usize {
        self.write_counts.borrow().get(key).copied().unwrap_or(0)
    }

    /// Raw value currently stored under a key, if any.
    pub fn raw_value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.borrow();
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(HubError::Store("Simulated write error".to_string()));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        *self
            .write_counts
            .borrow_mut()
            .entry(key.to_string())
            .or_insert(0) += 1;
        Ok(())
    }
}

pub type InMemoryStore = EntityStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        EntityStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use crate::model::PostDraft;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        /// Fresh store with a logged-in user, since most mutations
        /// require one.
        pub fn new() -> Self {
            let mut store = InMemoryStore::new();
            store.set_current_user("tester").unwrap();
            Self { store }
        }

        pub fn logged_out() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn as_user(mut self, name: &str) -> Self {
            self.store.set_current_user(name).unwrap();
            self
        }

        pub fn with_message(mut self, text: &str) -> Self {
            self.store.add_message(text, None).unwrap();
            self
        }

        pub fn with_post(mut self, title: &str, subject: &str) -> Self {
            let draft = PostDraft {
                title: title.to_string(),
                subject: subject.to_string(),
                description: format!("About {}", title),
                code: "fn main() {}".to_string(),
                language: "rust".to_string(),
                ..PostDraft::default()
            };
            self.store.add_post(draft).unwrap();
            self
        }

        pub fn with_numbered_post(mut self, title: &str, subject: &str, number: u32) -> Self {
            let draft = PostDraft {
                title: title.to_string(),
                subject: subject.to_string(),
                code: "SELECT 1;".to_string(),
                language: "sql".to_string(),
                post_number: Some(number),
                ..PostDraft::default()
            };
            self.store.add_post(draft).unwrap();
            self
        }

        /// Comment on the post found by title. Panics if absent so broken
        /// setups fail loudly.
        pub fn with_comment(mut self, post_title: &str, text: &str) -> Self {
            let post_id = self.post_id(post_title);
            self.store.add_comment(&post_id, text, None).unwrap();
            self
        }

        pub fn with_favorite(mut self, post_title: &str) -> Self {
            let post_id = self.post_id(post_title);
            self.store.toggle_favorite(&post_id).unwrap();
            self
        }

        pub fn post_id(&self, title: &str) -> crate::model::EntityId {
            self.store
                .posts()
                .iter()
                .find(|p| p.title == title)
                .map(|p| p.id.clone())
                .unwrap_or_else(|| panic!("fixture has no post titled '{}'", title))
        }
    }
}
