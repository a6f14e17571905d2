use crate::error::Result;

/// Abstract interface for raw key-value I/O.
/// This trait handles the "how" of persistence (filesystem vs memory),
/// while the gateway handles the "what" (key layout, encoding, recovery).
pub trait KeyValueStore {
    /// Read the raw value stored under a key.
    /// Returns Ok(None) if the key has never been written.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Write the value for a key.
    /// MUST be atomic (e.g. write to tmp then rename) so a reader never
    /// observes a partially written value.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}
