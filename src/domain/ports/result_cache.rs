//! Agent result cache port

use serde_json::Value;

/// Unbounded key-value store for computed results
///
/// No eviction and no expiry. Implementations must be safe to share across
/// concurrent requests.
pub trait ResultCache: Send + Sync {
    /// Look up a stored value
    fn get(&self, key: &str) -> Option<Value>;

    /// Store a value, replacing any previous one
    fn put(&self, key: &str, value: Value);
}
