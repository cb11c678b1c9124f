//! Row store implementations - hosted PostgREST backend and in-memory fallback.

mod memory;

#[cfg(feature = "remote")]
mod postgrest;

pub use memory::InMemoryRowStore;

#[cfg(feature = "remote")]
pub use postgrest::PostgrestStore;

use serde_json::Value;

/// Connection settings for the hosted PostgREST backend.
#[derive(Debug, Clone)]
pub struct PostgrestConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    pub url: String,
    /// Anon or service key, sent as `apikey` and as bearer token.
    pub api_key: String,
}

/// Filter values as the backend compares them: strings bare, others as JSON text.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
