use crate::errors::CoreError;
use crate::models::store::FinanceStore;

/// The single persistence key the store lives under. File-backed targets
/// use `<key>.json`; a wasm host would use the same key in local storage.
pub const STORAGE_KEY: &str = "zen-finance-storage";

/// High-level storage operations: save/load the finance store to/from
/// JSON bytes or files.
///
/// Missing data falls back to documented defaults (RUB, rate 92, ru,
/// light theme, empty lists) — field by field, not all-or-nothing.
pub struct StoreManager;

impl StoreManager {
    /// Serialize the store to JSON bytes (portable, platform-independent).
    /// Use this for WASM / embedded hosts where the frontend owns I/O.
    pub fn save_to_bytes(store: &FinanceStore) -> Result<Vec<u8>, CoreError> {
        serde_json::to_vec_pretty(store)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize store: {e}")))
    }

    /// Deserialize a store from JSON bytes.
    ///
    /// Fields absent from the stored value fall back to their defaults;
    /// only structurally invalid JSON is an error.
    pub fn load_from_bytes(data: &[u8]) -> Result<FinanceStore, CoreError> {
        serde_json::from_slice(data)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize store: {e}")))
    }

    /// Save the store to a JSON file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(store: &FinanceStore, path: &std::path::Path) -> Result<(), CoreError> {
        let bytes = Self::save_to_bytes(store)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Load the store from a JSON file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &std::path::Path) -> Result<FinanceStore, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::load_from_bytes(&bytes)
    }

    /// Load from disk, falling back to a default store when no file exists
    /// yet (first run). Other I/O or parse failures still error.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default(path: &std::path::Path) -> Result<FinanceStore, CoreError> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(FinanceStore::default())
        }
    }

    /// The conventional file path for a given directory: `<dir>/<key>.json`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path(dir: &std::path::Path) -> std::path::PathBuf {
        dir.join(format!("{STORAGE_KEY}.json"))
    }
}
