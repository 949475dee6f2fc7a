pub mod preferences;

pub use preferences::FileStore;
pub use preferences::MemoryStore;
pub use preferences::PreferenceStore;
pub use preferences::StoreKey;
pub use preferences::ThemeStore;
