pub mod kv_store;
pub mod license;
pub mod session;

pub use kv_store::FileStore;
#[cfg(test)]
pub use kv_store::MemoryStore;
pub use license::GumroadVerifier;
pub use session::SessionManager;
