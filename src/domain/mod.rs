pub mod access_gate;
pub mod audio;
pub mod autosave;
pub mod debounce;
pub mod draft;
pub mod entry;
pub mod entry_store;
pub mod error;
pub mod kv_store;
pub mod license;
pub mod planner;
pub mod session_token;

pub use access_gate::{AccessGate, GateDecision};
pub use autosave::{AutosaveController, AutosaveState, CommitOutcome};
pub use debounce::{Clock, SystemClock};
pub use entry::Entry;
pub use error::{AudioError, JournalError, LicenseError};
pub use kv_store::KeyValueStore;
pub use license::{LicenseVerifier, UnlockRequest};
pub use planner::{PlannerField, PlannerPage};
pub use session_token::SessionToken;
