//! Collaborator contracts consumed and exposed by the engine.

mod local_store;
mod remote_store;
mod session_oracle;
mod storage_backend;

pub use local_store::{LocalStore, LocalStoreError};
pub use remote_store::{RemoteStore, RemoteStoreError};
pub use session_oracle::{SessionOracle, SessionState};
pub use storage_backend::StorageBackend;
