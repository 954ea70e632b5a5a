//! The two storage strategies behind the `StorageBackend` capability.

mod local;
mod remote;

pub use local::LocalBackend;
pub use remote::RemoteBackend;
