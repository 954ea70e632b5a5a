//! Session oracle adapters.

mod shared_session;

pub use shared_session::SharedSessionOracle;
