//! Adapter implementations of the ports.

pub mod backend;
pub mod remote;
pub mod session;
pub mod storage;
