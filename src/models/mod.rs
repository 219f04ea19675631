//! Domain models shared across the screener.

pub mod session;
pub mod snapshot;
pub mod thresholds;

pub use session::{Session, SessionChoice};
pub use snapshot::{Signal, Snapshot};
pub use thresholds::Thresholds;
