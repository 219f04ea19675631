//! Screening engine: session resolution, filter, scoring, classification and
//! the scan orchestrator that ties them together.

pub mod classifier;
pub mod filter;
pub mod scanner;
pub mod scoring;
pub mod session;

pub use scanner::Scanner;
