//! Alerting: the dedup ledger, the outbound notifier, the dispatcher and the
//! periodic loop that feeds scan results into it.

pub mod dispatcher;
pub mod ledger;
pub mod notifier;
pub mod worker;

pub use dispatcher::AlertDispatcher;
pub use notifier::{Notifier, TelegramNotifier};
