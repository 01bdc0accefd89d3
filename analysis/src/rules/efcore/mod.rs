//! Rules for Entity Framework Core style ORMs.

pub mod sync_in_async;

pub use sync_in_async::{EfSyncInvocationRule, SyncCallClassifier};
