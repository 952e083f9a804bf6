//! Runtime workflows — record creation/update reconciliation and key search.

pub mod reconciler;
pub mod search;

pub use reconciler::Reconciler;
pub use search::{matches_key, TranslationSearch, TranslationStats};
