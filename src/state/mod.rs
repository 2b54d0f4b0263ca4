/// State management module
///
/// This module handles all persisted application state, including:
/// - The key-value store on disk (store.rs)
/// - Personalization fields (personalize.rs)
/// - The guestbook wish board (guestbook.rs)

pub mod guestbook;
pub mod personalize;
pub mod store;
