use serde::{Deserialize, Serialize};

use crate::config;
use crate::state::store::Store;

const KEY_NOTES: &str = "bday:notes";

/// One wish left on the board. Immutable once created; the board offers no
/// editing or deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestbookEntry {
    pub author: String,
    pub text: String,
    pub created_at_ms: i64,
}

/// The wish board, most recent wish first.
///
/// Insertion order is authoritative: a new wish goes in at index 0 and the
/// list is never resorted by timestamp afterwards, so clock skew cannot
/// reorder history.
#[derive(Debug, Clone)]
pub struct Guestbook {
    entries: Vec<GuestbookEntry>,
}

impl Guestbook {
    /// Load the persisted board. The very first load (key never written)
    /// seeds a welcome note authored by the sender's name as it is *right
    /// now* — later renames do not retroactively update it.
    pub fn load(store: &mut Store, sender_name: &str, now_ms: i64) -> Self {
        let entries = match store.get_opt::<Vec<GuestbookEntry>>(KEY_NOTES) {
            Some(entries) => entries,
            None => {
                let seeded = vec![GuestbookEntry {
                    author: sender_name.to_owned(),
                    text: config::SEED_NOTE.to_owned(),
                    created_at_ms: now_ms,
                }];
                store.set(KEY_NOTES, &seeded);
                seeded
            }
        };
        Self { entries }
    }

    pub fn entries(&self) -> &[GuestbookEntry] {
        &self.entries
    }

    /// Add a wish. Whitespace-only text is rejected with no state change;
    /// an empty author falls back to `fallback_author` (the current sender
    /// name). On acceptance the entry is prepended and the whole list is
    /// persisted write-through.
    pub fn submit(
        &mut self,
        store: &mut Store,
        author: &str,
        text: &str,
        fallback_author: &str,
        now_ms: i64,
    ) -> Option<&GuestbookEntry> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let author = match author.trim() {
            "" => fallback_author,
            trimmed => trimmed,
        };

        self.entries.insert(
            0,
            GuestbookEntry {
                author: author.to_owned(),
                text: text.to_owned(),
                created_at_ms: now_ms,
            },
        );
        store.set(KEY_NOTES, &self.entries);
        self.entries.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(&dir.path().join("bday.db"));
        (dir, store)
    }

    #[test]
    fn test_first_load_seeds_welcome_note() {
        let (_dir, mut store) = temp_store();
        let book = Guestbook::load(&mut store, "From Me", 1_000);
        assert_eq!(book.entries().len(), 1);
        assert_eq!(book.entries()[0].author, "From Me");
        assert_eq!(book.entries()[0].text, config::SEED_NOTE);
    }

    #[test]
    fn test_seed_is_a_snapshot_not_a_live_binding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bday.db");

        {
            let mut store = Store::open(&path);
            Guestbook::load(&mut store, "Original Name", 1_000);
        }

        // Reload with a renamed sender: the seeded author must not change
        let mut store = Store::open(&path);
        let book = Guestbook::load(&mut store, "Renamed", 2_000);
        assert_eq!(book.entries()[0].author, "Original Name");
        assert_eq!(book.entries()[0].created_at_ms, 1_000);
    }

    #[test]
    fn test_submissions_are_most_recent_first() {
        let (_dir, mut store) = temp_store();
        let mut book = Guestbook::load(&mut store, "From Me", 0);

        book.submit(&mut store, "A", "first", "From Me", 1);
        book.submit(&mut store, "B", "second", "From Me", 2);
        book.submit(&mut store, "C", "third", "From Me", 3);

        let texts: Vec<&str> = book.entries().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["third", "second", "first", config::SEED_NOTE]
        );
    }

    #[test]
    fn test_ordering_survives_reload_without_resorting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bday.db");

        {
            let mut store = Store::open(&path);
            let mut book = Guestbook::load(&mut store, "From Me", 0);
            // Deliberately skewed clocks: the later submission carries an
            // earlier timestamp and must still sit on top
            book.submit(&mut store, "A", "older clock", "From Me", 500);
            book.submit(&mut store, "B", "skewed clock", "From Me", 100);
        }

        let mut store = Store::open(&path);
        let book = Guestbook::load(&mut store, "From Me", 9_999);
        assert_eq!(book.entries()[0].text, "skewed clock");
        assert_eq!(book.entries()[1].text, "older clock");
    }

    #[test]
    fn test_blank_text_is_rejected_without_state_change() {
        let (_dir, mut store) = temp_store();
        let mut book = Guestbook::load(&mut store, "From Me", 0);
        let before = book.entries().to_vec();

        assert!(book.submit(&mut store, "", "   ", "From Me", 1).is_none());
        assert!(book.submit(&mut store, "Someone", "\n\t ", "From Me", 2).is_none());
        assert_eq!(book.entries(), &before[..]);

        // And the persisted copy is unchanged too
        let reloaded = Guestbook::load(&mut store, "From Me", 3);
        assert_eq!(reloaded.entries(), &before[..]);
    }

    #[test]
    fn test_empty_author_falls_back_to_sender() {
        let (_dir, mut store) = temp_store();
        let mut book = Guestbook::load(&mut store, "From Me", 0);
        let entry = book
            .submit(&mut store, "  ", "make a wish", "Current Sender", 42)
            .expect("non-empty text is accepted");
        assert_eq!(entry.author, "Current Sender");
        assert_eq!(entry.created_at_ms, 42);
    }
}
