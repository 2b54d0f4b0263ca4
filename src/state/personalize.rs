use crate::config;
use crate::state::store::Store;

/// Store keys, one per field so a corrupt row only loses that field
const KEY_RECIPIENT: &str = "bday:name";
const KEY_SENDER: &str = "bday:from";
const KEY_TARGET: &str = "bday:date";

/// The three fields the viewer can personalize.
///
/// Loaded once at startup, then every edit writes straight through to the
/// store; there is no save button and no batching. The target string is kept
/// verbatim even when it does not parse — the countdown engine owns what an
/// invalid target means.
#[derive(Debug, Clone)]
pub struct Personalization {
    recipient_name: String,
    sender_name: String,
    target_iso: String,
}

impl Personalization {
    pub fn load(store: &mut Store) -> Self {
        Self {
            recipient_name: store.get(KEY_RECIPIENT, config::RECIPIENT_NAME.to_owned()),
            sender_name: store.get(KEY_SENDER, config::SENDER_NAME.to_owned()),
            target_iso: store.get(KEY_TARGET, config::BIRTHDAY_AT.to_owned()),
        }
    }

    pub fn recipient_name(&self) -> &str {
        &self.recipient_name
    }

    pub fn sender_name(&self) -> &str {
        &self.sender_name
    }

    pub fn target_iso(&self) -> &str {
        &self.target_iso
    }

    pub fn set_recipient_name(&mut self, store: &mut Store, value: String) {
        self.recipient_name = value;
        store.set(KEY_RECIPIENT, &self.recipient_name);
    }

    pub fn set_sender_name(&mut self, store: &mut Store, value: String) {
        self.sender_name = value;
        store.set(KEY_SENDER, &self.sender_name);
    }

    pub fn set_target_iso(&mut self, store: &mut Store, value: String) {
        self.target_iso = value;
        store.set(KEY_TARGET, &self.target_iso);
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
    fn test_defaults_on_first_load() {
        let (_dir, mut store) = temp_store();
        let p = Personalization::load(&mut store);
        assert_eq!(p.recipient_name(), config::RECIPIENT_NAME);
        assert_eq!(p.sender_name(), config::SENDER_NAME);
        assert_eq!(p.target_iso(), config::BIRTHDAY_AT);
    }

    #[test]
    fn test_edits_write_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bday.db");

        {
            let mut store = Store::open(&path);
            let mut p = Personalization::load(&mut store);
            p.set_recipient_name(&mut store, "Sam".into());
            p.set_target_iso(&mut store, "2026-01-01T00:00:00".into());
        }

        let mut store = Store::open(&path);
        let p = Personalization::load(&mut store);
        assert_eq!(p.recipient_name(), "Sam");
        assert_eq!(p.sender_name(), config::SENDER_NAME);
        assert_eq!(p.target_iso(), "2026-01-01T00:00:00");
    }
}
