//! Persisted auth session, one JSON entry in `localStorage`.
//!
//! Outside the browser nothing is persisted: `load` finds nothing and
//! `save`/`clear` do nothing. A stored entry that no longer decodes as a
//! [`Session`] is removed on load so the next startup does not trip on it.

#[cfg(test)]
#[path = "session_store_test.rs"]
mod session_store_test;

use super::types::Session;

pub struct SessionStore {
    key: String,
}

impl SessionStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn load(&self) -> Option<Session> {
        #[cfg(feature = "csr")]
        {
            let storage = local_storage()?;
            let raw = storage.get_item(&self.key).ok().flatten()?;
            let session = decode(&raw);
            if session.is_none() {
                let _ = storage.remove_item(&self.key);
            }
            session
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    pub fn save(&self, session: &Session) {
        #[cfg(feature = "csr")]
        {
            let Some(storage) = local_storage() else {
                return;
            };
            match serde_json::to_string(session) {
                Ok(raw) => {
                    if storage.set_item(&self.key, &raw).is_err() {
                        log::warn!("session store: write to {} rejected", self.key);
                    }
                }
                Err(e) => log::warn!("session store: encode failed: {e}"),
            }
        }
        #[cfg(not(feature = "csr"))]
        let _ = session;
    }

    pub fn clear(&self) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(&self.key);
            }
        }
    }
}

/// Parse a stored entry. Malformed entries are logged and yield `None`.
pub(crate) fn decode(raw: &str) -> Option<Session> {
    match serde_json::from_str(raw) {
        Ok(session) => Some(session),
        Err(e) => {
            log::warn!("session store: dropping unreadable session: {e}");
            None
        }
    }
}

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}
