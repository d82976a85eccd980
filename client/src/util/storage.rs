//! Web Storage bindings for the session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The durable session keys (`token`, `user`, `selectedLanguage`) live in
//! `localStorage`; the last-route marker lives in `sessionStorage` so it
//! never outlives the tab. Outside the `csr` build both areas behave as an
//! unavailable backend: reads miss and writes fail.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use session::{KeyValueStore, StoreError};

/// Which Web Storage area backs a [`BrowserStorage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageArea {
    Local,
    Session,
}

impl StorageArea {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Local => "localStorage",
            Self::Session => "sessionStorage",
        }
    }
}

/// [`KeyValueStore`] over `window.localStorage` or `window.sessionStorage`.
#[derive(Clone, Copy, Debug)]
pub struct BrowserStorage {
    area: StorageArea,
}

impl BrowserStorage {
    #[must_use]
    pub fn local() -> Self {
        Self { area: StorageArea::Local }
    }

    #[must_use]
    pub fn session() -> Self {
        Self { area: StorageArea::Session }
    }

    #[must_use]
    pub fn area(&self) -> StorageArea {
        self.area
    }

    #[cfg(feature = "csr")]
    fn storage(&self) -> Result<web_sys::Storage, StoreError> {
        let window = web_sys::window().ok_or_else(|| unavailable(self.area))?;
        let storage = match self.area {
            StorageArea::Local => window.local_storage(),
            StorageArea::Session => window.session_storage(),
        };
        storage.ok().flatten().ok_or_else(|| unavailable(self.area))
    }
}

fn unavailable(area: StorageArea) -> StoreError {
    StoreError::Unavailable(format!("{} is not available", area.name()))
}

#[cfg(feature = "csr")]
fn js_message(value: &wasm_bindgen::JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            self.storage().ok()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        #[cfg(feature = "csr")]
        {
            self.storage()?
                .set_item(key, value)
                .map_err(|e| StoreError::Write { key: key.to_owned(), message: js_message(&e) })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
            Err(unavailable(self.area))
        }
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        #[cfg(feature = "csr")]
        {
            self.storage()?
                .remove_item(key)
                .map_err(|e| StoreError::Write { key: key.to_owned(), message: js_message(&e) })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Ok(())
        }
    }
}
