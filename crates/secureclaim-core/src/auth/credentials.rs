use keyring::Entry;

use super::storage::{SessionStore, StorageError};

const SERVICE_NAME: &str = "secureclaim";

/// Session storage in the OS keychain, one entry per key
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    pub fn new() -> Self {
        Self::with_service(SERVICE_NAME)
    }

    pub fn with_service(service: &str) -> Self {
        Self {
            service: service.to_string(),
        }
    }

    fn entry(&self, key: &str) -> Result<Entry, StorageError> {
        Ok(Entry::new(&self.service, key)?)
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for KeyringStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entry(key)?.set_password(value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_store() -> KeyringStore {
        keyring::set_default_credential_builder(keyring::mock::default_credential_builder());
        KeyringStore::with_service("secureclaim-test")
    }

    #[test]
    fn test_get_missing_entry_is_none() {
        let store = mock_store();
        assert_eq!(store.get("auth_user").expect("get"), None);
    }

    #[test]
    fn test_remove_missing_entry_is_ok() {
        let store = mock_store();
        assert!(store.remove("auth_user").is_ok());
        assert!(store.remove("auth_user").is_ok());
    }

    #[test]
    fn test_set_succeeds() {
        let store = mock_store();
        assert!(store.set("auth_user", r#"{"email":"a@b.com","accessToken":"tok123"}"#).is_ok());
    }
}
