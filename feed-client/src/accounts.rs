//! Persisted account roster backed by a secret store.
//!
//! The synchronization core does not perform the OAuth dance itself, but
//! it does own what the login flow produces: the list of authenticated
//! account handles and each account's token/secret pair. Both live in a
//! host-provided [`SecretStore`] (the platform keychain in production,
//! [`MemorySecretStore`] in tests), keyed the same way the original
//! keychain entries were:
//!
//! - the account list as one comma-joined value under a fixed server key
//! - each token and token-secret under the account's username

use std::collections::HashMap;
use std::sync::Mutex;

/// Server key under which the comma-joined account list is stored.
const LOGGED_IN_ACCOUNTS: &str = "feed-logged-in-accounts";
/// Area of the account-list entry.
const APP_AREA: &str = "app";
/// Area of each account's OAuth token.
const TOKEN_AREA: &str = "oauth-token";
/// Area of each account's OAuth token secret.
const TOKEN_SECRET_AREA: &str = "oauth-token-secret";

/// A keyed secret store, shaped like a platform keychain.
///
/// Entries are addressed by `(server, area)`; `label` is a display hint
/// for keychain UIs and carries no lookup semantics.
pub trait SecretStore: Send + Sync {
    /// Read the secret stored under `(server, area)`.
    fn get(&self, server: &str, area: &str) -> Option<String>;

    /// Store (or overwrite) a secret under `(server, area)`.
    fn set(&self, password: &str, server: &str, area: &str, label: &str);

    /// Delete the secret under `(server, area)`. No-op when absent.
    fn delete(&self, server: &str, area: &str);
}

/// In-memory secret store for tests and hosts without a keychain.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    entries: Mutex<HashMap<(String, String), String>>,
}

impl MemorySecretStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecretStore for MemorySecretStore {
    fn get(&self, server: &str, area: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap();
        entries.get(&(server.to_string(), area.to_string())).cloned()
    }

    fn set(&self, password: &str, server: &str, area: &str, _label: &str) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            (server.to_string(), area.to_string()),
            password.to_string(),
        );
    }

    fn delete(&self, server: &str, area: &str) {
        let mut entries = self.entries.lock().unwrap();
        entries.remove(&(server.to_string(), area.to_string()));
    }
}

/// An account's persisted OAuth credential pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// The OAuth token.
    pub token: String,
    /// The OAuth token secret.
    pub secret: String,
}

/// The roster of authenticated accounts, persisted in a [`SecretStore`].
pub struct AccountStore<S: SecretStore> {
    store: S,
}

impl<S: SecretStore> AccountStore<S> {
    /// Wrap a secret store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The authenticated account handles, in login order.
    ///
    /// Empty fragments are skipped and duplicates collapse to their first
    /// occurrence, so a corrupted or doubly-written list stays usable.
    pub fn accounts(&self) -> Vec<String> {
        let joined = self
            .store
            .get(LOGGED_IN_ACCOUNTS, APP_AREA)
            .unwrap_or_default();
        let mut seen = std::collections::HashSet::new();
        joined
            .split(',')
            .filter(|name| !name.is_empty())
            .filter(|name| seen.insert(name.to_string()))
            .map(str::to_string)
            .collect()
    }

    /// The persisted credential pair of one account, if both halves are
    /// present.
    pub fn credentials(&self, username: &str) -> Option<Credentials> {
        let token = self.store.get(username, TOKEN_AREA)?;
        let secret = self.store.get(username, TOKEN_SECRET_AREA)?;
        Some(Credentials { token, secret })
    }

    /// Record a freshly authenticated account.
    ///
    /// Appends the username to the roster (once) and stores its
    /// credential pair.
    pub fn add_account(&self, username: &str, token: &str, secret: &str) {
        let mut accounts = self.accounts();
        if !accounts.iter().any(|existing| existing == username) {
            accounts.push(username.to_string());
            self.store.set(
                &accounts.join(","),
                LOGGED_IN_ACCOUNTS,
                APP_AREA,
                LOGGED_IN_ACCOUNTS,
            );
        }

        let label = format!("{}-{}", username, TOKEN_AREA);
        self.store.set(token, username, TOKEN_AREA, &label);
        let label = format!("{}-{}", username, TOKEN_SECRET_AREA);
        self.store.set(secret, username, TOKEN_SECRET_AREA, &label);
    }

    /// Forget an account: drop it from the roster and delete its
    /// credentials.
    pub fn remove_account(&self, username: &str) {
        let remaining: Vec<String> = self
            .accounts()
            .into_iter()
            .filter(|existing| existing != username)
            .collect();
        self.store.set(
            &remaining.join(","),
            LOGGED_IN_ACCOUNTS,
            APP_AREA,
            LOGGED_IN_ACCOUNTS,
        );

        self.store.delete(username, TOKEN_AREA);
        self.store.delete(username, TOKEN_SECRET_AREA);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_has_no_accounts() {
        let store = AccountStore::new(MemorySecretStore::new());
        assert!(store.accounts().is_empty());
        assert!(store.credentials("alice").is_none());
    }

    #[test]
    fn add_account_persists_roster_and_credentials() {
        let store = AccountStore::new(MemorySecretStore::new());

        store.add_account("alice", "tok-a", "sec-a");
        store.add_account("bob", "tok-b", "sec-b");

        assert_eq!(store.accounts(), vec!["alice", "bob"]);
        assert_eq!(
            store.credentials("alice"),
            Some(Credentials {
                token: "tok-a".to_string(),
                secret: "sec-a".to_string(),
            })
        );
    }

    #[test]
    fn re_adding_an_account_updates_credentials_without_duplicating() {
        let store = AccountStore::new(MemorySecretStore::new());

        store.add_account("alice", "old-token", "old-secret");
        store.add_account("alice", "new-token", "new-secret");

        assert_eq!(store.accounts(), vec!["alice"]);
        assert_eq!(store.credentials("alice").unwrap().token, "new-token");
    }

    #[test]
    fn remove_account_forgets_roster_entry_and_credentials() {
        let store = AccountStore::new(MemorySecretStore::new());
        store.add_account("alice", "tok-a", "sec-a");
        store.add_account("bob", "tok-b", "sec-b");

        store.remove_account("alice");

        assert_eq!(store.accounts(), vec!["bob"]);
        assert!(store.credentials("alice").is_none());
        assert!(store.credentials("bob").is_some());
    }

    #[test]
    fn corrupted_roster_entries_are_tolerated() {
        let secrets = MemorySecretStore::new();
        // Trailing separators and duplicates, as a crashed writer might
        // leave behind.
        secrets.set(
            "alice,,alice,bob,",
            LOGGED_IN_ACCOUNTS,
            APP_AREA,
            LOGGED_IN_ACCOUNTS,
        );
        let store = AccountStore::new(secrets);

        assert_eq!(store.accounts(), vec!["alice", "bob"]);
    }

    #[test]
    fn credentials_require_both_halves() {
        let secrets = MemorySecretStore::new();
        secrets.set("tok", "alice", TOKEN_AREA, "label");
        let store = AccountStore::new(secrets);

        assert!(store.credentials("alice").is_none());
    }

    #[test]
    fn memory_store_roundtrips_by_server_and_area() {
        let store = MemorySecretStore::new();
        store.set("secret-1", "server", "area-1", "label");
        store.set("secret-2", "server", "area-2", "label");

        assert_eq!(store.get("server", "area-1").as_deref(), Some("secret-1"));
        assert_eq!(store.get("server", "area-2").as_deref(), Some("secret-2"));

        store.delete("server", "area-1");
        assert!(store.get("server", "area-1").is_none());
        // Deleting again is harmless.
        store.delete("server", "area-1");
    }
}
