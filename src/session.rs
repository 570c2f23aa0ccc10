//! Session Store
//!
//! Durable auth token + cached user snapshot. The store is created once at
//! startup and handed to every controller; views learn about changes through
//! `subscribe` instead of re-reading storage.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::models::UserSnapshot;

pub const TOKEN_KEY: &str = "authtoken";
pub const USER_KEY: &str = "user";

/// Minimal durable key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Browser `localStorage`
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    /// None when the window has no usable `localStorage` (e.g. disabled cookies)
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set_item(key, value) {
            log::warn!("localStorage write of {} failed: {:?}", key, e);
        }
    }

    fn remove(&self, key: &str) {
        if let Err(e) = self.storage.remove_item(key) {
            log::warn!("localStorage remove of {} failed: {:?}", key, e);
        }
    }
}

/// Process-lifetime storage, used when `localStorage` is unavailable
#[derive(Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Snapshot of the persisted session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserSnapshot>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn user_id(&self) -> Option<u64> {
        self.user.as_ref().map(|u| u.id)
    }
}

pub type SubscriptionId = usize;

type Listener = Rc<dyn Fn(&Session)>;

struct SessionInner {
    storage: Box<dyn KeyValueStore>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_id: RefCell<SubscriptionId>,
}

/// Shared handle; clones see the same storage and listeners
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<SessionInner>,
}

impl SessionStore {
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        Self {
            inner: Rc::new(SessionInner {
                storage,
                listeners: RefCell::new(Vec::new()),
                next_id: RefCell::new(0),
            }),
        }
    }

    /// `localStorage` if available, memory otherwise
    pub fn browser() -> Self {
        match BrowserStorage::open() {
            Some(storage) => Self::new(Box::new(storage)),
            None => {
                log::warn!("localStorage unavailable, session will not survive a reload");
                Self::new(Box::new(MemoryStorage::default()))
            }
        }
    }

    pub fn token(&self) -> Option<String> {
        self.inner
            .storage
            .get(TOKEN_KEY)
            .filter(|t| !t.is_empty())
    }

    pub fn user(&self) -> Option<UserSnapshot> {
        let raw = self.inner.storage.get(USER_KEY)?;
        if raw.is_empty() {
            return None;
        }
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("Ignoring unreadable cached user: {}", e);
                None
            }
        }
    }

    pub fn session(&self) -> Session {
        Session {
            token: self.token(),
            user: self.user(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn set_session(&self, token: &str, user: Option<&UserSnapshot>) {
        self.inner.storage.set(TOKEN_KEY, token);
        self.write_user(user);
        log::info!("Session started for user {:?}", user.map(|u| u.id));
        self.notify();
    }

    /// Replace the cached snapshot wholesale
    pub fn set_user(&self, user: &UserSnapshot) {
        self.write_user(Some(user));
        self.notify();
    }

    pub fn clear(&self) {
        self.inner.storage.remove(TOKEN_KEY);
        self.inner.storage.remove(USER_KEY);
        log::info!("Session cleared");
        self.notify();
    }

    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) -> SubscriptionId {
        let mut next = self.inner.next_id.borrow_mut();
        let id = *next;
        *next += 1;
        self.inner.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.listeners.borrow_mut().retain(|(sid, _)| *sid != id);
    }

    fn write_user(&self, user: Option<&UserSnapshot>) {
        match user.map(serde_json::to_string) {
            Some(Ok(json)) => self.inner.storage.set(USER_KEY, &json),
            Some(Err(e)) => {
                log::warn!("Could not serialize user snapshot: {}", e);
                self.inner.storage.remove(USER_KEY);
            }
            None => self.inner.storage.remove(USER_KEY),
        }
    }

    fn notify(&self) {
        let session = self.session();
        // Listeners may subscribe/unsubscribe, so call them on a copy
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener(&session);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Storage shared between two stores to simulate a page reload
    #[derive(Clone, Default)]
    struct SharedStorage(Rc<MemoryStorage>);

    impl KeyValueStore for SharedStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key)
        }
        fn set(&self, key: &str, value: &str) {
            self.0.set(key, value)
        }
        fn remove(&self, key: &str) {
            self.0.remove(key)
        }
    }

    fn user() -> UserSnapshot {
        UserSnapshot {
            id: 1,
            first_name: "A".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_token_is_logged_out() {
        let store = SessionStore::new(Box::new(MemoryStorage::default()));
        assert_eq!(store.token(), None);
        assert!(!store.is_authenticated());
        assert_eq!(store.session(), Session::default());
    }

    #[test]
    fn test_session_survives_reload() {
        let backing = SharedStorage::default();
        let store = SessionStore::new(Box::new(backing.clone()));
        store.set_session("T", Some(&user()));

        let reloaded = SessionStore::new(Box::new(backing));
        assert_eq!(reloaded.token().as_deref(), Some("T"));
        assert_eq!(reloaded.user(), Some(user()));
    }

    #[test]
    fn test_clear_removes_both_keys() {
        let backing = SharedStorage::default();
        let store = SessionStore::new(Box::new(backing.clone()));
        store.set_session("T", Some(&user()));
        store.clear();

        assert_eq!(backing.get(TOKEN_KEY), None);
        assert_eq!(backing.get(USER_KEY), None);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_corrupt_user_reads_as_absent() {
        let backing = SharedStorage::default();
        backing.set(TOKEN_KEY, "T");
        backing.set(USER_KEY, "{not json");
        let store = SessionStore::new(Box::new(backing));
        assert!(store.is_authenticated());
        assert_eq!(store.user(), None);
    }

    #[test]
    fn test_subscribers_see_changes_until_unsubscribed() {
        let store = SessionStore::new(Box::new(MemoryStorage::default()));
        let seen = Rc::new(Cell::new(0));
        let last_authenticated = Rc::new(Cell::new(false));

        let id = {
            let seen = seen.clone();
            let last = last_authenticated.clone();
            store.subscribe(move |s| {
                seen.set(seen.get() + 1);
                last.set(s.is_authenticated());
            })
        };

        store.set_session("T", Some(&user()));
        assert_eq!(seen.get(), 1);
        assert!(last_authenticated.get());

        store.set_user(&UserSnapshot { first_name: "B".into(), ..user() });
        assert_eq!(seen.get(), 2);
        assert_eq!(store.user().unwrap().first_name, "B");

        store.unsubscribe(id);
        store.clear();
        assert_eq!(seen.get(), 2);
    }
}
