// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session store: who is using the app right now.
//!
//! Holds the authenticated user, the household profiles, the active profile
//! and the bearer token. Two storage backends are kept side by side:
//! - the snapshot storage (user, profiles, selected profile) under
//!   [`STORAGE_KEY`], restored on [`SessionStore::rehydrate`]
//! - the token cookie ([`cookies::TOKEN_COOKIE`]), which also feeds the
//!   route guard and the API client
//!
//! When both know a token, the cookie wins. Every operation is infallible:
//! storage failures are logged and the in-memory state stays authoritative.

pub mod cookies;
pub mod storage;

use crate::models::{Profile, User, MAX_PROFILES};
use cookies::{token_cookie, CookieStore, FileCookieStore, MemoryCookieStore, TOKEN_COOKIE};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use storage::{FileStorage, MemoryStorage, SessionStorage};

/// Storage key of the persisted snapshot.
pub const STORAGE_KEY: &str = "auth-storage";

/// Snapshot format version.
const STORAGE_VERSION: u32 = 0;

/// Client-side view of the current session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub profiles: Vec<Profile>,
    pub selected_profile: Option<Profile>,
    pub access_token: Option<String>,
    /// An explicit profile choice was made since this process started.
    pub profile_chosen_this_session: bool,
}

impl Session {
    /// Both a token and a user are present.
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && self.user.is_some()
    }

    /// Logged in with several profiles and none selected yet.
    ///
    /// A single profile never needs a choice; callers auto-select it.
    pub fn needs_profile_selection(&self) -> bool {
        self.is_authenticated() && self.profiles.len() > 1 && self.selected_profile.is_none()
    }

    /// Logged in with several profiles but no choice made this session,
    /// even if a selection was restored from storage.
    pub fn should_confirm_profile(&self) -> bool {
        self.is_authenticated() && self.profiles.len() > 1 && !self.profile_chosen_this_session
    }
}

/// On-disk shape of the snapshot. The token is deliberately absent.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedSession {
    #[serde(default)]
    user: Option<User>,
    #[serde(default)]
    profiles: Vec<Profile>,
    #[serde(default)]
    selected_profile: Option<Profile>,
    #[serde(default)]
    has_selected_profile_this_session: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredSnapshot {
    state: PersistedSession,
    #[serde(default)]
    version: u32,
}

/// Shared, injectable session store.
pub struct SessionStore {
    state: RwLock<Session>,
    storage: Arc<dyn SessionStorage>,
    cookies: Arc<dyn CookieStore>,
}

impl SessionStore {
    /// Create a store over the given backends and restore any saved state.
    pub fn open(storage: Arc<dyn SessionStorage>, cookies: Arc<dyn CookieStore>) -> Self {
        let store = Self {
            state: RwLock::new(Session::default()),
            storage,
            cookies,
        };
        store.rehydrate();
        store
    }

    /// Store with nothing persisted outside the process.
    pub fn in_memory() -> Self {
        Self::open(
            Arc::new(MemoryStorage::new()),
            Arc::new(MemoryCookieStore::new()),
        )
    }

    /// Store persisted under `dir` (snapshot file plus cookie jar).
    pub fn on_disk<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self::open(
            Arc::new(FileStorage::new(dir)),
            Arc::new(FileCookieStore::open(dir.join("cookies.txt"))),
        )
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ─── Setters ─────────────────────────────────────────────────────────────

    pub fn set_user(&self, user: Option<User>) {
        let mut state = self.write();
        state.user = user;
        self.persist(&state);
    }

    pub fn set_profiles(&self, profiles: Vec<Profile>) {
        let mut state = self.write();
        state.profiles = profiles;
        self.persist(&state);
    }

    /// Set or clear the token, mirroring it into the token cookie.
    pub fn set_access_token(&self, token: Option<String>) {
        let mut state = self.write();
        match &token {
            Some(t) => self.cookies.set(token_cookie(t)),
            None => self.cookies.remove(TOKEN_COOKIE),
        }
        state.access_token = token;
    }

    /// Select the active profile and record that a choice was made.
    pub fn set_selected_profile(&self, profile: Option<Profile>) {
        let mut state = self.write();
        tracing::debug!(
            profile_id = profile.as_ref().map(|p| p.id.as_str()),
            "Selected profile"
        );
        state.selected_profile = profile;
        state.profile_chosen_this_session = true;
        self.persist(&state);
    }

    // ─── Compound operations ─────────────────────────────────────────────────

    /// Install the result of a successful login in one update.
    ///
    /// A household with exactly one profile gets it selected. Otherwise a
    /// previously selected profile survives only if it is still listed, and
    /// is replaced by the freshly returned copy.
    pub fn apply_login(&self, token: String, user: User, profiles: Vec<Profile>) {
        let mut state = self.write();
        self.cookies.set(token_cookie(&token));

        let selected = if profiles.len() == 1 {
            state.profile_chosen_this_session = true;
            profiles.first().cloned()
        } else {
            state
                .selected_profile
                .take()
                .and_then(|sel| profiles.iter().find(|p| p.id == sel.id).cloned())
        };

        tracing::info!(
            user_id = %user.id,
            profiles = profiles.len(),
            auto_selected = selected.is_some() && profiles.len() == 1,
            "Login applied to session"
        );

        state.access_token = Some(token);
        state.user = Some(user);
        state.profiles = profiles;
        state.selected_profile = selected;
        self.persist(&state);
    }

    /// Select a listed profile by id. Returns `false` for unknown ids.
    pub fn switch_profile(&self, profile_id: &str) -> bool {
        let mut state = self.write();
        let Some(profile) = state.profiles.iter().find(|p| p.id == profile_id).cloned() else {
            tracing::warn!(profile_id, "Ignoring switch to unknown profile");
            return false;
        };

        tracing::info!(profile_id, "Switched active profile");
        state.selected_profile = Some(profile);
        state.profile_chosen_this_session = true;
        self.persist(&state);
        true
    }

    /// Insert or replace a profile, keeping the selected copy in sync.
    pub fn upsert_profile(&self, profile: Profile) {
        let mut state = self.write();
        match state.profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => *existing = profile.clone(),
            None => state.profiles.push(profile.clone()),
        }
        if let Some(selected) = state.selected_profile.as_mut() {
            if selected.id == profile.id {
                *selected = profile;
            }
        }
        self.persist(&state);
    }

    /// Clear the cookie, the saved snapshot and every session field in a
    /// single update.
    pub fn logout(&self) {
        let mut state = self.write();
        self.cookies.remove(TOKEN_COOKIE);
        *state = Session::default();
        if let Err(e) = self.storage.remove_item(STORAGE_KEY) {
            tracing::warn!(error = %e, "Failed to remove session snapshot");
        }
        tracing::info!("Session cleared");
    }

    /// Restore the snapshot and reconcile the token from the cookie.
    ///
    /// Cookie wins when present. The same-session choice flag is always
    /// reset, so a restored selection still has to be confirmed.
    pub fn rehydrate(&self) {
        let persisted = self.load_snapshot();
        let mut state = self.write();

        let cookie_token = self.cookies.get(TOKEN_COOKIE);
        if cookie_token.is_some() {
            state.access_token = cookie_token;
        }

        state.user = persisted.user;
        state.profiles = persisted.profiles;
        state.selected_profile = persisted.selected_profile;
        state.profile_chosen_this_session = false;

        // The selection must name a listed profile of a restored user.
        if let Some(selected) = state.selected_profile.take() {
            let listed = state
                .user
                .as_ref()
                .and_then(|_| state.profiles.iter().find(|p| p.id == selected.id))
                .cloned();
            if listed.is_none() {
                tracing::debug!(profile_id = %selected.id, "Dropping orphaned profile selection");
            }
            state.selected_profile = listed;
        }

        tracing::debug!(
            has_token = state.access_token.is_some(),
            has_user = state.user.is_some(),
            profiles = state.profiles.len(),
            "Session rehydrated"
        );
    }

    // ─── Queries ─────────────────────────────────────────────────────────────

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    pub fn needs_profile_selection(&self) -> bool {
        self.read().needs_profile_selection()
    }

    pub fn should_confirm_profile(&self) -> bool {
        self.read().should_confirm_profile()
    }

    /// The household is below the backend's profile limit.
    pub fn can_add_family_member(&self) -> bool {
        self.read().profiles.len() < MAX_PROFILES
    }

    /// Consistent copy of the whole session.
    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.read().user.clone()
    }

    pub fn profiles(&self) -> Vec<Profile> {
        self.read().profiles.clone()
    }

    pub fn selected_profile(&self) -> Option<Profile> {
        self.read().selected_profile.clone()
    }

    pub fn selected_profile_id(&self) -> Option<String> {
        self.read().selected_profile.as_ref().map(|p| p.id.clone())
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().access_token.clone()
    }

    /// Token as currently stored in the cookie jar.
    pub fn cookie_token(&self) -> Option<String> {
        self.cookies.get(TOKEN_COOKIE)
    }

    // ─── Persistence ─────────────────────────────────────────────────────────

    fn persist(&self, state: &Session) {
        let snapshot = StoredSnapshot {
            state: PersistedSession {
                user: state.user.clone(),
                profiles: state.profiles.clone(),
                selected_profile: state.selected_profile.clone(),
                has_selected_profile_this_session: state.profile_chosen_this_session,
            },
            version: STORAGE_VERSION,
        };

        let result = serde_json::to_string(&snapshot)
            .map_err(std::io::Error::other)
            .and_then(|json| self.storage.set_item(STORAGE_KEY, &json));

        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to persist session snapshot");
        }
    }

    fn load_snapshot(&self) -> PersistedSession {
        let raw = match self.storage.get_item(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return PersistedSession::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session snapshot");
                return PersistedSession::default();
            }
        };

        match serde_json::from_str::<StoredSnapshot>(&raw) {
            Ok(snapshot) => snapshot.state,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable session snapshot");
                PersistedSession::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            phone_number: "9876543210".to_string(),
            country_code: "+91".to_string(),
            name: "Asha".to_string(),
            email: None,
            age: None,
            gender: None,
            city: None,
            subscription_status: None,
        }
    }

    fn profile(id: &str) -> Profile {
        Profile {
            id: id.to_string(),
            name: format!("Member {id}"),
            relationship: "self".to_string(),
            age: None,
            gender: None,
            level: 1,
            lifestyle: None,
            stats: Default::default(),
        }
    }

    #[test]
    fn test_needs_profile_selection_truth_table() {
        for has_token in [false, true] {
            for has_user in [false, true] {
                for count in 0..=3usize {
                    for selected in [false, true] {
                        let session = Session {
                            user: has_user.then(user),
                            profiles: (0..count).map(|i| profile(&format!("p{i}"))).collect(),
                            selected_profile: selected.then(|| profile("p0")),
                            access_token: has_token.then(|| "t".to_string()),
                            profile_chosen_this_session: false,
                        };
                        let expected = has_token && has_user && count > 1 && !selected;
                        assert_eq!(
                            session.needs_profile_selection(),
                            expected,
                            "token={has_token} user={has_user} count={count} selected={selected}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_apply_login_auto_selects_single_profile() {
        let store = SessionStore::in_memory();
        store.apply_login("tok".to_string(), user(), vec![profile("p1")]);

        assert_eq!(store.selected_profile_id().as_deref(), Some("p1"));
        assert!(!store.needs_profile_selection());
        assert!(!store.should_confirm_profile());
        assert_eq!(store.cookie_token().as_deref(), Some("tok"));
    }

    #[test]
    fn test_apply_login_drops_stale_selection() {
        let store = SessionStore::in_memory();
        store.set_selected_profile(Some(profile("gone")));
        store.apply_login(
            "tok".to_string(),
            user(),
            vec![profile("p1"), profile("p2")],
        );

        assert_eq!(store.selected_profile(), None);
        assert!(store.needs_profile_selection());
    }

    #[test]
    fn test_relogin_refreshes_selected_profile() {
        let store = SessionStore::in_memory();
        let mut old = profile("p1");
        old.name = "Old".to_string();
        old.stats.total_points = 10;
        store.apply_login("tok".to_string(), user(), vec![old, profile("p2")]);
        assert!(store.switch_profile("p1"));

        let mut fresh = profile("p1");
        fresh.name = "Fresh".to_string();
        fresh.stats.total_points = 500;
        store.apply_login("tok2".to_string(), user(), vec![fresh.clone(), profile("p2")]);

        assert_eq!(store.selected_profile(), Some(fresh));
    }

    #[test]
    fn test_logout_removes_snapshot() {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::open(storage.clone(), Arc::new(MemoryCookieStore::new()));
        store.apply_login("tok".to_string(), user(), vec![profile("p1")]);
        assert!(storage.get_item(STORAGE_KEY).unwrap().is_some());

        store.logout();
        assert_eq!(storage.get_item(STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_switch_profile_unknown_id() {
        let store = SessionStore::in_memory();
        store.apply_login(
            "tok".to_string(),
            user(),
            vec![profile("p1"), profile("p2")],
        );

        assert!(!store.switch_profile("nope"));
        assert!(store.needs_profile_selection());

        assert!(store.switch_profile("p2"));
        assert_eq!(store.selected_profile_id().as_deref(), Some("p2"));
        assert!(!store.should_confirm_profile());
    }

    #[test]
    fn test_upsert_profile_updates_selected_copy() {
        let store = SessionStore::in_memory();
        store.apply_login("tok".to_string(), user(), vec![profile("p1")]);

        let mut renamed = profile("p1");
        renamed.name = "Renamed".to_string();
        store.upsert_profile(renamed);
        store.upsert_profile(profile("p2"));

        assert_eq!(store.profiles().len(), 2);
        assert_eq!(store.selected_profile().unwrap().name, "Renamed");
    }

    #[test]
    fn test_can_add_family_member_limit() {
        let store = SessionStore::in_memory();
        store.set_profiles((0..MAX_PROFILES - 1).map(|i| profile(&i.to_string())).collect());
        assert!(store.can_add_family_member());

        store.upsert_profile(profile("last"));
        assert!(!store.can_add_family_member());
    }

    #[test]
    fn test_unreadable_snapshot_is_discarded() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(STORAGE_KEY, "not json").unwrap();

        let store = SessionStore::open(storage, Arc::new(MemoryCookieStore::new()));
        assert_eq!(store.snapshot(), Session::default());
    }
}
