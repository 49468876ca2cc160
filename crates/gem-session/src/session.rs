//! The session store — single source of truth for "who is the caller".
//!
//! State is mutated only through the enumerated operations ([`restore`],
//! [`login`], [`commit`], [`clear`]); everything else reads through
//! accessors. Both persisted entries are written on every commit and the
//! in-memory state is replaced under one lock, so no reader observes a
//! half-updated session. Registered listeners are invoked synchronously,
//! in registration order, after every successful commit or clear.
//!
//! [`restore`]: SessionStore::restore
//! [`login`]: SessionStore::login
//! [`commit`]: SessionStore::commit
//! [`clear`]: SessionStore::clear

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::client::{AuthBackend, LoginOutcome};
use crate::error::SessionError;
use crate::role::Role;
use crate::storage::{SessionStorage, TOKEN_KEY, USER_KEY};
use crate::user::User;

/// The client's current belief about who is logged in.
///
/// `authenticated` holds iff both the identity and the credential are
/// present and the identity is active.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub authenticated: bool,
    pub user: Option<User>,
    pub token: Option<String>,
}

type Listener = Box<dyn Fn(&AuthState) + Send + Sync>;

/// Owner of the session state, synchronized with durable storage so a
/// restart does not force re-login.
///
/// Cloning is cheap; clones share the same state and listener list.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    storage: Arc<dyn SessionStorage>,
    state: RwLock<AuthState>,
    listeners: Mutex<Vec<Listener>>,
}

impl SessionStore {
    /// Create an empty store backed by the given storage.
    ///
    /// Call [`restore`](Self::restore) afterwards to pick up a persisted
    /// session.
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        SessionStore {
            inner: Arc::new(SessionInner {
                storage,
                state: RwLock::new(AuthState::default()),
                listeners: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Restore a previously persisted session.
    ///
    /// Fails soft: a missing entry leaves the session empty, and a
    /// corrupted identity is discarded (and removed from storage) without
    /// surfacing an error.
    pub fn restore(&self) {
        let token = self.inner.storage.read(TOKEN_KEY);
        let raw_user = self.inner.storage.read(USER_KEY);
        let (Some(token), Some(raw_user)) = (token, raw_user) else {
            tracing::debug!("no persisted session found");
            return;
        };

        let user: User = match serde_json::from_str(&raw_user) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "discarding corrupted persisted session");
                self.inner.storage.remove(TOKEN_KEY);
                self.inner.storage.remove(USER_KEY);
                return;
            }
        };

        let authenticated = user.is_active;
        {
            let mut state = self.inner.state.write();
            *state = AuthState {
                authenticated,
                user: Some(user),
                token: Some(token),
            };
        }
        tracing::debug!(authenticated, "session restored from storage");
        self.notify();
    }

    /// Exchange credentials with the backend and commit the session.
    ///
    /// Network failures and rejected logins propagate to the caller;
    /// nothing is committed unless the exchange fully succeeds.
    pub async fn login(
        &self,
        backend: &dyn AuthBackend,
        curp: &str,
        password: &str,
    ) -> Result<User, SessionError> {
        let LoginOutcome { user, token } = backend.login(curp, password).await?;
        if !user.is_active {
            return Err(SessionError::InactiveAccount);
        }
        tracing::info!(curp = %user.curp, role = user.role.as_str(), "login succeeded");
        self.commit(user.clone(), token);
        Ok(user)
    }

    /// Persist the identity and credential and update the in-memory state.
    ///
    /// Storage write failures are logged and swallowed — the in-memory
    /// session is updated regardless, so the current process keeps working
    /// and only the next restart loses the session.
    pub fn commit(&self, user: User, token: String) {
        match serde_json::to_string(&user) {
            Ok(serialized) => {
                if let Err(e) = self.inner.storage.write(TOKEN_KEY, &token) {
                    tracing::warn!(error = %e, "failed to persist credential");
                }
                if let Err(e) = self.inner.storage.write(USER_KEY, &serialized) {
                    tracing::warn!(error = %e, "failed to persist identity");
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to serialize identity"),
        }

        let authenticated = user.is_active;
        {
            let mut state = self.inner.state.write();
            *state = AuthState {
                authenticated,
                user: Some(user),
                token: Some(token),
            };
        }
        self.notify();
    }

    /// Remove the persisted entries and reset the session to empty.
    pub fn clear(&self) {
        self.inner.storage.remove(TOKEN_KEY);
        self.inner.storage.remove(USER_KEY);
        *self.inner.state.write() = AuthState::default();
        tracing::debug!("session cleared");
        self.notify();
    }

    // ── Accessors ──

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.read().authenticated
    }

    pub fn current_user(&self) -> Option<User> {
        self.inner.state.read().user.clone()
    }

    /// The stored bearer credential, if any.
    pub fn token(&self) -> Option<String> {
        self.inner.state.read().token.clone()
    }

    /// The session's role, or `Guest` when there is no authenticated
    /// session.
    pub fn current_role(&self) -> Role {
        let state = self.inner.state.read();
        if !state.authenticated {
            return Role::Guest;
        }
        state.user.as_ref().map(|u| u.role).unwrap_or(Role::Guest)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.current_role() == role
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.current_role())
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> AuthState {
        self.inner.state.read().clone()
    }

    /// Register a listener invoked synchronously after every successful
    /// commit, clear, or restore that yields a session.
    pub fn subscribe(&self, listener: impl Fn(&AuthState) + Send + Sync + 'static) {
        self.inner.listeners.lock().push(Box::new(listener));
    }

    fn notify(&self) {
        let state = self.snapshot();
        for listener in self.inner.listeners.lock().iter() {
            listener(&state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn store() -> SessionStore {
        SessionStore::new(Arc::new(MemoryStorage::new()))
    }

    fn docente() -> User {
        User {
            id: 3,
            curp: "DOCE900101HDFXXX03".to_string(),
            email: None,
            role: Role::Docente,
            first_name: "María".to_string(),
            paternal_surname: "González".to_string(),
            maternal_surname: None,
            phone: None,
            is_active: true,
            must_change_password: false,
            last_login: None,
        }
    }

    #[test]
    fn starts_empty() {
        let store = store();
        assert!(!store.is_authenticated());
        assert_eq!(store.current_role(), Role::Guest);
        assert!(store.current_user().is_none());
        assert!(store.token().is_none());
    }

    #[test]
    fn commit_then_clear() {
        let store = store();
        store.commit(docente(), "jwt-abc".to_string());

        assert!(store.is_authenticated());
        assert_eq!(store.current_role(), Role::Docente);
        assert_eq!(store.token().as_deref(), Some("jwt-abc"));

        store.clear();
        assert!(!store.is_authenticated());
        assert_eq!(store.current_role(), Role::Guest);
        assert!(store.token().is_none());
    }

    #[test]
    fn inactive_identity_is_never_authenticated() {
        let store = store();
        let mut user = docente();
        user.is_active = false;
        store.commit(user, "jwt".to_string());

        assert!(!store.is_authenticated());
        assert_eq!(store.current_role(), Role::Guest);
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let store = store();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            store.subscribe(move |_| order.lock().push(tag));
        }

        store.commit(docente(), "jwt".to_string());
        assert_eq!(*order.lock(), vec!["first", "second", "third"]);

        store.clear();
        assert_eq!(
            *order.lock(),
            vec!["first", "second", "third", "first", "second", "third"]
        );
    }

    #[test]
    fn listener_sees_committed_state() {
        let store = store();
        let seen = Arc::new(Mutex::new(Vec::new()));
        {
            let seen = Arc::clone(&seen);
            store.subscribe(move |state: &AuthState| {
                seen.lock().push((state.authenticated, state.token.clone()));
            });
        }

        store.commit(docente(), "jwt".to_string());
        store.clear();

        let seen = seen.lock();
        assert_eq!(seen[0], (true, Some("jwt".to_string())));
        assert_eq!(seen[1], (false, None));
    }
}
