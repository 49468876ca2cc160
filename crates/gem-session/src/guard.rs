//! Navigation guards.
//!
//! The role gate decides whether a requested view may be entered; it only
//! returns a boolean and never navigates or mutates the session. Redirecting
//! on denial is the router integration's job, using
//! [`deny_redirect`] / [`public_redirect`].

use crate::redirect::{View, landing_for};
use crate::role::Role;
use crate::session::SessionStore;

/// Decide whether the current session may enter a view guarded by the
/// given allow-list.
///
/// An unauthenticated session is denied unconditionally, whatever the
/// allow-list — `Guest` can never satisfy a protected route. An
/// authenticated session is permitted iff its role is in the allow-list.
pub fn can_enter(store: &SessionStore, allowed: &[Role]) -> bool {
    if !store.is_authenticated() {
        return false;
    }
    let permitted = store.has_any_role(allowed);
    if !permitted {
        tracing::warn!(
            role = store.current_role().as_str(),
            ?allowed,
            "access denied"
        );
    }
    permitted
}

/// Where to send a caller whose navigation the gate denied: authenticated
/// users go to their own landing view, everyone else to the login page.
pub fn deny_redirect(store: &SessionStore) -> View {
    match store.current_role() {
        Role::Guest => View::Login,
        role => landing_for(role),
    }
}

/// Guard for public-only views (e.g. the login page itself).
///
/// Returns the landing view an already-authenticated user should be sent
/// to instead, or `None` if the public view may be shown.
pub fn public_redirect(store: &SessionStore) -> Option<View> {
    if store.is_authenticated() {
        Some(landing_for(store.current_role()))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::user::User;
    use std::sync::Arc;

    fn store_with(role: Role) -> SessionStore {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        store.commit(
            User {
                id: 1,
                curp: "XXXX000101HXXXXX01".to_string(),
                email: None,
                role,
                first_name: "X".to_string(),
                paternal_surname: "Y".to_string(),
                maternal_surname: None,
                phone: None,
                is_active: true,
                must_change_password: false,
                last_login: None,
            },
            "jwt".to_string(),
        );
        store
    }

    #[test]
    fn unauthenticated_is_denied_for_any_allow_list() {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        assert!(!can_enter(&store, &[]));
        assert!(!can_enter(&store, &[Role::Alumno]));
        assert!(!can_enter(&store, &[Role::Admin, Role::SuperAdmin]));
        // Even a nonsensical allow-list containing Guest stays denied
        assert!(!can_enter(&store, &[Role::Guest]));
    }

    #[test]
    fn authenticated_is_permitted_iff_role_is_allowed() {
        let docente = store_with(Role::Docente);
        assert!(can_enter(&docente, &[Role::Docente]));
        assert!(can_enter(&docente, &[Role::Admin, Role::Docente]));
        assert!(!can_enter(&docente, &[Role::Admin, Role::SuperAdmin]));
        assert!(!can_enter(&docente, &[]));

        let alumno = store_with(Role::Alumno);
        assert!(!can_enter(&alumno, &[Role::Admin, Role::SuperAdmin]));
    }

    #[test]
    fn gate_does_not_mutate_the_session() {
        let store = store_with(Role::Alumno);
        can_enter(&store, &[Role::Admin]);
        assert!(store.is_authenticated());
        assert_eq!(store.current_role(), Role::Alumno);
    }

    #[test]
    fn denied_callers_are_redirected_by_role() {
        assert_eq!(deny_redirect(&store_with(Role::Admin)), View::AdminDashboard);
        assert_eq!(
            deny_redirect(&store_with(Role::Alumno)),
            View::StudentDashboard
        );
        let guest = SessionStore::new(Arc::new(MemoryStorage::new()));
        assert_eq!(deny_redirect(&guest), View::Login);
    }

    #[test]
    fn public_views_bounce_authenticated_users() {
        assert_eq!(
            public_redirect(&store_with(Role::Docente)),
            Some(View::TeacherDashboard)
        );
        let guest = SessionStore::new(Arc::new(MemoryStorage::new()));
        assert_eq!(public_redirect(&guest), None);
    }
}
