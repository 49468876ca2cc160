use crate::role::Role;

/// Navigable views the session layer can redirect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Login,
    AdminDashboard,
    TeacherDashboard,
    StudentDashboard,
}

impl View {
    /// Route path for the router integration.
    pub fn path(&self) -> &'static str {
        match self {
            View::Home => "/",
            View::Login => "/auth/login",
            View::AdminDashboard => "/admin/dashboard",
            View::TeacherDashboard => "/teachers",
            View::StudentDashboard => "/alumno/dashboard",
        }
    }
}

/// Canonical landing view for a role — used after login and when an
/// authenticated user requests a public-only view.
///
/// Total over the role enumeration; `Guest` lands on the public home view,
/// so unexpected role data can never strand the user on a blank screen.
pub fn landing_for(role: Role) -> View {
    match role {
        Role::SuperAdmin | Role::Admin => View::AdminDashboard,
        Role::Docente => View::TeacherDashboard,
        Role::Alumno => View::StudentDashboard,
        Role::Guest => View::Home,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_has_a_landing_view() {
        assert_eq!(landing_for(Role::SuperAdmin), View::AdminDashboard);
        assert_eq!(landing_for(Role::Admin), View::AdminDashboard);
        assert_eq!(landing_for(Role::Docente), View::TeacherDashboard);
        assert_eq!(landing_for(Role::Alumno), View::StudentDashboard);
        assert_eq!(landing_for(Role::Guest), View::Home);
    }

    #[test]
    fn paths_are_non_empty() {
        for view in [
            View::Home,
            View::Login,
            View::AdminDashboard,
            View::TeacherDashboard,
            View::StudentDashboard,
        ] {
            assert!(view.path().starts_with('/'));
        }
    }
}
