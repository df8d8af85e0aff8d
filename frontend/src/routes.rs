use std::mem::discriminant;
use shared::{Role, Session};

/// Social server whose attendances are being listed
#[derive(Clone, Debug, PartialEq)]
pub struct AttendanceFilter {
    pub server_id: i64,
    pub server_name: String,
}

/// Screens of the console. There is no URL routing; the root component keeps
/// the current page in state.
#[derive(Clone, Debug, PartialEq)]
pub enum AppPage {
    Attendance,
    Login,
    Parks,
    Programs,
    SocialServers,
    Attendances(Option<AttendanceFilter>),
    Users,
}

impl AppPage {
    pub fn title(&self) -> &'static str {
        match self {
            AppPage::Attendance => "Registro de Asistencia",
            AppPage::Login => "Iniciar Sesión",
            AppPage::Parks => "Parques",
            AppPage::Programs => "Programas",
            AppPage::SocialServers => "Servidores Sociales",
            AppPage::Attendances(_) => "Asistencias",
            AppPage::Users => "Usuarios",
        }
    }

    fn is_public(&self) -> bool {
        matches!(self, AppPage::Attendance | AppPage::Login)
    }

    fn minimum_role(&self) -> Option<Role> {
        match self {
            AppPage::Attendance | AppPage::Login => None,
            AppPage::Parks | AppPage::Programs => Some(Role::Admin),
            AppPage::SocialServers | AppPage::Attendances(_) | AppPage::Users => Some(Role::SuperAdmin),
        }
    }

    pub fn allowed_for(&self, session: Option<&Session>) -> bool {
        match (self.minimum_role(), session) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(Role::Admin), Some(_)) => true,
            (Some(Role::SuperAdmin), Some(session)) => session.is_super_admin(),
        }
    }

    /// Where a visitor starts
    pub fn landing(session: Option<&Session>) -> AppPage {
        match session {
            Some(_) => AppPage::Programs,
            None => AppPage::Attendance,
        }
    }

    /// The page to actually show: signed-in operators skip the public pages and
    /// nobody lands on a page their role cannot open
    pub fn resolve(self, session: Option<&Session>) -> AppPage {
        let redirect = match session {
            Some(_) => self.is_public() || !self.allowed_for(session),
            None => !self.is_public(),
        };
        if redirect {
            AppPage::landing(session)
        } else {
            self
        }
    }

    pub fn menu_for(session: &Session) -> Vec<AppPage> {
        [
            AppPage::Parks,
            AppPage::Programs,
            AppPage::SocialServers,
            AppPage::Attendances(None),
            AppPage::Users,
        ]
        .into_iter()
        .filter(|page| page.allowed_for(Some(session)))
        .collect()
    }

    /// Same screen, ignoring any filter it carries
    pub fn same_section(&self, other: &AppPage) -> bool {
        discriminant(self) == discriminant(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role) -> Session {
        Session {
            token: "t".to_string(),
            email: "ops@parques.mx".to_string(),
            name: "Operador".to_string(),
            role,
        }
    }

    #[test]
    fn test_anonymous_visitors_only_see_public_pages() {
        assert_eq!(AppPage::Programs.resolve(None), AppPage::Attendance);
        assert_eq!(AppPage::Login.resolve(None), AppPage::Login);
        assert_eq!(AppPage::landing(None), AppPage::Attendance);
    }

    #[test]
    fn test_signed_in_operators_skip_public_pages() {
        let admin = session(Role::Admin);
        assert_eq!(AppPage::Login.resolve(Some(&admin)), AppPage::Programs);
        assert_eq!(AppPage::Parks.resolve(Some(&admin)), AppPage::Parks);
    }

    #[test]
    fn test_admin_cannot_open_super_admin_pages() {
        let admin = session(Role::Admin);
        assert_eq!(AppPage::Users.resolve(Some(&admin)), AppPage::Programs);
        assert_eq!(AppPage::menu_for(&admin), vec![AppPage::Parks, AppPage::Programs]);
    }

    #[test]
    fn test_super_admin_menu() {
        let root = session(Role::SuperAdmin);
        let menu = AppPage::menu_for(&root);
        assert_eq!(menu.len(), 5);
        assert!(menu.contains(&AppPage::Users));
    }

    #[test]
    fn test_same_section_ignores_filter() {
        let filtered = AppPage::Attendances(Some(AttendanceFilter {
            server_id: 3,
            server_name: "Ana".to_string(),
        }));
        assert!(filtered.same_section(&AppPage::Attendances(None)));
        assert!(!filtered.same_section(&AppPage::Users));
    }
}
