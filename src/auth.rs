use tracing::{debug, warn};

/// Per-run authentication state, passed explicitly to whatever renders views.
#[derive(Debug, Default)]
pub struct Session {
    authenticated: bool,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// A session that needs no password because none is configured.
    pub fn open() -> Self {
        Session { authenticated: true }
    }

    pub fn login(&mut self, attempt: &str, expected: &str) -> bool {
        self.authenticated = attempt == expected;
        if self.authenticated {
            debug!("dashboard session authenticated");
        } else {
            warn!("rejected dashboard password");
        }
        self.authenticated
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_logout_transitions() {
        let mut session = Session::new();
        assert!(!session.is_authenticated());

        assert!(!session.login("wrong", "hunter2"));
        assert!(!session.is_authenticated());

        assert!(session.login("hunter2", "hunter2"));
        assert!(session.is_authenticated());

        session.logout();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn failed_login_drops_existing_session() {
        let mut session = Session::open();
        assert!(session.is_authenticated());
        session.login("nope", "hunter2");
        assert!(!session.is_authenticated());
    }
}
