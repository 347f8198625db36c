use super::session_token::SessionToken;

pub const ACCESS_PATH: &str = "/access";

const OPEN_PREFIXES: &[&str] = &["/_next", "/audio", "/api/license", "/api/logout"];
const OPEN_PATHS: &[&str] = &[ACCESS_PATH, "/favicon.ico"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect(String),
}

/// Path-based gate: everything outside the allow-list needs a live session.
pub struct AccessGate {
    max_age_days: u64,
}

impl AccessGate {
    pub fn new(max_age_days: u64) -> Self {
        Self { max_age_days }
    }

    pub fn is_open_path(path: &str) -> bool {
        OPEN_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) || OPEN_PATHS.contains(&path)
    }

    pub fn check(&self, path: &str, session: Option<&str>, now: i64) -> GateDecision {
        if Self::is_open_path(path) {
            return GateDecision::Allow;
        }

        let valid = session
            .and_then(SessionToken::parse)
            .is_some_and(|token| !token.is_expired(now, self.max_age_days));

        if valid {
            GateDecision::Allow
        } else {
            log::debug!("No valid session for '{}', redirecting", path);
            GateDecision::Redirect(ACCESS_PATH.to_string())
        }
    }
}
