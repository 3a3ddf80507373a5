/// Prefixes that lead into authenticated areas and are always refused
pub const AUTHENTICATED_PREFIXES: [&str; 2] = ["/login", "/dashboard"];

/// Why a path may or may not be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    /// Matched one of the configured robots.txt disallow rules
    Disallowed(String),
    /// Points into a logged-in area of the site
    Authenticated(&'static str),
}

/// Static path policy built once from the configured disallow list.
///
/// This never fetches robots.txt; the rules are a fixed snapshot.
#[derive(Debug, Clone, Default)]
pub struct DisallowPolicy {
    prefixes: Vec<String>,
}

impl DisallowPolicy {
    /// Create a policy from a list of disallowed path prefixes
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Classify a path without side effects
    pub fn check(&self, path: &str) -> Verdict {
        if let Some(rule) = self.prefixes.iter().find(|p| path.starts_with(p.as_str())) {
            return Verdict::Disallowed(rule.clone());
        }

        if let Some(prefix) = AUTHENTICATED_PREFIXES
            .iter()
            .find(|p| path.starts_with(**p))
        {
            return Verdict::Authenticated(*prefix);
        }

        Verdict::Allowed
    }

    /// Determine if a path may be fetched, logging the reason on rejection
    pub fn is_allowed(&self, path: &str) -> bool {
        match self.check(path) {
            Verdict::Allowed => true,
            Verdict::Disallowed(rule) => {
                ::log::warn!("BLOCKED by robots.txt rule {}: {}", rule, path);
                false
            }
            Verdict::Authenticated(prefix) => {
                ::log::warn!("BLOCKED (authenticated area {}): {}", prefix, path);
                false
            }
        }
    }
}
