/// Path classification, in increasing order of precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RouteKind {
    Public,
    AuthOnly,
    Protected,
    Admin,
}

impl RouteKind {
    /// Admin routes are always protected.
    pub fn requires_authentication(&self) -> bool {
        matches!(self, RouteKind::Protected | RouteKind::Admin)
    }
}

/// Ordered table of (prefix set, classification) rules.
///
/// Matching is a plain string-prefix test. When several rules match, the
/// highest-precedence kind wins: admin over protected over auth-only.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    rules: Vec<(RouteKind, Vec<String>)>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule<I, S>(mut self, kind: RouteKind, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules
            .push((kind, prefixes.into_iter().map(Into::into).collect()));
        self
    }

    pub fn classify(&self, path: &str) -> RouteKind {
        self.rules
            .iter()
            .filter(|(_, prefixes)| prefixes.iter().any(|prefix| path.starts_with(prefix.as_str())))
            .map(|(kind, _)| *kind)
            .max()
            .unwrap_or(RouteKind::Public)
    }

    /// The platform's route layout.
    pub fn platform() -> Self {
        Self::new()
            .with_rule(RouteKind::Admin, ["/admin"])
            .with_rule(RouteKind::Protected, ["/dashboard", "/admin", "/profile"])
            .with_rule(RouteKind::AuthOnly, ["/auth/login", "/auth/register"])
    }
}
