//! Denylist of hosts that refuse to be framed.

use std::collections::BTreeSet;

/// Hosts blocked from direct embedding unless configured otherwise.
pub const DEFAULT_BLOCKED_SITES: &[&str] = &[
    "google.com",
    "youtube.com",
    "facebook.com",
    "twitter.com",
    "x.com",
    "instagram.com",
    "linkedin.com",
    "netflix.com",
    "amazon.com",
];

/// Decides whether an address should be rerouted to reader mode.
///
/// Matching is a substring test against the host portion, so subdomains of a
/// listed site are gated as well.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteGate {
    blocked: BTreeSet<String>,
}

impl SiteGate {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let blocked = entries
            .into_iter()
            .map(|entry| entry.as_ref().trim().to_ascii_lowercase())
            .filter(|entry| !entry.is_empty())
            .collect();
        Self { blocked }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_BLOCKED_SITES.iter().copied())
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.blocked.iter().map(String::as_str)
    }

    pub fn is_gated(&self, url: &str) -> bool {
        let host = host_portion(url).to_ascii_lowercase();
        self.blocked.iter().any(|blocked| host.contains(blocked.as_str()))
    }
}

fn host_portion(url: &str) -> &str {
    let rest = match url.split_once("://") {
        Some((scheme, rest))
            if scheme.eq_ignore_ascii_case("https") || scheme.eq_ignore_ascii_case("http") =>
        {
            rest
        }
        _ => url,
    };
    rest.split('/').next().unwrap_or_default()
}
