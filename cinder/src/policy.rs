use std::time::Duration;

/// A named expiration policy: a semantic lifetime applied to a key at call
/// time. Policies are immutable rows in [`CATALOG`]; adding one means adding
/// a row, not a code path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpirationPolicy {
    name: &'static str,
    ttl: Duration,
}

/// Unread-message feeds are kept for 30 days.
pub const UNREAD_MESSAGES: ExpirationPolicy = ExpirationPolicy {
    name: "unread-messages",
    ttl: Duration::from_secs(30 * 24 * 60 * 60),
};

pub const CATALOG: &[ExpirationPolicy] = &[UNREAD_MESSAGES];

impl ExpirationPolicy {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn lookup(name: &str) -> Option<ExpirationPolicy> {
        CATALOG.iter().find(|p| p.name == name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_catalog_entries() {
        let policy = ExpirationPolicy::lookup("unread-messages").unwrap();
        assert_eq!(policy, UNREAD_MESSAGES);
        assert_eq!(policy.ttl(), Duration::from_secs(30 * 24 * 60 * 60));
    }

    #[test]
    fn lookup_misses_unknown_names() {
        assert!(ExpirationPolicy::lookup("session").is_none());
    }
}
