//! Prefix rules deciding which requests go upstream
//!
//! A rule matches at a path segment boundary: `/bills` matches `/bills`
//! and `/bills/7/items`, never `/billsplitter`. Rules are tried in order
//! and the first match wins.

use reqwest::Url;

use crate::config::{ProxyConfig, ProxyRuleConfig};
use crate::proxy::error::ProxyError;

/// A validated forwarding rule
#[derive(Debug, Clone)]
pub struct ProxyRule {
    prefix: String,
    target: Url,
    authority: String,
    change_origin: bool,
}

impl ProxyRule {
    pub fn new(prefix: &str, target: &str, change_origin: bool) -> Result<Self, ProxyError> {
        if !prefix.starts_with('/') {
            return Err(ProxyError::InvalidPrefix(prefix.to_string()));
        }

        let invalid = |reason: &str| ProxyError::InvalidTarget {
            target: target.to_string(),
            reason: reason.to_string(),
        };

        let url = Url::parse(target).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        let host = url.host_str().ok_or_else(|| invalid("missing host"))?;
        let authority = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        // "/" stays "/", everything else loses trailing slashes
        let trimmed = prefix.trim_end_matches('/');
        let prefix = if trimmed.is_empty() { "/" } else { trimmed };

        Ok(Self {
            prefix: prefix.to_string(),
            target: url,
            authority,
            change_origin,
        })
    }

    pub fn from_config(config: &ProxyRuleConfig) -> Result<Self, ProxyError> {
        Self::new(&config.prefix, &config.target, config.change_origin)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `host[:port]` of the upstream, used as the rewritten Host header
    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn change_origin(&self) -> bool {
        self.change_origin
    }

    pub fn matches(&self, path: &str) -> bool {
        if self.prefix == "/" {
            return true;
        }
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// Upstream URL for an incoming `path?query`. The path is kept as-is
    /// and appended to any path the target itself carries.
    pub fn upstream_url(&self, path_and_query: &str) -> String {
        let base = self.target.as_str().trim_end_matches('/');
        format!("{}{}", base, path_and_query)
    }
}

/// Ordered rule set
#[derive(Debug, Clone, Default)]
pub struct ProxyTable {
    rules: Vec<ProxyRule>,
}

impl ProxyTable {
    pub fn new(rules: Vec<ProxyRule>) -> Self {
        Self { rules }
    }

    pub fn from_config(config: &ProxyConfig) -> Result<Self, ProxyError> {
        let rules = config
            .rules
            .iter()
            .map(ProxyRule::from_config)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(rules))
    }

    /// First rule matching `path`
    pub fn match_path(&self, path: &str) -> Option<&ProxyRule> {
        self.rules.iter().find(|rule| rule.matches(path))
    }

    pub fn rules(&self) -> &[ProxyRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bills_rule() -> ProxyRule {
        ProxyRule::new("/bills", "http://10.206.104.164:8000", true).unwrap()
    }

    #[test]
    fn test_matches_segment_boundary() {
        let rule = bills_rule();
        assert!(rule.matches("/bills"));
        assert!(rule.matches("/bills/"));
        assert!(rule.matches("/bills/7/items"));
        assert!(!rule.matches("/billsplitter"));
        assert!(!rule.matches("/expenseplanner"));
        assert!(!rule.matches("/"));
    }

    #[test]
    fn test_trailing_slash_prefix() {
        let rule = ProxyRule::new("/bills/", "http://localhost:8000", true).unwrap();
        assert_eq!(rule.prefix(), "/bills");
        assert!(rule.matches("/bills"));
    }

    #[test]
    fn test_upstream_url() {
        let rule = bills_rule();
        assert_eq!(rule.authority(), "10.206.104.164:8000");
        assert_eq!(
            rule.upstream_url("/bills?user_id=alice"),
            "http://10.206.104.164:8000/bills?user_id=alice"
        );

        let nested = ProxyRule::new("/bills", "http://backend/api/", false).unwrap();
        assert_eq!(nested.authority(), "backend");
        assert_eq!(nested.upstream_url("/bills/1"), "http://backend/api/bills/1");
    }

    #[test]
    fn test_rejects_bad_rules() {
        assert!(matches!(
            ProxyRule::new("bills", "http://localhost", true),
            Err(ProxyError::InvalidPrefix(_))
        ));
        assert!(matches!(
            ProxyRule::new("/bills", "not a url", true),
            Err(ProxyError::InvalidTarget { .. })
        ));
        assert!(matches!(
            ProxyRule::new("/bills", "ftp://files.example.com", true),
            Err(ProxyError::InvalidTarget { .. })
        ));
    }

    #[test]
    fn test_first_match_wins() {
        let table = ProxyTable::new(vec![
            ProxyRule::new("/bills", "http://a:1", true).unwrap(),
            ProxyRule::new("/", "http://b:2", true).unwrap(),
        ]);

        assert_eq!(table.match_path("/bills/1").unwrap().authority(), "a:1");
        assert_eq!(table.match_path("/billsplitter").unwrap().authority(), "b:2");
    }

    #[test]
    fn test_default_config_table() {
        let table = ProxyTable::from_config(&ProxyConfig::default()).unwrap();
        assert_eq!(table.rules().len(), 4);
        assert!(table.match_path("/leaderboard").is_some());
        assert!(table.match_path("/friends/a@b.c").is_some());
        assert!(table.match_path("/socialaccountability").is_none());
        assert!(table.match_path("/billsplitter").is_none());
    }
}
