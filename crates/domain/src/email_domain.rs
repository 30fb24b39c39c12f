use crate::errors::DomainError;
use std::fmt;
use std::sync::Arc;

/// Email sender domain embedded in a query name.
///
/// Normalized: lowercase, no trailing dot, at least two non-empty labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailDomain(Arc<str>);

impl EmailDomain {
    /// Parses a bare email domain such as one taken from a seed list.
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        let name = name.trim_end_matches('.').to_ascii_lowercase();
        let mut labels = 0usize;
        for label in name.split('.') {
            if label.is_empty() {
                return Err(DomainError::InvalidEmailDomain(name.clone()));
            }
            labels += 1;
        }
        if labels < 2 {
            return Err(DomainError::InvalidEmailDomain(name));
        }
        Ok(Self(name.into()))
    }

    /// Extracts the email domain from a query of the form
    /// `<email-domain>.<zone suffix>`.
    ///
    /// `zone_suffix` must already be normalized (lowercase, no trailing
    /// dot). Case and a trailing dot on the query are insignificant. A query
    /// that is just the suffix, or whose remainder has fewer than two
    /// labels, is rejected.
    pub fn from_query(raw_query: &str, zone_suffix: &str) -> Result<Self, DomainError> {
        let name = raw_query.trim_end_matches('.').to_ascii_lowercase();
        let prefix = name
            .strip_suffix(zone_suffix)
            .and_then(|rest| rest.strip_suffix('.'))
            .ok_or_else(|| DomainError::OutsideZone(name.clone()))?;
        Self::parse(prefix)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Domains whose cached health decides this domain's verdict, ordered
    /// general to specific: every suffix of the name from two labels up to
    /// the full name. `mail.corp.example.com` yields `example.com`,
    /// `corp.example.com`, `mail.corp.example.com`.
    pub fn check_chain(&self) -> impl Iterator<Item = &str> + '_ {
        let name: &str = &self.0;
        let mut starts: Vec<usize> = std::iter::once(0)
            .chain(name.match_indices('.').map(|(dot, _)| dot + 1))
            .collect();
        starts.reverse();
        starts.into_iter().skip(1).map(move |start| &name[start..])
    }
}

impl fmt::Display for EmailDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EmailDomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
