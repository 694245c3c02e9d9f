// ABOUTME: Catalog of API surfaces a token can be scoped to
// ABOUTME: Parses and validates requested service tags, with `all` expanding to the full catalog

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{AuthError, AuthResult};

/// Services a stored token can be authorized for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Service {
    Calendar,
    Classroom,
    Contacts,
    Docs,
    Drive,
    Gmail,
    Keep,
    Sheets,
    Tasks,
}

impl Service {
    /// Get all supported services
    pub fn all() -> Vec<Self> {
        vec![
            Self::Calendar,
            Self::Classroom,
            Self::Contacts,
            Self::Docs,
            Self::Drive,
            Self::Gmail,
            Self::Keep,
            Self::Sheets,
            Self::Tasks,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Calendar => "calendar",
            Self::Classroom => "classroom",
            Self::Contacts => "contacts",
            Self::Docs => "docs",
            Self::Drive => "drive",
            Self::Gmail => "gmail",
            Self::Keep => "keep",
            Self::Sheets => "sheets",
            Self::Tasks => "tasks",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Service {
    type Err = AuthError;

    fn from_str(s: &str) -> AuthResult<Self> {
        let tag = s.trim().to_lowercase();
        Self::all()
            .into_iter()
            .find(|service| service.as_str() == tag)
            .ok_or_else(|| unknown_services(vec![s.trim().to_string()]))
    }
}

/// Validate requested tags against the catalog
///
/// Tags may be given individually or comma-separated; matching is
/// case-insensitive and `all` selects every service. Every unknown tag is
/// reported, not just the first.
pub fn parse_services<S: AsRef<str>>(requested: &[S]) -> AuthResult<BTreeSet<String>> {
    let mut services = BTreeSet::new();
    let mut unknown = Vec::new();

    let tags = requested
        .iter()
        .flat_map(|item| item.as_ref().split(','))
        .map(str::trim)
        .filter(|tag| !tag.is_empty());

    for tag in tags {
        if tag.eq_ignore_ascii_case("all") {
            services.extend(Service::all().iter().map(|s| s.as_str().to_string()));
            continue;
        }
        match tag.parse::<Service>() {
            Ok(service) => {
                services.insert(service.as_str().to_string());
            }
            Err(_) => {
                if !unknown.iter().any(|u: &String| u == tag) {
                    unknown.push(tag.to_string());
                }
            }
        }
    }

    if !unknown.is_empty() {
        return Err(unknown_services(unknown));
    }
    Ok(services)
}

fn unknown_services(unknown: Vec<String>) -> AuthError {
    AuthError::InvalidService {
        unknown,
        supported: Service::all()
            .iter()
            .map(|s| s.as_str().to_string())
            .collect(),
    }
}
