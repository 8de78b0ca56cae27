// src/types/domain.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// API key for Notion API authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create a new API key with validation
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();

        if key.is_empty() {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key cannot be empty".to_string(),
            });
        }

        if !key.starts_with("secret_") && !key.starts_with("ntn_") {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key must start with 'secret_' or 'ntn_'".to_string(),
            });
        }

        if key.len() < 20 {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key is too short".to_string(),
            });
        }

        Ok(Self(key))
    }

    /// Get the API key as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create an API key without validation (only for testing)
    #[cfg(test)]
    pub fn new_unchecked(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact API key in display
        write!(f, "{}...", &self.0[..self.0.len().min(10)])
    }
}

/// Schemes that must never end up in an anchor's href.
const DENIED_SCHEMES: &[&str] = &["javascript", "data", "vbscript"];

/// Validated URL type used for links in rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUrl(Url);

impl ValidatedUrl {
    /// Create a new validated URL; scripting schemes are rejected,
    /// everything else (`https:`, `mailto:`, ...) passes through.
    pub fn parse(url: &str) -> Result<Self, ValidationError> {
        match Url::parse(url) {
            Ok(parsed_url) => {
                if DENIED_SCHEMES.contains(&parsed_url.scheme()) {
                    return Err(ValidationError::InvalidUrl {
                        url: url.to_string(),
                        reason: format!("scheme '{}' is not allowed", parsed_url.scheme()),
                    });
                }
                Ok(Self(parsed_url))
            }
            Err(e) => Err(ValidationError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Get the URL as a string
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ValidatedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for ValidatedUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.as_str().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ValidatedUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ValidatedUrl::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_requires_known_prefix() {
        assert!(ApiKey::new("secret_0123456789abcdef").is_ok());
        assert!(ApiKey::new("ntn_0123456789abcdefgh").is_ok());
        assert!(ApiKey::new("bogus_0123456789abcdef").is_err());
        assert!(ApiKey::new("").is_err());
    }

    #[test]
    fn validated_url_rejects_scripting_schemes() {
        assert!(ValidatedUrl::parse("https://example.com/a").is_ok());
        assert!(ValidatedUrl::parse("mailto:ta@example.edu").is_ok());
        assert!(ValidatedUrl::parse("javascript:alert(1)").is_err());
        assert!(ValidatedUrl::parse("data:text/html,hi").is_err());
        assert!(ValidatedUrl::parse("not a url").is_err());
    }
}
