//! Per-attempt transport options.

use std::collections::HashMap;

/// Opaque endpoint attributes attached to a transport attempt.
///
/// String key-value pairs the channel resolved for the endpoint (load
/// balancer hints, security level, custom routing data). The transport
/// carries them through without interpreting them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: HashMap<String, String>,
}

impl Attributes {
    /// Create an empty attribute set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Get an attribute value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Options for a single transport creation attempt.
///
/// Each call to a transport factory carries its own options; the factory
/// copies what it needs onto the transport and keeps no reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportOptions {
    /// Authority the transport should present. In-process endpoints have
    /// no host to derive one from, so this defaults to `localhost`.
    pub authority: String,

    /// User agent to advertise, if any.
    pub user_agent: Option<String>,

    /// Attributes resolved for the endpoint.
    pub attributes: Attributes,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            authority: "localhost".to_string(),
            user_agent: None,
            attributes: Attributes::new(),
        }
    }
}

impl TransportOptions {
    /// Create options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the authority.
    #[must_use]
    pub fn authority(mut self, authority: impl Into<String>) -> Self {
        self.authority = authority.into();
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the endpoint attributes.
    #[must_use]
    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }
}
