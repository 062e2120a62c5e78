//! In-process transport handle.

use std::sync::Arc;

use breeze_core::Attributes;

/// Transport for one connection attempt to an in-process endpoint.
///
/// Carries the configuration the connection will run with: the target
/// name the factory was bound to plus the per-attempt options the
/// channel passed in. Establishing the connection against the
/// server-side name registry, and everything after it (framing, flow
/// control), happens in other layers.
#[derive(Debug)]
pub struct InProcessTransport {
    target: Arc<str>,
    authority: String,
    user_agent: Option<String>,
    max_inbound_metadata_size: usize,
    attributes: Attributes,
}

impl InProcessTransport {
    pub(crate) fn new(
        target: Arc<str>,
        authority: String,
        user_agent: Option<String>,
        max_inbound_metadata_size: usize,
        attributes: Attributes,
    ) -> Self {
        Self {
            target,
            authority,
            user_agent,
            max_inbound_metadata_size,
            attributes,
        }
    }

    /// Name of the in-process endpoint this transport connects to.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Authority presented for this connection.
    #[must_use]
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// User agent advertised for this connection, if any.
    #[must_use]
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// Cap on total inbound metadata per call.
    #[must_use]
    pub fn max_inbound_metadata_size(&self) -> usize {
        self.max_inbound_metadata_size
    }

    /// Attributes the channel resolved for the endpoint.
    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}
