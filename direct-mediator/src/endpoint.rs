/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

use crate::registry::consumer_registry::{ConsumerMode, EndpointBindError, EndpointEntry};
use crate::registry::identity::{EndpointIdentity, IdentityParseError};
use crate::registry::ConsumerRegistry;
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;
use std::time::Duration;

/// Default bounded wait for a consumer to appear when `block` is set.
pub const DEFAULT_DISPATCH_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Dispatch-side endpoint configuration.
///
/// `block`/`timeout` govern the producer's bounded wait when no consumer is
/// registered; `mode` fixes the consumer cardinality of the identity on first
/// bind. Query parameters on the endpoint address override `block` and
/// `timeout`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EndpointConfig {
    pub block: bool,
    pub timeout: Duration,
    pub mode: ConsumerMode,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            block: true,
            timeout: DEFAULT_DISPATCH_TIMEOUT,
            mode: ConsumerMode::SingleConsumer,
        }
    }
}

/// Endpoint creation failures.
#[derive(Debug)]
pub enum EndpointCreateError {
    Identity(IdentityParseError),
    Bind(EndpointBindError),
}

impl Display for EndpointCreateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EndpointCreateError::Identity(err) => {
                write!(f, "failed to parse endpoint identity: {err}")
            }
            EndpointCreateError::Bind(err) => {
                write!(f, "failed to bind endpoint to registry: {err}")
            }
        }
    }
}

impl Error for EndpointCreateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EndpointCreateError::Identity(err) => Some(err),
            EndpointCreateError::Bind(err) => Some(err),
        }
    }
}

///
/// [`DirectEndpoint`] is an identity-keyed binding that producers send to and
/// consumers receive from. It is a small cloneable value: the registration
/// state it exposes lives in the [`ConsumerRegistry`] it was bound through,
/// so dropping and re-creating an endpoint for the same identity loses
/// nothing.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use direct_mediator::{ConsumerRegistry, DirectEndpoint, EndpointConfig};
///
/// let registry = Arc::new(ConsumerRegistry::new());
///
/// let endpoint = DirectEndpoint::new(
///     registry,
///     "direct:orders?timeout=5000",
///     EndpointConfig::default(),
/// )
/// .unwrap();
///
/// assert_eq!(endpoint.identity().path(), "orders");
/// assert!(endpoint.block());
/// assert_eq!(endpoint.timeout().as_millis(), 5000);
/// ```
#[derive(Clone)]
pub struct DirectEndpoint {
    identity: EndpointIdentity,
    entry: Arc<EndpointEntry>,
    block: bool,
    timeout: Duration,
}

impl DirectEndpoint {
    /// Parses `uri`, applies its `block`/`timeout` query overrides on top of
    /// `config`, and binds the identity to `registry`.
    pub fn new(
        registry: Arc<ConsumerRegistry>,
        uri: &str,
        config: EndpointConfig,
    ) -> Result<Self, EndpointCreateError> {
        let (identity, overrides) =
            EndpointIdentity::parse(uri).map_err(EndpointCreateError::Identity)?;
        let entry = registry
            .bind(identity.path(), config.mode)
            .map_err(EndpointCreateError::Bind)?;

        Ok(Self {
            identity,
            entry,
            block: overrides.block.unwrap_or(config.block),
            timeout: overrides.timeout.unwrap_or(config.timeout),
        })
    }

    pub fn identity(&self) -> &EndpointIdentity {
        &self.identity
    }

    pub fn block(&self) -> bool {
        self.block
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn mode(&self) -> ConsumerMode {
        self.entry.mode()
    }

    /// Number of consumers currently registered for this identity.
    pub fn registered_consumers(&self) -> usize {
        self.entry.consumer_count()
    }

    pub(crate) fn entry(&self) -> &Arc<EndpointEntry> {
        &self.entry
    }
}

impl Debug for DirectEndpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectEndpoint")
            .field("identity", &self.identity)
            .field("block", &self.block)
            .field("timeout", &self.timeout)
            .field("mode", &self.mode())
            .finish()
    }
}
