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

//! Identity-keyed consumer registry and per-endpoint registration sets.

use crate::dispatch::consumer::ConsumerState;
use crate::dispatch::Processor;
use crate::observability::{events, fields};
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};

const COMPONENT: &str = "consumer_registry";

/// Consumer cardinality of an endpoint entry, fixed at entry creation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConsumerMode {
    /// At most one active consumer; starting a second distinct consumer fails.
    SingleConsumer,
    /// Any number of active consumers, dispatched to in registration order.
    MultiConsumer,
}

/// Failure to bind an endpoint identity to a registry entry.
#[derive(Debug)]
pub enum EndpointBindError {
    ConsumerModeConflict {
        endpoint: String,
        bound: ConsumerMode,
        requested: ConsumerMode,
    },
}

impl Display for EndpointBindError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EndpointBindError::ConsumerModeConflict {
                endpoint,
                bound,
                requested,
            } => write!(
                f,
                "endpoint '{endpoint}' is already bound as {} and cannot be re-bound as {}",
                fields::format_mode(*bound),
                fields::format_mode(*requested)
            ),
        }
    }
}

impl Error for EndpointBindError {}

/// Failure to register a consumer into an endpoint entry.
#[derive(Debug)]
pub enum ConsumerRegistrationError {
    /// A distinct consumer is already active on a single-consumer endpoint.
    ExclusiveConsumerViolation { endpoint: String },
}

impl Display for ConsumerRegistrationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConsumerRegistrationError::ExclusiveConsumerViolation { endpoint } => {
                write!(f, "only one consumer allowed on endpoint '{endpoint}'")
            }
        }
    }
}

impl Error for ConsumerRegistrationError {}

/// One registered consumer: its processing function and lifecycle state.
///
/// Registration identity is the `Arc` pointer of this object, so a restarted
/// consumer instance is recognized as itself while a distinct instance is
/// not, even when both wrap the same processor.
pub(crate) struct ConsumerRegistration {
    pub(crate) processor: Arc<dyn Processor>,
    pub(crate) state: Mutex<ConsumerState>,
}

impl ConsumerRegistration {
    pub(crate) fn new(processor: Arc<dyn Processor>) -> Arc<Self> {
        Arc::new(Self {
            processor,
            state: Mutex::new(ConsumerState::Created),
        })
    }

    fn mark_stopped(&self) {
        *self.state.lock() = ConsumerState::Stopped;
    }
}

impl Debug for ConsumerRegistration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsumerRegistration")
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}

/// The live registration set for one endpoint identity.
///
/// Readers (dispatch) take lock-free snapshots; writers (consumer start/stop)
/// serialize on a small mutex and publish a fresh copy, so a dispatch begun
/// mid-mutation always iterates a consistent point-in-time set.
pub(crate) struct EndpointEntry {
    mode: ConsumerMode,
    consumers: ArcSwap<Vec<Arc<ConsumerRegistration>>>,
    consumer_count: watch::Sender<usize>,
    writer: Mutex<()>,
}

impl EndpointEntry {
    fn new(mode: ConsumerMode) -> Arc<Self> {
        let (consumer_count, _) = watch::channel(0);
        Arc::new(Self {
            mode,
            consumers: ArcSwap::from_pointee(Vec::new()),
            consumer_count,
            writer: Mutex::new(()),
        })
    }

    pub(crate) fn mode(&self) -> ConsumerMode {
        self.mode
    }

    /// Point-in-time snapshot of the registered consumers, in registration order.
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<ConsumerRegistration>>> {
        self.consumers.load_full()
    }

    pub(crate) fn consumer_count(&self) -> usize {
        *self.consumer_count.borrow()
    }

    /// Registers a consumer. Returns `false` when the exact instance was
    /// already registered (idempotent restart).
    pub(crate) fn register(
        &self,
        endpoint: &str,
        registration: &Arc<ConsumerRegistration>,
    ) -> Result<bool, ConsumerRegistrationError> {
        let _writer = self.writer.lock();
        let current = self.consumers.load_full();

        if current
            .iter()
            .any(|existing| Arc::ptr_eq(existing, registration))
        {
            debug!(
                event = events::CONSUMER_REGISTER_IDEMPOTENT,
                component = COMPONENT,
                endpoint,
                consumer_count = current.len(),
                "consumer already registered; restart is a no-op"
            );
            return Ok(false);
        }

        if self.mode == ConsumerMode::SingleConsumer && !current.is_empty() {
            warn!(
                event = events::CONSUMER_REGISTER_REJECTED,
                component = COMPONENT,
                endpoint,
                consumer_count = current.len(),
                "rejecting second consumer on single-consumer endpoint"
            );
            return Err(ConsumerRegistrationError::ExclusiveConsumerViolation {
                endpoint: endpoint.to_string(),
            });
        }

        let mut next = Vec::with_capacity(current.len() + 1);
        next.extend(current.iter().cloned());
        next.push(registration.clone());
        let consumer_count = next.len();
        self.consumers.store(Arc::new(next));
        self.consumer_count.send_replace(consumer_count);

        debug!(
            event = events::CONSUMER_REGISTER_OK,
            component = COMPONENT,
            endpoint,
            consumer_count,
            "registered consumer"
        );
        Ok(true)
    }

    /// Removes a consumer. Returns `false` when the instance was not registered.
    pub(crate) fn unregister(
        &self,
        endpoint: &str,
        registration: &Arc<ConsumerRegistration>,
    ) -> bool {
        let _writer = self.writer.lock();
        let current = self.consumers.load_full();

        let next: Vec<Arc<ConsumerRegistration>> = current
            .iter()
            .filter(|existing| !Arc::ptr_eq(existing, registration))
            .cloned()
            .collect();

        if next.len() == current.len() {
            return false;
        }

        let consumer_count = next.len();
        self.consumers.store(Arc::new(next));
        self.consumer_count.send_replace(consumer_count);

        debug!(
            event = events::CONSUMER_UNREGISTER_OK,
            component = COMPONENT,
            endpoint,
            consumer_count,
            "unregistered consumer"
        );
        true
    }

    /// Waits up to `wait` for at least one consumer to be registered.
    /// Returns immediately once one appears.
    pub(crate) async fn wait_for_consumer(&self, wait: Duration) -> bool {
        let mut consumer_count = self.consumer_count.subscribe();
        let waited = tokio::time::timeout(wait, consumer_count.wait_for(|count| *count > 0)).await;

        match waited {
            Ok(result) => result.is_ok(),
            Err(_) => self.consumer_count() > 0,
        }
    }

    /// Empties the registration set and returns the consumers that were live.
    fn clear(&self) -> Arc<Vec<Arc<ConsumerRegistration>>> {
        let _writer = self.writer.lock();
        let drained = self.consumers.swap(Arc::new(Vec::new()));
        self.consumer_count.send_replace(0);
        drained
    }
}

/// The long-lived registry service mapping endpoint identity keys to their
/// consumer registration sets.
///
/// The registry, not any endpoint object, owns the registration state: an
/// endpoint evicted and later re-created for the same identity re-binds the
/// same entry and still observes previously started consumers. Producers and
/// consumers are both constructed against endpoints bound through one shared
/// registry instance.
pub struct ConsumerRegistry {
    entries: Mutex<HashMap<String, Arc<EndpointEntry>>>,
}

impl ConsumerRegistry {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the entry for `key`, creating it with `mode` on first bind.
    /// Re-binding with a conflicting mode is an error.
    pub(crate) fn bind(
        &self,
        key: &str,
        mode: ConsumerMode,
    ) -> Result<Arc<EndpointEntry>, EndpointBindError> {
        let mut entries = self.entries.lock();

        if let Some(entry) = entries.get(key) {
            if entry.mode() != mode {
                warn!(
                    event = events::ENDPOINT_BIND_MODE_CONFLICT,
                    component = COMPONENT,
                    endpoint = key,
                    "endpoint re-bound with conflicting consumer mode"
                );
                return Err(EndpointBindError::ConsumerModeConflict {
                    endpoint: key.to_string(),
                    bound: entry.mode(),
                    requested: mode,
                });
            }
            debug!(
                event = events::ENDPOINT_BIND_REUSE,
                component = COMPONENT,
                endpoint = key,
                consumer_count = entry.consumer_count(),
                "re-bound existing endpoint entry"
            );
            return Ok(entry.clone());
        }

        let entry = EndpointEntry::new(mode);
        entries.insert(key.to_string(), entry.clone());
        debug!(
            event = events::ENDPOINT_BIND_CREATE,
            component = COMPONENT,
            endpoint = key,
            mode = fields::format_mode(mode),
            "created endpoint entry"
        );
        Ok(entry)
    }

    /// Number of consumers currently registered for `key`.
    pub fn registered_consumers(&self, key: &str) -> usize {
        self.entries
            .lock()
            .get(key)
            .map(|entry| entry.consumer_count())
            .unwrap_or(0)
    }

    /// Stops every registered consumer for every identity and clears the
    /// registry. Explicit teardown: consumers may hold external resources
    /// that must be released deterministically, so this is never left to
    /// drop order.
    pub fn shutdown(&self) {
        let drained: Vec<(String, Arc<EndpointEntry>)> = {
            let mut entries = self.entries.lock();
            entries.drain().collect()
        };

        for (endpoint, entry) in drained {
            let consumers = entry.clear();
            for registration in consumers.iter() {
                registration.mark_stopped();
            }
            debug!(
                event = events::REGISTRY_SHUTDOWN_ENDPOINT,
                component = COMPONENT,
                endpoint = endpoint.as_str(),
                consumer_count = consumers.len(),
                "stopped consumers for endpoint"
            );
        }

        debug!(
            event = events::REGISTRY_SHUTDOWN_OK,
            component = COMPONENT,
            "registry shut down"
        );
    }
}

impl Default for ConsumerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for ConsumerRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsumerRegistry")
            .field("endpoints", &self.entries.lock().len())
            .finish()
    }
}
