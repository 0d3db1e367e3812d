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

//! Consumer lifecycle state machine and registration bookkeeping.

use crate::dispatch::Processor;
use crate::endpoint::DirectEndpoint;
use crate::observability::events;
use crate::registry::consumer_registry::{ConsumerRegistration, ConsumerRegistrationError};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;
use tracing::debug;

const COMPONENT: &str = "direct_consumer";

/// Lifecycle states: `Created → Started ⇄ Suspended → Stopped` (terminal).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConsumerState {
    Created,
    Started,
    Suspended,
    Stopped,
}

impl Display for ConsumerState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConsumerState::Created => "created",
            ConsumerState::Started => "started",
            ConsumerState::Suspended => "suspended",
            ConsumerState::Stopped => "stopped",
        };
        write!(f, "{name}")
    }
}

/// How a consumer asks to be treated during system-wide graceful shutdown.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ShutdownPolicy {
    /// Do not force-stop yet; downstream dependents may still need to
    /// deliver completion signals through this consumer.
    Defer,
    Immediate,
}

/// Lifecycle transition failures.
#[derive(Debug)]
pub enum ConsumerLifecycleError {
    Registration(ConsumerRegistrationError),
    StartAfterStop { endpoint: String },
    InvalidTransition {
        from: ConsumerState,
        attempted: &'static str,
    },
}

impl Display for ConsumerLifecycleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConsumerLifecycleError::Registration(err) => {
                write!(f, "failed to register consumer: {err}")
            }
            ConsumerLifecycleError::StartAfterStop { endpoint } => {
                write!(f, "cannot start a stopped consumer on endpoint '{endpoint}'")
            }
            ConsumerLifecycleError::InvalidTransition { from, attempted } => {
                write!(f, "cannot {attempted} a consumer in state '{from}'")
            }
        }
    }
}

impl Error for ConsumerLifecycleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConsumerLifecycleError::Registration(err) => Some(err),
            _ => None,
        }
    }
}

/// The receive-side role: registers with an endpoint to receive dispatched
/// exchanges and runs its wrapped [`Processor`] for each one.
///
/// A `DirectConsumer` composes registry bookkeeping around any processor:
/// `start`/`resume` register it into the endpoint's consumer set,
/// `suspend`/`stop` remove it. The consumer object itself survives
/// suspension; `stop` is terminal.
pub struct DirectConsumer {
    endpoint: DirectEndpoint,
    registration: Arc<ConsumerRegistration>,
}

impl DirectConsumer {
    pub fn new(endpoint: DirectEndpoint, processor: Arc<dyn Processor>) -> Self {
        Self {
            endpoint,
            registration: ConsumerRegistration::new(processor),
        }
    }

    pub fn endpoint(&self) -> &DirectEndpoint {
        &self.endpoint
    }

    pub fn state(&self) -> ConsumerState {
        *self.registration.state.lock()
    }

    /// Registers this consumer with its endpoint.
    ///
    /// Idempotent for an already-started instance. Fails when a distinct
    /// consumer already holds a single-consumer endpoint, or when this
    /// consumer has been stopped.
    pub fn start(&self) -> Result<(), ConsumerLifecycleError> {
        let mut state = self.registration.state.lock();
        match *state {
            ConsumerState::Stopped => Err(ConsumerLifecycleError::StartAfterStop {
                endpoint: self.endpoint.identity().path().to_string(),
            }),
            ConsumerState::Created | ConsumerState::Suspended | ConsumerState::Started => {
                self.endpoint
                    .entry()
                    .register(self.endpoint.identity().path(), &self.registration)
                    .map_err(ConsumerLifecycleError::Registration)?;
                let from = *state;
                *state = ConsumerState::Started;
                debug!(
                    event = events::CONSUMER_START,
                    component = COMPONENT,
                    endpoint = self.endpoint.identity().path(),
                    from = %from,
                    "consumer started"
                );
                Ok(())
            }
        }
    }

    /// Deregisters without discarding the consumer; only valid when started.
    pub fn suspend(&self) -> Result<(), ConsumerLifecycleError> {
        let mut state = self.registration.state.lock();
        if *state != ConsumerState::Started {
            return Err(ConsumerLifecycleError::InvalidTransition {
                from: *state,
                attempted: "suspend",
            });
        }

        self.endpoint
            .entry()
            .unregister(self.endpoint.identity().path(), &self.registration);
        *state = ConsumerState::Suspended;
        debug!(
            event = events::CONSUMER_SUSPEND,
            component = COMPONENT,
            endpoint = self.endpoint.identity().path(),
            "consumer suspended"
        );
        Ok(())
    }

    /// Resume re-runs the start transition.
    pub fn resume(&self) -> Result<(), ConsumerLifecycleError> {
        self.start()
    }

    /// Deregisters permanently. Idempotent; the terminal transition.
    pub fn stop(&self) {
        let mut state = self.registration.state.lock();
        if *state == ConsumerState::Stopped {
            return;
        }

        if *state == ConsumerState::Started {
            self.endpoint
                .entry()
                .unregister(self.endpoint.identity().path(), &self.registration);
        }
        *state = ConsumerState::Stopped;
        debug!(
            event = events::CONSUMER_STOP,
            component = COMPONENT,
            endpoint = self.endpoint.identity().path(),
            "consumer stopped"
        );
    }

    /// This consumer holds no internal buffering, so graceful shutdown defers
    /// it rather than force-stopping it mid-chain.
    pub fn shutdown_policy(&self) -> ShutdownPolicy {
        ShutdownPolicy::Defer
    }

    /// Pure pass-through: never any buffered in-flight work.
    pub fn pending_exchange_count(&self) -> usize {
        0
    }
}

impl Debug for DirectConsumer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectConsumer")
            .field("endpoint", &self.endpoint)
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{ConsumerLifecycleError, ConsumerState, DirectConsumer, ShutdownPolicy};
    use crate::dispatch::{ProcessingError, Processor};
    use crate::endpoint::{DirectEndpoint, EndpointConfig};
    use crate::exchange::Exchange;
    use crate::registry::{ConsumerMode, ConsumerRegistry};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct NoopProcessor;

    #[async_trait]
    impl Processor for NoopProcessor {
        async fn process(&self, _exchange: &mut Exchange) -> Result<(), ProcessingError> {
            Ok(())
        }
    }

    fn single_endpoint(registry: &Arc<ConsumerRegistry>) -> DirectEndpoint {
        DirectEndpoint::new(registry.clone(), "direct:orders", EndpointConfig::default())
            .expect("endpoint creation should succeed")
    }

    fn consumer(endpoint: &DirectEndpoint) -> DirectConsumer {
        DirectConsumer::new(endpoint.clone(), Arc::new(NoopProcessor))
    }

    #[test]
    fn start_registers_and_is_idempotent() {
        let registry = Arc::new(ConsumerRegistry::new());
        let endpoint = single_endpoint(&registry);
        let consumer = consumer(&endpoint);

        assert_eq!(consumer.state(), ConsumerState::Created);
        consumer.start().expect("start should succeed");
        consumer.start().expect("restart of same instance should succeed");

        assert_eq!(consumer.state(), ConsumerState::Started);
        assert_eq!(endpoint.registered_consumers(), 1);
    }

    #[test]
    fn second_distinct_consumer_fails_on_single_consumer_endpoint() {
        let registry = Arc::new(ConsumerRegistry::new());
        let endpoint = single_endpoint(&registry);
        let first = consumer(&endpoint);
        let second = consumer(&endpoint);

        first.start().expect("first consumer should start");
        let error = second.start().expect_err("second consumer must be rejected");

        assert!(matches!(
            error,
            ConsumerLifecycleError::Registration(_)
        ));
        assert_eq!(second.state(), ConsumerState::Created);
        assert_eq!(endpoint.registered_consumers(), 1);
    }

    #[test]
    fn suspend_deregisters_and_resume_reregisters() {
        let registry = Arc::new(ConsumerRegistry::new());
        let endpoint = single_endpoint(&registry);
        let consumer = consumer(&endpoint);

        consumer.start().expect("start should succeed");
        consumer.suspend().expect("suspend should succeed");

        assert_eq!(consumer.state(), ConsumerState::Suspended);
        assert_eq!(endpoint.registered_consumers(), 0);

        consumer.resume().expect("resume should succeed");

        assert_eq!(consumer.state(), ConsumerState::Started);
        assert_eq!(endpoint.registered_consumers(), 1);
    }

    #[test]
    fn suspend_is_only_valid_from_started() {
        let registry = Arc::new(ConsumerRegistry::new());
        let endpoint = single_endpoint(&registry);
        let consumer = consumer(&endpoint);

        let error = consumer.suspend().expect_err("suspend of created must fail");

        assert!(matches!(
            error,
            ConsumerLifecycleError::InvalidTransition {
                from: ConsumerState::Created,
                ..
            }
        ));
    }

    #[test]
    fn stop_is_terminal_and_idempotent() {
        let registry = Arc::new(ConsumerRegistry::new());
        let endpoint = single_endpoint(&registry);
        let consumer = consumer(&endpoint);

        consumer.start().expect("start should succeed");
        consumer.stop();
        consumer.stop();

        assert_eq!(consumer.state(), ConsumerState::Stopped);
        assert_eq!(endpoint.registered_consumers(), 0);

        let error = consumer.start().expect_err("start after stop must fail");
        assert!(matches!(error, ConsumerLifecycleError::StartAfterStop { .. }));
    }

    #[test]
    fn stop_from_suspended_leaves_registration_empty() {
        let registry = Arc::new(ConsumerRegistry::new());
        let endpoint = single_endpoint(&registry);
        let consumer = consumer(&endpoint);

        consumer.start().expect("start should succeed");
        consumer.suspend().expect("suspend should succeed");
        consumer.stop();

        assert_eq!(consumer.state(), ConsumerState::Stopped);
        assert_eq!(endpoint.registered_consumers(), 0);
    }

    #[test]
    fn rejected_start_leaves_state_unchanged_for_retry_elsewhere() {
        let registry = Arc::new(ConsumerRegistry::new());
        let endpoint = single_endpoint(&registry);
        let holder = consumer(&endpoint);
        let rejected = consumer(&endpoint);

        holder.start().expect("holder should start");
        rejected.start().expect_err("rejected must fail");
        holder.stop();

        // Once the holder is gone the rejected instance can start.
        rejected.start().expect("start should now succeed");
        assert_eq!(endpoint.registered_consumers(), 1);
    }

    #[test]
    fn pass_through_consumer_defers_shutdown_with_no_pending_work() {
        let registry = Arc::new(ConsumerRegistry::new());
        let endpoint = single_endpoint(&registry);
        let consumer = consumer(&endpoint);

        assert_eq!(consumer.shutdown_policy(), ShutdownPolicy::Defer);
        assert_eq!(consumer.pending_exchange_count(), 0);
    }

    #[test]
    fn registry_shutdown_marks_started_consumer_stopped() {
        let registry = Arc::new(ConsumerRegistry::new());
        let endpoint = DirectEndpoint::new(
            registry.clone(),
            "direct:orders",
            EndpointConfig {
                mode: ConsumerMode::MultiConsumer,
                ..EndpointConfig::default()
            },
        )
        .expect("endpoint creation should succeed");
        let consumer = consumer(&endpoint);
        consumer.start().expect("start should succeed");

        registry.shutdown();

        assert_eq!(consumer.state(), ConsumerState::Stopped);
        assert!(consumer.start().is_err());
    }
}
