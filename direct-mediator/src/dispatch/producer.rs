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

//! Synchronous dispatch path: deliver one exchange to the registered
//! consumers of an endpoint, in registration order, in the caller's task.

use crate::dispatch::ProcessingError;
use crate::endpoint::DirectEndpoint;
use crate::exchange::Exchange;
use crate::observability::{events, fields};
use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};
use tracing::{debug, warn, Level};

const COMPONENT: &str = "direct_producer";

/// Result of a completed dispatch.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DispatchOutcome {
    /// Every registered consumer processed the exchange.
    Delivered { consumers: usize },
    /// No consumer was registered (after the bounded wait, if blocking);
    /// the exchange was dropped with a warning, fire-and-forget style.
    NoConsumers,
}

/// Dispatch failures.
#[derive(Debug)]
pub enum DispatchError {
    /// A consumer's processor failed; dispatch stopped at that consumer and
    /// the failure flows to the caller unchanged.
    ConsumerFailed {
        endpoint: String,
        source: ProcessingError,
    },
}

impl Display for DispatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::ConsumerFailed { endpoint, source } => {
                write!(f, "consumer on endpoint '{endpoint}' failed: {source}")
            }
        }
    }
}

impl Error for DispatchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DispatchError::ConsumerFailed { source, .. } => Some(source),
        }
    }
}

/// The dispatch-side role: sends an exchange to an endpoint's registered
/// consumers.
///
/// Dispatch is strictly sequential in the calling task: consumer N+1 runs
/// only after consumer N returned, and observes every mutation N made to the
/// exchange. There is no fan-out parallelism at this layer and none should be
/// added; the ordering guarantee depends on it.
pub struct DirectProducer {
    endpoint: DirectEndpoint,
}

impl DirectProducer {
    pub fn new(endpoint: DirectEndpoint) -> Self {
        Self { endpoint }
    }

    pub fn endpoint(&self) -> &DirectEndpoint {
        &self.endpoint
    }

    /// Delivers `exchange` to all currently registered consumers.
    ///
    /// With no consumer registered, a blocking endpoint waits up to its
    /// configured timeout for one to appear; a non-blocking endpoint (or an
    /// expired wait) logs a warning and returns
    /// [`DispatchOutcome::NoConsumers`] without touching the exchange — the
    /// no-consumer case never raises.
    ///
    /// The consumer set is a point-in-time snapshot: a consumer stopped
    /// concurrently with an in-flight dispatch may still receive this
    /// exchange. That race is accepted; dispatch never blocks behind
    /// registration changes.
    pub async fn process(
        &self,
        exchange: &mut Exchange,
    ) -> Result<DispatchOutcome, DispatchError> {
        let endpoint_key = self.endpoint.identity().path();
        let mut consumers = self.endpoint.entry().snapshot();

        if consumers.is_empty() && self.endpoint.block() {
            debug!(
                event = events::DISPATCH_WAIT_FOR_CONSUMER,
                component = COMPONENT,
                endpoint = endpoint_key,
                exchange_id = exchange.id(),
                timeout_ms = fields::duration_ms(self.endpoint.timeout()),
                "no consumer registered; waiting"
            );
            self.endpoint
                .entry()
                .wait_for_consumer(self.endpoint.timeout())
                .await;
            consumers = self.endpoint.entry().snapshot();
        }

        if consumers.is_empty() {
            warn!(
                event = events::DISPATCH_NO_CONSUMER,
                component = COMPONENT,
                endpoint = endpoint_key,
                exchange_id = exchange.id(),
                block = self.endpoint.block(),
                "no consumers available; dropping exchange"
            );
            return Ok(DispatchOutcome::NoConsumers);
        }

        for registration in consumers.iter() {
            if tracing::enabled!(Level::DEBUG) {
                debug!(
                    event = events::DISPATCH_ATTEMPT,
                    component = COMPONENT,
                    endpoint = endpoint_key,
                    exchange_id = exchange.id(),
                    consumer_count = consumers.len(),
                    "delivering exchange to consumer"
                );
            }

            if let Err(err) = registration.processor.process(exchange).await {
                warn!(
                    event = events::DISPATCH_CONSUMER_FAILED,
                    component = COMPONENT,
                    endpoint = endpoint_key,
                    exchange_id = exchange.id(),
                    err = %err,
                    "consumer processing failed"
                );
                return Err(DispatchError::ConsumerFailed {
                    endpoint: endpoint_key.to_string(),
                    source: err,
                });
            }
        }

        debug!(
            event = events::DISPATCH_OK,
            component = COMPONENT,
            endpoint = endpoint_key,
            exchange_id = exchange.id(),
            consumer_count = consumers.len(),
            "exchange delivered"
        );
        Ok(DispatchOutcome::Delivered {
            consumers: consumers.len(),
        })
    }
}
