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

//! # direct-mediator
//!
//! `direct-mediator` is an in-process mediation core: identity-keyed direct
//! endpoints with producer/consumer dispatch semantics, plus the resequencer
//! configuration model consumed by an external resequencer processor.
//!
//! The API is centered on [`ConsumerRegistry`], [`DirectEndpoint`],
//! [`DirectConsumer`], and [`DirectProducer`]. The registry is the long-lived
//! owner of all registration state; endpoints are small cloneable bindings,
//! so an endpoint object can be dropped and re-created for the same identity
//! without losing its consumers.
//!
//! ## Dispatching an exchange
//!
//! ```
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use direct_mediator::{
//!     ConsumerRegistry, DirectConsumer, DirectEndpoint, DirectProducer, EndpointConfig,
//!     Exchange, ProcessingError, Processor,
//! };
//!
//! struct Uppercase;
//!
//! #[async_trait]
//! impl Processor for Uppercase {
//!     async fn process(&self, exchange: &mut Exchange) -> Result<(), ProcessingError> {
//!         let body = exchange.take_body().unwrap_or_default();
//!         exchange.set_body(body.to_ascii_uppercase());
//!         Ok(())
//!     }
//! }
//!
//! # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
//! let registry = Arc::new(ConsumerRegistry::new());
//! let endpoint = DirectEndpoint::new(
//!     registry.clone(),
//!     "direct:orders",
//!     EndpointConfig::default(),
//! )
//! .unwrap();
//!
//! let consumer = DirectConsumer::new(endpoint.clone(), Arc::new(Uppercase));
//! consumer.start().unwrap();
//!
//! let producer = DirectProducer::new(endpoint);
//! let mut exchange = Exchange::with_body("order-1");
//! producer.process(&mut exchange).await.unwrap();
//! assert_eq!(exchange.body(), Some(&b"ORDER-1"[..]));
//!
//! registry.shutdown();
//! # });
//! ```
//!
//! ## Consumer cardinality
//!
//! An identity is bound in single-consumer mode (the default: a second
//! distinct consumer fails to start) or multi-consumer mode (all consumers
//! receive each exchange, strictly in registration order). Dispatch runs in
//! the caller's task with no fan-out; a later consumer sees every mutation an
//! earlier one made to the shared exchange.
//!
//! ## No-consumer behavior
//!
//! A blocking endpoint waits up to its timeout for a consumer to appear.
//! When none does (or the endpoint is non-blocking), dispatch logs a warning
//! and returns [`DispatchOutcome::NoConsumers`] — fire-and-forget, never an
//! error.
//!
//! ## Internal architecture map
//!
//! - `registry`: identity keying and the long-lived consumer registry
//! - `dispatch`: consumer lifecycle state machine and producer dispatch
//! - `resequencer`: batch/stream configuration value objects
//! - `observability`: structured event names and field formatting
//!
//! ## Observability model
//!
//! The crate uses `tracing` for logs/events and does not install a global
//! subscriber. Binaries and tests are responsible for one-time
//! `tracing_subscriber` initialization at process boundaries.

mod endpoint;
pub use endpoint::{DirectEndpoint, EndpointConfig, EndpointCreateError, DEFAULT_DISPATCH_TIMEOUT};

mod exchange;
pub use exchange::{Exchange, HeaderValue, SEQUENCE_NUMBER_HEADER};

mod dispatch;
pub use dispatch::{
    ConsumerLifecycleError, ConsumerState, DirectConsumer, DirectProducer, DispatchError,
    DispatchOutcome, ProcessingError, Processor, ShutdownPolicy,
};

mod registry;
pub use registry::{
    ConsumerMode, ConsumerRegistrationError, ConsumerRegistry, EndpointBindError,
    EndpointIdentity, IdentityParseError,
};

mod resequencer;
pub use resequencer::{
    BatchResequencerConfig, ExchangeComparator, ResequencerConfigError, SequenceHeaderComparator,
    StreamResequencerConfig, DEFAULT_BATCH_SIZE, DEFAULT_BATCH_TIMEOUT,
    DEFAULT_DELIVERY_ATTEMPT_INTERVAL, DEFAULT_STREAM_CAPACITY, DEFAULT_STREAM_TIMEOUT,
};

#[doc(hidden)]
pub mod observability;
