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

//! Shared doubles and logging plumbing for the integration suites.

#![allow(dead_code)]

use async_trait::async_trait;
use direct_mediator::{Exchange, ProcessingError, Processor};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex, Once};
use tracing::{span, Dispatch, Event, Level, Metadata, Subscriber};

static INIT_LOGGING: Once = Once::new();

/// One-time subscriber initialization at the test-process boundary.
pub fn init_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Appends its label to the exchange body and records the invocation order.
pub struct RecordingProcessor {
    pub label: &'static str,
    pub invocations: Arc<StdMutex<Vec<&'static str>>>,
}

#[async_trait]
impl Processor for RecordingProcessor {
    async fn process(&self, exchange: &mut Exchange) -> Result<(), ProcessingError> {
        self.invocations
            .lock()
            .expect("lock invocations")
            .push(self.label);
        let mut body = exchange.take_body().unwrap_or_default();
        body.extend_from_slice(self.label.as_bytes());
        exchange.set_body(body);
        Ok(())
    }
}

/// Counts processed exchanges; used where ordering is irrelevant.
#[derive(Default)]
pub struct CountingProcessor {
    processed: AtomicUsize,
}

impl CountingProcessor {
    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Processor for CountingProcessor {
    async fn process(&self, _exchange: &mut Exchange) -> Result<(), ProcessingError> {
        self.processed.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

struct WarnCounterSubscriber {
    warnings: Arc<AtomicUsize>,
}

impl Subscriber for WarnCounterSubscriber {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn new_span(&self, _attributes: &span::Attributes<'_>) -> span::Id {
        span::Id::from_u64(1)
    }

    fn record(&self, _span: &span::Id, _values: &span::Record<'_>) {}

    fn record_follows_from(&self, _span: &span::Id, _follows: &span::Id) {}

    fn event(&self, event: &Event<'_>) {
        if *event.metadata().level() == Level::WARN {
            self.warnings.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn enter(&self, _span: &span::Id) {}

    fn exit(&self, _span: &span::Id) {}
}

/// Returns a warning counter and a dispatcher that feeds it, for asserting
/// that a code path logged at `WARN`.
pub fn warn_counter() -> (Arc<AtomicUsize>, Dispatch) {
    let warnings = Arc::new(AtomicUsize::new(0));
    let dispatch = Dispatch::new(WarnCounterSubscriber {
        warnings: warnings.clone(),
    });
    (warnings, dispatch)
}
