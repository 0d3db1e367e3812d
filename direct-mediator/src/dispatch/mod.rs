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

//! Dispatch layer.
//!
//! Owns the consumer lifecycle state machine and the synchronous producer
//! dispatch path. Dispatch runs sequentially in the caller's task; any
//! concurrency is introduced by the environment around this core, never
//! inside it.

pub(crate) mod consumer;
pub(crate) mod producer;

use crate::exchange::Exchange;
use async_trait::async_trait;
use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};

pub use consumer::{ConsumerLifecycleError, ConsumerState, DirectConsumer, ShutdownPolicy};
pub use producer::{DirectProducer, DispatchError, DispatchOutcome};

/// The processing function a consumer wraps.
///
/// Receives the exchange by mutable reference; mutations are visible to the
/// producer's caller and to later consumers in the same dispatch chain.
#[async_trait]
pub trait Processor: Send + Sync {
    async fn process(&self, exchange: &mut Exchange) -> Result<(), ProcessingError>;
}

/// Failure raised by a [`Processor`]; propagates out of dispatch unchanged.
#[derive(Debug)]
pub struct ProcessingError {
    message: String,
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl ProcessingError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl Display for ProcessingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for ProcessingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::ProcessingError;
    use std::error::Error;

    #[test]
    fn processing_error_exposes_message_and_source() {
        let io_error = std::io::Error::new(std::io::ErrorKind::Other, "socket closed");
        let error = ProcessingError::with_source("downstream send failed", io_error);

        assert_eq!(error.to_string(), "downstream send failed");
        assert!(error.source().is_some());
    }

    #[test]
    fn processing_error_without_source_has_none() {
        let error = ProcessingError::new("bad payload");

        assert_eq!(error.to_string(), "bad payload");
        assert!(error.source().is_none());
    }
}
