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

//! Resequencer configuration model.
//!
//! Declarative value objects consumed by an external resequencer processor:
//! batch mode buffers up to `batch_size` exchanges or `batch_timeout`,
//! whichever comes first; stream mode maintains a reordering window of
//! `capacity` governed by a pluggable [`ExchangeComparator`]. Both configs
//! are built once at route-build time and read-only thereafter; this crate
//! carries the configuration contract only, not the reordering algorithm.

pub(crate) mod batch;
pub(crate) mod comparator;
pub(crate) mod stream;

use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};

pub use batch::{BatchResequencerConfig, DEFAULT_BATCH_SIZE, DEFAULT_BATCH_TIMEOUT};
pub use comparator::{ExchangeComparator, SequenceHeaderComparator};
pub use stream::{
    StreamResequencerConfig, DEFAULT_DELIVERY_ATTEMPT_INTERVAL, DEFAULT_STREAM_CAPACITY,
    DEFAULT_STREAM_TIMEOUT,
};

/// Eager validation failures for resequencer configuration values.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResequencerConfigError {
    ZeroBatchSize,
    ZeroCapacity,
    ZeroDuration { field: &'static str },
}

impl Display for ResequencerConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ResequencerConfigError::ZeroBatchSize => {
                write!(f, "batch size must be positive")
            }
            ResequencerConfigError::ZeroCapacity => {
                write!(f, "capacity must be positive")
            }
            ResequencerConfigError::ZeroDuration { field } => {
                write!(f, "{field} must be a positive duration")
            }
        }
    }
}

impl Error for ResequencerConfigError {}
