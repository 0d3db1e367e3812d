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

use crate::resequencer::ResequencerConfigError;
use std::time::Duration;

pub const DEFAULT_BATCH_SIZE: usize = 100;
pub const DEFAULT_BATCH_TIMEOUT: Duration = Duration::from_millis(1000);

/// Batch-mode resequencer configuration: collect up to `batch_size`
/// exchanges or until `batch_timeout` elapses, then deliver the batch in
/// sorted order.
///
/// Immutable value object; values are validated eagerly at construction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BatchResequencerConfig {
    batch_size: usize,
    batch_timeout: Duration,
}

impl BatchResequencerConfig {
    pub fn new(
        batch_size: usize,
        batch_timeout: Duration,
    ) -> Result<Self, ResequencerConfigError> {
        if batch_size == 0 {
            return Err(ResequencerConfigError::ZeroBatchSize);
        }
        if batch_timeout.is_zero() {
            return Err(ResequencerConfigError::ZeroDuration {
                field: "batch_timeout",
            });
        }

        Ok(Self {
            batch_size,
            batch_timeout,
        })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn batch_timeout(&self) -> Duration {
        self.batch_timeout
    }
}

impl Default for BatchResequencerConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            batch_timeout: DEFAULT_BATCH_TIMEOUT,
        }
    }
}
