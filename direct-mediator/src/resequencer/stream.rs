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

use crate::resequencer::comparator::{ExchangeComparator, SequenceHeaderComparator};
use crate::resequencer::ResequencerConfigError;
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_STREAM_CAPACITY: usize = 1000;
pub const DEFAULT_STREAM_TIMEOUT: Duration = Duration::from_millis(1000);
pub const DEFAULT_DELIVERY_ATTEMPT_INTERVAL: Duration = Duration::from_millis(1000);

/// Stream-mode resequencer configuration: a bounded reordering window over a
/// continuous exchange stream, ordered by a pluggable comparator.
///
/// `reject_old` controls what happens to an exchange the comparator judges
/// older than one already delivered: reject it with an error (`true`) or
/// leave the decision to the external resequencer's own drop policy
/// (`false`). `ignore_invalid_exchanges` tells the resequencer to skip
/// exchanges the comparator cannot order rather than failing.
///
/// Built once at route-build time and read-only thereafter; the `with_*`
/// constructors consume and return the value accordingly.
#[derive(Clone)]
pub struct StreamResequencerConfig {
    capacity: usize,
    timeout: Duration,
    delivery_attempt_interval: Duration,
    ignore_invalid_exchanges: bool,
    reject_old: bool,
    comparator: Arc<dyn ExchangeComparator>,
}

impl StreamResequencerConfig {
    pub fn new(capacity: usize, timeout: Duration) -> Result<Self, ResequencerConfigError> {
        if capacity == 0 {
            return Err(ResequencerConfigError::ZeroCapacity);
        }
        if timeout.is_zero() {
            return Err(ResequencerConfigError::ZeroDuration { field: "timeout" });
        }

        Ok(Self {
            capacity,
            timeout,
            ..Self::default()
        })
    }

    pub fn with_delivery_attempt_interval(
        mut self,
        interval: Duration,
    ) -> Result<Self, ResequencerConfigError> {
        if interval.is_zero() {
            return Err(ResequencerConfigError::ZeroDuration {
                field: "delivery_attempt_interval",
            });
        }
        self.delivery_attempt_interval = interval;
        Ok(self)
    }

    pub fn with_ignore_invalid_exchanges(mut self, ignore: bool) -> Self {
        self.ignore_invalid_exchanges = ignore;
        self
    }

    pub fn with_reject_old(mut self, reject_old: bool) -> Self {
        self.reject_old = reject_old;
        self
    }

    pub fn with_comparator(mut self, comparator: Arc<dyn ExchangeComparator>) -> Self {
        self.comparator = comparator;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn delivery_attempt_interval(&self) -> Duration {
        self.delivery_attempt_interval
    }

    pub fn ignore_invalid_exchanges(&self) -> bool {
        self.ignore_invalid_exchanges
    }

    pub fn reject_old(&self) -> bool {
        self.reject_old
    }

    pub fn comparator(&self) -> &Arc<dyn ExchangeComparator> {
        &self.comparator
    }
}

impl Default for StreamResequencerConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_STREAM_CAPACITY,
            timeout: DEFAULT_STREAM_TIMEOUT,
            delivery_attempt_interval: DEFAULT_DELIVERY_ATTEMPT_INTERVAL,
            ignore_invalid_exchanges: false,
            reject_old: false,
            comparator: Arc::new(SequenceHeaderComparator),
        }
    }
}

impl Debug for StreamResequencerConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamResequencerConfig")
            .field("capacity", &self.capacity)
            .field("timeout", &self.timeout)
            .field("delivery_attempt_interval", &self.delivery_attempt_interval)
            .field("ignore_invalid_exchanges", &self.ignore_invalid_exchanges)
            .field("reject_old", &self.reject_old)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        StreamResequencerConfig, DEFAULT_DELIVERY_ATTEMPT_INTERVAL, DEFAULT_STREAM_CAPACITY,
        DEFAULT_STREAM_TIMEOUT,
    };
    use crate::exchange::{Exchange, SEQUENCE_NUMBER_HEADER};
    use crate::resequencer::{ExchangeComparator, ResequencerConfigError};
    use std::cmp::Ordering;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn default_yields_documented_values_and_a_usable_comparator() {
        let config = StreamResequencerConfig::default();

        assert_eq!(config.capacity(), 1000);
        assert_eq!(config.timeout(), Duration::from_millis(1000));
        assert_eq!(config.capacity(), DEFAULT_STREAM_CAPACITY);
        assert_eq!(config.timeout(), DEFAULT_STREAM_TIMEOUT);
        assert_eq!(
            config.delivery_attempt_interval(),
            DEFAULT_DELIVERY_ATTEMPT_INTERVAL
        );
        assert!(!config.ignore_invalid_exchanges());
        assert!(!config.reject_old());

        let mut earlier = Exchange::new();
        earlier.set_header(SEQUENCE_NUMBER_HEADER, 1i64);
        let mut later = Exchange::new();
        later.set_header(SEQUENCE_NUMBER_HEADER, 2i64);
        assert_eq!(
            config.comparator().compare(&earlier, &later),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn new_validates_capacity_and_timeout() {
        assert_eq!(
            StreamResequencerConfig::new(0, Duration::from_millis(100)).unwrap_err(),
            ResequencerConfigError::ZeroCapacity
        );
        assert_eq!(
            StreamResequencerConfig::new(10, Duration::ZERO).unwrap_err(),
            ResequencerConfigError::ZeroDuration { field: "timeout" }
        );
    }

    #[test]
    fn with_delivery_attempt_interval_rejects_zero() {
        let config = StreamResequencerConfig::new(10, Duration::from_millis(100))
            .expect("valid config should build");

        assert_eq!(
            config
                .with_delivery_attempt_interval(Duration::ZERO)
                .unwrap_err(),
            ResequencerConfigError::ZeroDuration {
                field: "delivery_attempt_interval"
            }
        );
    }

    #[test]
    fn flags_and_comparator_are_swappable_at_build_time() {
        struct ReverseComparator;

        impl ExchangeComparator for ReverseComparator {
            fn compare(&self, left: &Exchange, right: &Exchange) -> Option<Ordering> {
                Some(right.sequence_number()?.cmp(&left.sequence_number()?))
            }
        }

        let config = StreamResequencerConfig::new(10, Duration::from_millis(100))
            .expect("valid config should build")
            .with_reject_old(true)
            .with_ignore_invalid_exchanges(true)
            .with_comparator(Arc::new(ReverseComparator));

        assert!(config.reject_old());
        assert!(config.ignore_invalid_exchanges());

        let mut earlier = Exchange::new();
        earlier.set_header(SEQUENCE_NUMBER_HEADER, 1i64);
        let mut later = Exchange::new();
        later.set_header(SEQUENCE_NUMBER_HEADER, 2i64);
        assert_eq!(
            config.comparator().compare(&earlier, &later),
            Some(Ordering::Greater)
        );
    }
}
