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

//! Value-format helpers for structured log fields.

use crate::registry::ConsumerMode;
use std::time::Duration;

pub fn format_mode(mode: ConsumerMode) -> &'static str {
    match mode {
        ConsumerMode::SingleConsumer => "single_consumer",
        ConsumerMode::MultiConsumer => "multi_consumer",
    }
}

/// Millisecond rendering for timeout fields, saturating on overflow.
pub fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::{duration_ms, format_mode};
    use crate::registry::ConsumerMode;
    use std::time::Duration;

    #[test]
    fn mode_names_are_stable() {
        assert_eq!(format_mode(ConsumerMode::SingleConsumer), "single_consumer");
        assert_eq!(format_mode(ConsumerMode::MultiConsumer), "multi_consumer");
    }

    #[test]
    fn duration_ms_saturates_instead_of_wrapping() {
        assert_eq!(duration_ms(Duration::from_millis(1500)), 1500);
        assert_eq!(duration_ms(Duration::MAX), u64::MAX);
    }
}
