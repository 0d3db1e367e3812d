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

//! Exchange ordering used by the stream resequencer window.

use crate::exchange::Exchange;
use std::cmp::Ordering;

/// A total or partial ordering over exchanges.
///
/// `None` means the pair cannot be ordered (for the default comparator: one
/// of the exchanges lacks a valid sequence-number header); the external
/// resequencer pairs that with its `ignore_invalid_exchanges` policy.
pub trait ExchangeComparator: Send + Sync {
    fn compare(&self, left: &Exchange, right: &Exchange) -> Option<Ordering>;
}

/// Default comparator: orders by the well-known
/// [`SEQUENCE_NUMBER_HEADER`][crate::SEQUENCE_NUMBER_HEADER] long header.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequenceHeaderComparator;

impl ExchangeComparator for SequenceHeaderComparator {
    fn compare(&self, left: &Exchange, right: &Exchange) -> Option<Ordering> {
        Some(left.sequence_number()?.cmp(&right.sequence_number()?))
    }
}
