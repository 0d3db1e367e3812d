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

//! The unit of work carried through the dispatch path.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Well-known header carrying the resequencing order of an [`Exchange`].
///
/// Read by [`SequenceHeaderComparator`][crate::SequenceHeaderComparator]; any
/// producer that wants its exchanges resequenced by the default comparator
/// sets this header to a monotonically increasing `i64`.
pub const SEQUENCE_NUMBER_HEADER: &str = "mediator.sequence_number";

static NEXT_EXCHANGE_ID: AtomicU64 = AtomicU64::new(1);

/// Typed header value attached to an [`Exchange`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HeaderValue {
    Bool(bool),
    Long(i64),
    Text(String),
}

impl HeaderValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            HeaderValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            HeaderValue::Long(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            HeaderValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl From<bool> for HeaderValue {
    fn from(value: bool) -> Self {
        HeaderValue::Bool(value)
    }
}

impl From<i64> for HeaderValue {
    fn from(value: i64) -> Self {
        HeaderValue::Long(value)
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        HeaderValue::Text(value.to_string())
    }
}

impl From<String> for HeaderValue {
    fn from(value: String) -> Self {
        HeaderValue::Text(value)
    }
}

/// An opaque unit of work: a process-unique id, an optional byte body, and
/// string-keyed typed headers.
///
/// An exchange is mutated in place by whichever consumer processes it; during
/// a multi-consumer dispatch, later consumers observe mutations made by
/// earlier consumers in the same chain.
#[derive(Clone, Debug)]
pub struct Exchange {
    id: u64,
    body: Option<Vec<u8>>,
    headers: HashMap<String, HeaderValue>,
}

impl Exchange {
    pub fn new() -> Self {
        Self {
            id: NEXT_EXCHANGE_ID.fetch_add(1, Ordering::Relaxed),
            body: None,
            headers: HashMap::new(),
        }
    }

    pub fn with_body(body: impl Into<Vec<u8>>) -> Self {
        let mut exchange = Self::new();
        exchange.body = Some(body.into());
        exchange
    }

    /// Process-unique exchange identifier, used for log correlation.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub fn set_body(&mut self, body: impl Into<Vec<u8>>) {
        self.body = Some(body.into());
    }

    pub fn take_body(&mut self) -> Option<Vec<u8>> {
        self.body.take()
    }

    pub fn header(&self, name: &str) -> Option<&HeaderValue> {
        self.headers.get(name)
    }

    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<HeaderValue>) {
        self.headers.insert(name.into(), value.into());
    }

    pub fn remove_header(&mut self, name: &str) -> Option<HeaderValue> {
        self.headers.remove(name)
    }

    pub fn headers(&self) -> &HashMap<String, HeaderValue> {
        &self.headers
    }

    /// Returns the [`SEQUENCE_NUMBER_HEADER`] value, if present and a long.
    pub fn sequence_number(&self) -> Option<i64> {
        self.headers
            .get(SEQUENCE_NUMBER_HEADER)
            .and_then(HeaderValue::as_long)
    }
}

impl Default for Exchange {
    fn default() -> Self {
        Self::new()
    }
}
