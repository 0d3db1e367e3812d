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

//! Registry layer.
//!
//! Owns endpoint identity keying and the long-lived consumer registration
//! state. The registry outlives every endpoint object built against it, which
//! is what lets a re-created endpoint for the same identity still observe
//! previously started consumers.

pub(crate) mod consumer_registry;
pub(crate) mod identity;

pub use consumer_registry::{
    ConsumerMode, ConsumerRegistrationError, ConsumerRegistry, EndpointBindError,
};
pub use identity::{EndpointIdentity, IdentityParseError};
