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

//! Immutable endpoint identity parsed from `scheme:path?params` addresses.

use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::time::Duration;

/// Identity parsing failures.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum IdentityParseError {
    MissingSchemeSeparator { uri: String },
    EmptyScheme { uri: String },
    EmptyPath { uri: String },
    InvalidParameterValue { name: &'static str, value: String },
}

impl Display for IdentityParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            IdentityParseError::MissingSchemeSeparator { uri } => {
                write!(f, "endpoint uri '{uri}' has no scheme separator ':'")
            }
            IdentityParseError::EmptyScheme { uri } => {
                write!(f, "endpoint uri '{uri}' has an empty scheme")
            }
            IdentityParseError::EmptyPath { uri } => {
                write!(f, "endpoint uri '{uri}' has an empty path")
            }
            IdentityParseError::InvalidParameterValue { name, value } => {
                write!(f, "invalid value '{value}' for endpoint parameter '{name}'")
            }
        }
    }
}

impl Error for IdentityParseError {}

/// Endpoint-owned parameter overrides extracted from the query segment.
///
/// Only `block` and `timeout` belong to the dispatch side of an endpoint;
/// every other query parameter is left for external property binders.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct QueryOverrides {
    pub(crate) block: Option<bool>,
    pub(crate) timeout: Option<Duration>,
}

/// Stable identity for one logical endpoint address.
///
/// The `path` segment is the registry key: all producers and consumers built
/// against the same path observe the same registered consumer set, whatever
/// endpoint object they were constructed through. Equality and hashing
/// intentionally cover the path only.
#[derive(Clone, Debug)]
pub struct EndpointIdentity {
    scheme: String,
    path: String,
}

impl EndpointIdentity {
    /// Parses `scheme:path[?key=value[&key=value…]]`, returning the identity
    /// and the endpoint-owned parameter overrides.
    pub(crate) fn parse(uri: &str) -> Result<(Self, QueryOverrides), IdentityParseError> {
        let (address, query) = match uri.split_once('?') {
            Some((address, query)) => (address, Some(query)),
            None => (uri, None),
        };

        let Some((scheme, path)) = address.split_once(':') else {
            return Err(IdentityParseError::MissingSchemeSeparator {
                uri: uri.to_string(),
            });
        };

        if scheme.is_empty() {
            return Err(IdentityParseError::EmptyScheme {
                uri: uri.to_string(),
            });
        }
        if path.is_empty() {
            return Err(IdentityParseError::EmptyPath {
                uri: uri.to_string(),
            });
        }

        let overrides = match query {
            Some(query) => Self::parse_overrides(query)?,
            None => QueryOverrides::default(),
        };

        Ok((
            Self {
                scheme: scheme.to_string(),
                path: path.to_string(),
            },
            overrides,
        ))
    }

    fn parse_overrides(query: &str) -> Result<QueryOverrides, IdentityParseError> {
        let mut overrides = QueryOverrides::default();

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "block" => {
                    let block = value.parse::<bool>().map_err(|_| {
                        IdentityParseError::InvalidParameterValue {
                            name: "block",
                            value: value.to_string(),
                        }
                    })?;
                    overrides.block = Some(block);
                }
                "timeout" => {
                    let millis = value.parse::<u64>().map_err(|_| {
                        IdentityParseError::InvalidParameterValue {
                            name: "timeout",
                            value: value.to_string(),
                        }
                    })?;
                    overrides.timeout = Some(Duration::from_millis(millis));
                }
                // Remaining parameters are bound onto the endpoint by
                // external property-setting machinery, not here.
                _ => {}
            }
        }

        Ok(overrides)
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The registry key.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Display for EndpointIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scheme, self.path)
    }
}

impl Hash for EndpointIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl PartialEq for EndpointIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for EndpointIdentity {}

#[cfg(test)]
mod tests {
    use super::{EndpointIdentity, IdentityParseError};
    use std::time::Duration;

    #[test]
    fn parse_extracts_scheme_and_path() {
        let (identity, overrides) =
            EndpointIdentity::parse("direct:orders").expect("parse should succeed");

        assert_eq!(identity.scheme(), "direct");
        assert_eq!(identity.path(), "orders");
        assert_eq!(identity.to_string(), "direct:orders");
        assert_eq!(overrides.block, None);
        assert_eq!(overrides.timeout, None);
    }

    #[test]
    fn parse_binds_endpoint_owned_parameters() {
        let (_, overrides) = EndpointIdentity::parse("direct:orders?block=false&timeout=5000")
            .expect("parse should succeed");

        assert_eq!(overrides.block, Some(false));
        assert_eq!(overrides.timeout, Some(Duration::from_millis(5000)));
    }

    #[test]
    fn parse_ignores_foreign_parameters() {
        let (identity, overrides) =
            EndpointIdentity::parse("direct:orders?exchangePattern=InOnly&block=true")
                .expect("parse should succeed");

        assert_eq!(identity.path(), "orders");
        assert_eq!(overrides.block, Some(true));
        assert_eq!(overrides.timeout, None);
    }

    #[test]
    fn parse_rejects_malformed_addresses() {
        assert_eq!(
            EndpointIdentity::parse("orders").unwrap_err(),
            IdentityParseError::MissingSchemeSeparator {
                uri: "orders".to_string()
            }
        );
        assert_eq!(
            EndpointIdentity::parse(":orders").unwrap_err(),
            IdentityParseError::EmptyScheme {
                uri: ":orders".to_string()
            }
        );
        assert_eq!(
            EndpointIdentity::parse("direct:").unwrap_err(),
            IdentityParseError::EmptyPath {
                uri: "direct:".to_string()
            }
        );
    }

    #[test]
    fn parse_rejects_invalid_owned_parameter_values() {
        assert_eq!(
            EndpointIdentity::parse("direct:orders?timeout=soon").unwrap_err(),
            IdentityParseError::InvalidParameterValue {
                name: "timeout",
                value: "soon".to_string()
            }
        );
        assert_eq!(
            EndpointIdentity::parse("direct:orders?block=maybe").unwrap_err(),
            IdentityParseError::InvalidParameterValue {
                name: "block",
                value: "maybe".to_string()
            }
        );
    }

    #[test]
    fn identity_equality_covers_path_only() {
        let (plain, _) = EndpointIdentity::parse("direct:orders").expect("parse should succeed");
        let (with_params, _) =
            EndpointIdentity::parse("direct:orders?timeout=100").expect("parse should succeed");

        assert_eq!(plain, with_params);
    }
}
