//! Canonical structured event names used across `direct-mediator`.

// Endpoint binding events.
pub const ENDPOINT_BIND_CREATE: &str = "endpoint_bind_create";
pub const ENDPOINT_BIND_REUSE: &str = "endpoint_bind_reuse";
pub const ENDPOINT_BIND_MODE_CONFLICT: &str = "endpoint_bind_mode_conflict";

// Consumer registration and lifecycle events.
pub const CONSUMER_REGISTER_OK: &str = "consumer_register_ok";
pub const CONSUMER_REGISTER_IDEMPOTENT: &str = "consumer_register_idempotent";
pub const CONSUMER_REGISTER_REJECTED: &str = "consumer_register_rejected";
pub const CONSUMER_UNREGISTER_OK: &str = "consumer_unregister_ok";
pub const CONSUMER_START: &str = "consumer_start";
pub const CONSUMER_SUSPEND: &str = "consumer_suspend";
pub const CONSUMER_STOP: &str = "consumer_stop";

// Dispatch events.
pub const DISPATCH_ATTEMPT: &str = "dispatch_attempt";
pub const DISPATCH_OK: &str = "dispatch_ok";
pub const DISPATCH_WAIT_FOR_CONSUMER: &str = "dispatch_wait_for_consumer";
pub const DISPATCH_NO_CONSUMER: &str = "dispatch_no_consumer";
pub const DISPATCH_CONSUMER_FAILED: &str = "dispatch_consumer_failed";

// Registry teardown events.
pub const REGISTRY_SHUTDOWN_ENDPOINT: &str = "registry_shutdown_endpoint";
pub const REGISTRY_SHUTDOWN_OK: &str = "registry_shutdown_ok";
