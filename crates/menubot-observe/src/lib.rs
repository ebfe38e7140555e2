//! Observability setup for menubot: structured logging and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
