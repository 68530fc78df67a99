//! Application layer - orchestration of domain logic.
//!
//! This layer wires the domain to the outside world:
//! - Validated construction-time configuration
//! - The rate governor (admission decisions)
//! - The context windower (pass-through vs. summarize-and-truncate)
//! - Observability counters
//!
//! ## Ports
//!
//! The application layer defines ports (traits) that infrastructure
//! adapters implement: the clock, the entry store, and the external
//! text-generation capability. This keeps the decision logic independent
//! from infrastructure details and testable with controlled doubles.

pub mod config;
pub mod governor;
pub mod metrics;
pub mod ports;
pub mod windower;
