//! Domain layer - the core concepts of the conversational governor.
//!
//! This layer contains pure logic driven entirely by its inputs:
//! - Fixed-window admission state per identity
//! - The conversation message model
//! - Transcript rendering for summarization prompts
//!
//! Time is always passed in as an `Instant`; nothing here reads the system
//! clock or performs I/O.

pub mod entry;
pub mod message;
pub mod transcript;
