//! Request pipeline
//!
//! Everything between a validated keyword and a response body: the runtime
//! signals, the live-or-synthetic decision and envelope assembly.

pub mod policy;
pub mod request;
pub mod response;
pub mod runtime;

pub use policy::{ExecutionPolicy, Provenance, Resolution};
pub use request::{SearchRequest, validate_keyword};
pub use response::{ErrorEnvelope, SuccessEnvelope, assemble_fatal, assemble_success};
pub use runtime::{ExecutionMode, RuntimeContext};
