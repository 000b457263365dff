//! Core type definition module
//!
//! Request and response envelopes shared by every router component.

pub mod capability;
pub mod requests;
pub mod responses;

pub use capability::{Capability, Tier};
pub use requests::{GenerationRequest, RequestKind};
pub use responses::{AudioData, ResponseEnvelope, ResponsePayload, Usage};
