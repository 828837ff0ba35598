//! Qaktus engine: collaborator clients and effect execution.
mod engine;
mod generate;
mod types;
mod waitlist;

pub use engine::EngineHandle;
pub use generate::{LinkGenerator, ReqwestLinkGenerator};
pub use types::{ClientSettings, EngineError, EngineEvent, FailureKind, RequestError};
pub use waitlist::{classify_signup_status, ReqwestWaitlistClient, WaitlistClient};
