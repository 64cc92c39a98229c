//! Skill runtime
//!
//! - `request` - Inbound envelope types
//! - `slots` - Flattened slot values
//! - `response` - Single-use response builder and wire reply
//! - `context` - Per-turn context and shared services
//! - `dispatcher` - `Skill`, routing one request to one handler

mod context;
mod dispatcher;
mod request;
mod response;
mod slots;

pub use context::{Services, TurnContext};
pub use dispatcher::{Skill, TurnOutcome, UNKNOWN_INTENT_SPEECH};
pub use request::{Intent, Request, RequestEnvelope, RequestType, Slot};
pub use response::{
    Card, CardImage, FinalResponse, OutputSpeech, Reprompt, Response, ResponseBody,
    ResponseOptions, SkillResponse, RESPONSE_VERSION,
};
pub use slots::{extract_slots, Slots};
