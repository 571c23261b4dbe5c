//! Script generation: request/result model, prompt, reply assembly and the
//! orchestrator that calls the gateway.

pub mod assemble;
pub mod generator;
pub mod model;
pub mod prompt;
pub mod vocabulary;

pub use assemble::{assemble_result, GenerationPayload};
pub use generator::{CompletionRequest, CompletionTransport, ScriptGenerator};
pub use model::{GenerationRequest, GenerationResult, Language, ScriptLength};
pub use prompt::{build_prompt, SYSTEM_PROMPT};
