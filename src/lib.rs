pub mod api;
pub mod environment;
pub mod error;
pub mod llm;
pub mod logging;
pub mod note;
pub mod prompt;
pub mod publish;
pub mod service;

pub const TARGET_WEB_REQUEST: &str = "web_request";
pub const TARGET_LLM_REQUEST: &str = "llm_request";
