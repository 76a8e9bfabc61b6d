pub mod engine;
pub mod envelope;
pub mod generator;
pub mod handlers;
pub mod markup;
pub mod placeholders;
pub mod prompts;
pub mod source;
