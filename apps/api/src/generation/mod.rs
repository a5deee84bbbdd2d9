// Email generation: prompt building, the model call, response parsing.
// All model calls go through llm_client::ModelGateway — no direct provider calls here.

pub mod builder;
pub mod generator;
pub mod handlers;
pub mod parser;
pub mod prompts;
pub mod tone;
