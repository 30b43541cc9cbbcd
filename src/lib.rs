//! Inbox Triage — split, classify and draft replies to pasted emails by
//! relaying them to a hosted text-generation model.

pub mod config;
pub mod error;
pub mod llm;
pub mod relay;
pub mod server;
