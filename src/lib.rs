//! WealthWise Advisor
//!
//! Personal financial goal planner with an AI copilot:
//! - Projects compound growth of a lump sum plus monthly contributions
//! - Keeps one goal plan per session, with optional AI strategy commentary
//! - Chats with a Gemini-backed advisor about the current plan
//!
//! FLOW:
//! COMMAND → SESSION (PLAN / CONVERSATION) → GATEWAY? → VIEW

pub mod api;
pub mod config;
pub mod conversation;
pub mod error;
pub mod format;
pub mod gemini;
pub mod models;
pub mod plan;
pub mod projection;
pub mod session;

pub use error::{AdvisorError, Result};

// Re-export common types
pub use models::*;
pub use session::{Command, Session, SessionView};
