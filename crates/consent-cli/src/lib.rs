//! Consent CLI — prompts, menu loop and status rendering.

pub mod prompt;
pub mod render;
pub mod session;

pub use prompt::{Prompter, TerminalPrompter};
pub use session::{MenuAction, Session, SessionState};
