// Library surface for headless/integration tests and reuse.
// Terminal rendering stays in the binary (main.rs, ui.rs).
pub mod about;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod error;
pub mod feedback;
pub mod history;
pub mod logging;
pub mod reaction;
pub mod runtime;
pub mod schedule;
pub mod session;
pub mod util;

pub use error::{Result, SpeedyError};
pub use reaction::{ClickOutcome, ReactionTimer, StartOutcome, Status};
