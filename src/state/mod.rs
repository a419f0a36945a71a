//! Application state module

mod app_state;
mod consent;
mod forms;
mod preview_state;
mod theme;

pub use app_state::*;
pub use consent::*;
pub use forms::*;
pub use preview_state::*;
pub use theme::*;
