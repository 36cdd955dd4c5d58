//! Headless grid view: windowing, configuration and interactive state.

mod config;
mod edit;
mod resize;
mod selection;
mod state;
mod window;

pub use config::*;
pub use edit::*;
pub use resize::*;
pub use selection::*;
pub use state::*;
pub use window::*;
