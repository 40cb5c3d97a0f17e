mod plugin;
mod rename;
mod state;

pub use plugin::*;
pub use rename::*;
pub use state::*;
