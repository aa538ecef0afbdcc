mod compose;
mod help;
mod pane;
mod reply;

pub use compose::*;
pub use help::*;
pub use pane::*;
pub use reply::*;
