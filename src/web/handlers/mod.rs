pub mod export_handlers;
pub mod idea_handlers;
pub mod system_handlers;

pub use export_handlers::*;
pub use idea_handlers::*;
pub use system_handlers::*;
