pub mod category;
pub mod config;
pub mod palette;
pub mod project;
pub mod schedule;
pub mod task;

pub use category::*;
pub use config::*;
pub use palette::*;
pub use project::*;
pub use schedule::*;
pub use task::*;
