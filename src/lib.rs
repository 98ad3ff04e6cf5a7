pub mod app;
pub mod model;
pub mod ui;

pub use crate::app::{App, RunSummary};
pub use crate::model::config::AppConfig;
pub use crate::model::world::World;
