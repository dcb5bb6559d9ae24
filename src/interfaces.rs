pub mod cli;
pub mod notifier;
pub mod render;
pub mod repositories;
