pub mod skill;
pub mod summary;
