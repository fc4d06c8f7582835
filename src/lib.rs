pub mod artifact;
pub mod broadcast;
pub mod list;
pub mod naming;
pub mod resolve;
pub mod targets;
pub mod types;
pub mod vault;
pub mod write;
