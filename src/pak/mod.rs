pub mod archive;
pub mod audit;
pub mod classify;
pub mod config;
pub mod digest;
pub mod disk;
pub mod reconcile;
pub mod resolve;
pub mod writer;
