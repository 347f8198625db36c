pub mod audio;
pub mod completion;
pub mod config;
pub mod journal;
pub mod planner;
pub mod session;
pub mod write;
