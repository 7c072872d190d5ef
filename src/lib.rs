pub mod api;
pub mod config;
pub mod counter;
pub mod cues;
pub mod document;
pub mod errors;
pub mod logging;
pub mod ui;
pub mod workflow;
