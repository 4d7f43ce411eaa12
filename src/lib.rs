pub mod config;
pub mod pipeline;
pub mod report;
pub mod server;
pub mod sink;
