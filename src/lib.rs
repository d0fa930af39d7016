pub mod config;
pub mod output;
pub mod results;
pub mod scoring;
pub mod session;
pub mod standings;
