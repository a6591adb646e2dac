/// piston-loadtest library - exposes modules for testing and embedding.
pub mod cli;
pub mod error;
pub mod http;
pub mod output;
pub mod payloads;
pub mod runner;
pub mod simulator;
