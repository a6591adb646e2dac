/// HTTP transport for the target API.
pub mod client;
pub mod piston;
