//! Protocol roles: the server signs, the client blinds and intersects.

pub mod client;
pub mod server;

pub use client::RsaClient;
pub use server::RsaServer;
