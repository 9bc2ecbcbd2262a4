//! A RESP2 speaking in-memory cache server.
//!
//! Requests are decoded with [`resp::Decoder`], dispatched through the
//! [`cmd::CmdTable`] against a shared [`storage::Cache`], and answered with
//! [`resp::Encoder`].

pub mod client;
pub mod cmd;
pub mod config;
pub mod logo;
pub mod server;

pub use server::Server;
