//! Stdio bridge for JavaScript bundler hosts.
//!
//! A thin host-side shim forwards each plugin hook as one JSON line on stdin
//! and reads the answer from stdout. Requests are answered strictly in order.
//!
//! ## Module Structure
//!
//! - `server`: Request dispatch and the stdio loop
//! - `types`: Wire types for requests and responses

mod server;
pub mod types;

pub use server::{Bridge, LoadedModules, run_server, serve};
