pub mod build;
mod command_result;
pub mod helper;
pub mod init;
pub mod resolve;
pub mod serve;

pub use command_result::*;
