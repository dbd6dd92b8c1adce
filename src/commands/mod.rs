//! One-shot CLI commands

pub mod list;
pub mod login;
pub mod logout;
pub mod publish;
pub mod status;
