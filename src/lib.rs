//! quill-cms: a terminal client for Markdown CMS backends
//!
//! This crate talks to a remote content service over REST: it lists,
//! edits, previews and publishes markdown documents ("notes" and
//! "posts"), with an interactive TUI and a set of one-shot subcommands.
//! Authentication, persistence and git operations live on the server;
//! the client holds nothing beyond a persisted bearer token.

pub mod api;
pub mod auth;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod content;
pub mod tui;
