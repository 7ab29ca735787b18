//! CLI module
//!
//! Command-line interface over [`crate::client::SearchClient`].
//!
//! # Commands
//!
//! - `search` - Collect tweets up to a target, or all of them
//! - `pages` - Fetch search pages under a page limit
//! - `count` - Count tweets matching a query
//! - `count-user` - Count every tweet of one user
//! - `user` / `users` - Look up users by handle
//! - `tweets` - Look up tweets by id

mod commands;
mod runner;

pub use commands::{Cli, Commands, CriteriaArgs, FieldArgs};
pub use runner::Runner;

#[cfg(test)]
mod tests;
