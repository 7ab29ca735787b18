//! CLI commands and argument parsing

use crate::output::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Paginated, rate-limit aware client for the search API
#[derive(Parser, Debug)]
#[command(name = "search-client")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Output file (stdout when omitted; required for `table`)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect tweets matching a query, following cursors
    Search {
        /// Query terms, joined with spaces (put `--` before terms starting with `-`)
        #[arg(required = true)]
        terms: Vec<String>,

        /// Stop after this many tweets (at least 10); all tweets when omitted
        #[arg(short = 'n', long)]
        target: Option<u32>,

        /// Search the full archive instead of the recent window
        #[arg(long)]
        archive: bool,

        #[command(flatten)]
        criteria: CriteriaArgs,
    },

    /// Fetch search pages under a page limit
    Pages {
        /// Query terms, joined with spaces
        #[arg(required = true)]
        terms: Vec<String>,

        /// Search the full archive instead of the recent window
        #[arg(long)]
        archive: bool,

        /// Maximum number of pages
        #[arg(long, default_value = "1", conflicts_with = "all_pages")]
        max_pages: u32,

        /// Follow cursors until the provider runs out
        #[arg(long)]
        all_pages: bool,

        /// Requested page size (`max_results`)
        #[arg(long, default_value = "10")]
        page_size: u32,

        /// Resume from a continuation cursor
        #[arg(long)]
        next_token: Option<String>,

        /// Emit raw page bodies instead of flattened tweets
        #[arg(long)]
        raw: bool,

        #[command(flatten)]
        criteria: CriteriaArgs,
    },

    /// Count tweets matching a query
    Count {
        /// Query terms, joined with spaces
        #[arg(required = true)]
        terms: Vec<String>,

        /// Count over the recent window instead of the full archive
        #[arg(long)]
        recent: bool,

        /// Bucket size: minute, hour or day
        #[arg(long, default_value = "day")]
        granularity: String,

        /// Oldest timestamp (RFC 3339), inclusive
        #[arg(long)]
        start_time: Option<String>,

        /// Newest timestamp (RFC 3339), exclusive
        #[arg(long)]
        end_time: Option<String>,

        #[arg(long)]
        since_id: Option<String>,

        #[arg(long)]
        until_id: Option<String>,
    },

    /// Count every tweet a user has posted since the account was created
    CountUser {
        /// User handle, without `@`
        username: String,
    },

    /// Look up one user by handle
    User {
        username: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Look up several users by handle
    Users {
        #[arg(required = true)]
        usernames: Vec<String>,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Look up tweets by id
    Tweets {
        #[arg(required = true)]
        ids: Vec<String>,

        #[command(flatten)]
        fields: FieldArgs,
    },
}

/// Search filters shared by `search` and `pages`
#[derive(Args, Debug, Clone, Default)]
pub struct CriteriaArgs {
    /// Oldest timestamp (RFC 3339), inclusive
    #[arg(long)]
    pub start_time: Option<String>,

    /// Newest timestamp (RFC 3339), exclusive
    #[arg(long)]
    pub end_time: Option<String>,

    #[arg(long)]
    pub since_id: Option<String>,

    #[arg(long)]
    pub until_id: Option<String>,

    /// recency or relevancy
    #[arg(long)]
    pub sort_order: Option<String>,

    #[command(flatten)]
    pub fields: FieldArgs,
}

/// Comma-separated field selections
#[derive(Args, Debug, Clone, Default)]
pub struct FieldArgs {
    #[arg(long)]
    pub expansions: Option<String>,

    #[arg(long)]
    pub tweet_fields: Option<String>,

    #[arg(long)]
    pub user_fields: Option<String>,

    #[arg(long)]
    pub media_fields: Option<String>,

    #[arg(long)]
    pub place_fields: Option<String>,

    #[arg(long)]
    pub poll_fields: Option<String>,
}
