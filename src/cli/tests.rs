//! Tests for CLI argument parsing

use super::runner::{build_criteria, build_fields};
use super::*;
use crate::fields::{Expansion, TweetField};
use crate::output::OutputFormat;
use crate::types::SortOrder;
use clap::Parser;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

#[test]
fn test_parse_search() {
    let cli = Cli::try_parse_from([
        "search-client",
        "search",
        "-n",
        "50",
        "--archive",
        "--tweet-fields",
        "lang,created_at",
        "--format",
        "csv",
        "--output",
        "tweets.csv",
        "--",
        "from:TwitterDev",
        "-is:retweet",
    ])
    .unwrap();

    assert_eq!(cli.format, OutputFormat::Csv);
    assert_eq!(cli.output, Some(PathBuf::from("tweets.csv")));
    match cli.command {
        Commands::Search {
            terms,
            target,
            archive,
            criteria,
        } => {
            assert_eq!(terms, vec!["from:TwitterDev", "-is:retweet"]);
            assert_eq!(target, Some(50));
            assert!(archive);
            assert_eq!(criteria.fields.tweet_fields.as_deref(), Some("lang,created_at"));
        }
        other => panic!("Expected Search, got {other:?}"),
    }
}

#[test]
fn test_parse_pages_defaults() {
    let cli = Cli::try_parse_from(["search-client", "pages", "rust"]).unwrap();
    assert_eq!(cli.format, OutputFormat::Json);
    assert!(!cli.verbose);
    match cli.command {
        Commands::Pages {
            max_pages,
            all_pages,
            page_size,
            raw,
            ..
        } => {
            assert_eq!(max_pages, 1);
            assert!(!all_pages);
            assert_eq!(page_size, 10);
            assert!(!raw);
        }
        other => panic!("Expected Pages, got {other:?}"),
    }
}

#[test]
fn test_max_pages_conflicts_with_all_pages() {
    let result = Cli::try_parse_from([
        "search-client",
        "pages",
        "rust",
        "--max-pages",
        "3",
        "--all-pages",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_parse_count_user_and_globals() {
    let cli = Cli::try_parse_from([
        "search-client",
        "--config",
        "client.yaml",
        "-v",
        "count-user",
        "TwitterDev",
    ])
    .unwrap();

    assert!(cli.verbose);
    assert_eq!(cli.config, Some(PathBuf::from("client.yaml")));
    assert!(matches!(cli.command, Commands::CountUser { ref username } if username == "TwitterDev"));
}

#[test]
fn test_search_requires_terms() {
    assert!(Cli::try_parse_from(["search-client", "search"]).is_err());
}

#[test]
fn test_build_fields() {
    let args = FieldArgs {
        expansions: Some("author_id, attachments.media_keys".to_string()),
        tweet_fields: Some("created_at".to_string()),
        ..FieldArgs::default()
    };
    let fields = build_fields(&args).unwrap();
    assert_eq!(
        fields.expansions,
        vec![Expansion::AuthorId, Expansion::AttachmentsMediaKeys]
    );
    assert_eq!(fields.tweet, vec![TweetField::CreatedAt]);
    assert!(fields.user.is_empty());
}

#[test]
fn test_build_fields_rejects_unknown_name() {
    let args = FieldArgs {
        tweet_fields: Some("created_at,favourites".to_string()),
        ..FieldArgs::default()
    };
    assert!(build_fields(&args).unwrap_err().is_config());
}

#[test]
fn test_build_criteria() {
    let args = CriteriaArgs {
        start_time: Some("2024-01-01T00:00:00Z".to_string()),
        sort_order: Some("recency".to_string()),
        ..CriteriaArgs::default()
    };
    let terms = vec!["rust".to_string(), "lang:en".to_string()];
    let criteria = build_criteria(&terms, &args).unwrap();

    assert_eq!(criteria.query_string(), "rust lang:en");
    assert_eq!(criteria.start_time.as_deref(), Some("2024-01-01T00:00:00Z"));
    assert_eq!(criteria.sort_order, Some(SortOrder::Recency));
    assert!(criteria.end_time.is_none());
}
