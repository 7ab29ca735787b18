//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, CriteriaArgs, FieldArgs};
use crate::client::SearchClient;
use crate::config::ClientConfig;
use crate::error::{Error, Result, ResultExt};
use crate::fields::{
    parse_list, Expansion, MediaField, PlaceField, PollField, TweetField, UserField,
};
use crate::output::{write_records, OutputFormat};
use crate::pagination::AggregationMode;
use crate::query::{CountQuery, FieldSelection, PageRequest, SearchCriteria};
use crate::types::{Granularity, JsonValue, SearchEndpoint};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let client = self.client()?.with_cancellation(cancel_on_ctrl_c());

        match &self.cli.command {
            Commands::Search {
                terms,
                target,
                archive,
                criteria,
            } => {
                let endpoint = endpoint(*archive);
                let found = client
                    .get_tweets(build_criteria(terms, criteria)?, *target, endpoint)
                    .await?;
                info!("Collected {} tweet(s)", found.len());
                self.emit(&found)
            }
            Commands::Pages {
                terms,
                archive,
                max_pages,
                all_pages,
                page_size,
                next_token,
                raw,
                criteria,
            } => {
                let mut request =
                    PageRequest::new(build_criteria(terms, criteria)?).with_page_size(*page_size);
                if let Some(token) = next_token {
                    request = request.with_cursor(token);
                }
                let max_pages = (!*all_pages).then_some(*max_pages);
                let mode = if *raw {
                    AggregationMode::RawPages
                } else {
                    AggregationMode::Items
                };

                let outcome = if *archive {
                    client.get_all_tweets(request, max_pages, mode).await?
                } else {
                    client.get_recent_tweets(request, max_pages, mode).await?
                };
                info!(
                    "Fetched {} page(s), stopped: {:?}",
                    outcome.pages_fetched, outcome.stop_reason
                );
                self.emit(&outcome.into_records())
            }
            Commands::Count {
                terms,
                recent,
                granularity,
                start_time,
                end_time,
                since_id,
                until_id,
            } => {
                let granularity = granularity
                    .parse::<Granularity>()
                    .context("--granularity")?;
                let mut query = CountQuery::new(terms.iter().cloned())
                    .granularity(granularity)
                    .with_endpoint(if *recent {
                        SearchEndpoint::Recent
                    } else {
                        SearchEndpoint::Archive
                    });
                query.start_time.clone_from(start_time);
                query.end_time.clone_from(end_time);
                query.since_id.clone_from(since_id);
                query.until_id.clone_from(until_id);

                let total = client.get_tweet_count(query).await?;
                println!("{total}");
                Ok(())
            }
            Commands::CountUser { username } => {
                let total = client.get_tweet_count_user(username).await?;
                println!("{total}");
                Ok(())
            }
            Commands::User { username, fields } => {
                let body = client.get_user(username, &build_fields(fields)?).await?;
                self.emit_body(body)
            }
            Commands::Users { usernames, fields } => {
                let body = client.get_users(usernames, &build_fields(fields)?).await?;
                self.emit_body(body)
            }
            Commands::Tweets { ids, fields } => {
                let body = client
                    .get_tweets_by_ids(ids, &build_fields(fields)?)
                    .await?;
                self.emit_body(body)
            }
        }
    }

    /// Load the configuration file (if any) and overlay the environment
    fn load_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };
        config.apply_env();
        debug!("Using {:?}", config);
        Ok(config)
    }

    fn client(&self) -> Result<SearchClient> {
        SearchClient::new(self.load_config()?)
    }

    fn emit(&self, records: &[JsonValue]) -> Result<()> {
        write_records(self.cli.format, self.cli.output.as_deref(), records)
    }

    /// Emit a lookup response: the whole body as JSON, its `data` records otherwise
    fn emit_body(&self, body: JsonValue) -> Result<()> {
        if let Some(errors) = body.get("errors") {
            warn!("Provider reported errors: {}", errors);
        }
        match self.cli.format {
            OutputFormat::Json => self.emit(&[body]),
            _ => self.emit(&data_records(body)?),
        }
    }
}

fn endpoint(archive: bool) -> SearchEndpoint {
    if archive {
        SearchEndpoint::Archive
    } else {
        SearchEndpoint::Recent
    }
}

/// Cancellation token tripped by Ctrl-C
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping after the current page");
            child.cancel();
        }
    });
    token
}

/// `data` as a list of records (a single object becomes a one-element list)
fn data_records(body: JsonValue) -> Result<Vec<JsonValue>> {
    match body {
        JsonValue::Object(mut map) => match map.remove("data") {
            Some(JsonValue::Array(items)) => Ok(items),
            Some(item @ JsonValue::Object(_)) => Ok(vec![item]),
            _ => Err(Error::decode("response has no data")),
        },
        _ => Err(Error::decode("response is not a JSON object")),
    }
}

pub(crate) fn build_fields(args: &FieldArgs) -> Result<FieldSelection> {
    fn list<T>(value: Option<&String>) -> Result<Vec<T>>
    where
        T: std::str::FromStr<Err = Error>,
    {
        value.map_or_else(|| Ok(Vec::new()), |v| parse_list(v))
    }

    Ok(FieldSelection::new()
        .expansions(list::<Expansion>(args.expansions.as_ref())?)
        .tweet_fields(list::<TweetField>(args.tweet_fields.as_ref())?)
        .user_fields(list::<UserField>(args.user_fields.as_ref())?)
        .media_fields(list::<MediaField>(args.media_fields.as_ref())?)
        .place_fields(list::<PlaceField>(args.place_fields.as_ref())?)
        .poll_fields(list::<PollField>(args.poll_fields.as_ref())?))
}

pub(crate) fn build_criteria(terms: &[String], args: &CriteriaArgs) -> Result<SearchCriteria> {
    let mut criteria =
        SearchCriteria::new(terms.iter().cloned()).fields(build_fields(&args.fields)?);
    criteria.start_time.clone_from(&args.start_time);
    criteria.end_time.clone_from(&args.end_time);
    criteria.since_id.clone_from(&args.since_id);
    criteria.until_id.clone_from(&args.until_id);
    if let Some(order) = &args.sort_order {
        criteria = criteria.sort_order(order.parse()?);
    }
    Ok(criteria)
}
