//! Field vocabularies
//!
//! The provider only accepts a fixed set of names for expansions and for each
//! entity's optional fields. Each vocabulary is a closed enum, so an unknown
//! name is rejected when it is parsed rather than by the provider.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Common behavior of every vocabulary enum
pub trait FieldName: Copy + fmt::Debug + 'static {
    /// Every member, in declaration order
    const ALL: &'static [Self];

    /// Wire name of the member
    fn as_str(self) -> &'static str;
}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl FieldName for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(Error::unknown_variant($kind, other)),
                }
            }
        }
    };
}

vocabulary! {
    /// Objects the provider can inline alongside the primary results
    Expansion, "expansion" {
        AttachmentsPollIds => "attachments.poll_ids",
        AttachmentsMediaKeys => "attachments.media_keys",
        AuthorId => "author_id",
        EntitiesMentionsUsername => "entities.mentions.username",
        GeoPlaceId => "geo.place_id",
        InReplyToUserId => "in_reply_to_user_id",
        ReferencedTweetsId => "referenced_tweets.id",
        ReferencedTweetsIdAuthorId => "referenced_tweets.id.author_id",
        PinnedTweetId => "pinned_tweet_id",
    }
}

vocabulary! {
    /// Optional attributes of a tweet
    TweetField, "tweet field" {
        Attachments => "attachments",
        AuthorId => "author_id",
        ContextAnnotations => "context_annotations",
        ConversationId => "conversation_id",
        CreatedAt => "created_at",
        Entities => "entities",
        Geo => "geo",
        Id => "id",
        InReplyToUserId => "in_reply_to_user_id",
        Lang => "lang",
        PublicMetrics => "public_metrics",
        PossiblySensitive => "possibly_sensitive",
        ReferencedTweets => "referenced_tweets",
        ReplySettings => "reply_settings",
        Source => "source",
        Text => "text",
        Withheld => "withheld",
    }
}

vocabulary! {
    /// Optional attributes of a user
    UserField, "user field" {
        CreatedAt => "created_at",
        Description => "description",
        Entities => "entities",
        Id => "id",
        Location => "location",
        Name => "name",
        PinnedTweetId => "pinned_tweet_id",
        ProfileImageUrl => "profile_image_url",
        Protected => "protected",
        PublicMetrics => "public_metrics",
        Url => "url",
        Username => "username",
        Verified => "verified",
        Withheld => "withheld",
    }
}

vocabulary! {
    /// Optional attributes of a media attachment
    MediaField, "media field" {
        DurationMs => "duration_ms",
        Height => "height",
        MediaKey => "media_key",
        PreviewImageUrl => "preview_image_url",
        Type => "type",
        Url => "url",
        Width => "width",
        PublicMetrics => "public_metrics",
        NonPublicMetrics => "non_public_metrics",
        OrganicMetrics => "organic_metrics",
        PromotedMetrics => "promoted_metrics",
        AltText => "alt_text",
    }
}

vocabulary! {
    /// Optional attributes of a place
    PlaceField, "place field" {
        ContainedWithin => "contained_within",
        Country => "country",
        CountryCode => "country_code",
        FullName => "full_name",
        Geo => "geo",
        Id => "id",
        Name => "name",
        PlaceType => "place_type",
    }
}

vocabulary! {
    /// Optional attributes of a poll
    PollField, "poll field" {
        DurationMinutes => "duration_minutes",
        EndDatetime => "end_datetime",
        Id => "id",
        Options => "options",
        VotingStatus => "voting_status",
    }
}

/// Parse a comma separated list of vocabulary names, ignoring blanks
pub fn parse_list<T>(input: &str) -> Result<Vec<T>>
where
    T: FromStr<Err = Error>,
{
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip_through_from_str() {
        for field in TweetField::ALL {
            assert_eq!(field.as_str().parse::<TweetField>().unwrap(), *field);
        }
        for field in PollField::ALL {
            assert_eq!(field.as_str().parse::<PollField>().unwrap(), *field);
        }
    }

    #[test]
    fn test_unknown_name_rejected() {
        let err = "favourites".parse::<UserField>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown user field value: 'favourites'");
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&Expansion::ReferencedTweetsIdAuthorId).unwrap();
        assert_eq!(json, "\"referenced_tweets.id.author_id\"");

        let field: MediaField = serde_json::from_str("\"preview_image_url\"").unwrap();
        assert_eq!(field, MediaField::PreviewImageUrl);
    }

    #[test]
    fn test_parse_list() {
        let fields: Vec<TweetField> = parse_list("author_id, created_at,,text").unwrap();
        assert_eq!(
            fields,
            vec![TweetField::AuthorId, TweetField::CreatedAt, TweetField::Text]
        );
        assert!(parse_list::<PlaceField>("").unwrap().is_empty());
        assert!(parse_list::<PlaceField>("country,planet").is_err());
    }
}
