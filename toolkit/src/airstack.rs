//! # Airstack Farcaster Lookup
//!
//! One fixed GraphQL query against the Airstack API: given a Farcaster
//! username, fetch the profile (follower counts, FarScore) and the five
//! most recent casts. This is the only networked code in the crate; the
//! key-material core never touches I/O.
//!
//! The wire shape is Airstack's, not ours — the serde structs below mirror
//! the response exactly and get flattened into [`FarcasterAccount`] at the
//! boundary so callers never see the three levels of GraphQL nesting.
//! An account with no profile and no casts is a *successful empty lookup*,
//! not an error; only transport, HTTP, and decode failures are errors.

use serde::Deserialize;
use thiserror::Error;

/// The Airstack GraphQL endpoint. Fixed; there is no self-hosted variant.
pub const AIRSTACK_ENDPOINT: &str = "https://api.airstack.xyz/gql";

/// How many recent casts to request. Matches what the display screen can
/// comfortably show.
const CAST_LIMIT: usize = 5;

/// Errors from a Farcaster lookup.
///
/// All recoverable — the menu shows the message and returns to the prompt.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("AIRSTACK_API_KEY not set")]
    MissingApiKey,

    #[error("request to Airstack failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Airstack returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode Airstack response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A Farcaster account as ethkit sees it: flattened, no GraphQL nesting.
#[derive(Debug, Clone, Default)]
pub struct FarcasterAccount {
    /// Matching social profiles. In practice zero or one entry.
    pub profiles: Vec<SocialProfile>,
    /// Most recent casts, newest first, at most [`CAST_LIMIT`].
    pub casts: Vec<Cast>,
}

impl FarcasterAccount {
    /// True when the lookup found neither a profile nor any casts —
    /// rendered as "no data found", never treated as a failure.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty() && self.casts.is_empty()
    }
}

/// Profile stats for one Farcaster identity.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SocialProfile {
    #[serde(rename = "profileName", default)]
    pub profile_name: String,
    #[serde(rename = "followerCount", default)]
    pub follower_count: u64,
    #[serde(rename = "followingCount", default)]
    pub following_count: u64,
    #[serde(rename = "farcasterScore", default)]
    score: Option<FarcasterScore>,
}

impl SocialProfile {
    /// The FarScore, or 0.0 when Airstack omits the score object.
    pub fn far_score(&self) -> f64 {
        self.score.as_ref().map_or(0.0, |s| s.far_score)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
struct FarcasterScore {
    #[serde(rename = "farScore", default)]
    far_score: f64,
}

/// One cast (post) on Farcaster.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Cast {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub hash: String,
}

// Wire-format mirror of the GraphQL response. Private on purpose: the
// nesting is an Airstack artifact, not part of our API. Every level is an
// Option because GraphQL reports "nothing matched" as an explicit `null`
// at whichever level it pleases — `{"data":null}`, `{"Socials":null}`, and
// `{"Social":null}` are all routine responses, and `#[serde(default)]`
// alone would only cover the *missing*-field case, not a literal null.

#[derive(Debug, Deserialize, Default)]
struct Envelope {
    #[serde(default)]
    data: Option<ResponseData>,
}

#[derive(Debug, Deserialize, Default)]
struct ResponseData {
    #[serde(rename = "Socials", default)]
    socials: Option<Socials>,
    #[serde(rename = "FarcasterCasts", default)]
    farcaster_casts: Option<FarcasterCasts>,
}

#[derive(Debug, Deserialize, Default)]
struct Socials {
    #[serde(rename = "Social", default)]
    social: Option<Vec<SocialProfile>>,
}

#[derive(Debug, Deserialize, Default)]
struct FarcasterCasts {
    #[serde(rename = "Cast", default)]
    cast: Option<Vec<Cast>>,
}

impl From<Envelope> for FarcasterAccount {
    fn from(envelope: Envelope) -> Self {
        let data = envelope.data.unwrap_or_default();
        Self {
            profiles: data
                .socials
                .and_then(|s| s.social)
                .unwrap_or_default(),
            casts: data
                .farcaster_casts
                .and_then(|c| c.cast)
                .unwrap_or_default(),
        }
    }
}

/// Client for the Airstack GraphQL API.
///
/// Holds the API credential and a connection-pooling `reqwest::Client`.
/// Cheap to clone, safe to share.
#[derive(Debug, Clone)]
pub struct AirstackClient {
    api_key: String,
    endpoint: String,
    http: reqwest::Client,
}

impl AirstackClient {
    /// Create a client with the given API key.
    ///
    /// An empty key is accepted here and rejected at query time, so that
    /// "the key is missing" surfaces when the user actually runs a lookup
    /// rather than crashing the whole program at startup.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: AIRSTACK_ENDPOINT.to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Point the client at a different endpoint. Exists for tests; the
    /// real API has exactly one URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Fetch the profile and recent casts for a Farcaster username.
    ///
    /// One POST, no retries: every failure is reported to the caller as a
    /// typed [`LookupError`] and the user decides whether to try again.
    pub async fn query_account(&self, fname: &str) -> Result<FarcasterAccount, LookupError> {
        if self.api_key.is_empty() {
            return Err(LookupError::MissingApiKey);
        }

        let payload = serde_json::json!({ "query": build_query(fname) });
        let response = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(LookupError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Envelope = serde_json::from_str(&body)?;
        Ok(envelope.into())
    }
}

/// Build the GraphQL document for one username.
///
/// The query text is fixed apart from the interpolated `fc_fname` identity.
/// Airstack addresses Farcaster users as `fc_fname:<name>` on the ethereum
/// blockchain scope for profiles and `ALL` for casts.
fn build_query(fname: &str) -> String {
    format!(
        "query MyQuery {{ \
           Socials( \
             input: {{ \
               filter: {{ dappName: {{ _eq: farcaster }}, identity: {{ _eq: \"fc_fname:{fname}\" }} }} \
               blockchain: ethereum \
             }} \
           ) {{ \
             Social {{ profileName followerCount followingCount farcasterScore {{ farScore }} }} \
           }} \
           FarcasterCasts( \
             input: {{ blockchain: ALL, filter: {{ castedBy: {{ _eq: \"fc_fname:{fname}\" }} }}, limit: {CAST_LIMIT} }} \
           ) {{ \
             Cast {{ text hash }} \
           }} \
         }}"
    )
}
