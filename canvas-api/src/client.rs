use std::time::Duration;

use reqwest::{Client as HttpClient, StatusCode, header};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, info};
use url::Url;

use crate::cache::Cache;
use crate::course::{Course, CourseId};
use crate::creds::Credential;
use crate::endpoint::Endpoint;
use crate::error::{CanvasError, Result};
use crate::submission::{AssignmentGroup, Submission, resolve_groups};
use crate::user::User;
use crate::util::{
    COURSES_PATH, PER_PAGE, USER_PROFILE_PATH, assignment_groups_path, next_link,
    submissions_path,
};

/// Upper bound on pages merged by a single fetch. A healthy Canvas
/// deployment reports far fewer; a server that keeps handing out next
/// links fails the call instead of exhausting memory.
pub const MAX_PAGES: usize = 500;

/// Client for the Canvas REST API, backed by the local sample-data cache.
/// Constructed once at startup; fetches consult the cache first and fall
/// back to paginated live requests.
#[derive(Debug)]
pub struct Client {
    http: HttpClient,
    base_url: Url,
    cache: Cache,
}

impl Client {
    pub fn new(base_url: Url, cache: Cache) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| CanvasError::Setup {
                reason: format!("could not build HTTP client: {err}"),
            })?;

        Ok(Self {
            http,
            base_url,
            cache,
        })
    }

    /// Resolves an endpoint for a credential: the cached document if the
    /// credential is a known test identity with a stored response,
    /// otherwise a live fetch. Returns a single JSON object for
    /// single-resource endpoints and a merged JSON array for collections.
    #[tracing::instrument(level = "debug", skip(self, credential))]
    pub async fn fetch(&self, endpoint: &str, credential: &str) -> Result<Value> {
        let endpoint = Endpoint::new(endpoint)?;
        let credential = Credential::new(credential)?;

        if self.cache.is_known_identity(&credential) {
            if let Some(document) = self.cache.lookup(&endpoint, &credential)? {
                debug!(%endpoint, "resolved from local cache");
                return Ok(document);
            }
        }

        self.fetch_live(&endpoint, &credential).await
    }

    async fn fetch_live(&self, endpoint: &Endpoint, credential: &Credential) -> Result<Value> {
        let mut url = self.page_url(self.endpoint_url(endpoint)?, endpoint, credential);
        let mut merged = Vec::new();

        for page in 1..=MAX_PAGES {
            // The URL itself stays out of the logs: its query string
            // carries the access token.
            info!(%endpoint, page, "requesting Canvas page");
            let response =
                self.http
                    .get(url.clone())
                    .send()
                    .await
                    .map_err(|source| CanvasError::Transport {
                        endpoint: endpoint.to_string(),
                        source,
                    })?;

            if response.status() == StatusCode::NOT_FOUND {
                return Err(CanvasError::Api {
                    message: format!("Canvas URL not found for URL '{endpoint}'"),
                });
            }

            // The Link header has to be read before the body consumes the
            // response.
            let next = response
                .headers()
                .get(header::LINK)
                .and_then(|value| value.to_str().ok())
                .and_then(next_link)
                .map(str::to_owned);

            let body: Value =
                response
                    .json()
                    .await
                    .map_err(|source| CanvasError::Transport {
                        endpoint: endpoint.to_string(),
                        source,
                    })?;

            match body {
                Value::Object(object) => {
                    if object.contains_key("errors") {
                        return Err(payload_error(&object, endpoint, credential));
                    }
                    // Single-resource endpoints answer with one object.
                    return Ok(Value::Object(object));
                }
                Value::Array(items) => {
                    merged.extend(items);
                    debug!(page, total = merged.len(), "merged page of results");
                    match next {
                        Some(next) => {
                            let next = Url::parse(&next).map_err(|_| CanvasError::Api {
                                message: format!(
                                    "Canvas returned an unusable next-page link for URL '{endpoint}'"
                                ),
                            })?;
                            url = self.page_url(next, endpoint, credential);
                        }
                        None => return Ok(Value::Array(merged)),
                    }
                }
                _ => {
                    return Err(CanvasError::Api {
                        message: format!("Canvas returned an unexpected payload for URL '{endpoint}'"),
                    });
                }
            }
        }

        Err(CanvasError::Api {
            message: format!(
                "Canvas kept returning next-page links past {MAX_PAGES} pages for URL '{endpoint}'"
            ),
        })
    }

    fn endpoint_url(&self, endpoint: &Endpoint) -> Result<Url> {
        self.base_url
            .join(endpoint.as_str())
            .map_err(|_| CanvasError::Api {
                message: format!("could not build a request URL for '{endpoint}'"),
            })
    }

    fn page_url(&self, mut url: Url, endpoint: &Endpoint, credential: &Credential) -> Url {
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("access_token", credential.token());
            pairs.append_pair("per_page", PER_PAGE);
            if endpoint.is_submissions_listing() {
                pairs.append_pair("include[]", "assignment");
            }
        }
        url
    }

    /// Fetches the acting user's profile.
    pub async fn get_user(&self, credential: &str) -> Result<User> {
        let value = self.fetch(USER_PROFILE_PATH, credential).await?;
        decode(USER_PROFILE_PATH, value)
    }

    /// Fetches every course visible to the credential.
    pub async fn get_courses(&self, credential: &str) -> Result<Vec<Course>> {
        let value = self.fetch(COURSES_PATH, credential).await?;
        decode(COURSES_PATH, value)
    }

    /// Fetches the course's submissions with each assignment enriched by
    /// its assignment group. Fails with a consistency error if any
    /// submission references a group the course does not report.
    #[tracing::instrument(level = "debug", skip(self, credential))]
    pub async fn get_submissions(
        &self,
        course_id: CourseId,
        credential: &str,
    ) -> Result<Vec<Submission>> {
        let submissions_endpoint = submissions_path(course_id);
        let groups_endpoint = assignment_groups_path(course_id);

        let submissions = self.fetch(&submissions_endpoint, credential).await?;
        let groups = self.fetch(&groups_endpoint, credential).await?;

        let submissions: Vec<Submission> = decode(&submissions_endpoint, submissions)?;
        let groups: Vec<AssignmentGroup> = decode(&groups_endpoint, groups)?;

        resolve_groups(submissions, &groups)
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|source| CanvasError::Decode {
        endpoint: endpoint.to_owned(),
        source,
    })
}

fn payload_error(
    object: &Map<String, Value>,
    endpoint: &Endpoint,
    credential: &Credential,
) -> CanvasError {
    let first_message = object
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
        .and_then(|error| error.get("message"))
        .and_then(Value::as_str);

    let message = match first_message {
        Some("Invalid access token.") => format!(
            "Invalid access token '{}' for URL '{endpoint}'. Did you spell the name right?",
            credential.token()
        ),
        Some(error_message) => format!("Canvas error '{error_message}' for URL '{endpoint}'"),
        None => format!("General canvas error for URL '{endpoint}'"),
    };

    CanvasError::Api { message }
}
