use reqwest::{header, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};

use super::query::Query;
use crate::config::BackendConfig;
use crate::domain::repositories::{RepositoryError, RepositoryResult};
use crate::domain::session::AuthState;

const USER_AGENT: &str = concat!("callsight-client/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the hosted backend's table API
///
/// Requests carry the project's anon key as `apikey` and, when signed in,
/// the session's access token as bearer so row-level security applies to
/// the current user. No request timeout is set.
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    auth: watch::Receiver<AuthState>,
}

impl RestClient {
    pub fn new(
        config: &BackendConfig,
        auth: watch::Receiver<AuthState>,
    ) -> RepositoryResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RepositoryError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: format!("{}/rest/v1", config.url.trim_end_matches('/')),
            anon_key: config.anon_key.clone(),
            auth,
        })
    }

    /// Reads every row matching the query
    pub async fn fetch_all<T: DeserializeOwned>(&self, query: &Query) -> RepositoryResult<Vec<T>> {
        debug!(table = query.table(), query = %query.to_query_string(), "fetching rows");

        let response = self
            .request(Method::GET, query)
            .send()
            .await
            .map_err(|e| RepositoryError::Transport(e.to_string()))?;

        read_json(response).await
    }

    /// Reads zero or one row; more than one match is an error
    pub async fn fetch_maybe_single<T: DeserializeOwned>(
        &self,
        query: &Query,
    ) -> RepositoryResult<Option<T>> {
        let mut rows = self.fetch_all::<T>(&query.clone().limit(2)).await?;

        match rows.len() {
            0 | 1 => Ok(rows.pop()),
            _ => Err(RepositoryError::MultipleRows {
                table: query.table().to_string(),
            }),
        }
    }

    /// Inserts a row, merging into the existing one on `on_conflict`
    pub async fn upsert<T>(&self, table: &str, on_conflict: &str, row: &T) -> RepositoryResult<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let query = Query::from(table).on_conflict(on_conflict);
        debug!(table, on_conflict, "upserting row");

        let response = self
            .request(Method::POST, &query)
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(row)
            .send()
            .await
            .map_err(|e| RepositoryError::Transport(e.to_string()))?;

        let mut rows: Vec<T> = read_json(response).await?;
        // An empty representation means the select policy hid the written row
        rows.pop().ok_or_else(|| {
            RepositoryError::AccessDenied(format!("upsert into {} returned no rows", table))
        })
    }

    fn request(&self, method: Method, query: &Query) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, query.table());

        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer_token())
            .header(header::ACCEPT, "application/json")
            .query(query.params())
    }

    fn bearer_token(&self) -> String {
        self.auth
            .borrow()
            .session
            .as_ref()
            .map(|session| session.access_token.clone())
            .unwrap_or_else(|| self.anon_key.clone())
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> RepositoryResult<T> {
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| RepositoryError::Transport(e.to_string()))?;

    if status.is_success() {
        return Ok(serde_json::from_slice(&body)?);
    }

    let message = error_message(&body);
    warn!(status = status.as_u16(), message = %message, "request rejected by backend");

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_ACCEPTABLE => {
            RepositoryError::AccessDenied(message)
        }
        _ => RepositoryError::Api {
            status: status.as_u16(),
            message,
        },
    })
}

/// Pulls `message` out of a PostgREST error body, falling back to raw text
fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| String::from_utf8_lossy(body).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_from_postgrest_body() {
        let body = br#"{"code":"42501","message":"permission denied for table user_profiles"}"#;
        assert_eq!(error_message(body), "permission denied for table user_profiles");
    }

    #[test]
    fn error_message_falls_back_to_text() {
        assert_eq!(error_message(b"Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let config = BackendConfig {
            url: "https://project.example.co/".to_string(),
            anon_key: "anon".to_string(),
        };
        let (_tx, rx) = watch::channel(AuthState::signed_out());

        let client = RestClient::new(&config, rx).unwrap();
        assert_eq!(client.base_url, "https://project.example.co/rest/v1");
        assert_eq!(client.bearer_token(), "anon");
    }
}
