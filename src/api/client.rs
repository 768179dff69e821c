//! HTTP client for the RepoHealth service.
//!
//! One `ApiClient` lives for the whole application. All requests carry the
//! session cookie; authentication itself happens in the browser via the
//! service's OAuth redirect, after which the cookie store picks up the
//! session transparently.

use log::{debug, info};
use reqwest::header;

use super::error::ApiError;
use crate::config::Config;
use crate::types::{HealthReport, Repository, UserProfile};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Browser-facing OAuth entry point; opened externally, never fetched.
    pub fn login_url(&self) -> String {
        self.url("/oauth2/authorization/github")
    }

    /// Fetch the current identity. Any failure means "no session".
    pub async fn current_user(&self) -> Result<UserProfile, ApiError> {
        let response = self.http.get(self.url("/user")).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        let profile: UserProfile = response.json().await?;
        debug!("authenticated as {}", profile.login);
        Ok(profile)
    }

    /// Fetch the full repository collection for the authenticated user.
    pub async fn list_repositories(&self) -> Result<Vec<Repository>, ApiError> {
        let response = self.http.get(self.url("/user/repos")).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        let repos: Vec<Repository> = response.json().await?;
        info!("fetched {} repositories", repos.len());
        Ok(repos)
    }

    /// Fetch the health report for one repository.
    ///
    /// The content type is checked before anything else: an expired session
    /// makes the service answer with its HTML login page, and that must
    /// surface as its own error rather than a parse failure.
    pub async fn repo_health(&self, name: &str) -> Result<HealthReport, ApiError> {
        let path = format!("/user/repos/{}/health", urlencoding::encode(name));
        let response = self
            .http
            .get(self.url(&path))
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !content_type.contains("application/json") {
            let got = if content_type.is_empty() {
                "none".to_string()
            } else {
                content_type
            };
            return Err(ApiError::UnexpectedContentType(got));
        }

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        let report: HealthReport = response.json().await?;
        info!(
            "health report for {name}: score {}",
            report.health.total_score
        );
        Ok(report)
    }

    /// Fire-and-forget logout. The caller resets its session state no
    /// matter what this returns.
    pub async fn logout(&self) {
        match self.http.post(self.url("/logout")).send().await {
            Ok(_) => debug!("logout request sent"),
            Err(err) => debug!("logout request failed: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client_for(base_url: &str) -> ApiClient {
        ApiClient::new(&Config {
            base_url: base_url.to_string(),
        })
        .unwrap()
    }

    #[test]
    fn urls_join_without_doubled_slashes() {
        let client = client_for("http://localhost:8080/");
        assert_eq!(client.url("/user"), "http://localhost:8080/user");
    }

    #[test]
    fn login_url_points_at_oauth_endpoint() {
        let client = client_for("https://health.example.com");
        assert_eq!(
            client.login_url(),
            "https://health.example.com/oauth2/authorization/github"
        );
    }

    #[test]
    fn repo_names_are_percent_encoded() {
        assert_eq!(
            urlencoding::encode("my repo").into_owned(),
            "my%20repo".to_string()
        );
    }
}
