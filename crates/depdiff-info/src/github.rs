//! GitHub API client for publishing reports

use crate::client::HttpClient;
use crate::error::{Error, Result};
use depdiff_core::{Annotation, CheckRunOutput, CHECK_RUN_NAME};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::{Deserialize, Serialize};

const GITHUB_API_URL: &str = "https://api.github.com";

/// GitHub accepts at most this many annotations per check-run request
pub const MAX_ANNOTATIONS_PER_REQUEST: usize = 50;

/// Comment created on an issue or pull request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueComment {
    pub id: u64,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Check run created for a commit
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckRun {
    pub id: u64,
    #[serde(default)]
    pub html_url: Option<String>,
}

#[derive(Serialize)]
struct CommentBody<'a> {
    body: &'a str,
}

#[derive(Serialize)]
struct OutputBody<'a> {
    title: &'a str,
    summary: &'a str,
    annotations: &'a [Annotation],
}

#[derive(Serialize)]
struct CreateCheckRunBody<'a> {
    name: &'a str,
    head_sha: &'a str,
    status: &'a str,
    conclusion: &'a str,
    output: OutputBody<'a>,
}

#[derive(Serialize)]
struct UpdateCheckRunBody<'a> {
    output: OutputBody<'a>,
}

/// Authenticated client for the GitHub REST API
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: HttpClient,
    api_url: String,
    token: String,
}

impl GitHubClient {
    /// Create a client for api.github.com
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_api_url(GITHUB_API_URL, token)
    }

    /// Create a client for another API root (GitHub Enterprise or a mock)
    pub fn with_api_url(api_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            // GitHub enforces its own rate limits
            client: HttpClient::new()?,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token))
                .map_err(|_| Error::other("Invalid GitHub token format"))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        Ok(headers)
    }

    /// Post the report as a new comment on a pull request
    ///
    /// Always creates a new comment; earlier reports are left in place.
    pub async fn create_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> Result<IssueComment> {
        let url = format!("{}/repos/{owner}/{repo}/issues/{number}/comments", self.api_url);
        let comment: IssueComment = self
            .client
            .post_json(&url, self.headers()?, &CommentBody { body })
            .await
            .map_err(|e| Error::GitHubApi(format!("error creating comment: {e}")))?;

        tracing::info!(owner, repo, number, comment_id = comment.id, "created pull request comment");
        Ok(comment)
    }

    /// Create a completed, neutral check run carrying the annotations
    ///
    /// Annotations beyond the first [`MAX_ANNOTATIONS_PER_REQUEST`] are
    /// appended with follow-up updates of the same run.
    pub async fn create_check_run(
        &self,
        owner: &str,
        repo: &str,
        head_sha: &str,
        output: &CheckRunOutput,
    ) -> Result<CheckRun> {
        let mut batches = output.annotations.chunks(MAX_ANNOTATIONS_PER_REQUEST);
        let first = batches.next().unwrap_or(&[]);

        let url = format!("{}/repos/{owner}/{repo}/check-runs", self.api_url);
        let body = CreateCheckRunBody {
            name: CHECK_RUN_NAME,
            head_sha,
            status: "completed",
            conclusion: "neutral",
            output: OutputBody {
                title: &output.title,
                summary: &output.summary,
                annotations: first,
            },
        };
        let run: CheckRun = self
            .client
            .post_json(&url, self.headers()?, &body)
            .await
            .map_err(|e| Error::GitHubApi(format!("error creating the check run: {e}")))?;

        let update_url = format!("{url}/{}", run.id);
        for batch in batches {
            let body = UpdateCheckRunBody {
                output: OutputBody {
                    title: &output.title,
                    summary: &output.summary,
                    annotations: batch,
                },
            };
            let _: CheckRun = self
                .client
                .patch_json(&update_url, self.headers()?, &body)
                .await
                .map_err(|e| Error::GitHubApi(format!("error updating the check run: {e}")))?;
        }

        tracing::info!(
            owner,
            repo,
            check_run_id = run.id,
            annotations = output.annotations.len(),
            "created check run"
        );
        Ok(run)
    }
}
