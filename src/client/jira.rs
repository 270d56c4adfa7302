use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::{ClientError, ClientResult, IssueTracker, MAX_RESULTS};
use crate::domain::*;

const SEARCH_PATH: &str = "/rest/api/2/search";
const SEARCH_FIELDS: &str = "key,summary";
const SEARCH_EXPAND: &str = "changelog";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    issues: Vec<IssueDto>,
}

#[derive(Debug, Deserialize)]
struct IssueDto {
    key: String,
    #[serde(default)]
    fields: FieldsDto,
    changelog: Option<ChangelogDto>,
}

#[derive(Debug, Default, Deserialize)]
struct FieldsDto {
    #[serde(default)]
    summary: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChangelogDto {
    #[serde(default)]
    histories: Vec<HistoryDto>,
}

#[derive(Debug, Deserialize)]
struct HistoryDto {
    created: String,
    #[serde(default)]
    items: Vec<ItemDto>,
}

#[derive(Debug, Deserialize)]
struct ItemDto {
    field: String,
    #[serde(rename = "toString", default)]
    to_string: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default)]
    error_messages: Vec<String>,
    #[serde(default)]
    errors: std::collections::BTreeMap<String, String>,
}

impl From<IssueDto> for Issue {
    fn from(dto: IssueDto) -> Self {
        Issue {
            key: dto.key,
            summary: dto.fields.summary.unwrap_or_default(),
            changelog: dto.changelog.map(|c| {
                c.histories
                    .into_iter()
                    .map(|h| HistoryEntry {
                        created: h.created,
                        items: h
                            .items
                            .into_iter()
                            .map(|i| ChangeItem {
                                field: i.field,
                                to_string: i.to_string.unwrap_or_default(),
                            })
                            .collect(),
                    })
                    .collect()
            }),
        }
    }
}

/// Jira REST client authenticating with HTTP basic auth.
pub struct JiraClient {
    client: Client,
    base_url: String,
    username: String,
    password: Option<String>,
}

impl JiraClient {
    pub fn new(base_url: &str, username: String, password: Option<String>) -> ClientResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| ClientError::ConnectionError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            username,
            password,
        })
    }

    fn search_url(&self) -> String {
        format!("{}{}", self.base_url, SEARCH_PATH)
    }
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn search_issues(&self, jql: &str, max_results: u32) -> ClientResult<Vec<Issue>> {
        let max_results = max_results.min(MAX_RESULTS).to_string();
        let url = self.search_url();
        tracing::debug!("GET {} maxResults={}", url, max_results);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, self.password.as_ref())
            .query(&[
                ("jql", jql),
                ("maxResults", max_results.as_str()),
                ("fields", SEARCH_FIELDS),
                ("expand", SEARCH_EXPAND),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Request to {} failed: {}", url, e);
                ClientError::ConnectionError(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(http_error(status, &body));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("invalid search response: {}", e)))?;

        Ok(body.issues.into_iter().map(Issue::from).collect())
    }
}

fn http_error(status: StatusCode, body: &str) -> ClientError {
    let message = format!("{}: {}", status, error_description(body));
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::AuthenticationError(message),
        _ => ClientError::QueryError(message),
    }
}

/// Human-readable part of a Jira error body, falling back to the raw text.
fn error_description(body: &str) -> String {
    let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) else {
        return body.trim().to_string();
    };
    let messages: Vec<String> = parsed
        .error_messages
        .into_iter()
        .chain(parsed.errors.into_iter().map(|(k, v)| format!("{}: {}", k, v)))
        .collect();
    if messages.is_empty() {
        body.trim().to_string()
    } else {
        messages.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{basic_auth, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> JiraClient {
        JiraClient::new(&server.uri(), "alice".to_string(), Some("secret".to_string()))
            .expect("client")
    }

    #[tokio::test]
    async fn search_sends_query_and_maps_issues() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/2/search"))
            .and(basic_auth("alice", "secret"))
            .and(query_param("jql", "project = ABC"))
            .and(query_param("maxResults", "100"))
            .and(query_param("fields", "key,summary"))
            .and(query_param("expand", "changelog"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "issues": [
                    {"key": "ABC-1", "fields": {"summary": "Fix bug"}},
                    {
                        "key": "ABC-2",
                        "fields": {"summary": "Add feature"},
                        "changelog": {"histories": [{
                            "created": "2023-01-01T00:00:00.000+0000",
                            "items": [
                                {"field": "status", "fromString": "Open", "toString": "In Progress"},
                                {"field": "assignee", "toString": null}
                            ]
                        }]}
                    }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let issues = client(&server)
            .search_issues("project = ABC", 100)
            .await
            .expect("search");

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].key, "ABC-1");
        assert_eq!(issues[0].summary, "Fix bug");
        assert!(issues[0].changelog.is_none());

        let history = issues[1].histories();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].created, "2023-01-01T00:00:00.000+0000");
        assert_eq!(
            history[0].items,
            vec![
                ChangeItem {
                    field: "status".to_string(),
                    to_string: "In Progress".to_string(),
                },
                ChangeItem {
                    field: "assignee".to_string(),
                    to_string: String::new(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn max_results_is_capped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("maxResults", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"issues": []})))
            .expect(1)
            .mount(&server)
            .await;

        let issues = client(&server).search_issues("x", 5000).await.expect("search");
        assert!(issues.is_empty());
    }

    #[tokio::test]
    async fn unauthorized_is_authentication_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&server)
            .await;

        let err = client(&server).search_issues("x", 10).await.unwrap_err();
        assert!(matches!(err, ClientError::AuthenticationError(ref m) if m.contains("Unauthorized")));
    }

    #[tokio::test]
    async fn bad_jql_is_query_failure_with_jira_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "errorMessages": ["Field 'bogus' does not exist."],
                "errors": {}
            })))
            .mount(&server)
            .await;

        let err = client(&server).search_issues("bogus = 1", 10).await.unwrap_err();
        match err {
            ClientError::QueryError(message) => {
                assert!(message.starts_with("400 Bad Request"));
                assert!(message.contains("Field 'bogus' does not exist."));
            }
            other => panic!("expected query failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn garbage_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let err = client(&server).search_issues("x", 10).await.unwrap_err();
        assert!(matches!(err, ClientError::ParseError(_)));
    }

    #[test]
    fn error_description_prefers_jira_messages() {
        let body = r#"{"errorMessages":["a"],"errors":{"jql":"b"}}"#;
        assert_eq!(error_description(body), "a; jql: b");
        assert_eq!(error_description("  plain text \n"), "plain text");
        assert_eq!(error_description(r#"{"errorMessages":[]}"#), r#"{"errorMessages":[]}"#);
    }
}
