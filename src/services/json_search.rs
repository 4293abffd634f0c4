use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::models::{FetchOutcome, Query, ResultItem, ResultSet};
use crate::services::{EmbedSearch, ResultSource};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CseResponse {
    #[serde(default)]
    search_information: Option<SearchInformation>,
    #[serde(default)]
    items: Option<Vec<CseItem>>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchInformation {
    #[serde(default)]
    formatted_total_results: String,
    #[serde(default)]
    formatted_search_time: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CseItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    formatted_url: String,
}

/// Interprets a Custom Search JSON body.
pub fn parse_response(body: &str) -> Result<FetchOutcome, SearchError> {
    let parsed: CseResponse =
        serde_json::from_str(body).map_err(|err| SearchError::Malformed(err.to_string()))?;

    if let Some(error) = parsed.error {
        let message = error
            .get("message")
            .and_then(|message| message.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(SearchError::Api(message));
    }

    match (parsed.search_information, parsed.items) {
        (Some(info), Some(items)) => {
            let items = items
                .into_iter()
                .map(|item| {
                    ResultItem::new(item.title, item.link, item.snippet, item.formatted_url)
                })
                .collect();
            Ok(FetchOutcome::Results(ResultSet::timed(
                items,
                &info.formatted_total_results,
                &info.formatted_search_time,
            )))
        }
        // the API leaves `items` out entirely when nothing matched
        (Some(info), None) => Ok(FetchOutcome::Results(ResultSet::timed(
            Vec::new(),
            &info.formatted_total_results,
            &info.formatted_search_time,
        ))),
        (None, _) => Err(SearchError::Malformed(
            "response has no searchInformation".to_string(),
        )),
    }
}

/// Google Custom Search JSON API client.
pub struct JsonSearch {
    client: Client,
    endpoint: String,
    api_key: String,
    scope_id: String,
    start_index: u32,
    page_size: u32,
    fallback: Option<EmbedSearch>,
}

impl JsonSearch {
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("site_search_panel/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client for the search API")?;

        let fallback = config
            .fallback_to_embed
            .then(|| EmbedSearch::from_config(config));

        Ok(Self {
            client,
            endpoint: config.json_endpoint.clone(),
            api_key: config.api_key.clone(),
            scope_id: config.scope_id.clone(),
            start_index: config.start_index,
            page_size: config.page_size,
            fallback,
        })
    }

    async fn request(&self, query: &Query) -> Result<FetchOutcome, SearchError> {
        let params = [
            ("key", self.api_key.clone()),
            ("cx", self.scope_id.clone()),
            ("q", query.as_str().to_string()),
            ("start", self.start_index.to_string()),
            ("num", self.page_size.to_string()),
        ];

        let response = self.client.get(&self.endpoint).query(&params).send().await?;
        let status = response.status();
        let body = response.text().await?;

        match parse_response(&body) {
            Err(SearchError::Malformed(_)) if !status.is_success() => {
                Err(SearchError::Status(status.as_u16()))
            }
            outcome => outcome,
        }
    }
}

#[async_trait]
impl ResultSource for JsonSearch {
    fn name(&self) -> &'static str {
        "json"
    }

    async fn fetch(&self, query: &Query) -> Result<FetchOutcome, SearchError> {
        match self.request(query).await {
            Err(err @ (SearchError::Transport(_) | SearchError::Status(_))) => {
                match &self.fallback {
                    Some(embed) => {
                        warn!(
                            query = %query,
                            error = %err,
                            "search API unreachable, using embedded results"
                        );
                        Ok(FetchOutcome::Embedded(embed.frame_for(query)))
                    }
                    None => Err(err),
                }
            }
            outcome => outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use actix_web::{web, App, HttpResponse};
    use serde_json::json;
    use std::collections::HashMap;

    fn config(endpoint: String, fallback: bool) -> SearchConfig {
        SearchConfig {
            json_endpoint: endpoint,
            api_key: "test-key".to_string(),
            scope_id: "scope-1".to_string(),
            fallback_to_embed: fallback,
            embed_reveal_ms: 0,
            request_timeout_secs: 5,
            ..SearchConfig::default()
        }
    }

    async fn fake_cse(params: web::Query<HashMap<String, String>>) -> HttpResponse {
        let query = params.get("q").cloned().unwrap_or_default();
        let scope = params.get("cx").cloned().unwrap_or_default();
        if params.get("key").map(String::as_str) != Some("test-key") {
            return HttpResponse::BadRequest()
                .json(json!({"error": {"code": 400, "message": "API key not valid"}}));
        }
        match query.as_str() {
            "quota" => HttpResponse::Forbidden()
                .json(json!({"error": {"code": 403, "message": "Quota exceeded"}})),
            "gateway" => HttpResponse::BadGateway().body("upstream down"),
            "none" => HttpResponse::Ok().json(json!({
                "searchInformation": {"formattedTotalResults": "0", "formattedSearchTime": "0.12"},
                "items": []
            })),
            _ => HttpResponse::Ok().json(json!({
                "searchInformation": {
                    "formattedTotalResults": "1,200",
                    "formattedSearchTime": "0.21"
                },
                "items": [{
                    "title": format!("{} in scope {}", query, scope),
                    "link": "https://solav.me/article/1",
                    "snippet": format!("start={} num={}", params["start"], params["num"]),
                    "formattedUrl": "solav.me/article/1"
                }]
            })),
        }
    }

    #[test]
    fn parses_results_with_timed_summary() {
        let body = json!({
            "searchInformation": {"formattedTotalResults": "42", "formattedSearchTime": "0.18"},
            "items": [
                {"title": "A", "link": "https://a", "snippet": "a", "formattedUrl": "a"},
                {"title": "B", "link": "https://b", "snippet": "b", "formattedUrl": "b"}
            ]
        })
        .to_string();

        let FetchOutcome::Results(results) = parse_response(&body).unwrap() else {
            panic!("expected structured results");
        };
        assert_eq!(results.len(), 2);
        assert_eq!(results.items[1].title, "B");
        assert_eq!(results.summary, "About 42 results (0.18 seconds)");
    }

    #[test]
    fn empty_items_parse_to_an_empty_set() {
        let body = json!({
            "searchInformation": {"formattedTotalResults": "0", "formattedSearchTime": "0.1"},
            "items": []
        })
        .to_string();
        let FetchOutcome::Results(results) = parse_response(&body).unwrap() else {
            panic!("expected structured results");
        };
        assert!(results.is_empty());
    }

    #[test]
    fn error_body_is_an_api_error() {
        let body = json!({"error": {"code": 403, "message": "Quota exceeded"}}).to_string();
        let err = parse_response(&body).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Api);
        assert!(err.to_string().contains("Quota exceeded"));
    }

    #[test]
    fn missing_fields_are_malformed() {
        assert_eq!(
            parse_response(r#"{"items": []}"#).unwrap_err().kind(),
            FailureKind::Malformed
        );
        assert_eq!(
            parse_response("<html>").unwrap_err().kind(),
            FailureKind::Malformed
        );
    }

    fn fake_server() -> actix_test::TestServer {
        actix_test::start(|| App::new().route("/customsearch/v1", web::get().to(fake_cse)))
    }

    #[actix_rt::test]
    async fn sends_the_expected_parameters() {
        let srv = fake_server();
        let source = JsonSearch::from_config(&config(srv.url("/customsearch/v1"), false)).unwrap();

        let outcome = source.fetch(&Query::parse("solar energy").unwrap()).await.unwrap();

        let FetchOutcome::Results(results) = outcome else {
            panic!("expected structured results");
        };
        assert_eq!(results.items[0].title, "solar energy in scope scope-1");
        assert_eq!(results.items[0].snippet, "start=1 num=10");
        assert_eq!(results.summary, "About 1,200 results (0.21 seconds)");
    }

    #[actix_rt::test]
    async fn api_errors_are_reported_not_masked() {
        let srv = fake_server();
        let source = JsonSearch::from_config(&config(srv.url("/customsearch/v1"), true)).unwrap();

        let err = source.fetch(&Query::parse("quota").unwrap()).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Api);

        let outcome = source.fetch(&Query::parse("none").unwrap()).await.unwrap();
        assert!(matches!(outcome, FetchOutcome::Results(ref set) if set.is_empty()));
    }

    #[actix_rt::test]
    async fn bad_status_without_body_falls_back_to_embed() {
        let srv = fake_server();

        let strict = JsonSearch::from_config(&config(srv.url("/customsearch/v1"), false)).unwrap();
        let err = strict.fetch(&Query::parse("gateway").unwrap()).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Status);

        let lenient = JsonSearch::from_config(&config(srv.url("/customsearch/v1"), true)).unwrap();
        let outcome = lenient.fetch(&Query::parse("gateway").unwrap()).await.unwrap();
        let FetchOutcome::Embedded(frame) = outcome else {
            panic!("expected the embed fallback");
        };
        assert_eq!(frame.url, "https://cse.google.com/cse?cx=scope-1&q=gateway");
    }

    #[actix_rt::test]
    async fn unreachable_endpoint_is_a_transport_failure() {
        let endpoint = "http://127.0.0.1:9/customsearch/v1".to_string();
        let source = JsonSearch::from_config(&config(endpoint, false)).unwrap();
        let err = source.fetch(&Query::parse("energy").unwrap()).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Transport);
    }
}
