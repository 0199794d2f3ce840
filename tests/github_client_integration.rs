//! Request layer and pipelines against a mocked GitHub API

use std::time::Duration;

use chrono::Utc;
use devprofile::models::{ActivityEvent, ExperienceLevel};
use devprofile::{
    CommitTimelineBuilder, Config, Error, GitHubApi, GitHubClient, PipelineConfig,
    ProfileAggregator,
};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn config(server: &MockServer, token: Option<&str>) -> Config {
    Config {
        github_token: token.map(str::to_string),
        api_base_url: server.uri(),
        request_timeout: Duration::from_secs(5),
        concurrency_limit: 2,
    }
}

fn client(server: &MockServer, token: Option<&str>) -> GitHubClient {
    GitHubClient::new(&config(server, token)).expect("client should build")
}

async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_sends_bearer_token_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .and(header("authorization", "Bearer secret-token"))
        .and(header("accept", "application/vnd.github.v3+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "octocat"})))
        .expect(1)
        .mount(&server)
        .await;

    let user = client(&server, Some("secret-token"))
        .get_user("octocat")
        .await
        .expect("user fetch should succeed");
    assert_eq!(user.login.as_deref(), Some("octocat"));
}

#[tokio::test]
async fn test_omits_authorization_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .and(|req: &Request| !req.headers.contains_key("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "octocat"})))
        .expect(1)
        .mount(&server)
        .await;

    client(&server, None)
        .get_user("octocat")
        .await
        .expect("unauthenticated fetch should succeed");
}

#[tokio::test]
async fn test_non_success_status_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;

    let err = client(&server, None).get_user("ghost").await.unwrap_err();
    match err {
        Error::Http { status, status_text, url } => {
            assert_eq!(status, 404);
            assert_eq!(status_text, "Not Found");
            assert!(url.ends_with("/users/ghost"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let config = Config {
        api_base_url: "http://127.0.0.1:1".to_string(),
        request_timeout: Duration::from_secs(2),
        ..Default::default()
    };
    let err = GitHubClient::new(&config)
        .unwrap()
        .get_user("octocat")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Network(_)));
}

#[tokio::test]
async fn test_list_endpoints_request_one_page_of_100() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "hello"}])))
        .expect(1)
        .mount(&server)
        .await;

    let repos = client(&server, None).get_user_repos("octocat").await.unwrap();
    assert_eq!(repos.len(), 1);
    assert_eq!(repos[0].name, "hello");
}

#[tokio::test]
async fn test_non_list_contents_degrades_to_empty() {
    let server = MockServer::start().await;
    mount_json(&server, "/repos/octocat/empty/contents", json!({"message": "This repository is empty."})).await;

    let entries = client(&server, None)
        .get_repo_contents("octocat", "empty")
        .await
        .unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_build_profile_end_to_end() {
    let server = MockServer::start().await;
    let now = Utc::now();

    mount_json(
        &server,
        "/users/octocat",
        json!({
            "login": "octocat",
            "name": "The Octocat",
            "type": "User",
            "public_repos": 2,
            "followers": 10,
            "created_at": "2011-01-25T18:44:36Z"
        }),
    )
    .await;
    mount_json(
        &server,
        "/users/octocat/repos",
        json!([
            {"name": "hello", "owner": {"login": "octocat"}, "language": "Ruby",
             "stargazers_count": 2, "forks_count": 1, "size": 10, "watchers_count": 2},
            {"name": "spoon", "owner": {"login": "octocat"}, "language": null,
             "stargazers_count": 9, "forks_count": 0, "size": 5, "watchers_count": 9}
        ]),
    )
    .await;
    mount_json(
        &server,
        "/users/octocat/events",
        json!([
            {"type": "PushEvent", "repo": {"name": "octocat/hello"},
             "payload": {"commits": [{}, {}]}, "created_at": now.to_rfc3339()},
            {"type": "IssuesEvent", "repo": {"name": "octocat/hello"},
             "payload": {"action": "opened", "issue": {"title": "Bug"}}, "created_at": now.to_rfc3339()},
            {"type": "ForkEvent", "repo": {"name": "octocat/hello"}, "created_at": now.to_rfc3339()}
        ]),
    )
    .await;
    mount_json(&server, "/users/octocat/starred", json!([{"name": "rust"}])).await;
    mount_json(
        &server,
        "/repos/octocat/hello/contents",
        json!([{"name": "Gemfile", "type": "file"}, {"name": "lib", "type": "dir"}]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/spoon/contents"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let aggregator = ProfileAggregator::new(
        client(&server, None),
        PipelineConfig {
            concurrency_limit: 2,
            show_progress: false,
        },
    );
    let profile = aggregator.build_profile("octocat").await.expect("profile should build");

    assert_eq!(profile.name, "The Octocat");
    assert_eq!(profile.account_type, "User");
    assert_eq!(profile.total_stars, 11);
    assert_eq!(profile.total_watchers, 11);
    assert_eq!(profile.total_size_kb, 15);
    assert_eq!(profile.total_issues_contributed, 1);
    assert_eq!(profile.total_starred, Some(1));
    assert_eq!(profile.frameworks, vec!["rails"]);
    assert_eq!(profile.experience_level, ExperienceLevel::Senior);

    assert_eq!(profile.languages.len(), 1);
    assert_eq!(profile.languages[0].language, "Ruby");
    assert_eq!(profile.languages[0].percentage, 100.0);

    assert_eq!(profile.repositories[0].name, "hello");
    assert_eq!(profile.repositories[0].file_count, 2);
    assert_eq!(profile.repositories[1].file_count, 0);
    assert_eq!(profile.top_repos[0].name, "spoon");

    assert_eq!(profile.recent_activity.len(), 2);
    assert!(matches!(profile.recent_activity[0], ActivityEvent::Commit { .. }));
}

#[tokio::test]
async fn test_build_profile_fails_when_repositories_fail() {
    let server = MockServer::start().await;
    mount_json(&server, "/users/octocat", json!({"login": "octocat"})).await;
    mount_json(&server, "/users/octocat/events", json!([])).await;
    mount_json(&server, "/users/octocat/starred", json!([])).await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let aggregator = ProfileAggregator::new(client(&server, None), PipelineConfig::default());
    let err = aggregator.build_profile("octocat").await.unwrap_err();

    assert!(matches!(err, Error::ProfileBuild { step: "repositories", .. }));
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_commit_timeline_counts_todays_pushes() {
    let server = MockServer::start().await;
    let now = Utc::now();
    mount_json(
        &server,
        "/users/octocat/events",
        json!([
            {"type": "PushEvent", "payload": {"commits": [{}, {}, {}]}, "created_at": now.to_rfc3339()},
            {"type": "PushEvent", "payload": {"commits": [{}]},
             "created_at": (now - chrono::Duration::days(45)).to_rfc3339()}
        ]),
    )
    .await;

    let timeline = CommitTimelineBuilder::new(client(&server, None))
        .build_commit_timeline("octocat")
        .await
        .unwrap();

    assert_eq!(timeline.len(), 30);
    assert_eq!(timeline[29].day, now.date_naive());
    assert_eq!(timeline[29].count, 3);
    assert_eq!(timeline.iter().map(|d| d.count).sum::<u32>(), 3);
}

#[tokio::test]
async fn test_commit_timeline_propagates_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/events"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = CommitTimelineBuilder::new(client(&server, None))
        .build_commit_timeline("octocat")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Http { status: 403, .. }));
    assert!(err.user_message().contains("rate limit"));
}

#[tokio::test]
async fn test_slow_listings_stay_matched_to_their_repositories() {
    let server = MockServer::start().await;
    mount_json(&server, "/users/octocat", json!({"login": "octocat"})).await;
    mount_json(&server, "/users/octocat/events", json!([])).await;
    mount_json(&server, "/users/octocat/starred", json!([])).await;
    mount_json(
        &server,
        "/users/octocat/repos",
        json!([
            {"name": "a", "owner": {"login": "octocat"}, "stargazers_count": 3},
            {"name": "b", "owner": {"login": "octocat"}, "stargazers_count": 1},
            {"name": "c", "owner": {"login": "octocat"}, "stargazers_count": 0},
            {"name": "d", "owner": {"login": "octocat"}, "stargazers_count": 2}
        ]),
    )
    .await;

    // Earlier repositories answer later, so completion order differs from input order.
    let listings = [
        ("a", 600, json!([{"name": "Gemfile"}])),
        ("b", 300, json!([{"name": "package.json"}, {"name": "src"}])),
        ("c", 0, json!([{"name": "pom.xml"}, {"name": "build.gradle"}, {"name": "README.md"}])),
        ("d", 300, json!([])),
    ];
    for (name, delay_ms, body) in listings {
        Mock::given(method("GET"))
            .and(path(format!("/repos/octocat/{}/contents", name)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(body)
                    .set_delay(Duration::from_millis(delay_ms)),
            )
            .mount(&server)
            .await;
    }

    let aggregator = ProfileAggregator::new(
        client(&server, None),
        PipelineConfig {
            concurrency_limit: 4,
            show_progress: false,
        },
    );
    let profile = aggregator.build_profile("octocat").await.expect("profile should build");

    let repos: Vec<_> = profile
        .repositories
        .iter()
        .map(|r| (r.name.as_str(), r.file_count, r.frameworks.clone()))
        .collect();
    assert_eq!(
        repos,
        vec![
            ("a", 1, vec!["rails".to_string()]),
            (
                "b",
                2,
                ["react", "express", "next", "vue", "angular", "nestjs", "prisma"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            ),
            ("c", 3, vec!["spring".to_string(), "android".to_string()]),
            ("d", 0, Vec::new()),
        ]
    );

    let top: Vec<_> = profile.top_repos.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(top, vec!["a", "d", "b", "c"]);
    assert_eq!(profile.frameworks[0], "rails");
}

#[tokio::test]
async fn test_slow_response_times_out_as_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"login": "octocat"}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = Config {
        request_timeout: Duration::from_millis(200),
        ..config(&server, None)
    };
    let err = GitHubClient::new(&config)
        .unwrap()
        .get_user("octocat")
        .await
        .unwrap_err();

    match err {
        Error::Network(e) => assert!(e.is_timeout()),
        other => panic!("unexpected error: {:?}", other),
    }
}
