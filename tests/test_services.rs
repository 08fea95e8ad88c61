use jenkins_rest::api::PluginQuery;
use jenkins_rest::types::QueueId;
use jenkins_rest::JenkinsClient;
use rstest::*;
use serde_json::json;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use helpers::*;

mod helpers;

async fn jenkins() -> (MockServer, JenkinsClient) {
    let server = MockServer::start().await;
    let client = client(&server, api_token());
    (server, client)
}

#[rstest]
#[tokio::test]
async fn test_system_info() -> AnyResult {
    let (server, client) = jenkins().await;
    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Hudson", "1.395")
                .insert_header("X-Jenkins", "2.426.1")
                .insert_header("X-Jenkins-Session", "4bd5e0a1")
                .insert_header("X-SSH-Endpoint", "localhost:2222"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let info = client.system().system_info().await?.into_entity().unwrap();
    assert_eq!(info.jenkins_version.as_deref(), Some("2.426.1"));
    assert_eq!(info.hudson_version.as_deref(), Some("1.395"));
    assert_eq!(info.ssh_endpoint.as_deref(), Some("localhost:2222"));
    assert_eq!(info.instance_identity, None);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_system_info_under_prefix() -> AnyResult {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/jenkins/"))
        .respond_with(ResponseTemplate::new(200).insert_header("X-Jenkins", "2.426.1"))
        .expect(1)
        .mount(&server)
        .await;

    let client = JenkinsClient::builder()
        .endpoint(format!("{}/jenkins", server.uri()))
        .credentials(api_token())
        .build()?;
    let info = client.system().system_info().await?;
    assert_eq!(info.entity.unwrap().jenkins_version.as_deref(), Some("2.426.1"));
    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_system_info_unauthorized() -> AnyResult {
    let (server, client) = jenkins().await;
    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let info = client.system().system_info().await?;
    assert!(!info.is_success());
    assert_eq!(info.status.as_u16(), 401);
    assert!(info.entity.is_none());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_quiet_down_and_cancel() -> AnyResult {
    let (server, client) = jenkins().await;
    for endpoint in ["/quietDown", "/cancelQuietDown"] {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
    }

    assert!(client.system().quiet_down().await?.is_success());
    assert!(client.system().cancel_quiet_down().await?.is_success());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_queue() -> AnyResult {
    let (server, client) = jenkins().await;
    Mock::given(method("GET"))
        .and(path("/queue/api/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_class": "hudson.model.Queue",
            "items": [{
                "_class": "hudson.model.Queue$WaitingItem",
                "blocked": false,
                "buildable": false,
                "id": 143,
                "inQueueSince": 1700000000000i64,
                "params": "\nSomeKey=SomeValue\nEmpty=",
                "stuck": false,
                "task": {"name": "DevTest", "url": "http://localhost:8080/job/DevTest/", "color": "blue"},
                "why": "In the quiet period. Expires in 9.9 sec",
                "timestamp": 1700000010000i64
            }]
        })))
        .mount(&server)
        .await;

    let items = client.queue().queue().await?.into_entity().unwrap();
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item.id, QueueId(143));
    assert_eq!(item.task.name.as_deref(), Some("DevTest"));
    let params = item.params.as_ref().unwrap();
    assert_eq!(params["SomeKey"], "SomeValue");
    assert_eq!(params["Empty"], "");
    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_queue_item_left_the_queue() -> AnyResult {
    let (server, client) = jenkins().await;
    Mock::given(method("GET"))
        .and(path("/queue/item/42/api/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_class": "hudson.model.Queue$LeftItem",
            "blocked": false,
            "buildable": false,
            "id": 42,
            "params": "",
            "task": {"name": "DevTest", "url": "http://localhost:8080/job/DevTest/"},
            "cancelled": false,
            "executable": {"number": 5, "url": "http://localhost:8080/job/DevTest/5/"}
        })))
        .mount(&server)
        .await;

    let item = client.queue().queue_item(QueueId(42)).await?.into_entity().unwrap();
    assert_eq!(item.params, None);
    assert_eq!(item.cancelled, Some(false));
    assert_eq!(item.executable.unwrap().number, 5);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_cancel_queue_item() -> AnyResult {
    let (server, client) = jenkins().await;
    Mock::given(method("POST"))
        .and(path("/queue/cancelItem"))
        .and(body_string("id=42"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .expect(1)
        .mount(&server)
        .await;

    let result = client.queue().cancel(QueueId(42)).await?;
    assert_eq!(result.status.as_u16(), 404);
    assert_eq!(result.error(), Some("Not Found"));
    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_plugins_with_query() -> AnyResult {
    let (server, client) = jenkins().await;
    Mock::given(method("GET"))
        .and(path("/pluginManager/api/json"))
        .and(query_param("depth", "1"))
        .and(query_param("tree", "plugins[shortName,version]"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_class": "hudson.LocalPluginManager",
            "plugins": [{"shortName": "git", "version": "5.2.1"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = PluginQuery {
        depth: Some(1),
        tree: Some("plugins[shortName,version]".to_string()),
    };
    let plugins = client.plugins().plugins(&query).await?.into_entity().unwrap();
    assert_eq!(plugins.plugins[0].short_name.as_deref(), Some("git"));
    assert_eq!(plugins.plugins[0].active, None);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_plugins_without_query() -> AnyResult {
    let (server, client) = jenkins().await;
    Mock::given(method("GET"))
        .and(path("/pluginManager/api/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"plugins": []})))
        .mount(&server)
        .await;

    client.plugins().plugins(&PluginQuery::default()).await?;
    let requests = received(&server, "GET", "/pluginManager/api/json").await;
    assert_eq!(requests[0].url.query(), None);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_install_necessary_plugins() -> AnyResult {
    let (server, client) = jenkins().await;
    Mock::given(method("POST"))
        .and(path("/pluginManager/installNecessaryPlugins"))
        .and(header("Content-Type", "application/xml"))
        .and(body_string(
            "<jenkins><install plugin=\"git@latest\"/></jenkins>",
        ))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/updateCenter/"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/updateCenter/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    assert!(client
        .plugins()
        .install_necessary_plugins("git@latest")
        .await?
        .is_success());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_current_user() -> AnyResult {
    let (server, client) = jenkins().await;
    Mock::given(method("GET"))
        .and(path("/user/admin/api/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_class": "hudson.model.User",
            "absoluteUrl": "http://localhost:8080/user/admin",
            "description": null,
            "fullName": "Administrator",
            "id": "admin",
            "property": []
        })))
        .mount(&server)
        .await;

    let user = client.users().get().await?.into_entity().unwrap();
    assert_eq!(user.full_name, "Administrator");
    assert_eq!(user.id.as_str(), "admin");
    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_generate_and_revoke_token() -> AnyResult {
    let (server, client) = jenkins().await;
    let descriptor = "/user/admin/descriptorByName/jenkins.security.ApiTokenProperty";
    Mock::given(method("POST"))
        .and(path(format!("{}/generateNewToken", descriptor)))
        .and(body_string("newTokenName=ci"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "data": {
                "tokenName": "ci",
                "tokenUuid": "6fb2e2c4-f3a6-4a55-9a4b-3ad5f1b0b5d1",
                "tokenValue": "11deadbeef"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("{}/revoke", descriptor)))
        .and(body_string("tokenUuid=6fb2e2c4-f3a6-4a55-9a4b-3ad5f1b0b5d1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let users = client.users();
    let token = users.generate_new_token("ci").await?.into_entity().unwrap();
    assert_eq!(token.status, "ok");
    assert_eq!(token.data.token_value, "11deadbeef");
    assert!(users.revoke(&token.data.token_uuid).await?.is_success());
    Ok(())
}

#[rstest]
#[case("check")]
#[case("apply")]
#[tokio::test]
async fn test_configuration_as_code(#[case] action: &str) -> AnyResult {
    let (server, client) = jenkins().await;
    let yaml = "jenkins:\n  systemMessage: \"hello\"\n";
    Mock::given(method("POST"))
        .and(path(format!("/configuration-as-code/{}", action)))
        .and(header("Content-Type", "text/plain"))
        .and(body_string(yaml))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let casc = client.configuration_as_code();
    let result = match action {
        "check" => casc.check(yaml).await?,
        _ => casc.apply(yaml).await?,
    };
    assert!(result.is_success());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_configuration_as_code_rejected() -> AnyResult {
    let (server, client) = jenkins().await;
    Mock::given(method("POST"))
        .and(path("/configuration-as-code/check"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Invalid configuration elements"))
        .mount(&server)
        .await;

    let result = client.configuration_as_code().check("bogus: [").await?;
    assert_eq!(result.error(), Some("Invalid configuration elements"));
    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_overall_load() -> AnyResult {
    let (server, client) = jenkins().await;
    Mock::given(method("GET"))
        .and(path("/overallLoad/api/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_class": "hudson.model.OverallLoadStatistics",
            "availableExecutors": {},
            "busyExecutors": {"hour": {"history": [0.0]}, "min": {}},
            "queueLength": {}
        })))
        .mount(&server)
        .await;

    let load = client.statistics().overall_load().await?.into_entity().unwrap();
    assert!(load.busy_executors.contains_key("hour"));
    assert!(load.total_executors.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_malformed_body() -> AnyResult {
    let (server, client) = jenkins().await;
    Mock::given(method("GET"))
        .and(path("/overallLoad/api/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let load = client.statistics().overall_load().await?;
    assert!(load.entity.is_none());
    assert!(load
        .error()
        .unwrap()
        .starts_with("Failed to parse response body"));
    Ok(())
}
