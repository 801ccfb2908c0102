use egytech_api::types::{Level, ProgrammingLanguage, Title};
use egytech_api::{Client, Error, ParticipantsQuery, StatsQuery};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[tokio::test]
async fn get_participants_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("participants.json");

    Mock::given(method("GET"))
        .and(path("/participants"))
        .and(header("accept", "application/json"))
        .and(query_param("title", "backend"))
        .and(query_param("yoe_from_included", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let query = ParticipantsQuery::builder()
        .with_title(Title::Backend)
        .with_min_yoe(2)
        .build()
        .unwrap();
    let result = client.get_participants(&query).await;
    assert!(result.is_ok());

    let result = result.unwrap();
    assert_eq!(result.dataset().len(), 3);
}

#[tokio::test]
async fn get_participants_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/participants"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let result = client.get_participants(&ParticipantsQuery::default()).await;
    match result {
        Err(Error::ApiCall {
            status,
            endpoint,
            body,
        }) => {
            assert_eq!(status, 500);
            assert_eq!(endpoint, "participants");
            assert_eq!(body, "Internal Server Error");
        }
        other => panic!("expected ApiCall error, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn non_200_success_status_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/participants"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let result = client.get_participants(&ParticipantsQuery::default()).await;
    assert!(matches!(result, Err(Error::ApiCall { status: 204, .. })));
}

#[tokio::test]
async fn get_participants_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/participants"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let result = client.get_participants(&ParticipantsQuery::default()).await;
    assert!(matches!(result, Err(Error::Decode(_))));
}

#[tokio::test]
async fn get_stats_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("stats.json");

    Mock::given(method("GET"))
        .and(path("/stats"))
        .and(query_param("level", "senior"))
        .and(query_param("programming_language", "python"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let base = ParticipantsQuery::builder()
        .with_level(Level::Senior)
        .build()
        .unwrap();
    let query = StatsQuery::from(base).with_programming_language(ProgrammingLanguage::Python);
    let result = client.get_stats(&query).await.unwrap();

    assert_eq!(result.summary().median, "26000");
    assert_eq!(result.buckets().len(), 5);
}

#[tokio::test]
async fn get_stats_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri()).unwrap();
    let result = client.get_stats(&StatsQuery::default()).await;
    assert!(matches!(
        result,
        Err(Error::ApiCall { status: 404, ref endpoint, .. }) if endpoint == "stats"
    ));
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    // port 9 (discard) on localhost is not expected to accept connections
    let client = Client::with_base_url("http://127.0.0.1:9").unwrap();
    let result = client.get_participants(&ParticipantsQuery::default()).await;
    assert!(matches!(result, Err(Error::Transport(_))));
}
