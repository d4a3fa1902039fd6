//! End-to-end traversals against a mock HAL server.

use mockito::{Matcher, Server};
use serde::Deserialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use traverson::hal::Resource;
use traverson::{Link, LinkDiscoverer, LinkDiscoverers, MediaType, Result, Traverson, TraversonError};

const HAL: &str = "application/hal+json";

#[derive(Debug, Deserialize)]
struct Actor {
    name: String,
}

fn hal_engine(server: &Server) -> Traverson {
    Traverson::new(server.url(), vec![MediaType::hal_json()]).unwrap()
}

#[tokio::test]
async fn test_follows_relations_to_final_resource() {
    let mut server = Server::new_async().await;
    let root = server
        .mock("GET", "/")
        .match_header("accept", HAL)
        .with_header("content-type", HAL)
        .with_body(r#"{"_links":{"movies":{"href":"/movies"}}}"#)
        .expect(1)
        .create_async()
        .await;
    let movies = server
        .mock("GET", "/movies")
        .match_header("accept", HAL)
        .with_header("content-type", HAL)
        .with_body(r#"{"_links":{"movie":[{"href":"/movies/1"},{"href":"/movies/2"}]}}"#)
        .expect(1)
        .create_async()
        .await;
    let movie = server
        .mock("GET", "/movies/1")
        .with_header("content-type", HAL)
        .with_body(format!(
            r#"{{"title":"The Matrix","_links":{{"actor":{{"href":"{}/actors/1"}}}}}}"#,
            server.url()
        ))
        .expect(1)
        .create_async()
        .await;
    let actor = server
        .mock("GET", "/actors/1")
        .with_header("content-type", HAL)
        .with_body(r#"{"name":"Keanu Reeves","_links":{"self":{"href":"/actors/1"}}}"#)
        .expect(1)
        .create_async()
        .await;

    let resource: Resource<Actor> = hal_engine(&server)
        .follow(["movies", "movie", "actor"])
        .to_object()
        .await
        .unwrap();

    assert_eq!(resource.content.name, "Keanu Reeves");
    assert_eq!(resource.link("self").unwrap().href, "/actors/1");
    root.assert_async().await;
    movies.assert_async().await;
    movie.assert_async().await;
    actor.assert_async().await;
}

#[tokio::test]
async fn test_zero_hops_reads_base_resource() {
    let mut server = Server::new_async().await;
    let root = server
        .mock("GET", "/")
        .with_header("content-type", HAL)
        .with_body(r#"{"name":"api root"}"#)
        .expect(1)
        .create_async()
        .await;

    let name = hal_engine(&server).root().to_path_result("$.name").await.unwrap();
    assert_eq!(name, "api root");
    root.assert_async().await;
}

struct CountingDiscoverer(Arc<AtomicUsize>);

impl LinkDiscoverer for CountingDiscoverer {
    fn find_links_with_rel(&self, _rel: &str, _body: &str) -> Result<Vec<Link>> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_path_expression_bypasses_discoverers() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .with_header("content-type", "application/json")
        .with_body(r#"{"_links":{"movies":{"href":"/movies"}}}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/movies")
        .with_header("content-type", "application/json")
        .with_body(r#"{"count":2}"#)
        .create_async()
        .await;

    let calls = Arc::new(AtomicUsize::new(0));
    let traverson = Traverson::builder(server.url())
        .media_type(MediaType::application_json())
        .discoverers(LinkDiscoverers::new().with(MediaType::all(), CountingDiscoverer(calls.clone())))
        .build()
        .unwrap();

    let count = traverson
        .follow(["$._links.movies.href"])
        .to_path_result("$.count")
        .await
        .unwrap();

    assert_eq!(count, "2");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_relation_stops_traversal() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .with_header("content-type", HAL)
        .with_body(r#"{"_links":{"movies":{"href":"/movies"}}}"#)
        .create_async()
        .await;
    let movies = server
        .mock("GET", "/movies")
        .expect(0)
        .create_async()
        .await;

    let err = hal_engine(&server)
        .follow(["series", "movies"])
        .to_text()
        .await
        .unwrap_err();

    match err {
        TraversonError::LinkNotFound { rel, body } => {
            assert_eq!(rel, "series");
            assert!(body.contains("/movies"));
        }
        other => panic!("unexpected error: {}", other),
    }
    movies.assert_async().await;
}

#[tokio::test]
async fn test_templated_links_expand_parameters() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .with_header("content-type", HAL)
        .with_body(r#"{"_links":{"search":{"href":"/movies/search{?title}","templated":true}}}"#)
        .create_async()
        .await;
    let search = server
        .mock("GET", Matcher::Regex(r"^/movies/search".to_string()))
        .match_query(Matcher::UrlEncoded("title".into(), "Heat".into()))
        .with_header("content-type", HAL)
        .with_body(r#"{"title":"Heat","year":1995}"#)
        .expect(1)
        .create_async()
        .await;

    let year = hal_engine(&server)
        .follow(["search"])
        .with_template_parameter("title", "Heat")
        .to_path_result("$.year")
        .await
        .unwrap();

    assert_eq!(year, "1995");
    search.assert_async().await;
}

#[tokio::test]
async fn test_templated_base_uri() {
    let mut server = Server::new_async().await;
    let page = server
        .mock("GET", Matcher::Regex(r"^/movies".to_string()))
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_header("content-type", HAL)
        .with_body(r#"{"page":2}"#)
        .expect(1)
        .create_async()
        .await;

    let traverson = Traverson::new(
        format!("{}/movies{{?page}}", server.url()),
        vec![MediaType::hal_json()],
    )
    .unwrap();
    let entity = traverson
        .root()
        .with_template_parameter("page", 2)
        .to_entity::<serde_json::Value>()
        .await
        .unwrap();

    assert_eq!(entity.status, 200);
    assert_eq!(entity.header("Content-Type"), Some(HAL));
    assert_eq!(entity.body["page"], 2);
    page.assert_async().await;
}

#[tokio::test]
async fn test_error_status_fails_traversal() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .with_status(500)
        .create_async()
        .await;

    let err = hal_engine(&server).follow(["movies"]).final_uri().await.unwrap_err();
    assert!(err.is_transport());
    assert!(matches!(err, TraversonError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_unsupported_media_type_for_named_relation() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .with_header("content-type", "text/html")
        .with_body("<html></html>")
        .create_async()
        .await;

    let err = hal_engine(&server).follow(["movies"]).final_uri().await.unwrap_err();
    assert!(matches!(err, TraversonError::UnsupportedMediaType(_)));
}

#[test]
fn test_construction_validation() {
    assert!(matches!(
        Traverson::new("", vec![MediaType::hal_json()]),
        Err(TraversonError::Config(_))
    ));
    assert!(matches!(
        Traverson::new("http://localhost:8080/", Vec::new()),
        Err(TraversonError::Config(_))
    ));
}
