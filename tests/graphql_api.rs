use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Extension, Router,
};
use message_api::{
    api,
    infrastructure::{
        config::{Config, GraphqlConfig},
        state::AppState,
        store::{self, MemoryMessageStore},
    },
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn build_app(config: Config) -> Result<Router> {
    let config = Arc::new(config);
    let messages = store::build_message_store(&config.store)?;
    let state = Arc::new(AppState::new(messages));
    Ok(api::build_router(config).layer(Extension(state)))
}

async fn read_json(response: axum::response::Response) -> Result<Value> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

async fn post_graphql(app: &Router, body: Value) -> Result<Value> {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/graphql")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("failed to build graphql request"),
        )
        .await
        .expect("service error");

    assert_eq!(response.status(), StatusCode::OK);
    read_json(response).await
}

#[tokio::test]
async fn message_lifecycle_over_http() -> Result<()> {
    let app = build_app(Config::default())?;

    let created = post_graphql(
        &app,
        json!({
            "query": "mutation Create($input: MessageInput) { createMessage(input: $input) { id content author } }",
            "variables": { "input": { "content": "hi", "author": "alice" } }
        }),
    )
    .await?;
    assert!(created.get("errors").is_none(), "unexpected errors: {created}");
    let message = &created["data"]["createMessage"];
    let id = message["id"].as_str().expect("id is a string").to_string();
    assert_eq!(id.len(), 20);
    assert_eq!(message["content"], "hi");
    assert_eq!(message["author"], "alice");

    let fetched = post_graphql(
        &app,
        json!({
            "query": "query Get($id: ID!) { getMessage(id: $id) { id content author } }",
            "variables": { "id": id }
        }),
    )
    .await?;
    assert_eq!(fetched["data"]["getMessage"], *message);

    let updated = post_graphql(
        &app,
        json!({
            "query": "mutation Update($id: ID!, $input: MessageInput) { updateMessage(id: $id, input: $input) { id content author } }",
            "variables": { "id": id, "input": { "content": "bye" } }
        }),
    )
    .await?;
    assert_eq!(
        updated["data"]["updateMessage"],
        json!({ "id": id, "content": "bye", "author": null })
    );

    let refetched = post_graphql(
        &app,
        json!({
            "query": "query Get($id: ID!) { getMessage(id: $id) { content author } }",
            "variables": { "id": id }
        }),
    )
    .await?;
    assert_eq!(
        refetched["data"]["getMessage"],
        json!({ "content": "bye", "author": null })
    );

    Ok(())
}

#[tokio::test]
async fn unknown_message_surfaces_not_found_error() -> Result<()> {
    let app = build_app(Config::default())?;

    let response = post_graphql(
        &app,
        json!({ "query": r#"{ getMessage(id: "nonexistent") { id } }"# }),
    )
    .await?;

    assert_eq!(response["data"]["getMessage"], Value::Null);
    let error = &response["errors"][0];
    assert_eq!(error["message"], "no message exists with id nonexistent");
    assert_eq!(error["extensions"]["code"], "NOT_FOUND");
    assert_eq!(error["path"], json!(["getMessage"]));

    let response = post_graphql(
        &app,
        json!({ "query": r#"mutation { updateMessage(id: "nonexistent", input: { content: "x" }) { id } }"# }),
    )
    .await?;

    assert_eq!(response["data"]["updateMessage"], Value::Null);
    assert_eq!(response["errors"][0]["extensions"]["code"], "NOT_FOUND");

    Ok(())
}

#[tokio::test]
async fn create_without_input_stores_empty_message() -> Result<()> {
    let app = build_app(Config::default())?;

    let response = post_graphql(
        &app,
        json!({ "query": "mutation { createMessage { id content author } }" }),
    )
    .await?;

    let message = &response["data"]["createMessage"];
    assert!(message["id"].is_string());
    assert_eq!(message["content"], Value::Null);
    assert_eq!(message["author"], Value::Null);

    Ok(())
}

#[tokio::test]
async fn separate_apps_do_not_share_messages() -> Result<()> {
    let first = build_app(Config::default())?;
    let second = build_app(Config::default())?;

    let created = post_graphql(
        &first,
        json!({ "query": r#"mutation { createMessage(input: { content: "hi" }) { id } }"# }),
    )
    .await?;
    let id = created["data"]["createMessage"]["id"]
        .as_str()
        .expect("id is a string")
        .to_string();

    let response = post_graphql(
        &second,
        json!({
            "query": "query Get($id: ID!) { getMessage(id: $id) { id } }",
            "variables": { "id": id }
        }),
    )
    .await?;

    assert_eq!(response["errors"][0]["extensions"]["code"], "NOT_FOUND");

    Ok(())
}

#[tokio::test]
async fn dice_and_quotes_resolve() -> Result<()> {
    let app = build_app(Config::default())?;

    let response = post_graphql(
        &app,
        json!({
            "query": "{ quoteOfTheDay random rollThreeDice rollDice(numDice: 4, numSides: 12) getDie(numSides: 10) { numSides rollOnce roll(numRolls: 5) } }"
        }),
    )
    .await?;
    assert!(response.get("errors").is_none(), "unexpected errors: {response}");
    let data = &response["data"];

    let quote = data["quoteOfTheDay"].as_str().expect("quote");
    assert!(["Take it easy", "Salvation lies within"].contains(&quote));

    let random = data["random"].as_f64().expect("random float");
    assert!((0.0..1.0).contains(&random));

    let within = |rolls: &Value, sides: i64, count: usize| {
        let rolls = rolls.as_array().expect("rolls array");
        assert_eq!(rolls.len(), count);
        assert!(rolls
            .iter()
            .all(|roll| (1..=sides).contains(&roll.as_i64().expect("integer roll"))));
    };
    within(&data["rollThreeDice"], 6, 3);
    within(&data["rollDice"], 12, 4);

    let die = &data["getDie"];
    assert_eq!(die["numSides"], 10);
    let once = die["rollOnce"].as_i64().expect("rollOnce");
    assert!((1..=10).contains(&once));
    within(&die["roll"], 10, 5);

    Ok(())
}

#[tokio::test]
async fn invalid_die_is_a_user_input_error() -> Result<()> {
    let app = build_app(Config::default())?;

    let response = post_graphql(
        &app,
        json!({ "query": "{ rollDice(numDice: 2, numSides: 0) }" }),
    )
    .await?;

    assert_eq!(response["data"]["rollDice"], Value::Null);
    assert_eq!(response["errors"][0]["extensions"]["code"], "BAD_USER_INPUT");

    Ok(())
}

#[tokio::test]
async fn ip_prefers_forwarded_header() -> Result<()> {
    let app = build_app(Config::default())?;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/graphql")
                .header(header::CONTENT_TYPE, "application/json")
                .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
                .body(Body::from(json!({ "query": "{ ip }" }).to_string()))
                .expect("failed to build request"),
        )
        .await
        .expect("service error");
    let body = read_json(response).await?;
    assert_eq!(body["data"]["ip"], "203.0.113.7");

    let body = post_graphql(&app, json!({ "query": "{ ip }" })).await?;
    assert_eq!(body["data"]["ip"], Value::Null);

    Ok(())
}

#[tokio::test]
async fn get_requests_execute_queries() -> Result<()> {
    let app = build_app(Config::default())?;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/graphql?query=%7B%20rollDice(numDice%3A%202)%20%7D")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("service error");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await?;
    assert_eq!(body["data"]["rollDice"].as_array().map(Vec::len), Some(2));

    Ok(())
}

#[tokio::test]
async fn get_requests_cannot_run_mutations() -> Result<()> {
    let messages = Arc::new(MemoryMessageStore::default());
    let state = Arc::new(AppState::new(messages.clone()));
    let app = api::build_router(Arc::new(Config::default())).layer(Extension(state));

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/graphql?query=mutation%20%7B%20createMessage(input%3A%20%7Bcontent%3A%20%22x%22%7D)%20%7B%20id%20content%20%7D%20%7D")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("service error");

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        read_json(response).await?,
        json!({ "error": "Can only perform a mutation operation from a POST request" })
    );
    assert!(messages.is_empty());

    Ok(())
}

#[tokio::test]
async fn graphiql_is_disabled_by_default() -> Result<()> {
    let app = build_app(Config::default())?;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/graphql")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("service error");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn graphiql_served_when_enabled() -> Result<()> {
    let config = Config {
        graphql: GraphqlConfig {
            graphiql: true,
            ..GraphqlConfig::default()
        },
        ..Config::default()
    };
    let app = build_app(config)?;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/graphql")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("service error");

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    Ok(())
}

#[tokio::test]
async fn custom_graphql_path_is_honoured() -> Result<()> {
    let config = Config {
        graphql: GraphqlConfig {
            path: "/v1/graphql".to_string(),
            ..GraphqlConfig::default()
        },
        ..Config::default()
    };
    let app = build_app(config)?;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/graphql")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "query": "{ random }" }).to_string()))
                .expect("failed to build request"),
        )
        .await
        .expect("service error");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/graphql")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "query": "{ random }" }).to_string()))
                .expect("failed to build request"),
        )
        .await
        .expect("service error");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn health_and_fallback_routes() -> Result<()> {
    let app = build_app(Config::default())?;

    let health = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/health")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("service error");
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(read_json(health).await?, json!({ "status": "ok" }));

    let missing = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/nowhere")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("service error");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(missing).await?, json!({ "error": "not_found" }));

    Ok(())
}
