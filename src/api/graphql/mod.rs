//! GraphQL endpoint backed by async-graphql.

use std::sync::Arc;

use async_graphql::{
    http::{parse_query_string, GraphiQLSource},
    parser::types::OperationType,
    EmptySubscription, Request, Schema,
};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::{Extension, RawQuery},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::warn;

use crate::infrastructure::{config::GraphqlConfig, state::AppState};

use self::{context::ClientIp, mutation::MutationRoot, query::QueryRoot};

pub mod context;
pub mod mutation;
pub mod query;
pub mod types;

pub type MessageSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

#[derive(Clone)]
struct GraphiqlPage(Option<Arc<str>>);

pub fn build_schema(config: &GraphqlConfig) -> MessageSchema {
    let mut builder = Schema::build(QueryRoot, MutationRoot, EmptySubscription);
    if let Some(depth) = config.depth_limit {
        builder = builder.limit_depth(depth);
    }
    if let Some(complexity) = config.complexity_limit {
        builder = builder.limit_complexity(complexity);
    }
    builder.finish()
}

pub fn router(config: &GraphqlConfig) -> Router {
    let page = config
        .graphiql
        .then(|| Arc::from(GraphiQLSource::build().endpoint(&config.path).finish()));

    Router::new()
        .route(&config.path, get(graphql_get).post(graphql_post))
        .layer(Extension(build_schema(config)))
        .layer(Extension(GraphiqlPage(page)))
}

async fn graphql_post(
    Extension(schema): Extension<MessageSchema>,
    Extension(state): Extension<Arc<AppState>>,
    client_ip: ClientIp,
    req: GraphQLRequest,
) -> GraphQLResponse {
    execute(&schema, state, client_ip, req.into_inner()).await
}

async fn graphql_get(
    Extension(schema): Extension<MessageSchema>,
    Extension(state): Extension<Arc<AppState>>,
    Extension(GraphiqlPage(page)): Extension<GraphiqlPage>,
    client_ip: ClientIp,
    RawQuery(query): RawQuery,
) -> Response {
    let Some(query) = query.filter(|query| !query.is_empty()) else {
        return match page {
            Some(page) => Html(page.to_string()).into_response(),
            None => bad_request("missing GraphQL query"),
        };
    };

    let mut request = match parse_query_string(&query) {
        Ok(request) => request,
        Err(err) => {
            warn!(error = %err, "rejected malformed GraphQL GET request");
            return bad_request(&err.to_string());
        }
    };

    if selects_mutation(&mut request) {
        warn!("rejected mutation sent over GET");
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            Json(serde_json::json!({
                "error": "Can only perform a mutation operation from a POST request"
            })),
        )
            .into_response();
    }

    execute(&schema, state, client_ip, request)
        .await
        .into_response()
}

async fn execute(
    schema: &MessageSchema,
    state: Arc<AppState>,
    client_ip: ClientIp,
    request: Request,
) -> GraphQLResponse {
    let request = request.data(state).data(client_ip);
    schema.execute(request).await.into()
}

/// True when the operation the request would run is a mutation. Unparseable
/// documents are left for execution to report.
fn selects_mutation(request: &mut Request) -> bool {
    let wanted = request.operation_name.clone();
    let Ok(document) = request.parsed_query() else {
        return false;
    };
    document.operations.iter().any(|(name, operation)| {
        let selected = match (wanted.as_deref(), name) {
            (Some(wanted), Some(name)) => wanted == name.as_str(),
            (Some(_), None) => false,
            (None, _) => true,
        };
        selected && operation.node.ty == OperationType::Mutation
    })
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}

/// Lists in the schema are nullable with nullable items.
pub(crate) fn nullable_list<T>(items: Vec<T>) -> Option<Vec<Option<T>>> {
    Some(items.into_iter().map(Some).collect())
}
