use std::{convert::Infallible, net::SocketAddr, sync::Arc};

use async_graphql::{Context, Result};
use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::request::Parts,
};

use crate::{infrastructure::state::AppState, services::messages::MessageService};

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Address of the caller as seen by the HTTP layer, attached to every GraphQL request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientIp(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get(FORWARDED_FOR)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        Ok(ClientIp(forwarded.or(peer)))
    }
}

pub fn message_service(ctx: &Context<'_>) -> Result<MessageService> {
    let state = ctx.data::<Arc<AppState>>()?;
    Ok(MessageService::new(Arc::clone(state)))
}
