use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use super::{
    context::message_service,
    types::{MessageInputObject, MessageObject},
};

#[derive(Default)]
pub struct MutationRoot;

#[Object(name = "Mutation")]
impl MutationRoot {
    async fn create_message(
        &self,
        ctx: &Context<'_>,
        input: Option<MessageInputObject>,
    ) -> Result<Option<MessageObject>> {
        let message = message_service(ctx)?.create_message(input.unwrap_or_default().into());
        Ok(Some(message.into()))
    }

    /// Replaces the message wholesale; fields left out of `input` are cleared.
    async fn update_message(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: Option<MessageInputObject>,
    ) -> Result<Option<MessageObject>> {
        let message = message_service(ctx)?
            .update_message(&id, input.unwrap_or_default().into())
            .map_err(|err| err.extend())?;
        Ok(Some(message.into()))
    }
}
