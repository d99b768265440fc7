use async_graphql::{Context, ErrorExtensions, Object, Result, ID};

use crate::{
    domain::dice::{self, Die},
    services::errors::ServiceError,
};

use super::{
    context::{message_service, ClientIp},
    nullable_list,
    types::{MessageObject, RandomDie},
};

const THREE_DICE: i32 = 3;

#[derive(Default)]
pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    async fn get_message(&self, ctx: &Context<'_>, id: ID) -> Result<Option<MessageObject>> {
        let message = message_service(ctx)?
            .get_message(&id)
            .map_err(|err| err.extend())?;
        Ok(Some(message.into()))
    }

    async fn quote_of_the_day(&self) -> Option<String> {
        Some(dice::quote_of_the_day(&mut rand::thread_rng()).to_string())
    }

    async fn random(&self) -> f64 {
        dice::random_fraction(&mut rand::thread_rng())
    }

    async fn roll_three_dice(&self) -> Result<Option<Vec<Option<i32>>>> {
        roll(None, THREE_DICE)
    }

    async fn roll_dice(
        &self,
        num_dice: i32,
        num_sides: Option<i32>,
    ) -> Result<Option<Vec<Option<i32>>>> {
        roll(num_sides, num_dice)
    }

    async fn get_die(&self, num_sides: Option<i32>) -> Result<Option<RandomDie>> {
        let die = Die::new(num_sides).map_err(|err| ServiceError::from(err).extend())?;
        Ok(Some(RandomDie(die)))
    }

    /// Address of the client issuing the request.
    async fn ip(&self, ctx: &Context<'_>) -> Option<String> {
        ctx.data_opt::<ClientIp>().and_then(|ClientIp(ip)| ip.clone())
    }
}

fn roll(sides: Option<i32>, count: i32) -> Result<Option<Vec<Option<i32>>>> {
    let rolls = Die::new(sides)
        .and_then(|die| die.roll(&mut rand::thread_rng(), count))
        .map_err(|err| ServiceError::from(err).extend())?;
    Ok(nullable_list(rolls))
}
