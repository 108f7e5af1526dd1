use async_graphql::{Context, ErrorExtensions};

use crate::{app_state::AppState, auth::extract_claims_from_context, errors::AppResult};

/// Converts a service result into a GraphQL result carrying the error code.
pub fn gql<T>(result: AppResult<T>) -> async_graphql::Result<T> {
    result.map_err(|e| e.extend())
}

/// App state and the caller's user id for a resolver.
pub fn caller<'a>(ctx: &Context<'a>) -> async_graphql::Result<(&'a AppState, String)> {
    let state = ctx.data::<AppState>()?;
    let claims = gql(extract_claims_from_context(ctx))?;
    Ok((state, claims.sub))
}
