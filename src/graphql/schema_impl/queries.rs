use async_graphql::{Context, Object, ID};

use crate::{
    graphql::helpers::{caller, gql},
    models::{
        domain::{LearningMaterial, PodcastNote, Quiz, QuizAttempt},
        dto::response::QuizSessionView,
    },
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// The caller's uploaded materials, newest first.
    async fn materials(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<LearningMaterial>> {
        let (state, user_id) = caller(ctx)?;
        gql(state.material_service.list(&user_id).await)
    }

    async fn quizzes(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<Quiz>> {
        let (state, user_id) = caller(ctx)?;
        gql(state.quiz_service.list_quizzes(&user_id).await)
    }

    async fn quiz(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<Quiz> {
        let (state, user_id) = caller(ctx)?;
        gql(state.quiz_service.get_quiz(&id, &user_id).await)
    }

    async fn quiz_attempts(
        &self,
        ctx: &Context<'_>,
        quiz_id: ID,
    ) -> async_graphql::Result<Vec<QuizAttempt>> {
        let (state, user_id) = caller(ctx)?;
        gql(state.quiz_service.list_attempts(&quiz_id, &user_id).await)
    }

    async fn podcasts(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<PodcastNote>> {
        let (state, user_id) = caller(ctx)?;
        gql(state.podcast_service.list(&user_id).await)
    }

    async fn podcast(&self, ctx: &Context<'_>, id: ID) -> async_graphql::Result<PodcastNote> {
        let (state, user_id) = caller(ctx)?;
        gql(state.podcast_service.get(&id, &user_id).await)
    }

    async fn quiz_session(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<QuizSessionView> {
        let (state, user_id) = caller(ctx)?;
        let session = gql(state.quiz_session_service.get(&id, &user_id).await)?;
        Ok(QuizSessionView::from(&session))
    }
}
