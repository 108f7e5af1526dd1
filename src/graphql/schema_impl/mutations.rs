use async_graphql::{Context, Object, ID};
use validator::Validate;

use crate::{
    errors::AppError,
    graphql::helpers::{caller, gql},
    models::dto::{
        request::AnswerQuestionRequest,
        response::{DeleteResponse, QuizSessionView},
    },
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn delete_material(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<DeleteResponse> {
        let (state, user_id) = caller(ctx)?;
        gql(state.material_service.delete(&id, &user_id).await)?;

        Ok(DeleteResponse {
            message: format!("Material '{}' deleted", id.as_str()),
        })
    }

    async fn start_quiz_session(
        &self,
        ctx: &Context<'_>,
        quiz_id: ID,
    ) -> async_graphql::Result<QuizSessionView> {
        let (state, user_id) = caller(ctx)?;
        let session = gql(state.quiz_session_service.start(&quiz_id, &user_id).await)?;
        Ok(QuizSessionView::from(&session))
    }

    /// Answers the current question. Answering the last question records the
    /// attempt and returns the results.
    async fn answer_question(
        &self,
        ctx: &Context<'_>,
        session_id: ID,
        input: AnswerQuestionRequest,
    ) -> async_graphql::Result<QuizSessionView> {
        let (state, user_id) = caller(ctx)?;
        gql(input.validate().map_err(AppError::from))?;

        let session = gql(
            state
                .quiz_session_service
                .answer(&session_id, &user_id, &input.answer)
                .await,
        )?;
        Ok(QuizSessionView::from(&session))
    }

    async fn discard_quiz_session(
        &self,
        ctx: &Context<'_>,
        session_id: ID,
    ) -> async_graphql::Result<DeleteResponse> {
        let (state, user_id) = caller(ctx)?;
        gql(state.quiz_session_service.discard(&session_id, &user_id).await)?;

        Ok(DeleteResponse {
            message: format!("Quiz session '{}' discarded", session_id.as_str()),
        })
    }
}
