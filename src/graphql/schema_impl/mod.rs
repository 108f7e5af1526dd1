pub mod mutations;
pub mod queries;

use async_graphql::{EmptySubscription, Schema as GraphQLSchema};

use crate::app_state::AppState;

pub use mutations::MutationRoot;
pub use queries::QueryRoot;

pub type Schema = GraphQLSchema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn create_schema(app_state: AppState) -> Schema {
    GraphQLSchema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(app_state)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        auth::Claims,
        repositories::QuizRepository,
        test_utils::{fixtures::test_quiz, in_memory::Fakes, test_helpers::default_state},
    };
    use async_graphql::Request;

    fn claims(user_id: &str) -> Claims {
        Claims::new(user_id, None, "authenticated", 1)
    }

    #[actix_rt::test]
    async fn test_quiz_session_runs_to_results() {
        let fakes = Fakes::default();
        let quiz = test_quiz("user-1", 2);
        fakes.quizzes.create(quiz.clone()).await.unwrap();
        let schema = create_schema(default_state(&fakes));

        let started = schema
            .execute(
                Request::new(format!(
                    r#"mutation {{ startQuizSession(quizId: "{}") {{ sessionId phase questionIndex currentQuestion {{ options }} }} }}"#,
                    quiz.id
                ))
                .data(claims("user-1")),
            )
            .await;
        assert!(started.errors.is_empty(), "{:?}", started.errors);
        let started = started.data.into_json().unwrap();
        assert_eq!(started["startQuizSession"]["phase"], "QUESTION");
        let session_id = started["startQuizSession"]["sessionId"]
            .as_str()
            .unwrap()
            .to_string();

        let mut last = serde_json::Value::Null;
        for answer in ["right answer", "Wrong answer"] {
            let response = schema
                .execute(
                    Request::new(format!(
                        r#"mutation {{ answerQuestion(sessionId: "{}", input: {{ answer: "{}" }}) {{ phase score responses {{ isCorrect }} }} }}"#,
                        session_id, answer
                    ))
                    .data(claims("user-1")),
                )
                .await;
            assert!(response.errors.is_empty(), "{:?}", response.errors);
            last = response.data.into_json().unwrap();
        }

        assert_eq!(last["answerQuestion"]["phase"], "RESULTS");
        assert_eq!(last["answerQuestion"]["score"], 50);
        assert_eq!(last["answerQuestion"]["responses"][0]["isCorrect"], true);

        let finished = schema
            .execute(
                Request::new(format!(
                    r#"{{ quizSession(id: "{}") {{ phase }} }}"#,
                    session_id
                ))
                .data(claims("user-1")),
            )
            .await;
        assert_eq!(
            finished.errors[0].extensions.as_ref().and_then(|e| e.get("code")).cloned(),
            Some(async_graphql::Value::from("NOT_FOUND"))
        );
        assert_eq!(fakes.attempts.all().await.len(), 1);
    }

    #[actix_rt::test]
    async fn test_other_users_quiz_is_forbidden() {
        let fakes = Fakes::default();
        let quiz = test_quiz("owner", 1);
        fakes.quizzes.create(quiz.clone()).await.unwrap();
        let schema = create_schema(default_state(&fakes));

        let response = schema
            .execute(
                Request::new(format!(r#"{{ quiz(id: "{}") {{ title }} }}"#, quiz.id))
                    .data(claims("intruder")),
            )
            .await;

        assert_eq!(response.errors.len(), 1);
        let code = response.errors[0]
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .cloned();
        assert_eq!(code, Some(async_graphql::Value::from("FORBIDDEN")));
    }

    #[actix_rt::test]
    async fn test_missing_claims_is_unauthorized() {
        let fakes = Fakes::default();
        let schema = create_schema(default_state(&fakes));

        let response = schema.execute(Request::new("{ materials { id } }")).await;

        assert_eq!(response.errors.len(), 1);
        assert!(response.errors[0].message.contains("Authentication required"));
    }
}
