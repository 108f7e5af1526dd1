use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState, auth::AuthenticatedUser, errors::AppError,
    models::dto::request::GenerateQuizRequest,
};

#[post("/quizzes/generate")]
pub async fn generate_quiz(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .generate_quiz(auth.user_id(), request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(quiz))
}

#[get("/quizzes")]
pub async fn list_quizzes(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quizzes = state.quiz_service.list_quizzes(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(quizzes))
}

#[get("/quizzes/{id}")]
pub async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(&id, auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[get("/quizzes/{id}/attempts")]
pub async fn list_quiz_attempts(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let attempts = state
        .quiz_service
        .list_attempts(&id, auth.user_id())
        .await?;
    Ok(HttpResponse::Ok().json(attempts))
}

#[cfg(test)]
mod tests {
    use crate::{
        handlers::configure,
        repositories::QuizRepository,
        services::{
            model_service::{GeneratedQuestion, GeneratedQuiz, MockDocumentModel},
            playnote_client::MockPodcastSynthesizer,
        },
        test_utils::{
            fixtures::test_quiz,
            in_memory::Fakes,
            test_helpers::{bearer, jwt_service, test_state},
        },
    };
    use actix_web::{http::StatusCode, test, web, App};

    #[actix_web::test]
    async fn test_generate_quiz_returns_created_quiz() {
        let fakes = Fakes::default();
        let mut model = MockDocumentModel::new();
        model.expect_generate_quiz().returning(|_, _| {
            Ok(GeneratedQuiz {
                title: "Rust ownership".to_string(),
                questions: vec![GeneratedQuestion {
                    question: "Who frees a value?".to_string(),
                    options: vec!["Its owner".to_string(), "The GC".to_string()],
                    correct_answer: "Its owner".to_string(),
                }],
            })
        });
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state(
                    &fakes,
                    MockPodcastSynthesizer::new(),
                    model,
                )))
                .app_data(web::Data::new(jwt_service()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/quizzes/generate")
            .insert_header(bearer("user-1"))
            .set_json(serde_json::json!({ "files": [{ "data": "JVBERi0=" }] }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let quiz: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(quiz["title"], "Rust ownership");
        assert_eq!(quiz["questions"][0]["correct_answer"], "Its owner");
    }

    #[actix_web::test]
    async fn test_get_quiz_and_attempts() {
        let fakes = Fakes::default();
        let quiz = test_quiz("user-1", 2);
        fakes.quizzes.create(quiz.clone()).await.unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state(
                    &fakes,
                    MockPodcastSynthesizer::new(),
                    MockDocumentModel::new(),
                )))
                .app_data(web::Data::new(jwt_service()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/quizzes/{}", quiz.id))
            .insert_header(bearer("user-1"))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["id"], quiz.id.as_str());

        let req = test::TestRequest::get()
            .uri(&format!("/api/quizzes/{}/attempts", quiz.id))
            .insert_header(bearer("user-1"))
            .to_request();
        let attempts: Vec<serde_json::Value> = test::call_and_read_body_json(&app, req).await;
        assert!(attempts.is_empty());

        let req = test::TestRequest::get()
            .uri("/api/quizzes/does-not-exist")
            .insert_header(bearer("user-1"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
