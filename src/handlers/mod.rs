pub mod assistant_handler;
pub mod graphql_handler;
pub mod health_handler;
pub mod material_handler;
pub mod podcast_handler;
pub mod quiz_handler;
pub mod quiz_session_handler;
pub mod summary_handler;

use actix_web::web;

use crate::auth::AuthMiddleware;

/// Registers every route. Everything under `/api` requires a bearer token.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_handler::health_check)
        .service(health_handler::readiness_check)
        .service(material_handler::get_file)
        .service(
            web::scope("/api")
                .wrap(AuthMiddleware)
                .service(material_handler::upload_material)
                .service(material_handler::list_materials)
                .service(material_handler::delete_material)
                .service(quiz_handler::generate_quiz)
                .service(quiz_handler::list_quizzes)
                .service(quiz_handler::get_quiz)
                .service(quiz_handler::list_quiz_attempts)
                .service(quiz_session_handler::start_quiz_session)
                .service(quiz_session_handler::get_quiz_session)
                .service(quiz_session_handler::answer_question)
                .service(quiz_session_handler::discard_quiz_session)
                .service(podcast_handler::generate_podcast)
                .service(podcast_handler::list_podcasts)
                .service(podcast_handler::get_podcast)
                .service(summary_handler::generate_summary)
                .service(assistant_handler::get_assistant_config)
                .service(assistant_handler::handle_assistant_event)
                .service(graphql_handler::graphql),
        );
}
