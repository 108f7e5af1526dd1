use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

use learning_hub_server::{
    app_state::AppState, auth::JwtService, config::Config, graphql::create_schema, handlers,
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if config.is_production() {
        if let Err(e) = config.validate_for_production() {
            log::error!("Refusing to start: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                e.to_string(),
            ));
        }
    }

    let app_state = AppState::new(config.clone()).await.map_err(|e| {
        log::error!("Failed to initialise application state: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    let schema = create_schema(app_state.clone());
    let jwt_service = JwtService::new(&config.jwt_secret, &config.jwt_audience);
    // Headroom over the upload limit so oversize PDFs get a validation error.
    let payload_limit = config.max_upload_bytes * 2;
    let cors_origin = config.cors_allowed_origin.clone();
    let bind_addr = (config.web_server_host.clone(), config.web_server_port);

    log::info!(
        "Starting learning hub server on {}:{} ({})",
        bind_addr.0,
        bind_addr.1,
        config.app_env
    );

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&cors_origin)
            .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::Data::new(schema.clone()))
            .app_data(web::Data::new(jwt_service.clone()))
            .app_data(web::PayloadConfig::new(payload_limit))
            .app_data(web::JsonConfig::default().limit(payload_limit))
            .wrap(RequestIdMiddleware)
            .wrap(Logger::default())
            .wrap(cors)
            .configure(handlers::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
