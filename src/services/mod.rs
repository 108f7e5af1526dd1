pub mod assistant_service;
pub mod material_service;
pub mod model_service;
pub mod playnote_client;
pub mod podcast_service;
pub mod quiz_attempt_service;
pub mod quiz_service;
pub mod quiz_session_service;
