pub mod http_client;
pub mod signing_service_client;
pub mod user_interaction;
