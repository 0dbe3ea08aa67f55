pub mod clock;
pub mod oauth_client;
pub mod random;
