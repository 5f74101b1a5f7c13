pub mod auth;
pub mod config;
pub mod detect;
pub mod gemini;
pub mod i18n;
pub mod server;
pub mod session;
pub mod store;
pub mod strategy;
pub mod translate;
