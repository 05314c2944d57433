// src/lib.rs

#[macro_use]
pub mod macros;

pub mod api;
pub mod app;
pub mod chat;
pub mod chat_message;
pub mod chat_view;
pub mod config;
pub mod constants;
pub mod conversation;
pub mod errors;
pub mod key_handlers;
pub mod logging;
pub mod models;
pub mod status_indicator;
