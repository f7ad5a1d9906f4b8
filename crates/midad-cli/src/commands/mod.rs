//! Command handlers

pub mod auth;
pub mod category;
pub mod config;
pub mod draft;
pub mod media;
pub mod post;
pub mod status;
