pub mod admin_auth;
pub mod admin_services;
pub mod errors;
pub mod image_upload;
pub mod service;
