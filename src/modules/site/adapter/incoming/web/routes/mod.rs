pub mod placeholders;
pub mod rebuild_webhook;

pub use placeholders::not_found;
pub use rebuild_webhook::rebuild_webhook_handler;
