pub mod connection;
pub mod portfolio_view;
pub mod resources;

pub use connection::{connection_status_handler, retry_connection_handler};
pub use portfolio_view::{get_portfolio_handler, refresh_portfolio_handler};
pub use resources::{
    get_personal_info_handler, get_projects_handler, get_settings_handler,
    get_social_links_handler, get_testimonials_handler,
};
