pub mod api;
pub mod config;
pub mod health;
pub mod modules;
pub mod shared;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::modules::admin::application::admin_services::AdminServices;
use crate::modules::backend::adapter::outgoing::{
    SupabaseAuth, SupabaseClient, SupabaseStorage, SupabaseTables,
};
use crate::modules::backend::application::ports::outgoing::{
    AuthGateway, ObjectStorage, TableGateway,
};
use crate::modules::contact::application::contact_service::ContactService;
use crate::modules::portfolio::application::auto_refresh::RefreshOptions;
use crate::modules::portfolio::application::change_feed::ChangeFeed;
use crate::modules::portfolio::application::connection_monitor::ConnectionMonitor;
use crate::modules::portfolio::application::fallback_cache::FallbackCache;
use crate::modules::portfolio::application::live_portfolio::LivePortfolio;
use crate::modules::portfolio::application::portfolio_reader::PortfolioReader;
use crate::shared::api::custom_json_config;

#[cfg(test)]
mod tests;

const CHANGE_FEED_CAPACITY: usize = 64;

/// The three backend APIs every service is built on.
pub struct Backend {
    pub tables: Arc<dyn TableGateway>,
    pub auth: Arc<dyn AuthGateway>,
    pub storage: Arc<dyn ObjectStorage>,
}

impl Backend {
    pub fn supabase(client: SupabaseClient) -> Self {
        Self {
            tables: Arc::new(SupabaseTables::new(client.clone())),
            auth: Arc::new(SupabaseAuth::new(client.clone())),
            storage: Arc::new(SupabaseStorage::new(client)),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub portfolio: LivePortfolio,
    pub admin: AdminServices,
    pub contact: Arc<ContactService>,
    pub webhook_secret: Option<String>,
}

impl AppState {
    /// Wires every service onto one change feed and mounts the live view.
    /// Spawns tasks, so it must run inside a Tokio runtime.
    pub fn build(backend: Backend, config: &AppConfig, refresh: RefreshOptions) -> Self {
        let changes = ChangeFeed::new(CHANGE_FEED_CAPACITY);
        let monitor = Arc::new(ConnectionMonitor::new(
            Arc::clone(&backend.tables),
            Arc::clone(&backend.storage),
            config.storage_bucket.clone(),
        ));
        let reader = PortfolioReader::new(
            Arc::clone(&backend.tables),
            Arc::new(FallbackCache::new()),
            monitor,
            changes.clone(),
        );

        let admin = AdminServices::new(
            Arc::clone(&backend.tables),
            backend.auth,
            backend.storage,
            &config.admin_email,
            &config.storage_bucket,
            changes.clone(),
        );
        let contact = Arc::new(ContactService::new(backend.tables, changes));

        Self {
            portfolio: LivePortfolio::mount(reader, refresh),
            admin,
            contact,
            webhook_secret: config.webhook_secret.clone(),
        }
    }
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    // Try .env.{environment} first, then fall back to .env
    let env = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
    let env_file = format!(".env.{}", env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    let config = AppConfig::from_env()?;
    let server_url = config.server_url();
    info!("Server run on: {}", server_url);

    let client = SupabaseClient::with_client(
        reqwest::Client::new(),
        &config.backend_url,
        &config.backend_anon_key,
    );
    let state = AppState::build(Backend::supabase(client), &config, config.refresh_options());
    let api_prefix = config.api_prefix.clone();

    HttpServer::new(move || {
        let prefix = api_prefix.clone();
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(web::Data::new(state.clone()))
            .app_data(custom_json_config())
            .configure(move |cfg| init_routes(cfg, &prefix))
            .default_service(web::to(
                crate::modules::site::adapter::incoming::web::routes::not_found,
            ))
    })
    .bind(server_url)?
    .run()
    .await?;

    Ok(())
}

fn init_routes(cfg: &mut web::ServiceConfig, api_prefix: &str) {
    use crate::modules::admin::adapter::incoming::web::routes as admin;
    use crate::modules::contact::adapter::incoming::web::routes as contact;
    use crate::modules::portfolio::adapter::incoming::web::routes as portfolio;
    use crate::modules::site::adapter::incoming::web::routes as site;

    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    cfg.service(crate::api::openapi::openapi_json);
    // Portfolio
    cfg.service(portfolio::get_portfolio_handler);
    cfg.service(portfolio::refresh_portfolio_handler);
    cfg.service(portfolio::get_projects_handler);
    cfg.service(portfolio::get_testimonials_handler);
    cfg.service(portfolio::get_social_links_handler);
    cfg.service(portfolio::get_personal_info_handler);
    cfg.service(portfolio::get_settings_handler);
    cfg.service(portfolio::connection_status_handler);
    cfg.service(portfolio::retry_connection_handler);
    // Contact
    cfg.service(contact::submit_contact_handler);
    // Admin session
    cfg.service(admin::login_handler);
    cfg.service(admin::logout_handler);
    cfg.service(admin::session_handler);
    // Admin content
    cfg.service(admin::upload_project_image_handler);
    cfg.service(admin::create_project_handler);
    cfg.service(admin::update_project_handler);
    cfg.service(admin::delete_project_handler);
    cfg.service(admin::create_testimonial_handler);
    cfg.service(admin::update_testimonial_handler);
    cfg.service(admin::delete_testimonial_handler);
    cfg.service(admin::update_personal_info_handler);
    cfg.service(admin::update_social_links_handler);
    cfg.service(admin::create_social_link_handler);
    cfg.service(admin::update_social_link_handler);
    cfg.service(admin::delete_social_link_handler);
    cfg.service(admin::save_profile_handler);
    cfg.service(admin::list_messages_handler);
    cfg.service(admin::mark_message_read_handler);
    cfg.service(admin::delete_message_handler);
    cfg.service(admin::update_settings_handler);
    // Site
    site::rebuild_webhook::configure(cfg);
    site::placeholders::configure(cfg, api_prefix);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
        std::process::exit(1);
    }
}
