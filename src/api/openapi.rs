use actix_web::{get, HttpResponse, Responder};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::api::schemas::{ErrorResponse, NotFoundBody};
use crate::shared::api::ApiError;

// Admin
use crate::modules::admin::adapter::incoming::web::routes::{
    profile::ProfileRequest,
    projects::{CreateProjectRequest, ImagePayload, UploadedImage},
    session::{LoginRequest, LoginResponse, SessionResponse},
};
// Portfolio
use crate::modules::portfolio::adapter::incoming::web::routes::portfolio_view::{
    PortfolioView, RefreshAccepted, RefreshRequest,
};
use crate::modules::portfolio::application::auto_refresh::{RefreshPhase, RefreshTrigger};
use crate::modules::portfolio::application::connection_monitor::ConnectionStatus;
use crate::modules::portfolio::application::portfolio_reader::PortfolioSnapshot;
use crate::modules::portfolio::domain::entities::{
    ContactMessage, NewProject, NewTestimonial, PersonalInfo, Project, SiteSettings,
    SiteSettingsInput, SocialLink, SocialLinkChanges, Testimonial,
};
// Contact
use crate::modules::contact::adapter::incoming::web::routes::submit_contact::ContactReceived;
use crate::modules::contact::application::contact_service::ContactSubmission;
// Webhook
use crate::modules::site::adapter::incoming::web::routes::rebuild_webhook::WebhookAck;
// Health
use crate::health::{HealthResponse, ReadinessResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Portfolio API",
        version = "1.0.0",
        description = "Public portfolio reads, contact form and admin CMS over a hosted Postgres backend"
    ),
    paths(
        // Portfolio endpoints
        crate::modules::portfolio::adapter::incoming::web::routes::portfolio_view::get_portfolio_handler,
        crate::modules::portfolio::adapter::incoming::web::routes::portfolio_view::refresh_portfolio_handler,
        crate::modules::portfolio::adapter::incoming::web::routes::resources::get_projects_handler,
        crate::modules::portfolio::adapter::incoming::web::routes::resources::get_testimonials_handler,
        crate::modules::portfolio::adapter::incoming::web::routes::resources::get_social_links_handler,
        crate::modules::portfolio::adapter::incoming::web::routes::resources::get_personal_info_handler,
        crate::modules::portfolio::adapter::incoming::web::routes::resources::get_settings_handler,
        crate::modules::portfolio::adapter::incoming::web::routes::connection::connection_status_handler,
        crate::modules::portfolio::adapter::incoming::web::routes::connection::retry_connection_handler,

        // Contact endpoints
        crate::modules::contact::adapter::incoming::web::routes::submit_contact::submit_contact_handler,

        // Admin endpoints
        crate::modules::admin::adapter::incoming::web::routes::session::login_handler,
        crate::modules::admin::adapter::incoming::web::routes::session::session_handler,
        crate::modules::admin::adapter::incoming::web::routes::projects::create_project_handler,
        crate::modules::admin::adapter::incoming::web::routes::projects::upload_project_image_handler,
        crate::modules::admin::adapter::incoming::web::routes::testimonials::create_testimonial_handler,
        crate::modules::admin::adapter::incoming::web::routes::profile::update_social_links_handler,
        crate::modules::admin::adapter::incoming::web::routes::profile::save_profile_handler,
        crate::modules::admin::adapter::incoming::web::routes::messages::list_messages_handler,
        crate::modules::admin::adapter::incoming::web::routes::settings::update_settings_handler,

        // Webhook
        crate::modules::site::adapter::incoming::web::routes::rebuild_webhook::rebuild_webhook_handler,

        // Health
        crate::health::health,
        crate::health::readiness,
    ),
    components(
        schemas(
            // Response wrappers
            ErrorResponse,
            ApiError,
            NotFoundBody,

            // Portfolio
            PortfolioView,
            PortfolioSnapshot,
            RefreshPhase,
            RefreshTrigger,
            RefreshRequest,
            RefreshAccepted,
            ConnectionStatus,
            Project,
            Testimonial,
            SocialLink,
            PersonalInfo,
            SiteSettings,

            // Contact
            ContactSubmission,
            ContactReceived,

            // Admin DTOs
            LoginRequest,
            LoginResponse,
            SessionResponse,
            NewProject,
            CreateProjectRequest,
            ImagePayload,
            UploadedImage,
            NewTestimonial,
            SocialLinkChanges,
            ProfileRequest,
            ContactMessage,
            SiteSettingsInput,

            // Webhook / health
            WebhookAck,
            HealthResponse,
            ReadinessResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "portfolio", description = "Public portfolio reads"),
        (name = "contact", description = "Contact form"),
        (name = "admin", description = "Admin panel, requires a session token"),
        (name = "webhook", description = "Backend change notifications"),
        (name = "health", description = "Liveness and readiness probes"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token returned by /api/admin/login"))
                        .build(),
                ),
            )
        }
    }
}

#[get("/api-docs/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
