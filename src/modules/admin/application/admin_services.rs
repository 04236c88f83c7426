use std::sync::Arc;

use crate::modules::admin::application::admin_auth::AdminAuth;
use crate::modules::admin::application::image_upload::{ImagePolicy, ProjectImageStore};
use crate::modules::admin::application::service::{
    message_admin::MessageAdmin, profile_admin::ProfileAdmin, project_admin::ProjectAdmin,
    settings_admin::SettingsAdmin, testimonial_admin::TestimonialAdmin,
};
use crate::modules::backend::application::ports::outgoing::{
    AuthGateway, ObjectStorage, TableGateway,
};
use crate::modules::portfolio::application::change_feed::ChangeFeed;

/// Every admin-facing service, sharing one auth boundary and change feed.
#[derive(Clone)]
pub struct AdminServices {
    pub auth: Arc<AdminAuth>,
    pub projects: Arc<ProjectAdmin>,
    pub testimonials: Arc<TestimonialAdmin>,
    pub profile: Arc<ProfileAdmin>,
    pub messages: Arc<MessageAdmin>,
    pub settings: Arc<SettingsAdmin>,
}

impl AdminServices {
    pub fn new(
        tables: Arc<dyn TableGateway>,
        auth_gateway: Arc<dyn AuthGateway>,
        storage: Arc<dyn ObjectStorage>,
        admin_email: &str,
        bucket: &str,
        changes: ChangeFeed,
    ) -> Self {
        let auth = Arc::new(AdminAuth::new(auth_gateway, admin_email));
        let images = Arc::new(ProjectImageStore::new(storage, ImagePolicy::new(bucket)));

        Self {
            projects: Arc::new(ProjectAdmin::new(
                Arc::clone(&tables),
                Arc::clone(&auth),
                images,
                changes.clone(),
            )),
            testimonials: Arc::new(TestimonialAdmin::new(
                Arc::clone(&tables),
                Arc::clone(&auth),
                changes.clone(),
            )),
            profile: Arc::new(ProfileAdmin::new(
                Arc::clone(&tables),
                Arc::clone(&auth),
                changes.clone(),
            )),
            messages: Arc::new(MessageAdmin::new(
                Arc::clone(&tables),
                Arc::clone(&auth),
                changes.clone(),
            )),
            settings: Arc::new(SettingsAdmin::new(tables, Arc::clone(&auth), changes)),
            auth,
        }
    }
}
