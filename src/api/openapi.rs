//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    activity_handler, admin_handler, auth_handler, contact_handler, public_handler,
    timeline_handler, upload_handler,
};
use crate::services::{
    ActivityDetail, DashboardStats, LoginResponse, ProfileListing, RoleCounts, SessionResponse,
    StatusCounts, UploadedImage,
};
use crate::types::MessageResponse;
use domain::{
    Activity, ActivityStatus, ContactMessage, ContactStatus, Profile, ProfileStatus, Role,
    TimelineItem,
};

/// OpenAPI documentation for the site API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "KKMI Al-Khawarizmi Site API",
        version = "0.1.0",
        description = "Public site content and the admin dashboard behind the auth gate"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Public site
        public_handler::list_activities,
        public_handler::get_activity,
        public_handler::list_timeline,
        public_handler::submit_contact,
        // Authentication
        auth_handler::register,
        auth_handler::login,
        auth_handler::send_otp,
        auth_handler::verify_otp,
        auth_handler::update_password,
        auth_handler::logout,
        // Admins
        admin_handler::get_me,
        admin_handler::update_me,
        admin_handler::dashboard,
        admin_handler::list_pending,
        admin_handler::list_profiles,
        admin_handler::get_profile,
        admin_handler::approve_profile,
        admin_handler::reject_profile,
        admin_handler::suspend_profile,
        admin_handler::reactivate_profile,
        admin_handler::edit_profile,
        admin_handler::delete_profile,
        // Content
        activity_handler::list_activities,
        activity_handler::create_activity,
        activity_handler::update_activity,
        activity_handler::delete_activity,
        timeline_handler::list_timeline,
        timeline_handler::create_item,
        timeline_handler::update_item,
        timeline_handler::delete_item,
        contact_handler::list_messages,
        contact_handler::mark_read,
        contact_handler::reply,
        contact_handler::delete_message,
        upload_handler::upload_image,
    ),
    components(
        schemas(
            // Domain types
            Profile,
            Role,
            ProfileStatus,
            Activity,
            ActivityStatus,
            TimelineItem,
            ContactMessage,
            ContactStatus,
            // Service responses
            ActivityDetail,
            DashboardStats,
            LoginResponse,
            ProfileListing,
            RoleCounts,
            StatusCounts,
            SessionResponse,
            UploadedImage,
            MessageResponse,
            // Requests
            public_handler::ContactRequest,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::OtpRequest,
            auth_handler::VerifyOtpRequest,
            auth_handler::UpdatePasswordRequest,
            admin_handler::UpdateNameRequest,
            admin_handler::EditProfileRequest,
            activity_handler::ActivityForm,
            timeline_handler::TimelineRequest,
            contact_handler::ReplyRequest,
            upload_handler::ImageUploadForm,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Public", description = "Public site content and contact form"),
        (name = "Authentication", description = "Registration, sign-in and recovery"),
        (name = "Dashboard", description = "Signed-in admin and summary statistics"),
        (name = "Admin Management", description = "Admin approval and profile management"),
        (name = "Activities", description = "Activity management"),
        (name = "Timeline", description = "Timeline management"),
        (name = "Contact", description = "Contact inbox"),
        (name = "Uploads", description = "Image storage")
    )
)]
pub struct ApiDoc;

/// Bearer scheme for platform access tokens
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token returned by /admin/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
