//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Roles
// =============================================================================

/// Plain registered identity without dashboard access
pub const ROLE_USER: &str = "user";

/// Organization administrator
pub const ROLE_ADMIN: &str = "admin";

/// Head administrator
pub const ROLE_SUPER_ADMIN: &str = "super_admin";

/// All valid role values
pub const VALID_ROLES: &[&str] = &[ROLE_USER, ROLE_ADMIN, ROLE_SUPER_ADMIN];

/// Check if a role value is valid
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

// =============================================================================
// Profile statuses
// =============================================================================

pub const STATUS_PENDING_VERIFICATION: &str = "pending_verification";
pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_INACTIVE: &str = "inactive";
pub const STATUS_SUSPENDED: &str = "suspended";
pub const STATUS_REJECTED: &str = "rejected";
/// Legacy value written by the first verification flow; never grants access.
pub const STATUS_APPROVED: &str = "approved";

// =============================================================================
// Registration
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Minimum display name length requirement
pub const MIN_NAME_LENGTH: usize = 2;

/// Maximum display name length
pub const MAX_NAME_LENGTH: usize = 100;

/// Minimum length of the self-supplied access justification
pub const MIN_REASON_LENGTH: usize = 5;

/// Length of one-time login codes
pub const OTP_CODE_LENGTH: usize = 6;

// =============================================================================
// Activities
// =============================================================================

pub const MIN_ACTIVITY_TITLE_LENGTH: usize = 3;
pub const MAX_ACTIVITY_TITLE_LENGTH: usize = 100;
pub const MIN_ACTIVITY_DESCRIPTION_LENGTH: usize = 10;
pub const MAX_ACTIVITY_CATEGORY_LENGTH: usize = 50;

/// Number of related activities shown next to a detail view
pub const RELATED_ACTIVITIES_LIMIT: usize = 3;

// =============================================================================
// Contact messages
// =============================================================================

pub const MIN_CONTACT_NAME_LENGTH: usize = 2;
pub const MIN_CONTACT_MESSAGE_LENGTH: usize = 10;

// =============================================================================
// Image uploads
// =============================================================================

/// Maximum accepted image size (2 MiB)
pub const MAX_IMAGE_BYTES: u64 = 2 * 1024 * 1024;

/// Accepted image MIME types. `image/jpg` is a common non-standard alias.
pub const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "image/gif",
];

/// Length of the random suffix appended to stored object names
pub const OBJECT_NAME_SUFFIX_LENGTH: usize = 8;
