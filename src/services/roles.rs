//! Role-gated navigation
//!
//! Decides which capability set a session may use, from a profile fetched
//! fresh on every navigation. While the fetch is pending the active role is
//! Student - the safe default still renders Student-tier controls rather
//! than blocking. A failed fetch keeps the previous role; a backend role
//! change takes effect on the next profile fetch, never instantly.

use std::sync::{Arc, Mutex};

use crate::client::ApiClient;
use crate::models::{UserProfile, UserRole};

/// One gated action.
///
/// Roles are disjoint: no capability is shared between sets, and no role
/// inherits another's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Manage own applications (Student)
    ManageOwnApplications,
    /// Manage own reviews (Student)
    ManageOwnReviews,
    /// Edit own profile (Student)
    EditOwnProfile,
    /// Manage all applications within assigned categories (Moderator)
    ModerateApplications,
    /// Manage all reviews within assigned categories (Moderator)
    ModerateReviews,
    /// Edit name/phone/categories on an otherwise read-mostly profile
    /// (Moderator)
    EditContactDetails,
    /// Create and manage scholarships (Admin)
    ManageScholarships,
    /// Manage users, including role reassignment (Admin)
    ManageUsers,
    /// View aggregate analytics (Admin)
    ViewAnalytics,
}

const STUDENT_CAPABILITIES: &[Capability] = &[
    Capability::ManageOwnApplications,
    Capability::ManageOwnReviews,
    Capability::EditOwnProfile,
];

const MODERATOR_CAPABILITIES: &[Capability] = &[
    Capability::ModerateApplications,
    Capability::ModerateReviews,
    Capability::EditContactDetails,
];

const ADMIN_CAPABILITIES: &[Capability] = &[
    Capability::ManageScholarships,
    Capability::ManageUsers,
    Capability::ViewAnalytics,
];

/// The capability set a role activates.
pub fn capabilities(role: UserRole) -> &'static [Capability] {
    match role {
        UserRole::Student => STUDENT_CAPABILITIES,
        UserRole::Moderator => MODERATOR_CAPABILITIES,
        UserRole::Admin => ADMIN_CAPABILITIES,
    }
}

/// The resolved view a navigation renders against.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleView {
    /// Active role
    pub role: UserRole,
    /// Profile backing the role, absent while pending or after a failure
    pub profile: Option<UserProfile>,
}

impl RoleView {
    /// The view used while no profile fetch has completed.
    pub fn pending() -> Self {
        Self {
            role: UserRole::Student,
            profile: None,
        }
    }

    /// Whether the active role grants a capability.
    pub fn allows(&self, capability: Capability) -> bool {
        capabilities(self.role).contains(&capability)
    }
}

/// Per-navigation role resolution over the profile endpoint.
pub struct RoleGate {
    api: Arc<ApiClient>,
    last_known: Mutex<UserRole>,
}

impl RoleGate {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            last_known: Mutex::new(UserRole::Student),
        }
    }

    /// The view to render before `resolve` completes: always Student-tier.
    pub fn pending(&self) -> RoleView {
        RoleView::pending()
    }

    /// Fetch the profile for this navigation and derive the active role.
    ///
    /// On failure the screen keeps working: the previous (or default) role
    /// stays active and the failure is logged, not surfaced.
    pub async fn resolve(&self, email: &str) -> RoleView {
        match self.api.user_by_email(email).await {
            Ok(profile) => {
                let role = profile.role;
                *self.lock_last_known() = role;
                RoleView {
                    role,
                    profile: Some(profile),
                }
            }
            Err(e) => {
                let role = *self.lock_last_known();
                tracing::warn!(email, error = %e, fallback_role = %role, "Profile fetch failed; keeping previous role");
                RoleView {
                    role,
                    profile: None,
                }
            }
        }
    }

    fn lock_last_known(&self) -> std::sync::MutexGuard<'_, UserRole> {
        self.last_known.lock().unwrap_or_else(|e| e.into_inner())
    }
}
