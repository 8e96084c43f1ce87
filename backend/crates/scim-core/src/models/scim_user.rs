//! A persisted user account.

use crate::{Name, ScimMeta, UserProfile};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScimUser {
    id: Uuid,
    meta: ScimMeta,
    #[serde(flatten)]
    profile: UserProfile,
}

impl ScimUser {
    pub fn new(id: Uuid, meta: ScimMeta, profile: UserProfile) -> Self {
        Self { id, meta, profile }
    }

    /// Same id and meta with a replacement profile, ready to submit as an update.
    pub fn with_profile(&self, profile: UserProfile) -> Self {
        Self {
            id: self.id,
            meta: self.meta,
            profile,
        }
    }

    /// Copy carrying `active = false` and the supplied post-deactivation meta.
    pub fn deactivated(self, meta: ScimMeta) -> Self {
        Self {
            id: self.id,
            meta,
            profile: self.profile.deactivated(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn meta(&self) -> &ScimMeta {
        &self.meta
    }

    pub fn version(&self) -> i64 {
        self.meta.version
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.meta.created
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.meta.last_modified
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn user_name(&self) -> &str {
        self.profile.user_name()
    }

    pub fn primary_email(&self) -> &str {
        self.profile.primary_email()
    }

    pub fn name(&self) -> &Name {
        self.profile.name()
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.profile.phone_number()
    }

    pub fn active(&self) -> bool {
        self.profile.active()
    }
}
