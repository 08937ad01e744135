//! In-memory stand-ins for the table store and the hosted platform.
//!
//! The fakes implement the same traits as the production clients, so
//! `Services::from_parts` wires them exactly like the real thing.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use domain::activity::canonical_order;
use domain::timeline::date_descending;
use domain::{
    Activity, ActivityDraft, ContactDraft, ContactMessage, ContactStatus, LifecycleUpdate,
    NewProfile, Profile, ProfileStatus, Role, TimelineFields, TimelineItem,
};
use khawarizmi_site::api::AppState;
use khawarizmi_site::errors::{AppError, AppResult};
use khawarizmi_site::infra::{
    ActivityRepository, ContactRepository, IdentityProvider, IdentityUser, ObjectStorage,
    PlatformError, PlatformResult, ProfileRepository, Session, TimelineRepository, UnitOfWork,
};
use khawarizmi_site::services::Services;

pub const TEST_BUCKET: &str = "activity-images";
pub const OTP_CODE: &str = "123456";

// =============================================================================
// Table store
// =============================================================================

#[derive(Default)]
pub struct MemoryProfiles {
    rows: Mutex<Vec<Profile>>,
    pub writes: Mutex<usize>,
}

impl MemoryProfiles {
    pub fn insert(&self, profile: Profile) {
        self.rows.lock().unwrap().push(profile);
    }

    pub fn get(&self, id: Uuid) -> Option<Profile> {
        self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned()
    }

    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }

    fn modify<F: FnOnce(&mut Profile)>(&self, id: Uuid, f: F) -> AppResult<Profile> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows.iter_mut().find(|p| p.id == id).ok_or(AppError::NotFound)?;
        f(row);
        *self.writes.lock().unwrap() += 1;
        Ok(row.clone())
    }
}

#[async_trait]
impl ProfileRepository for MemoryProfiles {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Profile>> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Profile>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn upsert_registration(&self, new: NewProfile) -> AppResult<Profile> {
        let mut rows = self.rows.lock().unwrap();
        let profile_id = rows.len() as i64 + 1;
        let now = Utc::now();
        let profile = Profile {
            id: new.id,
            profile_id,
            full_name: Some(new.full_name),
            email: new.email,
            role: new.role,
            status: new.status,
            is_approved: new.is_approved,
            reason: Some(new.reason),
            created_at: now,
            updated_at: Some(now),
            approved_at: None,
            approved_by: None,
            rejected_at: None,
            suspended_at: None,
        };
        rows.retain(|p| p.id != profile.id);
        rows.push(profile.clone());
        *self.writes.lock().unwrap() += 1;
        Ok(profile)
    }

    async fn list(
        &self,
        role: Option<Role>,
        status: Option<ProfileStatus>,
    ) -> AppResult<Vec<Profile>> {
        let mut rows: Vec<Profile> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| role.map_or(true, |r| p.role == r))
            .filter(|p| status.map_or(true, |s| p.status == s))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn update_lifecycle(
        &self,
        id: Uuid,
        update: LifecycleUpdate,
        at: DateTime<Utc>,
    ) -> AppResult<Profile> {
        self.modify(id, |p| {
            p.role = update.role;
            p.status = update.status;
            p.is_approved = update.is_approved;
            p.approved_at = update.approved_at;
            p.approved_by = update.approved_by;
            p.rejected_at = update.rejected_at;
            p.suspended_at = update.suspended_at;
            p.updated_at = Some(at);
        })
    }

    async fn update_full_name(&self, id: Uuid, full_name: String) -> AppResult<Profile> {
        self.modify(id, |p| {
            p.full_name = Some(full_name);
            p.updated_at = Some(Utc::now());
        })
    }
}

#[derive(Default)]
pub struct MemoryActivities {
    rows: Mutex<Vec<Activity>>,
}

impl MemoryActivities {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl ActivityRepository for MemoryActivities {
    async fn list(&self, only_active: bool) -> AppResult<Vec<Activity>> {
        let mut rows: Vec<Activity> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|a| !only_active || a.is_public())
            .cloned()
            .collect();
        rows.sort_by(canonical_order);
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Activity>> {
        Ok(self.rows.lock().unwrap().iter().find(|a| a.id == id).cloned())
    }

    async fn create(
        &self,
        draft: ActivityDraft,
        image_url: String,
        created_by: Uuid,
    ) -> AppResult<Activity> {
        let activity = Activity {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            content: draft.content,
            image_url: Some(image_url),
            status: draft.status,
            category: draft.category,
            tags: draft.tags,
            registration_link: draft.registration_link,
            order_index: draft.order_index,
            created_by: Some(created_by),
            created_at: Utc::now(),
            updated_by: None,
            updated_at: None,
        };
        self.rows.lock().unwrap().push(activity.clone());
        Ok(activity)
    }

    async fn update(
        &self,
        id: Uuid,
        draft: ActivityDraft,
        image_url: Option<String>,
        updated_by: Uuid,
    ) -> AppResult<Activity> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows.iter_mut().find(|a| a.id == id).ok_or(AppError::NotFound)?;
        row.title = draft.title;
        row.description = draft.description;
        row.content = draft.content;
        row.status = draft.status;
        row.category = draft.category;
        row.tags = draft.tags;
        row.registration_link = draft.registration_link;
        row.order_index = draft.order_index;
        if let Some(url) = image_url {
            row.image_url = Some(url);
        }
        row.updated_by = Some(updated_by);
        row.updated_at = Some(Utc::now());
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|a| a.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryTimeline {
    rows: Mutex<Vec<TimelineItem>>,
}

#[async_trait]
impl TimelineRepository for MemoryTimeline {
    async fn list(&self) -> AppResult<Vec<TimelineItem>> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(date_descending);
        Ok(rows)
    }

    async fn create(&self, fields: TimelineFields) -> AppResult<TimelineItem> {
        let item = TimelineItem {
            id: Uuid::new_v4(),
            title: fields.title,
            date: fields.date,
            description: fields.description,
            tags: fields.tags,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: Uuid, fields: TimelineFields) -> AppResult<TimelineItem> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows.iter_mut().find(|t| t.id == id).ok_or(AppError::NotFound)?;
        row.title = fields.title;
        row.date = fields.date;
        row.description = fields.description;
        row.tags = fields.tags;
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|t| t.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryContacts {
    rows: Mutex<Vec<ContactMessage>>,
}

#[async_trait]
impl ContactRepository for MemoryContacts {
    async fn list(&self, status: Option<ContactStatus>) -> AppResult<Vec<ContactMessage>> {
        let mut rows: Vec<ContactMessage> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|m| status.map_or(true, |s| m.status == s))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ContactMessage>> {
        Ok(self.rows.lock().unwrap().iter().find(|m| m.id == id).cloned())
    }

    async fn create(&self, draft: ContactDraft) -> AppResult<ContactMessage> {
        let message = ContactMessage {
            id: Uuid::new_v4(),
            name: draft.name,
            email: draft.email,
            message: draft.message,
            status: ContactStatus::Unread,
            notes: None,
            replied_by: None,
            replied_at: None,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(message.clone());
        Ok(message)
    }

    async fn update_status(&self, message: ContactMessage) -> AppResult<ContactMessage> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|m| m.id == message.id)
            .ok_or(AppError::NotFound)?;
        *row = message;
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|m| m.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

/// Unit of work over the in-memory tables
#[derive(Default)]
pub struct MemoryStore {
    pub profiles: Arc<MemoryProfiles>,
    pub activities: Arc<MemoryActivities>,
    pub timeline: Arc<MemoryTimeline>,
    pub contacts: Arc<MemoryContacts>,
}

impl UnitOfWork for MemoryStore {
    fn profiles(&self) -> Arc<dyn ProfileRepository> {
        self.profiles.clone()
    }

    fn activities(&self) -> Arc<dyn ActivityRepository> {
        self.activities.clone()
    }

    fn timeline(&self) -> Arc<dyn TimelineRepository> {
        self.timeline.clone()
    }

    fn contacts(&self) -> Arc<dyn ContactRepository> {
        self.contacts.clone()
    }
}

// =============================================================================
// Platform
// =============================================================================

struct Account {
    id: Uuid,
    password: String,
}

/// Identity store keyed by e-mail, with opaque `token-<id>` sessions.
#[derive(Default)]
pub struct FakeIdentity {
    accounts: Mutex<HashMap<String, Account>>,
    sessions: Mutex<HashMap<String, Uuid>>,
}

impl FakeIdentity {
    /// Register an identity directly and return its id
    pub fn add_account(&self, email: &str, password: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.accounts.lock().unwrap().insert(
            email.to_string(),
            Account {
                id,
                password: password.to_string(),
            },
        );
        id
    }

    /// Open a session for an identity without going through sign-in
    pub fn open_session(&self, id: Uuid) -> String {
        let token = format!("token-{}", id);
        self.sessions.lock().unwrap().insert(token.clone(), id);
        token
    }

    pub fn has_session(&self, token: &str) -> bool {
        self.sessions.lock().unwrap().contains_key(token)
    }

    fn session_for(&self, id: Uuid, email: &str) -> Session {
        Session {
            access_token: self.open_session(id),
            refresh_token: String::new(),
            token_type: "bearer".to_string(),
            expires_in: 3600,
            user: IdentityUser {
                id,
                email: Some(email.to_string()),
                email_confirmed_at: Some(Utc::now()),
            },
        }
    }
}

fn rejected(status: u16, message: &str) -> PlatformError {
    PlatformError::Api {
        status,
        message: message.to_string(),
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        _metadata: Value,
    ) -> PlatformResult<IdentityUser> {
        if self.accounts.lock().unwrap().contains_key(email) {
            return Err(rejected(422, "User already registered (user_already_exists)"));
        }
        let id = self.add_account(email, password);
        Ok(IdentityUser {
            id,
            email: Some(email.to_string()),
            email_confirmed_at: None,
        })
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> PlatformResult<Session> {
        let id = match self.accounts.lock().unwrap().get(email) {
            Some(account) if account.password == password => account.id,
            _ => return Err(rejected(400, "Invalid login credentials")),
        };
        Ok(self.session_for(id, email))
    }

    async fn send_otp(&self, _email: &str) -> PlatformResult<()> {
        Ok(())
    }

    async fn verify_otp(&self, email: &str, code: &str) -> PlatformResult<Session> {
        let id = self.accounts.lock().unwrap().get(email).map(|a| a.id);
        match id {
            Some(id) if code == OTP_CODE => Ok(self.session_for(id, email)),
            _ => Err(rejected(403, "Token has expired or is invalid")),
        }
    }

    async fn sign_out(&self, access_token: &str) -> PlatformResult<()> {
        self.sessions.lock().unwrap().remove(access_token);
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> PlatformResult<IdentityUser> {
        match self.sessions.lock().unwrap().get(access_token) {
            Some(id) => Ok(IdentityUser {
                id: *id,
                email: None,
                email_confirmed_at: None,
            }),
            None => Err(rejected(401, "invalid JWT")),
        }
    }

    async fn update_password(&self, access_token: &str, password: &str) -> PlatformResult<()> {
        let id = *self
            .sessions
            .lock()
            .unwrap()
            .get(access_token)
            .ok_or_else(|| rejected(401, "invalid JWT"))?;
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(account) = accounts.values_mut().find(|a| a.id == id) {
            account.password = password.to_string();
        }
        Ok(())
    }
}

/// Object storage that records every upload request it receives.
#[derive(Default)]
pub struct FakeStorage {
    uploads: Mutex<Vec<String>>,
}

impl FakeStorage {
    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn upload(
        &self,
        _access_token: &str,
        bucket: &str,
        name: &str,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> PlatformResult<String> {
        let path = format!("{}/{}", bucket, name);
        self.uploads.lock().unwrap().push(path.clone());
        Ok(path)
    }

    fn public_url(&self, bucket: &str, name: &str) -> PlatformResult<String> {
        Ok(format!(
            "https://platform.test/storage/v1/object/public/{}/{}",
            bucket, name
        ))
    }
}

// =============================================================================
// Harness
// =============================================================================

/// Everything a test needs: the fakes plus services wired over them.
pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub identity: Arc<FakeIdentity>,
    pub storage: Arc<FakeStorage>,
    pub services: Arc<Services>,
}

impl Harness {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        let identity = Arc::new(FakeIdentity::default());
        let storage = Arc::new(FakeStorage::default());
        let services = Arc::new(Services::from_parts(
            store.clone(),
            identity.clone(),
            storage.clone(),
            TEST_BUCKET.to_string(),
        ));

        Self {
            store,
            identity,
            storage,
            services,
        }
    }

    pub fn state(&self) -> AppState {
        AppState::new(self.services.clone())
    }

    /// Seed an identity plus profile row and return (id, access token)
    pub fn seed_profile(
        &self,
        email: &str,
        role: Role,
        status: ProfileStatus,
        is_approved: bool,
    ) -> (Uuid, String) {
        let id = self.identity.add_account(email, "password123");
        let now = Utc::now();
        self.store.profiles.insert(Profile {
            id,
            profile_id: 0,
            full_name: Some("Seeded Admin".to_string()),
            email: email.to_string(),
            role,
            status,
            is_approved,
            reason: None,
            created_at: now,
            updated_at: Some(now),
            approved_at: None,
            approved_by: None,
            rejected_at: None,
            suspended_at: None,
        });
        let token = self.identity.open_session(id);
        (id, token)
    }

    /// Seed an active super admin
    pub fn seed_super_admin(&self) -> (Uuid, String) {
        self.seed_profile(
            "head@kkmi.test",
            Role::SuperAdmin,
            ProfileStatus::Active,
            true,
        )
    }
}
