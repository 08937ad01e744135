//! Dashboard overview statistics.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::DASHBOARD_RECENT_LIMIT;
use crate::errors::AppResult;
use crate::infra::UnitOfWork;
use domain::{Activity, ActivityStatus, ProfileStatus, Role, TimelineItem};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_activities: usize,
    pub active_activities: usize,
    pub timeline_items: usize,
    pub pending_admins: usize,
    pub total_admins: usize,
    pub active_admins: usize,
    pub super_admins: usize,
    /// Unread contact messages
    pub unread_messages: usize,
    pub recent_activities: Vec<Activity>,
    pub recent_timeline: Vec<TimelineItem>,
}

#[async_trait]
pub trait DashboardService: Send + Sync {
    async fn stats(&self) -> AppResult<DashboardStats>;
}

pub struct DashboardReporter<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> DashboardReporter<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> DashboardService for DashboardReporter<U> {
    async fn stats(&self) -> AppResult<DashboardStats> {
        let activities = self.uow.activities().list(false).await?;
        let timeline = self.uow.timeline().list().await?;
        let profiles = self.uow.profiles().list(None, None).await?;
        let messages = self.uow.contacts().list(None).await?;

        let admins = || profiles.iter().filter(|p| p.role.is_privileged());

        let mut recent_activities = activities.clone();
        recent_activities.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent_activities.truncate(DASHBOARD_RECENT_LIMIT);

        Ok(DashboardStats {
            total_activities: activities.len(),
            active_activities: activities
                .iter()
                .filter(|a| a.status == ActivityStatus::Active)
                .count(),
            timeline_items: timeline.len(),
            pending_admins: profiles.iter().filter(|p| p.is_pending()).count(),
            total_admins: admins().count(),
            active_admins: admins()
                .filter(|p| p.status == ProfileStatus::Active && p.is_approved)
                .count(),
            super_admins: profiles
                .iter()
                .filter(|p| p.role == Role::SuperAdmin)
                .count(),
            unread_messages: messages.iter().filter(|m| m.needs_attention()).count(),
            recent_activities,
            recent_timeline: timeline.into_iter().take(DASHBOARD_RECENT_LIMIT).collect(),
        })
    }
}
