use crate::models::{Donation, DonationChanges};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

/// Persistence seam for donations. Handlers only talk to this trait.
#[async_trait]
pub trait DonationStore: Send + Sync {
    /// Every donation, newest `created_at` first.
    async fn list(&self) -> Result<Vec<Donation>, AppError>;

    async fn insert(&self, donation: &Donation) -> Result<(), AppError>;

    /// Returns `false` when no donation has `id`.
    async fn update(
        &self,
        id: ObjectId,
        changes: &DonationChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, AppError>;

    /// Returns `false` when no donation has `id`.
    async fn delete(&self, id: ObjectId) -> Result<bool, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}
