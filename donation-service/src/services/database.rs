use crate::models::{Donation, DonationChanges};
use crate::services::DonationStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::{FindOptions, IndexOptions},
    Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for donation-service");

        // Backs the newest-first listing
        let created_at_index = IndexModel::builder()
            .keys(doc! { "createdAt": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at_desc".to_string())
                    .build(),
            )
            .build();

        self.donations()
            .create_index(created_at_index, None)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to create createdAt index on donations collection: {}",
                    e
                );
                AppError::from(e)
            })?;
        tracing::info!("Created index on donations.createdAt");

        Ok(())
    }

    pub fn donations(&self) -> Collection<Donation> {
        self.db.collection("donations")
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    /// Closes the connection pool once in-flight operations have finished.
    pub async fn shutdown(self) {
        tracing::info!("Closing MongoDB connections");
        self.client.shutdown().await;
    }
}

#[async_trait]
impl DonationStore for MongoDb {
    async fn list(&self) -> Result<Vec<Donation>, AppError> {
        let find_options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .build();

        let cursor = self
            .donations()
            .find(doc! {}, find_options)
            .await
            .map_err(AppError::from)?;

        cursor.try_collect().await.map_err(AppError::from)
    }

    async fn insert(&self, donation: &Donation) -> Result<(), AppError> {
        self.donations()
            .insert_one(donation, None)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn update(
        &self,
        id: ObjectId,
        changes: &DonationChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let result = self
            .donations()
            .update_one(
                doc! { "_id": id },
                changes.to_update_document(updated_at),
                None,
            )
            .await
            .map_err(AppError::from)?;

        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let result = self
            .donations()
            .delete_one(doc! { "_id": id }, None)
            .await
            .map_err(AppError::from)?;

        Ok(result.deleted_count > 0)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
