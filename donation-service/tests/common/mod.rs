use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use donation_service::models::{Donation, DonationChanges};
use donation_service::services::DonationStore;
use donation_service::{build_router, AppState};
use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use service_core::error::AppError;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Store double that keeps donations in process memory.
#[derive(Default)]
pub struct InMemoryStore {
    donations: Mutex<Vec<Donation>>,
}

impl InMemoryStore {
    pub fn seed(&self, donation: Donation) {
        self.donations.lock().unwrap().push(donation);
    }

    pub fn snapshot(&self) -> Vec<Donation> {
        self.donations.lock().unwrap().clone()
    }
}

#[async_trait]
impl DonationStore for InMemoryStore {
    async fn list(&self) -> Result<Vec<Donation>, AppError> {
        let mut donations = self.snapshot();
        donations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(donations)
    }

    async fn insert(&self, donation: &Donation) -> Result<(), AppError> {
        self.seed(donation.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: ObjectId,
        changes: &DonationChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let mut donations = self.donations.lock().unwrap();
        match donations.iter_mut().find(|d| d.id == id) {
            Some(donation) => {
                donation.apply(changes, updated_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let mut donations = self.donations.lock().unwrap();
        let before = donations.len();
        donations.retain(|d| d.id != id);
        Ok(donations.len() < before)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Store double whose every call fails like an unreachable database.
pub struct FailingStore;

fn unreachable_db() -> AppError {
    AppError::DatabaseError(anyhow::anyhow!("server selection timeout"))
}

#[async_trait]
impl DonationStore for FailingStore {
    async fn list(&self) -> Result<Vec<Donation>, AppError> {
        Err(unreachable_db())
    }

    async fn insert(&self, _donation: &Donation) -> Result<(), AppError> {
        Err(unreachable_db())
    }

    async fn update(
        &self,
        _id: ObjectId,
        _changes: &DonationChanges,
        _updated_at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        Err(unreachable_db())
    }

    async fn delete(&self, _id: ObjectId) -> Result<bool, AppError> {
        Err(unreachable_db())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Err(unreachable_db())
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::default());
        let router = build_router(AppState {
            store: store.clone(),
        });
        Self { router, store }
    }

    pub fn with_store(store: Arc<dyn DonationStore>) -> Router {
        build_router(AppState { store })
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        send(&self.router, method, uri, body).await
    }
}

pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}
