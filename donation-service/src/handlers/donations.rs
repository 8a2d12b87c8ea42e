use crate::dtos::{CreateDonationRequest, DonationResponse, MessageResponse, UpdateDonationRequest};
use crate::models::{self, Donation, DonationChanges};
use crate::startup::AppState;
use crate::utils::JsonBody;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

/// A path id that is not an ObjectId is a failed storage cast, not a missing record.
fn parse_donation_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|e| {
        tracing::error!(donation_id = %id, error = %e, "Malformed donation id");
        AppError::InternalError(anyhow::anyhow!("Invalid donation id '{}': {}", id, e))
    })
}

pub async fn list_donations(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let donations = state.store.list().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list donations");
        e
    })?;

    let donations: Vec<DonationResponse> =
        donations.into_iter().map(DonationResponse::from).collect();

    Ok(Json(donations))
}

pub async fn create_donation(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateDonationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let donation = Donation::from(req);

    state.store.insert(&donation).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to save donation");
        e
    })?;

    tracing::info!(donation_id = %donation.id, "Donation saved");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Donation saved successfully")),
    ))
}

pub async fn update_donation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateDonationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let oid = parse_donation_id(&id)?;
    let changes = DonationChanges::from(req);

    let updated = state
        .store
        .update(oid, &changes, models::donation::now())
        .await
        .map_err(|e| {
            tracing::error!(donation_id = %id, error = %e, "Failed to update donation");
            e
        })?;

    if !updated {
        tracing::info!(donation_id = %id, "Donation not found");
        return Err(AppError::NotFound(anyhow::anyhow!("Donation not found")));
    }

    tracing::info!(donation_id = %id, "Donation updated");

    Ok(Json(MessageResponse::new("Donation updated successfully")))
}

pub async fn delete_donation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let oid = parse_donation_id(&id)?;

    let deleted = state.store.delete(oid).await.map_err(|e| {
        tracing::error!(donation_id = %id, error = %e, "Failed to delete donation");
        e
    })?;

    if !deleted {
        tracing::info!(donation_id = %id, "Donation not found");
        return Err(AppError::NotFound(anyhow::anyhow!("Donation not found")));
    }

    tracing::info!(donation_id = %id, "Donation deleted");

    Ok(Json(MessageResponse::new("Donation deleted successfully")))
}
