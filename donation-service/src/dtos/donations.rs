use crate::models::{Donation, DonationChanges};
use chrono::SecondsFormat;
use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /api/donations`. Any subset of the known fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateDonationRequest {
    pub name: Option<String>,
    pub presentation: Option<String>,
    pub form: Option<String>,
    pub laboratory: Option<String>,
    pub scanned_lot: Option<String>,
    pub scanned_exp: Option<String>,
    pub scanned_gtin: Option<String>,
}

impl From<CreateDonationRequest> for Donation {
    fn from(req: CreateDonationRequest) -> Self {
        Self {
            name: req.name,
            presentation: req.presentation,
            form: req.form,
            laboratory: req.laboratory,
            scanned_lot: req.scanned_lot,
            scanned_exp: req.scanned_exp,
            scanned_gtin: req.scanned_gtin,
            ..Donation::new()
        }
    }
}

/// Body of `PUT /api/donations/:id`.
///
/// An absent field keeps its stored value; an explicit `null` clears it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateDonationRequest {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub presentation: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub form: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub laboratory: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub scanned_lot: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub scanned_exp: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub scanned_gtin: Option<Option<String>>,
}

/// Only runs for keys present in the body, so `null` becomes `Some(None)`.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl From<UpdateDonationRequest> for DonationChanges {
    fn from(req: UpdateDonationRequest) -> Self {
        Self {
            name: req.name,
            presentation: req.presentation,
            form: req.form,
            laboratory: req.laboratory,
            scanned_lot: req.scanned_lot,
            scanned_exp: req.scanned_exp,
            scanned_gtin: req.scanned_gtin,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub laboratory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scanned_lot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scanned_exp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scanned_gtin: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Donation> for DonationResponse {
    fn from(donation: Donation) -> Self {
        Self {
            id: donation.id.to_hex(),
            name: donation.name,
            presentation: donation.presentation,
            form: donation.form,
            laboratory: donation.laboratory,
            scanned_lot: donation.scanned_lot,
            scanned_exp: donation.scanned_exp,
            scanned_gtin: donation.scanned_gtin,
            created_at: donation
                .created_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            updated_at: donation
                .updated_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
