use chrono::{DateTime, SubsecRound, Utc};
use mongodb::bson::{doc, oid::ObjectId, Bson, DateTime as BsonDateTime, Document};
use serde::{Deserialize, Serialize};

/// A recorded medical donation, as stored in the `donations` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    #[serde(rename = "_id")]
    pub id: ObjectId,
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
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Donation {
    /// An empty record with a fresh id and `created_at == updated_at == now`.
    pub fn new() -> Self {
        let now = now();
        Self {
            id: ObjectId::new(),
            name: None,
            presentation: None,
            form: None,
            laboratory: None,
            scanned_lot: None,
            scanned_exp: None,
            scanned_gtin: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites every field present in `changes` and stamps `updated_at`.
    pub fn apply(&mut self, changes: &DonationChanges, updated_at: DateTime<Utc>) {
        let targets = [
            (&mut self.name, &changes.name),
            (&mut self.presentation, &changes.presentation),
            (&mut self.form, &changes.form),
            (&mut self.laboratory, &changes.laboratory),
            (&mut self.scanned_lot, &changes.scanned_lot),
            (&mut self.scanned_exp, &changes.scanned_exp),
            (&mut self.scanned_gtin, &changes.scanned_gtin),
        ];
        for (field, change) in targets {
            if let Some(value) = change {
                *field = value.clone();
            }
        }
        self.updated_at = updated_at;
    }
}

impl Default for Donation {
    fn default() -> Self {
        Self::new()
    }
}

/// Field replacements for an existing donation.
///
/// Outer `None` keeps the stored value, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DonationChanges {
    pub name: Option<Option<String>>,
    pub presentation: Option<Option<String>>,
    pub form: Option<Option<String>>,
    pub laboratory: Option<Option<String>>,
    pub scanned_lot: Option<Option<String>>,
    pub scanned_exp: Option<Option<String>>,
    pub scanned_gtin: Option<Option<String>>,
}

impl DonationChanges {
    /// Update document (`$set`, plus `$unset` for cleared fields) for this change set.
    pub fn to_update_document(&self, updated_at: DateTime<Utc>) -> Document {
        let mut set = doc! { "updatedAt": BsonDateTime::from_chrono(updated_at) };
        let mut unset = Document::new();

        let fields = [
            ("name", &self.name),
            ("presentation", &self.presentation),
            ("form", &self.form),
            ("laboratory", &self.laboratory),
            ("scannedLot", &self.scanned_lot),
            ("scannedExp", &self.scanned_exp),
            ("scannedGtin", &self.scanned_gtin),
        ];
        for (key, change) in fields {
            match change {
                Some(Some(value)) => {
                    set.insert(key, Bson::String(value.clone()));
                }
                Some(None) => {
                    unset.insert(key, "");
                }
                None => {}
            }
        }

        let mut update = doc! { "$set": set };
        // MongoDB rejects an empty `$unset`
        if !unset.is_empty() {
            update.insert("$unset", unset);
        }
        update
    }
}

/// Current time at the millisecond precision BSON datetimes keep.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
