//! Outbound record shape.
//!
//! Field names are case-sensitive and must match the columns of the target
//! table exactly.

use chrono::NaiveDate;
use serde::Serialize;

use crate::relay::submission::FormSubmission;

/// One row for the record store. Every column is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordPayload {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Phone Number")]
    pub phone_number: String,
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "Date of Entry")]
    pub date_of_entry: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Category Number")]
    pub category_number: String,
}

impl RecordPayload {
    /// Map a submission onto the table columns, stamping `date` as `YYYY-MM-DD`.
    pub fn new(submission: &FormSubmission, date: NaiveDate) -> Self {
        Self {
            name: submission.name.clone(),
            email: submission.email.clone(),
            phone_number: submission.phone.clone(),
            message: submission.message.clone(),
            date_of_entry: date.format("%Y-%m-%d").to_string(),
            country: submission.country.clone(),
            category_number: submission.category.clone(),
        }
    }

    /// Same as [`RecordPayload::new`] with today's UTC date.
    pub fn stamped_now(submission: &FormSubmission) -> Self {
        Self::new(submission, chrono::Utc::now().date_naive())
    }
}

/// Body of the create-record call: `{"fields": {...}}`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRecordRequest<'a> {
    pub fields: &'a RecordPayload,
}
