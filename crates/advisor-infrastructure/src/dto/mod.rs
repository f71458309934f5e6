//! Row DTOs for the hosted database tables.
//!
//! Rows arrive as untyped JSON. Each DTO is deserialized and then validated
//! into its domain model, so malformed rows are caught at the storage edge
//! instead of leaking into the services.

mod conversation;
mod goal;
mod profile;
mod subscription;

pub use conversation::{ConversationInsertDTO, ConversationRowDTO};
pub use goal::{GoalInsertDTO, GoalRowDTO, GoalUpdateDTO};
pub use profile::ProfileRowDTO;
pub use subscription::SubscriptionRowDTO;

use advisor_core::{AdvisorError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decodes and validates one row.
pub fn decode_row<D, T>(table: &str, row: Value) -> Result<T>
where
    D: DeserializeOwned,
    T: TryFrom<D, Error = AdvisorError>,
{
    let dto: D = serde_json::from_value(row).map_err(|err| {
        AdvisorError::serialization("JSON", format!("malformed '{table}' row: {err}"))
    })?;
    T::try_from(dto)
}

/// Decodes a list of rows, skipping the ones that fail validation.
pub fn decode_rows<D, T>(table: &str, rows: Vec<Value>) -> Vec<T>
where
    D: DeserializeOwned,
    T: TryFrom<D, Error = AdvisorError>,
{
    rows.into_iter()
        .filter_map(|row| match decode_row::<D, T>(table, row) {
            Ok(item) => Some(item),
            Err(err) => {
                tracing::warn!(table, error = %err, "Skipping malformed row");
                None
            }
        })
        .collect()
}

/// Decodes the first row, if any.
pub fn decode_first<D, T>(table: &str, rows: Vec<Value>) -> Result<Option<T>>
where
    D: DeserializeOwned,
    T: TryFrom<D, Error = AdvisorError>,
{
    rows.into_iter()
        .next()
        .map(|row| decode_row::<D, T>(table, row))
        .transpose()
}

pub(crate) fn require_non_blank(table: &str, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AdvisorError::serialization(
            "JSON",
            format!("'{table}' row has a blank {field}"),
        ));
    }
    Ok(())
}
