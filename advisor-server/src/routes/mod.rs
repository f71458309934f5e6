pub mod catalog;
pub mod chat;
pub mod checkout;
pub mod conversations;
pub mod goals;
pub mod health;
pub mod insights;
pub mod webhook;

use serde::Deserialize;

/// `?userId=` query shared by the per-user read and delete routes.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    #[serde(default)]
    pub user_id: String,
}

/// `{ "userId": ... }` body for actions that carry nothing else.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    #[serde(default)]
    pub user_id: String,
}
