//! REST client for the hosted database.
//!
//! Talks to the PostgREST endpoint (`{base}/rest/v1`) exposed by the hosted
//! database. Two construction paths exist: a privileged service-role client
//! that bypasses row-level security, and an unprivileged anon client. Both
//! are built explicitly at startup and injected into repositories.

use advisor_core::{AdvisorError, Result};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Which key the client authenticates with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRole {
    /// Service-role key; full access, server-side only
    ServiceRole,
    /// Anon key; subject to row-level security
    Anon,
}

/// Client for the hosted database REST API.
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    rest_url: String,
    api_key: String,
    role: AccessRole,
}

impl SupabaseClient {
    /// Creates a privileged client using the service-role key.
    pub fn service_role(base_url: &str, service_role_key: impl Into<String>) -> Self {
        Self::new(base_url, service_role_key.into(), AccessRole::ServiceRole)
    }

    /// Creates an unprivileged client using the anon key.
    pub fn anon(base_url: &str, anon_key: impl Into<String>) -> Self {
        Self::new(base_url, anon_key.into(), AccessRole::Anon)
    }

    fn new(base_url: &str, api_key: String, role: AccessRole) -> Self {
        Self {
            http: Client::new(),
            rest_url: format!("{}/rest/v1", base_url.trim_end_matches('/')),
            api_key,
            role,
        }
    }

    pub fn role(&self) -> AccessRole {
        self.role
    }

    /// Starts a request against a table.
    pub fn from(&self, table: &str) -> TableQuery<'_> {
        TableQuery {
            client: self,
            table: table.to_string(),
            params: Vec::new(),
            prefer: Vec::new(),
        }
    }

    /// Calls a database function and decodes its JSON result.
    pub async fn rpc<A, T>(&self, function: &str, args: &A) -> Result<T>
    where
        A: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/rpc/{}", self.rest_url, function);
        let response = self
            .authorized(self.http.post(url))
            .json(args)
            .send()
            .await
            .map_err(|err| request_failed(function, err))?;
        let body = read_success(function, response).await?;
        serde_json::from_value(body).map_err(|err| {
            AdvisorError::serialization("JSON", format!("rpc '{function}' returned {err}"))
        })
    }

    /// Checks the REST endpoint answers with this client's key.
    pub async fn ping(&self) -> Result<()> {
        let response = self
            .authorized(self.http.get(format!("{}/", self.rest_url)))
            .send()
            .await
            .map_err(|err| request_failed("ping", err))?;
        read_success("ping", response).await.map(|_| ())
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }
}

/// A filtered request against one table.
///
/// Filters use PostgREST operator syntax (`column=eq.value`).
pub struct TableQuery<'a> {
    client: &'a SupabaseClient,
    table: String,
    params: Vec<(String, String)>,
    prefer: Vec<&'static str>,
}

impl TableQuery<'_> {
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.params
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    pub fn order_desc(mut self, column: &str) -> Self {
        self.params
            .push(("order".to_string(), format!("{column}.desc")));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.params.push(("limit".to_string(), limit.to_string()));
        self
    }

    /// On insert, skip rows that collide with `column`'s unique constraint.
    pub fn ignore_duplicates_on(mut self, column: &str) -> Self {
        self.params
            .push(("on_conflict".to_string(), column.to_string()));
        self.prefer.push("resolution=ignore-duplicates");
        self
    }

    /// Fetches matching rows as raw JSON values for row-level validation.
    pub async fn fetch(self) -> Result<Vec<Value>> {
        let body = self.send(Method::GET, None::<&()>).await?;
        into_rows(&self.table, body)
    }

    /// Inserts `body` and returns the stored rows.
    pub async fn insert<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Vec<Value>> {
        self.prefer.push("return=representation");
        let rows = self.send(Method::POST, Some(body)).await?;
        into_rows(&self.table, rows)
    }

    /// Updates matching rows with `body` and returns them.
    pub async fn update<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Vec<Value>> {
        self.prefer.push("return=representation");
        let rows = self.send(Method::PATCH, Some(body)).await?;
        into_rows(&self.table, rows)
    }

    /// Deletes matching rows.
    pub async fn delete(self) -> Result<()> {
        self.send(Method::DELETE, None::<&()>).await.map(|_| ())
    }

    async fn send<B: Serialize + ?Sized>(&self, method: Method, body: Option<&B>) -> Result<Value> {
        let url = format!("{}/{}", self.client.rest_url, self.table);
        let mut builder = self
            .client
            .authorized(self.client.http.request(method, url))
            .query(&self.params);
        if !self.prefer.is_empty() {
            builder = builder.header("Prefer", self.prefer.join(","));
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = builder
            .send()
            .await
            .map_err(|err| request_failed(&self.table, err))?;
        read_success(&self.table, response).await
    }
}

fn request_failed(target: &str, err: reqwest::Error) -> AdvisorError {
    AdvisorError::data_access(format!("request to '{target}' failed: {err}"))
}

async fn read_success(target: &str, response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|err| request_failed(target, err))?;

    if !status.is_success() {
        return Err(AdvisorError::data_access(format!(
            "'{target}' responded with {status}: {text}"
        )));
    }
    if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|err| {
        AdvisorError::serialization("JSON", format!("'{target}' returned invalid JSON: {err}"))
    })
}

fn into_rows(table: &str, body: Value) -> Result<Vec<Value>> {
    match body {
        Value::Array(rows) => Ok(rows),
        Value::Null => Ok(Vec::new()),
        other => Err(AdvisorError::serialization(
            "JSON",
            format!("'{table}' returned a non-array body: {other}"),
        )),
    }
}
