//! Health record storage
//!
//! `DataGateway` is the narrow interface handlers use. `GraphQlGateway`
//! implements it with GraphQL-over-HTTP against the data service.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::error::{GatewayError, GatewayResult};

const INSERT_RECORD: &str = r#"mutation InsertRecord($id: String!, $email: String!, $date: String!, $time: String!, $parameter: String!, $value: String!) {
  insert_users(objects: [{ID: $id, Email: $email, Date: $date, Time: $time}]) {
    affected_rows
  }
  insert_data(objects: [{ID: $id, Parameter: $parameter, Value: $value}]) {
    affected_rows
  }
}"#;

const QUERY_RECORDS: &str = r#"query RecordsByEmail($email: String!) {
  users(where: {Email: {_eq: $email}}, order_by: {Time: desc}) {
    Time
    Email
    data {
      Parameter
      Value
    }
  }
}"#;

/// Header carrying the data service admin secret
const ADMIN_SECRET_HEADER: &str = "x-hasura-admin-secret";

/// One measurement to store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    pub id: String,
    pub email: String,
    pub parameter: String,
    pub value: String,
    /// UTC calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Request timestamp as sent by the platform
    pub time: String,
}

impl HealthRecord {
    /// Create a record with a fresh id
    pub fn new(
        email: impl Into<String>,
        parameter: impl Into<String>,
        value: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.into(),
            parameter: parameter.into(),
            value: value.into(),
            date: date.into(),
            time: time.into(),
        }
    }
}

/// One stored measurement, as read back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordEntry {
    pub time: String,
    pub parameter: String,
    pub value: String,
}

/// Record storage used by the intent handlers
#[async_trait]
pub trait DataGateway: Send + Sync {
    /// Store one record
    async fn insert_record(&self, record: &HealthRecord) -> GatewayResult<()>;

    /// All records for `email`, newest first
    async fn query_records(&self, email: &str) -> GatewayResult<Vec<RecordEntry>>;
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorEntry {
    message: String,
}

#[derive(Debug, Deserialize)]
struct UserRow {
    #[serde(rename = "Time", default)]
    time: Value,
    #[serde(default)]
    data: Vec<DataRow>,
}

#[derive(Debug, Deserialize)]
struct DataRow {
    #[serde(rename = "Parameter", default)]
    parameter: Value,
    #[serde(rename = "Value", default)]
    value: Value,
}

/// Render a scalar JSON value without quotes
fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// GraphQL-over-HTTP data gateway
#[derive(Debug, Clone)]
pub struct GraphQlGateway {
    client: Client,
    endpoint: String,
    admin_secret: Option<String>,
}

impl GraphQlGateway {
    /// Create a gateway for the given GraphQL endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            admin_secret: None,
        }
    }

    /// Send the admin secret with every request
    pub fn with_admin_secret(mut self, secret: impl Into<String>) -> Self {
        self.admin_secret = Some(secret.into());
        self
    }

    /// Execute one GraphQL document and return its `data`
    async fn execute(&self, query: &str, variables: Value) -> GatewayResult<Value> {
        let body = json!({ "query": query, "variables": variables });
        tracing::debug!("[DataGateway] Request: {}", body);

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(secret) = &self.admin_secret {
            request = request.header(ADMIN_SECRET_HEADER, secret);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        tracing::debug!("[DataGateway] Response ({}): {}", status, text);

        if !status.is_success() {
            tracing::error!("[DataGateway] HTTP error: {} - {}", status, text);
            return Err(GatewayError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: GraphQlResponse = serde_json::from_str(&text)?;
        if !parsed.errors.is_empty() {
            tracing::error!("[DataGateway] GraphQL errors: {:?}", parsed.errors);
            return Err(GatewayError::graphql(
                parsed.errors.iter().map(|e| e.message.as_str()),
            ));
        }

        parsed
            .data
            .ok_or_else(|| GatewayError::GraphQl("response has no data".to_string()))
    }
}

#[async_trait]
impl DataGateway for GraphQlGateway {
    async fn insert_record(&self, record: &HealthRecord) -> GatewayResult<()> {
        tracing::info!(
            "[DataGateway] Inserting record {} ({})",
            record.id,
            record.parameter
        );

        let variables = json!({
            "id": record.id,
            "email": record.email,
            "date": record.date,
            "time": record.time,
            "parameter": record.parameter,
            "value": record.value,
        });

        self.execute(INSERT_RECORD, variables).await?;
        Ok(())
    }

    async fn query_records(&self, email: &str) -> GatewayResult<Vec<RecordEntry>> {
        tracing::info!("[DataGateway] Querying records");

        let data = self
            .execute(QUERY_RECORDS, json!({ "email": email }))
            .await?;

        let rows: Vec<UserRow> = match data.get("users") {
            Some(users) => serde_json::from_value(users.clone())?,
            None => Vec::new(),
        };

        let entries = rows
            .into_iter()
            .flat_map(|row| {
                let time = scalar_to_string(&row.time);
                row.data.into_iter().map(move |d| RecordEntry {
                    time: time.clone(),
                    parameter: scalar_to_string(&d.parameter),
                    value: scalar_to_string(&d.value),
                })
            })
            .collect::<Vec<_>>();

        tracing::info!("[DataGateway] Found {} records", entries.len());
        Ok(entries)
    }
}
