// src/modules/backend/application/ports/outgoing/table_gateway.rs

use async_trait::async_trait;
use serde_json::Value;

use crate::modules::backend::application::ports::outgoing::auth_gateway::AccessToken;

//
// ──────────────────────────────────────────────────────────
// Query model
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq(String, Value),
    Neq(String, Value),
    In(String, Vec<Value>),
    NotIn(String, Vec<Value>),
}

impl Filter {
    pub fn eq(column: &str, value: impl Into<Value>) -> Self {
        Filter::Eq(column.to_string(), value.into())
    }

    pub fn neq(column: &str, value: impl Into<Value>) -> Self {
        Filter::Neq(column.to_string(), value.into())
    }

    pub fn is_in(column: &str, values: Vec<Value>) -> Self {
        Filter::In(column.to_string(), values)
    }

    pub fn not_in(column: &str, values: Vec<Value>) -> Self {
        Filter::NotIn(column.to_string(), values)
    }

    pub fn column(&self) -> &str {
        match self {
            Filter::Eq(c, _) | Filter::Neq(c, _) | Filter::In(c, _) | Filter::NotIn(c, _) => c,
        }
    }

    /// Evaluates the filter against a single JSON row.
    pub fn matches(&self, row: &Value) -> bool {
        let field = row.get(self.column()).unwrap_or(&Value::Null);
        match self {
            Filter::Eq(_, v) => field == v,
            Filter::Neq(_, v) => field != v,
            Filter::In(_, vs) => vs.contains(field),
            Filter::NotIn(_, vs) => !vs.contains(field),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub columns: String,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
}

impl Default for SelectQuery {
    fn default() -> Self {
        Self {
            columns: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }
}

impl SelectQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn columns(mut self, columns: &str) -> Self {
        self.columns = columns.to_string();
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_desc(mut self, column: &str) -> Self {
        self.order = Some(Order {
            column: column.to_string(),
            ascending: false,
        });
        self
    }

    pub fn order_asc(mut self, column: &str) -> Self {
        self.order = Some(Order {
            column: column.to_string(),
            ascending: true,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

/// Failure reported by any backend port.
///
/// `Api` mirrors the error body returned by the hosted backend
/// (`message`, `details`, `hint`, `code`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        details: Option<String>,
        hint: Option<String>,
        code: Option<String>,
    },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl BackendError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        BackendError::Api {
            status,
            message: message.into(),
            details: None,
            hint: None,
            code: None,
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            BackendError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Flattens message, details and hint into one line.
    pub fn describe(&self) -> String {
        match self {
            BackendError::Api {
                message,
                details,
                hint,
                ..
            } => {
                let mut out = format!("Database error: {message}");
                if let Some(details) = details.as_deref().filter(|d| !d.is_empty()) {
                    out.push_str(&format!(" (Details: {details})"));
                }
                if let Some(hint) = hint.as_deref().filter(|h| !h.is_empty()) {
                    out.push_str(&format!(" (Hint: {hint})"));
                }
                out
            }
            other => other.to_string(),
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Port
// ──────────────────────────────────────────────────────────
//

/// Table-style access to the hosted relational backend.
///
/// Rows travel as JSON objects; typed conversion happens in the services.
/// `auth` is the caller's access token; `None` means anonymous access.
#[async_trait]
pub trait TableGateway: Send + Sync {
    async fn select(
        &self,
        table: &str,
        query: SelectQuery,
        auth: Option<&AccessToken>,
    ) -> Result<Vec<Value>, BackendError>;

    async fn insert(
        &self,
        table: &str,
        rows: Vec<Value>,
        auth: Option<&AccessToken>,
    ) -> Result<Vec<Value>, BackendError>;

    /// Insert without reading the rows back, for callers that may write
    /// but not select (anonymous contact submissions).
    async fn insert_minimal(
        &self,
        table: &str,
        rows: Vec<Value>,
        auth: Option<&AccessToken>,
    ) -> Result<(), BackendError>;

    /// Insert-or-update keyed by `on_conflict` column(s).
    async fn upsert(
        &self,
        table: &str,
        rows: Vec<Value>,
        on_conflict: &str,
        auth: Option<&AccessToken>,
    ) -> Result<Vec<Value>, BackendError>;

    async fn update(
        &self,
        table: &str,
        filters: Vec<Filter>,
        patch: Value,
        auth: Option<&AccessToken>,
    ) -> Result<Vec<Value>, BackendError>;

    async fn delete(
        &self,
        table: &str,
        filters: Vec<Filter>,
        auth: Option<&AccessToken>,
    ) -> Result<Vec<Value>, BackendError>;
}
