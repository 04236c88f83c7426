//! In-process stand-in for the hosted backend.
//!
//! Implements all three backend ports over JSON rows held in memory, with
//! the few database behaviours the services rely on: auto ids, column
//! defaults, NOT NULL and unique-key violations with Postgres error codes.
//! Every port method can be made to fail with `set_offline`.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Map, Value};

use crate::modules::backend::application::ports::outgoing::{
    AccessToken, AuthGateway, AuthSession, AuthUser, BackendError, Filter, ObjectStorage,
    SelectQuery, StoredObject, TableGateway,
};

pub const TEST_PASSWORD: &str = "correct-horse";
pub const TEST_STORAGE_BASE: &str = "https://test.supabase.co";

#[derive(Default)]
struct State {
    tables: HashMap<String, Vec<Value>>,
    next_id: i64,
    sessions: HashSet<String>,
    session_seq: u64,
    uploaded: Vec<String>,
    removed: Vec<String>,
    failing_tables: HashSet<String>,
}

#[derive(Default)]
pub struct InMemoryBackend {
    state: Mutex<State>,
    offline: AtomicBool,
    fail_uploads: AtomicBool,
    write_calls: AtomicUsize,
    auth_calls: AtomicUsize,
}

fn not_null_columns(table: &str) -> &'static [&'static str] {
    match table {
        "projects" => &["name", "description"],
        "testimonials" => &["author", "message"],
        "social_links" => &["platform"],
        _ => &[],
    }
}

fn key_column(table: &str) -> &'static str {
    match table {
        "social_links" => "platform",
        _ => "id",
    }
}

fn column_defaults(table: &str) -> Vec<(&'static str, Value)> {
    match table {
        "social_links" => vec![("is_visible", json!(true))],
        "contact_messages" => vec![
            ("is_read", json!(false)),
            ("created_at", json!(Utc::now().to_rfc3339())),
        ],
        _ => Vec::new(),
    }
}

fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        _ => a.to_string().cmp(&b.to_string()),
    }
}

fn not_null_violation(table: &str, column: &str) -> BackendError {
    BackendError::Api {
        status: 400,
        message: format!(
            "null value in column \"{column}\" of relation \"{table}\" violates not-null constraint"
        ),
        details: Some("Failing row contains (...).".to_string()),
        hint: None,
        code: Some("23502".to_string()),
    }
}

fn unique_violation(table: &str, column: &str, value: &Value) -> BackendError {
    BackendError::Api {
        status: 409,
        message: format!("duplicate key value violates unique constraint \"{table}_pkey\""),
        details: Some(format!("Key ({column})=({value}) already exists.")),
        hint: None,
        code: Some("23505".to_string()),
    }
}

fn check_not_null(table: &str, row: &Value) -> Result<(), BackendError> {
    for column in not_null_columns(table) {
        if row.get(*column).map_or(true, Value::is_null) {
            return Err(not_null_violation(table, column));
        }
    }
    Ok(())
}

fn merge(target: &mut Value, patch: &Value) {
    if let (Value::Object(target), Value::Object(patch)) = (target, patch) {
        for (k, v) in patch {
            target.insert(k.clone(), v.clone());
        }
    }
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, AtomicOrdering::SeqCst);
    }

    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, AtomicOrdering::SeqCst);
    }

    /// Makes every operation on `table` fail with a backend error.
    pub fn fail_table(&self, table: &str, fail: bool) {
        let mut state = self.state.lock().unwrap();
        if fail {
            state.failing_tables.insert(table.to_string());
        } else {
            state.failing_tables.remove(table);
        }
    }

    /// Replaces the table contents; bypasses constraints and call counters.
    pub fn seed(&self, table: &str, rows: Vec<Value>) {
        let mut state = self.state.lock().unwrap();
        let max_id = rows
            .iter()
            .filter_map(|r| r.get("id").and_then(Value::as_i64))
            .max()
            .unwrap_or(0);
        state.next_id = state.next_id.max(max_id);
        state.tables.insert(table.to_string(), rows);
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .tables
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    pub fn write_calls(&self) -> usize {
        self.write_calls.load(AtomicOrdering::SeqCst)
    }

    pub fn auth_calls(&self) -> usize {
        self.auth_calls.load(AtomicOrdering::SeqCst)
    }

    pub fn uploaded_paths(&self) -> Vec<String> {
        self.state.lock().unwrap().uploaded.clone()
    }

    pub fn removed_paths(&self) -> Vec<String> {
        self.state.lock().unwrap().removed.clone()
    }

    fn ensure_online(&self) -> Result<(), BackendError> {
        if self.offline.load(AtomicOrdering::SeqCst) {
            Err(BackendError::Network(
                "error sending request: connection refused".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    fn ensure_table_ok(state: &State, table: &str) -> Result<(), BackendError> {
        if state.failing_tables.contains(table) {
            return Err(BackendError::Api {
                status: 500,
                message: format!("simulated failure on {table}"),
                details: None,
                hint: None,
                code: Some("XX000".to_string()),
            });
        }
        Ok(())
    }

    fn begin_write(&self, table: &str) -> Result<std::sync::MutexGuard<'_, State>, BackendError> {
        self.ensure_online()?;
        self.write_calls.fetch_add(1, AtomicOrdering::SeqCst);
        let state = self.state.lock().unwrap();
        Self::ensure_table_ok(&state, table)?;
        Ok(state)
    }

    fn prepare_new_row(state: &mut State, table: &str, mut row: Value) -> Result<Value, BackendError> {
        let Value::Object(map) = &mut row else {
            return Err(BackendError::api(400, "row must be an object"));
        };
        for (column, default) in column_defaults(table) {
            map.entry(column.to_string()).or_insert(default);
        }
        if key_column(table) == "id" && map.get("id").map_or(true, Value::is_null) {
            state.next_id += 1;
            map.insert("id".to_string(), json!(state.next_id));
        }
        check_not_null(table, &row)?;
        Ok(row)
    }

    fn insert_rows(&self, table: &str, rows: Vec<Value>) -> Result<Vec<Value>, BackendError> {
        let mut state = self.begin_write(table)?;
        let key = key_column(table);

        let mut prepared = Vec::with_capacity(rows.len());
        for row in rows {
            let row = Self::prepare_new_row(&mut state, table, row)?;
            let existing = state.tables.get(table).map(Vec::as_slice).unwrap_or_default();
            let key_value = row.get(key).cloned().unwrap_or(Value::Null);
            if existing
                .iter()
                .chain(prepared.iter())
                .any(|r: &Value| r.get(key) == Some(&key_value))
            {
                return Err(unique_violation(table, key, &key_value));
            }
            prepared.push(row);
        }

        state
            .tables
            .entry(table.to_string())
            .or_default()
            .extend(prepared.iter().cloned());
        Ok(prepared)
    }
}

//
// ──────────────────────────────────────────────────────────
// Tables
// ──────────────────────────────────────────────────────────
//

#[async_trait]
impl TableGateway for InMemoryBackend {
    async fn select(
        &self,
        table: &str,
        query: SelectQuery,
        _auth: Option<&AccessToken>,
    ) -> Result<Vec<Value>, BackendError> {
        self.ensure_online()?;
        let state = self.state.lock().unwrap();
        Self::ensure_table_ok(&state, table)?;

        let mut rows: Vec<Value> = state
            .tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.filters.iter().all(|f| f.matches(row)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let null = Value::Null;
                let ord = compare(
                    a.get(&order.column).unwrap_or(&null),
                    b.get(&order.column).unwrap_or(&null),
                );
                if order.ascending {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        if query.columns != "*" {
            let wanted: Vec<&str> = query.columns.split(',').map(str::trim).collect();
            rows = rows
                .into_iter()
                .map(|row| {
                    let mut projected = Map::new();
                    for column in &wanted {
                        if let Some(v) = row.get(*column) {
                            projected.insert((*column).to_string(), v.clone());
                        }
                    }
                    Value::Object(projected)
                })
                .collect();
        }
        Ok(rows)
    }

    async fn insert(
        &self,
        table: &str,
        rows: Vec<Value>,
        _auth: Option<&AccessToken>,
    ) -> Result<Vec<Value>, BackendError> {
        self.insert_rows(table, rows)
    }

    async fn insert_minimal(
        &self,
        table: &str,
        rows: Vec<Value>,
        _auth: Option<&AccessToken>,
    ) -> Result<(), BackendError> {
        self.insert_rows(table, rows).map(|_| ())
    }

    async fn upsert(
        &self,
        table: &str,
        rows: Vec<Value>,
        on_conflict: &str,
        _auth: Option<&AccessToken>,
    ) -> Result<Vec<Value>, BackendError> {
        let mut state = self.begin_write(table)?;
        let mut saved = Vec::with_capacity(rows.len());

        for row in rows {
            let key_value = row.get(on_conflict).cloned().unwrap_or(Value::Null);
            let existing_index = state
                .tables
                .get(table)
                .and_then(|rows| rows.iter().position(|r| r.get(on_conflict) == Some(&key_value)));

            match existing_index {
                Some(index) => {
                    let mut merged = state.tables[table][index].clone();
                    merge(&mut merged, &row);
                    check_not_null(table, &merged)?;
                    if let Some(rows) = state.tables.get_mut(table) {
                        rows[index] = merged.clone();
                    }
                    saved.push(merged);
                }
                None => {
                    let row = Self::prepare_new_row(&mut state, table, row)?;
                    state
                        .tables
                        .entry(table.to_string())
                        .or_default()
                        .push(row.clone());
                    saved.push(row);
                }
            }
        }
        Ok(saved)
    }

    async fn update(
        &self,
        table: &str,
        filters: Vec<Filter>,
        patch: Value,
        _auth: Option<&AccessToken>,
    ) -> Result<Vec<Value>, BackendError> {
        let mut state = self.begin_write(table)?;
        let Some(rows) = state.tables.get_mut(table) else {
            return Ok(Vec::new());
        };

        let mut updated = Vec::new();
        for row in rows.iter_mut() {
            if filters.iter().all(|f| f.matches(row)) {
                let mut candidate = row.clone();
                merge(&mut candidate, &patch);
                check_not_null(table, &candidate)?;
                *row = candidate.clone();
                updated.push(candidate);
            }
        }
        Ok(updated)
    }

    async fn delete(
        &self,
        table: &str,
        filters: Vec<Filter>,
        _auth: Option<&AccessToken>,
    ) -> Result<Vec<Value>, BackendError> {
        let mut state = self.begin_write(table)?;
        let Some(rows) = state.tables.get_mut(table) else {
            return Ok(Vec::new());
        };

        let (removed, kept): (Vec<Value>, Vec<Value>) = rows
            .drain(..)
            .partition(|row| filters.iter().all(|f| f.matches(row)));
        *rows = kept;
        Ok(removed)
    }
}

//
// ──────────────────────────────────────────────────────────
// Auth
// ──────────────────────────────────────────────────────────
//

#[async_trait]
impl AuthGateway for InMemoryBackend {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, BackendError> {
        self.auth_calls.fetch_add(1, AtomicOrdering::SeqCst);
        self.ensure_online()?;
        if password != TEST_PASSWORD {
            return Err(BackendError::Api {
                status: 400,
                message: "Invalid login credentials".to_string(),
                details: None,
                hint: None,
                code: Some("invalid_credentials".to_string()),
            });
        }

        let mut state = self.state.lock().unwrap();
        state.session_seq += 1;
        let token = format!("session-{}", state.session_seq);
        state.sessions.insert(token.clone());

        Ok(AuthSession {
            access_token: AccessToken::new(token),
            refresh_token: Some("refresh".to_string()),
            expires_in: Some(3600),
            user: AuthUser {
                id: "admin-user".to_string(),
                email: Some(email.to_string()),
            },
        })
    }

    async fn get_user(&self, token: &AccessToken) -> Result<AuthUser, BackendError> {
        self.auth_calls.fetch_add(1, AtomicOrdering::SeqCst);
        self.ensure_online()?;
        if self.state.lock().unwrap().sessions.contains(token.as_str()) {
            Ok(AuthUser {
                id: "admin-user".to_string(),
                email: None,
            })
        } else {
            Err(BackendError::api(401, "invalid JWT"))
        }
    }

    async fn sign_out(&self, token: &AccessToken) -> Result<(), BackendError> {
        self.auth_calls.fetch_add(1, AtomicOrdering::SeqCst);
        self.ensure_online()?;
        self.state.lock().unwrap().sessions.remove(token.as_str());
        Ok(())
    }
}

//
// ──────────────────────────────────────────────────────────
// Storage
// ──────────────────────────────────────────────────────────
//

#[async_trait]
impl ObjectStorage for InMemoryBackend {
    async fn upload(
        &self,
        _bucket: &str,
        path: &str,
        _bytes: Vec<u8>,
        _content_type: &str,
        _auth: Option<&AccessToken>,
    ) -> Result<(), BackendError> {
        self.ensure_online()?;
        if self.fail_uploads.load(AtomicOrdering::SeqCst) {
            return Err(BackendError::api(400, "Bucket not found"));
        }
        self.state.lock().unwrap().uploaded.push(path.to_string());
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{TEST_STORAGE_BASE}/storage/v1/object/public/{bucket}/{path}")
    }

    async fn remove(
        &self,
        _bucket: &str,
        paths: Vec<String>,
        _auth: Option<&AccessToken>,
    ) -> Result<(), BackendError> {
        self.ensure_online()?;
        self.state.lock().unwrap().removed.extend(paths);
        Ok(())
    }

    async fn list(
        &self,
        _bucket: &str,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<StoredObject>, BackendError> {
        self.ensure_online()?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .uploaded
            .iter()
            .filter(|p| p.starts_with(prefix))
            .take(limit)
            .map(|p| StoredObject { name: p.clone() })
            .collect())
    }
}
