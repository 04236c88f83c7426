use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;

use crate::modules::backend::adapter::outgoing::supabase_client::SupabaseClient;
use crate::modules::backend::application::ports::outgoing::{
    AccessToken, BackendError, Filter, SelectQuery, TableGateway,
};

const RETURN_REPRESENTATION: &str = "return=representation";
const RETURN_MINIMAL: &str = "return=minimal";
const MERGE_DUPLICATES: &str = "resolution=merge-duplicates,return=representation";

/// PostgREST adapter (`/rest/v1/{table}`).
#[derive(Clone)]
pub struct SupabaseTables {
    client: SupabaseClient,
}

impl SupabaseTables {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    fn table_url(&self, table: &str) -> Result<Url, BackendError> {
        self.client.url(&format!("rest/v1/{table}"))
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn list_item(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
        other => other.to_string(),
    }
}

fn list(values: &[Value]) -> String {
    let items: Vec<String> = values.iter().map(list_item).collect();
    format!("({})", items.join(","))
}

/// Renders a filter as a PostgREST `column=operator.value` pair.
pub fn encode_filter(filter: &Filter) -> (String, String) {
    let op = match filter {
        Filter::Eq(_, Value::Null) => "is.null".to_string(),
        Filter::Neq(_, Value::Null) => "not.is.null".to_string(),
        Filter::Eq(_, v) => format!("eq.{}", scalar(v)),
        Filter::Neq(_, v) => format!("neq.{}", scalar(v)),
        Filter::In(_, vs) => format!("in.{}", list(vs)),
        Filter::NotIn(_, vs) => format!("not.in.{}", list(vs)),
    };
    (filter.column().to_string(), op)
}

fn apply_filters(url: &mut Url, filters: &[Filter]) {
    let mut pairs = url.query_pairs_mut();
    for filter in filters {
        let (column, op) = encode_filter(filter);
        pairs.append_pair(&column, &op);
    }
}

pub fn select_url(mut url: Url, query: &SelectQuery) -> Url {
    url.query_pairs_mut().append_pair("select", &query.columns);
    apply_filters(&mut url, &query.filters);
    {
        let mut pairs = url.query_pairs_mut();
        if let Some(order) = &query.order {
            let direction = if order.ascending { "asc" } else { "desc" };
            pairs.append_pair("order", &format!("{}.{}", order.column, direction));
        }
        if let Some(limit) = query.limit {
            pairs.append_pair("limit", &limit.to_string());
        }
    }
    url
}

#[async_trait]
impl TableGateway for SupabaseTables {
    async fn select(
        &self,
        table: &str,
        query: SelectQuery,
        auth: Option<&AccessToken>,
    ) -> Result<Vec<Value>, BackendError> {
        let url = select_url(self.table_url(table)?, &query);
        let request = self.client.authorize(self.client.http().get(url), auth);
        SupabaseClient::send_json(request).await
    }

    async fn insert(
        &self,
        table: &str,
        rows: Vec<Value>,
        auth: Option<&AccessToken>,
    ) -> Result<Vec<Value>, BackendError> {
        let url = self.table_url(table)?;
        let request = self
            .client
            .authorize(self.client.http().post(url), auth)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&rows);
        SupabaseClient::send_json(request).await
    }

    async fn insert_minimal(
        &self,
        table: &str,
        rows: Vec<Value>,
        auth: Option<&AccessToken>,
    ) -> Result<(), BackendError> {
        let url = self.table_url(table)?;
        let request = self
            .client
            .authorize(self.client.http().post(url), auth)
            .header("Prefer", RETURN_MINIMAL)
            .json(&rows);
        SupabaseClient::send(request).await.map(|_| ())
    }

    async fn upsert(
        &self,
        table: &str,
        rows: Vec<Value>,
        on_conflict: &str,
        auth: Option<&AccessToken>,
    ) -> Result<Vec<Value>, BackendError> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut().append_pair("on_conflict", on_conflict);
        let request = self
            .client
            .authorize(self.client.http().post(url), auth)
            .header("Prefer", MERGE_DUPLICATES)
            .json(&rows);
        SupabaseClient::send_json(request).await
    }

    async fn update(
        &self,
        table: &str,
        filters: Vec<Filter>,
        patch: Value,
        auth: Option<&AccessToken>,
    ) -> Result<Vec<Value>, BackendError> {
        let mut url = self.table_url(table)?;
        apply_filters(&mut url, &filters);
        let request = self
            .client
            .authorize(self.client.http().patch(url), auth)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&patch);
        SupabaseClient::send_json(request).await
    }

    async fn delete(
        &self,
        table: &str,
        filters: Vec<Filter>,
        auth: Option<&AccessToken>,
    ) -> Result<Vec<Value>, BackendError> {
        let mut url = self.table_url(table)?;
        apply_filters(&mut url, &filters);
        let request = self
            .client
            .authorize(self.client.http().delete(url), auth)
            .header("Prefer", RETURN_REPRESENTATION);
        SupabaseClient::send_json(request).await
    }
}
