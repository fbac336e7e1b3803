use crate::{
    error::DbError,
    sql::postgres::{params::PgParamStore, row::to_row_data, utils::connect_client},
};
use model::{
    core::value::Value,
    records::{record::Record, row::RowData},
};
use planner::{
    query::dialect::Postgres,
    queryable::{
        object::ObjectQueryable,
        sql::{SqlPlan, SqlQueryable},
    },
};
use tokio_postgres::Client;
use tracing::debug;

/// Runs finalized SQL plans on a `tokio-postgres` client.
pub struct PgExecutor {
    client: Client,
}

impl PgExecutor {
    pub fn new(client: Client) -> Self {
        PgExecutor { client }
    }

    pub async fn connect(url: &str) -> Result<Self, DbError> {
        Ok(Self::new(connect_client(url).await?))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Executes `sql` with positional `$n` placeholders bound to `params`.
    pub async fn query(
        &self,
        sql: &str,
        params: Vec<Value>,
        entity: &str,
    ) -> Result<Vec<RowData>, DbError> {
        let statement = self.client.prepare(sql).await?;
        let bindings = PgParamStore::for_types(params, statement.params())?;
        let rows = self.client.query(&statement, &bindings.as_refs()).await?;
        Ok(rows.iter().map(|row| to_row_data(row, entity)).collect())
    }

    /// Compiles and runs a SQL plan, returning the raw result rows.
    pub async fn fetch<T: Record>(&self, query: &SqlQueryable<T>) -> Result<Vec<RowData>, DbError> {
        let (sql, params) = query.to_sql_with(&Postgres)?;
        debug!(%sql, params = params.len(), "Executing SQL plan");

        self.query(&sql, params, base_table(query.plan())).await
    }

    /// Like [`PgExecutor::fetch`], wrapped as an in-memory queryable so the
    /// result can be filtered further without another round trip.
    pub async fn fetch_objects<T: Record>(
        &self,
        query: &SqlQueryable<T>,
    ) -> Result<ObjectQueryable<RowData>, DbError> {
        Ok(ObjectQueryable::new(self.fetch(query).await?))
    }
}

fn base_table(plan: &SqlPlan) -> &str {
    match plan {
        SqlPlan::Table(table) => table.name(),
        SqlPlan::Filter(filter) => base_table(filter.source()),
    }
}
