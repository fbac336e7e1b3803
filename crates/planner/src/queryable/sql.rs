//! The SQL realization of [`Queryable`]: a persistent plan tree that renders
//! lazily into one parameterized statement.

use model::{
    core::value::Value,
    records::{joined::Joined, record::Record},
};
use std::{marker::PhantomData, sync::Arc};
use tracing::{debug, trace};

use crate::{
    combine,
    error::{QueryError, Result},
    expr::{Expr, record::RecordExpr},
    query::{dialect::Dialect, fragment::Fragment},
    queryable::{Queryable, mapping::TableMapping},
    sql_text,
};

const TABLE_ALIAS: &str = "tbl";
const FILTER_ALIAS: &str = "flt";

/// A node of the SQL plan.
#[derive(Debug)]
pub enum SqlPlan {
    Table(SqlTable),
    Filter(SqlFilter),
}

/// `SELECT <mapped columns> FROM <table> <alias>`.
#[derive(Debug)]
pub struct SqlTable {
    name: String,
    alias: String,
    mapping: TableMapping,
}

/// `SELECT * FROM (<source>) <alias> WHERE <predicate>`.
#[derive(Debug)]
pub struct SqlFilter {
    source: Arc<SqlPlan>,
    alias: String,
    depth: usize,
    predicate: Expr<bool>,
}

impl SqlPlan {
    pub fn alias(&self) -> &str {
        match self {
            SqlPlan::Table(table) => &table.alias,
            SqlPlan::Filter(filter) => &filter.alias,
        }
    }

    /// Number of filter layers between this node and its base table.
    pub fn depth(&self) -> usize {
        match self {
            SqlPlan::Table(_) => 0,
            SqlPlan::Filter(filter) => filter.depth,
        }
    }

    pub fn compile(&self) -> Result<Fragment> {
        match self {
            SqlPlan::Table(table) => Ok(table.compile()),
            SqlPlan::Filter(filter) => filter.compile(),
        }
    }
}

impl SqlTable {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mapping(&self) -> &TableMapping {
        &self.mapping
    }

    fn compile(&self) -> Fragment {
        combine!(
            sql_text!("SELECT {} FROM ", self.mapping.select_list()),
            Fragment::text(self.name.as_str()),
            sql_text!(" {}", self.alias),
        )
    }
}

impl SqlFilter {
    pub fn source(&self) -> &SqlPlan {
        &self.source
    }

    pub fn predicate(&self) -> &Expr<bool> {
        &self.predicate
    }

    fn compile(&self) -> Result<Fragment> {
        Ok(combine!(
            Fragment::text("SELECT * FROM ("),
            self.source.compile()?,
            sql_text!(") {} WHERE ", self.alias),
            self.predicate.compile()?,
        ))
    }
}

/// Each filter layer gets an alias unique to its depth so that references in
/// nested derived tables never collide.
fn filter_alias(depth: usize) -> String {
    if depth <= 1 {
        FILTER_ALIAS.to_string()
    } else {
        format!("{FILTER_ALIAS}{depth}")
    }
}

/// A SQL-backed queryable of `T` records.
pub struct SqlQueryable<T> {
    plan: Arc<SqlPlan>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> SqlQueryable<T> {
    /// The base table `name`, projected through `mapping`.
    pub fn table(name: impl Into<String>, mapping: TableMapping) -> Self {
        Self::from_plan(SqlPlan::Table(SqlTable {
            name: name.into(),
            alias: TABLE_ALIAS.to_string(),
            mapping,
        }))
    }

    fn from_plan(plan: SqlPlan) -> Self {
        SqlQueryable {
            plan: Arc::new(plan),
            _record: PhantomData,
        }
    }

    pub fn plan(&self) -> &SqlPlan {
        &self.plan
    }

    pub fn alias(&self) -> &str {
        self.plan.alias()
    }

    pub fn compile(&self) -> Result<Fragment> {
        let fragment = self.plan.compile()?;
        trace!(alias = self.alias(), bindings = fragment.bindings().len(), "compiled SQL plan");
        Ok(fragment)
    }

    /// Finalized SQL text with `?` placeholders, plus bindings.
    pub fn to_sql(&self) -> Result<(String, Vec<Value>)> {
        Ok(self.compile()?.finish())
    }

    pub fn to_sql_with(&self, dialect: &dyn Dialect) -> Result<(String, Vec<Value>)> {
        let fragment = self.compile()?;
        trace!(dialect = %dialect.name(), "finalizing SQL plan");
        Ok(fragment.finish_with(dialect))
    }
}

impl<T: Record> Queryable<T> for SqlQueryable<T> {
    type Of<U: Record> = SqlQueryable<U>;

    fn filter<F>(&self, predicate: F) -> Result<Self>
    where
        F: Fn(&RecordExpr<T>) -> Expr<bool>,
    {
        let depth = self.plan.depth() + 1;
        let alias = filter_alias(depth);
        let predicate = predicate(&RecordExpr::sql(alias.as_str()));
        debug!(alias = %alias, depth, "wrapping SQL source in filter layer");

        Ok(Self::from_plan(SqlPlan::Filter(SqlFilter {
            source: Arc::clone(&self.plan),
            alias,
            depth,
            predicate,
        })))
    }

    // Join semantics (inner/outer, keyed or arbitrary predicate) are not
    // defined for the SQL plan yet.
    fn join<U, F>(&self, _other: &SqlQueryable<U>, _on: F) -> Result<SqlQueryable<Joined<T, U>>>
    where
        U: Record,
        F: Fn(&RecordExpr<T>, &RecordExpr<U>) -> Expr<bool>,
    {
        Err(QueryError::NotImplemented("join on a SQL queryable"))
    }
}

impl<T> Clone for SqlQueryable<T> {
    fn clone(&self) -> Self {
        SqlQueryable {
            plan: Arc::clone(&self.plan),
            _record: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for SqlQueryable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SqlQueryable").field(&self.plan).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{expr::ops::and, query::dialect::Postgres};
    use model::records::row::RowData;
    use tracing_test::traced_test;

    fn customers() -> SqlQueryable<RowData> {
        SqlQueryable::table(
            "customer",
            TableMapping::new()
                .mapped("customerID", "customer_id")
                .field("name")
                .field("address"),
        )
    }

    #[test]
    fn test_table_renders_mapped_columns() {
        let (sql, bindings) = customers().to_sql().unwrap();
        assert_eq!(
            sql,
            "SELECT customer_id as customerID, name, address FROM customer tbl"
        );
        assert!(bindings.is_empty());
    }

    #[test]
    fn test_unmapped_table_selects_star() {
        let table = SqlQueryable::<RowData>::table("customer", TableMapping::new());
        assert_eq!(table.to_sql().unwrap().0, "SELECT * FROM customer tbl");
    }

    #[traced_test]
    #[test]
    fn test_filter_wraps_source_as_derived_table() {
        let query = customers()
            .filter(|c| c.field::<i64>("customerID").is_one_of([1, 3]))
            .unwrap();

        let (sql, bindings) = query.to_sql().unwrap();
        assert_eq!(
            sql,
            "SELECT * FROM (SELECT customer_id as customerID, name, address FROM customer tbl) flt WHERE (flt.customerID IN (?, ?))"
        );
        assert_eq!(bindings, vec![Value::Int(1), Value::Int(3)]);
        assert!(logs_contain("wrapping SQL source in filter layer"));
    }

    #[test]
    fn test_filter_does_not_mutate_source() {
        let base = customers();
        let filtered = base
            .filter(|c| c.field::<i64>("customerID").equals(1))
            .unwrap();

        assert_eq!(base.alias(), "tbl");
        assert_eq!(filtered.alias(), "flt");
        assert_eq!(base.plan().depth(), 0);
        assert_eq!(filtered.plan().depth(), 1);
        assert!(base.to_sql().unwrap().0.starts_with("SELECT customer_id"));
    }

    #[test]
    fn test_nested_filters_get_depth_unique_aliases() {
        let query = customers()
            .filter(|c| c.field::<i64>("customerID").is_one_of([1, 2, 3]))
            .unwrap()
            .filter(|c| c.field::<String>("name").equals("customer 2").not())
            .unwrap();

        let (sql, bindings) = query.to_sql_with(&Postgres).unwrap();
        assert_eq!(
            sql,
            concat!(
                "SELECT * FROM (",
                "SELECT * FROM (SELECT customer_id as customerID, name, address FROM customer tbl) flt ",
                "WHERE (flt.customerID IN ($1, $2, $3))",
                ") flt2 WHERE (NOT (flt2.name = $4))"
            )
        );
        assert_eq!(bindings.len(), 4);
    }

    #[test]
    fn test_empty_and_renders_true() {
        let query = customers()
            .filter(|_| and(Vec::<Expr<bool>>::new()))
            .unwrap();
        assert!(query.to_sql().unwrap().0.ends_with("flt WHERE TRUE"));
    }

    #[test]
    fn test_join_is_not_implemented() {
        let err = customers()
            .join(&customers(), |a, b| {
                a.field::<i64>("customerID").equals(b.field::<i64>("customerID"))
            })
            .unwrap_err();
        assert_eq!(err, QueryError::NotImplemented("join on a SQL queryable"));
    }
}
