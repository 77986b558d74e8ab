//! Typed predicates for the repository `find` / `exists` operations.
//!
//! Column names are `'static` identifiers chosen in code; values are always
//! sent as bound parameters.

use sqlx::{Postgres, QueryBuilder};
use staffing_core::types::{Date, DbId};

/// A single bindable column value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    BigInt(i64),
    Int(i32),
    Bool(bool),
    Text(String),
    OptText(Option<String>),
    Date(Date),
    OptDate(Option<Date>),
}

impl SqlValue {
    /// Append this value as the next bound parameter.
    pub fn push_bind(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        match self {
            SqlValue::BigInt(v) => {
                qb.push_bind(*v);
            }
            SqlValue::Int(v) => {
                qb.push_bind(*v);
            }
            SqlValue::Bool(v) => {
                qb.push_bind(*v);
            }
            SqlValue::Text(v) => {
                qb.push_bind(v.clone());
            }
            SqlValue::OptText(v) => {
                qb.push_bind(v.clone());
            }
            SqlValue::Date(v) => {
                qb.push_bind(*v);
            }
            SqlValue::OptDate(v) => {
                qb.push_bind(*v);
            }
        }
    }
}

impl From<DbId> for SqlValue {
    fn from(v: DbId) -> Self {
        SqlValue::BigInt(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<Option<String>> for SqlValue {
    fn from(v: Option<String>) -> Self {
        SqlValue::OptText(v)
    }
}

impl From<Date> for SqlValue {
    fn from(v: Date) -> Self {
        SqlValue::Date(v)
    }
}

impl From<Option<Date>> for SqlValue {
    fn from(v: Option<Date>) -> Self {
        SqlValue::OptDate(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompareOp {
    Eq,
    Ne,
}

impl CompareOp {
    fn as_sql(self) -> &'static str {
        match self {
            CompareOp::Eq => " = ",
            CompareOp::Ne => " <> ",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Condition {
    column: &'static str,
    op: CompareOp,
    value: SqlValue,
}

/// Conjunction of column comparisons, e.g.
/// `Filter::new().eq("name", "Alpha").ne("project_id", 4)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(self, column: &'static str, value: impl Into<SqlValue>) -> Self {
        self.with(column, CompareOp::Eq, value.into())
    }

    pub fn ne(self, column: &'static str, value: impl Into<SqlValue>) -> Self {
        self.with(column, CompareOp::Ne, value.into())
    }

    /// Exclude one row by key when present; a no-op for `None`.
    pub fn ne_opt(self, column: &'static str, value: Option<DbId>) -> Self {
        match value {
            Some(v) => self.ne(column, v),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    fn with(mut self, column: &'static str, op: CompareOp, value: SqlValue) -> Self {
        self.conditions.push(Condition { column, op, value });
        self
    }

    /// Append ` AND column op $n` for every condition.
    pub fn push_conditions(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        for cond in &self.conditions {
            qb.push(" AND ");
            qb.push(cond.column);
            qb.push(cond.op.as_sql());
            cond.value.push_bind(qb);
        }
    }
}
