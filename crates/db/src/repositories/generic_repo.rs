//! Generic soft-delete-aware repository for single-key entities.
//!
//! Every operation takes any Postgres executor, so the same call works
//! against the pool or inside a transaction (`&mut *tx`).

use std::marker::PhantomData;

use sqlx::{PgExecutor, Postgres, QueryBuilder};
use staffing_core::types::DbId;

use crate::entity::{Entity, KeyedEntity};
use crate::filter::{Filter, SqlValue};

/// Predicate selecting the rows default reads may return.
pub(crate) fn visible<E: Entity>() -> String {
    E::SOFT_DELETE.predicate(E::TABLE, true)
}

/// Predicate selecting soft-deleted rows.
pub(crate) fn hidden<E: Entity>() -> String {
    E::SOFT_DELETE.predicate(E::TABLE, false)
}

/// Append `INSERT INTO table (c1, c2) VALUES ($1, $2)`.
pub(crate) fn push_insert(
    qb: &mut QueryBuilder<'_, Postgres>,
    table: &str,
    values: &[(&'static str, SqlValue)],
) {
    let columns: Vec<&str> = values.iter().map(|(column, _)| *column).collect();
    qb.push(format!(
        "INSERT INTO {table} ({}) VALUES (",
        columns.join(", ")
    ));
    for (i, (_, value)) in values.iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        value.push_bind(qb);
    }
    qb.push(")");
}

/// Append `c1 = $n, c2 = $m, row_version = row_version + 1`.
pub(crate) fn push_set_list(
    qb: &mut QueryBuilder<'_, Postgres>,
    values: &[(&'static str, SqlValue)],
) {
    for (column, value) in values {
        qb.push(format!("{column} = "));
        value.push_bind(qb);
        qb.push(", ");
    }
    qb.push("row_version = row_version + 1");
}

/// Uniform CRUD over any [`Entity`], filtering through its soft-delete marker.
///
/// Zero-sized; use the per-entity aliases such as
/// [`ProjectRepo`](super::ProjectRepo).
pub struct Repository<E>(PhantomData<E>);

impl<E: Entity> Repository<E> {
    /// All visible rows.
    pub async fn list<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<E>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} WHERE {} ORDER BY {}",
            E::COLUMNS,
            E::TABLE,
            visible::<E>(),
            E::ORDER_BY
        );
        sqlx::query_as::<_, E>(&query).fetch_all(executor).await
    }

    /// All rows, hidden ones included.
    pub async fn list_including_deleted<'e>(
        executor: impl PgExecutor<'e>,
    ) -> Result<Vec<E>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} ORDER BY {}",
            E::COLUMNS,
            E::TABLE,
            E::ORDER_BY
        );
        sqlx::query_as::<_, E>(&query).fetch_all(executor).await
    }

    /// Visible rows matching `filter`.
    pub async fn find<'e>(
        executor: impl PgExecutor<'e>,
        filter: &Filter,
    ) -> Result<Vec<E>, sqlx::Error> {
        Self::find_where(executor, &visible::<E>(), filter).await
    }

    /// Rows matching `filter`, hidden ones included.
    pub async fn find_including_deleted<'e>(
        executor: impl PgExecutor<'e>,
        filter: &Filter,
    ) -> Result<Vec<E>, sqlx::Error> {
        Self::find_where(executor, "TRUE", filter).await
    }

    /// Whether any visible row matches `filter`.
    pub async fn exists<'e>(
        executor: impl PgExecutor<'e>,
        filter: &Filter,
    ) -> Result<bool, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE {}",
            E::TABLE,
            visible::<E>()
        ));
        filter.push_conditions(&mut qb);
        qb.push(")");
        qb.build_query_scalar::<bool>().fetch_one(executor).await
    }

    async fn find_where<'e>(
        executor: impl PgExecutor<'e>,
        base: &str,
        filter: &Filter,
    ) -> Result<Vec<E>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM {} WHERE {base}",
            E::COLUMNS,
            E::TABLE
        ));
        filter.push_conditions(&mut qb);
        qb.push(" ORDER BY ");
        qb.push(E::ORDER_BY);
        qb.build_query_as::<E>().fetch_all(executor).await
    }
}

impl<E: KeyedEntity> Repository<E> {
    /// Insert `entity` and return the persisted row with its generated key.
    pub async fn create<'e>(executor: impl PgExecutor<'e>, entity: &E) -> Result<E, sqlx::Error> {
        let values = entity.write_values();
        let mut qb = QueryBuilder::<Postgres>::new("");
        push_insert(&mut qb, E::TABLE, &values);
        qb.push(" RETURNING ");
        qb.push(E::COLUMNS);
        let created = qb.build_query_as::<E>().fetch_one(executor).await?;
        tracing::debug!(entity = E::NAME, key = created.key(), "Row inserted");
        Ok(created)
    }

    /// Find a visible row by key.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<E>, sqlx::Error> {
        let row = Self::find_by_id_including_deleted(executor, id).await?;
        Ok(row.filter(E::is_visible))
    }

    /// Find a row by key regardless of its soft-delete state.
    pub async fn find_by_id_including_deleted<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<E>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} WHERE {} = $1",
            E::COLUMNS,
            E::TABLE,
            E::KEY_COLUMN
        );
        sqlx::query_as::<_, E>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a visible row by key and lock it until the transaction ends.
    pub async fn lock_visible<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<E>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} WHERE {} = $1 AND {} FOR UPDATE",
            E::COLUMNS,
            E::TABLE,
            E::KEY_COLUMN,
            visible::<E>()
        );
        sqlx::query_as::<_, E>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Replace every written column of the row keyed by `entity.key()`.
    ///
    /// Matches only while the stored `row_version` equals the entity's and
    /// bumps it on success. Returns `None` when nothing matched, which after
    /// an existence check means the row changed concurrently.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        entity: &E,
    ) -> Result<Option<E>, sqlx::Error> {
        let values = entity.write_values();
        let mut qb = QueryBuilder::<Postgres>::new(format!("UPDATE {} SET ", E::TABLE));
        push_set_list(&mut qb, &values);
        qb.push(format!(" WHERE {} = ", E::KEY_COLUMN));
        qb.push_bind(entity.key());
        qb.push(" AND row_version = ");
        qb.push_bind(entity.row_version());
        qb.push(" RETURNING ");
        qb.push(E::COLUMNS);
        qb.build_query_as::<E>().fetch_optional(executor).await
    }

    /// Hide a visible row through its marker, or delete it physically when
    /// the type has none. Returns `true` if a row was acted on; a second call
    /// on the same key returns `false`.
    pub async fn soft_delete<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = match E::SOFT_DELETE.assignment(false) {
            Some(set) => format!(
                "UPDATE {} SET {set}, row_version = row_version + 1 WHERE {} = $1 AND {}",
                E::TABLE,
                E::KEY_COLUMN,
                visible::<E>()
            ),
            None => format!("DELETE FROM {} WHERE {} = $1", E::TABLE, E::KEY_COLUMN),
        };
        let result = sqlx::query(&query).bind(id).execute(executor).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Make a hidden row visible again. Always `false` for types without a
    /// soft-delete marker.
    pub async fn restore<'e>(executor: impl PgExecutor<'e>, id: DbId) -> Result<bool, sqlx::Error> {
        let Some(set) = E::SOFT_DELETE.assignment(true) else {
            return Ok(false);
        };
        let query = format!(
            "UPDATE {} SET {set}, row_version = row_version + 1 WHERE {} = $1 AND {}",
            E::TABLE,
            E::KEY_COLUMN,
            hidden::<E>()
        );
        let result = sqlx::query(&query).bind(id).execute(executor).await?;
        Ok(result.rows_affected() > 0)
    }
}
