//! Repository for entities addressed by a two-column key.
//!
//! Shares the visibility rules of [`Repository`]; table-wide reads delegate
//! to it. Key-addressed operations take both key parts explicitly.

use std::marker::PhantomData;

use sqlx::{PgExecutor, Postgres, QueryBuilder};
use staffing_core::types::DbId;

use crate::entity::CompositeKeyed;
use crate::filter::Filter;
use crate::repositories::generic_repo::{hidden, push_insert, push_set_list, visible, Repository};

pub struct CompositeRepository<E>(PhantomData<E>);

impl<E: CompositeKeyed> CompositeRepository<E> {
    pub async fn list<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<E>, sqlx::Error> {
        Repository::<E>::list(executor).await
    }

    pub async fn find<'e>(
        executor: impl PgExecutor<'e>,
        filter: &Filter,
    ) -> Result<Vec<E>, sqlx::Error> {
        Repository::<E>::find(executor, filter).await
    }

    pub async fn exists<'e>(
        executor: impl PgExecutor<'e>,
        filter: &Filter,
    ) -> Result<bool, sqlx::Error> {
        Repository::<E>::exists(executor, filter).await
    }

    /// Find a visible row by its key pair.
    pub async fn find_by_keys<'e>(
        executor: impl PgExecutor<'e>,
        first: DbId,
        second: DbId,
    ) -> Result<Option<E>, sqlx::Error> {
        let row = Self::find_by_keys_including_deleted(executor, first, second).await?;
        Ok(row.filter(E::is_visible))
    }

    pub async fn find_by_keys_including_deleted<'e>(
        executor: impl PgExecutor<'e>,
        first: DbId,
        second: DbId,
    ) -> Result<Option<E>, sqlx::Error> {
        let (k1, k2) = E::KEY_COLUMNS;
        let query = format!(
            "SELECT {} FROM {} WHERE {k1} = $1 AND {k2} = $2",
            E::COLUMNS,
            E::TABLE
        );
        sqlx::query_as::<_, E>(&query)
            .bind(first)
            .bind(second)
            .fetch_optional(executor)
            .await
    }

    /// Replace the non-key columns of the row keyed by `entity.keys()`,
    /// guarded by its `row_version`. `None` when nothing matched.
    pub async fn update_by_keys<'e>(
        executor: impl PgExecutor<'e>,
        entity: &E,
    ) -> Result<Option<E>, sqlx::Error> {
        let (k1, k2) = E::KEY_COLUMNS;
        let (first, second) = entity.keys();
        let values: Vec<_> = entity
            .write_values()
            .into_iter()
            .filter(|(column, _)| *column != k1 && *column != k2)
            .collect();

        let mut qb = QueryBuilder::<Postgres>::new(format!("UPDATE {} SET ", E::TABLE));
        push_set_list(&mut qb, &values);
        qb.push(format!(" WHERE {k1} = "));
        qb.push_bind(first);
        qb.push(format!(" AND {k2} = "));
        qb.push_bind(second);
        qb.push(" AND row_version = ");
        qb.push_bind(entity.row_version());
        qb.push(" RETURNING ");
        qb.push(E::COLUMNS);
        qb.build_query_as::<E>().fetch_optional(executor).await
    }

    /// Hide a visible row by key pair (physical delete for marker-less types).
    pub async fn delete_by_keys<'e>(
        executor: impl PgExecutor<'e>,
        first: DbId,
        second: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (k1, k2) = E::KEY_COLUMNS;
        let query = match E::SOFT_DELETE.assignment(false) {
            Some(set) => format!(
                "UPDATE {} SET {set}, row_version = row_version + 1 \
                 WHERE {k1} = $1 AND {k2} = $2 AND {}",
                E::TABLE,
                visible::<E>()
            ),
            None => format!("DELETE FROM {} WHERE {k1} = $1 AND {k2} = $2", E::TABLE),
        };
        let result = sqlx::query(&query)
            .bind(first)
            .bind(second)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn restore_by_keys<'e>(
        executor: impl PgExecutor<'e>,
        first: DbId,
        second: DbId,
    ) -> Result<bool, sqlx::Error> {
        let Some(set) = E::SOFT_DELETE.assignment(true) else {
            return Ok(false);
        };
        let (k1, k2) = E::KEY_COLUMNS;
        let query = format!(
            "UPDATE {} SET {set}, row_version = row_version + 1 \
             WHERE {k1} = $1 AND {k2} = $2 AND {}",
            E::TABLE,
            hidden::<E>()
        );
        let result = sqlx::query(&query)
            .bind(first)
            .bind(second)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert `entity`, or overwrite a soft-deleted row holding the same key
    /// pair with the new values and make it visible again.
    ///
    /// Returns `None` when a visible row already holds the key pair.
    pub async fn upsert_reviving<'e>(
        executor: impl PgExecutor<'e>,
        entity: &E,
    ) -> Result<Option<E>, sqlx::Error> {
        let (k1, k2) = E::KEY_COLUMNS;
        let values = entity.write_values();

        let mut qb = QueryBuilder::<Postgres>::new("");
        push_insert(&mut qb, E::TABLE, &values);
        qb.push(format!(" ON CONFLICT ({k1}, {k2}) "));
        if E::SOFT_DELETE.assignment(true).is_some() {
            let updates: Vec<String> = values
                .iter()
                .map(|(column, _)| *column)
                .filter(|column| *column != k1 && *column != k2)
                .map(|column| format!("{column} = EXCLUDED.{column}"))
                .collect();
            qb.push(format!(
                "DO UPDATE SET {}, row_version = {table}.row_version + 1 WHERE {}",
                updates.join(", "),
                hidden::<E>(),
                table = E::TABLE
            ));
        } else {
            qb.push("DO NOTHING");
        }
        qb.push(" RETURNING ");
        qb.push(E::COLUMNS);
        qb.build_query_as::<E>().fetch_optional(executor).await
    }
}
