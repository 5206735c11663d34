use sqlx::MySqlPool;

/// ===============================
/// SQL update container
/// ===============================
#[derive(Debug, PartialEq)]
pub struct SqlUpdate {
    pub sql: String,
    pub values: Vec<String>,
}

/// ===============================
/// Build a partial UPDATE
/// ===============================
///
/// Only the columns whose value is `Some` end up in the SET clause. Column
/// names come from the caller, never from the request body. Returns `None`
/// when there is nothing to set.
pub fn build_update_sql(
    table: &str,
    assignments: &[(&str, Option<&str>)],
    id_column: &str,
) -> Option<SqlUpdate> {
    let present: Vec<(&str, &str)> = assignments
        .iter()
        .filter_map(|(column, value)| value.map(|v| (*column, v)))
        .collect();

    if present.is_empty() {
        return None;
    }

    let set_clause = present
        .iter()
        .map(|(column, _)| format!("{} = ?", column))
        .collect::<Vec<_>>()
        .join(", ");

    Some(SqlUpdate {
        sql: format!("UPDATE {} SET {} WHERE {} = ?", table, set_clause, id_column),
        values: present.into_iter().map(|(_, v)| v.to_string()).collect(),
    })
}

/// ===============================
/// Execute the update
/// ===============================
pub async fn execute_update(
    pool: &MySqlPool,
    update: SqlUpdate,
    id_value: &str,
) -> Result<u64, sqlx::Error> {
    let mut query = sqlx::query(&update.sql);

    for value in update.values {
        query = query.bind(value);
    }

    let result = query.bind(id_value).execute(pool).await?;
    Ok(result.rows_affected())
}
