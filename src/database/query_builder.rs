use sqlx::{self, postgres::PgArguments, FromRow, PgPool};

use crate::database::manager::DatabaseError;

/// Column values the `folders` and `notes` tables take: `TEXT` or `BIGINT`.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(i64),
    Text(String),
}

impl From<i64> for SqlParam {
    fn from(value: i64) -> Self {
        SqlParam::Int(value)
    }
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        SqlParam::Text(value)
    }
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(value.to_string())
    }
}

/// A single parameterized statement and its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlParam>,
}

/// Builds one-statement CRUD queries against a single table keyed by `id`.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    table_name: String,
}

impl QueryBuilder {
    pub fn new(table_name: impl Into<String>) -> Result<Self, DatabaseError> {
        let table_name = table_name.into();
        validate_identifier(&table_name)?;
        Ok(Self { table_name })
    }

    pub fn select_all(&self) -> SqlResult {
        SqlResult {
            query: format!("SELECT * FROM {} ORDER BY \"id\"", self.table()),
            params: vec![],
        }
    }

    pub fn select_by_id(&self, id: i64) -> SqlResult {
        SqlResult {
            query: format!("SELECT * FROM {} WHERE \"id\" = $1", self.table()),
            params: vec![SqlParam::Int(id)],
        }
    }

    pub fn insert_returning(&self, values: Vec<(&str, SqlParam)>) -> Result<SqlResult, DatabaseError> {
        if values.is_empty() {
            return Err(DatabaseError::QueryError("INSERT requires at least one column".to_string()));
        }

        let mut columns = Vec::with_capacity(values.len());
        let mut placeholders = Vec::with_capacity(values.len());
        let mut params = Vec::with_capacity(values.len());
        for (i, (column, value)) in values.into_iter().enumerate() {
            validate_identifier(column)?;
            columns.push(quote(column));
            placeholders.push(format!("${}", i + 1));
            params.push(value);
        }

        Ok(SqlResult {
            query: format!(
                "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
                self.table(),
                columns.join(", "),
                placeholders.join(", ")
            ),
            params,
        })
    }

    /// Only the supplied columns are written; everything else keeps its value.
    pub fn update_by_id(&self, id: i64, values: Vec<(&str, SqlParam)>) -> Result<SqlResult, DatabaseError> {
        if values.is_empty() {
            return Err(DatabaseError::QueryError("UPDATE requires at least one column".to_string()));
        }

        let mut assignments = Vec::with_capacity(values.len());
        let mut params = Vec::with_capacity(values.len() + 1);
        for (i, (column, value)) in values.into_iter().enumerate() {
            validate_identifier(column)?;
            assignments.push(format!("{} = ${}", quote(column), i + 1));
            params.push(value);
        }
        params.push(SqlParam::Int(id));

        Ok(SqlResult {
            query: format!(
                "UPDATE {} SET {} WHERE \"id\" = ${}",
                self.table(),
                assignments.join(", "),
                params.len()
            ),
            params,
        })
    }

    pub fn delete_by_id(&self, id: i64) -> SqlResult {
        SqlResult {
            query: format!("DELETE FROM {} WHERE \"id\" = $1", self.table()),
            params: vec![SqlParam::Int(id)],
        }
    }

    fn table(&self) -> String {
        quote(&self.table_name)
    }
}

impl SqlResult {
    pub async fn fetch_all<T>(&self, pool: &PgPool) -> Result<Vec<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        let mut q = sqlx::query_as::<_, T>(&self.query);
        for p in self.params.iter() {
            q = bind_param_query_as(q, p);
        }
        q.fetch_all(pool).await
    }

    pub async fn fetch_optional<T>(&self, pool: &PgPool) -> Result<Option<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        let mut q = sqlx::query_as::<_, T>(&self.query);
        for p in self.params.iter() {
            q = bind_param_query_as(q, p);
        }
        q.fetch_optional(pool).await
    }

    pub async fn fetch_one<T>(&self, pool: &PgPool) -> Result<T, sqlx::Error>
    where
        T: for<'r> FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        let mut q = sqlx::query_as::<_, T>(&self.query);
        for p in self.params.iter() {
            q = bind_param_query_as(q, p);
        }
        q.fetch_one(pool).await
    }

    /// Runs the statement and returns the number of affected rows.
    pub async fn execute(&self, pool: &PgPool) -> Result<u64, sqlx::Error> {
        let mut q = sqlx::query(&self.query);
        for p in self.params.iter() {
            q = bind_param_query(q, p);
        }
        Ok(q.execute(pool).await?.rows_affected())
    }
}

fn quote(identifier: &str) -> String {
    format!("\"{}\"", identifier)
}

fn validate_identifier(name: &str) -> Result<(), DatabaseError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(DatabaseError::QueryError(format!("Invalid identifier: {:?}", name)));
    }
    Ok(())
}

fn bind_param_query<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    p: &'q SqlParam,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match p {
        SqlParam::Int(i) => q.bind(*i),
        SqlParam::Text(s) => q.bind(s.as_str()),
    }
}

fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    p: &'q SqlParam,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, sqlx::postgres::PgRow>,
{
    match p {
        SqlParam::Int(i) => q.bind(*i),
        SqlParam::Text(s) => q.bind(s.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unsafe_table_names() {
        assert!(QueryBuilder::new("folders").is_ok());
        assert!(QueryBuilder::new("").is_err());
        assert!(QueryBuilder::new("1notes").is_err());
        assert!(QueryBuilder::new("notes; DROP TABLE folders").is_err());
    }

    #[test]
    fn select_all_orders_by_id() {
        let sql = QueryBuilder::new("folders").unwrap().select_all();
        assert_eq!(sql.query, "SELECT * FROM \"folders\" ORDER BY \"id\"");
        assert!(sql.params.is_empty());
    }

    #[test]
    fn select_by_id_binds_id() {
        let sql = QueryBuilder::new("notes").unwrap().select_by_id(7);
        assert_eq!(sql.query, "SELECT * FROM \"notes\" WHERE \"id\" = $1");
        assert_eq!(sql.params, vec![SqlParam::Int(7)]);
    }

    #[test]
    fn insert_numbers_placeholders_in_column_order() {
        let sql = QueryBuilder::new("notes")
            .unwrap()
            .insert_returning(vec![
                ("name", SqlParam::from("N")),
                ("folder_id", SqlParam::Int(1)),
                ("content", SqlParam::from("C")),
            ])
            .unwrap();
        assert_eq!(
            sql.query,
            "INSERT INTO \"notes\" (\"name\", \"folder_id\", \"content\") VALUES ($1, $2, $3) RETURNING *"
        );
        assert_eq!(sql.params, vec![SqlParam::from("N"), SqlParam::Int(1), SqlParam::from("C")]);
    }

    #[test]
    fn update_puts_id_last() {
        let sql = QueryBuilder::new("notes")
            .unwrap()
            .update_by_id(3, vec![("name", SqlParam::from("X"))])
            .unwrap();
        assert_eq!(sql.query, "UPDATE \"notes\" SET \"name\" = $1 WHERE \"id\" = $2");
        assert_eq!(sql.params, vec![SqlParam::from("X"), SqlParam::Int(3)]);
    }

    #[test]
    fn empty_writes_are_rejected() {
        let qb = QueryBuilder::new("folders").unwrap();
        assert!(qb.update_by_id(1, vec![]).is_err());
        assert!(qb.insert_returning(vec![]).is_err());
    }

    #[test]
    fn column_names_are_validated() {
        let qb = QueryBuilder::new("folders").unwrap();
        assert!(qb.update_by_id(1, vec![("name\" = '' --", SqlParam::from("x"))]).is_err());
    }

    #[test]
    fn delete_by_id() {
        let sql = QueryBuilder::new("folders").unwrap().delete_by_id(9);
        assert_eq!(sql.query, "DELETE FROM \"folders\" WHERE \"id\" = $1");
        assert_eq!(sql.params, vec![SqlParam::Int(9)]);
    }
}
