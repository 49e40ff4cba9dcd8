//! Schema DDL for the four tables. Order follows foreign-key dependencies:
//! `user`, `character`, `planet`, then `favorite`.
//!
//! `CREATE TABLE IF NOT EXISTS` leaves existing tables as they are, so after creating
//! tables `apply_migrations` widens any VARCHAR column an older schema declared
//! narrower (for example a short `password` column that cannot hold an Argon2id hash).

use crate::error::AppError;
use sqlx::PgPool;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    Serial,
    Integer,
    Boolean,
    Varchar(u32),
}

#[derive(Clone, Copy, Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    pub type_: ColumnType,
    pub nullable: bool,
}

/// Named so storage errors can be traced back to the violated rule.
#[derive(Clone, Copy, Debug)]
pub struct UniqueDef {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

#[derive(Clone, Copy, Debug)]
pub struct ForeignKeyDef {
    pub name: &'static str,
    pub column: &'static str,
    pub to_table: &'static str,
    pub to_column: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct IndexDef {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

#[derive(Clone, Copy, Debug)]
pub struct TableDef {
    pub name: &'static str,
    pub primary_key: &'static str,
    pub columns: &'static [ColumnDef],
    pub uniques: &'static [UniqueDef],
    pub foreign_keys: &'static [ForeignKeyDef],
    pub indexes: &'static [IndexDef],
}

impl ColumnDef {
    /// Character limit for VARCHAR columns.
    pub fn max_length(&self) -> Option<usize> {
        match self.type_ {
            ColumnType::Varchar(n) => Some(n as usize),
            _ => None,
        }
    }
}

impl TableDef {
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }
}

const fn col(name: &'static str, type_: ColumnType, nullable: bool) -> ColumnDef {
    ColumnDef {
        name,
        type_,
        nullable,
    }
}

const fn id() -> ColumnDef {
    col("id", ColumnType::Serial, false)
}

pub const USER_EMAIL_KEY: &str = "user_email_key";
pub const FAVORITE_USER_FKEY: &str = "favorite_user_id_fkey";
pub const FAVORITE_CHARACTER_FKEY: &str = "favorite_character_id_fkey";
pub const FAVORITE_PLANET_FKEY: &str = "favorite_planet_id_fkey";

pub const USER: TableDef = TableDef {
    name: "user",
    primary_key: "id",
    columns: &[
        id(),
        col("email", ColumnType::Varchar(120), false),
        // Sized for an Argon2id PHC string.
        col("password", ColumnType::Varchar(255), false),
        col("is_active", ColumnType::Boolean, true),
    ],
    uniques: &[UniqueDef {
        name: USER_EMAIL_KEY,
        columns: &["email"],
    }],
    foreign_keys: &[],
    indexes: &[],
};

pub const CHARACTER: TableDef = TableDef {
    name: "character",
    primary_key: "id",
    columns: &[
        id(),
        col("name", ColumnType::Varchar(120), false),
        col("gender", ColumnType::Varchar(20), true),
        col("birth_year", ColumnType::Varchar(20), true),
        col("eye_color", ColumnType::Varchar(20), true),
    ],
    uniques: &[],
    foreign_keys: &[],
    indexes: &[],
};

pub const PLANET: TableDef = TableDef {
    name: "planet",
    primary_key: "id",
    columns: &[
        id(),
        col("name", ColumnType::Varchar(120), false),
        col("population", ColumnType::Varchar(120), true),
        col("climate", ColumnType::Varchar(120), true),
        col("terrain", ColumnType::Varchar(120), true),
    ],
    uniques: &[],
    foreign_keys: &[],
    indexes: &[],
};

pub const FAVORITE: TableDef = TableDef {
    name: "favorite",
    primary_key: "id",
    columns: &[
        id(),
        col("user_id", ColumnType::Integer, false),
        col("character_id", ColumnType::Integer, true),
        col("planet_id", ColumnType::Integer, true),
    ],
    uniques: &[],
    foreign_keys: &[
        ForeignKeyDef {
            name: FAVORITE_CHARACTER_FKEY,
            column: "character_id",
            to_table: "character",
            to_column: "id",
        },
        ForeignKeyDef {
            name: FAVORITE_PLANET_FKEY,
            column: "planet_id",
            to_table: "planet",
            to_column: "id",
        },
        ForeignKeyDef {
            name: FAVORITE_USER_FKEY,
            column: "user_id",
            to_table: "user",
            to_column: "id",
        },
    ],
    indexes: &[IndexDef {
        name: "favorite_user_id_idx",
        columns: &["user_id"],
    }],
};

/// All tables in creation order.
pub const TABLES: &[TableDef] = &[USER, CHARACTER, PLANET, FAVORITE];

/// Quote identifier for PostgreSQL. Needed for `user`, which is reserved.
pub(crate) fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn type_str(ty: ColumnType) -> String {
    match ty {
        ColumnType::Serial => "SERIAL".to_string(),
        ColumnType::Integer => "INTEGER".to_string(),
        ColumnType::Boolean => "BOOLEAN".to_string(),
        ColumnType::Varchar(n) => format!("VARCHAR({})", n),
    }
}

pub fn create_table_sql(table: &TableDef) -> String {
    let mut col_defs: Vec<String> = Vec::new();
    for c in table.columns {
        let mut def = format!("{} {}", quote(c.name), type_str(c.type_));
        if !c.nullable {
            def.push_str(" NOT NULL");
        }
        col_defs.push(def);
    }
    col_defs.push(format!("PRIMARY KEY ({})", quote(table.primary_key)));
    for u in table.uniques {
        let cols: Vec<String> = u.columns.iter().map(|c| quote(c)).collect();
        col_defs.push(format!("CONSTRAINT {} UNIQUE ({})", quote(u.name), cols.join(", ")));
    }
    for fk in table.foreign_keys {
        col_defs.push(format!(
            "CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
            quote(fk.name),
            quote(fk.column),
            quote(fk.to_table),
            quote(fk.to_column)
        ));
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
        quote(table.name),
        col_defs.join(",\n  ")
    )
}

fn create_index_sql(table: &TableDef, idx: &IndexDef) -> String {
    let cols: Vec<String> = idx.columns.iter().map(|c| quote(c)).collect();
    format!(
        "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
        quote(idx.name),
        quote(table.name),
        cols.join(", ")
    )
}

/// Every statement `apply_migrations` runs, in order.
pub fn upgrade_statements() -> Vec<String> {
    let mut out = Vec::new();
    for t in TABLES {
        out.push(create_table_sql(t));
    }
    for t in TABLES {
        for idx in t.indexes {
            out.push(create_index_sql(t, idx));
        }
    }
    out
}

/// Drop statements in reverse dependency order.
pub fn downgrade_statements() -> Vec<String> {
    TABLES
        .iter()
        .rev()
        .map(|t| format!("DROP TABLE IF EXISTS {}", quote(t.name)))
        .collect()
}

/// VARCHAR columns narrower in the live schema than declared here, as ALTER statements.
/// `existing` holds `(table, column, character_maximum_length)` rows.
pub fn widen_statements(existing: &[(String, String, Option<i32>)]) -> Vec<String> {
    let mut out = Vec::new();
    for (table, column, current) in existing {
        let Some(def) = TABLES.iter().find(|t| t.name == table.as_str()).and_then(|t| t.column(column)) else {
            continue;
        };
        let ColumnType::Varchar(want) = def.type_ else {
            continue;
        };
        match current {
            Some(n) if i64::from(*n) < i64::from(want) => out.push(format!(
                "ALTER TABLE {} ALTER COLUMN {} TYPE {}",
                quote(table),
                quote(column),
                type_str(def.type_)
            )),
            _ => {}
        }
    }
    out
}

/// Create all tables and indexes, then widen short VARCHAR columns. Idempotent.
/// Runs in one transaction.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    for sql in upgrade_statements() {
        tracing::debug!(sql = %sql, "migration");
        sqlx::query(&sql).execute(&mut *tx).await?;
    }
    let existing: Vec<(String, String, Option<i32>)> = sqlx::query_as(
        "SELECT table_name::text, column_name::text, character_maximum_length::int4
         FROM information_schema.columns
         WHERE table_schema = current_schema() AND data_type = 'character varying'",
    )
    .fetch_all(&mut *tx)
    .await?;
    for sql in widen_statements(&existing) {
        tracing::warn!(sql = %sql, "widening column from an older schema");
        sqlx::query(&sql).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    tracing::info!(tables = TABLES.len(), "schema up to date");
    Ok(())
}

/// Drop all tables. Data is lost.
pub async fn revert_migrations(pool: &PgPool) -> Result<(), AppError> {
    run_all(pool, &downgrade_statements()).await?;
    tracing::warn!("schema dropped");
    Ok(())
}

async fn run_all(pool: &PgPool, statements: &[String]) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    for sql in statements {
        tracing::debug!(sql = %sql, "migration");
        sqlx::query(sql).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_table_is_quoted() {
        let sql = create_table_sql(&USER);
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS \"user\" ("));
        assert!(sql.contains("\"email\" VARCHAR(120) NOT NULL,"));
        assert!(sql.contains("\"is_active\" BOOLEAN,"));
        assert!(sql.contains("CONSTRAINT \"user_email_key\" UNIQUE (\"email\")"));
    }

    #[test]
    fn favorite_references_all_three_tables() {
        let sql = create_table_sql(&FAVORITE);
        assert!(sql.contains("\"user_id\" INTEGER NOT NULL"));
        assert!(sql.contains("\"planet_id\" INTEGER,"));
        assert!(sql.contains(
            "CONSTRAINT \"favorite_user_id_fkey\" FOREIGN KEY (\"user_id\") REFERENCES \"user\" (\"id\")"
        ));
        assert!(sql.contains(
            "CONSTRAINT \"favorite_character_id_fkey\" FOREIGN KEY (\"character_id\") REFERENCES \"character\" (\"id\")"
        ));
        assert!(sql.contains(
            "CONSTRAINT \"favorite_planet_id_fkey\" FOREIGN KEY (\"planet_id\") REFERENCES \"planet\" (\"id\")"
        ));
        assert!(sql.ends_with(")\n)"));
    }

    #[test]
    fn upgrade_creates_referenced_tables_first() {
        let stmts = upgrade_statements();
        let pos = |name: &str| {
            let prefix = format!("CREATE TABLE IF NOT EXISTS {}", quote(name));
            stmts.iter().position(|s| s.starts_with(&prefix)).unwrap()
        };
        assert!(pos("favorite") > pos("user"));
        assert!(pos("favorite") > pos("character"));
        assert!(pos("favorite") > pos("planet"));
        assert_eq!(
            stmts.last().map(String::as_str),
            Some("CREATE INDEX IF NOT EXISTS \"favorite_user_id_idx\" ON \"favorite\" (\"user_id\")")
        );
    }

    #[test]
    fn downgrade_drops_favorite_first() {
        let stmts = downgrade_statements();
        assert_eq!(stmts.first().map(String::as_str), Some("DROP TABLE IF EXISTS \"favorite\""));
        assert_eq!(stmts.len(), TABLES.len());
    }

    #[test]
    fn short_password_column_is_widened() {
        let existing = vec![
            ("user".to_string(), "password".to_string(), Some(80)),
            ("user".to_string(), "email".to_string(), Some(120)),
            ("planet".to_string(), "climate".to_string(), Some(200)),
            ("unrelated".to_string(), "password".to_string(), Some(10)),
        ];
        assert_eq!(
            widen_statements(&existing),
            vec!["ALTER TABLE \"user\" ALTER COLUMN \"password\" TYPE VARCHAR(255)".to_string()]
        );
    }

    #[test]
    fn unbounded_or_unknown_columns_are_left_alone() {
        let existing = vec![
            ("user".to_string(), "password".to_string(), None),
            ("favorite".to_string(), "user_id".to_string(), Some(4)),
        ];
        assert!(widen_statements(&existing).is_empty());
    }

    #[test]
    fn required_columns_match_storage_limits() {
        assert_eq!(CHARACTER.column("gender").map(|c| c.type_), Some(ColumnType::Varchar(20)));
        assert!(!PLANET.column("name").map(|c| c.nullable).unwrap_or(true));
        assert!(USER.column("missing").is_none());
    }
}
