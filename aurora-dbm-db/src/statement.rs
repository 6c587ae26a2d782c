//! Parameterized write statements and the batch a save flushes.

use std::fmt;

use rusqlite::types::Value;

use crate::rows::TableRow;

/// One SQL statement with its bound parameter values.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlStatement {
    pub sql: String,
    pub params: Vec<Value>,
    /// Row the statement must touch. Set for updates: a batch fails if
    /// this row no longer exists.
    pub target: Option<RowTarget>,
}

/// Table and id an UPDATE is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowTarget {
    pub table: &'static str,
    pub id: i64,
}

impl fmt::Display for SqlStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} params)", self.sql, self.params.len())
    }
}

/// `UPDATE <table> SET <col> = ?1, ... WHERE Id = ?N` for one row.
pub fn update_statement<R: TableRow>(row: &R) -> SqlStatement {
    let assignments: Vec<String> = R::COLUMNS
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{column} = ?{}", i + 1))
        .collect();
    let mut params = row.values();
    params.push(Value::Integer(row.id()));
    SqlStatement {
        sql: format!(
            "UPDATE {} SET {} WHERE Id = ?{}",
            R::TABLE,
            assignments.join(", "),
            params.len()
        ),
        params,
        target: Some(RowTarget {
            table: R::TABLE,
            id: row.id(),
        }),
    }
}

/// `INSERT INTO <table> (<cols>) VALUES (?1, ...)`. The id is left to the store.
pub fn insert_statement<R: TableRow>(row: &R) -> SqlStatement {
    let placeholders: Vec<String> = (1..=R::COLUMNS.len()).map(|i| format!("?{i}")).collect();
    SqlStatement {
        sql: format!(
            "INSERT INTO {} ({}) VALUES ({})",
            R::TABLE,
            R::COLUMNS.join(", "),
            placeholders.join(", ")
        ),
        params: row.values(),
        target: None,
    }
}

/// `DELETE FROM <table> WHERE Id = ?1`.
pub fn delete_statement(table: &str, id: i64) -> SqlStatement {
    SqlStatement {
        sql: format!("DELETE FROM {table} WHERE Id = ?1"),
        params: vec![Value::Integer(id)],
        target: None,
    }
}

/// Statements executed together in one transaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlBatch {
    statements: Vec<SqlStatement>,
}

impl SqlBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, statement: SqlStatement) {
        self.statements.push(statement);
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SqlStatement> {
        self.statements.iter()
    }
}

impl<'a> IntoIterator for &'a SqlBatch {
    type Item = &'a SqlStatement;
    type IntoIter = std::slice::Iter<'a, SqlStatement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurora_dbm_catalog::{ProfileRow, UserFavoriteRow};

    #[test]
    fn update_binds_id_last() {
        let row = ProfileRow {
            id: 9,
            gametag: "it's me".to_string(),
            xuid: "E000".to_string(),
        };
        let stmt = update_statement(&row);
        assert_eq!(
            stmt.sql,
            "UPDATE Profiles SET Gametag = ?1, Xuid = ?2 WHERE Id = ?3"
        );
        assert_eq!(
            stmt.params,
            vec![
                Value::Text("it's me".to_string()),
                Value::Text("E000".to_string()),
                Value::Integer(9),
            ]
        );
        assert_eq!(
            stmt.target,
            Some(RowTarget {
                table: "Profiles",
                id: 9
            })
        );
    }

    #[test]
    fn insert_omits_id() {
        let row = UserFavoriteRow {
            id: 77,
            content_id: 3,
            profile_id: "P".to_string(),
        };
        let stmt = insert_statement(&row);
        assert_eq!(
            stmt.sql,
            "INSERT INTO UserFavorites (ContentId, ProfileId) VALUES (?1, ?2)"
        );
        assert_eq!(stmt.params.len(), 2);
        assert_eq!(stmt.target, None);
    }

    #[test]
    fn delete_targets_one_id() {
        let stmt = delete_statement("QuickViews", 2);
        assert_eq!(stmt.sql, "DELETE FROM QuickViews WHERE Id = ?1");
        assert_eq!(stmt.params, vec![Value::Integer(2)]);
        assert_eq!(stmt.target, None);
    }

    #[test]
    fn batch_preserves_order() {
        let mut batch = SqlBatch::new();
        assert!(batch.is_empty());
        batch.push(delete_statement("A", 1));
        batch.push(delete_statement("B", 2));
        let tables: Vec<&str> = batch.iter().map(|s| s.sql.as_str()).collect();
        assert_eq!(
            tables,
            ["DELETE FROM A WHERE Id = ?1", "DELETE FROM B WHERE Id = ?1"]
        );
        assert_eq!(batch.len(), 2);
    }
}
