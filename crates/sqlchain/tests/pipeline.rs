//! End-to-end: build statements through the public API and run them against an
//! in-memory backend shared by several executing statements.

use sqlchain::condition::{eq, gt, like};
use sqlchain::{Backend, ExecutingStatement, StatementBuilder, StmtError, Value, statement};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, thiserror::Error)]
#[error("backend is read-only")]
struct ReadOnly;

/// Answers each statement from a fixed table of responses and logs calls.
#[derive(Default)]
struct Scripted {
    responses: HashMap<String, Vec<Vec<String>>>,
    calls: Mutex<Vec<String>>,
}

impl Scripted {
    fn respond(mut self, sql: &str, rows: Vec<Vec<&str>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|r| r.into_iter().map(String::from).collect())
            .collect();
        self.responses.insert(sql.to_string(), rows);
        self
    }
}

impl Backend for Scripted {
    type Row = Vec<String>;
    type Error = ReadOnly;

    async fn execute(&self, statement: &str) -> Result<Vec<Vec<String>>, ReadOnly> {
        self.calls.lock().unwrap().push(statement.to_string());
        self.responses.get(statement).cloned().ok_or(ReadOnly)
    }
}

#[tokio::test]
async fn select_with_join_and_filters() -> Result<(), StmtError> {
    let sql = "SELECT users.name, orders.total FROM users \
               INNER JOIN orders ON users.id = orders.user_id \
               WHERE orders.total > 100 AND users.name LIKE 'a%'";
    let backend = Scripted::default().respond(sql, vec![vec!["ann", "120"], vec!["al", "300"]]);

    let mut builder = statement();
    builder
        .select(["users.name", "orders.total"])?
        .from("users")?
        .join("orders", [("id", "user_id")])?
        .and_where([("orders.total", gt(100))])?
        .and_where([("users.name", like("a%"))])?;

    let rows = ExecutingStatement::new(builder, &backend).run().await?;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], vec!["ann", "120"]);
    Ok(())
}

#[tokio::test]
async fn ddl_and_dml_round() -> Result<(), StmtError> {
    let create = "CREATE TABLE pets (id INT, name TEXT)";
    let insert = "INSERT INTO pets (id, name) VALUES (1, 'Rex')";
    let delete = "DELETE FROM pets WHERE name = 'Rex'";
    let drop = "DROP TABLE pets RESTRICT";
    let backend = Scripted::default()
        .respond(create, vec![])
        .respond(insert, vec![])
        .respond(delete, vec![])
        .respond(drop, vec![]);

    let mut b = statement();
    b.create("pets", [("id", "INT"), ("name", "TEXT")])?;
    ExecutingStatement::new(b, &backend).run().await?;

    let mut b = statement();
    b.insert("pets", [("id", Value::from(1)), ("name", Value::from("Rex"))])?;
    ExecutingStatement::new(b, &backend).run().await?;

    let mut b = statement();
    b.delete("pets")?.and_where([("name", eq("Rex"))])?;
    ExecutingStatement::new(b, &backend).run().await?;

    let mut b = statement();
    b.drop("pets")?.restrict()?;
    ExecutingStatement::new(b, &backend).run().await?;

    assert_eq!(
        *backend.calls.lock().unwrap(),
        vec![create, insert, delete, drop]
    );
    Ok(())
}

#[tokio::test]
async fn unknown_statement_surfaces_backend_error() {
    let backend = Scripted::default();
    let mut b = StatementBuilder::new();
    b.from("nowhere").unwrap();

    let err = ExecutingStatement::new(b, &backend).run().await.unwrap_err();
    match err {
        StmtError::Backend(cause) => assert!(cause.downcast_ref::<ReadOnly>().is_some()),
        other => panic!("expected backend error, got {other:?}"),
    }
}

#[tokio::test]
async fn statements_share_one_backend_concurrently() {
    let backend = Arc::new(
        Scripted::default()
            .respond("SELECT * FROM a", vec![vec!["1"]])
            .respond("SELECT * FROM b", vec![vec!["2"]]),
    );

    let tasks = ["a", "b"].map(|table| {
        let backend = Arc::clone(&backend);
        tokio::spawn(async move {
            let mut b = statement();
            b.from(table).unwrap();
            ExecutingStatement::new(b, &backend).run().await
        })
    });

    let mut totals = Vec::new();
    for task in tasks {
        let rows = task.await.unwrap().unwrap();
        totals.push(rows[0][0].clone());
    }
    assert_eq!(totals, vec!["1", "2"]);
    assert_eq!(backend.calls.lock().unwrap().len(), 2);
}
