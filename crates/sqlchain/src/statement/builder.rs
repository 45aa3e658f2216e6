use super::{BuilderState, DropBehavior, JoinKind, StatementKind};
use crate::condition::Condition;
use crate::error::{StmtError, StmtResult};
use crate::ident::Ident;
use crate::value::Value;

/// Kind-specific head of the statement, rendered before any clauses.
#[derive(Debug, Clone)]
enum Head {
    Select,
    Create { definitions: String },
    Insert { columns: String, values: String },
    Drop,
    Delete,
}

impl Head {
    fn kind(&self) -> StatementKind {
        match self {
            Head::Select => StatementKind::Select,
            Head::Create { .. } => StatementKind::Create,
            Head::Insert { .. } => StatementKind::Insert,
            Head::Drop => StatementKind::Drop,
            Head::Delete => StatementKind::Delete,
        }
    }
}

/// A stateful, chainable SQL statement builder.
///
/// Every method validates its input before touching the builder, so a failed
/// call leaves previous calls intact. Clauses (WHERE, joins, `raw`, `exists`)
/// are emitted in call order after the statement head.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct StatementBuilder {
    table: Option<Ident>,
    /// `None` selects `*`.
    columns: Option<Vec<Ident>>,
    clauses: Vec<String>,
    head: Option<Head>,
    has_where: bool,
    has_join: bool,
    /// RESTRICT / CASCADE already appended to `clauses`.
    drop_behavior: Option<DropBehavior>,
    state: BuilderState,
}

impl StatementBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(&self) -> Option<StatementKind> {
        self.head.as_ref().map(Head::kind)
    }

    pub fn state(&self) -> BuilderState {
        self.state
    }

    pub fn table(&self) -> Option<&Ident> {
        self.table.as_ref()
    }

    /// Selected columns, or `None` for `*`.
    pub fn selected_columns(&self) -> Option<&[Ident]> {
        self.columns.as_deref()
    }

    pub fn has_where(&self) -> bool {
        self.has_where
    }

    // ==================== SELECT ====================

    /// Select an explicit list of columns.
    ///
    /// An empty list is rejected; use [`select_all`](Self::select_all) for `*`.
    pub fn select<I, C>(&mut self, columns: I) -> StmtResult<&mut Self>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        self.ensure_select("select")?;
        let columns = columns
            .into_iter()
            .map(|c| Ident::parse_as("column name", c.as_ref()))
            .collect::<StmtResult<Vec<_>>>()?;
        if columns.is_empty() {
            return Err(StmtError::invalid_argument(
                "select() needs at least one column; use select_all() for *",
            ));
        }

        self.start(Head::Select);
        self.columns = Some(columns);
        Ok(self)
    }

    /// Select every column (`*`). This is also the default.
    pub fn select_all(&mut self) -> StmtResult<&mut Self> {
        self.ensure_select("select_all")?;
        self.start(Head::Select);
        self.columns = None;
        Ok(self)
    }

    /// Set the table a SELECT reads from.
    ///
    /// Once a join has been added the table can no longer change, since the
    /// join's ON clause already names it.
    pub fn from(&mut self, table: &str) -> StmtResult<&mut Self> {
        self.ensure_select("from")?;
        let table = Ident::parse_as("table name", table)?;
        if let Some(current) = &self.table
            && self.has_join
            && *current != table
        {
            return Err(StmtError::invalid_argument(format!(
                "cannot change table from {current} to {table} after a join on {current}"
            )));
        }
        self.start(Head::Select);
        self.table = Some(table);
        Ok(self)
    }

    // ==================== DDL / DML ====================

    /// `CREATE TABLE <table> (<column> <type>, ...)`.
    ///
    /// Column types are emitted verbatim (`VARCHAR(255) NOT NULL` is fine) and
    /// must come from trusted code.
    pub fn create<I, C, T>(&mut self, table: &str, columns: I) -> StmtResult<&mut Self>
    where
        I: IntoIterator<Item = (C, T)>,
        C: AsRef<str>,
        T: AsRef<str>,
    {
        self.ensure_unstarted(StatementKind::Create)?;
        let table = Ident::parse_as("table name", table)?;

        let mut definitions = String::new();
        for (i, (column, ty)) in columns.into_iter().enumerate() {
            let column = Ident::parse_as("column name", column.as_ref())?;
            let ty = ty.as_ref().trim();
            if ty.is_empty() {
                return Err(StmtError::invalid_argument(format!(
                    "column {column} has no type"
                )));
            }
            if i > 0 {
                definitions.push_str(", ");
            }
            column.write_sql(&mut definitions);
            definitions.push(' ');
            definitions.push_str(ty);
        }
        if definitions.is_empty() {
            return Err(StmtError::invalid_argument(format!(
                "create({table}) needs at least one column definition"
            )));
        }

        self.begin(Head::Create { definitions }, table);
        Ok(self)
    }

    /// `INSERT INTO <table> (<columns>) VALUES (<literals>)`.
    ///
    /// ```ignore
    /// stmt.insert("users", [("id", Value::from(1)), ("name", Value::from("x"))])?;
    /// ```
    pub fn insert<I, C, V>(&mut self, table: &str, values: I) -> StmtResult<&mut Self>
    where
        I: IntoIterator<Item = (C, V)>,
        C: AsRef<str>,
        V: Into<Value>,
    {
        self.ensure_unstarted(StatementKind::Insert)?;
        let table = Ident::parse_as("table name", table)?;

        let mut columns = String::new();
        let mut literals = String::new();
        for (i, (column, value)) in values.into_iter().enumerate() {
            let column = Ident::parse_as("column name", column.as_ref())?;
            if i > 0 {
                columns.push_str(", ");
                literals.push_str(", ");
            }
            column.write_sql(&mut columns);
            let value: Value = value.into();
            value.write_literal(&mut literals)?;
        }
        if columns.is_empty() {
            return Err(StmtError::invalid_argument(format!(
                "insert({table}) needs at least one value"
            )));
        }

        self.begin(
            Head::Insert {
                columns,
                values: literals,
            },
            table,
        );
        Ok(self)
    }

    /// [`insert`](Self::insert) taking a JSON object whose members are scalars.
    ///
    /// Member order is preserved.
    pub fn insert_json(&mut self, table: &str, row: serde_json::Value) -> StmtResult<&mut Self> {
        let serde_json::Value::Object(members) = row else {
            return Err(StmtError::invalid_argument(
                "insert_json() expects a JSON object",
            ));
        };
        let mut values = Vec::with_capacity(members.len());
        for (column, v) in members {
            let value = Value::try_from(v).map_err(|e| match e {
                StmtError::InvalidArgument(msg) => {
                    StmtError::invalid_argument(format!("column {column}: {msg}"))
                }
                other => other,
            })?;
            values.push((column, value));
        }
        self.insert(table, values)
    }

    /// `DROP TABLE <table>`.
    pub fn drop(&mut self, table: &str) -> StmtResult<&mut Self> {
        self.ensure_unstarted(StatementKind::Drop)?;
        let table = Ident::parse_as("table name", table)?;
        self.begin(Head::Drop, table);
        Ok(self)
    }

    /// `DELETE FROM <table>`. Usually followed by [`and_where`](Self::and_where).
    pub fn delete(&mut self, table: &str) -> StmtResult<&mut Self> {
        self.ensure_unstarted(StatementKind::Delete)?;
        let table = Ident::parse_as("table name", table)?;
        self.begin(Head::Delete, table);
        Ok(self)
    }

    /// Append ` RESTRICT`. Only valid once, on a DROP statement.
    pub fn restrict(&mut self) -> StmtResult<&mut Self> {
        self.push_drop_behavior(DropBehavior::Restrict)
    }

    /// Append ` CASCADE`. Only valid once, on a DROP statement.
    pub fn cascade(&mut self) -> StmtResult<&mut Self> {
        self.push_drop_behavior(DropBehavior::Cascade)
    }

    fn push_drop_behavior(&mut self, behavior: DropBehavior) -> StmtResult<&mut Self> {
        if !matches!(self.head, Some(Head::Drop)) {
            return Err(StmtError::invalid_argument(format!(
                "{} only applies to a DROP statement",
                behavior.keyword()
            )));
        }
        if let Some(existing) = self.drop_behavior {
            return Err(StmtError::invalid_argument(format!(
                "DROP already has {}",
                existing.keyword()
            )));
        }

        self.touch();
        self.clauses.push(format!(" {}", behavior.keyword()));
        self.drop_behavior = Some(behavior);
        Ok(self)
    }

    // ==================== Modifiers ====================

    /// Add conditions to the WHERE clause.
    ///
    /// The first call opens the clause with ` WHERE `; every later call
    /// continues it with ` AND `. Pairs within one call are also joined by
    /// ` AND ` rather than a comma, which would not be valid SQL.
    pub fn and_where<I, C, D>(&mut self, conditions: I) -> StmtResult<&mut Self>
    where
        I: IntoIterator<Item = (C, D)>,
        C: AsRef<str>,
        D: Into<Condition>,
    {
        match self.kind() {
            Some(StatementKind::Select | StatementKind::Delete) => {}
            Some(kind) => {
                return Err(StmtError::invalid_argument(format!(
                    "WHERE does not apply to a {kind} statement"
                )));
            }
            None => {
                return Err(StmtError::invalid_argument(
                    "WHERE needs a SELECT or DELETE statement first",
                ));
            }
        }

        let mut fragment = String::from(if self.has_where { " AND " } else { " WHERE " });
        let prefix_len = fragment.len();
        for (i, (column, condition)) in conditions.into_iter().enumerate() {
            let column = Ident::parse_as("column name", column.as_ref())?;
            if i > 0 {
                fragment.push_str(" AND ");
            }
            let condition: Condition = condition.into();
            condition.write_sql(&column, &mut fragment)?;
        }
        if fragment.len() == prefix_len {
            return Err(StmtError::invalid_argument(
                "WHERE needs at least one condition",
            ));
        }

        self.touch();
        self.clauses.push(fragment);
        self.has_where = true;
        Ok(self)
    }

    /// `INNER JOIN <table> ON <this>.<left> = <table>.<right> [AND ...]`
    pub fn join<I, L, R>(&mut self, table: &str, on: I) -> StmtResult<&mut Self>
    where
        I: IntoIterator<Item = (L, R)>,
        L: AsRef<str>,
        R: AsRef<str>,
    {
        self.join_with(JoinKind::Inner, table, on)
    }

    pub fn left_join<I, L, R>(&mut self, table: &str, on: I) -> StmtResult<&mut Self>
    where
        I: IntoIterator<Item = (L, R)>,
        L: AsRef<str>,
        R: AsRef<str>,
    {
        self.join_with(JoinKind::Left, table, on)
    }

    pub fn right_join<I, L, R>(&mut self, table: &str, on: I) -> StmtResult<&mut Self>
    where
        I: IntoIterator<Item = (L, R)>,
        L: AsRef<str>,
        R: AsRef<str>,
    {
        self.join_with(JoinKind::Right, table, on)
    }

    /// `FULL OUTER JOIN`; the `OUTER FULL JOIN` ordering is rejected by PostgreSQL.
    pub fn outer_join<I, L, R>(&mut self, table: &str, on: I) -> StmtResult<&mut Self>
    where
        I: IntoIterator<Item = (L, R)>,
        L: AsRef<str>,
        R: AsRef<str>,
    {
        self.join_with(JoinKind::Outer, table, on)
    }

    /// Join `table`, pairing columns of the current table (left) with columns
    /// of the joined table (right).
    pub fn join_with<I, L, R>(&mut self, kind: JoinKind, table: &str, on: I) -> StmtResult<&mut Self>
    where
        I: IntoIterator<Item = (L, R)>,
        L: AsRef<str>,
        R: AsRef<str>,
    {
        let joined = Ident::parse_as("join table name", table)?;
        let Some(this) = &self.table else {
            return Err(StmtError::invalid_argument(format!(
                "cannot join {joined} before a table is set"
            )));
        };

        let mut fragment = format!(" {} {joined} ON ", kind.keyword());
        let prefix_len = fragment.len();
        for (i, (left, right)) in on.into_iter().enumerate() {
            let left = Ident::parse_as("column name", left.as_ref())?;
            let right = Ident::parse_as("column name", right.as_ref())?;
            if i > 0 {
                fragment.push_str(" AND ");
            }
            this.write_sql(&mut fragment);
            fragment.push('.');
            left.write_sql(&mut fragment);
            fragment.push_str(" = ");
            joined.write_sql(&mut fragment);
            fragment.push('.');
            right.write_sql(&mut fragment);
        }
        if fragment.len() == prefix_len {
            return Err(StmtError::invalid_argument(format!(
                "join on {joined} needs at least one column pair"
            )));
        }

        self.touch();
        self.clauses.push(fragment);
        self.has_join = true;
        Ok(self)
    }

    /// Append ` EXISTS`.
    pub fn exists(&mut self) -> &mut Self {
        self.touch();
        self.clauses.push(" EXISTS".to_string());
        self
    }

    /// Append a fragment verbatim.
    ///
    /// **Warning**: no escaping or validation happens here. Only pass trusted SQL.
    pub fn raw(&mut self, fragment: &str) -> &mut Self {
        if fragment.is_empty() {
            return self;
        }
        self.touch();
        self.clauses.push(fragment.to_string());
        self
    }

    // ==================== Finalization ====================

    /// Render the statement without finalizing the builder.
    pub fn to_sql(&self) -> StmtResult<String> {
        let Some(head) = &self.head else {
            return Err(StmtError::invalid_argument("builder has no statement"));
        };
        let Some(table) = &self.table else {
            return Err(StmtError::invalid_argument(
                "expected table name but none was given; call from()",
            ));
        };

        let mut sql = String::new();
        match head {
            Head::Select => {
                sql.push_str("SELECT ");
                match &self.columns {
                    None => sql.push('*'),
                    Some(columns) => {
                        for (i, column) in columns.iter().enumerate() {
                            if i > 0 {
                                sql.push_str(", ");
                            }
                            column.write_sql(&mut sql);
                        }
                    }
                }
                sql.push_str(" FROM ");
                table.write_sql(&mut sql);
            }
            Head::Create { definitions } => {
                sql.push_str("CREATE TABLE ");
                table.write_sql(&mut sql);
                sql.push_str(" (");
                sql.push_str(definitions);
                sql.push(')');
            }
            Head::Insert { columns, values } => {
                sql.push_str("INSERT INTO ");
                table.write_sql(&mut sql);
                sql.push_str(" (");
                sql.push_str(columns);
                sql.push_str(") VALUES (");
                sql.push_str(values);
                sql.push(')');
            }
            Head::Drop => {
                sql.push_str("DROP TABLE ");
                table.write_sql(&mut sql);
            }
            Head::Delete => {
                sql.push_str("DELETE FROM ");
                table.write_sql(&mut sql);
            }
        }
        for clause in &self.clauses {
            sql.push_str(clause);
        }
        Ok(sql)
    }

    /// Finalize and return the statement text.
    ///
    /// State is kept, so calling `build()` again yields the same text.
    pub fn build(&mut self) -> StmtResult<String> {
        let sql = self.to_sql()?;
        self.state = BuilderState::Finalized;
        Ok(sql)
    }

    // ==================== State transitions ====================

    fn ensure_select(&self, op: &str) -> StmtResult<()> {
        match self.kind() {
            None | Some(StatementKind::Select) => Ok(()),
            Some(kind) => Err(StmtError::invalid_argument(format!(
                "{op}() does not apply to a {kind} statement"
            ))),
        }
    }

    fn ensure_unstarted(&self, next: StatementKind) -> StmtResult<()> {
        match self.kind() {
            None => Ok(()),
            Some(current) => Err(StmtError::invalid_argument(format!(
                "cannot start a {next} statement: builder already holds a {current} statement"
            ))),
        }
    }

    fn start(&mut self, head: Head) {
        self.touch();
        if self.head.is_none() {
            self.head = Some(head);
        }
        if self.state == BuilderState::Empty {
            self.state = BuilderState::Assembling;
        }
    }

    fn begin(&mut self, head: Head, table: Ident) {
        self.start(head);
        self.table = Some(table);
    }

    fn touch(&self) {
        if self.state == BuilderState::Finalized {
            tracing::warn!(
                target: "sqlchain.builder",
                kind = ?self.kind(),
                "statement builder mutated after build()"
            );
        }
    }
}
