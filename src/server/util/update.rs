use chrono::NaiveDateTime;
use tokio_postgres::types::ToSql;

/// Builds `UPDATE <table> SET ... WHERE id = $n` for the fields a patch carries.
///
/// `updated_at` is always the first assignment.
pub(crate) struct UpdateBuilder<'a> {
    table: &'static str,
    assignments: Vec<String>,
    params: Vec<&'a (dyn ToSql + Sync)>,
}

impl<'a> UpdateBuilder<'a> {
    pub fn new(table: &'static str, updated_at: &'a NaiveDateTime) -> Self {
        Self {
            table,
            assignments: vec!["updated_at = $1".to_string()],
            params: vec![updated_at as &(dyn ToSql + Sync)],
        }
    }

    /// add `column = $n` when the field is present
    pub fn set<T: ToSql + Sync>(mut self, column: &'static str, value: Option<&'a T>) -> Self {
        if let Some(value) = value {
            self.params.push(value);
            self.assignments.push(format!("{} = ${}", column, self.params.len()));
        }
        self
    }

    pub fn finish(mut self, id: &'a i64) -> (String, Vec<&'a (dyn ToSql + Sync)>) {
        self.params.push(id);
        let statement = format!(
            "UPDATE {} SET {} WHERE id = ${}",
            self.table,
            self.assignments.join(", "),
            self.params.len()
        );
        (statement, self.params)
    }
}
