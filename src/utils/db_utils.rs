use chrono::NaiveDate;
use sqlx::Sqlite;
use sqlx::query::QueryAs;
use sqlx::sqlite::SqliteArguments;

/// ===============================
/// SQL bindable value enum
/// ===============================
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    I64(i64),
    Date(NaiveDate),
}

/// ===============================
/// Dynamic WHERE clause builder
/// ===============================
/// Each pushed predicate carries exactly one `?` placeholder, bound in order.
#[derive(Debug, Default)]
pub struct Conditions {
    clauses: Vec<&'static str>,
    values: Vec<SqlValue>,
}

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, clause: &'static str, value: SqlValue) {
        self.clauses.push(clause);
        self.values.push(value);
    }

    /// Pushes the predicate only when a value is present.
    pub fn push_opt<T: Into<SqlValue>>(&mut self, clause: &'static str, value: Option<T>) {
        if let Some(v) = value {
            self.push(clause, v.into());
        }
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    pub fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.clauses.join(" AND "))
        }
    }

    pub fn bind<'q, O>(
        self,
        mut query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    ) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
        for value in self.values {
            query = match value {
                SqlValue::I64(v) => query.bind(v),
                SqlValue::Date(v) => query.bind(v),
            };
        }
        query
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::I64(v)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(v: NaiveDate) -> Self {
        SqlValue::Date(v)
    }
}

/// `?, ?, ?` for an IN list of `count` items.
pub fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_conditions_render_no_where() {
        assert_eq!(Conditions::new().where_clause(), "");
    }

    #[test]
    fn conditions_are_anded_in_push_order() {
        let mut c = Conditions::new();
        c.push_opt("a.site_id = ?", Some(4_i64));
        c.push_opt::<i64>("a.employee_id = ?", None);
        c.push_opt("a.date >= ?", NaiveDate::from_ymd_opt(2024, 1, 1));

        assert_eq!(c.where_clause(), "WHERE a.site_id = ? AND a.date >= ?");
        assert_eq!(c.values().len(), 2);
        assert_eq!(c.values()[0], SqlValue::I64(4));
    }

    #[test]
    fn placeholders_match_count() {
        assert_eq!(placeholders(3), "?, ?, ?");
        assert_eq!(placeholders(1), "?");
    }
}
