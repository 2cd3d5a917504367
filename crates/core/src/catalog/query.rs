//! Parameterized query builder for catalog searches.

use super::{FilterField, SearchCriteria};

/// SQL function folding case the same way as `str::to_lowercase`.
///
/// SQLite's built-in `LOWER` only folds ASCII.
pub(crate) const UNICODE_LOWER: &str = "unicode_lower";

/// Columns selected for every record query, in `row_to_record` order.
pub(crate) const RECORD_COLUMNS: &str =
    "id, title, developer, publisher, genre, platform, release_date, artwork_url";

/// A search query: SQL text plus the values bound to its placeholders.
///
/// Each active criterion adds one `unicode_lower(column) LIKE ?` clause. Values are
/// only ever bound, never spliced into the SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    sql: String,
    params: Vec<String>,
}

impl CatalogQuery {
    pub fn from_criteria(criteria: &SearchCriteria) -> Self {
        let mut clauses: Vec<String> = Vec::new();
        let mut params = Vec::new();

        for (field, value) in criteria.active() {
            clauses.push(format!(
                "{}({}) LIKE ? ESCAPE '\\'",
                UNICODE_LOWER,
                field.column()
            ));
            params.push(format!("%{}%", escape_like(&value.to_lowercase())));
        }

        let mut sql = format!("SELECT {} FROM videogames", RECORD_COLUMNS);
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY id");

        Self { sql, params }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Fields constrained by this query, for logging.
    pub fn constrained_fields(criteria: &SearchCriteria) -> Vec<&'static str> {
        criteria
            .active()
            .map(|(field, _)| FilterField::param_name(field))
            .collect()
    }
}

/// Escape LIKE wildcards so they match literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
