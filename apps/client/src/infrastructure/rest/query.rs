use std::fmt::Display;

/// Filter and shaping options for one table read
///
/// Renders to PostgREST query parameters, e.g.
/// `select=*&user_id=eq.<id>&order=created_at.desc`.
///
/// # Example
/// ```
/// use callsight_client::infrastructure::rest::Query;
///
/// let query = Query::from("recordings")
///     .select("*")
///     .eq("user_id", "42")
///     .order("created_at", false);
///
/// assert_eq!(query.table(), "recordings");
/// assert_eq!(query.to_query_string(), "select=*&user_id=eq.42&order=created_at.desc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    table: String,
    params: Vec<(String, String)>,
}

impl Query {
    pub fn from(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            params: Vec::new(),
        }
    }

    /// Columns to return; embedded relations use `relation(*)` syntax
    pub fn select(self, columns: &str) -> Self {
        self.param("select", columns.to_string())
    }

    pub fn eq(self, column: &str, value: impl Display) -> Self {
        self.param(column, format!("eq.{}", value))
    }

    pub fn gte(self, column: &str, value: impl Display) -> Self {
        self.param(column, format!("gte.{}", value))
    }

    pub fn lte(self, column: &str, value: impl Display) -> Self {
        self.param(column, format!("lte.{}", value))
    }

    pub fn order(self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.param("order", format!("{}.{}", column, direction))
    }

    /// Replaces any earlier limit
    pub fn limit(mut self, count: usize) -> Self {
        self.params.retain(|(key, _)| key != "limit");
        self.param("limit", count.to_string())
    }

    /// Conflict target for upserts
    pub fn on_conflict(self, columns: &str) -> Self {
        self.param("on_conflict", columns.to_string())
    }

    fn param(mut self, key: &str, value: String) -> Self {
        self.params.push((key.to_string(), value));
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Unencoded form, for logs
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_filters() {
        let query = Query::from("metrics_aggregates")
            .eq("user_id", "u1")
            .gte("date", "2025-01-01")
            .lte("date", "2025-01-31")
            .order("date", true);

        assert_eq!(
            query.to_query_string(),
            "user_id=eq.u1&date=gte.2025-01-01&date=lte.2025-01-31&order=date.asc"
        );
    }

    #[test]
    fn limit_replaces_previous() {
        let query = Query::from("user_profiles").limit(10).limit(2);
        assert_eq!(query.params(), &[("limit".to_string(), "2".to_string())]);
    }

    #[test]
    fn embedded_select() {
        let query = Query::from("leads").select("*,lead_groups(*)");
        assert_eq!(query.to_query_string(), "select=*,lead_groups(*)");
    }
}
