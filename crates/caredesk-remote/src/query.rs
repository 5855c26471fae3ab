//! Read/write specifications for the hosted backend
//!
//! The backend speaks a PostgREST-style query dialect: equality filters as
//! `field=eq.value`, ordering as `order=key.direction`, relation includes
//! folded into the `select` parameter.

/// Sort direction for an ordered query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending order
    Asc,
    /// Descending order
    Desc,
}

impl Direction {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A query against one backend collection
///
/// Used whole for reads; writes (update/delete) use only the collection
/// and equality filters.
#[derive(Debug, Clone)]
pub struct Query {
    collection: String,
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Option<(String, Direction)>,
    limit: Option<u32>,
}

impl Query {
    /// Start a query against a collection
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            select: None,
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Set the projection, including any relation includes
    /// (e.g. `*,users(full_name,email)`)
    #[must_use]
    pub fn select(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }

    /// Add an equality filter
    #[must_use]
    pub fn eq(mut self, field: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push((field.into(), value.to_string()));
        self
    }

    /// Order results by a key
    #[must_use]
    pub fn order(mut self, key: impl Into<String>, direction: Direction) -> Self {
        self.order = Some((key.into(), direction));
        self
    }

    /// Order results by a key, newest first
    #[must_use]
    pub fn order_desc(self, key: impl Into<String>) -> Self {
        self.order(key, Direction::Desc)
    }

    /// Cap the number of returned rows
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The collection this query targets
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Render the full read query string
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut params = Vec::new();

        if let Some(ref select) = self.select {
            params.push(format!("select={}", urlencoding::encode(select)));
        }

        params.extend(self.filter_params());

        if let Some((ref key, direction)) = self.order {
            params.push(format!("order={key}.{}", direction.as_str()));
        }

        if let Some(limit) = self.limit {
            params.push(format!("limit={limit}"));
        }

        params.join("&")
    }

    /// Render only the predicate part, as used by update and delete
    #[must_use]
    pub fn to_filter_string(&self) -> String {
        self.filter_params().join("&")
    }

    fn filter_params(&self) -> Vec<String> {
        self.filters
            .iter()
            .map(|(field, value)| format!("{field}=eq.{}", urlencoding::encode(value)))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bare_query_is_empty() {
        let query = Query::new("users");

        assert_eq!(query.collection(), "users");
        assert_eq!(query.to_query_string(), "");
        assert_eq!(query.to_filter_string(), "");
    }

    #[test]
    fn test_select_with_relation_include() {
        let query = Query::new("subscriptions").select("*,users(full_name,email)");

        assert_eq!(
            query.to_query_string(),
            "select=%2A%2Cusers%28full_name%2Cemail%29"
        );
    }

    #[test]
    fn test_equality_filter() {
        let query = Query::new("users").eq("role", "doctor");

        assert_eq!(query.to_query_string(), "role=eq.doctor");
    }

    #[test]
    fn test_filter_value_is_encoded() {
        let query = Query::new("users").eq("full_name", "A & B");

        assert_eq!(query.to_query_string(), "full_name=eq.A%20%26%20B");
    }

    #[test]
    fn test_order_and_limit() {
        let query = Query::new("consultations")
            .order_desc("created_at")
            .limit(5);

        assert_eq!(query.to_query_string(), "order=created_at.desc&limit=5");
    }

    #[test]
    fn test_full_query_parameter_ordering() {
        let query = Query::new("consultations")
            .select("*")
            .eq("status", "scheduled")
            .order("scheduled_at", Direction::Asc)
            .limit(10);

        assert_eq!(
            query.to_query_string(),
            "select=%2A&status=eq.scheduled&order=scheduled_at.asc&limit=10"
        );
    }

    #[test]
    fn test_filter_string_excludes_read_parameters() {
        let query = Query::new("subscriptions")
            .select("*")
            .eq("id", "42")
            .order_desc("created_at")
            .limit(1);

        assert_eq!(query.to_filter_string(), "id=eq.42");
    }

    #[test]
    fn test_multiple_filters_keep_insertion_order() {
        let query = Query::new("ratings").eq("doctor_id", "7").eq("score", "5");

        assert_eq!(query.to_query_string(), "doctor_id=eq.7&score=eq.5");
    }
}
