pub fn default_page() -> i64 {
    1
}

pub fn default_limit() -> i64 {
    10
}

/// Resolved ORDER BY / LIMIT / OFFSET for a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: &'static str,
    pub ascending: bool,
    pub limit: Option<i64>,
    pub offset: i64,
}

impl SortSpec {
    /// `limit == 0` means unlimited. Unknown sort columns fall back to the first allowed one.
    pub fn resolve(
        sort_col: Option<&str>,
        sort_asc: Option<bool>,
        page: i64,
        limit: i64,
        allowed: &[&'static str],
    ) -> Self {
        let column = sort_col
            .and_then(|wanted| allowed.iter().copied().find(|c| *c == wanted))
            .unwrap_or(allowed.first().copied().unwrap_or("id"));

        let limit = if limit <= 0 { None } else { Some(limit.min(1000)) };
        let offset = match limit {
            Some(l) => (page.max(1) - 1) * l,
            None => 0,
        };

        Self {
            column,
            ascending: sort_asc.unwrap_or(true),
            limit,
            offset,
        }
    }

    pub fn order_by(&self, table_alias: &str) -> String {
        let dir = if self.ascending { "ASC" } else { "DESC" };
        if self.column == "id" {
            format!("{table_alias}.id {dir}")
        } else {
            format!("{table_alias}.{} {dir}, {table_alias}.id {dir}", self.column)
        }
    }
}
