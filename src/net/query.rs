//! Row query builder for the hosted rest endpoint.
//!
//! DESIGN
//! ======
//! Views describe *what* they want (table, columns, filters, ordering) and
//! the transport renders it into the query-string grammar. Keeping the
//! description as data lets tests assert on exact requests without a network.

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

/// A single column filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    /// `column = value`
    Eq { column: String, value: String },
    /// Case-insensitive substring match on `column`.
    Contains { column: String, term: String },
}

/// Sort direction for [`Order`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

/// A read against one table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    pub table: String,
    pub select: String,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    /// Expect exactly one row back as an object instead of an array.
    pub single: bool,
}

impl Query {
    pub fn from(table: &str) -> Self {
        Self {
            table: table.to_owned(),
            select: "*".to_owned(),
            filters: Vec::new(),
            order: None,
            single: false,
        }
    }

    #[must_use]
    pub fn select(mut self, columns: &str) -> Self {
        columns.clone_into(&mut self.select);
        self
    }

    #[must_use]
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.filters.push(Filter::Eq { column: column.to_owned(), value: value.to_owned() });
        self
    }

    #[must_use]
    pub fn contains(mut self, column: &str, term: &str) -> Self {
        self.filters.push(Filter::Contains { column: column.to_owned(), term: term.to_owned() });
        self
    }

    #[must_use]
    pub fn order_asc(mut self, column: &str) -> Self {
        self.order = Some(Order { column: column.to_owned(), direction: Direction::Asc });
        self
    }

    #[must_use]
    pub fn order_desc(mut self, column: &str) -> Self {
        self.order = Some(Order { column: column.to_owned(), direction: Direction::Desc });
        self
    }

    #[must_use]
    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }

    /// Render the query string (without the leading `?`).
    pub fn to_query_string(&self) -> String {
        let mut parts = vec![format!("select={}", urlencoding::encode(&self.select))];
        for filter in &self.filters {
            parts.push(match filter {
                Filter::Eq { column, value } => {
                    format!("{}=eq.{}", urlencoding::encode(column), urlencoding::encode(value))
                }
                Filter::Contains { column, term } => {
                    let pattern = format!("*{}*", escape_pattern(term));
                    format!("{}=ilike.{}", urlencoding::encode(column), urlencoding::encode(&pattern))
                }
            });
        }
        if let Some(order) = &self.order {
            let dir = match order.direction {
                Direction::Asc => "asc",
                Direction::Desc => "desc",
            };
            parts.push(format!("order={}.{dir}", urlencoding::encode(&order.column)));
        }
        parts.join("&")
    }
}

/// Make a user term literal inside an `ilike` pattern.
///
/// The multi-character wildcards `*` and `%` are dropped, since the REST
/// layer rewrites `*` to `%` before any escape applies. The single-character
/// wildcard `_` and the escape character `\` are backslash-escaped so they
/// still match themselves.
fn escape_pattern(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        match c {
            '*' | '%' => {}
            '_' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
