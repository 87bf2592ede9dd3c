//! Page requests and result pages.
//!
//! Pages are zero-based. A [`PageRequest`] is built from raw query values
//! with [`PageRequest::parse`], which clamps `page`/`size` and checks the
//! sort property against the caller's list of sortable properties.

use serde::Serialize;

use crate::error::CoreError;

/// Page size used when the client does not send one.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Upper bound on the page size a client may request.
pub const MAX_PAGE_SIZE: i64 = 2000;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }

    /// Query-string form, as accepted by [`Sort::parse`].
    pub fn as_param(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// A single sort order, e.g. `title,desc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub property: String,
    pub direction: Direction,
}

impl Sort {
    /// Parse `property[,asc|desc]`. Direction defaults to ascending.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let mut parts = raw.splitn(2, ',');
        let property = parts.next().unwrap_or_default().trim();
        if property.is_empty() {
            return Err(CoreError::Validation("Sort property must not be empty".into()));
        }

        let direction = match parts.next().map(|d| d.trim().to_ascii_lowercase()) {
            None => Direction::Asc,
            Some(d) if d == "asc" => Direction::Asc,
            Some(d) if d == "desc" => Direction::Desc,
            Some(d) => {
                return Err(CoreError::Validation(format!(
                    "Invalid sort direction '{d}', expected 'asc' or 'desc'"
                )))
            }
        };

        Ok(Self {
            property: property.to_string(),
            direction,
        })
    }

    /// Canonical `property,direction` form, safe to put back in a URI.
    pub fn to_param(&self) -> String {
        format!("{},{}", self.property, self.direction.as_param())
    }
}

/// A validated request for one page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
    pub sort: Option<Sort>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: None,
        }
    }
}

impl PageRequest {
    /// Build a page request from raw query values.
    ///
    /// Rejects sort properties not listed in `sortable`.
    pub fn parse(
        page: Option<i64>,
        size: Option<i64>,
        sort: Option<&str>,
        sortable: &[&str],
    ) -> Result<Self, CoreError> {
        let sort = match sort.filter(|s| !s.trim().is_empty()) {
            Some(raw) => {
                let sort = Sort::parse(raw)?;
                if !sortable.contains(&sort.property.as_str()) {
                    return Err(CoreError::Validation(format!(
                        "Cannot sort by '{}'",
                        sort.property
                    )));
                }
                Some(sort)
            }
            None => None,
        };

        let size = clamp_limit(size, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        // Keep `page * size` within i64.
        let page = clamp_offset(page).min(i64::MAX / size);

        Ok(Self { page, size, sort })
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }
}

/// One page of results plus the total number of matching records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: i64,
    pub size: i64,
    pub total_elements: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: i64) -> Self {
        Self {
            content,
            number: request.page,
            size: request.size,
            total_elements,
        }
    }

    pub fn total_pages(&self) -> i64 {
        if self.size <= 0 {
            return 0;
        }
        (self.total_elements + self.size - 1) / self.size
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages() - 1
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0
    }

    /// Convert the content while keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}
