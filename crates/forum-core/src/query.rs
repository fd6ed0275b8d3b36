//! Listing parameters - sort key, direction, paging and search.

use std::cmp::Ordering;

use crate::domain::Post;
use crate::error::DomainError;

/// Page size used when the client does not ask for one.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Larger page sizes are clamped to this value.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Largest row offset a store is asked to skip. SQL offsets are signed 64-bit.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Field a post listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    #[default]
    Id,
    CreatedAt,
    Positivity,
}

/// Client-facing names, matched case-insensitively.
const SORT_KEYS: [(&str, SortKey); 3] = [
    ("id", SortKey::Id),
    ("createdat", SortKey::CreatedAt),
    ("positivity", SortKey::Positivity),
];

impl SortKey {
    /// Look up a client-supplied sort key. Unknown names yield `None`.
    pub fn lookup(raw: &str) -> Option<Self> {
        SORT_KEYS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(raw))
            .map(|(_, key)| *key)
    }

    /// Resolve a client-supplied sort key, falling back to [`SortKey::Id`].
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw {
            None => Self::default(),
            Some(raw) if raw.trim().is_empty() => Self::default(),
            Some(raw) => Self::lookup(raw).unwrap_or_else(|| {
                tracing::debug!(sort_key = %raw, "Unrecognized sort key, ordering by id");
                Self::default()
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::CreatedAt => "createdat",
            Self::Positivity => "positivity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            Self::Ascending
        } else {
            Self::Descending
        }
    }

    pub fn is_ascending(&self) -> bool {
        matches!(self, Self::Ascending)
    }
}

/// One-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    number: u64,
    size: u64,
}

impl PageRequest {
    /// Validate a page request. Both values must be at least 1; the size is
    /// clamped to [`MAX_PAGE_SIZE`].
    pub fn new(number: i64, size: i64) -> Result<Self, DomainError> {
        if number < 1 {
            return Err(DomainError::Validation(format!(
                "pageNumber must be at least 1, got {number}"
            )));
        }
        if size < 1 {
            return Err(DomainError::Validation(format!(
                "pageSize must be at least 1, got {size}"
            )));
        }

        Ok(Self {
            number: number as u64,
            size: (size as u64).min(MAX_PAGE_SIZE),
        })
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Number of matching records skipped before this page starts.
    ///
    /// Capped at [`MAX_OFFSET`]; a page that far out is always past the end.
    pub fn offset(&self) -> u64 {
        (self.number - 1).saturating_mul(self.size).min(MAX_OFFSET)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            number: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A complete listing request: filter, order and page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostQuery {
    pub page: PageRequest,
    pub sort: SortKey,
    pub direction: SortDirection,
    /// Substring a post's title or content must contain.
    pub search: Option<String>,
}

impl PostQuery {
    pub fn new(page: PageRequest) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    pub fn sorted_by(mut self, sort: SortKey, direction: SortDirection) -> Self {
        self.sort = sort;
        self.direction = direction;
        self
    }

    /// Restrict results to posts containing `search`. Blank terms are ignored.
    pub fn matching(mut self, search: Option<String>) -> Self {
        self.search = search.filter(|s| !s.trim().is_empty());
        self
    }

    /// Whether `post` passes the search filter. Matching is case-sensitive.
    pub fn matches(&self, post: &Post) -> bool {
        match &self.search {
            Some(term) => post.title.contains(term.as_str()) || post.content.contains(term.as_str()),
            None => true,
        }
    }

    /// Listing order of two posts. Ties on the sort key fall back to ascending id.
    pub fn ordering(&self, a: &Post, b: &Post) -> Ordering {
        let by_key = match self.sort {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::Positivity => a.upvotes.cmp(&b.upvotes),
        };
        let by_key = match self.direction {
            SortDirection::Ascending => by_key,
            SortDirection::Descending => by_key.reverse(),
        };
        by_key.then_with(|| a.id.cmp(&b.id))
    }
}
