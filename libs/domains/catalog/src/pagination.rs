//! Page requests, sort keys and page results shared by every listing.

use std::cmp::Ordering;
use std::str::FromStr;

use core_config::catalog::CatalogConfig;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

use crate::error::{CatalogError, CatalogResult};
use crate::validation::FieldErrors;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey<F> {
    pub field: F,
    pub direction: Direction,
}

/// Zero-based page number, page size and ordered sort keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest<F> {
    pub page: u64,
    pub size: u64,
    pub sort: Vec<SortKey<F>>,
}

impl<F> PageRequest<F> {
    pub fn of(page: u64, size: u64) -> Self {
        Self {
            page,
            size,
            sort: Vec::new(),
        }
    }

    pub fn sorted_by(mut self, field: F, direction: Direction) -> Self {
        self.sort.push(SortKey { field, direction });
        self
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }

    pub fn check_size(&self, limits: &PageLimits) -> CatalogResult<()> {
        if self.size == 0 || self.size > limits.max_size {
            return Err(CatalogError::invalid(
                "size",
                format!("size must be between 1 and {}", limits.max_size),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_size: u64,
    pub max_size: u64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_size: 12,
            max_size: 100,
        }
    }
}

impl From<&CatalogConfig> for PageLimits {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            default_size: config.default_page_size,
            max_size: config.max_page_size,
        }
    }
}

/// One slice of an ordered listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, number: u64, size: u64, total_elements: u64) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            total_elements.div_ceil(size)
        };
        Self {
            content,
            number,
            size,
            total_elements,
            total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Sorts `items` by `keys` left to right, breaking ties by ascending id,
/// then cuts out the requested page.
pub fn paginate<T, F: Copy>(
    mut items: Vec<T>,
    request: &PageRequest<F>,
    compare: impl Fn(F, &T, &T) -> Ordering,
    id: impl Fn(&T) -> i64,
) -> Page<T> {
    items.sort_by(|a, b| {
        request
            .sort
            .iter()
            .map(|key| key.direction.apply(compare(key.field, a, b)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| id(a).cmp(&id(b)))
    });

    let total = items.len() as u64;
    let content = items
        .into_iter()
        .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
        .take(usize::try_from(request.size).unwrap_or(usize::MAX))
        .collect();

    Page::new(content, request.page, request.size, total)
}

/// Raw paging query parameters: `page`, `size` and repeated `sort=field,dir`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Zero-based page number (default 0)
    pub page: Option<u64>,
    /// Page size (default from configuration)
    pub size: Option<u64>,
    /// Sort keys as `field` or `field,asc|desc`, applied left to right
    #[serde(default)]
    pub sort: Vec<String>,
}

impl PageParams {
    pub fn into_request<F: FromStr>(self, limits: &PageLimits) -> CatalogResult<PageRequest<F>> {
        let mut errors = FieldErrors::new();
        let mut sort = Vec::with_capacity(self.sort.len());

        for raw in &self.sort {
            match parse_sort_key(raw) {
                Some(key) => sort.push(key),
                None => errors.add("sort", format!("cannot sort by '{}'", raw)),
            }
        }
        errors.into_result()?;

        Ok(PageRequest {
            page: self.page.unwrap_or(0),
            size: self.size.unwrap_or(limits.default_size),
            sort,
        })
    }
}

fn parse_sort_key<F: FromStr>(raw: &str) -> Option<SortKey<F>> {
    let mut parts = raw.split(',').map(str::trim);
    let field = parts.next().filter(|f| !f.is_empty())?.parse().ok()?;
    let direction = match parts.next() {
        None | Some("") => Direction::Asc,
        Some(dir) => dir.parse().ok()?,
    };
    if parts.next().is_some() {
        return None;
    }
    Some(SortKey { field, direction })
}
