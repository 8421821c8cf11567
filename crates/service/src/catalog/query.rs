//! Filtering, ordering and paging of the public listing.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::domain::Service;
use crate::document::non_blank;
use crate::pagination::{Pagination, Window};

/// Raw `GET /services` query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceListParams {
    pub email: Option<String>,
    pub search_text: Option<String>,
    pub category: Option<String>,
    /// Only the literal `true` selects popular mode.
    pub popular: Option<String>,
    pub sort: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    PriceLow,
    PriceHigh,
    Name,
    Newest,
    #[default]
    TopRated,
}

impl SortKey {
    /// Unknown values fall back to the default ordering.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("priceLow") => SortKey::PriceLow,
            Some("priceHigh") => SortKey::PriceHigh,
            Some("name") => SortKey::Name,
            Some("newest") => SortKey::Newest,
            _ => SortKey::TopRated,
        }
    }

    /// Total order used by in-process listings; ties break on id.
    pub fn compare(self, a: &Service, b: &Service) -> Ordering {
        let primary = match self {
            SortKey::PriceLow => a.price.total_cmp(&b.price),
            SortKey::PriceHigh => b.price.total_cmp(&a.price),
            SortKey::Name => a.service_name.cmp(&b.service_name),
            SortKey::Newest => b.created_at.cmp(&a.created_at),
            SortKey::TopRated => b.ratings.total_cmp(&a.ratings),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceFilter {
    pub provider_email: Option<String>,
    /// Lowercased free-text needle.
    pub search: Option<String>,
    /// Lowercased category.
    pub category: Option<String>,
}

impl ServiceFilter {
    pub fn by_provider(email: &str) -> Self {
        Self { provider_email: Some(email.to_string()), ..Self::default() }
    }

    pub fn matches(&self, s: &Service) -> bool {
        if let Some(email) = &self.provider_email {
            if s.provider_email.as_deref() != Some(email.as_str()) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if s.category.to_lowercase() != *category {
                return false;
            }
        }
        if let Some(needle) = &self.search {
            let hay = [
                s.description.as_deref().unwrap_or_default(),
                s.service_name.as_str(),
                s.category.as_str(),
                s.provider_email.as_deref().unwrap_or_default(),
            ];
            let hit = hay.iter().any(|h| h.to_lowercase().contains(needle.as_str()))
                || s.price.to_string().contains(needle.as_str());
            if !hit {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    /// Cheapest first, first page only, without descriptions.
    Popular { limit: u64 },
    Paged { sort: SortKey, window: Window },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceQuery {
    pub filter: ServiceFilter,
    pub mode: ListMode,
}

impl ServiceQuery {
    pub fn new(params: &ServiceListParams) -> Self {
        let filter = ServiceFilter {
            provider_email: non_blank(params.email.as_deref()),
            search: non_blank(params.search_text.as_deref()).map(|s| s.to_lowercase()),
            category: non_blank(params.category.as_deref()).map(|s| s.to_lowercase()),
        };
        let window = Pagination::from_query(params.page, params.limit).window();
        let mode = if params.popular.as_deref() == Some("true") {
            ListMode::Popular { limit: window.limit }
        } else {
            ListMode::Paged { sort: SortKey::parse(params.sort.as_deref()), window }
        };
        Self { filter, mode }
    }
}

/// `GET /services` response; `total` is absent in popular mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServicePage {
    pub services: Vec<Service>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}
