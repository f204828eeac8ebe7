//! Mapping from tool inputs to upstream query parameters.

use crate::dates::{safe_unix_timestamp, to_unix_timestamp, SECONDS_PER_DAY};
use crate::params::QueryParams;

use super::inputs::{EventsInput, OrdersInput};

/// Default page size for events.
pub const DEFAULT_EVENT_LIMIT: &str = "20";

/// Default event status filter.
pub const DEFAULT_EVENT_STATUS: &str = "published";

/// Window after the start bound used when no end bound is given (60 days).
pub const EVENT_WINDOW_SECS: i64 = 60 * SECONDS_PER_DAY;

/// Default order status filter.
pub const DEFAULT_ORDER_STATUS: &str = "completed";

/// Default page size for orders.
pub const DEFAULT_ORDER_LIMIT: &str = "50";

/// Default page number for orders.
pub const DEFAULT_ORDER_PAGE: &str = "1";

/// Converts an optional date bound, leaving blank bounds unset.
fn date_bound(value: &Option<String>) -> Option<i64> {
    value
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(to_unix_timestamp)
}

impl EventsInput {
    /// Builds the filtered `GET /events` parameters.
    ///
    /// The range always has both ends: start defaults to now and end to
    /// 60 days after start.
    pub fn to_query(&self) -> QueryParams {
        let start_ts = safe_unix_timestamp(self.start_date.as_deref().unwrap_or(""), None);
        let end_ts = safe_unix_timestamp(
            self.end_date.as_deref().unwrap_or(""),
            Some(start_ts + EVENT_WINDOW_SECS),
        );

        QueryParams::new()
            .with("start_at.gte", Some(start_ts))
            .with("end_at.lte", Some(end_ts))
            .with(
                "status",
                Some(self.status.as_deref().unwrap_or(DEFAULT_EVENT_STATUS)),
            )
            .with("limit", Some(self.limit.as_deref().unwrap_or(DEFAULT_EVENT_LIMIT)))
            .filtered()
    }
}

impl OrdersInput {
    /// Builds the filtered `GET /orders` parameters.
    ///
    /// Date bounds have no default; an unset bound means unbounded history.
    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with("created_at.gte", date_bound(&self.created_at_min))
            .with("created_at.lte", date_bound(&self.created_at_max))
            .with("updated_at.gte", date_bound(&self.updated_at_min))
            .with("updated_at.lte", date_bound(&self.updated_at_max))
            .with("event_id", self.event_id.as_deref())
            .with(
                "status",
                Some(self.status.as_deref().unwrap_or(DEFAULT_ORDER_STATUS)),
            )
            .with("limit", Some(self.limit.as_deref().unwrap_or(DEFAULT_ORDER_LIMIT)))
            .with("page", Some(self.page.as_deref().unwrap_or(DEFAULT_ORDER_PAGE)))
            .with("include", self.include.as_deref())
            .with("sort", self.sort_field.as_deref())
            .with("sort_direction", self.sort_direction.as_deref())
            .with("search", self.search.as_deref())
            .with("ticket_type_id", self.ticket_type_id.as_deref())
            .with("checkout.email", self.checkout_email.as_deref())
            .with("buyer.email", self.email.as_deref())
            .with("buyer.phone", self.phone.as_deref())
            .with("payment_method", self.payment_method.as_deref())
            .with("offline_payment_status", self.offline_payment_status.as_deref())
            .with("tag", self.tag.as_deref())
            .with("buyer.name", self.name.as_deref())
            .filtered()
    }
}
