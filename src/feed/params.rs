//! Activity feed query parameters and the relative start-date helper.

use chrono::{DateTime, Datelike, Months, Utc};

use super::models::ActivityItemType;
use crate::config::RequestOptions;

/// Format of `startDateTime`. The `+` is literal; the transport
/// percent-encodes it once.
const START_DATE_TIME_FORMAT: &str = "%m/%d/%Y+%H:%M:%S";

/// Either an allow-list or an exclude-list of activity types. The service
/// accepts one or the other, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeFilter {
    Include(Vec<ActivityItemType>),
    Exclude(Vec<ActivityItemType>),
}

impl TypeFilter {
    fn to_param(&self) -> Option<(String, String)> {
        let (name, types) = match self {
            TypeFilter::Include(types) => ("activityTypes", types),
            TypeFilter::Exclude(types) => ("excludeTypes", types),
        };
        if types.is_empty() {
            return None;
        }
        let joined = types
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(";");
        Some((name.to_string(), joined))
    }
}

/// Optional parameters shared by every activity feed operation.
///
/// Unset fields are filled with the feed family's defaults by the operation
/// itself; setting one replaces the default.
#[derive(Debug, Clone, Default)]
pub struct ActivityParams {
    pub num_items: Option<u32>,
    pub include_self: Option<bool>,
    pub filter: Option<TypeFilter>,
    pub start_date_time: Option<DateTime<Utc>>,
    /// Continuation token from a previous [`ActivityResponse`](super::models::ActivityResponse).
    pub cont_token: Option<String>,
    /// Transport extras for this call.
    pub options: RequestOptions,
}

impl ActivityParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_items(mut self, n: u32) -> Self {
        self.num_items = Some(n);
        self
    }

    pub fn include_self(mut self, include: bool) -> Self {
        self.include_self = Some(include);
        self
    }

    pub fn activity_types(mut self, types: impl IntoIterator<Item = ActivityItemType>) -> Self {
        self.filter = Some(TypeFilter::Include(types.into_iter().collect()));
        self
    }

    pub fn exclude_types(mut self, types: impl IntoIterator<Item = ActivityItemType>) -> Self {
        self.filter = Some(TypeFilter::Exclude(types.into_iter().collect()));
        self
    }

    pub fn start_date_time(mut self, start: DateTime<Utc>) -> Self {
        self.start_date_time = Some(start);
        self
    }

    pub fn cont_token(mut self, token: impl Into<String>) -> Self {
        self.cont_token = Some(token.into());
        self
    }

    pub fn options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    pub(crate) fn or_num_items(mut self, n: u32) -> Self {
        self.num_items.get_or_insert(n);
        self
    }

    pub(crate) fn or_include_self(mut self, include: bool) -> Self {
        self.include_self.get_or_insert(include);
        self
    }

    pub(crate) fn or_filter(mut self, filter: TypeFilter) -> Self {
        self.filter.get_or_insert(filter);
        self
    }

    pub(crate) fn or_start_date_time(mut self, start: Option<DateTime<Utc>>) -> Self {
        if self.start_date_time.is_none() {
            self.start_date_time = start;
        }
        self
    }

    /// Query string in the order `numItems`, `includeSelf`,
    /// `activityTypes`|`excludeTypes`, `startDateTime`, `contToken`.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(n) = self.num_items {
            query.push(("numItems".to_string(), n.to_string()));
        }
        if let Some(include) = self.include_self {
            query.push(("includeSelf".to_string(), include.to_string()));
        }
        if let Some(param) = self.filter.as_ref().and_then(TypeFilter::to_param) {
            query.push(param);
        }
        if let Some(start) = self.start_date_time {
            query.push((
                "startDateTime".to_string(),
                start.format(START_DATE_TIME_FORMAT).to_string(),
            ));
        }
        if let Some(token) = &self.cont_token {
            query.push(("contToken".to_string(), token.clone()));
        }
        query
    }
}

/// The first (or last) day of the month `months_ago` months before
/// `reference`, at the reference's time of day.
///
/// Returns `None` only when the result falls outside chrono's date range.
pub fn relative_month_date(
    reference: DateTime<Utc>,
    months_ago: u32,
    end_of_month: bool,
) -> Option<DateTime<Utc>> {
    let first = reference
        .with_day(1)?
        .checked_sub_months(Months::new(months_ago))?;
    if end_of_month {
        first.checked_add_months(Months::new(1))?.checked_sub_days(chrono::Days::new(1))
    } else {
        Some(first)
    }
}

/// [`relative_month_date`] relative to now.
pub fn feed_start_date_time(months_ago: u32, end_of_month: bool) -> Option<DateTime<Utc>> {
    relative_month_date(Utc::now(), months_ago, end_of_month)
}
