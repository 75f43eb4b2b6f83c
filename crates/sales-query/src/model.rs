//! Request-scoped data types: sale records, query intents, and date ranges.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

// ── SaleRecord ──────────────────────────────────────────────────────────────

/// One row of the `sale_records` dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub date: NaiveDate,
    pub store: String,
    pub item_name: String,
    pub revenue: f64,
    pub quantity: u64,
}

// ── DateRange ───────────────────────────────────────────────────────────────

/// An inclusive `[start, end]` range of calendar days.
///
/// Either both bounds are present or neither is, and `start <= end`.
/// An empty range means "no date filter", not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    /// The range produced for absent or unrecognized expressions.
    pub fn unresolved() -> Self {
        Self::default()
    }

    /// A single-day range.
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: Some(day),
            end: Some(day),
        }
    }

    /// An inclusive range. Bounds given in the wrong order are swapped.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        let (start, end) = if start <= end {
            (start, end)
        } else {
            (end, start)
        };
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// Both bounds, when resolved.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start.zip(self.end)
    }

    pub fn is_resolved(&self) -> bool {
        self.bounds().is_some()
    }

    /// Whether `day` falls inside the range. An unresolved range contains every day.
    pub fn contains(&self, day: NaiveDate) -> bool {
        match self.bounds() {
            Some((start, end)) => start <= day && day <= end,
            None => true,
        }
    }
}

// ── QueryType ───────────────────────────────────────────────────────────────

/// The kind of answer a query asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    TotalSales,
    AverageRevenue,
    ItemsSold,
    TotalQuantity,
    SalesForStore,
    MostProfitableStore,
    LeastProfitableStore,
    /// Any query type the parser produced that is not one of the above.
    #[default]
    Other,
}

impl QueryType {
    /// Map a parser-produced name to a query type. Names must match exactly;
    /// anything else maps to [`QueryType::Other`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "total_sales" => Self::TotalSales,
            "average_revenue" => Self::AverageRevenue,
            "items_sold" => Self::ItemsSold,
            "total_quantity" => Self::TotalQuantity,
            "sales_for_store" => Self::SalesForStore,
            "most_profitable_store" => Self::MostProfitableStore,
            "least_profitable_store" => Self::LeastProfitableStore,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TotalSales => "total_sales",
            Self::AverageRevenue => "average_revenue",
            Self::ItemsSold => "items_sold",
            Self::TotalQuantity => "total_quantity",
            Self::SalesForStore => "sales_for_store",
            Self::MostProfitableStore => "most_profitable_store",
            Self::LeastProfitableStore => "least_profitable_store",
            Self::Other => "other",
        }
    }

    /// Whether this query ranks stores rather than aggregating a flat selection.
    pub fn is_extremal(&self) -> bool {
        matches!(self, Self::MostProfitableStore | Self::LeastProfitableStore)
    }
}

impl<'de> Deserialize<'de> for QueryType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = Option::<String>::deserialize(deserializer)?;
        Ok(name.as_deref().map(Self::from_name).unwrap_or_default())
    }
}

// ── QueryIntent ─────────────────────────────────────────────────────────────

/// Structured form of a user question, as produced by the semantic parser.
///
/// Every field is independently nullable; nothing beyond the JSON types is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryIntent {
    #[serde(default)]
    pub query_type: QueryType,
    #[serde(default)]
    pub time_filter: Option<String>,
    #[serde(default)]
    pub store_name: Option<String>,
    #[serde(default)]
    pub item_name: Option<String>,
}

impl QueryIntent {
    pub fn new(query_type: QueryType) -> Self {
        Self {
            query_type,
            ..Default::default()
        }
    }

    pub fn with_time_filter(mut self, time_filter: impl Into<String>) -> Self {
        self.time_filter = Some(time_filter.into());
        self
    }

    pub fn with_store(mut self, store_name: impl Into<String>) -> Self {
        self.store_name = Some(store_name.into());
        self
    }

    pub fn with_item(mut self, item_name: impl Into<String>) -> Self {
        self.item_name = Some(item_name.into());
        self
    }
}
