//! Turn a structured query intent into a one-sentence answer.
//!
//! The dispatcher resolves the intent's time filter, builds a
//! [`RecordFilter`], fetches records once, aggregates them according to the
//! [`QueryType`], and renders the response sentence.
//!
//! Response sentences join their phrase fragments with single spaces even
//! when a fragment is empty, so an answer without store or item filters
//! reads `"Total sales   on 2025-07-20 was ..."`. Clients match on these
//! strings, so the spacing is kept as is. A `sales_for_store` intent with
//! no store name leaves the store slot empty (`"Total sales for  ..."`).

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::aggregate::{aggregate_flat, group_by_store, pick_extremal_store, Direction};
use crate::error::{QueryError, Result};
use crate::model::{DateRange, QueryIntent, QueryType, SaleRecord};
use crate::source::{RecordFilter, RecordSource};
use crate::temporal::resolve_date_range;

/// Currency glyph prefixed to every monetary amount.
pub const CURRENCY: &str = "₹";

/// The outcome of answering one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    /// The response sentence shown to the user.
    pub response: String,
    /// The date range the time filter resolved to.
    pub date_range: DateRange,
    /// How many records the source returned.
    pub record_count: usize,
}

/// Answer `user_query` from its parsed `intent`.
///
/// This is the caller-facing entry point: it rejects a blank query before
/// doing any work, then behaves like [`dispatch`].
///
/// # Errors
///
/// Returns [`QueryError::EmptyQuery`] for a blank `user_query` and
/// [`QueryError::Retrieval`] if the record source fails.
pub fn answer(
    user_query: &str,
    intent: &QueryIntent,
    today: NaiveDate,
    source: &impl RecordSource,
) -> Result<Answer> {
    if user_query.trim().is_empty() {
        return Err(QueryError::EmptyQuery);
    }
    run(user_query, intent, today, source)
}

/// Resolve, fetch, aggregate, and format the response sentence for `intent`.
///
/// `user_query` is the original question text; it only appears in the
/// "no data found" and fallback sentences.
///
/// # Errors
///
/// Returns [`QueryError::Retrieval`] if the record source fails. An empty
/// selection is not an error.
pub fn dispatch(
    user_query: &str,
    intent: &QueryIntent,
    today: NaiveDate,
    source: &impl RecordSource,
) -> Result<String> {
    run(user_query, intent, today, source).map(|answer| answer.response)
}

fn run(
    user_query: &str,
    intent: &QueryIntent,
    today: NaiveDate,
    source: &impl RecordSource,
) -> Result<Answer> {
    let time_filter = non_empty(intent.time_filter.as_deref());
    let date_range = resolve_date_range(time_filter, today);

    match (date_range.bounds(), time_filter) {
        (Some((start, end)), _) => debug!(%start, %end, "resolved time filter"),
        (None, Some(expr)) => {
            warn!(time_filter = expr, "could not resolve time filter, querying all dates")
        }
        (None, None) => debug!("no time filter, querying all dates"),
    }

    let filter = build_filter(intent, date_range);
    let records = source.fetch(&filter).map_err(|e| {
        error!(error = %e, query_type = intent.query_type.as_str(), "record retrieval failed");
        QueryError::Retrieval(e)
    })?;
    info!(
        query_type = intent.query_type.as_str(),
        records = records.len(),
        "fetched records"
    );

    let range_text = range_phrase(&date_range, time_filter);
    let response = match intent.query_type {
        QueryType::MostProfitableStore => {
            respond_extremal(&records, Direction::Max, &range_text, time_filter)
        }
        QueryType::LeastProfitableStore => {
            respond_extremal(&records, Direction::Min, &range_text, time_filter)
        }
        query_type => respond_flat(user_query, intent, query_type, &records, &range_text),
    };

    Ok(Answer {
        response,
        date_range,
        record_count: records.len(),
    })
}

/// Store rankings look at the whole dataset, so only the date bounds apply to them.
fn build_filter(intent: &QueryIntent, date_range: DateRange) -> RecordFilter {
    if intent.query_type.is_extremal() {
        return RecordFilter {
            date_range,
            ..Default::default()
        };
    }

    let store = non_empty(intent.store_name.as_deref());
    let item = non_empty(intent.item_name.as_deref());
    if let Some(store) = store {
        debug!(store, "applying store filter");
    }
    if let Some(item) = item {
        debug!(item, "applying item filter");
    }

    RecordFilter {
        date_range,
        store_name_contains: store.map(str::to_string),
        item_name_contains: item.map(str::to_string),
    }
}

fn respond_extremal(
    records: &[SaleRecord],
    direction: Direction,
    range_text: &str,
    time_filter: Option<&str>,
) -> String {
    let (superlative, rank) = match direction {
        Direction::Max => ("most", "most profitable"),
        Direction::Min => ("least", "least profitable"),
    };

    if records.is_empty() {
        return format!(
            "No sales data found to determine the {rank} store {}.",
            for_phrase(time_filter)
        );
    }

    match pick_extremal_store(&group_by_store(records), direction) {
        Some(winner) => format!(
            "The store that made the {superlative} profit {range_text} was {} with a total revenue of {}.",
            winner.store,
            money(winner.total_revenue)
        ),
        None => format!("Could not determine the {rank} store {range_text}."),
    }
}

fn respond_flat(
    user_query: &str,
    intent: &QueryIntent,
    query_type: QueryType,
    records: &[SaleRecord],
    range_text: &str,
) -> String {
    if records.is_empty() {
        return format!(
            "No sales data found for your request: \"{user_query}\". Please try another query or adjust the time/store/item filters."
        );
    }

    let totals = aggregate_flat(records);
    let store_name = non_empty(intent.store_name.as_deref());
    let store_text = for_phrase(store_name);
    let item_text = for_phrase(non_empty(intent.item_name.as_deref()));

    match query_type {
        QueryType::TotalSales => format!(
            "Total sales {store_text} {item_text} {range_text} was {} from {} items.",
            money(totals.total_revenue),
            totals.total_quantity
        ),
        QueryType::SalesForStore => format!(
            "Total sales for {} {item_text} {range_text} was {} from {} items.",
            store_name.unwrap_or_default(),
            money(totals.total_revenue),
            totals.total_quantity
        ),
        QueryType::AverageRevenue => format!(
            "Average revenue {store_text} {item_text} {range_text} was {}.",
            money(totals.average_revenue)
        ),
        QueryType::ItemsSold => format!(
            "Total items sold {store_text} {item_text} {range_text} was {}.",
            totals.total_quantity
        ),
        QueryType::TotalQuantity => format!(
            "Total quantity sold {store_text} {item_text} {range_text} was {}.",
            totals.total_quantity
        ),
        QueryType::Other | QueryType::MostProfitableStore | QueryType::LeastProfitableStore => {
            format!(
                "For your query: \"{user_query}\", I found total revenue of {} and {} items sold {store_text} {item_text} {range_text}.",
                money(totals.total_revenue),
                totals.total_quantity
            )
        }
    }
}

// ── Phrase helpers ──────────────────────────────────────────────────────────

/// `"on D"` for a single day, `"between A and B"` for a span, `"for <expr>"`
/// when an expression was given but not understood, otherwise empty.
pub fn range_phrase(range: &DateRange, time_filter: Option<&str>) -> String {
    match range.bounds() {
        Some((start, end)) if start == end => format!("on {start}"),
        Some((start, end)) => format!("between {start} and {end}"),
        None => for_phrase(non_empty(time_filter)),
    }
}

fn for_phrase(value: Option<&str>) -> String {
    value.map(|v| format!("for {v}")).unwrap_or_default()
}

fn money(amount: f64) -> String {
    format!("{CURRENCY}{amount:.2}")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
