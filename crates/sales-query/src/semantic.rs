//! Boundary with the semantic parser that turns a user question into a [`QueryIntent`].
//!
//! The parser is an LLM behind a `generateContent`-style endpoint. This
//! module builds the request payload (a few-shot prompt plus a response
//! schema) and reads the intent back out of the response body. Sending the
//! request is the caller's job.

use serde_json::{json, Value};

use crate::error::{QueryError, Result};
use crate::model::QueryIntent;

/// Few-shot examples: user question and the intent JSON expected for it.
pub const EXAMPLES: &[(&str, &str)] = &[
    (
        "What was the total sales yesterday?",
        r#"{"query_type": "total_sales", "time_filter": "yesterday", "store_name": null, "item_name": null}"#,
    ),
    (
        "What was the average revenue last week?",
        r#"{"query_type": "average_revenue", "time_filter": "last week", "store_name": null, "item_name": null}"#,
    ),
    (
        "How many items were sold today?",
        r#"{"query_type": "items_sold", "time_filter": "today", "store_name": null, "item_name": null}"#,
    ),
    (
        "What is the total quantity sold this month?",
        r#"{"query_type": "total_quantity", "time_filter": "this month", "store_name": null, "item_name": null}"#,
    ),
    (
        "What is the sales for Store A in July?",
        r#"{"query_type": "sales_for_store", "time_filter": "July", "store_name": "Store A", "item_name": null}"#,
    ),
    (
        "Total revenue for laptops last month?",
        r#"{"query_type": "total_sales", "time_filter": "last month", "store_name": null, "item_name": "laptop"}"#,
    ),
    (
        "Sales for Store B last weekend?",
        r#"{"query_type": "total_sales", "time_filter": "last weekend", "store_name": "Store B", "item_name": null}"#,
    ),
    (
        "Total quantity of mice sold in the past 3 days?",
        r#"{"query_type": "total_quantity", "time_filter": "past 3 days", "store_name": null, "item_name": "mouse"}"#,
    ),
    (
        "Which store made the most profit?",
        r#"{"query_type": "most_profitable_store", "time_filter": null, "store_name": null, "item_name": null}"#,
    ),
    (
        "Which store had the highest sales last month?",
        r#"{"query_type": "most_profitable_store", "time_filter": "last month", "store_name": null, "item_name": null}"#,
    ),
    (
        "Which store made the least profit?",
        r#"{"query_type": "least_profitable_store", "time_filter": null, "store_name": null, "item_name": null}"#,
    ),
    (
        "Which store had the lowest sales this week?",
        r#"{"query_type": "least_profitable_store", "time_filter": "this week", "store_name": null, "item_name": null}"#,
    ),
    (
        "What were the sales this weekend?",
        r#"{"query_type": "total_sales", "time_filter": "this weekend", "store_name": null, "item_name": null}"#,
    ),
    (
        "How many items were sold on 2025-07-20?",
        r#"{"query_type": "items_sold", "time_filter": "2025-07-20", "store_name": null, "item_name": null}"#,
    ),
    (
        "What was the total revenue on 2025-07-15?",
        r#"{"query_type": "total_sales", "time_filter": "2025-07-15", "store_name": null, "item_name": null}"#,
    ),
    (
        "What were the sales on July 1st?",
        r#"{"query_type": "total_sales", "time_filter": "2025-07-01", "store_name": null, "item_name": null}"#,
    ),
    (
        "How many items sold on 1st August?",
        r#"{"query_type": "items_sold", "time_filter": "2025-08-01", "store_name": null, "item_name": null}"#,
    ),
];

/// Build the parsing prompt for `user_query`.
pub fn build_prompt(user_query: &str) -> String {
    let examples: String = EXAMPLES
        .iter()
        .map(|(question, intent)| format!("- \"{question}\" -> {intent}\n"))
        .collect();

    format!(
        "Parse the following sales query into a structured JSON object.\n\
         Extract the 'query_type' (e.g., 'total_sales', 'average_revenue', 'items_sold', 'total_quantity', 'sales_for_store', 'most_profitable_store', 'least_profitable_store'),\n\
         'time_filter' (e.g., 'today', 'yesterday', 'last week', 'this month', 'last weekend', 'past 3 days', 'this weekend', or a specific month name like 'July' or a specific date like '2025-07-21' or 'July 1st'),\n\
         'store_name' (if specified, otherwise null), and 'item_name' (if specified, otherwise null).\n\
         If a month is mentioned (e.g., 'July'), set 'time_filter' to that month name. If a specific date is mentioned (e.g., '2025-07-21' or 'July 1st'), set 'time_filter' to the 'YYYY-MM-DD' date string.\n\
         \n\
         Examples:\n\
         {examples}\n\
         Query: \"{user_query}\""
    )
}

/// Build the full request payload: prompt plus a JSON response schema.
pub fn build_parse_request(user_query: &str) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": build_prompt(user_query) }]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "query_type": { "type": "STRING" },
                    "time_filter": { "type": "STRING", "nullable": true },
                    "store_name": { "type": "STRING", "nullable": true },
                    "item_name": { "type": "STRING", "nullable": true }
                },
                "propertyOrdering": ["query_type", "time_filter", "store_name", "item_name"]
            }
        }
    })
}

/// Read the intent out of a parser response body.
///
/// The intent JSON is expected as text in `candidates[0].content.parts[0].text`.
///
/// # Errors
///
/// Returns [`QueryError::InvalidIntent`] if that path is missing or its text
/// is not intent JSON.
pub fn extract_intent(response: &Value) -> Result<QueryIntent> {
    let text = response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            QueryError::InvalidIntent("unexpected parser response structure".to_string())
        })?;
    parse_intent(text)
}

/// Parse bare intent JSON.
pub fn parse_intent(text: &str) -> Result<QueryIntent> {
    serde_json::from_str(text.trim())
        .map_err(|e| QueryError::InvalidIntent(format!("unreadable intent JSON: {e}")))
}
