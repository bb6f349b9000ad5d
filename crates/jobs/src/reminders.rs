//! Order-reminder job: log a reminder line for every order placed within
//! the last 7 days.
//!
//! Orders are fetched unfiltered and the 7-day window is applied
//! client-side. Intended cadence: daily.

use std::io;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

use crate::client::{ClientError, GraphqlClient};
use crate::logfile;

const QUERY: &str = "{ orders { id orderDate customer { email } } }";

/// How far back an order still earns a reminder.
const REMINDER_WINDOW_DAYS: i64 = 7;

/// One order that qualifies for a reminder.
#[derive(Debug, PartialEq, Eq)]
struct Reminder {
    id: String,
    email: String,
    order_date: DateTime<Utc>,
}

/// Extract the orders placed at or after `cutoff`.
///
/// Orders with a missing or unparseable date are skipped.
fn recent_orders(data: &Value, cutoff: DateTime<Utc>) -> Vec<Reminder> {
    let orders = data
        .get("orders")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    orders
        .iter()
        .filter_map(|order| {
            let raw_date = order.get("orderDate").and_then(Value::as_str)?;
            let order_date = DateTime::parse_from_rfc3339(raw_date)
                .ok()?
                .with_timezone(&Utc);
            if order_date < cutoff {
                return None;
            }

            let id = order.get("id").and_then(Value::as_str)?.to_owned();
            let email = order
                .get("customer")
                .and_then(|c| c.get("email"))
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_owned();

            Some(Reminder {
                id,
                email,
                order_date,
            })
        })
        .collect()
}

/// Render the log lines for one reminder scan.
fn reminder_lines(
    now: DateTime<Utc>,
    outcome: &Result<Value, ClientError>,
) -> Vec<String> {
    let stamp = now.to_rfc3339();

    let data = match outcome {
        Ok(data) => data,
        Err(err) => return vec![format!("{stamp} Failed GraphQL query: {err}")],
    };

    let reminders = recent_orders(data, now - Duration::days(REMINDER_WINDOW_DAYS));
    if reminders.is_empty() {
        return vec![format!("{stamp} No recent orders in the last 7 days")];
    }

    reminders
        .into_iter()
        .map(|r| {
            format!(
                "{stamp} Order ID: {}, customer_email: {}, order_date: {}",
                r.id,
                r.email,
                r.order_date.to_rfc3339()
            )
        })
        .collect()
}

/// Run the reminder scan and append its lines.
///
/// # Errors
///
/// Returns `io::Error` if the log file cannot be written.
pub async fn run(client: &GraphqlClient, log_path: &Path) -> io::Result<()> {
    let outcome = client.execute(QUERY).await;
    let lines = reminder_lines(Utc::now(), &outcome);

    tracing::info!(lines = lines.len(), "order reminders processed");
    logfile::append_lines(log_path, &lines)
}
