//! Parsing of client-supplied sort specs.
//!
//! A sort spec is a comma-separated list of field names, each optionally
//! prefixed with `-` for descending order, applied in sequence (primary,
//! secondary, ...). Field names are resolved against a per-entity whitelist
//! mapping them to SQL expressions, so user input never reaches the query
//! text directly.

use thiserror::Error;

/// Error returned for a sort spec naming an unknown field.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort field: {0}")]
pub struct OrderByError(pub String);

/// One resolved ORDER BY key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    /// Whitelisted SQL expression to sort by.
    pub expression: &'static str,
    /// Sort direction.
    pub descending: bool,
}

/// Parse a comma-separated sort spec against a whitelist of
/// `(field name, SQL expression)` pairs.
///
/// Empty segments are skipped; an empty spec yields no keys.
///
/// # Errors
///
/// Returns [`OrderByError`] for any segment naming a field outside the
/// whitelist.
pub fn parse_order_by(
    spec: &str,
    allowed: &[(&'static str, &'static str)],
) -> Result<Vec<SortKey>, OrderByError> {
    let mut keys = Vec::new();

    for segment in spec.split(',') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        let (field, descending) = segment
            .strip_prefix('-')
            .map_or((segment, false), |rest| (rest, true));

        let expression = allowed
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, expr)| *expr)
            .ok_or_else(|| OrderByError(field.to_owned()))?;

        keys.push(SortKey {
            expression,
            descending,
        });
    }

    Ok(keys)
}

/// Render the resolved keys as an ORDER BY clause fragment, or an empty
/// string when there are none.
#[must_use]
pub fn order_by_clause(keys: &[SortKey]) -> String {
    if keys.is_empty() {
        return String::new();
    }

    let rendered: Vec<String> = keys
        .iter()
        .map(|key| {
            let direction = if key.descending { "DESC" } else { "ASC" };
            format!("{} {}", key.expression, direction)
        })
        .collect();

    format!(" ORDER BY {}", rendered.join(", "))
}
