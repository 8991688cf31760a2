//! Corpus Normalization
//!
//! Every string field (lists joined with a single space) is concatenated
//! with a space and lowercased. All matching runs against this corpus.

use crate::models::FormData;

/// Build the lowercase matching corpus from raw form data
pub fn normalize(data: &FormData) -> String {
    data.values()
        .map(|value| value.joined())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
