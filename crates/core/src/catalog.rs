//! Service catalog: research categories, consultancy types, pricing and
//! slug helpers.

use crate::error::CoreError;
use crate::macros::define_text_enum;

/// Maximum length for a service name.
pub const MAX_NAME_LENGTH: usize = 255;

define_text_enum! {
    /// Category of a research service.
    ResearchCategory ("research category") {
        ConceptProposal => "concept_proposal",
        Thesis => "thesis",
        Articles => "articles",
        DataAnalysis => "data_analysis",
        ResearchDesign => "research_design",
        Consultancy => "consultancy",
        TrainingCapacity => "training_capacity",
    }
}

define_text_enum! {
    /// Kind of consultancy service.
    ConsultancyType ("consultancy type") {
        BusinessTax => "business_tax",
        BusinessStrategy => "business_strategy",
        Investment => "investment",
        ProposalSupport => "proposal_support",
        TrainingCapacity => "training_capacity",
        Academic => "academic",
        Research => "research",
        Career => "career",
        Writing => "writing",
    }
}

pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Service name must not be empty".to_string(),
        ));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Service name exceeds maximum length of {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Prices are optional, non-negative, and `price_from <= price_to` when both
/// are given.
pub fn validate_price_range(price_from: Option<f64>, price_to: Option<f64>) -> Result<(), CoreError> {
    for price in [price_from, price_to].into_iter().flatten() {
        if !price.is_finite() || price < 0.0 {
            return Err(CoreError::Validation(format!(
                "Prices must be non-negative amounts, got {price}"
            )));
        }
    }
    if let (Some(from), Some(to)) = (price_from, price_to) {
        if from > to {
            return Err(CoreError::Validation(format!(
                "price_from ({from}) must not exceed price_to ({to})"
            )));
        }
    }
    Ok(())
}

/// Lowercase ASCII slug: alphanumerics kept, every other run of characters
/// collapsed to a single `-`, no leading or trailing dash.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// The `attempt`-th slug to try for `base`: the base itself first, then
/// `base-2`, `base-3` and so on.
pub fn slug_candidate(base: &str, attempt: u32) -> String {
    if attempt <= 1 {
        base.to_string()
    } else {
        format!("{base}-{attempt}")
    }
}

/// Split a newline-separated features field into trimmed, non-empty items.
pub fn split_features(features: &str) -> Vec<String> {
    features
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
