//! Checks applied to search parameters before they reach RMAPI.
//!
//! Failures are [`HoldingsError::RequestValidation`] carrying the message
//! callers show to the user unchanged.

use crate::error::{HoldingsError, Result};
use crate::models::{FilterQuery, Sort};

const FILTER_SELECTED_VALUES: &[&str] = &["all", "selected", "notselected", "orderedthroughebsco"];

const TITLE_TYPE_VALUES: &[&str] = &[
    "audiobook",
    "book",
    "bookseries",
    "database",
    "journal",
    "newsletter",
    "newspaper",
    "proceedings",
    "report",
    "streamingaudio",
    "streamingvideo",
    "thesisdissertation",
    "website",
    "unspecified",
];

const PACKAGE_TYPE_VALUES: &[&str] = &[
    "all",
    "aggregatedfulltext",
    "abstractandindex",
    "ebook",
    "ejournal",
    "print",
    "unknown",
    "onlinereference",
];

fn check(ok: bool, message: &str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(HoldingsError::validation(message))
    }
}

fn allowed(value: Option<&str>, values: &[&str]) -> bool {
    value.map_or(true, |v| values.contains(&v))
}

/// Validates title search filters and sort.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleParametersValidator;

impl TitleParametersValidator {
    /// Exactly one of name, isxn, subject or publisher must be given.
    pub fn validate(&self, filter: &FilterQuery, sort: &str) -> Result<()> {
        self.validate_allowing(filter, sort, false)
    }

    /// Like [`validate`](Self::validate), but with `allow_null_filters` a
    /// filter without any search field is accepted.
    pub fn validate_allowing(
        &self,
        filter: &FilterQuery,
        sort: &str,
        allow_null_filters: bool,
    ) -> Result<()> {
        let search = filter.search_parameters();
        let present = search.iter().flatten().count();

        check(present <= 1, "Conflicting filter parameters")?;
        check(
            present >= 1 || allow_null_filters,
            "All of filter[name], filter[isxn], filter[subject] and filter[publisher] cannot be missing.",
        )?;
        check(
            !search.iter().flatten().any(|v| v.is_empty()),
            "Value of required parameter filter[name], filter[isxn], filter[subject] or filter[publisher] is missing.",
        )?;
        check(
            allowed(filter.selected.as_deref(), FILTER_SELECTED_VALUES),
            "Invalid Query Parameter for filter[selected]",
        )?;
        check(
            allowed(filter.resource_type.as_deref(), TITLE_TYPE_VALUES),
            "Invalid Query Parameter for filter[type]",
        )?;
        check(Sort::contains(sort), "Invalid sort parameter")
    }
}

/// Validates package search parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageParametersValidator;

impl PackageParametersValidator {
    pub fn validate(
        &self,
        filter_selected: Option<&str>,
        filter_type: Option<&str>,
        sort: &str,
        query: Option<&str>,
    ) -> Result<()> {
        check(Sort::contains(sort), "Invalid Query Parameter for sort")?;
        check(query != Some(""), "Search parameter cannot be empty")?;
        check(
            allowed(filter_type, PACKAGE_TYPE_VALUES),
            "Invalid Query Parameter for filter[type]",
        )?;
        check(
            allowed(filter_selected, FILTER_SELECTED_VALUES),
            "Invalid Query Parameter for filter[selected]",
        )
    }
}
