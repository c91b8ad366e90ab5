//! Value types shared across vendors, packages, titles and resources.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{HoldingsError, Result};

/// Sort order accepted by RMAPI list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sort {
    Relevance,
    Name,
}

impl Sort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sort::Relevance => "relevance",
            Sort::Name => "name",
        }
    }

    /// Whether `value` names a sort order, ignoring case.
    pub fn contains(value: &str) -> bool {
        value.parse::<Sort>().is_ok()
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sort {
    type Err = HoldingsError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("relevance") {
            Ok(Sort::Relevance)
        } else if s.eq_ignore_ascii_case("name") {
            Ok(Sort::Name)
        } else {
            Err(HoldingsError::validation("Invalid sort parameter"))
        }
    }
}

/// Title search filters as received from the `filter[...]` query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isxn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub package_ids: Vec<u64>,
}

impl FilterQuery {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn by_isxn(isxn: impl Into<String>) -> Self {
        Self {
            isxn: Some(isxn.into()),
            ..Default::default()
        }
    }

    pub fn by_subject(subject: impl Into<String>) -> Self {
        Self {
            subject: Some(subject.into()),
            ..Default::default()
        }
    }

    pub fn by_publisher(publisher: impl Into<String>) -> Self {
        Self {
            publisher: Some(publisher.into()),
            ..Default::default()
        }
    }

    /// The four mutually exclusive search fields, in precedence order.
    pub(crate) fn search_parameters(&self) -> [Option<&str>; 4] {
        [
            self.name.as_deref(),
            self.isxn.as_deref(),
            self.subject.as_deref(),
            self.publisher.as_deref(),
        ]
    }
}

fn parse_id_part(raw: &str, whole: &str) -> Result<u64> {
    raw.parse()
        .map_err(|_| HoldingsError::validation(format!("Invalid id '{whole}'")))
}

/// Composite package id: `{providerId}-{packageId}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageId {
    pub provider_id_part: u64,
    pub package_id_part: u64,
}

impl PackageId {
    pub fn new(provider_id_part: u64, package_id_part: u64) -> Self {
        Self {
            provider_id_part,
            package_id_part,
        }
    }

    pub(crate) fn path(&self) -> String {
        format!(
            "vendors/{}/packages/{}",
            self.provider_id_part, self.package_id_part
        )
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.provider_id_part, self.package_id_part)
    }
}

impl FromStr for PackageId {
    type Err = HoldingsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.split('-').collect::<Vec<_>>().as_slice() {
            [provider, package] => Ok(Self::new(
                parse_id_part(provider, s)?,
                parse_id_part(package, s)?,
            )),
            _ => Err(HoldingsError::validation(format!(
                "Package id '{s}' is invalid, expected providerId-packageId"
            ))),
        }
    }
}

/// Composite resource id: `{providerId}-{packageId}-{titleId}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    pub provider_id_part: u64,
    pub package_id_part: u64,
    pub title_id_part: u64,
}

impl ResourceId {
    pub fn new(provider_id_part: u64, package_id_part: u64, title_id_part: u64) -> Self {
        Self {
            provider_id_part,
            package_id_part,
            title_id_part,
        }
    }

    pub fn package_id(&self) -> PackageId {
        PackageId::new(self.provider_id_part, self.package_id_part)
    }

    pub(crate) fn path(&self) -> String {
        format!("{}/titles/{}", self.package_id().path(), self.title_id_part)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.provider_id_part, self.package_id_part, self.title_id_part
        )
    }
}

impl FromStr for ResourceId {
    type Err = HoldingsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.split('-').collect::<Vec<_>>().as_slice() {
            [provider, package, title] => Ok(Self::new(
                parse_id_part(provider, s)?,
                parse_id_part(package, s)?,
                parse_id_part(title, s)?,
            )),
            _ => Err(HoldingsError::validation(format!(
                "Resource id '{s}' is invalid, expected providerId-packageId-titleId"
            ))),
        }
    }
}

/// Proxy reference attached to vendors, packages and resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proxy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherited: Option<bool>,
}

/// Vendor or package token definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

/// Token value sent when updating a vendor or package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VendorPutToken {
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

/// Coverage range in RMAPI's `YYYY-MM-DD` form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageDates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_coverage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_coverage: Option<String>,
}

impl CoverageDates {
    pub fn new(begin: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            begin_coverage: Some(begin.into()),
            end_coverage: Some(end.into()),
        }
    }

    /// Parsed begin date. Empty or malformed values yield `None`.
    pub fn begin_date(&self) -> Option<NaiveDate> {
        parse_coverage_date(self.begin_coverage.as_deref())
    }

    /// Parsed end date. RMAPI leaves this empty for open-ended coverage.
    pub fn end_date(&self) -> Option<NaiveDate> {
        parse_coverage_date(self.end_coverage.as_deref())
    }

    pub fn is_open_ended(&self) -> bool {
        self.begin_date().is_some() && self.end_date().is_none()
    }
}

fn parse_coverage_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.filter(|s| !s.is_empty())
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

/// Embargo period (e.g. 6 months).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbargoPeriod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embargo_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embargo_value: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Identifier of an asynchronous holdings load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionId {
    #[serde(default)]
    pub transaction_id: Option<String>,
}

/// Body used to select or deselect a single resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSelectedPayload {
    pub is_selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ResourceSelectedPayload {
    pub fn selected(is_selected: bool) -> Self {
        Self {
            is_selected,
            ..Default::default()
        }
    }
}
