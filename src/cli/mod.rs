//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the
//! `holdingsiq` binary.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::{Configuration, Sort};

/// HoldingsIQ (RMAPI) command-line interface.
#[derive(Parser, Debug)]
#[command(name = "holdingsiq", about = "HoldingsIQ RMAPI CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(flatten)]
    pub credentials: Credentials,

    #[command(subcommand)]
    pub command: Command,
}

/// RMAPI account to talk to.
#[derive(Args, Debug, Clone)]
pub struct Credentials {
    /// RMAPI customer id.
    #[arg(long, env = "RMAPI_CUSTOMER_ID", global = true)]
    pub customer_id: Option<String>,

    /// RMAPI API key.
    #[arg(long, env = "RMAPI_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// RMAPI base URL.
    #[arg(long, env = "RMAPI_URL", global = true, default_value = "https://sandbox.ebsco.io")]
    pub url: String,
}

impl Credentials {
    pub fn to_configuration(&self) -> Configuration {
        Configuration {
            customer_id: self.customer_id.clone(),
            api_key: self.api_key.clone(),
            url: Some(self.url.clone()),
            config_valid: None,
        }
    }
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single record by id.
    Get {
        /// The type of record to get.
        entity: Entity,

        /// Numeric id (providers, titles), `provider-package` (packages)
        /// or `provider-package-title` (resources).
        id: String,
    },

    /// Search records with optional filtering and pagination.
    List {
        /// The type of record to list.
        entity: Entity,

        #[command(flatten)]
        filter: ListFilter,

        /// Page number (1-indexed).
        #[arg(long)]
        page: Option<u32>,

        /// Number of items per page.
        #[arg(long)]
        count: Option<u32>,
    },

    /// Check that the credentials are accepted by RMAPI.
    Verify,
}

/// Search options for `list`.
#[derive(Args, Debug, Clone, Default)]
pub struct ListFilter {
    /// Search term (names for providers/packages, titles by name).
    #[arg(short, long)]
    pub q: Option<String>,

    /// Sort order.
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    /// Restrict packages to one provider.
    #[arg(long)]
    pub provider: Option<u64>,

    /// Restrict titles to one package (`provider-package`).
    #[arg(long)]
    pub package: Option<String>,

    /// Selection filter: all, selected, notselected, orderedthroughebsco.
    #[arg(long)]
    pub selected: Option<String>,

    /// Content type (packages) or publication type (titles).
    #[arg(long = "type")]
    pub content_type: Option<String>,

    /// Search titles by ISSN/ISBN instead of name.
    #[arg(long, conflicts_with_all = ["subject", "publisher"])]
    pub isxn: Option<String>,

    /// Search titles by subject.
    #[arg(long, conflicts_with = "publisher")]
    pub subject: Option<String>,

    /// Search titles by publisher.
    #[arg(long)]
    pub publisher: Option<String>,
}

/// Record types that can be operated on.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A content provider (RMAPI vendor).
    #[value(alias = "providers", alias = "vendor", alias = "vendors")]
    Provider,
    /// A package of titles offered by a provider.
    #[value(alias = "packages")]
    Package,
    /// A publication.
    #[value(alias = "titles")]
    Title,
    /// A title within one package.
    #[value(alias = "resources")]
    Resource,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortArg {
    Relevance,
    Name,
}

impl From<SortArg> for Sort {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Relevance => Sort::Relevance,
            SortArg::Name => Sort::Name,
        }
    }
}
