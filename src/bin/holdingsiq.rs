//! HoldingsIQ CLI binary.
//!
//! A command-line interface for browsing an RMAPI knowledge base account.

use clap::Parser;
use holdingsiq::cli::{Cli, Command, Entity, ListFilter};
use holdingsiq::output::PrettyPrint;
use holdingsiq::{
    verify_credentials, FilterQuery, Get, HoldingsClient, HoldingsError, List, Page, PackageByIdData,
    PackageData, PackageId, PackageListQuery, ResourceId, Title, TitleListQuery, Vendor,
    VendorById, VendorListQuery,
};
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let config = cli.credentials.to_configuration();
    let problems = config.validate_parameters();
    if !problems.is_empty() {
        for problem in &problems {
            eprintln!("Error: {problem}");
        }
        eprintln!("Hint: Set RMAPI_CUSTOMER_ID and RMAPI_API_KEY environment variables");
        return ExitCode::FAILURE;
    }

    let client = match HoldingsClient::from_configuration(&config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run(client: &HoldingsClient, cli: Cli) -> holdingsiq::Result<()> {
    match cli.command {
        Command::Get { entity, id } => handle_get(client, entity, &id, cli.json).await,
        Command::List {
            entity,
            filter,
            page,
            count,
        } => handle_list(client, entity, filter, page, count, cli.json).await,
        Command::Verify => {
            verify_credentials(client).await?;
            println!("Credentials for customer {} are valid", client.customer_id());
            Ok(())
        }
    }
}

fn parse_numeric_id(id: &str) -> holdingsiq::Result<u64> {
    id.parse()
        .map_err(|_| HoldingsError::RequestValidation(format!("Invalid id '{id}'")))
}

async fn handle_get(
    client: &HoldingsClient,
    entity: Entity,
    id: &str,
    json: bool,
) -> holdingsiq::Result<()> {
    match entity {
        Entity::Provider => {
            let provider = VendorById::get(client, parse_numeric_id(id)?).await?;
            output_single(&provider, json)?;
        }
        Entity::Package => {
            let package = PackageByIdData::get(client, id.parse::<PackageId>()?).await?;
            output_single(&package, json)?;
        }
        Entity::Title => {
            let title = Title::get(client, parse_numeric_id(id)?).await?;
            output_single(&title, json)?;
        }
        Entity::Resource => {
            let resource = holdingsiq::get_resource(client, id.parse::<ResourceId>()?).await?;
            output_single(&resource, json)?;
        }
    }
    Ok(())
}

async fn handle_list(
    client: &HoldingsClient,
    entity: Entity,
    filter: ListFilter,
    page: Option<u32>,
    count: Option<u32>,
    json: bool,
) -> holdingsiq::Result<()> {
    let page = page.unwrap_or(1);
    let count = count.unwrap_or(25);
    let sort = filter.sort.map(Into::into);

    match entity {
        Entity::Provider => {
            let query = VendorListQuery { q: filter.q, sort };
            let providers = Vendor::list_page(client, &query, page, count).await?;
            output_page(&providers, json, |v| ProviderRow::from(v))?;
        }
        Entity::Package => {
            let query = PackageListQuery {
                provider_id: filter.provider,
                filter_selected: filter.selected,
                filter_type: filter.content_type,
                q: filter.q,
                sort,
            };
            let packages = PackageData::list_page(client, &query, page, count).await?;
            output_page(&packages, json, |p| PackageRow::from(p))?;
        }
        Entity::Title => {
            let package = filter
                .package
                .as_deref()
                .map(str::parse::<PackageId>)
                .transpose()?;
            let query = TitleListQuery {
                package,
                filter: FilterQuery {
                    selected: filter.selected,
                    resource_type: filter.content_type,
                    name: filter.q,
                    isxn: filter.isxn,
                    subject: filter.subject,
                    publisher: filter.publisher,
                    package_ids: Vec::new(),
                },
                search_type: None,
                sort,
            };
            let titles = Title::list_page(client, &query, page, count).await?;
            output_page(&titles, json, |t| TitleRow::from(t))?;
        }
        Entity::Resource => {
            eprintln!("Error: Resources are listed through their titles");
            eprintln!("Hint: Use 'holdingsiq list titles --package <provider-package>'");
            return Err(HoldingsError::RequestValidation(
                "list resources not supported".to_string(),
            ));
        }
    }
    Ok(())
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> holdingsiq::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_page<T, R, F>(page: &Page<T>, json: bool, to_row: F) -> holdingsiq::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(&page.items)?);
    } else {
        let rows: Vec<R> = page.items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        if let (Some(total), Some(total_pages)) = (page.total, page.total_pages()) {
            println!("\nPage {}/{} ({} total items)", page.page, total_pages, total);
        } else if page.has_more {
            println!("\nPage {} (more available)", page.page);
        } else {
            println!("\nPage {} (end)", page.page);
        }
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct ProviderRow {
    id: u64,
    name: String,
    packages: String,
}

impl From<&Vendor> for ProviderRow {
    fn from(v: &Vendor) -> Self {
        Self {
            id: v.vendor_id,
            name: v.vendor_name.clone(),
            packages: format!("{}/{}", v.packages_selected, v.packages_total),
        }
    }
}

#[derive(Tabled)]
struct PackageRow {
    id: String,
    name: String,
    #[tabled(rename = "type")]
    content_type: String,
    selected: String,
}

impl From<&PackageData> for PackageRow {
    fn from(p: &PackageData) -> Self {
        Self {
            id: p.full_id().to_string(),
            name: p.package_name.clone(),
            content_type: p.content_type.clone().unwrap_or_default(),
            selected: format!("{}/{}", p.selected_count, p.title_count),
        }
    }
}

#[derive(Tabled)]
struct TitleRow {
    id: u64,
    name: String,
    publisher: String,
    resources: usize,
}

impl From<&Title> for TitleRow {
    fn from(t: &Title) -> Self {
        Self {
            id: t.title_id,
            name: t.title_name.clone(),
            publisher: t.publisher_name.clone().unwrap_or_default(),
            resources: t.resources().len(),
        }
    }
}
