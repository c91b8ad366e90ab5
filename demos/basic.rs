//! Basic example demonstrating the HoldingsIQ client.
//!
//! Run with:
//! ```
//! RMAPI_CUSTOMER_ID=apidvcorp RMAPI_API_KEY=your-key cargo run --example basic
//! ```

use holdingsiq::{
    get_load_status, get_provider_packages, get_root_proxy_custom_labels, FilterQuery, Get,
    HoldingsClient, List, SuccessBodyLogger, Title, TitleListQuery, Vendor, VendorById,
    VendorListQuery,
};

#[tokio::main]
async fn main() -> holdingsiq::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating HoldingsIQ client...");
    let client = HoldingsClient::from_env()?.with_body_listener(SuccessBodyLogger);
    println!(
        "Connected to: {} (customer {})",
        client.base_url(),
        client.customer_id()
    );

    let root = get_root_proxy_custom_labels(&client).await?;
    println!("Account vendor: {}", root.vendor_id);
    for label in &root.labels {
        println!("  Label {}: {}", label.id, label.display_label);
    }

    // Search providers
    println!("\n--- Searching Providers ---");
    let query = VendorListQuery {
        q: Some("ebsco".to_string()),
        ..Default::default()
    };
    let vendors = Vendor::list_page(&client, &query, 1, 10).await?;
    println!(
        "Found {} providers (total: {:?})",
        vendors.len(),
        vendors.total
    );

    for vendor in &vendors {
        println!(
            "  - {} ({}) {}/{} packages selected",
            vendor.vendor_name, vendor.vendor_id, vendor.packages_selected, vendor.packages_total
        );
    }

    // Drill into the first provider
    if let Some(first) = vendors.items.first() {
        println!("\n--- Provider Details ---");
        let vendor = VendorById::get(&client, first.vendor_id).await?;
        println!("Provider: {}", vendor.vendor_name);
        println!("  Proxy: {}", vendor.proxy_id().unwrap_or("none"));

        let packages = get_provider_packages(&client, vendor.vendor_id).await?;
        println!(
            "\nFirst {} of {:?} packages:",
            packages.packages_list.len(),
            packages.total_results
        );
        for package in packages.packages_list.iter().take(5) {
            let selected = if package.is_selected { "selected" } else { "not selected" };
            println!(
                "  - {} [{}] {} ({}/{} titles)",
                package.package_name,
                package.full_id(),
                selected,
                package.selected_count,
                package.title_count
            );
        }
    }

    // Title search
    println!("\n--- Title Search ---");
    let query = TitleListQuery {
        filter: FilterQuery::by_name("history"),
        ..Default::default()
    };
    let titles = Title::list_page(&client, &query, 1, 5).await?;
    for title in &titles {
        println!("  - {} ({} resources)", title.title_name, title.resources().len());
    }

    let status = get_load_status(&client).await?;
    println!("\nHoldings load: {:?}", status.status);

    println!("\nDone!");
    Ok(())
}
