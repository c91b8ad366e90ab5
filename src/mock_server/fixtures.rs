//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic knowledge base data.

use crate::{
    Configuration, CoverageDates, CustomLabel, CustomerResources, Identifier, LoadStatus,
    PackageByIdData, PackageData, Proxy, ProxyWithUrl, RootProxyCustomLabels, Title, VendorById,
};

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Vendor Fixtures
    // =========================================================================

    /// Create a vendor with no packages.
    pub fn vendor(id: u64, name: &str) -> VendorById {
        VendorById {
            vendor_id: id,
            vendor_name: name.to_string(),
            proxy: Some(Proxy {
                id: Some("<n>".to_string()),
                inherited: Some(true),
            }),
            ..Default::default()
        }
    }

    // =========================================================================
    // Package Fixtures
    // =========================================================================

    /// Create an unselected package.
    pub fn package(vendor_id: u64, package_id: u64, name: &str) -> PackageByIdData {
        PackageByIdData {
            package: PackageData {
                package_id,
                package_name: name.to_string(),
                vendor_id,
                content_type: Some("AggregatedFullText".to_string()),
                package_type: Some("Complete".to_string()),
                ..Default::default()
            },
            proxy: Some(Proxy {
                id: Some("<n>".to_string()),
                inherited: Some(true),
            }),
            package_token: None,
        }
    }

    /// Create a selected package with coverage.
    pub fn selected_package(
        vendor_id: u64,
        package_id: u64,
        name: &str,
        title_count: u32,
    ) -> PackageByIdData {
        let mut package = Self::package(vendor_id, package_id, name);
        package.package.is_selected = true;
        package.package.title_count = title_count;
        package.package.selected_count = title_count;
        package.package.custom_coverage = Some(CoverageDates::new("2000-01-01", ""));
        package
    }

    // =========================================================================
    // Title Fixtures
    // =========================================================================

    /// Create a title with one resource per `(vendor, package, selected)`.
    pub fn title(id: u64, name: &str, resources: &[(u64, u64, bool)]) -> Title {
        Title {
            title_id: id,
            title_name: name.to_string(),
            pub_type: Some("Journal".to_string()),
            customer_resources_list: Some(
                resources
                    .iter()
                    .map(|&(vendor_id, package_id, is_selected)| CustomerResources {
                        title_id: id,
                        package_id,
                        vendor_id,
                        is_selected,
                        ..Default::default()
                    })
                    .collect(),
            ),
            ..Default::default()
        }
    }

    /// Create a title carrying an ISSN.
    pub fn journal(id: u64, name: &str, issn: &str, resources: &[(u64, u64, bool)]) -> Title {
        let mut title = Self::title(id, name, resources);
        title.publisher_name = Some("Test Publisher".to_string());
        title.identifiers_list = vec![Identifier {
            id: issn.to_string(),
            source: Some("ResourceIdentifier".to_string()),
            identifier_type: 0,
            subtype: 1,
        }];
        title
    }

    // =========================================================================
    // Account Fixtures
    // =========================================================================

    pub fn root(vendor_id: u64) -> RootProxyCustomLabels {
        RootProxyCustomLabels {
            vendor_id: vendor_id.to_string(),
            proxy: Some(Proxy {
                id: Some("<n>".to_string()),
                inherited: None,
            }),
            labels: vec![CustomLabel {
                id: 1,
                display_label: "Label one".to_string(),
                display_on_full_text_finder: true,
                display_on_publication_finder: false,
            }],
        }
    }

    pub fn proxies() -> Vec<ProxyWithUrl> {
        vec![
            ProxyWithUrl {
                id: "<n>".to_string(),
                name: "None".to_string(),
                url_mask: String::new(),
            },
            ProxyWithUrl {
                id: "EZProxy".to_string(),
                name: "EZProxy".to_string(),
                url_mask: "https://login.ezproxy.example.org/login?url={targetURL}".to_string(),
            },
        ]
    }

    /// Credentials pointing at `url`.
    pub fn credentials(customer_id: &str, api_key: &str, url: &str) -> Configuration {
        Configuration::new(customer_id, api_key, url)
    }

    // =========================================================================
    // Scenario Builders
    // =========================================================================

    /// Create a default set of test data for common scenarios.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// A complete knowledge base with related vendors, packages and titles.
pub struct DefaultScenario {
    pub vendors: Vec<VendorById>,
    pub packages: Vec<PackageByIdData>,
    pub titles: Vec<Title>,
    pub root: RootProxyCustomLabels,
    pub proxies: Vec<ProxyWithUrl>,
    pub load_status: LoadStatus,
}

impl DefaultScenario {
    fn new() -> Self {
        let mut ebsco = Fixtures::vendor(19, "EBSCO");
        ebsco.packages_total = 2;
        ebsco.packages_selected = 1;
        ebsco.is_customer = true;

        let mut gale = Fixtures::vendor(20, "Gale Cengage");
        gale.packages_total = 1;

        let packages = vec![
            Fixtures::selected_package(19, 3964, "Academic Search Complete", 2),
            Fixtures::package(19, 4010, "Business Source Premier"),
            Fixtures::package(20, 5207, "Gale Academic OneFile"),
        ];

        let titles = vec![
            Fixtures::journal(
                101,
                "Journal of Test Studies",
                "1362-3613",
                &[(19, 3964, true), (20, 5207, false)],
            ),
            Fixtures::title(102, "Test Quarterly", &[(19, 3964, true)]),
            Fixtures::title(103, "Business Review", &[(19, 4010, false)]),
        ];

        Self {
            vendors: vec![ebsco, gale],
            packages,
            titles,
            root: Fixtures::root(19),
            proxies: Fixtures::proxies(),
            load_status: LoadStatus {
                status: Some("Completed".to_string()),
                created: Some("2024-01-01T00:00:00Z".to_string()),
                total_count: Some(3),
            },
        }
    }
}
