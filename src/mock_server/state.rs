//! Mock server state management.
//!
//! Provides the in-memory knowledge base served by the mock RMAPI server.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    Configuration, CustomerResources, LoadStatus, PackageByIdData, PackageId, PackagePost,
    PackagePut, ProxyWithUrl, ResourceId, ResourcePut, RootProxyCustomLabels, Title, TitlePost,
    VendorById, VendorPut,
};

/// Shared state for the mock server.
///
/// Titles carry their resources in `customer_resources_list`; a package's
/// titles are the titles with a resource pointing at that package.
#[derive(Debug, Default)]
pub struct MockState {
    /// Vendors indexed by vendor id.
    pub vendors: BTreeMap<u64, VendorById>,

    /// Packages indexed by `(vendor id, package id)`.
    pub packages: BTreeMap<(u64, u64), PackageByIdData>,

    /// Titles indexed by title id.
    pub titles: BTreeMap<u64, Title>,

    pub root: RootProxyCustomLabels,

    pub proxies: Vec<ProxyWithUrl>,

    pub load_status: LoadStatus,

    /// Whether a holdings load is currently running.
    pub load_running: bool,

    /// Credentials returned by `GET /eholdings/user-kb-credential`.
    pub credentials: Option<Configuration>,

    /// If set, RMAPI requests must carry this `X-Api-Key`.
    pub required_api_key: Option<String>,

    next_id: u64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self {
            next_id: 1000,
            ..Default::default()
        }
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    pub fn with_vendor(mut self, vendor: VendorById) -> Self {
        self.vendors.insert(vendor.vendor_id, vendor);
        self
    }

    pub fn with_package(mut self, package: PackageByIdData) -> Self {
        self.packages
            .insert((package.vendor_id, package.package_id), package);
        self
    }

    pub fn with_title(mut self, title: Title) -> Self {
        self.titles.insert(title.title_id, title);
        self
    }

    pub fn with_credentials(mut self, credentials: Configuration) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_required_api_key(mut self, api_key: &str) -> Self {
        self.required_api_key = Some(api_key.to_string());
        self
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Vendors whose name contains `q` (case-insensitive).
    pub fn list_vendors(&self, q: Option<&str>) -> Vec<&VendorById> {
        self.vendors
            .values()
            .filter(|v| matches_name(&v.vendor_name, q))
            .collect()
    }

    /// Packages filtered by vendor, name and selection.
    pub fn list_packages(
        &self,
        vendor_id: Option<u64>,
        q: Option<&str>,
        selection: Option<&str>,
    ) -> Vec<&PackageByIdData> {
        self.packages
            .values()
            .filter(|p| vendor_id.map_or(true, |id| p.vendor_id == id))
            .filter(|p| matches_name(&p.package_name, q))
            .filter(|p| match selection {
                Some("selected") => p.is_selected,
                Some("notselected") => !p.is_selected,
                _ => true,
            })
            .collect()
    }

    /// Titles matching `q` in `search_field` (`titlename`, `isxn`,
    /// `subject` or `publisher`), optionally limited to one package.
    ///
    /// Within a package only that package's resource is returned.
    pub fn list_titles(
        &self,
        package: Option<PackageId>,
        search_field: &str,
        q: Option<&str>,
    ) -> Vec<Title> {
        self.titles
            .values()
            .filter(|t| title_matches(t, search_field, q))
            .filter_map(|t| match package {
                Some(id) => self.title_in_package(t, id),
                None => Some(t.clone()),
            })
            .collect()
    }

    fn title_in_package(&self, title: &Title, package: PackageId) -> Option<Title> {
        let resource = title
            .resources()
            .iter()
            .find(|r| {
                r.vendor_id == package.provider_id_part && r.package_id == package.package_id_part
            })?
            .clone();
        Some(Title {
            customer_resources_list: Some(vec![resource]),
            ..title.clone()
        })
    }

    /// A title restricted to its resource in one package.
    pub fn get_resource(&self, id: ResourceId) -> Option<Title> {
        let title = self.titles.get(&id.title_id_part)?;
        self.title_in_package(title, id.package_id())
    }

    fn resource_mut(&mut self, id: ResourceId) -> Option<&mut CustomerResources> {
        self.titles
            .get_mut(&id.title_id_part)?
            .customer_resources_list
            .as_mut()?
            .iter_mut()
            .find(|r| r.vendor_id == id.provider_id_part && r.package_id == id.package_id_part)
    }

    /// Apply a resource PUT. Returns `false` if the resource does not exist.
    pub fn update_resource(&mut self, id: ResourceId, put: ResourcePut) -> bool {
        let Some(resource) = self.resource_mut(id) else {
            return false;
        };
        if let Some(selected) = put.is_selected {
            resource.is_selected = selected;
        }
        if let Some(url) = put.url {
            resource.url = Some(url);
        }
        if let Some(statement) = put.coverage_statement {
            resource.coverage_statement = Some(statement);
        }
        if let Some(coverage) = put.custom_coverage_list {
            resource.custom_coverage_list = coverage;
        }
        if put.proxy.is_some() {
            resource.proxy = put.proxy;
        }
        true
    }

    pub fn update_vendor(&mut self, id: u64, put: VendorPut) -> bool {
        let Some(vendor) = self.vendors.get_mut(&id) else {
            return false;
        };
        if put.proxy.is_some() {
            vendor.proxy = put.proxy;
        }
        true
    }

    /// Apply a package PUT. Returns `false` if the package does not exist.
    pub fn update_package(&mut self, id: PackageId, put: PackagePut) -> bool {
        let key = (id.provider_id_part, id.package_id_part);
        let Some(package) = self.packages.get_mut(&key) else {
            return false;
        };
        if let Some(selected) = put.is_selected {
            package.package.is_selected = selected;
            package.package.selected_count = if selected {
                package.package.title_count
            } else {
                0
            };
        }
        if let Some(allow) = put.allow_ebsco_to_add_titles {
            package.package.allow_ebsco_to_add_titles = Some(allow);
        }
        if let Some(coverage) = put.custom_coverage {
            package.package.custom_coverage = Some(coverage);
        }
        if let Some(name) = put.package_name {
            package.package.package_name = name;
        }
        if put.proxy.is_some() {
            package.proxy = put.proxy;
        }
        true
    }

    /// Create a custom package. Returns `None` if the vendor does not exist.
    pub fn add_package(&mut self, vendor_id: u64, post: PackagePost) -> Option<u64> {
        let vendor_name = self.vendors.get(&vendor_id)?.vendor_name.clone();
        let package_id = self.allocate_id();

        let mut package = PackageByIdData::default();
        package.package.package_id = package_id;
        package.package.vendor_id = vendor_id;
        package.package.vendor_name = vendor_name;
        package.package.package_name = post.package_name;
        package.package.is_custom = true;
        package.package.is_selected = true;
        package.package.custom_coverage = post.custom_coverage;
        package.package.package_type = Some("Custom".to_string());

        self.packages.insert((vendor_id, package_id), package);
        if let Some(vendor) = self.vendors.get_mut(&vendor_id) {
            vendor.packages_total += 1;
            vendor.packages_selected += 1;
        }
        Some(package_id)
    }

    /// Create a custom title in a package. Returns `None` if the package
    /// does not exist.
    pub fn add_title(&mut self, package: PackageId, post: TitlePost) -> Option<u64> {
        let key = (package.provider_id_part, package.package_id_part);
        let data = self.packages.get(&key)?.package.clone();
        let title_id = self.allocate_id();

        let resource = CustomerResources {
            title_id,
            package_id: data.package_id,
            package_name: data.package_name,
            is_package_custom: data.is_custom,
            vendor_id: data.vendor_id,
            vendor_name: data.vendor_name,
            is_selected: true,
            ..Default::default()
        };

        self.titles.insert(
            title_id,
            Title {
                title_id,
                title_name: post.title_name,
                publisher_name: post.publisher_name,
                pub_type: post.pub_type,
                is_title_custom: true,
                edition: post.edition,
                description: post.description,
                is_peer_reviewed: post.is_peer_reviewed,
                identifiers_list: post.identifiers_list,
                contributors_list: post.contributors_list,
                customer_resources_list: Some(vec![resource]),
                ..Default::default()
            },
        );
        if let Some(package) = self.packages.get_mut(&key) {
            package.package.title_count += 1;
            package.package.selected_count += 1;
        }
        Some(title_id)
    }
}

fn title_matches(title: &Title, search_field: &str, q: Option<&str>) -> bool {
    match search_field {
        "isxn" => q.map_or(true, |q| title.identifiers_list.iter().any(|i| i.id == q)),
        "subject" => q.map_or(true, |q| {
            title
                .subjects_list
                .iter()
                .any(|s| matches_name(&s.subject, Some(q)))
        }),
        "publisher" => matches_name(title.publisher_name.as_deref().unwrap_or_default(), q),
        _ => matches_name(&title.title_name, q),
    }
}

fn matches_name(name: &str, q: Option<&str>) -> bool {
    q.filter(|q| !q.is_empty())
        .map(|q| name.to_lowercase().contains(&q.to_lowercase()))
        .unwrap_or(true)
}
