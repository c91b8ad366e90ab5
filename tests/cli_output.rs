//! CLI output formatting: JSON with `--json`, pretty-print otherwise.

use holdingsiq::output::PrettyPrint;
use holdingsiq::{CoverageDates, PackageByIdData, PackageData, Title, VendorById};

fn make_package() -> PackageByIdData {
    PackageByIdData {
        package: PackageData {
            package_id: 3964,
            package_name: "Academic Search Complete".to_string(),
            vendor_id: 19,
            vendor_name: "EBSCO".to_string(),
            title_count: 100,
            selected_count: 40,
            content_type: Some("AggregatedFullText".to_string()),
            is_selected: true,
            custom_coverage: Some(CoverageDates::new("2001-01-01", "")),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn test_json_output_uses_rmapi_field_names() {
    let json = serde_json::to_value(make_package()).unwrap();

    assert_eq!(json["packageId"], 3964);
    assert_eq!(json["vendorName"], "EBSCO");
    assert_eq!(json["isSelected"], true);
    assert!(json.get("package").is_none(), "package fields are flattened");
}

#[test]
fn test_package_pretty_print() {
    let output = make_package().pretty_print();

    assert!(output.starts_with("Package: 19-3964"));
    assert!(output.contains("Name:           Academic Search Complete"));
    assert!(output.contains("Titles:         40 selected of 100"));
    assert!(output.contains("Selected:       yes"));
    assert!(output.contains("Coverage:       2001-01-01 to present"));
    assert!(!output.contains("Custom:"));
}

#[test]
fn test_provider_pretty_print_without_proxy() {
    let vendor = VendorById {
        vendor_id: 20,
        vendor_name: "Gale".to_string(),
        ..Default::default()
    };

    let output = vendor.pretty_print();
    assert!(output.contains("Name:           Gale"));
    assert!(!output.contains("Proxy:"));
}

#[test]
fn test_title_pretty_print_without_resources() {
    let title = Title {
        title_id: 1,
        title_name: "Lonely Title".to_string(),
        publisher_name: Some("Wiley".to_string()),
        ..Default::default()
    };

    let output = title.pretty_print();
    assert!(output.contains("Publisher:      Wiley"));
    assert!(!output.contains("Resource:"));
}
