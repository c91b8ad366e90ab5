//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{PackageByIdData, Title, VendorById};

/// Trait for human-readable key-value output.
///
/// Implemented by record types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

impl PrettyPrint for VendorById {
    fn pretty_print(&self) -> String {
        let header = format!("Provider: {}", self.vendor_id);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("Name:           {}", self.vendor_name),
            format!(
                "Packages:       {} selected of {}",
                self.packages_selected, self.packages_total
            ),
        ];

        if let Some(proxy) = self.proxy_id() {
            lines.push(format!("Proxy:          {}", proxy));
        }

        if self.vendor_token.is_some() {
            lines.push("Token:          required".to_string());
        }

        lines.join("\n")
    }
}

impl PrettyPrint for PackageByIdData {
    fn pretty_print(&self) -> String {
        let header = format!("Package: {}", self.full_id());
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("Name:           {}", self.package_name),
            format!("Provider:       {}", self.vendor_name),
            format!(
                "Titles:         {} selected of {}",
                self.selected_count, self.title_count
            ),
            format!("Selected:       {}", yes_no(self.is_selected)),
        ];

        if let Some(ref content_type) = self.content_type {
            lines.push(format!("Content Type:   {}", content_type));
        }

        if let Some(ref coverage) = self.custom_coverage {
            if let Some(begin) = coverage.begin_date() {
                let end = coverage
                    .end_date()
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "present".to_string());
                lines.push(format!("Coverage:       {} to {}", begin, end));
            }
        }

        if self.is_custom {
            lines.push("Custom:         yes".to_string());
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Title {
    fn pretty_print(&self) -> String {
        let header = format!("Title: {}", self.title_id);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("Name:           {}", self.title_name),
        ];

        if let Some(ref publisher) = self.publisher_name {
            lines.push(format!("Publisher:      {}", publisher));
        }

        if let Some(ref pub_type) = self.pub_type {
            lines.push(format!("Type:           {}", pub_type));
        }

        if !self.identifiers_list.is_empty() {
            let ids: Vec<&str> = self.identifiers_list.iter().map(|i| i.id.as_str()).collect();
            lines.push(format!("Identifiers:    {}", ids.join(", ")));
        }

        for resource in self.resources() {
            lines.push(format!(
                "Resource:       {}-{}-{} {} ({})",
                resource.vendor_id,
                resource.package_id,
                resource.title_id,
                resource.package_name,
                if resource.is_selected { "selected" } else { "not selected" }
            ));
        }

        lines.join("\n")
    }
}
