//! Query strings for the RMAPI search endpoints.
//!
//! RMAPI pages with `offset` (1-indexed page number) and `count`, searches
//! with `search`, and sorts with `orderby`, which takes either `relevance`
//! or the endpoint's own name field (`vendorname`, `packagename`,
//! `titlename`).

use url::form_urlencoded;

use crate::models::{FilterQuery, Sort};

const RELEVANCE_PARAMETER: &str = "relevance";
const DEFAULT_PAGE: u32 = 1;
const DEFAULT_COUNT: u32 = 25;
const ALL: &str = "all";

pub(crate) const VENDOR_NAME_PARAMETER: &str = "vendorname";
pub(crate) const PACKAGE_NAME_PARAMETER: &str = "packagename";
pub(crate) const TITLE_NAME_PARAMETER: &str = "titlename";

/// Form-encode a search term the way RMAPI expects (space becomes `+`).
fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// `search`, `offset`, `count` and `orderby`.
#[derive(Debug, Clone)]
pub struct QueryableUrlBuilder<'a> {
    q: Option<&'a str>,
    page: u32,
    count: u32,
    sort: Option<Sort>,
    name_parameter: &'a str,
}

impl Default for QueryableUrlBuilder<'_> {
    fn default() -> Self {
        Self {
            q: None,
            page: DEFAULT_PAGE,
            count: DEFAULT_COUNT,
            sort: None,
            name_parameter: "",
        }
    }
}

impl<'a> QueryableUrlBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn q(mut self, q: Option<&'a str>) -> Self {
        self.q = q;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn sort(mut self, sort: Option<Sort>) -> Self {
        self.sort = sort;
        self
    }

    /// Field that `orderby` names when sorting by name.
    pub fn name_parameter(mut self, name_parameter: &'a str) -> Self {
        self.name_parameter = name_parameter;
        self
    }

    pub fn build(&self) -> String {
        let search = match self.q {
            Some(q) if !q.trim().is_empty() => encode(q),
            _ => String::new(),
        };

        format!(
            "search={}&offset={}&count={}&orderby={}",
            search,
            self.page,
            self.count,
            self.order_by()
        )
    }

    // Relevance only means something when there is a search term.
    fn order_by(&self) -> &'a str {
        match (self.q, self.sort) {
            (Some(_), Some(Sort::Relevance)) => RELEVANCE_PARAMETER,
            _ => self.name_parameter,
        }
    }
}

/// Package search: `selection`, `contenttype`, then the queryable part.
#[derive(Debug, Clone)]
pub struct PackagesFilterableUrlBuilder<'a> {
    filter_selected: Option<&'a str>,
    filter_type: Option<&'a str>,
    q: Option<&'a str>,
    page: u32,
    count: u32,
    sort: Option<Sort>,
}

impl Default for PackagesFilterableUrlBuilder<'_> {
    fn default() -> Self {
        Self {
            filter_selected: None,
            filter_type: None,
            q: None,
            page: DEFAULT_PAGE,
            count: DEFAULT_COUNT,
            sort: None,
        }
    }
}

impl<'a> PackagesFilterableUrlBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_selected(mut self, filter_selected: Option<&'a str>) -> Self {
        self.filter_selected = filter_selected;
        self
    }

    pub fn filter_type(mut self, filter_type: Option<&'a str>) -> Self {
        self.filter_type = filter_type;
        self
    }

    pub fn q(mut self, q: Option<&'a str>) -> Self {
        self.q = q;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn sort(mut self, sort: Option<Sort>) -> Self {
        self.sort = sort;
        self
    }

    pub fn build(&self) -> String {
        let query = QueryableUrlBuilder::new()
            .q(self.q)
            .page(self.page)
            .count(self.count)
            .sort(self.sort)
            .name_parameter(PACKAGE_NAME_PARAMETER)
            .build();

        format!(
            "selection={}&contenttype={}&{}",
            non_empty(self.filter_selected).unwrap_or(ALL),
            non_empty(self.filter_type).unwrap_or(ALL),
            query
        )
    }
}

/// Title search: `searchfield`, `selection`, `resourcetype`, `searchtype`,
/// optional `packageidfilter`, then the queryable part.
#[derive(Debug, Clone)]
pub struct TitlesFilterableUrlBuilder<'a> {
    filter: Option<&'a FilterQuery>,
    search_type: Option<&'a str>,
    page: u32,
    count: u32,
    sort: Option<Sort>,
}

impl Default for TitlesFilterableUrlBuilder<'_> {
    fn default() -> Self {
        Self {
            filter: None,
            search_type: None,
            page: DEFAULT_PAGE,
            count: DEFAULT_COUNT,
            sort: None,
        }
    }
}

impl<'a> TitlesFilterableUrlBuilder<'a> {
    pub const DEFAULT_SEARCH_TYPE: &'static str = "advanced";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: &'a FilterQuery) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn search_type(mut self, search_type: Option<&'a str>) -> Self {
        self.search_type = search_type;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn sort(mut self, sort: Option<Sort>) -> Self {
        self.sort = sort;
        self
    }

    pub fn build(&self) -> String {
        let empty = FilterQuery::default();
        let filter = self.filter.unwrap_or(&empty);

        const FIELDS: [&str; 4] = [TITLE_NAME_PARAMETER, "isxn", "subject", "publisher"];
        let (search_field, term) = FIELDS
            .iter()
            .zip(filter.search_parameters())
            .find_map(|(field, value)| value.map(|v| (*field, Some(v))))
            .unwrap_or((TITLE_NAME_PARAMETER, None));

        let mut parameters = vec![
            format!("searchfield={search_field}"),
            format!(
                "selection={}",
                non_empty(filter.selected.as_deref()).unwrap_or(ALL)
            ),
            format!(
                "resourcetype={}",
                non_empty(filter.resource_type.as_deref()).unwrap_or(ALL)
            ),
            format!(
                "searchtype={}",
                non_empty(self.search_type).unwrap_or(Self::DEFAULT_SEARCH_TYPE)
            ),
        ];

        if !filter.package_ids.is_empty() {
            let ids: Vec<String> = filter.package_ids.iter().map(u64::to_string).collect();
            parameters.push(format!("packageidfilter={}", ids.join(",")));
        }

        parameters.push(
            QueryableUrlBuilder::new()
                .q(term)
                .page(self.page)
                .count(self.count)
                .sort(self.sort)
                .name_parameter(TITLE_NAME_PARAMETER)
                .build(),
        );

        parameters.join("&")
    }
}
