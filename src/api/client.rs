use log::{debug, warn};
use reqwest::Client;
use url::form_urlencoded;

use super::http_client::{build_client, TransportConfig};
use super::types::*;
use super::xml::parse_api_error;
use crate::error::{Result, XmlSearchError};

const ENDPOINT_TEMPLATE: &str = "https://yandex.{domain}/search/xml";
const DOMAIN_TOKEN: &str = "{domain}";

const MAX_PASSAGES_RANGE: std::ops::RangeInclusive<u32> = 1..=5;
const GROUPS_ON_PAGE_RANGE: std::ops::RangeInclusive<u32> = 1..=100;
const DOCS_IN_GROUP_RANGE: std::ops::RangeInclusive<u32> = 1..=3;

/// Yandex XML search client.
///
/// Options are set in place through chained setters; validated setters
/// return `Result<&mut Self>` and leave the client untouched on failure.
///
/// ```no_run
/// # async fn run() -> yandex_xml::error::Result<()> {
/// use yandex_xml::api::{XmlClient, types::{SortDirection, SortType}};
///
/// let mut client = XmlClient::new("user", "key");
/// client
///     .set_query("rust")
///     .set_sort(SortType::Tm, Some(SortDirection::Descending))
///     .set_region(213)?;
/// let body = client.execute().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct XmlClient {
    user: String,
    key: String,
    domain: Domain,
    endpoint_override: Option<String>,
    http_client: Option<Client>,

    region: Option<u32>,
    language: Option<Language>,
    sort_type: Option<SortType>,
    sort_direction: Option<SortDirection>,
    filter: Option<FilterLevel>,
    max_passages: Option<u32>,
    group_mode: Option<GroupMode>,
    groups_on_page: Option<u32>,
    docs_in_group: Option<u32>,
    page: Option<u64>,
    captcha: bool,
    action: Option<Action>,
    query: Option<String>,
}

impl XmlClient {
    /// Create a client for `yandex.ru`
    pub fn new(user: impl Into<String>, key: impl Into<String>) -> Self {
        Self::with_domain(user, key, Domain::default())
    }

    /// Create a client for the given search domain
    pub fn with_domain(user: impl Into<String>, key: impl Into<String>, domain: Domain) -> Self {
        Self {
            user: user.into(),
            key: key.into(),
            domain,
            endpoint_override: None,
            http_client: None,
            region: None,
            language: None,
            sort_type: None,
            sort_direction: None,
            filter: None,
            max_passages: None,
            group_mode: None,
            groups_on_page: None,
            docs_in_group: None,
            page: None,
            captcha: false,
            action: None,
            query: None,
        }
    }

    /// Use a full endpoint URL instead of the domain-based one.
    /// The URL is used as given, without domain substitution.
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint_override = Some(url.into());
        self
    }

    /// Send requests through the given HTTP client
    pub fn with_http_client(mut self, http_client: Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Set the search region (`lr`).
    ///
    /// See <https://yandex.ru/dev/xml/doc/dg/reference/regions.html>
    pub fn set_region(&mut self, id: u32) -> Result<&mut Self> {
        if !is_valid_region(id) {
            return Err(XmlSearchError::InvalidArgument(format!(
                "unknown region id: {}",
                id
            )));
        }
        self.region = Some(id);
        Ok(self)
    }

    /// Set the response language (`l10n`)
    pub fn set_response_language(&mut self, language: Language) -> Result<&mut Self> {
        if !language.is_allowed_on(self.domain) {
            return Err(XmlSearchError::InvalidArgument(format!(
                "response language '{}' is not available on domain '{}'",
                language, self.domain
            )));
        }
        self.language = Some(language);
        Ok(self)
    }

    /// Set sorting. The direction is only stored for `SortType::Tm`;
    /// with `SortType::Rlv` it is ignored and any earlier direction is kept.
    pub fn set_sort(&mut self, sort_type: SortType, direction: Option<SortDirection>) -> &mut Self {
        if let (SortType::Tm, Some(direction)) = (sort_type, direction) {
            self.sort_direction = Some(direction);
        }
        self.sort_type = Some(sort_type);
        self
    }

    /// Set the family filter
    pub fn set_filter(&mut self, level: FilterLevel) -> &mut Self {
        self.filter = Some(level);
        self
    }

    /// Set the maximum number of passages per document
    pub fn set_max_passages(&mut self, number: u32) -> Result<&mut Self> {
        if !MAX_PASSAGES_RANGE.contains(&number) {
            return Err(XmlSearchError::InvalidArgument(format!(
                "max passages must be in {:?}, got {}",
                MAX_PASSAGES_RANGE, number
            )));
        }
        self.max_passages = Some(number);
        Ok(self)
    }

    /// Set result grouping. Limits left as `None` keep their previous value.
    pub fn set_group_by(
        &mut self,
        mode: GroupMode,
        groups_on_page: Option<u32>,
        docs_in_group: Option<u32>,
    ) -> Result<&mut Self> {
        if let Some(groups) = groups_on_page.filter(|n| !GROUPS_ON_PAGE_RANGE.contains(n)) {
            return Err(XmlSearchError::InvalidArgument(format!(
                "groups on page must be in {:?}, got {}",
                GROUPS_ON_PAGE_RANGE, groups
            )));
        }
        if let Some(docs) = docs_in_group.filter(|n| !DOCS_IN_GROUP_RANGE.contains(n)) {
            return Err(XmlSearchError::InvalidArgument(format!(
                "docs in group must be in {:?}, got {}",
                DOCS_IN_GROUP_RANGE, docs
            )));
        }

        self.group_mode = Some(mode);
        if groups_on_page.is_some() {
            self.groups_on_page = groups_on_page;
        }
        if docs_in_group.is_some() {
            self.docs_in_group = docs_in_group;
        }
        Ok(self)
    }

    /// Set the result page, starting from 0
    pub fn set_page(&mut self, number: i64) -> Result<&mut Self> {
        let page = u64::try_from(number).map_err(|_| {
            XmlSearchError::InvalidArgument(format!("page must be a non-negative number, got {}", number))
        })?;
        self.page = Some(page);
        Ok(self)
    }

    /// Show a captcha on the result page
    pub fn enable_captcha(&mut self) -> &mut Self {
        self.captcha = true;
        self
    }

    /// Set the search query
    pub fn set_query(&mut self, query: impl Into<String>) -> &mut Self {
        self.query = Some(query.into());
        self
    }

    /// Request limits info instead of search results.
    /// Takes precedence over the query when rendering.
    pub fn set_action(&mut self) -> &mut Self {
        self.action = Some(Action::LimitsInfo);
        self
    }

    /// API user
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Search domain
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Region id (`lr`)
    pub fn region(&self) -> Option<u32> {
        self.region
    }

    /// Response language (`l10n`)
    pub fn language(&self) -> Option<Language> {
        self.language
    }

    /// Sort type and stored direction
    pub fn sort(&self) -> (Option<SortType>, Option<SortDirection>) {
        (self.sort_type, self.sort_direction)
    }

    /// Family filter level
    pub fn filter(&self) -> Option<FilterLevel> {
        self.filter
    }

    /// Maximum passages per document
    pub fn max_passages(&self) -> Option<u32> {
        self.max_passages
    }

    /// Group mode, groups on page, docs in group
    pub fn group_by(&self) -> (Option<GroupMode>, Option<u32>, Option<u32>) {
        (self.group_mode, self.groups_on_page, self.docs_in_group)
    }

    /// Result page
    pub fn page(&self) -> Option<u64> {
        self.page
    }

    /// Whether the captcha is requested
    pub fn captcha_enabled(&self) -> bool {
        self.captcha
    }

    /// Requested action
    pub fn action(&self) -> Option<Action> {
        self.action
    }

    /// Search query
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Endpoint URL without parameters
    pub fn endpoint_url(&self) -> String {
        match &self.endpoint_override {
            Some(url) => url.clone(),
            None => ENDPOINT_TEMPLATE.replace(DOMAIN_TOKEN, self.domain.as_str()),
        }
    }

    /// Ordered request parameters, credentials last
    pub fn query_params(&self) -> Result<Vec<(&'static str, String)>> {
        let mut params = Vec::new();

        if let Some(action) = self.action {
            params.push(("action", action.to_string()));
        } else {
            let query = self
                .query
                .as_deref()
                .filter(|q| !q.is_empty())
                .ok_or(XmlSearchError::MissingQuery)?;
            params.push(("query", query.to_string()));

            if let Some(region) = self.region {
                params.push(("lr", region.to_string()));
            }
            if let Some(language) = self.language {
                params.push(("l10n", language.to_string()));
            }
            // page 0 is the API default and is not sent
            if let Some(page) = self.page.filter(|p| *p > 0) {
                params.push(("page", page.to_string()));
            }
            if self.captcha {
                params.push(("showmecaptcha", "yes".to_string()));
            }
            if let Some(max_passages) = self.max_passages {
                params.push(("maxpassages", max_passages.to_string()));
            }
            if let Some(filter) = self.filter {
                params.push(("filter", filter.to_string()));
            }
            if let Some(sort_type) = self.sort_type {
                params.push(("sortby", self.sort_by_attribute(sort_type)));
            }
            if let Some(mode) = self.group_mode {
                params.push(("groupby", self.group_by_attribute(mode)));
            }
        }

        if params.is_empty() {
            return Err(XmlSearchError::EmptyRequest);
        }

        params.push(("user", self.user.clone()));
        params.push(("key", self.key.clone()));

        Ok(params)
    }

    /// Endpoint URL with the form-encoded query string
    pub fn full_url(&self) -> Result<String> {
        let params = self.query_params()?;
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params.iter().map(|(name, value)| (*name, value.as_str())))
            .finish();
        Ok(format!("{}?{}", self.endpoint_url(), query))
    }

    fn sort_by_attribute(&self, sort_type: SortType) -> String {
        let mut value = sort_type.to_string();
        if let Some(direction) = self.sort_direction {
            value.push_str(&format!(".order={}", direction));
        }
        value
    }

    fn group_by_attribute(&self, mode: GroupMode) -> String {
        let mut value = mode.to_string();
        if mode == GroupMode::Deep {
            value.push_str(".attr=d");
        }
        if let Some(groups) = self.groups_on_page {
            value.push_str(&format!(".groups-on-page={}", groups));
        }
        if let Some(docs) = self.docs_in_group {
            value.push_str(&format!(".docs-in-group={}", docs));
        }
        value
    }

    /// Send the request and return the raw response body.
    ///
    /// A 4xx response carrying an XML `response.error` element becomes
    /// `XmlSearchError::RemoteApi`. Any other HTTP or network failure is
    /// returned as the transport's own error.
    pub async fn execute(&self) -> Result<String> {
        let url = self.full_url()?;
        match self.action {
            Some(action) => debug!("GET {} (action: {})", self.endpoint_url(), action),
            None => debug!("GET {} (query)", self.endpoint_url()),
        }

        let http_client = match &self.http_client {
            Some(client) => client.clone(),
            None => build_client(&TransportConfig::default())?,
        };

        let response = http_client.get(&url).send().await?;
        let status = response.status();
        debug!("Response status: {}", status);

        if let Some(status_error) = response.error_for_status_ref().err() {
            if status.is_client_error() {
                if let Ok(body) = response.text().await {
                    if let Some(api_error) = parse_api_error(&body) {
                        warn!("Yandex API error {}: {}", api_error.code, api_error.message);
                        return Err(XmlSearchError::remote(api_error.message, api_error.code));
                    }
                }
            }
            return Err(status_error.into());
        }

        Ok(response.text().await?)
    }
}
