//! Retrieval of arXiv metadata records over OAI-PMH
//!
//! Records are fetched one at a time with a blocking client and optionally
//! kept in a local directory so repeated runs stay off the network.

mod cache;

pub use cache::MetadataCache;

use std::fmt;
use std::time::Duration;

use chrono::Datelike;

use crate::article::{parse_article_xml, ParsedArticle};
use crate::bail_invalid;
use crate::common::CommonWordSet;
use crate::config::FetchConfig;
use crate::error::{AdvisorError, Result};

/// Query appended to the base URL, followed by the article identifier
const GET_RECORD_QUERY: &str = "?verb=GetRecord&metadataPrefix=arXiv&identifier=oai:arXiv.org:";

/// First year arXiv used `YYMM.NNNN` identifiers
const FIRST_YEAR: u32 = 7;

/// An arXiv article identifier such as `1301.0001`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArticleId(String);

impl ArticleId {
    /// Accept any non-empty identifier without whitespace
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() || s.chars().any(char::is_whitespace) {
            bail_invalid!("article identifier", format!("{:?}", s));
        }
        Ok(Self(s.to_string()))
    }

    /// Build a `YYMM.NNNN` identifier from its parts
    ///
    /// `number` is zero-padded to four digits. Unless `allow_future_years`
    /// is set, the year must lie between 07 and the current year.
    pub fn from_parts(
        year: &str,
        month: &str,
        number: &str,
        allow_future_years: bool,
    ) -> Result<Self> {
        let current_year = (chrono::Local::now().year() % 100) as u32;
        Self::from_parts_in(year, month, number, allow_future_years, current_year)
    }

    fn from_parts_in(
        year: &str,
        month: &str,
        number: &str,
        allow_future_years: bool,
        current_year: u32,
    ) -> Result<Self> {
        if year.len() != 2 {
            bail_invalid!("year", year);
        }
        if month.len() != 2 {
            bail_invalid!("month", month);
        }
        if number.len() > 4 {
            bail_invalid!("article number", number);
        }
        let number = format!("{:0>4}", number);

        let year_value = parse_digits("year", year)?;
        let month_value = parse_digits("month", month)?;
        parse_digits("article number", &number)?;

        if !allow_future_years && !(FIRST_YEAR..=current_year).contains(&year_value) {
            bail_invalid!("year", format!("{} (out of range)", year));
        }
        if !(1..=12).contains(&month_value) {
            bail_invalid!("month", format!("{} (out of range)", month));
        }

        Ok(Self(format!("{}{}.{}", year, month, number)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ArticleId {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn parse_digits(context: &str, value: &str) -> Result<u32> {
    if !value.chars().all(|c| c.is_ascii_digit()) {
        bail_invalid!(context, value);
    }
    value
        .parse()
        .map_err(|_| AdvisorError::invalid_value(context, value))
}

/// Blocking client for the OAI-PMH `GetRecord` endpoint
pub struct MetadataClient {
    config: FetchConfig,
    cache: MetadataCache,
    agent: ureq::Agent,
    user_agent: String,
}

impl MetadataClient {
    pub fn new(config: FetchConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_seconds)))
            .build()
            .into();
        let cache = MetadataCache::new(config.metadata_dir.clone());
        let user_agent = format!("advisor/{}", env!("CARGO_PKG_VERSION"));

        Self {
            config,
            cache,
            agent,
            user_agent,
        }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn cache(&self) -> &MetadataCache {
        &self.cache
    }

    /// URL of the `GetRecord` request for `id`
    pub fn record_url(&self, id: &ArticleId) -> String {
        format!(
            "{}{}{}",
            self.config.base_url.trim_end_matches('?'),
            GET_RECORD_QUERY,
            id
        )
    }

    /// Raw metadata XML for `id`
    ///
    /// A cached copy is returned as is and never re-saved. Downloaded records
    /// are cached when `save_local_copy` is set.
    #[tracing::instrument(skip(self, id), fields(id = %id))]
    pub fn fetch_xml(&self, id: &ArticleId) -> Result<String> {
        if self.config.use_local_copy {
            if let Some(xml) = self.cache.load(id)? {
                return Ok(xml);
            }
        }

        let xml = self.download(id)?;
        if self.config.save_local_copy {
            self.cache.store(id, &xml)?;
        }
        Ok(xml)
    }

    /// Build a `YYMM.NNNN` identifier, honoring `allow_future_years`
    pub fn article_id(&self, year: &str, month: &str, number: &str) -> Result<ArticleId> {
        ArticleId::from_parts(year, month, number, self.config.allow_future_years)
    }

    /// Fetch and parse the record for the identifier built from its parts
    pub fn fetch_by_parts(
        &self,
        year: &str,
        month: &str,
        number: &str,
        common: &CommonWordSet,
    ) -> Result<ParsedArticle> {
        let id = self.article_id(year, month, number)?;
        self.fetch_article(&id, common)
    }

    /// Fetch and parse the record for `id`
    pub fn fetch_article(&self, id: &ArticleId, common: &CommonWordSet) -> Result<ParsedArticle> {
        let xml = self.fetch_xml(id)?;
        parse_article_xml(&xml, common)
    }

    fn download(&self, id: &ArticleId) -> Result<String> {
        let url = self.record_url(id);
        tracing::debug!(url = %url, "Requesting record");

        let http_error = |e: ureq::Error| AdvisorError::Http {
            url: url.clone(),
            reason: e.to_string(),
        };
        let mut response = self
            .agent
            .get(&url)
            .header("User-Agent", &self.user_agent)
            .call()
            .map_err(http_error)?;
        response.body_mut().read_to_string().map_err(http_error)
    }
}
