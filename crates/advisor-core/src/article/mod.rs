//! Parsed article records
//!
//! A [`ParsedArticle`] is immutable once built. Word lists are lowercase and
//! deduplicated; category lists keep duplicates because the comparator counts
//! every occurrence.

mod parse;

pub use parse::parse_article_xml;

use chrono::NaiveDate;
use serde::Serialize;

use crate::bail_invalid;
use crate::common::CommonWordSet;
use crate::error::Result;
use crate::text::{dedup_lowercase, get_words, normalize_abstract};

/// Bibliographic metadata for one article, ready for comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedArticle {
    identifier: Option<String>,
    title: String,
    #[serde(rename = "abstract")]
    abstract_text: String,
    created: Option<NaiveDate>,
    authors: Vec<String>,
    categories: Vec<String>,
    sub_categories: Vec<String>,
    uncommon_title_words: Vec<String>,
    uncommon_abstract_words: Vec<String>,
}

impl ParsedArticle {
    /// Start building an article from its title and abstract
    pub fn builder(
        title: impl Into<String>,
        abstract_text: impl Into<String>,
    ) -> ParsedArticleBuilder {
        ParsedArticleBuilder {
            article: ParsedArticle {
                identifier: None,
                title: title.into(),
                abstract_text: abstract_text.into(),
                created: None,
                authors: Vec::new(),
                categories: Vec::new(),
                sub_categories: Vec::new(),
                uncommon_title_words: Vec::new(),
                uncommon_abstract_words: Vec::new(),
            },
        }
    }

    /// Build an article from raw text and a space-separated category code
    /// list such as `"gr-qc astro-ph.CO"`
    pub fn from_text(
        title: &str,
        abstract_text: &str,
        category_codes: &str,
        common: &CommonWordSet,
    ) -> Result<Self> {
        let (categories, sub_categories) = parse::split_categories(category_codes);
        Self::builder(title, abstract_text)
            .categories(categories)
            .sub_categories(sub_categories)
            .derive_words(common)
            .build()
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn abstract_text(&self) -> &str {
        &self.abstract_text
    }

    pub fn created(&self) -> Option<NaiveDate> {
        self.created
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    /// Top-level category codes, duplicates included
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn sub_categories(&self) -> &[String] {
        &self.sub_categories
    }

    pub fn uncommon_title_words(&self) -> &[String] {
        &self.uncommon_title_words
    }

    pub fn uncommon_abstract_words(&self) -> &[String] {
        &self.uncommon_abstract_words
    }

    /// Title immediately followed by the abstract, as fed to the autocorrelator
    ///
    /// No separator is inserted, so the last title word can fuse with the
    /// first abstract word.
    pub fn scoring_text(&self) -> String {
        format!("{}{}", self.title, self.abstract_text)
    }
}

/// Builder for [`ParsedArticle`]
#[derive(Debug, Clone)]
pub struct ParsedArticleBuilder {
    article: ParsedArticle,
}

impl ParsedArticleBuilder {
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.article.identifier = Some(identifier.into());
        self
    }

    pub fn created(mut self, created: NaiveDate) -> Self {
        self.article.created = Some(created);
        self
    }

    pub fn authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.article.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.article.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn sub_categories<I, S>(mut self, sub_categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.article.sub_categories = sub_categories.into_iter().map(Into::into).collect();
        self
    }

    /// Set the uncommon title words (lowercased and deduplicated)
    pub fn uncommon_title_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.article.uncommon_title_words = dedup_lowercase(words);
        self
    }

    /// Set the uncommon abstract words (lowercased and deduplicated)
    pub fn uncommon_abstract_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.article.uncommon_abstract_words = dedup_lowercase(words);
        self
    }

    /// Normalize the abstract's whitespace and derive both uncommon word lists
    /// from the title and abstract text
    pub fn derive_words(mut self, common: &CommonWordSet) -> Self {
        self.article.abstract_text = normalize_abstract(&self.article.abstract_text);
        self.article.uncommon_title_words = uncommon_words(&self.article.title, common);
        self.article.uncommon_abstract_words = uncommon_words(&self.article.abstract_text, common);
        self
    }

    /// Finish the article; title and abstract must not be blank
    pub fn build(self) -> Result<ParsedArticle> {
        if self.article.title.trim().is_empty() {
            bail_invalid!("article title", "(empty)");
        }
        if self.article.abstract_text.trim().is_empty() {
            bail_invalid!("article abstract", "(empty)");
        }
        Ok(self.article)
    }
}

fn uncommon_words(text: &str, common: &CommonWordSet) -> Vec<String> {
    get_words(text)
        .into_iter()
        .filter(|w| !common.contains(w))
        .collect()
}
