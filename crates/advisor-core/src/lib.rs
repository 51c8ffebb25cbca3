//! Advisor Core Library
//!
//! Relatedness scoring for arXiv articles: autocorrelation ranking of the
//! words in an article's text, a weighted comparator over two parsed
//! articles, and retrieval of the OAI-PMH records they are parsed from.

pub mod article;
pub mod autocorrelation;
pub mod common;
pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod similarity;
pub mod text;

pub use article::{parse_article_xml, ParsedArticle};
pub use autocorrelation::{autocorrelate, AutocorrelationResult, WordScore};
pub use common::CommonWordSet;
pub use error::{AdvisorError, Result};
pub use similarity::{compare_articles, Comparator, ScoreBreakdown};
