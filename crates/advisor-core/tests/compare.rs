//! End-to-end tests: parse cached OAI records and rank them against each other

use std::fs;
use std::path::PathBuf;

use advisor_core::config::{AdvisorConfig, FetchConfig};
use advisor_core::fetch::{ArticleId, MetadataCache, MetadataClient};
use advisor_core::similarity::AUTHOR_MATCH_WEIGHT;
use advisor_core::{compare_articles, parse_article_xml, AdvisorError, CommonWordSet, Comparator};
use tempfile::tempdir;

const GRAVITY_WAVES: &str = include_str!("fixtures/1301.0001.xml");
const GRAVITON_MASS: &str = include_str!("fixtures/1301.0002.xml");
const LATTICE_QCD: &str = include_str!("fixtures/1301.0003.xml");
const MISSING: &str = include_str!("fixtures/missing.xml");

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn common() -> CommonWordSet {
    CommonWordSet::load(&fixture_path("common.txt")).unwrap()
}

fn seed_cache(cache: &MetadataCache) {
    for (id, xml) in [
        ("1301.0001", GRAVITY_WAVES),
        ("1301.0002", GRAVITON_MASS),
        ("1301.0003", LATTICE_QCD),
    ] {
        cache.store(&ArticleId::parse(id).unwrap(), xml).unwrap();
    }
}

#[test]
fn test_common_word_file_loads_ranks() {
    let common = common();
    assert_eq!(common.len(), 16);
    assert_eq!(common.rank("the"), Some(1));
    assert!(common.contains("from"));
}

#[test]
fn test_related_article_outranks_unrelated() {
    let common = common();
    let reference = parse_article_xml(GRAVITY_WAVES, &common).unwrap();
    let related = parse_article_xml(GRAVITON_MASS, &common).unwrap();
    let unrelated = parse_article_xml(LATTICE_QCD, &common).unwrap();

    let self_score = compare_articles(&reference, &reference, &common).unwrap();
    let related_score = compare_articles(&reference, &related, &common).unwrap();
    let unrelated_score = compare_articles(&reference, &unrelated, &common).unwrap();

    assert!(self_score <= 1.0);
    assert!(self_score > related_score);
    assert!(related_score > unrelated_score);
    assert!(unrelated_score >= 0.0);
}

#[test]
fn test_shared_signals_in_breakdown() {
    let common = common();
    let reference = parse_article_xml(GRAVITY_WAVES, &common).unwrap();
    let related = parse_article_xml(GRAVITON_MASS, &common).unwrap();

    let breakdown = Comparator::new(&common)
        .breakdown(&reference, &related)
        .unwrap();
    // "gravitational" and "waves" appear in both titles; gr-qc in both category lists
    assert_eq!(breakdown.title_overlap, 20.0);
    assert_eq!(breakdown.category_overlap, 100.0);
    assert_eq!(breakdown.sub_category_overlap, 0.0);
    assert!(breakdown.abstract_overlap > 0.0);
}

#[test]
fn test_missing_record_is_not_found() {
    let err = parse_article_xml(MISSING, &common()).unwrap_err();
    match err {
        AdvisorError::ArticleNotFound { identifier } => assert_eq!(identifier, "1301.9999"),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_rank_cached_articles() {
    let dir = tempdir().unwrap();
    let cache = MetadataCache::new(dir.path());
    seed_cache(&cache);
    // A cached error response is skipped when loading
    cache
        .store(&ArticleId::parse("1301.0004").unwrap(), MISSING)
        .unwrap();

    let common = common();
    let articles = cache.load_articles(&common).unwrap();
    assert_eq!(articles.len(), 3);

    let (reference, candidates) = articles.split_first().unwrap();
    assert_eq!(reference.identifier(), Some("1301.0001"));

    let related = Comparator::new(&common)
        .find_related(reference, candidates, 5, 0.0)
        .unwrap();
    let ids: Vec<_> = related.iter().map(|r| r.id.as_deref()).collect();
    assert_eq!(ids, vec![Some("1301.0002"), Some("1301.0003")]);
}

#[test]
fn test_configured_client_reads_cache_and_scores_authors() {
    let dir = tempdir().unwrap();
    let metadata_dir = dir.path().join("metadata");
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            "common_words = '{}'\n\n[scoring]\nauthor_match = {:.1}\n\n[fetch]\nbase_url = 'http://127.0.0.1:9/oai2'\nmetadata_dir = '{}'\ntimeout_seconds = 1\n",
            fixture_path("common.txt").display(),
            AUTHOR_MATCH_WEIGHT,
            metadata_dir.display()
        ),
    )
    .unwrap();

    let config = AdvisorConfig::load(&config_path).unwrap();
    let common = config.load_common_words().unwrap();
    let client = MetadataClient::new(config.fetch.clone());
    seed_cache(client.cache());

    let a = client
        .fetch_article(&ArticleId::from_parts("13", "01", "1", false).unwrap(), &common)
        .unwrap();
    let b = client
        .fetch_article(&ArticleId::parse("1301.0002").unwrap(), &common)
        .unwrap();

    let breakdown = config.comparator(&common).breakdown(&a, &b).unwrap();
    // Rainer Weiss authored both
    assert_eq!(breakdown.author_overlap, AUTHOR_MATCH_WEIGHT);
}

#[test]
fn test_future_year_flag_read_from_config() {
    let dir = tempdir().unwrap();
    let metadata_dir = dir.path().join("metadata");
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            "[fetch]\nbase_url = 'http://127.0.0.1:9/oai2'\nmetadata_dir = '{}'\nallow_future_years = true\ntimeout_seconds = 1\n",
            metadata_dir.display()
        ),
    )
    .unwrap();

    let config = AdvisorConfig::load(&config_path).unwrap();
    assert!(config.fetch.allow_future_years);
    let client = MetadataClient::new(config.fetch.clone());
    client
        .cache()
        .store(&ArticleId::parse("9901.0001").unwrap(), GRAVITY_WAVES)
        .unwrap();

    let article = client
        .fetch_by_parts("99", "01", "0001", &common())
        .unwrap();
    assert_eq!(article.title(), "Gravitational Waves from Binary Black Hole Mergers");

    let strict = MetadataClient::new(FetchConfig {
        allow_future_years: false,
        ..config.fetch
    });
    assert!(strict.fetch_by_parts("99", "01", "0001", &common()).is_err());
}

#[test]
fn test_uncached_fetch_without_network_fails() {
    let dir = tempdir().unwrap();
    let client = MetadataClient::new(FetchConfig {
        base_url: "http://127.0.0.1:9/oai2".to_string(),
        metadata_dir: dir.path().to_path_buf(),
        timeout_seconds: 1,
        ..FetchConfig::default()
    });

    let err = client
        .fetch_xml(&ArticleId::parse("1301.0001").unwrap())
        .unwrap_err();
    assert!(matches!(err, AdvisorError::Http { .. }));
    assert!(client.cache().cached_ids().unwrap().is_empty());
}
