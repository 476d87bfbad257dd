use feed_aggregator::config::{load_url_list, strip_outer_quotes};
use feed_aggregator::{AggregatorConfig, AggregatorError, AuthorIdentity, FeedSource};
use std::fs;

#[test]
fn test_defaults() {
    let config = AggregatorConfig::from_toml_str("").unwrap();

    assert_eq!(config.title, "Blog Feed");
    assert_eq!(config.post_limit, 5);
    assert!(config.sources.is_empty());
    assert_eq!(config.author_identity, AuthorIdentity::NameAndSource);
    assert_eq!(config.fetch.timeout_seconds, 30);
    assert_eq!(config.fetch.concurrency, 4);
}

#[test]
fn test_toml_sources_in_both_forms() {
    let config = AggregatorConfig::from_toml_str(
        r#"
        title = "'Planet Example'"
        post_limit = 3
        author_identity = "name_only"
        sources = [
            "https://a.example.com/feed",
            { url = "https://b.example.com/atom.xml", post_limit = 10 },
        ]

        [fetch]
        concurrency = 2
        "#,
    )
    .unwrap();

    assert_eq!(config.post_limit, 3);
    assert_eq!(config.author_identity, AuthorIdentity::NameOnly);
    assert_eq!(config.fetch.concurrency, 2);
    assert_eq!(config.fetch.timeout_seconds, 30);
    assert_eq!(
        config.sources,
        vec![
            FeedSource::new("https://a.example.com/feed"),
            FeedSource::new("https://b.example.com/atom.xml").with_post_limit(10),
        ]
    );
    assert_eq!(config.normalized().title, "Planet Example");
}

#[test]
fn test_feed_list_alias() {
    let config =
        AggregatorConfig::from_toml_str(r#"feed_list = ["https://a.example.com/feed"]"#).unwrap();
    assert_eq!(config.sources.len(), 1);
}

#[test]
fn test_malformed_toml_is_a_syntax_error() {
    let err = AggregatorConfig::from_toml_str("post_limit = [").unwrap_err();
    assert!(matches!(err, AggregatorError::ConfigSyntax(_)));

    let err = AggregatorConfig::from_toml_str("post_limit = -1").unwrap_err();
    assert!(matches!(err, AggregatorError::ConfigSyntax(_)));
}

#[test]
fn test_normalized_collapses_duplicate_sources() {
    let config = AggregatorConfig {
        sources: vec![
            FeedSource::new("https://a.example.com/feed").with_post_limit(2),
            FeedSource::new("https://b.example.com/feed"),
            FeedSource::new("https://a.example.com/feed"),
        ],
        ..AggregatorConfig::default()
    };

    let normalized = config.normalized();

    assert_eq!(normalized.sources.len(), 2);
    assert_eq!(normalized.sources[0].post_limit, Some(2));
    assert_eq!(normalized.sources[1].url, "https://b.example.com/feed");
}

#[test]
fn test_strip_outer_quotes() {
    assert_eq!(strip_outer_quotes("'My Feed'"), "My Feed");
    assert_eq!(strip_outer_quotes("\"\"Quoted\"\""), "Quoted");
    assert_eq!(strip_outer_quotes("Bob's Blog"), "Bob's Blog");
    assert_eq!(strip_outer_quotes("Plain"), "Plain");
}

#[test]
fn test_inline_source_specs() {
    let source: FeedSource = "url:https://a.example.com/feed count:3".parse().unwrap();
    assert_eq!(source, FeedSource::new("https://a.example.com/feed").with_post_limit(3));

    let source: FeedSource = "https://b.example.com/feed".parse().unwrap();
    assert_eq!(source.post_limit, None);

    let bad_specs = [
        "count:3",
        "url:https://a.example.com count:many",
        "url:https://a.example.com size:9",
        "url:https://a.example.com url:https://b.example.com",
        "url:https://a.example.com count:3 count:4",
        "",
    ];
    for bad in bad_specs {
        let err = bad.parse::<FeedSource>().unwrap_err();
        assert!(
            matches!(err, AggregatorError::ConfigSyntax(_)),
            "expected syntax error for {:?}",
            bad
        );
    }
}

#[test]
fn test_url_list_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("feeds.txt");
    fs::write(
        &path,
        "https://a.example.com/feed\r\n\
         https://b.example.com/feed\n\n  https://c.example.com/feed  \n",
    )
    .unwrap();

    let sources = load_url_list(&path).unwrap();
    let urls: Vec<&str> = sources.iter().map(|s| s.url.as_str()).collect();

    assert_eq!(
        urls,
        vec![
            "https://a.example.com/feed",
            "https://b.example.com/feed",
            "https://c.example.com/feed"
        ]
    );
}

#[test]
fn test_config_file_pulls_in_url_list() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("feeds.txt"), "https://listed.example.com/feed\n").unwrap();
    let config_path = dir.path().join("aggregator.toml");
    fs::write(
        &config_path,
        r#"
        sources = ["https://inline.example.com/feed"]
        url_list = "feeds.txt"
        "#,
    )
    .unwrap();

    let config = AggregatorConfig::from_file(&config_path).unwrap();
    let urls: Vec<&str> = config.sources.iter().map(|s| s.url.as_str()).collect();

    assert_eq!(urls, vec!["https://inline.example.com/feed", "https://listed.example.com/feed"]);
}

#[test]
fn test_missing_config_file_is_io_error() {
    let path = std::path::Path::new("/nonexistent/aggregator.toml");
    let err = AggregatorConfig::from_file(path).unwrap_err();
    assert!(matches!(err, AggregatorError::Io(_)));
}
