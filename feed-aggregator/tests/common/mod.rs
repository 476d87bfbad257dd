#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use feed_aggregator::{FeedDocument, RawEntry};
use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Midnight UTC on the given day of January 2026.
pub fn day(n: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, n, 0, 0, 0).unwrap()
}

pub fn entry(id: &str, published_day: u32, author: Option<&str>) -> RawEntry {
    RawEntry {
        id: id.to_string(),
        title: format!("Post {}", id),
        url: format!("https://blog.example.com/{}", id),
        content: Some(format!("<p>Body of {}</p>", id)),
        published_at: Some(day(published_day)),
        author: author.map(str::to_string),
    }
}

pub fn document(feed_author: Option<&str>, entries: Vec<RawEntry>) -> FeedDocument {
    FeedDocument {
        title: Some("Test Feed".to_string()),
        feed_author: feed_author.map(str::to_string),
        site_url: None,
        entries,
    }
}

pub const ATOM_WITH_FEED_AUTHOR: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Octopress Blog</title>
  <link href="https://octo.example.com/atom.xml" rel="self"/>
  <link href="https://octo.example.com/"/>
  <updated>2026-01-09T12:00:00Z</updated>
  <id>https://octo.example.com/</id>
  <author>
    <name>Grace Brewster Hopper</name>
  </author>
  <entry>
    <title>Second post</title>
    <link href="https://octo.example.com/blog/second/"/>
    <updated>2026-01-08T12:00:00Z</updated>
    <id>https://octo.example.com/blog/second/</id>
    <content type="html">&lt;p&gt;second&lt;/p&gt;</content>
  </entry>
  <entry>
    <title>First post</title>
    <link href="https://octo.example.com/blog/first/"/>
    <updated>2026-01-02T12:00:00Z</updated>
    <id>https://octo.example.com/blog/first/</id>
    <content type="html">&lt;p&gt;first&lt;/p&gt;</content>
  </entry>
</feed>
"#;

pub const ATOM_WITH_ENTRY_AUTHORS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Group Blog</title>
  <updated>2026-01-09T12:00:00Z</updated>
  <id>urn:example:group</id>
  <entry>
    <title>Guest post</title>
    <link href="https://group.example.com/guest"/>
    <id>urn:example:group:guest</id>
    <published>2026-01-07T09:30:00+02:00</published>
    <updated>2026-01-07T09:30:00+02:00</updated>
    <author><name>Ada Lovelace</name></author>
    <summary>A guest summary</summary>
  </entry>
  <entry>
    <title>Anonymous post</title>
    <link href="https://group.example.com/anon"/>
    <id>urn:example:group:anon</id>
    <updated>2026-01-06T09:30:00Z</updated>
    <summary>No byline here</summary>
  </entry>
</feed>
"#;

pub const RSS_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Plain RSS</title>
    <link>https://rss.example.com/</link>
    <description>An RSS 2.0 feed</description>
    <item>
      <title>Newest</title>
      <link>https://rss.example.com/newest</link>
      <guid>post-42</guid>
      <pubDate>Tue, 06 Jan 2026 10:00:00 +0000</pubDate>
      <description>Newest item</description>
    </item>
    <item>
      <title>Older</title>
      <link>https://rss.example.com/older</link>
      <guid>post-41</guid>
      <pubDate>Mon, 05 Jan 2026 10:00:00 +0000</pubDate>
      <description>Older item</description>
    </item>
  </channel>
</rss>
"#;
