// Shared fixtures and helpers for the integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use daily_brief::types::{AggregatorError, FetchWindow, Item, Result, SourceKind};
use daily_brief::{FetchConfig, Fetcher, PullFeed};
use std::sync::{Arc, Mutex, Once};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

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

/// Fixed clock for fixtures: 2024-05-02 12:00 UTC. The 24h window starts 2024-05-01 12:00.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap()
}

pub fn window(cap: usize) -> FetchWindow {
    FetchWindow::new(now() - chrono::Duration::hours(24), cap, chrono_tz::UTC)
}

pub const RSS_FIXTURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test Feed</title>
    <link>https://example.com</link>
    <description>Fixture</description>
    <item>
      <title>Fresh with guid</title>
      <link>https://example.com/fresh-1</link>
      <guid isPermaLink="false">urn:fresh-1</guid>
      <pubDate>Thu, 02 May 2024 09:00:00 GMT</pubDate>
      <description>&lt;b&gt;Hello&lt;/b&gt;

World</description>
    </item>
    <item>
      <title>Too old</title>
      <link>https://example.com/old</link>
      <guid>urn:old</guid>
      <pubDate>Mon, 29 Apr 2024 09:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Undated</title>
      <link>https://example.com/undated</link>
    </item>
    <item>
      <title>On the boundary</title>
      <link>https://example.com/boundary</link>
      <pubDate>Wed, 01 May 2024 12:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Bare</title>
      <pubDate>Thu, 02 May 2024 10:30:00 GMT</pubDate>
    </item>
    <item>
      <title>Unreadable date</title>
      <link>https://example.com/garbled</link>
      <pubDate>sometime last week</pubDate>
    </item>
  </channel>
</rss>
"#;

/// Five recent items, newest first, plus one duplicate guid with a different title.
pub const RSS_DUPLICATE_GUID: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Dup Feed</title>
    <link>https://example.org</link>
    <description>Fixture</description>
    <item>
      <title>First title</title>
      <link>https://example.org/a</link>
      <guid>urn:same</guid>
      <pubDate>Thu, 02 May 2024 11:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Second title</title>
      <link>https://example.org/b</link>
      <guid>urn:same</guid>
      <pubDate>Thu, 02 May 2024 10:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Third</title>
      <link>https://example.org/c</link>
      <pubDate>Thu, 02 May 2024 09:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Fourth</title>
      <link>https://example.org/d</link>
      <pubDate>Thu, 02 May 2024 08:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Fifth</title>
      <link>https://example.org/e</link>
      <pubDate>Thu, 02 May 2024 07:00:00 GMT</pubDate>
    </item>
  </channel>
</rss>
"#;

pub const ARXIV_FIXTURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title type="html">ArXiv Query: search_query=cat:cs.CL</title>
  <id>http://arxiv.org/api/fixture</id>
  <updated>2024-05-02T00:00:00-04:00</updated>
  <entry>
    <id>http://arxiv.org/abs/2405.00001v1</id>
    <updated>2024-05-02T08:00:00Z</updated>
    <published>2024-05-02T08:00:00Z</published>
    <title>Scaling Laws for
      Tiny Models</title>
    <summary>  We study &lt;i&gt;tiny&lt;/i&gt; models.
    </summary>
    <author><name>Ada Lovelace</name></author>
    <author><name>Grace Hopper</name></author>
    <link href="http://arxiv.org/abs/2405.00001v1" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/2405.00001v1" rel="related" type="application/pdf"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2404.09999v2</id>
    <updated>2024-04-20T08:00:00Z</updated>
    <published>2024-04-20T08:00:00Z</published>
    <title>An Older Paper</title>
    <summary>Old.</summary>
    <author><name>Someone Else</name></author>
    <link href="http://arxiv.org/abs/2404.09999v2" rel="alternate" type="text/html"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2405.00002v1</id>
    <updated>2024-05-02T06:00:00Z</updated>
    <published>2024-05-02T06:00:00Z</published>
    <title>Anonymous Work</title>
    <summary>No authors listed.</summary>
    <link href="http://arxiv.org/abs/2405.00002v1" rel="alternate" type="text/html"/>
  </entry>
</feed>
"#;

pub fn fetcher() -> Arc<Fetcher> {
    let config = FetchConfig {
        user_agent: "daily-brief-test/1.0".to_string(),
        timeout_seconds: 5,
        ..FetchConfig::default()
    };
    Arc::new(Fetcher::new(config).unwrap())
}

/// Serve exactly one HTTP response on an ephemeral local port.
///
/// Returns the base URL and a handle resolving to the raw request head that was received.
pub async fn serve_once(status: u16, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let body = body.to_string();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 16 * 1024];
        let mut received = Vec::new();
        loop {
            let n = socket.read(&mut buf).await.unwrap_or(0);
            received.extend_from_slice(&buf[..n]);
            if n == 0 || received.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        let reason = if status < 400 { "OK" } else { "Error" };
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/xml; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            reason,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&received).into_owned()
    });

    (format!("http://{}", addr), handle)
}

/// A base URL nothing is listening on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/feed.xml", addr)
}

pub fn item(id: &str, category: &str, published: &str) -> Item {
    Item {
        id: id.to_string(),
        title: format!("Title {}", id),
        link: format!("https://example.com/{}", id),
        source: "Static".to_string(),
        category: category.to_string(),
        published: published.to_string(),
        summary: String::new(),
        authors: None,
    }
}

/// In-memory source for pipeline tests. Records every pull into a shared log.
pub struct StaticSource {
    pub name: String,
    pub kind: SourceKind,
    pub items: Vec<Item>,
    pub fail: bool,
    pub log: Arc<Mutex<Vec<String>>>,
}

impl StaticSource {
    pub fn new(name: &str, kind: SourceKind, items: Vec<Item>, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            name: name.to_string(),
            kind,
            items,
            fail: false,
            log,
        }
    }

    pub fn failing(name: &str, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            fail: true,
            ..Self::new(name, SourceKind::News, Vec::new(), log)
        }
    }
}

#[async_trait]
impl PullFeed for StaticSource {
    fn source_name(&self) -> String {
        self.name.clone()
    }

    fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn pull(&self, window: &FetchWindow) -> Result<Vec<Item>> {
        self.log.lock().unwrap().push(self.name.clone());
        if self.fail {
            return Err(AggregatorError::Parse("fixture failure".to_string()));
        }
        Ok(self.items.iter().take(window.cap).cloned().collect())
    }
}
