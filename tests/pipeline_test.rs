//! End-to-end pipeline tests over an in-memory fetcher.

use std::collections::HashMap;

use mailprep::audit::{CategoryKind, DefectKind};
use mailprep::{
    ArticleExtractor, AuditPoint, CascadeInliner, Error, FetchedResource, Fetcher,
    Level3Extractor, NewsletterExtractor, Pipeline, RegionExtractor, ScrapeOptions, Stage,
    StylesheetSource,
};
use url::Url;

/// Fetcher serving canned responses keyed by URL.
#[derive(Default)]
struct MapFetcher {
    responses: HashMap<String, (Vec<u8>, Option<String>)>,
}

impl MapFetcher {
    fn with_page(url: &str, html: &str) -> Self {
        let mut fetcher = Self::default();
        fetcher.insert_html(url, html);
        fetcher
    }

    fn insert_html(&mut self, url: &str, html: &str) {
        self.insert(url, html.as_bytes().to_vec(), "text/html; charset=UTF-8");
    }

    fn insert(&mut self, url: &str, bytes: Vec<u8>, content_type: &str) {
        self.responses
            .insert(url.to_string(), (bytes, Some(content_type.to_string())));
    }
}

impl Fetcher for MapFetcher {
    fn fetch(&self, url: &Url) -> mailprep::Result<FetchedResource> {
        match self.responses.get(url.as_str()) {
            Some((bytes, content_type)) => Ok(FetchedResource {
                bytes: bytes.clone(),
                content_type: content_type.clone(),
            }),
            None => Err(Error::Fetch {
                url: url.to_string(),
                reason: "404".to_string(),
            }),
        }
    }
}

fn pipeline(fetcher: MapFetcher, options: ScrapeOptions) -> Pipeline {
    Pipeline::new(Box::new(fetcher), Box::new(CascadeInliner), options)
}

fn default_css() -> Vec<StylesheetSource> {
    vec![StylesheetSource::Inline(
        "p { margin: 0 0 2em; } a { color: #09c; }".to_string(),
    )]
}

const LEVEL3_URL: &str = "http://dept.example.edu/graduate/index.html";

const LEVEL3_PAGE: &str = r#"
    <html><head><title>Graduate Program</title></head><body class="left-column">
      <div class="main-content" id="main" role="main">
        <h1 class="page-title" id="title">Graduate Program</h1>
        <div id="bannerBox"><img id="banner" src="images/banner.jpg" alt="campus"/></div>
        <div class="content contentBox">
          <p>Apply by <a href="/apply.html">this form</a>.</p>
          <img src="/photos/lab.jpg"/>
        </div>
      </div>
    </body></html>
"#;

#[test]
fn level3_scrape_produces_portable_fragment() {
    let pipe = pipeline(
        MapFetcher::with_page(LEVEL3_URL, LEVEL3_PAGE),
        ScrapeOptions { stylesheets: default_css(), ..ScrapeOptions::default() },
    );

    let output = pipe.scrape(LEVEL3_URL, &Level3Extractor).unwrap();

    // URLs rewritten to absolute form
    assert!(output.fragment.contains("http://dept.example.edu/apply.html"));
    assert!(output.fragment.contains("http://dept.example.edu/photos/lab.jpg"));

    // Styles inlined per element
    assert!(output.fragment.contains("style="));
    assert!(output.fragment.contains("margin"));

    // Article record carries the page sections, banner rewritten too
    assert_eq!(
        output.article.title.as_deref(),
        Some(r#"<h1 class="page-title" id="title">Graduate Program</h1>"#)
    );
    let banner = output.article.banner_image.unwrap();
    assert!(banner.contains("http://dept.example.edu/graduate/images/banner.jpg"));

    // The lab photo has no alt text
    let image_check = output
        .defects
        .iter()
        .find(|c| c.kind == CategoryKind::ImageCheck)
        .unwrap();
    assert_eq!(image_check.get(DefectKind::MissingAltText).unwrap().snippets.len(), 1);
    assert!(image_check.get(DefectKind::MissingSource).is_none());
}

#[test]
fn non_html_content_type_fails_at_fetching() {
    let mut fetcher = MapFetcher::default();
    fetcher.insert(LEVEL3_URL, b"{}".to_vec(), "application/json");
    let pipe = pipeline(fetcher, ScrapeOptions::default());

    let err = pipe.scrape(LEVEL3_URL, &Level3Extractor).unwrap_err();
    assert_eq!(err.stage, Stage::Fetching);
    assert!(matches!(err.source, Error::ContentType { .. }));
}

#[test]
fn fetch_failure_fails_at_fetching() {
    let pipe = pipeline(MapFetcher::default(), ScrapeOptions::default());

    let err = pipe.scrape(LEVEL3_URL, &Level3Extractor).unwrap_err();
    assert_eq!(err.stage, Stage::Fetching);
    assert!(matches!(err.source, Error::Fetch { .. }));
}

#[test]
fn invalid_url_fails_at_fetching() {
    let pipe = pipeline(MapFetcher::default(), ScrapeOptions::default());

    let err = pipe.scrape("not a url", &Level3Extractor).unwrap_err();
    assert_eq!(err.stage, Stage::Fetching);
    assert!(matches!(err.source, Error::InvalidUrl { .. }));
}

#[test]
fn article_without_date_fails_at_extracting() {
    let url = "http://news.example.edu/2016/06/story.html";
    let html = r#"
        <div class="main-content">
          <h1 id="title">Story</h1>
          <div class="article-body"><p>Body</p></div>
        </div>
    "#;
    let pipe = pipeline(MapFetcher::with_page(url, html), ScrapeOptions::default());

    let err = pipe.scrape(url, &ArticleExtractor::new()).unwrap_err();
    assert_eq!(err.stage, Stage::Extracting);
    assert!(matches!(err.source, Error::NoDate));
}

#[test]
fn article_scrape_extracts_date_and_images() {
    let url = "http://news.example.edu/2016/06/story.html";
    let html = r#"
        <div class="main-content">
          <h1 id="title">Story</h1>
          <p class="vcard">By <span class="name">Sample Author</span></p>
          <p class="date">June 21, 2016</p>
          <figure class="article-image">
            <img src="photos/one.jpg" alt="one" width="640" height="480"/>
            <figcaption>First photo</figcaption>
          </figure>
          <div class="article-body"><p>Article Body</p></div>
        </div>
    "#;

    let mut options = ScrapeOptions::default();
    options.roster.insert("sample author", "Sample Author");
    let pipe = pipeline(MapFetcher::with_page(url, html), options);

    let output = pipe.scrape(url, &ArticleExtractor::new()).unwrap();

    assert_eq!(output.article.date.as_deref(), Some("2016-06-21"));
    assert_eq!(output.article.author.as_deref(), Some("Sample Author"));
    assert!(output.article.guest_author.is_none());

    assert_eq!(output.article.images.len(), 1);
    let image = &output.article.images[0];
    assert_eq!(image.src, "http://news.example.edu/2016/06/photos/one.jpg");
    assert_eq!(image.caption.as_deref(), Some("First photo"));
    assert_eq!((image.width, image.height), (640, 480));
}

#[test]
fn newsletter_scrape_drops_ignored_elements() {
    let url = "http://news.example.edu/newsletter/june-21/index.html";
    let html = r#"
        <body>
          <div class="ignore">View this issue in your browser</div>
          <table class="wrap"><tr><td>
            <p>Issue content with a <a href="/story.html">story link</a>.</p>
          </td></tr></table>
        </body>
    "#;
    let pipe = pipeline(MapFetcher::with_page(url, html), ScrapeOptions::default());

    let output = pipe.scrape(url, &NewsletterExtractor).unwrap();

    assert!(!output.fragment.contains("View this issue"));
    assert!(output.fragment.contains("Issue content"));
    assert!(output.fragment.contains("http://news.example.edu/story.html"));
}

#[test]
fn audit_point_controls_snippet_fidelity() {
    let url = "http://dept.example.edu/page/index.html";
    let html = r#"<div class="contentBox"><img src="pic.jpg"/></div>"#;

    // Default: audit the final fragment; the snippet shows the rewritten URL.
    let pipe = pipeline(MapFetcher::with_page(url, html), ScrapeOptions::default());
    let output = pipe.scrape(url, &Level3Extractor).unwrap();
    let snippet = &output.defects[0].types[0].snippets[0];
    assert!(snippet.contains("http://dept.example.edu/page/pic.jpg"));

    // PreRewrite: the snippet shows the markup as authored.
    let pipe = pipeline(
        MapFetcher::with_page(url, html),
        ScrapeOptions { audit_point: AuditPoint::PreRewrite, ..ScrapeOptions::default() },
    );
    let output = pipe.scrape(url, &Level3Extractor).unwrap();
    let snippet = &output.defects[0].types[0].snippets[0];
    assert!(snippet.contains(r#"src="pic.jpg""#));
}

#[test]
fn defect_free_page_yields_empty_report() {
    let url = "http://dept.example.edu/clean/index.html";
    let html = r#"<div class="contentBox"><p>All <a href="/x.html">good</a> here.</p></div>"#;
    let pipe = pipeline(MapFetcher::with_page(url, html), ScrapeOptions::default());

    let output = pipe.scrape(url, &Level3Extractor).unwrap();
    assert!(output.defects.is_empty());
}

#[test]
fn non_ascii_text_normalized_in_fragment() {
    let url = "http://dept.example.edu/intl/index.html";
    // UTF-8 bytes for C1 controls 0x93/0x94: a Windows-1252 document that
    // went through a Latin-1 decode upstream.
    let html = "<div class=\"contentBox\"><p>Caf\u{E9} \u{0093}quoted\u{0094}</p></div>";
    let pipe = pipeline(MapFetcher::with_page(url, html), ScrapeOptions::default());

    let output = pipe.scrape(url, &Level3Extractor).unwrap();
    assert!(output.fragment.contains("Cafe &#8220;quoted&#8221;"));
    assert!(output.fragment.is_ascii());
}

#[test]
fn scrape_with_lets_the_caller_pick_the_template() {
    let article_url = "http://news.example.edu/2016/06/story.html";
    let html = r#"
        <div>
          <p class="date">June 21, 2016</p>
          <div class="article-body"><p>Body</p></div>
        </div>
    "#;
    let pipe = pipeline(MapFetcher::with_page(article_url, html), ScrapeOptions::default());

    let article = ArticleExtractor::new();
    let level3 = Level3Extractor;

    let output = pipe
        .scrape_with(article_url, |url, _page| -> Option<&dyn RegionExtractor> {
            if url.host_str() == Some("news.example.edu") {
                Some(&article)
            } else {
                Some(&level3)
            }
        })
        .unwrap();

    assert_eq!(output.article.date.as_deref(), Some("2016-06-21"));
}

#[test]
fn unmatched_template_rule_fails_at_extracting() {
    let url = "http://other.example.org/index.html";
    let pipe = pipeline(
        MapFetcher::with_page(url, "<p>whatever</p>"),
        ScrapeOptions::default(),
    );

    let err = pipe.scrape_with(url, |_, _| None).unwrap_err();
    assert_eq!(err.stage, Stage::Extracting);
    assert!(matches!(err.source, Error::EmptyRegion("unmatched")));
}

#[test]
fn scrape_html_skips_the_fetch() {
    let html = r#"<div class="contentBox"><p>Direct markup</p></div>"#;
    let pipe = pipeline(MapFetcher::default(), ScrapeOptions::default());

    let output = pipe
        .scrape_html(html, "http://dept.example.edu/index.html", &Level3Extractor)
        .unwrap();
    assert!(output.fragment.contains("Direct markup"));
}

#[test]
fn charset_declared_in_header_is_honored() {
    let url = "http://dept.example.edu/legacy/index.html";
    // windows-1252: 0x96 is an en dash
    let bytes = b"<div class=\"contentBox\"><p>1996\x962016</p></div>".to_vec();
    let mut fetcher = MapFetcher::default();
    fetcher.insert(url, bytes, "text/html; charset=windows-1252");
    let pipe = pipeline(fetcher, ScrapeOptions::default());

    let output = pipe.scrape(url, &Level3Extractor).unwrap();
    assert!(output.fragment.contains("1996-2016"));
}

#[test]
fn stage_error_display_names_the_stage() {
    let pipe = pipeline(MapFetcher::default(), ScrapeOptions::default());
    let err = pipe.scrape(LEVEL3_URL, &Level3Extractor).unwrap_err();

    let message = err.to_string();
    assert!(message.contains("fetching"), "got: {message}");
}
