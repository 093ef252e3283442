use std::collections::HashMap;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use xo_core::models::LinkPreview;
use xo_core::traits::LinkPreviewer;

static META_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<meta\b[^>]*>").unwrap());
static ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});
static TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap());

/// Fetches a page and scrapes its Open Graph image and title.
pub struct HttpLinkPreviewer {
    client: reqwest::Client,
}

impl HttpLinkPreviewer {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LinkPreviewer for HttpLinkPreviewer {
    async fn fetch(&self, url: &str) -> anyhow::Result<LinkPreview> {
        let target = Url::parse(url)?;
        let response = self.client.get(target).send().await?.error_for_status()?;
        // redirects may move relative image paths onto another host
        let base = response.url().clone();
        let html = response.text().await?;

        let preview = extract_open_graph(&html, &base);
        log::debug!("link preview for {url}: {preview:?}");
        Ok(preview)
    }
}

/// Reads `og:image` / `og:title` from the page's meta tags, falling back to
/// `<title>`. Relative image URLs are resolved against `base`.
pub fn extract_open_graph(html: &str, base: &Url) -> LinkPreview {
    let mut image = None;
    let mut title = None;

    for tag in META_TAG_RE.find_iter(html) {
        let attrs = attributes(tag.as_str());
        let key = attrs
            .get("property")
            .or_else(|| attrs.get("name"))
            .map(|k| k.to_ascii_lowercase());
        let (Some(key), Some(content)) = (key, attrs.get("content")) else {
            continue;
        };
        let content = decode_entities(content.trim());
        if content.is_empty() {
            continue;
        }

        match key.as_str() {
            "og:image" | "og:image:url" | "og:image:secure_url" if image.is_none() => {
                image = Some(content)
            }
            "og:title" if title.is_none() => title = Some(content),
            _ => {}
        }
    }

    if title.is_none() {
        title = TITLE_RE
            .captures(html)
            .and_then(|c| c.get(1))
            .map(|m| decode_entities(m.as_str().trim()))
            .filter(|t| !t.is_empty());
    }

    LinkPreview {
        og_image: image.map(|src| resolve(base, &src)),
        og_title: title,
    }
}

fn attributes(tag: &str) -> HashMap<String, String> {
    ATTR_RE
        .captures_iter(tag)
        .filter_map(|c| {
            let name = c.get(1)?.as_str().to_ascii_lowercase();
            let value = c.get(2).or_else(|| c.get(3))?.as_str().to_string();
            Some((name, value))
        })
        .collect()
}

fn resolve(base: &Url, src: &str) -> String {
    base.join(src)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| src.to_string())
}

/// Named and numeric (`&#8217;`, `&#x2019;`) references.
fn decode_entities(raw: &str) -> String {
    html_escape::decode_html_entities(raw).into_owned()
}
