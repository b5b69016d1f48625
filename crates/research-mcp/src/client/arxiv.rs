//! arXiv Atom feed parsing.
//!
//! Projects each `<entry>` of an export API response onto a
//! [`RawSearchResult`]. Fields that cannot be found are left as `None`; the
//! store decides whether the result is usable.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::ClientResult;
use crate::models::RawSearchResult;

/// Leaf elements of an entry whose text is collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    Title,
    Summary,
    Published,
    AuthorName,
}

impl Field {
    fn from_element(local_name: &[u8], in_author: bool) -> Option<Self> {
        match local_name {
            b"id" => Some(Self::Id),
            b"title" => Some(Self::Title),
            b"summary" => Some(Self::Summary),
            b"published" => Some(Self::Published),
            b"name" if in_author => Some(Self::AuthorName),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct EntryBuilder {
    abs_url: Option<String>,
    title: Option<String>,
    summary: Option<String>,
    published: Option<String>,
    authors: Vec<String>,
    pdf_url: Option<String>,
}

impl EntryBuilder {
    fn set(&mut self, field: Field, text: String) {
        match field {
            Field::Id => self.abs_url = Some(text.trim().to_string()),
            Field::Title => self.title = Some(text.split_whitespace().collect::<Vec<_>>().join(" ")),
            Field::Summary => self.summary = Some(text.trim().to_string()),
            Field::Published => self.published = Some(text.trim().to_string()),
            Field::AuthorName => self.authors.push(text.trim().to_string()),
        }
    }

    /// Keep the first `<link title="pdf">` href.
    fn link(&mut self, element: &BytesStart<'_>) -> ClientResult<()> {
        if self.pdf_url.is_some() {
            return Ok(());
        }

        let mut is_pdf = false;
        let mut href = None;
        for attr in element.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            match attr.key.local_name().as_ref() {
                b"title" => is_pdf = attr.unescape_value()?.eq_ignore_ascii_case("pdf"),
                b"href" => href = Some(attr.unescape_value()?.into_owned()),
                _ => {}
            }
        }

        if is_pdf {
            self.pdf_url = href;
        }
        Ok(())
    }

    /// The API reports query errors as an entry whose id points at `/api/errors`.
    fn is_error_entry(&self) -> bool {
        self.abs_url.as_deref().is_some_and(|id| id.contains("/api/errors"))
    }

    fn finish(self) -> RawSearchResult {
        let pdf_url = self
            .pdf_url
            .or_else(|| self.abs_url.as_ref().map(|url| url.replace("/abs/", "/pdf/")));

        RawSearchResult {
            id: self.abs_url.as_deref().map(short_id),
            title: self.title,
            authors: Some(self.authors),
            summary: self.summary,
            pdf_url,
            published: self.published,
        }
    }
}

/// Parse every entry of an arXiv Atom feed.
///
/// Character references and CDATA sections are resolved. Error entries are
/// dropped.
///
/// # Errors
///
/// Returns [`crate::error::ClientError::Feed`] if the document is not well-formed XML.
pub fn parse_feed(xml: &str) -> ClientResult<Vec<RawSearchResult>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut results = Vec::new();
    let mut entry: Option<EntryBuilder> = None;
    let mut in_author = false;
    let mut field: Option<Field> = None;
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.local_name();
                match entry.as_mut() {
                    None if name.as_ref() == b"entry" => entry = Some(EntryBuilder::default()),
                    None => {}
                    Some(current) => match name.as_ref() {
                        b"author" => in_author = true,
                        b"link" => current.link(&e)?,
                        other => {
                            field = Field::from_element(other, in_author);
                            text.clear();
                        }
                    },
                }
            }
            Event::Empty(e) => {
                if let Some(current) = entry.as_mut() {
                    if e.local_name().as_ref() == b"link" {
                        current.link(&e)?;
                    }
                }
            }
            Event::Text(t) => {
                if field.is_some() {
                    text.push_str(&t.unescape()?);
                }
            }
            Event::CData(c) => {
                if field.is_some() {
                    text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"entry" => {
                    if let Some(done) = entry.take() {
                        if done.is_error_entry() {
                            tracing::warn!(summary = ?done.summary, "arXiv returned an error entry");
                        } else {
                            results.push(done.finish());
                        }
                    }
                    in_author = false;
                    field = None;
                }
                b"author" => in_author = false,
                _ => {
                    if let (Some(done_field), Some(current)) = (field.take(), entry.as_mut()) {
                        current.set(done_field, std::mem::take(&mut text));
                    }
                }
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(results)
}

/// `http://arxiv.org/abs/2301.00001v1` -> `2301.00001v1`.
fn short_id(abs_url: &str) -> String {
    abs_url.rsplit_once("/abs/").map_or(abs_url, |(_, id)| id).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:arxiv="http://arxiv.org/schemas/atom">
  <title type="html">ArXiv Query: search_query=quantum</title>
  <entry>
    <id>http://arxiv.org/abs/2301.00001v2</id>
    <updated>2023-02-01T00:00:00Z</updated>
    <published>2023-01-02T18:59:59Z</published>
    <title>Quantum Error
      Correction &amp; Friends</title>
    <summary>  We study codes.
    </summary>
    <author><name>Ada Lovelace</name></author>
    <author>
      <name>Alan Turing</name>
      <arxiv:affiliation>Bletchley</arxiv:affiliation>
    </author>
    <link href="http://arxiv.org/abs/2301.00001v2" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/2301.00001v2" rel="related" type="application/pdf"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/quant-ph/0101001v1</id>
    <published>2001-01-01T00:00:00Z</published>
    <title>Old Paper</title>
    <summary>Old.</summary>
    <author><name>Someone</name></author>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_feed_entries() {
        let results = parse_feed(FEED).unwrap();
        assert_eq!(results.len(), 2);

        let first = &results[0];
        assert_eq!(first.id.as_deref(), Some("2301.00001v2"));
        assert_eq!(first.title.as_deref(), Some("Quantum Error Correction & Friends"));
        assert_eq!(first.summary.as_deref(), Some("We study codes."));
        assert_eq!(
            first.authors.as_deref(),
            Some(&["Ada Lovelace".to_string(), "Alan Turing".to_string()][..])
        );
        assert_eq!(first.pdf_url.as_deref(), Some("http://arxiv.org/pdf/2301.00001v2"));
        assert_eq!(first.published.as_deref(), Some("2023-01-02T18:59:59Z"));
    }

    #[test]
    fn test_pdf_url_derived_without_link() {
        let results = parse_feed(FEED).unwrap();
        assert_eq!(results[1].id.as_deref(), Some("quant-ph/0101001v1"));
        assert_eq!(results[1].pdf_url.as_deref(), Some("http://arxiv.org/pdf/quant-ph/0101001v1"));
    }

    #[test]
    fn test_character_references_and_cdata() {
        let feed = r#"<feed><entry>
            <id>http://arxiv.org/abs/2402.00007v1</id>
            <published>2024-02-01T00:00:00Z</published>
            <title>Schr&#246;dinger&#x27;s Cat</title>
            <summary><![CDATA[a < b]]></summary>
            <author><name>Jos&#233; Doe</name></author>
        </entry></feed>"#;

        let results = parse_feed(feed).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title.as_deref(), Some("Schrödinger's Cat"));
        assert_eq!(results[0].summary.as_deref(), Some("a < b"));
        assert_eq!(results[0].authors.as_deref(), Some(&["José Doe".to_string()][..]));
    }

    #[test]
    fn test_feed_title_and_author_outside_entry_ignored() {
        let feed = r#"<feed><title>Feed</title><author><name>Feed Owner</name></author>
            <entry><id>http://arxiv.org/abs/1</id><title>T</title></entry></feed>"#;

        let results = parse_feed(feed).unwrap();
        assert_eq!(results[0].title.as_deref(), Some("T"));
        assert_eq!(results[0].authors.as_deref(), Some(&[][..]));
    }

    #[test]
    fn test_error_entry_dropped() {
        let feed = r#"<feed><entry><id>http://arxiv.org/api/errors#incorrect_id_format</id>
            <title>Error</title><summary>incorrect id format</summary></entry></feed>"#;
        assert!(parse_feed(feed).unwrap().is_empty());
    }

    #[test]
    fn test_empty_feed() {
        assert!(parse_feed("<feed></feed>").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_feed_is_an_error() {
        let err = parse_feed("<feed><entry><title>Open</entry></feed>").unwrap_err();
        assert!(matches!(err, ClientError::Feed(_)));
    }
}
