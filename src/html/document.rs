//! Template document with append-only head/body regions.
//!
//! `TemplateDocument` locates `<head>` and `<body>` with `tl` and splices
//! appended markup right before their closing tags. Everything else is
//! emitted byte-for-byte, so entities are neither decoded nor re-escaped.
//!
//! ```text
//! <html><head><title>x</title>┊</head><body><div id="app"></div>┊</body></html>
//!                             ↑ head appends                    ↑ body appends
//! ```
//!
//! A template without `<head>` or `<body>` gets the missing element
//! synthesized at serialization time, only if something was appended to it.

use crate::asset::InjectLocation;

/// Minimal DOM capability needed for injection.
pub trait Document {
    /// Append raw HTML as the last child of the head or body element.
    fn append(&mut self, location: InjectLocation, html: &str);

    /// Render the document.
    fn serialize(&self) -> String;
}

/// Insertion point inside the template source.
#[derive(Debug, Clone)]
struct Slot {
    tag: &'static str,
    /// Byte offset where appended markup goes.
    at: usize,
    /// The element does not exist in the template.
    synthesized: bool,
    appended: String,
}

impl Slot {
    fn existing(tag: &'static str, at: usize) -> Self {
        Self {
            tag,
            at,
            synthesized: false,
            appended: String::new(),
        }
    }

    fn synthesized(tag: &'static str, at: usize) -> Self {
        Self {
            synthesized: true,
            ..Self::existing(tag, at)
        }
    }

    fn render(&self, out: &mut String) {
        if !self.synthesized {
            out.push_str(&self.appended);
        } else if !self.appended.is_empty() {
            out.push('<');
            out.push_str(self.tag);
            out.push('>');
            out.push_str(&self.appended);
            out.push_str("</");
            out.push_str(self.tag);
            out.push('>');
        }
    }
}

/// Element span located by `tl`.
#[derive(Debug, Clone, Copy)]
struct Span {
    /// Offset of the opening `<`.
    start: usize,
    /// Offset right before the closing tag (or element end if unclosed).
    inner_end: usize,
}

/// HTML template loaded for injection.
#[derive(Debug, Clone)]
pub struct TemplateDocument {
    source: String,
    head: Slot,
    body: Slot,
}

impl TemplateDocument {
    /// Parse a template and locate its head and body elements.
    pub fn parse(source: impl Into<String>) -> Result<Self, String> {
        let source = source.into();

        // Tag names are case-insensitive; ASCII lowering keeps byte offsets
        let lower = source.to_ascii_lowercase();
        let (html, head, body) = {
            let dom = tl::parse(&lower, tl::ParserOptions::default())
                .map_err(|err| format!("{err:?}"))?;
            (
                locate(&dom, &lower, "html"),
                locate(&dom, &lower, "head"),
                locate(&dom, &lower, "body"),
            )
        };

        let head = match (head, body, html) {
            (Some(head), _, _) => Slot::existing("head", head.inner_end),
            (None, Some(body), _) => Slot::synthesized("head", body.start),
            (None, None, Some(html)) => {
                Slot::synthesized("head", open_tag_end(&source, html.start))
            }
            (None, None, None) => Slot::synthesized("head", 0),
        };

        let body = match (body, html) {
            (Some(body), _) => Slot::existing("body", body.inner_end),
            (None, Some(html)) => Slot::synthesized("body", html.inner_end),
            (None, None) => Slot::synthesized("body", source.len()),
        };

        Ok(Self { source, head, body })
    }

    fn slot_mut(&mut self, location: InjectLocation) -> &mut Slot {
        match location {
            InjectLocation::Head => &mut self.head,
            InjectLocation::Body => &mut self.body,
        }
    }
}

impl Document for TemplateDocument {
    fn append(&mut self, location: InjectLocation, html: &str) {
        self.slot_mut(location).appended.push_str(html);
    }

    fn serialize(&self) -> String {
        let extra = self.head.appended.len() + self.body.appended.len();
        let mut out = String::with_capacity(self.source.len() + extra + 32);

        // Stable sort keeps head first when both land on the same offset
        let mut slots = [&self.head, &self.body];
        slots.sort_by_key(|slot| slot.at);

        let mut cursor = 0;
        for slot in slots {
            out.push_str(&self.source[cursor..slot.at]);
            slot.render(&mut out);
            cursor = slot.at;
        }
        out.push_str(&self.source[cursor..]);
        out
    }
}

/// Find the first `tag` element and its insertion point.
///
/// `lower` is the ASCII-lowercased template the DOM was parsed from.
fn locate(dom: &tl::VDom<'_>, lower: &str, tag: &str) -> Option<Span> {
    let parser = dom.parser();
    let handle = dom.query_selector(tag)?.next()?;
    let element = handle.get(parser)?.as_tag()?;

    let (start, _) = element.boundaries(parser);
    let end = (start + element.raw().as_bytes().len()).min(lower.len());

    // Only the element's own span; an omitted closer appends at its end
    let inner_end = closing_tag(&lower[start..end], tag).map_or(end, |pos| start + pos);

    Some(Span { start, inner_end })
}

/// Offset of the last real `</tag>` in `span`.
///
/// `</head` must not match `</header>`: the name has to end at `>`, `/`
/// or whitespace.
fn closing_tag(span: &str, tag: &str) -> Option<usize> {
    let needle = format!("</{tag}");
    span.rmatch_indices(&needle)
        .map(|(pos, _)| pos)
        .find(|&pos| {
            span[pos + needle.len()..]
                .chars()
                .next()
                .is_some_and(|c| c == '>' || c == '/' || c.is_ascii_whitespace())
        })
}

/// Offset right after the `>` of the opening tag starting at `start`.
fn open_tag_end(source: &str, start: usize) -> usize {
    source[start..]
        .find('>')
        .map_or(source.len(), |pos| start + pos + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_before_closing_tags() {
        let mut doc =
            TemplateDocument::parse("<html><head><title>t</title></head><body><p>hi</p></body></html>")
                .unwrap();
        doc.append(InjectLocation::Head, "<link>");
        doc.append(InjectLocation::Body, "<script></script>");

        assert_eq!(
            doc.serialize(),
            "<html><head><title>t</title><link></head><body><p>hi</p><script></script></body></html>"
        );
    }

    #[test]
    fn test_append_preserves_order() {
        let mut doc = TemplateDocument::parse("<html><head></head><body></body></html>").unwrap();
        doc.append(InjectLocation::Body, "1");
        doc.append(InjectLocation::Head, "a");
        doc.append(InjectLocation::Body, "2");
        doc.append(InjectLocation::Head, "b");

        assert_eq!(doc.serialize(), "<html><head>ab</head><body>12</body></html>");
    }

    #[test]
    fn test_untouched_template_round_trips() {
        let source = "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\">\n</head>\n<body>&copy; caf\u{e9} &amp; co</body>\n</html>\n";
        let doc = TemplateDocument::parse(source).unwrap();
        assert_eq!(doc.serialize(), source);
    }

    #[test]
    fn test_entities_are_not_decoded() {
        let mut doc =
            TemplateDocument::parse("<html><head></head><body>&nbsp;&lt;x&gt;</body></html>").unwrap();
        doc.append(InjectLocation::Body, "<script src=\"a.js?x=1&y=2\"></script>");
        assert_eq!(
            doc.serialize(),
            "<html><head></head><body>&nbsp;&lt;x&gt;<script src=\"a.js?x=1&y=2\"></script></body></html>"
        );
    }

    #[test]
    fn test_missing_head_is_synthesized() {
        let mut doc = TemplateDocument::parse("<html><body></body></html>").unwrap();
        doc.append(InjectLocation::Head, "<link>");
        assert_eq!(doc.serialize(), "<html><head><link></head><body></body></html>");
    }

    #[test]
    fn test_missing_body_is_synthesized() {
        let mut doc = TemplateDocument::parse("<html><head></head></html>").unwrap();
        doc.append(InjectLocation::Body, "<script></script>");
        assert_eq!(
            doc.serialize(),
            "<html><head></head><body><script></script></body></html>"
        );
    }

    #[test]
    fn test_fragment_without_html() {
        let mut doc = TemplateDocument::parse("<div id=\"app\"></div>").unwrap();
        doc.append(InjectLocation::Head, "<link>");
        doc.append(InjectLocation::Body, "<script></script>");
        assert_eq!(
            doc.serialize(),
            "<head><link></head><div id=\"app\"></div><body><script></script></body>"
        );
    }

    #[test]
    fn test_header_element_is_not_head() {
        let mut doc = TemplateDocument::parse(
            "<html><head></head><body><header>nav</header><main></main></body></html>",
        )
        .unwrap();
        doc.append(InjectLocation::Head, "<link>");
        assert_eq!(
            doc.serialize(),
            "<html><head><link></head><body><header>nav</header><main></main></body></html>"
        );
    }

    #[test]
    fn test_closing_tag_in_trailing_comment() {
        let mut doc = TemplateDocument::parse(
            "<html><head></head><body><p>x</p></body></html><!-- </body> -->",
        )
        .unwrap();
        doc.append(InjectLocation::Body, "<script></script>");
        assert_eq!(
            doc.serialize(),
            "<html><head></head><body><p>x</p><script></script></body></html><!-- </body> -->"
        );
    }

    #[test]
    fn test_uppercase_tags() {
        let mut doc = TemplateDocument::parse("<HTML><HEAD></HEAD><BODY></BODY></HTML>").unwrap();
        doc.append(InjectLocation::Head, "<link>");
        doc.append(InjectLocation::Body, "<script></script>");
        assert_eq!(
            doc.serialize(),
            "<HTML><HEAD><link></HEAD><BODY><script></script></BODY></HTML>"
        );
    }

    #[test]
    fn test_closing_tag_requires_name_boundary() {
        assert_eq!(closing_tag("<head><header></header></head >", "head"), Some(23));
        assert_eq!(closing_tag("<head><header></header>", "head"), None);
    }

    #[test]
    fn test_nothing_synthesized_without_appends() {
        let doc = TemplateDocument::parse("<div></div>").unwrap();
        assert_eq!(doc.serialize(), "<div></div>");
    }
}
