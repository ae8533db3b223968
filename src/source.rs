use crate::event::MarkupEvent;
use crate::handler::MarkupHandler;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use log::debug;
use markup5ever::LocalName;
use std::borrow::Cow;
use tendril::StrTendril;

/// Options for [`HtmlSource`].
#[derive(Debug, Clone, Copy)]
pub struct SourceOptions {
    /// Report HTML void elements (`br`, `img`, `input`, ...) as standalone
    /// elements even when they are not written with `/>`.
    pub standalone_void_elements: bool,
    /// Report every parse error html5ever detects, at some speed cost.
    pub exact_errors: bool,
    /// Drop a leading byte order mark.
    pub discard_bom: bool,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            standalone_void_elements: true,
            exact_errors: false,
            discard_bom: true,
        }
    }
}

fn is_void(name: &LocalName) -> bool {
    matches!(
        &**name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "keygen"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

// Start tags that end an open `p`.
fn closes_paragraph(name: &LocalName) -> bool {
    matches!(
        &**name,
        "address"
            | "article"
            | "aside"
            | "blockquote"
            | "details"
            | "div"
            | "dl"
            | "fieldset"
            | "figcaption"
            | "figure"
            | "footer"
            | "form"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "header"
            | "hr"
            | "main"
            | "menu"
            | "nav"
            | "ol"
            | "p"
            | "pre"
            | "section"
            | "table"
            | "ul"
    )
}

// Elements an implied end tag search never crosses.
fn is_scope_boundary(name: &LocalName) -> bool {
    matches!(
        &**name,
        "applet"
            | "button"
            | "caption"
            | "html"
            | "marquee"
            | "object"
            | "table"
            | "td"
            | "template"
            | "th"
    )
}

// Elements whose content the tokenizer must not read as markup.
fn raw_content(name: &LocalName) -> Option<TokenSinkResult<()>> {
    match &**name {
        "script" => Some(TokenSinkResult::RawData(RawKind::ScriptData)),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
            Some(TokenSinkResult::RawData(RawKind::Rawtext))
        }
        "title" | "textarea" => Some(TokenSinkResult::RawData(RawKind::Rcdata)),
        "plaintext" => Some(TokenSinkResult::Plaintext),
        _ => None,
    }
}

// Turns html5ever tokens into leveled markup events.
struct EventSink<H> {
    handler: H,
    options: SourceOptions,
    open: Vec<LocalName>,
    errors: Vec<Cow<'static, str>>,
}

impl<H: MarkupHandler> EventSink<H> {
    fn new(handler: H, options: SourceOptions) -> Self {
        Self {
            handler,
            options,
            open: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn level(&self) -> usize {
        self.open.len()
    }

    fn emit(&mut self, event: MarkupEvent) {
        let level = self.level();
        self.handler.handle_event(level, event);
    }

    fn close_top(&mut self) {
        if let Some(name) = self.open.pop() {
            let level = self.level();
            self.handler.handle_event(level, MarkupEvent::CloseElement(name));
        }
    }

    // Closes elements up to and including the innermost one named in `targets`,
    // unless a `boundary` element is reached first.
    fn close_implied(&mut self, targets: &[&str], boundary: &[&str], by: &LocalName) {
        let found = self.open.iter().rposition(|name| {
            targets.contains(&&**name) || boundary.contains(&&**name) || is_scope_boundary(name)
        });

        if let Some(position) = found {
            if targets.contains(&&*self.open[position]) {
                while self.open.len() > position {
                    if let Some(name) = self.open.last() {
                        debug!("<{}> implicitly closed by <{}>", name, by);
                    }
                    self.close_top();
                }
            }
        }
    }

    fn start_tag(&mut self, tag: Tag) -> TokenSinkResult<()> {
        match &*tag.name {
            "li" => self.close_implied(&["li"], &["ul", "ol"], &tag.name),
            "dd" | "dt" => self.close_implied(&["dd", "dt"], &["dl"], &tag.name),
            _ => {}
        }
        if closes_paragraph(&tag.name) {
            self.close_implied(&["p"], &[], &tag.name);
        }

        if tag.self_closing || (self.options.standalone_void_elements && is_void(&tag.name)) {
            self.emit(MarkupEvent::StandaloneElement(tag.name));
            return TokenSinkResult::Continue;
        }

        let next = raw_content(&tag.name);
        self.emit(MarkupEvent::OpenElement(tag.name.clone()));
        self.open.push(tag.name);
        next.unwrap_or(TokenSinkResult::Continue)
    }

    fn end_tag(&mut self, tag: Tag) {
        let position = match self.open.iter().rposition(|name| *name == tag.name) {
            Some(position) => position,
            None => {
                debug!("ignoring end tag </{}> with no open element", tag.name);
                return;
            }
        };

        while self.open.len() > position + 1 {
            if let Some(name) = self.open.last() {
                debug!("<{}> implicitly closed by </{}>", name, tag.name);
            }
            self.close_top();
        }
        self.close_top();
    }

    fn end(&mut self) {
        while !self.open.is_empty() {
            self.close_top();
        }
    }

    fn errors(&self) -> &[Cow<'static, str>] {
        &self.errors
    }
}

impl<H: MarkupHandler> TokenSink for EventSink<H> {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::DoctypeToken(doctype) => self.emit(MarkupEvent::DocType {
                name: doctype.name,
                public_id: doctype.public_id,
                system_id: doctype.system_id,
            }),
            Token::TagToken(tag) => match tag.kind {
                TagKind::StartTag => return self.start_tag(tag),
                TagKind::EndTag => self.end_tag(tag),
            },
            Token::CommentToken(contents) => self.emit(MarkupEvent::Comment(contents)),
            Token::CharacterTokens(contents) => self.emit(MarkupEvent::Text(contents)),
            Token::NullCharacterToken => self.emit(MarkupEvent::text("\u{FFFD}")),
            Token::EOFToken => self.end(),
            Token::ParseError(err) => {
                debug!("html parse error: {}", err);
                self.errors.push(err);
            }
        }

        TokenSinkResult::Continue
    }
}

/// A streaming HTML event source. Input can be fed in arbitrary chunks; every
/// event is handed to the handler as soon as the tokenizer produces it.
///
/// Levels come from a stack of open elements, not from a tree builder. The
/// common implied end tags are honoured (`p` ended by a block-level start tag,
/// sibling `li`, `dd` and `dt`), unmatched end tags are dropped, and whatever
/// is still open at the end of input is closed. Other tree construction rules
/// are not applied: there are no implied `html`/`head`/`body` elements, no
/// table fix-ups and no adoption agency, so misnested markup keeps the
/// nesting it was written with.
pub struct HtmlSource<H: MarkupHandler> {
    tokenizer: Tokenizer<EventSink<H>>,
    input: BufferQueue,
}

impl<H: MarkupHandler> HtmlSource<H> {
    pub fn new(handler: H, options: SourceOptions) -> Self {
        let opts = TokenizerOpts {
            exact_errors: options.exact_errors,
            discard_bom: options.discard_bom,
            ..Default::default()
        };

        Self {
            tokenizer: Tokenizer::new(EventSink::new(handler, options), opts),
            input: BufferQueue::new(),
        }
    }

    pub fn feed(&mut self, chunk: &str) {
        self.input.push_back(StrTendril::from_slice(chunk));
        // The sink never hands back a script, so feeding always runs to the end of the input.
        let _ = self.tokenizer.feed(&mut self.input);
    }

    /// Parse errors reported so far.
    pub fn errors(&self) -> &[Cow<'static, str>] {
        self.tokenizer.sink.errors()
    }

    /// Ends the input, closing every element still open, and returns the handler.
    pub fn finish(mut self) -> H {
        self.tokenizer.end();
        self.tokenizer.sink.handler
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(html: &str) -> Vec<(usize, MarkupEvent)> {
        let mut source = HtmlSource::new(Vec::new(), SourceOptions::default());
        source.feed(html);
        source.finish()
    }

    #[test]
    fn test_levels() {
        let got = events("<div><p>hi</p></div>");
        assert_eq!(
            got,
            vec![
                (0, MarkupEvent::open("div")),
                (1, MarkupEvent::open("p")),
                (2, MarkupEvent::text("hi")),
                (1, MarkupEvent::close("p")),
                (0, MarkupEvent::close("div")),
            ]
        );
    }

    #[test]
    fn test_void_and_self_closing() {
        let got = events("<p><br><x/></p>");
        assert_eq!(
            got,
            vec![
                (0, MarkupEvent::open("p")),
                (1, MarkupEvent::standalone("br")),
                (1, MarkupEvent::standalone("x")),
                (0, MarkupEvent::close("p")),
            ]
        );
    }

    #[test]
    fn test_void_as_open_when_disabled() {
        let options = SourceOptions {
            standalone_void_elements: false,
            ..Default::default()
        };
        let mut source = HtmlSource::new(Vec::new(), options);
        source.feed("<br>");
        let got = source.finish();
        assert_eq!(
            got,
            vec![(0, MarkupEvent::open("br")), (0, MarkupEvent::close("br"))]
        );
    }

    #[test]
    fn test_implicit_and_stray_end_tags() {
        let got = events("<ul><li>a<li>b</ul></span>");
        assert_eq!(
            got.iter().filter(|(l, _)| *l == 1).count(),
            4,
            "both items must be children of the list"
        );
        let closes: Vec<_> = got
            .iter()
            .filter(|(_, e)| e.is_close())
            .map(|(l, e)| (*l, e.name().unwrap().to_string()))
            .collect();
        assert_eq!(
            closes,
            vec![
                (1, "li".to_string()),
                (1, "li".to_string()),
                (0, "ul".to_string()),
            ]
        );
    }

    #[test]
    fn test_paragraph_ended_by_block() {
        let got = events("<p>one<div>two</div><p>three<p>four");
        assert_eq!(
            got,
            vec![
                (0, MarkupEvent::open("p")),
                (1, MarkupEvent::text("one")),
                (0, MarkupEvent::close("p")),
                (0, MarkupEvent::open("div")),
                (1, MarkupEvent::text("two")),
                (0, MarkupEvent::close("div")),
                (0, MarkupEvent::open("p")),
                (1, MarkupEvent::text("three")),
                (0, MarkupEvent::close("p")),
                (0, MarkupEvent::open("p")),
                (1, MarkupEvent::text("four")),
                (0, MarkupEvent::close("p")),
            ]
        );
    }

    #[test]
    fn test_paragraph_inside_phrasing_kept() {
        let got = events("<p>a <b>bold</b> and <span>inline</span></p>");
        assert!(got
            .iter()
            .all(|(l, e)| *l >= 1 || e.name().map_or(false, |n| &**n == "p")));
    }

    #[test]
    fn test_nested_lists_not_closed_across_boundary() {
        let got = events("<ul><li>a<ul><li>b</li></ul></li></ul>");
        assert_eq!(
            got.iter()
                .filter(|(_, e)| *e == MarkupEvent::open("li"))
                .map(|(l, _)| *l)
                .collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(got.last(), Some(&(0, MarkupEvent::close("ul"))));
    }

    #[test]
    fn test_definition_terms() {
        let got = events("<dl><dt>term<dd>meaning</dl>");
        let opens: Vec<_> = got
            .iter()
            .filter(|(_, e)| matches!(e, MarkupEvent::OpenElement(_)))
            .map(|(l, e)| (*l, e.name().unwrap().to_string()))
            .collect();
        assert_eq!(
            opens,
            vec![
                (0, "dl".to_string()),
                (1, "dt".to_string()),
                (1, "dd".to_string()),
            ]
        );
    }

    #[test]
    fn test_unclosed_elements_closed_at_end() {
        let got = events("<div><section>");
        assert_eq!(got.last(), Some(&(0, MarkupEvent::close("div"))));
        assert_eq!(got.len(), 4);
    }

    #[test]
    fn test_script_is_raw_text() {
        let got = events("<script>if (a<b) { x = '</p>'; }</script>");
        assert_eq!(got.first(), Some(&(0, MarkupEvent::open("script"))));
        assert_eq!(got.last(), Some(&(0, MarkupEvent::close("script"))));
        let text: String = got
            .iter()
            .filter_map(|(_, e)| match e {
                MarkupEvent::Text(t) => Some(t.to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(text, "if (a<b) { x = '</p>'; }");
    }

    #[test]
    fn test_chunked_input() {
        let mut source = HtmlSource::new(Vec::new(), SourceOptions::default());
        source.feed("<di");
        source.feed("v>te");
        source.feed("xt</div>");
        let got = source.finish();

        assert_eq!(got[0], (0, MarkupEvent::open("div")));
        assert_eq!(got.last(), Some(&(0, MarkupEvent::close("div"))));
    }

    #[test]
    fn test_doctype_and_comment() {
        let got = events("<!DOCTYPE html><!-- note -->");
        assert!(matches!(
            &got[0],
            (0, MarkupEvent::DocType { name: Some(name), .. }) if &**name == "html"
        ));
        assert_eq!(got[1], (0, MarkupEvent::comment(" note ")));
    }
}
