use markup5ever::LocalName;
use tendril::StrTendril;

/// One unit of a markup event stream, in document order.
///
/// Element names are expected to be normalized already (html5ever lowercases
/// HTML tag names), so matching is plain equality on the atom.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupEvent {
    XmlDeclaration {
        version: Option<StrTendril>,
        encoding: Option<StrTendril>,
        standalone: Option<bool>,
    },
    DocType {
        name: Option<StrTendril>,
        public_id: Option<StrTendril>,
        system_id: Option<StrTendril>,
    },
    CData(StrTendril),
    Text(StrTendril),
    Comment(StrTendril),
    ProcessingInstruction {
        target: StrTendril,
        content: StrTendril,
    },
    OpenElement(LocalName),
    StandaloneElement(LocalName),
    CloseElement(LocalName),
}

impl MarkupEvent {
    pub fn text(contents: &str) -> Self {
        MarkupEvent::Text(StrTendril::from(contents))
    }

    pub fn comment(contents: &str) -> Self {
        MarkupEvent::Comment(StrTendril::from(contents))
    }

    pub fn open(name: &str) -> Self {
        MarkupEvent::OpenElement(LocalName::from(name))
    }

    pub fn standalone(name: &str) -> Self {
        MarkupEvent::StandaloneElement(LocalName::from(name))
    }

    pub fn close(name: &str) -> Self {
        MarkupEvent::CloseElement(LocalName::from(name))
    }

    /// Element name for element events.
    pub fn name(&self) -> Option<&LocalName> {
        match self {
            MarkupEvent::OpenElement(name)
            | MarkupEvent::StandaloneElement(name)
            | MarkupEvent::CloseElement(name) => Some(name),
            _ => None,
        }
    }

    /// Whether the event opens or closes a scope.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            MarkupEvent::OpenElement(_) | MarkupEvent::CloseElement(_)
        )
    }

    pub fn is_close(&self) -> bool {
        matches!(self, MarkupEvent::CloseElement(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_names() {
        assert_eq!(MarkupEvent::open("div").name().map(|n| &**n), Some("div"));
        assert_eq!(
            MarkupEvent::standalone("br").name(),
            Some(&LocalName::from("br"))
        );
        assert_eq!(MarkupEvent::text("div").name(), None);
    }

    #[test]
    fn test_structural_kinds() {
        assert!(MarkupEvent::open("p").is_structural());
        assert!(MarkupEvent::close("p").is_structural());
        assert!(!MarkupEvent::standalone("img").is_structural());
        assert!(!MarkupEvent::comment("p").is_structural());
    }
}
