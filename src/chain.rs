use crate::error::{Error, Result};
use crate::event::MarkupEvent;
use crate::segment::{Segment, Step};
use markup5ever::LocalName;

/// Assembles the segments of one selection path, first path component first.
#[derive(Debug, Default, Clone)]
pub struct ChainBuilder {
    segments: Vec<(LocalName, bool)>,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a segment. With `any_depth` it may match at any nesting depth,
    /// otherwise only at the top level or directly below the previous segment's match.
    pub fn segment<N: Into<LocalName>>(mut self, name: N, any_depth: bool) -> Self {
        self.segments.push((name.into(), any_depth));
        self
    }

    /// Appends a segment that must be a direct child of the previous one.
    pub fn child<N: Into<LocalName>>(self, name: N) -> Self {
        self.segment(name, false)
    }

    /// Appends a segment that may match at any depth.
    pub fn descendant<N: Into<LocalName>>(self, name: N) -> Self {
        self.segment(name, true)
    }

    pub fn build(self) -> Result<Chain> {
        if self.segments.is_empty() {
            return Err(Error::EmptyChain);
        }

        let mut segments = Vec::with_capacity(self.segments.len());
        for (position, (name, any_depth)) in self.segments.into_iter().enumerate() {
            if name.is_empty() {
                return Err(Error::EmptyPattern { position });
            }
            segments.push(Segment::new(name, any_depth));
        }

        Ok(Chain { segments })
    }
}

/// One compiled selection path. Its topology is fixed once built; only the
/// per-level match state of the segments changes while events are fed.
#[derive(Debug, Clone)]
pub struct Chain {
    segments: Vec<Segment>,
}

impl Chain {
    pub fn builder() -> ChainBuilder {
        ChainBuilder::new()
    }

    /// Builds a chain from `(name, any_depth)` pairs as produced by a selector compiler.
    pub fn from_pairs<I, N>(pairs: I) -> Result<Chain>
    where
        I: IntoIterator<Item = (N, bool)>,
        N: Into<LocalName>,
    {
        pairs
            .into_iter()
            .fold(ChainBuilder::new(), |builder, (name, any_depth)| {
                builder.segment(name, any_depth)
            })
            .build()
    }

    /// Number of segments. Never zero, the builder rejects empty chains.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Classifies an event and updates the match state it implies.
    ///
    /// Close events are not selection queries and always answer `false`;
    /// use [`Chain::retire`] for them.
    pub fn is_selected(&mut self, level: usize, event: &MarkupEvent) -> bool {
        match event {
            MarkupEvent::OpenElement(name) => self.open_element(level, name),
            MarkupEvent::StandaloneElement(name) => self.standalone_element(level, name),
            MarkupEvent::CloseElement(_) => false,
            _ => self.content(level),
        }
    }

    pub fn content(&mut self, level: usize) -> bool {
        self.walk(level, |segment, _, _| segment.content(level))
    }

    pub fn open_element(&mut self, level: usize, name: &LocalName) -> bool {
        self.walk(level, |segment, parent_matched, _| {
            segment.open_element(level, name, parent_matched)
        })
    }

    pub fn standalone_element(&mut self, level: usize, name: &LocalName) -> bool {
        self.walk(level, |segment, parent_matched, is_tail| {
            segment.standalone_element(level, name, parent_matched, is_tail)
        })
    }

    /// Forgets every match recorded at `level`, in every segment.
    pub fn retire(&mut self, level: usize) {
        for segment in self.segments.iter_mut() {
            segment.retire(level);
        }
    }

    // Offers the event to each segment in order until one of them settles the verdict.
    // A segment is only reached when every segment before it answered `Advance`.
    fn walk<F>(&mut self, level: usize, mut step: F) -> bool
    where
        F: FnMut(&mut Segment, bool, bool) -> Step,
    {
        let last = self.segments.len() - 1;

        for index in 0..=last {
            let parent_matched =
                index > 0 && level > 0 && self.segments[index - 1].matched_at(level - 1);

            match step(&mut self.segments[index], parent_matched, index == last) {
                Step::Reject => return false,
                Step::Commit => return index == last,
                Step::Advance => {}
            }
        }

        true
    }
}
