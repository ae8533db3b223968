use crate::chain_set::ChainSet;
use crate::event::MarkupEvent;
use crate::handler::{Discard, MarkupHandler};
use crate::source::{HtmlSource, SourceOptions};

/// Splits an event stream in two: events selected by the chain set go to
/// `selected`, the rest to `unselected`.
///
/// Close events always retire the closed level, whichever side they go to.
#[derive(Debug)]
pub struct BlockSelector<S, U = Discard> {
    chains: ChainSet,
    selected: S,
    unselected: U,
}

impl<S: MarkupHandler> BlockSelector<S> {
    pub fn new(chains: ChainSet, selected: S) -> Self {
        Self::with_unselected(chains, selected, Discard)
    }
}

impl<S: MarkupHandler, U: MarkupHandler> BlockSelector<S, U> {
    pub fn with_unselected(chains: ChainSet, selected: S, unselected: U) -> Self {
        Self {
            chains,
            selected,
            unselected,
        }
    }

    pub fn chains(&self) -> &ChainSet {
        &self.chains
    }

    pub fn selected(&self) -> &S {
        &self.selected
    }

    pub fn unselected(&self) -> &U {
        &self.unselected
    }

    pub fn into_inner(self) -> (S, U) {
        (self.selected, self.unselected)
    }
}

impl<S: MarkupHandler, U: MarkupHandler> MarkupHandler for BlockSelector<S, U> {
    fn handle_event(&mut self, level: usize, event: MarkupEvent) {
        if self.chains.process(level, &event) {
            self.selected.handle_event(level, event);
        } else {
            self.unselected.handle_event(level, event);
        }
    }
}

/// Tokenizes `html` and returns the events selected by `chains`, with their levels.
pub fn select_fragments(html: &str, chains: ChainSet) -> Vec<(usize, MarkupEvent)> {
    let selector = BlockSelector::new(chains, Vec::new());
    let mut source = HtmlSource::new(selector, SourceOptions::default());
    source.feed(html);
    let (selected, _) = source.finish().into_inner();
    selected
}
