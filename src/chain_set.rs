use crate::chain::Chain;
use crate::event::MarkupEvent;
use crate::levels::LevelFlags;
use log::{debug, trace};

/// Every selection chain active for one parse.
///
/// A chain set belongs to exactly one event stream. Build a fresh one per
/// parse; state left over from a previous document would leak into the next.
#[derive(Debug, Clone, Default)]
pub struct ChainSet {
    chains: Vec<Chain>,
    // Verdict given to the open element at each level, replayed for its close.
    opened: LevelFlags,
    depth: usize,
}

impl ChainSet {
    pub fn new(chains: Vec<Chain>) -> Self {
        debug!(
            "block selection over {} chain(s) of length {:?}",
            chains.len(),
            chains.iter().map(Chain::len).collect::<Vec<_>>()
        );

        Self {
            chains,
            opened: LevelFlags::new(),
            depth: 0,
        }
    }

    pub fn push(&mut self, chain: Chain) {
        self.chains.push(chain);
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Number of elements currently open, as seen through the events fed so far.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether any chain selects the event.
    ///
    /// Every chain sees every event, even after one has already answered
    /// `true`, because evaluating an event also updates the chains' state.
    /// A close event is selected exactly when its open event was; it does not
    /// retire anything, see [`ChainSet::on_close`].
    ///
    /// # Panics
    ///
    /// Panics if a non-close event does not arrive at the current depth, i.e.
    /// directly inside the innermost open element.
    pub fn is_selected(&mut self, level: usize, event: &MarkupEvent) -> bool {
        if event.is_close() {
            return self.opened.get(level);
        }

        assert!(
            level == self.depth,
            "event at level {} while {} level(s) are open",
            level,
            self.depth
        );

        let selected = self
            .chains
            .iter_mut()
            .fold(false, |selected, chain| chain.is_selected(level, event) | selected);

        if let MarkupEvent::OpenElement(_) = event {
            self.opened.ensure(level);
            self.opened.set(level, selected);
            self.depth = level + 1;
        }

        trace!("level {} {:?} -> {}", level, event, selected);
        selected
    }

    /// Retires the state every chain holds for `level`. Call it exactly once
    /// per close event, with that event's level.
    ///
    /// # Panics
    ///
    /// Panics unless `level` is the level of the innermost open element.
    pub fn on_close(&mut self, level: usize) {
        assert!(
            level + 1 == self.depth,
            "close at level {} while {} level(s) are open",
            level,
            self.depth
        );

        for chain in self.chains.iter_mut() {
            chain.retire(level);
        }
        self.opened.clear(level);
        self.depth = level;
    }

    /// Classifies an event and, for close events, retires the closed level afterwards.
    pub fn process(&mut self, level: usize, event: &MarkupEvent) -> bool {
        let selected = self.is_selected(level, event);
        if event.is_close() {
            self.on_close(level);
        }
        selected
    }
}
