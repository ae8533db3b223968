use crate::levels::LevelFlags;
use markup5ever::LocalName;

/// Outcome of offering one event to one segment of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// The event cannot be selected by this chain.
    Reject,
    /// The segment is satisfied; the rest of the chain decides. Selected if
    /// this segment is the last one.
    Advance,
    /// The segment recorded a brand new match for this element. The element
    /// is selected only if this segment is the last one.
    Commit,
}

/// One step of a selection path: an element name and whether it may start
/// matching at any depth or only directly below its predecessor's match.
#[derive(Debug, Clone)]
pub struct Segment {
    pattern: LocalName,
    any_depth: bool,
    matched: LevelFlags,
}

impl Segment {
    pub fn new<N: Into<LocalName>>(pattern: N, any_depth: bool) -> Self {
        Self {
            pattern: pattern.into(),
            any_depth,
            matched: LevelFlags::new(),
        }
    }

    pub fn pattern(&self) -> &LocalName {
        &self.pattern
    }

    pub fn any_depth(&self) -> bool {
        self.any_depth
    }

    /// Whether an open match was recorded exactly at `level`.
    pub fn matched_at(&self, level: usize) -> bool {
        self.matched.get(level)
    }

    /// Whether a match recorded at `level` or above is still open.
    pub fn active_at(&self, level: usize) -> bool {
        self.matched.active_at(level)
    }

    // `parent_matched` tells whether the previous segment recorded a match at `level - 1`.
    fn eligible(&self, level: usize, parent_matched: bool) -> bool {
        self.any_depth || level == 0 || parent_matched
    }

    /// Declarations, doctypes, text, CDATA, comments and processing instructions.
    pub(crate) fn content(&mut self, level: usize) -> Step {
        self.matched.ensure(level);

        if self.matched.active_at(level) {
            Step::Advance
        } else {
            Step::Reject
        }
    }

    pub(crate) fn open_element(
        &mut self,
        level: usize,
        name: &LocalName,
        parent_matched: bool,
    ) -> Step {
        self.matched.ensure(level);
        let active = self.matched.active_at(level);

        if self.eligible(level, parent_matched) {
            let hit = *name == self.pattern;

            if active {
                // Already matched from a shallower level. Refresh this level so later
                // siblings can restart from here, but leave the verdict to the rest
                // of the chain.
                self.matched.set(level, hit);
                return Step::Advance;
            }

            if hit {
                self.matched.set(level, true);
                return Step::Commit;
            }

            return Step::Reject;
        }

        if active {
            Step::Advance
        } else {
            Step::Reject
        }
    }

    /// Standalone elements never have content, so a match is never recorded.
    pub(crate) fn standalone_element(
        &mut self,
        level: usize,
        name: &LocalName,
        parent_matched: bool,
        is_tail: bool,
    ) -> Step {
        self.matched.ensure(level);

        if self.matched.active_at(level) {
            return Step::Advance;
        }

        // Nothing below a standalone element could satisfy the remaining segments.
        if !is_tail {
            return Step::Reject;
        }

        if self.eligible(level, parent_matched) && *name == self.pattern {
            Step::Commit
        } else {
            Step::Reject
        }
    }

    pub(crate) fn retire(&mut self, level: usize) {
        self.matched.clear(level);
    }
}
