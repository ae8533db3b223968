const GROWTH: usize = 10;

/// A growable set of boolean flags indexed by nesting depth.
///
/// Conceptually an infinite vector of `false`; storage is materialized on
/// demand and never shrinks, so growing keeps every flag already set.
#[derive(Debug, Clone)]
pub struct LevelFlags {
    flags: Vec<bool>,
}

impl Default for LevelFlags {
    fn default() -> Self {
        Self {
            flags: vec![false; GROWTH],
        }
    }
}

impl LevelFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of depths currently materialized.
    pub fn capacity(&self) -> usize {
        self.flags.len()
    }

    /// Makes sure a flag exists for `depth`, growing by at least `GROWTH` slots at a time.
    pub fn ensure(&mut self, depth: usize) {
        if depth >= self.flags.len() {
            let len = std::cmp::max(depth + 1, self.flags.len() + GROWTH);
            self.flags.resize(len, false);
        }
    }

    /// Flag at `depth`. Depths never materialized read as `false`.
    pub fn get(&self, depth: usize) -> bool {
        self.flags.get(depth).copied().unwrap_or(false)
    }

    /// Sets the flag at `depth`, growing the storage first if needed.
    pub fn set(&mut self, depth: usize, value: bool) {
        self.ensure(depth);
        self.flags[depth] = value;
    }

    /// Whether a flag is set at `depth` or any shallower depth.
    ///
    /// A match recorded at depth `m` covers every depth `>= m` until it is cleared.
    pub fn active_at(&self, depth: usize) -> bool {
        let end = std::cmp::min(depth + 1, self.flags.len());
        self.flags[..end].iter().rev().any(|flag| *flag)
    }

    /// Resets the flag at `depth`. Never grows the storage.
    pub fn clear(&mut self, depth: usize) {
        if let Some(flag) = self.flags.get_mut(depth) {
            *flag = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_cleared() {
        let flags = LevelFlags::new();
        assert_eq!(flags.capacity(), GROWTH);
        assert!((0..GROWTH).all(|d| !flags.get(d)));
        assert!(!flags.get(1000));
        assert!(!flags.active_at(1000));
    }

    #[test]
    fn test_growth_policy() {
        let mut flags = LevelFlags::new();
        flags.ensure(3);
        assert_eq!(flags.capacity(), GROWTH);

        flags.ensure(10);
        assert_eq!(flags.capacity(), 20);

        flags.ensure(57);
        assert_eq!(flags.capacity(), 58);
    }

    #[test]
    fn test_growth_keeps_flags() {
        let mut flags = LevelFlags::new();
        flags.set(4, true);
        flags.ensure(500);
        assert!(flags.get(4));
        assert!(!flags.get(5));
        assert!(!flags.get(500));
    }

    #[test]
    fn test_set_beyond_capacity_grows() {
        let mut flags = LevelFlags::new();
        flags.set(42, true);
        assert_eq!(flags.capacity(), 43);
        assert!(flags.get(42));
        assert!(flags.active_at(50));
        assert!(!flags.active_at(41));
    }

    #[test]
    fn test_active_covers_deeper_levels() {
        let mut flags = LevelFlags::new();
        flags.ensure(8);
        flags.set(2, true);

        assert!(!flags.active_at(0));
        assert!(!flags.active_at(1));
        assert!(flags.active_at(2));
        assert!(flags.active_at(8));

        flags.clear(2);
        assert!(!flags.active_at(8));
    }

    #[test]
    fn test_clear_never_grows() {
        let mut flags = LevelFlags::new();
        flags.clear(300);
        assert_eq!(flags.capacity(), GROWTH);
    }
}
