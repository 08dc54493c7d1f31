use rustc_hash::FxHashMap;

/// Largest number of entries (sentinel included) a dictionary can hold. Addresses are u32.
pub const MAX_PHRASES: usize = u32::MAX as usize;

/// Address of the empty phrase.
pub const SENTINEL: u32 = 0;

/// Append-only LZ78 phrase dictionary, stored as a trie.
///
/// Every phrase is its parent phrase plus one bit, so an entry only records `(parent, bit)`.
/// The edge map answers "does this phrase extend by this bit" without rebuilding keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseDictionary {
    /// `(parent address, last bit)` for each address. Entry 0 is the sentinel.
    entries: Vec<(u32, bool)>,
    edges: FxHashMap<(u32, bool), u32>,
}

impl PhraseDictionary {
    /// A dictionary holding only the empty phrase at address 0.
    pub fn new() -> Self {
        Self {
            entries: vec![(SENTINEL, false)],
            edges: FxHashMap::default(),
        }
    }

    /// Number of phrases, sentinel included. Never 0.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; the sentinel is never removed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Address the next inserted phrase will get.
    pub fn next_address(&self) -> usize {
        self.entries.len()
    }

    /// Address of `parent` extended by `bit`, if that phrase is known.
    pub fn child(&self, parent: u32, bit: bool) -> Option<u32> {
        self.edges.get(&(parent, bit)).copied()
    }

    /// The `(parent, bit)` pair that makes up a non-empty phrase.
    pub fn parent(&self, address: u32) -> Option<(u32, bool)> {
        if address == SENTINEL {
            return None;
        }
        self.entries.get(address as usize).copied()
    }

    /// Add `parent` + `bit` at the next address and return it.
    ///
    /// # Panics
    ///
    /// Panics when the dictionary already holds `MAX_PHRASES` entries. Addresses are never
    /// truncated.
    pub fn insert(&mut self, parent: u32, bit: bool) -> u32 {
        let address = match u32::try_from(self.entries.len()) {
            Ok(a) if a < u32::MAX => a,
            _ => panic!("phrase dictionary is limited to {} entries", MAX_PHRASES),
        };
        debug_assert!((parent as usize) < self.entries.len());
        self.entries.push((parent, bit));
        self.edges.insert((parent, bit), address);
        address
    }

    /// Look up the address of a whole phrase.
    pub fn address_of(&self, phrase: &[bool]) -> Option<u32> {
        phrase
            .iter()
            .try_fold(SENTINEL, |node, &bit| self.child(node, bit))
    }

    /// Rebuild the bits of the phrase stored at `address`.
    pub fn phrase(&self, address: u32) -> Option<Vec<bool>> {
        if address as usize >= self.entries.len() {
            return None;
        }
        let mut bits = Vec::new();
        let mut node = address;
        while let Some((parent, bit)) = self.parent(node) {
            bits.push(bit);
            node = parent;
        }
        bits.reverse();
        Some(bits)
    }

    /// All `(phrase, address)` pairs in address order, starting with the empty phrase.
    pub fn iter(&self) -> impl Iterator<Item = (Vec<bool>, u32)> + '_ {
        (0..self.entries.len() as u32).filter_map(move |a| self.phrase(a).map(|p| (p, a)))
    }
}

impl Default for PhraseDictionary {
    fn default() -> Self {
        Self::new()
    }
}
