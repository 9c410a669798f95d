/// Default number of buckets in every vocabulary index.
pub const DEFAULT_CAPACITY: usize = 5000;

/// Multiplier of the polynomial fold, one more than the size of the alphabet.
const HASH_BASE: usize = 43;

/// Accented letters used by the supported languages, coded 26.. in this order.
const ACCENTED_LETTERS: [char; 17] = [
    'ñ', 'é', 'à', 'è', 'ù', 'â', 'ê', 'î', 'ô', 'û', 'ë', 'ï', 'ü', 'ÿ', 'ç', 'œ', 'æ',
];

/// Code of a single character in the restricted alphabet, `None` when unhashable.
fn char_code(c: char) -> Option<usize> {
    if c.is_ascii_lowercase() {
        return Some(c as usize - 'a' as usize);
    }
    ACCENTED_LETTERS
        .iter()
        .position(|&accented| accented == c)
        .map(|pos| 26 + pos)
}

/// Bucket of `word` in a table of `capacity` buckets.
///
/// A word with any character outside the alphabet has no bucket, and
/// neither does any word in a table without buckets.
pub fn hash_word(word: &str, capacity: usize) -> Option<usize> {
    if capacity == 0 {
        return None;
    }
    let mut chars = word.chars();
    let mut h = char_code(chars.next()?)? % capacity;
    for c in chars {
        h = (h * HASH_BASE + char_code(c)?) % capacity;
    }
    Some(h)
}

/// Occupancy figures of an index, for comparing collisions between classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketStats {
    pub occupied: usize,
    pub longest_chain: usize,
}

/// Set of distinct words of one class, stored as a fixed array of chains.
///
/// Built once, immutable afterwards.
#[derive(Debug, Clone)]
pub struct VocabularyIndex {
    buckets: Vec<Vec<String>>,
    len: usize,
}

impl VocabularyIndex {
    /// Build an index with `capacity` buckets from a token sequence.
    ///
    /// Repeats are stored once and unhashable words are skipped.
    /// `capacity` must be non-zero.
    pub fn build<I, S>(tokens: I, capacity: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        assert!(capacity > 0, "vocabulary capacity must be non-zero");

        let mut index = VocabularyIndex {
            buckets: vec![Vec::new(); capacity],
            len: 0,
        };
        for token in tokens {
            index.insert(token.as_ref());
        }
        index
    }

    fn insert(&mut self, word: &str) {
        let Some(bucket) = hash_word(word, self.buckets.len()) else {
            return;
        };
        let chain = &mut self.buckets[bucket];
        if chain.iter().any(|stored| stored == word) {
            return;
        }
        chain.push(word.to_string());
        self.len += 1;
    }

    /// Exact membership test.
    pub fn contains(&self, word: &str) -> bool {
        match hash_word(word, self.buckets.len()) {
            Some(bucket) => self.buckets[bucket].iter().any(|stored| stored == word),
            None => false,
        }
    }

    /// Number of distinct words stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn bucket_stats(&self) -> BucketStats {
        BucketStats {
            occupied: self.buckets.iter().filter(|chain| !chain.is_empty()).count(),
            longest_chain: self.buckets.iter().map(Vec::len).max().unwrap_or(0),
        }
    }
}
