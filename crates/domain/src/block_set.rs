use compact_str::CompactString;
use rustc_hash::FxHashSet;

/// Lower-case a domain name and make it fully qualified.
pub fn normalize_domain(domain: &str) -> CompactString {
    let trimmed = domain.trim();
    let mut out = CompactString::with_capacity(trimmed.len() + 1);
    for c in trimmed.chars() {
        out.push(c.to_ascii_lowercase());
    }
    if !out.ends_with('.') {
        out.push('.');
    }
    out
}

/// Set of fully-qualified domain names currently denied.
///
/// Lookups are exact: callers pass names already normalized by
/// [`normalize_domain`] (the DNS decoder emits them that way).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockSet {
    domains: FxHashSet<CompactString>,
}

impl BlockSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_domains<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            domains: domains
                .into_iter()
                .map(|d| normalize_domain(d.as_ref()))
                .collect(),
        }
    }

    /// `(base ∪ supplementary) − allow`
    pub fn compose(base: BlockSet, supplementary: &BlockSet, allow: &BlockSet) -> BlockSet {
        let mut domains = base.domains;
        domains.extend(supplementary.domains.iter().cloned());
        domains.retain(|d| !allow.domains.contains(d));
        BlockSet { domains }
    }

    #[inline]
    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    /// Returns `true` if the name was not present before.
    pub fn insert(&mut self, domain: &str) -> bool {
        self.domains.insert(normalize_domain(domain))
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(|d| d.as_str())
    }
}
