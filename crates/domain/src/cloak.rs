//! CNAME cloaking state: the map of dynamically blocked names and the
//! one-shot chain built from a response's answer section.

use super::{BlockSet, DnsAnswer, RecordType};
use compact_str::CompactString;
use rustc_hash::FxHashMap;

/// Previously-safe query names that were blocked because their CNAME chain
/// led to a blocked target, keyed by query name.
///
/// Every key is also present in the engine's live [`BlockSet`]; both are
/// updated together by the owner.
#[derive(Debug, Clone, Default)]
pub struct CloakMap {
    entries: FxHashMap<CompactString, CompactString>,
}

impl CloakMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, qname: &str, target: &str) {
        self.entries
            .insert(CompactString::from(qname), CompactString::from(target));
    }

    pub fn get(&self, qname: &str) -> Option<&str> {
        self.entries.get(qname).map(|t| t.as_str())
    }

    pub fn contains(&self, qname: &str) -> bool {
        self.entries.contains_key(qname)
    }

    /// Drop every entry whose target is not in `blocked` and return the
    /// removed `(qname, target)` pairs, sorted by qname.
    pub fn remove_unblocked(&mut self, blocked: &BlockSet) -> Vec<(String, String)> {
        let mut removed = Vec::new();
        self.entries.retain(|qname, target| {
            if blocked.contains(target.as_str()) {
                true
            } else {
                removed.push((qname.to_string(), target.to_string()));
                false
            }
        });
        removed.sort();
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(q, t)| (q.as_str(), t.as_str()))
    }
}

/// Outcome of following a CNAME chain from the query name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainOutcome<'a> {
    /// A link pointed at a blocked name.
    Blocked(&'a str),
    /// The chain ended without reaching a blocked name.
    Ends,
    /// The hop bound was reached, so the chain loops.
    Cycle,
}

/// `name → target` links taken from the CNAME records of one answer section.
#[derive(Debug)]
pub struct CnameChain<'a> {
    links: FxHashMap<&'a str, &'a str>,
}

impl<'a> CnameChain<'a> {
    /// `None` when the answer section holds no CNAME records.
    pub fn from_answers(answers: &'a [DnsAnswer]) -> Option<Self> {
        let mut links: Option<FxHashMap<&'a str, &'a str>> = None;
        for answer in answers {
            if answer.record_type != RecordType::CNAME {
                continue;
            }
            if let Some(target) = answer.cname_target.as_deref() {
                links
                    .get_or_insert_with(FxHashMap::default)
                    .insert(answer.name.as_str(), target);
            }
        }
        links.map(|links| Self { links })
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Follow links from `qname` until one points at a name in `blocked`.
    ///
    /// An acyclic chain has at most `len()` links, so the walk stops after
    /// that many hops.
    pub fn walk(&self, qname: &str, blocked: &BlockSet) -> ChainOutcome<'a> {
        let mut current = qname;
        for _ in 0..self.links.len() {
            let Some(&target) = self.links.get(current) else {
                return ChainOutcome::Ends;
            };
            if blocked.contains(target) {
                return ChainOutcome::Blocked(target);
            }
            current = target;
        }
        if self.links.contains_key(current) {
            ChainOutcome::Cycle
        } else {
            ChainOutcome::Ends
        }
    }
}
