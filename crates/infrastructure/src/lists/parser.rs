use compact_str::CompactString;
use regex::Regex;
use std::sync::LazyLock;
use tapguard_domain::normalize_domain;

static LIST_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(local-zone:\s*")?(([a-z0-9]+([-a-z0-9]+)*\.)+[a-z]{2,}\.?)"#)
        .expect("list line pattern must be a valid regex")
});

/// Domain named on one list line, normalized with a trailing dot.
///
/// Accepts `local-zone: "example.com." always_nxdomain` as well as a bare
/// domain at the start of the line. Anything else is ignored.
pub fn parse_list_line(line: &str) -> Option<CompactString> {
    let captures = LIST_LINE.captures(line)?;
    captures.get(2).map(|m| normalize_domain(m.as_str()))
}

pub fn parse_list(contents: &str) -> impl Iterator<Item = CompactString> + '_ {
    contents.lines().filter_map(parse_list_line)
}
