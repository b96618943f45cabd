use std::path::Path;
use tapguard_application::ports::BlockListSource;
use tapguard_domain::DomainError;
use tapguard_infrastructure::lists::{parse_list, FileBlockListSource};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
async fn test_composes_blocked_blacklist_minus_whitelist() {
    let dir = tempfile::tempdir().unwrap();
    let blocked = write(
        &dir,
        "blocked.conf",
        "server:\n\
         local-zone: \"ads.example.com.\" always_nxdomain\n\
         local-zone: \"tracker.example.net\" always_nxdomain\n\
         local-zone: \"allowed.example.org.\" always_nxdomain\n",
    );
    let whitelist = write(&dir, "whitelist.conf", "allowed.example.org\n# comment\n");
    let blacklist = write(&dir, "blacklist.conf", "extra.bad.io\n\n");

    let source = FileBlockListSource::new(&blocked, &whitelist, &blacklist);
    let set = source.load().await.unwrap();

    assert_eq!(set.len(), 3);
    assert!(set.contains("ads.example.com."));
    assert!(set.contains("tracker.example.net."));
    assert!(set.contains("extra.bad.io."));
    assert!(!set.contains("allowed.example.org."));
}

#[tokio::test]
async fn test_whitelist_beats_blacklist() {
    let dir = tempfile::tempdir().unwrap();
    let blocked = write(&dir, "blocked.conf", "");
    let whitelist = write(&dir, "whitelist.conf", "both.example.com\n");
    let blacklist = write(&dir, "blacklist.conf", "both.example.com\n");

    let set = FileBlockListSource::new(&blocked, &whitelist, &blacklist)
        .load()
        .await
        .unwrap();
    assert!(set.is_empty());
}

#[tokio::test]
async fn test_missing_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let blocked = write(&dir, "blocked.conf", "a.example.com\n");
    let whitelist = write(&dir, "whitelist.conf", "");
    let missing = dir.path().join("missing.conf");

    let result = FileBlockListSource::new(&blocked, &whitelist, &missing)
        .load()
        .await;

    match result {
        Err(DomainError::BlockListLoad { path, .. }) => {
            assert_eq!(Path::new(&path), missing.as_path())
        }
        other => panic!("expected BlockListLoad, got {:?}", other.map(|s| s.len())),
    }
}

#[test]
fn test_parse_list_ignores_noise() {
    let contents = "\
# header comment
server:
local-zone: \"good.example.com\" always_nxdomain
   indented.example.com
not a domain
example.com
";
    let domains: Vec<_> = parse_list(contents).collect();
    assert_eq!(domains, vec!["good.example.com.", "example.com."]);
}
