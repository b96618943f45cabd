use tapguard_domain::BlockSet;

#[test]
fn test_compose_is_union_minus_allow() {
    let base = BlockSet::from_domains(["ads.example.com", "tracker.net", "allowed.org"]);
    let supplementary = BlockSet::from_domains(["extra.io", "tracker.net"]);
    let allow = BlockSet::from_domains(["allowed.org", "extra.io"]);

    let composed = BlockSet::compose(base, &supplementary, &allow);

    assert_eq!(composed.len(), 2);
    assert!(composed.contains("ads.example.com."));
    assert!(composed.contains("tracker.net."));
    assert!(!composed.contains("allowed.org."));
    assert!(!composed.contains("extra.io."));
}

#[test]
fn test_compose_ignores_input_ordering() {
    let a = ["one.com", "two.com", "three.com"];
    let b = ["four.com", "one.com"];
    let allow = ["two.com"];

    let forward = BlockSet::compose(
        BlockSet::from_domains(a),
        &BlockSet::from_domains(b),
        &BlockSet::from_domains(allow),
    );
    let reversed = BlockSet::compose(
        BlockSet::from_domains(a.iter().rev()),
        &BlockSet::from_domains(b.iter().rev()),
        &BlockSet::from_domains(allow),
    );

    assert_eq!(forward, reversed);
    let mut names: Vec<&str> = forward.iter().collect();
    names.sort();
    assert_eq!(names, vec!["four.com.", "one.com.", "three.com."]);
}

#[test]
fn test_compose_allow_beats_supplementary() {
    let composed = BlockSet::compose(
        BlockSet::new(),
        &BlockSet::from_domains(["blocked.com"]),
        &BlockSet::from_domains(["blocked.com."]),
    );
    assert!(composed.is_empty());
}

#[test]
fn test_from_domains_normalizes_case_and_trailing_dot() {
    let set = BlockSet::from_domains(["Ads.Example.com", "ads.example.com."]);
    assert_eq!(set.len(), 1);
    assert!(set.contains("ads.example.com."));
}
