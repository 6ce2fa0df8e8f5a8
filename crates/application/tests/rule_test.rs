mod helpers;

use helpers::{build_rule, query};
use rewriteng_application::services::RewriteResult;
use rewriteng_domain::{FieldPart, MatchType, RecordType};

// ── substitute ───────────────────────────────────────────────────────────────

#[test]
fn test_non_matching_rules_return_none() {
    let rules = [
        build_rule(&["exact", "example.com", "example.org"]),
        build_rule(&["prefix", "www.", "app."]),
        build_rule(&["suffix", "example.com", "example.org"]),
        build_rule(&["substring", "corp", "lab"]),
        build_rule(&["regex", r"(.*)\.example\.com", "{1}.example.org"]),
        build_rule(&["fullregex", r"^static\.", "static.example.net."]),
        build_rule(&["noop", "example.com.", "ignored"]),
    ];

    let input = String::from("mail.example.net.");
    for rule in &rules {
        assert_eq!(rule.substitute(&input), None, "{:?}", rule.match_type());
    }
    assert_eq!(input, "mail.example.net.");
}

#[test]
fn test_exact_substitute() {
    let rule = build_rule(&["exact", "example.com", "example.org"]);
    assert_eq!(rule.substitute("example.com."), Some("example.org.".to_string()));
    assert_eq!(rule.substitute("example.com"), None);
    assert_eq!(rule.substitute("www.example.com."), None);
}

#[test]
fn test_prefix_substitute() {
    let rule = build_rule(&["prefix", "www.", "app."]);
    assert_eq!(
        rule.substitute("www.example.org."),
        Some("app.example.org.".to_string())
    );
}

#[test]
fn test_suffix_substitute() {
    let rule = build_rule(&["suffix", "example.com", "example.org"]);
    assert_eq!(
        rule.substitute("www.example.com."),
        Some("www.example.org.".to_string())
    );
}

#[test]
fn test_substring_replaces_every_occurrence() {
    let rule = build_rule(&["substring", "ex", "ab"]);
    assert_eq!(rule.substitute("ex.ex.org."), Some("ab.ab.org.".to_string()));
}

#[test]
fn test_regex_substitute_uses_capture_group() {
    let rule = build_rule(&["regex", r"(.*)\.example\.com", "{1}.example.org"]);
    assert_eq!(
        rule.substitute("www.example.com."),
        Some("www.example.org.".to_string())
    );
}

#[test]
fn test_regex_substitute_stops_at_first_placeholder() {
    let rule = build_rule(&["regex", r"(\w+)\.(\w+)\.com", "{2}.{1}.org"]);
    assert_eq!(rule.substitute("a.b.com."), Some("{2}.a.org.".to_string()));
}

#[test]
fn test_regex_substitute_without_placeholder_is_no_match() {
    let rule = build_rule(&["regex", r"example\.com", "example.org"]);
    assert_eq!(rule.substitute("example.com."), None);
}

#[test]
fn test_regex_whole_match_placeholder() {
    let rule = build_rule(&["regex", r"example\.com", "{0}.cdn"]);
    assert_eq!(
        rule.substitute("www.example.com."),
        Some("example.com.cdn.".to_string())
    );
}

#[test]
fn test_fullregex_substitute_is_verbatim() {
    let rule = build_rule(&["fullregex", r"^(.*)\.example\.org\.$", "Static.Example.com"]);
    assert_eq!(
        rule.substitute("www.example.org."),
        Some("Static.Example.com".to_string())
    );
}

#[test]
fn test_noop_substitute_returns_suffix() {
    let rule = build_rule(&["noop", "example.org", "ignored"]);
    assert_eq!(
        rule.substitute("www.example.org"),
        Some("example.org".to_string())
    );
}

#[test]
fn test_part_defaults_to_name() {
    assert_eq!(build_rule(&["exact", "a", "b"]).part(), FieldPart::Name);
    assert_eq!(build_rule(&["data", "exact", "a", "b"]).part(), FieldPart::Data);
    assert_eq!(build_rule(&["both", "exact", "a", "b"]).part(), FieldPart::Both);
}

// ── rewrite_question ─────────────────────────────────────────────────────────

#[test]
fn test_prefix_question_rewrite_sets_recursion_desired() {
    let rule = build_rule(&["prefix", "www.", "app."]);
    let mut request = query("www.example.org.", RecordType::A);
    assert!(!request.recursion_desired);

    assert_eq!(rule.rewrite_question(&mut request), RewriteResult::Done);
    assert_eq!(request.question().unwrap().name, "app.example.org.");
    assert!(request.recursion_desired);
}

#[test]
fn test_question_match_is_case_insensitive() {
    let rule = build_rule(&["exact", "example.com", "example.org"]);
    let mut request = query("EXAMPLE.Com.", RecordType::A);

    assert_eq!(rule.rewrite_question(&mut request), RewriteResult::Done);
    assert_eq!(request.question().unwrap().name, "example.org.");
}

#[test]
fn test_ignored_question_is_untouched() {
    let rule = build_rule(&["suffix", "example.com", "example.org"]);
    let mut request = query("www.example.net.", RecordType::A);
    let before = request.clone();

    assert_eq!(rule.rewrite_question(&mut request), RewriteResult::Ignored);
    assert_eq!(request, before);
}

#[test]
fn test_regex_question_replaces_every_placeholder() {
    let rule = build_rule(&["regex", r"(\w+)\.(\w+)\.com", "{2}.{1}.org"]);
    let mut request = query("a.b.com.", RecordType::A);

    assert_eq!(rule.rewrite_question(&mut request), RewriteResult::Done);
    assert_eq!(request.question().unwrap().name, "b.a.org.");
}

#[test]
fn test_regex_question_without_placeholder_replaces_whole_name() {
    let rule = build_rule(&["regex", r"example\.org", "example.com"]);
    let mut request = query("sub.example.org.", RecordType::A);

    assert_eq!(rule.rewrite_question(&mut request), RewriteResult::Done);
    assert_eq!(request.question().unwrap().name, "example.com.");
}

#[test]
fn test_regex_unmatched_group_substitutes_empty() {
    let rule = build_rule(&["regex", r"^(www\.)?example\.org\.$", "{1}example.net"]);

    let mut bare = query("example.org.", RecordType::A);
    assert_eq!(rule.rewrite_question(&mut bare), RewriteResult::Done);
    assert_eq!(bare.question().unwrap().name, "example.net.");

    let mut www = query("www.example.org.", RecordType::A);
    assert_eq!(rule.rewrite_question(&mut www), RewriteResult::Done);
    assert_eq!(www.question().unwrap().name, "www.example.net.");
}

#[test]
fn test_fullregex_question_is_normalized() {
    let rule = build_rule(&["fullregex", r"^(.*)\.example\.org\.$", "static.example.com"]);

    for name in ["www.example.org.", "a.b.example.org."] {
        let mut request = query(name, RecordType::A);
        assert_eq!(rule.rewrite_question(&mut request), RewriteResult::Done);
        assert_eq!(request.question().unwrap().name, "static.example.com.");
        assert!(request.recursion_desired);
    }
}

#[test]
fn test_noop_question_only_sets_recursion_desired() {
    let rule = build_rule(&["noop", "example.org.", "ignored"]);
    let mut request = query("www.example.org.", RecordType::A);

    assert_eq!(rule.rewrite_question(&mut request), RewriteResult::Done);
    assert_eq!(request.question().unwrap().name, "www.example.org.");
    assert!(request.recursion_desired);
    assert_eq!(rule.match_type(), MatchType::NoOp);
}

#[test]
fn test_question_rewrite_without_question_is_ignored() {
    let rule = build_rule(&["prefix", "www.", "app."]);
    let mut request = query("www.example.org.", RecordType::A);
    request.queries.clear();

    assert_eq!(rule.rewrite_question(&mut request), RewriteResult::Ignored);
}
