//! Integration tests for resolver construction and composition

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use placeholder_resolver::placeholder::{self, Placeholder, Replacement, SharedResolver};
use pretty_assertions::assert_eq;

fn text_of(resolver: &SharedResolver, key: &str) -> Option<String> {
    resolver
        .resolve(key)
        .and_then(|r| r.as_text().map(str::to_string))
}

fn fixed(entries: &[(&str, &str)]) -> SharedResolver {
    placeholder::placeholders(
        entries
            .iter()
            .map(|(k, v)| Placeholder::text(*k, *v).expect("valid key")),
    )
}

#[test]
fn test_map_resolves_present_and_absent_keys() {
    let map = placeholder::shared_map([
        ("name", Replacement::text("Steve")),
        ("world", Replacement::text("overworld")),
    ]);
    let resolver = placeholder::map(map.clone());

    for (key, value) in map.read().iter() {
        assert_eq!(text_of(&resolver, key).as_deref(), value.as_text());
    }
    assert_eq!(text_of(&resolver, "missing"), None);
}

#[test]
fn test_map_is_a_live_view() {
    let map = placeholder::shared_map([("name", Replacement::text("Steve"))]);
    let resolver = placeholder::map(map.clone());

    map.write().insert("name".to_string(), Replacement::text("Alex"));
    map.write().insert("time".to_string(), Replacement::text("12:00"));

    assert_eq!(text_of(&resolver, "name"), Some("Alex".to_string()));
    assert_eq!(text_of(&resolver, "time"), Some("12:00".to_string()));
}

#[test]
fn test_placeholder_list_is_a_private_copy() {
    let mut source = vec![Placeholder::text("name", "Steve").unwrap()];
    let resolver = placeholder::placeholder_list(&source);

    source.push(Placeholder::text("time", "12:00").unwrap());

    assert_eq!(text_of(&resolver, "name"), Some("Steve".to_string()));
    assert_eq!(text_of(&resolver, "time"), None);
}

#[test]
fn test_placeholder_list_last_duplicate_wins() {
    let resolver = placeholder::placeholder_list(&[
        Placeholder::text("user", "Steve").unwrap(),
        Placeholder::text("other", "x").unwrap(),
        Placeholder::text("user", "Alex").unwrap(),
    ]);
    assert_eq!(text_of(&resolver, "user"), Some("Alex".to_string()));
}

#[test]
fn test_combining_one_returns_it_unchanged() {
    let only = fixed(&[("name", "Steve")]);
    assert!(Arc::ptr_eq(&placeholder::combining(&[only.clone()]), &only));
    assert!(Arc::ptr_eq(&placeholder::combining_iter([only.clone()]), &only));
}

#[test]
fn test_combining_iter_of_nothing_is_empty() {
    let resolver = placeholder::combining_iter(std::iter::empty());
    assert!(Arc::ptr_eq(&resolver, &placeholder::empty()));
}

#[test]
fn test_combining_first_match_wins() {
    let r1 = fixed(&[("only_one", "1")]);
    let r2 = fixed(&[("user", "Steve"), ("two_three", "2")]);
    let r3 = fixed(&[("user", "Alex"), ("two_three", "3"), ("only_three", "3")]);
    let resolver = placeholder::combining(&[r1.clone(), r2.clone(), r3.clone()]);

    for key in ["user", "only_one", "two_three", "only_three", "none"] {
        let expected = text_of(&r1, key)
            .or_else(|| text_of(&r2, key))
            .or_else(|| text_of(&r3, key));
        assert_eq!(text_of(&resolver, key), expected, "key {key}");
    }
    assert_eq!(text_of(&resolver, "user"), Some("Steve".to_string()));
    assert_eq!(text_of(&resolver, "none"), None);
}

#[test]
fn test_combining_iter_snapshots_its_source() {
    let mut source = vec![fixed(&[("a", "1")]), fixed(&[("b", "2")])];
    let resolver = placeholder::combining_iter(source.clone());

    source.insert(0, fixed(&[("a", "overridden")]));
    source.push(fixed(&[("c", "3")]));

    assert_eq!(text_of(&resolver, "a"), Some("1".to_string()));
    assert_eq!(text_of(&resolver, "c"), None);
}

#[test]
fn test_empty_resolves_nothing() {
    let empty = placeholder::empty();
    for key in ["", " ", "name", "<name>", "日本語", "a\u{0}b"] {
        assert!(empty.resolve(key).is_none(), "key {key:?}");
    }
}

#[test]
fn test_dynamic_memoizes_after_success() {
    let answers = Arc::new(Mutex::new(HashMap::from([("x", "first")])));
    let calls = Arc::new(AtomicUsize::new(0));

    let resolver = {
        let answers = answers.clone();
        let calls = calls.clone();
        placeholder::dynamic(move |key: &str| {
            calls.fetch_add(1, Ordering::SeqCst);
            let answers = answers.lock().unwrap();
            answers.get(key).map(|v| Replacement::text(*v))
        })
    };

    assert_eq!(text_of(&resolver, "x"), Some("first".to_string()));

    answers.lock().unwrap().insert("x", "second");
    assert_eq!(text_of(&resolver, "x"), Some("first".to_string()));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_dynamic_recomputes_absence() {
    let answers = Arc::new(Mutex::new(HashMap::<&str, &str>::new()));
    let calls = Arc::new(AtomicUsize::new(0));

    let resolver = {
        let answers = answers.clone();
        let calls = calls.clone();
        placeholder::dynamic(move |key: &str| {
            calls.fetch_add(1, Ordering::SeqCst);
            answers.lock().unwrap().get(key).map(|v| Replacement::text(*v))
        })
    };

    assert_eq!(text_of(&resolver, "y"), None);
    answers.lock().unwrap().insert("y", "late");
    assert_eq!(text_of(&resolver, "y"), Some("late".to_string()));
    assert_eq!(text_of(&resolver, "y"), Some("late".to_string()));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_dynamic_concurrent_access_settles() {
    let calls = Arc::new(AtomicUsize::new(0));
    let resolver = {
        let calls = calls.clone();
        placeholder::dynamic(move |key: &str| {
            calls.fetch_add(1, Ordering::SeqCst);
            key.strip_prefix("k").map(|n| Replacement::text(n.to_string()))
        })
    };

    let keys: Vec<String> = (0..32).map(|i| format!("k{i}")).collect();
    thread::scope(|scope| {
        for _ in 0..8 {
            let resolver = &resolver;
            let keys = &keys;
            scope.spawn(move || {
                for _ in 0..50 {
                    for key in keys {
                        let found = resolver.resolve(key).expect("generated");
                        assert_eq!(found.as_text(), key.strip_prefix('k'));
                    }
                    assert!(resolver.resolve("miss").is_none());
                }
            });
        }
    });

    // Racing first lookups may generate twice, but every key is cached afterwards
    let settled = calls.load(Ordering::SeqCst);
    for key in &keys {
        let first = resolver.resolve(key).expect("cached");
        let again = resolver.resolve(key).expect("cached");
        assert!(first.ptr_eq(&again));
    }
    let misses = 8 * 50;
    assert_eq!(calls.load(Ordering::SeqCst), settled);
    assert!(settled >= keys.len() + misses);
    assert!(settled <= keys.len() * 8 + misses);
}

#[test]
fn test_map_and_dynamic_combined() {
    let resolver = placeholder::combining(&[
        placeholder::map(placeholder::shared_map([("name", Replacement::text("Steve"))])),
        placeholder::dynamic(|key: &str| (key == "time").then(|| Replacement::text("12:00"))),
    ]);

    assert_eq!(text_of(&resolver, "name"), Some("Steve".to_string()));
    assert_eq!(text_of(&resolver, "time"), Some("12:00".to_string()));
    assert_eq!(text_of(&resolver, "other"), None);
}

#[test]
fn test_placeholder_rejects_untaggable_keys() {
    for key in ["", "Upper", "with space", "tag>"] {
        assert!(Placeholder::text(key, "v").is_err(), "key {key:?}");
    }
}

#[test]
fn test_adopted_map_accepts_any_key() {
    let resolver = placeholder::map(placeholder::shared_map([
        ("Upper", Replacement::text("u")),
        ("with space", Replacement::text("s")),
    ]));
    assert_eq!(text_of(&resolver, "Upper"), Some("u".to_string()));
    assert_eq!(text_of(&resolver, "with space"), Some("s".to_string()));
}

#[test]
fn test_map_tolerates_concurrent_writer() {
    const WRITTEN: [&str; 3] = ["Steve", "Alex", "Notch"];

    let map = placeholder::shared_map([("name", Replacement::text(WRITTEN[0]))]);
    let resolver = placeholder::map(map.clone());

    thread::scope(|scope| {
        let writer_map = &map;
        scope.spawn(move || {
            for round in 0..2_000 {
                let mut guard = writer_map.write();
                if round % 4 == 3 {
                    guard.remove("name");
                } else {
                    let value = WRITTEN[round % WRITTEN.len()];
                    guard.insert("name".to_string(), Replacement::text(value));
                }
            }
        });

        for _ in 0..4 {
            let resolver = &resolver;
            scope.spawn(move || {
                for _ in 0..2_000 {
                    if let Some(found) = resolver.resolve("name") {
                        let text = found.as_text().expect("only text is written");
                        assert!(WRITTEN.contains(&text), "unexpected value {text:?}");
                    }
                    assert!(resolver.resolve("other").is_none());
                }
            });
        }
    });

    // 1999 % 4 == 3, so the writer's last step removed the key
    assert!(resolver.resolve("name").is_none());
}
