//! Integration tests for verb lookup and directions

use wayfarer_parser::{Direction, Vocabulary};

fn vocabulary() -> Vocabulary<&'static str> {
    Vocabulary::new()
        .with("north", &["n"], "move")
        .with("south", &["s"], "move")
        .with("say", &["'"], "say")
        .with("get", &["take"], "get")
        .with("give", &[], "give")
}

#[test]
fn exact_names_and_aliases() {
    let vocabulary = vocabulary();
    assert_eq!(vocabulary.lookup("SAY").unwrap().name, "say");
    assert_eq!(vocabulary.lookup("'").unwrap().name, "say");
    assert_eq!(vocabulary.lookup("take").unwrap().action, "get");
}

#[test]
fn prefixes_follow_registration_order() {
    let vocabulary = vocabulary();
    assert_eq!(vocabulary.lookup("s").unwrap().name, "south");
    assert_eq!(vocabulary.lookup("sa").unwrap().name, "say");
    assert_eq!(vocabulary.lookup("g").unwrap().name, "get");
    assert_eq!(vocabulary.lookup("gi").unwrap().name, "give");
    assert!(vocabulary.lookup("dance").is_none());
    assert!(vocabulary.lookup("").is_none());
}

#[test]
fn re_registering_replaces_in_place() {
    let vocabulary = vocabulary().with("north", &["up"], "climb");
    assert_eq!(vocabulary.len(), 5);
    assert_eq!(vocabulary.iter().next().unwrap().action, "climb");
    assert!(vocabulary.lookup("n").is_some_and(|verb| verb.name == "north"));
}

#[test]
fn directions_parse_names_and_abbreviations() {
    assert_eq!(Direction::parse("NE"), Some(Direction::Northeast));
    assert_eq!(Direction::parse("down"), Some(Direction::Down));
    assert_eq!(Direction::parse("sideways"), None);
    for direction in Direction::ALL {
        assert_eq!(direction.opposite().opposite(), direction);
    }
}
