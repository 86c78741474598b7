// Author: Dustin Pilgrim
// License: MIT

#[cfg(test)]
use super::*;
use crate::error::LexFault;
use std::io;

use crate::tree::{KeyKind, List, Shape};

fn parse(input: &str) -> Result<Configuration, ConfError> {
    Parser::new(input.as_bytes()).parse()
}

fn syntax_error(input: &str) -> (usize, String, String) {
    match parse(input) {
        Err(ConfError::Syntax { line, found, expected }) => (line, found, expected),
        other => panic!("expected syntax error for {:?}, got {:?}", input, other),
    }
}

#[test]
fn test_parser_basic_document() {
    let input = r#"
server: {
  host = "localhost";
  port = 8080;
  backups = [1, 2, 3];
  weights = <1.5, <2.5, 3.5>>;
};
"#;

    let conf = parse(input).expect("Failed to parse document");
    println!("{:#?}", conf);

    assert_eq!(conf.len_keys(), 0);
    assert_eq!(conf.len_entities(), 1);

    let server = conf.find_entity("server").expect("server entity");
    assert_eq!(server.len_keys(), 4);

    let host = server.find_key("host").unwrap();
    assert_eq!(host.kind(), KeyKind::Value);
    assert_eq!(host.as_value().unwrap().text(), "\"localhost\"");
    assert_eq!(host.as_value().unwrap().get::<String>().unwrap(), "localhost");

    let port = server.find_key("port").unwrap().as_value().unwrap();
    assert_eq!(port.kind(), DataKind::Integer);
    assert_eq!(port.get::<u16>().unwrap(), 8080);

    let backups = server.find_key("backups").unwrap().as_array().unwrap();
    assert_eq!(backups.len(), 3);
    for (i, expected) in ["1", "2", "3"].iter().enumerate() {
        assert_eq!(backups.get(i).unwrap().text(), *expected);
    }

    let weights = server.find_key("weights").unwrap().as_list().unwrap();
    assert_eq!(weights.len_data(), 1);
    assert_eq!(weights.len_lists(), 1);
}

#[test]
fn test_single_entity_scenario() {
    let mut conf = parse("app: { debug = 1; };").unwrap();

    assert_eq!(conf.len_keys(), 0);
    assert_eq!(conf.len_entities(), 1);

    let mut app = conf.drain_next_entity().unwrap();
    assert_eq!(app.id(), "app");
    assert_eq!(app.len_keys(), 1);
    assert_eq!(app.len_entities(), 0);

    let debug = app.drain_next_key().unwrap();
    assert_eq!(debug.id(), "debug");
    let data = debug.as_value().unwrap();
    assert_eq!(data.kind(), DataKind::Integer);
    assert_eq!(data.get::<i64>().unwrap(), 1);
}

#[test]
fn test_nested_entities_attach_to_parent() {
    let input = r#"
outer: {
  a = 1;
  middle: {
    inner: { deep = "x"; };
    b = 2;
  };
  c = 3;
};
top = 0;
"#;
    let conf = parse(input).unwrap();

    assert_eq!(conf.len_entities(), 1);
    assert_eq!(conf.len_keys(), 1);
    assert!(conf.find_entity("middle").is_none());
    assert!(conf.find_entity("inner").is_none());

    let outer = conf.find_entity("outer").unwrap();
    assert_eq!(outer.len_keys(), 2);
    assert_eq!(outer.len_entities(), 1);

    let middle = outer.find_entity("middle").unwrap();
    assert_eq!(middle.len_keys(), 1);
    assert!(middle.find_key("b").is_some());

    let inner = middle.find_entity("inner").unwrap();
    assert_eq!(inner.find_key("deep").unwrap().as_value().unwrap().kind(), DataKind::String);
}

#[test]
fn test_list_and_pairs_keys_attach_to_enclosing_entity() {
    let conf = parse("e: { l = <1>; p = { x = 1 }; };").unwrap();
    assert_eq!(conf.len_keys(), 0);

    let e = conf.find_entity("e").unwrap();
    assert_eq!(e.find_key("l").unwrap().kind(), KeyKind::List);
    assert_eq!(e.find_key("p").unwrap().kind(), KeyKind::Pairs);
}

#[test]
fn test_duplicate_top_level_key_first_wins() {
    let conf = parse("a = 1; a = 2;").unwrap();
    assert_eq!(conf.len_keys(), 1);
    assert_eq!(conf.find_key("a").unwrap().as_value().unwrap().text(), "1");
}

#[test]
fn test_duplicate_entities_first_wins() {
    let conf = parse("e: { a = 1; }; e: { b = 2; };").unwrap();
    assert_eq!(conf.len_entities(), 1);
    let e = conf.find_entity("e").unwrap();
    assert!(e.find_key("a").is_some());
    assert!(e.find_key("b").is_none());
}

#[test]
fn test_key_and_entity_may_share_an_id() {
    let conf = parse("x = 1; x: { y = 2; };").unwrap();
    assert_eq!(conf.len_keys(), 1);
    assert_eq!(conf.len_entities(), 1);
}

#[test]
fn test_array_positions_are_sequential() {
    let conf = parse(r#"arr = [10, "s", 2.5, -4];"#).unwrap();
    let array = conf.find_key("arr").unwrap().as_array().unwrap();

    assert_eq!(array.indices().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    assert_eq!(array.get(0).unwrap().get::<i64>().unwrap(), 10);
    assert_eq!(array.get(1).unwrap().kind(), DataKind::String);
    assert_eq!(array.get(2).unwrap().kind(), DataKind::Double);
    assert_eq!(array.get(3).unwrap().get::<i64>().unwrap(), -4);
}

#[test]
fn test_nested_list_structure() {
    // An empty sublist is not allowed.
    assert!(parse("l = <1, <>>;").is_err());

    let mut conf = parse("l = <1, <2, <3>, 4>, 5>;").unwrap();
    let mut key = conf.drain_next_key().unwrap();
    let list = key.as_list_mut().unwrap();

    assert_eq!(list.len_data(), 2);
    assert_eq!(list.len_lists(), 1);
    assert_eq!(list.drain_next_data().unwrap().text(), "1");
    assert_eq!(list.drain_next_data().unwrap().text(), "5");

    let mut middle: List = list.drain_next_list().unwrap();
    assert_eq!(middle.len_data(), 2);
    assert_eq!(middle.len_lists(), 1);
    assert_eq!(middle.drain_next_data().unwrap().text(), "2");
    assert_eq!(middle.drain_next_data().unwrap().text(), "4");

    let mut innermost = middle.drain_next_list().unwrap();
    assert_eq!(innermost.drain_next_data().unwrap().text(), "3");
    assert!(innermost.drain_next_data().is_none());
    assert!(list.drain_next_list().is_none());
}

#[test]
fn test_pairs_are_retained() {
    let mut conf = parse(r#"p = { a = 1; b = "two"; a = 3.0; };"#).unwrap();
    let mut key = conf.drain_next_key().unwrap();
    let pairs = key.as_pairs_mut().unwrap();

    assert_eq!(pairs.len(), 3);
    let (id, value) = pairs.drain_next().unwrap();
    assert_eq!((id.as_str(), value.text()), ("a", "1"));
    let (id, value) = pairs.drain_next().unwrap();
    assert_eq!((id.as_str(), value.text()), ("b", "\"two\""));
    let (id, value) = pairs.drain_next().unwrap();
    assert_eq!((id.as_str(), value.kind()), ("a", DataKind::Double));
    assert!(pairs.drain_next().is_none());
}

#[test]
fn test_pairs_block_forms() {
    for input in ["p = {};", "p = { a = 1 };", "p = { a = 1; };", "p = { a = 1; b = 2 };"] {
        let conf = parse(input).unwrap_or_else(|e| panic!("{}: {}", input, e));
        assert_eq!(conf.find_key("p").unwrap().kind(), KeyKind::Pairs);
    }
}

#[test]
fn test_legacy_pairs_are_discarded() {
    let conf = Parser::with_options("p = { a = 1; b = 2 };".as_bytes(), ParseOptions::legacy())
        .parse()
        .unwrap();
    let pairs = conf.find_key("p").unwrap().as_pairs().unwrap();
    assert!(pairs.is_empty());
}

#[test]
fn test_missing_value() {
    let (line, found, expected) = syntax_error("x = ;");
    assert_eq!(line, 1);
    assert_eq!(found, ";");
    assert_eq!(expected, "Either a value, [, <, or {");
}

#[test]
fn test_error_line_is_line_of_offending_token() {
    let (line, found, _) = syntax_error("a = 1;\n\nb = 2\nc = 3;");
    assert_eq!(line, 4);
    assert_eq!(found, "c");
}

#[test]
fn test_syntax_error_messages() {
    let cases = [
        ("= 1;", "=", "Entity or key definition"),
        ("a 1;", "1", ": or ="),
        ("a = 1 b", "b", ";"),
        ("a = 1", "end of file", ";"),
        ("e: a = 1; };", "a", "{"),
        ("e: { };", "}", "Entity or key definition"),
        ("e: { a = 1; ;", ";", "}"),
        ("a = [1, ];", "]", "A value"),
        ("a = [1 2];", "2", "]"),
        ("a = <1, =>;", "=", "A value or a <"),
        ("a = <1, 2];", "]", ">"),
        ("a = { 1 = 2 };", "1", "An ID"),
        ("a = { b 2 };", "2", "="),
        ("a = { b = c };", "c", "A value"),
        ("a = { b = 1 c = 2 };", "c", "; or }"),
        ("a = _;", "_", "Either a value, [, <, or {"),
    ];

    for (input, found, expected) in cases {
        let (_, got_found, got_expected) = syntax_error(input);
        assert_eq!(got_found, found, "found token for {:?}", input);
        assert_eq!(got_expected, expected, "expectation for {:?}", input);
    }
}

#[test]
fn test_syntax_error_display() {
    let err = parse("x = ;").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Error at line 1: ; is not allowed here. Either a value, [, <, or { was expected."
    );
}

#[test]
fn test_unterminated_string_is_lex_error() {
    match parse("x = \"abc;") {
        Err(ConfError::Lex { line, found }) => {
            assert_eq!(line, 1);
            assert_eq!(found, LexFault::EndOfFile);
        }
        other => panic!("expected lex error, got {:?}", other),
    }
}

#[test]
fn test_error_inside_nested_entity_aborts_whole_parse() {
    let input = "ok = 1;\nouter: {\n  inner: {\n    k = [1, 2;\n  };\n};\n";
    let (line, found, expected) = syntax_error(input);
    assert_eq!(line, 4);
    assert_eq!(found, ";");
    assert_eq!(expected, "]");
}

#[test]
fn test_empty_input_is_empty_configuration() {
    let conf = parse("  // nothing here\n").unwrap();
    assert_eq!(conf.len_keys(), 0);
    assert_eq!(conf.len_entities(), 0);
}

#[test]
fn test_independent_parsers_are_deterministic() {
    let input = "a = 1; e: { b = [1, 2]; c = <1, <2>>; f: { g = \"h\"; }; };";
    let first = parse(input).unwrap();
    let second = parse(input).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_sibling_sublists_keep_order() {
    let mut conf = parse("l = <<1>, 2, <3, <4>>, <5>>;").unwrap();
    let mut key = conf.drain_next_key().unwrap();
    let list = key.as_list_mut().unwrap();

    assert_eq!(list.len_data(), 1);
    assert_eq!(list.len_lists(), 3);
    let firsts: Vec<String> = std::iter::from_fn(|| list.drain_next_list())
        .map(|mut sub| sub.drain_next_data().unwrap().text().to_string())
        .collect();
    assert_eq!(firsts, vec!["1", "3", "5"]);
}

#[test]
fn test_deeply_nested_list() {
    const DEPTH: usize = 20_000;
    let input = format!("l = {}1{};", "<".repeat(DEPTH), ">".repeat(DEPTH));
    let mut conf = parse(&input).unwrap();

    let Some(Shape::List(mut list)) = conf.drain_next_key().map(Key::into_shape) else {
        panic!("expected a list key");
    };
    let mut depth = 1;
    while let Some(inner) = list.drain_next_list() {
        list = inner;
        depth += 1;
    }
    assert_eq!(depth, DEPTH);
    assert_eq!(list.drain_next_data().unwrap().text(), "1");
}

#[test]
fn test_deeply_nested_entities() {
    const DEPTH: usize = 20_000;
    let mut input = String::new();
    for i in 0..DEPTH {
        input.push_str(&format!("e{}: {{ ", i));
    }
    input.push_str("k = 1; ");
    input.push_str(&"}; ".repeat(DEPTH));
    let mut conf = parse(&input).unwrap();

    let mut entity = conf.drain_next_entity().unwrap();
    let mut depth = 1;
    while let Some(child) = entity.drain_next_entity() {
        assert_eq!(child.id(), format!("e{}", depth));
        entity = child;
        depth += 1;
    }
    assert_eq!(depth, DEPTH);
    assert_eq!(entity.find_key("k").unwrap().as_value().unwrap().text(), "1");
}

#[test]
fn test_unclosed_deep_nesting_fails() {
    let (_, found, expected) = syntax_error(&format!("l = {}1;", "<".repeat(1_000)));
    assert_eq!((found.as_str(), expected.as_str()), (";", ">"));

    let (_, found, expected) = syntax_error(&"e: { ".repeat(1_000));
    assert_eq!((found.as_str(), expected.as_str()), ("end of file", "Entity or key definition"));
}

/// Hands out its bytes, then fails every later read.
struct FailingReader {
    data: &'static [u8],
}

impl io::Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::other("device unplugged"));
        }
        let n = self.data.len().min(buf.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

#[test]
fn test_read_failure_mid_stream_aborts_parse() {
    let reader = FailingReader {
        data: b"a = 1;\nb = ",
    };
    match Parser::new(reader).parse() {
        Err(ConfError::Read { line, source }) => {
            assert_eq!(line, 2);
            assert_eq!(source.to_string(), "device unplugged");
        }
        other => panic!("expected read error, got {:?}", other),
    }

    let err = Parser::new(FailingReader { data: b"" }).parse().unwrap_err();
    assert_eq!(err.line(), Some(1));
    assert_eq!(err.to_string(), "Read failure at line 1: device unplugged");
}
