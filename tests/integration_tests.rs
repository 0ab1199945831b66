use pghstore::{
    escape, from_reader, from_slice, from_str, hstore, parse, to_string, to_vec, to_writer,
    unescape, Error, HstoreMap, Serializer,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::io::Cursor;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Connection {
    host: String,
    port: String,
    password: Option<String>,
}

#[test]
fn test_serialize_escaped_value() {
    let map = hstore! { "a" => r#"1 "quotes""# };
    assert_eq!(to_string(&map).unwrap(), r#""a"=>"1 \"quotes\"""#);
}

#[test]
fn test_serialize_pair_sequence() {
    let pairs = [("key", "value"), ("k", "v")];
    assert_eq!(to_string(&pairs).unwrap(), r#""key"=>"value","k"=>"v""#);
}

#[test]
fn test_serialize_null() {
    let map = hstore! { "null" => NULL };
    assert_eq!(to_string(&map).unwrap(), r#""null"=>NULL"#);
}

#[test]
fn test_parse_single_pair() {
    let pairs: Vec<(String, Option<String>)> = from_str("a=>1").unwrap();
    assert_eq!(pairs, vec![("a".to_string(), Some("1".to_string()))]);
}

#[test]
fn test_parse_canonical_document() {
    let pairs: Vec<(String, Option<String>)> =
        from_str(r#"a=>1, b=>2, c=>null, d=>"NULL""#).unwrap();
    assert_eq!(
        pairs,
        vec![
            ("a".to_string(), Some("1".to_string())),
            ("b".to_string(), Some("2".to_string())),
            ("c".to_string(), None),
            ("d".to_string(), Some("NULL".to_string())),
        ]
    );
}

#[test]
fn test_parse_quoted_separators() {
    let pairs: Vec<(String, Option<String>)> = from_str(r#""a=>1"=>"\"b\"=>2","#).unwrap();
    assert_eq!(
        pairs,
        vec![("a=>1".to_string(), Some(r#""b"=>2"#.to_string()))]
    );
}

#[test]
fn test_whitespace_tolerance() {
    let spaced: Vec<(String, Option<String>)> = from_str("a=>1, b => 2").unwrap();
    let compact: Vec<(String, Option<String>)> = from_str("a=>1,b=>2").unwrap();
    assert_eq!(spaced, compact);
}

#[test]
fn test_malformed_after_valid_pair() {
    let result: Result<HstoreMap, Error> = from_str("a=>1 garbage b=>2");
    assert_eq!(result.unwrap_err(), Error::malformed_input(4));
}

#[test]
fn test_malformed_reports_scan_offset() {
    let result: Result<HstoreMap, Error> = from_str("a=>1, b=>2, !");
    assert_eq!(result.unwrap_err(), Error::malformed_input(11));
}

#[test]
fn test_lazy_prefix_before_error() {
    let mut pairs = parse("a=>1, nope");
    assert_eq!(
        pairs.next().unwrap().unwrap(),
        ("a".to_string(), Some("1".to_string()))
    );
    assert_eq!(pairs.next().unwrap().unwrap_err(), Error::malformed_input(5));
}

#[test]
fn test_roundtrip_preserves_order_and_content() {
    let document = hstore! {
        "pgsql" => "mysql",
        "python" => "php",
        "gevent" => "nodejs",
        "empty" => "",
        "missing" => NULL,
    };

    let text = to_string(&document).unwrap();
    let back: HstoreMap = from_str(&text).unwrap();
    assert_eq!(back, document);

    let keys: Vec<_> = back.keys().cloned().collect();
    assert_eq!(keys, vec!["pgsql", "python", "gevent", "empty", "missing"]);
}

#[test]
fn test_null_roundtrip_distinction() {
    // The sentinel renders bare and comes back as None.
    let text = to_string(&[("k", None::<&str>)]).unwrap();
    assert_eq!(text, r#""k"=>NULL"#);
    let back: Vec<(String, Option<String>)> = from_str(&text).unwrap();
    assert_eq!(back[0].1, None);

    // The string "NULL" renders quoted and comes back as a string.
    let text = to_string(&[("k", "NULL")]).unwrap();
    assert_eq!(text, r#""k"=>"NULL""#);
    let back: Vec<(String, Option<String>)> = from_str(&text).unwrap();
    assert_eq!(back[0].1.as_deref(), Some("NULL"));
}

#[test]
fn test_escape_unescape_idempotence() {
    for s in [
        "",
        "plain",
        r#"with "quotes""#,
        r"with \backslashes\",
        r#"\"both\\"#,
        "line\nbreak",
    ] {
        assert_eq!(unescape(&escape(s)), s);
    }
}

#[test]
fn test_struct_roundtrip() {
    let conn = Connection {
        host: "db.example.com".to_string(),
        port: "5432".to_string(),
        password: None,
    };

    let text = to_string(&conn).unwrap();
    let back: Connection = from_str(&text).unwrap();
    assert_eq!(conn, back);
}

#[test]
fn test_struct_ignores_unknown_pairs() {
    let conn: Connection =
        from_str(r#"host=>localhost, port=>5432, extra=>ignored, password=>null"#).unwrap();
    assert_eq!(conn.host, "localhost");
    assert_eq!(conn.password, None);
}

#[test]
fn test_map_targets() {
    let hash: HashMap<String, Option<String>> = from_str("a=>1, b=>null").unwrap();
    assert_eq!(hash["a"].as_deref(), Some("1"));
    assert_eq!(hash["b"], None);

    let tree: BTreeMap<String, String> = from_str("b=>2, a=>1").unwrap();
    assert_eq!(to_string(&tree).unwrap(), r#""a"=>"1","b"=>"2""#);
}

#[test]
fn test_duplicate_keys_merge_in_maps_only() {
    let raw: Vec<(String, Option<String>)> = from_str("k=>1, k=>2").unwrap();
    assert_eq!(raw.len(), 2);

    let merged: HstoreMap = from_str("k=>1, k=>2").unwrap();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged.get("k"), Some(&Some("2".to_string())));
}

#[test]
fn test_non_string_key_rejected() {
    let mut map = HashMap::new();
    map.insert(7, "seven");
    let err = to_string(&map).unwrap_err();
    assert_eq!(err, Error::non_string_key(7));
    assert_eq!(err.to_string(), "key 7 is not a string");
}

#[test]
fn test_non_string_value_rejected_with_key() {
    let value = serde_json::json!({ "a": 1 });
    let err = to_string(&value).unwrap_err();
    assert_eq!(err, Error::non_string_value("a", 1));
    assert_eq!(err.to_string(), "value 1 of key \"a\" is not a string");
}

#[test]
fn test_json_object_with_string_and_null_values() {
    let value = serde_json::json!({ "a": "1", "b": null });
    let text = to_string(&value).unwrap();
    // serde_json maps preserve insertion order only with its preserve_order
    // feature, so accept either ordering here.
    assert!(
        text == r#""a"=>"1","b"=>NULL"# || text == r#""b"=>NULL,"a"=>"1""#,
        "unexpected output: {text}"
    );
}

#[test]
fn test_writer_and_reader_streaming() {
    let document = hstore! { "a" => "1", "b" => NULL };

    let mut buffer = Vec::new();
    to_writer(&mut buffer, &document).unwrap();
    assert_eq!(buffer, to_vec(&document).unwrap());

    let back: HstoreMap = from_reader(Cursor::new(buffer)).unwrap();
    assert_eq!(back, document);
}

#[test]
fn test_from_slice_utf8_boundary() {
    let pairs: Vec<(String, String)> = from_slice(br#""a"=>"1""#).unwrap();
    assert_eq!(pairs, vec![("a".to_string(), "1".to_string())]);

    let err = from_slice::<HstoreMap>(b"\"a\"=>\"\xff\"").unwrap_err();
    assert!(matches!(err, Error::Encoding(_)));
}

#[test]
fn test_incremental_serializer() {
    let mut serializer = Serializer::new();
    serializer.write_pair("surname", Some("\u{d64d}"));
    serializer.write_pair("gone", None);
    let text = serializer.into_inner();
    assert_eq!(text, "\"surname\"=>\"\u{d64d}\",\"gone\"=>NULL");

    let back: Vec<(String, Option<String>)> = from_str(&text).unwrap();
    assert_eq!(back[0].1.as_deref(), Some("\u{d64d}"));
}

#[test]
fn test_unsupported_top_level_shapes() {
    assert!(matches!(to_string("text"), Err(Error::UnsupportedType(_))));
    assert!(matches!(to_string(&true), Err(Error::UnsupportedType(_))));
    assert!(matches!(
        to_string(&vec![1, 2, 3]),
        Err(Error::UnsupportedType(_))
    ));
}

#[test]
fn test_empty_document_roundtrip() {
    assert_eq!(to_string(&HstoreMap::new()).unwrap(), "");
    let empty: HstoreMap = from_str("").unwrap();
    assert!(empty.is_empty());
    let blank: HstoreMap = from_str("   \t\n").unwrap();
    assert!(blank.is_empty());
}
