#[macro_export]
macro_rules! hstore {
    // Value rules: bare NULL is the null sentinel, anything else is text
    (@value NULL) => {
        ::core::option::Option::None
    };

    (@value $value:tt) => {
        ::core::option::Option::Some(::std::string::ToString::to_string(&$value))
    };

    // Empty document
    () => {
        $crate::HstoreMap::new()
    };

    // One or more `key => value` entries, trailing comma allowed
    ($($key:tt => $value:tt),+ $(,)?) => {{
        let mut map = $crate::HstoreMap::new();
        $(
            map.insert(
                ::std::string::ToString::to_string(&$key),
                $crate::hstore!(@value $value),
            );
        )+
        map
    }};
}

#[cfg(test)]
mod tests {
    use crate::HstoreMap;

    #[test]
    fn test_hstore_macro_empty() {
        assert_eq!(hstore! {}, HstoreMap::new());
    }

    #[test]
    fn test_hstore_macro_entries() {
        let map = hstore! {
            "a" => "1",
            "b" => NULL,
        };

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&Some("1".to_string())));
        assert_eq!(map.get("b"), Some(&None));
    }

    #[test]
    fn test_hstore_macro_serializes() {
        let map = hstore! { "null" => NULL };
        assert_eq!(crate::to_string(&map).unwrap(), r#""null"=>NULL"#);
    }
}
