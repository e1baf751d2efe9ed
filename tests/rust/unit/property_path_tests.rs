//! Unit tests for property path parsing and correlation keys

#[cfg(test)]
mod property_path_tests {
    use std::collections::BTreeMap;

    use procmap::function_catalog::{FunctionMappingError, Member, ParameterBinding, PropertyId, PropertyPath};

    #[test]
    fn test_paths_are_usable_as_map_keys() {
        let mut map = BTreeMap::new();
        map.insert(PropertyPath::parse("Address.City").unwrap(), "city");
        map.insert(PropertyPath::parse("Address.City").unwrap(), "town");
        map.insert(PropertyPath::parse("Name").unwrap(), "name");

        assert_eq!(map.len(), 2);
        assert_eq!(map[&PropertyPath::parse("Address.City").unwrap()], "town");
    }

    #[test]
    fn test_whitespace_around_segments_is_trimmed() {
        let path = PropertyPath::parse(" Address . City ").unwrap();
        assert_eq!(path.to_string(), "Address.City");
    }

    #[test]
    fn test_trailing_dot_is_invalid() {
        let err = PropertyPath::parse("Address.").unwrap_err();
        assert_eq!(
            err,
            FunctionMappingError::InvalidPropertyPath {
                path: "Address.".to_string()
            }
        );
    }

    #[test]
    fn test_binding_path_matches_declared_path() {
        let declared = PropertyPath::new(vec![PropertyId::from("Address"), PropertyId::from("City")]);
        let binding = ParameterBinding::new(
            "Address_City",
            vec![
                Member::Property("Address".into()),
                Member::Property("City".into()),
            ],
            true,
        );
        assert_eq!(binding.property_path(), declared);
    }
}
