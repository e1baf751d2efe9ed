//! Integration tests for loading definitions and configuring inferred mappings
//!
//! Uses the sample documents under `demos/` plus temporary files for the
//! failure cases.

#[cfg(test)]
mod configure_pipeline_tests {
    use std::io::Write;
    use std::path::PathBuf;

    use procmap::function_catalog::{
        EntityFunctionMappings, EntityFunctionsDefinition, FunctionKind, FunctionMappingError,
        PropertyPath,
    };

    fn demo(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
    }

    fn temp_yaml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_configure_customer_functions() {
        let mut mappings = EntityFunctionMappings::from_yaml_file(demo("customer_mappings.yaml")).unwrap();
        let configuration = EntityFunctionsDefinition::from_yaml_file(demo("customer_functions.yaml"))
            .unwrap()
            .to_configuration()
            .unwrap();

        configuration.configure(&mut mappings).unwrap();

        let insert = mappings.insert.as_ref().unwrap();
        assert_eq!(insert.function_name(), "ins_customer");
        assert_eq!(insert.parameter_names(), vec!["Name", "city"]);
        assert_eq!(
            insert.result_bindings.as_ref().unwrap()[0].column_name,
            "customer_id"
        );

        let update = mappings.update.as_ref().unwrap();
        assert_eq!(update.function_name(), "upd_customer");
        assert_eq!(
            update.rows_affected_parameter.as_ref().unwrap().name,
            "rows_affected"
        );
        assert_eq!(
            update.parameter_names(),
            vec!["Id", "Name", "version", "version_original"]
        );

        let delete = mappings.delete.as_ref().unwrap();
        assert_eq!(delete.function_name(), "Customer_Delete");
        assert_eq!(delete.parameter_names(), vec!["Id", "region_id"]);
    }

    #[test]
    fn test_configured_mappings_serialize_back() {
        let mut mappings = EntityFunctionMappings::from_yaml_file(demo("customer_mappings.yaml")).unwrap();
        EntityFunctionsDefinition::from_yaml_file(demo("customer_functions.yaml"))
            .unwrap()
            .to_configuration()
            .unwrap()
            .configure(&mut mappings)
            .unwrap();

        let yaml = serde_yaml::to_string(&mappings).unwrap();
        let reloaded = EntityFunctionMappings::from_yaml_str(&yaml).unwrap();
        assert_eq!(reloaded, mappings);
    }

    #[test]
    fn test_merge_demo_declarations() {
        let mut left = EntityFunctionsDefinition::from_yaml_file(demo("customer_functions.yaml"))
            .unwrap()
            .to_configuration()
            .unwrap();
        let right = EntityFunctionsDefinition::from_yaml_file(demo("customer_functions_partial.yaml"))
            .unwrap()
            .to_configuration()
            .unwrap();

        assert!(left.is_compatible_with(&right));
        assert!(right.is_compatible_with(&left));
        left.merge(&right, false).unwrap();

        // Both declare update and delete: ours wins on shared keys, the
        // partial declaration fills in the rest
        let update = left.get(FunctionKind::Update).unwrap();
        assert_eq!(update.name(), Some("upd_customer"));
        assert_eq!(update.rows_affected_parameter_name(), Some("rows_affected"));
        assert_eq!(
            update.parameter_names()[&PropertyPath::parse("Name").unwrap()].current,
            "full_name"
        );
        assert_eq!(
            update.parameter_names()[&PropertyPath::parse("Version").unwrap()].current,
            "version"
        );
        let delete = left.get(FunctionKind::Delete).unwrap();
        assert_eq!(delete.name(), Some("del_customer"));
        assert!(delete
            .parameter_names()
            .contains_key(&PropertyPath::parse("RegionId").unwrap()));
    }

    #[test]
    fn test_check_demo_declarations() {
        let left = EntityFunctionsDefinition::from_yaml_file(demo("customer_functions.yaml")).unwrap();
        let right = EntityFunctionsDefinition::from_yaml_file(demo("customer_functions_partial.yaml")).unwrap();

        let outcome = left.check(&right, false).unwrap();
        assert!(outcome.is_compatible());
        let merged = outcome.merged.unwrap();
        assert_eq!(merged.entity, "Customer");
        assert_eq!(merged.delete.unwrap().name.as_deref(), Some("del_customer"));
    }

    #[test]
    fn test_check_conflicting_declaration_with_override() {
        let conflicting = temp_yaml(
            r#"
entity: Customer
update:
  parameters:
    - property: Version
      name: ver
"#,
        );
        let left = EntityFunctionsDefinition::from_yaml_file(demo("customer_functions.yaml")).unwrap();
        let right = EntityFunctionsDefinition::from_yaml_file(conflicting.path()).unwrap();

        let rejected = left.check(&right, false).unwrap();
        assert!(!rejected.is_compatible());
        assert!(rejected.merged.is_none());

        let overridden = left.check(&right, true).unwrap();
        assert!(!overridden.is_compatible());
        assert_eq!(overridden.incompatibility, rejected.incompatibility);
        let update = overridden.merged.unwrap().update.unwrap();
        assert_eq!(update.name, None);
        assert_eq!(update.parameters[0].name, "ver");
    }

    #[test]
    fn test_unresolvable_declaration_names_function() {
        let declared = temp_yaml(
            r#"
entity: Customer
update:
  name: upd_customer
  parameters:
    - property: Address.Street
      name: street
"#,
        );
        let mut mappings = EntityFunctionMappings::from_yaml_file(demo("customer_mappings.yaml")).unwrap();
        let err = EntityFunctionsDefinition::from_yaml_file(declared.path())
            .unwrap()
            .to_configuration()
            .unwrap()
            .configure(&mut mappings)
            .unwrap_err();

        assert_eq!(
            err,
            FunctionMappingError::AmbiguousOrMissingParameterBinding {
                path: PropertyPath::parse("Address.Street").unwrap(),
                function: "upd_customer".to_string(),
                matches: 0,
            }
        );
        // Insert ran before update
        assert_eq!(mappings.insert.unwrap().function_name(), "Customer_Insert");
    }

    #[test]
    fn test_original_name_on_insert_parameter_rejected() {
        let declared = temp_yaml(
            r#"
entity: Customer
insert:
  parameters:
    - property: Name
      name: name
      original_name: name_original
"#,
        );
        let mut mappings = EntityFunctionMappings::from_yaml_file(demo("customer_mappings.yaml")).unwrap();
        let err = EntityFunctionsDefinition::from_yaml_file(declared.path())
            .unwrap()
            .to_configuration()
            .unwrap()
            .configure(&mut mappings)
            .unwrap_err();
        assert!(matches!(
            err,
            FunctionMappingError::OriginalValueNotApplicable { .. }
        ));
    }

    #[test]
    fn test_rows_affected_on_insert_rejected() {
        let declared = temp_yaml(
            r#"
entity: Customer
insert:
  name: ins_customer
  rows_affected_parameter: rc
"#,
        );
        let mut mappings = EntityFunctionMappings::from_yaml_file(demo("customer_mappings.yaml")).unwrap();
        let err = EntityFunctionsDefinition::from_yaml_file(declared.path())
            .unwrap()
            .to_configuration()
            .unwrap()
            .configure(&mut mappings)
            .unwrap_err();
        assert_eq!(
            err,
            FunctionMappingError::MissingRowsAffectedParameter {
                function: "ins_customer".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_mapping_document() {
        let broken = temp_yaml("entity: Customer\ninsert: [not, a, mapping]\n");
        let err = EntityFunctionMappings::from_yaml_file(broken.path()).unwrap_err();
        match err {
            FunctionMappingError::DefinitionParse { error } => {
                assert!(error.contains("Context:"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
