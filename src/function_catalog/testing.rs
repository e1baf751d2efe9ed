//! Fixture mappings shared by the catalog tests.

use super::function_mapping::{FunctionMapping, Member, ParameterBinding, ResultBinding};
use super::property_path::PropertyPath;

pub fn path(p: &str) -> PropertyPath {
    PropertyPath::parse(p).expect("fixture path")
}

/// `Customer_Insert(Name, Address_City)` returning `Id`
pub fn customer_insert() -> FunctionMapping {
    FunctionMapping::new("Customer_Insert")
        .with_parameter_binding(ParameterBinding::for_path("Name", &path("Name"), true))
        .with_parameter_binding(ParameterBinding::for_path(
            "Address_City",
            &path("Address.City"),
            true,
        ))
        .with_result_binding(ResultBinding::new("Id", "Id"))
}

/// `Customer_Update` with a concurrency token: `Version` is bound to a
/// current and an original value parameter, and the function reports rows
/// affected.
pub fn customer_update() -> FunctionMapping {
    FunctionMapping::new("Customer_Update")
        .with_rows_affected_parameter("RowsAffected")
        .with_parameter_binding(ParameterBinding::for_path("Id", &path("Id"), true))
        .with_parameter_binding(ParameterBinding::for_path("Name", &path("Name"), true))
        .with_parameter_binding(ParameterBinding::for_path("Version", &path("Version"), true))
        .with_parameter_binding(ParameterBinding::for_path(
            "Version_Original",
            &path("Version"),
            false,
        ))
        .with_result_binding(ResultBinding::new("Version", "Version"))
}

/// `Order_Delete` keyed by `Id` and the customer foreign key reached through
/// a navigation member.
pub fn order_delete() -> FunctionMapping {
    FunctionMapping::new("Order_Delete")
        .with_parameter_binding(ParameterBinding::for_path("Id", &path("Id"), false))
        .with_parameter_binding(ParameterBinding::new(
            "Customer_Id",
            vec![
                Member::Navigation("Order_Customer_Source".to_string()),
                Member::Property("CustomerId".into()),
            ],
            false,
        ))
}
