//! Standard object metadata block

use febe_schema::{Block, SchemaNode};

/// The `metadata` singleton block of a namespaced object.
///
/// When `generatable` is set, `name` becomes optional and may be replaced
/// by a `generate_name` prefix; the two conflict.
pub fn namespaced_metadata(object_name: &str, generatable: bool) -> SchemaNode {
    let mut fields = Block::new();

    if generatable {
        fields.push(
            "generate_name",
            SchemaNode::string()
                .optional()
                .conflicts_with(["name"])
                .description(format!(
                    "Prefix used to generate a unique name for the {object_name}"
                )),
        );
        fields.push(
            "name",
            SchemaNode::string()
                .optional()
                .description(format!("Name of the {object_name}, must be unique")),
        );
    } else {
        fields.push(
            "name",
            SchemaNode::string()
                .required()
                .description(format!("Name of the {object_name}, must be unique")),
        );
    }

    fields.push(
        "namespace",
        SchemaNode::string()
            .optional()
            .default("default")
            .description(format!("Namespace defines the space within which name of the {object_name} must be unique")),
    );
    fields.push(
        "labels",
        SchemaNode::map(SchemaNode::string())
            .optional()
            .description(format!("Map of string keys and values that can be used to organize and categorize the {object_name}")),
    );
    fields.push(
        "annotations",
        SchemaNode::map(SchemaNode::string())
            .optional()
            .description(format!("An unstructured key value map stored with the {object_name}")),
    );

    SchemaNode::list(fields)
        .required()
        .max_items(1)
        .description(format!("Standard {object_name}'s metadata"))
}
