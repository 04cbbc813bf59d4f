use serde::Serialize;

/// Runtime dispatch descriptor for a property whose value is a tagged union.
///
/// Templates render it as a converter that reads the `discriminator` keys from
/// the incoming object and picks the variant whose values match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TypeAdapter {
    /// `<Model><Property>Adapter`.
    pub classname: String,
    pub is_array: bool,
    /// Shared key list. When variants disagree, the last accepted variant wins.
    pub discriminator: Vec<String>,
    pub items: Vec<TypeAdapterItem>,
}

/// One variant of a [`TypeAdapter`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TypeAdapterItem {
    pub classname: String,
    /// Keys selected from this variant's own properties.
    pub discriminator_keys: Vec<String>,
    /// Literal values for the keys that resolved to string schemas.
    pub discriminator_values: Vec<String>,
}

impl TypeAdapter {
    /// Keys as a quoted literal list: `"name", "type"`.
    pub fn discriminator_literal(&self) -> String {
        quote_list(&self.discriminator)
    }

    /// Items whose value count does not line up with the shared key list.
    pub fn mismatched_items(&self) -> impl Iterator<Item = &TypeAdapterItem> {
        self.items
            .iter()
            .filter(|item| item.discriminator_values.len() != self.discriminator.len())
    }

    pub fn is_consistent(&self) -> bool {
        self.mismatched_items().next().is_none()
    }
}

impl TypeAdapterItem {
    /// Values as a quoted literal list: `"cpu", "input"`.
    pub fn discriminator_value_literal(&self) -> String {
        quote_list(&self.discriminator_values)
    }
}

/// Quote and comma-join literals for embedding in generated source.
pub fn quote_list(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("\"{v}\""))
        .collect::<Vec<_>>()
        .join(", ")
}
