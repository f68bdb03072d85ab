//! Catalogue item types and the ownership graph.

use std::fmt;
use std::str::FromStr;

/// The six catalogue item kinds.
///
/// Ownership forms a DAG; see [`ItemType::parents`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemType {
    /// Root of the graph.
    Owner,
    /// Catalogue operator server.
    Cos,
    /// Resource server.
    ResourceServer,
    /// Data provider.
    Provider,
    /// Group of resources.
    ResourceGroup,
    /// A single resource.
    Resource,
}

impl ItemType {
    /// Every item type, root first.
    pub const ALL: [ItemType; 6] = [
        ItemType::Owner,
        ItemType::Cos,
        ItemType::ResourceServer,
        ItemType::Provider,
        ItemType::ResourceGroup,
        ItemType::Resource,
    ];

    /// The value stored in a document's `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Owner => "iudx:Owner",
            ItemType::Cos => "iudx:COS",
            ItemType::ResourceServer => "iudx:ResourceServer",
            ItemType::Provider => "iudx:Provider",
            ItemType::ResourceGroup => "iudx:ResourceGroup",
            ItemType::Resource => "iudx:Resource",
        }
    }

    /// The document field that names an ancestor of this type, which is also
    /// the relationship keyword targeting it.
    pub fn field_name(&self) -> &'static str {
        match self {
            ItemType::Owner => "owner",
            ItemType::Cos => "cos",
            ItemType::ResourceServer => "resourceServer",
            ItemType::Provider => "provider",
            ItemType::ResourceGroup => "resourceGroup",
            ItemType::Resource => "resource",
        }
    }

    /// Direct ancestors recorded on documents of this type.
    pub fn parents(&self) -> &'static [ItemType] {
        match self {
            ItemType::Resource => &[
                ItemType::ResourceGroup,
                ItemType::Provider,
                ItemType::ResourceServer,
                ItemType::Cos,
            ],
            ItemType::ResourceGroup => &[ItemType::Provider, ItemType::Cos],
            ItemType::Provider => &[ItemType::ResourceServer, ItemType::Cos],
            ItemType::ResourceServer => &[ItemType::Cos],
            ItemType::Cos => &[ItemType::Owner],
            ItemType::Owner => &[],
        }
    }

    /// Returns true when documents of this type record `ancestor`.
    pub fn has_parent(&self, ancestor: ItemType) -> bool {
        self.parents().contains(&ancestor)
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown item type: {}", s))
    }
}
