//! Relationship traversal requests.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

use super::ItemType;
use crate::error::{QueryError, QueryResult};

/// The relationship keyword of a traversal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relationship {
    /// Related resources.
    Resource,
    /// Related resource groups.
    ResourceGroup,
    /// Related providers.
    Provider,
    /// Related resource servers.
    ResourceServer,
    /// The owning COS.
    Cos,
    /// The subject itself.
    Type,
    /// The subject and every recorded ancestor.
    All,
}

impl Relationship {
    /// Every keyword.
    pub const ALL: [Relationship; 7] = [
        Relationship::Resource,
        Relationship::ResourceGroup,
        Relationship::Provider,
        Relationship::ResourceServer,
        Relationship::Cos,
        Relationship::Type,
        Relationship::All,
    ];

    /// The wire keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Relationship::Resource => "resource",
            Relationship::ResourceGroup => "resourceGroup",
            Relationship::Provider => "provider",
            Relationship::ResourceServer => "resourceServer",
            Relationship::Cos => "cos",
            Relationship::Type => "type",
            Relationship::All => "all",
        }
    }

    /// The item type this keyword navigates to, if it names one.
    pub fn target(&self) -> Option<ItemType> {
        match self {
            Relationship::Resource => Some(ItemType::Resource),
            Relationship::ResourceGroup => Some(ItemType::ResourceGroup),
            Relationship::Provider => Some(ItemType::Provider),
            Relationship::ResourceServer => Some(ItemType::ResourceServer),
            Relationship::Cos => Some(ItemType::Cos),
            Relationship::Type | Relationship::All => None,
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relationship {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Relationship::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown relationship: {}", s))
    }
}

/// Ancestor ids recorded on the subject document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ancestors {
    /// Owning resource group.
    pub resource_group: Option<String>,
    /// Owning provider.
    pub provider: Option<String>,
    /// Owning resource server.
    pub resource_server: Option<String>,
    /// Owning COS.
    pub cos: Option<String>,
}

impl Ancestors {
    /// The recorded ancestor of the given type, ignoring empty ids.
    pub fn get(&self, item_type: ItemType) -> Option<&str> {
        let id = match item_type {
            ItemType::ResourceGroup => &self.resource_group,
            ItemType::Provider => &self.provider,
            ItemType::ResourceServer => &self.resource_server,
            ItemType::Cos => &self.cos,
            ItemType::Owner | ItemType::Resource => return None,
        };
        id.as_deref().filter(|s| !s.is_empty())
    }
}

/// A relationship traversal request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipRequest {
    /// Subject item id.
    pub id: String,
    /// Requested relationship.
    pub relationship: Relationship,
    /// Subject item type, when known.
    pub item_type: Option<ItemType>,
    /// Ancestor ids recorded on the subject.
    pub ancestors: Ancestors,
    /// Providers under a resource server, for the multi-provider lookup.
    pub provider_ids: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest {
    id: Option<String>,
    relationship: Option<String>,
    item_type: Option<String>,
    resource_group: Option<String>,
    provider: Option<String>,
    resource_server: Option<String>,
    cos: Option<String>,
    #[serde(default)]
    provider_ids: Vec<ProviderRef>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProviderRef {
    Id(String),
    Object { id: String },
}

impl ProviderRef {
    fn into_id(self) -> String {
        match self {
            ProviderRef::Id(id) | ProviderRef::Object { id } => id,
        }
    }
}

impl RelationshipRequest {
    /// Creates a request with no ancestors.
    pub fn new(id: impl Into<String>, relationship: Relationship, item_type: Option<ItemType>) -> Self {
        Self {
            id: id.into(),
            relationship,
            item_type,
            ancestors: Ancestors::default(),
            provider_ids: Vec::new(),
        }
    }

    /// Decodes a request from its JSON wire form.
    pub fn from_json(value: Value) -> QueryResult<Self> {
        let wire: WireRequest = serde_json::from_value(value)
            .map_err(|e| QueryError::invalid_param_value(format!("invalid relationship request: {}", e)))?;

        let id = wire
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| QueryError::invalid_param_value("missing id"))?;

        let relationship = wire
            .relationship
            .ok_or_else(|| QueryError::invalid_param_value("missing relationship"))?
            .parse::<Relationship>()
            .map_err(QueryError::invalid_param_value)?;

        let item_type = wire
            .item_type
            .filter(|t| !t.is_empty())
            .map(|t| t.parse::<ItemType>())
            .transpose()
            .map_err(QueryError::invalid_param_value)?;

        Ok(Self {
            id,
            relationship,
            item_type,
            ancestors: Ancestors {
                resource_group: wire.resource_group,
                provider: wire.provider,
                resource_server: wire.resource_server,
                cos: wire.cos,
            },
            provider_ids: wire.provider_ids.into_iter().map(ProviderRef::into_id).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_from_json() {
        let req = RelationshipRequest::from_json(json!({
            "id": "X",
            "relationship": "resourceGroup",
            "itemType": "iudx:Resource",
            "resourceGroup": "Y"
        }))
        .unwrap();

        assert_eq!(req.id, "X");
        assert_eq!(req.relationship, Relationship::ResourceGroup);
        assert_eq!(req.item_type, Some(ItemType::Resource));
        assert_eq!(req.ancestors.get(ItemType::ResourceGroup), Some("Y"));
        assert_eq!(req.ancestors.get(ItemType::Provider), None);
    }

    #[test]
    fn test_provider_ids_accept_both_forms() {
        let req = RelationshipRequest::from_json(json!({
            "id": "rs",
            "relationship": "resourceGroup",
            "itemType": "iudx:ResourceServer",
            "providerIds": ["p1", { "id": "p2" }]
        }))
        .unwrap();
        assert_eq!(req.provider_ids, vec!["p1", "p2"]);
    }

    #[test]
    fn test_rejections() {
        for body in [
            json!({ "relationship": "all" }),
            json!({ "id": "", "relationship": "all" }),
            json!({ "id": "X" }),
            json!({ "id": "X", "relationship": "sibling" }),
            json!({ "id": "X", "relationship": "all", "itemType": "iudx:Thing" }),
        ] {
            let err = RelationshipRequest::from_json(body.clone()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidParamValue, "{}", body);
        }
    }

    #[test]
    fn test_relationship_targets() {
        assert_eq!(Relationship::Cos.target(), Some(ItemType::Cos));
        assert_eq!(Relationship::Type.target(), None);
        assert_eq!(
            "RESOURCEGROUP".parse::<Relationship>(),
            Ok(Relationship::ResourceGroup)
        );
    }
}
