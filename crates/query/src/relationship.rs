//! Relationship resolution over the item-type graph.
//!
//! A [`RelationshipRequest`] names a subject item and a relationship
//! keyword. The resolver looks the `(keyword, subject type)` pair up in a
//! fixed case table; each entry names the [`Traversal`] that builds the
//! query. Pairs outside the table resolve to `None`.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::dsl::{BoolQuery, ID_KEYWORD, Query, TYPE_KEYWORD, keyword_field};
use crate::error::{ErrorKind, QueryError, QueryResult};
use crate::types::{ItemType, Relationship, RelationshipRequest};

/// Subject item types a case applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Subject {
    /// Any item type, or none.
    Any,
    /// Exactly this item type.
    Is(ItemType),
}

/// How a case builds its query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Traversal {
    /// Term on the subject's recorded COS id.
    RecordedCos,
    /// Items of the target type that record the subject as an ancestor.
    Children,
    /// The subject's recorded ancestor of the target type.
    Ancestor,
    /// Like `Ancestor`, with an analyzed match on the id.
    AncestorByMatch,
    /// Items recording any of the supplied providers.
    UnderProviders,
    /// The subject itself.
    Itself,
    /// The subject and every recorded ancestor.
    Everything,
}

/// Ancestor fields OR'd by the `all` keyword, in query order.
const ALL_ANCESTORS: [ItemType; 4] = [
    ItemType::ResourceGroup,
    ItemType::Provider,
    ItemType::ResourceServer,
    ItemType::Cos,
];

const CASES: [(Relationship, Subject, Traversal); 18] = [
    (Relationship::Cos, Subject::Any, Traversal::RecordedCos),
    (Relationship::Resource, Subject::Is(ItemType::Cos), Traversal::Children),
    (Relationship::ResourceGroup, Subject::Is(ItemType::Cos), Traversal::Children),
    (Relationship::ResourceServer, Subject::Is(ItemType::Cos), Traversal::Children),
    (Relationship::Provider, Subject::Is(ItemType::Cos), Traversal::Children),
    (Relationship::Resource, Subject::Is(ItemType::Provider), Traversal::Children),
    (Relationship::Resource, Subject::Is(ItemType::ResourceGroup), Traversal::Children),
    (Relationship::Resource, Subject::Is(ItemType::ResourceServer), Traversal::Children),
    (Relationship::ResourceGroup, Subject::Is(ItemType::Resource), Traversal::Ancestor),
    (Relationship::ResourceGroup, Subject::Is(ItemType::Provider), Traversal::Children),
    (Relationship::ResourceGroup, Subject::Is(ItemType::ResourceServer), Traversal::UnderProviders),
    (Relationship::Provider, Subject::Is(ItemType::ResourceServer), Traversal::Children),
    (Relationship::Provider, Subject::Is(ItemType::Resource), Traversal::Ancestor),
    (Relationship::Provider, Subject::Is(ItemType::ResourceGroup), Traversal::Ancestor),
    (Relationship::ResourceServer, Subject::Is(ItemType::Resource), Traversal::AncestorByMatch),
    (Relationship::ResourceServer, Subject::Is(ItemType::Provider), Traversal::AncestorByMatch),
    (Relationship::Type, Subject::Any, Traversal::Itself),
    (Relationship::All, Subject::Any, Traversal::Everything),
];

static CASE_TABLE: LazyLock<HashMap<(Relationship, Subject), Traversal>> = LazyLock::new(|| {
    CASES
        .iter()
        .map(|&(relationship, subject, traversal)| ((relationship, subject), traversal))
        .collect()
});

fn lookup(relationship: Relationship, item_type: Option<ItemType>) -> Option<Traversal> {
    item_type
        .and_then(|t| CASE_TABLE.get(&(relationship, Subject::Is(t))))
        .or_else(|| CASE_TABLE.get(&(relationship, Subject::Any)))
        .copied()
}

impl Traversal {
    fn build(self, request: &RelationshipRequest) -> Option<Query> {
        match self {
            Traversal::RecordedCos => request
                .ancestors
                .get(ItemType::Cos)
                .map(|cos| Query::term(ID_KEYWORD, cos)),
            Traversal::Children => {
                let subject = request.item_type?;
                let target = request.relationship.target()?;
                Some(
                    BoolQuery::new()
                        .must(Query::term(keyword_field(subject.field_name()), request.id.as_str()))
                        .must(Query::term(TYPE_KEYWORD, target.as_str()))
                        .into_query(),
                )
            }
            Traversal::Ancestor | Traversal::AncestorByMatch => {
                let target = request.relationship.target()?;
                let ancestor = request.ancestors.get(target)?;
                let id_clause = if self == Traversal::AncestorByMatch {
                    Query::match_query(ID_KEYWORD, ancestor)
                } else {
                    Query::term(ID_KEYWORD, ancestor)
                };
                Some(
                    BoolQuery::new()
                        .must(id_clause)
                        .must(Query::term(TYPE_KEYWORD, target.as_str()))
                        .into_query(),
                )
            }
            Traversal::UnderProviders => {
                if request.provider_ids.is_empty() {
                    return None;
                }
                let field = keyword_field(ItemType::Provider.field_name());
                let query = request
                    .provider_ids
                    .iter()
                    .fold(BoolQuery::new(), |q, provider| {
                        q.should(Query::match_query(field.as_str(), provider.as_str()))
                    });
                Some(query.minimum_should_match(1).into_query())
            }
            Traversal::Itself => Some(Query::term(ID_KEYWORD, request.id.as_str())),
            Traversal::Everything => {
                let ids = std::iter::once(request.id.as_str())
                    .chain(ALL_ANCESTORS.iter().filter_map(|&t| request.ancestors.get(t)));
                let query = ids.fold(BoolQuery::new(), |q, id| {
                    q.should(Query::match_query(ID_KEYWORD, id))
                });
                Some(query.minimum_should_match(1).into_query())
            }
        }
    }
}

/// Resolves relationship requests into engine queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationshipResolver;

impl RelationshipResolver {
    /// Creates a resolver.
    pub fn new() -> Self {
        Self
    }

    /// Returns true when the case table defines the pair.
    pub fn is_defined(&self, relationship: Relationship, item_type: Option<ItemType>) -> bool {
        lookup(relationship, item_type).is_some()
    }

    /// Resolves a request, or `None` when the pair is undefined or a
    /// required ancestor id is missing.
    pub fn resolve(&self, request: &RelationshipRequest) -> Option<Query> {
        let traversal = lookup(request.relationship, request.item_type)?;
        let query = traversal.build(request);
        tracing::debug!(
            relationship = %request.relationship,
            item_type = ?request.item_type,
            ?traversal,
            resolved = query.is_some(),
            "relationship lookup"
        );
        query
    }

    /// Resolves a request, failing with
    /// [`InvalidRelationSearch`](ErrorKind::InvalidRelationSearch) when
    /// [`resolve`](Self::resolve) yields nothing.
    pub fn resolve_checked(&self, request: &RelationshipRequest) -> QueryResult<Query> {
        self.resolve(request).ok_or_else(|| {
            let err = QueryError::new(ErrorKind::InvalidRelationSearch, "Invalid relationship type");
            tracing::warn!(
                urn = err.kind().urn(),
                relationship = %request.relationship,
                item_type = ?request.item_type,
                "rejected relationship request"
            );
            err
        })
    }
}
