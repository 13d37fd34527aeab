use std::collections::HashMap;
use std::sync::Arc;

use armkit_database::DatabaseClient;
use armkit_resource_id::ResourceId;

use crate::conv::{ConverterRegistry, DataModel};
use crate::frontend::{ListOperation, ListResources};

const RESOURCE_GROUP_SCOPE: &str = "resourceGroups";

/// Scope level a list request is addressed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeLevel {
    /// A plane or subscription; lists descend into every resource group.
    Plane,
    /// A single resource group; lists see only that group.
    ResourceGroup,
}

impl ScopeLevel {
    #[must_use]
    pub fn of(id: &ResourceId) -> Self {
        if id.find_scope(RESOURCE_GROUP_SCOPE).is_some() {
            Self::ResourceGroup
        } else {
            Self::Plane
        }
    }

    #[must_use]
    pub fn list_recursive(self) -> bool {
        matches!(self, Self::Plane)
    }
}

/// List operations keyed by resource type and scope level.
#[derive(Default, Clone)]
pub struct ListRouter {
    routes: HashMap<(String, ScopeLevel), Arc<dyn ListOperation>>,
}

impl ListRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the generic list controller of `T` at both scope levels.
    #[must_use]
    pub fn with_resource<T: DataModel>(
        mut self,
        db: &Arc<dyn DatabaseClient>,
        converters: &Arc<ConverterRegistry>,
    ) -> Self {
        for level in [ScopeLevel::Plane, ScopeLevel::ResourceGroup] {
            let op = ListResources::<T>::new(
                Arc::clone(db),
                Arc::clone(converters),
                level.list_recursive(),
            );
            self.insert(level, Arc::new(op));
        }
        self
    }

    #[must_use]
    pub fn with_operation(mut self, level: ScopeLevel, op: Arc<dyn ListOperation>) -> Self {
        self.insert(level, op);
        self
    }

    fn insert(&mut self, level: ScopeLevel, op: Arc<dyn ListOperation>) {
        let resource_type = op.resource_type();
        tracing::debug!(resource_type, ?level, "registered list operation");
        self.routes
            .insert((resource_type.to_ascii_lowercase(), level), op);
    }

    /// The operation serving a collection id, if one is registered.
    #[must_use]
    pub fn resolve(&self, id: &ResourceId) -> Option<Arc<dyn ListOperation>> {
        if !id.is_resource_collection() {
            return None;
        }
        let key = (id.resource_type().to_ascii_lowercase(), ScopeLevel::of(id));
        self.routes.get(&key).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn id(s: &str) -> ResourceId {
        ResourceId::parse(s).unwrap()
    }

    #[test]
    fn scope_level_follows_resource_group_segment() {
        let rg =
            id("/planes/radius/local/resourceGroups/rg/providers/Applications.Core/containers");
        let plane = id("/planes/radius/local/providers/Applications.Core/containers");
        assert_eq!(ScopeLevel::of(&rg), ScopeLevel::ResourceGroup);
        assert!(!ScopeLevel::of(&rg).list_recursive());
        assert_eq!(ScopeLevel::of(&plane), ScopeLevel::Plane);
        assert!(ScopeLevel::of(&plane).list_recursive());
    }

    #[test]
    fn azure_ids_are_classified_too() {
        let rg = id("/subscriptions/sub/resourceGroups/rg/providers/Applications.Core/containers");
        let sub = id("/subscriptions/sub/providers/Applications.Core/containers");
        assert_eq!(ScopeLevel::of(&rg), ScopeLevel::ResourceGroup);
        assert_eq!(ScopeLevel::of(&sub), ScopeLevel::Plane);
    }
}
