//! Output resource graphs of many owners.
//!
//! Local ids are unique per owner only; two owners may use the same local id.

use std::collections::{BTreeSet, HashMap};

use armkit_resource_id::ResourceId;

use crate::graph::{GraphError, OutputResourceGraph, TeardownPlan};
use crate::output::OutputResource;

#[derive(Debug, Default)]
pub struct OutputResourceCatalog {
    graphs: HashMap<ResourceId, OutputResourceGraph>,
}

impl OutputResourceCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an output resource produced by `owner`.
    ///
    /// # Errors
    /// Returns `GraphError::DuplicateLocalId` if `owner` already has `local_id`.
    pub fn add_output_resource(
        &mut self,
        owner: &ResourceId,
        local_id: &str,
        id: &str,
        radius_managed: bool,
    ) -> Result<(), GraphError> {
        self.graphs
            .entry(owner.clone())
            .or_insert_with(|| OutputResourceGraph::new(owner.clone()))
            .add_output_resource(OutputResource::new(local_id, id, radius_managed))
    }

    /// # Errors
    /// Returns `GraphError::UnknownLocalId` if the owner or either local id is unknown.
    pub fn add_dependency(
        &mut self,
        owner: &ResourceId,
        local_id: &str,
        depends_on: &str,
    ) -> Result<(), GraphError> {
        match self.graphs.get_mut(owner) {
            Some(graph) => graph.add_dependency(local_id, depends_on),
            None => Err(GraphError::UnknownLocalId {
                owner: owner.to_string(),
                local_id: local_id.to_owned(),
            }),
        }
    }

    /// # Errors
    /// Returns `GraphError::UnknownLocalId` if the owner or local id is unknown.
    pub fn dependencies(
        &self,
        owner: &ResourceId,
        local_id: &str,
    ) -> Result<BTreeSet<String>, GraphError> {
        match self.graphs.get(owner) {
            Some(graph) => graph.dependencies(local_id),
            None => Err(GraphError::UnknownLocalId {
                owner: owner.to_string(),
                local_id: local_id.to_owned(),
            }),
        }
    }

    #[must_use]
    pub fn graph(&self, owner: &ResourceId) -> Option<&OutputResourceGraph> {
        self.graphs.get(owner)
    }

    /// Replace the graph of an owner, e.g. after a redeploy.
    ///
    /// # Errors
    /// Returns the validation error of `graph`; the previous graph is kept in that case.
    pub fn replace(&mut self, graph: OutputResourceGraph) -> Result<(), GraphError> {
        graph.validate()?;
        self.graphs.insert(graph.owner().clone(), graph);
        Ok(())
    }

    /// Compute the teardown plan of `owner` and forget its graph.
    ///
    /// Returns `Ok(None)` for owners without output resources.
    ///
    /// # Errors
    /// Returns `GraphError::Cycle` or `GraphError::UnresolvedDependency`; the graph is
    /// kept so nothing is torn down from an invalid plan.
    pub fn remove_owner(&mut self, owner: &ResourceId) -> Result<Option<TeardownPlan>, GraphError> {
        let Some(graph) = self.graphs.get(owner) else {
            return Ok(None);
        };
        let plan = graph.teardown_plan()?;
        self.graphs.remove(owner);
        tracing::debug!(owner = %owner, steps = plan.steps.len(), "output resources released");
        Ok(Some(plan))
    }
}
