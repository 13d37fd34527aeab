//! Dependency graph of the output resources one logical resource produced.
//!
//! Edges point from a dependency to its dependent, so a topological order is a
//! valid deploy order and its reverse is the teardown order. The graph must be
//! acyclic; every traversal validates first and fails on a cycle before yielding
//! any step.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use armkit_resource_id::ResourceId;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::output::OutputResource;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("output resource '{local_id}' already exists for '{owner}'")]
    DuplicateLocalId { owner: String, local_id: String },

    #[error("output resource '{local_id}' does not exist for '{owner}'")]
    UnknownLocalId { owner: String, local_id: String },

    #[error("output resource '{local_id}' of '{owner}' depends on unknown '{dependency}'")]
    UnresolvedDependency {
        owner: String,
        local_id: String,
        dependency: String,
    },

    #[error("output resources of '{owner}' form a dependency cycle through '{local_id}'")]
    Cycle { owner: String, local_id: String },
}

/// What teardown does with one output resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownAction {
    Delete,
    /// Not managed by the owner; referenced but left in place.
    Retain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeardownStep {
    pub local_id: String,
    pub id: String,
    pub action: TeardownAction,
}

/// Ordered teardown steps: dependents before their dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeardownPlan {
    pub owner: ResourceId,
    pub steps: Vec<TeardownStep>,
}

impl TeardownPlan {
    /// Steps that delete something, in order.
    pub fn deletions(&self) -> impl Iterator<Item = &TeardownStep> {
        self.steps
            .iter()
            .filter(|s| s.action == TeardownAction::Delete)
    }
}

#[derive(Debug, Clone)]
pub struct OutputResourceGraph {
    owner: ResourceId,
    resources: Vec<OutputResource>,
    index: HashMap<String, usize>,
    /// local id -> local ids it depends on
    edges: BTreeMap<String, BTreeSet<String>>,
}

impl OutputResourceGraph {
    #[must_use]
    pub fn new(owner: ResourceId) -> Self {
        Self {
            owner,
            resources: Vec::new(),
            index: HashMap::new(),
            edges: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn owner(&self) -> &ResourceId {
        &self.owner
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    #[must_use]
    pub fn get(&self, local_id: &str) -> Option<&OutputResource> {
        self.index.get(local_id).map(|&i| &self.resources[i])
    }

    /// Output resources in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &OutputResource> {
        self.resources.iter()
    }

    /// Add an output resource. Its `dependencies` become edges; they may name
    /// resources added later and are resolved by [`Self::validate`].
    ///
    /// # Errors
    /// Returns `GraphError::DuplicateLocalId` if the local id is already taken in this graph.
    pub fn add_output_resource(&mut self, resource: OutputResource) -> Result<(), GraphError> {
        if self.index.contains_key(&resource.local_id) {
            return Err(GraphError::DuplicateLocalId {
                owner: self.owner.to_string(),
                local_id: resource.local_id,
            });
        }
        let deps = self.edges.entry(resource.local_id.clone()).or_default();
        deps.extend(resource.dependencies.iter().cloned());
        self.index
            .insert(resource.local_id.clone(), self.resources.len());
        self.resources.push(resource);
        Ok(())
    }

    /// Record that `local_id` must be deployed after `depends_on`.
    ///
    /// # Errors
    /// Returns `GraphError::UnknownLocalId` if either end is not in the graph.
    pub fn add_dependency(&mut self, local_id: &str, depends_on: &str) -> Result<(), GraphError> {
        for id in [local_id, depends_on] {
            if !self.index.contains_key(id) {
                return Err(self.unknown(id));
            }
        }
        self.edges
            .entry(local_id.to_owned())
            .or_default()
            .insert(depends_on.to_owned());
        if let Some(&i) = self.index.get(local_id) {
            let deps = &mut self.resources[i].dependencies;
            if !deps.iter().any(|d| d == depends_on) {
                deps.push(depends_on.to_owned());
            }
        }
        Ok(())
    }

    /// Direct dependencies of `local_id`.
    ///
    /// # Errors
    /// Returns `GraphError::UnknownLocalId` if `local_id` is not in the graph.
    pub fn dependencies(&self, local_id: &str) -> Result<BTreeSet<String>, GraphError> {
        if !self.index.contains_key(local_id) {
            return Err(self.unknown(local_id));
        }
        Ok(self.edges.get(local_id).cloned().unwrap_or_default())
    }

    /// Check every dependency resolves and the graph is acyclic.
    ///
    /// # Errors
    /// Returns `GraphError::UnresolvedDependency` or `GraphError::Cycle`.
    pub fn validate(&self) -> Result<(), GraphError> {
        self.topological_indices().map(|_| ())
    }

    /// Output resources with every dependency before its dependents.
    ///
    /// # Errors
    /// Returns the same errors as [`Self::validate`].
    pub fn deploy_order(&self) -> Result<Vec<&OutputResource>, GraphError> {
        Ok(self
            .topological_indices()?
            .into_iter()
            .map(|i| &self.resources[i])
            .collect())
    }

    /// Reverse of the deploy order. Unmanaged resources are retained.
    ///
    /// # Errors
    /// Returns the same errors as [`Self::validate`]; no plan is produced for an invalid graph.
    pub fn teardown_plan(&self) -> Result<TeardownPlan, GraphError> {
        let steps = self
            .deploy_order()?
            .into_iter()
            .rev()
            .map(|r| TeardownStep {
                local_id: r.local_id.clone(),
                id: r.id.clone(),
                action: if r.radius_managed {
                    TeardownAction::Delete
                } else {
                    TeardownAction::Retain
                },
            })
            .collect();
        Ok(TeardownPlan {
            owner: self.owner.clone(),
            steps,
        })
    }

    fn topological_indices(&self) -> Result<Vec<usize>, GraphError> {
        let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(self.resources.len(), 0);
        let nodes: Vec<NodeIndex> = (0..self.resources.len())
            .map(|i| graph.add_node(i))
            .collect();

        for (i, resource) in self.resources.iter().enumerate() {
            let Some(deps) = self.edges.get(&resource.local_id) else {
                continue;
            };
            for dep in deps {
                let Some(&j) = self.index.get(dep) else {
                    return Err(GraphError::UnresolvedDependency {
                        owner: self.owner.to_string(),
                        local_id: resource.local_id.clone(),
                        dependency: dep.clone(),
                    });
                };
                graph.add_edge(nodes[j], nodes[i], ());
            }
        }

        toposort(&graph, None)
            .map(|order| order.into_iter().map(|n| graph[n]).collect())
            .map_err(|cycle| {
                let local_id = self.resources[graph[cycle.node_id()]].local_id.clone();
                tracing::warn!(owner = %self.owner, %local_id, "output resource dependency cycle");
                GraphError::Cycle {
                    owner: self.owner.to_string(),
                    local_id,
                }
            })
    }

    fn unknown(&self, local_id: &str) -> GraphError {
        GraphError::UnknownLocalId {
            owner: self.owner.to_string(),
            local_id: local_id.to_owned(),
        }
    }
}
