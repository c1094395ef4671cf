//! Graph data model for the model-relocation dependency graph.
//!
//! Every type here is an immutable snapshot computed once per introspection
//! pass; nothing mutates a graph after the builder returns it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// How broadly a model's data may be copied during a relocation.
///
/// Variant order is permissiveness order, least to most permissive, and
/// `Ord` is derived from it: `Excluded < Global < Config < Organization <
/// User`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RelocationScope {
    /// Never relocated.
    Excluded,
    /// Relocated only in full-instance exports.
    Global,
    /// Relocated with instance configuration.
    Config,
    /// Relocated with an organization's data.
    Organization,
    /// Relocated with a single user's data.
    User,
}

impl RelocationScope {
    /// Cluster emission order for rendering, most to least permissive.
    /// `Excluded` is appended separately when retained by the caller.
    pub const CLUSTER_ORDER: [RelocationScope; 4] = [
        RelocationScope::User,
        RelocationScope::Organization,
        RelocationScope::Config,
        RelocationScope::Global,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RelocationScope::Excluded => "Excluded",
            RelocationScope::Global => "Global",
            RelocationScope::Config => "Config",
            RelocationScope::Organization => "Organization",
            RelocationScope::User => "User",
        }
    }
}

impl fmt::Display for RelocationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A model's declared relocation scope: either a single value or a set of
/// candidates when the scope legitimately varies by runtime configuration.
///
/// Serde-untagged so a registry snapshot may declare either
/// `"scope": "user"` or `"scope": ["user", "organization"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScopeSpec {
    Single(RelocationScope),
    Candidates(BTreeSet<RelocationScope>),
}

impl ScopeSpec {
    /// The most permissive declared scope, used for cluster placement.
    ///
    /// Returns `None` only for an empty candidate set, which callers treat
    /// as a fatal classification error. The full candidate set stays
    /// available to consumers that need more than cluster placement.
    pub fn most_permissive(&self) -> Option<RelocationScope> {
        match self {
            ScopeSpec::Single(scope) => Some(*scope),
            ScopeSpec::Candidates(set) => set.iter().next_back().copied(),
        }
    }

    /// All declared candidates, single values included.
    pub fn candidates(&self) -> BTreeSet<RelocationScope> {
        match self {
            ScopeSpec::Single(scope) => BTreeSet::from([*scope]),
            ScopeSpec::Candidates(set) => set.clone(),
        }
    }
}

/// The physical deployment tier a model's table lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Silo {
    Control,
    Region,
}

impl Silo {
    pub fn as_str(self) -> &'static str {
        match self {
            Silo::Control => "Control",
            Silo::Region => "Region",
        }
    }
}

/// How strongly the schema enforces an inter-model reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// A directly declared, schema-enforced foreign key.
    Explicit,
    /// Inferred from naming/typing convention; no relational constraint.
    Implicit,
    /// Crosses a silo boundary; no relational constraint can span it.
    HybridCloud,
}

/// A resolved model: one persisted domain type with its relocation scope,
/// silo membership, and dangling status settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelNode {
    pub name: String,
    /// The full declared scope spec, preserved for consumers that need
    /// more than the clustering value.
    pub scope: ScopeSpec,
    /// Most-permissive declared scope; decides cluster placement.
    pub resolved_scope: RelocationScope,
    /// Declared silo membership in declaration order.
    pub silos: Vec<Silo>,
    /// True when nothing references this model and it is not a relocation
    /// root.
    pub dangling: bool,
}

impl ModelNode {
    /// The silo used for node fill when rendering. First declared silo
    /// wins for multi-silo models; a true union rendering is a known
    /// simplification this tool does not attempt.
    pub fn primary_silo(&self) -> Option<Silo> {
        self.silos.first().copied()
    }
}

/// A directed reference edge from a source model to a target model via a
/// named field. Kind and nullability are fixed by the field's declaration,
/// never by runtime data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignReference {
    pub source: String,
    pub field: String,
    pub target: String,
    pub kind: ReferenceKind,
    pub nullable: bool,
}

/// One scope cluster: every surviving model whose most-permissive scope
/// resolved to `scope`, in name order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeCluster {
    pub scope: RelocationScope,
    pub members: Vec<ModelNode>,
}

/// Aggregate statistics for a built graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphMetadata {
    pub total_models: usize,
    pub total_edges: usize,
    pub explicit_edges: usize,
    pub implicit_edges: usize,
    pub hybrid_edges: usize,
    pub dangling_models: usize,
    /// Whether Excluded-scope models were retained in the graph.
    pub excluded_shown: bool,
}

/// The complete dependency graph: scope clusters in fixed order plus the
/// ordered edge list. Built once by the builder, immutable after.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyGraph {
    pub metadata: GraphMetadata,
    pub clusters: Vec<ScopeCluster>,
    pub edges: Vec<ForeignReference>,
}

impl DependencyGraph {
    /// Iterate all models across clusters in emission order.
    pub fn models(&self) -> impl Iterator<Item = &ModelNode> {
        self.clusters.iter().flat_map(|c| c.members.iter())
    }

    /// Look up a model by name in any cluster.
    pub fn get_model(&self, name: &str) -> Option<&ModelNode> {
        self.models().find(|m| m.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_permissiveness_ordering() {
        assert!(RelocationScope::Excluded < RelocationScope::Global);
        assert!(RelocationScope::Global < RelocationScope::Config);
        assert!(RelocationScope::Config < RelocationScope::Organization);
        assert!(RelocationScope::Organization < RelocationScope::User);
    }

    #[test]
    fn test_most_permissive_single() {
        let spec = ScopeSpec::Single(RelocationScope::Config);
        assert_eq!(spec.most_permissive(), Some(RelocationScope::Config));
    }

    #[test]
    fn test_most_permissive_candidates() {
        let spec = ScopeSpec::Candidates(BTreeSet::from([
            RelocationScope::Global,
            RelocationScope::User,
            RelocationScope::Organization,
        ]));
        assert_eq!(spec.most_permissive(), Some(RelocationScope::User));
    }

    #[test]
    fn test_most_permissive_empty_set() {
        let spec = ScopeSpec::Candidates(BTreeSet::new());
        assert_eq!(spec.most_permissive(), None);
    }

    #[test]
    fn test_scope_spec_untagged_deserialization() {
        let single: ScopeSpec = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(single, ScopeSpec::Single(RelocationScope::User));

        let set: ScopeSpec = serde_json::from_str("[\"global\", \"config\"]").unwrap();
        assert_eq!(
            set.candidates(),
            BTreeSet::from([RelocationScope::Global, RelocationScope::Config])
        );
    }

    #[test]
    fn test_primary_silo_first_wins() {
        let node = ModelNode {
            name: "monitor.apikey".to_string(),
            scope: ScopeSpec::Single(RelocationScope::Config),
            resolved_scope: RelocationScope::Config,
            silos: vec![Silo::Control, Silo::Region],
            dangling: false,
        };
        assert_eq!(node.primary_silo(), Some(Silo::Control));
    }
}
