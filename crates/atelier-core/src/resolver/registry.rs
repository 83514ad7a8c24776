//! Workflow registry cache and embedded-workflow synthesis.

use jiff::Timestamp;

use crate::models::{ServiceCatalogItem, Stage, WorkflowDefinition};
use crate::resolver::catalog::resolve_workflow_refs;

/// Read-mostly cache of workflow definitions with a bounded TTL.
///
/// Constructed at application start and shared by all consumers; callers
/// check [`WorkflowRegistry::is_stale`] and refresh from the store. The
/// cache being empty or stale at call time is never an error; resolution
/// functions re-derive correct results once it refreshes.
#[derive(Debug, Clone)]
pub struct WorkflowRegistry {
    workflows: Vec<WorkflowDefinition>,
    loaded_at: Option<Timestamp>,
    ttl_ms: i64,
}

/// Default cache TTL: five minutes.
pub const DEFAULT_TTL_MS: i64 = 5 * 60 * 1000;

impl WorkflowRegistry {
    /// Create an empty registry with the given TTL in milliseconds.
    pub fn new(ttl_ms: i64) -> Self {
        Self {
            workflows: Vec::new(),
            loaded_at: None,
            ttl_ms,
        }
    }

    /// Replace the cached definitions and stamp the load time.
    pub fn replace(&mut self, workflows: Vec<WorkflowDefinition>, now: Timestamp) {
        self.workflows = workflows;
        self.loaded_at = Some(now);
    }

    /// Drop the cached definitions so the next access refreshes.
    pub fn invalidate(&mut self) {
        self.loaded_at = None;
        self.workflows.clear();
    }

    /// True when the registry has never loaded or its TTL has expired.
    pub fn is_stale(&self, now: Timestamp) -> bool {
        match self.loaded_at {
            Some(loaded) => now.as_millisecond() - loaded.as_millisecond() >= self.ttl_ms,
            None => true,
        }
    }

    /// Look up a definition by id.
    pub fn get(&self, workflow_id: &str) -> Option<&WorkflowDefinition> {
        self.workflows.iter().find(|w| w.id == workflow_id)
    }

    /// All cached definitions.
    pub fn all(&self) -> &[WorkflowDefinition] {
        &self.workflows
    }
}

/// A workflow definition plus its provenance.
///
/// Callers mostly treat both variants identically, but the distinction is
/// kept so authoritative registry data can be told apart from best-effort
/// synthesized data.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedWorkflow {
    /// Found in the workflow registry
    Registered(WorkflowDefinition),

    /// Synthesized from the service's own workflow refs because the
    /// registry lookup missed; must never be written back to the registry
    Synthesized(WorkflowDefinition),
}

impl ResolvedWorkflow {
    /// The underlying definition, regardless of provenance.
    pub fn definition(&self) -> &WorkflowDefinition {
        match self {
            ResolvedWorkflow::Registered(def) | ResolvedWorkflow::Synthesized(def) => def,
        }
    }

    /// True for best-effort synthesized definitions.
    pub fn is_synthesized(&self) -> bool {
        matches!(self, ResolvedWorkflow::Synthesized(_))
    }
}

/// Resolve a workflow id against the registry, falling back to synthesis
/// from the service's embedded refs.
///
/// Returns `None` only when the registry misses and the service (if any)
/// carries no refs for the id: the degraded "no workflow configured"
/// state, surfaced to callers as an absence rather than an error.
pub fn resolve_workflow(
    registry: &WorkflowRegistry,
    service: Option<&ServiceCatalogItem>,
    workflow_id: &str,
) -> Option<ResolvedWorkflow> {
    if let Some(def) = registry.get(workflow_id) {
        return Some(ResolvedWorkflow::Registered(def.clone()));
    }
    service.and_then(|svc| synthesize_embedded(svc, workflow_id))
}

/// Resolve an item's active workflow: the denormalized `workflow_id` on the
/// item wins, falling back to the first configured ref of its service for
/// legacy items that never had the pointer written.
pub fn resolve_item_workflow(
    registry: &WorkflowRegistry,
    service: Option<&ServiceCatalogItem>,
    item: &crate::models::OrderItem,
) -> Option<ResolvedWorkflow> {
    let workflow_id = item.workflow_id.clone().or_else(|| {
        service
            .map(resolve_workflow_refs)
            .and_then(|refs| refs.first().map(|r| r.workflow_id.clone()))
    })?;
    resolve_workflow(registry, service, &workflow_id)
}

/// Synthesize a throwaway definition for a workflow id the registry does
/// not know, deriving stages from the service's own workflow refs (each
/// ref becomes a one-stage entry, its `order`/`name` reused as stage
/// order/name). Keeps the UI functional against partially-loaded or
/// legacy data.
pub fn synthesize_embedded(
    service: &ServiceCatalogItem,
    workflow_id: &str,
) -> Option<ResolvedWorkflow> {
    let refs = resolve_workflow_refs(service);
    if !refs.iter().any(|r| r.workflow_id == workflow_id) {
        return None;
    }

    let stages: Vec<Stage> = refs
        .iter()
        .map(|r| Stage {
            id: r.workflow_id.clone(),
            name: r.name.clone().unwrap_or_else(|| r.workflow_id.clone()),
            order: r.order,
            tasks: vec![],
            assigned_members: vec![],
            color: None,
        })
        .collect();

    Some(ResolvedWorkflow::Synthesized(WorkflowDefinition {
        id: workflow_id.to_string(),
        label: service.name.clone(),
        department: None,
        stages,
        service_types: vec![],
        assigned_members: vec![],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkflowRef;

    fn definition(id: &str) -> WorkflowDefinition {
        WorkflowDefinition {
            id: id.to_string(),
            label: id.to_uppercase(),
            department: None,
            stages: vec![Stage {
                id: format!("{id}-s1"),
                name: "First".to_string(),
                order: 1,
                tasks: vec![],
                assigned_members: vec![],
                color: None,
            }],
            service_types: vec![],
            assigned_members: vec![],
        }
    }

    fn service_with_refs(refs: Vec<WorkflowRef>) -> ServiceCatalogItem {
        ServiceCatalogItem {
            id: 9,
            name: "Full Spa".to_string(),
            price: 250_000,
            workflows: refs,
            legacy_workflow_id: None,
        }
    }

    #[test]
    fn test_registry_hit_is_registered() {
        let mut registry = WorkflowRegistry::new(DEFAULT_TTL_MS);
        registry.replace(vec![definition("wf-wash")], Timestamp::from_second(0).unwrap());

        let resolved = resolve_workflow(&registry, None, "wf-wash").unwrap();
        assert!(!resolved.is_synthesized());
        assert_eq!(resolved.definition().id, "wf-wash");
    }

    #[test]
    fn test_registry_miss_synthesizes_from_service() {
        let registry = WorkflowRegistry::new(DEFAULT_TTL_MS);
        let service = service_with_refs(vec![
            WorkflowRef {
                workflow_id: "wf-wash".to_string(),
                order: 1,
                name: Some("Wash".to_string()),
            },
            WorkflowRef {
                workflow_id: "wf-dry".to_string(),
                order: 2,
                name: None,
            },
        ]);

        let resolved = resolve_workflow(&registry, Some(&service), "wf-wash").unwrap();
        assert!(resolved.is_synthesized());

        let def = resolved.definition();
        assert_eq!(def.id, "wf-wash");
        assert_eq!(def.stages.len(), 2);
        assert_eq!(def.stages[0].name, "Wash");
        // Refs without a display name fall back to the workflow id
        assert_eq!(def.stages[1].name, "wf-dry");
    }

    #[test]
    fn test_unresolvable_id_is_none() {
        let registry = WorkflowRegistry::new(DEFAULT_TTL_MS);
        let service = service_with_refs(vec![]);

        assert!(resolve_workflow(&registry, Some(&service), "wf-ghost").is_none());
        assert!(resolve_workflow(&registry, None, "wf-ghost").is_none());
    }

    #[test]
    fn test_registry_ttl_lifecycle() {
        let mut registry = WorkflowRegistry::new(1000);
        let t0 = Timestamp::from_second(100).unwrap();

        assert!(registry.is_stale(t0));
        registry.replace(vec![definition("wf-a")], t0);
        assert!(!registry.is_stale(Timestamp::from_millisecond(100_999).unwrap()));
        assert!(registry.is_stale(Timestamp::from_millisecond(101_000).unwrap()));

        registry.invalidate();
        assert!(registry.is_stale(t0));
        assert!(registry.get("wf-a").is_none());
    }
}
