//! Workflow reference resolution for service catalog entries.

use jiff::Timestamp;

use crate::models::{LegacyWorkflowId, ServiceCatalogItem, Stage, WorkflowRef};

/// Resolve the ordered workflow references for a service.
///
/// Precedence, first non-empty wins: the explicit `workflows` list, the
/// array-form legacy id (each element given an implicit ascending order),
/// then the string-form legacy id. An empty result is a valid, common state
/// ("service has no workflow configured"), not an error; callers degrade to
/// [`default_stage_columns`] for display purposes.
pub fn resolve_workflow_refs(service: &ServiceCatalogItem) -> Vec<WorkflowRef> {
    if !service.workflows.is_empty() {
        let mut refs: Vec<(usize, WorkflowRef)> =
            service.workflows.iter().cloned().enumerate().collect();
        refs.sort_by_key(|(idx, r)| (r.order, *idx));
        return refs.into_iter().map(|(_, r)| r).collect();
    }

    match &service.legacy_workflow_id {
        Some(LegacyWorkflowId::Many(ids)) if !ids.is_empty() => ids
            .iter()
            .enumerate()
            .map(|(idx, id)| WorkflowRef {
                workflow_id: id.clone(),
                order: idx as u32 + 1,
                name: None,
            })
            .collect(),
        Some(LegacyWorkflowId::One(id)) if !id.is_empty() => vec![WorkflowRef {
            workflow_id: id.clone(),
            order: 1,
            name: None,
        }],
        _ => Vec::new(),
    }
}

/// The workflow reference that follows `current_workflow_id` in the
/// service's configured sequence, if any. Drives end-of-workflow chaining.
pub fn next_workflow_ref<'a>(
    refs: &'a [WorkflowRef],
    current_workflow_id: &str,
) -> Option<&'a WorkflowRef> {
    let position = refs.iter().position(|r| r.workflow_id == current_workflow_id)?;
    refs.get(position + 1)
}

/// Built-in board columns used when an item has no resolvable workflow.
/// Purely cosmetic; never persisted onto items.
pub fn default_stage_columns() -> Vec<Stage> {
    let names = ["Queue", "Cleaning", "Repair", "QC", "Done"];
    names
        .iter()
        .enumerate()
        .map(|(idx, name)| Stage {
            id: format!("default-{}", name.to_lowercase()),
            name: (*name).to_string(),
            order: idx as u32 + 1,
            tasks: vec![],
            assigned_members: vec![],
            color: None,
        })
        .collect()
}

/// Read-mostly cache of the service catalog, shared by all consumers of the
/// core. Constructed at application start with a bounded TTL; consumers
/// check [`ServiceCatalog::is_stale`] and refresh from the store. Tolerates
/// being empty at call time; resolution degrades rather than throwing.
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    services: Vec<ServiceCatalogItem>,
    loaded_at: Option<Timestamp>,
    ttl_ms: i64,
}

impl ServiceCatalog {
    /// Create an empty cache with the given TTL in milliseconds.
    pub fn new(ttl_ms: i64) -> Self {
        Self {
            services: Vec::new(),
            loaded_at: None,
            ttl_ms,
        }
    }

    /// Replace the cached entries and stamp the load time.
    pub fn replace(&mut self, services: Vec<ServiceCatalogItem>, now: Timestamp) {
        self.services = services;
        self.loaded_at = Some(now);
    }

    /// Drop the cached entries so the next access refreshes.
    pub fn invalidate(&mut self) {
        self.loaded_at = None;
        self.services.clear();
    }

    /// True when the cache has never loaded or its TTL has expired.
    pub fn is_stale(&self, now: Timestamp) -> bool {
        match self.loaded_at {
            Some(loaded) => now.as_millisecond() - loaded.as_millisecond() >= self.ttl_ms,
            None => true,
        }
    }

    /// Look up a service by id.
    pub fn get(&self, service_id: u64) -> Option<&ServiceCatalogItem> {
        self.services.iter().find(|s| s.id == service_id)
    }

    /// All cached services.
    pub fn all(&self) -> &[ServiceCatalogItem] {
        &self.services
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(
        workflows: Vec<WorkflowRef>,
        legacy: Option<LegacyWorkflowId>,
    ) -> ServiceCatalogItem {
        ServiceCatalogItem {
            id: 1,
            name: "Deep Clean".to_string(),
            price: 150_000,
            workflows,
            legacy_workflow_id: legacy,
        }
    }

    fn wf_ref(id: &str, order: u32) -> WorkflowRef {
        WorkflowRef {
            workflow_id: id.to_string(),
            order,
            name: None,
        }
    }

    #[test]
    fn test_explicit_list_wins_over_legacy() {
        let svc = service(
            vec![wf_ref("wf-b", 2), wf_ref("wf-a", 1)],
            Some(LegacyWorkflowId::One("wf-legacy".to_string())),
        );

        let refs = resolve_workflow_refs(&svc);
        let ids: Vec<&str> = refs.iter().map(|r| r.workflow_id.as_str()).collect();
        assert_eq!(ids, vec!["wf-a", "wf-b"]);
    }

    #[test]
    fn test_array_form_legacy_gets_ascending_order() {
        let svc = service(
            vec![],
            Some(LegacyWorkflowId::Many(vec![
                "wf-x".to_string(),
                "wf-y".to_string(),
            ])),
        );

        let refs = resolve_workflow_refs(&svc);
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].workflow_id, "wf-x");
        assert_eq!(refs[0].order, 1);
        assert_eq!(refs[1].workflow_id, "wf-y");
        assert_eq!(refs[1].order, 2);
    }

    #[test]
    fn test_string_form_legacy_single_ref() {
        let svc = service(vec![], Some(LegacyWorkflowId::One("wf-z".to_string())));

        let refs = resolve_workflow_refs(&svc);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].workflow_id, "wf-z");
    }

    #[test]
    fn test_no_workflow_configured_is_empty_not_error() {
        let svc = service(vec![], None);
        assert!(resolve_workflow_refs(&svc).is_empty());

        let svc = service(vec![], Some(LegacyWorkflowId::One(String::new())));
        assert!(resolve_workflow_refs(&svc).is_empty());

        let svc = service(vec![], Some(LegacyWorkflowId::Many(vec![])));
        assert!(resolve_workflow_refs(&svc).is_empty());
    }

    #[test]
    fn test_next_workflow_ref() {
        let refs = vec![wf_ref("wf-a", 1), wf_ref("wf-b", 2), wf_ref("wf-c", 3)];

        assert_eq!(
            next_workflow_ref(&refs, "wf-a").map(|r| r.workflow_id.as_str()),
            Some("wf-b")
        );
        assert_eq!(
            next_workflow_ref(&refs, "wf-b").map(|r| r.workflow_id.as_str()),
            Some("wf-c")
        );
        assert!(next_workflow_ref(&refs, "wf-c").is_none());
        assert!(next_workflow_ref(&refs, "wf-unknown").is_none());
    }

    #[test]
    fn test_default_stage_columns_shape() {
        let columns = default_stage_columns();
        let names: Vec<&str> = columns.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Queue", "Cleaning", "Repair", "QC", "Done"]);
        // Orders are ascending so board layout is stable
        assert!(columns.windows(2).all(|w| w[0].order < w[1].order));
    }

    #[test]
    fn test_service_catalog_ttl() {
        let mut catalog = ServiceCatalog::new(5 * 60 * 1000);
        let t0 = Timestamp::from_second(1_000_000).unwrap();

        assert!(catalog.is_stale(t0));
        catalog.replace(vec![service(vec![], None)], t0);
        assert!(!catalog.is_stale(t0));

        let before_expiry = Timestamp::from_second(1_000_000 + 299).unwrap();
        assert!(!catalog.is_stale(before_expiry));

        let after_expiry = Timestamp::from_second(1_000_000 + 300).unwrap();
        assert!(catalog.is_stale(after_expiry));

        catalog.invalidate();
        assert!(catalog.is_stale(t0));
        assert!(catalog.all().is_empty());
    }
}
