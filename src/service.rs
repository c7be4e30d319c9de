//! Service facade: one graph, one data source, service-wide policy.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::backend::DataSource;
use crate::metadata::ResourceGraph;
use crate::query::QueryProvider;

/// Wildcard set name for config entries applying to every resource set.
pub const ALL_SETS: &str = "*";

/// Service-wide policy, fixed at initialization.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    page_sizes: HashMap<String, u64>,
    accept_count_requests: bool,
    accept_projection_requests: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        let mut page_sizes = HashMap::new();
        page_sizes.insert(ALL_SETS.to_string(), 5);
        ServiceConfig {
            page_sizes,
            accept_count_requests: true,
            accept_projection_requests: true,
        }
    }
}

impl ServiceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size for one resource set, or for [`ALL_SETS`].
    pub fn set_page_size(mut self, set: impl Into<String>, size: u64) -> Self {
        self.page_sizes.insert(set.into(), size);
        self
    }

    pub fn accept_count_requests(mut self, accept: bool) -> Self {
        self.accept_count_requests = accept;
        self
    }

    pub fn accept_projection_requests(mut self, accept: bool) -> Self {
        self.accept_projection_requests = accept;
        self
    }

    /// Page size for a set, falling back to the wildcard entry.
    pub fn page_size_for(&self, set: &str) -> Option<u64> {
        self.page_sizes
            .get(set)
            .or_else(|| self.page_sizes.get(ALL_SETS))
            .copied()
    }

    pub fn accepts_count_requests(&self) -> bool {
        self.accept_count_requests
    }

    pub fn accepts_projection_requests(&self) -> bool {
        self.accept_projection_requests
    }
}

/// Thin composition of the metadata graph and the query provider handed to
/// the protocol engine.
pub struct Service {
    config: ServiceConfig,
    graph: Arc<ResourceGraph>,
    source: Arc<dyn DataSource>,
    query: OnceLock<QueryProvider>,
}

impl Service {
    pub fn new(config: ServiceConfig, graph: ResourceGraph, source: Arc<dyn DataSource>) -> Self {
        Service {
            config,
            graph: Arc::new(graph),
            source,
            query: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// The metadata provider contract: the immutable graph itself.
    pub fn metadata(&self) -> &ResourceGraph {
        &self.graph
    }

    /// The query provider, constructed on first use and reused.
    pub fn query_provider(&self) -> &QueryProvider {
        self.query
            .get_or_init(|| QueryProvider::new(Arc::clone(&self.graph), Arc::clone(&self.source)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackingType;
    use crate::metadata::MetadataBuilder;
    use crate::testing::{entity_meta, field, MemoryDataSource, MemoryMetadataSource};

    #[test]
    fn test_page_size_wildcard_fallback() {
        let config = ServiceConfig::new().set_page_size("Member", 20);
        assert_eq!(config.page_size_for("Member"), Some(20));
        assert_eq!(config.page_size_for("Address"), Some(5));
    }

    #[test]
    fn test_facade_exposes_graph_and_reuses_provider() {
        let meta = MemoryMetadataSource::new().add(entity_meta(
            "app::entity::Member",
            vec![field("id", BackingType::Integer, true)],
            vec![],
        ));
        let mut builder = MetadataBuilder::new(&meta);
        builder.register_entity("app::entity::Member", "App").unwrap();
        builder.resolve_associations().unwrap();

        let service = Service::new(
            ServiceConfig::new(),
            builder.build(),
            Arc::new(MemoryDataSource::new()),
        );

        assert!(service.metadata().resolve_set("Member").is_some());
        assert!(service.query_provider().handles_ordered_paging());
        let first = service.query_provider() as *const _;
        let second = service.query_provider() as *const _;
        assert!(std::ptr::eq(first, second));
    }
}
