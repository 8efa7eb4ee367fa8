use std::sync::Arc;

use tenantscope_core::{ActiveTenantBinding, TenantDirectory, TenantResolver};
use tenantscope_infra::db::{ConnectionRegistry, InMemoryOpener, OpenError};
use tenantscope_infra::InMemoryEntityStore;
use tenantscope_products::Product;

pub type ProductStore = Arc<InMemoryEntityStore<Product>>;

/// Per-process services shared by every request.
pub struct AppServices {
    resolver: TenantResolver,
    products: ConnectionRegistry<InMemoryOpener<Product>>,
}

impl AppServices {
    pub fn new(directory: Arc<TenantDirectory>) -> Self {
        let products = ConnectionRegistry::new(InMemoryOpener::new(), directory.defaults().clone());
        Self {
            resolver: TenantResolver::new(directory),
            products,
        }
    }

    pub fn resolver(&self) -> &TenantResolver {
        &self.resolver
    }

    pub fn directory(&self) -> &TenantDirectory {
        self.resolver.directory()
    }

    /// Product store behind the binding's connection target.
    pub fn product_store(&self, binding: &ActiveTenantBinding) -> Result<ProductStore, OpenError> {
        self.products.handle_for(Some(binding))
    }

    /// One product store per distinct configured target, for administrative reads.
    pub fn all_product_stores(&self) -> Result<Vec<ProductStore>, OpenError> {
        let mut stores: Vec<ProductStore> = Vec::new();
        for target in self.directory().migration_targets() {
            let store = self.products.handle_for_choice(&target.choice())?;
            if !stores.iter().any(|s| Arc::ptr_eq(s, &store)) {
                stores.push(store);
            }
        }
        Ok(stores)
    }
}
