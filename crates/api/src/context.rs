use tenantscope_core::{ActiveTenantBinding, TenantId};

/// Tenant context for a request.
///
/// Built by the tenant middleware from the `tenant` header and present for
/// all tenant-scoped routes. Owned by the request; never shared across requests.
#[derive(Debug, Clone)]
pub struct TenantContext {
    binding: ActiveTenantBinding,
}

impl TenantContext {
    pub fn new(binding: ActiveTenantBinding) -> Self {
        Self { binding }
    }

    pub fn binding(&self) -> &ActiveTenantBinding {
        &self.binding
    }

    pub fn tenant_id(&self) -> &TenantId {
        self.binding.tenant_id()
    }
}

/// Marker inserted once an administrative bearer token was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminContext;
