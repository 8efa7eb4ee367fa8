//! Connection hand-off to the external persistence library.
//!
//! The core decides *which* store a unit of work talks to (a
//! [`ProviderChoice`]); an [`ConnectionOpener`] turns that choice into a
//! handle. [`ConnectionRegistry`] keeps one handle per distinct
//! provider/target pair, so tenants that share the default target share a
//! store and tenants with their own target get their own.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;
use tracing::info;

use tenantscope_core::{
    select_provider, ActiveTenantBinding, DefaultConfig, Entity, ProviderChoice, ProviderKind,
    TenancyError,
};

use crate::store::InMemoryEntityStore;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OpenError {
    #[error("provider {0} is not supported by this opener")]
    Unsupported(ProviderKind),

    #[error("unable to open connection: {0}")]
    Connect(String),

    #[error(transparent)]
    Tenancy(#[from] TenancyError),
}

/// Opens a handle for a provider choice.
pub trait ConnectionOpener: Send + Sync {
    type Handle: Clone + Send + Sync;

    fn open(&self, choice: &ProviderChoice) -> Result<Self::Handle, OpenError>;
}

/// Dev/test opener: every distinct target gets its own in-memory store.
#[derive(Debug)]
pub struct InMemoryOpener<E> {
    _entity: std::marker::PhantomData<fn() -> E>,
}

impl<E> InMemoryOpener<E> {
    pub fn new() -> Self {
        Self {
            _entity: std::marker::PhantomData,
        }
    }
}

impl<E> Default for InMemoryOpener<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> ConnectionOpener for InMemoryOpener<E>
where
    E: Entity + Send + Sync + 'static,
    E::Id: Send + Sync,
{
    type Handle = Arc<InMemoryEntityStore<E>>;

    fn open(&self, _choice: &ProviderChoice) -> Result<Self::Handle, OpenError> {
        Ok(Arc::new(InMemoryEntityStore::new()))
    }
}

/// Caches one opened handle per `(provider, connection target)`.
pub struct ConnectionRegistry<O: ConnectionOpener> {
    opener: O,
    defaults: DefaultConfig,
    handles: RwLock<HashMap<(ProviderKind, String), O::Handle>>,
}

impl<O: ConnectionOpener> ConnectionRegistry<O> {
    pub fn new(opener: O, defaults: DefaultConfig) -> Self {
        Self {
            opener,
            defaults,
            handles: RwLock::new(HashMap::new()),
        }
    }

    /// Handle for the bound tenant, or for the defaults when no tenant is bound.
    pub fn handle_for(&self, binding: Option<&ActiveTenantBinding>) -> Result<O::Handle, OpenError> {
        let choice = select_provider(binding, &self.defaults)?;
        self.handle_for_choice(&choice)
    }

    pub fn handle_for_choice(&self, choice: &ProviderChoice) -> Result<O::Handle, OpenError> {
        let key = (choice.provider, choice.connection_target.clone());

        if let Some(handle) = self
            .handles
            .read()
            .map_err(|_| OpenError::Connect("registry lock poisoned".into()))?
            .get(&key)
        {
            return Ok(handle.clone());
        }

        let mut handles = self
            .handles
            .write()
            .map_err(|_| OpenError::Connect("registry lock poisoned".into()))?;
        if let Some(handle) = handles.get(&key) {
            return Ok(handle.clone());
        }

        let handle = self.opener.open(choice)?;
        handles.insert(key, handle.clone());
        info!(provider = %choice.provider, "opened connection handle");
        Ok(handle)
    }

    pub fn open_handles(&self) -> usize {
        self.handles.read().map(|h| h.len()).unwrap_or(0)
    }
}

#[cfg(feature = "postgres")]
pub use postgres::PgConnectionOpener;

#[cfg(feature = "postgres")]
mod postgres {
    use sqlx::postgres::{PgPool, PgPoolOptions};

    use super::{ConnectionOpener, OpenError};
    use tenantscope_core::{ProviderChoice, ProviderKind};

    /// Opens lazily connecting Postgres pools. Must be used inside a Tokio runtime.
    #[derive(Debug, Clone)]
    pub struct PgConnectionOpener {
        max_connections: u32,
    }

    impl PgConnectionOpener {
        pub fn new(max_connections: u32) -> Self {
            Self { max_connections }
        }
    }

    impl ConnectionOpener for PgConnectionOpener {
        type Handle = PgPool;

        fn open(&self, choice: &ProviderChoice) -> Result<PgPool, OpenError> {
            match choice.provider {
                ProviderKind::Postgres => PgPoolOptions::new()
                    .max_connections(self.max_connections)
                    .connect_lazy(&choice.connection_target)
                    .map_err(|e| OpenError::Connect(e.to_string())),
                other => Err(OpenError::Unsupported(other)),
            }
        }
    }

}
