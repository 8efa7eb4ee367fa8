use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::RwLock;

use tenantscope_core::Entity;

use super::r#trait::{EntityStore, StoreError};

#[derive(Debug)]
struct Row<E> {
    seq: u64,
    entity: E,
}

#[derive(Debug)]
struct Rows<I, E> {
    next_seq: u64,
    by_id: HashMap<I, Row<E>>,
}

/// In-memory entity store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug)]
pub struct InMemoryEntityStore<E: Entity> {
    inner: RwLock<Rows<E::Id, E>>,
}

impl<E: Entity> InMemoryEntityStore<E> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Rows {
                next_seq: 0,
                by_id: HashMap::new(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|rows| rows.by_id.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: Entity> Default for InMemoryEntityStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

impl<E> EntityStore<E> for InMemoryEntityStore<E>
where
    E: Entity + Clone + Send + Sync + 'static,
    E::Id: Send + Sync,
{
    fn insert_batch(&self, entities: Vec<E>) -> Result<(), StoreError> {
        let mut rows = self.inner.write().map_err(|_| poisoned())?;

        // Validate the whole batch before touching the map.
        for (idx, e) in entities.iter().enumerate() {
            let dup_in_batch = entities[..idx].iter().any(|other| other.id() == e.id());
            if dup_in_batch || rows.by_id.contains_key(e.id()) {
                return Err(StoreError::Duplicate(format!("{:?}", e.id())));
            }
        }

        for entity in entities {
            let seq = rows.next_seq;
            rows.next_seq += 1;
            rows.by_id.insert(entity.id().clone(), Row { seq, entity });
        }
        Ok(())
    }

    fn get(&self, id: &E::Id) -> Result<Option<E>, StoreError> {
        let rows = self.inner.read().map_err(|_| poisoned())?;
        Ok(rows.by_id.get(id).map(|row| row.entity.clone()))
    }

    fn replace(&self, entity: E) -> Result<(), StoreError> {
        let mut rows = self.inner.write().map_err(|_| poisoned())?;
        match rows.by_id.entry(entity.id().clone()) {
            Entry::Occupied(mut slot) => {
                slot.get_mut().entity = entity;
                Ok(())
            }
            Entry::Vacant(v) => Err(StoreError::NotFound(format!("{:?}", v.key()))),
        }
    }

    fn remove(&self, id: &E::Id) -> Result<Option<E>, StoreError> {
        let mut rows = self.inner.write().map_err(|_| poisoned())?;
        Ok(rows.by_id.remove(id).map(|row| row.entity))
    }

    fn scan(&self, keep: &dyn Fn(&E) -> bool) -> Result<Vec<E>, StoreError> {
        let rows = self.inner.read().map_err(|_| poisoned())?;
        let mut hits: Vec<&Row<E>> = rows.by_id.values().filter(|row| keep(&row.entity)).collect();
        hits.sort_by_key(|row| row.seq);
        Ok(hits.into_iter().map(|row| row.entity.clone()).collect())
    }
}
