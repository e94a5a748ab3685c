use alloc::format;
use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;
use std::sync::{Mutex, OnceLock, PoisonError, RwLock};

use log::debug;

use crate::cache::ShapeRegistry;
use crate::config::PlannerConfig;
use crate::error::{ConfigError, PlanError};
use crate::hash::TypeIdMap;
use crate::info::{Introspect, TypeRef};
use crate::plan::{SerializationPlan, plan_type};

// -----------------------------------------------------------------------------
// PlanSlot

// Per-type slot. `build` serializes builders of this type only; readers of a
// published plan never touch it.
#[derive(Default)]
struct PlanSlot {
    plan: OnceLock<Arc<SerializationPlan>>,
    build: Mutex<()>,
}

// -----------------------------------------------------------------------------
// PlanCache

/// A thread-safe cache of [`SerializationPlan`]s keyed by [`TypeId`].
///
/// - A published plan is returned to every caller as the same
///   [`Arc`] until the type is invalidated.
/// - At most one thread builds the plan of a given type at a time; other
///   requesters for that type wait and then observe the published plan.
///   Builds of different types proceed in parallel.
/// - A failed build publishes nothing, so the next request retries.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use bp_introspect::PlanCache;
/// use bp_introspect::derive::Bean;
///
/// #[derive(Bean)]
/// struct Point {
///     pub x: i32,
///     pub y: i32,
/// }
///
/// let cache = PlanCache::default();
/// let plan = cache.get::<Point>().unwrap();
/// assert_eq!(plan.names().collect::<Vec<_>>(), ["x", "y"]);
/// assert!(Arc::ptr_eq(&plan, &cache.get::<Point>().unwrap()));
///
/// cache.invalidate(core::any::TypeId::of::<Point>());
/// assert!(!Arc::ptr_eq(&plan, &cache.get::<Point>().unwrap()));
/// ```
pub struct PlanCache {
    config: PlannerConfig,
    registry: ShapeRegistry,
    slots: RwLock<TypeIdMap<Arc<PlanSlot>>>,
}

impl Default for PlanCache {
    /// A cache with the default [`PlannerConfig`].
    #[inline]
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

impl PlanCache {
    /// Creates an empty cache whose registry holds all automatically
    /// registered shapes.
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            registry: ShapeRegistry::new(),
            slots: RwLock::new(TypeIdMap::new()),
        }
    }

    #[inline]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// The registry used by [`get_by_id`](Self::get_by_id).
    #[inline]
    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    /// Returns the plan of `T`, building it on first request.
    ///
    /// `T` is also added to the [`registry`](Self::registry).
    pub fn get<T: Introspect + ?Sized>(&self) -> Result<Arc<SerializationPlan>, PlanError> {
        let ty = TypeRef::of::<T>();
        self.registry.register_ref(ty);
        self.get_or_build(ty)
    }

    /// Returns the plan of the type with the given [`TypeId`].
    ///
    /// Fails with [`PlanError::UnreflectableType`] if the type is not in
    /// the [`registry`](Self::registry).
    pub fn get_by_id(&self, id: TypeId) -> Result<Arc<SerializationPlan>, PlanError> {
        let ty = self
            .registry
            .get(id)
            .ok_or_else(|| PlanError::UnreflectableType {
                type_name: format!("{id:?}"),
            })?;
        self.get_or_build(ty)
    }

    fn slot(&self, id: TypeId) -> Arc<PlanSlot> {
        if let Some(slot) = self
            .slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
        {
            return slot.clone();
        }

        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(id, Default::default)
            .clone()
    }

    fn get_or_build(&self, ty: TypeRef) -> Result<Arc<SerializationPlan>, PlanError> {
        let slot = self.slot(ty.id());
        if let Some(plan) = slot.plan.get() {
            return Ok(plan.clone());
        }

        let _guard = slot.build.lock().unwrap_or_else(PoisonError::into_inner);
        // Another builder may have published while we waited.
        if let Some(plan) = slot.plan.get() {
            return Ok(plan.clone());
        }

        let plan = Arc::new(plan_type(ty, &self.config)?);
        Ok(slot.plan.get_or_init(|| plan).clone())
    }

    /// Drops the cached plan of `id`, if any.
    ///
    /// The next request builds a new plan; holders of the old one keep it.
    /// Returns `true` if a slot was removed.
    pub fn invalidate(&self, id: TypeId) -> bool {
        let removed = self
            .slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some();
        if removed {
            debug!("invalidated serialization plan for {id:?}");
        }
        removed
    }

    /// Drops every cached plan.
    pub fn invalidate_all(&self) {
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        debug!("invalidated {} serialization plans", slots.len());
        slots.clear();
    }

    /// Number of published plans.
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|slot| slot.plan.get().is_some())
            .count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for PlanCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanCache")
            .field("config", &self.config)
            .field("plans", &self.len())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Global

static GLOBAL: OnceLock<PlanCache> = OnceLock::new();

impl PlanCache {
    /// The process-wide cache, created with the default configuration on
    /// first use unless [`init_global`](Self::init_global) ran before.
    pub fn global() -> &'static PlanCache {
        GLOBAL.get_or_init(PlanCache::default)
    }

    /// Creates the process-wide cache with `config`.
    ///
    /// Fails with [`ConfigError::AlreadyInitialized`] if the global cache
    /// already exists.
    pub fn init_global(config: PlannerConfig) -> Result<&'static PlanCache, ConfigError> {
        let mut config = Some(config);
        let cache = GLOBAL.get_or_init(|| PlanCache::new(config.take().unwrap_or_default()));
        match config {
            None => Ok(cache),
            Some(_) => Err(ConfigError::AlreadyInitialized),
        }
    }
}

/// Returns the plan of `T` from the [global](PlanCache::global) cache.
#[inline]
pub fn plan_of<T: Introspect + ?Sized>() -> Result<Arc<SerializationPlan>, PlanError> {
    PlanCache::global().get::<T>()
}

/// Returns the plan of the type with the given [`TypeId`] from the
/// [global](PlanCache::global) cache.
#[inline]
pub fn plan_by_id(id: TypeId) -> Result<Arc<SerializationPlan>, PlanError> {
    PlanCache::global().get_by_id(id)
}
