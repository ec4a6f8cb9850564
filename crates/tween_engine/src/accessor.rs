//! Attribute accessors and tween targets
//!
//! A tween never looks inside its target. It reads and writes a small vector
//! of floats through an accessor resolved from the [`AccessorRegistry`] when
//! the tween is built. Resolution order:
//!
//! 1. an accessor registered for the exact target type,
//! 2. the target's own [`Tweenable`] implementation,
//! 3. the nearest ancestor with a registered accessor, following links
//!    declared with [`AccessorRegistry::register_parent`].

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::config::TweenConfig;
use crate::error::{Result, TweenError};
use crate::primitives::{MutableFloat, MutableInteger};

/// Reads and writes the tweened attributes of a target type
pub trait TweenAccessor<T> {
    /// Write the attributes selected by `tween_type` into `values`, return how many were written
    fn get_values(&self, target: &T, tween_type: i32, values: &mut [f64]) -> usize;

    /// Apply `values` to the attributes selected by `tween_type`
    fn set_values(&self, target: &mut T, tween_type: i32, values: &[f64]);
}

/// Targets that know how to read and write their own attributes
pub trait Tweenable {
    fn get_values(&self, tween_type: i32, values: &mut [f64]) -> usize;
    fn set_values(&mut self, tween_type: i32, values: &[f64]);
}

/// Type-erased accessor stored in the registry
trait DynAccessor {
    fn get_values(&self, target: &dyn Any, tween_type: i32, values: &mut [f64]) -> usize;
    fn set_values(&self, target: &mut dyn Any, tween_type: i32, values: &[f64]);
}

struct Registered<T, A> {
    accessor: A,
    _marker: PhantomData<fn(&mut T)>,
}

impl<T: 'static, A: TweenAccessor<T>> DynAccessor for Registered<T, A> {
    fn get_values(&self, target: &dyn Any, tween_type: i32, values: &mut [f64]) -> usize {
        match target.downcast_ref::<T>() {
            Some(target) => self.accessor.get_values(target, tween_type, values),
            None => 0,
        }
    }

    fn set_values(&self, target: &mut dyn Any, tween_type: i32, values: &[f64]) {
        if let Some(target) = target.downcast_mut::<T>() {
            self.accessor.set_values(target, tween_type, values);
        }
    }
}

struct SelfAccess<T>(PhantomData<fn(&mut T)>);

impl<T: Tweenable + 'static> DynAccessor for SelfAccess<T> {
    fn get_values(&self, target: &dyn Any, tween_type: i32, values: &mut [f64]) -> usize {
        match target.downcast_ref::<T>() {
            Some(target) => target.get_values(tween_type, values),
            None => 0,
        }
    }

    fn set_values(&self, target: &mut dyn Any, tween_type: i32, values: &[f64]) {
        if let Some(target) = target.downcast_mut::<T>() {
            target.set_values(tween_type, values);
        }
    }
}

/// Projection from a child type to its registered parent type
#[derive(Clone, Copy)]
struct ParentLink {
    parent: TypeId,
    upcast_ref: for<'a> fn(&'a dyn Any) -> Option<&'a dyn Any>,
    upcast_mut: for<'a> fn(&'a mut dyn Any) -> Option<&'a mut dyn Any>,
}

fn upcast_ref<C, P>(child: &dyn Any) -> Option<&dyn Any>
where
    C: AsRef<P> + 'static,
    P: 'static,
{
    child
        .downcast_ref::<C>()
        .map(|child| AsRef::<P>::as_ref(child) as &dyn Any)
}

fn upcast_mut<C, P>(child: &mut dyn Any) -> Option<&mut dyn Any>
where
    C: AsMut<P> + 'static,
    P: 'static,
{
    child
        .downcast_mut::<C>()
        .map(|child| AsMut::<P>::as_mut(child) as &mut dyn Any)
}

// ============================================================================
// Target
// ============================================================================

/// Shared handle to an object being tweened
///
/// Two targets are equal when they point to the same object.
#[derive(Clone)]
pub struct Target {
    cell: Rc<RefCell<dyn Any>>,
    type_id: TypeId,
    type_name: &'static str,
    own: Option<Rc<dyn DynAccessor>>,
}

impl Target {
    /// Wrap a shared object. Its accessor must be registered.
    pub fn new<T: 'static>(object: Rc<RefCell<T>>) -> Self {
        Self {
            cell: object,
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            own: None,
        }
    }

    /// Wrap a shared object that accesses its own attributes
    pub fn tweenable<T: Tweenable + 'static>(object: Rc<RefCell<T>>) -> Self {
        Self {
            own: Some(Rc::new(SelfAccess::<T>(PhantomData))),
            ..Self::new(object)
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether both handles point to the same object
    pub fn same_object(&self, other: &Target) -> bool {
        Rc::as_ptr(&self.cell) as *const () == Rc::as_ptr(&other.cell) as *const ()
    }
}

impl<T: 'static> From<Rc<RefCell<T>>> for Target {
    fn from(object: Rc<RefCell<T>>) -> Self {
        Target::new(object)
    }
}

impl PartialEq for Target {
    fn eq(&self, other: &Self) -> bool {
        self.same_object(other)
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("type_name", &self.type_name)
            .field("ptr", &(Rc::as_ptr(&self.cell) as *const ()))
            .finish()
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Accessor lookup table, filled at setup and read-only during playback
pub struct AccessorRegistry {
    accessors: FxHashMap<TypeId, Rc<dyn DynAccessor>>,
    parents: FxHashMap<TypeId, ParentLink>,
    config: TweenConfig,
}

impl AccessorRegistry {
    pub fn new() -> Self {
        Self::with_config(TweenConfig::default())
    }

    /// Empty registry apart from the mutable primitives, which access themselves
    pub fn with_config(config: TweenConfig) -> Self {
        let mut registry = Self {
            accessors: FxHashMap::default(),
            parents: FxHashMap::default(),
            config,
        };
        registry.register_tweenable::<MutableFloat>();
        registry.register_tweenable::<MutableInteger>();
        registry
    }

    pub fn config(&self) -> &TweenConfig {
        &self.config
    }

    /// Register the accessor used for targets of type `T`, replacing any previous one
    pub fn register<T, A>(&mut self, accessor: A)
    where
        T: 'static,
        A: TweenAccessor<T> + 'static,
    {
        tracing::debug!(target_type = std::any::type_name::<T>(), "accessor registered");
        self.accessors.insert(
            TypeId::of::<T>(),
            Rc::new(Registered {
                accessor,
                _marker: PhantomData,
            }),
        );
    }

    /// Let plain `T` targets use their own [`Tweenable`] implementation
    pub fn register_tweenable<T: Tweenable + 'static>(&mut self) {
        tracing::debug!(target_type = std::any::type_name::<T>(), "tweenable registered");
        self.accessors
            .insert(TypeId::of::<T>(), Rc::new(SelfAccess::<T>(PhantomData)));
    }

    /// Declare `P` as the parent of `C`, so `C` targets fall back to `P`'s accessor
    pub fn register_parent<C, P>(&mut self)
    where
        C: AsRef<P> + AsMut<P> + 'static,
        P: 'static,
    {
        self.parents.insert(
            TypeId::of::<C>(),
            ParentLink {
                parent: TypeId::of::<P>(),
                upcast_ref: upcast_ref::<C, P>,
                upcast_mut: upcast_mut::<C, P>,
            },
        );
    }

    /// Whether an accessor is registered for exactly `T`
    pub fn contains<T: 'static>(&self) -> bool {
        self.accessors.contains_key(&TypeId::of::<T>())
    }

    pub(crate) fn resolve(&self, target: &Target) -> Result<BoundAccessor> {
        if let Some(accessor) = self.accessors.get(&target.type_id) {
            return Ok(BoundAccessor::direct(accessor.clone()));
        }
        if let Some(own) = &target.own {
            return Ok(BoundAccessor::direct(own.clone()));
        }

        let mut path = SmallVec::new();
        let mut type_id = target.type_id;
        while let Some(link) = self.parents.get(&type_id) {
            // A cycle in parent links can't resolve to anything
            if path.len() > self.parents.len() {
                break;
            }
            path.push(*link);
            type_id = link.parent;
            if let Some(accessor) = self.accessors.get(&type_id) {
                return Ok(BoundAccessor {
                    path,
                    accessor: accessor.clone(),
                });
            }
        }

        Err(TweenError::NoAccessor(target.type_name))
    }
}

impl Default for AccessorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Accessor resolved for one target, with the upcasts needed to reach the registered type
#[derive(Clone)]
pub(crate) struct BoundAccessor {
    path: SmallVec<[ParentLink; 2]>,
    accessor: Rc<dyn DynAccessor>,
}

impl BoundAccessor {
    fn direct(accessor: Rc<dyn DynAccessor>) -> Self {
        Self {
            path: SmallVec::new(),
            accessor,
        }
    }

    pub(crate) fn get_values(&self, target: &Target, tween_type: i32, values: &mut [f64]) -> usize {
        let object = target.cell.borrow();
        let mut object: &dyn Any = &*object;
        for link in &self.path {
            object = match (link.upcast_ref)(object) {
                Some(parent) => parent,
                None => return 0,
            };
        }
        self.accessor.get_values(object, tween_type, values)
    }

    pub(crate) fn set_values(&self, target: &Target, tween_type: i32, values: &[f64]) {
        let mut object = target.cell.borrow_mut();
        let mut object: &mut dyn Any = &mut *object;
        for link in &self.path {
            object = match (link.upcast_mut)(object) {
                Some(parent) => parent,
                None => return,
            };
        }
        self.accessor.set_values(object, tween_type, values);
    }
}
