//! Core traits for the dispatch gateway.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use dispatch_args::{Binding, Signature};

/// A value object that can be built from resolved arguments and submitted.
///
/// Implemented per concrete type; the type carries no shared state.
pub trait Dispatchable: Send + Sync + Sized + 'static {
    /// Declared constructor parameters, read once per type.
    fn signature() -> &'static Signature;

    /// Build an instance from a complete binding. Any error here is the
    /// type's own invariant rejecting the values.
    fn from_binding(binding: Binding) -> Result<Self>;

    /// Name reported to the channel and in logs.
    fn event_type() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// How a submission should be routed by the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Normal,
    Broadcast,
}

impl Route {
    pub fn is_broadcast(self) -> bool {
        matches!(self, Route::Broadcast)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Normal => f.write_str("normal"),
            Route::Broadcast => f.write_str("broadcast"),
        }
    }
}

/// One constructed instance on its way to the channel.
///
/// The instance is shared, not copied: whoever holds the envelope can inspect
/// it by downcasting to the concrete type.
#[derive(Clone)]
pub struct Envelope {
    event_type: &'static str,
    route: Route,
    event: Arc<dyn Any + Send + Sync>,
}

impl Envelope {
    pub fn new<E: Dispatchable>(event: E, route: Route) -> Self {
        Self {
            event_type: E::event_type(),
            route,
            event: Arc::new(event),
        }
    }

    pub fn event_type(&self) -> &'static str {
        self.event_type
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn is_broadcast(&self) -> bool {
        self.route.is_broadcast()
    }

    /// True if the envelope carries an `E`.
    pub fn is<E: Dispatchable>(&self) -> bool {
        self.event.is::<E>()
    }

    pub fn downcast_ref<E: Dispatchable>(&self) -> Option<&E> {
        self.event.downcast_ref::<E>()
    }

    /// Shared handle to the instance, if it is an `E`.
    pub fn downcast<E: Dispatchable>(&self) -> Option<Arc<E>> {
        Arc::clone(&self.event).downcast::<E>().ok()
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("event_type", &self.event_type)
            .field("route", &self.route)
            .finish_non_exhaustive()
    }
}

/// Receives constructed instances and owns everything downstream of them:
/// listener lookup, filtering, fan-out, queueing.
///
/// Also implemented for `Arc<C>` and `&C` so a channel can be shared with
/// test assertions.
pub trait EventChannel: Send + Sync {
    fn submit(&self, envelope: Envelope) -> Result<()>;
}

impl<C: EventChannel + ?Sized> EventChannel for Arc<C> {
    fn submit(&self, envelope: Envelope) -> Result<()> {
        (**self).submit(envelope)
    }
}

impl<C: EventChannel + ?Sized> EventChannel for &C {
    fn submit(&self, envelope: Envelope) -> Result<()> {
        (**self).submit(envelope)
    }
}
