//! The dispatch entry points.

use dispatch_args::{Args, Resolver};
use tracing::{debug, trace};

use crate::config::GatewayConfig;
use crate::error::{DispatchError, DispatchResult};
use crate::traits::{Dispatchable, Envelope, EventChannel, Route};

/// Constructs dispatchable instances from call arguments and submits them.
///
/// Guard → resolve → construct → submit. Each call is independent; the
/// gateway keeps no per-call state, so a shared `&Gateway` is safe across
/// threads whenever the channel is.
pub struct Gateway<C: EventChannel> {
    channel: C,
    resolver: Resolver,
}

impl<C: EventChannel> Gateway<C> {
    pub fn new(channel: C) -> Self {
        Self::with_config(channel, GatewayConfig::default())
    }

    pub fn with_config(channel: C, config: GatewayConfig) -> Self {
        Self {
            channel,
            resolver: Resolver::new(config.argument_order),
        }
    }

    /// Construct `E` from `args` and submit it.
    pub fn dispatch<E: Dispatchable>(&self, args: Args) -> DispatchResult {
        self.submit::<E>(args, Route::Normal)
    }

    /// Like [`dispatch`](Self::dispatch), but only when `condition` is true.
    /// Otherwise nothing is resolved, constructed, or submitted.
    pub fn dispatch_if<E: Dispatchable>(&self, condition: bool, args: Args) -> DispatchResult {
        if !condition {
            trace!(event_type = E::event_type(), "dispatch_if guard false, skipping");
            return Ok(());
        }
        self.submit::<E>(args, Route::Normal)
    }

    /// Like [`dispatch`](Self::dispatch), but only when `condition` is false.
    pub fn dispatch_unless<E: Dispatchable>(&self, condition: bool, args: Args) -> DispatchResult {
        if condition {
            trace!(event_type = E::event_type(), "dispatch_unless guard true, skipping");
            return Ok(());
        }
        self.submit::<E>(args, Route::Normal)
    }

    /// Construct `E` and submit it tagged for broadcast.
    pub fn broadcast<E: Dispatchable>(&self, args: Args) -> DispatchResult {
        self.submit::<E>(args, Route::Broadcast)
    }

    /// The channel submissions go to.
    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn into_channel(self) -> C {
        self.channel
    }

    fn submit<E: Dispatchable>(&self, args: Args, route: Route) -> DispatchResult {
        let event_type = E::event_type();

        let binding = self.resolver.resolve(E::signature(), args)?;
        let event = E::from_binding(binding)
            .map_err(|source| DispatchError::Construction { event_type, source })?;

        debug!(event_type, %route, "submitting event");
        self.channel
            .submit(Envelope::new(event, route))
            .map_err(|source| DispatchError::Channel { event_type, source })
    }
}

/// Dispatch entry points on the dispatchable type itself:
/// `Obj::dispatch(&gateway, args![...])`.
pub trait DispatchExt: Dispatchable {
    fn dispatch<C: EventChannel>(gateway: &Gateway<C>, args: Args) -> DispatchResult {
        gateway.dispatch::<Self>(args)
    }

    fn dispatch_if<C: EventChannel>(
        gateway: &Gateway<C>,
        condition: bool,
        args: Args,
    ) -> DispatchResult {
        gateway.dispatch_if::<Self>(condition, args)
    }

    fn dispatch_unless<C: EventChannel>(
        gateway: &Gateway<C>,
        condition: bool,
        args: Args,
    ) -> DispatchResult {
        gateway.dispatch_unless::<Self>(condition, args)
    }

    fn broadcast<C: EventChannel>(gateway: &Gateway<C>, args: Args) -> DispatchResult {
        gateway.broadcast::<Self>(args)
    }
}

impl<E: Dispatchable> DispatchExt for E {}
