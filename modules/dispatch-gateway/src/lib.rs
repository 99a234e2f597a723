//! Dispatch gateway.
//!
//! Turns call arguments into a constructed value object and hands it to an
//! event channel: guard → resolve → construct → submit. Four entry points
//! share that path and differ only in the guard and the route tag.
//!
//! Consumers make a type dispatchable by implementing `Dispatchable` (a static
//! signature plus a constructor from a `Binding`) and supply the downstream
//! delivery by implementing `EventChannel`.

pub mod channel;
pub mod config;
pub mod error;
pub mod gateway;
pub mod traits;

pub use channel::{QueuedChannel, Recorded, RecordingChannel};
pub use config::GatewayConfig;
pub use error::{DispatchError, DispatchResult};
pub use gateway::{DispatchExt, Gateway};
pub use traits::{Dispatchable, Envelope, EventChannel, Route};

pub use dispatch_args::{
    args, resolve, Arg, ArgumentOrder, Args, Binding, BindingError, Param, Signature, Value,
};
