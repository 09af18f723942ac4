//! Domain layer: connection state, broadcast policy and the interfaces the
//! usecases depend on.

pub mod entity;
pub mod error;
pub mod policy;
pub mod pusher;
pub mod repository;
pub mod value_object;

pub use entity::{ConnectionAttributes, ConnectionSession};
pub use error::MessagePushError;
pub use policy::{FLOWER_COOLDOWN_MILLIS, FlowerDecision, SELF_LABEL, check_flower_cooldown};
pub use pusher::{MessagePusher, PusherChannel};
pub use repository::OnlineRegistry;
pub use value_object::ConnectionId;

#[cfg(test)]
pub use pusher::MockMessagePusher;
