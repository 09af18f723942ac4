//! UseCase layer: one usecase per protocol operation, composed by the router.

mod broadcast;
pub mod chat;
pub mod error;
pub mod flower;
pub mod login;
pub mod logout;
pub mod router;

pub use chat::ChatUseCase;
pub use error::SessionError;
pub use flower::{FlowerOutcome, SendFlowerUseCase};
pub use login::LoginUseCase;
pub use logout::LogoutUseCase;
pub use router::{MessageRouter, RouteOutcome};
