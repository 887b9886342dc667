//! UseCase layer: orchestrates the domain and infrastructure for each
//! operation the UI layer exposes.

mod authenticate;
mod connect_participant;
mod create_session;
mod disconnect_participant;
pub mod error;
mod get_room_detail;
mod get_rooms;
mod send_message;

pub use authenticate::AuthenticateUseCase;
pub use connect_participant::ConnectParticipantUseCase;
pub use create_session::CreateSessionUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{ConnectError, CreateSessionError, GetRoomDetailError, SendMessageError};
pub use get_room_detail::{GetRoomDetailUseCase, Participant, RoomDetail};
pub use get_rooms::GetRoomsUseCase;
pub use send_message::SendMessageUseCase;
