//! UseCase: list or search rooms.

use std::sync::Arc;

use crate::domain::{Room, RoomStore, StoreError};

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    room_store: Arc<dyn RoomStore>,
}

impl GetRoomsUseCase {
    pub fn new(room_store: Arc<dyn RoomStore>) -> Self {
        Self { room_store }
    }

    /// All rooms, or the rooms matching `search` when a non-blank term is given
    pub async fn execute(&self, search: Option<&str>) -> Result<Vec<Room>, StoreError> {
        match search.map(str::trim).filter(|term| !term.is_empty()) {
            Some(term) => self.room_store.search_rooms(term).await,
            None => self.room_store.list_rooms().await,
        }
    }
}
