//! InMemory store implementation
//!
//! Implements the domain's `MessageStore`, `SessionStore` and `RoomStore`
//! traits on top of plain collections behind one mutex. Enforces the same
//! referential rules a relational schema would: messages must point at an
//! existing room and user, user names are unique.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Message, MessageStore, Room, RoomId, RoomStore, SessionLookupError, SessionStore,
    SessionToken, StoreError, User, UserId,
};

#[derive(Default)]
struct StoreState {
    rooms: BTreeMap<RoomId, Room>,
    messages: Vec<Message>,
    /// user id -> user name
    users: HashMap<UserId, String>,
    sessions: HashMap<SessionToken, User>,
    next_room_id: i64,
    next_user_id: i64,
}

impl StoreState {
    fn allocate_room_id(&mut self) -> RoomId {
        self.next_room_id += 1;
        RoomId::new(self.next_room_id)
    }

    fn allocate_user_id(&mut self) -> UserId {
        self.next_user_id += 1;
        UserId::new(self.next_user_id)
    }
}

/// In-memory stand-in for the durable store
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
        }
    }

    /// Add a room; ids are assigned sequentially starting at 1
    pub async fn create_room(&self, name: &str, description: &str) -> Room {
        let mut state = self.state.lock().await;
        let id = state.allocate_room_id();
        let room = Room::new(id, name.to_string(), description.to_string());
        state.rooms.insert(id, room.clone());
        room
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageStore for InMemoryStore {
    async fn persist_message(&self, message: &Message) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;

        if !state.rooms.contains_key(&message.room_id()) {
            return Err(StoreError::Rejected(format!(
                "room {} does not exist",
                message.room_id()
            )));
        }
        if !state.users.contains_key(&message.user_id()) {
            return Err(StoreError::Rejected(format!(
                "user {} does not exist",
                message.user_id()
            )));
        }

        state.messages.push(message.clone());
        Ok(())
    }

    async fn room_messages(&self, room_id: RoomId) -> Result<Vec<Message>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .messages
            .iter()
            .filter(|message| message.room_id() == room_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SessionStore for InMemoryStore {
    async fn resolve_session(&self, token: &SessionToken) -> Result<User, SessionLookupError> {
        let state = self.state.lock().await;
        state
            .sessions
            .get(token)
            .cloned()
            .ok_or_else(|| SessionLookupError::NotFound(token.clone()))
    }

    async fn create_session(&self, name: &str) -> Result<User, StoreError> {
        let mut state = self.state.lock().await;

        if state.users.values().any(|existing| existing == name) {
            return Err(StoreError::Conflict(format!(
                "user name '{}' is already taken",
                name
            )));
        }

        let id = state.allocate_user_id();
        let user = User::new(id, name.to_string(), SessionToken::generate());
        state.users.insert(id, user.name.clone());
        state.sessions.insert(user.session_token.clone(), user.clone());

        Ok(user)
    }
}

#[async_trait]
impl RoomStore for InMemoryStore {
    async fn list_rooms(&self) -> Result<Vec<Room>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.rooms.values().cloned().collect())
    }

    async fn search_rooms(&self, term: &str) -> Result<Vec<Room>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .rooms
            .values()
            .filter(|room| room.matches_search(term))
            .cloned()
            .collect())
    }

    async fn get_room(&self, room_id: RoomId) -> Result<Option<Room>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.rooms.get(&room_id).cloned())
    }
}
