use super::handle::GameHandle;
use rail_core::ID;
use rail_core::Unique;
use rail_gameplay::GameConfig;
use rail_gameplay::Seat;
use rail_gameroom::Intent;
use rail_gameroom::OpponentMemory;
use rail_gameroom::Oracle;
use rail_gameroom::Room;
use rail_gameroom::TimerConfig;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Central registry of active games.
///
/// Opens games (spawning their room loops), resolves `(game_id,
/// player_id)` pairs to seats, and reaps entries when a loop exits. Each
/// game has at most one live hand by construction: the room loop is its
/// only driver.
pub struct Lobby {
    config: GameConfig,
    timers: TimerConfig,
    stack: rail_core::Chips,
    archetypes: Vec<String>,
    oracle: Arc<dyn Oracle>,
    memory: Arc<dyn OpponentMemory>,
    games: RwLock<HashMap<ID<Room>, GameHandle>>,
}

impl Lobby {
    pub fn new(
        config: GameConfig,
        timers: TimerConfig,
        stack: rail_core::Chips,
        archetypes: Vec<String>,
        oracle: Arc<dyn Oracle>,
        memory: Arc<dyn OpponentMemory>,
    ) -> Self {
        Self {
            config,
            timers,
            stack,
            archetypes,
            oracle,
            memory,
            games: RwLock::new(HashMap::new()),
        }
    }

    /// Opens a new game: one human seat at position 0, opponents filling
    /// the rest of the table from the archetype roster. Spawns the room
    /// loop and a cleanup task; returns the game id and the human's
    /// player id.
    pub async fn open(self: &Arc<Self>) -> anyhow::Result<(ID<Room>, uuid::Uuid)> {
        let seats = (0..self.config.seats)
            .map(|pos| match pos {
                0 => Seat::new(pos, "Hero", self.stack).human(),
                _ => {
                    let style = &self.archetypes[(pos - 1) % self.archetypes.len()];
                    Seat::new(pos, &format!("{}-{}", style, pos), self.stack).archetype(style)
                }
            })
            .collect();
        let (room, intents) = Room::new(
            self.config.clone(),
            self.timers,
            seats,
            self.oracle.clone(),
            self.memory.clone(),
        );
        let id = room.id();
        let mut handle = GameHandle::new(id, intents);
        let player = handle.enroll(0);
        self.games.write().await.insert(id, handle);
        let lobby = self.clone();
        tokio::spawn(async move {
            let room = room.run().await;
            log::info!(
                "[lobby] game {} finished with {} hands recorded",
                id,
                room.recorder().len()
            );
            let _ = lobby.close(id).await;
        });
        log::debug!("[lobby] opened game {}", id);
        Ok((id, player))
    }

    /// Removes a game from the registry and signals its loop to stop.
    pub async fn close(&self, id: ID<Room>) -> anyhow::Result<()> {
        match self.games.write().await.remove(&id) {
            Some(handle) => {
                let _ = handle.intents.send(Intent::Shutdown);
                Ok(())
            }
            None => Err(anyhow::anyhow!("game not found")),
        }
    }

    /// Resolves a game and player to its handle and seat.
    pub async fn resolve(
        &self,
        id: ID<Room>,
        player: &uuid::Uuid,
    ) -> Option<(GameHandle, rail_core::Position)> {
        self.games
            .read()
            .await
            .get(&id)
            .and_then(|handle| handle.seat_of(player).map(|seat| (handle.clone(), seat)))
    }

    pub async fn len(&self) -> usize {
        self.games.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rail_gameroom::NoMemory;

    struct Passive;
    #[async_trait::async_trait]
    impl Oracle for Passive {
        async fn decide(
            &self,
            _: &str,
            _: rail_gameroom::GameView,
            context: rail_gameroom::TurnContext,
        ) -> anyhow::Result<rail_gameroom::Advice> {
            Ok(rail_gameroom::Advice {
                action: if context.call_amount == 0 { "CHECK" } else { "FOLD" }.to_string(),
                amount: None,
                reasoning: None,
            })
        }
    }

    fn lobby() -> Arc<Lobby> {
        Arc::new(Lobby::new(
            GameConfig::default(),
            TimerConfig::default(),
            200,
            vec!["TAG".to_string(), "LAG".to_string()],
            Arc::new(Passive),
            Arc::new(NoMemory),
        ))
    }

    #[tokio::test]
    async fn open_resolve_close() {
        let lobby = lobby();
        let (id, player) = lobby.open().await.unwrap();
        assert_eq!(lobby.len().await, 1);
        let (handle, seat) = lobby.resolve(id, &player).await.unwrap();
        assert_eq!(seat, 0);
        assert_eq!(handle.id, id);
        assert!(lobby.resolve(id, &uuid::Uuid::now_v7()).await.is_none());
        lobby.close(id).await.unwrap();
        assert_eq!(lobby.len().await, 0);
        assert!(lobby.close(id).await.is_err());
    }

    #[tokio::test]
    async fn loop_exit_reaps_the_entry() {
        let lobby = lobby();
        let (id, _) = lobby.open().await.unwrap();
        // Shutdown before any session attaches: the loop exits and the
        // cleanup task removes the registry entry.
        let (handle, _) = {
            let games = lobby.games.read().await;
            (games.get(&id).unwrap().clone(), ())
        };
        let _ = handle.intents.send(Intent::Shutdown);
        for _ in 0..50 {
            if lobby.len().await == 0 {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        panic!("game was not reaped");
    }
}
