use rail_core::HEARTBEAT_SECS;
use rail_core::Position;
use rail_core::RATE_LIMIT_PER_MIN;
use rail_core::SESSION_IDLE_SECS;
use rail_gameroom::Intent;
use rail_gameroom::Table;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::Instant;

/// Sliding-window inbound message limiter: at most `limit` frames per
/// rolling minute. Violations close the session.
#[derive(Debug)]
pub struct RateBudget {
    limit: usize,
    window: Duration,
    arrivals: VecDeque<Instant>,
}

impl RateBudget {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            window: Duration::from_secs(60),
            arrivals: VecDeque::with_capacity(limit),
        }
    }
    pub fn allow(&mut self, now: Instant) -> bool {
        while self
            .arrivals
            .front()
            .is_some_and(|t| now.duration_since(*t) > self.window)
        {
            self.arrivals.pop_front();
        }
        if self.arrivals.len() < self.limit {
            self.arrivals.push_back(now);
            true
        } else {
            false
        }
    }
}

impl Default for RateBudget {
    fn default() -> Self {
        Self::new(RATE_LIMIT_PER_MIN)
    }
}

/// Bridges one WebSocket connection to a game's intent queue.
///
/// Inbound text frames become [`Intent::Frame`]s after the rate check;
/// outbound frames drain from the seat's bounded channel. The server
/// pings on an interval and closes sessions silent past the idle bound.
/// When a newer session displaces this one, the outbound channel closes
/// and the loop ends; the seat keeps its game state throughout.
pub async fn bridge(
    seat: Position,
    intents: UnboundedSender<Intent>,
    mut session: actix_ws::Session,
    mut stream: actix_ws::MessageStream,
) -> anyhow::Result<()> {
    use futures::StreamExt;
    let (tx, mut rx) = tokio::sync::mpsc::channel::<String>(Table::buffer());
    intents
        .send(Intent::Attach { seat, sender: tx })
        .map_err(|_| anyhow::anyhow!("game loop is gone"))?;
    actix_web::rt::spawn(async move {
        let mut budget = RateBudget::default();
        let mut last_seen = Instant::now();
        let mut heartbeat = tokio::time::interval(Duration::from_secs(HEARTBEAT_SECS));
        let idle = Duration::from_secs(SESSION_IDLE_SECS);
        'sesh: loop {
            tokio::select! {
                biased;
                frame = rx.recv() => match frame {
                    Some(json) => if session.text(json).await.is_err() { break 'sesh },
                    None => break 'sesh,
                },
                msg = stream.next() => match msg {
                    Some(Ok(actix_ws::Message::Text(text))) => {
                        last_seen = Instant::now();
                        if !budget.allow(last_seen) {
                            log::warn!("[session P{}] rate limited, closing", seat);
                            let _ = session.text(rate_limited()).await;
                            break 'sesh;
                        }
                        if intents.send(Intent::Frame { seat, text: text.to_string() }).is_err() {
                            break 'sesh;
                        }
                    }
                    Some(Ok(actix_ws::Message::Pong(_))) => last_seen = Instant::now(),
                    Some(Ok(actix_ws::Message::Ping(bytes))) => {
                        last_seen = Instant::now();
                        if session.pong(&bytes).await.is_err() { break 'sesh }
                    }
                    Some(Ok(actix_ws::Message::Close(_))) => break 'sesh,
                    Some(Err(_)) => break 'sesh,
                    None => break 'sesh,
                    _ => continue 'sesh,
                },
                _ = heartbeat.tick() => {
                    if last_seen.elapsed() > idle {
                        log::info!("[session P{}] idle past {}s, closing", seat, idle.as_secs());
                        break 'sesh;
                    }
                    if session.ping(b"").await.is_err() { break 'sesh }
                }
            }
        }
        log::debug!("[session P{}] disconnected", seat);
    });
    Ok(())
}

fn rate_limited() -> String {
    serde_json::json!({
        "type": "error",
        "code": "rate_limited",
        "message": "inbound message rate exceeded",
    })
    .to_string()
}
