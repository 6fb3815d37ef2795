use super::Lobby;
use super::session;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;
use rail_core::ID;
use std::collections::HashMap;
use std::sync::Arc;

/// WebSocket entry: `/ws/game/{game_id}?player_id=…`.
///
/// Resolves the pair to a seat, performs the handshake, and spawns the
/// session bridge. Unknown games and unknown players get
/// `game_not_found` before any upgrade side effects matter.
pub async fn enter(
    lobby: web::Data<Arc<Lobby>>,
    path: web::Path<uuid::Uuid>,
    query: web::Query<HashMap<String, String>>,
    req: HttpRequest,
    body: web::Payload,
) -> impl Responder {
    let id = ID::from(path.into_inner());
    let player = match query.get("player_id").and_then(|p| uuid::Uuid::parse_str(p).ok()) {
        Some(player) => player,
        None => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "code": "game_not_found", "message": "missing or invalid player_id" }));
        }
    };
    let Some((handle, seat)) = lobby.resolve(id, &player).await else {
        return HttpResponse::NotFound()
            .json(serde_json::json!({ "code": "game_not_found", "message": "no such game or player" }));
    };
    match actix_ws::handle(&req, body) {
        Ok((response, ws, stream)) => {
            log::info!("[hosting] player {} entering game {} at seat {}", player, id, seat);
            match session::bridge(seat, handle.intents.clone(), ws, stream).await {
                Ok(()) => response,
                Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
            }
        }
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}

/// Liveness probe.
pub async fn health(lobby: web::Data<Arc<Lobby>>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok", "games": lobby.len().await }))
}
