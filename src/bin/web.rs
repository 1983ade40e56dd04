//! Single binary web server: REST API over the movie battle engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST, PORT, STORE_DIR, INACTIVITY_HOURS.

use actix_web::{
    delete, get, post,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{TimeDelta, Utc};
use movie_battle::{
    config::ServerConfig, create_tournament, current_battle, record_battle_winner,
    tournament_progress, tournament_summary, validate_tournament_movies, BattleMatch, Candidate,
    CandidateId, FileStorage, Tournament, TournamentError, TournamentId, TournamentStore,
};
use serde::Deserialize;
use std::sync::RwLock;
use std::time::Duration;

type Store = TournamentStore<FileStorage>;

/// Stored tournaments. Store calls run on the blocking pool, one lock hold per request.
type AppState = Data<RwLock<Store>>;

/// How often abandoned tournaments are pruned.
const PRUNE_INTERVAL: Duration = Duration::from_secs(30 * 60);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(serde::Serialize)]
struct CurrentBattleResponse<'a> {
    /// Null means "wait": no battle is open.
    battle: Option<&'a BattleMatch>,
}

#[derive(Deserialize)]
struct ValidateBody {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    #[serde(default)]
    title: Option<String>,
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct RecordWinnerBody {
    candidate_id: CandidateId,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

fn engine_error(e: TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::NoCurrentBattle => HttpResponse::Conflict().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

/// Run `f` under the read lock on the blocking pool (the store does file io).
/// `None` if the lock is poisoned or the blocking task failed.
async fn blocking_read<R, F>(state: &AppState, f: F) -> Option<R>
where
    F: FnOnce(&Store) -> R + Send + 'static,
    R: Send + 'static,
{
    let state = state.clone();
    match web::block(move || state.read().map(|g| f(&g)).map_err(|_| ())).await {
        Ok(Ok(r)) => Some(r),
        _ => {
            log::error!("Store read failed (poisoned lock or blocking task error)");
            None
        }
    }
}

/// Run `f` under the write lock on the blocking pool.
async fn blocking_write<R, F>(state: &AppState, f: F) -> Option<R>
where
    F: FnOnce(&mut Store) -> R + Send + 'static,
    R: Send + 'static,
{
    let state = state.clone();
    match web::block(move || state.write().map(|mut g| f(&mut g)).map_err(|_| ())).await {
        Ok(Ok(r)) => Some(r),
        _ => {
            log::error!("Store write failed (poisoned lock or blocking task error)");
            None
        }
    }
}

/// Load a tournament and render it with `f`.
async fn with_tournament(
    state: &AppState,
    id: TournamentId,
    f: impl FnOnce(&Tournament) -> HttpResponse,
) -> HttpResponse {
    match blocking_read(state, move |s| s.load(Some(id))).await {
        Some(Some(t)) => f(&t),
        Some(None) => not_found(),
        None => lock_error(),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "movie-battle-web",
    })
}

/// Check a candidate list without creating anything.
#[post("/api/tournaments/validate")]
async fn api_validate(body: Json<ValidateBody>) -> HttpResponse {
    HttpResponse::Ok().json(validate_tournament_movies(&body.candidates))
}

/// Create a tournament from the given candidates; it becomes the current one.
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let tournament = match create_tournament(body.candidates, body.title.as_deref()) {
        Ok(t) => t,
        Err(e) => return engine_error(e),
    };
    let saved = tournament.clone();
    if blocking_write(&state, move |s| s.save(&saved)).await.is_none() {
        return lock_error();
    }
    log::info!(
        "Created tournament {} ({} candidates)",
        tournament.id,
        tournament.candidates.len()
    );
    HttpResponse::Ok().json(&tournament)
}

/// The tournament last saved (404 if none).
#[get("/api/tournaments/current")]
async fn api_current_tournament(state: AppState) -> HttpResponse {
    match blocking_read(&state, |s| s.load(None)).await {
        Some(Some(t)) => HttpResponse::Ok().json(&t),
        Some(None) => not_found(),
        None => lock_error(),
    }
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(t)).await
}

#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let id = path.id;
    match blocking_write(&state, move |s| s.delete(id)).await {
        Some(()) => HttpResponse::NoContent().finish(),
        None => lock_error(),
    }
}

/// Battle waiting for a winner, or null.
#[get("/api/tournaments/{id}/battle")]
async fn api_current_battle(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        HttpResponse::Ok().json(CurrentBattleResponse {
            battle: current_battle(t),
        })
    })
    .await
}

/// Record the winner of the current battle. Load, transition and save happen under
/// one write lock.
#[post("/api/tournaments/{id}/winner")]
async fn api_record_winner(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RecordWinnerBody>,
) -> HttpResponse {
    let id = path.id;
    let winner = body.into_inner().candidate_id;
    let outcome = blocking_write(&state, move |s| -> Result<Option<Tournament>, TournamentError> {
        let tournament = match s.load(Some(id)) {
            Some(t) => t,
            None => return Ok(None),
        };
        let next = record_battle_winner(&tournament, &winner)?;
        s.save(&next);
        Ok(Some(next))
    })
    .await;
    match outcome {
        Some(Ok(Some(next))) => HttpResponse::Ok().json(&next),
        Some(Ok(None)) => not_found(),
        Some(Err(e)) => engine_error(e),
        None => lock_error(),
    }
}

#[get("/api/tournaments/{id}/progress")]
async fn api_progress(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        HttpResponse::Ok().json(tournament_progress(t))
    })
    .await
}

/// Champion summary (404 until the tournament is completed).
#[get("/api/tournaments/{id}/summary")]
async fn api_summary(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match tournament_summary(t) {
        Some(summary) => HttpResponse::Ok().json(summary),
        None => HttpResponse::NotFound()
            .json(serde_json::json!({ "error": "Tournament is not completed" })),
    })
    .await
}

/// Completed tournaments, newest first.
#[get("/api/history")]
async fn api_history(state: AppState) -> HttpResponse {
    match blocking_read(&state, |s| s.history()).await {
        Some(history) => HttpResponse::Ok().json(history),
        None => lock_error(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let storage = FileStorage::open(&config.store_dir)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    log::info!("Storing tournaments in {}", storage.dir().display());
    let state = Data::new(RwLock::new(TournamentStore::new(storage)));

    // Background task: periodically remove unfinished tournaments nobody has touched.
    let state_cleanup = state.clone();
    let inactivity_hours = config.inactivity_hours;
    let max_idle = TimeDelta::hours(i64::from(inactivity_hours));
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(PRUNE_INTERVAL);
        loop {
            interval.tick().await;
            let removed =
                blocking_write(&state_cleanup, move |s| s.prune_inactive(Utc::now(), max_idle))
                    .await
                    .unwrap_or(0);
            if removed > 0 {
                log::info!(
                    "Cleaned up {} inactive tournament(s) (no activity for {}h)",
                    removed,
                    inactivity_hours
                );
            }
        }
    });

    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_validate)
            .service(api_create_tournament)
            .service(api_current_tournament)
            .service(api_get_tournament)
            .service(api_delete_tournament)
            .service(api_current_battle)
            .service(api_record_winner)
            .service(api_progress)
            .service(api_summary)
            .service(api_history)
    })
    .bind(bind)?
    .run()
    .await
}
