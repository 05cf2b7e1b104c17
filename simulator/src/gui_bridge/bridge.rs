use crate::gui_bridge::model::{MapModel, MapStyle};
use crate::workflow::dataset::Roster;
use anyhow::Context;
use lmpcore::matching::{CenterMode, MatchSession};
use lmpcore::CoreError;
use log::{error, info, warn};
use serde::Deserialize;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter, Rejection, Reply};

pub fn gui_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

#[derive(Debug)]
struct PoisonedState;

impl warp::reject::Reject for PoisonedState {}

async fn recover_poisoned(rejection: Rejection) -> Result<impl Reply, Rejection> {
    if rejection.find::<PoisonedState>().is_some() {
        error!("[bridge] state lock poisoned");
        return Ok(warp::reply::with_status(
            warp::reply::json(&json!({
                "status": "error",
                "message": "bridge state poisoned",
            })),
            StatusCode::INTERNAL_SERVER_ERROR,
        ));
    }
    Err(rejection)
}

/// Selection request posted by the map page.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub mode: Option<CenterMode>,
    #[serde(default)]
    pub center_id: Option<u32>,
    pub radius_km: f64,
}

struct BridgeState {
    session: MatchSession,
    style: MapStyle,
    model: MapModel,
}

impl BridgeState {
    fn refresh(&mut self) {
        self.model = MapModel::from_session(&self.session, &self.style);
    }

    /// Applies a selection. A rejected request leaves the session untouched.
    fn apply(&mut self, request: &FilterRequest) -> Result<(), CoreError> {
        let mode = request.mode.unwrap_or(self.session.mode());
        if let Some(id) = request.center_id {
            let roster = match mode {
                CenterMode::User => self.session.users(),
                CenterMode::Assistant => self.session.assistants(),
            };
            if !roster.iter().any(|person| person.id == id) {
                return Err(CoreError::PersonNotFound(id));
            }
        }
        if self.session.mode() != mode {
            self.session.toggle_center_mode();
        }
        if let Some(id) = request.center_id {
            self.session.select_center(id)?;
        }
        self.session.change_radius(request.radius_km);
        self.refresh();
        Ok(())
    }
}

type SharedState = Arc<RwLock<BridgeState>>;

/// HTTP bridge between the matching session and a map page.
pub struct GuiBridge {
    state: SharedState,
}

impl GuiBridge {
    pub fn new(session: MatchSession, style: MapStyle) -> Self {
        let model = MapModel::from_session(&session, &style);
        let state = Arc::new(RwLock::new(BridgeState {
            session,
            style,
            model,
        }));
        Self { state }
    }

    pub fn routes(&self) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
        let state = self.state.clone();
        let state_filter = warp::any().map(move || state.clone());

        let map_route = warp::path("map")
            .and(warp::get())
            .and(state_filter.clone())
            .and_then(|state: SharedState| async move {
                let guard = state
                    .read()
                    .map_err(|_| warp::reject::custom(PoisonedState))?;
                Ok::<_, warp::Rejection>(warp::reply::json(&guard.model))
            });

        let persons_route = warp::path("persons")
            .and(warp::get())
            .and(state_filter.clone())
            .and_then(|state: SharedState| async move {
                let guard = state
                    .read()
                    .map_err(|_| warp::reject::custom(PoisonedState))?;
                let roster = Roster {
                    users: guard.session.users().to_vec(),
                    assistants: guard.session.assistants().to_vec(),
                };
                Ok::<_, warp::Rejection>(warp::reply::json(&roster))
            });

        let filter_route = warp::path("filter")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter)
            .and_then(|request: FilterRequest, state: SharedState| async move {
                let mut guard = state
                    .write()
                    .map_err(|_| warp::reject::custom(PoisonedState))?;
                let reply = match guard.apply(&request) {
                    Ok(()) => {
                        info!("[bridge] {}", guard.model.status);
                        warp::reply::with_status(
                            warp::reply::json(&json!({
                                "status": "ok",
                                "summary": guard.model.status,
                                "visible": guard.model.visible_count(),
                            })),
                            StatusCode::OK,
                        )
                    }
                    Err(err) => {
                        warn!("[bridge] filter rejected: {}", err);
                        let code = match err {
                            CoreError::PersonNotFound(_) => StatusCode::NOT_FOUND,
                            _ => StatusCode::BAD_REQUEST,
                        };
                        warp::reply::with_status(
                            warp::reply::json(&json!({
                                "status": "error",
                                "message": err.to_string(),
                            })),
                            code,
                        )
                    }
                };
                Ok::<_, warp::Rejection>(reply)
            });

        map_route
            .or(persons_route)
            .or(filter_route)
            .recover(recover_poisoned)
    }

    /// Binds `address` and serves the routes on a background thread with its
    /// own runtime. Returns the bound address.
    pub fn serve(&self, address: SocketAddr) -> anyhow::Result<SocketAddr> {
        let routes = self.routes();
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .context("creating bridge runtime")?;
        let (bound, server) = {
            let _entered = runtime.enter();
            warp::serve(routes)
                .try_bind_ephemeral(address)
                .with_context(|| format!("binding bridge to {}", address))?
        };
        thread::spawn(move || runtime.block_on(server));
        info!("[bridge] listening on http://{}", bound);
        Ok(bound)
    }

    pub fn publish(&self, session: MatchSession) -> anyhow::Result<()> {
        let mut guard = self
            .state
            .write()
            .map_err(|_| anyhow::anyhow!("bridge state poisoned"))?;
        guard.session = session;
        guard.refresh();
        info!(
            "[bridge] markers: {}, visible: {}, {}",
            guard.model.markers.len(),
            guard.model.visible_count(),
            guard.model.status
        );
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        info!("[bridge] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> anyhow::Result<MapModel> {
        let guard = self
            .state
            .read()
            .map_err(|_| anyhow::anyhow!("bridge state poisoned"))?;
        Ok(guard.model.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::fixture::dobong_roster;
    use crate::workflow::config::WorkflowConfig;
    use crate::workflow::runner::Runner;

    fn bridge() -> GuiBridge {
        let roster = dobong_roster();
        let mut session = MatchSession::new();
        session.load(roster.users, roster.assistants);
        GuiBridge::new(session, MapStyle::default())
    }

    #[test]
    fn publish_replaces_session_and_model() {
        let gui = bridge();
        let runner = Runner::new(WorkflowConfig::from_args(1.0, CenterMode::User, Some(2)));
        let session = runner.session(&dobong_roster()).unwrap();
        let expected = session.status().to_string();
        gui.publish(session).unwrap();
        let model = gui.snapshot().unwrap();
        assert_eq!(model.status, expected);
        assert!(model.circle.is_some());
    }

    #[tokio::test]
    async fn map_route_serves_current_model() {
        let gui = bridge();
        let response = warp::test::request()
            .method("GET")
            .path("/map")
            .reply(&gui.routes())
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let model: MapModel = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(model.markers.len(), 30);
        assert_eq!(model.status, "전체 20명");
    }

    #[tokio::test]
    async fn persons_route_lists_both_rosters() {
        let gui = bridge();
        let response = warp::test::request()
            .method("GET")
            .path("/persons")
            .reply(&gui.routes())
            .await;
        let roster: Roster = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(roster.users.len(), 10);
        assert_eq!(roster.assistants.len(), 20);
    }

    #[tokio::test]
    async fn filter_route_applies_selection() {
        let gui = bridge();
        let response = warp::test::request()
            .method("POST")
            .path("/filter")
            .json(&json!({"mode": "assistant", "center_id": 11, "radius_km": 1.0}))
            .reply(&gui.routes())
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let model = gui.snapshot().unwrap();
        assert_eq!(model.mode, CenterMode::Assistant);
        assert_eq!(model.circle.map(|c| c.radius_km), Some(1.0));
        assert!(model.status.starts_with("1km 내"));
    }

    #[tokio::test]
    async fn filter_route_rejects_unknown_center_without_side_effects() {
        let gui = bridge();
        let routes = gui.routes();
        let response = warp::test::request()
            .method("POST")
            .path("/filter")
            .json(&json!({"center_id": 1, "radius_km": 1.0}))
            .reply(&routes)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let before = gui.snapshot().unwrap();

        let response = warp::test::request()
            .method("POST")
            .path("/filter")
            .json(&json!({"mode": "assistant", "center_id": 404, "radius_km": 3.0}))
            .reply(&routes)
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let after = gui.snapshot().unwrap();
        assert_eq!(after.mode, CenterMode::User);
        assert_eq!(after.status, before.status);
        assert_eq!(after.circle.map(|c| c.radius_km), Some(1.0));
        let guard = gui.state.read().unwrap();
        assert_eq!(guard.session.mode(), CenterMode::User);
        assert_eq!(guard.session.selected_user().map(|p| p.id), Some(1));
        assert_eq!(guard.session.radius_km(), 1.0);
    }

    #[tokio::test]
    async fn poisoned_state_answers_with_json_error() {
        let gui = bridge();
        let state = gui.state.clone();
        let _ = thread::spawn(move || {
            let _guard = state.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();

        let response = warp::test::request()
            .method("GET")
            .path("/map")
            .reply(&gui.routes())
            .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["status"], "error");
    }

    #[test]
    fn serve_reports_an_address_in_use() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = taken.local_addr().unwrap();
        let err = bridge().serve(address).unwrap_err();
        assert!(err.to_string().starts_with("binding bridge to"));
    }

    #[test]
    fn serve_returns_the_bound_address() {
        let bound = bridge()
            .serve(SocketAddr::from(([127, 0, 0, 1], 0)))
            .unwrap();
        assert_ne!(bound.port(), 0);
    }
}
