use crate::bridge::model::AnalyzeRequest;
use crate::workflow::runner::{AnalysisReport, Runner};
use log::{error, info};
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

type SharedReport = Arc<RwLock<Option<AnalysisReport>>>;

fn store(state: &SharedReport, report: AnalysisReport) {
    match state.write() {
        Ok(mut guard) => *guard = Some(report),
        Err(poisoned) => *poisoned.into_inner() = Some(report),
    }
}

fn latest(state: &SharedReport) -> Option<AnalysisReport> {
    match state.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

fn routes(
    state: SharedReport,
    runner: Arc<Runner>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let state_filter = warp::any().map(move || state.clone());
    let runner_filter = warp::any().map(move || runner.clone());

    let get_route = warp::path("analysis")
        .and(warp::get())
        .and(state_filter.clone())
        .map(|state: SharedReport| warp::reply::json(&latest(&state)));

    let post_route = warp::path("analyze")
        .and(warp::post())
        .and(warp::body::json())
        .and(state_filter)
        .and(runner_filter)
        .and_then(
            |request: AnalyzeRequest, state: SharedReport, runner: Arc<Runner>| async move {
                let runner = match request.config {
                    Some(config) => runner.with_config(config),
                    None => (*runner).clone(),
                };
                let previous = request.previous.into_snapshot();
                let recent = request.recent.into_snapshot();
                match runner.execute(&previous, &recent) {
                    Ok(report) => {
                        let reply = warp::reply::json(&report);
                        store(&state, report);
                        Ok::<_, warp::Rejection>(warp::reply::with_status(reply, StatusCode::OK))
                    }
                    Err(err) => {
                        error!("analyze error: {:#}", err);
                        Ok::<_, warp::Rejection>(warp::reply::with_status(
                            warp::reply::json(&json!({
                                "status": "error",
                                "message": format!("{:#}", err),
                            })),
                            StatusCode::UNPROCESSABLE_ENTITY,
                        ))
                    }
                }
            },
        );

    get_route.or(post_route)
}

/// Hosts the latest analysis report over HTTP and runs ad-hoc analyses.
pub struct ReportBridge {
    state: SharedReport,
    runner: Arc<Runner>,
}

impl ReportBridge {
    pub fn new(runner: Arc<Runner>) -> Self {
        Self {
            state: Arc::new(RwLock::new(None)),
            runner,
        }
    }

    /// Starts the HTTP endpoint on its own thread and runtime.
    pub fn serve(&self, addr: SocketAddr) {
        let routes = routes(self.state.clone(), self.runner.clone());
        thread::spawn(move || {
            let runtime = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(err) => {
                    error!("failed to build bridge runtime: {}", err);
                    return;
                }
            };
            runtime.block_on(async move {
                match warp::serve(routes).try_bind_ephemeral(addr) {
                    Ok((bound, server)) => {
                        info!("report bridge listening on {}", bound);
                        server.await;
                    }
                    Err(err) => error!("failed to bind report bridge on {}: {}", addr, err),
                }
            });
        });
    }

    pub fn publish(&self, report: &AnalysisReport) {
        store(&self.state, report.clone());
        match &report.nearest_moving {
            Some(fire) => info!(
                "[bridge] nearest moving fire {:.2} km away at ({:.4}, {:.4})",
                fire.distance_km, fire.location.lat, fire.location.lon
            ),
            None => info!("[bridge] no moving fire above threshold"),
        }
    }

    pub fn publish_status(&self, message: &str) {
        info!("[bridge] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> Option<AnalysisReport> {
        latest(&self.state)
    }
}
