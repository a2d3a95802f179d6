//! RemoteBackend against a live service on a loopback port
#![cfg(all(feature = "server", feature = "remote"))]

use std::net::{SocketAddr, TcpListener};
use std::time::Duration;

use approx::assert_relative_eq;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use beam_solver::prelude::*;
use beam_solver::service::router;

/// Start the service on its own thread and runtime
fn spawn_server() -> SocketAddr {
    spawn_router(router(AnalysisOptions::default()))
}

fn spawn_router(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });

    addr
}

fn propped_cantilever() -> BeamModel {
    BeamModel::build(
        5.0,
        &[],
        &[DistributedLoad::uniform(0.0, 5.0, -5.0)],
        &[Support::roller(0.0), Support::fixed(5.0)],
    )
    .unwrap()
}

#[test]
fn test_remote_matches_local() {
    let addr = spawn_server();
    let remote = RemoteBackend::new(format!("http://{}", addr)).unwrap();
    let model = propped_cantilever();

    let remote_result = remote.analyze(&model).unwrap();
    let local_result = StiffnessBackend::default().analyze(&model).unwrap();

    assert_eq!(remote_result.reactions.len(), local_result.reactions.len());
    for (r, l) in remote_result.reactions.iter().zip(&local_result.reactions) {
        assert_eq!(r.label, l.label);
        assert_relative_eq!(r.force, l.force, epsilon = 1e-9);
        assert_relative_eq!(r.moment, l.moment, epsilon = 1e-9);
    }
    assert_eq!(remote_result.moment.len(), local_result.moment.len());
    assert_relative_eq!(
        remote_result.summary.max_moment,
        local_result.summary.max_moment,
        epsilon = 1e-9
    );
}

#[test]
fn test_remote_divergence_keeps_its_category() {
    let addr = spawn_server();
    let remote = RemoteBackend::new(format!("http://{}", addr)).unwrap();
    let model = BeamModel::build(
        5.0,
        &[PointLoad::new(2.0, -1.0)],
        &[],
        &[Support::free(0.0), Support::free(5.0)],
    )
    .unwrap();

    let err = remote.analyze(&model).unwrap_err();
    assert!(matches!(err, AnalysisError::SolverDivergence { .. }), "{:?}", err);
}

#[test]
fn test_unreachable_service_is_unavailable() {
    // bind then drop to get a port nobody listens on
    let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let remote = RemoteBackend::with_timeout(format!("http://{}", addr), Duration::from_secs(2)).unwrap();

    let err = run_analysis(&propped_cantilever().into_input(), &remote).unwrap_err();
    assert_eq!(err.kind(), "backend_unavailable");
    assert!(err.diagnostic().is_some());
}

#[test]
fn test_non_json_failure_is_unknown() {
    let app = Router::new().route(
        "/api/v1/analyze",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "solver crashed") }),
    );
    let remote = RemoteBackend::new(format!("http://{}", spawn_router(app))).unwrap();

    match remote.analyze(&propped_cantilever()).unwrap_err() {
        AnalysisError::UnknownBackendFailure { diagnostic } => {
            assert!(diagnostic.contains("500"), "{}", diagnostic);
            assert!(diagnostic.contains("solver crashed"), "{}", diagnostic);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_empty_response_is_unknown() {
    let app = Router::new().route(
        "/api/v1/analyze",
        post(|| async { axum::Json(serde_json::json!({ "success": false })) }),
    );
    let remote = RemoteBackend::new(format!("http://{}", spawn_router(app))).unwrap();

    match remote.analyze(&propped_cantilever()).unwrap_err() {
        AnalysisError::UnknownBackendFailure { diagnostic } => {
            assert!(diagnostic.contains(r#"{"success":false}"#), "{}", diagnostic);
        }
        other => panic!("unexpected {:?}", other),
    }
}
