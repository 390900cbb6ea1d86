//! Test servers wired up the same way as the real server.

#![allow(missing_docs)]

use axum_test::TestServer;

use crate::{
    AppState, add_logging_layers, build_router, create_app_state, open_connection,
    db::IN_MEMORY_DATABASE_URL,
    transaction::test_utils::FailingTransactionStore,
};

/// Create a test server backed by a fresh in-memory database.
#[track_caller]
pub(crate) fn must_create_test_server() -> TestServer {
    let connection =
        open_connection(IN_MEMORY_DATABASE_URL).expect("could not open in-memory database");
    let state = create_app_state(connection).expect("could not create app state");

    TestServer::new(build_router(state)).expect("could not create test server")
}

/// Create a test server with the same logging layers as the real server.
#[track_caller]
pub(crate) fn must_create_logged_test_server() -> TestServer {
    let connection =
        open_connection(IN_MEMORY_DATABASE_URL).expect("could not open in-memory database");
    let state = create_app_state(connection).expect("could not create app state");

    TestServer::new(add_logging_layers(build_router(state)))
        .expect("could not create test server")
}

/// Create a test server whose transaction store fails every operation.
#[track_caller]
pub(crate) fn must_create_failing_test_server() -> TestServer {
    let state = AppState::new(FailingTransactionStore);

    TestServer::new(build_router(state)).expect("could not create test server")
}
