//! MariaDB test infrastructure module.
//!
//! This module provides shared infrastructure for live-server tests,
//! including testcontainer management and database setup utilities.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use mysql::prelude::*;
use testcontainers::core::logs::LogFrame;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::mysql::MysqlConnector;
use crate::server::{ConnectionSettings, Connector};

const ROOT_PASSWORD: &str = "rootpw";

/// Global MariaDB container instance shared across all tests, kept for teardown
static MARIADB_INNER: Mutex<Option<ContainerAsync<GenericImage>>> = Mutex::new(None);

/// Host port of the shared container, set once the container is ready
static MARIADB_PORT: OnceCell<u16> = OnceCell::const_new();

/// Get the host port of the shared MariaDB container, starting it on first use.
///
/// Concurrent callers wait on the cell rather than on a lock held across `.await`.
async fn mariadb_port() -> u16 {
    *MARIADB_PORT
        .get_or_init(|| async {
            let started = create_mariadb_image_async().await;
            let port = started.get_host_port_ipv4(3306).await.unwrap();
            *MARIADB_INNER.lock().unwrap() = Some(started);
            port
        })
        .await
}

/// Start a MariaDB 10.6 container and wait until the real (non-bootstrap) server
/// accepts connections.
async fn create_mariadb_image_async() -> ContainerAsync<GenericImage> {
    let temporary_server_started = Arc::new(AtomicBool::new(false));
    let mariadb_ready = Arc::new(AtomicBool::new(false));
    let temp_clone = Arc::clone(&temporary_server_started);
    let ready_clone = Arc::clone(&mariadb_ready);

    let log_consumer = move |log: &LogFrame| {
        let msg = format!("{:?}", log);
        if msg.contains("Temporary server started") {
            temp_clone.store(true, Ordering::SeqCst);
        } else if temp_clone.load(Ordering::SeqCst) && msg.contains("ready for connections") {
            ready_clone.store(true, Ordering::SeqCst);
        }
    };

    let image = GenericImage::new("mariadb", "10.6")
        .with_log_consumer(log_consumer)
        .with_env_var("MARIADB_ROOT_PASSWORD", ROOT_PASSWORD);

    let started = AsyncRunner::start(image)
        .await
        .expect("failed to start mariadb docker image");

    while !mariadb_ready.load(Ordering::SeqCst) {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    started
}

/// Root credentials for the shared container.
pub async fn settings() -> ConnectionSettings {
    let port = mariadb_port().await;
    ConnectionSettings::new("127.0.0.1", "root", ROOT_PASSWORD).with_port(port)
}

/// Create an empty database with a unique name so tests don't collide on table names.
pub fn fresh_database(connector: &MysqlConnector) -> String {
    let db_name = format!("test_{}", Uuid::new_v4().simple());
    let mut session = connector.connect().expect("connect as root");
    session
        .conn()
        .query_drop(format!("CREATE DATABASE `{}`", db_name))
        .expect("create db");
    db_name
}

#[ctor::dtor]
fn stop_shared_mariadb() {
    let Ok(rt) = tokio::runtime::Runtime::new() else {
        return;
    };
    rt.block_on(async {
        if let Some(c) = MARIADB_INNER.lock().unwrap().take() {
            drop(c);
        }
    })
}
