//! Shared utilities for integration tests.

use std::fs::{self, File};
use std::io::Write;
use std::net::SocketAddr;
use std::path::Path;

use static_pages::config::ServerConfig;
use static_pages::http::HttpServer;
use static_pages::lifecycle::Shutdown;
use tempfile::TempDir;
use tokio::net::TcpListener;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// A small site exercising every resolution step.
pub fn build_site() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("index.html"), "<h1>home</h1>").unwrap();
    fs::write(root.join("about.html"), "<h1>about</h1>").unwrap();
    fs::write(root.join("style.css"), "body { margin: 0 }").unwrap();
    fs::write(root.join("404.html"), "<h1>custom 404</h1>").unwrap();
    fs::create_dir_all(root.join("docs")).unwrap();
    fs::write(root.join("docs/index.html"), "<h1>docs</h1>").unwrap();

    write_zip(
        &root.join("archive.zip"),
        &[
            ("public/index.html", b"<h1>zipped</h1>"),
            ("public/app.js", b"console.log('zip');"),
        ],
    );

    dir
}

#[allow(dead_code)]
pub fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    let mut writer = ZipWriter::new(File::create(path).unwrap());
    for (name, data) in entries {
        writer.start_file(*name, SimpleFileOptions::default()).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap();
}

/// Config serving `root` on an ephemeral loopback port.
pub fn config_for(root: &Path) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.site.root = root.to_path_buf();
    config
}

/// Start a server in the background; `trigger` the returned coordinator to stop it.
pub async fn start_server(config: ServerConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
