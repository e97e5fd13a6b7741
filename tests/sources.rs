//! Source list configuration, end to end.

use std::fs;

use reqwest::StatusCode;
use static_pages::config::{SourceConfig, SourceKind};

mod common;

#[tokio::test]
async fn test_extra_sources_in_order() {
    let site = common::build_site();
    let vendor = tempfile::tempdir().unwrap();
    let fallback = tempfile::tempdir().unwrap();

    // `lib` resolves through vendor's `.html` before fallback's exact file.
    fs::write(vendor.path().join("lib.html"), "vendor").unwrap();
    fs::write(fallback.path().join("lib"), "fallback").unwrap();
    fs::write(fallback.path().join("only-here.txt"), "fallback only").unwrap();
    // Shadowed by the root's own about.html.
    fs::write(vendor.path().join("about.html"), "shadowed").unwrap();

    let mut config = common::config_for(site.path());
    config.site.sources = vec![
        SourceConfig {
            kind: SourceKind::Plain,
            root: vendor.path().to_path_buf(),
        },
        SourceConfig {
            kind: SourceKind::Plain,
            root: fallback.path().to_path_buf(),
        },
    ];
    let (addr, shutdown) = common::start_server(config).await;
    let client = common::client();

    let get = |path: &str| client.get(format!("http://{}{}", addr, path)).send();

    assert_eq!(get("/lib").await.unwrap().text().await.unwrap(), "vendor");
    assert_eq!(get("/about").await.unwrap().text().await.unwrap(), "<h1>about</h1>");
    assert_eq!(
        get("/only-here.txt").await.unwrap().text().await.unwrap(),
        "fallback only"
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_archive_source_over_other_root() {
    let site = common::build_site();
    let bundles = tempfile::tempdir().unwrap();
    common::write_zip(
        &bundles.path().join("v1.zip"),
        &[("guide/index.html", b"<h1>guide v1</h1>")],
    );

    let mut config = common::config_for(site.path());
    config.site.sources = vec![SourceConfig {
        kind: SourceKind::Archive,
        root: bundles.path().to_path_buf(),
    }];
    let (addr, shutdown) = common::start_server(config).await;

    let res = common::client()
        .get(format!("http://{}/v1.zip/guide", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "<h1>guide v1</h1>");

    shutdown.trigger();
}

#[tokio::test]
async fn test_trailing_slash_rejected() {
    let site = common::build_site();
    let mut config = common::config_for(site.path());
    config.site.trailing_slash = static_pages::config::TrailingSlashPolicy::Reject;
    let (addr, shutdown) = common::start_server(config).await;
    let client = common::client();

    let res = client.get(format!("http://{}/docs/", addr)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "<h1>custom 404</h1>");

    let res = client.get(format!("http://{}/", addr)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    shutdown.trigger();
}
