use std::collections::HashSet;
use std::path::PathBuf;

use staticd::http::resolver::{Resolution, Resolver};
use tempfile::TempDir;

fn webroot() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("webroot");
    std::fs::create_dir(&root).unwrap();
    std::fs::write(root.join("index.html"), b"<html>home</html>").unwrap();
    std::fs::create_dir(root.join("sub")).unwrap();
    (dir, root)
}

fn resolver(forbidden: &[&str]) -> Resolver {
    let set: HashSet<String> = forbidden.iter().map(|s| s.to_string()).collect();
    Resolver::new(set)
}

#[tokio::test]
async fn test_existing_file_is_ok() {
    let (_dir, root) = webroot();
    let resolution = resolver(&[])
        .classify("/index.html", &root.join("index.html"))
        .await;

    assert_eq!(resolution, Resolution::Ok);
}

#[tokio::test]
async fn test_missing_file_short_circuits() {
    let (_dir, root) = webroot();
    let resolution = resolver(&[])
        .classify("/nope.html", &root.join("nope.html"))
        .await;

    assert_eq!(resolution, Resolution::Missing);
}

#[tokio::test]
async fn test_directory_is_missing() {
    let (_dir, root) = webroot();
    let resolution = resolver(&[]).classify("/sub", &root.join("sub")).await;

    assert_eq!(resolution, Resolution::Missing);
}

#[tokio::test]
async fn test_existing_traversal_is_flagged() {
    let (_dir, root) = webroot();
    // Resolves to an existing file, but the literal path climbs out of sub/
    let resource = root.join("sub/../index.html");
    let resolution = resolver(&[])
        .classify("/sub/../index.html", &resource)
        .await;

    assert_eq!(resolution, Resolution::Traversal);
}

#[tokio::test]
async fn test_missing_beats_traversal() {
    let (_dir, root) = webroot();
    let resource = root.join("sub/../nope.html");
    let resolution = resolver(&[]).classify("/sub/../nope.html", &resource).await;

    assert_eq!(resolution, Resolution::Missing);
}

#[tokio::test]
async fn test_forbidden_target_is_denied() {
    let (_dir, root) = webroot();
    let resolution = resolver(&["/index.html"])
        .classify("/index.html", &root.join("index.html"))
        .await;

    assert_eq!(resolution, Resolution::Forbidden);
}

#[tokio::test]
async fn test_traversal_beats_forbidden() {
    let (_dir, root) = webroot();
    let resource = root.join("sub/../index.html");
    let resolution = resolver(&["/sub/../index.html"])
        .classify("/sub/../index.html", &resource)
        .await;

    assert_eq!(resolution, Resolution::Traversal);
}
