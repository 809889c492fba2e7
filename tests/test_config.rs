use std::path::Path;

use staticd::config::Config;

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.root_dir, Path::new("webroot"));
    assert!(cfg.forbidden.is_empty());
    assert_eq!(cfg.idle_timeout_secs, 5);
    assert_eq!(cfg.recv_buffer_size, 1024);
    assert_eq!(cfg.chunk_size, 1024);
    assert!(!cfg.verbose);
}

#[test]
fn test_config_partial_yaml_keeps_defaults() {
    let cfg: Config = serde_yaml::from_str("listen_addr: 0.0.0.0:3000\n").unwrap();

    assert_eq!(cfg.listen_addr, "0.0.0.0:3000");
    assert_eq!(cfg.chunk_size, 1024);
    assert_eq!(cfg.root_dir, Path::new("webroot"));
}

#[test]
fn test_config_full_yaml() {
    let raw = "\
listen_addr: 127.0.0.1:9000
root_dir: site
forbidden:
  - /admin.html
  - /keys.json
idle_timeout_secs: 30
recv_buffer_size: 4096
chunk_size: 8192
verbose: true
";
    let cfg: Config = serde_yaml::from_str(raw).unwrap();

    assert_eq!(cfg.listen_addr, "127.0.0.1:9000");
    assert_eq!(cfg.root_dir, Path::new("site"));
    assert_eq!(cfg.forbidden.len(), 2);
    assert_eq!(cfg.idle_timeout_secs, 30);
    assert_eq!(cfg.recv_buffer_size, 4096);
    assert_eq!(cfg.chunk_size, 8192);
    assert!(cfg.verbose);
}

#[test]
fn test_config_load_from_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("staticd.yaml");
    std::fs::write(&path, "listen_addr: 127.0.0.1:8181\nverbose: true\n").unwrap();

    unsafe {
        std::env::set_var("STATICD_CONFIG", &path);
    }
    let cfg = Config::load();
    unsafe {
        std::env::remove_var("STATICD_CONFIG");
    }

    assert_eq!(cfg.listen_addr, "127.0.0.1:8181");
    assert!(cfg.verbose);
}

#[test]
fn test_config_forbidden_set() {
    let cfg = Config {
        forbidden: vec!["/a.html".to_string(), "/a.html".to_string(), "/b.css".to_string()],
        ..Config::default()
    };
    let set = cfg.forbidden_set();

    assert_eq!(set.len(), 2);
    assert!(set.contains("/a.html"));
    assert!(set.contains("/b.css"));
}

#[test]
fn test_config_idle_timeout_duration() {
    let cfg = Config::default();

    assert_eq!(cfg.idle_timeout(), std::time::Duration::from_secs(5));
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::default();
    let cfg2 = cfg1.clone();

    assert_eq!(cfg1.listen_addr, cfg2.listen_addr);
    assert_eq!(cfg1.chunk_size, cfg2.chunk_size);
}
