use relay::config::Config;

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.listen_addr, "127.0.0.1:8080");
    assert!(cfg.log_errors);
}

#[test]
fn test_config_from_yaml() {
    let cfg = Config::from_yaml("listen_addr: 0.0.0.0:3000\nlog_errors: false\n").unwrap();

    assert_eq!(cfg.listen_addr, "0.0.0.0:3000");
    assert!(!cfg.log_errors);
}

#[test]
fn test_config_from_yaml_partial_document() {
    let cfg = Config::from_yaml("log_errors: false\n").unwrap();

    // Unset fields fall back to defaults
    assert_eq!(cfg.listen_addr, "127.0.0.1:8080");
    assert!(!cfg.log_errors);
}

#[test]
fn test_config_from_yaml_empty_mapping() {
    let cfg = Config::from_yaml("{}").unwrap();

    assert_eq!(cfg.listen_addr, "127.0.0.1:8080");
    assert!(cfg.log_errors);
}

#[test]
fn test_config_from_yaml_rejects_garbage() {
    assert!(Config::from_yaml("listen_addr: [not, a, string").is_err());
}

#[test]
fn test_config_listen_env_override() {
    unsafe {
        std::env::remove_var("RELAY_CONFIG");
        std::env::set_var("LISTEN", "0.0.0.0:5000");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.listen_addr, "0.0.0.0:5000");
    unsafe {
        std::env::remove_var("LISTEN");
    }
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::default();
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1.listen_addr, cfg2.listen_addr);
    assert_eq!(cfg1.log_errors, cfg2.log_errors);
}
