use abool::AtomicFlag;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
struct Status {
    name: String,
    ready: AtomicFlag,
}

#[test]
fn test_serializes_as_plain_bool() {
    let flag = AtomicFlag::new(true);
    assert_eq!(serde_json::to_string(&flag).unwrap(), "true");

    flag.clear();
    assert_eq!(serde_json::to_string(&flag).unwrap(), "false");
}

#[test]
fn test_deserializes_from_bool() {
    let flag: AtomicFlag = serde_json::from_str("true").unwrap();
    assert!(flag.get());

    let flag: AtomicFlag = serde_json::from_str("false").unwrap();
    assert!(!flag.get());
}

#[test]
fn test_rejects_non_bool() {
    assert!(serde_json::from_str::<AtomicFlag>("1").is_err());
    assert!(serde_json::from_str::<AtomicFlag>("\"true\"").is_err());
}

#[test]
fn test_embedded_field() {
    let status: Status = serde_json::from_str(r#"{"name":"api","ready":false}"#).unwrap();
    assert_eq!(status.name, "api");
    assert!(!status.ready.get());

    status.ready.set();
    let json = serde_json::to_string(&status).unwrap();
    assert_eq!(json, r#"{"name":"api","ready":true}"#);
}
