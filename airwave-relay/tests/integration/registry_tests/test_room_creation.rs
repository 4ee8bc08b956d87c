use airwave_core::RoomId;

use crate::integration::{create_test_relay, init_tracing};

#[test]
fn test_room_creation() {
    init_tracing();

    let (registry, _relay) = create_test_relay();

    // Fresh rooms register with no host.
    let room_id = registry.create_room().expect("Failed to create room");
    assert!(registry.exists(&room_id));
    assert_eq!(registry.host_of(&room_id).expect("Room must exist"), None);

    // Every creation mints a distinct id.
    let second = registry.create_room().expect("Failed to create room");
    assert_ne!(room_id, second);
    assert!(registry.exists(&second));

    // Ids that were never registered stay unknown.
    assert!(!registry.exists(&RoomId::new()));
}
