use serde_json::json;

use crate::integration::{create_test_relay, init_tracing};
use crate::utils::{FRAME_TIMEOUT_MS, drain_identity, note_frame, recv_within};

#[tokio::test]
async fn test_room_isolation() {
    init_tracing();

    let (registry, relay) = create_test_relay();
    let room_a = registry.create_room().expect("Failed to create room");
    let room_b = registry.create_room().expect("Failed to create room");

    let mut sub_a = relay.subscribe(&room_a).expect("Failed to subscribe");
    let mut sub_b = relay.subscribe(&room_b).expect("Failed to subscribe");
    drain_identity(&mut sub_a).await;
    drain_identity(&mut sub_b).await;

    relay
        .publish(&room_a, note_frame(1))
        .expect("Failed to publish");

    let frame = recv_within(&mut sub_a, FRAME_TIMEOUT_MS)
        .await
        .expect("Expected the frame in its own room");
    assert_eq!(frame.value, json!({ "n": 1 }));
    assert!(
        recv_within(&mut sub_b, 100).await.is_none(),
        "Frames must not cross rooms"
    );
}
