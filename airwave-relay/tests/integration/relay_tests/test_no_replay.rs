use serde_json::json;

use crate::integration::{create_test_relay, init_tracing};
use crate::utils::{FRAME_TIMEOUT_MS, drain_identity, note_frame, recv_within};

#[tokio::test]
async fn test_no_replay() {
    init_tracing();

    let (registry, relay) = create_test_relay();
    let room_id = registry.create_room().expect("Failed to create room");

    // Publishing into a room nobody watches succeeds and leaves no trace.
    relay
        .publish(&room_id, note_frame(1))
        .expect("Publishing without subscribers must succeed");

    let mut early = relay.subscribe(&room_id).expect("Failed to subscribe");
    drain_identity(&mut early).await;
    assert!(
        recv_within(&mut early, 100).await.is_none(),
        "Pre-attach frames must not replay"
    );

    for n in 2..=4 {
        relay
            .publish(&room_id, note_frame(n))
            .expect("Failed to publish");
    }

    // A late subscriber starts from its identity and sees only what comes
    // after it attached.
    let mut late = relay.subscribe(&room_id).expect("Failed to subscribe");
    drain_identity(&mut late).await;
    relay
        .publish(&room_id, note_frame(5))
        .expect("Failed to publish");

    let frame = recv_within(&mut late, FRAME_TIMEOUT_MS)
        .await
        .expect("Expected the frame published after attaching");
    assert_eq!(frame.value, json!({ "n": 5 }));
    assert!(recv_within(&mut late, 100).await.is_none());
}
