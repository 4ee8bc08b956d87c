use airwave_core::Signal;

use crate::integration::{create_test_relay, init_tracing};
use crate::utils::{FRAME_TIMEOUT_MS, recv_within};

#[tokio::test]
async fn test_identity_frame() {
    init_tracing();

    let (registry, relay) = create_test_relay();
    let room_id = registry.create_room().expect("Failed to create room");

    // The first frame of a subscription is the identity minted for it.
    let mut first = relay.subscribe(&room_id).expect("Failed to subscribe");
    assert_eq!(first.room_id(), &room_id);
    let frame = recv_within(&mut first, FRAME_TIMEOUT_MS)
        .await
        .expect("Expected the identity frame");
    assert_eq!(frame.kind, "identity-assigned");
    assert_eq!(
        frame.decode(),
        Some(Signal::IdentityAssigned(first.participant_id().clone()))
    );

    // Attaching also claimed the host slot for the first subscriber.
    assert_eq!(
        registry.host_of(&room_id).expect("Room must exist"),
        Some(first.participant_id().clone())
    );

    // The second subscriber gets its own identity but not the host slot.
    let mut second = relay.subscribe(&room_id).expect("Failed to subscribe");
    let frame = recv_within(&mut second, FRAME_TIMEOUT_MS)
        .await
        .expect("Expected the identity frame");
    assert_eq!(
        frame.decode(),
        Some(Signal::IdentityAssigned(second.participant_id().clone()))
    );
    assert_eq!(
        registry.host_of(&room_id).expect("Room must exist"),
        Some(first.participant_id().clone())
    );
}
