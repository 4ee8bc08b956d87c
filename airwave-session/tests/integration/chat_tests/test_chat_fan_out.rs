use crate::integration::{TestRig, init_tracing};
use crate::utils::{
    EVENT_TIMEOUT_MS, RecordingReceiverBehavior, RecordingStationBehavior, ReceiverEvent,
    StationEvent,
};

#[tokio::test]
async fn test_chat_fan_out() {
    init_tracing();

    let rig = TestRig::new();
    let station_behavior = RecordingStationBehavior::new();
    let station = rig.spawn_station(station_behavior.clone());

    let behavior_a = RecordingReceiverBehavior::new();
    let receiver_a = rig.spawn_receiver(behavior_a.clone());
    let behavior_b = RecordingReceiverBehavior::new();
    let receiver_b = rig.spawn_receiver(behavior_b.clone());

    assert!(behavior_a.wait_until_connected(EVENT_TIMEOUT_MS).await);
    assert!(behavior_b.wait_until_connected(EVENT_TIMEOUT_MS).await);
    for receiver in [&receiver_a, &receiver_b] {
        assert!(
            station_behavior
                .wait_until_connected(receiver.identity(), EVENT_TIMEOUT_MS)
                .await
        );
    }

    // A listener speaks and the station relays it to everyone, author included.
    receiver_a.send_chat("hello from a").await;

    assert!(
        station_behavior
            .wait_for(EVENT_TIMEOUT_MS, |events| {
                events
                    .iter()
                    .any(|event| matches!(event, StationEvent::Chat(_)))
            })
            .await,
        "Station never received the chat message"
    );
    let station_chats = station_behavior.chats().await;
    assert_eq!(station_chats.len(), 1);
    assert_eq!(&station_chats[0].from, receiver_a.identity());
    assert_eq!(station_chats[0].message, "hello from a");

    // The station itself speaks; both listeners end up with both messages.
    station.send_chat("welcome in").await;

    for behavior in [&behavior_a, &behavior_b] {
        assert!(
            behavior
                .wait_for(EVENT_TIMEOUT_MS, |events| {
                    events
                        .iter()
                        .filter(|event| matches!(event, ReceiverEvent::Chat(_)))
                        .count()
                        >= 2
                })
                .await,
            "Listener missed a chat message"
        );
        let chats = behavior.chats().await;
        assert_eq!(chats.len(), 2);
        assert_eq!(&chats[0].from, receiver_a.identity());
        assert_eq!(chats[0].message, "hello from a");
        assert_eq!(&chats[1].from, station.identity());
        assert_eq!(chats[1].message, "welcome in");
    }
}
