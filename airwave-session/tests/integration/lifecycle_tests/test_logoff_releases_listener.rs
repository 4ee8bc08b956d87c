use crate::integration::lifecycle_tests::wait_for_subscribers;
use crate::integration::{TestRig, init_tracing};
use crate::utils::{EVENT_TIMEOUT_MS, RecordingReceiverBehavior, RecordingStationBehavior};

#[tokio::test]
async fn test_logoff_releases_listener() {
    init_tracing();

    let rig = TestRig::new();
    let station_behavior = RecordingStationBehavior::new();
    let station = rig.spawn_station(station_behavior.clone());

    let behavior = RecordingReceiverBehavior::new();
    let receiver = rig.spawn_receiver(behavior.clone());
    let listener_id = receiver.identity().clone();

    assert!(behavior.wait_until_connected(EVENT_TIMEOUT_MS).await);
    assert!(
        station_behavior
            .wait_until_connected(&listener_id, EVENT_TIMEOUT_MS)
            .await
    );

    receiver.logoff().await;

    // The station releases the link and the relay drops the subscription.
    assert!(
        station_behavior
            .wait_until_left(&listener_id, EVENT_TIMEOUT_MS)
            .await,
        "Station never noticed the logoff"
    );
    assert!(station.context().listeners().is_empty());
    assert!(
        wait_for_subscribers(&rig, 1, EVENT_TIMEOUT_MS).await,
        "Receiver subscription was not released"
    );
}
