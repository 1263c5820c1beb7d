//! Integration tests for Nautobot client
//!
//! These tests require a running Nautobot instance.
//! Set NAUTOBOT_API_BASE_URL and NAUTOBOT_API_TOKEN environment variables to run.

use nautobot_client::{Device, NautobotClient, NautobotConfig, Rack, RackGroup, Resource};

fn live_client() -> NautobotClient {
    let config = NautobotConfig::from_env();
    NautobotClient::new(&config).expect("Failed to create client")
}

#[tokio::test]
#[ignore] // Requires running Nautobot instance
async fn test_list_rack_groups() {
    let groups = live_client()
        .list::<RackGroup>(&[])
        .await
        .expect("Failed to query rack groups");

    println!("Found {} rack groups", groups.len());
}

#[tokio::test]
#[ignore]
async fn test_list_racks_and_fetch_first() {
    let client = live_client();
    let racks = client.list::<Rack>(&[]).await.expect("Failed to query racks");

    if let Some(first) = racks.values().next() {
        let rack: Rack = client.get(first.id(), &[]).await.expect("Failed to fetch rack");
        assert_eq!(rack.id, first.id);
    }
}

#[tokio::test]
#[ignore]
async fn test_list_devices() {
    let devices = live_client()
        .list::<Device>(&[("limit", "10")])
        .await
        .expect("Failed to query devices");

    for device in &devices {
        println!("{} {:?} at {:?}", device.id(), device.name, device.location.as_ref().map(|l| &l.id));
    }
}
