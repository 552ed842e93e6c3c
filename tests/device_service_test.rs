//! Device service unit tests.

use std::sync::Arc;

use mockall::predicate::eq;
use mockall::Sequence;
use uuid::Uuid;

use fleettrack::domain::{Device, NewPanicButton, PanicButton, PanicStatus};
use fleettrack::errors::AppError;
use fleettrack::infra::{MockDeviceRepository, MockImpactRepository, MockPanicButtonRepository};
use fleettrack::services::{DeviceManager, DeviceService};

fn create_test_device(id: Uuid) -> Device {
    Device::provisioned(id)
}

fn create_test_button(device_id: Uuid, status: PanicStatus) -> PanicButton {
    PanicButton {
        id: Uuid::new_v4(),
        user_id: None,
        device_id,
        status,
    }
}

fn manager(
    devices: MockDeviceRepository,
    impacts: MockImpactRepository,
    buttons: MockPanicButtonRepository,
) -> DeviceManager {
    DeviceManager::new(Arc::new(devices), Arc::new(impacts), Arc::new(buttons))
}

#[tokio::test]
async fn test_create_device_provisions_inactive_button() {
    let device_id = Uuid::new_v4();

    let mut devices = MockDeviceRepository::new();
    devices
        .expect_create()
        .times(1)
        .returning(move || Ok(create_test_device(device_id)));

    let mut buttons = MockPanicButtonRepository::new();
    buttons
        .expect_create()
        .withf(move |data: &NewPanicButton| {
            data.device_id == device_id
                && data.status == PanicStatus::Inactive
                && data.user_id.is_none()
        })
        .times(1)
        .returning(|data| Ok(create_test_button(data.device_id, data.status)));

    let service = manager(devices, MockImpactRepository::new(), buttons);
    let device = service.create_device().await.unwrap();

    assert_eq!(device.id, device_id);
    assert!(device.gps.is_origin());
}

#[tokio::test]
async fn test_create_device_button_failure_surfaces_partial_failure() {
    let device_id = Uuid::new_v4();

    let mut devices = MockDeviceRepository::new();
    devices
        .expect_create()
        .returning(move || Ok(create_test_device(device_id)));

    let mut buttons = MockPanicButtonRepository::new();
    buttons
        .expect_create()
        .returning(|_| Err(AppError::internal("insert failed")));

    let service = manager(devices, MockImpactRepository::new(), buttons);
    let result = service.create_device().await;

    match result.unwrap_err() {
        AppError::PartialFailure(msg) => {
            assert!(msg.contains(&device_id.to_string()));
        }
        other => panic!("expected PartialFailure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_device_merges_incident_context() {
    let device_id = Uuid::new_v4();

    let mut devices = MockDeviceRepository::new();
    devices
        .expect_find_by_id()
        .with(eq(device_id))
        .returning(|id| Ok(Some(create_test_device(id))));

    let mut impacts = MockImpactRepository::new();
    impacts
        .expect_count_by_device()
        .with(eq(device_id))
        .returning(|_| Ok(7));

    let mut buttons = MockPanicButtonRepository::new();
    buttons
        .expect_find_by_device()
        .with(eq(device_id))
        .returning(|id| Ok(Some(create_test_button(id, PanicStatus::Emergency))));

    let service = manager(devices, impacts, buttons);
    let details = service.get_device(device_id).await.unwrap();

    assert_eq!(details.device.id, device_id);
    assert_eq!(details.impacts, 7);
    assert_eq!(details.button_status, Some(PanicStatus::Emergency));
}

#[tokio::test]
async fn test_get_device_missing_button_is_degraded_not_error() {
    let device_id = Uuid::new_v4();

    let mut devices = MockDeviceRepository::new();
    devices
        .expect_find_by_id()
        .returning(|id| Ok(Some(create_test_device(id))));

    let mut impacts = MockImpactRepository::new();
    impacts.expect_count_by_device().returning(|_| Ok(0));

    let mut buttons = MockPanicButtonRepository::new();
    buttons.expect_find_by_device().returning(|_| Ok(None));

    let service = manager(devices, impacts, buttons);
    let details = service.get_device(device_id).await.unwrap();

    assert_eq!(details.button_status, None);
}

#[tokio::test]
async fn test_get_device_not_found() {
    let mut devices = MockDeviceRepository::new();
    devices.expect_find_by_id().returning(|_| Ok(None));

    let service = manager(
        devices,
        MockImpactRepository::new(),
        MockPanicButtonRepository::new(),
    );
    let result = service.get_device(Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_delete_device_removes_button_first() {
    let device_id = Uuid::new_v4();
    let mut seq = Sequence::new();

    let mut buttons = MockPanicButtonRepository::new();
    buttons
        .expect_delete_by_device()
        .with(eq(device_id))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|id| Ok(Some(create_test_button(id, PanicStatus::Inactive))));

    let mut devices = MockDeviceRepository::new();
    devices
        .expect_delete()
        .with(eq(device_id))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|id| Ok(create_test_device(id)));

    let service = manager(devices, MockImpactRepository::new(), buttons);
    let deleted = service.delete_device(device_id).await.unwrap();

    assert_eq!(deleted.id, device_id);
}

#[tokio::test]
async fn test_delete_device_not_found_regardless_of_button() {
    let device_id = Uuid::new_v4();

    // No button row exists; that alone is not an error
    let mut buttons = MockPanicButtonRepository::new();
    buttons.expect_delete_by_device().returning(|_| Ok(None));

    let mut devices = MockDeviceRepository::new();
    devices.expect_delete().returning(|_| Err(AppError::NotFound));

    let service = manager(devices, MockImpactRepository::new(), buttons);
    let result = service.delete_device(device_id).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_reconcile_provisions_missing_and_purges_orphans() {
    let with_button = Uuid::new_v4();
    let without_button = Uuid::new_v4();
    let gone_device = Uuid::new_v4();
    let orphan = create_test_button(gone_device, PanicStatus::Active);
    let orphan_id = orphan.id;

    let mut devices = MockDeviceRepository::new();
    devices.expect_list().returning(move || {
        Ok(vec![
            create_test_device(with_button),
            create_test_device(without_button),
        ])
    });

    let mut buttons = MockPanicButtonRepository::new();
    let orphan_clone = orphan.clone();
    buttons.expect_list().returning(move || {
        Ok(vec![
            create_test_button(with_button, PanicStatus::Inactive),
            orphan_clone.clone(),
        ])
    });
    buttons
        .expect_create()
        .withf(move |data: &NewPanicButton| {
            data.device_id == without_button && data.status == PanicStatus::Inactive
        })
        .times(1)
        .returning(|data| Ok(create_test_button(data.device_id, data.status)));
    buttons
        .expect_delete()
        .with(eq(orphan_id))
        .times(1)
        .returning(move |_| Ok(orphan.clone()));

    let service = manager(devices, MockImpactRepository::new(), buttons);
    let report = service.reconcile_panic_buttons().await.unwrap();

    assert_eq!(report.provisioned, 1);
    assert_eq!(report.purged, 1);
}

#[tokio::test]
async fn test_reconcile_is_idempotent_on_consistent_state() {
    let device_id = Uuid::new_v4();

    let mut devices = MockDeviceRepository::new();
    devices
        .expect_list()
        .returning(move || Ok(vec![create_test_device(device_id)]));

    let mut buttons = MockPanicButtonRepository::new();
    buttons
        .expect_list()
        .returning(move || Ok(vec![create_test_button(device_id, PanicStatus::Inactive)]));
    // No create or delete expectations: any write would fail the test

    let service = manager(devices, MockImpactRepository::new(), buttons);
    let report = service.reconcile_panic_buttons().await.unwrap();

    assert_eq!(report.provisioned, 0);
    assert_eq!(report.purged, 0);
}
