//! End-to-end lifecycle scenarios over in-memory repositories.
//!
//! The mock-based unit tests pin individual manager behaviors; these
//! scenarios run the managers against shared stateful fakes so the
//! cross-entity effects (provisioning cascade, teardown cascade, the
//! emergency overwrite, route open/close) are observed together.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use fleettrack::domain::{
    Device, DeviceUpdate, GeoPoint, Impact, ImpactUpdate, NewImpact, NewPanicButton, NewRoute,
    OpenRoute, PanicButton, PanicStatus, RecordImpact, Route, RouteUpdate,
};
use fleettrack::errors::{AppError, AppResult};
use fleettrack::infra::{
    DeviceRepository, ImpactRepository, PanicButtonRepository, RouteRepository,
};
use fleettrack::services::{
    DeviceManager, DeviceService, ImpactManager, ImpactService, PanicManager, PanicService,
    RouteManager, RouteService,
};

// =============================================================================
// In-memory fakes
// =============================================================================

#[derive(Default)]
struct InMemoryDevices {
    rows: Mutex<HashMap<Uuid, Device>>,
}

#[async_trait]
impl DeviceRepository for InMemoryDevices {
    async fn create(&self) -> AppResult<Device> {
        let device = Device::provisioned(Uuid::new_v4());
        self.rows.lock().unwrap().insert(device.id, device.clone());
        Ok(device)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Device>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Device>> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.rows.lock().unwrap().len() as u64)
    }

    async fn update(&self, id: Uuid, changes: DeviceUpdate) -> AppResult<Device> {
        let mut rows = self.rows.lock().unwrap();
        let device = rows.get_mut(&id).ok_or(AppError::NotFound)?;
        device.gps = changes.gps;
        device.last_update_date = changes.last_update_date;
        device.last_update_time = changes.last_update_time;
        device.status = changes.status;
        Ok(device.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<Device> {
        self.rows.lock().unwrap().remove(&id).ok_or(AppError::NotFound)
    }
}

#[derive(Default)]
struct InMemoryButtons {
    rows: Mutex<HashMap<Uuid, PanicButton>>,
}

#[async_trait]
impl PanicButtonRepository for InMemoryButtons {
    async fn create(&self, data: NewPanicButton) -> AppResult<PanicButton> {
        let button = PanicButton {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            device_id: data.device_id,
            status: data.status,
        };
        self.rows.lock().unwrap().insert(button.id, button.clone());
        Ok(button)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<PanicButton>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_device(&self, device_id: Uuid) -> AppResult<Option<PanicButton>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|b| b.device_id == device_id)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<PanicButton>> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn set_status_by_device(
        &self,
        device_id: Uuid,
        status: PanicStatus,
    ) -> AppResult<PanicButton> {
        let mut rows = self.rows.lock().unwrap();
        let button = rows
            .values_mut()
            .find(|b| b.device_id == device_id)
            .ok_or(AppError::NotFound)?;
        button.status = status;
        Ok(button.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<PanicButton> {
        self.rows.lock().unwrap().remove(&id).ok_or(AppError::NotFound)
    }

    async fn delete_by_device(&self, device_id: Uuid) -> AppResult<Option<PanicButton>> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows
            .values()
            .find(|b| b.device_id == device_id)
            .map(|b| b.id);
        Ok(id.and_then(|id| rows.remove(&id)))
    }
}

#[derive(Default)]
struct InMemoryImpacts {
    rows: Mutex<HashMap<Uuid, Impact>>,
}

#[async_trait]
impl ImpactRepository for InMemoryImpacts {
    async fn create(&self, data: NewImpact) -> AppResult<Impact> {
        let impact = Impact {
            id: Uuid::new_v4(),
            device_id: data.device_id,
            value: data.value,
            impact_date: data.impact_date,
        };
        self.rows.lock().unwrap().insert(impact.id, impact.clone());
        Ok(impact)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Impact>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Impact>> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn list_by_device(&self, device_id: Uuid) -> AppResult<Vec<Impact>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|i| i.device_id == device_id)
            .cloned()
            .collect())
    }

    async fn list_above(&self, threshold: f64) -> AppResult<Vec<Impact>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|i| i.value > threshold)
            .cloned()
            .collect())
    }

    async fn count_by_device(&self, device_id: Uuid) -> AppResult<u64> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|i| i.device_id == device_id)
            .count() as u64)
    }

    async fn update(&self, id: Uuid, changes: ImpactUpdate) -> AppResult<Impact> {
        let mut rows = self.rows.lock().unwrap();
        let impact = rows.get_mut(&id).ok_or(AppError::NotFound)?;
        if let Some(device_id) = changes.device_id {
            impact.device_id = device_id;
        }
        if let Some(value) = changes.value {
            impact.value = value;
        }
        if let Some(impact_date) = changes.impact_date {
            impact.impact_date = impact_date;
        }
        Ok(impact.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<Impact> {
        self.rows.lock().unwrap().remove(&id).ok_or(AppError::NotFound)
    }
}

#[derive(Default)]
struct InMemoryRoutes {
    rows: Mutex<HashMap<Uuid, Route>>,
}

#[async_trait]
impl RouteRepository for InMemoryRoutes {
    async fn create(&self, data: NewRoute) -> AppResult<Route> {
        let route = Route {
            id: Uuid::new_v4(),
            device_id: data.device_id,
            name: data.name,
            start_location: data.start_location,
            end_location: GeoPoint::origin(),
            start_date: data.start_date,
            end_date: None,
        };
        self.rows.lock().unwrap().insert(route.id, route.clone());
        Ok(route)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Route>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Route>> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn list_by_device(&self, device_id: Uuid) -> AppResult<Vec<Route>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.device_id == device_id)
            .cloned()
            .collect())
    }

    async fn search_by_name(&self, fragment: &str) -> AppResult<Vec<Route>> {
        let fragment = fragment.to_lowercase();
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.name.to_lowercase().contains(&fragment))
            .cloned()
            .collect())
    }

    async fn update(&self, id: Uuid, changes: RouteUpdate) -> AppResult<Route> {
        let mut rows = self.rows.lock().unwrap();
        let route = rows.get_mut(&id).ok_or(AppError::NotFound)?;
        if let Some(device_id) = changes.device_id {
            route.device_id = device_id;
        }
        if let Some(name) = changes.name {
            route.name = name;
        }
        if let Some(start_location) = changes.start_location {
            route.start_location = start_location;
        }
        if let Some(start_date) = changes.start_date {
            route.start_date = start_date;
        }
        Ok(route.clone())
    }

    async fn close(
        &self,
        id: Uuid,
        end_location: GeoPoint,
        end_date: DateTime<Utc>,
    ) -> AppResult<Route> {
        let mut rows = self.rows.lock().unwrap();
        let route = rows.get_mut(&id).ok_or(AppError::NotFound)?;
        route.end_location = end_location;
        route.end_date = Some(end_date);
        Ok(route.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<Route> {
        self.rows.lock().unwrap().remove(&id).ok_or(AppError::NotFound)
    }
}

// =============================================================================
// Scenario wiring
// =============================================================================

struct Fixture {
    devices: DeviceManager,
    panic: PanicManager,
    impacts: ImpactManager,
    routes: RouteManager,
}

fn fixture() -> Fixture {
    let devices: Arc<dyn DeviceRepository> = Arc::new(InMemoryDevices::default());
    let buttons: Arc<dyn PanicButtonRepository> = Arc::new(InMemoryButtons::default());
    let impacts: Arc<dyn ImpactRepository> = Arc::new(InMemoryImpacts::default());
    let routes: Arc<dyn RouteRepository> = Arc::new(InMemoryRoutes::default());

    Fixture {
        devices: DeviceManager::new(devices, impacts.clone(), buttons.clone()),
        panic: PanicManager::new(buttons),
        impacts: ImpactManager::new(impacts),
        routes: RouteManager::new(routes),
    }
}

#[tokio::test]
async fn test_device_lifecycle_scenario() {
    let fx = fixture();

    // Provisioning: active device, inactive button on the same id
    let device = fx.devices.create_device().await.unwrap();
    assert_eq!(device.status.as_str(), "activo");

    let button = fx.panic.get_by_device(device.id).await.unwrap();
    assert_eq!(button.device_id, device.id);
    assert_eq!(button.status, PanicStatus::Inactive);

    // Remote trigger overwrites whatever state the button is in
    let button = fx.panic.activate_emergency(device.id).await.unwrap();
    assert_eq!(button.status, PanicStatus::Emergency);
    let button = fx.panic.activate_emergency(device.id).await.unwrap();
    assert_eq!(button.status, PanicStatus::Emergency);

    // Teardown removes the button together with the device
    fx.devices.delete_device(device.id).await.unwrap();

    let missing_device = fx.devices.get_device(device.id).await;
    assert!(matches!(missing_device.unwrap_err(), AppError::NotFound));

    let missing_button = fx.panic.get_by_device(device.id).await;
    assert!(matches!(missing_button.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_impact_triage_scenario() {
    let fx = fixture();
    let device = fx.devices.create_device().await.unwrap();

    for value in [600.0, 400.0, 512.0] {
        fx.impacts
            .record_impact(RecordImpact {
                device_id: device.id,
                value,
                impact_date: None,
            })
            .await
            .unwrap();
    }

    // Strict bound: 600 qualifies, 512 itself does not
    let severe = fx.impacts.list_above_threshold(512.0).await.unwrap();
    assert_eq!(severe.len(), 1);
    assert_eq!(severe[0].value, 600.0);

    // The device detail projection sees every reading
    let details = fx.devices.get_device(device.id).await.unwrap();
    assert_eq!(details.impacts, 3);
    assert_eq!(details.button_status, Some(PanicStatus::Inactive));
}

#[tokio::test]
async fn test_route_protocol_scenario() {
    let fx = fixture();
    let device = fx.devices.create_device().await.unwrap();

    let route = fx
        .routes
        .open_route(OpenRoute {
            device_id: device.id,
            name: "morning loop".to_string(),
            start_location: GeoPoint::new(10.0, 20.0),
            start_date: None,
        })
        .await
        .unwrap();

    assert!(route.is_open());
    assert!(route.end_location.is_origin());

    let closed = fx
        .routes
        .close_route(route.id, GeoPoint::new(15.0, 25.0))
        .await
        .unwrap();

    assert!(closed.end_date.is_some());
    assert_eq!(closed.end_location, GeoPoint::new(15.0, 25.0));

    // Re-closing overwrites the end fields
    let reclosed = fx
        .routes
        .close_route(route.id, GeoPoint::new(30.0, 40.0))
        .await
        .unwrap();
    assert_eq!(reclosed.end_location, GeoPoint::new(30.0, 40.0));

    // Name search is case-insensitive
    let found = fx.routes.search_by_name("MORNING").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, route.id);
}

#[tokio::test]
async fn test_reconcile_repairs_partial_states() {
    let fx = fixture();

    // Healthy device plus one that lost its button
    let healthy = fx.devices.create_device().await.unwrap();
    let degraded = fx.devices.create_device().await.unwrap();
    let button = fx.panic.get_by_device(degraded.id).await.unwrap();
    fx.panic.delete_button(button.id).await.unwrap();

    let report = fx.devices.reconcile_panic_buttons().await.unwrap();
    assert_eq!(report.provisioned, 1);
    assert_eq!(report.purged, 0);

    // The repaired button comes back inactive
    let repaired = fx.panic.get_by_device(degraded.id).await.unwrap();
    assert_eq!(repaired.status, PanicStatus::Inactive);
    let untouched = fx.panic.get_by_device(healthy.id).await.unwrap();
    assert_eq!(untouched.status, PanicStatus::Inactive);

    // A second sweep finds nothing to do
    let report = fx.devices.reconcile_panic_buttons().await.unwrap();
    assert_eq!(report.provisioned, 0);
    assert_eq!(report.purged, 0);
}
