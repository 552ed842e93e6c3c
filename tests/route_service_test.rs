//! Route service unit tests.

use std::sync::Arc;

use chrono::{Duration, Utc};
use mockall::predicate::eq;
use uuid::Uuid;

use fleettrack::domain::{GeoPoint, NewRoute, OpenRoute, Route, RouteUpdate};
use fleettrack::errors::AppError;
use fleettrack::infra::MockRouteRepository;
use fleettrack::services::{RouteManager, RouteService};

fn open_route_from(data: &NewRoute) -> Route {
    Route {
        id: Uuid::new_v4(),
        device_id: data.device_id,
        name: data.name.clone(),
        start_location: data.start_location,
        end_location: GeoPoint::origin(),
        start_date: data.start_date,
        end_date: None,
    }
}

#[tokio::test]
async fn test_open_route_starts_open_with_placeholder_end() {
    let device_id = Uuid::new_v4();
    let before = Utc::now();

    let mut routes = MockRouteRepository::new();
    routes
        .expect_create()
        .withf(move |data: &NewRoute| {
            data.device_id == device_id
                && data.name == "loop"
                && data.start_location == GeoPoint::new(10.0, 20.0)
                && data.start_date >= before
        })
        .times(1)
        .returning(|data| Ok(open_route_from(&data)));

    let service = RouteManager::new(Arc::new(routes));
    let route = service
        .open_route(OpenRoute {
            device_id,
            name: "loop".to_string(),
            start_location: GeoPoint::new(10.0, 20.0),
            start_date: None,
        })
        .await
        .unwrap();

    assert!(route.is_open());
    assert!(route.end_date.is_none());
    assert!(route.end_location.is_origin());
}

#[tokio::test]
async fn test_open_route_honors_supplied_start_date() {
    let start = Utc::now() - Duration::hours(2);

    let mut routes = MockRouteRepository::new();
    routes
        .expect_create()
        .withf(move |data: &NewRoute| data.start_date == start)
        .returning(|data| Ok(open_route_from(&data)));

    let service = RouteManager::new(Arc::new(routes));
    let route = service
        .open_route(OpenRoute {
            device_id: Uuid::new_v4(),
            name: "commute".to_string(),
            start_location: GeoPoint::new(1.0, 2.0),
            start_date: Some(start),
        })
        .await
        .unwrap();

    assert_eq!(route.start_date, start);
}

#[tokio::test]
async fn test_open_route_rejects_blank_name() {
    let routes = MockRouteRepository::new();

    let service = RouteManager::new(Arc::new(routes));
    let result = service
        .open_route(OpenRoute {
            device_id: Uuid::new_v4(),
            name: "   ".to_string(),
            start_location: GeoPoint::origin(),
            start_date: None,
        })
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
}

#[tokio::test]
async fn test_close_route_writes_supplied_end_location_and_stamps_date() {
    let route_id = Uuid::new_v4();
    let end = GeoPoint::new(15.0, 25.0);
    let before = Utc::now();

    let mut routes = MockRouteRepository::new();
    routes
        .expect_close()
        .withf(move |id, location, date| {
            *id == route_id && *location == end && *date >= before
        })
        .times(1)
        .returning(|id, location, date| {
            Ok(Route {
                id,
                device_id: Uuid::new_v4(),
                name: "loop".to_string(),
                start_location: GeoPoint::new(10.0, 20.0),
                end_location: location,
                start_date: Utc::now(),
                end_date: Some(date),
            })
        });

    let service = RouteManager::new(Arc::new(routes));
    let route = service.close_route(route_id, end).await.unwrap();

    assert!(!route.is_open());
    assert!(route.end_date.is_some());
    assert_eq!(route.end_location, GeoPoint::new(15.0, 25.0));
}

#[tokio::test]
async fn test_close_route_twice_overwrites_end_fields() {
    let route_id = Uuid::new_v4();

    let mut routes = MockRouteRepository::new();
    routes
        .expect_close()
        .times(2)
        .returning(|id, location, date| {
            Ok(Route {
                id,
                device_id: Uuid::new_v4(),
                name: "loop".to_string(),
                start_location: GeoPoint::origin(),
                end_location: location,
                start_date: Utc::now(),
                end_date: Some(date),
            })
        });

    let service = RouteManager::new(Arc::new(routes));

    let first = service
        .close_route(route_id, GeoPoint::new(15.0, 25.0))
        .await
        .unwrap();
    let second = service
        .close_route(route_id, GeoPoint::new(30.0, 40.0))
        .await
        .unwrap();

    assert_eq!(first.end_location, GeoPoint::new(15.0, 25.0));
    assert_eq!(second.end_location, GeoPoint::new(30.0, 40.0));
    assert!(second.end_date.is_some());
}

#[tokio::test]
async fn test_close_route_not_found() {
    let mut routes = MockRouteRepository::new();
    routes
        .expect_close()
        .returning(|_, _, _| Err(AppError::NotFound));

    let service = RouteManager::new(Arc::new(routes));
    let result = service
        .close_route(Uuid::new_v4(), GeoPoint::new(1.0, 1.0))
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_search_by_name_passes_fragment_through() {
    let mut routes = MockRouteRepository::new();
    routes
        .expect_search_by_name()
        .with(eq("loop"))
        .times(1)
        .returning(|_| Ok(vec![]));

    let service = RouteManager::new(Arc::new(routes));
    let found = service.search_by_name("loop").await.unwrap();

    assert!(found.is_empty());
}

#[tokio::test]
async fn test_update_route_not_found() {
    let mut routes = MockRouteRepository::new();
    routes
        .expect_update()
        .returning(|_, _| Err(AppError::NotFound));

    let service = RouteManager::new(Arc::new(routes));
    let result = service
        .update_route(
            Uuid::new_v4(),
            RouteUpdate {
                name: Some("renamed".to_string()),
                ..RouteUpdate::default()
            },
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}
