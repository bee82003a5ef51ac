//! Device handlers.

use axum::extract::{Path, State};
use uuid::Uuid;

use netshare_entity::device::Device;
use netshare_service::device::{DeviceDetail, DeviceStatus};

use super::{ApiResult, ok};
use crate::dto::request::{DeviceStatusRequest, RegisterDeviceRequest, UpdateDeviceRequest};
use crate::dto::response::MessageResponse;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// GET /api/devices
pub async fn list_devices(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Vec<Device>> {
    ok(state.device_service.list(&auth).await?)
}

/// POST /api/devices
pub async fn register_device(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<RegisterDeviceRequest>,
) -> ApiResult<Device> {
    ok(state.device_service.register(&auth, req.into()).await?)
}

/// GET /api/devices/{id}
pub async fn get_device(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<DeviceDetail> {
    ok(state.device_service.get(&auth, id).await?)
}

/// PUT /api/devices/{id}
pub async fn update_device(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateDeviceRequest>,
) -> ApiResult<Device> {
    ok(state.device_service.update(&auth, id, req.into()).await?)
}

/// DELETE /api/devices/{id}
pub async fn delete_device(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<MessageResponse> {
    state.device_service.delete(&auth, id).await?;
    ok(MessageResponse::new("Device deleted"))
}

/// GET /api/devices/{id}/status
pub async fn get_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<DeviceStatus> {
    ok(state.device_service.status(&auth, id).await?)
}

/// PUT /api/devices/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<DeviceStatusRequest>,
) -> ApiResult<DeviceStatus> {
    ok(state
        .device_service
        .set_status(&auth, id, req.is_online)
        .await?)
}
