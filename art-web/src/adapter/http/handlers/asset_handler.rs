use std::collections::BTreeMap;

use crate::adapter::cmd::asset::{AssetSaveCmd, AssetUpdateCmd};
use crate::adapter::http::middleware::Context;
use crate::adapter::query::AssetListQuery;
use crate::adapter::vo::asset::{AssetHealthVO, AssetVO};
use crate::adapter::vo::history::AllocationVO;
use crate::adapter::vo::user::UserVO;
use crate::adapter::{ResList, Response, ResponseSuccess};
use crate::common::PageQuery;
use crate::config::AppState;
use crate::error::{AppError, AppJson, AppQuery};
use crate::repo::model::{asset, asset_model_number, asset_specs, user};
use crate::repo::sea::{AllocationRepo, AssetRepo, HierarchyRepo, SeaRepo};
use crate::service::lifecycle::{self, AssetChanges, NewAsset};
use axum::extract::{Path, State};
use axum::Extension;
use sea_orm::DbConn;

use super::{referenced, user_email};

/// Full asset view: hierarchy names, owner, checkin status and allocations.
pub(crate) async fn asset_vo(db: &DbConn, asset: asset::Model) -> Result<AssetVO, AppError> {
    let model =
        SeaRepo::get_by_id::<asset_model_number::Entity, _>(db, asset.model_number_id).await?;
    let (make, ty, sub, category) = HierarchyRepo::lineage(db, &model).await?;
    let assigned_to = match asset.assigned_to {
        Some(id) => {
            let owner = SeaRepo::get_by_id::<user::Entity, _>(db, id).await?;
            Some(art_common::copy::<_, UserVO>(&owner)?)
        }
        None => None,
    };
    let label = asset.label();
    let mut allocation_history = Vec::new();
    for a in AllocationRepo::history_of(db, asset.id).await? {
        allocation_history.push(AllocationVO {
            id: a.id,
            asset: label.clone(),
            current_owner: user_email(db, a.current_owner).await?,
            previous_owner: user_email(db, a.previous_owner).await?,
            created_at: a.created_at,
        });
    }
    let checkin_status = lifecycle::checkin_status(db, asset.id).await?;
    Ok(AssetVO {
        id: asset.id,
        asset_code: asset.asset_code,
        serial_number: asset.serial_number,
        model_number: model.model_number,
        make_label: make.map(|m| m.make_label),
        asset_type: ty.map(|t| t.asset_type),
        asset_sub_category: sub.map(|s| s.sub_category_name),
        asset_category: category.map(|c| c.category_name),
        assigned_to,
        purchase_date: asset.purchase_date,
        current_status: asset.current_status,
        verified: asset.verified,
        notes: asset.notes,
        specs: asset.specs_id,
        checkin_status,
        allocation_history,
        created_at: asset.created_at,
        updated_at: asset.updated_at,
    })
}

async fn asset_page(
    db: &DbConn,
    page: PageQuery,
    owner: Option<i32>,
    query: AssetListQuery,
) -> Result<ResList<AssetVO>, AppError> {
    let (total, list) =
        AssetRepo::find_asset_by(db, page.init(), owner, query.email.as_deref()).await?;
    let mut out = Vec::with_capacity(list.len());
    for a in list {
        out.push(asset_vo(db, a).await?);
    }
    Ok(ResList::new(total, out))
}

/// Assets allocated to the caller.
pub async fn list_own_assets(
    State(state): State<AppState>,
    Extension(ctx): Extension<Context>,
    AppQuery(page): AppQuery<PageQuery>,
    AppQuery(query): AppQuery<AssetListQuery>,
) -> Result<ResList<AssetVO>, AppError> {
    asset_page(&state.conn, page, Some(ctx.user.id), query).await
}

pub async fn get_own_asset(
    State(state): State<AppState>,
    Extension(ctx): Extension<Context>,
    Path(serial_number): Path<String>,
) -> Result<Response<AssetVO>, AppError> {
    let found = AssetRepo::get_asset_by_serial(&state.conn, &serial_number).await?;
    if found.assigned_to != Some(ctx.user.id) {
        return Err(AppError::NotFound("Not found.".to_string()));
    }
    Ok(Response::success(asset_vo(&state.conn, found).await?))
}

pub async fn list_assets(
    State(state): State<AppState>,
    AppQuery(page): AppQuery<PageQuery>,
    AppQuery(query): AppQuery<AssetListQuery>,
) -> Result<ResList<AssetVO>, AppError> {
    asset_page(&state.conn, page, None, query).await
}

pub async fn get_asset(
    State(state): State<AppState>,
    Path(serial_number): Path<String>,
) -> Result<Response<AssetVO>, AppError> {
    let found = AssetRepo::get_asset_by_serial(&state.conn, &serial_number).await?;
    Ok(Response::success(asset_vo(&state.conn, found).await?))
}

async fn ensure_unique(
    db: &DbConn,
    asset_code: Option<&str>,
    serial_number: Option<&str>,
    except: Option<i32>,
) -> Result<(), AppError> {
    if let Some(code) = asset_code {
        if let Some(other) = AssetRepo::find_by_code_or_serial(db, Some(code), None).await? {
            if Some(other.id) != except {
                return Err(AppError::field(
                    "asset_code",
                    "asset with this asset code already exists.",
                ));
            }
        }
    }
    if let Some(serial) = serial_number {
        if let Some(other) = AssetRepo::find_by_code_or_serial(db, None, Some(serial)).await? {
            if Some(other.id) != except {
                return Err(AppError::field(
                    "serial_number",
                    "asset with this serial number already exists.",
                ));
            }
        }
    }
    Ok(())
}

async fn model_by_number(db: &DbConn, number: &str) -> Result<asset_model_number::Model, AppError> {
    HierarchyRepo::find_model_by_number(db, number)
        .await?
        .ok_or_else(|| {
            AppError::field(
                "model_number",
                format!("Object with model_number={number} does not exist."),
            )
        })
}

pub async fn save_asset(
    State(state): State<AppState>,
    AppJson(param): AppJson<AssetSaveCmd>,
) -> Result<Response<AssetVO>, AppError> {
    let db = &state.conn;
    let asset_code = art_common::non_blank(param.asset_code.as_deref());
    let serial_number = art_common::non_blank(param.serial_number.as_deref());
    if asset_code.is_none() && serial_number.is_none() {
        return Err(AppError::non_field(
            "asset must have either asset code or serial number",
        ));
    }
    let model = model_by_number(db, param.model_number.as_deref().unwrap_or_default()).await?;
    ensure_unique(db, asset_code.as_deref(), serial_number.as_deref(), None).await?;
    if let Some(owner) = param.assigned_to {
        referenced::<user::Entity, _>(db, "assigned_to", owner).await?;
    }
    if let Some(specs) = param.specs {
        referenced::<asset_specs::Entity, _>(db, "specs", specs).await?;
    }
    let saved = lifecycle::register_asset(
        db,
        NewAsset {
            asset_code,
            serial_number,
            model_number_id: model.id,
            assigned_to: param.assigned_to,
            purchase_date: param.purchase_date,
            verified: param.verified,
            notes: param.notes,
            specs_id: param.specs,
        },
    )
    .await?;
    Ok(Response::created(asset_vo(db, saved).await?))
}

pub async fn update_asset(
    State(state): State<AppState>,
    Path(serial): Path<String>,
    AppJson(param): AppJson<AssetUpdateCmd>,
) -> Result<Response<AssetVO>, AppError> {
    let db = &state.conn;
    let found = AssetRepo::get_asset_by_serial(db, &serial).await?;
    let asset_code = art_common::non_blank(param.asset_code.as_deref());
    let serial_number = art_common::non_blank(param.serial_number.as_deref());
    ensure_unique(db, asset_code.as_deref(), serial_number.as_deref(), Some(found.id)).await?;
    let model_number_id = match param.model_number.as_deref() {
        Some(number) => Some(model_by_number(db, number).await?.id),
        None => None,
    };
    if let Some(Some(owner)) = param.assigned_to {
        referenced::<user::Entity, _>(db, "assigned_to", owner).await?;
    }
    if let Some(specs) = param.specs {
        referenced::<asset_specs::Entity, _>(db, "specs", specs).await?;
    }
    let saved = lifecycle::update_asset(
        db,
        found.id,
        AssetChanges {
            asset_code,
            serial_number,
            model_number_id,
            purchase_date: param.purchase_date,
            verified: param.verified,
            notes: param.notes,
            specs_id: param.specs,
            assigned_to: param.assigned_to,
        },
    )
    .await?;
    Ok(Response::success(asset_vo(db, saved).await?))
}

pub async fn delete_asset(
    State(state): State<AppState>,
    Path(serial): Path<String>,
) -> Result<ResponseSuccess, AppError> {
    let found = AssetRepo::get_asset_by_serial(&state.conn, &serial).await?;
    lifecycle::delete_asset(&state.conn, found.id).await?;
    Ok(ResponseSuccess::default())
}

/// Asset counts per model number and status.
pub async fn asset_health(
    State(state): State<AppState>,
) -> Result<ResList<AssetHealthVO>, AppError> {
    let db = &state.conn;
    let mut grouped: BTreeMap<i32, BTreeMap<String, i64>> = BTreeMap::new();
    for (model_id, status, count) in AssetRepo::count_by_model_and_status(db).await? {
        grouped.entry(model_id).or_default().insert(status, count);
    }
    let mut list = Vec::with_capacity(grouped.len());
    for (model_id, count_by_status) in grouped {
        let model = SeaRepo::get_by_id::<asset_model_number::Entity, _>(db, model_id).await?;
        let (_, ty, _, _) = HierarchyRepo::lineage(db, &model).await?;
        list.push(AssetHealthVO {
            asset_type: ty.map(|t| t.asset_type),
            model_number: model.model_number,
            count_by_status,
        });
    }
    Ok(ResList::new(list.len() as u64, list))
}

