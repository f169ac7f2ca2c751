//! asset lifecycle bookkeeping
//!
//! Every operation runs in one transaction. Status and allocation history are
//! append-only; `asset.current_status` and `asset.assigned_to` mirror the
//! newest history entries.

use chrono::NaiveDate;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbConn, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, TransactionTrait,
};

use crate::common::{AssetStatusEnum, CheckinStatusEnum, LogTypeEnum};
use crate::repo::model::{
    allocation_history, asset, asset_condition, asset_log, asset_status,
};
use crate::repo::sea::{AssetRepo, SeaRepo};

#[derive(Debug, Clone, Default)]
pub struct NewAsset {
    pub asset_code: Option<String>,
    pub serial_number: Option<String>,
    pub model_number_id: i32,
    pub assigned_to: Option<i32>,
    pub purchase_date: Option<NaiveDate>,
    pub verified: Option<bool>,
    pub notes: Option<String>,
    pub specs_id: Option<i32>,
}

/// Fields to change on an asset; `None` leaves a field alone.
#[derive(Debug, Clone, Default)]
pub struct AssetChanges {
    pub asset_code: Option<String>,
    pub serial_number: Option<String>,
    pub model_number_id: Option<i32>,
    pub purchase_date: Option<NaiveDate>,
    pub verified: Option<bool>,
    pub notes: Option<String>,
    pub specs_id: Option<i32>,
    /// `Some(None)` unassigns
    pub assigned_to: Option<Option<i32>>,
}

async fn record_status<C: ConnectionTrait>(
    db: &C,
    asset: asset::Model,
    status: AssetStatusEnum,
) -> Result<(asset_status::Model, asset::Model), DbErr> {
    let record = asset_status::ActiveModel {
        asset_id: Set(asset.id),
        current_status: Set(status.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    tracing::debug!(
        "asset {} status {:?} -> {}",
        asset.id,
        record.previous_status,
        record.current_status
    );
    let mut active = asset.into_active_model();
    active.current_status = Set(status.to_string());
    let asset = active.update(db).await?;
    Ok((record, asset))
}

async fn record_allocation<C: ConnectionTrait>(
    db: &C,
    asset: asset::Model,
    owner: Option<i32>,
) -> Result<(allocation_history::Model, asset::Model), DbErr> {
    // the hook reads the outgoing owner off the asset, so this goes first
    let record = allocation_history::ActiveModel {
        asset_id: Set(asset.id),
        current_owner: Set(owner),
        ..Default::default()
    }
    .insert(db)
    .await?;
    tracing::debug!(
        "asset {} owner {:?} -> {:?}",
        asset.id,
        record.previous_owner,
        record.current_owner
    );
    let mut active = asset.into_active_model();
    active.assigned_to = Set(owner);
    let asset = active.update(db).await?;
    Ok((record, asset))
}

async fn allocate_in<C: ConnectionTrait>(
    db: &C,
    asset: asset::Model,
    owner: Option<i32>,
) -> Result<(allocation_history::Model, asset::Model), DbErr> {
    let (record, asset) = record_allocation(db, asset, owner).await?;
    let status = asset.status();
    let asset = match owner {
        Some(_) if status != Some(AssetStatusEnum::Allocated) => {
            record_status(db, asset, AssetStatusEnum::Allocated).await?.1
        }
        None if status == Some(AssetStatusEnum::Allocated) => {
            record_status(db, asset, AssetStatusEnum::Available).await?.1
        }
        _ => asset,
    };
    Ok((record, asset))
}

/// Inserts an asset with its one `Available` status. An owner given here is
/// recorded in the allocation history without a status change.
pub async fn register_asset(db: &DbConn, new: NewAsset) -> Result<asset::Model, DbErr> {
    let txn = db.begin().await?;
    let saved = asset::ActiveModel {
        asset_code: Set(new.asset_code),
        serial_number: Set(new.serial_number),
        model_number_id: Set(new.model_number_id),
        purchase_date: Set(new.purchase_date),
        verified: Set(new.verified.unwrap_or(true)),
        notes: Set(new.notes),
        specs_id: Set(new.specs_id),
        current_status: Set(AssetStatusEnum::Available.to_string()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    let (_, mut saved) = record_status(&txn, saved, AssetStatusEnum::Available).await?;
    if let Some(owner) = new.assigned_to {
        saved = record_allocation(&txn, saved, Some(owner)).await?.1;
    }
    txn.commit().await?;
    tracing::info!("asset {} registered", saved.label());
    Ok(saved)
}

/// Appends a status. Any status but `Allocated` takes the asset back from
/// its owner.
pub async fn change_status(
    db: &DbConn,
    asset_id: i32,
    status: AssetStatusEnum,
) -> Result<asset_status::Model, DbErr> {
    let txn = db.begin().await?;
    let asset = SeaRepo::get_by_id::<asset::Entity, _>(&txn, asset_id).await?;
    let (record, asset) = record_status(&txn, asset, status).await?;
    if status != AssetStatusEnum::Allocated && asset.assigned_to.is_some() {
        record_allocation(&txn, asset, None).await?;
    }
    txn.commit().await?;
    Ok(record)
}

/// Hands the asset to `owner`, or takes it back with `None`.
pub async fn allocate(
    db: &DbConn,
    asset_id: i32,
    owner: Option<i32>,
) -> Result<allocation_history::Model, DbErr> {
    let txn = db.begin().await?;
    let asset = SeaRepo::get_by_id::<asset::Entity, _>(&txn, asset_id).await?;
    if asset.assigned_to == owner {
        return Err(DbErr::Custom(match owner {
            Some(_) => "asset is already allocated to this user".to_string(),
            None => "asset is not allocated".to_string(),
        }));
    }
    let (record, _) = allocate_in(&txn, asset, owner).await?;
    txn.commit().await?;
    Ok(record)
}

pub async fn update_asset(
    db: &DbConn,
    asset_id: i32,
    changes: AssetChanges,
) -> Result<asset::Model, DbErr> {
    let txn = db.begin().await?;
    let current = SeaRepo::get_by_id::<asset::Entity, _>(&txn, asset_id).await?;
    let previous_owner = current.assigned_to;
    let mut active = current.into_active_model();
    if let Some(v) = changes.asset_code {
        active.asset_code = Set(Some(v));
    }
    if let Some(v) = changes.serial_number {
        active.serial_number = Set(Some(v));
    }
    if let Some(v) = changes.model_number_id {
        active.model_number_id = Set(v);
    }
    if let Some(v) = changes.purchase_date {
        active.purchase_date = Set(Some(v));
    }
    if let Some(v) = changes.verified {
        active.verified = Set(v);
    }
    if let Some(v) = changes.notes {
        active.notes = Set(Some(v));
    }
    if let Some(v) = changes.specs_id {
        active.specs_id = Set(Some(v));
    }
    let mut saved = active.update(&txn).await?;
    if let Some(owner) = changes.assigned_to {
        if owner != previous_owner {
            saved = allocate_in(&txn, saved, owner).await?.1;
        }
    }
    txn.commit().await?;
    Ok(saved)
}

/// Removes the asset and its history. Refused while incident reports point
/// at it.
pub async fn delete_asset(db: &DbConn, asset_id: i32) -> Result<(), DbErr> {
    let txn = db.begin().await?;
    let asset = SeaRepo::get_by_id::<asset::Entity, _>(&txn, asset_id).await?;
    if AssetRepo::has_incident_reports(&txn, asset.id).await? {
        return Err(DbErr::Custom(format!(
            "Cannot delete asset {} because it is referenced by incident reports",
            asset.label()
        )));
    }
    asset_status::Entity::delete_many()
        .filter(asset_status::Column::AssetId.eq(asset.id))
        .exec(&txn)
        .await?;
    allocation_history::Entity::delete_many()
        .filter(allocation_history::Column::AssetId.eq(asset.id))
        .exec(&txn)
        .await?;
    asset_condition::Entity::delete_many()
        .filter(asset_condition::Column::AssetId.eq(asset.id))
        .exec(&txn)
        .await?;
    asset_log::Entity::delete_many()
        .filter(asset_log::Column::AssetId.eq(asset.id))
        .exec(&txn)
        .await?;
    asset::Entity::delete_by_id(asset.id).exec(&txn).await?;
    txn.commit().await?;
    tracing::info!("asset {} deleted", asset.label());
    Ok(())
}

pub async fn record_log(
    db: &DbConn,
    asset_id: i32,
    checked_by: i32,
    log_type: LogTypeEnum,
) -> Result<asset_log::Model, DbErr> {
    asset_log::ActiveModel {
        asset_id: Set(asset_id),
        checked_by: Set(checked_by),
        log_type: Set(log_type.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// `None` until the security desk has logged the asset once.
pub async fn checkin_status<C: ConnectionTrait>(
    db: &C,
    asset_id: i32,
) -> Result<Option<CheckinStatusEnum>, DbErr> {
    let latest = asset_log::latest_for(db, asset_id).await?;
    Ok(latest.and_then(|l| l.kind()).map(CheckinStatusEnum::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::model::{asset_incident_report, user};
    use crate::test_support;
    use sea_orm::{PaginatorTrait, QueryOrder};

    async fn statuses(db: &DbConn, asset_id: i32) -> Vec<(Option<String>, String)> {
        asset_status::Entity::find()
            .filter(asset_status::Column::AssetId.eq(asset_id))
            .order_by_asc(asset_status::Column::Id)
            .all(db)
            .await
            .unwrap()
            .into_iter()
            .map(|s| (s.previous_status, s.current_status))
            .collect()
    }

    async fn owners(db: &DbConn, asset_id: i32) -> Vec<(Option<i32>, Option<i32>)> {
        allocation_history::Entity::find()
            .filter(allocation_history::Column::AssetId.eq(asset_id))
            .order_by_asc(allocation_history::Column::Id)
            .all(db)
            .await
            .unwrap()
            .into_iter()
            .map(|a| (a.previous_owner, a.current_owner))
            .collect()
    }

    fn pair(previous: Option<&str>, current: &str) -> (Option<String>, String) {
        (previous.map(str::to_string), current.to_string())
    }

    async fn new_asset(db: &DbConn, code: &str, owner: Option<&user::Model>) -> asset::Model {
        let model = test_support::seed_model(db, "MBP-2017").await;
        register_asset(
            db,
            NewAsset {
                asset_code: Some(code.to_string()),
                serial_number: Some(format!("SN-{code}")),
                model_number_id: model.id,
                assigned_to: owner.map(|u| u.id),
                ..Default::default()
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn register_without_owner() {
        let state = test_support::state().await;
        let db = &state.conn;
        let saved = new_asset(db, "IC001", None).await;
        assert_eq!(saved.current_status, "Available");
        assert!(saved.verified);
        assert_eq!(statuses(db, saved.id).await, vec![pair(None, "Available")]);
        assert!(owners(db, saved.id).await.is_empty());
    }

    #[tokio::test]
    async fn register_with_owner_keeps_one_status() {
        let state = test_support::state().await;
        let db = &state.conn;
        let owner = test_support::seed_user(db, "owner@site.com", false).await;
        let saved = new_asset(db, "IC002", Some(&owner)).await;
        assert_eq!(saved.assigned_to, Some(owner.id));
        assert_eq!(saved.current_status, "Available");
        assert_eq!(statuses(db, saved.id).await, vec![pair(None, "Available")]);
        assert_eq!(owners(db, saved.id).await, vec![(None, Some(owner.id))]);

        new_asset(db, "IC010", Some(&owner)).await;
        let total = asset_status::Entity::find().count(db).await.unwrap();
        assert_eq!(total, 2);
    }

    #[tokio::test]
    async fn non_allocated_status_unassigns() {
        let state = test_support::state().await;
        let db = &state.conn;
        let owner = test_support::seed_user(db, "owner@site.com", false).await;
        let saved = new_asset(db, "IC003", Some(&owner)).await;

        let record = change_status(db, saved.id, AssetStatusEnum::Damaged)
            .await
            .unwrap();
        assert_eq!(record.previous_status.as_deref(), Some("Available"));
        assert_eq!(record.current_status, "Damaged");

        let reloaded = SeaRepo::get_by_id::<asset::Entity, _>(db, saved.id)
            .await
            .unwrap();
        assert_eq!(reloaded.assigned_to, None);
        assert_eq!(reloaded.current_status, "Damaged");
        assert_eq!(
            owners(db, saved.id).await,
            vec![(None, Some(owner.id)), (Some(owner.id), None)]
        );
    }

    #[tokio::test]
    async fn allocate_and_take_back() {
        let state = test_support::state().await;
        let db = &state.conn;
        let first = test_support::seed_user(db, "first@site.com", false).await;
        let second = test_support::seed_user(db, "second@site.com", false).await;
        let saved = new_asset(db, "IC004", None).await;

        allocate(db, saved.id, Some(first.id)).await.unwrap();
        let record = allocate(db, saved.id, Some(second.id)).await.unwrap();
        assert_eq!(record.previous_owner, Some(first.id));
        assert_eq!(record.current_owner, Some(second.id));

        let record = allocate(db, saved.id, None).await.unwrap();
        assert_eq!(record.previous_owner, Some(second.id));
        assert_eq!(record.current_owner, None);

        assert_eq!(
            statuses(db, saved.id).await,
            vec![
                pair(None, "Available"),
                pair(Some("Available"), "Allocated"),
                pair(Some("Allocated"), "Available"),
            ]
        );
        assert!(matches!(
            allocate(db, saved.id, None).await,
            Err(DbErr::Custom(_))
        ));
    }

    #[tokio::test]
    async fn identifiers_are_required_and_unique() {
        let state = test_support::state().await;
        let db = &state.conn;
        let model = test_support::seed_model(db, "MBP-2017").await;
        let err = register_asset(
            db,
            NewAsset {
                asset_code: Some("  ".to_string()),
                model_number_id: model.id,
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(
            err,
            DbErr::Custom("asset must have either asset code or serial number".to_string())
        );

        new_asset(db, "IC005", None).await;
        let dup = register_asset(
            db,
            NewAsset {
                asset_code: Some("IC005".to_string()),
                model_number_id: model.id,
                ..Default::default()
            },
        )
        .await;
        assert!(dup.is_err());
        assert_eq!(asset::Entity::find().count(db).await.unwrap(), 1);
        assert_eq!(asset_status::Entity::find().count(db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn invalid_status_is_not_written() {
        let state = test_support::state().await;
        let db = &state.conn;
        let saved = new_asset(db, "IC006", None).await;
        let err = asset_status::ActiveModel {
            asset_id: Set(saved.id),
            current_status: Set("Unused".to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap_err();
        assert_eq!(
            err,
            DbErr::Custom("\"Unused\" is not a valid choice.".to_string())
        );
        assert_eq!(statuses(db, saved.id).await.len(), 1);
    }

    #[tokio::test]
    async fn update_routes_owner_change_through_allocation() {
        let state = test_support::state().await;
        let db = &state.conn;
        let owner = test_support::seed_user(db, "owner@site.com", false).await;
        let saved = new_asset(db, "IC007", None).await;
        let updated = update_asset(
            db,
            saved.id,
            AssetChanges {
                notes: Some("scratched lid".to_string()),
                assigned_to: Some(Some(owner.id)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.notes.as_deref(), Some("scratched lid"));
        assert_eq!(updated.assigned_to, Some(owner.id));
        assert_eq!(updated.current_status, "Allocated");
        assert_eq!(owners(db, saved.id).await, vec![(None, Some(owner.id))]);
    }

    #[tokio::test]
    async fn delete_removes_history_unless_reported() {
        let state = test_support::state().await;
        let db = &state.conn;
        let owner = test_support::seed_user(db, "owner@site.com", false).await;
        let kept = new_asset(db, "IC008", Some(&owner)).await;
        let gone = new_asset(db, "IC009", Some(&owner)).await;

        asset_incident_report::ActiveModel {
            asset_id: Set(kept.id),
            incident_type: Set("Loss".to_string()),
            incident_location: Set("Lobby".to_string()),
            incident_description: Set("left behind".to_string()),
            submitted_by: Set(owner.id),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
        assert!(matches!(
            delete_asset(db, kept.id).await,
            Err(DbErr::Custom(_))
        ));

        delete_asset(db, gone.id).await.unwrap();
        assert!(statuses(db, gone.id).await.is_empty());
        assert!(owners(db, gone.id).await.is_empty());
        assert_eq!(asset::Entity::find().count(db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn checkin_status_follows_latest_log() {
        let state = test_support::state().await;
        let db = &state.conn;
        let guard = test_support::seed_security_user(db).await;
        let saved = new_asset(db, "IC010", None).await;
        assert_eq!(checkin_status(db, saved.id).await.unwrap(), None);

        record_log(db, saved.id, guard.id, LogTypeEnum::Checkin)
            .await
            .unwrap();
        assert_eq!(
            checkin_status(db, saved.id).await.unwrap(),
            Some(CheckinStatusEnum::CheckedIn)
        );
        record_log(db, saved.id, guard.id, LogTypeEnum::Checkout)
            .await
            .unwrap();
        assert_eq!(
            checkin_status(db, saved.id).await.unwrap(),
            Some(CheckinStatusEnum::CheckedOut)
        );
    }
}
