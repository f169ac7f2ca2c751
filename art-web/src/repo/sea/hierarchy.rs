//! category → sub-category → type → make → model number

use crate::repo::model::{
    asset, asset_category, asset_make, asset_model_number, asset_sub_category, asset_type,
};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter,
};

pub struct HierarchyRepo;

impl HierarchyRepo {
    pub async fn find_category_by_name<C: ConnectionTrait>(
        db: &C,
        name: &str,
    ) -> Result<Option<asset_category::Model>, DbErr> {
        asset_category::Entity::find()
            .filter(asset_category::Column::CategoryName.eq(name.trim()))
            .one(db)
            .await
    }

    pub async fn find_sub_category_by_name<C: ConnectionTrait>(
        db: &C,
        name: &str,
    ) -> Result<Option<asset_sub_category::Model>, DbErr> {
        asset_sub_category::Entity::find()
            .filter(asset_sub_category::Column::SubCategoryName.eq(name.trim()))
            .one(db)
            .await
    }

    pub async fn find_type_by_name<C: ConnectionTrait>(
        db: &C,
        name: &str,
    ) -> Result<Option<asset_type::Model>, DbErr> {
        asset_type::Entity::find()
            .filter(asset_type::Column::AssetType.eq(name.trim()))
            .one(db)
            .await
    }

    pub async fn find_make_by_label<C: ConnectionTrait>(
        db: &C,
        label: &str,
    ) -> Result<Option<asset_make::Model>, DbErr> {
        asset_make::Entity::find()
            .filter(asset_make::Column::MakeLabel.eq(label.trim()))
            .one(db)
            .await
    }

    pub async fn find_model_by_number<C: ConnectionTrait>(
        db: &C,
        number: &str,
    ) -> Result<Option<asset_model_number::Model>, DbErr> {
        asset_model_number::Entity::find()
            .filter(asset_model_number::Column::ModelNumber.eq(number.trim()))
            .one(db)
            .await
    }

    pub async fn insert_category<C: ConnectionTrait>(
        db: &C,
        name: &str,
    ) -> Result<asset_category::Model, DbErr> {
        asset_category::ActiveModel {
            category_name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn insert_sub_category<C: ConnectionTrait>(
        db: &C,
        name: &str,
        category_id: i32,
    ) -> Result<asset_sub_category::Model, DbErr> {
        asset_sub_category::ActiveModel {
            sub_category_name: Set(name.to_string()),
            asset_category_id: Set(category_id),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn insert_type<C: ConnectionTrait>(
        db: &C,
        name: &str,
        sub_category_id: i32,
    ) -> Result<asset_type::Model, DbErr> {
        asset_type::ActiveModel {
            asset_type: Set(name.to_string()),
            asset_sub_category_id: Set(sub_category_id),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn insert_make<C: ConnectionTrait>(
        db: &C,
        label: &str,
        type_id: i32,
    ) -> Result<asset_make::Model, DbErr> {
        asset_make::ActiveModel {
            make_label: Set(label.to_string()),
            asset_type_id: Set(type_id),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn insert_model_number<C: ConnectionTrait>(
        db: &C,
        number: &str,
        make_id: i32,
    ) -> Result<asset_model_number::Model, DbErr> {
        asset_model_number::ActiveModel {
            model_number: Set(number.to_string()),
            make_label_id: Set(make_id),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn category_in_use<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, DbErr> {
        let n = asset_sub_category::Entity::find()
            .filter(asset_sub_category::Column::AssetCategoryId.eq(id))
            .count(db)
            .await?;
        Ok(n > 0)
    }

    pub async fn sub_category_in_use<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, DbErr> {
        let n = asset_type::Entity::find()
            .filter(asset_type::Column::AssetSubCategoryId.eq(id))
            .count(db)
            .await?;
        Ok(n > 0)
    }

    pub async fn type_in_use<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, DbErr> {
        let n = asset_make::Entity::find()
            .filter(asset_make::Column::AssetTypeId.eq(id))
            .count(db)
            .await?;
        Ok(n > 0)
    }

    pub async fn make_in_use<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, DbErr> {
        let n = asset_model_number::Entity::find()
            .filter(asset_model_number::Column::MakeLabelId.eq(id))
            .count(db)
            .await?;
        Ok(n > 0)
    }

    pub async fn model_number_in_use<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, DbErr> {
        let n = asset::Entity::find()
            .filter(asset::Column::ModelNumberId.eq(id))
            .count(db)
            .await?;
        Ok(n > 0)
    }

    /// Walks up from a model number: (make, type, sub-category, category).
    pub async fn lineage<C: ConnectionTrait>(
        db: &C,
        model: &asset_model_number::Model,
    ) -> Result<
        (
            Option<asset_make::Model>,
            Option<asset_type::Model>,
            Option<asset_sub_category::Model>,
            Option<asset_category::Model>,
        ),
        DbErr,
    > {
        let make = asset_make::Entity::find_by_id(model.make_label_id).one(db).await?;
        let ty = match &make {
            Some(m) => asset_type::Entity::find_by_id(m.asset_type_id).one(db).await?,
            None => None,
        };
        let sub = match &ty {
            Some(t) => {
                asset_sub_category::Entity::find_by_id(t.asset_sub_category_id)
                    .one(db)
                    .await?
            }
            None => None,
        };
        let category = match &sub {
            Some(s) => {
                asset_category::Entity::find_by_id(s.asset_category_id)
                    .one(db)
                    .await?
            }
            None => None,
        };
        Ok((make, ty, sub, category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[tokio::test]
    async fn chain_and_usage() {
        let state = test_support::state().await;
        let db = &state.conn;
        let seeded = test_support::seed_model(db, "MBP-2017").await;
        let (make, ty, sub, category) = HierarchyRepo::lineage(db, &seeded).await.unwrap();
        let category = category.unwrap();
        assert_eq!(category.category_name, "Computers");
        assert!(HierarchyRepo::category_in_use(db, category.id).await.unwrap());
        assert!(HierarchyRepo::sub_category_in_use(db, sub.unwrap().id).await.unwrap());
        assert!(HierarchyRepo::type_in_use(db, ty.unwrap().id).await.unwrap());
        assert!(HierarchyRepo::make_in_use(db, make.unwrap().id).await.unwrap());
        assert!(!HierarchyRepo::model_number_in_use(db, seeded.id).await.unwrap());
        assert!(HierarchyRepo::find_model_by_number(db, " MBP-2017 ")
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn restrict_blocks_parent_delete() {
        let state = test_support::state().await;
        let db = &state.conn;
        let seeded = test_support::seed_model(db, "XPS-13").await;
        let res = asset_make::Entity::delete_by_id(seeded.make_label_id)
            .exec(db)
            .await;
        assert!(res.is_err());
        assert!(HierarchyRepo::find_make_by_label(db, "Make of XPS-13")
            .await
            .unwrap()
            .is_some());
    }
}
