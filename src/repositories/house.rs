//! # House Repository
//!
//! Aggregate writer and read-side presenter for the house editor. One save
//! rewrites the whole composite: sections and floors are destroyed and
//! recreated, the gallery is replaced only when new files arrived, and the
//! staff set is replaced wholesale, all inside a single transaction.

use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::error::RepositoryError;
use crate::forms::HouseBundle;
use crate::models::{
    floor, house, house_image, house_staff, section, user,
    Floor, House, HouseImage, HouseStaff, Section, User,
};
use crate::storage::MediaStorage;

/// One staff member row of the house detail view.
#[derive(Debug, Clone)]
pub struct StaffMember {
    pub user_id: i32,
    pub display_name: String,
    pub role_name: Option<String>,
}

/// Read model assembled for the house detail view.
#[derive(Debug, Clone)]
pub struct HouseDetail {
    pub house: house::Model,
    pub sections_count: u64,
    /// Floor count of the *first* section only, kept for parity with the
    /// historical detail page. This is not an aggregate: sections saved in
    /// one cycle always share a floor count, but data predating that rule
    /// may differ per section; consult `section_floor_counts` for the
    /// truthful map.
    pub floors_per_section: u64,
    /// Per-section floor counts, ordered by section id.
    pub section_floor_counts: Vec<(String, u64)>,
    /// First five gallery rows by position.
    pub gallery: Vec<house_image::Model>,
    pub staff: Vec<StaffMember>,
}

/// Pre-populated editor state for the edit form.
#[derive(Debug, Clone)]
pub struct HouseEditorState {
    pub house: house::Model,
    pub section_names: Vec<String>,
    pub floor_numbers: Vec<i32>,
    pub staff_ids: Vec<i32>,
    pub gallery_paths: Vec<String>,
}

/// Repository for house aggregate operations.
pub struct HouseRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> HouseRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// List houses ordered by id, newest page layout left to the caller.
    pub async fn list_houses(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<house::Model>, u64), RepositoryError> {
        let paginator = House::find()
            .order_by_asc(house::Column::Id)
            .paginate(self.db, per_page.max(1));
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((rows, total))
    }

    pub async fn get_house(&self, id: i32) -> Result<Option<house::Model>, RepositoryError> {
        Ok(House::find_by_id(id).one(self.db).await?)
    }

    /// Persist a validated bundle, creating the house when `target` is
    /// `None`. Uploaded files are written to the media root first and
    /// unlinked again if the transaction does not commit.
    pub async fn save_bundle(
        &self,
        storage: &MediaStorage,
        target: Option<i32>,
        bundle: HouseBundle,
    ) -> Result<house::Model, RepositoryError> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        let (house, is_create) = match target {
            None => {
                let model = house::ActiveModel {
                    name: Set(bundle.name.clone()),
                    address: Set(bundle.address.clone()),
                    created_at: Set(now.into()),
                    updated_at: Set(now.into()),
                    ..Default::default()
                };
                (model.insert(&txn).await?, true)
            }
            Some(id) => {
                let existing = House::find_by_id(id)
                    .one(&txn)
                    .await?
                    .ok_or_else(|| RepositoryError::NotFound(format!("house {} not found", id)))?;
                let mut active = existing.into_active_model();
                active.name = Set(bundle.name.clone());
                active.address = Set(bundle.address.clone());
                active.updated_at = Set(now.into());
                (active.update(&txn).await?, false)
            }
        };

        // Files hit the disk before their rows exist; a failed save below
        // must unlink them again.
        let mut stored_paths = Vec::with_capacity(bundle.images.len());
        for upload in &bundle.images {
            match storage
                .store_house_image(house.id, &upload.file_name, &upload.bytes)
                .await
            {
                Ok(path) => stored_paths.push(path),
                Err(err) => {
                    drop(txn);
                    storage.remove_files(&stored_paths).await;
                    return Err(RepositoryError::storage_error(err));
                }
            }
        }

        match Self::write_children(&txn, &house, &bundle, &stored_paths, is_create).await {
            Ok(replaced_paths) => {
                txn.commit().await?;
                // Old gallery files are only unlinked once the rows that
                // referenced them are durably gone.
                storage.remove_files(&replaced_paths).await;
                Ok(house)
            }
            Err(err) => {
                drop(txn);
                storage.remove_files(&stored_paths).await;
                Err(err)
            }
        }
    }

    /// Rewrites gallery, sections/floors and staff for `house` inside the
    /// open transaction. Returns the relative paths of gallery files whose
    /// rows were replaced.
    async fn write_children(
        txn: &DatabaseTransaction,
        house: &house::Model,
        bundle: &HouseBundle,
        stored_paths: &[String],
        is_create: bool,
    ) -> Result<Vec<String>, RepositoryError> {
        let now = Utc::now();

        // Gallery: replace-all, but only when this submission carried at
        // least one new file; otherwise the existing rows stay untouched.
        let mut replaced_paths = Vec::new();
        if !stored_paths.is_empty() {
            if !is_create {
                let existing = HouseImage::find()
                    .filter(house_image::Column::HouseId.eq(house.id))
                    .all(txn)
                    .await?;
                replaced_paths = existing.iter().map(|row| row.file_path.clone()).collect();
                HouseImage::delete_many()
                    .filter(house_image::Column::HouseId.eq(house.id))
                    .exec(txn)
                    .await?;
            }
            for (position, path) in stored_paths.iter().enumerate() {
                house_image::ActiveModel {
                    house_id: Set(house.id),
                    file_path: Set(path.clone()),
                    position: Set(position as i32),
                    created_at: Set(now.into()),
                    ..Default::default()
                }
                .insert(txn)
                .await?;
            }
        }

        // Sections and floors: destroy and recreate. Floors are not tied to
        // individual sections by the input; every recreated section receives
        // the identical floor-number set.
        let old_section_ids: Vec<i32> = Section::find()
            .filter(section::Column::HouseId.eq(house.id))
            .select_only()
            .column(section::Column::Id)
            .into_tuple()
            .all(txn)
            .await?;
        if !old_section_ids.is_empty() {
            Floor::delete_many()
                .filter(floor::Column::SectionId.is_in(old_section_ids.clone()))
                .exec(txn)
                .await?;
            Section::delete_many()
                .filter(section::Column::HouseId.eq(house.id))
                .exec(txn)
                .await?;
        }
        for name in &bundle.section_names {
            let created = section::ActiveModel {
                house_id: Set(house.id),
                name: Set(name.clone()),
                ..Default::default()
            }
            .insert(txn)
            .await?;
            for number in &bundle.floor_numbers {
                floor::ActiveModel {
                    section_id: Set(created.id),
                    number: Set(*number),
                    ..Default::default()
                }
                .insert(txn)
                .await?;
            }
        }

        // Staff: replace the assignment set. An empty surviving list clears
        // the set on create and update alike (the historical editor skipped
        // the mutation on create; see DESIGN.md).
        HouseStaff::delete_many()
            .filter(house_staff::Column::HouseId.eq(house.id))
            .exec(txn)
            .await?;
        for user_id in &bundle.staff_ids {
            house_staff::ActiveModel {
                house_id: Set(house.id),
                user_id: Set(*user_id),
            }
            .insert(txn)
            .await?;
        }

        Ok(replaced_paths)
    }

    /// Assemble the detail read model, or `None` for an unknown id.
    pub async fn house_detail(&self, id: i32) -> Result<Option<HouseDetail>, RepositoryError> {
        let Some(house) = House::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let sections = Section::find()
            .filter(section::Column::HouseId.eq(id))
            .order_by_asc(section::Column::Id)
            .all(self.db)
            .await?;

        let mut section_floor_counts = Vec::with_capacity(sections.len());
        for s in &sections {
            let count = Floor::find()
                .filter(floor::Column::SectionId.eq(s.id))
                .count(self.db)
                .await?;
            section_floor_counts.push((s.name.clone(), count));
        }
        let floors_per_section = section_floor_counts
            .first()
            .map(|(_, count)| *count)
            .unwrap_or(0);

        let gallery = HouseImage::find()
            .filter(house_image::Column::HouseId.eq(id))
            .order_by_asc(house_image::Column::Position)
            .limit(5)
            .all(self.db)
            .await?;

        let staff = self.house_staff(id).await?;

        Ok(Some(HouseDetail {
            sections_count: sections.len() as u64,
            floors_per_section,
            section_floor_counts,
            gallery,
            staff,
            house,
        }))
    }

    async fn house_staff(&self, house_id: i32) -> Result<Vec<StaffMember>, RepositoryError> {
        let assigned: Vec<i32> = HouseStaff::find()
            .filter(house_staff::Column::HouseId.eq(house_id))
            .select_only()
            .column(house_staff::Column::UserId)
            .into_tuple()
            .all(self.db)
            .await?;
        if assigned.is_empty() {
            return Ok(Vec::new());
        }

        let users = User::find()
            .filter(user::Column::Id.is_in(assigned))
            .find_also_related(crate::models::Role)
            .order_by_asc(user::Column::Id)
            .all(self.db)
            .await?;

        Ok(users
            .into_iter()
            .map(|(u, role)| StaffMember {
                user_id: u.id,
                display_name: u.display_name(),
                role_name: role.map(|r| r.name),
            })
            .collect())
    }

    /// Editor pre-population for the edit form. Floor numbers are read from
    /// the first section; all sections saved by this editor carry the same
    /// set.
    pub async fn editor_state(&self, id: i32) -> Result<Option<HouseEditorState>, RepositoryError> {
        let Some(house) = House::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let sections = Section::find()
            .filter(section::Column::HouseId.eq(id))
            .order_by_asc(section::Column::Id)
            .all(self.db)
            .await?;
        let floor_numbers = match sections.first() {
            Some(first) => Floor::find()
                .filter(floor::Column::SectionId.eq(first.id))
                .order_by_asc(floor::Column::Id)
                .all(self.db)
                .await?
                .into_iter()
                .map(|f| f.number)
                .collect(),
            None => Vec::new(),
        };

        let staff_ids: Vec<i32> = HouseStaff::find()
            .filter(house_staff::Column::HouseId.eq(id))
            .order_by_asc(house_staff::Column::UserId)
            .select_only()
            .column(house_staff::Column::UserId)
            .into_tuple()
            .all(self.db)
            .await?;

        let gallery_paths = HouseImage::find()
            .filter(house_image::Column::HouseId.eq(id))
            .order_by_asc(house_image::Column::Position)
            .all(self.db)
            .await?
            .into_iter()
            .map(|row| row.file_path)
            .collect();

        Ok(Some(HouseEditorState {
            house,
            section_names: sections.into_iter().map(|s| s.name).collect(),
            floor_numbers,
            staff_ids,
            gallery_paths,
        }))
    }

    /// Staff-id → role-name map served to the editor form for client-side
    /// auto-fill, alongside the selectable staff users.
    pub async fn staff_options(
        &self,
    ) -> Result<(Vec<StaffMember>, BTreeMap<i32, String>), RepositoryError> {
        let users = User::find()
            .filter(user::Column::IsStaff.eq(true))
            .find_also_related(crate::models::Role)
            .order_by_asc(user::Column::Id)
            .all(self.db)
            .await?;

        let mut role_map = BTreeMap::new();
        let mut members = Vec::with_capacity(users.len());
        for (u, role) in users {
            let role_name = role.map(|r| r.name);
            if let Some(name) = &role_name {
                role_map.insert(u.id, name.clone());
            }
            members.push(StaffMember {
                user_id: u.id,
                display_name: u.display_name(),
                role_name,
            });
        }
        Ok((members, role_map))
    }

    /// Deletes a house and, through cascades, its children. A protective
    /// reference (messages pointing at the house) rejects the delete with a
    /// user-visible message; the house and its children stay unchanged.
    pub async fn delete_house(
        &self,
        storage: &MediaStorage,
        id: i32,
    ) -> Result<(), RepositoryError> {
        let house = House::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("house {} not found", id)))?;

        let gallery_paths: Vec<String> = HouseImage::find()
            .filter(house_image::Column::HouseId.eq(id))
            .all(self.db)
            .await?
            .into_iter()
            .map(|row| row.file_path)
            .collect();

        sea_orm::ModelTrait::delete(house, self.db)
            .await
            .map_err(|err| {
                RepositoryError::database_or_protected(
                    err,
                    "The house is referenced by messages and cannot be deleted",
                )
            })?;

        storage.remove_files(&gallery_paths).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{HouseBundle, ImageUpload};
    use sea_orm::{ConnectOptions, Database};

    async fn setup_test_db() -> DatabaseConnection {
        let mut opt = ConnectOptions::new("sqlite::memory:".to_owned());
        opt.max_connections(1).sqlx_logging(false);
        let db = Database::connect(opt).await.expect("Failed to init test DB");

        use migration::MigratorTrait;
        migration::Migrator::up(&db, None).await.unwrap();
        db
    }

    fn media() -> (tempfile::TempDir, MediaStorage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = MediaStorage::new(dir.path());
        (dir, storage)
    }

    fn bundle(sections: &[&str], floors: &[i32], staff: &[i32]) -> HouseBundle {
        HouseBundle {
            name: "Sunrise Tower".to_string(),
            address: "1 Main St".to_string(),
            images: Vec::new(),
            section_names: sections.iter().map(|s| s.to_string()).collect(),
            floor_numbers: floors.to_vec(),
            staff_ids: staff.to_vec(),
        }
    }

    async fn insert_staff_user(db: &DatabaseConnection, email: &str) -> i32 {
        user::ActiveModel {
            username: Set(email.to_string()),
            email: Set(email.to_string()),
            password_hash: Set("x".to_string()),
            first_name: Set(String::new()),
            last_name: Set(String::new()),
            patronymic: Set(String::new()),
            phone: Set(String::new()),
            telegram: Set(String::new()),
            viber: Set(String::new()),
            birth_date: Set(None),
            role_id: Set(None),
            is_active: Set(true),
            is_staff: Set(true),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn test_create_builds_cross_product() {
        let db = setup_test_db().await;
        let (_dir, storage) = media();
        let repo = HouseRepository::new(&db);

        let house = repo
            .save_bundle(&storage, None, bundle(&["A", "B"], &[1, 2, 3], &[]))
            .await
            .unwrap();

        let detail = repo.house_detail(house.id).await.unwrap().unwrap();
        assert_eq!(detail.sections_count, 2);
        assert_eq!(detail.floors_per_section, 3);
        assert_eq!(
            detail.section_floor_counts,
            vec![("A".to_string(), 3), ("B".to_string(), 3)]
        );

        let floor_total = Floor::find().count(&db).await.unwrap();
        assert_eq!(floor_total, 6);
    }

    #[tokio::test]
    async fn test_update_replaces_sections_and_floors() {
        let db = setup_test_db().await;
        let (_dir, storage) = media();
        let repo = HouseRepository::new(&db);

        let house = repo
            .save_bundle(&storage, None, bundle(&["A", "B"], &[1, 2], &[]))
            .await
            .unwrap();

        repo.save_bundle(&storage, Some(house.id), bundle(&["C"], &[7], &[]))
            .await
            .unwrap();

        let sections = Section::find().all(&db).await.unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, "C");

        let floors = Floor::find().all(&db).await.unwrap();
        assert_eq!(floors.len(), 1);
        assert_eq!(floors[0].number, 7);
    }

    #[tokio::test]
    async fn test_update_with_empty_lists_clears_children() {
        let db = setup_test_db().await;
        let (_dir, storage) = media();
        let repo = HouseRepository::new(&db);

        let house = repo
            .save_bundle(&storage, None, bundle(&["A", "B"], &[1, 2, 3], &[]))
            .await
            .unwrap();

        repo.save_bundle(&storage, Some(house.id), bundle(&[], &[], &[]))
            .await
            .unwrap();

        assert_eq!(Section::find().count(&db).await.unwrap(), 0);
        assert_eq!(Floor::find().count(&db).await.unwrap(), 0);

        let detail = repo.house_detail(house.id).await.unwrap().unwrap();
        assert_eq!(detail.sections_count, 0);
        assert_eq!(detail.floors_per_section, 0);
    }

    #[tokio::test]
    async fn test_gallery_untouched_without_new_files() {
        let db = setup_test_db().await;
        let (_dir, storage) = media();
        let repo = HouseRepository::new(&db);

        let mut initial = bundle(&["A"], &[1], &[]);
        initial.images = vec![
            ImageUpload {
                file_name: "front.png".to_string(),
                bytes: vec![1, 2, 3],
            },
            ImageUpload {
                file_name: "back.jpg".to_string(),
                bytes: vec![4, 5],
            },
        ];
        let house = repo.save_bundle(&storage, None, initial).await.unwrap();

        let before = HouseImage::find().all(&db).await.unwrap();
        assert_eq!(before.len(), 2);

        // Edit with zero new files: gallery rows must be byte-identical.
        repo.save_bundle(&storage, Some(house.id), bundle(&["B"], &[2], &[]))
            .await
            .unwrap();

        let after = HouseImage::find().all(&db).await.unwrap();
        assert_eq!(before, after);
        for row in &after {
            assert!(storage.resolve(&row.file_path).exists());
        }
    }

    #[tokio::test]
    async fn test_gallery_replaced_when_new_files_supplied() {
        let db = setup_test_db().await;
        let (_dir, storage) = media();
        let repo = HouseRepository::new(&db);

        let mut initial = bundle(&[], &[], &[]);
        initial.images = vec![ImageUpload {
            file_name: "old.png".to_string(),
            bytes: vec![1],
        }];
        let house = repo.save_bundle(&storage, None, initial).await.unwrap();
        let old_path = HouseImage::find().one(&db).await.unwrap().unwrap().file_path;

        let mut edit = bundle(&[], &[], &[]);
        edit.images = vec![ImageUpload {
            file_name: "new.png".to_string(),
            bytes: vec![2],
        }];
        repo.save_bundle(&storage, Some(house.id), edit).await.unwrap();

        let rows = HouseImage::find().all(&db).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_ne!(rows[0].file_path, old_path);
        assert!(!storage.resolve(&old_path).exists());
        assert!(storage.resolve(&rows[0].file_path).exists());
    }

    #[tokio::test]
    async fn test_staff_set_replaced_and_cleared() {
        let db = setup_test_db().await;
        let (_dir, storage) = media();
        let repo = HouseRepository::new(&db);

        let alice = insert_staff_user(&db, "alice@example.com").await;
        let bob = insert_staff_user(&db, "bob@example.com").await;

        let house = repo
            .save_bundle(&storage, None, bundle(&[], &[], &[alice, bob]))
            .await
            .unwrap();
        assert_eq!(HouseStaff::find().count(&db).await.unwrap(), 2);

        repo.save_bundle(&storage, Some(house.id), bundle(&[], &[], &[bob]))
            .await
            .unwrap();
        let rows = HouseStaff::find().all(&db).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user_id, bob);

        // An empty list clears the set on update.
        repo.save_bundle(&storage, Some(house.id), bundle(&[], &[], &[]))
            .await
            .unwrap();
        assert_eq!(HouseStaff::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_empty_staff_on_create_yields_empty_set() {
        let db = setup_test_db().await;
        let (_dir, storage) = media();
        let repo = HouseRepository::new(&db);

        let house = repo
            .save_bundle(&storage, None, bundle(&["A"], &[1], &[]))
            .await
            .unwrap();
        assert_eq!(
            HouseStaff::find()
                .filter(house_staff::Column::HouseId.eq(house.id))
                .count(&db)
                .await
                .unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_update_missing_house_not_found() {
        let db = setup_test_db().await;
        let (_dir, storage) = media();
        let repo = HouseRepository::new(&db);

        let err = repo
            .save_bundle(&storage, Some(9999), bundle(&[], &[], &[]))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_house_with_message_is_protected() {
        let db = setup_test_db().await;
        let (_dir, storage) = media();
        let repo = HouseRepository::new(&db);

        let house = repo
            .save_bundle(&storage, None, bundle(&["A"], &[1], &[]))
            .await
            .unwrap();

        crate::models::message::ActiveModel {
            subject: Set("Water outage".to_string()),
            body: Set("Planned maintenance".to_string()),
            house_id: Set(house.id),
            section_id: Set(None),
            floor_id: Set(None),
            only_debtors: Set(false),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let err = repo.delete_house(&storage, house.id).await.unwrap_err();
        assert!(matches!(err, RepositoryError::ProtectedReference(_)));

        // House and children unchanged after the rejected delete.
        assert!(repo.get_house(house.id).await.unwrap().is_some());
        assert_eq!(Section::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_house_cascades() {
        let db = setup_test_db().await;
        let (_dir, storage) = media();
        let repo = HouseRepository::new(&db);

        let mut b = bundle(&["A", "B"], &[1, 2], &[]);
        b.images = vec![ImageUpload {
            file_name: "front.png".to_string(),
            bytes: vec![1],
        }];
        let house = repo.save_bundle(&storage, None, b).await.unwrap();
        let path = HouseImage::find().one(&db).await.unwrap().unwrap().file_path;

        repo.delete_house(&storage, house.id).await.unwrap();

        assert!(repo.get_house(house.id).await.unwrap().is_none());
        assert_eq!(Section::find().count(&db).await.unwrap(), 0);
        assert_eq!(Floor::find().count(&db).await.unwrap(), 0);
        assert_eq!(HouseImage::find().count(&db).await.unwrap(), 0);
        assert!(!storage.resolve(&path).exists());
    }

    #[tokio::test]
    async fn test_editor_state_prefills_bundle() {
        let db = setup_test_db().await;
        let (_dir, storage) = media();
        let repo = HouseRepository::new(&db);

        let alice = insert_staff_user(&db, "alice@example.com").await;
        let house = repo
            .save_bundle(&storage, None, bundle(&["A", "B"], &[1, 2, 3], &[alice]))
            .await
            .unwrap();

        let state = repo.editor_state(house.id).await.unwrap().unwrap();
        assert_eq!(state.section_names, vec!["A", "B"]);
        assert_eq!(state.floor_numbers, vec![1, 2, 3]);
        assert_eq!(state.staff_ids, vec![alice]);
        assert!(state.gallery_paths.is_empty());
    }

    #[tokio::test]
    async fn test_staff_options_role_map() {
        let db = setup_test_db().await;
        let repo = HouseRepository::new(&db);

        let role = crate::models::role::ActiveModel {
            name: Set("Plumber".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let alice = insert_staff_user(&db, "alice@example.com").await;
        let mut active = User::find_by_id(alice)
            .one(&db)
            .await
            .unwrap()
            .unwrap()
            .into_active_model();
        active.role_id = Set(Some(role.id));
        active.update(&db).await.unwrap();

        let bob = insert_staff_user(&db, "bob@example.com").await;

        let (members, role_map) = repo.staff_options().await.unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(role_map.get(&alice).map(String::as_str), Some("Plumber"));
        assert!(!role_map.contains_key(&bob));
    }
}
