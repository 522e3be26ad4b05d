use std::sync::Arc;

use aspects_domain::{
    AspectsOfNatureSystem, CharacterId, CharacterRecord, FieldMap, FieldValue, RoomId,
};
use chrono::{TimeZone, Utc};

use super::*;
use crate::infrastructure::clock::FixedClock;
use crate::infrastructure::memory::InMemoryCharacterRepo;
use crate::infrastructure::ports::{MockCharacterRepo, RepoError};

fn in_memory() -> CharacterSheetUseCases {
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    CharacterSheetUseCases::new(
        Arc::new(InMemoryCharacterRepo::new(Arc::new(FixedClock(now)))),
        Arc::new(AspectsOfNatureSystem::standard()),
    )
}

fn with_mock(repo: MockCharacterRepo) -> CharacterSheetUseCases {
    CharacterSheetUseCases::new(Arc::new(repo), Arc::new(AspectsOfNatureSystem::standard()))
}

async fn new_character(use_cases: &CharacterSheetUseCases) -> CharacterId {
    use_cases
        .create_character(RoomId::new(), "Ember", false)
        .await
        .unwrap()
        .character
        .id
}

fn bonds_of(character: &CharacterRecord) -> Vec<FieldValue> {
    character
        .data
        .get("bonds")
        .and_then(FieldValue::as_list)
        .map(<[FieldValue]>::to_vec)
        .unwrap_or_default()
}

#[tokio::test]
async fn create_character_seeds_system_defaults() {
    let use_cases = in_memory();

    let sheet = use_cases
        .create_character(RoomId::new(), "  Ember ", true)
        .await
        .unwrap();

    assert_eq!(sheet.character.name, "Ember");
    assert!(sheet.character.is_public);
    assert_eq!(sheet.system_id, "aspects");
    assert_eq!(
        sheet.character.data.get("attribute:Strength"),
        Some(&FieldValue::from(1))
    );
    assert_eq!(sheet.character.data.get("bonds"), Some(&FieldValue::List(vec![])));
    assert_eq!(sheet.calculated.get("hitsMax"), Some(&FieldValue::from(5)));
    assert_eq!(sheet.calculated.get("bondAspect"), Some(&FieldValue::from("Wind")));
    assert_eq!(sheet.calculated.get("total:aspect:Wind"), Some(&FieldValue::from(1)));
}

#[tokio::test]
async fn create_character_rejects_blank_name() {
    // No expectations: any repository call would fail the test.
    let use_cases = with_mock(MockCharacterRepo::new());

    let err = use_cases
        .create_character(RoomId::new(), "   ", false)
        .await
        .unwrap_err();

    assert!(matches!(err, CharacterSheetError::Domain(_)));
}

#[tokio::test]
async fn get_sheet_reports_missing_character() {
    let mut repo = MockCharacterRepo::new();
    repo.expect_get().returning(|_| Ok(None));
    let use_cases = with_mock(repo);

    let id = CharacterId::new();
    let err = use_cases.get_sheet(id).await.unwrap_err();

    assert!(matches!(err, CharacterSheetError::CharacterNotFound(missing) if missing == id));
}

#[tokio::test]
async fn update_field_persists_one_partial_per_write() {
    let character = CharacterRecord::new(RoomId::new(), "Ember");
    let id = character.id;

    let mut repo = MockCharacterRepo::new();
    let stored = character.clone();
    repo.expect_get()
        .withf(move |requested| *requested == id)
        .returning(move |_| Ok(Some(stored.clone())));
    repo.expect_patch_data()
        .withf(move |requested, partial| {
            *requested == id
                && partial.len() == 1
                && partial.get("damage") == Some(&FieldValue::from(7))
        })
        .times(1)
        .returning(move |_, partial| {
            let mut updated = character.clone();
            updated.apply_patch(partial, Utc::now());
            Ok(updated)
        });
    let use_cases = with_mock(repo);

    let result = use_cases
        .update_field(id, "damage", FieldValue::from("7"))
        .await
        .unwrap();

    assert_eq!(result.patches.len(), 1);
    assert_eq!(result.calculated.get("peril:damage"), Some(&FieldValue::from(1)));
}

#[tokio::test]
async fn update_field_clamps_through_the_schema() {
    let use_cases = in_memory();
    let id = new_character(&use_cases).await;

    let result = use_cases
        .update_field(id, "attribute:Strength", FieldValue::from(0))
        .await
        .unwrap();

    assert_eq!(
        result.character.data.get("attribute:Strength"),
        Some(&FieldValue::from(1))
    );
}

#[tokio::test]
async fn update_field_stores_unknown_ids_as_given() {
    let use_cases = in_memory();
    let id = new_character(&use_cases).await;

    let result = use_cases
        .update_field(id, "portrait", FieldValue::from("ember.png"))
        .await
        .unwrap();

    assert_eq!(
        result.character.data.get("portrait"),
        Some(&FieldValue::from("ember.png"))
    );
}

#[tokio::test]
async fn update_field_rejects_scalar_for_list() {
    let mut repo = MockCharacterRepo::new();
    repo.expect_get()
        .returning(|id| {
            let mut character = CharacterRecord::new(RoomId::new(), "Ember");
            character.id = id;
            Ok(Some(character))
        });
    repo.expect_patch_data().never();
    let use_cases = with_mock(repo);

    let err = use_cases
        .update_field(CharacterId::new(), "bonds", FieldValue::from(3))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CharacterSheetError::FieldValidation { field_id, .. } if field_id == "bonds"
    ));
}

#[tokio::test]
async fn bond_edits_recalculate_the_aspect_bonus() {
    let use_cases = in_memory();
    let id = new_character(&use_cases).await;

    use_cases.add_list_item(id, "bonds").await.unwrap();
    let result = use_cases
        .update_list_item_field(id, "bonds", 0, "strength", FieldValue::from(-1))
        .await
        .unwrap();
    assert_eq!(result.calculated.get("bondAspect"), Some(&FieldValue::from("Fire")));

    let result = use_cases
        .update_list_item_field(id, "bonds", 0, "strength", FieldValue::from(9))
        .await
        .unwrap();
    let bonds = bonds_of(&result.character);
    assert_eq!(
        bonds[0].as_object().and_then(|bond| bond.get("strength")),
        Some(&FieldValue::from(3))
    );
    assert_eq!(result.calculated.get("bondAspect"), Some(&FieldValue::from("Light")));

    let result = use_cases.duplicate_list_item(id, "bonds", 0).await.unwrap();
    assert_eq!(bonds_of(&result.character).len(), 2);

    let result = use_cases.remove_list_item(id, "bonds", 1).await.unwrap();
    assert_eq!(bonds_of(&result.character).len(), 1);
}

#[tokio::test]
async fn list_item_edits_outside_the_list_fail() {
    let use_cases = in_memory();
    let id = new_character(&use_cases).await;

    let err = use_cases.remove_list_item(id, "bonds", 0).await.unwrap_err();
    assert!(matches!(
        err,
        CharacterSheetError::ItemOutOfRange { index: 0, len: 0, .. }
    ));

    let err = use_cases
        .update_list_item_field(id, "milestones", 2, "notes", FieldValue::from("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, CharacterSheetError::ItemOutOfRange { .. }));
}

#[tokio::test]
async fn list_operations_require_a_list_field() {
    let use_cases = in_memory();
    let id = new_character(&use_cases).await;

    let err = use_cases.add_list_item(id, "damage").await.unwrap_err();
    assert!(matches!(err, CharacterSheetError::NotAList(list) if list == "damage"));
}

#[tokio::test]
async fn set_unconscious_enables_recovery_check() {
    let use_cases = in_memory();
    let id = new_character(&use_cases).await;

    let result = use_cases.set_unconscious(id, true).await.unwrap();

    assert_eq!(
        result.character.data.get("isUnconscious"),
        Some(&FieldValue::Bool(true))
    );
    assert_eq!(result.calculated.get("canRecover"), Some(&FieldValue::Bool(true)));
    assert_eq!(
        result.calculated.get("canFallUnconscious"),
        Some(&FieldValue::Bool(false))
    );
}

#[tokio::test]
async fn list_room_sheets_returns_only_that_room() {
    let use_cases = in_memory();
    let room = RoomId::new();
    use_cases.create_character(room, "Wren", true).await.unwrap();
    use_cases.create_character(room, "Ash", false).await.unwrap();
    use_cases
        .create_character(RoomId::new(), "Elsewhere", false)
        .await
        .unwrap();

    let sheets = use_cases.list_room_sheets(room).await.unwrap();

    let names: Vec<&str> = sheets.iter().map(|s| s.character.name.as_str()).collect();
    assert_eq!(names, vec!["Ash", "Wren"]);
}

#[tokio::test]
async fn delete_character_reports_missing() {
    let mut repo = MockCharacterRepo::new();
    repo.expect_delete().returning(|_| Ok(false));
    let use_cases = with_mock(repo);

    let err = use_cases
        .delete_character(CharacterId::new())
        .await
        .unwrap_err();
    assert!(matches!(err, CharacterSheetError::CharacterNotFound(_)));
}

#[tokio::test]
async fn repository_failures_surface_as_repo_errors() {
    let mut repo = MockCharacterRepo::new();
    repo.expect_get()
        .returning(|_| Err(RepoError::database("get", "connection reset")));
    let use_cases = with_mock(repo);

    let err = use_cases
        .set_unconscious(CharacterId::new(), true)
        .await
        .unwrap_err();
    assert!(matches!(err, CharacterSheetError::Repo(_)));
}

#[test]
fn calculate_needs_no_record() {
    let use_cases = in_memory();
    let values = FieldMap::from([("persona".to_string(), FieldValue::from("Commander"))]);

    let calculated = use_cases.calculate(&values);

    assert_eq!(calculated.get("fatigueMax"), Some(&FieldValue::from(6)));
}
