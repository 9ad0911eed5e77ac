use dinho_habit::{
    Argb, CreateHabitInput, DateKey, HabitPatch, HabitStore, HabitSync, Habits, HistoryMap, Icon,
};
use dinho_shared::Session;
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_create_and_find() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let habits = Habits::new(&state);

    let created = habits
        .command
        .create(CreateHabitInput::new(
            "  Read ",
            Icon::Book,
            Argb::from_packed(0xFF2196F3),
        ))
        .await?;

    assert_eq!(created.id.len(), 26);
    assert_eq!(created.name, "Read");
    assert!(created.history.is_empty());
    assert!(!created.archived);

    let loaded = habits.find(&created.id).await?;
    assert_eq!(loaded, created);
    assert_eq!(loaded.color.packed(), 0xFF2196F3);

    Ok(())
}

#[tokio::test]
async fn test_create_rejects_invalid_name() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let habits = Habits::new(&state);

    let err = habits
        .command
        .create(CreateHabitInput::new("", Icon::Book, Argb::default()))
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = habits
        .command
        .create(CreateHabitInput::new("x".repeat(101), Icon::Book, Argb::default()))
        .await
        .unwrap_err();
    assert!(err.is_validation());

    assert!(habits.list_filtered(None).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_list_keeps_creation_order() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let habits = Habits::new(&state);

    let mut ids = vec![];
    for name in ["Run", "Read", "Write", "Stretch"] {
        ids.push(helpers::create_habit(&habits, name).await?);
    }
    habits.toggle_archive(&ids[1]).await?;

    let all = habits.list_filtered(None).await?;
    assert_eq!(all.iter().map(|h| h.id.to_owned()).collect::<Vec<_>>(), ids);

    let archived = habits.list_filtered(Some(true)).await?;
    assert_eq!(archived.len(), 1);
    assert_eq!(archived[0].name, "Read");

    let active = habits.list_filtered(Some(false)).await?;
    assert_eq!(
        active.iter().map(|h| h.name.as_str()).collect::<Vec<_>>(),
        vec!["Run", "Write", "Stretch"]
    );

    Ok(())
}

#[tokio::test]
async fn test_update_replaces_present_fields() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let habits = Habits::new(&state);
    let id = helpers::create_habit(&habits, "Read").await?;

    let first = HistoryMap::new()
        .set(DateKey::parse("2024-01-01")?, true)
        .set(DateKey::parse("2024-01-02")?, true);
    habits.replace_history(&id, first).await?;

    // History is replaced whole, never merged per key.
    let second = HistoryMap::new().set(DateKey::parse("2024-01-03")?, false);
    let updated = habits.replace_history(&id, second.clone()).await?;
    assert_eq!(updated.history, second);
    assert!(updated.history.contains_key(&DateKey::parse("2024-01-03")?));

    let updated = habits
        .command
        .update(&id, HabitPatch::details("Read more", Icon::FileText, PALE))
        .await?;
    assert_eq!(updated.name, "Read more");
    assert_eq!(updated.icon, Icon::FileText);
    assert_eq!(updated.color, PALE);
    assert_eq!(updated.history, second);

    let unchanged = habits.command.update(&id, HabitPatch::default()).await?;
    assert_eq!(unchanged, updated);

    Ok(())
}

const PALE: Argb = Argb::new(0xFF, 0xE0, 0xE0, 0xE0);

#[tokio::test]
async fn test_missing_habit_is_not_found() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let habits = Habits::new(&state);
    let missing = "01J00000000000000000000000";

    assert_eq!(habits.find(missing).await.unwrap_err().kind(), "NotFound");
    assert_eq!(
        habits
            .command
            .update(missing, HabitPatch::archived(true))
            .await
            .unwrap_err()
            .kind(),
        "NotFound"
    );
    assert_eq!(
        habits.toggle_archive(missing).await.unwrap_err().kind(),
        "NotFound"
    );
    assert_eq!(
        habits.command.remove(missing).await.unwrap_err().kind(),
        "NotFound"
    );

    Ok(())
}

#[tokio::test]
async fn test_toggle_archive_flips_back_and_forth() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let habits = Habits::new(&state);
    let id = helpers::create_habit(&habits, "Run").await?;

    assert!(habits.toggle_archive(&id).await?.archived);
    assert!(!habits.toggle_archive(&id).await?.archived);

    Ok(())
}

#[tokio::test]
async fn test_habit_lifecycle_through_sync() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let sync = HabitSync::new(Habits::new(&state), Session::anonymous());

    let habit = sync
        .create(CreateHabitInput::new(
            "Read",
            Icon::Book,
            Argb::from_packed(0xFF2196F3),
        ))
        .await?;
    assert!(habit.history.is_empty());

    let toggled = sync.toggle_str(&habit.id, "2024-06-01").await?;
    assert!(toggled.history.get(&DateKey::parse("2024-06-01")?));
    assert!(!sync.is_pending(&habit.id));

    let archived = sync.toggle_archive(&habit.id).await?;
    assert!(archived.archived);
    assert!(archived.history.get(&DateKey::parse("2024-06-01")?));
    assert!(sync.active().is_empty());
    assert_eq!(sync.archived().len(), 1);

    sync.remove(&habit.id).await?;
    assert!(sync.displayed(&habit.id).is_none());

    let err = sync.store().get(&Session::anonymous(), &habit.id).await.unwrap_err();
    assert_eq!(err.kind(), "NotFound");
    assert!(sync.refresh().await?.is_empty());

    Ok(())
}
