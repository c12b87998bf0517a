use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use lineup_core::save::{decode_slots, formation_key};
use lineup_core::{
    BoardState, FileStore, FormationBoard, JsonFileSink, KeyValueStore, LineupSheet, PhotoMap,
    Player, PlayerRole, Roster, SaveError, TemplateCatalog, WriteQueue,
};

/// File store that can be switched off and slows down early writes.
struct FlakyFileStore {
    inner: FileStore,
    offline: AtomicBool,
    writes: AtomicUsize,
}

impl FlakyFileStore {
    fn new(root: &std::path::Path) -> Self {
        Self { inner: FileStore::new(root), offline: AtomicBool::new(false), writes: AtomicUsize::new(0) }
    }
}

impl KeyValueStore for FlakyFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, SaveError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, blob: &str) -> Result<(), SaveError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(SaveError::Unavailable("disk unplugged".into()));
        }
        if self.writes.fetch_add(1, Ordering::SeqCst) < 3 {
            std::thread::sleep(Duration::from_millis(20));
        }
        self.inner.set(key, blob)
    }
}

fn open(store: Arc<dyn KeyValueStore>, template: &str) -> FormationBoard {
    let writes = WriteQueue::on_current_runtime(store).unwrap();
    FormationBoard::open(TemplateCatalog::global(), writes, template).unwrap()
}

fn stored(store: &dyn KeyValueStore, template: &str) -> BoardState {
    let key = formation_key(template);
    let blob = store.get(&key).unwrap().expect("board was written");
    BoardState::from_persisted(template, decode_slots(&key, &blob).unwrap())
}

#[tokio::test]
async fn burst_of_moves_leaves_last_state_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FlakyFileStore::new(dir.path()));
    let mut board = open(store.clone(), "4-3-3");

    board.assign("PC", "nuti").unwrap();
    for step in 0..25 {
        board.reposition("PC", 30.0 + step as f64, 20.0).unwrap();
    }
    board.flush().await;

    let on_disk = stored(store.as_ref(), "4-3-3");
    assert_eq!(&on_disk, board.state());
    let pc = on_disk.slot("PC").unwrap();
    assert_eq!((pc.x, pc.y), (54.0, 20.0));

    // a fresh session reads the same board back
    drop(board);
    let reopened = open(Arc::new(FileStore::new(dir.path())), "4-3-3");
    assert_eq!(reopened.state(), &on_disk);
}

#[tokio::test]
async fn failed_write_notice_clears_after_retry() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FlakyFileStore::new(dir.path()));
    let mut board = open(store.clone(), "4-4-2");

    store.offline.store(true, Ordering::SeqCst);
    board.assign("GK", "beccari").unwrap();
    board.reposition("GK", 50.0, 95.0).unwrap();
    board.flush().await;

    let notice = board.persistence_notice().expect("notice after failed write");
    assert_eq!(notice.key, "formation/4-4-2");
    assert!(store.get("formation/4-4-2").unwrap().is_none());

    store.offline.store(false, Ordering::SeqCst);
    board.retry_persist();
    board.flush().await;

    assert!(board.persistence_notice().is_none());
    assert_eq!(&stored(store.as_ref(), "4-4-2"), board.state());
}

#[tokio::test]
async fn switching_back_restores_each_template() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path()));
    let mut board = open(store.clone(), "4-4-2");

    board.assign("GK", "beccari").unwrap();
    board.reposition("DL", 5.0, 70.0).unwrap();
    let four_four_two = board.state().clone();

    board.switch_template("3-5-2", false).unwrap();
    board.assign("REG", "salvucci").unwrap();
    let three_five_two = board.state().clone();

    board.switch_template("4-4-2", false).unwrap();
    assert_eq!(board.state(), &four_four_two);
    board.switch_template("3-5-2", false).unwrap();
    assert_eq!(board.state(), &three_five_two);

    board.flush().await;
    let reopened = open(store, "4-4-2");
    assert_eq!(reopened.state(), &four_four_two);
}

#[tokio::test]
async fn preserve_switch_carries_full_lineup() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path()));
    let mut board = open(store.clone(), "4-4-2");

    let ids: Vec<String> = board.state().slots.iter().map(|s| s.id.clone()).collect();
    for (i, id) in ids.iter().enumerate() {
        board.assign(id, &format!("player-{i}")).unwrap();
    }
    let before: Vec<String> = board.state().assigned_players().iter().map(|p| p.to_string()).collect();

    let dropped = board.switch_template("3-5-2", true).unwrap();
    assert!(dropped.is_empty());

    let after = board.state();
    assert_eq!(after.assigned_count(), 11);
    assert!(after.has_unique_assignments());
    for player in &before {
        assert!(after.slot_of(player).is_some(), "{player} lost in the switch");
    }
    // positions come from the 3-5-2 template
    let t352 = TemplateCatalog::global().get_template("3-5-2").unwrap();
    for (slot, def) in after.slots.iter().zip(t352.slots) {
        assert_eq!((slot.id.as_str(), slot.x, slot.y), (def.id, def.x, def.y));
    }

    board.flush().await;
    assert_eq!(&stored(store.as_ref(), "3-5-2"), board.state());
}

#[tokio::test]
async fn legacy_blob_is_loaded_and_sanitized() {
    let dir = tempfile::tempdir().unwrap();
    let formation_dir = dir.path().join("formation");
    std::fs::create_dir_all(&formation_dir).unwrap();
    std::fs::write(
        formation_dir.join("3-5-2.json"),
        r#"[
            {"id":"GK","role":"PORTIERE","x":50,"y":92,"playerId":"beccari"},
            {"id":"DF1","role":"DIFENSORE","x":-12,"y":74},
            {"id":"REG","role":"CENTROCAMPISTA","x":50,"y":160,"playerId":"salvucci"},
            {"id":"AT1","role":"ATTACCANTE","x":42,"y":22,"playerId":"beccari"},
            {"id":"TREQ","role":"CENTROCAMPISTA","x":50,"y":40,"playerId":"sisani"},
            {"id":"ED","role":"CENTROCAMPISTA","x":33.333333333333336,"y":56.1}
        ]"#,
    )
    .unwrap();

    let board = open(Arc::new(FileStore::new(dir.path())), "3-5-2");
    let state = board.state();
    let t352 = TemplateCatalog::global().get_template("3-5-2").unwrap();

    // realigned onto the full template, in template order
    let ids: Vec<&str> = state.slots.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, t352.slots.iter().map(|d| d.id).collect::<Vec<_>>());
    assert_eq!(state.slot("GK").unwrap().role, PlayerRole::Goalkeeper);
    assert_eq!(state.slot("DF1").unwrap().x, 0.0);
    assert_eq!(state.slot("REG").unwrap().y, 100.0);
    assert_eq!(state.slot("ED").unwrap().x, 33.333333333333336);
    let df2 = state.slot("DF2").unwrap();
    assert_eq!((df2.x, df2.y), (50.0, 74.0));
    // second occurrence of a player is dropped, unknown slots too
    assert_eq!(state.slot("AT1").unwrap().player_id, None);
    assert!(state.slot_of("sisani").is_none());
    assert!(state.has_unique_assignments());
    assert!(board.persistence_notice().is_none());
}

#[tokio::test]
async fn failed_write_of_left_board_is_retried_after_switch() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FlakyFileStore::new(dir.path()));
    let mut board = open(store.clone(), "4-4-2");

    store.offline.store(true, Ordering::SeqCst);
    board.assign("GK", "beccari").unwrap();
    board.flush().await;
    assert!(board.persistence_notice().is_some());

    board.switch_template("3-5-2", false).unwrap();
    let notice = board.persistence_notice().expect("4-4-2 still unsaved");
    assert_eq!(notice.key, "formation/4-4-2");

    store.offline.store(false, Ordering::SeqCst);
    board.assign("REG", "salvucci").unwrap();
    board.retry_persist();
    board.flush().await;

    assert!(board.persistence_notices().is_empty());
    let left = stored(store.as_ref(), "4-4-2");
    assert_eq!(left.slot("GK").unwrap().player_id.as_deref(), Some("beccari"));

    // a new session sees it too
    drop(board);
    let reopened = open(Arc::new(FileStore::new(dir.path())), "4-4-2");
    assert_eq!(reopened.state().assigned_count(), 1);
}

#[tokio::test]
async fn export_of_persisted_board() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path().join("data")));
    store.set("players/photos", r#"{"nuti":"file:///nuti.jpg","beccari":null}"#).unwrap();
    let roster = Roster::new(vec![
        Player::new("beccari", "BECCARI GABRIELE", PlayerRole::Goalkeeper).with_year(2008),
        Player::new("nuti", "NUTI FRANCESCO", PlayerRole::Forward).with_year(2009),
    ]);

    let mut board = open(store.clone(), "4-2-3-1");
    board.assign("GK", "beccari").unwrap();
    board.assign("PC", "nuti").unwrap();
    board.flush().await;

    let sheet = LineupSheet::from_board(board.state(), &roster, &PhotoMap::load(store.as_ref()));
    let path = JsonFileSink::new(dir.path().join("exports")).write(&sheet).unwrap();
    let json = std::fs::read_to_string(path).unwrap();
    assert!(json.contains("NUTI FRANCESCO"));
    assert!(json.contains("file:///nuti.jpg"));
    assert_eq!(sheet.filled_rows().count(), 2);
}
