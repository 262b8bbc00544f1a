use super::*;
use crate::library::Track;
use crate::store::{MemoryStorage, QUEUE_KEY, QueueStore, Storage};

fn t(id: &str) -> Track {
    Track::new(id, id.to_uppercase()).with_audio("320kbps", &format!("file:///music/{id}.mp3"))
}

fn ids(q: &QueueManager<MemoryStorage>) -> Vec<&str> {
    q.tracks().iter().map(|t| t.id.as_str()).collect()
}

fn abc(current: usize) -> (QueueManager<MemoryStorage>, MemoryStorage) {
    let storage = MemoryStorage::new();
    let mut q = QueueManager::new(storage.clone());
    q.set_queue(vec![t("a"), t("b"), t("c")], current);
    (q, storage)
}

fn persisted(storage: &MemoryStorage) -> (Vec<String>, usize) {
    let snap = QueueStore::new(storage.clone()).load().unwrap();
    (
        snap.queue.into_iter().map(|t| t.id).collect(),
        snap.current_index,
    )
}

fn assert_invariant(q: &QueueManager<MemoryStorage>) {
    if !q.is_empty() {
        assert!(
            q.current_index() < q.len(),
            "current {} out of range for len {}",
            q.current_index(),
            q.len()
        );
    }
}

#[test]
fn move_up_carries_current_track_with_it() {
    let (mut q, storage) = abc(1);
    assert!(q.move_up(1));
    assert_eq!(ids(&q), vec!["b", "a", "c"]);
    assert_eq!(q.current_index(), 0);
    assert_eq!(q.current_track().unwrap().id, "b");
    assert_eq!(persisted(&storage), (vec!["b".into(), "a".into(), "c".into()], 0));
}

#[test]
fn move_down_onto_current_shifts_current_back() {
    let (mut q, _) = abc(1);
    assert!(q.move_down(0));
    assert_eq!(ids(&q), vec!["b", "a", "c"]);
    assert_eq!(q.current_track().unwrap().id, "b");
    assert_eq!(q.current_index(), 0);
}

#[test]
fn moves_not_touching_current_leave_it_alone() {
    let (mut q, _) = abc(0);
    assert!(q.move_down(1));
    assert_eq!(ids(&q), vec!["a", "c", "b"]);
    assert_eq!(q.current_index(), 0);
}

#[test]
fn moves_at_boundaries_are_noops() {
    let (mut q, _) = abc(2);
    assert!(!q.move_up(0));
    assert!(!q.move_down(2));
    assert!(!q.move_up(7));
    assert!(!q.move_down(7));
    assert!(!q.move_up(usize::MAX));
    assert!(!q.move_down(usize::MAX));
    assert_eq!(ids(&q), vec!["a", "b", "c"]);
    assert_eq!(q.current_index(), 2);
}

#[test]
fn removing_before_current_keeps_current_track() {
    let (mut q, storage) = abc(2);
    let removed = q.remove_from_queue(0).unwrap();
    assert_eq!(removed.id, "a");
    assert_eq!(ids(&q), vec!["b", "c"]);
    assert_eq!(q.current_index(), 1);
    assert_eq!(q.current_track().unwrap().id, "c");
    assert_eq!(persisted(&storage), (vec!["b".into(), "c".into()], 1));
}

#[test]
fn removing_current_last_entry_clamps_to_new_end() {
    let (mut q, _) = abc(2);
    q.remove_from_queue(2);
    assert_eq!(q.current_index(), 1);
    assert_eq!(q.current_track().unwrap().id, "b");
}

#[test]
fn removing_after_current_changes_nothing_but_the_list() {
    let (mut q, _) = abc(0);
    q.remove_from_queue(1);
    assert_eq!(ids(&q), vec!["a", "c"]);
    assert_eq!(q.current_index(), 0);
}

#[test]
fn removing_the_only_entry_leaves_index_zero() {
    let storage = MemoryStorage::new();
    let mut q = QueueManager::new(storage);
    q.add_to_queue(t("solo"));
    q.remove_from_queue(0);
    assert!(q.is_empty());
    assert_eq!(q.current_index(), 0);
    assert!(q.current_track().is_none());
}

#[test]
fn removing_out_of_range_is_ignored_and_not_persisted() {
    let storage = MemoryStorage::new();
    let mut q = QueueManager::new(storage.clone());
    assert!(q.remove_from_queue(0).is_none());
    assert!(storage.read(QUEUE_KEY).unwrap().is_none());
}

#[test]
fn next_and_prev_do_not_wrap() {
    let (mut q, _) = abc(0);
    assert!(!q.prev());
    assert_eq!(q.current_index(), 0);

    assert!(q.next());
    assert!(q.next());
    assert!(!q.next());
    assert_eq!(q.current_index(), 2);

    assert!(q.prev());
    assert_eq!(q.current_index(), 1);
}

#[test]
fn next_and_prev_on_empty_queue_are_noops() {
    let storage = MemoryStorage::new();
    let mut q = QueueManager::new(storage.clone());
    assert!(!q.next());
    assert!(!q.prev());
    assert!(storage.read(QUEUE_KEY).unwrap().is_none());
}

#[test]
fn navigation_persists_only_on_change() {
    let (mut q, storage) = abc(2);
    storage.write(QUEUE_KEY, "sentinel").unwrap();
    assert!(!q.next());
    assert_eq!(storage.read(QUEUE_KEY).unwrap().as_deref(), Some("sentinel"));
    assert!(q.prev());
    assert_eq!(persisted(&storage).1, 1);
}

#[test]
fn set_current_index_clamps_out_of_range_values() {
    let (mut q, storage) = abc(0);
    q.set_current_index(1);
    assert_eq!(q.current_index(), 1);

    q.set_current_index(42);
    assert_eq!(q.current_index(), 2);
    assert_eq!(persisted(&storage).1, 2);
}

#[test]
fn set_queue_clamps_start_index() {
    let storage = MemoryStorage::new();
    let mut q = QueueManager::new(storage);
    q.set_queue(vec![t("a"), t("b")], 5);
    assert_eq!(q.current_index(), 1);

    q.set_queue(Vec::new(), 3);
    assert_eq!(q.current_index(), 0);
}

#[test]
fn add_to_queue_appends_and_allows_duplicates() {
    let (mut q, storage) = abc(1);
    q.add_to_queue(t("a"));
    assert_eq!(ids(&q), vec!["a", "b", "c", "a"]);
    assert_eq!(q.current_index(), 1);
    assert_eq!(persisted(&storage).0.len(), 4);
}

#[test]
fn set_queue_then_load_after_restart_round_trips() {
    let storage = MemoryStorage::new();
    {
        let mut q = QueueManager::new(storage.clone());
        q.set_queue(vec![t("x"), t("y"), t("z")], 2);
    }

    let mut restarted = QueueManager::new(storage);
    assert!(restarted.load());
    assert_eq!(ids(&restarted), vec!["x", "y", "z"]);
    assert_eq!(restarted.current_index(), 2);
    assert_eq!(
        restarted.current_track().unwrap().best_audio_url(),
        Some("file:///music/z.mp3")
    );
}

#[test]
fn load_without_snapshot_leaves_queue_empty() {
    let mut q = QueueManager::new(MemoryStorage::new());
    assert!(!q.load());
    assert!(q.is_empty());
    assert_eq!(q.current_index(), 0);
}

#[test]
fn load_with_corrupt_snapshot_leaves_queue_empty() {
    let storage = MemoryStorage::new();
    storage.write(QUEUE_KEY, "][").unwrap();
    let mut q = QueueManager::new(storage);
    assert!(!q.load());
    assert!(q.is_empty());
    assert_eq!(q.current_index(), 0);
}

#[test]
fn load_clamps_out_of_range_persisted_index() {
    let storage = MemoryStorage::new();
    storage
        .write(
            QUEUE_KEY,
            r#"{"queue":[{"id":"a","name":"A"},{"id":"b","name":"B"}],"currentIndex":9}"#,
        )
        .unwrap();
    let mut q = QueueManager::new(storage);
    assert!(q.load());
    assert_eq!(q.current_index(), 1);
}

#[test]
fn handle_mirrors_every_mutation() {
    let (mut q, _) = abc(0);
    let handle = q.handle();
    q.move_down(0);
    {
        let view = handle.lock().unwrap();
        assert_eq!(view.queue[0].id, "b");
        assert_eq!(view.current_index, 1);
    }
    q.remove_from_queue(0);
    let view = handle.lock().unwrap();
    assert_eq!(view.queue.len(), 2);
    assert_eq!(view.current_index, 0);
}

#[test]
fn invariant_holds_across_mixed_operations() {
    let storage = MemoryStorage::new();
    let mut q = QueueManager::new(storage);

    // Deterministic pseudo-random walk over every operation.
    let mut seed: u64 = 0x5eed;
    let mut step = || {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (seed >> 33) as usize
    };

    for round in 0..2_000 {
        let len = q.len();
        let idx = if len == 0 { step() % 3 } else { step() % (len + 2) };
        match step() % 9 {
            0 => q.add_to_queue(t(&format!("t{round}"))),
            1 => {
                q.remove_from_queue(idx);
            }
            2 => {
                q.move_up(idx);
            }
            3 => {
                q.move_down(idx);
            }
            4 => q.set_current_index(idx),
            5 => {
                q.next();
            }
            6 => {
                q.prev();
            }
            7 => q.add_to_queue(t("dup")),
            _ => {
                if round % 50 == 0 {
                    let tracks: Vec<Track> = (0..(step() % 5)).map(|i| t(&format!("s{i}"))).collect();
                    q.set_queue(tracks, idx);
                }
            }
        }
        assert_invariant(&q);
    }
}
