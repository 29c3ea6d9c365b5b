//! Queue session integration tests
//!
//! Tests for queue creation, navigation, and boundary logic.
//! Focus on real-world scenarios: playing an album, next/previous buttons,
//! play-next insertion, and shuffle round trips.

use coda_core::{RepeatMode, TrackId};
use coda_session::{QueueSession, QueueSource, SessionConfig, SessionEvent, SkipOutcome};
use std::time::Duration;

// ===== Test Helpers =====

fn track(id: &str) -> TrackId {
    TrackId::new(id)
}

fn session_with(tracks: &[&str]) -> QueueSession {
    let mut session = QueueSession::default();
    session.append_many(
        tracks.iter().map(|&id| track(id)).collect(),
        QueueSource::Manual,
    );
    session.drain_events();
    session
}

fn track_order(session: &QueueSession) -> Vec<String> {
    session
        .items()
        .iter()
        .map(|item| item.track.as_str().to_string())
        .collect()
}

// ===== Skip Navigation Tests =====

#[test]
fn test_skip_sequence_with_repeat_off() {
    let mut session = session_with(&["a", "b", "c"]);
    session.play_at(0).unwrap();

    // Next lands on b, then c
    assert_eq!(
        session.skip_forward(false).item().map(|i| i.track.as_str()),
        Some("b")
    );
    assert_eq!(
        session.skip_forward(false).item().map(|i| i.track.as_str()),
        Some("c")
    );

    // Then playback stops, cursor parked on the last item
    assert_eq!(session.skip_forward(false), SkipOutcome::EndOfQueue);
    assert_eq!(session.cursor(), Some(2));
}

#[test]
fn test_skip_sequence_with_repeat_all_wraps() {
    let mut session = session_with(&["a", "b", "c"]);
    session.set_repeat(RepeatMode::All);
    session.play_at(0).unwrap();

    session.skip_forward(false);
    session.skip_forward(false);

    // Third skip wraps to the head instead of stopping
    match session.skip_forward(false) {
        SkipOutcome::Moved(item) => assert_eq!(item.track.as_str(), "a"),
        other => panic!("expected wrap to head, got {:?}", other),
    }
    assert_eq!(session.cursor(), Some(0));
}

#[test]
fn test_previous_button_restart_then_step_back() {
    let mut session = session_with(&["a", "b", "c"]);
    session.play_at(2).unwrap();

    // Deep into the track, previous restarts it
    match session.skip_backward(Duration::from_secs(42)) {
        SkipOutcome::Restart(item) => assert_eq!(item.track.as_str(), "c"),
        other => panic!("expected restart, got {:?}", other),
    }

    // Right after the restart, previous steps back for real
    assert_eq!(
        session
            .skip_backward(Duration::from_secs(1))
            .item()
            .map(|i| i.track.as_str()),
        Some("b")
    );
}

#[test]
fn test_restart_threshold_is_configurable() {
    let config = SessionConfig {
        restart_threshold: Duration::from_secs(10),
        ..SessionConfig::default()
    };
    let mut session = QueueSession::new(config);
    session.append_many(vec![track("a"), track("b")], QueueSource::Manual);
    session.play_at(1).unwrap();

    // 5s elapsed is below the 10s threshold, so this is a real step back
    assert_eq!(
        session
            .skip_backward(Duration::from_secs(5))
            .item()
            .map(|i| i.track.as_str()),
        Some("a")
    );
}

// ===== Play From Library Tests =====

#[test]
fn test_play_album_replaces_queue_and_starts_at_clicked_track() {
    let mut session = session_with(&["leftover-1", "leftover-2"]);

    // User hits play on an album, starting from its third track
    let album: Vec<TrackId> = (1..=5).map(|n| track(&format!("song-{n}"))).collect();
    session.replace(
        album,
        QueueSource::Album {
            id: "album-9".to_string(),
        },
    );
    session.play_at(2).unwrap();

    assert_eq!(session.len(), 5);
    assert_eq!(
        session.current().map(|i| i.track.as_str()),
        Some("song-3")
    );
    assert_eq!(
        session.current().map(|i| i.source.kind()),
        Some("album")
    );

    // Next/previous walk the album order
    assert_eq!(
        session.skip_forward(false).item().map(|i| i.track.as_str()),
        Some("song-4")
    );
    assert_eq!(
        session
            .skip_backward(Duration::from_secs(1))
            .item()
            .map(|i| i.track.as_str()),
        Some("song-3")
    );
}

#[test]
fn test_first_skip_on_fresh_queue_starts_at_head() {
    let mut session = session_with(&["a", "b"]);

    // Nothing playing yet: the next button starts playback at the head
    match session.skip_forward(false) {
        SkipOutcome::Moved(item) => assert_eq!(item.track.as_str(), "a"),
        other => panic!("expected head start, got {:?}", other),
    }
}

// ===== Removal Tests =====

#[test]
fn test_remove_before_cursor_keeps_current_track() {
    let mut session = session_with(&["a", "b", "c"]);
    session.play_at(1).unwrap();

    let a_id = session.items()[0].id.clone();
    session.remove(&a_id).unwrap();

    assert_eq!(track_order(&session), vec!["b", "c"]);
    assert_eq!(session.cursor(), Some(0), "cursor shifts with the removal");
    assert_eq!(session.current().map(|i| i.track.as_str()), Some("b"));
}

#[test]
fn test_remove_current_track_advances_in_place() {
    let mut session = session_with(&["a", "b", "c"]);
    session.play_at(1).unwrap();

    let b_id = session.items()[1].id.clone();
    session.remove(&b_id).unwrap();

    // The next item slides into the vacated index
    assert_eq!(session.cursor(), Some(1));
    assert_eq!(session.current().map(|i| i.track.as_str()), Some("c"));
}

// ===== Play Next Tests =====

#[test]
fn test_play_next_inserts_after_current() {
    let mut session = session_with(&["a", "b"]);
    session.play_at(0).unwrap();

    session.insert_after_cursor(track("x"), QueueSource::Manual);

    assert_eq!(track_order(&session), vec!["a", "x", "b"]);
    assert_eq!(
        session.skip_forward(false).item().map(|i| i.track.as_str()),
        Some("x")
    );
}

#[test]
fn test_play_next_on_empty_queue_lands_first() {
    let mut session = QueueSession::default();

    session.insert_after_cursor(track("x"), QueueSource::Manual);

    assert_eq!(session.len(), 1);
    assert_eq!(session.cursor(), None, "insertion does not start playback");
    assert_eq!(session.items()[0].position, 0);
}

// ===== Shuffle Tests =====

#[test]
fn test_shuffle_keeps_cursor_on_current_track() {
    let mut session = session_with(&["a", "b", "c"]);
    session.play_at(1).unwrap();

    session.enable_shuffle();

    // Same track is current, wherever the permutation put it
    assert_eq!(session.current().map(|i| i.track.as_str()), Some("b"));
    let b_index = session
        .items()
        .iter()
        .position(|i| i.track.as_str() == "b");
    assert_eq!(session.cursor(), b_index);

    session.disable_shuffle();

    assert_eq!(track_order(&session), vec!["a", "b", "c"]);
    assert_eq!(session.cursor(), Some(1));
}

#[test]
fn test_shuffle_changes_order_of_large_queue() {
    let tracks: Vec<String> = (0..30).map(|n| format!("song-{n}")).collect();
    let refs: Vec<&str> = tracks.iter().map(String::as_str).collect();
    let mut session = session_with(&refs);
    session.play_at(0).unwrap();

    let original = track_order(&session);
    session.enable_shuffle();

    // 30 items; the identity permutation is vanishingly unlikely
    assert_ne!(track_order(&session), original);

    session.disable_shuffle();
    assert_eq!(track_order(&session), original);
}

// ===== Window Tests =====

#[test]
fn test_upcoming_and_recent_clamp_at_edges() {
    let mut session = session_with(&["a", "b", "c", "d", "e"]);

    // No cursor yet: everything is upcoming, nothing is recent
    assert_eq!(session.upcoming(10).len(), 5);
    assert!(session.recent(10).is_empty());

    session.play_at(1).unwrap();

    let upcoming: Vec<&str> = session.upcoming(2).iter().map(|i| i.track.as_str()).collect();
    assert_eq!(upcoming, vec!["c", "d"]);

    let recent: Vec<&str> = session.recent(10).iter().map(|i| i.track.as_str()).collect();
    assert_eq!(recent, vec!["a"], "window clamps at the queue start");

    session.play_at(4).unwrap();
    assert!(session.upcoming(10).is_empty(), "window clamps at the queue end");
    let recent: Vec<&str> = session.recent(2).iter().map(|i| i.track.as_str()).collect();
    assert_eq!(recent, vec!["c", "d"], "recent keeps play order");
}

// ===== Event Flow Tests =====

#[test]
fn test_full_listening_flow_emits_coherent_events() {
    let mut session = QueueSession::default();

    session.append_many(
        vec![track("a"), track("b"), track("c")],
        QueueSource::Playlist {
            id: "morning".to_string(),
        },
    );
    session.play_at(0).unwrap();
    session.cycle_repeat();
    session.enable_shuffle();

    let events = session.drain_events();

    // One queue change, one track change, one repeat change, then the
    // shuffle pair (mode + reordered queue)
    assert!(matches!(events[0], SessionEvent::QueueChanged { length: 3 }));
    assert!(matches!(events[1], SessionEvent::TrackChanged { .. }));
    assert!(matches!(
        events[2],
        SessionEvent::RepeatChanged {
            mode: RepeatMode::All
        }
    ));
    assert!(matches!(
        events[3],
        SessionEvent::ShuffleChanged { enabled: true }
    ));
    assert!(matches!(events[4], SessionEvent::QueueChanged { length: 3 }));
    assert_eq!(events.len(), 5);
    assert!(!session.has_pending_events());
}
