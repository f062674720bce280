//! Tests for EntryPanel: actions, clipboard traffic and notifications

use std::sync::{Arc, Mutex};

use bcmtree::application::services::{Actions, EntryPanel};
use bcmtree::application::Event;
use bcmtree::domain::{index_to_address, Entry, EntryPayload, NO_ADDRESS};
use bcmtree::infrastructure::{Clipboard, MemoryClipboard, RecordingNotifier};
use bcmtree::util::testing;
use rstest::{fixture, rstest};

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

/// Root -> [A -> [A1], B], payloads tagged 1..=4 in pre-order.
fn sample_entries() -> Vec<Entry> {
    [None, Some(0), Some(1), Some(0)]
        .iter()
        .enumerate()
        .map(|(i, parent): (usize, &Option<usize>)| {
            let mut entry = Entry::zeroed();
            entry.address = index_to_address(i);
            entry.parent = parent.map_or(NO_ADDRESS, index_to_address);
            entry.payload.u_00 = i as u32 + 1;
            entry
        })
        .collect()
}

fn tags(entries: &[Entry]) -> Vec<u32> {
    entries.iter().map(|e| e.payload.u_00).collect()
}

fn names(events: &[Event]) -> Vec<&'static str> {
    events.iter().map(Event::name).collect()
}

struct Harness {
    panel: EntryPanel,
    clipboard: Arc<MemoryClipboard>,
    events: Arc<RecordingNotifier>,
}

impl Harness {
    /// Select `position` and drop the events the selection produced.
    fn select(&mut self, position: usize) {
        assert!(self.panel.select(position).is_some());
        self.events.take();
    }
}

#[fixture]
fn harness() -> Harness {
    let clipboard = Arc::new(MemoryClipboard::new());
    let events = Arc::new(RecordingNotifier::new());
    let panel = EntryPanel::new(sample_entries(), clipboard.clone(), events.clone()).unwrap();
    Harness {
        panel,
        clipboard,
        events,
    }
}

// ============================================================
// Selection
// ============================================================

#[rstest]
fn given_position_when_selecting_then_data_loaded_published(harness: Harness) {
    let mut harness = harness;

    let entry = harness.panel.select(3).cloned().unwrap();

    assert_eq!(entry.payload.u_00, 4);
    assert_eq!(harness.events.take(), vec![Event::DataLoaded(entry)]);
    assert_eq!(harness.panel.selected_position(), Some(3));
}

#[rstest]
fn given_out_of_range_position_when_selecting_then_nothing_selected(harness: Harness) {
    let mut harness = harness;
    assert!(harness.panel.select(4).is_none());
    assert!(harness.panel.selection().is_none());
    assert!(harness.events.take().is_empty());
}

#[rstest]
fn given_no_selection_when_acting_then_everything_is_noop(harness: Harness) {
    let mut harness = harness;
    assert_eq!(harness.panel.actions(), Actions::default());
    assert_eq!(harness.panel.add_child().unwrap(), 0);
    assert_eq!(harness.panel.append().unwrap(), 0);
    assert_eq!(harness.panel.insert().unwrap(), 0);
    assert_eq!(harness.panel.delete(true), 0);
    assert_eq!(harness.panel.copy(true).unwrap(), 0);
    assert!(!harness.panel.paste().unwrap());
    assert_eq!(harness.panel.document().len(), 4);
    assert!(harness.events.take().is_empty());
}

// ============================================================
// Action availability
// ============================================================

#[rstest]
fn given_root_selected_when_querying_actions_then_only_add_child(harness: Harness) {
    let mut harness = harness;
    harness.select(0);
    assert_eq!(
        harness.panel.actions(),
        Actions {
            add_child: true,
            ..Actions::default()
        }
    );
}

#[rstest]
fn given_entry_selected_when_clipboard_fills_then_paste_enabled(harness: Harness) {
    let mut harness = harness;
    harness.select(1);
    let before = harness.panel.actions();
    assert!(before.copy && before.delete && before.append && before.insert && before.add_child);
    assert!(!before.paste);

    harness.panel.copy(false).unwrap();

    assert!(harness.panel.actions().paste);
}

#[rstest]
fn given_foreign_clipboard_text_when_querying_actions_then_paste_disabled(harness: Harness) {
    let mut harness = harness;
    harness.select(1);
    harness.clipboard.set_text("{\"format\": \"Image\", \"entries\": []}");
    assert!(!harness.panel.actions().paste);
}

// ============================================================
// Adding entries
// ============================================================

#[rstest]
fn given_empty_clipboard_when_adding_child_then_one_zeroed_entry_selected(harness: Harness) {
    let mut harness = harness;
    harness.select(0);

    // Act
    let count = harness.panel.add_child().unwrap();

    // Assert
    assert_eq!(count, 1);
    let document = harness.panel.document().to_vec();
    assert_eq!(tags(&document), vec![1, 2, 3, 4, 0]);
    assert_eq!(document[4].payload, EntryPayload::default());
    assert_eq!(document[4].parent, document[0].address);
    assert_eq!(harness.panel.selected_position(), Some(4));

    let events = harness.events.take();
    assert_eq!(
        names(&events),
        vec!["selection-changed", "data-loaded", "status-text"]
    );
    assert_eq!(
        events[2],
        Event::StatusText("Added 1 entry(s) under Entry 0".to_string())
    );
}

#[rstest]
fn given_copied_subtree_when_appending_after_a_then_copy_lands_before_b(harness: Harness) {
    let mut harness = harness;
    harness.select(1);
    assert_eq!(harness.panel.copy(true).unwrap(), 2);

    // Act
    let count = harness.panel.append().unwrap();

    // Assert
    assert_eq!(count, 2);
    let document = harness.panel.document();
    assert_eq!(tags(document), vec![1, 2, 3, 2, 3, 4]);
    assert_eq!(document[4].parent, document[3].address);
    assert_eq!(document[3].sibling, document[5].address);
    assert_eq!(harness.panel.selected_position(), Some(3));
    assert_eq!(
        harness.events.status_texts(),
        vec![
            "Copied Entry 1 and 1 children".to_string(),
            "Added 2 entry(s) after Entry 1".to_string(),
        ]
    );
}

#[rstest]
fn given_b_selected_when_inserting_then_new_entry_precedes_b(harness: Harness) {
    let mut harness = harness;
    harness.select(3);

    let count = harness.panel.insert().unwrap();

    assert_eq!(count, 1);
    assert_eq!(tags(harness.panel.document()), vec![1, 2, 3, 0, 4]);
    assert_eq!(harness.panel.selected_position(), Some(3));
    // b moved down one slot
    assert_eq!(
        harness.events.status_texts(),
        vec!["Added 1 entry(s) before Entry 4".to_string()]
    );
}

#[rstest]
#[case::append("Cannot add entry next to root entry, must be a child")]
#[case::insert("Cannot add entry before root entry.")]
fn given_root_selected_when_adding_sibling_then_refused_with_warning(
    harness: Harness,
    #[case] expected: &str,
) {
    let mut harness = harness;
    harness.select(0);
    let before = harness.panel.document().to_vec();

    let count = if expected.starts_with("Cannot add entry next") {
        harness.panel.append().unwrap()
    } else {
        harness.panel.insert().unwrap()
    };

    assert_eq!(count, 0);
    assert_eq!(harness.panel.document(), before.as_slice());
    assert_eq!(harness.events.take(), vec![Event::StatusText(expected.to_string())]);
}

// ============================================================
// Delete
// ============================================================

#[rstest]
#[case::keep_children(false, 1, vec![1, 3, 4])]
#[case::cascade(true, 2, vec![1, 4])]
fn given_a_selected_when_deleting_then_view_disabled_and_selection_cleared(
    harness: Harness,
    #[case] cascade: bool,
    #[case] removed: usize,
    #[case] remaining: Vec<u32>,
) {
    let mut harness = harness;
    harness.select(1);

    let count = harness.panel.delete(cascade);

    assert_eq!(count, removed);
    assert_eq!(tags(harness.panel.document()), remaining);
    assert!(harness.panel.selection().is_none());
    assert_eq!(
        harness.events.take(),
        vec![
            Event::DisableView,
            Event::StatusText(format!("Deleted {} entries", removed)),
        ]
    );
}

#[rstest]
fn given_root_selected_when_deleting_then_noop(harness: Harness) {
    let mut harness = harness;
    harness.select(0);
    assert_eq!(harness.panel.delete(true), 0);
    assert_eq!(harness.panel.document().len(), 4);
    assert!(harness.panel.selection().is_some());
    assert!(harness.events.take().is_empty());
}

// ============================================================
// Copy / paste
// ============================================================

#[rstest]
fn given_leaf_when_copying_then_single_entry_on_clipboard(harness: Harness) {
    let mut harness = harness;
    harness.select(3);

    assert_eq!(harness.panel.copy(true).unwrap(), 1);

    let copied = harness.clipboard.read_entries().unwrap().unwrap();
    assert_eq!(tags(&copied), vec![4]);
    assert_eq!(
        harness.events.status_texts(),
        vec!["Copied Entry 3".to_string()]
    );
}

#[rstest]
fn given_root_selected_when_copying_then_clipboard_untouched(harness: Harness) {
    let mut harness = harness;
    harness.select(0);
    assert_eq!(harness.panel.copy(true).unwrap(), 0);
    assert!(!harness.clipboard.has_entries());
}

#[rstest]
fn given_copied_a_when_pasting_over_b_then_payload_replaced_and_links_kept(harness: Harness) {
    let mut harness = harness;
    harness.select(1);
    harness.panel.copy(false).unwrap();
    harness.select(3);
    let before = harness.panel.document().to_vec();

    // Act
    let pasted = harness.panel.paste().unwrap();

    // Assert
    assert!(pasted);
    let after = harness.panel.document();
    assert_eq!(after[3].payload, before[1].payload);
    assert_eq!(after[3].address, before[3].address);
    assert_eq!(after[3].parent, before[3].parent);
    assert_eq!(&after[..3], &before[..3]);

    let events = harness.events.take();
    assert_eq!(names(&events), vec!["data-loaded", "status-text"]);
    assert_eq!(events[0], Event::DataLoaded(after[3].clone()));
    assert_eq!(events[1], Event::StatusText("Pasted to Entry 3".to_string()));
}

#[rstest]
#[case::empty(None)]
#[case::plain_text(Some("not entries"))]
#[case::foreign_format(Some(r#"{"format": "BDMEntry", "entries": []}"#))]
fn given_incompatible_clipboard_when_pasting_then_noop(
    harness: Harness,
    #[case] content: Option<&str>,
) {
    let mut harness = harness;
    if let Some(text) = content {
        harness.clipboard.set_text(text);
    }
    harness.select(3);
    let before = harness.panel.document().to_vec();

    assert!(!harness.panel.paste().unwrap());
    assert_eq!(harness.panel.document(), before.as_slice());
    assert!(harness.events.take().is_empty());
}

#[rstest]
fn given_foreign_clipboard_when_adding_child_then_zeroed_entry_used(harness: Harness) {
    let mut harness = harness;
    harness.clipboard.set_text("hello");
    harness.select(2);

    assert_eq!(harness.panel.add_child().unwrap(), 1);

    let document = harness.panel.document();
    assert_eq!(tags(document), vec![1, 2, 3, 0, 4]);
    assert_eq!(document[3].parent, document[2].address);
}

// ============================================================
// Notifier seam
// ============================================================

#[test]
fn given_closure_notifier_when_deleting_then_closure_sees_events() {
    let seen: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let notifier = Arc::new(move |event: &Event| {
        sink.lock().unwrap().push(event.name());
    });
    let mut panel = EntryPanel::new(
        sample_entries(),
        Arc::new(MemoryClipboard::new()),
        notifier,
    )
    .unwrap();

    panel.select(2);
    panel.delete(false);

    assert_eq!(
        *seen.lock().unwrap(),
        vec!["data-loaded", "disable-view", "status-text"]
    );
}

#[test]
fn given_stale_document_when_opening_panel_then_collection_is_reindexed() {
    let mut entries = sample_entries();
    for entry in &mut entries {
        entry.sibling = 0xdead;
        entry.child = 0xbeef;
    }

    let panel = EntryPanel::new(
        entries,
        Arc::new(MemoryClipboard::new()),
        Arc::new(RecordingNotifier::new()),
    )
    .unwrap();

    let document = panel.document();
    assert_eq!(document[0].child, document[1].address);
    assert_eq!(document[1].sibling, document[3].address);
    assert_eq!(document[3].sibling, NO_ADDRESS);
    assert_eq!(panel.into_document().len(), 4);
}

#[test]
fn given_empty_document_when_opening_panel_then_error() {
    let result = EntryPanel::new(
        Vec::new(),
        Arc::new(MemoryClipboard::new()),
        Arc::new(RecordingNotifier::new()),
    );
    assert!(result.is_err());
}
