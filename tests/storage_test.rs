//! Tests for the file-backed clipboard and the document snapshot service

use std::path::PathBuf;
use std::sync::Arc;

use bcmtree::application::services::DocumentService;
use bcmtree::application::{ApplicationError, TransferPayload, ENTRY_FORMAT};
use bcmtree::config::Settings;
use bcmtree::domain::{index_to_address, Entry, NO_ADDRESS};
use bcmtree::infrastructure::di::ServiceContainer;
use bcmtree::infrastructure::{
    Clipboard, FileClipboard, FileSystem, RealFileSystem, RecordingNotifier,
};
use bcmtree::util::testing;
use rstest::rstest;
use tempfile::TempDir;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn entries(parents: &[Option<usize>]) -> Vec<Entry> {
    parents
        .iter()
        .enumerate()
        .map(|(i, parent)| {
            let mut entry = Entry::zeroed();
            entry.address = index_to_address(i);
            entry.parent = parent.map_or(NO_ADDRESS, index_to_address);
            entry.payload.activator_state = i as u32;
            entry
        })
        .collect()
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write file");
    path
}

fn fs() -> Arc<dyn FileSystem> {
    Arc::new(RealFileSystem)
}

// ============================================================
// FileClipboard
// ============================================================

#[test]
fn given_missing_file_when_reading_clipboard_then_empty() {
    let temp = TempDir::new().unwrap();
    let clipboard = FileClipboard::new(temp.path().join("clip.json"), fs());

    assert_eq!(clipboard.read_entries().unwrap(), None);
    assert!(!clipboard.has_entries());
}

#[test]
fn given_written_entries_when_reading_back_then_order_preserved() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("clip.json");
    let clipboard = FileClipboard::new(&path, fs());
    let copied = entries(&[None, Some(0), Some(1)]);

    // Act
    clipboard.write_entries(&copied).unwrap();

    // Assert
    assert!(path.is_file());
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains(ENTRY_FORMAT));
    assert_eq!(clipboard.read_entries().unwrap(), Some(copied));
}

#[rstest]
#[case::plain_text("copied from an editor")]
#[case::other_format(r#"{"format": "BACEntry", "entries": []}"#)]
#[case::truncated(r#"{"format": "BCMEntry", "entries": ["#)]
fn given_foreign_file_content_when_reading_clipboard_then_empty(#[case] content: &str) {
    let temp = TempDir::new().unwrap();
    let path = write_file(&temp, "clip.json", content);
    let clipboard = FileClipboard::new(path, fs());

    assert_eq!(clipboard.read_entries().unwrap(), None);
}

#[test]
fn given_second_write_when_reading_then_only_latest_payload() {
    let temp = TempDir::new().unwrap();
    let clipboard = FileClipboard::new(temp.path().join("clip.json"), fs());
    let first = entries(&[None, Some(0)]);
    let second = entries(&[None]);

    clipboard.write_entries(&first).unwrap();
    clipboard.write_entries(&second).unwrap();

    assert_eq!(clipboard.read_entries().unwrap(), Some(second));
}

#[test]
fn given_filled_clipboard_when_clearing_then_empty() {
    let temp = TempDir::new().unwrap();
    let clipboard = FileClipboard::new(temp.path().join("clip.json"), fs());
    clipboard.write_entries(&entries(&[None])).unwrap();

    clipboard.clear().unwrap();
    clipboard.clear().unwrap();

    assert!(!clipboard.path().exists());
    assert!(!clipboard.has_entries());
}

#[test]
fn given_entry_with_missing_payload_fields_when_decoding_then_defaults_to_zero() {
    let text = r#"{"format": "BCMEntry", "entries": [{"address": 16, "ki_cost": 7}]}"#;

    let decoded = TransferPayload::decode(text).unwrap().entries;

    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded[0].address, 16);
    assert_eq!(decoded[0].parent, NO_ADDRESS);
    assert_eq!(decoded[0].payload.ki_cost, 7);
    assert_eq!(decoded[0].payload.stamina_cost, 0);
}

// ============================================================
// DocumentService
// ============================================================

#[test]
fn given_saved_document_when_loading_then_same_entries() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("docs").join("moves.json");
    let service = DocumentService::new(fs());
    let document = entries(&[None, Some(0), Some(0)]);

    service.save(&path, &document).unwrap();
    let loaded = service.load(&path).unwrap();

    assert_eq!(loaded, document);
}

#[test]
fn given_missing_document_when_loading_then_operation_failed() {
    let temp = TempDir::new().unwrap();
    let service = DocumentService::new(fs());

    let result = service.load(&temp.path().join("absent.json"));

    assert!(matches!(
        result,
        Err(ApplicationError::OperationFailed { .. })
    ));
}

#[rstest]
#[case::not_json("entries go here")]
#[case::wrong_format(r#"{"format": "BDMEntry", "entries": []}"#)]
fn given_invalid_document_when_loading_then_transfer_error(#[case] content: &str) {
    let temp = TempDir::new().unwrap();
    let path = write_file(&temp, "doc.json", content);

    let result = DocumentService::new(fs()).load(&path);

    assert!(matches!(result, Err(ApplicationError::Transfer { .. })));
}

// ============================================================
// ServiceContainer wiring
// ============================================================

#[test]
fn given_container_when_copying_in_one_panel_then_next_panel_can_paste() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let settings = Settings {
        clipboard_path: temp.path().join("clip.json"),
        ..Settings::default()
    };
    let container = ServiceContainer::new(settings, Arc::new(RecordingNotifier::new()));
    let document = entries(&[None, Some(0), Some(0)]);

    // Act
    let mut first = container.entry_panel(document.clone()).unwrap();
    first.select(1);
    first.copy(true).unwrap();

    let mut second = container.entry_panel(document).unwrap();
    second.select(2);
    let pasted = second.paste().unwrap();

    // Assert
    assert!(pasted);
    assert_eq!(second.document()[2].payload.activator_state, 1);
    assert!(temp.path().join("clip.json").is_file());
}
