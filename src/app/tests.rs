use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tempfile::{TempDir, tempdir};

use crate::convert::Pipeline;
use crate::convert::testing::{FakeRasterizer, FakeTypesetter};
use crate::picker::FilePicker;
use crate::viewer::{Region, Viewer, ViewerState};
use crate::watcher::SourceWatcher;

use super::{App, DisplaySource, Message, Model, ToastLevel, update};

struct Fixture {
    scratch: TempDir,
    docs: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let fx = Self {
            scratch: tempdir().unwrap(),
            docs: tempdir().unwrap(),
        };
        fx.write("guide.md", 3);
        fx.write("single.md", 1);
        std::fs::write(fx.docs.path().join("notes.txt"), "plain").unwrap();
        fx
    }

    fn write(&self, name: &str, pages: usize) -> PathBuf {
        let path = self.docs.path().join(name);
        let text: String = (0..pages).map(|i| format!("# Part {i}\n\nbody\n\n")).collect();
        std::fs::write(&path, text).unwrap();
        path
    }

    fn path(&self, name: &str) -> PathBuf {
        self.docs.path().join(name)
    }

    fn model_with(&self, typesetter_fails: bool) -> Model {
        let pipeline = Pipeline::new(
            self.scratch.path(),
            Box::new(FakeTypesetter {
                fail: typesetter_fails,
            }),
            Box::new(FakeRasterizer::default()),
        );
        let viewer = Viewer::new(pipeline, self.docs.path());
        let picker = FilePicker::open(self.docs.path()).unwrap();
        Model::new(viewer, picker, (80, 24))
    }

    fn model(&self) -> Model {
        self.model_with(false)
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn dispatch(model: Model, msg: Message) -> Model {
    let mut watcher: Option<SourceWatcher> = None;
    App::dispatch(model, &mut watcher, msg)
}

fn toast(model: &Model) -> Option<(String, ToastLevel)> {
    model
        .active_toast()
        .map(|(message, level)| (message.to_string(), level))
}

// update

#[test]
fn test_next_and_prev_page_move_cursor() {
    let fx = Fixture::new();
    let mut model = fx.model();
    assert!(model.select(&fx.path("guide.md")));

    model = update(model, Message::NextPage);
    model = update(model, Message::NextPage);
    assert_eq!(model.viewer.current_index(), 2);

    model = update(model, Message::NextPage);
    assert_eq!(model.viewer.current_index(), 2);

    model = update(model, Message::PrevPage);
    assert_eq!(model.viewer.current_index(), 1);
}

#[test]
fn test_paging_without_selection_is_noop() {
    let fx = Fixture::new();
    let mut model = fx.model();
    model = update(model, Message::NextPage);
    model = update(model, Message::PrevPage);
    assert_eq!(model.viewer.state(), ViewerState::NoSelection);
    assert_eq!(model.viewer.current_index(), 0);
}

#[test]
fn test_toggle_picker_twice_restores_layout() {
    let fx = Fixture::new();
    let mut model = fx.model();
    let before = *model.viewer.layout();

    model = update(model, Message::TogglePicker);
    assert_eq!(model.viewer.layout().active(), Region::Picker);
    assert_eq!(model.viewer.state(), ViewerState::PickingFile);

    model = update(model, Message::TogglePicker);
    assert_eq!(*model.viewer.layout(), before);
}

#[test]
fn test_picker_moves_with_up_and_down() {
    let fx = Fixture::new();
    let mut model = fx.model();
    model = update(model, Message::PickerDown);
    model = update(model, Message::PickerDown);
    assert_eq!(model.file_picker.selected_index(), 2);
    model = update(model, Message::PickerUp);
    assert_eq!(model.file_picker.selected_index(), 1);
}

#[test]
fn test_resize_updates_picker_rows() {
    let fx = Fixture::new();
    let model = update(fx.model(), Message::Resize(100, 40));
    assert_eq!(model.picker_rows, 37);
}

#[test]
fn test_quit_sets_flag() {
    let fx = Fixture::new();
    let model = update(fx.model(), Message::Quit);
    assert!(model.should_quit);
}

// input

#[test]
fn test_key_table_maps_viewer_intents() {
    let fx = Fixture::new();
    let model = fx.model();
    assert_eq!(App::handle_key(&ctrl('e'), &model), Some(Message::Export));
    assert_eq!(App::handle_key(&ctrl('r'), &model), Some(Message::Refresh));
    assert_eq!(App::handle_key(&ctrl('o'), &model), Some(Message::TogglePicker));
    assert_eq!(
        App::handle_key(&key(KeyCode::Char('j')), &model),
        Some(Message::NextPage)
    );
    assert_eq!(
        App::handle_key(&key(KeyCode::Char('k')), &model),
        Some(Message::PrevPage)
    );
    assert_eq!(
        App::handle_key(
            &KeyEvent::new(KeyCode::Char('J'), KeyModifiers::SHIFT),
            &model
        ),
        Some(Message::NextPage)
    );
}

#[test]
fn test_unbound_keys_have_no_effect() {
    let fx = Fixture::new();
    let model = fx.model();
    assert_eq!(App::handle_key(&key(KeyCode::Char('x')), &model), None);
    assert_eq!(App::handle_key(&ctrl('j'), &model), None);
    assert_eq!(App::handle_key(&ctrl('x'), &model), None);
}

#[test]
fn test_key_release_is_ignored() {
    let fx = Fixture::new();
    let model = fx.model();
    let mut release = ctrl('e');
    release.kind = KeyEventKind::Release;
    assert_eq!(App::handle_key(&release, &model), None);
}

#[test]
fn test_quit_keys() {
    let fx = Fixture::new();
    let model = fx.model();
    assert_eq!(
        App::handle_key(&key(KeyCode::Char('q')), &model),
        Some(Message::Quit)
    );
    assert_eq!(App::handle_key(&ctrl('c'), &model), Some(Message::Quit));
}

#[test]
fn test_picker_keys_shadow_paging_while_picker_active() {
    let fx = Fixture::new();
    let model = update(fx.model(), Message::TogglePicker);
    assert_eq!(
        App::handle_key(&key(KeyCode::Char('j')), &model),
        Some(Message::PickerDown)
    );
    assert_eq!(
        App::handle_key(&key(KeyCode::Up), &model),
        Some(Message::PickerUp)
    );
    assert_eq!(
        App::handle_key(&key(KeyCode::Enter), &model),
        Some(Message::PickerConfirm)
    );
    assert_eq!(
        App::handle_key(&key(KeyCode::Backspace), &model),
        Some(Message::PickerParent)
    );
    assert_eq!(
        App::handle_key(&key(KeyCode::Esc), &model),
        Some(Message::TogglePicker)
    );
    assert_eq!(App::handle_key(&ctrl('o'), &model), Some(Message::TogglePicker));
}

#[test]
fn test_arrow_keys_page_when_pages_active() {
    let fx = Fixture::new();
    let model = fx.model();
    assert_eq!(
        App::handle_key(&key(KeyCode::PageDown), &model),
        Some(Message::NextPage)
    );
    assert_eq!(
        App::handle_key(&key(KeyCode::Left), &model),
        Some(Message::PrevPage)
    );
}

#[test]
fn test_handle_event_maps_resize_and_focus() {
    let fx = Fixture::new();
    let model = fx.model();
    assert_eq!(
        App::handle_event(&Event::Resize(90, 30), &model),
        Some(Message::Resize(90, 30))
    );
    assert_eq!(
        App::handle_event(&Event::FocusGained, &model),
        Some(Message::Redraw)
    );
    assert_eq!(App::handle_event(&Event::FocusLost, &model), None);
}

// side effects

#[test]
fn test_export_without_selection_reports_nothing_to_export() {
    let fx = Fixture::new();
    let model = dispatch(fx.model(), Message::Export);
    assert_eq!(
        toast(&model),
        Some(("Nothing to export".to_string(), ToastLevel::Info))
    );
}

#[test]
fn test_export_writes_pdf_next_to_working_dir() {
    let fx = Fixture::new();
    let mut model = fx.model();
    model.select(&fx.path("guide.md"));

    let model = dispatch(model, Message::Export);
    assert_eq!(
        toast(&model),
        Some(("Exported guide.pdf".to_string(), ToastLevel::Info))
    );
    assert!(fx.path("guide.pdf").exists());

    let model = dispatch(model, Message::Export);
    assert_eq!(
        toast(&model),
        Some(("Exported guide0.pdf".to_string(), ToastLevel::Info))
    );
}

#[test]
fn test_export_does_not_change_view() {
    let fx = Fixture::new();
    let mut model = fx.model();
    model.select(&fx.path("guide.md"));
    model = update(model, Message::NextPage);
    let model = dispatch(model, Message::Export);
    assert_eq!(
        model.viewer.state(),
        ViewerState::Viewing {
            page_count: 3,
            current_index: 1
        }
    );
}

#[test]
fn test_refresh_without_selection_reports_nothing() {
    let fx = Fixture::new();
    let model = dispatch(fx.model(), Message::Refresh);
    assert_eq!(
        toast(&model),
        Some(("Nothing to refresh".to_string(), ToastLevel::Info))
    );
}

#[test]
fn test_refresh_picks_up_edits_and_clamps_cursor() {
    let fx = Fixture::new();
    let mut model = fx.model();
    model.select(&fx.path("guide.md"));
    model = update(model, Message::NextPage);
    model = update(model, Message::NextPage);

    fx.write("guide.md", 2);
    let model = dispatch(model, Message::Refresh);
    assert_eq!(
        model.viewer.state(),
        ViewerState::Viewing {
            page_count: 2,
            current_index: 1
        }
    );
    assert_eq!(
        toast(&model),
        Some(("Refreshed".to_string(), ToastLevel::Info))
    );
}

#[test]
fn test_source_change_refreshes_quietly() {
    let fx = Fixture::new();
    let mut model = fx.model();
    model.select(&fx.path("single.md"));
    fx.write("single.md", 4);
    let model = dispatch(model, Message::SourceChanged);
    assert_eq!(model.viewer.page_count(), 4);
    assert!(model.active_toast().is_none());
}

#[test]
fn test_refresh_of_deleted_source_keeps_old_pages() {
    let fx = Fixture::new();
    let mut model = fx.model();
    model.select(&fx.path("guide.md"));
    std::fs::remove_file(fx.path("guide.md")).unwrap();

    let model = dispatch(model, Message::Refresh);
    assert_eq!(model.viewer.page_count(), 3);
    let (message, level) = toast(&model).unwrap();
    assert_eq!(level, ToastLevel::Error);
    assert!(message.starts_with("Refresh failed: cannot read"));
}

#[test]
fn test_picker_confirm_selects_markdown_file() {
    let fx = Fixture::new();
    let mut model = update(fx.model(), Message::TogglePicker);
    assert!(model.file_picker.highlight("single.md"));

    model = dispatch(model, Message::PickerConfirm);
    assert_eq!(model.viewer.layout().active(), Region::Pages);
    assert_eq!(
        model.viewer.state(),
        ViewerState::Viewing {
            page_count: 1,
            current_index: 0
        }
    );
    let selected = model.viewer.selection().unwrap();
    assert_eq!(
        selected.source_path.canonicalize().unwrap(),
        fx.path("single.md").canonicalize().unwrap()
    );
}

#[test]
fn test_picker_confirm_on_directory_enters_it() {
    let fx = Fixture::new();
    std::fs::create_dir(fx.path("sub")).unwrap();
    let mut model = update(fx.model(), Message::TogglePicker);
    model.file_picker.highlight("sub");

    let model = dispatch(model, Message::PickerConfirm);
    assert!(model.file_picker.path().ends_with("sub"));
    assert_eq!(model.viewer.state(), ViewerState::PickingFile);
}

#[test]
fn test_failed_select_keeps_previous_document() {
    let fx = Fixture::new();
    let mut model = fx.model();
    model.select(&fx.path("guide.md"));

    assert!(!model.select(&fx.path("missing.md")));

    assert_eq!(model.viewer.page_count(), 3);
    let (message, level) = toast(&model).unwrap();
    assert_eq!(level, ToastLevel::Error);
    assert!(message.starts_with("Open failed:"));
}

#[test]
fn test_layout_failure_reports_open_failed() {
    let fx = Fixture::new();
    let mut model = fx.model_with(true);
    assert!(!model.select(&fx.path("guide.md")));
    assert_eq!(model.viewer.state(), ViewerState::NoSelection);
    let (message, _) = toast(&model).unwrap();
    assert!(message.contains("layout of"));
}

#[test]
fn test_picker_parent_goes_up() {
    let fx = Fixture::new();
    std::fs::create_dir(fx.path("sub")).unwrap();
    let mut model = fx.model();
    model.file_picker = FilePicker::open(&fx.path("sub")).unwrap();

    let model = dispatch(model, Message::PickerParent);
    assert_eq!(
        model.file_picker.path(),
        fx.docs.path().canonicalize().unwrap()
    );
    assert_eq!(model.file_picker.selection().unwrap().name, "sub");
}

#[test]
fn test_watcher_follows_selection_when_enabled() {
    let fx = Fixture::new();
    let mut model = fx.model();
    model.watch_enabled = true;
    model.select(&fx.path("guide.md"));

    let mut watcher: Option<SourceWatcher> = None;
    App::sync_watcher(&mut model, &mut watcher);
    assert!(watcher.as_ref().is_some_and(|w| w.watches(&fx.path("guide.md"))));

    model.select(&fx.path("single.md"));
    App::sync_watcher(&mut model, &mut watcher);
    assert!(watcher.as_ref().is_some_and(|w| w.watches(&fx.path("single.md"))));

    model.watch_enabled = false;
    App::sync_watcher(&mut model, &mut watcher);
    assert!(watcher.is_none());
}

// display

#[test]
fn test_display_follows_cursor() {
    let fx = Fixture::new();
    let mut model = fx.model();
    model.sync_display();
    assert_eq!(*model.display_source(), DisplaySource::Placeholder);

    model.select(&fx.path("guide.md"));
    model.sync_display();
    let DisplaySource::Page(first) = model.display_source().clone() else {
        panic!("expected a page");
    };

    model = update(model, Message::NextPage);
    model.sync_display();
    let DisplaySource::Page(second) = model.display_source().clone() else {
        panic!("expected a page");
    };
    assert_ne!(first, second);
    assert!(second.exists());
}

#[test]
fn test_display_empty_for_zero_page_document() {
    let fx = Fixture::new();
    let empty = fx.write("empty.md", 0);
    let mut model = fx.model();
    model.select(&empty);
    model.sync_display();
    assert_eq!(*model.display_source(), DisplaySource::Empty);
}

// startup

#[test]
fn test_startup_file_is_resolved_against_cwd_and_selected() {
    let fx = Fixture::new();
    let mut model = fx.model();
    App::open_startup(&mut model, fx.docs.path(), Some(Path::new("guide.md")));
    assert_eq!(
        model.viewer.state(),
        ViewerState::Viewing {
            page_count: 3,
            current_index: 0
        }
    );
    assert_eq!(model.file_picker.selection().unwrap().name, "guide.md");
    assert!(model.active_toast().is_none());
}

#[test]
fn test_missing_startup_file_reports_and_stays_unselected() {
    let fx = Fixture::new();
    let mut model = fx.model();
    App::open_startup(&mut model, fx.docs.path(), Some(Path::new("missing.md")));
    assert_eq!(model.viewer.state(), ViewerState::NoSelection);
    let (message, level) = toast(&model).unwrap();
    assert_eq!(level, ToastLevel::Error);
    assert!(message.starts_with("Open failed: cannot read"));
    model.sync_display();
    assert_eq!(*model.display_source(), DisplaySource::Placeholder);
}

#[test]
fn test_startup_without_file_shows_placeholder_and_hint() {
    let fx = Fixture::new();
    let mut model = fx.model();
    App::open_startup(&mut model, fx.docs.path(), None);
    model.sync_display();
    assert_eq!(model.viewer.state(), ViewerState::NoSelection);
    assert_eq!(*model.display_source(), DisplaySource::Placeholder);
    assert_eq!(
        toast(&model),
        Some((
            "Press ctrl+O to open a markdown file".to_string(),
            ToastLevel::Info
        ))
    );
    assert_eq!(model.file_picker.selection().unwrap().name, "guide.md");
}

// toasts

#[test]
fn test_toast_expires() {
    let fx = Fixture::new();
    let mut model = fx.model();
    model.show_toast(ToastLevel::Warning, "careful");
    assert!(!model.expire_toast(Instant::now()));
    assert!(model.expire_toast(Instant::now() + Duration::from_secs(5)));
    assert!(model.active_toast().is_none());
}
