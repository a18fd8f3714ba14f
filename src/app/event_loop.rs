use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;
use tracing::{debug, info};

use crate::app::{App, Message, Model, ToastLevel, update};
use crate::convert::{PdfiumRasterizer, Pipeline, Wkhtmltopdf};
use crate::picker::FilePicker;
use crate::scratch::{DEFAULT_SCRATCH_DIR, ScratchDir};
use crate::viewer::Viewer;
use crate::watcher::SourceWatcher;

impl App {
    /// Run the main event loop.
    ///
    /// The scratch directory exists for exactly as long as this call.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory, the scratch directory or
    /// the terminal cannot be set up, or if terminal I/O fails. Conversion
    /// failures are reported in the UI and never end the loop.
    pub fn run(&mut self) -> Result<()> {
        let cwd = std::env::current_dir().context("cannot determine working directory")?;

        // Create image picker BEFORE initializing terminal (queries stdio)
        let image_picker = if self.images_enabled {
            crate::image::create_picker(self.force_half_cell)
        } else {
            None
        };

        let scratch = ScratchDir::create(DEFAULT_SCRATCH_DIR)
            .with_context(|| format!("cannot create scratch directory {DEFAULT_SCRATCH_DIR}"))?;

        let typesetter = self
            .wkhtmltopdf
            .clone()
            .map_or_else(Wkhtmltopdf::default, Wkhtmltopdf::new);
        let rasterizer = PdfiumRasterizer::default()
            .with_library_dir(self.pdfium_library.clone())
            .with_page_width(self.page_width);
        let pipeline = Pipeline::new(scratch.path(), Box::new(typesetter), Box::new(rasterizer));
        let viewer = Viewer::new(pipeline, &cwd);
        let file_picker = FilePicker::open(&cwd)?;

        // Initialize terminal
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - folio requires an interactive terminal")?;
        let size = terminal.size()?;

        let mut model =
            Model::new(viewer, file_picker, (size.width, size.height)).with_image_picker(image_picker);
        model.images_enabled = self.images_enabled;
        model.watch_enabled = self.watch_enabled;

        Self::open_startup(&mut model, &cwd, self.file.as_deref());

        let result = Self::event_loop(&mut terminal, model);

        // Restore terminal
        ratatui::restore();
        drop(scratch);

        result
    }

    /// Select the file named on the command line, resolved against `cwd`.
    ///
    /// Without a file the placeholder stays up with a hint; a file that fails
    /// to convert leaves the viewer in `NoSelection` with an error toast.
    pub(super) fn open_startup(model: &mut Model, cwd: &Path, file: Option<&Path>) {
        let Some(file) = file else {
            model.file_picker.highlight_first_markdown();
            model.show_toast(ToastLevel::Info, "Press ctrl+O to open a markdown file");
            return;
        };
        let path = cwd.join(file);
        info!(path = %path.display(), "opening startup document");
        if model.select(&path)
            && let Some(name) = path.file_name()
        {
            model.file_picker.highlight(&name.to_string_lossy());
        }
    }

    fn event_loop(terminal: &mut DefaultTerminal, mut model: Model) -> Result<()> {
        let mut watcher: Option<SourceWatcher> = None;
        Self::sync_watcher(&mut model, &mut watcher);
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            if watcher.as_mut().is_some_and(SourceWatcher::take_change_ready) {
                debug!("source changed on disk");
                model = Self::dispatch(model, &mut watcher, Message::SourceChanged);
                needs_render = true;
            }

            let poll_ms = if needs_render { 0 } else { 250 };
            if event::poll(Duration::from_millis(poll_ms))? {
                if let Some(msg) = Self::handle_event(&event::read()?, &model) {
                    model = Self::dispatch(model, &mut watcher, msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                while event::poll(Duration::from_millis(0))? {
                    if let Some(msg) = Self::handle_event(&event::read()?, &model) {
                        model = Self::dispatch(model, &mut watcher, msg);
                        needs_render = true;
                    }
                }
            }

            if model.should_quit {
                break;
            }

            if needs_render {
                model.sync_display();
                terminal.draw(|frame| crate::ui::render(&mut model, frame))?;
                needs_render = false;
            }
        }
        Ok(())
    }

    /// Run `msg` through `update`, then its side effects.
    pub(super) fn dispatch(
        model: Model,
        watcher: &mut Option<SourceWatcher>,
        msg: Message,
    ) -> Model {
        debug!(?msg, "message");
        let side_msg = msg.clone();
        let mut model = update(model, msg);
        Self::handle_message_side_effects(&mut model, watcher, &side_msg);
        model
    }
}
