//! Line-oriented terminal frontend (native only).
//!
//! Reads one command per line, turns it into a [`Message`], and prints the
//! visible panel afterwards. Finished ingestions are drained before every
//! prompt.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{IMAGE_EXTENSIONS, is_image_filename};
use crate::controller::Controller;
use crate::ingest::IngestPool;
use crate::message::{Command, Message};
use crate::model::ViewId;
use crate::panel::{Panel, Screen};
use crate::storage::KeyValueStore;

const HELP: &str = "\
Commands:
  list                 show the visible panel again
  add                  create a new view and edit it
  edit <id>            edit a view
  show <id>            open a view in the viewer
  show                 open the edited view in the viewer
  remove <id>          delete a view
  rename <name>        rename the edited view
  add-item [paths..]   add photos (opens a file dialog without paths)
  remove-item <index>  remove a photo from the edited view
  wait                 wait for photos still being processed
  back                 return to the view list
  help                 show this help
  quit                 exit";

/// How long `wait` blocks for a single ingestion.
const WAIT_TIMEOUT: Duration = Duration::from_secs(60);

/// A parsed shell line.
#[derive(Debug, PartialEq, Eq)]
enum ShellCommand {
    List,
    Add,
    Edit(ViewId),
    Show(Option<ViewId>),
    Remove(ViewId),
    Rename(String),
    AddItem(Vec<PathBuf>),
    RemoveItem(usize),
    Wait,
    Back,
    Help,
    Quit,
}

fn parse_line(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let parse_id = |arg: &str| -> Result<ViewId, String> {
        arg.parse().map_err(|_| format!("'{}' is not a view id", arg))
    };

    let command = match word {
        "" => return Ok(None),
        "list" | "ls" => ShellCommand::List,
        "add" => ShellCommand::Add,
        "edit" => ShellCommand::Edit(parse_id(rest)?),
        "show" if rest.is_empty() => ShellCommand::Show(None),
        "show" => ShellCommand::Show(Some(parse_id(rest)?)),
        "remove" | "rm" => ShellCommand::Remove(parse_id(rest)?),
        "rename" => ShellCommand::Rename(rest.to_string()),
        "add-item" => ShellCommand::AddItem(rest.split_whitespace().map(PathBuf::from).collect()),
        "remove-item" => ShellCommand::RemoveItem(
            rest.parse()
                .map_err(|_| format!("'{}' is not an item index", rest))?,
        ),
        "wait" => ShellCommand::Wait,
        "back" => ShellCommand::Back,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("Unknown command '{}', try 'help'", other)),
    };
    Ok(Some(command))
}

/// Interactive terminal session over a controller.
pub struct Shell<S, R, W> {
    controller: Controller<S>,
    pool: IngestPool,
    input: R,
    output: W,
}

impl<S: KeyValueStore, R: BufRead, W: Write> Shell<S, R, W> {
    /// Create a shell. The controller is started on [`run`](Self::run).
    pub fn new(controller: Controller<S>, pool: IngestPool, input: R, output: W) -> Self {
        Self {
            controller,
            pool,
            input,
            output,
        }
    }

    /// Consume the shell, returning its controller.
    pub fn into_controller(self) -> Controller<S> {
        self.controller
    }

    /// Run until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        self.controller.start();
        self.render()?;

        let mut line = String::new();
        loop {
            self.drain_ingested(None);
            write!(self.output, "> ")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }

            match parse_line(&line) {
                Ok(None) => continue,
                Ok(Some(ShellCommand::Quit)) => break,
                Ok(Some(ShellCommand::Help)) => writeln!(self.output, "{}", HELP)?,
                Ok(Some(command)) => {
                    self.execute(command);
                    self.render()?;
                }
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }

        if self.pool.pending() > 0 {
            log::warn!("Exiting with {} photos still processing", self.pool.pending());
        }
        Ok(())
    }

    fn execute(&mut self, command: ShellCommand) {
        let message = match command {
            ShellCommand::List => return,
            ShellCommand::Wait => {
                self.drain_ingested(Some(WAIT_TIMEOUT));
                return;
            }
            ShellCommand::AddItem(paths) => {
                if let Some(Command::PickFiles) = self.controller.update(Message::AddItem) {
                    self.pick_files(paths);
                }
                return;
            }
            ShellCommand::Add => Message::AddView,
            ShellCommand::Edit(id) => Message::EditView(id),
            ShellCommand::Show(Some(id)) => Message::ShowView(id),
            ShellCommand::Show(None) => Message::ShowCurrentView,
            ShellCommand::Remove(id) => Message::RemoveView(id),
            ShellCommand::Rename(name) => Message::RenameView(name),
            ShellCommand::RemoveItem(index) => Message::RemoveItem(index),
            ShellCommand::Back => Message::Back,
            ShellCommand::Help | ShellCommand::Quit => return,
        };
        self.controller.update(message);
    }

    /// Submit the given paths, or the files chosen in a dialog, for ingestion.
    fn pick_files(&mut self, paths: Vec<PathBuf>) {
        let paths = if paths.is_empty() {
            rfd::FileDialog::new()
                .set_title("Add photos")
                .add_filter("Images", IMAGE_EXTENSIONS)
                .pick_files()
                .unwrap_or_default()
        } else {
            paths
        };

        for path in paths {
            let name = path.to_string_lossy();
            if !is_image_filename(&name) {
                log::warn!("📂 Skipping non-image file {}", name);
                continue;
            }
            log::info!("📂 Reading file: {}", name);
            if let Err(e) = self.pool.submit(path.clone()) {
                log::error!("Failed to start ingesting {:?}: {}", path, e);
            }
        }
    }

    /// Hand finished ingestions to the controller. With a timeout, block until
    /// every pending task has reported or the timeout passes.
    fn drain_ingested(&mut self, timeout: Option<Duration>) {
        loop {
            let event = match timeout {
                Some(timeout) => self.pool.next_timeout(timeout),
                None => self.pool.try_next(),
            };
            let Some(event) = event else {
                break;
            };
            self.controller.update(Message::PhotoIngested(event));
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let screen = self.controller.screen();
        let text = render_screen(screen, self.controller.current_view());
        write!(self.output, "{}", text)?;
        if self.pool.pending() > 0 {
            writeln!(self.output, "({} photos processing)", self.pool.pending())?;
        }
        Ok(())
    }
}

/// Describe a photo source without printing the whole data URL.
fn describe_src(src: &str) -> String {
    match src.split_once(',') {
        Some((header, payload)) if header.starts_with("data:") => {
            format!("{} ({} KB)", header.trim_start_matches("data:"), payload.len() / 1024)
        }
        _ => src.to_string(),
    }
}

fn render_screen(screen: &Screen, current_view: Option<ViewId>) -> String {
    let mut out = String::new();
    match screen.panel {
        None => {}
        Some(Panel::Main) => {
            out.push_str("== Views ==\n");
            if screen.views.is_empty() {
                out.push_str("  (no views, use 'add')\n");
            }
            for entry in &screen.views {
                out.push_str(&format!(
                    "  {}  {}  [{}]\n",
                    entry.id,
                    entry.name,
                    describe_src(&entry.thumbnail)
                ));
            }
        }
        Some(Panel::EditView) => {
            out.push_str(&format!("== Editing: {} ==\n", screen.view_name));
            if screen.items.is_empty() {
                out.push_str("  (no photos, use 'add-item')\n");
            }
            for item in &screen.items {
                out.push_str(&format!(
                    "  #{}  {}  {}\n",
                    item.index,
                    item.orientation.name(),
                    describe_src(&item.src)
                ));
            }
        }
        Some(Panel::View) => {
            if let Some(id) = current_view {
                out.push_str(&format!("== Viewing view {} ==\n", id));
            }
            out.push_str("  ('back' returns to the list)\n");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::IngestSettings;
    use crate::ingest::test_util::png_bytes;
    use crate::storage::{MemoryStore, ViewStorage};

    fn run_script(script: &str) -> (Controller<MemoryStore>, String) {
        let controller = Controller::new(ViewStorage::new(MemoryStore::new()));
        let pool = IngestPool::new(IngestSettings::default());
        let mut output = Vec::new();
        let controller = {
            let mut shell = Shell::new(controller, pool, script.as_bytes(), &mut output);
            shell.run().unwrap();
            shell.into_controller()
        };
        (controller, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("  "), Ok(None));
        assert_eq!(parse_line("edit 42"), Ok(Some(ShellCommand::Edit(ViewId(42)))));
        assert_eq!(parse_line("show"), Ok(Some(ShellCommand::Show(None))));
        assert_eq!(
            parse_line("rename  Summer trip "),
            Ok(Some(ShellCommand::Rename("Summer trip".to_string())))
        );
        assert_eq!(
            parse_line("add-item a.jpg b.png"),
            Ok(Some(ShellCommand::AddItem(vec![
                PathBuf::from("a.jpg"),
                PathBuf::from("b.png")
            ])))
        );
        assert!(parse_line("edit nope").is_err());
        assert!(parse_line("remove-item -1").is_err());
        assert!(parse_line("dance").is_err());
    }

    #[test]
    fn test_describe_src() {
        assert_eq!(describe_src("nophotos.png"), "nophotos.png");
        assert_eq!(describe_src("data:image/jpeg;base64,AAAA"), "image/jpeg;base64 (0 KB)");
    }

    #[test]
    fn test_script_creates_and_renames_view() {
        let (controller, output) = run_script("add\nrename Trip\nback\nquit\n");

        assert!(output.contains("== Views =="));
        assert!(output.contains("== Editing: Trip =="));
        assert!(output.contains("Trip  [nophotos.png]"));
        assert_eq!(controller.panel(), Some(Panel::Main));
        assert_eq!(controller.storage().load_view_list().unwrap().len(), 1);
    }

    #[test]
    fn test_script_adds_photos_from_paths() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("wide.png");
        let notes = dir.path().join("notes.txt");
        std::fs::write(&photo, png_bytes(30, 10)).unwrap();
        std::fs::write(&notes, "hello").unwrap();

        let script = format!(
            "add\nadd-item {} {}\nwait\n",
            photo.display(),
            notes.display()
        );
        let (controller, output) = run_script(&script);

        assert!(output.contains("#0  landscape  image/jpeg;base64"));
        let id = controller.current_view().unwrap();
        let view = controller.storage().load_view(id).unwrap().unwrap();
        assert_eq!(view.photos.len(), 1);
    }

    #[test]
    fn test_script_reports_bad_input_and_continues() {
        let (controller, output) = run_script("frobnicate\nadd\n");

        assert!(output.contains("Unknown command 'frobnicate'"));
        assert_eq!(controller.panel(), Some(Panel::EditView));
    }
}
