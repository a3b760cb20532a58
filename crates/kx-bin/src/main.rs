//! kilox entrypoint.
use anyhow::{Context, Result};
use clap::Parser;
use core_actions::{dispatch, open_document};
use core_config::{Config, load_from};
use core_events::InputEvent;
use core_model::{EditorModel, Settings};
use core_render::render_frame;
use core_state::Document;
use core_terminal::{CrosstermBackend, TerminalBackend, TerminalGuard};
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Instant;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE_NAME: &str = "kilox.log";
const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "kilox", version, about = "A small terminal text editor")]
struct Args {
    /// File to open. A path that does not exist yet starts an empty document
    /// that will be saved there.
    pub path: Option<PathBuf>,
    /// Configuration file path (overrides discovery of `kilox.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

struct AppStartup {
    backend: CrosstermBackend,
    log_guard: Option<WorkerGuard>,
}

struct EditorRuntime<'a> {
    model: EditorModel,
    _terminal_guard: TerminalGuard<'a>,
}

impl AppStartup {
    fn new() -> Self {
        Self {
            backend: CrosstermBackend::new(),
            log_guard: None,
        }
    }

    fn run<'a>(&'a mut self, args: Args) -> Result<EditorRuntime<'a>> {
        self.configure_logging();
        Self::install_panic_hook();
        info!(target: "runtime", version = env!("CARGO_PKG_VERSION"), "startup");

        let config = load_from(args.config.clone())?;
        let mut model = load_editor_model(args.path.as_deref(), &config)?;

        let title = match model.file_name() {
            Some(p) => format!("kilox - {}", p.display()),
            None => "kilox".to_string(),
        };
        self.backend.set_title(&title)?;
        let guard = self.backend.enter_guard()?;
        let (cols, rows) = guard.backend().size()?;
        model.set_screen_size(cols, rows);
        model.set_status(HELP_MESSAGE);

        info!(
            target: "runtime",
            path = args.path.as_ref().map(|p| p.display().to_string()),
            config_override = args.config.is_some(),
            tab_stop = config.effective_tab_stop,
            lines = model.document().line_count(),
            cols,
            rows,
            "bootstrap_complete"
        );
        Ok(EditorRuntime {
            model,
            _terminal_guard: guard,
        })
    }

    /// Log to `kilox.log` in the working directory; stdout belongs to the UI.
    fn configure_logging(&mut self) {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE_NAME);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        if tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .with_ansi(false)
            .try_init()
            .is_ok()
        {
            self.log_guard = Some(guard);
        }
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

/// Build the session for `path` using `config`. A missing file opens as an
/// empty document bound to that name; any other read failure is fatal.
fn load_editor_model(path: Option<&Path>, config: &Config) -> Result<EditorModel> {
    let registry = config.profile_registry();
    let tab_stop = config.effective_tab_stop;
    let settings = Settings {
        tab_stop,
        quit_times: config.quit_times(),
        message_timeout: config.message_timeout(),
    };

    let Some(path) = path else {
        let doc = Document::new(tab_stop, None);
        return Ok(EditorModel::new(doc, settings).with_registry(registry));
    };

    let doc = match open_document(path, &registry, tab_stop) {
        Ok(doc) => doc,
        Err(e) if e.is_not_found() => {
            warn!(target: "io", path = %path.display(), "new_file");
            Document::new(tab_stop, registry.select(&path.to_string_lossy()))
        }
        Err(e) => return Err(e).context("failed to open file"),
    };
    Ok(EditorModel::new(doc, settings)
        .with_registry(registry)
        .with_file_name(path))
}

impl EditorRuntime<'_> {
    /// Draw, wait for one event, apply it; repeat until a quit is dispatched.
    fn run(&mut self) -> Result<()> {
        loop {
            self.model.scroll();
            render_frame(&self.model, Instant::now()).flush()?;
            match core_input::read_event()? {
                InputEvent::Key(key) => {
                    if dispatch(&key, &mut self.model).quit {
                        break;
                    }
                }
                InputEvent::Resize(cols, rows) => self.model.set_screen_size(cols, rows),
            }
        }
        info!(target: "runtime", "shutdown");
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut app = AppStartup::new();
    let mut runtime = app.run(args)?;
    runtime.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config_with(content: &str) -> Config {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), content).unwrap();
        load_from(Some(tmp.path().to_path_buf())).unwrap()
    }

    #[test]
    fn args_parse_path_and_config() {
        let args = Args::try_parse_from(["kilox", "main.c", "--config", "k.toml"]).unwrap();
        assert_eq!(args.path, Some(PathBuf::from("main.c")));
        assert_eq!(args.config, Some(PathBuf::from("k.toml")));
        let args = Args::try_parse_from(["kilox"]).unwrap();
        assert!(args.path.is_none());
    }

    #[test]
    fn no_path_starts_unnamed_empty_document() {
        let model = load_editor_model(None, &Config::default()).unwrap();
        assert!(model.document().is_empty());
        assert!(model.file_name().is_none());
        assert_eq!(model.file_type(), None);
    }

    #[test]
    fn missing_file_binds_name_and_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.rs");
        let model = load_editor_model(Some(&path), &Config::default()).unwrap();
        assert!(model.document().is_empty());
        assert_eq!(model.file_name(), Some(path.as_path()));
        assert_eq!(model.file_type(), Some("rust"));
    }

    #[test]
    fn existing_file_uses_configured_tab_stop_and_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.py");
        std::fs::write(&path, "\tdef f():\n").unwrap();
        let config = config_with(
            "[editor]\ntab_stop = 4\nquit_times = 1\n\
             [[syntax]]\nname = \"python\"\nfile_patterns = [\".py\"]\nkeywords = [\"def\"]\n",
        );
        let model = load_editor_model(Some(&path), &config).unwrap();
        assert_eq!(model.document().line(0).unwrap().display(), b"    def f():");
        assert_eq!(model.file_type(), Some("python"));
        assert_eq!(model.settings().quit_times, 1);
        assert_eq!(model.quit_confirmations_remaining(), 1);
    }

    #[test]
    fn unreadable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // a directory cannot be read as a file
        assert!(load_editor_model(Some(dir.path()), &Config::default()).is_err());
    }
}
