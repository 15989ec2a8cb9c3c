//! FFI use-case API for the editor shell.
//!
//! # Responsibility
//! - Expose stable, use-case-level editor functions to the UI host.
//! - Keep error semantics simple: string messages, empty string = ok.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - One process-wide editor session; page ops address it implicitly.

use docuedit_core::{
    core_version as core_version_inner, image_markup, init_logging as init_logging_inner,
    link_markup, ping as ping_inner, table_markup, BufferSurface, EditSurface, EditorSession,
    SqliteStore,
};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};
use std::time::Instant;

const DB_FILE_NAME: &str = "docuedit.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static SESSION: Mutex<Option<EditorSession<BufferSurface, SqliteStore>>> = Mutex::new(None);

/// Minimal health-check API for host smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Idempotent for the same configuration; conflicts return an error.
/// - Never panics; returns empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Editor state envelope returned by page-affecting calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorStateResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Human-readable message for diagnostics/UI notices.
    pub message: String,
    /// Active page index (0-based).
    pub active_index: u32,
    /// Total page count.
    pub page_count: u32,
    /// 1-based "current / total" indicator text.
    pub indicator: String,
    /// Markup the surface should display after this call.
    pub surface: String,
}

/// Save status envelope returned by `editor_tick`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickResponse {
    /// Whether a debounced save fired during this tick.
    pub saved: bool,
    /// Status line text ("Saving..." / "All changes saved").
    pub status: String,
    /// Relative last-saved text ("Just now", "5 minutes ago", ...).
    pub last_saved: String,
    /// Error message when a save attempt failed, empty otherwise.
    pub message: String,
}

/// Export envelope: complete HTML plus the download file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResponse {
    pub ok: bool,
    pub message: String,
    pub file_name: String,
    pub html: String,
}

/// Word/character statistics of the active page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStatsResponse {
    pub words: u32,
    pub chars: u32,
}

/// Opens the process-wide editor session over the host database.
///
/// `surface_markup` is the current content of the host's editable region;
/// it is adopted as the first page when the store holds no document yet.
/// Any previous session is replaced.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; `ok=false` carries the failure message.
#[flutter_rust_bridge::frb(sync)]
pub fn session_open(surface_markup: String) -> EditorStateResponse {
    let store = match SqliteStore::open(resolve_db_path()) {
        Ok(store) => store,
        Err(err) => return failure_state(format!("session_open failed: {err}")),
    };

    let surface = BufferSurface::with_content(surface_markup);
    let session = EditorSession::open(store, surface, Instant::now());

    let mut guard = lock_session();
    *guard = Some(session);
    match guard.as_mut() {
        Some(session) => state_response(session, true, "Session opened."),
        None => failure_state("session_open failed: session slot empty"),
    }
}

/// Records a whole-content update of the editing surface.
///
/// # FFI contract
/// - Sync call; arms the body auto-save window.
/// - Returns empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn surface_input(markup: String) -> String {
    match with_session(|session| session.input(&markup, Instant::now())) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Records a document title update.
///
/// # FFI contract
/// - Sync call; arms the title auto-save window.
/// - Returns empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn title_input(title: String) -> String {
    match with_session(|session| session.set_title(title.clone(), Instant::now())) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Appends a blank page after the current last page and activates it.
///
/// # FFI contract
/// - Sync call, DB-backed execution (saves immediately).
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn add_page() -> EditorStateResponse {
    run_page_action(|session| match session.add_page(Instant::now()) {
        Ok(_) => (true, "Page added.".to_string()),
        Err(err) => (false, format!("add_page failed: {err}")),
    })
}

/// Deletes the active page; rejected on a single-page document.
///
/// Confirmation is the host's responsibility.
///
/// # FFI contract
/// - Sync call, DB-backed execution (saves immediately).
/// - Never panics; `ok=false` carries the rejection notice.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_page() -> EditorStateResponse {
    run_page_action(|session| match session.delete_active_page(Instant::now()) {
        Ok(_) => (true, "Page deleted.".to_string()),
        Err(err) => (false, err.to_string()),
    })
}

/// Switches to the page at `index` (0-based).
///
/// # FFI contract
/// - Sync call; does not save by itself.
/// - Out-of-range indices leave the session unchanged, `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn switch_page(index: u32) -> EditorStateResponse {
    run_page_action(|session| match session.switch_to(index as usize) {
        Ok(_) => (true, String::new()),
        Err(err) => (false, err.to_string()),
    })
}

/// Switches to the following page; a no-op on the last page.
#[flutter_rust_bridge::frb(sync)]
pub fn next_page() -> EditorStateResponse {
    run_page_action(|session| {
        session.next_page();
        (true, String::new())
    })
}

/// Switches to the preceding page; a no-op on the first page.
#[flutter_rust_bridge::frb(sync)]
pub fn prev_page() -> EditorStateResponse {
    run_page_action(|session| {
        session.prev_page();
        (true, String::new())
    })
}

/// Drives debounced auto-save and refreshes status texts.
///
/// The host calls this from its timer loop; display labels are also
/// recomputed here for the periodic "last edited" refresh.
///
/// # FFI contract
/// - Sync call, DB-backed when a save fires.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_tick() -> TickResponse {
    let now = Instant::now();
    match with_session(|session| {
        let result = session.tick(now);
        let status = session.status_label().to_string();
        let last_saved = session.last_saved_label(now);
        (result, status, last_saved)
    }) {
        Ok((result, status, last_saved)) => match result {
            Ok(saved) => TickResponse {
                saved,
                status,
                last_saved,
                message: String::new(),
            },
            Err(err) => TickResponse {
                saved: false,
                status,
                last_saved,
                message: format!("auto-save failed: {err}"),
            },
        },
        Err(err) => TickResponse {
            saved: false,
            status: String::new(),
            last_saved: String::new(),
            message: err,
        },
    }
}

/// Saves immediately, bypassing the debounce windows.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Returns empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn save_now() -> String {
    match with_session(|session| session.save(Instant::now())) {
        Ok(Ok(())) => String::new(),
        Ok(Err(err)) => format!("save failed: {err}"),
        Err(err) => err,
    }
}

/// Markup the surface should currently display.
#[flutter_rust_bridge::frb(sync)]
pub fn surface_content() -> String {
    with_session(|session| session.surface().content()).unwrap_or_default()
}

/// Current document title.
#[flutter_rust_bridge::frb(sync)]
pub fn document_title() -> String {
    with_session(|session| session.title().to_string()).unwrap_or_default()
}

/// Word/character statistics of the active page.
#[flutter_rust_bridge::frb(sync)]
pub fn text_stats() -> TextStatsResponse {
    match with_session(|session| session.text_stats()) {
        Ok(stats) => TextStatsResponse {
            words: stats.words as u32,
            chars: stats.chars as u32,
        },
        Err(_) => TextStatsResponse { words: 0, chars: 0 },
    }
}

/// Renders the whole document as one self-contained HTML file.
///
/// # FFI contract
/// - Sync call; flushes the surface first.
/// - Never panics; `ok=false` carries the failure message.
#[flutter_rust_bridge::frb(sync)]
pub fn export_document() -> ExportResponse {
    match with_session(|session| (session.export_html(), session.export_file_name())) {
        Ok((html, file_name)) => ExportResponse {
            ok: true,
            message: String::new(),
            file_name,
            html,
        },
        Err(err) => ExportResponse {
            ok: false,
            message: err,
            file_name: String::new(),
            html: String::new(),
        },
    }
}

/// Builds an anchor fragment for link insertion.
///
/// Returns empty string when text or url is missing; the host keeps its
/// panel open in that case.
#[flutter_rust_bridge::frb(sync)]
pub fn link_fragment(text: String, url: String) -> String {
    link_markup(&text, &url).unwrap_or_default()
}

/// Builds an image fragment for image insertion (alt text optional).
#[flutter_rust_bridge::frb(sync)]
pub fn image_fragment(url: String, alt: String) -> String {
    image_markup(&url, &alt).unwrap_or_default()
}

/// Builds a table fragment with the requested dimensions.
#[flutter_rust_bridge::frb(sync)]
pub fn table_fragment(rows: u32, cols: u32) -> String {
    table_markup(rows as usize, cols as usize).unwrap_or_default()
}

fn run_page_action(
    f: impl FnOnce(&mut EditorSession<BufferSurface, SqliteStore>) -> (bool, String),
) -> EditorStateResponse {
    let mut guard = lock_session();
    match guard.as_mut() {
        Some(session) => {
            let (ok, message) = f(session);
            state_response(session, ok, message)
        }
        None => failure_state(no_session_message()),
    }
}

fn state_response(
    session: &mut EditorSession<BufferSurface, SqliteStore>,
    ok: bool,
    message: impl Into<String>,
) -> EditorStateResponse {
    let pages = session.pages();
    let active_index = pages.active_index() as u32;
    let page_count = pages.len() as u32;
    EditorStateResponse {
        ok,
        message: message.into(),
        active_index,
        page_count,
        indicator: session.page_indicator(),
        surface: session.surface().content(),
    }
}

fn failure_state(message: impl Into<String>) -> EditorStateResponse {
    EditorStateResponse {
        ok: false,
        message: message.into(),
        active_index: 0,
        page_count: 0,
        indicator: String::new(),
        surface: String::new(),
    }
}

fn with_session<T>(
    f: impl FnOnce(&mut EditorSession<BufferSurface, SqliteStore>) -> T,
) -> Result<T, String> {
    let mut guard = lock_session();
    match guard.as_mut() {
        Some(session) => Ok(f(session)),
        None => Err(no_session_message()),
    }
}

fn lock_session() -> MutexGuard<'static, Option<EditorSession<BufferSurface, SqliteStore>>> {
    match SESSION.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn no_session_message() -> String {
    "no active session; call session_open first".to_string()
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("DOCUEDIT_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}
