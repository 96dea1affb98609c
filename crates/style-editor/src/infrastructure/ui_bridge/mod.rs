//! Command bridge: exposes the editor's use cases to a UI or the CLI.
//!
//! Every command is a free `async fn` taking the shared [`AppState`] and
//! returning a [`CommandResult`].  The CLI in `main.rs` is one consumer; a
//! desktop or web front end would be another, calling the same functions.
//!
//! # How the pieces fit (for beginners)
//!
//! ```text
//!   demangle("_Z3foov")            set_value("IndentWidth", "4")
//!          │                                 │
//!          ▼                                 ▼
//!   ┌─────────────┐   last input    ┌─────────────────┐
//!   │ submit_input│◄────rerender────│  StyleSession   │──persist──► StateStore
//!   └──────┬──────┘                 └─────────────────┘
//!          │ demangler + formatter from ModuleSlots
//!          ▼
//!   watch::Sender<Vec<String>>  ──►  subscribers (UI, CLI)
//! ```
//!
//! - Input that arrives before the engines are ready is queued and replayed
//!   once, in order, when they settle.
//! - Every style change and flag toggle re-runs the pipeline on the most
//!   recent input.
//! - Style-editing commands require the expert flag.
//!
//! # `CommandResult<T>` wrapper
//!
//! All commands return `CommandResult<T>` rather than `Result<T, E>`, so
//! every response has the same shape:
//! `{ success: bool, data: T | null, error: string | null }`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use style_core::{
    classify, enum_values, walk, Edit, EditError, Preset, ScalarValue, Shape, StyleNode, StylePath,
};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use crate::application::{
    edit_style::StyleSession,
    module_lifecycle::{EngineAcquisitionFailure, ModuleLoader, ModuleSlot, ModuleStatus},
    ports::{
        read_flag, DemanglingEngine, FormattingEngine, StateStore, ENABLE_EXPERT_KEY, ENABLE_FORMAT_KEY,
    },
    render_output::render_output,
};
use crate::infrastructure::{
    engines::{BuiltinDemanglerLoader, BuiltinFormatterLoader},
    storage::config::EditorConfig,
};

/// Message returned by style-editing commands while expert mode is off.
pub const EXPERT_MODE_REQUIRED: &str = "style editing requires expert mode (set_expert_mode true)";

// ── Shared application state ──────────────────────────────────────────────────

/// State shared by every command.
///
/// All mutable fields are async Tokio mutexes because commands run
/// concurrently on the runtime and must not block its worker threads.
pub struct AppState {
    pub demangler: ModuleSlot<dyn DemanglingEngine>,
    pub formatter: ModuleSlot<dyn FormattingEngine>,
    store: Arc<dyn StateStore>,
    /// `None` until the formatter module is ready.
    session: Mutex<Option<StyleSession>>,
    flags: Mutex<FlagsDto>,
    /// Input waiting for the pipeline to settle, oldest first.
    pending: Mutex<Vec<String>>,
    last_input: Mutex<Option<String>>,
    output: watch::Sender<Vec<String>>,
    first_run_preset: Preset,
}

/// Outcome of [`AppState::submit_input`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The pipeline was ready; these lines were published.
    Rendered(Vec<String>),
    /// Queued until the engines settle.
    Queued,
}

impl AppState {
    /// Builds the state around explicit engine loaders and a store.
    ///
    /// The feature flags are read from the store immediately; engines are
    /// not loaded until [`AppState::start`] or first use.
    pub fn new(
        config: EditorConfig,
        store: Arc<dyn StateStore>,
        demangler_loader: Arc<dyn ModuleLoader<dyn DemanglingEngine>>,
        formatter_loader: Arc<dyn ModuleLoader<dyn FormattingEngine>>,
    ) -> Arc<Self> {
        let first_run_preset = config.first_run_preset().unwrap_or_else(|e| {
            warn!("{e}, using {}", Preset::Mozilla);
            Preset::Mozilla
        });
        let flags = FlagsDto {
            format_enabled: read_flag(store.as_ref(), ENABLE_FORMAT_KEY),
            expert_mode: read_flag(store.as_ref(), ENABLE_EXPERT_KEY),
        };
        let (output, _) = watch::channel(Vec::new());

        Arc::new(Self {
            demangler: ModuleSlot::new("demangler", demangler_loader),
            formatter: ModuleSlot::new("formatter", formatter_loader),
            store,
            session: Mutex::new(None),
            flags: Mutex::new(flags),
            pending: Mutex::new(Vec::new()),
            last_input: Mutex::new(None),
            output,
            first_run_preset,
        })
    }

    /// Builds the state with the built-in demangler and formatter.
    pub fn with_builtin_engines(config: EditorConfig, store: Arc<dyn StateStore>) -> Arc<Self> {
        Self::new(
            config,
            store,
            Arc::new(BuiltinDemanglerLoader),
            Arc::new(BuiltinFormatterLoader),
        )
    }

    /// Brings up the demangler, and the formatter when formatting is on.
    ///
    /// Failures are logged and leave the affected features unavailable.
    pub async fn start(self: &Arc<Self>) {
        if let Err(e) = self.demangler.acquire().await {
            warn!("{e}");
        }
        if self.flags.lock().await.format_enabled {
            if let Err(e) = self.ensure_session().await {
                warn!("{e}");
            }
        }
    }

    /// Receives every published output, latest value first.
    pub fn subscribe_output(&self) -> watch::Receiver<Vec<String>> {
        self.output.subscribe()
    }

    pub async fn flags(&self) -> FlagsDto {
        *self.flags.lock().await
    }

    /// Acquires the formatter and restores the style session if needed.
    async fn ensure_session(&self) -> Result<(), EngineAcquisitionFailure> {
        let engine = self.formatter.acquire().await?;
        let mut session = self.session.lock().await;
        if session.is_none() {
            *session = Some(StyleSession::restore(
                engine,
                Arc::clone(&self.store),
                self.first_run_preset,
            ));
        }
        Ok(())
    }

    /// The demangler has settled and, with formatting on, so has the
    /// formatter session.
    async fn pipeline_settled(&self) -> bool {
        if self.demangler.peek().await.is_none() {
            return false;
        }
        if !self.flags.lock().await.format_enabled {
            return true;
        }
        self.session.lock().await.is_some() || matches!(self.formatter.peek().await, Some(Err(_)))
    }

    /// Feeds one input through the output pipeline.
    ///
    /// Renders immediately when the pipeline has settled and nothing is
    /// queued; otherwise queues the input and replays it later.
    ///
    /// # Errors
    ///
    /// Returns the demangler's [`EngineAcquisitionFailure`] when it is known
    /// to be unavailable.
    pub async fn submit_input(self: &Arc<Self>, text: impl Into<String>) -> Result<Submission, EngineAcquisitionFailure> {
        let text = text.into();
        *self.last_input.lock().await = Some(text.clone());

        let mut pending = self.pending.lock().await;
        if pending.is_empty() && self.pipeline_settled().await {
            let demangler = self.demangler.acquire().await?;
            let lines = self.render(demangler.as_ref(), &text).await;
            self.output.send_replace(lines.clone());
            return Ok(Submission::Rendered(lines));
        }

        let first = pending.is_empty();
        pending.push(text);
        debug!(queued = pending.len(), "pipeline not ready, queued input");
        if first {
            tokio::spawn(Arc::clone(self).replay_pending());
        }
        Ok(Submission::Queued)
    }

    /// Waits for the engines, then renders every queued input exactly once.
    async fn replay_pending(self: Arc<Self>) {
        let demangler = match self.demangler.acquire().await {
            Ok(demangler) => Some(demangler),
            Err(e) => {
                warn!("dropping queued input: {e}");
                None
            }
        };
        if self.flags.lock().await.format_enabled {
            if let Err(e) = self.ensure_session().await {
                warn!("replaying without formatting: {e}");
            }
        }

        let mut pending = self.pending.lock().await;
        let queued = std::mem::take(&mut *pending);
        let Some(demangler) = demangler else {
            return;
        };
        debug!(count = queued.len(), "replaying queued input");
        for input in queued {
            let lines = self.render(demangler.as_ref(), &input).await;
            self.output.send_replace(lines);
        }
    }

    async fn render(&self, demangler: &dyn DemanglingEngine, input: &str) -> Vec<String> {
        let format_enabled = self.flags.lock().await.format_enabled;
        let session = self.session.lock().await;
        let formatter = if format_enabled { session.as_ref() } else { None };
        render_output(input, demangler, formatter)
    }

    /// Re-runs the pipeline on the most recent input, if any.
    async fn rerender(self: &Arc<Self>) {
        let last = self.last_input.lock().await.clone();
        if let Some(text) = last {
            if let Err(e) = self.submit_input(text).await {
                warn!("could not re-render output: {e}");
            }
        }
    }

    fn store_flag(&self, key: &str, enabled: bool) {
        let value = if enabled { "true" } else { "false" };
        if let Err(e) = self.store.set(key, value) {
            warn!("could not persist {key}: {e}");
        }
    }
}

// ── Data Transfer Objects ─────────────────────────────────────────────────────

/// The two persisted feature flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagsDto {
    /// Format demangled output with the working style.
    pub format_enabled: bool,
    /// Allow editing the working style.
    pub expert_mode: bool,
}

/// One node of the style tree as the UI renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleEntryDto {
    /// Textual path, empty for the root.
    pub path: String,
    pub depth: usize,
    pub shape: Shape,
    /// Current value for scalars, enums and present optionals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Whether an optional is present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Allowed members for enums.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Item count for lists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub len: Option<usize>,
}

impl StyleEntryDto {
    pub fn new(path: &StylePath, node: &StyleNode) -> Self {
        let (value, enabled) = match node {
            StyleNode::Scalar(v) => (Some(v.to_string()), None),
            StyleNode::Optional { value, .. } => (value.as_ref().map(ScalarValue::to_string), Some(value.is_some())),
            StyleNode::Enum(v) => (Some(v.name().to_string()), None),
            StyleNode::List(_) | StyleNode::Struct(_) => (None, None),
        };
        Self {
            path: path.to_string(),
            depth: path.len(),
            shape: classify(node),
            value,
            enabled,
            options: enum_values(node).map(|members| members.iter().map(|m| m.to_string()).collect()),
            len: node.as_list().map(|list| list.len()),
        }
    }
}

/// Result of submitting input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderDto {
    /// `true` when the input is waiting for the engines; `lines` is empty.
    pub queued: bool,
    pub lines: Vec<String>,
}

/// Load state of both engine modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModuleStatusDto {
    pub demangler: ModuleStatus,
    pub formatter: ModuleStatus,
}

/// Unified response wrapper used by every command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResult<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

// ── Output commands ───────────────────────────────────────────────────────────

/// Runs `text` through the demangle/format pipeline.
pub async fn demangle(state: Arc<AppState>, text: String) -> CommandResult<RenderDto> {
    match state.submit_input(text).await {
        Ok(Submission::Rendered(lines)) => CommandResult::ok(RenderDto { queued: false, lines }),
        Ok(Submission::Queued) => CommandResult::ok(RenderDto {
            queued: true,
            lines: Vec::new(),
        }),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Returns the load state of both engines.
pub async fn get_module_status(state: Arc<AppState>) -> CommandResult<ModuleStatusDto> {
    CommandResult::ok(ModuleStatusDto {
        demangler: state.demangler.status().await,
        formatter: state.formatter.status().await,
    })
}

// ── Flag commands ─────────────────────────────────────────────────────────────

pub async fn get_flags(state: Arc<AppState>) -> CommandResult<FlagsDto> {
    CommandResult::ok(state.flags().await)
}

/// Turns output formatting on or off, persists the flag and re-renders.
///
/// Enabling acquires the formatter.  If it is unavailable the flag stays
/// set, output stays unformatted and the failure is reported.
pub async fn set_format_enabled(state: Arc<AppState>, enabled: bool) -> CommandResult<FlagsDto> {
    state.flags.lock().await.format_enabled = enabled;
    state.store_flag(ENABLE_FORMAT_KEY, enabled);
    info!(enabled, "output formatting toggled");

    let acquired = if enabled { state.ensure_session().await } else { Ok(()) };
    if let Some(session) = state.session.lock().await.as_ref() {
        session.persist();
    }
    state.rerender().await;

    match acquired {
        Ok(()) => CommandResult::ok(state.flags().await),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Turns style editing on or off and persists the flag.
pub async fn set_expert_mode(state: Arc<AppState>, enabled: bool) -> CommandResult<FlagsDto> {
    state.flags.lock().await.expert_mode = enabled;
    state.store_flag(ENABLE_EXPERT_KEY, enabled);
    info!(enabled, "expert mode toggled");
    CommandResult::ok(state.flags().await)
}

// ── Style commands ────────────────────────────────────────────────────────────

/// Lists the preset names in menu order.
pub async fn list_presets(_state: Arc<AppState>) -> CommandResult<Vec<String>> {
    CommandResult::ok(Preset::ALL.iter().map(|p| p.name().to_string()).collect())
}

/// Returns the subtree at `path` (the whole style for an empty path),
/// pre-order.
pub async fn get_style_tree(state: Arc<AppState>, path: String) -> CommandResult<Vec<StyleEntryDto>> {
    let base = match StylePath::parse(&path) {
        Ok(p) => p,
        Err(e) => return CommandResult::err(e.to_string()),
    };
    if let Err(e) = state.ensure_session().await {
        return CommandResult::err(e.to_string());
    }

    let guard = state.session.lock().await;
    let Some(session) = guard.as_ref() else {
        return CommandResult::err("style session is not available");
    };
    let node = match session.node_at(&base) {
        Ok(node) => node,
        Err(e) => return CommandResult::err(e.to_string()),
    };
    let entries = walk(node)
        .into_iter()
        .map(|entry| {
            let full = StylePath::new(
                base.segments()
                    .iter()
                    .chain(entry.path.segments())
                    .cloned()
                    .collect(),
            );
            StyleEntryDto::new(&full, entry.node)
        })
        .collect();
    CommandResult::ok(entries)
}

/// Sets the leaf at `path` from user text: scalars and optionals parse it in
/// their kind, enums take it as a member name, text lists split it on lines.
pub async fn set_value(state: Arc<AppState>, path: String, raw: String) -> CommandResult<StyleEntryDto> {
    edit_style(&state, &path, |session, path| session.apply_text(path, &raw)).await
}

/// Enables or disables the optional at `path`.
///
/// `initial` is parsed in the optional's kind; without it the zero value of
/// the kind is used when enabling.
pub async fn toggle_optional(
    state: Arc<AppState>,
    path: String,
    enabled: bool,
    initial: Option<String>,
) -> CommandResult<StyleEntryDto> {
    edit_style(&state, &path, |session, path| {
        let initial = match (initial, session.node_at(path)?) {
            (Some(raw), StyleNode::Optional { kind, .. }) => Some(ScalarValue::parse(*kind, &raw)?),
            _ => None,
        };
        session.apply(path, &Edit::ToggleOptional { enabled, initial })
    })
    .await
}

/// Renames the enum member at `path`.
pub async fn rename_enum(state: Arc<AppState>, path: String, name: String) -> CommandResult<StyleEntryDto> {
    edit_style(&state, &path, |session, path| session.apply(path, &Edit::RenameEnum(name))).await
}

/// Replaces the text list at `path`, one item per line.
pub async fn set_list_text(state: Arc<AppState>, path: String, text: String) -> CommandResult<StyleEntryDto> {
    edit_style(&state, &path, |session, path| session.apply(path, &Edit::SetTextLines(text))).await
}

/// Resizes the list at `path`; new items are copies of its prototype.
pub async fn resize_list(state: Arc<AppState>, path: String, len: usize) -> CommandResult<StyleEntryDto> {
    edit_style(&state, &path, |session, path| session.apply(path, &Edit::Resize(len))).await
}

/// Replaces the working style with a fresh copy of the named preset.
pub async fn load_preset(state: Arc<AppState>, name: String) -> CommandResult<String> {
    let preset = match name.parse::<Preset>() {
        Ok(p) => p,
        Err(e) => return CommandResult::err(e.to_string()),
    };
    if let Err(e) = state.ensure_session().await {
        return CommandResult::err(e.to_string());
    }
    if let Some(session) = state.session.lock().await.as_mut() {
        session.load_preset(preset);
    }
    state.rerender().await;
    CommandResult::ok(preset.name().to_string())
}

/// Returns the working style in its persisted text form.
pub async fn export_style(state: Arc<AppState>) -> CommandResult<String> {
    if let Err(e) = state.ensure_session().await {
        return CommandResult::err(e.to_string());
    }
    match state.session.lock().await.as_ref().map(StyleSession::export) {
        Some(Ok(text)) => CommandResult::ok(text),
        Some(Err(e)) => CommandResult::err(e.to_string()),
        None => CommandResult::err("style session is not available"),
    }
}

/// Replaces the working style with one parsed from `text`.
pub async fn import_style(state: Arc<AppState>, text: String) -> CommandResult<()> {
    if !state.flags.lock().await.expert_mode {
        return CommandResult::err(EXPERT_MODE_REQUIRED);
    }
    if let Err(e) = state.ensure_session().await {
        return CommandResult::err(e.to_string());
    }
    let imported = match state.session.lock().await.as_mut() {
        Some(session) => session.import(&text).map_err(|e| e.to_string()),
        None => Err("style session is not available".to_string()),
    };
    if let Err(e) = imported {
        return CommandResult::err(e);
    }
    state.rerender().await;
    CommandResult::ok(())
}

/// Shared body of the path-based edit commands.
async fn edit_style<F>(state: &Arc<AppState>, path: &str, edit: F) -> CommandResult<StyleEntryDto>
where
    F: FnOnce(&mut StyleSession, &StylePath) -> Result<(), EditError>,
{
    if !state.flags.lock().await.expert_mode {
        return CommandResult::err(EXPERT_MODE_REQUIRED);
    }
    let path = match StylePath::parse(path) {
        Ok(p) => p,
        Err(e) => return CommandResult::err(e.to_string()),
    };
    if let Err(e) = state.ensure_session().await {
        return CommandResult::err(e.to_string());
    }

    let entry = {
        let mut guard = state.session.lock().await;
        let Some(session) = guard.as_mut() else {
            return CommandResult::err("style session is not available");
        };
        if let Err(e) = edit(session, &path) {
            return CommandResult::err(e.to_string());
        }
        match session.node_at(&path) {
            Ok(node) => StyleEntryDto::new(&path, node),
            Err(e) => return CommandResult::err(e.to_string()),
        }
    };
    state.rerender().await;
    CommandResult::ok(entry)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::FORMAT_STYLE_KEY;
    use crate::infrastructure::storage::memory::MemoryStateStore;

    /// Creates an isolated AppState over an in-memory store, so tests never
    /// touch the real config directory.
    fn make_state(entries: &[(&str, &str)]) -> (Arc<AppState>, Arc<MemoryStateStore>) {
        let store = Arc::new(MemoryStateStore::with_entries(entries.iter().copied()));
        let state = AppState::with_builtin_engines(EditorConfig::default(), Arc::clone(&store) as Arc<dyn StateStore>);
        (state, store)
    }

    async fn expert_state() -> (Arc<AppState>, Arc<MemoryStateStore>) {
        let (state, store) = make_state(&[("enableClangFormatExpert", "true")]);
        state.start().await;
        (state, store)
    }

    #[tokio::test]
    async fn test_flags_are_read_from_store() {
        // Arrange / Act
        let (state, _) = make_state(&[("enableClangFormat", "true"), ("enableClangFormatExpert", "yes")]);

        // Assert
        let flags = get_flags(state).await.data.unwrap();
        assert!(flags.format_enabled);
        assert!(!flags.expert_mode);
    }

    #[tokio::test]
    async fn test_demangle_after_start_renders_immediately() {
        let (state, _) = make_state(&[]);
        state.start().await;

        let result = demangle(Arc::clone(&state), "_Z3foov\n_ZNK3Foo3getEv".to_string()).await;

        let dto = result.data.unwrap();
        assert!(!dto.queued);
        assert_eq!(dto.lines, vec!["foo()", "Foo::get() const"]);
        assert_eq!(*state.subscribe_output().borrow(), dto.lines);
    }

    #[tokio::test]
    async fn test_edit_refused_without_expert_mode() {
        let (state, _) = make_state(&[]);
        state.start().await;

        let result = set_value(state, "IndentWidth".into(), "4".into()).await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some(EXPERT_MODE_REQUIRED));
    }

    #[tokio::test]
    async fn test_set_value_persists_and_returns_entry() {
        let (state, store) = expert_state().await;

        let result = set_value(Arc::clone(&state), "IndentWidth".into(), "4".into()).await;

        let entry = result.data.unwrap();
        assert_eq!(entry.path, "IndentWidth");
        assert_eq!(entry.value.as_deref(), Some("4"));
        let stored = store.get(FORMAT_STYLE_KEY).unwrap().unwrap();
        assert!(stored.contains("IndentWidth: 4"));
    }

    #[tokio::test]
    async fn test_bad_literal_reports_error() {
        let (state, _) = expert_state().await;

        let result = set_value(state, "ColumnLimit".into(), "wide".into()).await;

        assert!(!result.success);
        assert!(result.error.unwrap().contains("wide"));
    }

    #[tokio::test]
    async fn test_toggle_optional_with_initial_value() {
        let (state, _) = expert_state().await;

        let result = toggle_optional(
            state,
            "BracedInitializerIndentWidth".into(),
            true,
            Some("3".into()),
        )
        .await;

        let entry = result.data.unwrap();
        assert_eq!(entry.enabled, Some(true));
        assert_eq!(entry.value.as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn test_rename_enum_lists_options() {
        let (state, _) = expert_state().await;

        let entry = rename_enum(state, "PointerAlignment".into(), "Left".into())
            .await
            .data
            .unwrap();

        assert_eq!(entry.shape, Shape::Enum);
        assert_eq!(entry.value.as_deref(), Some("Left"));
        assert_eq!(entry.options.unwrap(), vec!["Left", "Right", "Middle"]);
    }

    #[tokio::test]
    async fn test_resize_list_reports_new_length() {
        let (state, _) = expert_state().await;

        let entry = resize_list(state, "IncludeCategories".into(), 5).await.data.unwrap();

        assert_eq!(entry.shape, Shape::List);
        assert_eq!(entry.len, Some(5));
    }

    #[tokio::test]
    async fn test_set_list_text_splits_lines() {
        let (state, _) = expert_state().await;

        let entry = set_list_text(state, "ForEachMacros".into(), "foreach\nQ_FOREACH".into())
            .await
            .data
            .unwrap();

        assert_eq!(entry.len, Some(2));
    }

    #[tokio::test]
    async fn test_load_preset_rejects_unknown_name() {
        let (state, _) = make_state(&[]);

        let result = load_preset(state, "Linux".into()).await;

        assert!(!result.success);
    }

    #[tokio::test]
    async fn test_get_style_tree_subtree_has_absolute_paths() {
        let (state, _) = make_state(&[]);

        let entries = get_style_tree(state, "BraceWrapping".into()).await.data.unwrap();

        assert_eq!(entries[0].path, "BraceWrapping");
        assert_eq!(entries[0].shape, Shape::Struct);
        assert!(entries.iter().any(|e| e.path == "BraceWrapping.AfterClass" && e.depth == 2));
    }

    #[tokio::test]
    async fn test_list_presets_in_menu_order() {
        let (state, _) = make_state(&[]);

        let names = list_presets(state).await.data.unwrap();

        assert_eq!(names.len(), 9);
        assert_eq!(names[0], "LLVM");
    }
}
