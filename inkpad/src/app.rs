//! inkpad application shell.
//!
//! Thin composition of egui widgets around the inkcore state types. Every
//! handler performs only the documented state transitions: edits mark the
//! document dirty, confirmed loads/saves mark it clean and feed the recent
//! list, and destructive actions (new, close) go through the tracker's
//! decision point first.

use egui::text::{CCursor, CCursorRange};
use egui::{Context, Key};
use inkcore::browser::FileBrowser;
use inkcore::search::FindReplace;
use inkcore::session::SessionLock;
use inkcore::storage::{config_dir, documents_dir, load_text, save_text};
use inkcore::theme::{menu_bar, InkColors, InkTheme};
use inkcore::widgets::{status_bar, FileListItem, ToolButton};
use inkcore::{document, Decision, DocumentState, PromptAnswer, RecentFiles};
use std::path::PathBuf;

/// Extensions offered in the open dialog and accepted by Save As without
/// appending ".txt".
const TEXT_EXTENSIONS: &[&str] = &["txt", "md"];

#[derive(Debug, Clone, Copy, PartialEq)]
enum FileDialogMode {
    Open,
    Save,
}

/// Destructive action parked while the save prompt is on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PendingAction {
    NewDocument,
    CloseWindow,
}

pub struct InkpadApp {
    /// Document content; egui's TextEdit owns all editing behavior.
    text: String,
    state: DocumentState,
    recent: RecentFiles,
    recent_path: PathBuf,

    show_sidebar: bool,
    sidebar: FileBrowser,
    show_new_folder: bool,
    new_folder_name: String,
    confirm_delete: Option<PathBuf>,

    show_file_dialog: bool,
    file_dialog_mode: FileDialogMode,
    dialog_browser: FileBrowser,
    save_filename: String,

    show_find: bool,
    find: FindReplace,
    find_cursor: usize,
    last_match: Option<std::ops::Range<usize>>,
    find_notice: Option<String>,

    pending: Option<PendingAction>,
    close_confirmed: bool,
    show_about: bool,
    error_msg: Option<String>,

    editor_id: egui::Id,
    /// Held for the whole run; releasing it on drop lets the next launch
    /// create a fresh instance.
    _session: SessionLock,
}

impl InkpadApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, session: SessionLock) -> Self {
        Self::with_session(session)
    }

    fn with_session(session: SessionLock) -> Self {
        let recent_path = config_dir("inkpad").join("recent.json");
        let recent = RecentFiles::load(&recent_path).unwrap_or_default();

        Self {
            text: String::new(),
            state: DocumentState::new(),
            recent,
            recent_path,
            show_sidebar: false,
            sidebar: FileBrowser::new(documents_dir()),
            show_new_folder: false,
            new_folder_name: String::new(),
            confirm_delete: None,
            show_file_dialog: false,
            file_dialog_mode: FileDialogMode::Open,
            dialog_browser: FileBrowser::new(documents_dir()),
            save_filename: String::new(),
            show_find: false,
            find: FindReplace::new(),
            find_cursor: 0,
            last_match: None,
            find_notice: None,
            pending: None,
            close_confirmed: false,
            show_about: false,
            error_msg: None,
            editor_id: egui::Id::new("inkpad_editor"),
            _session: session,
        }
    }

    fn persist_recent(&self) {
        if let Err(e) = self.recent.save(&self.recent_path) {
            eprintln!("failed to save recent files: {}", e);
        }
    }

    // ---- file operations -------------------------------------------------

    fn new_document(&mut self) {
        self.text.clear();
        self.state.reset();
        self.find_cursor = 0;
        self.last_match = None;
    }

    /// Gate a destructive action through the tracker's decision point. The
    /// save prompt is a window, not a blocking call, so a dirty document
    /// parks the action and answers Cancel for now; the on-screen prompt
    /// feeds the real answer back through `resolve_prompt`. A clean document
    /// yields `Proceed` with the closure never invoked.
    fn gate_destructive(&mut self, action: PendingAction) -> Decision {
        let pending = &mut self.pending;
        self.state.request_destructive_action(|| {
            *pending = Some(action);
            PromptAnswer::Cancel
        })
    }

    fn request_new_document(&mut self) {
        if self.gate_destructive(PendingAction::NewDocument) == Decision::Proceed {
            self.new_document();
        }
    }

    /// Map the clicked prompt button through the tracker's decision point
    /// and act on the result.
    fn resolve_prompt(&mut self, ctx: &Context, answer: PromptAnswer) {
        match self.state.request_destructive_action(|| answer) {
            Decision::SaveThenProceed => {
                self.save_document();
                if !self.state.is_dirty() {
                    self.proceed_with_pending(ctx);
                } else if !self.show_file_dialog {
                    // In-place save failed; the error dialog explains why
                    // and the parked action is dropped.
                    self.pending = None;
                }
                // Otherwise the document is unbound and the Save As dialog
                // is now on screen: the parked action resumes after a
                // successful save there and clears on Cancel.
            }
            Decision::Proceed => self.proceed_with_pending(ctx),
            Decision::Cancel => self.pending = None,
        }
    }

    fn proceed_with_pending(&mut self, ctx: &Context) {
        match self.pending.take() {
            Some(PendingAction::NewDocument) => self.new_document(),
            Some(PendingAction::CloseWindow) => {
                self.close_confirmed = true;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            None => {}
        }
    }

    pub fn open_file(&mut self, path: PathBuf) {
        match load_text(&path) {
            Ok(content) => {
                self.text = content;
                self.state.mark_clean(Some(path.clone()));
                self.recent.record_use(path);
                self.persist_recent();
                self.find_cursor = 0;
                self.last_match = None;
            }
            Err(e) => {
                // Failed read: document state and recent list stay unchanged.
                self.error_msg = Some(format!("Could not open file:\n{}", e));
            }
        }
    }

    fn save_document(&mut self) {
        if let Some(path) = self.state.bound_path().map(PathBuf::from) {
            match save_text(&path, &self.text) {
                Ok(()) => {
                    self.state.mark_clean(Some(path.clone()));
                    self.recent.record_use(path);
                    self.persist_recent();
                }
                Err(e) => {
                    self.error_msg = Some(format!("Could not save file:\n{}", e));
                }
            }
        } else {
            self.show_save_as_dialog();
        }
    }

    fn save_document_as(&mut self, ctx: &Context, mut path: PathBuf) {
        // Keep plain-text files recognizable: default to .txt.
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if !TEXT_EXTENSIONS.contains(&ext.as_str()) {
            let name = format!(
                "{}.txt",
                path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default()
            );
            path.set_file_name(name);
        }
        match save_text(&path, &self.text) {
            Ok(()) => {
                self.state.mark_clean(Some(path.clone()));
                self.recent.record_use(path);
                self.persist_recent();
                self.sidebar.refresh();
                // A save prompt may have parked a new-file or close action
                // behind this dialog; resume it now that the save landed.
                self.proceed_with_pending(ctx);
            }
            Err(e) => {
                self.pending = None;
                self.error_msg = Some(format!("Could not save file:\n{}", e));
            }
        }
    }

    fn show_open_dialog(&mut self) {
        self.dialog_browser = FileBrowser::new(documents_dir())
            .with_filter(TEXT_EXTENSIONS.iter().map(|e| e.to_string()).collect());
        self.file_dialog_mode = FileDialogMode::Open;
        self.show_file_dialog = true;
    }

    fn show_save_as_dialog(&mut self) {
        self.dialog_browser = FileBrowser::new(documents_dir());
        self.file_dialog_mode = FileDialogMode::Save;
        self.save_filename = self
            .state
            .bound_path()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "untitled.txt".to_string());
        self.show_file_dialog = true;
    }

    // ---- find / replace --------------------------------------------------

    fn find_next(&mut self, ctx: &Context) {
        match self.find.find_next(&self.text, self.find_cursor) {
            Some(range) => {
                self.find_cursor = range.end;
                self.select_range(ctx, range.clone());
                self.last_match = Some(range);
                self.find_notice = None;
            }
            None => {
                self.last_match = None;
                self.find_notice = Some("No more matches found.".to_string());
            }
        }
    }

    fn replace_current(&mut self, ctx: &Context) {
        if let Some(range) = self.last_match.take() {
            if let Some(continue_from) = self.find.replace_selection(&mut self.text, range) {
                self.state.mark_dirty();
                self.find_cursor = continue_from;
            }
        }
        self.find_next(ctx);
    }

    fn replace_all(&mut self) {
        let (replaced, count) = self.find.replace_all(&self.text);
        if count > 0 {
            self.text = replaced;
            self.state.mark_dirty();
            self.find_cursor = 0;
            self.last_match = None;
        }
        self.find_notice = Some(match count {
            0 => "No matches found.".to_string(),
            1 => "Replaced 1 occurrence.".to_string(),
            n => format!("Replaced {} occurrences.", n),
        });
    }

    /// Highlight a byte range in the editor by moving TextEdit's selection.
    fn select_range(&mut self, ctx: &Context, range: std::ops::Range<usize>) {
        let start = self.text[..range.start].chars().count();
        let end = start + self.text[range.start..range.end].chars().count();
        if let Some(mut edit_state) = egui::TextEdit::load_state(ctx, self.editor_id) {
            edit_state
                .cursor
                .set_char_range(Some(CCursorRange::two(CCursor::new(start), CCursor::new(end))));
            edit_state.store(ctx, self.editor_id);
        }
        ctx.memory_mut(|m| m.request_focus(self.editor_id));
    }

    // ---- input -----------------------------------------------------------

    /// Cmd shortcuts intercepted before TextEdit consumes them. TextEdit
    /// keeps all text input, cursor movement, clipboard, and selection.
    fn handle_keyboard(&mut self, ctx: &Context) {
        let mut actions: Vec<Box<dyn FnOnce(&mut Self)>> = Vec::new();

        ctx.input_mut(|i| {
            let cmd = i.modifiers.command;
            let shift = i.modifiers.shift;

            let events = std::mem::take(&mut i.events);
            let mut remaining = Vec::new();

            for event in events {
                let mut handled = false;
                if let egui::Event::Key { key, pressed: true, .. } = &event {
                    match key {
                        Key::N if cmd => {
                            handled = true;
                            actions.push(Box::new(|s| s.request_new_document()));
                        }
                        Key::O if cmd => {
                            handled = true;
                            actions.push(Box::new(|s| s.show_open_dialog()));
                        }
                        Key::S if cmd && shift => {
                            handled = true;
                            actions.push(Box::new(|s| s.show_save_as_dialog()));
                        }
                        Key::S if cmd => {
                            handled = true;
                            actions.push(Box::new(|s| s.save_document()));
                        }
                        Key::F if cmd => {
                            handled = true;
                            actions.push(Box::new(|s| {
                                s.show_find = true;
                                s.find_notice = None;
                            }));
                        }
                        _ => {}
                    }
                }
                if !handled {
                    remaining.push(event);
                }
            }
            i.events = remaining;
        });

        for action in actions {
            action(self);
        }
    }

    // ---- rendering -------------------------------------------------------

    fn render_menu_bar(&mut self, ui: &mut egui::Ui) {
        menu_bar(ui, |ui| {
            let sidebar_resp = ui.add(ToolButton::new("Files").selected(self.show_sidebar));
            if sidebar_resp.clicked() {
                self.show_sidebar = !self.show_sidebar;
            }

            ui.menu_button("Options", |ui| {
                if ui.button("New File        \u{2318}N").clicked() {
                    self.request_new_document();
                    ui.close_menu();
                }
                if ui.button("Open...         \u{2318}O").clicked() {
                    self.show_open_dialog();
                    ui.close_menu();
                }
                if ui.button("Save            \u{2318}S").clicked() {
                    self.save_document();
                    ui.close_menu();
                }
                if ui.button("Save As...  \u{21e7}\u{2318}S").clicked() {
                    self.show_save_as_dialog();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Find / Replace  \u{2318}F").clicked() {
                    self.show_find = true;
                    self.find_notice = None;
                    ui.close_menu();
                }
                ui.separator();
                ui.menu_button("Recent Files", |ui| {
                    if self.recent.is_empty() {
                        ui.label("(No Recent Files)");
                    } else {
                        for path in self.recent.list().to_vec() {
                            let label = path.to_string_lossy().to_string();
                            if ui.button(&label).clicked() {
                                self.open_file(path);
                                ui.close_menu();
                            }
                        }
                    }
                });
            });

            ui.menu_button("Edit", |ui| {
                if ui.button("Cut        \u{2318}X").clicked() {
                    ui.ctx().input_mut(|i| i.events.push(egui::Event::Cut));
                    ui.close_menu();
                }
                if ui.button("Copy       \u{2318}C").clicked() {
                    ui.ctx().input_mut(|i| i.events.push(egui::Event::Copy));
                    ui.close_menu();
                }
                if ui.button("Paste      \u{2318}V").clicked() {
                    let text = arboard::Clipboard::new()
                        .ok()
                        .and_then(|mut c| c.get_text().ok())
                        .unwrap_or_default();
                    if !text.is_empty() {
                        ui.ctx().input_mut(|i| i.events.push(egui::Event::Text(text)));
                    }
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Select All \u{2318}A").clicked() {
                    ui.ctx().input_mut(|i| {
                        i.events.push(egui::Event::Key {
                            key: Key::A,
                            physical_key: Some(Key::A),
                            pressed: true,
                            repeat: false,
                            modifiers: egui::Modifiers::COMMAND,
                        });
                    });
                    ui.close_menu();
                }
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.link("About").clicked() {
                    self.show_about = true;
                }
            });
        });
    }

    fn render_editor(&mut self, ui: &mut egui::Ui) {
        let available = ui.available_size();
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let output = egui::TextEdit::multiline(&mut self.text)
                    .id(self.editor_id)
                    .font(egui::FontId::proportional(15.0))
                    .text_color(InkColors::TEXT_BRIGHT)
                    .desired_width(available.x)
                    .desired_rows((available.y / 20.0).max(4.0) as usize)
                    .frame(false)
                    .show(ui);

                // Any TextEdit change (typing, paste, delete) dirties the
                // document; repeated edits are a no-op on an already dirty
                // tracker.
                if output.response.changed() {
                    self.state.mark_dirty();
                }
            });
    }

    fn render_sidebar(&mut self, ctx: &Context) {
        egui::SidePanel::left("file_sidebar")
            .resizable(true)
            .default_width(250.0)
            .width_range(200.0..=400.0)
            .frame(egui::Frame::none().fill(InkColors::WELL).inner_margin(egui::Margin::same(4.0)))
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(self.sidebar.current_dir.to_string_lossy())
                        .size(11.0)
                        .color(InkColors::TEXT_DIM),
                );
                ui.separator();

                let mut open_request: Option<PathBuf> = None;
                let mut nav_request: Option<PathBuf> = None;

                let entries = self.sidebar.entries.clone();
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .max_height(ui.available_height() - 36.0)
                    .show(ui, |ui| {
                        for (idx, entry) in entries.iter().enumerate() {
                            let selected = self.sidebar.selected == Some(idx);
                            let resp = ui.add(FileListItem::new(&entry.name, entry.is_dir).selected(selected));
                            if resp.clicked() {
                                self.sidebar.selected = Some(idx);
                            }
                            if resp.double_clicked() {
                                if entry.is_dir {
                                    nav_request = Some(entry.path.clone());
                                } else {
                                    open_request = Some(entry.path.clone());
                                }
                            }
                        }
                    });

                if let Some(dir) = nav_request {
                    self.sidebar.navigate_to(dir);
                }
                if let Some(path) = open_request {
                    self.open_file(path);
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.add(ToolButton::new("New")).clicked() {
                        self.show_new_folder = true;
                        self.new_folder_name.clear();
                    }
                    if ui.add(ToolButton::new("Refresh")).clicked() {
                        self.sidebar.refresh();
                    }
                    if ui.add(ToolButton::new("Delete")).clicked() {
                        // Deleting is destructive: confirm before touching
                        // the filesystem. The ".." entry is not a target.
                        if let Some(entry) = self.sidebar.selected_entry() {
                            if entry.name != ".." {
                                self.confirm_delete = Some(entry.path.clone());
                            }
                        }
                    }
                });
            });
    }

    fn render_new_folder_dialog(&mut self, ctx: &Context) {
        egui::Window::new("Create Folder")
            .collapsible(false)
            .resizable(false)
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Folder name:");
                    ui.text_edit_singleline(&mut self.new_folder_name);
                });
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        self.show_new_folder = false;
                        self.new_folder_name.clear();
                    }
                    if ui.button("Create").clicked() {
                        let name = self.new_folder_name.clone();
                        match self.sidebar.create_folder(&name) {
                            Ok(_) => {
                                self.show_new_folder = false;
                                self.new_folder_name.clear();
                            }
                            Err(e) => {
                                self.show_new_folder = false;
                                self.error_msg = Some(format!("Could not create folder:\n{}", e));
                            }
                        }
                    }
                });
            });
    }

    fn render_delete_confirm(&mut self, ctx: &Context) {
        let Some(path) = self.confirm_delete.clone() else {
            return;
        };
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        egui::Window::new("Confirm Delete")
            .collapsible(false)
            .resizable(false)
            .default_width(280.0)
            .show(ctx, |ui| {
                ui.label(format!("Are you sure you want to delete:\n{}?", name));
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.button("No").clicked() {
                        self.confirm_delete = None;
                    }
                    if ui.button("Yes").clicked() {
                        self.confirm_delete = None;
                        if let Err(e) = self.sidebar.delete(&path) {
                            self.error_msg = Some(format!("Could not delete:\n{}", e));
                        }
                    }
                });
            });
    }

    fn render_file_dialog(&mut self, ctx: &Context) {
        let title = match self.file_dialog_mode {
            FileDialogMode::Open => "Open File",
            FileDialogMode::Save => "Save As",
        };
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .default_width(380.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Location:");
                    ui.label(self.dialog_browser.current_dir.to_string_lossy().to_string());
                });
                ui.separator();

                let mut open_request: Option<PathBuf> = None;
                let mut nav_request: Option<PathBuf> = None;

                let entries = self.dialog_browser.entries.clone();
                egui::ScrollArea::vertical().max_height(220.0).show(ui, |ui| {
                    for (idx, entry) in entries.iter().enumerate() {
                        let selected = self.dialog_browser.selected == Some(idx);
                        let resp = ui.add(FileListItem::new(&entry.name, entry.is_dir).selected(selected));
                        if resp.clicked() {
                            self.dialog_browser.selected = Some(idx);
                        }
                        if resp.double_clicked() {
                            if entry.is_dir {
                                nav_request = Some(entry.path.clone());
                            } else if self.file_dialog_mode == FileDialogMode::Open {
                                open_request = Some(entry.path.clone());
                            }
                        }
                    }
                });

                if let Some(dir) = nav_request {
                    self.dialog_browser.navigate_to(dir);
                }
                if let Some(path) = open_request {
                    self.show_file_dialog = false;
                    self.open_file(path);
                }

                if self.file_dialog_mode == FileDialogMode::Save {
                    ui.separator();
                    ui.horizontal(|ui| {
                        ui.label("Filename:");
                        ui.text_edit_singleline(&mut self.save_filename);
                    });
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        self.show_file_dialog = false;
                        self.pending = None;
                    }
                    let action_text = match self.file_dialog_mode {
                        FileDialogMode::Open => "Open",
                        FileDialogMode::Save => "Save",
                    };
                    if ui.button(action_text).clicked() {
                        match self.file_dialog_mode {
                            FileDialogMode::Open => {
                                if let Some(entry) = self.dialog_browser.selected_entry() {
                                    if !entry.is_dir {
                                        let p = entry.path.clone();
                                        self.show_file_dialog = false;
                                        self.open_file(p);
                                    }
                                }
                            }
                            FileDialogMode::Save => {
                                if !self.save_filename.trim().is_empty() {
                                    let path =
                                        self.dialog_browser.current_dir.join(self.save_filename.trim());
                                    self.show_file_dialog = false;
                                    self.save_document_as(ctx, path);
                                }
                            }
                        }
                    }
                });
            });
    }

    fn render_find_replace(&mut self, ctx: &Context) {
        let mut find_clicked = false;
        let mut replace_clicked = false;
        let mut replace_all_clicked = false;

        egui::Window::new("Find / Replace")
            .collapsible(false)
            .resizable(false)
            .default_width(300.0)
            .show(ctx, |ui| {
                egui::Grid::new("find_replace_fields").num_columns(2).show(ui, |ui| {
                    ui.label("Find:");
                    ui.text_edit_singleline(&mut self.find.query);
                    ui.end_row();
                    ui.label("Replace:");
                    ui.text_edit_singleline(&mut self.find.replacement);
                    ui.end_row();
                });
                ui.horizontal(|ui| {
                    find_clicked = ui.button("Find Next").clicked();
                    replace_clicked = ui.button("Replace").clicked();
                    replace_all_clicked = ui.button("Replace All").clicked();
                });
                if let Some(notice) = &self.find_notice {
                    ui.label(
                        egui::RichText::new(notice)
                            .size(11.0)
                            .color(InkColors::TEXT_DIM),
                    );
                }
                ui.horizontal(|ui| {
                    if ui.button("Close").clicked() {
                        self.show_find = false;
                        self.find_notice = None;
                    }
                });
            });

        if find_clicked {
            self.find_next(ctx);
        }
        if replace_clicked {
            self.replace_current(ctx);
        }
        if replace_all_clicked {
            self.replace_all();
        }
    }

    fn render_save_prompt(&mut self, ctx: &Context) {
        let verb = match self.pending {
            Some(PendingAction::NewDocument) => "creating a new file",
            _ => "closing",
        };
        let mut answer: Option<PromptAnswer> = None;
        egui::Window::new("Save Changes?")
            .collapsible(false)
            .resizable(false)
            .default_width(300.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("You have unsaved changes.");
                ui.label(format!("Do you want to save before {}?", verb));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        answer = Some(PromptAnswer::Save);
                    }
                    if ui.button("Don't Save").clicked() {
                        answer = Some(PromptAnswer::Discard);
                    }
                    if ui.button("Cancel").clicked() {
                        answer = Some(PromptAnswer::Cancel);
                    }
                });
            });
        if let Some(answer) = answer {
            self.resolve_prompt(ctx, answer);
        }
    }

    fn render_about(&mut self, ctx: &Context) {
        egui::Window::new("About inkpad")
            .collapsible(false)
            .resizable(false)
            .default_width(280.0)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("inkpad");
                    ui.label(format!("version {}", env!("CARGO_PKG_VERSION")));
                    ui.add_space(6.0);
                    ui.label("plain-text editor panel");
                    ui.label("with a sidebar file browser");
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.show_about = false;
                    }
                });
            });
    }

    fn render_error(&mut self, ctx: &Context) {
        let Some(msg) = self.error_msg.clone() else {
            return;
        };
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .default_width(300.0)
            .show(ctx, |ui| {
                ui.label(msg);
                ui.add_space(6.0);
                if ui.button("OK").clicked() {
                    self.error_msg = None;
                }
            });
    }
}

impl eframe::App for InkpadApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        // A second launch asked us to come to the front.
        if SessionLock::check_raise_signal(crate::APP_ID) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Minimized(false));
            ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
        }

        self.handle_keyboard(ctx);

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| self.render_menu_bar(ui));

        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            InkTheme::title_bar_frame().show(ui, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.label(self.state.display_title());
                });
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let status = format!(
                "Words: {} | Characters: {}",
                document::word_count(&self.text),
                document::char_count(&self.text)
            );
            status_bar(ui, &status);
        });

        if self.show_sidebar {
            self.render_sidebar(ctx);
        }

        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(InkColors::WELL)
                    .inner_margin(egui::Margin::same(6.0)),
            )
            .show(ctx, |ui| self.render_editor(ui));

        if self.show_file_dialog {
            self.render_file_dialog(ctx);
        }
        if self.show_find {
            self.render_find_replace(ctx);
        }
        if self.show_new_folder {
            self.render_new_folder_dialog(ctx);
        }
        if self.confirm_delete.is_some() {
            self.render_delete_confirm(ctx);
        }
        if self.pending.is_some() {
            self.render_save_prompt(ctx);
        }
        if self.show_about {
            self.render_about(ctx);
        }
        self.render_error(ctx);

        // Window close goes through the same decision point as New: a clean
        // document closes straight away, a dirty one cancels the close and
        // parks it behind the save prompt.
        if ctx.input(|i| i.viewport().close_requested()) && !self.close_confirmed {
            if self.gate_destructive(PendingAction::CloseWindow) != Decision::Proceed {
                ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_app(tag: &str) -> (InkpadApp, PathBuf) {
        let dir = std::env::temp_dir().join(format!("inkpad_shell_{}_{}", tag, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let session =
            SessionLock::acquire_in(dir.clone(), &format!("shell_{}", tag)).expect("fresh lock");
        let mut app = InkpadApp::with_session(session);
        app.recent = RecentFiles::default();
        app.recent_path = dir.join("recent.json");
        (app, dir)
    }

    #[test]
    fn test_new_request_on_clean_document_skips_prompt() {
        let (mut app, _dir) = scratch_app("clean_new");
        app.text = "typed then saved".to_string();
        app.request_new_document();
        assert!(app.text.is_empty());
        assert_eq!(app.pending, None);
    }

    #[test]
    fn test_new_request_on_dirty_document_parks_behind_prompt() {
        let (mut app, _dir) = scratch_app("dirty_new");
        app.text = "unsaved".to_string();
        app.state.mark_dirty();
        app.request_new_document();
        assert_eq!(app.text, "unsaved");
        assert_eq!(app.pending, Some(PendingAction::NewDocument));
    }

    #[test]
    fn test_save_answer_on_bound_document_saves_then_closes() {
        let (mut app, dir) = scratch_app("bound_close");
        let path = dir.join("note.txt");
        std::fs::write(&path, "old").unwrap();
        app.text = "new".to_string();
        app.state.mark_clean(Some(path.clone()));
        app.state.mark_dirty();
        app.pending = Some(PendingAction::CloseWindow);

        let ctx = egui::Context::default();
        app.resolve_prompt(&ctx, PromptAnswer::Save);

        assert!(!app.state.is_dirty());
        assert!(app.close_confirmed);
        assert_eq!(app.pending, None);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_save_answer_on_untitled_document_resumes_close_after_save_as() {
        let (mut app, dir) = scratch_app("untitled_close");
        app.text = "draft".to_string();
        app.state.mark_dirty();
        app.pending = Some(PendingAction::CloseWindow);

        let ctx = egui::Context::default();
        app.resolve_prompt(&ctx, PromptAnswer::Save);

        // No bound path: the Save As dialog opens and the close stays parked.
        assert!(app.show_file_dialog);
        assert_eq!(app.file_dialog_mode, FileDialogMode::Save);
        assert_eq!(app.pending, Some(PendingAction::CloseWindow));
        assert!(!app.close_confirmed);

        // Completing the dialog finishes the save and the parked close.
        let target = dir.join("draft.txt");
        app.save_document_as(&ctx, target.clone());
        assert!(!app.state.is_dirty());
        assert!(app.close_confirmed);
        assert_eq!(app.pending, None);
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "draft");
    }

    #[test]
    fn test_failed_save_as_drops_parked_action() {
        let (mut app, dir) = scratch_app("failed_save");
        app.text = "draft".to_string();
        app.state.mark_dirty();
        app.pending = Some(PendingAction::CloseWindow);

        // Target parent is a regular file, so the write fails.
        let blocker = dir.join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let ctx = egui::Context::default();
        app.save_document_as(&ctx, blocker.join("draft.txt"));

        assert!(app.state.is_dirty());
        assert!(!app.close_confirmed);
        assert_eq!(app.pending, None);
        assert!(app.error_msg.is_some());
    }

    #[test]
    fn test_discard_answer_closes_without_saving() {
        let (mut app, _dir) = scratch_app("discard_close");
        app.text = "unsaved".to_string();
        app.state.mark_dirty();
        app.pending = Some(PendingAction::CloseWindow);

        let ctx = egui::Context::default();
        app.resolve_prompt(&ctx, PromptAnswer::Discard);
        assert!(app.close_confirmed);
        assert_eq!(app.pending, None);
    }
}
