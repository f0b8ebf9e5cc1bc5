use std::mem;

use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Clear, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, Table,
    TableState, Wrap,
};
use ratatui::Frame;
use tracing::{info, warn};

use crate::models::{Field, StudentRow, Subject};
use crate::query::{GradeSummary, Gradebook};
use crate::store::RecordStore;

use super::forms::{label_prefix, SearchState, StudentForm};
use super::helpers::{centered_rect, cursor_in, offset_index, student_count};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Rows moved by PageUp/PageDown.
const PAGE_STEP: isize = 10;

/// What the table currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
enum View {
    All,
    Search(String),
}

/// Fine-grained interaction modes layered over the table.
enum Mode {
    Normal,
    Adding(StudentForm),
    Searching(SearchState),
    ShowingStatistics(GradeSummary),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Application state. The table is a disposable projection of the store:
/// "show all" and "search" rebuild it wholesale, "add" appends to it.
pub struct App<S> {
    gradebook: Gradebook<S>,
    rows: Vec<StudentRow>,
    selected: usize,
    view: View,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl<S: RecordStore> App<S> {
    /// Empty state; nothing is read until [`App::show_all`] runs.
    pub fn new(gradebook: Gradebook<S>) -> Self {
        Self {
            gradebook,
            rows: Vec::new(),
            selected: 0,
            view: View::All,
            mode: Mode::Normal,
            status: None,
        }
    }

    /// Build the app and render every stored row, as on startup. A load failure
    /// is reported in the footer instead of aborting.
    pub fn load(gradebook: Gradebook<S>) -> Self {
        let mut app = Self::new(gradebook);
        app.show_all();
        app
    }

    /// Rows currently shown in the table.
    pub fn rows(&self) -> &[StudentRow] {
        &self.rows
    }

    /// Footer message, if any.
    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    /// Dispatch one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::Adding(form) => self.handle_add_student(code, form),
            Mode::Searching(state) => self.handle_search(code, state),
            Mode::ShowingStatistics(_) => Mode::Normal,
        };

        exit
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-PAGE_STEP),
            KeyCode::PageDown => self.move_selection(PAGE_STEP),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.rows.len().saturating_sub(1),
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.clear_status();
                return Mode::Adding(StudentForm::default());
            }
            KeyCode::Char('f') | KeyCode::Char('/') => {
                self.clear_status();
                return Mode::Searching(SearchState::default());
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.show_all(),
            KeyCode::Char('s') | KeyCode::Char('S') => return self.open_statistics(),
            _ => {}
        }
        Mode::Normal
    }

    fn handle_add_student(&mut self, code: KeyCode, mut form: StudentForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Add student closed.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => self.submit_student(&mut form),
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::Adding(form)
    }

    /// Validate and persist the form. On success the new row is appended to the
    /// current table without a reload and the form is emptied; on failure the
    /// input is kept for correction.
    fn submit_student(&mut self, form: &mut StudentForm) {
        match self.gradebook.add(&form.input) {
            Ok(record) => {
                self.rows.push(record.to_row());
                self.selected = self.rows.len() - 1;
                self.set_status(
                    format!("Added {} ({}).", record.name, record.id),
                    StatusKind::Info,
                );
                form.clear();
            }
            Err(err) => {
                if !err.is_validation() {
                    warn!(error = %err, "failed to save student");
                }
                let message = err.to_string();
                form.error = Some(message.clone());
                self.set_status(message, StatusKind::Error);
            }
        }
    }

    fn handle_search(&mut self, code: KeyCode, mut state: SearchState) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Search cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Enter => {
                self.run_search(state.query.trim());
                return Mode::Normal;
            }
            KeyCode::Backspace => {
                state.query.pop();
            }
            KeyCode::Char(ch) if !ch.is_control() => state.query.push(ch),
            _ => {}
        }
        Mode::Searching(state)
    }

    /// Clear the table and render every stored row.
    pub fn show_all(&mut self) {
        self.view = View::All;
        match self.gradebook.load_all() {
            Ok(rows) => {
                self.replace_rows(rows);
                self.clear_status();
            }
            Err(err) => {
                self.replace_rows(Vec::new());
                warn!(error = %err, "failed to load students");
                self.set_status(format!("Storage error: {err}"), StatusKind::Error);
            }
        }
    }

    /// Clear the table and render only the rows matching `keyword` in a fresh
    /// load of the store.
    pub fn run_search(&mut self, keyword: &str) {
        self.view = View::Search(keyword.to_string());
        match self.gradebook.search(keyword) {
            Ok(rows) => {
                let message = if rows.is_empty() {
                    format!("No students match \"{keyword}\".")
                } else {
                    format!("Found {} matching \"{keyword}\".", student_count(rows.len()))
                };
                self.replace_rows(rows);
                self.set_status(message, StatusKind::Info);
            }
            Err(err) => {
                self.replace_rows(Vec::new());
                warn!(error = %err, "search failed");
                self.set_status(format!("Storage error: {err}"), StatusKind::Error);
            }
        }
    }

    /// Statistics always cover the whole store, whatever the table shows.
    fn open_statistics(&mut self) -> Mode {
        match self.gradebook.statistics() {
            Ok(Some(summary)) => {
                info!(records = summary.records, "computed statistics");
                self.clear_status();
                Mode::ShowingStatistics(summary)
            }
            Ok(None) => {
                self.set_status("No data available.", StatusKind::Info);
                Mode::Normal
            }
            Err(err) => {
                warn!(error = %err, "statistics failed");
                self.set_status(format!("Storage error: {err}"), StatusKind::Error);
                Mode::Normal
            }
        }
    }

    fn replace_rows(&mut self, rows: Vec<StudentRow>) {
        self.rows = rows;
        self.selected = 0;
    }

    fn move_selection(&mut self, offset: isize) {
        self.selected = offset_index(self.selected, offset, self.rows.len());
    }

    fn set_status<T: Into<String>>(&mut self, text: T, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();

        // Too short for both: the table wins.
        if area.height > FOOTER_HEIGHT {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(FOOTER_HEIGHT)])
                .split(area);
            self.draw_table(frame, chunks[0]);
            self.draw_footer(frame, chunks[1]);
        } else {
            self.draw_table(frame, area);
        }

        match &self.mode {
            Mode::Adding(form) => self.draw_student_form(frame, area, form),
            Mode::Searching(state) => self.draw_search_bar(frame, area, state),
            Mode::ShowingStatistics(summary) => self.draw_statistics(frame, area, summary),
            Mode::Normal => {}
        }
    }

    fn table_title(&self) -> String {
        match &self.view {
            View::All => format!("Students ({})", student_count(self.rows.len())),
            View::Search(keyword) => format!(
                "Search \"{keyword}\" ({}) - press r to show all",
                student_count(self.rows.len())
            ),
        }
    }

    fn draw_table(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.table_title());

        if self.rows.is_empty() {
            let message = match &self.view {
                View::All => "No students yet. Press 'a' to add one.".to_string(),
                View::Search(keyword) => format!("No students match \"{keyword}\"."),
            };
            let paragraph = Paragraph::new(message)
                .alignment(Alignment::Center)
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
            return;
        }

        let header_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let header = Row::new(
            [Field::Id, Field::Name]
                .into_iter()
                .map(Field::label)
                .chain(Subject::ALL.into_iter().map(Subject::short_label)),
        )
        .style(header_style);

        let rows = self.rows.iter().map(|row| Row::new(row.fields()));
        let widths = [
            Constraint::Percentage(15),
            Constraint::Percentage(40),
            Constraint::Percentage(15),
            Constraint::Percentage(15),
            Constraint::Percentage(15),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .highlight_symbol("▶ ");

        let mut table_state = TableState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(table, area, &mut table_state);

        let mut scrollbar_state = ScrollbarState::new(self.rows.len()).position(self.selected);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let keys: &[(&str, &str)] = match &self.mode {
            Mode::Normal => &[
                ("[a]", " Add   "),
                ("[f]", " Search   "),
                ("[r]", " Show All   "),
                ("[s]", " Statistics   "),
                ("[↑↓]", " Navigate   "),
                ("[q]", " Quit"),
            ],
            Mode::Adding(_) => &[
                ("[Tab]", " Next Field   "),
                ("[Enter]", " Save   "),
                ("[Esc]", " Close"),
            ],
            Mode::Searching(_) => &[("[Enter]", " Search   "), ("[Esc]", " Cancel")],
            Mode::ShowingStatistics(_) => &[("[Any key]", " Close")],
        };

        let spans: Vec<Span<'static>> = keys
            .iter()
            .flat_map(|(key, action)| {
                [
                    Span::styled(key.to_string(), key_style),
                    Span::raw(action.to_string()),
                ]
            })
            .collect();
        Line::from(spans)
    }

    fn draw_student_form(&self, frame: &mut Frame, area: Rect, form: &StudentForm) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Student").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = Field::ALL
            .into_iter()
            .map(|field| form.build_line(field))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch • Esc to close",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, inner);

        let column = label_prefix(form.active).chars().count() + form.value_len(form.active);
        frame.set_cursor_position(cursor_in(inner, column, form.active_row()));
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect, state: &SearchState) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Search (ID/Name)");
        let paragraph = Paragraph::new(Span::raw(format!("Search: {}", state.query)))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let column = "Search: ".len() + state.query.chars().count();
        frame.set_cursor_position(cursor_in(inner, column, 0));
    }

    fn draw_statistics(&self, frame: &mut Frame, area: Rect, summary: &GradeSummary) {
        let popup_area = centered_rect(70, 40, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Statistics").borders(Borders::ALL);
        let mut lines: Vec<Line> = summary
            .iter()
            .map(|(subject, stats)| Line::from(format!("{subject:<11} → {stats}")))
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Across all {}.", student_count(summary.records)),
            Style::default().fg(Color::Gray),
        )));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tempfile::{tempdir, TempDir};

    use super::*;
    use crate::error::StoreError;
    use crate::store::{CsvFileStore, MockRecordStore};

    fn app_with(contents: Option<&str>) -> (TempDir, App<CsvFileStore>) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("students.csv");
        if let Some(contents) = contents {
            fs::write(&path, contents).unwrap();
        }
        let app = App::load(Gradebook::new(CsvFileStore::new(path)));
        (dir, app)
    }

    fn type_text<S: RecordStore>(app: &mut App<S>, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch));
        }
    }

    fn fill_form<S: RecordStore>(app: &mut App<S>, values: [&str; 5]) {
        for value in values {
            type_text(app, value);
            app.handle_key(KeyCode::Tab);
        }
    }

    fn render<S: RecordStore>(app: &App<S>) -> String {
        render_sized(app, 100, 30)
    }

    fn render_sized<S: RecordStore>(app: &App<S>, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn failing_load() -> StoreError {
        StoreError::Io {
            path: PathBuf::from("students.csv"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        }
    }

    const TWO_STUDENTS: &str = "101,Alice,80,90,70\n102,Bob,60,85,95\n";

    #[test]
    fn startup_renders_every_row() {
        let (_dir, app) = app_with(Some(TWO_STUDENTS));
        assert_eq!(app.rows().len(), 2);

        let screen = render(&app);
        assert!(screen.contains("Students (2 students)"));
        assert!(screen.contains("Alice"));
        assert!(screen.contains("Bob"));
        assert!(screen.contains("English"));
    }

    #[test]
    fn startup_without_file_shows_empty_hint() {
        let (_dir, app) = app_with(None);
        assert!(app.rows().is_empty());
        assert!(render(&app).contains("No students yet"));
    }

    #[test]
    fn adding_appends_to_view_and_store_then_clears_form() {
        let (dir, mut app) = app_with(None);
        app.handle_key(KeyCode::Char('a'));
        fill_form(&mut app, ["101", "Alice", "80", "90", "70"]);
        app.handle_key(KeyCode::Enter);

        assert_eq!(app.rows().len(), 1);
        assert_eq!(app.status_text(), Some("Added Alice (101)."));
        match &app.mode {
            Mode::Adding(form) => {
                assert!(form.input.id.is_empty());
                assert!(form.input.science.is_empty());
            }
            _ => panic!("form should stay open"),
        }

        let stored = fs::read_to_string(dir.path().join("students.csv")).unwrap();
        assert_eq!(stored, "101,Alice,80,90,70\n");
    }

    #[test]
    fn invalid_input_is_kept_and_not_saved() {
        let (dir, mut app) = app_with(None);
        app.handle_key(KeyCode::Char('a'));
        fill_form(&mut app, ["101", "Alice", "eighty", "90", "70"]);
        app.handle_key(KeyCode::Enter);

        assert!(app.rows().is_empty());
        assert!(!dir.path().join("students.csv").exists());
        match &app.mode {
            Mode::Adding(form) => {
                assert_eq!(form.input.math, "eighty");
                assert_eq!(
                    form.error.as_deref(),
                    Some("Marks must be numbers (Math is not an integer).")
                );
            }
            _ => panic!("form should stay open"),
        }
        assert!(render(&app).contains("Marks must be numbers"));
    }

    #[test]
    fn missing_field_is_reported() {
        let (_dir, mut app) = app_with(None);
        app.handle_key(KeyCode::Char('a'));
        fill_form(&mut app, ["101", "", "80", "90", "70"]);
        app.handle_key(KeyCode::Enter);

        assert_eq!(
            app.status_text(),
            Some("All fields are required (Name is missing).")
        );
    }

    #[test]
    fn storage_failure_on_add_is_labelled() {
        let mut store = MockRecordStore::new();
        store.expect_load_all().returning(|| Ok(Vec::new()));
        store.expect_append().returning(|_| Err(failing_load()));

        let mut app = App::load(Gradebook::new(store));
        app.handle_key(KeyCode::Char('a'));
        fill_form(&mut app, ["1", "A", "1", "2", "3"]);
        app.handle_key(KeyCode::Enter);

        assert!(app.rows().is_empty());
        assert!(app.status_text().unwrap().starts_with("Storage error:"));
        match &app.mode {
            Mode::Adding(form) => assert_eq!(form.input.id, "1"),
            _ => panic!("form should stay open"),
        }
    }

    #[test]
    fn search_replaces_view_and_show_all_restores_it() {
        let (_dir, mut app) = app_with(Some(TWO_STUDENTS));
        app.handle_key(KeyCode::Char('f'));
        type_text(&mut app, "  ALI ");
        app.handle_key(KeyCode::Enter);

        assert_eq!(app.rows().len(), 1);
        assert_eq!(app.rows()[0].name, "Alice");
        assert!(render(&app).contains("Search \"ALI\""));

        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.rows().len(), 2);
    }

    #[test]
    fn search_without_matches_is_not_an_error() {
        let (_dir, mut app) = app_with(Some(TWO_STUDENTS));
        app.run_search("zzz");
        assert!(app.rows().is_empty());
        assert_eq!(app.status_text(), Some("No students match \"zzz\"."));
    }

    #[test]
    fn cancelled_search_keeps_view() {
        let (_dir, mut app) = app_with(Some(TWO_STUDENTS));
        app.handle_key(KeyCode::Char('/'));
        type_text(&mut app, "bob");
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.rows().len(), 2);
    }

    #[test]
    fn search_sees_rows_written_behind_the_view() {
        let (dir, mut app) = app_with(Some("101,Alice,80,90,70\n"));
        fs::write(dir.path().join("students.csv"), TWO_STUDENTS).unwrap();
        app.run_search("bob");
        assert_eq!(app.rows().len(), 1);
    }

    #[test]
    fn statistics_dialog_covers_whole_store() {
        let (_dir, mut app) = app_with(Some(TWO_STUDENTS));
        app.run_search("ali");
        app.handle_key(KeyCode::Char('s'));

        let screen = render(&app);
        assert!(screen.contains("Mathematics → Avg: 70.00, High: 80, Low: 60"));
        assert!(screen.contains("English     → Avg: 87.50, High: 90, Low: 85"));
        assert!(screen.contains("Science     → Avg: 82.50, High: 95, Low: 70"));
        assert!(screen.contains("Across all 2 students."));

        app.handle_key(KeyCode::Char('x'));
        assert!(matches!(app.mode, Mode::Normal));
    }

    #[test]
    fn statistics_on_empty_store_is_informational() {
        let (_dir, mut app) = app_with(None);
        app.handle_key(KeyCode::Char('s'));
        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(app.status_text(), Some("No data available."));
        assert_eq!(
            app.status.as_ref().map(|status| status.kind),
            Some(StatusKind::Info)
        );
    }

    #[test]
    fn load_failure_at_startup_is_surfaced() {
        let mut store = MockRecordStore::new();
        store.expect_load_all().returning(|| Err(failing_load()));

        let app = App::load(Gradebook::new(store));
        assert!(app.rows().is_empty());
        assert!(app.status_text().unwrap().starts_with("Storage error:"));
        assert!(render(&app).contains("Storage error:"));
    }

    #[test]
    fn navigation_is_clamped() {
        let (_dir, mut app) = app_with(Some(TWO_STUDENTS));
        app.handle_key(KeyCode::Up);
        assert_eq!(app.selected, 0);
        app.handle_key(KeyCode::PageDown);
        assert_eq!(app.selected, 1);
        app.handle_key(KeyCode::Home);
        assert_eq!(app.selected, 0);
        app.handle_key(KeyCode::End);
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn short_terminal_shows_table_without_footer() {
        let (_dir, app) = app_with(Some(TWO_STUDENTS));
        let screen = render_sized(&app, 100, 3);
        assert!(screen.contains("Students (2 students)"));
        assert!(!screen.contains("[q]"));

        assert!(render_sized(&app, 100, 4).contains("[q]"));
    }

    #[test]
    fn overlong_input_keeps_cursor_on_screen() {
        let (_dir, mut app) = app_with(None);
        app.handle_key(KeyCode::Char('a'));
        type_text(&mut app, &"x".repeat(400));
        render_sized(&app, 40, 20);

        app.handle_key(KeyCode::Esc);
        app.handle_key(KeyCode::Char('f'));
        type_text(&mut app, &"y".repeat(400));

        let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        let cursor = terminal.get_cursor_position().unwrap();
        assert!(cursor.x < 40);
        assert!(cursor.y < 20);
    }

    #[test]
    fn quit_keys() {
        let (_dir, mut app) = app_with(None);
        assert!(!app.handle_key(KeyCode::Char('x')));
        assert!(app.handle_key(KeyCode::Char('q')));
    }
}
