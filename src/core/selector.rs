use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, info, warn};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::{
    io,
    path::{Path, PathBuf},
    time::Duration,
};

const SEPARATOR_RULE: &str = "──────────────";
const DEFAULT_ICON: &str = "📄";

const EXTENSION_ICONS: &[(&str, &str)] = &[
    ("rs", "🦀"),
    ("js", "📜"),
    ("mjs", "📜"),
    ("cjs", "📜"),
    ("jsx", "📜"),
    ("ts", "📘"),
    ("tsx", "📘"),
    ("py", "🐍"),
    ("go", "🐹"),
    ("java", "☕"),
    ("md", "📝"),
    ("json", "🧾"),
    ("toml", "⚙️"),
    ("yml", "⚙️"),
    ("yaml", "⚙️"),
    ("html", "🌐"),
    ("css", "🎨"),
    ("sh", "🐚"),
];

/// One row of the selection list. The two sentinels are distinct variants
/// rather than specially-named entries, so a real file can never collide
/// with them.
#[derive(Debug, Clone)]
pub enum SelectionChoice {
    Entry {
        path: PathBuf,
        label: String,
        checked: bool,
    },
    SelectAll {
        checked: bool,
    },
    DeselectAll {
        checked: bool,
    },
    Separator,
}

impl SelectionChoice {
    fn is_selectable(&self) -> bool {
        !matches!(self, SelectionChoice::Separator)
    }

    fn is_checked(&self) -> bool {
        match self {
            SelectionChoice::Entry { checked, .. } => *checked,
            SelectionChoice::SelectAll { checked } => *checked,
            SelectionChoice::DeselectAll { checked } => *checked,
            SelectionChoice::Separator => false,
        }
    }

    fn toggle(&mut self) {
        match self {
            SelectionChoice::Entry { checked, .. } => *checked = !*checked,
            SelectionChoice::SelectAll { checked } => *checked = !*checked,
            SelectionChoice::DeselectAll { checked } => *checked = !*checked,
            SelectionChoice::Separator => {}
        }
    }

    fn display_label(&self) -> &str {
        match self {
            SelectionChoice::Entry { label, .. } => label,
            SelectionChoice::SelectAll { .. } => "Select All",
            SelectionChoice::DeselectAll { .. } => "Deselect All",
            SelectionChoice::Separator => SEPARATOR_RULE,
        }
    }
}

fn icon_for(path: &Path) -> &'static str {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .and_then(|ext| {
            EXTENSION_ICONS
                .iter()
                .find(|(known, _)| *known == ext)
                .map(|(_, icon)| *icon)
        })
        .unwrap_or(DEFAULT_ICON)
}

/// Label = two-space indent per directory level of the root-relative path,
/// an extension icon, then the relative path.
fn entry_label(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let depth = rel.components().count().saturating_sub(1);
    format!("{}{} {}", "  ".repeat(depth), icon_for(rel), rel.display())
}

/// Lays out the choice list: Select All prepended, Deselect All appended,
/// each flanked by separators, candidates in traversal order in between.
pub fn build_choices(root: &Path, candidates: Vec<PathBuf>) -> Vec<SelectionChoice> {
    let mut choices = Vec::with_capacity(candidates.len() + 6);
    choices.push(SelectionChoice::Separator);
    choices.push(SelectionChoice::SelectAll { checked: false });
    choices.push(SelectionChoice::Separator);

    for path in candidates {
        let label = entry_label(root, &path);
        choices.push(SelectionChoice::Entry {
            path,
            label,
            checked: false,
        });
    }

    choices.push(SelectionChoice::Separator);
    choices.push(SelectionChoice::DeselectAll { checked: false });
    choices.push(SelectionChoice::Separator);
    choices
}

/// Resolves the checked set. A checked Select All dominates everything and
/// yields the full candidate list; otherwise a checked Deselect All yields
/// the empty list; otherwise the result is exactly the checked entries in
/// list order.
pub fn resolve_selection(choices: &[SelectionChoice]) -> Vec<PathBuf> {
    let select_all = choices
        .iter()
        .any(|c| matches!(c, SelectionChoice::SelectAll { checked: true }));
    let deselect_all = choices
        .iter()
        .any(|c| matches!(c, SelectionChoice::DeselectAll { checked: true }));

    if select_all {
        choices
            .iter()
            .filter_map(|c| match c {
                SelectionChoice::Entry { path, .. } => Some(path.clone()),
                _ => None,
            })
            .collect()
    } else if deselect_all {
        Vec::new()
    } else {
        choices
            .iter()
            .filter_map(|c| match c {
                SelectionChoice::Entry {
                    path,
                    checked: true,
                    ..
                } => Some(path.clone()),
                _ => None,
            })
            .collect()
    }
}

struct App {
    choices: Vec<SelectionChoice>,
    state: ListState,
    help_message: String,
}

impl App {
    fn new(choices: Vec<SelectionChoice>) -> App {
        let mut state = ListState::default();
        let first = choices.iter().position(SelectionChoice::is_selectable);
        state.select(first);

        App {
            choices,
            state,
            help_message: String::from(
                "↑/↓: Navigate | Space: Toggle | a: Select all | n: Deselect all | Enter: Confirm | q/Esc: Quit without copying",
            ),
        }
    }

    fn next(&mut self) {
        self.step(1);
    }

    fn previous(&mut self) {
        self.step(-1);
    }

    // Moves the cursor, skipping separators, wrapping at both ends.
    fn step(&mut self, direction: isize) {
        let len = self.choices.len() as isize;
        if len == 0 {
            return;
        }

        let mut i = self.state.selected().unwrap_or(0) as isize;
        for _ in 0..len {
            i = (i + direction).rem_euclid(len);
            if self.choices[i as usize].is_selectable() {
                self.state.select(Some(i as usize));
                return;
            }
        }
    }

    fn toggle_current(&mut self) {
        if let Some(i) = self.state.selected() {
            self.choices[i].toggle();
        }
    }

    fn toggle_select_all(&mut self) {
        for choice in &mut self.choices {
            if matches!(choice, SelectionChoice::SelectAll { .. }) {
                choice.toggle();
            }
        }
    }

    fn toggle_deselect_all(&mut self) {
        for choice in &mut self.choices {
            if matches!(choice, SelectionChoice::DeselectAll { .. }) {
                choice.toggle();
            }
        }
    }

    fn entry_count(&self) -> usize {
        self.choices
            .iter()
            .filter(|c| matches!(c, SelectionChoice::Entry { .. }))
            .count()
    }

    fn effective_count(&self) -> usize {
        resolve_selection(&self.choices).len()
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.area());

    let title = Paragraph::new(Span::styled(
        "Select files to copy content:",
        Style::default().add_modifier(Modifier::BOLD),
    ));
    f.render_widget(title, chunks[0]);

    let cursor_style = Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let items: Vec<ListItem> = app
        .choices
        .iter()
        .enumerate()
        .map(|(i, choice)| {
            let content = if choice.is_selectable() {
                let mark = if choice.is_checked() { "[✓] " } else { "[ ] " };
                format!("{}{}", mark, choice.display_label())
            } else {
                choice.display_label().to_string()
            };

            let style = if app.state.selected() == Some(i) {
                cursor_style
            } else {
                match choice {
                    SelectionChoice::Separator => Style::default().fg(Color::DarkGray),
                    SelectionChoice::SelectAll { .. } | SelectionChoice::DeselectAll { .. } => {
                        Style::default().fg(Color::Cyan)
                    }
                    SelectionChoice::Entry { checked: true, .. } => {
                        Style::default().fg(Color::Green)
                    }
                    SelectionChoice::Entry { .. } => Style::default(),
                }
            };

            ListItem::new(Span::styled(content, style))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!(
            "Files ({} of {} will be copied)",
            app.effective_count(),
            app.entry_count()
        )))
        .highlight_style(cursor_style);

    f.render_stateful_widget(list, chunks[1], &mut app.state);

    let controls = Paragraph::new(Span::styled(
        app.help_message.clone(),
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(controls, chunks[2]);
}

/// Blocking interactive selection. Returns the resolved subset; empty means
/// the user confirmed nothing (or quit), which the caller reports as a
/// warning. Ctrl-C aborts with an error and nothing is copied.
pub fn select_files(root: &Path, candidates: Vec<PathBuf>) -> anyhow::Result<Vec<PathBuf>> {
    if candidates.is_empty() {
        info!("No candidate files to select from");
        return Ok(Vec::new());
    }

    debug!("Selecting from {} candidate files", candidates.len());
    let choices = build_choices(root, candidates);
    run_tui(choices)
}

fn run_tui(choices: Vec<SelectionChoice>) -> anyhow::Result<Vec<PathBuf>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(choices);
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match result {
        Ok(true) => {
            let selected = resolve_selection(&app.choices);
            info!("Selection confirmed with {} files", selected.len());
            Ok(selected)
        }
        Ok(false) => {
            info!("Selection quit without confirming");
            Ok(Vec::new())
        }
        Err(err) => {
            warn!("Selection aborted: {}", err);
            Err(err)
        }
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<bool> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if crossterm::event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Err(anyhow::anyhow!("Selection cancelled"));
                    }
                    KeyCode::Enter => return Ok(true),
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(false),
                    KeyCode::Char('a') => app.toggle_select_all(),
                    KeyCode::Char('n') => app.toggle_deselect_all(),
                    KeyCode::Char(' ') => app.toggle_current(),
                    KeyCode::Down => app.next(),
                    KeyCode::Up => app.previous(),
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_choices() -> Vec<SelectionChoice> {
        build_choices(
            Path::new("/proj"),
            vec![
                PathBuf::from("/proj/a.js"),
                PathBuf::from("/proj/sub/b.txt"),
            ],
        )
    }

    fn check_sentinel(choices: &mut [SelectionChoice], select_all: bool) {
        for choice in choices.iter_mut() {
            match choice {
                SelectionChoice::SelectAll { checked } if select_all => *checked = true,
                SelectionChoice::DeselectAll { checked } if !select_all => *checked = true,
                _ => {}
            }
        }
    }

    fn check_entry(choices: &mut [SelectionChoice], name: &str) {
        for choice in choices.iter_mut() {
            if let SelectionChoice::Entry { path, checked, .. } = choice {
                if path.ends_with(name) {
                    *checked = true;
                }
            }
        }
    }

    #[test]
    fn test_choice_layout_flanks_sentinels_with_separators() {
        let choices = sample_choices();

        assert_eq!(choices.len(), 8);
        assert!(matches!(choices[0], SelectionChoice::Separator));
        assert!(matches!(choices[1], SelectionChoice::SelectAll { .. }));
        assert!(matches!(choices[2], SelectionChoice::Separator));
        assert!(matches!(choices[3], SelectionChoice::Entry { .. }));
        assert!(matches!(choices[4], SelectionChoice::Entry { .. }));
        assert!(matches!(choices[5], SelectionChoice::Separator));
        assert!(matches!(choices[6], SelectionChoice::DeselectAll { .. }));
        assert!(matches!(choices[7], SelectionChoice::Separator));
    }

    #[test]
    fn test_select_all_dominates_everything() {
        let mut choices = sample_choices();
        check_entry(&mut choices, "a.js");
        check_sentinel(&mut choices, true);

        let selected = resolve_selection(&choices);

        assert_eq!(
            selected,
            vec![PathBuf::from("/proj/a.js"), PathBuf::from("/proj/sub/b.txt")]
        );
    }

    #[test]
    fn test_deselect_all_empties_the_result() {
        let mut choices = sample_choices();
        check_entry(&mut choices, "a.js");
        check_entry(&mut choices, "b.txt");
        check_sentinel(&mut choices, false);

        assert!(resolve_selection(&choices).is_empty());
    }

    #[test]
    fn test_select_all_wins_over_deselect_all() {
        let mut choices = sample_choices();
        check_sentinel(&mut choices, true);
        check_sentinel(&mut choices, false);

        assert_eq!(resolve_selection(&choices).len(), 2);
    }

    #[test]
    fn test_plain_checks_resolve_in_list_order() {
        let mut choices = sample_choices();
        check_entry(&mut choices, "b.txt");
        check_entry(&mut choices, "a.js");

        let selected = resolve_selection(&choices);

        assert_eq!(
            selected,
            vec![PathBuf::from("/proj/a.js"), PathBuf::from("/proj/sub/b.txt")]
        );
    }

    #[test]
    fn test_nothing_checked_resolves_empty() {
        let choices = sample_choices();

        assert!(resolve_selection(&choices).is_empty());
    }

    #[test]
    fn test_entry_label_indents_by_depth() {
        let root = Path::new("/proj");

        let top = entry_label(root, Path::new("/proj/a.rs"));
        let nested = entry_label(root, Path::new("/proj/src/deep/b.rs"));

        assert_eq!(top, "🦀 a.rs");
        assert!(nested.starts_with("    🦀 "));
        assert!(nested.ends_with(&format!("src{0}deep{0}b.rs", std::path::MAIN_SEPARATOR)));
    }

    #[test]
    fn test_icon_mapping_is_case_insensitive_with_fallback() {
        assert_eq!(icon_for(Path::new("a.RS")), "🦀");
        assert_eq!(icon_for(Path::new("a.Py")), "🐍");
        assert_eq!(icon_for(Path::new("a.unknownext")), DEFAULT_ICON);
        assert_eq!(icon_for(Path::new("Makefile")), DEFAULT_ICON);
    }

    #[test]
    fn test_navigation_skips_separators_and_wraps() {
        let mut app = App::new(sample_choices());

        // Initial cursor sits on Select All (index 1), past the leading
        // separator.
        assert_eq!(app.state.selected(), Some(1));

        app.next();
        assert_eq!(app.state.selected(), Some(3)); // first entry
        app.next();
        assert_eq!(app.state.selected(), Some(4)); // second entry
        app.next();
        assert_eq!(app.state.selected(), Some(6)); // Deselect All
        app.next();
        assert_eq!(app.state.selected(), Some(1)); // wrapped

        app.previous();
        assert_eq!(app.state.selected(), Some(6));
    }

    #[test]
    fn test_toggle_current_only_affects_selectable_rows() {
        let mut app = App::new(sample_choices());
        app.state.select(Some(0)); // separator
        app.toggle_current();

        assert!(app.choices.iter().all(|c| !c.is_checked()));

        app.state.select(Some(3));
        app.toggle_current();

        assert!(app.choices[3].is_checked());
        assert_eq!(app.effective_count(), 1);
    }
}
