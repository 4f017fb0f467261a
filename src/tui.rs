use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io::stdout;

use crate::client::ApiClient;
use crate::filter::{Filters, filter};
use crate::models::{Employee, Role};
use crate::paginate::{Page, Pager};
use crate::selection::Selection;
use crate::sort::{Direction as SortDirection, SortConfig, SortKey, sort};
use crate::stats;

const PAGE_SIZES: [usize; 4] = [5, 10, 20, 50];

enum Mode {
    Normal,
    Search,
}

struct AppState<'a> {
    client: &'a ApiClient,
    all: Vec<Employee>,
    filters: Filters,
    sort: SortConfig,
    pager: Pager,
    selection: Selection,
    cursor: usize,
    mode: Mode,
    status: Option<String>,
}

impl<'a> AppState<'a> {
    fn new(client: &'a ApiClient, all: Vec<Employee>) -> Self {
        Self {
            client,
            all,
            filters: Filters::default(),
            sort: SortConfig::default(),
            pager: Pager::default(),
            selection: Selection::default(),
            cursor: 0,
            mode: Mode::Normal,
            status: None,
        }
    }

    /// Recompute the whole pipeline: filter, sort, slice the current
    /// page. Called on every state change, there is no caching.
    fn view(&mut self) -> Page<Employee> {
        let filtered = filter(&self.all, &self.filters);
        let sorted = sort(&filtered, &self.sort);
        let page = self.pager.page(&sorted);
        if self.cursor >= page.items.len() {
            self.cursor = page.items.len().saturating_sub(1);
        }
        page
    }

    fn filtered_len(&self) -> usize {
        filter(&self.all, &self.filters).len()
    }

    fn refresh(&mut self) {
        match self.client.list() {
            Ok(all) => {
                self.all = all;
                self.status = Some(format!("Loaded {} employees", self.all.len()));
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn cycle_role_filter(&mut self) {
        self.filters.role = match self.filters.role {
            None => Some(Role::Manager),
            Some(Role::Manager) => Some(Role::Developer),
            Some(Role::Developer) => Some(Role::Hr),
            Some(Role::Hr) => Some(Role::Sales),
            Some(Role::Sales) => Some(Role::Intern),
            Some(Role::Intern) => None,
        };
    }

    fn cycle_sort_key(&mut self) {
        let next = match self.sort.key {
            None => Some(SortKey::Id),
            Some(current) => {
                let pos = SortKey::ALL.iter().position(|k| *k == current);
                match pos {
                    Some(i) if i + 1 < SortKey::ALL.len() => Some(SortKey::ALL[i + 1]),
                    _ => None,
                }
            }
        };
        self.sort = SortConfig {
            key: next,
            direction: SortDirection::Ascending,
        };
    }

    fn cycle_page_size(&mut self) {
        let current = self.pager.page_size();
        let pos = PAGE_SIZES.iter().position(|s| *s == current).unwrap_or(1);
        let next = PAGE_SIZES[(pos + 1) % PAGE_SIZES.len()];
        self.pager.set_page_size(next);
    }

    /// Bulk delete: one request per selected id, then clear the
    /// selection and re-fetch whatever actually happened server-side.
    fn delete_selected(&mut self) {
        if self.selection.is_empty() {
            self.status = Some("Nothing selected".to_string());
            return;
        }
        let ids = self.selection.ids();
        match self.client.delete_many(&ids) {
            Ok(n) => self.status = Some(format!("Deleted {} employee(s)", n)),
            Err(e) => self.status = Some(e.to_string()),
        }
        self.selection.clear();
        self.refresh();
    }
}

pub fn run_browse(client: &ApiClient) -> Result<()> {
    let all = client.list()?;

    let mut state = AppState::new(client, all);

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, &mut state);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
) -> Result<()> {
    let mut list_state = ListState::default();
    list_state.select(Some(0));

    loop {
        let page = state.view();
        list_state.select(if page.items.is_empty() {
            None
        } else {
            Some(state.cursor)
        });
        terminal.draw(|frame| draw(frame, state, &page, &mut list_state))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match state.mode {
                Mode::Search => match key.code {
                    KeyCode::Esc | KeyCode::Enter => state.mode = Mode::Normal,
                    KeyCode::Backspace => {
                        state.filters.search.pop();
                    }
                    KeyCode::Char(c) => state.filters.search.push(c),
                    _ => {}
                },
                Mode::Normal => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Down | KeyCode::Char('j') => {
                        if state.cursor + 1 < page.items.len() {
                            state.cursor += 1;
                        }
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        state.cursor = state.cursor.saturating_sub(1);
                    }
                    KeyCode::Right | KeyCode::Char('l') => {
                        let total = state.filtered_len();
                        state.pager.next(total);
                        state.cursor = 0;
                    }
                    KeyCode::Left | KeyCode::Char('h') => {
                        state.pager.previous();
                        state.cursor = 0;
                    }
                    KeyCode::Char('/') => {
                        state.mode = Mode::Search;
                        state.status = None;
                    }
                    KeyCode::Char('c') => {
                        state.filters.reset();
                        state.sort.reset();
                    }
                    KeyCode::Char('o') => state.cycle_role_filter(),
                    KeyCode::Char('s') => state.cycle_sort_key(),
                    KeyCode::Char('d') => {
                        if let Some(key) = state.sort.key {
                            state.sort.toggle(key);
                        }
                    }
                    KeyCode::Char('+') => state.cycle_page_size(),
                    KeyCode::Char(' ') => {
                        if let Some(emp) = page.items.get(state.cursor) {
                            state.selection.toggle(emp.id);
                        }
                    }
                    KeyCode::Char('a') => {
                        let ids: Vec<i64> = page.items.iter().map(|e| e.id).collect();
                        state.selection.toggle_all(&ids);
                    }
                    KeyCode::Char('x') => state.delete_selected(),
                    KeyCode::Char('R') => state.refresh(),
                    _ => {}
                },
            }
        }
    }
    Ok(())
}

fn draw(frame: &mut Frame, state: &AppState, page: &Page<Employee>, list_state: &mut ListState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1), Constraint::Length(1)])
        .split(frame.area());

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(rows[0]);

    // Left panel: the current page of the pipeline output
    let page_ids: Vec<i64> = page.items.iter().map(|e| e.id).collect();
    let items: Vec<ListItem> = page
        .items
        .iter()
        .map(|emp| {
            let mark = if state.selection.is_selected(emp.id) {
                "[x]"
            } else {
                "[ ]"
            };
            let role = emp.role.map(|r| r.as_str()).unwrap_or("-");
            ListItem::new(format!(
                "{} #{:<4} {:<16} {:<24} {:>3}  {:<9} {:>10.0}",
                mark, emp.id, emp.name, emp.email, emp.age, role, emp.salary
            ))
        })
        .collect();

    let all_mark = if state.selection.is_all_selected(&page_ids) {
        "all"
    } else if state.selection.is_some_selected(&page_ids) {
        "some"
    } else {
        "none"
    };
    let title = format!(
        " Employees p{}/{} ({} shown, {} selected: {}) ",
        page.page,
        page.total_pages.max(1),
        page.total_items,
        state.selection.count(),
        all_mark,
    );

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, panels[0], list_state);

    // Right panel: statistics over the full, unfiltered list
    let stats_widget = Paragraph::new(build_stats(state))
        .block(Block::default().borders(Borders::ALL).title(" Statistics "))
        .wrap(Wrap { trim: false });
    frame.render_widget(stats_widget, panels[1]);

    // Filter/sort line
    let role = state
        .filters
        .role
        .map(|r| r.as_str().to_string())
        .unwrap_or_else(|| "any".to_string());
    let sort_desc = match state.sort.key {
        None => "none".to_string(),
        Some(key) => format!(
            "{} {}",
            key,
            match state.sort.direction {
                SortDirection::Ascending => "asc",
                SortDirection::Descending => "desc",
            }
        ),
    };
    let search = if state.filters.search.is_empty() {
        "-".to_string()
    } else {
        state.filters.search.clone()
    };
    let status = state.status.as_deref().unwrap_or("");
    let mode_hint = match state.mode {
        Mode::Search => " [typing search, Enter/Esc to finish]",
        Mode::Normal => "",
    };
    let info = Paragraph::new(format!(
        " search: {}  role: {}  sort: {}  page size: {}{}  {}",
        search,
        role,
        sort_desc,
        state.pager.page_size(),
        mode_hint,
        status,
    ))
    .style(Style::default().fg(Color::Yellow));
    frame.render_widget(info, rows[1]);

    // Footer help
    let help = Paragraph::new(
        " j/k:move  h/l:page  /:search  o:role  s:sort  d:direction  +:page size  space:select  a:select all  x:delete  R:refresh  c:clear  q:quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, rows[2]);
}

fn build_stats(state: &AppState) -> Text<'static> {
    let stats = stats::calculate(&state.all);
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        format!("Total employees: {}", stats.total_employees),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(format!("Average salary:  {}", stats.average_salary)));
    lines.push(Line::from(format!("Average age:     {}", stats.average_age)));
    lines.push(Line::from(format!(
        "Salary range:    {:.0} - {:.0}",
        stats.salary_range.min, stats.salary_range.max
    )));
    lines.push(Line::from(format!(
        "Age range:       {:.0} - {:.0}",
        stats.age_range.min, stats.age_range.max
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Roles",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for (role, share) in stats.role_percentages() {
        lines.push(Line::from(format!(
            "  {:<10} {:>3} ({:>3}%)",
            role, share.count, share.percentage
        )));
    }

    Text::from(lines)
}
