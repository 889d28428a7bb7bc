use crate::entities::{Customer, Meal, Waiter};
use crate::restaurant::Restaurant;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Customers,
    Waiters,
    Meals,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Customers => Page::Waiters,
            Page::Waiters => Page::Meals,
            Page::Meals => Page::Customers,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Customers => Page::Meals,
            Page::Waiters => Page::Customers,
            Page::Meals => Page::Waiters,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Customers => "Customers",
            Page::Waiters => "Waiters",
            Page::Meals => "Meals",
        }
    }
}

pub struct App {
    pub restaurant: Restaurant,
    pub customers: Vec<Customer>,
    pub waiters: Vec<Waiter>,
    pub meals: Vec<Meal>,
    pub current_page: Page,
    pub customers_state: TableState,
    pub waiters_state: TableState,
    pub meals_state: TableState,
    pub show_detail: bool,
}

fn first_row(len: usize) -> TableState {
    let mut state = TableState::default();
    if len > 0 {
        state.select(Some(0));
    }
    state
}

impl App {
    pub fn new(restaurant: Restaurant) -> Self {
        let customers = restaurant.all_customers();
        let waiters = restaurant.all_waiters();
        let meals = restaurant.all_meals();

        Self {
            customers_state: first_row(customers.len()),
            waiters_state: first_row(waiters.len()),
            meals_state: first_row(meals.len()),
            restaurant,
            customers,
            waiters,
            meals,
            current_page: Page::Customers,
            show_detail: false,
        }
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    fn page_len(&self) -> usize {
        match self.current_page {
            Page::Customers => self.customers.len(),
            Page::Waiters => self.waiters.len(),
            Page::Meals => self.meals.len(),
        }
    }

    fn page_state(&mut self) -> &mut TableState {
        match self.current_page {
            Page::Customers => &mut self.customers_state,
            Page::Waiters => &mut self.waiters_state,
            Page::Meals => &mut self.meals_state,
        }
    }

    pub fn next(&mut self) {
        let len = self.page_len();
        if len == 0 {
            return;
        }
        let state = self.page_state();
        let i = match state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.page_len();
        if len == 0 {
            return;
        }
        let state = self.page_state();
        let i = match state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        state.select(Some(i));
    }

    pub fn selected_customer(&self) -> Option<&Customer> {
        self.customers_state.selected().and_then(|i| self.customers.get(i))
    }

    pub fn selected_waiter(&self) -> Option<&Waiter> {
        self.waiters_state.selected().and_then(|i| self.waiters.get(i))
    }

    pub fn selected_meal(&self) -> Option<&Meal> {
        self.meals_state.selected().and_then(|i| self.meals.get(i))
    }

    fn customer_name(&self, id: &str) -> String {
        self.customers
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "?".to_string())
    }

    fn waiter_name(&self, id: &str) -> String {
        self.waiters
            .iter()
            .find(|w| w.id == id)
            .map(|w| w.name.clone())
            .unwrap_or_else(|| "?".to_string())
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Enter => app.toggle_detail(),
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_page();
                    } else {
                        app.next_page();
                    }
                }
                KeyCode::BackTab => app.previous_page(),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    let content = if app.show_detail {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);
        render_detail_panel(f, content_chunks[1], app);
        content_chunks[0]
    } else {
        chunks[1]
    };

    match app.current_page {
        Page::Customers => render_customers(f, content, app),
        Page::Waiters => render_waiters(f, content, app),
        Page::Meals => render_meals(f, content, app),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![];
    for (i, page) in [Page::Customers, Page::Waiters, Page::Meals].iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title().to_string(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!(
            "{} customers, {} waiters, {} meals",
            app.customers.len(),
            app.waiters.len(),
            app.meals.len()
        ),
        Style::default().fg(Color::White),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn header_row(titles: &[&'static str]) -> Row<'static> {
    let cells = titles.iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    });
    Row::new(cells).style(Style::default().bg(Color::DarkGray)).height(1)
}

fn table_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(title)
}

fn highlight() -> Style {
    Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
}

fn render_customers(f: &mut Frame, area: Rect, app: &mut App) {
    let meals = app.restaurant.meals();
    let rows: Vec<Row> = app
        .customers
        .iter()
        .map(|c| {
            Row::new(vec![
                Cell::from(c.name.clone()),
                Cell::from(c.age.to_string()),
                Cell::from(c.meals(meals).len().to_string()),
                Cell::from(format!("{:.2}", c.total_spent(meals))),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(20),
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Length(12),
        ],
    )
    .header(header_row(&["Name", "Age", "Meals", "Spent"]))
    .block(table_block(" Customers "))
    .highlight_style(highlight())
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.customers_state);
}

fn render_waiters(f: &mut Frame, area: Rect, app: &mut App) {
    let meals = app.restaurant.meals();
    let rows: Vec<Row> = app
        .waiters
        .iter()
        .map(|w| {
            Row::new(vec![
                Cell::from(w.name.clone()),
                Cell::from(w.experience.to_string()),
                Cell::from(w.meals(meals).len().to_string()),
                Cell::from(format!("{:.2}", w.total_tips(meals)))
                    .style(Style::default().fg(Color::Green)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(20),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(12),
        ],
    )
    .header(header_row(&["Name", "Years", "Meals", "Tips"]))
    .block(table_block(" Waiters "))
    .highlight_style(highlight())
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.waiters_state);
}

fn render_meals(f: &mut Frame, area: Rect, app: &mut App) {
    let rows: Vec<Row> = app
        .meals
        .iter()
        .map(|m| {
            Row::new(vec![
                Cell::from(app.customer_name(&m.customer_id)),
                Cell::from(app.waiter_name(&m.waiter_id)),
                Cell::from(format!("{:.2}", m.total)),
                Cell::from(format!("{:.2}", m.tip)).style(Style::default().fg(Color::Green)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(20),
            Constraint::Length(20),
            Constraint::Length(10),
            Constraint::Length(10),
        ],
    )
    .header(header_row(&["Customer", "Waiter", "Total", "Tip"]))
    .block(table_block(" Meals "))
    .highlight_style(highlight())
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.meals_state);
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {}: ", label),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(value),
    ])
}

fn detail_lines(app: &App) -> Vec<Line<'static>> {
    let meals = app.restaurant.meals();

    match app.current_page {
        Page::Customers => match app.selected_customer() {
            Some(c) => {
                let waiters = c
                    .waiter_ids(meals)
                    .iter()
                    .map(|id| app.waiter_name(id))
                    .collect::<Vec<_>>()
                    .join(", ");
                vec![
                    field("Name", c.name.clone()),
                    field("Age", c.age.to_string()),
                    field("Meals", c.meals(meals).len().to_string()),
                    field("Spent", format!("{:.2}", c.total_spent(meals))),
                    field("Served by", waiters),
                ]
            }
            None => vec![Line::from("  No customer selected")],
        },
        Page::Waiters => match app.selected_waiter() {
            Some(w) => {
                let best = w
                    .best_tip(meals)
                    .map(|meal| format!("{} ({:.2})", app.customer_name(&meal.customer_id), meal.tip))
                    .unwrap_or_else(|| "none yet".to_string());
                vec![
                    field("Name", w.name.clone()),
                    field("Experience", format!("{} years", w.experience)),
                    field("Meals", w.meals(meals).len().to_string()),
                    field("Tips", format!("{:.2}", w.total_tips(meals))),
                    field("Best tipper", best),
                ]
            }
            None => vec![Line::from("  No waiter selected")],
        },
        Page::Meals => match app.selected_meal() {
            Some(m) => vec![
                field("Customer", app.customer_name(&m.customer_id)),
                field("Waiter", app.waiter_name(&m.waiter_id)),
                field("Total", format!("{:.2}", m.total)),
                field("Tip", format!("{:.2}", m.tip)),
                field("Created", m.created_at.format("%Y-%m-%d %H:%M:%S").to_string()),
            ],
            None => vec![Line::from("  No meal selected")],
        },
    }
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let detail_panel = Paragraph::new(detail_lines(app)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Relationships "),
    );

    f.render_widget(detail_panel, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &mut App) {
    let len = app.page_len();
    let selected = app.page_state().selected().map(|i| i + 1).unwrap_or(0);

    let status_spans = vec![
        Span::styled(format!(" Row: {}/{} ", selected, len), Style::default().fg(Color::Cyan)),
        Span::raw(" | "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Details | "),
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" Page | "),
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Nav | "),
        Span::styled("q", Style::default().fg(Color::Red)),
        Span::raw(" Quit"),
    ];

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}
