use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppState, AuthFocus, Screen, ToastKind};
use crate::dashboard::{self, ACTIONS, STATS};

use super::styles;

const PRODUCT_NAME: &str = "SecureClaim";

/// Terminal width at which the auth screen shows the brand panel
const WIDE_LAYOUT_MIN_WIDTH: u16 = 100;

pub fn render(frame: &mut Frame, app: &App) {
    match app.screen() {
        Screen::Loading => render_loading(frame),
        Screen::Auth => render_auth(frame, app),
        Screen::Dashboard => render_dashboard(frame, app),
    }

    if app.toast.is_some() {
        render_toast(frame, app);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }
}

fn render_loading(frame: &mut Frame) {
    let area = centered_rect_fixed(30, 3, frame.area());
    let paragraph = Paragraph::new(Line::from(Span::styled(
        "Loading session...",
        styles::muted_style(),
    )))
    .block(Block::default().borders(Borders::ALL).border_style(styles::muted_style()));
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Auth Screen
// ============================================================================

fn render_auth(frame: &mut Frame, app: &App) {
    let full = frame.area();
    let form_area = if full.width >= WIDE_LAYOUT_MIN_WIDTH {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(full);
        render_brand_panel(frame, halves[0]);
        halves[1]
    } else {
        full
    };

    render_auth_form(frame, app, form_area);
}

fn render_brand_panel(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  ⛨ {}", PRODUCT_NAME), styles::title_style())),
        Line::from(""),
        Line::from(Span::styled(
            "  Your trusted partner in insurance claims",
            styles::text_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  File claims, manage policies, and track your coverage",
            styles::muted_style(),
        )),
        Line::from(Span::styled("  all in one secure platform.", styles::muted_style())),
    ];

    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(styles::muted_style());
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_auth_form(frame: &mut Frame, app: &App, area: Rect) {
    let area = centered_rect_fixed(48, 13, area);
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("  {}", app.auth_mode.title()),
            styles::title_style(),
        )),
        Line::from(""),
    ];

    let username_focused = app.auth_focus == AuthFocus::Username;
    lines.push(field_line(
        "Username: [",
        &format!("{:<20}", app.username),
        username_focused,
    ));

    let password_focused = app.auth_focus == AuthFocus::Password;
    let masked: String = "*".repeat(app.password.chars().count().min(20));
    lines.push(field_line(
        "Password: [",
        &format!("{:<20}", masked),
        password_focused,
    ));

    lines.push(Line::from(""));

    let button_focused = app.auth_focus == AuthFocus::Button;
    let label = if app.is_submitting() {
        format!(" ⟳ {}... ", app.auth_mode.button_label())
    } else if button_focused {
        format!(" ▶ {} ◀ ", app.auth_mode.button_label())
    } else {
        format!("   {}   ", app.auth_mode.button_label())
    };
    let button_style = if button_focused {
        styles::selected_style()
    } else {
        styles::text_style()
    };
    lines.push(Line::from(vec![
        Span::raw("              ["),
        Span::styled(label, button_style),
        Span::raw("]"),
    ]));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  {}", app.auth_mode.toggle_hint()),
        styles::muted_style(),
    )));
    lines.push(Line::from(Span::styled("  [Esc] Quit", styles::muted_style())));

    let block = Block::default()
        .title(format!(" {} ", PRODUCT_NAME))
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn field_line(label: &'static str, value: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        styles::selected_style()
    } else {
        styles::text_style()
    };
    let cursor = if focused { "▌" } else { "" };
    Line::from(vec![
        Span::raw("    "),
        Span::styled(label, styles::muted_style()),
        Span::styled(format!("{}{}", value, cursor), style),
        Span::styled("]", styles::muted_style()),
    ])
}

// ============================================================================
// Dashboard
// ============================================================================

fn render_dashboard(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(2), // Welcome
            Constraint::Length(4), // Stats
            Constraint::Min(6),    // Actions
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_welcome(frame, app, chunks[1]);
    render_stats(frame, chunks[2]);
    render_actions(frame, app, chunks[3]);
    render_status_bar(frame, chunks[4]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!("  ⛨ {}", PRODUCT_NAME);
    let right = format!("{}  [o] Sign out ", app.signed_in_email().unwrap_or_default());
    let padding = (area.width as usize)
        .saturating_sub(title.chars().count() + right.chars().count() + 2);

    let line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(padding)),
        Span::styled(right, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_welcome(frame: &mut Frame, app: &App, area: Rect) {
    let greeting = dashboard::welcome_line(app.signed_in_email());
    let lines = vec![
        Line::from(Span::styled(format!("  {}", greeting), styles::text_style())),
        Line::from(Span::styled(
            format!("  {}", dashboard::WELCOME_SUBTITLE),
            styles::muted_style(),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_stats(frame: &mut Frame, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(STATS.iter().map(|_| Constraint::Ratio(1, STATS.len() as u32)))
        .split(area);

    for (stat, column) in STATS.iter().zip(columns.iter()) {
        let lines = vec![
            Line::from(Span::styled(format!(" {}", stat.value), styles::tone_style(stat.tone))),
            Line::from(Span::styled(format!(" {}", stat.label), styles::muted_style())),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styles::muted_style());
        frame.render_widget(Paragraph::new(lines).block(block), *column);
    }
}

fn render_actions(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::with_capacity(ACTIONS.len() * 3);
    for (i, action) in ACTIONS.iter().enumerate() {
        let selected = i == app.action_selection;
        let marker = if selected { "▶ " } else { "  " };
        let title_style = if selected {
            styles::selected_style()
        } else if action.featured {
            styles::featured_style()
        } else {
            styles::text_style()
        };

        let mut title = vec![
            Span::raw(" "),
            Span::styled(marker, styles::help_key_style()),
            Span::styled(action.title, title_style),
        ];
        if action.featured {
            title.push(Span::styled("  ★", styles::featured_style()));
        }
        lines.push(Line::from(title));
        lines.push(Line::from(Span::styled(
            format!("     {}", action.description),
            styles::muted_style(),
        )));
        lines.push(Line::from(""));
    }

    let block = Block::default()
        .title(" Quick Actions ")
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" [↑/↓]", styles::help_key_style()),
        Span::raw(" select  "),
        Span::styled("[o]", styles::help_key_style()),
        Span::raw(" sign out  "),
        Span::styled("[q]", styles::help_key_style()),
        Span::raw(" quit"),
    ]);
    frame.render_widget(Paragraph::new(line).style(styles::status_bar_style()), area);
}

// ============================================================================
// Overlays
// ============================================================================

fn render_toast(frame: &mut Frame, app: &App) {
    let Some(ref toast) = app.toast else {
        return;
    };

    let full = frame.area();
    let width = 48.min(full.width);
    let area = Rect::new(
        full.x + full.width.saturating_sub(width),
        full.y + full.height.saturating_sub(5),
        width,
        5.min(full.height),
    );
    frame.render_widget(Clear, area);

    let (title_style, border) = match toast.kind {
        ToastKind::Info => (styles::success_style(), styles::success_style()),
        ToastKind::Error => (styles::error_style(), styles::error_style()),
    };

    let lines = vec![
        Line::from(Span::styled(format!(" {}", toast.title), title_style)),
        Line::from(Span::styled(format!(" {}", toast.description), styles::text_style())),
    ];
    let block = Block::default().borders(Borders::ALL).border_style(border);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(36, 5, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled("  Quit SecureClaim?", styles::title_style())),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("[y]", styles::help_key_style()),
            Span::raw(" yes   "),
            Span::styled("[n]", styles::help_key_style()),
            Span::raw(" no"),
        ]),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
