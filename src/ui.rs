use ratatui::{prelude::*, widgets::*};

use crate::actions::{ACTION_BAR, Button, ButtonStyle};
use crate::app::{App, Dialog, Focus};
use crate::constants::{APP_TITLE, FOOTER, KEY_HELP, MSG_CONFIRM_DELETE, TITLE_CONFIRM};
use crate::db::ProcedureExecutor;
use crate::dispatcher::{Level, Notice};
use crate::form::{FieldInput, Form};
use crate::schema::FieldKind;

const ACCENT: Color = Color::Rgb(74, 144, 226);
const LABEL_WIDTH: u16 = 16;
const INPUT_WIDTH: u16 = 34;

pub fn ui<X: ProcedureExecutor>(f: &mut Frame, app: &App<X>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Tabs
            Constraint::Min(1),    // Form + buttons
            Constraint::Length(2), // Footer
        ])
        .split(f.area());

    let header = Paragraph::new(Line::from(Span::styled(
        APP_TITLE,
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT)),
    );
    f.render_widget(header, chunks[0]);

    let titles: Vec<Line> = app
        .forms
        .iter()
        .map(|form| Line::from(format!(" {} ", form.entity.tab)))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.active)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, chunks[1]);

    render_form(f, app.form(), app.focus, chunks[2]);

    let footer = Paragraph::new(vec![
        Line::from(Span::styled(KEY_HELP, Style::default().fg(Color::Gray))),
        Line::from(Span::styled(FOOTER, Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center);
    f.render_widget(footer, chunks[3]);

    if let Some(dialog) = &app.dialog {
        render_dialog(f, dialog);
    }
}

/// One row per field followed by a separator row, then the action bar.
fn render_form(f: &mut Frame, form: &Form, focus: Focus, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", form.entity.tab))
        .borders(Borders::ALL)
        .padding(Padding::new(2, 2, 1, 0));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut constraints: Vec<Constraint> = form
        .inputs
        .iter()
        .flat_map(|_| [Constraint::Length(1), Constraint::Length(1)])
        .collect();
    constraints.push(Constraint::Length(1)); // spacer
    constraints.push(Constraint::Length(1)); // buttons
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, input) in form.inputs.iter().enumerate() {
        let focused = focus == Focus::Field(i);
        render_field(f, input, focused, rows[i * 2]);

        let separator = Paragraph::new("─".repeat(rows[i * 2 + 1].width as usize))
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(separator, rows[i * 2 + 1]);
    }

    let selected = match focus {
        Focus::Button(i) => Some(i),
        Focus::Field(_) => None,
    };
    render_buttons(f, selected, rows[form.inputs.len() * 2 + 1]);
}

fn render_field(f: &mut Frame, input: &FieldInput, focused: bool, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(LABEL_WIDTH),
            Constraint::Length(1),
            Constraint::Length(INPUT_WIDTH),
            Constraint::Min(0),
        ])
        .split(area);

    let label = Paragraph::new(format!("{}:", input.spec.name))
        .alignment(Alignment::Right)
        .style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(label, cols[0]);

    let style = if focused {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    };
    let width = cols[2].width.max(1) as usize;
    let scroll = input.input.visual_scroll(width);
    let field = Paragraph::new(input.value())
        .style(style)
        .scroll((0, scroll as u16));
    f.render_widget(field, cols[2]);

    if input.spec.kind == FieldKind::Date {
        let hint = Paragraph::new(" YYYY-MM-DD  [ ] day  t today")
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(hint, cols[3]);
    }

    if focused {
        f.set_cursor_position((
            cols[2].x + (input.input.visual_cursor().max(scroll) - scroll) as u16,
            cols[2].y,
        ));
    }
}

fn render_buttons(f: &mut Frame, selected: Option<usize>, area: Rect) {
    let mut spans = Vec::new();
    for (i, button) in ACTION_BAR.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            format!(" {} (^{}) ", button.label, button.hotkey.to_ascii_uppercase()),
            button_style(button, selected == Some(i)),
        ));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn button_style(button: &Button, selected: bool) -> Style {
    let bg = match button.style {
        ButtonStyle::Accent => ACCENT,
        ButtonStyle::Danger => Color::Red,
        ButtonStyle::Muted => Color::Gray,
    };
    let style = Style::default()
        .fg(Color::White)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    if selected {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    }
}

fn render_dialog(f: &mut Frame, dialog: &Dialog) {
    let (title, message, color, hint) = match dialog {
        Dialog::Notice(Notice {
            level,
            title,
            message,
        }) => {
            let color = match level {
                Level::Info => Color::Green,
                Level::Warning => Color::Yellow,
                Level::Error => Color::Red,
            };
            (title.as_str(), message.clone(), color, "Enter to close")
        }
        Dialog::ConfirmDelete(pending) => (
            TITLE_CONFIRM,
            format!("{MSG_CONFIRM_DELETE}\n\nID: {}", pending.id),
            Color::Yellow,
            "y / n",
        ),
    };

    let area = centered_rect(50, 9, f.area());
    let block = Block::default()
        .title(format!(" {title} "))
        .title_bottom(Line::from(format!(" {hint} ")).right_aligned())
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(color));
    let body = Paragraph::new(message)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(body, area);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
