//! Panel rendering.
//!
//! ┌──────────────────────────────────────────────┐
//! │  ⚛ Quantum Vault    3 objects · 2 critical   │
//! ├──────────────────────────────────────────────┤
//! │  Object ID: N0002_                            │
//! ├──────────────────────────────────────────────┤
//! │  System started. Waiting for commands...     │
//! │  Added -> ID: N0001, Stability: 72.4, ...    │
//! │  ...                                         │
//! ├──────────────────────────────────────────────┤
//! │ System active | Inventory: 3 objects | ...   │
//! │  a: add  l: list  z: analyze  c: cooldown    │
//! └──────────────────────────────────────────────┘

use super::app::{App, LogKind, Mode};
use crate::commands::EVACUATION_NOTICE;
use quantumvault_core::InventorySummary;
use rand::Rng;
use ratatui::{prelude::*, widgets::*};

pub fn draw<R: Rng>(f: &mut Frame, app: &App<R>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Length(3), // id entry
            Constraint::Min(5),    // log
            Constraint::Length(1), // status
            Constraint::Length(1), // keys
        ])
        .split(f.area());

    draw_title(f, rows[0], app);
    draw_id_entry(f, rows[1], app);
    draw_log(f, rows[2], app);
    draw_status(f, rows[3], app);
    draw_keys(f, rows[4], app.mode());

    match app.mode() {
        Mode::ConfirmQuit => draw_modal(
            f,
            " Exit ",
            &["Shut down the vault?", "", "y: yes   n: no"],
            Color::Yellow,
        ),
        Mode::Collapsed => {
            let event = app.collapse().map(ToString::to_string).unwrap_or_default();
            draw_modal(
                f,
                " CRITICAL ERROR ",
                &[
                    EVACUATION_NOTICE,
                    "",
                    event.as_str(),
                    "",
                    "press any key",
                ],
                Color::Red,
            );
        }
        Mode::Normal | Mode::EditingId => {}
    }
}

fn draw_title<R: Rng>(f: &mut Frame, area: Rect, app: &App<R>) {
    let InventorySummary { total, critical } = app.summary();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Line::from(vec![
            Span::styled(" ⚛ Quantum Vault ", Style::default().bold().fg(Color::Cyan)),
            Span::styled(
                format!("  {total} objects · {critical} critical "),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    f.render_widget(block, area);
}

fn draw_id_entry<R: Rng>(f: &mut Frame, area: Rect, app: &App<R>) {
    let editing = app.mode() == Mode::EditingId;
    let border = if editing {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Object ID ");
    let p = Paragraph::new(app.id_input())
        .style(Style::default().fg(Color::White))
        .block(block);
    f.render_widget(p, area);

    if editing {
        let x = area.x + 1 + app.id_input().chars().count() as u16;
        f.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn draw_log<R: Rng>(f: &mut Frame, area: Rect, app: &App<R>) {
    let height = area.height.saturating_sub(2) as usize;
    let log = app.log();
    let skip = log.len().saturating_sub(height);

    let lines: Vec<Line> = log
        .iter()
        .skip(skip)
        .map(|entry| {
            let style = match entry.kind {
                LogKind::Info => Style::default().fg(Color::White),
                LogKind::Warn => Style::default().fg(Color::Yellow),
                LogKind::Alert => Style::default().fg(Color::Red).bold(),
            };
            Line::styled(entry.text.as_str(), style)
        })
        .collect();

    let p = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Log "));
    f.render_widget(p, area);
}

fn draw_status<R: Rng>(f: &mut Frame, area: Rect, app: &App<R>) {
    let style = if app.mode() == Mode::Collapsed {
        Style::default().bg(Color::Red).fg(Color::White)
    } else {
        Style::default().bg(Color::Blue).fg(Color::White)
    };
    let text = if app.mode() == Mode::Collapsed {
        " SYSTEM FAILURE".to_string()
    } else {
        format!(" {}", app.summary())
    };
    f.render_widget(Paragraph::new(text).style(style), area);
}

fn draw_keys(f: &mut Frame, area: Rect, mode: Mode) {
    let text = match mode {
        Mode::EditingId => " type an id   backspace: delete   enter/esc: done",
        _ => " a: add   l: list   i: edit id   z: analyze   c: cooldown   q: quit",
    };
    let bar = Paragraph::new(text).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(bar, area);
}

fn draw_modal(f: &mut Frame, title: &str, body: &[&str], color: Color) {
    let width = body
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(title.chars().count()) as u16
        + 6;
    let height = body.len() as u16 + 2;
    let area = centered(f.area(), width, height);

    let lines: Vec<Line> = body.iter().map(|l| Line::from(*l).centered()).collect();
    let p = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color).bold())
            .title(title),
    );
    f.render_widget(Clear, area);
    f.render_widget(p, area);
}

fn centered(outer: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(outer.width);
    let height = height.min(outer.height);
    Rect {
        x: outer.x + (outer.width - width) / 2,
        y: outer.y + (outer.height - height) / 2,
        width,
        height,
    }
}
