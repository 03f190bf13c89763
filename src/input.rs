use crate::render::Layout;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use solsim::{Control, ScrollDirection, Session};
use std::time::Duration;

const SPEED_STEP: f64 = 0.1;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Action {
    Control(Control),
    Resize,
    Quit,
}

pub(crate) fn collect_events_nonblocking(max_wait: Duration) -> anyhow::Result<Vec<Event>> {
    let mut out = Vec::new();
    let timeout = std::cmp::min(Duration::from_millis(1), max_wait);
    while event::poll(timeout)? {
        out.push(event::read()?);
        if out.len() >= 64 {
            break;
        }
    }
    Ok(out)
}

pub(crate) fn map_event(ev: &Event, layout: &Layout, session: &Session) -> Option<Action> {
    match ev {
        Event::Key(k) if k.kind == KeyEventKind::Press || k.kind == KeyEventKind::Repeat => {
            map_key(k, session)
        }
        Event::Mouse(m) => map_mouse(m, layout, session).map(Action::Control),
        Event::Resize(..) => Some(Action::Resize),
        _ => None,
    }
}

fn map_key(k: &KeyEvent, session: &Session) -> Option<Action> {
    let speed = session.state().speed_factor;
    let control = match k.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => Control::TogglePause,
        KeyCode::Char('r') | KeyCode::Char('R') => Control::Reset,
        KeyCode::Char('l') | KeyCode::Char('L') => Control::ToggleLabels,
        KeyCode::Char('+') | KeyCode::Char('=') => Control::SetSpeed(speed + SPEED_STEP),
        KeyCode::Char('-') | KeyCode::Char('_') => Control::SetSpeed(speed - SPEED_STEP),
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char(']') | KeyCode::Up => {
            Control::Scroll(ScrollDirection::Up)
        }
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('[') | KeyCode::Down => {
            Control::Scroll(ScrollDirection::Down)
        }
        KeyCode::Char('0') => Control::Select(None),
        KeyCode::Char(c @ '1'..='9') => {
            let i = c as usize - '1' as usize;
            let name = session.bodies().get(i)?.name().to_string();
            Control::Select(Some(name))
        }
        _ => return None,
    };
    Some(Action::Control(control))
}

fn map_mouse(m: &MouseEvent, layout: &Layout, session: &Session) -> Option<Control> {
    let (col, row) = (m.column, m.row);
    match m.kind {
        MouseEventKind::ScrollUp => Some(Control::Scroll(ScrollDirection::Up)),
        MouseEventKind::ScrollDown => Some(Control::Scroll(ScrollDirection::Down)),
        MouseEventKind::Drag(MouseButton::Left) => slider_hit(col, row, layout, session),
        MouseEventKind::Down(MouseButton::Left) => {
            if layout.hud.contains(col, row) {
                if let Some(c) = slider_hit(col, row, layout, session) {
                    return Some(c);
                }
                if layout.pause.contains(col, row) {
                    return Some(Control::TogglePause);
                }
                if layout.reset.contains(col, row) {
                    return Some(Control::Reset);
                }
                if layout.labels.contains(col, row) {
                    return Some(Control::ToggleLabels);
                }
                return None;
            }
            let at = layout.mapping(session.view()).from_cell(col, row);
            Some(Control::Click(at))
        }
        _ => None,
    }
}

fn slider_hit(col: u16, row: u16, layout: &Layout, session: &Session) -> Option<Control> {
    let frac = |r: &crate::render::Rect| {
        (col.saturating_sub(r.x + 1)) as f64 / (r.w.saturating_sub(3).max(1)) as f64
    };
    if layout.speed.contains(col, row) {
        return Some(Control::SetSpeed(session.speed().value_at(frac(&layout.speed))));
    }
    if layout.zoom.contains(col, row) {
        return Some(Control::SetZoom(session.zoom().value_at(frac(&layout.zoom))));
    }
    None
}
