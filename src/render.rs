//! Draws the simulated widget tree with ratatui.
//!
//! Widget pixels map onto terminal cells at a fixed ratio. Every visible
//! graphic becomes a small box labelled with its name, or with the sprite's
//! file name when it has none.

use once_cell::sync::Lazy;
use ratzilla::ratatui::layout::{Alignment, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratzilla::ratatui::Frame;
use regex::Regex;

use crate::host::sim::{SimHost, SimWidget, WidgetKind};
use crate::host::WidgetHandle;
use crate::input::ClickState;

/// Pixels per terminal column.
pub const CELL_WIDTH_PX: i32 = 6;
/// Pixels per terminal row.
pub const CELL_HEIGHT_PX: i32 = 12;

static MARKUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("markup pattern is valid"));

/// Host text with its colour tags removed.
pub fn strip_markup(text: &str) -> String {
    MARKUP.replace_all(text, "").into_owned()
}

/// Cell rectangle covering a widget at pixel position `(x, y)`, clipped to `area`.
pub fn widget_rect(area: Rect, x: i32, y: i32, width: i32, height: i32) -> Option<Rect> {
    if width <= 0 || height <= 0 {
        return None;
    }
    let col = x.div_euclid(CELL_WIDTH_PX);
    let row = y.div_euclid(CELL_HEIGHT_PX);
    let cols = (width / CELL_WIDTH_PX).max(1);
    let rows = (height / CELL_HEIGHT_PX).max(1);

    let left = (area.x as i32 + col).max(area.x as i32);
    let top = (area.y as i32 + row).max(area.y as i32);
    let right = (area.x as i32 + col + cols).min(area.right() as i32);
    let bottom = (area.y as i32 + row + rows).min(area.bottom() as i32);
    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

fn label(host: &SimHost, widget: &SimWidget) -> String {
    if !widget.name.is_empty() {
        return strip_markup(&widget.name);
    }
    widget
        .sprite
        .and_then(|sprite| host.sprite_file(sprite))
        .map(|file| file.trim_end_matches(".png").to_string())
        .unwrap_or_default()
}

fn widget_style(widget: &SimWidget, hovered: bool) -> Style {
    let base = if hovered {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else if widget.listening {
        Style::default().fg(Color::White)
    } else if !widget.name.is_empty() {
        // named but inert: an unavailable teleport
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Blue)
    };
    if widget.opacity < 1.0 {
        base.add_modifier(Modifier::DIM)
    } else {
        base
    }
}

/// Draw every visible graphic in paint order and register click targets for
/// the ones that listen for events.
pub fn render_widgets(f: &mut Frame, host: &SimHost, area: Rect, cs: &mut ClickState) {
    let hovered = cs.hovered();
    let visible: Vec<(WidgetHandle, &SimWidget)> = host
        .iter()
        .filter(|(handle, w)| w.kind == WidgetKind::Graphic && !host.is_hidden(*handle))
        .collect();

    for (handle, widget) in visible {
        let (x, y) = host.absolute_position(handle);
        let (width, height) = host.effective_size(handle);
        let Some(rect) = widget_rect(area, x, y, width, height) else {
            continue;
        };
        let style = widget_style(widget, hovered == Some(handle));
        let text = label(host, widget);

        f.render_widget(Clear, rect);
        let paragraph = if rect.height >= 3 {
            Paragraph::new(Line::from(Span::styled(text, style))).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(style),
            )
        } else {
            Paragraph::new(Line::from(Span::styled(text, style.add_modifier(Modifier::REVERSED))))
        };
        f.render_widget(paragraph.alignment(Alignment::Center), rect);

        if widget.listening {
            cs.add_click_target(rect, handle);
        }
    }
}

/// What the hovered widget's first action would do, e.g. `Teleport Varrock`.
fn hover_text(host: &SimHost, hovered: WidgetHandle) -> Option<String> {
    let widget = host.get(hovered)?;
    let action = *widget.action_labels().first()?;
    let target = label(host, widget);
    if target.is_empty() {
        Some(action.to_string())
    } else {
        Some(format!("{action} {target}"))
    }
}

/// One-line summary: current page, hover target, last script and sounds.
pub fn status_text(host: &SimHost, title: Option<&str>, hovered: Option<WidgetHandle>) -> String {
    let mut parts = vec![title.unwrap_or("portal closed").to_string()];
    if let Some(text) = hovered.and_then(|h| hover_text(host, h)) {
        parts.push(text);
    }
    parts.push(match host.scripts.last() {
        Some(call) => format!("script {} {:?}", call.script.0, call.args),
        None => "no teleport yet".to_string(),
    });
    parts.push(match host.sounds.last() {
        Some(sound) => format!("{} sounds (last {})", host.sounds.len(), sound.0),
        None => "0 sounds".to_string(),
    });
    parts.join(" | ")
}

pub fn render_status(
    f: &mut Frame,
    host: &SimHost,
    title: Option<&str>,
    hovered: Option<WidgetHandle>,
    area: Rect,
) {
    let status = Paragraph::new(Line::from(Span::styled(
        status_text(host, title, hovered),
        Style::default().fg(Color::DarkGray),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);
    f.render_widget(status, area);
}
