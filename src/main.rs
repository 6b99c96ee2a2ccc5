mod config;
mod definition;
mod error;
mod host;
mod input;
mod logging;
mod menu;
mod plugin;
mod render;
mod ui;

use std::{cell::RefCell, io, rc::Rc};

use definition::DefinitionStore;
use host::sim::{PortalLabels, SimHost};
use host::WidgetEvent;
use input::{pixel_x_to_col, pixel_y_to_row, ClickState};
use menu::layout::GROUP_NEXUS_PORTAL;
use plugin::NexusPlugin;
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::layout::{Constraint, Direction, Layout};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

const PORTAL_LABELS: &str = include_str!("../assets/portal_labels.json");

/// The simulated client: a widget tree with the portal nexus loaded and the
/// plugin attached to it.
struct App {
    host: SimHost,
    plugin: NexusPlugin,
}

impl App {
    fn new(config: config::MenuConfig) -> Self {
        let mut app = Self {
            host: SimHost::new(),
            plugin: NexusPlugin::new(config),
        };
        app.open_portal();
        app
    }

    /// Start the plugin against a freshly loaded portal interface.
    fn open_portal(&mut self) {
        let labels: PortalLabels = serde_json::from_str(PORTAL_LABELS).unwrap_or_else(|e| {
            log::error!("unreadable portal labels: {e}");
            PortalLabels::default()
        });
        self.host = SimHost::from_portal_labels(&labels);

        if self
            .plugin
            .start_up(DefinitionStore::bundled(), &mut self.host)
            .is_err()
        {
            return;
        }
        if let Err(e) = self.plugin.on_widget_loaded(GROUP_NEXUS_PORTAL, &mut self.host) {
            log::error!("could not open the map menu: {e}");
        }
    }

    fn reopen(&mut self) {
        self.plugin.on_widget_closed(GROUP_NEXUS_PORTAL);
        if self.plugin.is_started() {
            self.plugin.shut_down(&mut self.host);
        }
        self.open_portal();
    }

    fn handle(&mut self, events: impl IntoIterator<Item = WidgetEvent>) {
        for event in events {
            self.plugin.on_widget_event(event, &mut self.host);
        }
    }
}

/// Query the grid container's bounding rect and convert pixel coordinates to a cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let click_x = mouse_x as f64 - rect.left();
    let click_y = mouse_y as f64 - rect.top();

    let col = pixel_x_to_col(click_x, rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(click_y, rect.height(), cs.terminal_rows)?;
    Some((col, row))
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let config = config::load_config();
    logging::init(config.level_filter());

    let app = Rc::new(RefCell::new(App::new(config)));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Pointer handler: hover tracking and primary actions
    terminal.on_mouse_event({
        let app = app.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            let mut cs = click_state.borrow_mut();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            let cell = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs);

            let events = match mouse_event.event {
                MouseEventKind::Moved => cs.pointer_moved(cell),
                MouseEventKind::Pressed if mouse_event.button == MouseButton::Left => cell
                    .and_then(|(col, row)| cs.pointer_pressed(col, row))
                    .into_iter()
                    .collect(),
                _ => return,
            };
            drop(cs);

            app.borrow_mut().handle(events);
        }
    });

    // Keyboard handler: Esc reloads the interface
    terminal.on_key_event({
        let app = app.clone();
        let click_state = click_state.clone();
        move |key_event| {
            if matches!(key_event.code, KeyCode::Esc) {
                click_state.borrow_mut().reset_hover();
                app.borrow_mut().reopen();
            }
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let mut app = app.borrow_mut();
            app.host.run_pending();
            let size = f.area();

            let mut cs = click_state.borrow_mut();
            cs.terminal_cols = size.width;
            cs.terminal_rows = size.height;
            cs.clear_targets();

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(10), Constraint::Length(3)])
                .split(size);

            render::render_widgets(f, &app.host, chunks[0], &mut cs);
            render::render_status(
                f,
                &app.host,
                app.plugin.page_title(),
                cs.hovered(),
                chunks[1],
            );
        }
    });

    Ok(())
}
