use crate::app::AppState;
use crate::widgets::{DashboardWidget, MusicProfileCard};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

/// Lay out the 2x2 dashboard grid and render the occupied cells.
///
/// The news, weather, and finance cells belong to external widgets and are
/// left blank here; the music profile card takes the last cell, as on the
/// original dashboard page.
pub fn view(f: &mut Frame, state: &AppState) {
    let cells = grid(f.area());

    let music = MusicProfileCard;
    let slots: [Option<&dyn DashboardWidget>; 4] = [None, None, None, Some(&music)];
    for (widget, cell) in slots.iter().zip(cells) {
        if let Some(widget) = widget {
            widget.render(f, cell, state);
        }
    }
}

fn grid(area: Rect) -> Vec<Rect> {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let mut cells = Vec::with_capacity(4);
    for row in rows.iter() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row);
        cells.extend(columns.iter().copied());
    }
    cells
}
