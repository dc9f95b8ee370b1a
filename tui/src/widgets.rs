//! Dashboard widgets
//!
//! The dashboard is a grid of cells. Each widget owns one cell and renders
//! itself from the shared [`AppState`]. The weather, news, and finance
//! widgets live outside this crate; the music profile card is the one
//! shipped here.

use crate::app::{AppState, LoadState};
use homeboard_api::ProviderIdentity;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Shown when the profile has no avatar images
pub const FALLBACK_AVATAR: &str = "default-avatar.png";
/// Shown when the profile has no biography
pub const FALLBACK_BIOGRAPHY: &str = "No biography available";

/// A cell in the dashboard grid
pub trait DashboardWidget {
    fn title(&self) -> &str;
    fn render(&self, f: &mut Frame, area: Rect, state: &AppState);
}

/// The music-service profile card
pub struct MusicProfileCard;

impl DashboardWidget for MusicProfileCard {
    fn title(&self) -> &str {
        "Music"
    }

    fn render(&self, f: &mut Frame, area: Rect, state: &AppState) {
        match &state.profile {
            LoadState::Loading => render_skeleton(f, area, state.spinner_frame),
            LoadState::Ready(identity) => render_card(f, area, self.title(), identity),
            // Errors are surfaced in the log only; the cell stays blank
            LoadState::Empty => {}
        }
    }
}

fn render_skeleton(f: &mut Frame, area: Rect, frame: usize) {
    let width = area.width.saturating_sub(4) as usize;
    let pulse = if frame % 2 == 0 {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Gray)
    };
    let bar = |len: usize| Line::from(Span::styled("▆".repeat(len), pulse));

    let lines = vec![
        Line::default(),
        bar(width * 3 / 4),
        Line::default(),
        bar(width / 2),
    ];
    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, identity: &ProviderIdentity) {
    let avatar = identity
        .avatar_urls
        .first()
        .map(String::as_str)
        .unwrap_or(FALLBACK_AVATAR);
    let biography = identity
        .biography
        .as_deref()
        .unwrap_or(FALLBACK_BIOGRAPHY);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                identity.display_name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("@{}", identity.id),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(Span::styled(
            format!("[{avatar}]"),
            Style::default().fg(Color::DarkGray),
        )),
        Line::default(),
        Line::from(biography.to_string()),
        Line::from(format!(
            "Country: {}",
            identity.country.as_deref().unwrap_or("-")
        )),
        Line::from(format!(
            "Email: {}",
            identity.email.as_deref().unwrap_or("-")
        )),
        Line::from(Span::styled(
            format!("Followers: {}", identity.follower_count),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(profile_url) = &identity.profile_url {
        lines.push(Line::from(Span::styled(
            format!("View profile: {profile_url}"),
            Style::default().fg(Color::Cyan),
        )));
    }

    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title)),
        area,
    );
}
