use homeboard_api::ProviderIdentity;

/// Presentation-facing summary of the profile data lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Before any network activity resolves, and while the redirect is pending
    #[default]
    Loading,
    /// Profile fetched successfully
    Ready(ProviderIdentity),
    /// The fetch failed; nothing is rendered (errors go to the log only)
    Empty,
}

/// Events fed into the dashboard state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Profile fetch succeeded
    ProfileLoaded(ProviderIdentity),
    /// Profile fetch failed; the loading indicator must still clear
    ProfileUnavailable,
    /// Animation tick for the loading skeleton
    Tick,
    Quit,
}

pub struct AppState {
    pub profile: LoadState,
    pub spinner_frame: usize,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            profile: LoadState::Loading,
            spinner_frame: 0,
        }
    }

    /// Apply one event; returns true when the app should quit
    pub fn handle(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::ProfileLoaded(identity) => {
                self.profile = LoadState::Ready(identity);
            }
            InputEvent::ProfileUnavailable => {
                self.profile = LoadState::Empty;
            }
            InputEvent::Tick => {
                self.spinner_frame = self.spinner_frame.wrapping_add(1);
            }
            InputEvent::Quit => return true,
        }
        false
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> ProviderIdentity {
        ProviderIdentity {
            id: "u1".to_string(),
            display_name: "Alice".to_string(),
            avatar_urls: vec!["http://x/a.png".to_string()],
            profile_url: Some("http://p".to_string()),
            follower_count: 42,
            email: Some("a@x.com".to_string()),
            country: Some("US".to_string()),
            biography: Some("hi".to_string()),
        }
    }

    #[test]
    fn starts_loading() {
        assert_eq!(AppState::new().profile, LoadState::Loading);
    }

    #[test]
    fn successful_fetch_transitions_to_ready() {
        let mut state = AppState::new();
        assert!(!state.handle(InputEvent::ProfileLoaded(identity())));
        assert_eq!(state.profile, LoadState::Ready(identity()));
    }

    #[test]
    fn failed_fetch_clears_loading() {
        let mut state = AppState::new();
        assert!(!state.handle(InputEvent::ProfileUnavailable));
        assert_eq!(state.profile, LoadState::Empty);
    }

    #[test]
    fn quit_event_requests_shutdown() {
        let mut state = AppState::new();
        assert!(state.handle(InputEvent::Quit));
    }

    #[test]
    fn ticks_advance_the_skeleton() {
        let mut state = AppState::new();
        state.handle(InputEvent::Tick);
        state.handle(InputEvent::Tick);
        assert_eq!(state.spinner_frame, 2);
    }
}
