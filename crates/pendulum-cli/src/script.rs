//! Scripted interaction: what a user would do with the sliders, buttons and
//! mouse, replayed at fixed frames.

use pendulum::{Bob, Parameter, PendulumError, Session};
use serde::{Deserialize, Serialize};
use tracing::info;

/// One interaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Move a slider.
    Set {
        /// Which parameter.
        parameter: Parameter,
        /// New value.
        value: f64,
    },
    /// Press reset.
    Reset,
    /// Press pause/resume.
    Toggle,
    /// Press on a bob.
    BeginDrag {
        /// The bob under the pointer.
        bob: Bob,
    },
    /// Move the pointer while pressed. Coordinates are relative to the pivot,
    /// `y` up.
    Drag {
        /// The dragged bob.
        bob: Bob,
        /// Pointer x.
        x: f64,
        /// Pointer y.
        y: f64,
    },
    /// Release the pointer.
    EndDrag,
}

impl Action {
    /// Short name, matching the run-file spelling.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Set { .. } => "set",
            Self::Reset => "reset",
            Self::Toggle => "toggle",
            Self::BeginDrag { .. } => "begin_drag",
            Self::Drag { .. } => "drag",
            Self::EndDrag => "end_drag",
        }
    }

    /// Run-file keys this action takes besides `action`.
    pub const fn fields(&self) -> &'static [&'static str] {
        match self {
            Self::Set { .. } => &["parameter", "value"],
            Self::Reset | Self::Toggle | Self::EndDrag => &[],
            Self::BeginDrag { .. } => &["bob"],
            Self::Drag { .. } => &["bob", "x", "y"],
        }
    }

    /// Checks values ahead of time so a run never fails half way.
    ///
    /// # Errors
    ///
    /// Rejects the same values the session would.
    pub fn validate(&self) -> Result<(), PendulumError> {
        match *self {
            Self::Set { parameter, value } => parameter.validate(value),
            Self::Drag { x, y, .. } if !x.is_finite() || !y.is_finite() => {
                Err(PendulumError::InvalidPointer { x, y })
            }
            _ => Ok(()),
        }
    }

    /// Performs the interaction.
    ///
    /// # Errors
    ///
    /// Propagates session errors.
    pub fn apply(&self, session: &mut Session) -> Result<(), PendulumError> {
        match *self {
            Self::Set { parameter, value } => {
                session.set(parameter, value)?;
            }
            Self::Reset => {
                session.reset()?;
            }
            Self::Toggle => {
                session.toggle_running();
            }
            Self::BeginDrag { bob } => session.begin_drag(bob),
            Self::Drag { bob, x, y } => session.update_drag(bob, x, y)?,
            Self::EndDrag => session.end_drag(),
        }
        Ok(())
    }
}

/// An [`Action`] scheduled at the start of a frame.
///
/// Keys the action does not take are rejected, so a misspelled `valeu`
/// fails to load instead of silently using nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEvent")]
pub struct Event {
    /// Zero-based frame index.
    pub frame: u64,
    /// What happens.
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Deserialize)]
struct RawEvent {
    frame: u64,
    #[serde(flatten)]
    fields: toml::Table,
}

impl TryFrom<RawEvent> for Event {
    type Error = String;

    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        let keys: Vec<String> = raw.fields.keys().cloned().collect();
        let action: Action = toml::Value::Table(raw.fields)
            .try_into()
            .map_err(|err: toml::de::Error| err.message().to_owned())?;

        let allowed = action.fields();
        if let Some(key) = keys
            .iter()
            .find(|key| key.as_str() != "action" && !allowed.contains(&key.as_str()))
        {
            return Err(format!(
                "unknown field `{key}` for action `{}` at frame {}",
                action.name(),
                raw.frame
            ));
        }

        Ok(Self {
            frame: raw.frame,
            action,
        })
    }
}

/// Events in firing order.
///
/// Events sharing a frame fire in the order they were written.
#[derive(Debug, Clone, Default)]
pub struct Script {
    events: Vec<Event>,
    next: usize,
}

impl Script {
    /// Creates a script, ordering events by frame.
    pub fn new(mut events: Vec<Event>) -> Self {
        events.sort_by_key(|event| event.frame);
        info!(events = events.len(), "Script loaded");
        Self { events, next: 0 }
    }

    /// Events due at or before `frame` that have not fired yet.
    pub fn due(&mut self, frame: u64) -> &[Event] {
        let start = self.next;
        while self
            .events
            .get(self.next)
            .is_some_and(|event| event.frame <= frame)
        {
            self.next += 1;
        }
        &self.events[start..self.next]
    }

    /// Number of events still waiting.
    pub fn remaining(&self) -> usize {
        self.events.len() - self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pendulum::State;

    fn at(frame: u64, action: Action) -> Event {
        Event { frame, action }
    }

    #[test]
    fn due_returns_events_in_frame_order() {
        let mut script = Script::new(vec![
            at(5, Action::Toggle),
            at(2, Action::Reset),
            at(5, Action::EndDrag),
        ]);

        assert!(script.due(0).is_empty());
        assert!(script.due(1).is_empty());
        assert_eq!(script.due(2), &[at(2, Action::Reset)]);
        assert_eq!(script.remaining(), 2);
        assert!(script.due(4).is_empty());
        assert_eq!(
            script.due(5),
            &[at(5, Action::Toggle), at(5, Action::EndDrag)]
        );
        assert_eq!(script.remaining(), 0);
        assert!(script.due(6).is_empty());
    }

    #[test]
    fn skipped_frames_still_fire() {
        let mut script = Script::new(vec![at(3, Action::Toggle)]);
        assert_eq!(script.due(10).len(), 1);
    }

    #[test]
    fn actions_drive_the_session() {
        let mut session = Session::new();

        Action::Toggle.apply(&mut session).unwrap();
        assert!(!session.is_running());

        Action::Drag {
            bob: Bob::First,
            x: 0.0,
            y: -1.0,
        }
        .apply(&mut session)
        .unwrap();
        assert_eq!(session.dragging(), Some(Bob::First));
        assert_eq!(session.state().a1, 0.0);

        Action::EndDrag.apply(&mut session).unwrap();
        assert!(session.dragging().is_none());

        Action::Set {
            parameter: Parameter::Length1,
            value: 2.0,
        }
        .apply(&mut session)
        .unwrap();
        assert_eq!(session.parameters().l1, 2.0);

        Action::Reset.apply(&mut session).unwrap();
        assert_eq!(session.state(), &State::START);
    }

    #[test]
    fn validate_matches_session_rules() {
        let bad_mass = Action::Set {
            parameter: Parameter::Mass2,
            value: 0.0,
        };
        assert!(bad_mass.validate().is_err());
        assert!(bad_mass.apply(&mut Session::new()).is_err());

        let bad_pointer = Action::Drag {
            bob: Bob::Second,
            x: f64::INFINITY,
            y: 0.0,
        };
        assert!(bad_pointer.validate().is_err());

        assert!(Action::Set {
            parameter: Parameter::Gravity,
            value: -1.0
        }
        .validate()
        .is_ok());
    }

    fn parse(text: &str) -> Result<Event, toml::de::Error> {
        toml::from_str(text)
    }

    #[test]
    fn events_parse_from_run_file_tables() {
        let event = parse(
            r#"
            frame = 7
            action = "drag"
            bob = "a2"
            x = 1
            y = -0.5
            "#,
        )
        .unwrap();
        let expected = Action::Drag {
            bob: Bob::Second,
            x: 1.0,
            y: -0.5,
        };
        assert_eq!(event, at(7, expected));

        let event = parse("frame = 0\naction = \"reset\"").unwrap();
        assert_eq!(event, at(0, Action::Reset));
    }

    #[test]
    fn stray_event_keys_are_rejected() {
        let err = parse(
            r#"
            frame = 3
            action = "set"
            parameter = "m2"
            value = 2.0
            valeu = 3.0
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown field `valeu`"), "{err}");

        let err = parse("frame = 3\naction = \"reset\"\nbob = \"a1\"").unwrap_err();
        assert!(err.to_string().contains("for action `reset`"), "{err}");
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert!(parse("frame = 1\naction = \"spin\"").is_err());
        assert!(parse("frame = 1").is_err());
    }

    #[test]
    fn names_match_run_file_spelling() {
        assert_eq!(Action::BeginDrag { bob: Bob::First }.name(), "begin_drag");
        assert_eq!(Action::EndDrag.name(), "end_drag");
    }
}
