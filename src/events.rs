use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// What moved the current index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeCause {
    User,
    Autoplay,
}

impl ChangeCause {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Autoplay => "autoplay",
        }
    }
}

/// Emitted after every successful navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexChange {
    pub previous: Option<usize>,
    pub current: usize,
    pub cause: ChangeCause,
}

/// A key press forwarded from the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Enter,
    Space,
    Other(String),
}

impl FromStr for Key {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Escape" | "Esc" => Self::Escape,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "Enter" => Self::Enter,
            " " | "Space" => Self::Space,
            other => Self::Other(other.to_string()),
        })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Escape => f.write_str("Escape"),
            Self::ArrowLeft => f.write_str("ArrowLeft"),
            Self::ArrowRight => f.write_str("ArrowRight"),
            Self::Enter => f.write_str("Enter"),
            Self::Space => f.write_str("Space"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// User input addressed to one region, independent of whether it came from a
/// click, a key press or a touch gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionCommand {
    Advance,
    Retreat,
    JumpTo(usize),
    /// Open a lightbox region at an index. Carousel regions treat it as a jump.
    Open(usize),
    PauseEntered,
    PauseLeft,
    Dismiss,
    Key(Key),
    /// Key press on the thumbnail at `index` of a lightbox region.
    Activate { index: usize, key: Key },
}

/// Forwarded by a region task to the view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionEvent {
    pub region: String,
    #[serde(flatten)]
    pub kind: RegionEventKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum RegionEventKind {
    IndexChanged(IndexChange),
    Opened { index: usize },
    Closed,
    Dismissed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_events_serialize_flat() {
        let event = RegionEvent {
            region: "promos".into(),
            kind: RegionEventKind::IndexChanged(IndexChange {
                previous: Some(0),
                current: 1,
                cause: ChangeCause::Autoplay,
            }),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "region": "promos",
                "event": "index-changed",
                "previous": 0,
                "current": 1,
                "cause": "autoplay",
            })
        );

        let closed = RegionEvent {
            region: "gallery".into(),
            kind: RegionEventKind::Closed,
        };
        assert_eq!(
            serde_json::to_value(&closed).unwrap(),
            serde_json::json!({ "region": "gallery", "event": "closed" })
        );
    }

    #[test]
    fn key_names_parse() {
        assert_eq!("Escape".parse::<Key>(), Ok(Key::Escape));
        assert_eq!("Right".parse::<Key>(), Ok(Key::ArrowRight));
        assert_eq!("Tab".parse::<Key>(), Ok(Key::Other("Tab".into())));
    }
}
