use std::fmt;
use std::time::Duration;

use anyhow::{Result, ensure};
use serde::Deserialize;

pub use region::{Presentation, RegionConfig, RegionKind};

mod region {
    use super::*;

    /// Which part of the page a region drives.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
    #[serde(rename_all = "kebab-case")]
    pub enum RegionKind {
        /// Photo gallery opened in a lightbox.
        Gallery,
        /// Donor-project showcase modal.
        DonorProjects,
        /// Rotating contributions carousel.
        Promotions,
        /// Rotating alert bar at the top of the page.
        Announcements,
    }

    /// How the view layer presents a region's current item.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Presentation {
        /// Hidden until opened at an index; dismiss closes it.
        Lightbox,
        /// Always visible; dismiss removes the region for the rest of the session.
        Carousel,
    }

    impl RegionKind {
        pub const fn presentation(self) -> Presentation {
            match self {
                Self::Gallery | Self::DonorProjects => Presentation::Lightbox,
                Self::Promotions | Self::Announcements => Presentation::Carousel,
            }
        }

        /// Whether autoplay starts armed when the region does not say otherwise.
        pub const fn default_autoplay(self) -> bool {
            matches!(self, Self::Promotions | Self::Announcements)
        }

        pub const fn as_str(self) -> &'static str {
            match self {
                Self::Gallery => "gallery",
                Self::DonorProjects => "donor-projects",
                Self::Promotions => "promotions",
                Self::Announcements => "announcements",
            }
        }
    }

    impl fmt::Display for RegionKind {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "kebab-case", deny_unknown_fields)]
    pub struct RegionConfig {
        /// Unique name used to address the region from the command stream.
        pub name: String,
        pub kind: RegionKind,
        /// Ordered item descriptors (image references, slide ids, messages).
        #[serde(default)]
        pub items: Vec<String>,
        /// Autoplay cadence.
        #[serde(default, with = "humantime_serde")]
        pub interval: Option<Duration>,
        /// Overrides the kind's autoplay default.
        #[serde(default)]
        pub autoplay: Option<bool>,
    }

    impl RegionConfig {
        pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(5000);
        pub const MAX_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

        pub fn effective_interval(&self) -> Duration {
            self.interval.unwrap_or(Self::DEFAULT_INTERVAL)
        }

        pub fn autoplay_armed(&self) -> bool {
            self.autoplay.unwrap_or_else(|| self.kind.default_autoplay())
        }

        pub fn presentation(&self) -> Presentation {
            self.kind.presentation()
        }

        pub fn validate(&self, prefix: &str) -> Result<()> {
            ensure!(
                !self.name.trim().is_empty(),
                "{}.name must not be blank",
                prefix
            );
            ensure!(
                !self.name.chars().any(char::is_whitespace),
                "{}.name must not contain whitespace",
                prefix
            );
            if let Some(interval) = self.interval {
                ensure!(
                    !interval.is_zero(),
                    "{}.interval must be greater than zero",
                    prefix
                );
                ensure!(
                    interval <= Self::MAX_INTERVAL,
                    "{}.interval must be at most {}",
                    prefix,
                    humantime::format_duration(Self::MAX_INTERVAL)
                );
            }
            for (idx, item) in self.items.iter().enumerate() {
                ensure!(
                    !item.trim().is_empty(),
                    "{}.items[{}] must not be blank",
                    prefix,
                    idx
                );
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region_from_yaml(input: &str) -> RegionConfig {
        serde_yaml::from_str(input).expect("valid yaml")
    }

    #[test]
    fn autoplay_defaults_follow_kind() {
        let promos = region_from_yaml(
            r#"
name: promos
kind: promotions
items: ["a", "b"]
"#,
        );
        assert!(promos.autoplay_armed());
        assert_eq!(promos.effective_interval(), Duration::from_secs(5));

        let gallery = region_from_yaml(
            r#"
name: photos
kind: gallery
items: ["a.jpg"]
"#,
        );
        assert!(!gallery.autoplay_armed());
        assert_eq!(gallery.presentation(), Presentation::Lightbox);
    }

    #[test]
    fn explicit_autoplay_overrides_kind() {
        let donors = region_from_yaml(
            r#"
name: donors
kind: donor-projects
autoplay: true
interval: 3s
"#,
        );
        assert!(donors.autoplay_armed());
        assert_eq!(donors.effective_interval(), Duration::from_secs(3));
        assert!(donors.items.is_empty());
    }

    #[test]
    fn zero_interval_rejected() {
        let region = region_from_yaml(
            r#"
name: promos
kind: promotions
interval: 0s
"#,
        );
        let err = region.validate("regions[0]").unwrap_err();
        assert!(err.to_string().contains("interval"));
    }

    #[test]
    fn interval_longer_than_a_day_rejected() {
        let region = region_from_yaml(
            r#"
name: promos
kind: promotions
interval: 300000000000years
"#,
        );
        let err = region.validate("regions[0]").unwrap_err();
        assert!(err.to_string().contains("regions[0].interval must be at most 1day"));

        let region = region_from_yaml(
            r#"
name: promos
kind: promotions
interval: 24h
"#,
        );
        assert!(region.validate("regions[0]").is_ok());
    }

    #[test]
    fn blank_items_and_names_rejected() {
        let region = region_from_yaml(
            r#"
name: "alerts bar"
kind: announcements
"#,
        );
        assert!(region.validate("regions[0]").is_err());

        let region = region_from_yaml(
            r#"
name: alerts
kind: announcements
items: ["ok", "  "]
"#,
        );
        let err = region.validate("regions[1]").unwrap_err();
        assert!(err.to_string().contains("regions[1].items[1]"));
    }

    #[test]
    fn unknown_fields_rejected() {
        let parsed: Result<RegionConfig, _> = serde_yaml::from_str(
            r#"
name: promos
kind: promotions
speed: fast
"#,
        );
        assert!(parsed.is_err());
    }
}
