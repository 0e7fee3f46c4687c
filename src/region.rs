//! One interactive page region: a named engine plus the presentation that
//! decides how commands such as "open" and "dismiss" are interpreted.

use std::time::Instant;

use config_model::{Presentation, RegionConfig, RegionKind};
use tracing::debug;

use crate::carousel::{Carousel, CarouselOptions};
use crate::error::Error;
use crate::events::{Key, RegionCommand, RegionEventKind};
use crate::lightbox::{Lightbox, LightboxAction};

#[derive(Debug)]
enum RegionView<T> {
    Lightbox(Lightbox<T>),
    Carousel(Carousel<T>),
}

#[derive(Debug)]
pub struct Region<T> {
    name: String,
    kind: RegionKind,
    view: RegionView<T>,
}

impl Region<String> {
    pub fn from_config(cfg: &RegionConfig, now: Instant) -> Self {
        let options = CarouselOptions {
            interval: cfg.effective_interval(),
            autoplay: cfg.autoplay_armed(),
        };
        let carousel = Carousel::new(cfg.items.clone(), options, now);
        Self::new(cfg.name.clone(), cfg.kind, carousel)
    }
}

impl<T> Region<T> {
    pub fn new(name: impl Into<String>, kind: RegionKind, carousel: Carousel<T>) -> Self {
        let view = match kind.presentation() {
            Presentation::Lightbox => RegionView::Lightbox(Lightbox::new(carousel)),
            Presentation::Carousel => RegionView::Carousel(carousel),
        };
        Self {
            name: name.into(),
            kind,
            view,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> RegionKind {
        self.kind
    }

    pub fn carousel(&self) -> &Carousel<T> {
        match &self.view {
            RegionView::Lightbox(lightbox) => lightbox.carousel(),
            RegionView::Carousel(carousel) => carousel,
        }
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel<T> {
        match &mut self.view {
            RegionView::Lightbox(lightbox) => lightbox.carousel_mut(),
            RegionView::Carousel(carousel) => carousel,
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.carousel().next_deadline()
    }

    /// Applies one user command. At most one event results from a command.
    ///
    /// # Errors
    /// Navigation errors from the engine; the region state is left unchanged.
    pub fn handle(
        &mut self,
        command: &RegionCommand,
        now: Instant,
    ) -> Result<Option<RegionEventKind>, Error> {
        let event = match command {
            RegionCommand::Advance => {
                Some(RegionEventKind::IndexChanged(self.carousel_mut().next(now)?))
            }
            RegionCommand::Retreat => {
                Some(RegionEventKind::IndexChanged(self.carousel_mut().previous(now)?))
            }
            RegionCommand::JumpTo(index) => {
                Some(RegionEventKind::IndexChanged(self.carousel_mut().go_to(*index, now)?))
            }
            RegionCommand::PauseEntered => {
                self.carousel_mut().pause();
                None
            }
            RegionCommand::PauseLeft => {
                self.carousel_mut().resume(now);
                None
            }
            RegionCommand::Open(index) => match &mut self.view {
                RegionView::Lightbox(lightbox) => {
                    let change = lightbox.open(*index, now)?;
                    Some(RegionEventKind::Opened {
                        index: change.current,
                    })
                }
                RegionView::Carousel(carousel) => {
                    Some(RegionEventKind::IndexChanged(carousel.go_to(*index, now)?))
                }
            },
            RegionCommand::Dismiss => match &mut self.view {
                RegionView::Lightbox(lightbox) => lightbox.close().then_some(RegionEventKind::Closed),
                RegionView::Carousel(carousel) => {
                    carousel.stop();
                    Some(RegionEventKind::Dismissed)
                }
            },
            RegionCommand::Key(key) => match &mut self.view {
                RegionView::Lightbox(lightbox) => match lightbox.handle_key(key, now)? {
                    LightboxAction::Moved(change) | LightboxAction::Opened(change) => {
                        Some(RegionEventKind::IndexChanged(change))
                    }
                    LightboxAction::Closed => Some(RegionEventKind::Closed),
                    LightboxAction::Ignored => None,
                },
                RegionView::Carousel(_) => {
                    debug!(region = %self.name, %key, "key ignored by carousel region");
                    None
                }
            },
            RegionCommand::Activate { index, key } => self.activate(*index, key, now)?,
        };
        Ok(event)
    }

    /// Key press on the thumbnail at `index` of a lightbox region.
    ///
    /// # Errors
    /// Navigation errors from the engine.
    pub fn activate(
        &mut self,
        index: usize,
        key: &Key,
        now: Instant,
    ) -> Result<Option<RegionEventKind>, Error> {
        match &mut self.view {
            RegionView::Lightbox(lightbox) => match lightbox.activate(index, key, now)? {
                LightboxAction::Opened(change) => Ok(Some(RegionEventKind::Opened {
                    index: change.current,
                })),
                _ => Ok(None),
            },
            RegionView::Carousel(_) => Ok(None),
        }
    }

    /// Runs due automatic advances.
    pub fn advance_to(&mut self, now: Instant) -> Vec<RegionEventKind> {
        self.carousel_mut()
            .advance_to(now)
            .into_iter()
            .map(RegionEventKind::IndexChanged)
            .collect()
    }

    /// At most one automatic advance; missed deadlines are skipped.
    pub fn tick(&mut self, now: Instant) -> Option<RegionEventKind> {
        self.carousel_mut().tick(now).map(RegionEventKind::IndexChanged)
    }

    /// Releases the timer; called on teardown.
    pub fn shutdown(&mut self) {
        self.carousel_mut().stop();
        if let RegionView::Lightbox(lightbox) = &mut self.view {
            lightbox.close();
        }
    }
}
