//! Modal viewer over a [`Carousel`]: hidden until opened at an item, then
//! steered with the arrow keys and dismissed with Escape.

use std::time::Instant;

use tracing::debug;

use crate::carousel::Carousel;
use crate::error::Error;
use crate::events::{IndexChange, Key};

/// Outcome of feeding input to a lightbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxAction {
    Opened(IndexChange),
    Moved(IndexChange),
    Closed,
    Ignored,
}

#[derive(Debug)]
pub struct Lightbox<T> {
    carousel: Carousel<T>,
    open: bool,
}

impl<T> Lightbox<T> {
    /// Wraps `carousel` in the closed state.
    pub fn new(carousel: Carousel<T>) -> Self {
        Self {
            carousel,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn carousel(&self) -> &Carousel<T> {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel<T> {
        &mut self.carousel
    }

    /// Shows the item at `index`.
    ///
    /// # Errors
    /// Same as [`Carousel::go_to`]; the lightbox stays closed on error.
    pub fn open(&mut self, index: usize, now: Instant) -> Result<IndexChange, Error> {
        let change = self.carousel.go_to(index, now)?;
        self.open = true;
        debug!(index, "lightbox opened");
        Ok(change)
    }

    /// Hides the lightbox, keeping the current index. Returns whether it was open.
    pub fn close(&mut self) -> bool {
        let was_open = std::mem::replace(&mut self.open, false);
        if was_open {
            debug!("lightbox closed");
        }
        was_open
    }

    /// Keyboard handling while the lightbox is shown. Closed lightboxes ignore keys.
    ///
    /// # Errors
    /// Propagates navigation errors from the underlying carousel.
    pub fn handle_key(&mut self, key: &Key, now: Instant) -> Result<LightboxAction, Error> {
        if !self.open {
            return Ok(LightboxAction::Ignored);
        }
        Ok(match key {
            Key::Escape => {
                self.close();
                LightboxAction::Closed
            }
            Key::ArrowLeft => LightboxAction::Moved(self.carousel.previous(now)?),
            Key::ArrowRight => LightboxAction::Moved(self.carousel.next(now)?),
            _ => LightboxAction::Ignored,
        })
    }

    /// Key press on the thumbnail at `index`: Enter or Space opens it.
    ///
    /// # Errors
    /// Same as [`Lightbox::open`].
    pub fn activate(
        &mut self,
        index: usize,
        key: &Key,
        now: Instant,
    ) -> Result<LightboxAction, Error> {
        match key {
            Key::Enter | Key::Space => Ok(LightboxAction::Opened(self.open(index, now)?)),
            _ => Ok(LightboxAction::Ignored),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::CarouselOptions;

    fn gallery(len: usize) -> Lightbox<usize> {
        let items: Vec<usize> = (0..len).collect();
        Lightbox::new(Carousel::new(items, CarouselOptions::default(), Instant::now()))
    }

    #[test]
    fn keys_are_ignored_while_closed() {
        let now = Instant::now();
        let mut lightbox = gallery(3);
        assert_eq!(
            lightbox.handle_key(&Key::ArrowRight, now),
            Ok(LightboxAction::Ignored)
        );
        assert_eq!(lightbox.carousel().current_index(), Some(0));
    }

    #[test]
    fn arrows_navigate_and_escape_closes() {
        let now = Instant::now();
        let mut lightbox = gallery(3);
        lightbox.open(2, now).unwrap();
        assert!(lightbox.is_open());

        let action = lightbox.handle_key(&Key::ArrowRight, now).unwrap();
        assert!(matches!(action, LightboxAction::Moved(change) if change.current == 0));
        let action = lightbox.handle_key(&Key::ArrowLeft, now).unwrap();
        assert!(matches!(action, LightboxAction::Moved(change) if change.current == 2));
        assert_eq!(
            lightbox.handle_key(&Key::Other("Tab".into()), now),
            Ok(LightboxAction::Ignored)
        );

        assert_eq!(lightbox.handle_key(&Key::Escape, now), Ok(LightboxAction::Closed));
        assert!(!lightbox.is_open());
        assert_eq!(lightbox.carousel().current_index(), Some(2));
        assert!(!lightbox.close());
    }

    #[test]
    fn enter_or_space_on_thumbnail_opens() {
        let now = Instant::now();
        let mut lightbox = gallery(4);
        assert_eq!(
            lightbox.activate(1, &Key::Other("a".into()), now),
            Ok(LightboxAction::Ignored)
        );
        assert!(!lightbox.is_open());
        let action = lightbox.activate(3, &Key::Space, now).unwrap();
        assert!(matches!(action, LightboxAction::Opened(change) if change.current == 3));
        assert!(lightbox.is_open());
    }

    #[test]
    fn failed_open_stays_closed() {
        let now = Instant::now();
        let mut lightbox = gallery(2);
        assert_eq!(
            lightbox.open(5, now),
            Err(Error::IndexOutOfRange { index: 5, len: 2 })
        );
        assert!(!lightbox.is_open());
    }
}
