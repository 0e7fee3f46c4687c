pub mod autoplay;
pub mod carousel;
pub mod collection;
pub mod config;
pub mod control;
pub mod error;
pub mod events;
pub mod indicator;
pub mod lightbox;
pub mod region;
pub mod simulate;
pub mod tasks {
    pub mod region;
    pub mod router;
}

pub use carousel::{Carousel, CarouselOptions, IndexObserver};
pub use error::Error;
