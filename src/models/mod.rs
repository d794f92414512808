pub mod artist;
pub mod show;
pub mod venue;

pub use artist::{Artist, NewArtist};
pub use show::{ArtistSummary, NewShow, Show, VenueSummary};
pub use venue::{NewVenue, Venue};
