//! Client core for the listing reader: upstream fetch, the feed state
//! machine, and the controller that serializes page fetches.

pub mod controller;
pub mod feed;
pub mod source;

pub use controller::FetchController;
pub use feed::{reduce, FeedEvent, FeedState, FetchStatus};
pub use source::{
    listing_url, ListingSource, PageRequest, RedditListingClient, DEFAULT_BASE_URL, PAGE_SIZE,
};
