pub mod donation;

pub use donation::{Donation, DonationChanges};
