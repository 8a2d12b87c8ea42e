pub mod donations;

pub use donations::{
    CreateDonationRequest, DonationResponse, MessageResponse, UpdateDonationRequest,
};
