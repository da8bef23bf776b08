mod booking_service;
mod errors;

#[allow(unused_imports)]
pub use booking_service::{
    ServiceDependencies, approve_booking, cancel_booking, reject_booking, submit_booking,
};
#[allow(unused_imports)]
pub use errors::{BookingApplicationError, Result};
