//! Typed CRUD services for the resource API.
//!
//! Every call goes through the [`Dispatcher`](crate::client::Dispatcher), so
//! expired sessions are refreshed transparently.

pub mod activities;
pub mod activity_bookings;
pub mod dashboard;
pub mod room_bookings;

pub use activities::{Activities, Activity, CreateActivity, UpdateActivity};
pub use activity_bookings::{
    ActivityBooking, ActivityBookings, CreateActivityBooking, UpdateActivityBooking,
};
pub use dashboard::DashboardStats;
pub use room_bookings::{CreateRoomBooking, RoomBooking, RoomBookings, UpdateRoomBooking};
