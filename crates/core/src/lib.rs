//! # Showbill Core
//!
//! Domain types shared by the storage and HTTP layers of the Showbill venue
//! and artist booking directory.
//!
//! - **models**: venues, artists, shows, genres and the view models built from them
//! - **forms**: typed, validated representations of submitted form fields
//! - **store**: the [`store::BookingStore`] trait implemented by every backend
//! - **errors**: the error taxonomy surfaced to handlers

pub mod errors;
pub mod forms;
pub mod models;
pub mod store;
