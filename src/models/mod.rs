//! Data models
//!
//! This module contains all data structures used throughout the bursary
//! client. Models represent:
//! - Mirrored provider records (Identity)
//! - Local session state (Session)
//! - Backend entities (UserProfile, Scholarship, Application, Review)
//! - Payment/checkout data transfer objects

mod application;
mod identity;
mod payment;
mod review;
mod scholarship;
mod session;
mod user;

pub use application::{
    Application, ApplicationStatus, CreateApplicationInput, UpdateApplicationInput,
};
pub use identity::Identity;
pub use payment::{CheckoutSummary, PaymentIntent, PaymentReceipt};
pub use review::{CreateReviewInput, Review, UpdateReviewInput};
pub use scholarship::{
    CreateScholarshipInput, Degree, Scholarship, ScholarshipCategory, UpdateScholarshipInput,
};
pub use session::Session;
pub use user::{CreateUserInput, UpdateProfileInput, UserProfile, UserRole};
