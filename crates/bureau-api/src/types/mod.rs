//! Tipos trafegados pela API do Bureau

pub mod dashboard;
pub mod detection;
pub mod person;
pub mod token;
pub mod user;

pub use dashboard::{DashboardStats, MessageResponse, SystemHealth};
pub use detection::{Detection, NewDetection};
pub use person::{NewPerson, Person, Photo, Priority};
pub use token::{LoginRequest, TokenPair};
pub use user::{NewUser, Role, SessionIdentity, User};
