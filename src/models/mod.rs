//! Domain models and the DTOs used for
//! serializing/deserializing HTTP request and response bodies.

pub mod banner;
pub mod requests;
pub mod responses;
pub mod user;

// Re-export commonly used types
pub use banner::{Banner, Feature, Tag};
pub use requests::{
    BannerFilter, BannerFilterQuery, BannerPayload, UserBannerParams, UserBannerQuery,
};
pub use responses::{DeleteResponse, ErrorResponse, HealthResponse, StatsResponse};
pub use user::{LoginRequest, NewUser, RegisterRequest, User};
