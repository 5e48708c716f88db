//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no course-domain knowledge:
//! - Cookie parsing and `Set-Cookie` construction
//! - HMAC signing, Base64, constant-time comparison
//! - Client IP extraction for request logging
//! - Outbound HTTP reachability probing for submitted links

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod link_probe;
