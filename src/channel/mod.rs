//! The covert channel: encrypt, hide, recover and watermark.
//!
//! Embedding runs payload framing, encryption and LSB embedding in that
//! order; extraction runs them in reverse. Watermarking is independent of
//! both and only looks at the container bytes.

mod operations;
mod types;

pub use operations::{
    compute_capacity, embed, extract, generate_watermark, verify_watermark, CovertChannel,
};
pub use types::{CapacityReport, EmbedOutput};
