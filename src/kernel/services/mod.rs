//! Services layer (ports + adapters).
//!
//! - `ports`: host-facing contracts/types used by the kernel.
//! - `adapters`: concrete hosts (in-memory, stdio plugin protocol) and config resolution.

pub mod adapters;
pub mod ports;
