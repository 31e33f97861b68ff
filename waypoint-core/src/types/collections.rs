//! FxHash-based collections used throughout the engine.
//!
//! Analysis keys are short strings and small integer ids; FxHash beats SipHash
//! on both without any DoS exposure (inputs come from the host compiler, not
//! the network).

pub use rustc_hash::{FxHashMap, FxHashSet};
