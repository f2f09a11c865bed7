pub mod clock;
pub mod mood_cache;
pub mod store;


pub use clock::*;
pub use mood_cache::*;
pub use store::*;
