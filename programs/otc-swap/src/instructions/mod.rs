pub mod cancel_swap;
pub mod execute_swap;
pub mod initialize_swap;

pub use cancel_swap::*;
pub use execute_swap::*;
pub use initialize_swap::*;
