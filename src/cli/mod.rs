pub mod check;
pub mod pad;
pub mod unpad;

pub use check::*;
pub use pad::*;
pub use unpad::*;
