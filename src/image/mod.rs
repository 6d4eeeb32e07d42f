pub mod io;
pub mod mask;
pub mod traits;
pub mod u8;

pub use self::mask::BinaryMask;
pub use self::traits::{ImageView, Rows};
pub use self::u8::ImageU8;
