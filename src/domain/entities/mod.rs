pub mod campaign;
pub mod contact;
pub mod pagination;
pub mod template;

pub use campaign::*;
pub use contact::*;
pub use pagination::*;
pub use template::*;
