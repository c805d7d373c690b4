pub mod driver;

pub use driver::{Collection, Db};
