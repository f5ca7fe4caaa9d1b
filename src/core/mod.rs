pub mod relay;
pub mod retry;

pub use crate::domain::model::{Country, PostId};
pub use crate::domain::ports::{ConfigProvider, CountrySink, CountrySource, CountryStore, Storage};
pub use crate::utils::error::Result;
