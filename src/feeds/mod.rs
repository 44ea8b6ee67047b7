mod data_types;
mod fetcher;

pub mod prelude {
    pub use super::data_types::*;
    pub use super::fetcher::*;
}
