pub mod currconv;

pub use currconv::CurrConvClient;
