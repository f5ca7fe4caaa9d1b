// Adapters layer: concrete implementations of the domain ports for external systems.

pub mod csv_store;
pub mod graphql;
pub mod rest_sink;

pub use csv_store::CsvCountryStore;
pub use graphql::GraphQlCountrySource;
pub use rest_sink::RestCountrySink;
