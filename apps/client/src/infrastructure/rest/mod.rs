// REST data API client
// PostgREST-style table endpoints under `/rest/v1`

pub mod client;
pub mod query;

pub use client::RestClient;
pub use query::Query;
