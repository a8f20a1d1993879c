pub mod ip_api;
pub mod nominatim;

pub use ip_api::IpApiLocator;
pub use nominatim::NominatimResolver;
