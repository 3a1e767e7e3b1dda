pub mod cleanup;
pub mod clipper;
pub mod duplicate;
pub mod intercept;
pub mod nav_filter;
pub mod normalize;

pub use cleanup::ScratchCleaner;
pub use clipper::ContentClipper;
pub use duplicate::TreeDuplicator;
pub use intercept::ConfigInterceptor;
pub use nav_filter::NavigationFilter;
pub use normalize::UrlNormalizer;
