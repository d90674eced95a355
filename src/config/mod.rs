//! Configuration module

mod site;

pub use site::HomeConfig;
pub use site::LayoutConfig;
pub use site::SiteConfig;
pub use site::SocialLink;
