//! Information about this project.

/// The formal name of this product.
pub const PRODUCT_NAME: &str = "cunit";

/// The URI to display as the product's homepage.
pub const PRODUCT_DISPLAY_URI: &str = env!("CARGO_PKG_REPOSITORY");

/// The version of the product, in string form.
pub const PRODUCT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Info regarding the specific version of sources used to build this product.
pub const PRODUCT_GIT_VERSION: &str = git_version::git_version!(fallback = "unknown");

/// Version string shown by `--version`.
pub const VERSION: &str = const_format::concatcp!(PRODUCT_VERSION, " (", PRODUCT_GIT_VERSION, ")");
