// Sitemap file that you provide must have no more than 50,000 URLs
// and must be no larger than 10MB (10,485,760 bytes).
// See https://www.sitemaps.org/protocol.html#index
pub const URLS_PER_FILE: usize = 15000;

pub const GZIP_COMPRESSION_LEVEL: u32 = 9;

pub const DEFAULT_SECTION: &str = "pages";

pub const INDEX_FILE_NAME: &str = "sitemap.xml";

pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

pub(crate) const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

pub(crate) const GENERATOR: &str = concat!("sitemill ", env!("CARGO_PKG_VERSION"));

pub(crate) const W3C_DATE: &str = r"^\d{4}-\d{2}-\d{2}$";

pub(crate) const W3C_DATETIME: &str = r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\+\d{2}:\d{2}|Z)?$";
