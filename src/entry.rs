//! A single `<url>` entry of a sub-sitemap.

use log::warn;
use quick_xml::escape::partial_escape;

use crate::validate::{is_valid_changefreq, is_valid_date, is_valid_priority};

/// URL with its optional `<lastmod>`, `<priority>` and `<changefreq>` properties.
///
/// `loc` is relative to the root URL of the writer the entry is added to.
/// Properties are kept as given; invalid ones are dropped with a warning when the
/// entry is rendered.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct UrlEntry<'a> {
    pub loc: &'a str,
    pub lastmod: Option<&'a str>,
    pub priority: Option<&'a str>,
    pub changefreq: Option<&'a str>,
}

impl<'a> UrlEntry<'a> {
    pub fn new(loc: &'a str) -> Self {
        Self {
            loc,
            ..Default::default()
        }
    }

    pub fn lastmod(mut self, lastmod: &'a str) -> Self {
        self.lastmod = Some(lastmod);
        self
    }

    pub fn priority(mut self, priority: &'a str) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn changefreq(mut self, changefreq: &'a str) -> Self {
        self.changefreq = Some(changefreq);
        self
    }

    /// Renders the `<url>` tag for an already absolute `url`.
    ///
    /// Tags are always emitted in the `loc`, `lastmod`, `priority`, `changefreq` order.
    pub(crate) fn to_xml(self, url: &str) -> String {
        let mut xml = format!("<url><loc>{}</loc>", partial_escape(url));

        if let Some(lastmod) = checked(self.lastmod, is_valid_date, "lastmod", url) {
            xml.push_str(&format!("<lastmod>{}</lastmod>", partial_escape(lastmod)));
        }
        if let Some(priority) = checked(self.priority, is_valid_priority, "priority", url) {
            xml.push_str(&format!("<priority>{}</priority>", partial_escape(priority)));
        }
        if let Some(changefreq) = checked(self.changefreq, is_valid_changefreq, "changefreq", url)
        {
            xml.push_str(&format!(
                "<changefreq>{}</changefreq>",
                partial_escape(changefreq)
            ));
        }

        xml.push_str("</url>");
        xml
    }
}

impl<'a> From<&'a str> for UrlEntry<'a> {
    fn from(loc: &'a str) -> Self {
        Self::new(loc)
    }
}

impl<'a> From<&'a String> for UrlEntry<'a> {
    fn from(loc: &'a String) -> Self {
        Self::new(loc)
    }
}

/// Empty values are treated as absent, invalid ones are dropped with a warning.
fn checked<'v>(
    value: Option<&'v str>,
    is_valid: fn(&str) -> bool,
    tag: &str,
    url: &str,
) -> Option<&'v str> {
    let value = value.filter(|value| !value.is_empty())?;
    if is_valid(value) {
        Some(value)
    } else {
        warn!("Invalid <{tag}> value for URL <{url}>: {value}");
        None
    }
}
