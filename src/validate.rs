//! Validators for the optional `<url>` properties of the sitemaps.org protocol.
//! See <https://www.sitemaps.org/protocol.html#xmlTagDefinitions>

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{W3C_DATE, W3C_DATETIME};

static W3C_DATE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(W3C_DATE).expect("Failed to compile W3C_DATE regex"));

static W3C_DATETIME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(W3C_DATETIME).expect("Failed to compile W3C_DATETIME regex"));

/// Values accepted by the `<changefreq>` tag.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
        }
    }
}

impl std::str::FromStr for ChangeFreq {
    type Err = String;

    // Matching is exact: "Daily" is not a valid value.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "always" => Ok(ChangeFreq::Always),
            "hourly" => Ok(ChangeFreq::Hourly),
            "daily" => Ok(ChangeFreq::Daily),
            "weekly" => Ok(ChangeFreq::Weekly),
            "monthly" => Ok(ChangeFreq::Monthly),
            "yearly" => Ok(ChangeFreq::Yearly),
            "never" => Ok(ChangeFreq::Never),
            _ => Err(format!("Invalid changefreq value: {}", input)),
        }
    }
}

impl std::fmt::Display for ChangeFreq {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Checks if the provided string matches the W3C date (`1997-07-16`)
/// or date-time (`1997-07-16T19:20:30+01:00`) format.
///
/// Only the shape is checked, `2024-13-45` passes.
pub fn is_valid_date(date: &str) -> bool {
    W3C_DATE_REGEX.is_match(date) || W3C_DATETIME_REGEX.is_match(date)
}

/// Checks if the provided string is one of the values allowed for `<changefreq>`.
pub fn is_valid_changefreq(changefreq: &str) -> bool {
    changefreq.parse::<ChangeFreq>().is_ok()
}

/// Checks if the provided string is a number within `0.0..=1.0`.
/// Surrounding whitespace is ignored.
pub fn is_valid_priority(priority: &str) -> bool {
    priority
        .trim()
        .parse::<f64>()
        .is_ok_and(|value| (0.0..=1.0).contains(&value))
}

#[cfg(test)]
mod tests {
    use super::{ChangeFreq, is_valid_changefreq, is_valid_date, is_valid_priority};
    use spectral::assert_that;
    use spectral::boolean::BooleanAssertions;

    #[test]
    fn dates() {
        assert_that(&is_valid_date("1997-07-16")).is_true();
        assert_that(&is_valid_date("1997-07-16T19:20:30")).is_true();
        assert_that(&is_valid_date("1997-07-16T19:20:30+01:00")).is_true();
        assert_that(&is_valid_date("1997-07-16T19:20:30Z")).is_true();

        assert_that(&is_valid_date("1997/07/16")).is_false();
        assert_that(&is_valid_date("1997-07-16T19:20")).is_false();
        assert_that(&is_valid_date("1997-07-16T19:20:30-01:00")).is_false();
        assert_that(&is_valid_date("16-07-1997")).is_false();
        assert_that(&is_valid_date("")).is_false();
    }

    #[test]
    fn changefreqs() {
        for value in [
            "always", "hourly", "daily", "weekly", "monthly", "yearly", "never",
        ] {
            assert_that(&is_valid_changefreq(value)).is_true();
        }

        assert_that(&is_valid_changefreq("Daily")).is_false();
        assert_that(&is_valid_changefreq("every two days")).is_false();
        assert_that(&"weekly".parse::<ChangeFreq>().ok()).is_equal_to(Some(ChangeFreq::Weekly));
        assert_that(&ChangeFreq::Monthly.to_string()).is_equal_to("monthly".to_owned());
    }

    #[test]
    fn priorities() {
        assert_that(&is_valid_priority("0")).is_true();
        assert_that(&is_valid_priority("0.5")).is_true();
        assert_that(&is_valid_priority("1.0")).is_true();
        assert_that(&is_valid_priority(" 0.5 ")).is_true();
        assert_that(&is_valid_priority("\t1\n")).is_true();

        assert_that(&is_valid_priority("1.1")).is_false();
        assert_that(&is_valid_priority("-0.1")).is_false();
        assert_that(&is_valid_priority("high")).is_false();
        assert_that(&is_valid_priority("NaN")).is_false();
        assert_that(&is_valid_priority("  ")).is_false();
    }
}
