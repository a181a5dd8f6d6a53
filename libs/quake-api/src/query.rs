/// A point query: one region, one month.
///
/// The region is normalised to upper case on construction, so `"ca"` and
/// `"CA"` address the same row and report the same region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupQuery {
    region: String,
    year: i32,
    month: u32,
}

impl LookupQuery {
    pub fn new(region: &str, year: i32, month: u32) -> Self {
        Self {
            region: region.trim().to_uppercase(),
            year,
            month,
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// `REGION#YEAR#MM`, month zero-padded to two digits.
    pub fn row_key(&self) -> String {
        format!("{}#{}#{:02}", self.region, self.year, self.month)
    }
}

impl std::fmt::Display for LookupQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.row_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_key_format() {
        assert_eq!(LookupQuery::new("ca", 2020, 3).row_key(), "CA#2020#03");
        assert_eq!(LookupQuery::new(" Nv ", 1999, 12).row_key(), "NV#1999#12");
    }

    #[test]
    fn region_is_upper_cased() {
        let q = LookupQuery::new("wa", 2021, 7);
        assert_eq!(q.region(), "WA");
        assert_eq!(q, LookupQuery::new("WA", 2021, 7));
    }
}
