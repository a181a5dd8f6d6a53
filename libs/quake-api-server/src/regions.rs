use std::collections::HashSet;

/// Two-letter codes of the 48 contiguous US states, the regions the quake
/// table was built for.
pub const LOWER_48: [&str; 48] = [
    "AL", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "ID", "IL", "IN", "IA", "KS", "KY", "LA",
    "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND",
    "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV", "WI", "WY",
];

/// Regions a lookup may name. Empty means anything goes.
#[derive(Debug, Clone, Default)]
pub struct RegionFilter {
    allowed: HashSet<String>,
}

impl RegionFilter {
    pub fn new<I, S>(regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed: regions
                .into_iter()
                .map(|r| r.as_ref().trim().to_uppercase())
                .collect(),
        }
    }

    pub fn lower_48() -> Self {
        Self::new(LOWER_48)
    }

    pub fn any() -> Self {
        Self::default()
    }

    /// `region` must already be upper-cased.
    pub fn allows(&self, region: &str) -> bool {
        self.allowed.is_empty() || self.allowed.contains(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_48_excludes_alaska_and_hawaii() {
        let f = RegionFilter::lower_48();
        assert!(f.allows("CA"));
        assert!(f.allows("WY"));
        assert!(!f.allows("AK"));
        assert!(!f.allows("HI"));
        assert!(!f.allows("DC"));
    }

    #[test]
    fn configured_list_is_normalised() {
        let f = RegionFilter::new(["ca", " nv "]);
        assert!(f.allows("CA"));
        assert!(f.allows("NV"));
        assert!(!f.allows("WA"));
        assert!(RegionFilter::any().allows("ANYWHERE"));
    }
}
