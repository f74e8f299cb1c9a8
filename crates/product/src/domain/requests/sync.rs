use std::{fmt, str::FromStr};

/// External catalogs the sync workflow knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncSource {
    Dummy,
    FakeStore,
}

impl SyncSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncSource::Dummy => "dummy",
            SyncSource::FakeStore => "fakestore",
        }
    }
}

impl fmt::Display for SyncSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyncSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dummy" => Ok(SyncSource::Dummy),
            "fakestore" => Ok(SyncSource::FakeStore),
            other => Err(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_known_sources_parse() {
        assert_eq!("dummy".parse::<SyncSource>(), Ok(SyncSource::Dummy));
        assert_eq!("fakestore".parse::<SyncSource>(), Ok(SyncSource::FakeStore));
        assert_eq!("DUMMY".parse::<SyncSource>(), Err("DUMMY".to_string()));
        assert_eq!(" dummy".parse::<SyncSource>(), Err(" dummy".to_string()));
        assert_eq!("amazon".parse::<SyncSource>(), Err("amazon".to_string()));
    }
}
