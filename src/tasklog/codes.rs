use std::collections::BTreeMap;

/// Translation of allowance codes written by old tasklogs into the codes the
/// portal uses. Codes missing from the table are already current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowanceCodeTable {
    map: BTreeMap<String, String>,
}

/// Codes the legacy tasklog used and their portal equivalent.
pub fn legacy_codes() -> BTreeMap<String, String> {
    [("ABP", "SCM"), ("ABR", "SCW"), ("ALH", "MES")]
        .into_iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect()
}

impl Default for AllowanceCodeTable {
    fn default() -> Self {
        Self::new(legacy_codes())
    }
}

impl AllowanceCodeTable {
    pub fn new(map: BTreeMap<String, String>) -> Self {
        Self { map }
    }

    /// A table that leaves every code as it is.
    pub fn identity() -> Self {
        Self::new(BTreeMap::new())
    }

    pub fn translate<'a>(&'a self, code: &'a str) -> &'a str {
        self.map.get(code).map(String::as_str).unwrap_or(code)
    }
}

impl From<&BTreeMap<String, String>> for AllowanceCodeTable {
    fn from(map: &BTreeMap<String, String>) -> Self {
        Self::new(map.clone())
    }
}
