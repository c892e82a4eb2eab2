use std::collections::BTreeMap;

/// Repositories keyed by the (classified) output they produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputGroups {
    groups: BTreeMap<String, Vec<String>>,
}

/// A printable group: the joined repository names and their shared output.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct OutputGroup {
    /// `"repo1, repo2, ...:"`
    pub header: String,
    pub output: String,
}

impl OutputGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `repository` produced `output`
    pub fn add(&mut self, output: impl Into<String>, repository: impl Into<String>) {
        self.groups
            .entry(output.into())
            .or_default()
            .push(repository.into());
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Repositories that produced `output`, in insertion order
    pub fn repositories(&self, output: &str) -> Option<&[String]> {
        self.groups.get(output).map(Vec::as_slice)
    }

    /// Groups ready for printing.
    ///
    /// Names inside a group are sorted, then groups are sorted by their
    /// joined-name header (output breaks ties).
    pub fn sorted(&self) -> Vec<OutputGroup> {
        let mut result: Vec<OutputGroup> = self
            .groups
            .iter()
            .map(|(output, repositories)| {
                let mut repositories = repositories.clone();
                repositories.sort();
                OutputGroup {
                    header: format!("{}:", repositories.join(", ")),
                    output: output.clone(),
                }
            })
            .collect();

        result.sort();
        result
    }
}
