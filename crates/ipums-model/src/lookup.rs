use std::collections::HashMap;

/// Case-insensitive map from variable name to its first declaration position.
///
/// Names may repeat across record types (e.g. `SERIAL` in both household and
/// person records); the first declaration wins.
#[derive(Debug, Clone, Default)]
pub struct VariableIndex {
    map: HashMap<String, usize>,
}

impl VariableIndex {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for (position, name) in names.into_iter().enumerate() {
            map.entry(name.as_ref().to_ascii_uppercase())
                .or_insert(position);
        }
        Self { map }
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.map.get(&name.to_ascii_uppercase()).copied()
    }
}
