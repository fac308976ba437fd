use serde::Serialize;

/// Identity of a read operation: operation name plus the serialized
/// parameter set. Two keys are equal iff both components are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    name: &'static str,
    params: String,
}

#[derive(thiserror::Error, Debug)]
#[error("query parameters are not serializable: {0}")]
pub struct ParamsError(#[from] serde_json::Error);

impl QueryKey {
    pub fn new<P: Serialize>(name: &'static str, params: &P) -> Result<Self, ParamsError> {
        Ok(Self {
            name,
            params: serde_json::to_string(params)?,
        })
    }

    pub fn bare(name: &'static str) -> Self {
        Self {
            name,
            params: String::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn params(&self) -> &str {
        &self.params
    }
}
